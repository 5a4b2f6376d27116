use simplelog::{ColorChoice, ConfigBuilder, TermLogger, TerminalMode};
use tokio::net::TcpListener;
use todo_server::ServerConfig;

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    let config = ServerConfig::from_env();

    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    if let Err(e) = TermLogger::init(
        config.log_level,
        log_config,
        TerminalMode::Mixed,
        ColorChoice::Auto,
    ) {
        eprintln!("logging disabled: {e}");
    }

    let addr = config.addr();
    let listener = TcpListener::bind(&addr).await?;
    log::info!(
        "listening on {addr}, static files from {}",
        config.static_dir.display()
    );
    todo_server::serve(listener, &config).await
}
