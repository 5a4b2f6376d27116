//! Environment-driven server settings.

use std::path::PathBuf;

use simplelog::LevelFilter;

/// Where `wasm-pack build web --target web --out-dir ../server/static/pkg`
/// leaves the browser bundle, relative to the server's working directory.
pub const DEFAULT_STATIC_DIR: &str = "static";

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub log_level: LevelFilter,
    pub static_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            log_level: LevelFilter::Info,
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
        }
    }
}

impl ServerConfig {
    /// Resolve `HOST`, `PORT`, `TODO_LOG` and `STATIC_DIR` from the process
    /// environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Unparseable values fall back to the defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            port: lookup("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            log_level: lookup("TODO_LOG")
                .and_then(|l| l.parse().ok())
                .unwrap_or(defaults.log_level),
            static_dir: lookup("STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.static_dir),
        }
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn empty_environment_uses_defaults() {
        let config = ServerConfig::from_lookup(|_| None);
        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.addr(), "127.0.0.1:8000");
    }

    #[test]
    fn environment_overrides_defaults() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("HOST", "0.0.0.0"),
            ("PORT", "3000"),
            ("TODO_LOG", "debug"),
            ("STATIC_DIR", "/srv/todo"),
        ]);
        let config = ServerConfig::from_lookup(|k| env.get(k).map(|v| v.to_string()));
        assert_eq!(config.addr(), "0.0.0.0:3000");
        assert_eq!(config.log_level, LevelFilter::Debug);
        assert_eq!(config.static_dir, PathBuf::from("/srv/todo"));
    }

    #[test]
    fn bad_port_falls_back() {
        let config = ServerConfig::from_lookup(|k| (k == "PORT").then(|| "http".to_string()));
        assert_eq!(config.port, 8000);
    }
}
