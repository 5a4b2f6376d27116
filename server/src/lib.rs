//! In-memory todo backend.
//!
//! Serves the JSON API under `/api`, a health probe, the host page whose
//! element ids the list controller relies on, and the browser bundle of
//! `todo-web` under `/static`.

pub mod config;

use std::path::Path;
use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        FromRequest, FromRequestParts, State,
    },
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, patch},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tower_http::services::ServeDir;
use uuid::Uuid;

pub use config::ServerConfig;

const TITLE_MAX_CHARS: usize = 200;
const DESCRIPTION_MAX_CHARS: usize = 1000;
const INDEX_HTML: &str = include_str!("../templates/index.html");

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Todo {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Deserialize)]
pub struct CreateTodo {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub completed: bool,
}

#[derive(Deserialize)]
pub struct UpdateTodo {
    pub title: Option<String>,
    pub description: Option<String>,
    pub completed: Option<bool>,
}

#[derive(Deserialize)]
pub struct ListQuery {
    pub completed: Option<bool>,
}

/// Insertion-ordered store; list responses come back oldest first.
pub type Db = Arc<RwLock<Vec<Todo>>>;

/// Error body shaped as `{"detail": "..."}`.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    detail: String,
}

impl ApiError {
    fn not_found() -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            detail: "Todo not found".to_string(),
        }
    }

    fn invalid(detail: String) -> Self {
        Self {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            detail,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::invalid(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::invalid(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::invalid(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(serde_json::json!({ "detail": self.detail }))).into_response()
    }
}

/// `Json` whose rejections answer with a `{"detail"}` body.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

/// `Path` whose rejections answer with a `{"detail"}` body.
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct ApiPath<T>(pub T);

/// `Query` whose rejections answer with a `{"detail"}` body.
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct ApiQuery<T>(pub T);

/// Router serving `/static` from the default bundle directory.
pub fn app() -> Router {
    router(Path::new(config::DEFAULT_STATIC_DIR))
}

pub fn router(static_dir: &Path) -> Router {
    let db: Db = Arc::new(RwLock::new(Vec::new()));
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/api/todos", get(list_todos).post(create_todo))
        .route(
            "/api/todos/{id}",
            get(get_todo).put(update_todo).delete(delete_todo),
        )
        .route("/api/todos/{id}/toggle", patch(toggle_todo))
        .nest_service("/static", ServeDir::new(static_dir))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

pub async fn serve(listener: TcpListener, config: &ServerConfig) -> Result<(), std::io::Error> {
    axum::serve(listener, router(&config.static_dir)).await
}

fn validate_title(title: &str) -> Result<(), ApiError> {
    let len = title.chars().count();
    if len == 0 || len > TITLE_MAX_CHARS {
        return Err(ApiError::invalid(format!(
            "title must be between 1 and {TITLE_MAX_CHARS} characters"
        )));
    }
    Ok(())
}

fn validate_description(description: Option<&str>) -> Result<(), ApiError> {
    match description {
        Some(d) if d.chars().count() > DESCRIPTION_MAX_CHARS => Err(ApiError::invalid(format!(
            "description must be at most {DESCRIPTION_MAX_CHARS} characters"
        ))),
        _ => Ok(()),
    }
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "healthy", "service": "todo-app" }))
}

async fn list_todos(
    State(db): State<Db>,
    ApiQuery(query): ApiQuery<ListQuery>,
) -> Json<Vec<Todo>> {
    let todos = db.read().await;
    let visible = todos
        .iter()
        .filter(|t| query.completed.map_or(true, |c| t.completed == c))
        .cloned()
        .collect();
    Json(visible)
}

async fn create_todo(
    State(db): State<Db>,
    ApiJson(input): ApiJson<CreateTodo>,
) -> Result<(StatusCode, Json<Todo>), ApiError> {
    validate_title(&input.title)?;
    validate_description(input.description.as_deref())?;
    let now = Utc::now();
    let todo = Todo {
        id: Uuid::new_v4(),
        title: input.title,
        description: input.description,
        completed: input.completed,
        created_at: now,
        updated_at: now,
    };
    db.write().await.push(todo.clone());
    log::debug!("created todo {}", todo.id);
    Ok((StatusCode::CREATED, Json(todo)))
}

async fn get_todo(
    State(db): State<Db>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<Todo>, ApiError> {
    let todos = db.read().await;
    todos
        .iter()
        .find(|t| t.id == id)
        .cloned()
        .map(Json)
        .ok_or_else(ApiError::not_found)
}

async fn update_todo(
    State(db): State<Db>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(input): ApiJson<UpdateTodo>,
) -> Result<Json<Todo>, ApiError> {
    if let Some(title) = &input.title {
        validate_title(title)?;
    }
    validate_description(input.description.as_deref())?;

    let mut todos = db.write().await;
    let todo = todos
        .iter_mut()
        .find(|t| t.id == id)
        .ok_or_else(ApiError::not_found)?;
    if let Some(title) = input.title {
        todo.title = title;
    }
    if let Some(description) = input.description {
        todo.description = Some(description);
    }
    if let Some(completed) = input.completed {
        todo.completed = completed;
    }
    todo.updated_at = Utc::now();
    log::debug!("updated todo {id}");
    Ok(Json(todo.clone()))
}

async fn toggle_todo(
    State(db): State<Db>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<Todo>, ApiError> {
    let mut todos = db.write().await;
    let todo = todos
        .iter_mut()
        .find(|t| t.id == id)
        .ok_or_else(ApiError::not_found)?;
    todo.completed = !todo.completed;
    todo.updated_at = Utc::now();
    log::debug!("toggled todo {id} to completed={}", todo.completed);
    Ok(Json(todo.clone()))
}

async fn delete_todo(
    State(db): State<Db>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<StatusCode, ApiError> {
    let mut todos = db.write().await;
    let index = todos
        .iter()
        .position(|t| t.id == id)
        .ok_or_else(ApiError::not_found)?;
    todos.remove(index);
    log::debug!("deleted todo {id}");
    Ok(StatusCode::NO_CONTENT)
}
