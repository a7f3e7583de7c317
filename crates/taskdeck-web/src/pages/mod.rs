mod create;
mod edit;
mod form;
mod home;
mod list;

use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use minijinja::Value;
use serde_json::json;
use taskdeck_client::TaskRecords;
use taskdeck_store::FileStore;
use tower_http::trace::TraceLayer;

use crate::templates::Pages;

pub struct InnerAppState {
    pub records: Arc<dyn TaskRecords>,
    pub files: Arc<dyn FileStore>,
    templates: Pages,
}

impl InnerAppState {
    pub fn new(records: Arc<dyn TaskRecords>, files: Arc<dyn FileStore>) -> Self {
        Self {
            records,
            files,
            templates: Pages::new(),
        }
    }

    pub(crate) fn page(&self, name: &str, ctx: Value) -> Result<Html<String>, PageError> {
        self.templates
            .render(name, ctx)
            .map(Html)
            .map_err(PageError::Render)
    }
}

pub type AppState = Arc<InnerAppState>;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(home::home))
        .route("/health", get(health))
        .route("/tasks", get(list::task_list))
        .route("/tasks/new", get(create::new_task_form).post(create::create_task))
        .route(
            "/tasks/{id}/edit",
            get(edit::edit_task_form).post(edit::update_task),
        )
        .route("/tasks/{id}/delete", post(list::delete_task))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

#[derive(Debug)]
pub enum PageError {
    Render(minijinja::Error),
    BadRequest(String),
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        match self {
            PageError::Render(e) => {
                tracing::error!("template render failed: {e}");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal error").into_response()
            }
            PageError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg).into_response(),
        }
    }
}
