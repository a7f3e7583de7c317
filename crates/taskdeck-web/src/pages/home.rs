use axum::extract::State;
use axum::response::Html;
use minijinja::context;

use super::{AppState, PageError};

pub(crate) async fn home(State(state): State<AppState>) -> Result<Html<String>, PageError> {
    state.page("home.html", context! {})
}
