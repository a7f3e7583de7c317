use axum::extract::{Multipart, State};
use axum::response::{Html, IntoResponse, Redirect, Response};
use chrono::Utc;
use taskdeck_core::NewTask;
use tracing::error;

use super::form::{FormScreen, SubmittedForm};
use super::{AppState, PageError};

fn blank_form(state: &AppState) -> Result<Html<String>, PageError> {
    FormScreen {
        editing: false,
        action: "/tasks/new".into(),
        alert: None,
        title: "",
        detail: "",
        is_complete: false,
        image_url: "",
    }
    .render(state)
}

pub(crate) async fn new_task_form(State(state): State<AppState>) -> Result<Html<String>, PageError> {
    blank_form(&state)
}

pub(crate) async fn create_task(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Response, PageError> {
    let form = SubmittedForm::read(multipart).await?;

    // Upload first; an upload failure aborts before anything is inserted.
    let mut image_url = String::new();
    if let Some((filename, data)) = &form.image {
        let name = taskdeck_store::upload_name(Utc::now().timestamp_millis(), filename);
        let content_type = taskdeck_store::content_type_for_name(&name);
        if let Err(e) = state.files.upload(&name, data.clone(), content_type).await {
            error!("image upload failed: {e}");
            return failed(&state, &form, "", format!("Image upload failed: {e}"));
        }
        image_url = state.files.public_url(&name);
    }

    let input = NewTask {
        title: form.title.clone(),
        detail: form.detail.clone(),
        is_complete: form.is_complete,
        image_url: image_url.clone(),
    };
    if let Err(e) = state.records.insert_task(&input).await {
        error!("task insert failed: {e}");
        return failed(&state, &form, &image_url, format!("Adding the task failed: {e}"));
    }

    Ok(Redirect::to("/tasks").into_response())
}

/// Re-render the form with the user's values and an alert naming the failed
/// operation and the backend's message.
fn failed(
    state: &AppState,
    form: &SubmittedForm,
    image_url: &str,
    alert: String,
) -> Result<Response, PageError> {
    let html = FormScreen {
        editing: false,
        action: "/tasks/new".into(),
        alert: Some(alert),
        title: &form.title,
        detail: &form.detail,
        is_complete: form.is_complete,
        image_url,
    }
    .render(state)?;
    Ok(html.into_response())
}
