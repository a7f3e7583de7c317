use axum::extract::{Multipart, Path, State};
use axum::response::{Html, IntoResponse, Redirect, Response};
use chrono::Utc;
use taskdeck_core::UpdateTask;
use tracing::{error, warn};

use super::form::{FormScreen, SubmittedForm};
use super::{AppState, PageError};

pub(crate) async fn edit_task_form(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Html<String>, PageError> {
    let action = format!("/tasks/{id}/edit");
    match state.records.get_task(id).await {
        Ok(task) => FormScreen {
            editing: true,
            action,
            alert: None,
            title: &task.title,
            detail: &task.detail,
            is_complete: task.is_complete,
            image_url: &task.image_url,
        }
        .render(&state),
        Err(e) => {
            error!("task {id} fetch failed: {e}");
            FormScreen {
                editing: true,
                action,
                alert: Some(format!("Loading the task failed: {e}")),
                title: "",
                detail: "",
                is_complete: false,
                image_url: "",
            }
            .render(&state)
        }
    }
}

pub(crate) async fn update_task(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    multipart: Multipart,
) -> Result<Response, PageError> {
    let form = SubmittedForm::read(multipart).await?;

    // Without a new file the previous reference is kept verbatim.
    let mut image_url = form.old_image_url.clone();

    if let Some((filename, data)) = &form.image {
        // Replacement drops the old stored file first, best-effort; the steps
        // run strictly in order and nothing compensates a later failure.
        if let Some(old_name) = taskdeck_store::name_from_public_url(&form.old_image_url) {
            if let Err(e) = state.files.delete(old_name).await {
                warn!("deleting previous image {old_name} failed: {e}");
            }
        }

        let name = taskdeck_store::upload_name(Utc::now().timestamp_millis(), filename);
        let content_type = taskdeck_store::content_type_for_name(&name);
        if let Err(e) = state.files.upload(&name, data.clone(), content_type).await {
            error!("image upload failed: {e}");
            return failed(&state, id, &form, &image_url, format!("Image upload failed: {e}"));
        }
        image_url = state.files.public_url(&name);
    }

    let update = UpdateTask {
        title: Some(form.title.clone()),
        detail: Some(form.detail.clone()),
        is_complete: Some(form.is_complete),
        image_url: Some(image_url.clone()),
        updated_at: Some(Utc::now()),
    };
    if let Err(e) = state.records.update_task(id, &update).await {
        error!("task {id} update failed: {e}");
        return failed(&state, id, &form, &image_url, format!("Saving the task failed: {e}"));
    }

    Ok(Redirect::to("/tasks").into_response())
}

fn failed(
    state: &AppState,
    id: i64,
    form: &SubmittedForm,
    image_url: &str,
    alert: String,
) -> Result<Response, PageError> {
    let html = FormScreen {
        editing: true,
        action: format!("/tasks/{id}/edit"),
        alert: Some(alert),
        title: &form.title,
        detail: &form.detail,
        is_complete: form.is_complete,
        image_url,
    }
    .render(state)?;
    Ok(html.into_response())
}
