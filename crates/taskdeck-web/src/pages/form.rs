use axum::extract::Multipart;
use axum::response::Html;
use bytes::Bytes;
use minijinja::context;

use super::{InnerAppState, PageError};

/// The fields of one submitted create/edit form.
///
/// The image is `Some` only when the user actually picked a file; browsers
/// send an empty part for an untouched file input.
#[derive(Debug, Default)]
pub(crate) struct SubmittedForm {
    pub title: String,
    pub detail: String,
    pub is_complete: bool,
    /// Previous public URL, carried through a hidden field on the edit form.
    pub old_image_url: String,
    pub image: Option<(String, Bytes)>,
}

impl SubmittedForm {
    pub async fn read(mut multipart: Multipart) -> Result<Self, PageError> {
        let mut form = Self::default();
        while let Some(field) = multipart.next_field().await.map_err(bad_request)? {
            let name = field.name().unwrap_or_default().to_string();
            match name.as_str() {
                "title" => form.title = field.text().await.map_err(bad_request)?,
                "detail" => form.detail = field.text().await.map_err(bad_request)?,
                "status" => form.is_complete = field.text().await.map_err(bad_request)? == "1",
                "old_image_url" => {
                    form.old_image_url = field.text().await.map_err(bad_request)?;
                }
                "image" => {
                    let filename = field.file_name().unwrap_or_default().to_string();
                    let data = field.bytes().await.map_err(bad_request)?;
                    if !filename.is_empty() && !data.is_empty() {
                        form.image = Some((filename, data));
                    }
                }
                _ => {}
            }
        }
        Ok(form)
    }
}

fn bad_request(e: axum::extract::multipart::MultipartError) -> PageError {
    PageError::BadRequest(format!("form read: {e}"))
}

/// Everything the shared create/edit template needs.
pub(crate) struct FormScreen<'a> {
    pub editing: bool,
    pub action: String,
    pub alert: Option<String>,
    pub title: &'a str,
    pub detail: &'a str,
    pub is_complete: bool,
    /// Current preview; on the edit form this doubles as the hidden
    /// old-image reference.
    pub image_url: &'a str,
}

impl FormScreen<'_> {
    pub fn render(&self, state: &InnerAppState) -> Result<Html<String>, PageError> {
        state.page(
            "task_form.html",
            context! {
                editing => self.editing,
                action => self.action,
                alert => self.alert,
                title => self.title,
                detail => self.detail,
                is_complete => self.is_complete,
                image_url => self.image_url,
            },
        )
    }
}
