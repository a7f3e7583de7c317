use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One work item as stored by the backend. Field names match the backend
/// columns so the whole struct round-trips through its REST interface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub created_at: DateTime<Utc>,
    pub title: String,
    pub detail: String,
    /// Public URL of the stored image; empty string means "no image".
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub is_complete: bool,
    /// Set by the client on every update, absent until the first edit.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Task {
    pub fn has_image(&self) -> bool {
        !self.image_url.is_empty()
    }
}

/// Insert payload. `id` and `created_at` are assigned by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTask {
    pub title: String,
    pub detail: String,
    #[serde(default)]
    pub is_complete: bool,
    #[serde(default)]
    pub image_url: String,
}

/// Partial update payload. Only the fields that are `Some` go on the wire.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTask {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_complete: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}
