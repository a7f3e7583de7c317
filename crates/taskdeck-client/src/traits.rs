use async_trait::async_trait;
use taskdeck_core::{NewTask, Task, UpdateTask};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("backend error: {0}")]
    Backend(String),
}

/// Abstraction over the backend's record operations.
///
/// The page handlers program against this trait. `RestClient` speaks the
/// hosted platform's REST interface; `MemoryClient` is the in-process test
/// double.
#[async_trait]
pub trait TaskRecords: Send + Sync {
    /// All tasks with the fixed list projection, newest-first (id descending).
    async fn list_tasks(&self) -> Result<Vec<Task>, ClientError>;

    /// Exactly one task by identifier. Zero rows is `NotFound`.
    async fn get_task(&self, id: i64) -> Result<Task, ClientError>;

    /// Insert one record; the backend assigns `id` and `created_at`.
    async fn insert_task(&self, input: &NewTask) -> Result<Task, ClientError>;

    /// Patch a record by identifier with the fields present in `update`.
    async fn update_task(&self, id: i64, update: &UpdateTask) -> Result<Task, ClientError>;

    /// Delete a record by identifier. Deleting an absent id is a no-op.
    async fn delete_task(&self, id: i64) -> Result<(), ClientError>;
}
