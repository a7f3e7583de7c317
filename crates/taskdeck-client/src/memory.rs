use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use taskdeck_core::{NewTask, Task, UpdateTask};

use crate::{ClientError, TaskRecords};

/// One recorded mutation, in call order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordOp {
    Insert,
    Update(i64),
    Delete(i64),
}

#[derive(Default)]
struct Inner {
    tasks: Vec<Task>,
    next_id: i64,
    ops: Vec<RecordOp>,
    fail_reads: bool,
    fail_inserts: bool,
    fail_updates: bool,
    fail_deletes: bool,
}

/// In-process `TaskRecords` used by the page tests.
///
/// Ids increase monotonically like the backend's, mutations are logged for
/// call-count assertions, and each operation class can be made to fail so
/// the abort paths are testable.
#[derive(Default)]
pub struct MemoryClient {
    inner: Mutex<Inner>,
}

impl MemoryClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all records in insertion order.
    pub fn tasks(&self) -> Vec<Task> {
        self.inner.lock().unwrap().tasks.clone()
    }

    /// Mutations observed so far, in call order.
    pub fn ops(&self) -> Vec<RecordOp> {
        self.inner.lock().unwrap().ops.clone()
    }

    pub fn set_fail_reads(&self, fail: bool) {
        self.inner.lock().unwrap().fail_reads = fail;
    }

    pub fn set_fail_inserts(&self, fail: bool) {
        self.inner.lock().unwrap().fail_inserts = fail;
    }

    pub fn set_fail_updates(&self, fail: bool) {
        self.inner.lock().unwrap().fail_updates = fail;
    }

    pub fn set_fail_deletes(&self, fail: bool) {
        self.inner.lock().unwrap().fail_deletes = fail;
    }
}

#[async_trait]
impl TaskRecords for MemoryClient {
    async fn list_tasks(&self) -> Result<Vec<Task>, ClientError> {
        let inner = self.inner.lock().unwrap();
        if inner.fail_reads {
            return Err(ClientError::Backend("injected read failure".into()));
        }
        let mut tasks = inner.tasks.clone();
        tasks.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(tasks)
    }

    async fn get_task(&self, id: i64) -> Result<Task, ClientError> {
        let inner = self.inner.lock().unwrap();
        if inner.fail_reads {
            return Err(ClientError::Backend("injected read failure".into()));
        }
        inner
            .tasks
            .iter()
            .find(|t| t.id == id)
            .cloned()
            .ok_or_else(|| ClientError::NotFound(format!("task {id}")))
    }

    async fn insert_task(&self, input: &NewTask) -> Result<Task, ClientError> {
        let mut inner = self.inner.lock().unwrap();
        if inner.fail_inserts {
            return Err(ClientError::Backend("injected insert failure".into()));
        }
        inner.next_id += 1;
        let task = Task {
            id: inner.next_id,
            created_at: Utc::now(),
            title: input.title.clone(),
            detail: input.detail.clone(),
            image_url: input.image_url.clone(),
            is_complete: input.is_complete,
            updated_at: None,
        };
        inner.tasks.push(task.clone());
        inner.ops.push(RecordOp::Insert);
        Ok(task)
    }

    async fn update_task(&self, id: i64, update: &UpdateTask) -> Result<Task, ClientError> {
        let mut inner = self.inner.lock().unwrap();
        if inner.fail_updates {
            return Err(ClientError::Backend("injected update failure".into()));
        }
        inner.ops.push(RecordOp::Update(id));
        let task = inner
            .tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| ClientError::NotFound(format!("task {id}")))?;
        if let Some(ref title) = update.title {
            task.title = title.clone();
        }
        if let Some(ref detail) = update.detail {
            task.detail = detail.clone();
        }
        if let Some(is_complete) = update.is_complete {
            task.is_complete = is_complete;
        }
        if let Some(ref image_url) = update.image_url {
            task.image_url = image_url.clone();
        }
        if let Some(updated_at) = update.updated_at {
            task.updated_at = Some(updated_at);
        }
        Ok(task.clone())
    }

    async fn delete_task(&self, id: i64) -> Result<(), ClientError> {
        let mut inner = self.inner.lock().unwrap();
        if inner.fail_deletes {
            return Err(ClientError::Backend("injected delete failure".into()));
        }
        inner.ops.push(RecordOp::Delete(id));
        // Absent ids are a no-op, matching the backend's delete-by-filter.
        inner.tasks.retain(|t| t.id != id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_task(title: &str) -> NewTask {
        NewTask {
            title: title.into(),
            detail: "detail".into(),
            is_complete: false,
            image_url: String::new(),
        }
    }

    #[tokio::test]
    async fn crud_roundtrip() {
        let client = MemoryClient::new();

        let task = client.insert_task(&new_task("first")).await.unwrap();
        assert_eq!(task.id, 1);
        assert!(task.updated_at.is_none());

        let fetched = client.get_task(task.id).await.unwrap();
        assert_eq!(fetched.title, "first");

        let updated = client
            .update_task(
                task.id,
                &UpdateTask {
                    title: Some("renamed".into()),
                    updated_at: Some(Utc::now()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.title, "renamed");
        assert!(updated.updated_at.is_some());
        // untouched fields survive a partial update
        assert_eq!(updated.detail, "detail");

        client.delete_task(task.id).await.unwrap();
        assert!(client.list_tasks().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn list_is_newest_first() {
        let client = MemoryClient::new();
        for title in ["a", "b", "c"] {
            client.insert_task(&new_task(title)).await.unwrap();
        }

        let tasks = client.list_tasks().await.unwrap();
        let ids: Vec<i64> = tasks.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }

    #[tokio::test]
    async fn get_missing_is_not_found() {
        let client = MemoryClient::new();
        let err = client.get_task(99).await.unwrap_err();
        assert!(matches!(err, ClientError::NotFound(_)));
    }

    #[tokio::test]
    async fn delete_missing_is_noop() {
        let client = MemoryClient::new();
        client.delete_task(99).await.unwrap();
        assert_eq!(client.ops(), vec![RecordOp::Delete(99)]);
    }

    #[tokio::test]
    async fn injected_failures_leave_state_unchanged() {
        let client = MemoryClient::new();
        let task = client.insert_task(&new_task("kept")).await.unwrap();

        client.set_fail_inserts(true);
        client.insert_task(&new_task("lost")).await.unwrap_err();

        client.set_fail_updates(true);
        client
            .update_task(
                task.id,
                &UpdateTask {
                    title: Some("lost".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();

        client.set_fail_deletes(true);
        client.delete_task(task.id).await.unwrap_err();

        let tasks = client.tasks();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].title, "kept");
    }

    #[tokio::test]
    async fn ops_record_mutations_in_order() {
        let client = MemoryClient::new();
        let task = client.insert_task(&new_task("t")).await.unwrap();
        client
            .update_task(task.id, &UpdateTask::default())
            .await
            .unwrap();
        client.delete_task(task.id).await.unwrap();

        assert_eq!(
            client.ops(),
            vec![
                RecordOp::Insert,
                RecordOp::Update(task.id),
                RecordOp::Delete(task.id),
            ]
        );
    }
}
