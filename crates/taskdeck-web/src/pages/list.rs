use axum::extract::{Path, State};
use axum::response::{Html, Redirect};
use minijinja::context;
use serde::Serialize;
use taskdeck_core::Task;
use tracing::error;

use super::{AppState, PageError};

#[derive(Debug, Serialize)]
struct TaskRow {
    id: i64,
    title: String,
    detail: String,
    image_url: String,
    has_image: bool,
    is_complete: bool,
    created: String,
    updated: String,
}

fn row(task: &Task) -> TaskRow {
    TaskRow {
        id: task.id,
        title: task.title.clone(),
        detail: task.detail.clone(),
        image_url: task.image_url.clone(),
        has_image: task.has_image(),
        is_complete: task.is_complete,
        created: task.created_at.format("%Y-%m-%d").to_string(),
        updated: task
            .updated_at
            .map(|t| t.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "-".into()),
    }
}

pub(crate) async fn task_list(State(state): State<AppState>) -> Result<Html<String>, PageError> {
    // A fetch failure renders an empty table; the user is not told.
    let tasks = match state.records.list_tasks().await {
        Ok(tasks) => tasks,
        Err(e) => {
            error!("task list fetch failed: {e}");
            Vec::new()
        }
    };

    let rows: Vec<TaskRow> = tasks.iter().map(row).collect();
    state.page("task_list.html", context! { tasks => rows })
}

pub(crate) async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Redirect {
    // One delete request per click; a failure is logged and the row simply
    // reappears on the refetched list.
    if let Err(e) = state.records.delete_task(id).await {
        error!("deleting task {id} failed: {e}");
    }
    Redirect::to("/tasks")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn task() -> Task {
        Task {
            id: 7,
            created_at: Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap(),
            title: "Water the plants".into(),
            detail: "Front garden".into(),
            image_url: String::new(),
            is_complete: false,
            updated_at: None,
        }
    }

    #[test]
    fn row_without_image_or_update() {
        let row = row(&task());
        assert!(!row.has_image);
        assert_eq!(row.created, "2024-03-01");
        assert_eq!(row.updated, "-");
    }

    #[test]
    fn row_with_image_and_update() {
        let mut t = task();
        t.image_url = "https://example.co/storage/v1/object/public/task-images/1_a.png".into();
        t.updated_at = Some(Utc.with_ymd_and_hms(2024, 3, 2, 9, 30, 0).unwrap());

        let row = row(&t);
        assert!(row.has_image);
        assert_eq!(row.updated, "2024-03-02");
    }
}
