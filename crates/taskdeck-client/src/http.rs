use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::{Client, StatusCode};
use taskdeck_core::{NewTask, Task, UpdateTask};

use crate::{ClientError, TaskRecords};

/// Table holding the task records on the backend.
const TASKS_TABLE: &str = "task_tb";

/// Fixed projection used by the list page.
const LIST_COLUMNS: &str = "id,created_at,title,detail,image_url,is_complete,updated_at";

/// Tells the backend to return a single JSON object instead of a one-element
/// array, and to 406 when the filter matches no rows.
const SINGLE_OBJECT: &str = "application/vnd.pgrst.object+json";

/// Record client for the hosted backend's REST interface.
///
/// Every call is one HTTPS round trip; there are no retries and no local
/// state beyond the connection pool.
pub struct RestClient {
    base_url: String,
    client: Client,
}

impl RestClient {
    /// `base_url` is the platform project URL; `api_key` is the service key,
    /// sent as both `apikey` and bearer authorization on every request.
    pub fn new(base_url: &str, api_key: &str) -> Result<Self, ClientError> {
        let base_url = base_url.trim_end_matches('/').to_string();

        let mut headers = HeaderMap::new();
        let key = HeaderValue::from_str(api_key)
            .map_err(|e| ClientError::InvalidInput(format!("api key: {e}")))?;
        let bearer = HeaderValue::from_str(&format!("Bearer {api_key}"))
            .map_err(|e| ClientError::InvalidInput(format!("api key: {e}")))?;
        headers.insert("apikey", key);
        headers.insert(AUTHORIZATION, bearer);

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| ClientError::Backend(format!("client: {e}")))?;

        Ok(Self { base_url, client })
    }

    fn table_url(&self) -> String {
        format!("{}/rest/v1/{TASKS_TABLE}", self.base_url)
    }
}

async fn handle_json<T: serde::de::DeserializeOwned>(
    resp: reqwest::Response,
) -> Result<T, ClientError> {
    let status = resp.status();
    if status.is_success() {
        resp.json::<T>()
            .await
            .map_err(|e| ClientError::Backend(format!("json decode: {e}")))
    } else {
        Err(parse_error(status, resp).await)
    }
}

async fn parse_error(status: StatusCode, resp: reqwest::Response) -> ClientError {
    let body = resp.text().await.unwrap_or_default();
    let msg = serde_json::from_str::<serde_json::Value>(&body)
        .ok()
        .and_then(|v| v["message"].as_str().map(String::from))
        .unwrap_or(body);
    error_for_status(status, msg)
}

fn error_for_status(status: StatusCode, msg: String) -> ClientError {
    match status {
        // 406 is the backend's "single object requested, zero rows matched"
        StatusCode::NOT_FOUND | StatusCode::NOT_ACCEPTABLE => ClientError::NotFound(msg),
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
            ClientError::InvalidInput(msg)
        }
        _ => ClientError::Backend(msg),
    }
}

#[async_trait]
impl TaskRecords for RestClient {
    async fn list_tasks(&self) -> Result<Vec<Task>, ClientError> {
        let url = format!("{}?select={LIST_COLUMNS}&order=id.desc", self.table_url());
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ClientError::Backend(e.to_string()))?;
        handle_json(resp).await
    }

    async fn get_task(&self, id: i64) -> Result<Task, ClientError> {
        let url = format!("{}?id=eq.{id}&select=*", self.table_url());
        let resp = self
            .client
            .get(url)
            .header(ACCEPT, SINGLE_OBJECT)
            .send()
            .await
            .map_err(|e| ClientError::Backend(e.to_string()))?;
        handle_json(resp).await
    }

    async fn insert_task(&self, input: &NewTask) -> Result<Task, ClientError> {
        let resp = self
            .client
            .post(self.table_url())
            .header(ACCEPT, SINGLE_OBJECT)
            .header("Prefer", "return=representation")
            .json(input)
            .send()
            .await
            .map_err(|e| ClientError::Backend(e.to_string()))?;
        handle_json(resp).await
    }

    async fn update_task(&self, id: i64, update: &UpdateTask) -> Result<Task, ClientError> {
        let url = format!("{}?id=eq.{id}", self.table_url());
        let resp = self
            .client
            .patch(url)
            .header(ACCEPT, SINGLE_OBJECT)
            .header("Prefer", "return=representation")
            .json(update)
            .send()
            .await
            .map_err(|e| ClientError::Backend(e.to_string()))?;
        handle_json(resp).await
    }

    async fn delete_task(&self, id: i64) -> Result<(), ClientError> {
        let url = format!("{}?id=eq.{id}", self.table_url());
        let resp = self
            .client
            .delete(url)
            .send()
            .await
            .map_err(|e| ClientError::Backend(e.to_string()))?;
        let status = resp.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(parse_error(status, resp).await)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let client = RestClient::new("https://proj.example.co/", "key").unwrap();
        assert_eq!(
            client.table_url(),
            "https://proj.example.co/rest/v1/task_tb"
        );
    }

    #[test]
    fn status_mapping() {
        let not_found = error_for_status(StatusCode::NOT_FOUND, "gone".into());
        assert!(matches!(not_found, ClientError::NotFound(_)));

        // zero rows under a single-object read
        let no_rows = error_for_status(StatusCode::NOT_ACCEPTABLE, "0 rows".into());
        assert!(matches!(no_rows, ClientError::NotFound(_)));

        let bad = error_for_status(StatusCode::BAD_REQUEST, "bad filter".into());
        assert!(matches!(bad, ClientError::InvalidInput(_)));

        let internal = error_for_status(StatusCode::INTERNAL_SERVER_ERROR, "boom".into());
        assert!(matches!(internal, ClientError::Backend(_)));
    }

    #[test]
    fn update_payload_serializes_only_present_fields() {
        let update = UpdateTask {
            title: Some("new title".into()),
            ..Default::default()
        };
        let value = serde_json::to_value(&update).unwrap();
        let obj = value.as_object().unwrap();
        assert_eq!(obj.len(), 1);
        assert_eq!(obj["title"], "new title");
    }

    #[test]
    fn insert_payload_carries_all_fields() {
        let input = NewTask {
            title: "t".into(),
            detail: "d".into(),
            is_complete: false,
            image_url: String::new(),
        };
        let value = serde_json::to_value(&input).unwrap();
        let obj = value.as_object().unwrap();
        assert_eq!(obj.len(), 4);
        assert_eq!(obj["image_url"], "");
        assert_eq!(obj["is_complete"], false);
    }
}
