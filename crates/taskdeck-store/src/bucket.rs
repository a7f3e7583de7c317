use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, StatusCode};

use crate::{FileStore, StoreError};

/// File store backed by the hosted platform's storage HTTP API.
///
/// Objects live in one fixed bucket; public URLs are served from the
/// bucket's `public` prefix without authentication.
pub struct BucketStore {
    base_url: String,
    bucket: String,
    client: Client,
}

impl std::fmt::Debug for BucketStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BucketStore")
            .field("bucket", &self.bucket)
            .finish_non_exhaustive()
    }
}

impl BucketStore {
    pub fn new(base_url: &str, api_key: &str, bucket: &str) -> Result<Self, StoreError> {
        let base_url = base_url.trim_end_matches('/').to_string();

        let mut headers = HeaderMap::new();
        let key = HeaderValue::from_str(api_key)
            .map_err(|e| StoreError::Backend(format!("api key: {e}")))?;
        let bearer = HeaderValue::from_str(&format!("Bearer {api_key}"))
            .map_err(|e| StoreError::Backend(format!("api key: {e}")))?;
        headers.insert("apikey", key);
        headers.insert(AUTHORIZATION, bearer);

        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| StoreError::Backend(format!("client: {e}")))?;

        Ok(Self {
            base_url,
            bucket: bucket.to_string(),
            client,
        })
    }

    fn object_url(&self, name: &str) -> String {
        format!("{}/storage/v1/object/{}/{name}", self.base_url, self.bucket)
    }
}

async fn error_from_response(op: &str, resp: reqwest::Response) -> StoreError {
    let status = resp.status();
    let body = resp.text().await.unwrap_or_default();
    let msg = serde_json::from_str::<serde_json::Value>(&body)
        .ok()
        .and_then(|v| v["message"].as_str().map(String::from))
        .unwrap_or(body);
    if status == StatusCode::NOT_FOUND {
        StoreError::NotFound(msg)
    } else {
        StoreError::Backend(format!("{op}: {msg}"))
    }
}

#[async_trait]
impl FileStore for BucketStore {
    async fn upload(&self, name: &str, data: Bytes, content_type: &str) -> Result<(), StoreError> {
        let resp = self
            .client
            .post(self.object_url(name))
            .header(CONTENT_TYPE, content_type)
            .body(data)
            .send()
            .await
            .map_err(|e| StoreError::Backend(format!("upload: {e}")))?;
        if resp.status().is_success() {
            Ok(())
        } else {
            Err(error_from_response("upload", resp).await)
        }
    }

    fn public_url(&self, name: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{name}",
            self.base_url, self.bucket
        )
    }

    async fn delete(&self, name: &str) -> Result<(), StoreError> {
        let resp = self
            .client
            .delete(self.object_url(name))
            .send()
            .await
            .map_err(|e| StoreError::Backend(format!("delete: {e}")))?;
        // Deleting an absent object is a no-op.
        if resp.status() == StatusCode::NOT_FOUND {
            tracing::debug!("delete of absent object {name} ignored");
            return Ok(());
        }
        if resp.status().is_success() {
            Ok(())
        } else {
            Err(error_from_response("delete", resp).await)
        }
    }
}
