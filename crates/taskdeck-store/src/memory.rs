use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use bytes::Bytes;

use crate::{FileStore, StoreError};

/// One recorded storage call, in call order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreOp {
    Upload(String),
    Delete(String),
}

#[derive(Default)]
struct Inner {
    objects: HashMap<String, Bytes>,
    ops: Vec<StoreOp>,
    fail_uploads: bool,
    fail_deletes: bool,
}

/// In-process `FileStore` used by the page tests. Keeps objects in a map
/// and logs every call so tests can assert exact upload/delete sequences.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ops(&self) -> Vec<StoreOp> {
        self.inner.lock().unwrap().ops.clone()
    }

    pub fn object(&self, name: &str) -> Option<Bytes> {
        self.inner.lock().unwrap().objects.get(name).cloned()
    }

    pub fn object_count(&self) -> usize {
        self.inner.lock().unwrap().objects.len()
    }

    pub fn set_fail_uploads(&self, fail: bool) {
        self.inner.lock().unwrap().fail_uploads = fail;
    }

    pub fn set_fail_deletes(&self, fail: bool) {
        self.inner.lock().unwrap().fail_deletes = fail;
    }
}

#[async_trait]
impl FileStore for MemoryStore {
    async fn upload(&self, name: &str, data: Bytes, _content_type: &str) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().unwrap();
        if inner.fail_uploads {
            return Err(StoreError::Backend("injected upload failure".into()));
        }
        inner.ops.push(StoreOp::Upload(name.to_string()));
        inner.objects.insert(name.to_string(), data);
        Ok(())
    }

    fn public_url(&self, name: &str) -> String {
        format!("memory://task-images/{name}")
    }

    async fn delete(&self, name: &str) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().unwrap();
        if inner.fail_deletes {
            return Err(StoreError::Backend("injected delete failure".into()));
        }
        inner.ops.push(StoreOp::Delete(name.to_string()));
        inner.objects.remove(name);
        Ok(())
    }
}
