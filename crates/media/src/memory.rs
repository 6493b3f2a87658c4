//! In-process object storage.

use std::collections::{BTreeMap, HashSet};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use async_trait::async_trait;

use crate::error::MediaError;
use crate::storage::{object_key_for, FileStorage};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub original_name: String,
    pub content: Vec<u8>,
    pub content_type: String,
}

#[derive(Debug, Default)]
struct State {
    objects: BTreeMap<String, StoredObject>,
    /// Original names whose upload is rejected.
    failing_uploads: HashSet<String>,
    failing_urls: bool,
}

/// [`FileStorage`] that keeps objects in a map.
///
/// URLs have the form `memory://<key>?expires=<secs>`.
#[derive(Debug, Default)]
pub struct MemoryFileStorage {
    state: Mutex<State>,
}

impl MemoryFileStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Reject later uploads of a file with this original name.
    pub fn fail_upload_of(&self, name: impl Into<String>) {
        self.state().failing_uploads.insert(name.into());
    }

    /// Make every later `get_file_url` call fail.
    pub fn fail_urls(&self) {
        self.state().failing_urls = true;
    }

    /// Store an object under a fixed key, bypassing key generation.
    pub fn insert(&self, key: impl Into<String>, original_name: impl Into<String>) {
        self.state().objects.insert(
            key.into(),
            StoredObject {
                original_name: original_name.into(),
                content: Vec::new(),
                content_type: "application/octet-stream".into(),
            },
        );
    }

    pub fn get(&self, key: &str) -> Option<StoredObject> {
        self.state().objects.get(key).cloned()
    }

    pub fn keys(&self) -> Vec<String> {
        self.state().objects.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.state().objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl FileStorage for MemoryFileStorage {
    async fn upload_file(
        &self,
        name: &str,
        content: Vec<u8>,
        _size: u64,
        content_type: &str,
    ) -> Result<String, MediaError> {
        let mut state = self.state();
        if state.failing_uploads.contains(name) {
            return Err(MediaError::Upload {
                name: name.to_string(),
                message: "injected failure".into(),
            });
        }
        let key = object_key_for(name);
        state.objects.insert(
            key.clone(),
            StoredObject {
                original_name: name.to_string(),
                content,
                content_type: content_type.to_string(),
            },
        );
        Ok(key)
    }

    async fn get_file_url(&self, key: &str, expires_in: Duration) -> Result<String, MediaError> {
        let state = self.state();
        if state.failing_urls {
            return Err(MediaError::Presign {
                key: key.to_string(),
                message: "injected failure".into(),
            });
        }
        if !state.objects.contains_key(key) {
            return Err(MediaError::NotFound(key.to_string()));
        }
        Ok(format!("memory://{key}?expires={}", expires_in.as_secs()))
    }

    async fn get_original_name(&self, key: &str) -> Result<String, MediaError> {
        self.state()
            .objects
            .get(key)
            .map(|o| o.original_name.clone())
            .ok_or_else(|| MediaError::NotFound(key.to_string()))
    }

    async fn delete_file(&self, key: &str) -> Result<(), MediaError> {
        self.state().objects.remove(key);
        Ok(())
    }
}
