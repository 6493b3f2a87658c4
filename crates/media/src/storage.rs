//! The storage port and key naming.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::MediaError;

/// Object metadata entry holding the uploaded file's original name.
pub const ORIGINAL_NAME_METADATA: &str = "original-name";

/// Capability to store media files and hand out temporary links to them.
#[async_trait]
pub trait FileStorage: Send + Sync {
    /// Store `content` and return the generated object key.
    ///
    /// `name` is the original file name; it is kept as object metadata and
    /// its extension is carried over to the key. `size` is the content
    /// length in bytes.
    async fn upload_file(
        &self,
        name: &str,
        content: Vec<u8>,
        size: u64,
        content_type: &str,
    ) -> Result<String, MediaError>;

    /// A temporary URL for `key`, valid for `expires_in`.
    async fn get_file_url(&self, key: &str, expires_in: Duration) -> Result<String, MediaError>;

    /// The original name recorded at upload time.
    async fn get_original_name(&self, key: &str) -> Result<String, MediaError>;

    async fn delete_file(&self, key: &str) -> Result<(), MediaError>;
}

/// Generate a fresh object key for a file called `name`.
///
/// Keys are a random UUID followed by the original extension, if any, so two
/// uploads of the same file never collide.
pub fn object_key_for(name: &str) -> String {
    let id = Uuid::new_v4();
    match Path::new(name).extension().and_then(|e| e.to_str()) {
        Some(ext) if !ext.is_empty() => format!("{id}.{ext}"),
        _ => id.to_string(),
    }
}

/// `Content-Disposition` value that renders the file inline under `name`.
pub fn inline_disposition(name: &str) -> String {
    format!("inline; filename=\"{}\"", name.replace('"', "'"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_keeps_extension() {
        let key = object_key_for("photos/12.jpeg");
        assert!(key.ends_with(".jpeg"));
        assert_eq!(key.len(), 36 + ".jpeg".len());
    }

    #[test]
    fn key_without_extension_is_bare_uuid() {
        let key = object_key_for("README");
        assert!(Uuid::parse_str(&key).is_ok());
    }

    #[test]
    fn keys_are_unique() {
        assert_ne!(object_key_for("a.mp3"), object_key_for("a.mp3"));
    }

    #[test]
    fn disposition_quotes_name() {
        assert_eq!(inline_disposition("Zhora.mp3"), "inline; filename=\"Zhora.mp3\"");
        assert_eq!(inline_disposition("a\"b.mp3"), "inline; filename=\"a'b.mp3\"");
    }
}
