//! Object-store link resolution for read responses.

use std::time::Duration;

use aripari_media::FileStorage;

/// Presigned URL for `key`.
///
/// A missing or blank key yields an empty string. Storage failures are
/// logged and also yield an empty string; a broken link never fails the
/// surrounding response.
pub async fn resolve_file_url(storage: &dyn FileStorage, key: Option<&str>, expires_in: Duration) -> String {
    let Some(key) = key.filter(|k| !k.trim().is_empty()) else {
        return String::new();
    };

    match storage.get_file_url(key, expires_in).await {
        Ok(url) => url,
        Err(err) => {
            tracing::warn!(%key, error = %err, "Could not resolve file URL");
            String::new()
        }
    }
}
