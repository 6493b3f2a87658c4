//! S3-compatible object storage (MinIO in deployment).

use std::time::Duration;

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_credential_types::Credentials;
use aws_sdk_s3::config::Region;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;

use crate::config::StorageConfig;
use crate::error::MediaError;
use crate::storage::{inline_disposition, object_key_for, FileStorage, ORIGINAL_NAME_METADATA};

/// [`FileStorage`] backed by a single S3 bucket.
#[derive(Debug, Clone)]
pub struct S3FileStorage {
    client: Client,
    bucket: String,
}

impl S3FileStorage {
    /// Build a client for `config` and make sure the bucket exists.
    pub async fn connect(config: &StorageConfig) -> Result<Self, MediaError> {
        let credentials = Credentials::new(
            &config.access_key,
            &config.secret_key,
            None,
            None,
            "aripari-static",
        );

        let s3_config = aws_sdk_s3::config::Builder::new()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()))
            .endpoint_url(config.endpoint_url())
            .credentials_provider(credentials)
            .force_path_style(true)
            .build();

        let storage = Self {
            client: Client::from_conf(s3_config),
            bucket: config.bucket.clone(),
        };
        storage.ensure_bucket().await?;
        Ok(storage)
    }

    async fn ensure_bucket(&self) -> Result<(), MediaError> {
        if self
            .client
            .head_bucket()
            .bucket(&self.bucket)
            .send()
            .await
            .is_ok()
        {
            return Ok(());
        }

        self.client
            .create_bucket()
            .bucket(&self.bucket)
            .send()
            .await
            .map_err(|e| MediaError::Backend(DisplayErrorContext(&e).to_string()))?;

        tracing::info!(bucket = %self.bucket, "Created storage bucket");
        Ok(())
    }
}

#[async_trait]
impl FileStorage for S3FileStorage {
    async fn upload_file(
        &self,
        name: &str,
        content: Vec<u8>,
        size: u64,
        content_type: &str,
    ) -> Result<String, MediaError> {
        let key = object_key_for(name);
        let content_length = i64::try_from(size).map_err(|_| MediaError::Upload {
            name: name.to_string(),
            message: format!("size {size} out of range"),
        })?;

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(&key)
            .body(ByteStream::from(content))
            .content_length(content_length)
            .content_type(content_type)
            .metadata(ORIGINAL_NAME_METADATA, name)
            .send()
            .await
            .map_err(|e| MediaError::Upload {
                name: name.to_string(),
                message: DisplayErrorContext(&e).to_string(),
            })?;

        tracing::debug!(%key, name, size, "Uploaded object");
        Ok(key)
    }

    async fn get_file_url(&self, key: &str, expires_in: Duration) -> Result<String, MediaError> {
        let original_name = self.get_original_name(key).await?;
        let presign = |message: String| MediaError::Presign {
            key: key.to_string(),
            message,
        };

        let presigning = PresigningConfig::expires_in(expires_in).map_err(|e| presign(e.to_string()))?;

        let request = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .response_content_disposition(inline_disposition(&original_name))
            .presigned(presigning)
            .await
            .map_err(|e| presign(DisplayErrorContext(&e).to_string()))?;

        Ok(request.uri().to_string())
    }

    async fn get_original_name(&self, key: &str) -> Result<String, MediaError> {
        let head = self
            .client
            .head_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| {
                let service = e.into_service_error();
                if service.is_not_found() {
                    MediaError::NotFound(key.to_string())
                } else {
                    MediaError::Backend(DisplayErrorContext(&service).to_string())
                }
            })?;

        Ok(head
            .metadata()
            .and_then(|m| m.get(ORIGINAL_NAME_METADATA))
            .cloned()
            .unwrap_or_else(|| key.to_string()))
    }

    async fn delete_file(&self, key: &str) -> Result<(), MediaError> {
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| MediaError::Backend(DisplayErrorContext(&e).to_string()))?;
        Ok(())
    }
}
