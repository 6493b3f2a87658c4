use crate::error::MediaError;

/// Object storage configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// `host:port` of the S3-compatible service, or a full URL.
    pub endpoint: String,
    pub access_key: String,
    pub secret_key: String,
    pub bucket: String,
    pub use_ssl: bool,
    pub region: String,
}

impl StorageConfig {
    /// Load configuration from environment variables.
    ///
    /// | Env Var            | Default     |
    /// |--------------------|-------------|
    /// | `MINIO_ENDPOINT`   | required    |
    /// | `MINIO_ACCESS_KEY` | required    |
    /// | `MINIO_SECRET_KEY` | required    |
    /// | `MINIO_BUCKET`     | required    |
    /// | `MINIO_USE_SSL`    | `false`     |
    /// | `MINIO_REGION`     | `us-east-1` |
    pub fn from_env() -> Result<Self, MediaError> {
        let required = |name: &str| {
            std::env::var(name)
                .ok()
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| MediaError::Config(format!("{name} must be set")))
        };

        let use_ssl = std::env::var("MINIO_USE_SSL")
            .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        Ok(Self {
            endpoint: required("MINIO_ENDPOINT")?,
            access_key: required("MINIO_ACCESS_KEY")?,
            secret_key: required("MINIO_SECRET_KEY")?,
            bucket: required("MINIO_BUCKET")?,
            use_ssl,
            region: std::env::var("MINIO_REGION").unwrap_or_else(|_| "us-east-1".into()),
        })
    }

    /// Endpoint as a URL, adding the scheme implied by `use_ssl` when the
    /// configured value has none.
    pub fn endpoint_url(&self) -> String {
        if self.endpoint.starts_with("http://") || self.endpoint.starts_with("https://") {
            return self.endpoint.clone();
        }
        let scheme = if self.use_ssl { "https" } else { "http" };
        format!("{scheme}://{}", self.endpoint)
    }
}
