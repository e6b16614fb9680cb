//! Upload limits and S3 bucket settings.

use core_config::{ConfigError, FromEnv, env_optional, env_parse, env_required};

const DEFAULT_MAX_BYTES: usize = 2 * 1024 * 1024;
const DEFAULT_REGION: &str = "us-east-1";

/// Upload limits.
///
/// - `IMAGE_MAX_BYTES` (optional) - largest accepted file, defaults to 2 MiB
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageConfig {
    pub max_bytes: usize,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            max_bytes: DEFAULT_MAX_BYTES,
        }
    }
}

impl FromEnv for ImageConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let max_bytes = env_parse("IMAGE_MAX_BYTES", DEFAULT_MAX_BYTES)?;
        if max_bytes == 0 {
            return Err(ConfigError::InvalidValue {
                key: "IMAGE_MAX_BYTES".to_string(),
                details: "must be greater than 0".to_string(),
            });
        }
        Ok(Self { max_bytes })
    }
}

/// S3 bucket configuration.
///
/// Loaded from environment variables:
/// - `S3_BUCKET` (required)
/// - `S3_REGION` or `AWS_REGION` (optional) - defaults to `us-east-1`
/// - `S3_ENDPOINT` (optional) - S3-compatible endpoint such as MinIO; enables
///   path-style addressing
/// - `S3_PUBLIC_URL` (optional) - base URL objects are served from
///
/// Credentials come from the standard AWS chain.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct S3Config {
    pub bucket: String,
    pub region: String,
    pub endpoint: Option<String>,
    pub public_url: Option<String>,
}

impl S3Config {
    /// Public URL of an object
    pub fn object_url(&self, key: &str) -> String {
        match (&self.public_url, &self.endpoint) {
            (Some(base), _) => format!("{}/{}", base.trim_end_matches('/'), key),
            (None, Some(endpoint)) => {
                format!("{}/{}/{}", endpoint.trim_end_matches('/'), self.bucket, key)
            }
            (None, None) => format!(
                "https://{}.s3.{}.amazonaws.com/{}",
                self.bucket, self.region, key
            ),
        }
    }
}

impl FromEnv for S3Config {
    fn from_env() -> Result<Self, ConfigError> {
        let region = env_optional("S3_REGION")
            .or_else(|| env_optional("AWS_REGION"))
            .unwrap_or_else(|| DEFAULT_REGION.to_string());

        Ok(Self {
            bucket: env_required("S3_BUCKET")?,
            region,
            endpoint: env_optional("S3_ENDPOINT"),
            public_url: env_optional("S3_PUBLIC_URL"),
        })
    }
}
