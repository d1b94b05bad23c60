use async_trait::async_trait;
use aws_config::Region;
use aws_sdk_s3::config::Credentials;
use aws_sdk_s3::Client;
use bytes::Bytes;

use super::{validate_filename, ResumeStore, StoreError};

/// Reads resumes from `{bucket}/{prefix}{filename}` on S3 or MinIO.
pub struct S3ResumeStore {
    client: Client,
    bucket: String,
    prefix: String,
}

impl S3ResumeStore {
    pub fn new(client: Client, bucket: String, prefix: String) -> Self {
        Self {
            client,
            bucket,
            prefix,
        }
    }

    /// Constructs an S3 client configured for MinIO (local) or AWS (production).
    pub async fn build_client(
        endpoint: &str,
        access_key_id: &str,
        secret_access_key: &str,
    ) -> Client {
        let credentials = Credentials::new(
            access_key_id,
            secret_access_key,
            None,
            None,
            "smarthire-static",
        );

        let s3_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(Region::new("us-east-1"))
            .credentials_provider(credentials)
            .endpoint_url(endpoint)
            .load()
            .await;

        Client::new(&s3_config)
    }

    fn key_for(&self, filename: &str) -> String {
        format!("{}{}", self.prefix, filename)
    }
}

#[async_trait]
impl ResumeStore for S3ResumeStore {
    async fn fetch(&self, filename: &str) -> Result<Bytes, StoreError> {
        validate_filename(filename)?;

        let output = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(self.key_for(filename))
            .send()
            .await
            .map_err(|e| {
                if e.as_service_error().is_some_and(|se| se.is_no_such_key()) {
                    StoreError::NotFound(filename.to_string())
                } else {
                    StoreError::S3(e.to_string())
                }
            })?;

        let body = output
            .body
            .collect()
            .await
            .map_err(|e| StoreError::S3(format!("reading body of {filename}: {e}")))?;

        Ok(body.into_bytes())
    }

    fn backend(&self) -> &'static str {
        "s3"
    }
}
