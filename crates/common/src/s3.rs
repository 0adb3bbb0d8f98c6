use std::time::Duration;

pub use aws_sdk_s3::Error;
use aws_sdk_s3::{
    config::{Credentials, Region},
    presigning::{PresignedRequest, PresigningConfig},
    primitives::ByteStream,
    Client,
};

use crate::config;

/// Expiration time used for pre-signed URLs.
///
/// Pre-signed URLs are handed out to clients as time-limited
/// download links for uploaded team and idea files.
const EXPIRATION_TIME: Duration = Duration::from_secs(7 * 86400);

/// Configured S3 client.
pub struct ConfiguredClient<'a> {
    config: &'a config::Storage,
    client: Client,
}

impl<'a> ConfiguredClient<'a> {
    /// Create new [`ConfiguredClient`] from the provided [`Storage`] configuration.
    ///
    /// [`Storage`]: config::Storage
    pub async fn new(config: &'a config::Storage) -> ConfiguredClient<'a> {
        let sdk_config = aws_config::from_env()
            .endpoint_url(&config.endpoint_url)
            .region(Region::new(config.region.clone()))
            .credentials_provider(Credentials::new(
                &config.access_key_id,
                &config.secret_access_key,
                None,
                None,
                "s3-client",
            ))
            .load()
            .await;

        ConfiguredClient {
            config,
            client: Client::new(&sdk_config),
        }
    }

    /// Get a pre-signed download request for the provided object key.
    ///
    /// The pre-signed request is active for a limited duration.
    pub async fn get_file(&self, key: &str) -> Result<PresignedRequest, Error> {
        let req = self
            .client
            .get_object()
            .bucket(&self.config.file_bucket)
            .key(key)
            .presigned(
                PresigningConfig::builder()
                    .expires_in(EXPIRATION_TIME)
                    .build()
                    .expect("unable to build presigning config"),
            )
            .await?;

        Ok(req)
    }

    /// Upload a file under the provided object key.
    pub async fn upload_file<F>(&self, key: &str, content_type: &str, file: F) -> Result<(), Error>
    where
        ByteStream: From<F>,
    {
        self.client
            .put_object()
            .bucket(&self.config.file_bucket)
            .key(key)
            .content_type(content_type)
            .body(ByteStream::from(file))
            .send()
            .await?;

        Ok(())
    }
}
