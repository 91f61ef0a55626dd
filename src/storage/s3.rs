use std::sync::Arc;
use std::time::Duration;

use aws_sdk_s3::config::{BehaviorVersion, Credentials, Region};
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::Client;

use crate::config::StorageSettings;
use crate::error::StoreError;
use super::{ObjectStore, StoreListing};

const CREDENTIALS_PROVIDER: &str = "bucket-player-config";

/// S3-compatible bucket (AWS, Wasabi, MinIO, ...) addressed with static keys.
#[derive(Clone)]
pub struct S3Store {
    client: Arc<Client>,
    bucket: String,
}

impl S3Store {
    pub fn new(settings: &StorageSettings) -> Self {
        let credentials = Credentials::new(
            settings.access_key_id.clone(),
            settings.secret_access_key.clone(),
            None,
            None,
            CREDENTIALS_PROVIDER,
        );

        let mut builder = aws_sdk_s3::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new(settings.region.clone()))
            .credentials_provider(credentials)
            .force_path_style(settings.force_path_style);

        if let Some(endpoint) = settings.endpoint_url() {
            builder = builder.endpoint_url(endpoint);
        }

        tracing::debug!(
            bucket = %settings.bucket,
            region = %settings.region,
            endpoint = ?settings.endpoint_url(),
            "S3 client initialized"
        );

        Self {
            client: Arc::new(Client::from_conf(builder.build())),
            bucket: settings.bucket.clone(),
        }
    }
}

impl ObjectStore for S3Store {
    async fn list(&self, prefix: &str, delimiter: &str) -> Result<StoreListing, StoreError> {
        tracing::debug!(bucket = %self.bucket, prefix, "ListObjectsV2 request started");

        let mut listing = StoreListing::default();
        let mut continuation: Option<String> = None;

        loop {
            let mut request = self
                .client
                .list_objects_v2()
                .bucket(&self.bucket)
                .prefix(prefix)
                .delimiter(delimiter);
            if let Some(token) = continuation.take() {
                request = request.continuation_token(token);
            }

            let output = request.send().await.map_err(|e| StoreError::List {
                prefix: prefix.to_string(),
                message: DisplayErrorContext(&e).to_string(),
            })?;

            listing.common_prefixes.extend(
                output
                    .common_prefixes()
                    .iter()
                    .filter_map(|p| p.prefix().map(str::to_string)),
            );
            listing
                .objects
                .extend(output.contents().iter().filter_map(|o| o.key().map(str::to_string)));

            match output.next_continuation_token() {
                Some(token) => continuation = Some(token.to_string()),
                None => break,
            }
        }

        tracing::debug!(
            prefix,
            folders = listing.common_prefixes.len(),
            objects = listing.objects.len(),
            "ListObjectsV2 request finished"
        );
        Ok(listing)
    }

    async fn sign(&self, key: &str, ttl: Duration) -> Result<String, StoreError> {
        let sign_error = |message: String| StoreError::Sign {
            key: key.to_string(),
            message,
        };

        let presigning = PresigningConfig::expires_in(ttl).map_err(|e| sign_error(e.to_string()))?;
        let request = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .presigned(presigning)
            .await
            .map_err(|e| sign_error(DisplayErrorContext(&e).to_string()))?;

        Ok(request.uri().to_string())
    }
}
