//! Category banner storage on S3.
//!
//! Banner ingestion is a staged pipeline: the object write must complete
//! before the signed read URL is requested, and the category row is only
//! persisted by the caller once both stages succeeded. A failure at either
//! stage carries its stage in the error, and nothing is persisted - no
//! category row ever points at an unresolvable image.

use std::time::Duration;

use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::primitives::ByteStream;
use thiserror::Error;

use cartloom_core::CategoryEid;

/// Errors from the banner storage pipeline, attributed to their stage.
#[derive(Debug, Error)]
pub enum ImageStoreError {
    /// The object write to S3 failed; nothing was stored.
    #[error("banner upload failed: {0}")]
    Upload(String),

    /// The object was stored but the signed read URL could not be obtained.
    ///
    /// The caller must not persist a category record; the orphaned object is
    /// harmless and overwritten on retry (the key is the category id).
    #[error("banner URL resolution failed: {0}")]
    SignUrl(String),
}

/// A stored banner: the object key and its resolved signed read URL.
#[derive(Debug, Clone)]
pub struct StoredBanner {
    pub key: String,
    pub url: String,
}

/// S3-backed storage for category banner images.
#[derive(Clone)]
pub struct ImageStore {
    client: aws_sdk_s3::Client,
    bucket: String,
    url_ttl: Duration,
}

impl ImageStore {
    /// Create a banner store over an S3 client.
    #[must_use]
    pub const fn new(client: aws_sdk_s3::Client, bucket: String, url_ttl: Duration) -> Self {
        Self {
            client,
            bucket,
            url_ttl,
        }
    }

    /// The object key for a category's banner.
    #[must_use]
    pub fn banner_key(eid: &CategoryEid) -> String {
        format!("banners/{eid}")
    }

    /// Upload a banner and resolve its signed read URL.
    ///
    /// Runs the first two stages of category creation: `put_object` keyed by
    /// the category id, then a presigned GET request for that key. The caller
    /// persists the category row only after this returns.
    ///
    /// # Errors
    ///
    /// Returns [`ImageStoreError::Upload`] if the object write fails, or
    /// [`ImageStoreError::SignUrl`] if the write succeeded but the URL
    /// request failed.
    pub async fn store_banner(
        &self,
        eid: &CategoryEid,
        content_type: &str,
        body: Vec<u8>,
    ) -> Result<StoredBanner, ImageStoreError> {
        let key = Self::banner_key(eid);

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(&key)
            .content_type(content_type)
            .body(ByteStream::from(body))
            .send()
            .await
            .map_err(|e| {
                tracing::error!(key = %key, error = %e, "banner upload failed");
                ImageStoreError::Upload(e.to_string())
            })?;

        let presigning = PresigningConfig::expires_in(self.url_ttl)
            .map_err(|e| ImageStoreError::SignUrl(e.to_string()))?;

        let presigned = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(&key)
            .presigned(presigning)
            .await
            .map_err(|e| {
                tracing::error!(key = %key, error = %e, "banner URL resolution failed");
                ImageStoreError::SignUrl(e.to_string())
            })?;

        Ok(StoredBanner {
            key,
            url: presigned.uri().to_string(),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn banner_key_is_scoped_by_category_id() {
        let eid = CategoryEid::new("cat123");
        assert_eq!(ImageStore::banner_key(&eid), "banners/cat123");
    }

    #[test]
    fn error_stages_are_distinguishable() {
        let upload = ImageStoreError::Upload("timed out".to_owned());
        let sign = ImageStoreError::SignUrl("denied".to_owned());
        assert!(upload.to_string().contains("upload"));
        assert!(sign.to_string().contains("URL resolution"));
    }
}
