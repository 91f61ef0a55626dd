//! Bucket listing and presigned-URL resolution
//!
//! `CatalogResolver` turns one delimiter listing into the folder/file rows
//! the UI shows. It keeps no state between calls: every call lists the store
//! again and signs fresh URLs for every file in scope.

use std::time::Duration;

use futures::future::join_all;

use crate::config::{CatalogSettings, SigningPolicy};
use crate::error::CatalogError;
use crate::model::{CatalogEntry, Listing, SigningFailure};
use crate::storage::ObjectStore;

pub const DELIMITER: &str = "/";

pub struct CatalogResolver<S> {
    store: S,
    url_ttl: Duration,
    extensions: Vec<String>,
    signing_policy: SigningPolicy,
}

impl<S: ObjectStore> CatalogResolver<S> {
    pub fn new(store: S, settings: &CatalogSettings) -> Self {
        Self {
            store,
            url_ttl: Duration::from_secs(settings.url_ttl_secs),
            extensions: settings
                .audio_extensions
                .iter()
                .map(|ext| format!(".{}", ext.trim_start_matches('.').to_ascii_lowercase()))
                .collect(),
            signing_policy: settings.signing_policy,
        }
    }

    /// List the immediate children of `prefix`: folders first, then playable
    /// files with freshly signed URLs, each group in store order.
    ///
    /// `prefix` may arrive percent-encoded; the empty prefix is the bucket root.
    pub async fn list_entries(&self, prefix: &str) -> Result<Listing, CatalogError> {
        let prefix = decode_prefix(prefix)?;
        tracing::debug!(prefix = %prefix, "Listing catalog entries");

        let raw = self
            .store
            .list(&prefix, DELIMITER)
            .await
            .map_err(|e| {
                tracing::error!(prefix = %prefix, error = %e, "Listing failed");
                CatalogError::ListingFailed(e)
            })?;

        let mut entries: Vec<CatalogEntry> = raw
            .common_prefixes
            .iter()
            .map(|sub| CatalogEntry::folder(sub.clone(), folder_title(sub)))
            .collect();

        let files: Vec<&String> = raw
            .objects
            .iter()
            .filter(|key| key.as_str() != prefix && self.is_audio(key))
            .collect();

        let signed = join_all(files.iter().map(|key| self.store.sign(key, self.url_ttl))).await;

        let mut signing_failures = Vec::new();
        for (key, result) in files.into_iter().zip(signed) {
            match result {
                Ok(url) => entries.push(CatalogEntry::file(key.clone(), file_title(key), url)),
                Err(e) => match self.signing_policy {
                    SigningPolicy::Abort => {
                        tracing::error!(key = %key, error = %e, "Signing failed, aborting listing");
                        return Err(CatalogError::SigningFailed {
                            key: key.clone(),
                            source: e,
                        });
                    }
                    SigningPolicy::Omit => {
                        tracing::warn!(key = %key, error = %e, "Signing failed, omitting file");
                        signing_failures.push(SigningFailure {
                            key: key.clone(),
                            reason: e.to_string(),
                        });
                    }
                },
            }
        }

        tracing::info!(
            prefix = %prefix,
            entries = entries.len(),
            omitted = signing_failures.len(),
            "Catalog listing resolved"
        );

        Ok(Listing {
            prefix,
            entries,
            signing_failures,
        })
    }

    fn is_audio(&self, key: &str) -> bool {
        let key = key.to_ascii_lowercase();
        self.extensions.iter().any(|ext| key.ends_with(ext.as_str()))
    }
}

fn decode_prefix(prefix: &str) -> Result<String, CatalogError> {
    urlencoding::decode(prefix)
        .map(|decoded| decoded.into_owned())
        .map_err(|e| CatalogError::InvalidPrefix {
            prefix: prefix.to_string(),
            reason: e.to_string(),
        })
}

/// Last non-empty segment of a sub-prefix: `"albums/rock/"` -> `"rock"`.
pub fn folder_title(prefix: &str) -> String {
    prefix
        .split(DELIMITER)
        .filter(|segment| !segment.is_empty())
        .last()
        .unwrap_or_default()
        .to_string()
}

/// `"albums/track1.mp3"` -> `"track1.mp3"`.
pub fn file_title(key: &str) -> String {
    key.rsplit(DELIMITER).next().unwrap_or(key).to_string()
}

/// The prefix one level up: `"a/b/"` -> `"a/"`, `"a/"` -> `""`.
pub fn parent_prefix(prefix: &str) -> String {
    let trimmed = prefix.trim_end_matches(DELIMITER);
    match trimmed.rfind(DELIMITER) {
        Some(idx) => trimmed[..=idx].to_string(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests;
