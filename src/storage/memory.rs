//! In-memory bucket used by the catalog and app tests

use std::collections::HashSet;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use crate::error::StoreError;
use super::{ObjectStore, StoreListing};

#[derive(Default)]
pub struct MemoryStore {
    keys: Vec<String>,
    unsignable: HashSet<String>,
    fail_listing: bool,
    list_calls: AtomicUsize,
    sign_calls: Mutex<Vec<String>>,
}

impl MemoryStore {
    pub fn with_keys<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            keys: keys.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail_listing: true,
            ..Self::default()
        }
    }

    pub fn refuse_to_sign(mut self, key: &str) -> Self {
        self.unsignable.insert(key.to_string());
        self
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn signed_keys(&self) -> Vec<String> {
        self.sign_calls.lock().unwrap().clone()
    }
}

impl ObjectStore for MemoryStore {
    async fn list(&self, prefix: &str, delimiter: &str) -> Result<StoreListing, StoreError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_listing {
            return Err(StoreError::List {
                prefix: prefix.to_string(),
                message: "connection refused".to_string(),
            });
        }

        let mut listing = StoreListing::default();
        for key in self.keys.iter().filter(|k| k.starts_with(prefix)) {
            let rest = &key[prefix.len()..];
            match rest.find(delimiter) {
                Some(idx) => {
                    let common = format!("{}{}", prefix, &rest[..idx + delimiter.len()]);
                    if !listing.common_prefixes.contains(&common) {
                        listing.common_prefixes.push(common);
                    }
                }
                None => listing.objects.push(key.clone()),
            }
        }
        Ok(listing)
    }

    async fn sign(&self, key: &str, ttl: Duration) -> Result<String, StoreError> {
        self.sign_calls.lock().unwrap().push(key.to_string());
        if self.unsignable.contains(key) {
            return Err(StoreError::Sign {
                key: key.to_string(),
                message: "access denied".to_string(),
            });
        }
        Ok(format!("https://signed.test/{}?expires={}", key, ttl.as_secs()))
    }
}
