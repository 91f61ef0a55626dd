//! Object-store access
//!
//! The catalog only needs two things from a bucket: a one-level delimiter
//! listing and a presigned GET URL. `ObjectStore` captures exactly that so
//! the resolver can run against S3 in the app and an in-memory bucket in
//! tests.

mod s3;

#[cfg(test)]
pub(crate) mod memory;

use std::future::Future;
use std::time::Duration;

use crate::error::StoreError;

pub use s3::S3Store;

/// Raw answer to a delimiter listing, in store order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StoreListing {
    /// Sub-prefixes one level below the requested prefix, delimiter included.
    pub common_prefixes: Vec<String>,
    /// Keys of objects directly under the requested prefix.
    pub objects: Vec<String>,
}

pub trait ObjectStore: Send + Sync {
    fn list(
        &self,
        prefix: &str,
        delimiter: &str,
    ) -> impl Future<Output = Result<StoreListing, StoreError>> + Send;

    fn sign(&self, key: &str, ttl: Duration) -> impl Future<Output = Result<String, StoreError>> + Send;
}
