//! Error types shared by the catalog, storage and audio layers
//!
//! The application boundary (`main`, download helper) works with `anyhow`;
//! everything below it returns one of these typed errors so callers can tell
//! a failed listing from a failed signature.

use thiserror::Error;

/// Transport-level failure talking to the object store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("list request for prefix {prefix:?} failed: {message}")]
    List { prefix: String, message: String },

    #[error("could not sign {key:?}: {message}")]
    Sign { key: String, message: String },
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("invalid prefix {prefix:?}: {reason}")]
    InvalidPrefix { prefix: String, reason: String },

    #[error("listing failed")]
    ListingFailed(#[source] StoreError),

    #[error("signing failed for {key}")]
    SigningFailed {
        key: String,
        #[source]
        source: StoreError,
    },
}

/// Failure reported by an audio engine instance.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("could not load {url}: {reason}")]
    Load { url: String, reason: String },

    #[error("could not start playback: {0}")]
    Play(String),
}
