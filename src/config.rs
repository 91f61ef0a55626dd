//! Configuration loader and schema types.
//!
//! Settings come from struct defaults, an optional TOML file and
//! `BUCKET_PLAYER__*` environment variables, in increasing precedence.

mod load;
mod schema;

pub use schema::*;
