use std::path::PathBuf;

use serde::Deserialize;

/// Top-level application settings loaded from `config.toml`.
///
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/bucket-player/config.toml` or
/// `~/.config/bucket-player/config.toml`.
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `BUCKET_PLAYER__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub storage: StorageSettings,
    pub catalog: CatalogSettings,
    pub playback: PlaybackSettings,
    pub download: DownloadSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// Custom S3 endpoint, e.g. `https://s3.eu-central-1.wasabisys.com`.
    /// Empty means the AWS endpoint for `region`.
    pub endpoint: String,
    pub region: String,
    pub bucket: String,
    pub access_key_id: String,
    pub secret_access_key: String,
    /// Address the bucket as `endpoint/bucket/key` instead of `bucket.endpoint/key`.
    pub force_path_style: bool,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            region: "us-east-1".to_string(),
            bucket: String::new(),
            access_key_id: String::new(),
            secret_access_key: String::new(),
            force_path_style: true,
        }
    }
}

impl StorageSettings {
    pub fn endpoint_url(&self) -> Option<&str> {
        let endpoint = self.endpoint.trim();
        if endpoint.is_empty() { None } else { Some(endpoint) }
    }
}

/// What to do when a single file's URL cannot be signed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SigningPolicy {
    /// Leave the file out of the listing and report it alongside the entries.
    #[default]
    Omit,
    /// Fail the whole listing.
    Abort,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CatalogSettings {
    /// Lifetime of presigned URLs (seconds).
    pub url_ttl_secs: u64,
    /// File extensions treated as playable, compared case-insensitively.
    pub audio_extensions: Vec<String>,
    pub signing_policy: SigningPolicy,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            url_ttl_secs: 3600,
            audio_extensions: vec!["mp3".to_string()],
            signing_policy: SigningPolicy::Omit,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlaybackSettings {
    /// Cadence of the progress sampler while a track plays (milliseconds).
    pub progress_interval_ms: u64,
    /// Volume at startup, in [0, 1].
    pub initial_volume: f32,
    /// Volume change per key press.
    pub volume_step: f32,
    /// Seek distance per key press, as a fraction of the track length.
    pub seek_step_fraction: f64,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            progress_interval_ms: 1000,
            initial_volume: 1.0,
            volume_step: 0.05,
            seek_step_fraction: 0.05,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DownloadSettings {
    /// Where downloaded tracks are saved.
    pub directory: PathBuf,
}

impl Default for DownloadSettings {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("downloads"),
        }
    }
}
