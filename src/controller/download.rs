//! Saving a file entry to the local download directory

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use tokio::io::AsyncWriteExt;

use crate::audio::EngineFactory;
use crate::storage::ObjectStore;

use super::AppController;

pub(crate) enum DownloadOutcome {
    Saved { title: String, path: PathBuf },
    Failed { title: String, error: String },
}

impl<S, F> AppController<S, F>
where
    S: ObjectStore + 'static,
    F: EngineFactory,
{
    pub fn download_selected(&mut self) {
        let Some(entry) = self.model.selected_entry() else {
            return;
        };
        let Some(url) = entry.url() else {
            self.model.set_info("Folders cannot be downloaded");
            return;
        };

        let title = entry.title.clone();
        let url = url.to_string();
        let http = self.http.clone();
        let dir = self.download_dir.clone();
        let tx = self.download_tx.clone();

        tracing::info!(title = %title, "Download started");
        self.model.set_info(format!("Downloading {}", title));

        tokio::spawn(async move {
            let outcome = match save(&http, &url, &dir, &title).await {
                Ok(path) => DownloadOutcome::Saved { title, path },
                Err(e) => DownloadOutcome::Failed {
                    title,
                    error: format!("{:#}", e),
                },
            };
            let _ = tx.send(outcome);
        });
    }

    pub(crate) fn apply_download(&mut self, outcome: DownloadOutcome) {
        match outcome {
            DownloadOutcome::Saved { title, path } => {
                tracing::info!(title = %title, path = %path.display(), "Download finished");
                self.model.set_info(format!("Saved {}", path.display()));
            }
            DownloadOutcome::Failed { title, error } => {
                tracing::error!(title = %title, error = %error, "Download failed");
                self.model.set_error(format!("Failed to download {}: {}", title, error));
            }
        }
    }
}

async fn save(http: &reqwest::Client, url: &str, dir: &Path, title: &str) -> Result<PathBuf> {
    let response = http.get(url).send().await.context("request failed")?;
    let status = response.status();
    if !status.is_success() {
        bail!("HTTP error! status: {}", status);
    }
    let bytes = response.bytes().await.context("reading response body")?;

    tokio::fs::create_dir_all(dir)
        .await
        .with_context(|| format!("creating {}", dir.display()))?;
    let path = free_download_path(dir, title).await?;
    let mut file = tokio::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&path)
        .await
        .with_context(|| format!("creating {}", path.display()))?;
    file.write_all(&bytes)
        .await
        .with_context(|| format!("writing {}", path.display()))?;
    file.flush().await?;
    Ok(path)
}

/// `download_path`, numbered `name (1).ext`, `name (2).ext`, ... while the
/// name is already taken. Existing files are never overwritten.
pub(crate) async fn free_download_path(dir: &Path, title: &str) -> Result<PathBuf> {
    let path = download_path(dir, title);
    let mut candidate = path.clone();
    let mut n = 1;
    while tokio::fs::try_exists(&candidate)
        .await
        .with_context(|| format!("checking {}", candidate.display()))?
    {
        candidate = numbered(&path, n);
        n += 1;
    }
    if candidate != path {
        tracing::info!(
            existing = %path.display(),
            saved_as = %candidate.display(),
            "Download name taken"
        );
    }
    Ok(candidate)
}

fn numbered(path: &Path, n: u32) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = match path.extension() {
        Some(ext) => format!("{} ({}).{}", stem, n, ext.to_string_lossy()),
        None => format!("{} ({})", stem, n),
    };
    path.with_file_name(name)
}

/// Target path for `title` inside `dir`; path separators in the title are
/// replaced so the file always lands directly in `dir`.
pub(crate) fn download_path(dir: &Path, title: &str) -> PathBuf {
    let name: String = title
        .chars()
        .map(|c| if matches!(c, '/' | '\\') { '_' } else { c })
        .collect();
    let name = match name.trim() {
        "" | "." | ".." => "download".to_string(),
        trimmed => trimmed.to_string(),
    };
    dir.join(name)
}
