//! Controller module - Application logic and event handling
//!
//! The controller sits between the terminal and the two core components. It
//! owns the UI model and the playback controller, starts listing and
//! download requests on background tasks and folds their results back into
//! the model on the UI loop.
//!
//! - `input`: key event handling
//! - `navigation`: listing folders, going back, stale-response filtering
//! - `playback`: transport controls forwarded to the playback controller
//! - `player_events`: draining engine signals, player events and task results
//! - `download`: saving the selected file locally

mod download;
mod input;
mod navigation;
mod playback;
mod player_events;

use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::audio::EngineFactory;
use crate::catalog::CatalogResolver;
use crate::config::Settings;
use crate::error::CatalogError;
use crate::model::{AppModel, Listing};
use crate::player::{PlaybackController, PlayerEvent};
use crate::storage::ObjectStore;

use download::DownloadOutcome;

/// Result of one background listing request.
pub(crate) struct ListingResult {
    pub seq: u64,
    pub prefix: String,
    pub result: Result<Listing, CatalogError>,
}

pub struct AppController<S, F: EngineFactory> {
    pub(crate) model: AppModel,
    pub(crate) player: PlaybackController<F>,
    player_events: UnboundedReceiver<PlayerEvent>,
    resolver: Arc<CatalogResolver<S>>,
    listing_tx: UnboundedSender<ListingResult>,
    listing_rx: UnboundedReceiver<ListingResult>,
    http: reqwest::Client,
    download_dir: PathBuf,
    download_tx: UnboundedSender<DownloadOutcome>,
    download_rx: UnboundedReceiver<DownloadOutcome>,
    volume_step: f32,
    seek_step: f64,
}

impl<S, F> AppController<S, F>
where
    S: ObjectStore + 'static,
    F: EngineFactory,
{
    pub fn new(
        resolver: CatalogResolver<S>,
        factory: F,
        http: reqwest::Client,
        settings: &Settings,
    ) -> Self {
        let (player, player_events) = PlaybackController::new(factory, &settings.playback);
        let (listing_tx, listing_rx) = mpsc::unbounded_channel();
        let (download_tx, download_rx) = mpsc::unbounded_channel();

        let mut model = AppModel::new();
        model.set_playback(player.state().clone());

        Self {
            model,
            player,
            player_events,
            resolver: Arc::new(resolver),
            listing_tx,
            listing_rx,
            http,
            download_dir: settings.download.directory.clone(),
            download_tx,
            download_rx,
            volume_step: settings.playback.volume_step,
            seek_step: settings.playback.seek_step_fraction,
        }
    }

    pub fn model(&self) -> &AppModel {
        &self.model
    }

    pub fn model_mut(&mut self) -> &mut AppModel {
        &mut self.model
    }

    /// Stop playback and release the audio engine.
    pub fn shutdown(&mut self) {
        self.player.dispose();
        tracing::info!("Controller shut down");
    }
}

/// Turn an error chain into a one-line message for the notification area.
pub(crate) fn format_error(error: &(dyn Error + 'static)) -> String {
    let mut chain = vec![error.to_string()];
    let mut source = error.source();
    while let Some(inner) = source {
        chain.push(inner.to_string());
        source = inner.source();
    }
    let detail = chain.join(": ");

    if detail.contains("AccessDenied") || detail.contains("403") {
        "Access denied. Check the storage credentials.".to_string()
    } else if detail.contains("NoSuchBucket") {
        "Bucket not found. Check storage.bucket.".to_string()
    } else if detail.contains("dispatch failure") || detail.contains("connect") {
        "Could not reach the storage endpoint.".to_string()
    } else {
        format!("Error: {}", detail)
    }
}

#[cfg(test)]
mod tests;
