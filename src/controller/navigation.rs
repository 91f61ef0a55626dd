//! Folder navigation: listing prefixes and going back

use crate::audio::EngineFactory;
use crate::catalog::parent_prefix;
use crate::storage::ObjectStore;

use super::{format_error, AppController, ListingResult};

impl<S, F> AppController<S, F>
where
    S: ObjectStore + 'static,
    F: EngineFactory,
{
    /// Start listing `prefix` in the background.
    ///
    /// Requests are not deduplicated; each gets a sequence number and only
    /// the newest one may replace the displayed listing.
    pub fn open_prefix(&mut self, prefix: &str) {
        let seq = self.model.begin_listing();
        tracing::debug!(prefix, seq, "Opening prefix");

        let resolver = self.resolver.clone();
        let tx = self.listing_tx.clone();
        let prefix = prefix.to_string();
        tokio::spawn(async move {
            let result = resolver.list_entries(&prefix).await;
            let _ = tx.send(ListingResult { seq, prefix, result });
        });
    }

    pub fn refresh(&mut self) {
        let prefix = self.model.prefix().to_string();
        self.open_prefix(&prefix);
    }

    pub fn go_back(&mut self) {
        if self.model.prefix().is_empty() {
            return;
        }
        let parent = parent_prefix(self.model.prefix());
        self.open_prefix(&parent);
    }

    pub(crate) fn apply_listing(&mut self, listing: ListingResult) {
        let ListingResult { seq, prefix, result } = listing;

        if !self.model.is_current_listing(seq) {
            tracing::debug!(prefix = %prefix, seq, "Discarding stale listing");
            return;
        }
        self.model.finish_listing(seq);

        match result {
            Ok(listing) => {
                let omitted = listing.signing_failures.len();
                tracing::debug!(
                    prefix = %prefix,
                    folders = listing.folders().count(),
                    files = listing.files().count(),
                    omitted,
                    "Listing applied"
                );
                self.player.set_playlist(listing.entries.clone());
                self.model.set_listing(listing);
                if omitted > 0 {
                    self.model
                        .set_error(format!("{} file(s) could not be signed and are hidden", omitted));
                }
            }
            Err(e) => {
                tracing::error!(prefix = %prefix, error = %e, "Listing failed");
                self.model.set_error(format_error(&e));
            }
        }
    }
}
