use std::num::NonZeroUsize;
use tracing::{debug, info};

use crate::client::ListingTrim;

/// Settings shared by one batch run, as assembled by the caller.
#[derive(Debug, Clone)]
pub struct RunSettings {
    pub root_url: String,
    pub concurrency: NonZeroUsize,
    /// Restrict the listing to one space when set.
    pub source_space_id: Option<String>,
    pub listing_trim: ListingTrim,
}

impl RunSettings {
    pub fn trace_loaded(&self) {
        info!(
            root_url = %self.root_url,
            concurrency = self.concurrency.get(),
            source_space_id = ?self.source_space_id,
            listing_trim = ?self.listing_trim,
            "Loaded run settings"
        );
        debug!(?self, "Run settings (full debug)");
    }
}
