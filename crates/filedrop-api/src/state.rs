//! Application state shared by all handlers.
//!
//! Service clients are built once at startup and injected here as trait objects, so tests
//! can swap in fakes.

use filedrop_services::{Notifier, RecordStore, Storage};
use filedrop_worker::FollowUpRunner;
use std::path::PathBuf;
use std::sync::Arc;

/// Upload handling settings.
#[derive(Clone, Debug)]
pub struct UploadSettings {
    /// Directory incoming files are spooled to before being stored.
    pub tmp_dir: PathBuf,
}

#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<dyn Storage>,
    pub records: Arc<dyn RecordStore>,
    pub notifier: Arc<dyn Notifier>,
    pub follow_ups: FollowUpRunner,
    pub uploads: UploadSettings,
}
