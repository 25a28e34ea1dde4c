mod error;
mod launcher;
mod liveness;
mod orchestrator;
mod record;
mod scanner;
mod store;

pub use error::{UpdateError, UpdateResult};
pub use launcher::{read_pid_file, UpdateLauncher, PID_FILE_UNREADABLE, UPDATE_LOG_NOT_FOUND};
pub use liveness::{ProcessLiveness, SystemLiveness};
pub use orchestrator::{LaunchSettings, UpdateOrchestrator};
pub use record::{UpdateRecord, UpdateStatus};
pub use scanner::{parse_log_file_name, LogDirectoryScanner};
pub use store::{extract_pid, has_pid_marker, UpdateRecordStore};

use crate::config::PmmConfig;
use std::sync::Arc;

impl UpdateOrchestrator {
    /// Wires the orchestrator to the layout under `update-dir-path`.
    pub fn from_config(config: &PmmConfig, liveness: Arc<dyn ProcessLiveness>) -> Self {
        let scanner = LogDirectoryScanner::new(config.update_log_dir());
        let store = UpdateRecordStore::new(scanner, liveness);
        let launcher = UpdateLauncher::new(
            &config.updater_path,
            config.updater_args.clone(),
            config.update_pid_file(),
            store.clone(),
        );
        Self::new(store, launcher, config.launch_settings())
    }
}
