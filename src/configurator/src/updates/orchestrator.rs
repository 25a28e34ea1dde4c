use crate::updates::error::UpdateResult;
use crate::updates::launcher::UpdateLauncher;
use crate::updates::record::UpdateRecord;
use crate::updates::store::UpdateRecordStore;
use std::time::Duration;
use tracing::debug;

/// Poll bounds for correlating a freshly launched run with its log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LaunchSettings {
    pub timeout: Duration,
    pub poll_interval: Duration,
}

/// The list/get/run/delete lifecycle behind the `/v1/updates` endpoints.
///
/// Concurrent `run` calls are not serialized; whether overlapping updater
/// processes are acceptable is up to the updater.
#[derive(Clone)]
pub struct UpdateOrchestrator {
    store: UpdateRecordStore,
    launcher: UpdateLauncher,
    settings: LaunchSettings,
}

impl UpdateOrchestrator {
    pub fn new(store: UpdateRecordStore, launcher: UpdateLauncher, settings: LaunchSettings) -> Self {
        Self {
            store,
            launcher,
            settings,
        }
    }

    /// All known runs, most recent first.
    pub async fn list(&self) -> UpdateResult<Vec<String>> {
        let timestamps = self.store.blocking(|store| store.list_timestamps()).await?;
        debug!("found {} update logs", timestamps.len());
        // the fixed-width timestamp format sorts chronologically as text
        Ok(timestamps.into_iter().rev().collect())
    }

    pub async fn get(&self, timestamp: &str) -> UpdateResult<UpdateRecord> {
        let timestamp = timestamp.to_string();
        self.store
            .blocking(move |store| store.get_record(&timestamp))
            .await
    }

    pub async fn run(&self) -> UpdateResult<UpdateRecord> {
        self.launcher
            .launch(self.settings.timeout, self.settings.poll_interval)
            .await
    }

    /// Removes every log file carrying `timestamp`.
    pub async fn delete(&self, timestamp: &str) -> UpdateResult<()> {
        let timestamp = timestamp.to_string();
        self.store
            .blocking(move |store| store.delete_record(&timestamp))
            .await
    }
}
