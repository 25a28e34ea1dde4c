use crate::updates::error::{UpdateError, UpdateResult};
use crate::updates::record::UpdateRecord;
use crate::updates::store::UpdateRecordStore;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::Arc;
use std::time::Duration;
use tokio::process::Command;
use tokio::time::Instant;
use tracing::{debug, info, warn};

pub const UPDATE_LOG_NOT_FOUND: &str = "update log not found";
pub const PID_FILE_UNREADABLE: &str = "cannot read update pid file";

// deadline used when the configured timeout doesn't fit in an Instant
const MAX_WAIT: Duration = Duration::from_secs(86400 * 365);

/// Reads the updater's pid file: one integer, optionally followed by a newline.
pub fn read_pid_file(path: &Path) -> Option<u32> {
    fs::read_to_string(path)
        .ok()?
        .trim()
        .parse::<u32>()
        .ok()
        .filter(|pid| *pid > 0)
}

/// Starts the external updater and works out which log file it writes.
///
/// The updater is not a child we wait on: it gets its own process group and no
/// stdio so it outlives both the request and the server. Completion is only
/// ever observed through liveness of the pid named in its log.
#[derive(Clone)]
pub struct UpdateLauncher {
    program: PathBuf,
    args: Vec<String>,
    pid_file: PathBuf,
    store: UpdateRecordStore,
}

impl UpdateLauncher {
    pub fn new(
        program: impl Into<PathBuf>,
        args: Vec<String>,
        pid_file: impl Into<PathBuf>,
        store: UpdateRecordStore,
    ) -> Self {
        Self {
            program: program.into(),
            args,
            pid_file: pid_file.into(),
            store,
        }
    }

    /// Spawns a run, then polls every `poll_interval` until its log shows up or
    /// `timeout` elapses.
    ///
    /// Only log files that did not exist before the spawn are considered, and
    /// only one announcing the pid currently in the pid file is accepted. File
    /// system and process table work runs on the blocking pool.
    pub async fn launch(
        &self,
        timeout: Duration,
        poll_interval: Duration,
    ) -> UpdateResult<UpdateRecord> {
        let known = Arc::new(self.store.blocking(|store| store.list_log_files()).await?);
        self.spawn_detached()?;

        let deadline = Instant::now()
            .checked_add(timeout)
            .unwrap_or_else(|| Instant::now() + MAX_WAIT);
        let mut pid_seen = None;

        loop {
            let pid_file = self.pid_file.clone();
            let exclude = Arc::clone(&known);
            let (pid, found) = self
                .store
                .blocking(move |store| match read_pid_file(&pid_file) {
                    Some(pid) => Ok((Some(pid), store.find_by_pid(pid, &exclude)?)),
                    None => Ok((None, None)),
                })
                .await?;

            if let Some(pid) = pid.filter(|pid| pid_seen != Some(*pid)) {
                debug!("updater pid file names pid {}", pid);
                pid_seen = Some(pid);
            }

            if let Some(record) = found {
                info!(
                    "update {} started with pid {}",
                    record.timestamp, record.pid
                );
                return Ok(record);
            }

            let now = Instant::now();
            if now >= deadline {
                break;
            }
            tokio::time::sleep(poll_interval.min(deadline - now)).await;
        }

        let reason = match pid_seen {
            Some(_) => UPDATE_LOG_NOT_FOUND,
            None => PID_FILE_UNREADABLE,
        };
        warn!("update launch gave up after {:?}: {}", timeout, reason);
        Err(UpdateError::Launch(reason.to_string()))
    }

    fn spawn_detached(&self) -> UpdateResult<()> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .process_group(0)
            .kill_on_drop(false)
            .spawn()
            .map_err(|err| {
                warn!("cannot start updater {:?}: {}", self.program, err);
                UpdateError::Launch(format!("cannot run update: {}", err.kind()))
            })?;

        let spawned_pid = child.id();
        info!("spawned updater {:?} as pid {:?}", self.program, spawned_pid);

        // reap it so a finished updater doesn't linger as a zombie
        tokio::spawn(async move {
            match child.wait().await {
                Ok(status) => debug!("updater pid {:?} exited with {}", spawned_pid, status),
                Err(err) => warn!("cannot wait for updater pid {:?}: {}", spawned_pid, err),
            }
        });

        Ok(())
    }
}
