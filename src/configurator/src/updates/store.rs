use crate::updates::error::{UpdateError, UpdateResult};
use crate::updates::liveness::ProcessLiveness;
use crate::updates::record::{UpdateRecord, UpdateStatus};
use crate::updates::scanner::LogDirectoryScanner;
use regex::Regex;
use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::{Arc, LazyLock};
use tracing::{debug, info};

static PID_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"PID: (\d+)").expect("valid pid pattern"));

/// First `PID: <digits>` in a log, if it names a positive pid that fits a `u32`.
pub fn extract_pid(content: &str) -> Option<u32> {
    PID_LINE
        .captures(content)
        .and_then(|captures| captures.get(1))
        .and_then(|digits| digits.as_str().parse::<u32>().ok())
        .filter(|pid| *pid > 0)
}

/// True when some line of the log ends with exactly `PID: <pid>`.
pub fn has_pid_marker(content: &str, pid: u32) -> bool {
    let marker = format!("PID: {pid}");
    content
        .lines()
        .any(|line| line.trim_end().ends_with(&marker))
}

/// Reader/lister/deleter view of the update log directory.
///
/// The updater owns the writing side; nothing here assumes exclusive access.
#[derive(Clone)]
pub struct UpdateRecordStore {
    scanner: LogDirectoryScanner,
    liveness: Arc<dyn ProcessLiveness>,
}

impl UpdateRecordStore {
    pub fn new(scanner: LogDirectoryScanner, liveness: Arc<dyn ProcessLiveness>) -> Self {
        Self { scanner, liveness }
    }

    pub fn list_timestamps(&self) -> UpdateResult<BTreeSet<String>> {
        Ok(self.scanner.list()?.into_keys().collect())
    }

    /// Every update log file name, including ones sharing a timestamp.
    pub fn list_log_files(&self) -> UpdateResult<BTreeSet<String>> {
        Ok(self.scanner.list()?.into_values().flatten().collect())
    }

    /// Fails with `DuplicateTimestamp` when several logs carry `timestamp`.
    pub fn get_record(&self, timestamp: &str) -> UpdateResult<UpdateRecord> {
        let log_file_name = self.resolve(timestamp)?;
        let content = self.read_log(timestamp, &log_file_name)?;
        self.build_record(timestamp, log_file_name, content)
    }

    /// Removes every log carrying `timestamp`, so an ambiguous timestamp can be cleared.
    pub fn delete_record(&self, timestamp: &str) -> UpdateResult<()> {
        let mut removed = 0;
        for log_file_name in self.log_files_for(timestamp)? {
            match fs::remove_file(self.path_of(&log_file_name)) {
                Ok(()) => {
                    info!("removed update log {}", log_file_name);
                    removed += 1;
                }
                // lost a race with another delete
                Err(err) if err.kind() == io::ErrorKind::NotFound => {}
                Err(err) => return Err(UpdateError::io("cannot remove update log")(err)),
            }
        }

        if removed == 0 {
            return Err(UpdateError::NotFound {
                timestamp: timestamp.to_string(),
            });
        }
        Ok(())
    }

    /// Finds the run whose log announces `pid`, ignoring log files named in `exclude`.
    ///
    /// Candidates are checked oldest first so the answer is stable between polls.
    pub fn find_by_pid(
        &self,
        pid: u32,
        exclude: &BTreeSet<String>,
    ) -> UpdateResult<Option<UpdateRecord>> {
        let candidates = self
            .scanner
            .list()?
            .into_iter()
            .flat_map(|(timestamp, names)| {
                names
                    .into_iter()
                    .map(move |name| (timestamp.clone(), name))
            })
            .filter(|(_, name)| !exclude.contains(name));

        for (timestamp, log_file_name) in candidates {
            let content = match self.read_log(&timestamp, &log_file_name) {
                Ok(content) => content,
                Err(UpdateError::NotFound { .. }) => continue,
                Err(err) => return Err(err),
            };

            // the first PID line must agree too, or the record would name another pid
            if has_pid_marker(&content, pid) && extract_pid(&content) == Some(pid) {
                debug!("update log {} belongs to pid {}", log_file_name, pid);
                return self
                    .build_record(&timestamp, log_file_name, content)
                    .map(Some);
            }
        }

        Ok(None)
    }

    /// Runs `f` against this store on the blocking pool.
    pub async fn blocking<T, F>(&self, f: F) -> UpdateResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&UpdateRecordStore) -> UpdateResult<T> + Send + 'static,
    {
        let store = self.clone();
        tokio::task::spawn_blocking(move || f(&store))
            .await
            .map_err(|err| UpdateError::io("update task failed")(io::Error::other(err)))?
    }

    fn log_files_for(&self, timestamp: &str) -> UpdateResult<Vec<String>> {
        self.scanner
            .list()?
            .remove(timestamp)
            .ok_or_else(|| UpdateError::NotFound {
                timestamp: timestamp.to_string(),
            })
    }

    fn resolve(&self, timestamp: &str) -> UpdateResult<String> {
        let mut log_file_names = self.log_files_for(timestamp)?;
        if log_file_names.len() > 1 {
            return Err(UpdateError::DuplicateTimestamp {
                timestamp: timestamp.to_string(),
            });
        }
        log_file_names
            .pop()
            .ok_or_else(|| UpdateError::NotFound {
                timestamp: timestamp.to_string(),
            })
    }

    fn read_log(&self, timestamp: &str, log_file_name: &str) -> UpdateResult<String> {
        match fs::read(self.path_of(log_file_name)) {
            Ok(bytes) => Ok(String::from_utf8_lossy(&bytes).into_owned()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Err(UpdateError::NotFound {
                timestamp: timestamp.to_string(),
            }),
            Err(err) => Err(UpdateError::io("cannot read update log")(err)),
        }
    }

    fn build_record(
        &self,
        timestamp: &str,
        log_file_name: String,
        content: String,
    ) -> UpdateResult<UpdateRecord> {
        let pid = extract_pid(&content).ok_or_else(|| UpdateError::CorruptLog {
            timestamp: timestamp.to_string(),
        })?;

        Ok(UpdateRecord {
            timestamp: timestamp.to_string(),
            log_file_name,
            pid,
            status: UpdateStatus::from_liveness(self.liveness.is_alive(pid)),
            content,
        })
    }

    fn path_of(&self, log_file_name: &str) -> PathBuf {
        self.scanner.log_dir().join(log_file_name)
    }
}
