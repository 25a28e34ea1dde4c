use crate::updates::error::{UpdateError, UpdateResult};
use regex::Regex;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use tracing::debug;

static LOG_FILE_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"__(\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2})\.log$").expect("valid log name pattern")
});

/// Returns the timestamp embedded in an update log file name.
pub fn parse_log_file_name(name: &str) -> Option<&str> {
    LOG_FILE_NAME
        .captures(name)
        .and_then(|captures| captures.get(1))
        .map(|timestamp| timestamp.as_str())
}

/// Enumerates `<prefix>__<timestamp>.log` files in the update log directory.
#[derive(Debug, Clone)]
pub struct LogDirectoryScanner {
    log_dir: PathBuf,
}

impl LogDirectoryScanner {
    pub fn new(log_dir: impl Into<PathBuf>) -> Self {
        Self {
            log_dir: log_dir.into(),
        }
    }

    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }

    /// Groups the update logs in the directory by timestamp.
    ///
    /// Entries that don't look like update logs are skipped. A timestamp normally
    /// maps to one file; more than one is reported to whoever resolves it, not here.
    pub fn list(&self) -> UpdateResult<BTreeMap<String, Vec<String>>> {
        let entries =
            fs::read_dir(&self.log_dir).map_err(UpdateError::io("cannot read list of updates"))?;

        let mut result: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for entry in entries {
            let entry = entry.map_err(UpdateError::io("cannot read list of updates"))?;
            let Ok(name) = entry.file_name().into_string() else {
                continue;
            };
            let Some(timestamp) = parse_log_file_name(&name).map(str::to_string) else {
                continue;
            };
            result.entry(timestamp).or_default().push(name);
        }

        for (timestamp, names) in result.iter_mut().filter(|(_, names)| names.len() > 1) {
            names.sort();
            debug!("update logs {:?} share timestamp {}", names, timestamp);
        }

        Ok(result)
    }
}
