use serde::Serialize;
use std::fmt::{Display, Formatter};

/// Derived state of an update run, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum UpdateStatus {
    InProgress,
    Finished,
}

impl UpdateStatus {
    pub fn from_liveness(alive: bool) -> Self {
        if alive {
            Self::InProgress
        } else {
            Self::Finished
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InProgress => "in-progress",
            Self::Finished => "finished",
        }
    }
}

impl Display for UpdateStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One execution of the external updater, as observed through its log file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateRecord {
    pub timestamp: String,
    pub log_file_name: String,
    pub pid: u32,
    pub status: UpdateStatus,
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_names_match_the_api() {
        assert_eq!(UpdateStatus::from_liveness(true).as_str(), "in-progress");
        assert_eq!(UpdateStatus::from_liveness(false).to_string(), "finished");
        assert_eq!(
            serde_json::to_string(&UpdateStatus::InProgress).unwrap(),
            "\"in-progress\""
        );
    }
}
