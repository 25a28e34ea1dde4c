use std::io;
use thiserror::Error;

pub type UpdateResult<T> = Result<T, UpdateError>;

/// Failures of the update orchestrator.
///
/// Display strings are shown to HTTP callers, so they never include paths.
#[derive(Debug, Error)]
pub enum UpdateError {
    #[error("{context}: {}", describe_io(.source))]
    Io {
        context: &'static str,
        #[source]
        source: io::Error,
    },

    #[error("update {timestamp} not found")]
    NotFound { timestamp: String },

    #[error("cannot find PID in update log {timestamp}")]
    CorruptLog { timestamp: String },

    #[error("more than one update log carries timestamp {timestamp}")]
    DuplicateTimestamp { timestamp: String },

    #[error("{0}")]
    Launch(String),
}

impl UpdateError {
    pub(crate) fn io(context: &'static str) -> impl FnOnce(io::Error) -> Self {
        move |source| Self::Io { context, source }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

// io::Error's Display may echo the path the OS complained about
fn describe_io(err: &io::Error) -> String {
    match err.kind() {
        io::ErrorKind::NotFound => "no such file or directory".to_string(),
        io::ErrorKind::PermissionDenied => "permission denied".to_string(),
        kind => kind.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_error_display_hides_the_os_message() {
        let err = UpdateError::io("cannot read list of updates")(io::Error::new(
            io::ErrorKind::PermissionDenied,
            "/srv/update/log: permission denied",
        ));

        let shown = err.to_string();
        assert_eq!(shown, "cannot read list of updates: permission denied");
        assert!(!shown.contains("/srv"));
    }

    #[test]
    fn only_not_found_reports_not_found() {
        assert!(UpdateError::NotFound {
            timestamp: "2023-05-01T10:00:00".into()
        }
        .is_not_found());
        assert!(!UpdateError::Launch("update log not found".into()).is_not_found());
    }
}
