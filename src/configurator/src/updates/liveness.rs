use sysinfo::{Pid, ProcessRefreshKind, ProcessStatus, ProcessesToUpdate, System};

/// Answers whether an OS process currently exists.
#[cfg_attr(test, mockall::automock)]
pub trait ProcessLiveness: Send + Sync {
    /// Never fails: anything that can't be confirmed as running is reported dead.
    fn is_alive(&self, pid: u32) -> bool;
}

/// Looks the pid up in the process table through `sysinfo`.
///
/// Only existence is checked, so no permission to signal the process is needed.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemLiveness;

impl ProcessLiveness for SystemLiveness {
    fn is_alive(&self, pid: u32) -> bool {
        if pid == 0 {
            return false;
        }

        let pid = Pid::from_u32(pid);
        let mut system = System::new();
        system.refresh_processes_specifics(
            ProcessesToUpdate::Some(&[pid]),
            true,
            ProcessRefreshKind::nothing(),
        );

        // an exited updater that nobody reaped yet still has a table entry
        system.process(pid).is_some_and(|process| {
            !matches!(
                process.status(),
                ProcessStatus::Zombie | ProcessStatus::Dead
            )
        })
    }
}
