use std::ffi::CString;

use nix::sys::wait::waitpid;
use nix::unistd::{self, ForkResult, Pid};

use crate::error::ShellError;
use crate::history::{self, HistoryEntry, SharedHistory};
use crate::tokenizer;

/// Spawns one child for `command_text`. A foreground launch blocks until
/// the child exits; a background launch detaches the child into a new
/// session and returns immediately. Every successful spawn appends a
/// history record.
pub fn launch_single(
    history: &SharedHistory,
    command_text: &str,
    background: bool,
) -> Result<Pid, ShellError> {
    let argv = build_argv(command_text)?;

    match unsafe { unistd::fork() }.map_err(ShellError::Fork)? {
        ForkResult::Child => {
            if background && unistd::setsid().is_err() {
                eprintln!("simple-shell: failed to detach into a new session");
                unsafe { libc::_exit(1) }
            }
            let _ = unistd::execvp(&argv[0], &argv);
            // Exec failed; die here so control never returns to parent logic.
            eprintln!(
                "simple-shell: {}: command not found or not executable",
                argv[0].to_string_lossy()
            );
            unsafe { libc::_exit(127) }
        }
        ForkResult::Parent { child } => {
            history::with_log(history, |log| {
                log.append(HistoryEntry::new(command_text, child.as_raw(), background));
            });
            if !background {
                waitpid(child, None).map_err(ShellError::Wait)?;
            }
            Ok(child)
        }
    }
}

/// Owned argv built before forking: each process image operates on its own
/// copy, and the child allocates nothing between fork and exec.
fn build_argv(command_text: &str) -> Result<Vec<CString>, ShellError> {
    let args = tokenizer::split_args(command_text);
    if args.is_empty() {
        return Err(ShellError::EmptyCommand);
    }
    args.into_iter()
        .map(|arg| match CString::new(arg.as_str()) {
            Ok(c) => Ok(c),
            Err(_) => Err(ShellError::InvalidArgument(arg)),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::shared;

    #[test]
    fn test_foreground_launch_records_entry() {
        let history = shared(10);
        let pid = launch_single(&history, "true", false).unwrap();
        assert!(pid.as_raw() > 0);
        history::with_log(&history, |log| {
            assert_eq!(log.len(), 1);
            let entry = &log.entries()[0];
            assert_eq!(entry.command_text(), "true");
            assert_eq!(entry.pid(), pid.as_raw());
            assert!(!entry.is_background());
        });
    }

    #[test]
    fn test_background_launch_does_not_wait() {
        let history = shared(10);
        launch_single(&history, "sleep 5", true).unwrap();
        // Returned immediately; the record is flagged background.
        history::with_log(&history, |log| {
            assert_eq!(log.len(), 1);
            assert!(log.entries()[0].is_background());
        });
    }

    #[test]
    fn test_exec_failure_leaves_parent_intact() {
        let history = shared(10);
        // The child exits 127 on its own; the parent still records the spawn.
        let result = launch_single(&history, "definitely-not-a-command-zz", false);
        assert!(result.is_ok());
        assert_eq!(history::with_log(&history, |log| log.len()), 1);
    }

    #[test]
    fn test_empty_command_is_rejected() {
        let history = shared(10);
        assert!(matches!(
            launch_single(&history, "   ", false),
            Err(ShellError::EmptyCommand)
        ));
        assert!(history::with_log(&history, |log| log.is_empty()));
    }

    #[test]
    fn test_interior_nul_is_rejected() {
        let history = shared(10);
        assert!(matches!(
            launch_single(&history, "echo a\0b", false),
            Err(ShellError::InvalidArgument(_))
        ));
    }
}
