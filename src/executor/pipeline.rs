use std::ffi::CString;
use std::os::fd::{AsRawFd, OwnedFd, RawFd};

use nix::sys::wait::waitpid;
use nix::unistd::{self, ForkResult};

use crate::error::ShellError;
use crate::history::{self, HistoryEntry, SharedHistory};

/// Runs `stages` as a pipe chain, one child per stage, each stage executed
/// via `/bin/sh -c` so stage text may itself use shell constructs. The
/// parent waits for every child; each stage is recorded with the pid of
/// the child that actually performs the work, the first stage foreground
/// and every later stage background.
pub fn launch_pipeline(history: &SharedHistory, stages: &[String]) -> Result<(), ShellError> {
    if stages.len() < 2 {
        return Err(ShellError::PipelineTooShort);
    }
    if stages.iter().any(|s| s.trim().is_empty()) {
        return Err(ShellError::EmptyPipelineStage);
    }

    let mut children = Vec::with_capacity(stages.len());
    let mut prev_read: Option<OwnedFd> = None;

    for (i, stage) in stages.iter().enumerate() {
        let argv = stage_argv(stage)?;
        let is_last = i == stages.len() - 1;
        let channel = if is_last {
            None
        } else {
            Some(unistd::pipe().map_err(ShellError::Pipe)?)
        };

        match unsafe { unistd::fork() }.map_err(ShellError::Fork)? {
            ForkResult::Child => {
                if let Some(read) = prev_read.take() {
                    wire_fd(read, libc::STDIN_FILENO);
                }
                if let Some((read, write)) = channel {
                    drop(read);
                    wire_fd(write, libc::STDOUT_FILENO);
                }
                let _ = unistd::execv(&argv[0], &argv);
                eprintln!("simple-shell: failed to start /bin/sh for pipeline stage");
                unsafe { libc::_exit(127) }
            }
            ForkResult::Parent { child } => {
                // Release our copies of the ends this child inherited; a
                // downstream stage waiting for EOF would otherwise block
                // on the parent's write end forever.
                prev_read = channel.map(|(read, write)| {
                    drop(write);
                    read
                });
                history::with_log(history, |log| {
                    log.append(HistoryEntry::new(stage, child.as_raw(), i > 0));
                });
                children.push(child);
            }
        }
    }

    for child in children {
        waitpid(child, None).map_err(ShellError::Wait)?;
    }
    Ok(())
}

/// Duplicates `fd` onto `target` (stdin or stdout) and closes the
/// original. Child-side only; on failure the stage dies without returning
/// into parent logic.
fn wire_fd(fd: OwnedFd, target: RawFd) {
    if unistd::dup2(fd.as_raw_fd(), target).is_err() {
        eprintln!("simple-shell: failed to wire pipeline stage");
        unsafe { libc::_exit(1) }
    }
}

fn stage_argv(stage: &str) -> Result<Vec<CString>, ShellError> {
    Ok(vec![
        c"/bin/sh".to_owned(),
        c"-c".to_owned(),
        CString::new(stage).map_err(|_| ShellError::InvalidArgument(stage.to_string()))?,
    ])
}
