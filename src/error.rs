use std::fmt;
use std::io;

use nix::errno::Errno;

#[derive(Debug)]
pub enum ShellError {
    /// Channel creation failed in the pipeline executor.
    Pipe(Errno),
    Fork(Errno),
    Wait(Errno),
    /// Interrupt handler registration or delivery-thread spawn failed.
    Signal(io::Error),
    /// Prompt read failure.
    Io(io::Error),
    EmptyCommand,
    InvalidArgument(String),
    PipelineTooShort,
    EmptyPipelineStage,
}

impl ShellError {
    /// Fatal errors terminate the interpreter; the rest are reported and
    /// the read loop continues.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            ShellError::Pipe(_)
                | ShellError::Fork(_)
                | ShellError::Wait(_)
                | ShellError::Signal(_)
                | ShellError::Io(_)
        )
    }
}

impl fmt::Display for ShellError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShellError::Pipe(e) => write!(f, "pipe error: {}", e),
            ShellError::Fork(e) => write!(f, "fork error: {}", e),
            ShellError::Wait(e) => write!(f, "wait error: {}", e),
            ShellError::Signal(e) => write!(f, "signal setup error: {}", e),
            ShellError::Io(e) => write!(f, "input error: {}", e),
            ShellError::EmptyCommand => write!(f, "empty command"),
            ShellError::InvalidArgument(arg) => write!(f, "invalid argument: {}", arg),
            ShellError::PipelineTooShort => {
                write!(f, "pipeline must have at least two stages")
            }
            ShellError::EmptyPipelineStage => write!(f, "empty pipeline stage"),
        }
    }
}

impl std::error::Error for ShellError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ShellError::Pipe(e) | ShellError::Fork(e) | ShellError::Wait(e) => Some(e),
            ShellError::Signal(e) | ShellError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for ShellError {
    fn from(e: io::Error) -> Self {
        ShellError::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fatal_classification() {
        assert!(ShellError::Fork(Errno::EAGAIN).is_fatal());
        assert!(ShellError::Pipe(Errno::EMFILE).is_fatal());
        assert!(ShellError::Wait(Errno::ECHILD).is_fatal());
        assert!(!ShellError::EmptyCommand.is_fatal());
        assert!(!ShellError::PipelineTooShort.is_fatal());
        assert!(!ShellError::InvalidArgument("a\0b".to_string()).is_fatal());
    }

    #[test]
    fn test_display_carries_errno_text() {
        let msg = ShellError::Fork(Errno::EAGAIN).to_string();
        assert!(msg.starts_with("fork error: "));
    }
}
