pub mod launcher;
pub mod pipeline;

use crate::command::CommandLine;
use crate::error::ShellError;
use crate::history::{self, SharedHistory};

/// Routes one input line: pipelines to the pipeline executor, the two
/// builtins, `&`-separated segments to the launcher (first foreground,
/// the rest background), otherwise a single foreground command.
///
/// `Ok(true)` keeps the read loop going, `Ok(false)` stops it.
pub fn launch(history: &SharedHistory, line: &str) -> Result<bool, ShellError> {
    let cmd = CommandLine::new(line);
    if cmd.is_empty() {
        return Ok(true);
    }

    if cmd.has_pipe() {
        pipeline::launch_pipeline(history, &cmd.pipeline_stages())?;
        return Ok(true);
    }

    match cmd.text() {
        "history" => {
            history::with_log(history, |log| log.display());
            Ok(true)
        }
        "exit" => {
            history::with_log(history, |log| log.display());
            println!("\nShell session ended.");
            Ok(false)
        }
        _ if cmd.has_background() => {
            let mut background = false;
            for segment in cmd.background_segments() {
                match launcher::launch_single(history, &segment, background) {
                    Ok(_) => {}
                    Err(e) if e.is_fatal() => return Err(e),
                    // A failed segment is reported; the rest still launch.
                    Err(e) => eprintln!("simple-shell: failed to launch '{}': {}", segment, e),
                }
                background = true;
            }
            Ok(true)
        }
        _ => {
            launcher::launch_single(history, cmd.text(), false)?;
            Ok(true)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::history::shared;

    #[test]
    fn test_exit_stops_the_loop() {
        let history = shared(10);
        assert!(!launch(&history, "exit").unwrap());
    }

    #[test]
    fn test_history_builtin_continues() {
        let history = shared(10);
        assert!(launch(&history, "history").unwrap());
        // Builtins are not launches; nothing is recorded.
        assert!(history::with_log(&history, |log| log.is_empty()));
    }

    #[test]
    fn test_plain_command_is_foreground() {
        let history = shared(10);
        assert!(launch(&history, "true").unwrap());
        history::with_log(&history, |log| {
            assert_eq!(log.len(), 1);
            assert!(!log.entries()[0].is_background());
        });
    }

    #[test]
    fn test_background_segments_first_is_foreground() {
        let history = shared(10);
        assert!(launch(&history, "true & true & true").unwrap());
        history::with_log(&history, |log| {
            let flags: Vec<bool> = log.entries().iter().map(|e| e.is_background()).collect();
            assert_eq!(flags, vec![false, true, true]);
        });
    }

    #[test]
    fn test_failed_segment_does_not_stop_the_rest() {
        let history = shared(10);
        // The NUL segment never spawns; the other two still do.
        assert!(launch(&history, "true & echo a\0b & true").unwrap());
        history::with_log(&history, |log| {
            assert_eq!(log.len(), 2);
        });
    }

    #[test]
    fn test_pipe_routes_to_pipeline() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out");
        let history = shared(10);
        let line = format!("echo hi | cat > {}", out.display());
        assert!(launch(&history, &line).unwrap());
        assert_eq!(fs::read_to_string(&out).unwrap(), "hi\n");
        assert_eq!(history::with_log(&history, |log| log.len()), 2);
    }

    #[test]
    fn test_dangling_pipe_is_an_error() {
        let history = shared(10);
        let result = launch(&history, "echo hi |");
        assert!(matches!(result, Err(ShellError::EmptyPipelineStage)));
    }

    #[test]
    fn test_blank_line_is_a_no_op() {
        let history = shared(10);
        assert!(launch(&history, "   ").unwrap());
        assert!(history::with_log(&history, |log| log.is_empty()));
    }
}
