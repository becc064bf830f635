use crate::config::Config;
use crate::error::ShellError;
use crate::executor;
use crate::history::SharedHistory;
use crate::prompt::ShellPrompt;

/// The read loop: prompt, read one line, hand it to the job splitter.
/// Non-fatal errors are reported and the loop continues; fatal errors
/// propagate to the caller. EOF ends the session cleanly.
pub fn run(config: &Config, history: &SharedHistory) -> Result<(), ShellError> {
    let prompt = ShellPrompt::new(&config.prompt);

    loop {
        let line = match prompt.read_line()? {
            Some(line) => line,
            None => break,
        };

        if line.trim().is_empty() {
            continue;
        }
        if line.len() > config.line_max {
            eprintln!(
                "simple-shell: input line exceeds {} bytes, ignored",
                config.line_max
            );
            continue;
        }

        match executor::launch(history, &line) {
            Ok(true) => {}
            Ok(false) => break,
            Err(e) if e.is_fatal() => return Err(e),
            Err(e) => eprintln!("simple-shell: {}", e),
        }
    }

    Ok(())
}
