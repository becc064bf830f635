use std::process;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

use signal_hook::consts::SIGINT;
use signal_hook::iterator::Signals;

use crate::error::ShellError;
use crate::history::{self, SharedHistory};

/// One-shot interrupt controller. Once installed it is *armed*; the first
/// SIGINT moves it to *terminated*: the full history is dumped and the
/// process exits. The transition never reverses, and an interrupt observed
/// while already terminating is ignored.
pub struct SignalController {
    terminated: Arc<AtomicBool>,
}

impl SignalController {
    /// Registers SIGINT and moves delivery onto a dedicated thread, so the
    /// history dump runs on an ordinary thread rather than inside a signal
    /// context. Registration or thread-spawn failure is fatal at startup.
    pub fn install(history: SharedHistory) -> Result<SignalController, ShellError> {
        let mut signals = Signals::new([SIGINT]).map_err(ShellError::Signal)?;
        let terminated = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&terminated);

        thread::Builder::new()
            .name("sigint-handler".to_string())
            .spawn(move || {
                for _sig in signals.forever() {
                    if !begin_termination(&flag) {
                        continue;
                    }
                    println!("\nInterrupted, exiting the shell.");
                    history::with_log(&history, |log| log.display());
                    process::exit(0);
                }
            })
            .map_err(ShellError::Signal)?;

        Ok(SignalController { terminated })
    }

    pub fn is_terminated(&self) -> bool {
        self.terminated.load(Ordering::SeqCst)
    }
}

/// Armed -> terminated, exactly once. Returns true only for the caller
/// that won the transition.
fn begin_termination(flag: &AtomicBool) -> bool {
    !flag.swap(true, Ordering::SeqCst)
}
