use std::io::{self, Write};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{SystemTime, UNIX_EPOCH};

/// Longest command text stored per entry. Longer text is cut at a char
/// boundary, never copied into a fixed-size buffer.
pub const COMMAND_MAX: usize = 1024;

/// The log is shared with the signal thread, which reads it once while
/// terminating. The single control thread is the only appender.
pub type SharedHistory = Arc<Mutex<HistoryLog>>;

pub fn shared(capacity: usize) -> SharedHistory {
    Arc::new(Mutex::new(HistoryLog::new(capacity)))
}

/// Locks the log, recovering the data if a panicked thread poisoned it.
pub fn with_log<T>(history: &SharedHistory, f: impl FnOnce(&mut HistoryLog) -> T) -> T {
    let mut guard = history.lock().unwrap_or_else(PoisonError::into_inner);
    f(&mut guard)
}

/// One launched command. Immutable once appended: fields are private and
/// only readable through accessors.
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    command_text: String,
    pid: i32,
    start_time: SystemTime,
    background: bool,
}

impl HistoryEntry {
    pub fn new(command_text: &str, pid: i32, background: bool) -> Self {
        HistoryEntry {
            command_text: bounded_copy(command_text),
            pid,
            start_time: SystemTime::now(),
            background,
        }
    }

    pub fn command_text(&self) -> &str {
        &self.command_text
    }

    pub fn pid(&self) -> i32 {
        self.pid
    }

    pub fn start_time(&self) -> SystemTime {
        self.start_time
    }

    pub fn is_background(&self) -> bool {
        self.background
    }
}

fn bounded_copy(text: &str) -> String {
    if text.len() <= COMMAND_MAX {
        return text.to_string();
    }
    let mut end = COMMAND_MAX;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    text[..end].to_string()
}

/// Append-only, fixed-capacity record of launched commands for one session.
pub struct HistoryLog {
    entries: Vec<HistoryEntry>,
    capacity: usize,
}

impl HistoryLog {
    pub fn new(capacity: usize) -> Self {
        HistoryLog {
            entries: Vec::new(),
            capacity,
        }
    }

    /// Appends a record. Once the log is at capacity the record is dropped
    /// with a diagnostic and `false` is returned; nothing is evicted.
    pub fn append(&mut self, entry: HistoryEntry) -> bool {
        if self.entries.len() >= self.capacity {
            eprintln!(
                "simple-shell: history is full, not recording '{}'",
                entry.command_text()
            );
            return false;
        }
        self.entries.push(entry);
        true
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// Renders the listing with 1-based indices in append order.
    pub fn write_listing<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "\nCommand History:")?;
        for (i, entry) in self.entries.iter().enumerate() {
            writeln!(out, "[{}] pid {} - {}", i + 1, entry.pid, entry.command_text)?;
            let started = entry
                .start_time
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or(0);
            writeln!(out, "    started: {}s (unix)", started)?;
            if entry.background {
                writeln!(out, "    background process")?;
            } else {
                let ran = entry.start_time.elapsed().map(|d| d.as_secs()).unwrap_or(0);
                writeln!(out, "    ran for: {}s", ran)?;
            }
        }
        Ok(())
    }

    /// Prints the listing to stdout (the `history` builtin and the
    /// shutdown dump use the same rendering).
    pub fn display(&self) {
        let stdout = io::stdout();
        let _ = self.write_listing(&mut stdout.lock());
    }
}
