use crate::tokenizer;

/// One raw input line, trimmed, with the derived views the job splitter
/// routes on. Owns its text; not kept beyond the dispatch of the line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    text: String,
}

impl CommandLine {
    pub fn new(line: &str) -> Self {
        CommandLine {
            text: line.trim().to_string(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn has_pipe(&self) -> bool {
        self.text.contains('|')
    }

    pub fn has_background(&self) -> bool {
        self.text.contains('&')
    }

    /// Pipe-delimited stage texts, each trimmed. Empty stages are kept so
    /// the pipeline executor can reject them.
    pub fn pipeline_stages(&self) -> Vec<String> {
        tokenizer::split_on(&self.text, '|')
    }

    /// `&`-delimited segments, trimmed, empties dropped. A trailing `&`
    /// therefore yields no extra segment: `sleep 5 &` is a single segment
    /// and runs in the foreground.
    pub fn background_segments(&self) -> Vec<String> {
        tokenizer::split_on(&self.text, '&')
            .into_iter()
            .filter(|s| !s.is_empty())
            .collect()
    }
}
