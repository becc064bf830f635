/// Splits a command into whitespace-delimited tokens for an argument vector.
///
/// Runs of whitespace are coalesced, so consecutive spaces never produce
/// empty argument slots.
pub fn split_args(line: &str) -> Vec<String> {
    line.split_whitespace().map(|s| s.to_string()).collect()
}

/// Splits a line on `delim` into trimmed segments.
///
/// Empty segments are kept; callers decide whether an empty segment is an
/// error (pipeline stages) or is skipped (background segments).
pub fn split_on(line: &str, delim: char) -> Vec<String> {
    line.split(delim).map(|s| s.trim().to_string()).collect()
}
