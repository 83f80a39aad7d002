//! Post-processing for request-log-analyzer report pages.
//!
//! Applied to converter output, not raw HTML. Every rewrite is total: lines
//! that do not look like report rows pass through unchanged.

use once_cell::sync::Lazy;
use regex::Regex;

static LONELY_PIPE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n\n\s\|\n").unwrap());
static ROUTING_ERRORS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^h2\. Routing Errors$").unwrap());
static PARSE_WARNINGS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^h2\. Parse warnings$").unwrap());
static THANKS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^h2\. Thanks for using request-log-analyzer$").unwrap());
static HEADER_CELL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n\s\|_\.").unwrap());
static MILLISECONDS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+ms$").unwrap());
static SECONDS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+\.\d+s$").unwrap());

// Pipe-split cells carrying the Mean and StdDev report columns.
const COLORIZED_CELLS: [usize; 2] = [4, 5];

/// Tuning for report post-processing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportOptions {
    /// Durations above this many milliseconds are highlighted in red.
    pub threshold_ms: u64,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self { threshold_ms: 400 }
    }
}

impl ReportOptions {
    /// Read the threshold from the `THRESHOLD` environment variable, falling
    /// back to the default when unset or unparsable. Kept at the edge so the
    /// rewrite itself takes its configuration explicitly.
    pub fn from_env() -> Self {
        let threshold_ms = std::env::var("THRESHOLD")
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or_else(|| Self::default().threshold_ms);
        Self { threshold_ms }
    }
}

/// Rewrite converter output for a performance-report wiki page: drop empty
/// table-cell artifacts, reflow the fixed report headings, restyle header
/// rows, and colorize Mean/StdDev durations above the threshold.
pub fn tweak_report(textile: &str, options: &ReportOptions) -> String {
    let content = LONELY_PIPE_RE.replace_all(textile, "\n");
    let content = ROUTING_ERRORS_RE.replace_all(&content, "h2. Routing Errors \n");
    let content = PARSE_WARNINGS_RE.replace_all(&content, "\n h2. Parse warnings \n");
    let content = THANKS_RE.replace_all(
        &content,
        "--- \n\n h2. Thanks for using request-log-analyzer",
    );
    let content = HEADER_CELL_RE.replace_all(&content, "\n{background: #CAE8EA}. |_.");

    let mut colorized = String::with_capacity(content.len());
    for line in content.split_inclusive('\n') {
        colorized.push_str(&colorize_line(line, options.threshold_ms));
    }
    colorized
}

/// Colorize the Mean and StdDev cells of one pipe-delimited line. Lines with
/// too few cells are returned unchanged.
fn colorize_line(line: &str, threshold_ms: u64) -> String {
    if !line.contains('|') {
        return line.to_string();
    }

    let mut cells: Vec<String> = line.split('|').map(str::to_string).collect();
    for index in COLORIZED_CELLS {
        if let Some(wrapped) = cells
            .get(index)
            .and_then(|cell| colorize_cell(cell, threshold_ms))
        {
            cells[index] = wrapped;
        }
    }
    cells.join("|")
}

/// Wrap a duration cell in a red-color directive when it exceeds the
/// threshold. Cells matching neither duration pattern are left alone, so a
/// value that is already colorized never gets wrapped a second time.
fn colorize_cell(cell: &str, threshold_ms: u64) -> Option<String> {
    let value = cell.trim();
    let over = if MILLISECONDS_RE.is_match(value) {
        let milliseconds: u64 = value.trim_end_matches("ms").parse().ok()?;
        milliseconds > threshold_ms
    } else if SECONDS_RE.is_match(value) {
        let seconds: f64 = value.trim_end_matches('s').parse().ok()?;
        seconds * 1000.0 > threshold_ms as f64
    } else {
        false
    };

    over.then(|| format!("%{{color:red}} {value}%"))
}
