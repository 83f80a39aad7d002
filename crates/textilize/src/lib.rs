//! # textilize
//!
//! Convert HTML to Textile wiki markup.
//!
//! The pipeline has three stages, each a total function from string to
//! string:
//!
//! ```text
//! raw HTML ──preprocess──▶ cleaned HTML ──convert──▶ Textile ──tweak_report──▶ report Textile
//! ```
//!
//! [`preprocess`] strips title/style blocks and normalizes whitespace around
//! tags; [`convert`] runs a stack-based streaming converter over open/text/
//! close events; [`tweak_report`] is applied selectively by callers posting
//! request-log-analyzer performance reports, and colorizes Mean/StdDev
//! durations above a configurable millisecond threshold.
//!
//! Malformed HTML degrades gracefully to best-effort output. No stage raises
//! an error, and each call builds fresh state, so conversions are safe to run
//! concurrently.
//!
//! ## Example
//!
//! ```rust
//! let markup = textilize::html_to_textile("<h2>Totals</h2><p>All good</p>");
//! assert_eq!(markup, "h2. Totals\n\np. All good");
//! ```

mod convert;
mod escape;
mod preprocess;
mod report;
mod styles;
mod tags;

pub use convert::{convert, Converter};
pub use escape::escape_xml_text;
pub use preprocess::preprocess;
pub use report::{tweak_report, ReportOptions};
pub use styles::{style_suffix, Attributes};
pub use tags::{
    closing_token, is_block, is_inline, is_row, opening_token, spacing, BLOCK_TAGS, INLINE_TAGS,
    ROW_TAGS,
};

/// Run the full HTML to Textile pipeline.
pub fn html_to_textile(html: &str) -> String {
    convert(&preprocess(html))
}

/// Convert a performance-report HTML page and apply the report-specific
/// post-processing.
pub fn report_to_textile(html: &str, options: &ReportOptions) -> String {
    tweak_report(&html_to_textile(html), options)
}
