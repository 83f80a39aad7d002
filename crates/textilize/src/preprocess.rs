//! Regex cleanup applied to raw HTML before parsing.

use once_cell::sync::Lazy;
use regex::Regex;

static TITLE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<title.*title>").unwrap());
static STYLE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<style.*style>").unwrap());
static INDENT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n +").unwrap());
static TAG_TAIL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r">\s*\n").unwrap());

/// Clean up raw HTML for conversion: drop title and style blocks, strip the
/// report-table wrapper attributes, de-indent, and pull whitespace trailing a
/// tag onto one line. The last step matters because the converter treats a
/// trailing newline in a text node specially, and stray newlines between tags
/// would otherwise show up as blank lines.
pub fn preprocess(raw: &str) -> String {
    let cleaned = TITLE_RE.replace_all(raw, "");
    let cleaned = STYLE_RE.replace_all(&cleaned, "");
    let cleaned = cleaned.replace(r#"class="rla-report-table" cellspacing="0""#, "");
    let cleaned = cleaned.replace(r#"class="alt""#, "");
    let cleaned = INDENT_RE.replace_all(&cleaned, "\n");
    TAG_TAIL_RE.replace_all(&cleaned, "> ").into_owned()
}
