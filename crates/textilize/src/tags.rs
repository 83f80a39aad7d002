//! Tag translation tables for the Textile output format.

/// Elements that introduce a full structural break (double-newline spacing).
pub const BLOCK_TAGS: &[&str] = &["h1", "h2", "p", "div", "table"];

/// Elements that introduce a single-line break (single-newline spacing).
/// These are a special case of block elements.
pub const ROW_TAGS: &[&str] = &["tr", "li"];

/// Elements rendered inline. Note that th/td are sort of inline in Textile
/// despite truly being block elements.
pub const INLINE_TAGS: &[&str] = &["b", "strong", "span", "a", "th", "td"];

/// Token emitted when a tag opens. Unknown tags contribute nothing.
pub fn opening_token(tag: &str) -> &'static str {
    match tag {
        // Text formatting
        "b" => "**",
        "strong" => "*",

        // Headings
        "table" => "h2. ",
        "h1" => "\n h1. ",
        "h2" => "h2. ",

        // Tables
        "th" => "|_.",
        "td" => "|",

        // Special
        "a" => "\"",

        // Structures
        "p" => "p. ",
        "br" => "\n",

        _ => "",
    }
}

/// Token emitted when a tag closes. Unknown tags contribute nothing.
pub fn closing_token(tag: &str) -> &'static str {
    match tag {
        // Text formatting
        "b" => "**",
        "strong" => "*",

        // Tables
        "tr" => "|",
        "td" => " ",
        "th" => " ",

        // Special
        "a" => "\":",

        _ => "",
    }
}

/// Inter-element spacing for a tag.
pub fn spacing(tag: &str) -> &'static str {
    if is_block(tag) {
        "\n\n"
    } else if is_row(tag) {
        "\n"
    } else {
        ""
    }
}

/// Check if a tag is a block-level element
pub fn is_block(tag: &str) -> bool {
    BLOCK_TAGS.contains(&tag)
}

/// Check if a tag is a row-level element
pub fn is_row(tag: &str) -> bool {
    ROW_TAGS.contains(&tag)
}

/// Check if a tag is an inline element
pub fn is_inline(tag: &str) -> bool {
    INLINE_TAGS.contains(&tag)
}
