//! Streaming HTML to Textile conversion.
//!
//! The converter is an explicit state machine: an output buffer plus a stack
//! of open elements, driven by open-tag / text / close-tag events in document
//! order. Parsing is delegated to scraper, which synthesizes a root element
//! and tolerates malformed input, so conversion is total over arbitrary
//! strings and never fails.

use scraper::{ElementRef, Html, Node as ScraperNode};

use crate::styles::{style_suffix, Attributes};
use crate::tags;

/// Convert an HTML string to Textile markup.
///
/// # Example
///
/// ```rust
/// assert_eq!(textilize::convert("<strong>x</strong>"), "*x*");
/// ```
pub fn convert(html: &str) -> String {
    let document = Html::parse_fragment(html);
    let mut converter = Converter::new();
    walk(document.root_element(), &mut converter);
    converter.finish()
}

/// Fire the converter callbacks for an element and its subtree.
fn walk(element: ElementRef, converter: &mut Converter) {
    let attributes: Attributes = element
        .value()
        .attrs()
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .collect();
    converter.start_element(element.value().name(), attributes);

    for child in element.children() {
        match child.value() {
            ScraperNode::Text(text) => converter.characters(&text.text),
            ScraperNode::Element(_) => {
                if let Some(child_element) = ElementRef::wrap(child) {
                    walk(child_element, converter);
                }
            }
            _ => {}
        }
    }

    converter.end_element(element.value().name());
}

/// Event-driven converter state. Any parser emitting open/text/close events
/// in document order can drive it directly.
#[derive(Debug, Default)]
pub struct Converter {
    output: String,
    stack: Vec<(String, Attributes)>,
}

impl Converter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opening tag callback.
    pub fn start_element(&mut self, tag_name: &str, attributes: Attributes) {
        let tag = tag_name.to_lowercase();
        let opening = tags::opening_token(&tag);
        let styling = style_suffix(&attributes);
        let spaces = tags::spacing(&tag);

        // Styling info gets positioned depending on element type
        let content = if tags::is_block(&tag) {
            block_content(opening, &styling)
        } else if tags::is_row(&tag) {
            if styling.is_empty() {
                format!("{opening} ")
            } else if tag == "td" {
                format!("{opening}{styling}. ")
            } else {
                format!("{opening}{styling} ")
            }
        } else {
            format!("{opening}{styling}")
        };

        self.stack.push((tag, attributes));
        self.append_white(spaces);
        self.output.push_str(&content);
    }

    /// Closing tag callback. The popped stack entry wins when the stream is
    /// unbalanced; a close with nothing open is ignored.
    pub fn end_element(&mut self, _tag_name: &str) {
        let Some((tag, attributes)) = self.stack.pop() else {
            return;
        };
        let spaces = tags::spacing(&tag);
        let closing = tags::closing_token(&tag);

        if tag == "a" {
            if let Some(title) = attributes.get("title").filter(|t| !t.trim().is_empty()) {
                self.output.push_str(&format!("({title})"));
            }
            self.output.push_str(closing);
            if let Some(href) = attributes.get("href") {
                self.output.push_str(href);
            }
        } else {
            self.output.push_str(closing);
        }
        self.append_white(spaces);
    }

    /// Text node callback. Newlines inside text are not line breaks, and
    /// whitespace hugging a structural break is consumed so indentation never
    /// leaks into the output.
    pub fn characters(&mut self, text: &str) {
        let decoded = html_escape::decode_html_entities(text);
        let mut content = decoded.replace('\n', " ");
        if decoded.ends_with('\n') {
            content.truncate(content.trim_end().len());
        }
        if self.output.ends_with('\n') {
            self.output.push_str(content.trim_start());
        } else {
            self.output.push_str(&content);
        }
    }

    /// Return the converted markup, trimmed of surrounding whitespace.
    pub fn finish(self) -> String {
        self.output.trim().to_string()
    }

    /// Append spacing newlines, but only where the buffer tail does not
    /// already provide them. Compared character-by-character from the end so
    /// runs of three or more newlines never appear at event boundaries.
    fn append_white(&mut self, spacing: &str) {
        let len = spacing.chars().count();
        for (index, space) in spacing.chars().enumerate() {
            let last = self.output.chars().rev().nth(len - index - 1);
            match last {
                Some(c) if c == space || c == '\n' => {}
                _ => self.output.push(space),
            }
        }
    }
}

/// Block tokens carry the styling suffix before their trailing period, e.g.
/// `h2. ` becomes `h2{color: red}. `. Tokens without a period get the suffix
/// appended directly.
fn block_content(opening: &str, styling: &str) -> String {
    if styling.is_empty() {
        return opening.to_string();
    }
    match opening.find('.') {
        Some(index) => format!("{}{}{}", &opening[..index], styling, &opening[index..]),
        None => format!("{opening}{styling}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strong() {
        assert_eq!(convert("<strong>x</strong>"), "*x*");
    }

    #[test]
    fn test_bold() {
        assert_eq!(convert("<b>x</b>"), "**x**");
    }

    #[test]
    fn test_paragraph() {
        assert_eq!(convert("<p>Hello</p>"), "p. Hello");
    }

    #[test]
    fn test_paragraph_with_class() {
        assert_eq!(convert(r#"<p class="intro">Hello</p>"#), "p(intro). Hello");
    }

    #[test]
    fn test_link_with_title() {
        assert_eq!(
            convert(r#"<a href="http://x.com" title="T">Link</a>"#),
            "\"Link(T)\":http://x.com"
        );
    }

    #[test]
    fn test_link_without_title() {
        assert_eq!(
            convert(r#"<a href="http://x.com">Link</a>"#),
            "\"Link\":http://x.com"
        );
    }

    #[test]
    fn test_link_without_href() {
        assert_eq!(convert("<a>Link</a>"), "\"Link\":");
    }

    #[test]
    fn test_table() {
        let result = convert("<table><tr><td>A</td></tr></table>");
        assert!(result.starts_with("h2. "), "got: {result:?}");
        assert!(result.contains("|A |"), "got: {result:?}");
    }

    #[test]
    fn test_table_header_row() {
        let result = convert("<table><tr><th>Name</th></tr></table>");
        assert!(result.contains("|_.Name |"), "got: {result:?}");
    }

    #[test]
    fn test_unknown_tag_passes_children_through() {
        assert_eq!(convert("<custom>text</custom>"), "text");
    }

    #[test]
    fn test_never_more_than_two_newlines() {
        let result = convert("<p>A</p><div>B</div><p>C</p><ul><li>D</li></ul>");
        assert!(!result.contains("\n\n\n"), "got: {result:?}");
    }

    #[test]
    fn test_blocks_separated_by_blank_line() {
        let result = convert("<p>A</p><p>B</p>");
        assert_eq!(result, "p. A\n\np. B");
    }

    #[test]
    fn test_list_items_on_own_lines() {
        let result = convert("<ul><li>One</li><li>Two</li></ul>");
        assert!(result.contains("One"));
        assert!(result.contains("Two"));
        assert!(result.contains('\n'));
    }

    #[test]
    fn test_entities_decoded() {
        assert_eq!(convert("<p>a &amp; b</p>"), "p. a & b");
    }

    #[test]
    fn test_newlines_in_text_become_spaces() {
        assert_eq!(convert("<p>a\nb</p>"), "p. a b");
    }

    #[test]
    fn test_extra_close_is_ignored() {
        let mut converter = Converter::new();
        converter.end_element("div");
        assert_eq!(converter.finish(), "");
    }

    #[test]
    fn test_mismatched_close_uses_popped_tag() {
        let mut converter = Converter::new();
        converter.start_element("strong", Attributes::new());
        converter.characters("x");
        converter.end_element("em");
        assert_eq!(converter.finish(), "*x*");
    }

    #[test]
    fn test_styled_heading() {
        assert_eq!(
            convert(r#"<h2 style="color: red">Totals</h2>"#),
            "h2{color: red}. Totals"
        );
    }
}
