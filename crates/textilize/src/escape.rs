//! Entity escaping for plain text submitted inside XML request bodies.

/// Escape `&`, `<` and `>` so plain text can be embedded in an XML element
/// body without breaking the surrounding document.
pub fn escape_xml_text(text: &str) -> String {
    html_escape::encode_text(text).into_owned()
}
