//! Styling suffix derivation from `class`, `id` and `style` attributes.

use indexmap::IndexMap;

/// Ordered attribute mapping recorded for each open tag.
pub type Attributes = IndexMap<String, String>;

/// Build the Textile styling suffix for an element: `{inline-style}` followed
/// by `(classes #id)`. Returns an empty string when the element carries no
/// styling information.
pub fn style_suffix(attributes: &Attributes) -> String {
    let mut tokens: Vec<String> = attributes
        .get("class")
        .map(|classes| classes.split_whitespace().map(str::to_string).collect())
        .unwrap_or_default();

    if let Some(id) = attributes.get("id") {
        if !id.trim().is_empty() {
            tokens.push(format!("#{id}"));
        }
    }

    let mut suffix = String::new();
    if let Some(style) = attributes.get("style") {
        let style = style.trim();
        if !style.is_empty() {
            suffix.push_str(&format!("{{{style}}}"));
        }
    }
    if !tokens.is_empty() {
        suffix.push_str(&format!("({})", tokens.join(" ")));
    }

    suffix
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attrs(pairs: &[(&str, &str)]) -> Attributes {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_empty_without_styling() {
        assert_eq!(style_suffix(&attrs(&[])), "");
        assert_eq!(style_suffix(&attrs(&[("href", "x")])), "");
    }

    #[test]
    fn test_classes() {
        assert_eq!(style_suffix(&attrs(&[("class", "alpha beta")])), "(alpha beta)");
    }

    #[test]
    fn test_id() {
        assert_eq!(style_suffix(&attrs(&[("id", "main")])), "(#main)");
    }

    #[test]
    fn test_blank_id_is_ignored() {
        assert_eq!(style_suffix(&attrs(&[("id", "  ")])), "");
    }

    #[test]
    fn test_inline_style() {
        assert_eq!(
            style_suffix(&attrs(&[("style", " color: red ")])),
            "{color: red}"
        );
    }

    #[test]
    fn test_combined() {
        assert_eq!(
            style_suffix(&attrs(&[
                ("class", "alpha"),
                ("id", "main"),
                ("style", "color: red"),
            ])),
            "{color: red}(alpha #main)"
        );
    }
}
