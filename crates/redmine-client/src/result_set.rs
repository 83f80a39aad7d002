//! JSON response envelope shared by all endpoints.

use log::warn;
use serde_json::Value;

/// A decoded API response: the HTTP status, the row objects found under a
/// named top-level key, and any error messages reported by the server.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultSet {
    key: String,
    status: u16,
    rows: Vec<Value>,
    errors: Vec<String>,
}

impl ResultSet {
    /// Decode a response body. Rows live under `key`; with an empty key the
    /// whole document becomes the single row. A blank body yields an empty
    /// set and logs a warning for non-success statuses.
    pub fn new(key: &str, status: u16, body: Option<&str>) -> crate::Result<Self> {
        let (rows, errors) = match body.map(str::trim).filter(|b| !b.is_empty()) {
            Some(body) => {
                let json: Value = serde_json::from_str(body)?;
                // Collection endpoints put an array under the key, while
                // create/update/upload responses put a single object there.
                // Either way the value is kept.
                let rows = if key.is_empty() {
                    vec![json.clone()]
                } else {
                    match json.get(key) {
                        Some(Value::Array(items)) => items.clone(),
                        Some(Value::Null) | None => Vec::new(),
                        Some(other) => vec![other.clone()],
                    }
                };
                let errors = json
                    .get("errors")
                    .and_then(Value::as_array)
                    .map(|messages| {
                        messages
                            .iter()
                            .filter_map(|m| m.as_str().map(str::to_string))
                            .collect()
                    })
                    .unwrap_or_default();
                (rows, errors)
            }
            None => {
                warn_status(status);
                (Vec::new(), Vec::new())
            }
        };

        Ok(Self {
            key: key.to_string(),
            status,
            rows,
            errors,
        })
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn rows(&self) -> &[Value] {
        &self.rows
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn iter(&self) -> impl Iterator<Item = &Value> {
        self.rows.iter()
    }
}

impl<'a> IntoIterator for &'a ResultSet {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

fn warn_status(status: u16) {
    if let Some(message) = status_warning(status) {
        warn!("{message}");
    }
}

fn status_warning(status: u16) -> Option<String> {
    match status {
        200 | 201 | 204 => None,
        401 => Some(format!("[Redmine] HTTP{status}: API authentication failed.")),
        _ => Some(format!("[Redmine] HTTP{status}: An error has occurred.")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn init_logging() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    #[test]
    fn test_rows_under_key() {
        let body = r#"{"projects": [{"id": 1, "name": "TestPJ"}]}"#;
        let result = ResultSet::new("projects", 200, Some(body)).unwrap();
        assert_eq!(result.rows().len(), 1);
        assert_eq!(result.rows()[0]["name"], "TestPJ");
        assert_eq!(result.status(), 200);
        assert!(result.errors().is_empty());
    }

    #[test]
    fn test_single_object_under_key_becomes_one_row() {
        let body = r#"{"upload": {"token": "7167.ed1ccdb0"}}"#;
        let result = ResultSet::new("upload", 201, Some(body)).unwrap();
        assert_eq!(result.rows().len(), 1);
        assert_eq!(result.rows()[0]["token"], "7167.ed1ccdb0");

        let body = r#"{"issue": {"id": 42, "subject": "Test Issue"}}"#;
        let result = ResultSet::new("issue", 201, Some(body)).unwrap();
        assert_eq!(result.rows()[0]["id"], 42);
    }

    #[test]
    fn test_null_under_key_yields_empty_rows() {
        let result = ResultSet::new("issue", 200, Some(r#"{"issue": null}"#)).unwrap();
        assert!(result.rows().is_empty());
    }

    #[test]
    fn test_missing_key_yields_empty_rows() {
        let result = ResultSet::new("projects", 200, Some(r#"{"other": []}"#)).unwrap();
        assert!(result.rows().is_empty());
    }

    #[test]
    fn test_empty_key_keeps_whole_document() {
        let result = ResultSet::new("", 200, Some(r#"{"id": 7}"#)).unwrap();
        assert_eq!(result.rows().len(), 1);
        assert_eq!(result.rows()[0]["id"], 7);
    }

    #[test]
    fn test_errors_are_collected() {
        let body = r#"{"issue": [], "errors": ["Subject cannot be blank"]}"#;
        let result = ResultSet::new("issue", 422, Some(body)).unwrap();
        assert_eq!(result.errors(), ["Subject cannot be blank"]);
    }

    #[test]
    fn test_blank_body_warns_and_yields_empty_set() {
        init_logging();
        let result = ResultSet::new("issue", 401, None).unwrap();
        assert!(result.rows().is_empty());
        assert_eq!(result.status(), 401);
    }

    #[test]
    fn test_status_warnings() {
        assert_eq!(status_warning(200), None);
        assert_eq!(status_warning(201), None);
        assert_eq!(status_warning(204), None);
        assert_eq!(
            status_warning(401).as_deref(),
            Some("[Redmine] HTTP401: API authentication failed.")
        );
        assert_eq!(
            status_warning(500).as_deref(),
            Some("[Redmine] HTTP500: An error has occurred.")
        );
    }

    #[test]
    fn test_malformed_body_is_an_error() {
        assert!(ResultSet::new("issue", 200, Some("not json")).is_err());
    }

    #[test]
    fn test_iteration() {
        let body = r#"{"trackers": [{"id": 1}, {"id": 2}]}"#;
        let result = ResultSet::new("trackers", 200, Some(body)).unwrap();
        let ids: Vec<i64> = result.iter().filter_map(|row| row["id"].as_i64()).collect();
        assert_eq!(ids, [1, 2]);
    }
}
