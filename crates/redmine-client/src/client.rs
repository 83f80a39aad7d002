//! High-level Redmine API operations.

use std::path::Path;

use indexmap::IndexMap;
use reqwest::blocking::Response;
use serde::Serialize;
use serde_json::{json, Value};
use textilize::{escape_xml_text, report_to_textile, ReportOptions};

use crate::connection::{Connection, ConnectionOptions};
use crate::result_set::ResultSet;
use crate::{ClientError, Result};

/// Fields accepted when creating an issue. Optional fields are omitted from
/// the request body entirely rather than sent as null.
#[derive(Debug, Clone, Default, Serialize)]
pub struct IssueFields {
    pub project_id: u64,
    pub subject: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracker_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fixed_version_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_to_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_issue_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_fields: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub watcher_user_ids: Option<Vec<u64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uploads: Option<Value>,
}

/// Client for one Redmine server. Paths are rooted at `prefix`, so servers
/// mounted under a sub-URI work unchanged.
pub struct Client {
    prefix: String,
    connection: Connection,
}

impl Client {
    pub fn new(prefix: impl Into<String>, options: ConnectionOptions) -> Result<Self> {
        Ok(Self {
            prefix: prefix.into(),
            connection: Connection::new(options)?,
        })
    }

    /// List projects with their trackers and issue categories.
    pub fn projects(&self, page: u32, per: u32) -> Result<ResultSet> {
        let query = [
            ("include", "trackers,issue_categories".to_string()),
            ("page", page.to_string()),
            ("per", per.to_string()),
        ];
        let response = self
            .connection
            .get(&format!("{}/projects.json", self.prefix), &query)?;
        decode("projects", response)
    }

    pub fn trackers(&self) -> Result<ResultSet> {
        let response = self
            .connection
            .get(&format!("{}/trackers.json", self.prefix), &[])?;
        decode("trackers", response)
    }

    pub fn wiki_pages(&self, project: &str) -> Result<ResultSet> {
        let response = self.connection.get(
            &format!("{}/projects/{}/wiki/index.json", self.prefix, project),
            &[],
        )?;
        decode("wiki_pages", response)
    }

    pub fn create_issue(&self, issue: &IssueFields) -> Result<ResultSet> {
        let response = self.connection.post_json(
            &format!("{}/issues.json", self.prefix),
            &json!({ "issue": issue }),
        )?;
        decode("issue", response)
    }

    pub fn update_issue(&self, id: u64, notes: &str, uploads: Option<&Value>) -> Result<ResultSet> {
        let mut issue = json!({ "notes": notes });
        if let Some(uploads) = uploads {
            issue["uploads"] = uploads.clone();
        }
        let response = self.connection.put_json(
            &format!("{}/issues/{}.json", self.prefix, id),
            &json!({ "issue": issue }),
        )?;
        decode("issue", response)
    }

    /// Create or update a wiki page. `content` must already be XML-safe
    /// Textile markup.
    pub fn create_wiki_page(
        &self,
        project: &str,
        page_name: &str,
        content: &str,
    ) -> Result<ResultSet> {
        let response = self
            .connection
            .put_xml(&self.wiki_path(project, page_name), wiki_page_body(content))?;
        decode("wiki_page", response)
    }

    /// Convert a request-log-analyzer HTML report to Textile, apply the
    /// report tweaks, and post the result as a wiki page.
    pub fn create_report_wiki_page(
        &self,
        project: &str,
        page_name: &str,
        html: &str,
        options: &ReportOptions,
    ) -> Result<ResultSet> {
        self.create_wiki_page(project, page_name, &report_to_textile(html, options))
    }

    /// Post raw log output as a preformatted wiki page, escaping the text so
    /// it survives the XML envelope.
    pub fn create_errors_wiki_page(
        &self,
        project: &str,
        page_name: &str,
        text: &str,
    ) -> Result<ResultSet> {
        let response = self.connection.put_xml(
            &self.wiki_path(project, page_name),
            errors_page_body(page_name, text),
        )?;
        decode("wiki_page", response)
    }

    /// Maintain one index page per environment listing that environment's
    /// report pages, newest first.
    pub fn create_aggregated_wiki_pages(
        &self,
        project: &str,
        pages_by_env: &IndexMap<String, Vec<String>>,
    ) -> Result<()> {
        for (env, page_names) in pages_by_env {
            let page_name = format!("{env}-result-analyzer");
            self.create_wiki_page(project, &page_name, &newest_first(page_names))?;
        }
        Ok(())
    }

    /// Maintain one index page per year-month listing that month's report
    /// pages, newest first.
    pub fn create_year_month_wiki_pages(
        &self,
        project: &str,
        pages_by_month: &IndexMap<String, Vec<String>>,
    ) -> Result<()> {
        for (year_month, page_names) in pages_by_month {
            self.create_wiki_page(project, year_month, &newest_first(page_names))?;
        }
        Ok(())
    }

    /// Upload a file, returning the attachment token Redmine hands back.
    pub fn upload_file(&self, path: &Path) -> Result<ResultSet> {
        let bytes = std::fs::read(path)?;
        let response = self
            .connection
            .post_octet_stream(&format!("{}/uploads.json", self.prefix), bytes)?;
        decode("upload", response)
    }

    fn wiki_path(&self, project: &str, page_name: &str) -> String {
        format!("{}/projects/{}/wiki/{}.xml", self.prefix, project, page_name)
    }
}

fn decode(key: &str, response: Response) -> Result<ResultSet> {
    let status = response.status().as_u16();
    let body = response.text().map_err(ClientError::Connection)?;
    ResultSet::new(key, status, Some(&body))
}

fn wiki_page_body(content: &str) -> String {
    format!("<wiki_page><text>{content}</text></wiki_page>")
}

fn errors_page_body(page_name: &str, text: &str) -> String {
    format!(
        "<wiki_page><text>h3. {page_name} <notextile></notextile>&lt;pre&gt;{}&lt;/pre&gt;</text></wiki_page>",
        escape_xml_text(text)
    )
}

/// Report pages are named by date, so a reverse lexicographic sort puts the
/// newest first.
fn newest_first(page_names: &[String]) -> String {
    let mut names = page_names.to_vec();
    names.sort_unstable();
    names.reverse();
    names.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wiki_page_body() {
        assert_eq!(
            wiki_page_body("h2. Totals"),
            "<wiki_page><text>h2. Totals</text></wiki_page>"
        );
    }

    #[test]
    fn test_errors_page_body_escapes_text() {
        let body = errors_page_body("failures", "expected <ok> & got <error>");
        assert!(body.starts_with("<wiki_page><text>h3. failures <notextile></notextile>&lt;pre&gt;"));
        assert!(body.contains("expected &lt;ok&gt; &amp; got &lt;error&gt;"));
        assert!(body.ends_with("&lt;/pre&gt;</text></wiki_page>"));
    }

    #[test]
    fn test_newest_first() {
        let names = vec![
            "2026-06-result".to_string(),
            "2026-08-result".to_string(),
            "2026-07-result".to_string(),
        ];
        assert_eq!(
            newest_first(&names),
            "2026-08-result\n2026-07-result\n2026-06-result"
        );
    }

    #[test]
    fn test_issue_fields_omit_unset_options() {
        let issue = IssueFields {
            project_id: 1,
            subject: "Test Issue".to_string(),
            tracker_id: Some(10),
            ..Default::default()
        };
        let body = json!({ "issue": issue });
        assert_eq!(
            body,
            json!({ "issue": { "project_id": 1, "subject": "Test Issue", "tracker_id": 10 } })
        );
    }

    #[test]
    fn test_issue_fields_serialize_watchers() {
        let issue = IssueFields {
            project_id: 1,
            subject: "Test Issue".to_string(),
            watcher_user_ids: Some(vec![3, 5]),
            ..Default::default()
        };
        let body = serde_json::to_value(&issue).unwrap();
        assert_eq!(body["watcher_user_ids"], json!([3, 5]));
    }
}
