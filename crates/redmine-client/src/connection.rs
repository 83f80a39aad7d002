//! Thin wrapper around a blocking HTTP client with Redmine API-key auth.

use reqwest::blocking::{Client as HttpClient, Response};
use reqwest::header::CONTENT_TYPE;

use crate::{ClientError, Result};

const API_KEY_HEADER: &str = "X-Redmine-API-Key";

/// Connection settings for a Redmine server.
#[derive(Debug, Clone)]
pub struct ConnectionOptions {
    /// Server host name; requests always go over https.
    pub host: String,
    /// API key sent with every request.
    pub api_key: String,
    /// Whether to verify the server's TLS certificate.
    pub verify_ssl: bool,
}

/// A connection to one Redmine server. All transport failures surface as
/// [`ClientError::Connection`].
pub struct Connection {
    options: ConnectionOptions,
    http: HttpClient,
}

impl Connection {
    pub fn new(options: ConnectionOptions) -> Result<Self> {
        let http = HttpClient::builder()
            .danger_accept_invalid_certs(!options.verify_ssl)
            .build()
            .map_err(ClientError::Connection)?;
        Ok(Self { options, http })
    }

    pub fn get(&self, path: &str, query: &[(&str, String)]) -> Result<Response> {
        self.http
            .get(self.url(path))
            .header(API_KEY_HEADER, &self.options.api_key)
            .query(query)
            .send()
            .map_err(ClientError::Connection)
    }

    pub fn post_json(&self, path: &str, body: &serde_json::Value) -> Result<Response> {
        self.http
            .post(self.url(path))
            .header(API_KEY_HEADER, &self.options.api_key)
            .json(body)
            .send()
            .map_err(ClientError::Connection)
    }

    pub fn put_json(&self, path: &str, body: &serde_json::Value) -> Result<Response> {
        self.http
            .put(self.url(path))
            .header(API_KEY_HEADER, &self.options.api_key)
            .json(body)
            .send()
            .map_err(ClientError::Connection)
    }

    /// PUT an XML document, used by the wiki-page endpoints where Redmine
    /// creates or updates the page in one call.
    pub fn put_xml(&self, path: &str, body: String) -> Result<Response> {
        self.http
            .put(self.url(path))
            .header(API_KEY_HEADER, &self.options.api_key)
            .header(CONTENT_TYPE, "application/xml")
            .body(body)
            .send()
            .map_err(ClientError::Connection)
    }

    /// POST a raw binary body, used by the upload endpoints.
    pub fn post_octet_stream(&self, path: &str, body: Vec<u8>) -> Result<Response> {
        self.http
            .post(self.url(path))
            .header(API_KEY_HEADER, &self.options.api_key)
            .header(CONTENT_TYPE, "application/octet-stream")
            .body(body)
            .send()
            .map_err(ClientError::Connection)
    }

    fn url(&self, path: &str) -> String {
        format!("https://{}{}", self.options.host, path)
    }
}
