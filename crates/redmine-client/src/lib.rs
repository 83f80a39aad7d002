//! # redmine-client
//!
//! REST client for a Redmine server: projects, trackers, issues, wiki pages
//! and file uploads. Responses share a single JSON envelope ([`ResultSet`]),
//! and wiki content is posted as an XML body. HTML report content is turned
//! into Textile with the `textilize` crate before posting.
//!
//! ## Example
//!
//! ```rust,no_run
//! use redmine_client::{Client, ConnectionOptions};
//!
//! let client = Client::new("/redmine", ConnectionOptions {
//!     host: "redmine.example.com".into(),
//!     api_key: "abcdefg".into(),
//!     verify_ssl: true,
//! })?;
//!
//! for project in client.projects(1, 100)?.rows() {
//!     println!("{}", project["name"]);
//! }
//! # Ok::<(), redmine_client::ClientError>(())
//! ```

mod client;
mod connection;
mod result_set;

pub use client::{Client, IssueFields};
pub use connection::{Connection, ConnectionOptions};
pub use result_set::ResultSet;

/// Error type for client operations
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("could not connect to the Redmine server")]
    Connection(#[source] reqwest::Error),

    #[error("malformed response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("could not read upload file: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ClientError>;
