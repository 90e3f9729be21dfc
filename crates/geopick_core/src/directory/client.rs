//! Directory client contract and blocking HTTP implementation.
//!
//! # Responsibility
//! - `GET {base}/users` and `GET {base}/users/{id}` against the directory.
//! - Classify failures as transport, status or decode errors.
//!
//! # Invariants
//! - Requests are unauthenticated and carry no timeout beyond the transport
//!   default.
//! - A failed call never yields partial data.

use crate::model::record::{Record, RecordId};
use log::{error, info};
use serde::de::DeserializeOwned;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

/// Public demo directory the app reads from by default.
pub const DEFAULT_BASE_URL: &str = "https://jsonplaceholder.typicode.com";

pub type DirectoryResult<T> = Result<T, DirectoryError>;

/// Directory read failure.
#[derive(Debug)]
pub enum DirectoryError {
    /// Request never produced a response (DNS, connect, TLS, reset).
    Transport(reqwest::Error),
    /// Response arrived with a non-success status.
    Status { status: u16, url: String },
    /// Response body did not match the record shape.
    Decode(reqwest::Error),
}

impl DirectoryError {
    /// Stable short code used in log lines and FFI envelopes.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Transport(_) => "directory_transport",
            Self::Status { .. } => "directory_status",
            Self::Decode(_) => "directory_decode",
        }
    }
}

impl Display for DirectoryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Transport(err) => write!(f, "directory request failed: {err}"),
            Self::Status { status, url } => {
                write!(f, "directory returned status {status} for {url}")
            }
            Self::Decode(err) => write!(f, "directory response could not be decoded: {err}"),
        }
    }
}

impl Error for DirectoryError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Transport(err) | Self::Decode(err) => Some(err),
            Self::Status { .. } => None,
        }
    }
}

/// Read operations offered by the people directory.
pub trait DirectoryClient {
    /// Lists every record in the directory.
    fn list_all(&self) -> DirectoryResult<Vec<Record>>;
    /// Fetches one record by its upstream id.
    fn fetch_one(&self, id: RecordId) -> DirectoryResult<Record>;
}

impl<C: DirectoryClient + ?Sized> DirectoryClient for &C {
    fn list_all(&self) -> DirectoryResult<Vec<Record>> {
        (**self).list_all()
    }

    fn fetch_one(&self, id: RecordId) -> DirectoryResult<Record> {
        (**self).fetch_one(id)
    }
}

/// Blocking HTTP directory client.
pub struct HttpDirectoryClient {
    base_url: String,
    client: reqwest::blocking::Client,
}

impl HttpDirectoryClient {
    /// Creates a client for `base_url` (trailing slashes are ignored).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, reqwest::blocking::Client::new())
    }

    /// Creates a client reusing a caller-configured transport.
    pub fn with_client(base_url: impl Into<String>, client: reqwest::blocking::Client) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, client }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn users_url(&self) -> String {
        format!("{}/users", self.base_url)
    }

    fn user_url(&self, id: RecordId) -> String {
        format!("{}/users/{id}", self.base_url)
    }

    fn get_json<T: DeserializeOwned>(&self, op: &str, url: String) -> DirectoryResult<T> {
        let started_at = Instant::now();
        info!("event={op} module=directory status=start");

        let response = self.client.get(url.as_str()).send().map_err(|err| {
            error!(
                "event={op} module=directory status=error duration_ms={} error_code=directory_transport is_timeout={} is_connect={} error={}",
                started_at.elapsed().as_millis(),
                err.is_timeout(),
                err.is_connect(),
                err
            );
            DirectoryError::Transport(err)
        })?;

        let status = response.status();
        if !status.is_success() {
            error!(
                "event={op} module=directory status=error duration_ms={} error_code=directory_status http_status={}",
                started_at.elapsed().as_millis(),
                status.as_u16()
            );
            return Err(DirectoryError::Status {
                status: status.as_u16(),
                url,
            });
        }

        let body = response.json::<T>().map_err(|err| {
            error!(
                "event={op} module=directory status=error duration_ms={} error_code=directory_decode error={}",
                started_at.elapsed().as_millis(),
                err
            );
            DirectoryError::Decode(err)
        })?;

        info!(
            "event={op} module=directory status=ok duration_ms={} http_status={}",
            started_at.elapsed().as_millis(),
            status.as_u16()
        );
        Ok(body)
    }
}

impl Default for HttpDirectoryClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl DirectoryClient for HttpDirectoryClient {
    fn list_all(&self) -> DirectoryResult<Vec<Record>> {
        self.get_json("directory_list", self.users_url())
    }

    fn fetch_one(&self, id: RecordId) -> DirectoryResult<Record> {
        self.get_json("directory_fetch", self.user_url(id))
    }
}

#[cfg(test)]
mod tests {
    use super::{HttpDirectoryClient, DEFAULT_BASE_URL};

    #[test]
    fn urls_are_built_from_trimmed_base() {
        let client = HttpDirectoryClient::new("http://localhost:8080/");
        assert_eq!(client.base_url(), "http://localhost:8080");
        assert_eq!(client.users_url(), "http://localhost:8080/users");
        assert_eq!(client.user_url(7), "http://localhost:8080/users/7");
    }

    #[test]
    fn default_client_targets_public_directory() {
        assert_eq!(HttpDirectoryClient::default().base_url(), DEFAULT_BASE_URL);
    }
}
