//! Client Layer
//!
//! reqwest-backed access to the WorthIt backend REST API. Read responses
//! carry localized display keys, write payloads the stable English keys;
//! both shapes live in the domain layer. All admin endpoints replay the
//! persisted session cookie.

mod auth;
mod items;
mod session;
mod traits;

pub use session::SessionStore;
pub use traits::{AuthStore, ItemStore};

use reqwest::header;
use serde::Deserialize;

use crate::config::Config;
use crate::domain::{DomainError, DomainResult};

/// HTTP client for the backend
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: SessionStore,
}

impl ApiClient {
    pub fn new(config: &Config) -> DomainResult<Self> {
        let http = reqwest::Client::builder()
            .cookie_store(true)
            .build()
            .map_err(|e| DomainError::Network(e.to_string()))?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            session: SessionStore::new(config.session_path()),
        })
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Attach the stored session cookie, when one exists
    pub(crate) fn credentialed(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.session.load() {
            Some(cookie) => request.header(header::COOKIE, cookie),
            None => request,
        }
    }

    pub(crate) fn session(&self) -> &SessionStore {
        &self.session
    }
}

/// Error body shape shared by every endpoint
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ErrorBody {
    pub message: Option<String>,
}

/// Map a non-2xx response to the error taxonomy. Consumes the body.
pub(crate) async fn error_from_response(
    context: &str,
    response: reqwest::Response,
) -> DomainError {
    let status = response.status();
    let message = response
        .json::<ErrorBody>()
        .await
        .ok()
        .and_then(|body| body.message);
    log::debug!("{} failed: {} ({:?})", context, status, message);

    let detail = message.unwrap_or_else(|| format!("{} ({})", context, status));
    if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
        DomainError::Unauthorized(detail)
    } else if status == reqwest::StatusCode::NOT_FOUND {
        DomainError::NotFound(detail)
    } else {
        DomainError::Backend(detail)
    }
}

pub(crate) fn network(error: reqwest::Error) -> DomainError {
    DomainError::Network(error.to_string())
}
