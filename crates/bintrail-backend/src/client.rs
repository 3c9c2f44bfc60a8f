//! Blocking HTTP client for the backend stores.

use std::sync::LazyLock;

use tracing::debug;
use ureq::{http::StatusCode, Agent};
use url::Url;

use crate::{
    error::{BackendError, Result},
    patchinfo::Patchinfo,
    payload::BinaryDescriptor,
};

/// Shared agent for all backend requests.
///
/// Status errors are handled explicitly per call so that 404 can map to
/// [`BackendError::NotFound`].
static SHARED_AGENT: LazyLock<Agent> = LazyLock::new(|| {
    Agent::config_builder()
        .http_status_as_error(false)
        .user_agent("bintrail")
        .build()
        .into()
});

/// Client for the notification payload queue and the patch-info source.
pub struct BackendClient {
    base: Url,
}

impl BackendClient {
    /// Creates a client for the backend at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::InvalidUrl`] if the URL cannot be parsed.
    pub fn new(base_url: &str) -> Result<Self> {
        let base = Url::parse(base_url).map_err(|err| BackendError::InvalidUrl(err.to_string()))?;
        Ok(Self { base })
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base
            .join(path)
            .map_err(|err| BackendError::InvalidUrl(err.to_string()))
    }

    /// Fetches a notification payload by key.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::NotFound`] when the payload has already been
    /// consumed or expired; other failures map to the remaining variants.
    pub fn fetch_payload(&self, key: &str) -> Result<Vec<BinaryDescriptor>> {
        let url = self.endpoint(&format!("notificationpayload/{key}"))?;
        debug!("Fetching notification payload from {url}");

        let resp = SHARED_AGENT.get(url.as_str()).call()?;
        let status = resp.status();
        if status == StatusCode::NOT_FOUND {
            return Err(BackendError::NotFound(format!("notification payload {key}")));
        }
        if !status.is_success() {
            return Err(BackendError::FailedToFetchRemote(format!("{url} [{status}]")));
        }

        Ok(resp.into_body().read_json()?)
    }

    /// Discards a consumed notification payload.
    ///
    /// Called only after the reconciliation run committed.
    pub fn delete_payload(&self, key: &str) -> Result<()> {
        let url = self.endpoint(&format!("notificationpayload/{key}"))?;
        debug!("Discarding notification payload at {url}");

        let resp = SHARED_AGENT.delete(url.as_str()).call()?;
        let status = resp.status();
        if status == StatusCode::NOT_FOUND {
            return Err(BackendError::NotFound(format!("notification payload {key}")));
        }
        if !status.is_success() {
            return Err(BackendError::FailedToFetchRemote(format!("{url} [{status}]")));
        }

        Ok(())
    }

    /// Fetches the patch-info document behind a payload reference.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::NotFound`] when the document disappeared.
    pub fn fetch_patchinfo(&self, reference: &str) -> Result<Patchinfo> {
        let url = self.endpoint(&format!("source/{reference}/_patchinfo"))?;
        debug!("Fetching patch-info from {url}");

        let resp = SHARED_AGENT.get(url.as_str()).call()?;
        let status = resp.status();
        if status == StatusCode::NOT_FOUND {
            return Err(BackendError::NotFound(format!("patch-info {reference}")));
        }
        if !status.is_success() {
            return Err(BackendError::FailedToFetchRemote(format!("{url} [{status}]")));
        }

        Ok(resp.into_body().read_json()?)
    }
}
