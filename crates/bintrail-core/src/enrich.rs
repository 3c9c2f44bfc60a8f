//! Maintainer enrichment from patch-info documents.

use bintrail_backend::{BackendClient, BackendError, Patchinfo};
use tracing::{debug, warn};

/// Source of patch-info documents.
pub trait PatchinfoSource {
    fn fetch_patchinfo(&self, reference: &str) -> Result<Patchinfo, BackendError>;
}

impl PatchinfoSource for BackendClient {
    fn fetch_patchinfo(&self, reference: &str) -> Result<Patchinfo, BackendError> {
        BackendClient::fetch_patchinfo(self, reference)
    }
}

/// Resolves the maintainer recorded in a patch-info document.
///
/// Any lookup failure degrades to `None`. The result is attached only to
/// the record being created, so historic records keep the maintainer known
/// at release time even after the document changes or disappears.
pub fn resolve_maintainer(source: &dyn PatchinfoSource, reference: &str) -> Option<String> {
    match source.fetch_patchinfo(reference) {
        Ok(patchinfo) => patchinfo.packager,
        Err(BackendError::NotFound(_)) => {
            debug!("Patch-info {reference} is gone, leaving maintainer unset");
            None
        }
        Err(err) => {
            warn!("Patch-info lookup for {reference} failed: {err}");
            None
        }
    }
}
