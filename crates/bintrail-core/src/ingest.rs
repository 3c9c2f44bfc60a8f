//! Notification ingest: fetch a payload, reconcile, discard the payload.

use bintrail_backend::{BackendClient, BackendError, BinaryDescriptor};
use bintrail_db::models::Repository;
use chrono::{DateTime, Utc};
use diesel::SqliteConnection;
use tracing::error;

use crate::{
    cache::RenderCache,
    enrich::PatchinfoSource,
    reconcile::{reconcile, ReconcileSummary},
    BintrailResult,
};

/// Source of notification payloads.
pub trait PayloadSource {
    fn fetch_payload(&self, key: &str) -> Result<Vec<BinaryDescriptor>, BackendError>;
    fn delete_payload(&self, key: &str) -> Result<(), BackendError>;
}

impl PayloadSource for BackendClient {
    fn fetch_payload(&self, key: &str) -> Result<Vec<BinaryDescriptor>, BackendError> {
        BackendClient::fetch_payload(self, key)
    }

    fn delete_payload(&self, key: &str) -> Result<(), BackendError> {
        BackendClient::delete_payload(self, key)
    }
}

/// Result of one notification ingest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngestOutcome {
    /// The payload was reconciled and discarded.
    Reconciled(ReconcileSummary),
    /// The payload was already consumed or expired; nothing to do.
    PayloadMissing,
}

/// Processes one "binaries published" notification.
///
/// A missing payload is a benign skip: the transport will not redeliver it,
/// so there is nothing to retry from here. The payload is discarded only
/// after the reconciliation transaction committed; any failure before that
/// leaves it queued for another attempt.
pub fn ingest_notification(
    conn: &mut SqliteConnection,
    payloads: &dyn PayloadSource,
    patchinfo: &dyn PatchinfoSource,
    repository: &Repository,
    key: &str,
    logical_time: DateTime<Utc>,
    cache: &dyn RenderCache,
) -> BintrailResult<IngestOutcome> {
    let descriptors = match payloads.fetch_payload(key) {
        Ok(descriptors) => descriptors,
        Err(BackendError::NotFound(_)) => {
            error!("Notification payload {key} got removed, skipping reconciliation");
            return Ok(IngestOutcome::PayloadMissing);
        }
        Err(err) => return Err(err.into()),
    };

    let summary = reconcile(conn, repository, &descriptors, logical_time, patchinfo, cache)?;

    payloads.delete_payload(key)?;

    Ok(IngestOutcome::Reconciled(summary))
}

#[cfg(test)]
mod tests {
    use std::{collections::HashMap, sync::Mutex};

    use bintrail_backend::Patchinfo;
    use bintrail_db::{repository::{CatalogRepository, ReleaseRepository}, DbConnection};
    use chrono::TimeZone;

    use super::*;
    use crate::cache::NoopCache;

    struct NoPatchinfo;

    impl PatchinfoSource for NoPatchinfo {
        fn fetch_patchinfo(&self, reference: &str) -> Result<Patchinfo, BackendError> {
            Err(BackendError::NotFound(format!("patch-info {reference}")))
        }
    }

    #[derive(Default)]
    struct FakePayloads {
        payloads: HashMap<String, Vec<BinaryDescriptor>>,
        deleted: Mutex<Vec<String>>,
    }

    impl PayloadSource for FakePayloads {
        fn fetch_payload(&self, key: &str) -> Result<Vec<BinaryDescriptor>, BackendError> {
            self.payloads
                .get(key)
                .cloned()
                .ok_or_else(|| BackendError::NotFound(format!("notification payload {key}")))
        }

        fn delete_payload(&self, key: &str) -> Result<(), BackendError> {
            self.deleted.lock().unwrap().push(key.to_string());
            Ok(())
        }
    }

    struct BrokenPayloads;

    impl PayloadSource for BrokenPayloads {
        fn fetch_payload(&self, _key: &str) -> Result<Vec<BinaryDescriptor>, BackendError> {
            Err(BackendError::FailedToFetchRemote("backend down".into()))
        }

        fn delete_payload(&self, _key: &str) -> Result<(), BackendError> {
            Ok(())
        }
    }

    fn setup() -> (DbConnection, bintrail_db::models::Repository) {
        let mut db = DbConnection::open_in_memory().unwrap();
        let repo =
            CatalogRepository::find_or_create_repository(db.conn(), "openSUSE", "standard")
                .unwrap();
        (db, repo)
    }

    fn time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 5, 10, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_ingest_reconciles_and_discards_payload() {
        let (mut db, repo) = setup();
        let payloads = FakePayloads {
            payloads: HashMap::from([(
                "key1".to_string(),
                vec![BinaryDescriptor {
                    name: Some("foo".to_string()),
                    version: Some("1.0".to_string()),
                    ..Default::default()
                }],
            )]),
            ..Default::default()
        };

        let outcome = ingest_notification(
            db.conn(),
            &payloads,
            &NoPatchinfo,
            &repo,
            "key1",
            time(),
            &NoopCache,
        )
        .unwrap();

        match outcome {
            IngestOutcome::Reconciled(summary) => assert_eq!(summary.added, 1),
            other => panic!("unexpected outcome {other:?}"),
        }
        assert_eq!(*payloads.deleted.lock().unwrap(), vec!["key1".to_string()]);
        assert_eq!(ReleaseRepository::count_live(db.conn(), repo.id).unwrap(), 1);
    }

    #[test]
    fn test_missing_payload_is_a_benign_skip() {
        let (mut db, repo) = setup();
        let payloads = FakePayloads::default();

        let outcome = ingest_notification(
            db.conn(),
            &payloads,
            &NoPatchinfo,
            &repo,
            "gone",
            time(),
            &NoopCache,
        )
        .unwrap();

        assert_eq!(outcome, IngestOutcome::PayloadMissing);
        assert!(payloads.deleted.lock().unwrap().is_empty());
        assert_eq!(ReleaseRepository::count_all(db.conn(), repo.id).unwrap(), 0);
    }

    #[test]
    fn test_other_backend_failures_propagate() {
        let (mut db, repo) = setup();

        let result = ingest_notification(
            db.conn(),
            &BrokenPayloads,
            &NoPatchinfo,
            &repo,
            "key1",
            time(),
            &NoopCache,
        );
        assert!(result.is_err());
    }
}
