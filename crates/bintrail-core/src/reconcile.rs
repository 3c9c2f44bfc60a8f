//! The reconciliation engine.
//!
//! A notification payload is a full snapshot of the binaries currently
//! published from one repository, not a delta. Reconciling it against the
//! repository's live record set therefore means diffing: identities present
//! in both sides are compared by content, identities only in the payload
//! create records, and identities only in the live set get their validity
//! window closed. Every transition of one run carries the same logical
//! time, and the whole run is a single immediate transaction.

use std::collections::{HashMap, HashSet};

use bintrail_backend::BinaryDescriptor;
use bintrail_db::{
    models::{BinaryRelease, NewBinaryRelease, Operation, Repository},
    repository::{CatalogRepository, ReleaseRepository},
};
use chrono::{DateTime, Utc};
use diesel::SqliteConnection;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::{
    cache::RenderCache,
    enrich::{resolve_maintainer, PatchinfoSource},
    identity::ReleaseIdentity,
    timestamp::format_timestamp,
    BintrailResult,
};

/// Outcome counts of one reconciliation run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReconcileSummary {
    /// Records created for identities with no prior live record.
    pub added: usize,
    /// Records created to supersede a live record with changed content.
    pub modified: usize,
    /// Live records the payload confirmed unchanged.
    pub unchanged: usize,
    /// Live records the payload no longer mentions.
    pub obsoleted: usize,
    /// Extra live records removed while repairing duplicate identities.
    pub repaired: usize,
}

impl ReconcileSummary {
    pub fn is_noop(&self) -> bool {
        self.added == 0 && self.modified == 0 && self.obsoleted == 0 && self.repaired == 0
    }
}

/// Reconciles a payload snapshot against a repository's live record set.
///
/// Runs as one immediate transaction: either every transition commits or
/// none does. Cache entries of all created and obsoleted records are
/// invalidated after the commit.
///
/// Callers should pass one consistent `logical_time` per run; it stamps
/// `releasetime` on created records and `obsolete_time` on closed ones.
pub fn reconcile(
    conn: &mut SqliteConnection,
    repository: &Repository,
    descriptors: &[BinaryDescriptor],
    logical_time: DateTime<Utc>,
    patchinfo: &dyn PatchinfoSource,
    cache: &dyn RenderCache,
) -> BintrailResult<ReconcileSummary> {
    let time = format_timestamp(logical_time);
    let mut touched = Vec::new();

    let summary = conn.immediate_transaction(|conn| {
        run_reconciliation(conn, repository, descriptors, &time, patchinfo, &mut touched)
    })?;

    // invalidation must stay behind the commit
    for id in &touched {
        cache.invalidate(*id);
    }

    info!(
        "Reconciled {}/{}: {} added, {} modified, {} unchanged, {} obsoleted, {} repaired",
        repository.project,
        repository.name,
        summary.added,
        summary.modified,
        summary.unchanged,
        summary.obsoleted,
        summary.repaired,
    );

    Ok(summary)
}

fn run_reconciliation(
    conn: &mut SqliteConnection,
    repository: &Repository,
    descriptors: &[BinaryDescriptor],
    time: &str,
    patchinfo: &dyn PatchinfoSource,
    touched: &mut Vec<i32>,
) -> BintrailResult<ReconcileSummary> {
    let mut summary = ReconcileSummary::default();
    let mut processed: HashSet<i32> = HashSet::new();

    // working live set, keyed by identity; insertion order per key is id order
    let mut live_set: HashMap<ReleaseIdentity, Vec<BinaryRelease>> = HashMap::new();
    for record in ReleaseRepository::list_live(conn, repository.id)? {
        live_set
            .entry(ReleaseIdentity::of_record(&record))
            .or_default()
            .push(record);
    }

    for descriptor in descriptors {
        let identity = ReleaseIdentity::of_descriptor(descriptor);
        let mut operation = Operation::Added;

        if let Some(entries) = live_set.get_mut(&identity) {
            if entries.len() > 1 {
                warn!(
                    "Multiple live records for {identity} in {}/{}, repairing",
                    repository.project, repository.name
                );
                for extra in entries.drain(1..) {
                    ReleaseRepository::mark_obsolete(conn, extra.id, time)?;
                    touched.push(extra.id);
                    summary.repaired += 1;
                }
            }

            if let Some(entry) = entries.first() {
                if same_content(entry, descriptor) {
                    processed.insert(entry.id);
                    summary.unchanged += 1;
                    continue;
                }

                // same slot, different content: close the window and replace
                ReleaseRepository::mark_obsolete(conn, entry.id, time)?;
                processed.insert(entry.id);
                touched.push(entry.id);
                operation = Operation::Modified;
            }
        }

        let release_package_id = match (descriptor.project.as_deref(), descriptor.package.as_deref())
        {
            (Some(project), Some(package)) => {
                CatalogRepository::find_package(conn, project, package)?.map(|pkg| pkg.id)
            }
            _ => None,
        };

        let maintainer = descriptor
            .patchinfo_ref
            .as_deref()
            .and_then(|reference| resolve_maintainer(patchinfo, reference));

        let (updateinfo_id, updateinfo_version) = match descriptor.updateinfo_id.as_deref() {
            Some(id) => (Some(id), descriptor.updateinfo_version.as_deref()),
            None => (None, None),
        };

        let created = ReleaseRepository::insert(
            conn,
            &NewBinaryRelease {
                repository_id: repository.id,
                name: descriptor.name.as_deref(),
                version: descriptor.version.as_deref(),
                release: descriptor.release.as_deref(),
                epoch: descriptor.epoch.as_deref(),
                arch: descriptor.arch.as_deref(),
                medium: descriptor.medium.as_deref(),
                disturl: descriptor.disturl.as_deref(),
                supportstatus: descriptor.supportstatus.as_deref(),
                buildtime: descriptor.buildtime,
                releasetime: time,
                operation: operation.as_str(),
                updateinfo_id,
                updateinfo_version,
                maintainer: maintainer.as_deref(),
                release_package_id,
            },
        )?;
        debug!("Created {} record {} for {identity}", operation.as_str(), created.id);

        processed.insert(created.id);
        touched.push(created.id);
        match operation {
            Operation::Added => summary.added += 1,
            Operation::Modified => summary.modified += 1,
        }

        // the new record is now the slot's live state; a later duplicate
        // descriptor in this payload compares against it
        live_set.insert(identity, vec![created]);
    }

    // identities the payload never mentioned are gone from the repository
    for entries in live_set.values() {
        for record in entries {
            if processed.contains(&record.id) {
                continue;
            }
            ReleaseRepository::mark_obsolete(conn, record.id, time)?;
            touched.push(record.id);
            summary.obsoleted += 1;
        }
    }

    Ok(summary)
}

fn same_content(record: &BinaryRelease, descriptor: &BinaryDescriptor) -> bool {
    record.disturl == descriptor.disturl
        && record.supportstatus == descriptor.supportstatus
        && record.buildtime == descriptor.buildtime
}
