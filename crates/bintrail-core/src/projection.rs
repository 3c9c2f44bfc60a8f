//! Read-only projection of release records.
//!
//! Maps a record to the keyed attribute set exposed to rendering
//! collaborators. Every unset field is omitted. The full projection is
//! cached per record ID; the engine invalidates entries whenever a record
//! is created or its validity window closes.

use bintrail_db::{
    models::{BinaryRelease, Repository},
    repository::CatalogRepository,
};
use diesel::SqliteConnection;
use serde_json::{Map, Value};

use crate::{
    cache::RenderCache,
    timestamp::{buildtime_from_epoch, format_timestamp},
    BintrailResult,
};

/// The identifying attributes of a record: project, repository, and the
/// non-empty identity fields.
pub fn identity_attributes(repository: &Repository, record: &BinaryRelease) -> Map<String, Value> {
    let mut attributes = Map::new();
    attributes.insert("project".to_string(), repository.project.clone().into());
    attributes.insert("repository".to_string(), repository.name.clone().into());

    let fields = [
        ("name", &record.name),
        ("epoch", &record.epoch),
        ("version", &record.version),
        ("release", &record.release),
        ("arch", &record.arch),
        ("medium", &record.medium),
    ];
    for (key, value) in fields {
        if let Some(value) = value {
            attributes.insert(key.to_string(), value.clone().into());
        }
    }

    attributes
}

/// Renders the full external representation of a record.
pub fn render_release(
    conn: &mut SqliteConnection,
    repository: &Repository,
    record: &BinaryRelease,
) -> BintrailResult<Value> {
    let mut binary = identity_attributes(repository, record);

    binary.insert("operation".to_string(), record.operation.clone().into());

    let mut publish = Map::new();
    if let Some(package_id) = record.release_package_id {
        if let Some(name) = CatalogRepository::package_name(conn, package_id)? {
            publish.insert("package".to_string(), name.into());
        }
    }
    publish.insert("time".to_string(), record.releasetime.clone().into());
    binary.insert("publish".to_string(), publish.into());

    if let Some(epoch) = record.buildtime {
        if let Some(time) = buildtime_from_epoch(epoch) {
            let mut build = Map::new();
            build.insert("time".to_string(), format_timestamp(time).into());
            binary.insert("build".to_string(), build.into());
        }
    }

    if let Some(time) = &record.obsolete_time {
        let mut obsolete = Map::new();
        obsolete.insert("time".to_string(), time.clone().into());
        binary.insert("obsolete".to_string(), obsolete.into());
    }

    if let Some(status) = &record.supportstatus {
        binary.insert("supportstatus".to_string(), status.clone().into());
    }

    if let Some(id) = &record.updateinfo_id {
        let mut updateinfo = Map::new();
        updateinfo.insert("id".to_string(), id.clone().into());
        if let Some(version) = &record.updateinfo_version {
            updateinfo.insert("version".to_string(), version.clone().into());
        }
        binary.insert("updateinfo".to_string(), updateinfo.into());
    }

    if let Some(maintainer) = &record.maintainer {
        binary.insert("maintainer".to_string(), maintainer.clone().into());
    }

    if let Some(disturl) = &record.disturl {
        binary.insert("disturl".to_string(), disturl.clone().into());
    }

    if let Some(medium) = &record.medium {
        if let Some(association) =
            CatalogRepository::find_product_medium(conn, repository.id, medium)?
        {
            let mut product = Map::new();
            product.insert("name".to_string(), association.product.into());
            if let Some(version) = association.version {
                product.insert("version".to_string(), version.into());
            }
            product.insert("medium".to_string(), association.medium.into());
            binary.insert("product".to_string(), product.into());
        }
    }

    Ok(Value::Object(binary))
}

/// Fetches the cached projection of a record, rendering on miss.
pub fn rendered(
    conn: &mut SqliteConnection,
    repository: &Repository,
    record: &BinaryRelease,
    cache: &dyn RenderCache,
) -> BintrailResult<Value> {
    if let Some(cached) = cache.fetch(record.id) {
        return Ok(cached);
    }

    let value = render_release(conn, repository, record)?;
    cache.store(record.id, value.clone());
    Ok(value)
}
