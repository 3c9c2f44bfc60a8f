//! Typed models for the bintrail store.

use diesel::prelude::*;

use crate::schema::{binary_releases, packages, product_media, repositories};

/// A build repository that publishes binary artifacts.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = repositories)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Repository {
    pub id: i32,
    pub project: String,
    pub name: String,
}

#[derive(Insertable)]
#[diesel(table_name = repositories)]
pub struct NewRepository<'a> {
    pub project: &'a str,
    pub name: &'a str,
}

/// A source package, referenced weakly from release records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = packages)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Package {
    pub id: i32,
    pub project: String,
    pub name: String,
}

#[derive(Insertable)]
#[diesel(table_name = packages)]
pub struct NewPackage<'a> {
    pub project: &'a str,
    pub name: &'a str,
}

/// Product association for one distribution medium of a repository.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = product_media)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ProductMedium {
    pub id: i32,
    pub repository_id: i32,
    pub medium: String,
    pub product: String,
    pub version: Option<String>,
}

#[derive(Insertable)]
#[diesel(table_name = product_media)]
pub struct NewProductMedium<'a> {
    pub repository_id: i32,
    pub medium: &'a str,
    pub product: &'a str,
    pub version: Option<&'a str>,
}

/// How a release record came into existence.
///
/// `Modified` means the record superseded a live record with the same
/// identity but different content; `Added` means the identity was new.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Added,
    Modified,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Added => "added",
            Operation::Modified => "modified",
        }
    }
}

/// One observed instance of a published binary artifact.
///
/// The identity columns (`name` through `medium`) locate the artifact slot;
/// `obsolete_time` is `None` while the record is the live state of that slot
/// and is set exactly once when a later reconciliation run supersedes or
/// removes it. Timestamps are RFC 3339 text except `buildtime`, which keeps
/// the epoch seconds reported by the payload.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = binary_releases)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct BinaryRelease {
    pub id: i32,
    pub repository_id: i32,
    pub name: Option<String>,
    pub version: Option<String>,
    pub release: Option<String>,
    pub epoch: Option<String>,
    pub arch: Option<String>,
    pub medium: Option<String>,
    pub disturl: Option<String>,
    pub supportstatus: Option<String>,
    pub buildtime: Option<i64>,
    pub releasetime: String,
    pub obsolete_time: Option<String>,
    pub operation: String,
    pub updateinfo_id: Option<String>,
    pub updateinfo_version: Option<String>,
    pub maintainer: Option<String>,
    pub release_package_id: Option<i32>,
}

impl BinaryRelease {
    pub fn is_live(&self) -> bool {
        self.obsolete_time.is_none()
    }
}

#[derive(Insertable)]
#[diesel(table_name = binary_releases)]
pub struct NewBinaryRelease<'a> {
    pub repository_id: i32,
    pub name: Option<&'a str>,
    pub version: Option<&'a str>,
    pub release: Option<&'a str>,
    pub epoch: Option<&'a str>,
    pub arch: Option<&'a str>,
    pub medium: Option<&'a str>,
    pub disturl: Option<&'a str>,
    pub supportstatus: Option<&'a str>,
    pub buildtime: Option<i64>,
    pub releasetime: &'a str,
    pub operation: &'a str,
    pub updateinfo_id: Option<&'a str>,
    pub updateinfo_version: Option<&'a str>,
    pub maintainer: Option<&'a str>,
    pub release_package_id: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_as_str() {
        assert_eq!(Operation::Added.as_str(), "added");
        assert_eq!(Operation::Modified.as_str(), "modified");
    }
}
