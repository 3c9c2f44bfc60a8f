//! Queries over binary release records.

use diesel::prelude::*;

use crate::{
    models::{BinaryRelease, NewBinaryRelease},
    schema::binary_releases,
};

/// Repository for release record operations.
pub struct ReleaseRepository;

impl ReleaseRepository {
    /// Loads the live set of a repository, oldest record first.
    ///
    /// Live means `obsolete_time IS NULL`; the ascending id order is what
    /// makes the duplicate tie-break in reconciliation deterministic.
    pub fn list_live(
        conn: &mut SqliteConnection,
        repository_id: i32,
    ) -> QueryResult<Vec<BinaryRelease>> {
        binary_releases::table
            .filter(binary_releases::repository_id.eq(repository_id))
            .filter(binary_releases::obsolete_time.is_null())
            .order(binary_releases::id.asc())
            .select(BinaryRelease::as_select())
            .load(conn)
    }

    /// Lists records of a repository, optionally including obsolete history.
    pub fn list_for_repository(
        conn: &mut SqliteConnection,
        repository_id: i32,
        include_history: bool,
    ) -> QueryResult<Vec<BinaryRelease>> {
        let mut query = binary_releases::table
            .filter(binary_releases::repository_id.eq(repository_id))
            .into_boxed();

        if !include_history {
            query = query.filter(binary_releases::obsolete_time.is_null());
        }

        query
            .order(binary_releases::id.asc())
            .select(BinaryRelease::as_select())
            .load(conn)
    }

    /// Finds a release record by ID.
    pub fn find_by_id(
        conn: &mut SqliteConnection,
        id: i32,
    ) -> QueryResult<Option<BinaryRelease>> {
        binary_releases::table
            .filter(binary_releases::id.eq(id))
            .select(BinaryRelease::as_select())
            .first(conn)
            .optional()
    }

    /// Inserts a new release record and returns the stored row.
    pub fn insert(
        conn: &mut SqliteConnection,
        record: &NewBinaryRelease,
    ) -> QueryResult<BinaryRelease> {
        diesel::insert_into(binary_releases::table)
            .values(record)
            .returning(BinaryRelease::as_returning())
            .get_result(conn)
    }

    /// Closes a record's validity window.
    ///
    /// Only a live record is affected; an `obsolete_time` already set is
    /// never overwritten. Returns the number of updated rows (0 or 1).
    pub fn mark_obsolete(
        conn: &mut SqliteConnection,
        id: i32,
        time: &str,
    ) -> QueryResult<usize> {
        diesel::update(
            binary_releases::table
                .filter(binary_releases::id.eq(id))
                .filter(binary_releases::obsolete_time.is_null()),
        )
        .set(binary_releases::obsolete_time.eq(time))
        .execute(conn)
    }

    /// Counts live records of a repository.
    pub fn count_live(conn: &mut SqliteConnection, repository_id: i32) -> QueryResult<i64> {
        binary_releases::table
            .filter(binary_releases::repository_id.eq(repository_id))
            .filter(binary_releases::obsolete_time.is_null())
            .count()
            .get_result(conn)
    }

    /// Counts all records of a repository, history included.
    pub fn count_all(conn: &mut SqliteConnection, repository_id: i32) -> QueryResult<i64> {
        binary_releases::table
            .filter(binary_releases::repository_id.eq(repository_id))
            .count()
            .get_result(conn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        connection::DbConnection, models::Operation, repository::CatalogRepository,
    };

    fn new_record<'a>(repository_id: i32, name: &'a str, releasetime: &'a str) -> NewBinaryRelease<'a> {
        NewBinaryRelease {
            repository_id,
            name: Some(name),
            version: Some("1.0"),
            release: Some("1"),
            epoch: None,
            arch: Some("x86_64"),
            medium: None,
            disturl: None,
            supportstatus: None,
            buildtime: None,
            releasetime,
            operation: Operation::Added.as_str(),
            updateinfo_id: None,
            updateinfo_version: None,
            maintainer: None,
            release_package_id: None,
        }
    }

    fn setup() -> (DbConnection, i32) {
        let mut db = DbConnection::open_in_memory().unwrap();
        let repo =
            CatalogRepository::find_or_create_repository(db.conn(), "test:project", "standard")
                .unwrap();
        (db, repo.id)
    }

    #[test]
    fn test_insert_and_list_live() {
        let (mut db, repo_id) = setup();

        let rec = ReleaseRepository::insert(db.conn(), &new_record(repo_id, "foo", "2026-05-10T12:00:00Z"))
            .unwrap();
        assert!(rec.id > 0);
        assert!(rec.is_live());
        assert_eq!(rec.operation, "added");

        let live = ReleaseRepository::list_live(db.conn(), repo_id).unwrap();
        assert_eq!(live.len(), 1);
        assert_eq!(live[0].name.as_deref(), Some("foo"));
    }

    #[test]
    fn test_mark_obsolete_is_write_once() {
        let (mut db, repo_id) = setup();

        let rec = ReleaseRepository::insert(db.conn(), &new_record(repo_id, "foo", "2026-05-10T12:00:00Z"))
            .unwrap();

        let updated =
            ReleaseRepository::mark_obsolete(db.conn(), rec.id, "2026-05-11T00:00:00Z").unwrap();
        assert_eq!(updated, 1);

        // a second transition must not move the window
        let updated =
            ReleaseRepository::mark_obsolete(db.conn(), rec.id, "2026-05-12T00:00:00Z").unwrap();
        assert_eq!(updated, 0);

        let stored = ReleaseRepository::find_by_id(db.conn(), rec.id).unwrap().unwrap();
        assert_eq!(stored.obsolete_time.as_deref(), Some("2026-05-11T00:00:00Z"));
        assert!(ReleaseRepository::list_live(db.conn(), repo_id).unwrap().is_empty());
    }

    #[test]
    fn test_list_for_repository_with_history() {
        let (mut db, repo_id) = setup();

        let a = ReleaseRepository::insert(db.conn(), &new_record(repo_id, "a", "2026-05-10T12:00:00Z"))
            .unwrap();
        ReleaseRepository::insert(db.conn(), &new_record(repo_id, "b", "2026-05-10T12:00:00Z"))
            .unwrap();
        ReleaseRepository::mark_obsolete(db.conn(), a.id, "2026-05-11T00:00:00Z").unwrap();

        let live = ReleaseRepository::list_for_repository(db.conn(), repo_id, false).unwrap();
        assert_eq!(live.len(), 1);

        let all = ReleaseRepository::list_for_repository(db.conn(), repo_id, true).unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(ReleaseRepository::count_all(db.conn(), repo_id).unwrap(), 2);
        assert_eq!(ReleaseRepository::count_live(db.conn(), repo_id).unwrap(), 1);
    }
}
