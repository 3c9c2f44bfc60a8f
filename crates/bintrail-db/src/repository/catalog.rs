//! Queries over repositories, packages and product media.

use diesel::prelude::*;

use crate::{
    models::{NewPackage, NewProductMedium, NewRepository, Package, ProductMedium, Repository},
    schema::{packages, product_media, repositories},
};

/// Repository for catalog lookups (repositories, packages, product media).
pub struct CatalogRepository;

impl CatalogRepository {
    /// Lists all known repositories.
    pub fn list_repositories(conn: &mut SqliteConnection) -> QueryResult<Vec<Repository>> {
        repositories::table
            .order((repositories::project.asc(), repositories::name.asc()))
            .select(Repository::as_select())
            .load(conn)
    }

    /// Finds a repository by project and name.
    pub fn find_repository(
        conn: &mut SqliteConnection,
        project: &str,
        name: &str,
    ) -> QueryResult<Option<Repository>> {
        repositories::table
            .filter(repositories::project.eq(project))
            .filter(repositories::name.eq(name))
            .select(Repository::as_select())
            .first(conn)
            .optional()
    }

    /// Finds a repository by ID.
    pub fn find_repository_by_id(
        conn: &mut SqliteConnection,
        id: i32,
    ) -> QueryResult<Option<Repository>> {
        repositories::table
            .filter(repositories::id.eq(id))
            .select(Repository::as_select())
            .first(conn)
            .optional()
    }

    /// Finds a repository by project and name, creating it when missing.
    pub fn find_or_create_repository(
        conn: &mut SqliteConnection,
        project: &str,
        name: &str,
    ) -> QueryResult<Repository> {
        if let Some(existing) = Self::find_repository(conn, project, name)? {
            return Ok(existing);
        }

        diesel::insert_into(repositories::table)
            .values(&NewRepository { project, name })
            .returning(Repository::as_returning())
            .get_result(conn)
    }

    /// Finds a package by project and name.
    pub fn find_package(
        conn: &mut SqliteConnection,
        project: &str,
        name: &str,
    ) -> QueryResult<Option<Package>> {
        packages::table
            .filter(packages::project.eq(project))
            .filter(packages::name.eq(name))
            .select(Package::as_select())
            .first(conn)
            .optional()
    }

    /// Resolves a package ID to its name.
    pub fn package_name(conn: &mut SqliteConnection, id: i32) -> QueryResult<Option<String>> {
        packages::table
            .filter(packages::id.eq(id))
            .select(packages::name)
            .first(conn)
            .optional()
    }

    /// Inserts a package and returns the stored row.
    pub fn insert_package(
        conn: &mut SqliteConnection,
        project: &str,
        name: &str,
    ) -> QueryResult<Package> {
        diesel::insert_into(packages::table)
            .values(&NewPackage { project, name })
            .returning(Package::as_returning())
            .get_result(conn)
    }

    /// Finds the product association for a repository medium.
    pub fn find_product_medium(
        conn: &mut SqliteConnection,
        repository_id: i32,
        medium: &str,
    ) -> QueryResult<Option<ProductMedium>> {
        product_media::table
            .filter(product_media::repository_id.eq(repository_id))
            .filter(product_media::medium.eq(medium))
            .select(ProductMedium::as_select())
            .first(conn)
            .optional()
    }

    /// Inserts a product association for a repository medium.
    pub fn insert_product_medium(
        conn: &mut SqliteConnection,
        record: &NewProductMedium,
    ) -> QueryResult<ProductMedium> {
        diesel::insert_into(product_media::table)
            .values(record)
            .returning(ProductMedium::as_returning())
            .get_result(conn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connection::DbConnection;

    #[test]
    fn test_find_or_create_repository() {
        let mut db = DbConnection::open_in_memory().unwrap();

        let created =
            CatalogRepository::find_or_create_repository(db.conn(), "openSUSE", "standard")
                .unwrap();
        let found =
            CatalogRepository::find_or_create_repository(db.conn(), "openSUSE", "standard")
                .unwrap();
        assert_eq!(created.id, found.id);

        let other =
            CatalogRepository::find_or_create_repository(db.conn(), "openSUSE", "images").unwrap();
        assert_ne!(created.id, other.id);

        let all = CatalogRepository::list_repositories(db.conn()).unwrap();
        assert_eq!(all.len(), 2);
    }

    #[test]
    fn test_package_lookup() {
        let mut db = DbConnection::open_in_memory().unwrap();

        assert!(CatalogRepository::find_package(db.conn(), "openSUSE", "curl")
            .unwrap()
            .is_none());

        let pkg = CatalogRepository::insert_package(db.conn(), "openSUSE", "curl").unwrap();
        let found = CatalogRepository::find_package(db.conn(), "openSUSE", "curl")
            .unwrap()
            .unwrap();
        assert_eq!(pkg.id, found.id);
        assert_eq!(
            CatalogRepository::package_name(db.conn(), pkg.id).unwrap(),
            Some("curl".to_string())
        );
    }

    #[test]
    fn test_product_medium_lookup() {
        let mut db = DbConnection::open_in_memory().unwrap();
        let repo = CatalogRepository::find_or_create_repository(db.conn(), "openSUSE", "standard")
            .unwrap();

        let inserted = CatalogRepository::insert_product_medium(
            db.conn(),
            &NewProductMedium {
                repository_id: repo.id,
                medium: "dvd5",
                product: "openSUSE",
                version: Some("15.6"),
            },
        )
        .unwrap();

        let found = CatalogRepository::find_product_medium(db.conn(), repo.id, "dvd5")
            .unwrap()
            .unwrap();
        assert_eq!(inserted.id, found.id);
        assert_eq!(found.product, "openSUSE");

        assert!(CatalogRepository::find_product_medium(db.conn(), repo.id, "dvd9")
            .unwrap()
            .is_none());
    }
}
