use std::error::Error;

use diesel::SqliteConnection;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Runs all pending schema migrations.
pub fn apply_migrations(
    conn: &mut SqliteConnection,
) -> Result<(), Box<dyn Error + Send + Sync + 'static>> {
    conn.run_pending_migrations(MIGRATIONS)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use diesel::prelude::*;

    use super::*;
    use crate::schema::{binary_releases, packages, product_media, repositories};

    fn assert_schema_is_queryable(conn: &mut SqliteConnection) {
        assert_eq!(repositories::table.count().get_result::<i64>(conn).unwrap(), 0);
        assert_eq!(packages::table.count().get_result::<i64>(conn).unwrap(), 0);
        assert_eq!(product_media::table.count().get_result::<i64>(conn).unwrap(), 0);
        assert_eq!(
            binary_releases::table.count().get_result::<i64>(conn).unwrap(),
            0
        );
    }

    #[test]
    fn test_migrations_apply_cleanly() {
        let mut conn = SqliteConnection::establish(":memory:").unwrap();
        apply_migrations(&mut conn).unwrap();
        assert_schema_is_queryable(&mut conn);
    }

    #[test]
    fn test_migrations_are_idempotent() {
        let mut conn = SqliteConnection::establish(":memory:").unwrap();
        apply_migrations(&mut conn).unwrap();
        apply_migrations(&mut conn).unwrap();
        assert_schema_is_queryable(&mut conn);
    }
}
