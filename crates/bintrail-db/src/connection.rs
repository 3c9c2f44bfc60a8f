//! Database connection management.

use std::path::Path;

use diesel::{sql_query, Connection, RunQueryDsl, SqliteConnection};
use tracing::debug;

use crate::{
    error::{DbError, Result},
    migration::apply_migrations,
};

/// Database connection wrapper with migration support.
pub struct DbConnection {
    conn: SqliteConnection,
}

impl DbConnection {
    /// Opens a database connection and runs pending migrations.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection fails or migrations fail.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_str = path.as_ref().to_string_lossy();
        debug!("Opening database at {path_str}");
        let mut conn = SqliteConnection::establish(&path_str)?;

        // WAL mode for better concurrent access
        sql_query("PRAGMA journal_mode = WAL;").execute(&mut conn)?;
        sql_query("PRAGMA foreign_keys = ON;").execute(&mut conn)?;

        apply_migrations(&mut conn).map_err(|e| DbError::MigrationError(e.to_string()))?;

        Ok(Self { conn })
    }

    /// Opens a migrated in-memory database, mainly for tests.
    pub fn open_in_memory() -> Result<Self> {
        let mut conn = SqliteConnection::establish(":memory:")?;

        sql_query("PRAGMA foreign_keys = ON;").execute(&mut conn)?;

        apply_migrations(&mut conn).map_err(|e| DbError::MigrationError(e.to_string()))?;

        Ok(Self { conn })
    }

    /// Gets a mutable reference to the underlying connection.
    pub fn conn(&mut self) -> &mut SqliteConnection {
        &mut self.conn
    }
}

impl std::ops::Deref for DbConnection {
    type Target = SqliteConnection;

    fn deref(&self) -> &Self::Target {
        &self.conn
    }
}

impl std::ops::DerefMut for DbConnection {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.conn
    }
}
