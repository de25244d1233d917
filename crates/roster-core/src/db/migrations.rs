//! Schema setup and versioning.
//!
//! The schema version lives in SQLite's `user_version` pragma. A file stamped
//! by a newer build is refused rather than written with an older layout.

use log::debug;

use crate::error::{DatabaseResultExt, Result, TrackerError};

/// Layout version written by this build.
pub const SCHEMA_VERSION: i64 = 1;

impl super::Database {
    /// Applies the embedded schema and stamps [`SCHEMA_VERSION`].
    pub(super) fn initialize_schema(&self) -> Result<()> {
        // Cascading deletes of milestones and history depend on this
        self.connection
            .execute("PRAGMA foreign_keys = ON", [])
            .db_context("Failed to enable foreign keys")?;

        let found = self.schema_version()?;
        if found > SCHEMA_VERSION {
            return Err(TrackerError::Configuration {
                message: format!(
                    "Database schema version {found} is newer than supported version {SCHEMA_VERSION}"
                ),
            });
        }

        let schema_sql = include_str!("../../assets/schema.sql");
        self.connection
            .execute_batch(schema_sql)
            .db_context("Failed to initialize database schema")?;

        if found < SCHEMA_VERSION {
            debug!("Stamping database schema version {found} -> {SCHEMA_VERSION}");
            self.connection
                .pragma_update(None, "user_version", SCHEMA_VERSION)
                .db_context("Failed to record schema version")?;
        }

        Ok(())
    }

    /// Version recorded in the open file; 0 for a fresh database.
    pub fn schema_version(&self) -> Result<i64> {
        self.connection
            .query_row("PRAGMA user_version", [], |row| row.get(0))
            .db_context("Failed to read schema version")
    }
}

#[cfg(test)]
mod tests {
    use tempfile::NamedTempFile;

    use super::*;
    use crate::Database;

    #[test]
    fn test_fresh_database_is_stamped() {
        let db = Database::in_memory().unwrap();
        assert_eq!(db.schema_version().unwrap(), SCHEMA_VERSION);
    }

    #[test]
    fn test_newer_schema_is_refused() {
        let file = NamedTempFile::new().unwrap();
        {
            let connection = rusqlite::Connection::open(file.path()).unwrap();
            connection
                .pragma_update(None, "user_version", SCHEMA_VERSION + 1)
                .unwrap();
        }

        let err = Database::new(file.path()).err().unwrap();
        assert!(matches!(err, TrackerError::Configuration { .. }));
        assert!(err.to_string().contains("newer than supported"));
    }

    #[test]
    fn test_reopening_keeps_version() {
        let file = NamedTempFile::new().unwrap();
        drop(Database::new(file.path()).unwrap());
        let db = Database::new(file.path()).unwrap();
        assert_eq!(db.schema_version().unwrap(), SCHEMA_VERSION);
    }
}
