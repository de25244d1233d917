//! SQLite persistence for entities, milestones, history and settings.
//!
//! Every multi-statement write runs inside one IMMEDIATE transaction: the
//! write lock is taken before the first read, so concurrent writers queue on
//! the busy timeout instead of failing a lock upgrade. Timestamps are stored
//! as RFC 3339 strings and ordering by time happens after parsing, so
//! differing fractional-second precision never affects sort order.

use std::{path::Path, time::Duration};

use jiff::Timestamp;
use log::warn;
use rusqlite::{types::Type, Connection, Transaction, TransactionBehavior};

use crate::error::{DatabaseResultExt, Result};

pub mod entity_queries;
pub mod history_queries;
pub mod migrations;
pub mod milestone_queries;
pub mod settings_queries;

/// How long a writer waits for another connection's write lock.
pub const BUSY_TIMEOUT: Duration = Duration::from_secs(30);

/// Database connection and operations handler.
pub struct Database {
    connection: Connection,
}

impl Database {
    /// Opens (or creates) the database at `path` and applies the schema.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection = Connection::open(path).db_context("Failed to open database connection")?;
        connection
            .busy_timeout(BUSY_TIMEOUT)
            .db_context("Failed to set busy timeout")?;

        let db = Self { connection };
        db.initialize_schema()?;
        Ok(db)
    }

    /// In-memory database, mainly for tests.
    pub fn in_memory() -> Result<Self> {
        let connection =
            Connection::open_in_memory().db_context("Failed to open in-memory database")?;

        let db = Self { connection };
        db.initialize_schema()?;
        Ok(db)
    }

    /// Begins a transaction holding the write lock from its first statement.
    pub(crate) fn write_transaction(&mut self) -> Result<Transaction<'_>> {
        self.connection
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .db_context("Failed to begin transaction")
    }

    /// Runs `work` against this database inside one IMMEDIATE transaction,
    /// committing on success and rolling back on error.
    ///
    /// Used where the work goes through `&mut Database` APIs (such as
    /// [`crate::config::ConfigStore`]) rather than a borrowed transaction.
    pub fn with_write_lock<T, F>(&mut self, work: F) -> Result<T>
    where
        F: FnOnce(&mut Self) -> Result<T>,
    {
        self.connection
            .execute_batch("BEGIN IMMEDIATE")
            .db_context("Failed to begin transaction")?;

        match work(self) {
            Ok(value) => {
                self.connection
                    .execute_batch("COMMIT")
                    .db_context("Failed to commit transaction")?;
                Ok(value)
            }
            Err(e) => {
                if let Err(rollback) = self.connection.execute_batch("ROLLBACK") {
                    warn!("Failed to roll back transaction: {rollback}");
                }
                Err(e)
            }
        }
    }
}

/// Reads a stored timestamp column.
pub(crate) fn timestamp_column(row: &rusqlite::Row, index: usize) -> rusqlite::Result<Timestamp> {
    row.get::<_, String>(index)?
        .parse::<Timestamp>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(index, Type::Text, Box::new(e)))
}

/// Conversion failure for a column holding an unexpected value.
pub(crate) fn invalid_column(index: usize, message: String) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(index, Type::Text, message.into())
}
