//! Key-value settings backed by the `settings` table.

use jiff::Timestamp;
use rusqlite::{params, OptionalExtension};

use crate::{
    config::ConfigStore,
    error::{DatabaseResultExt, Result},
};

const SELECT_SETTING_SQL: &str = "SELECT value FROM settings WHERE key = ?1";
const UPSERT_SETTING_SQL: &str = "INSERT INTO settings (key, value, updated_at) VALUES (?1, ?2, ?3) ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at";
const DELETE_SETTING_SQL: &str = "DELETE FROM settings WHERE key = ?1";

impl ConfigStore for super::Database {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.connection
            .query_row(SELECT_SETTING_SQL, params![key], |row| row.get(0))
            .optional()
            .db_context("Failed to read setting")
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.connection
            .execute(
                UPSERT_SETTING_SQL,
                params![key, value, Timestamp::now().to_string()],
            )
            .db_context("Failed to write setting")?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<bool> {
        let rows = self
            .connection
            .execute(DELETE_SETTING_SQL, params![key])
            .db_context("Failed to delete setting")?;
        Ok(rows > 0)
    }
}
