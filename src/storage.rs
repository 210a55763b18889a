//! SQLite-backed key-value settings store.
//!
//! Holds the two profile identifiers between visits. The page reads them
//! once when it is served and the form writes them once per submission.

use std::collections::HashMap;

use sqlx::Row;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};

use crate::model::SavedProfiles;

/// Settings key for the user's own profile identifier.
pub const MY_PROFILE_KEY: &str = "my_profile";

/// Settings key for the competitor's profile identifier.
pub const COMPETITOR_PROFILE_KEY: &str = "competitor_profile";

/// Database connection pool wrapper.
#[derive(Clone)]
pub struct Storage {
    pool: SqlitePool,
}

impl Storage {
    /// Create a new storage instance and initialize the schema.
    ///
    /// # Arguments
    ///
    /// * `database_url` - SQLite connection string (e.g., "sqlite:rivalry.db" or "sqlite::memory:")
    pub async fn new(database_url: &str) -> Result<Self, sqlx::Error> {
        // A single connection keeps "sqlite::memory:" pointing at one database.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect(database_url)
            .await?;

        let storage = Self { pool };
        storage.initialize_schema().await?;

        Ok(storage)
    }

    async fn initialize_schema(&self) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS settings (
                key TEXT PRIMARY KEY NOT NULL,
                value TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Look up `keys`. Keys that were never set are absent from the result.
    pub async fn get(&self, keys: &[&str]) -> Result<HashMap<String, String>, sqlx::Error> {
        let mut values = HashMap::with_capacity(keys.len());

        for key in keys {
            let row = sqlx::query("SELECT value FROM settings WHERE key = ?")
                .bind(*key)
                .fetch_optional(&self.pool)
                .await?;

            if let Some(row) = row {
                values.insert(key.to_string(), row.get("value"));
            }
        }

        Ok(values)
    }

    /// Upsert every pair in `values` in one transaction.
    pub async fn set(&self, values: &HashMap<String, String>) -> Result<(), sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        for (key, value) in values {
            sqlx::query(
                r#"
                INSERT INTO settings (key, value)
                VALUES (?, ?)
                ON CONFLICT(key) DO UPDATE SET value = excluded.value
                "#,
            )
            .bind(key.as_str())
            .bind(value.as_str())
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await
    }

    /// Load the remembered profile identifiers.
    pub async fn load_profiles(&self) -> Result<SavedProfiles, sqlx::Error> {
        let mut values = self.get(&[MY_PROFILE_KEY, COMPETITOR_PROFILE_KEY]).await?;

        Ok(SavedProfiles {
            my_profile: values.remove(MY_PROFILE_KEY),
            competitor_profile: values.remove(COMPETITOR_PROFILE_KEY),
        })
    }

    /// Remember both profile identifiers.
    pub async fn save_profiles(&self, mine: &str, competitor: &str) -> Result<(), sqlx::Error> {
        let values = HashMap::from([
            (MY_PROFILE_KEY.to_string(), mine.to_string()),
            (COMPETITOR_PROFILE_KEY.to_string(), competitor.to_string()),
        ]);
        self.set(&values).await
    }
}
