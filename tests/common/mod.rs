//! Helpers for integration tests.

use attesta::db::{DbPool, establish_connection_pool};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tempfile::NamedTempFile;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!(); // assumes migrations/ exists

/// Migrated SQLite database in a temp file, dropped with the test.
pub struct TestDb {
    _tempfile: NamedTempFile,
    pool: DbPool,
}

impl TestDb {
    pub fn new() -> Self {
        let tempfile = NamedTempFile::new().expect("temp database file");
        let pool = establish_connection_pool(tempfile.path().to_str().unwrap())
            .expect("SQLite pool over the temp file");
        let mut conn = pool.get().expect("pooled SQLite connection");
        conn.run_pending_migrations(MIGRATIONS)
            .expect("pending migrations");
        TestDb {
            _tempfile: tempfile,
            pool,
        }
    }

    pub fn pool(&self) -> DbPool {
        self.pool.clone()
    }
}
