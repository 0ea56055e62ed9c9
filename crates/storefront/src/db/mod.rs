//! Database operations for the storefront `SQLite` file.
//!
//! # Tables
//!
//! - `products` - The catalog (seeded once, read-only afterwards)
//! - `cart` - The single shared cart, one row per product
//!
//! # Writes
//!
//! Every cart mutation goes through [`Database::begin_write`], which takes the
//! process-wide writer lock before opening a transaction. Read-modify-write
//! sequences (upsert, checkout) therefore never interleave.
//!
//! # Migrations
//!
//! Migrations are stored in `crates/storefront/migrations/`, embedded at
//! compile time, and run on server startup or via:
//! ```bash
//! cargo run -p pocket-shop-cli -- migrate
//! ```

pub mod cart;
pub mod products;
pub mod seed;

pub use cart::CartRepository;
pub use products::ProductRepository;

use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use sqlx::sqlite::{
    SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
};
use sqlx::pool::PoolConnection;
use sqlx::{Sqlite, SqliteConnection, SqlitePool, Transaction};
use thiserror::Error;
use tokio::sync::{Mutex, MutexGuard};

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Running the embedded migrations failed.
    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Handle to the storefront database.
///
/// Cheaply cloneable; all clones share the same pool and writer lock.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
    writer: Arc<Mutex<()>>,
}

/// An open write transaction holding the writer lock.
///
/// Dropping it without calling [`WriteTransaction::commit`] rolls back.
pub struct WriteTransaction<'a> {
    // Field order matters: the transaction must roll back before the
    // lock is released.
    tx: Transaction<'static, Sqlite>,
    _guard: MutexGuard<'a, ()>,
}

impl WriteTransaction<'_> {
    /// The connection to run statements on.
    pub fn conn(&mut self) -> &mut SqliteConnection {
        &mut *self.tx
    }

    /// Commit the transaction and release the writer lock.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the commit fails.
    pub async fn commit(self) -> Result<(), RepositoryError> {
        self.tx.commit().await?;
        Ok(())
    }
}

impl Database {
    /// Open (creating if missing) the `SQLite` database at `database_url`.
    ///
    /// Connections use WAL journaling, enforce foreign keys, and wait up to
    /// five seconds on a locked database before failing.
    ///
    /// # Errors
    ///
    /// Returns `sqlx::Error` if the URL is invalid or the file cannot be opened.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, sqlx::Error> {
        let options = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .foreign_keys(true)
            .busy_timeout(Duration::from_secs(5));

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections.max(1))
            .acquire_timeout(Duration::from_secs(10))
            .connect_with(options)
            .await?;

        Ok(Self::from_pool(pool))
    }

    /// Open a private in-memory database.
    ///
    /// The pool keeps exactly one connection alive for its whole lifetime, so
    /// the data survives until the last clone is dropped. Intended for tests
    /// and throwaway demos.
    ///
    /// # Errors
    ///
    /// Returns `sqlx::Error` if the connection cannot be established.
    pub async fn in_memory() -> Result<Self, sqlx::Error> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .min_connections(1)
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        Ok(Self::from_pool(pool))
    }

    fn from_pool(pool: SqlitePool) -> Self {
        Self {
            pool,
            writer: Arc::new(Mutex::new(())),
        }
    }

    /// Check out a pooled connection for reads.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if no connection becomes available.
    pub async fn read(&self) -> Result<PoolConnection<Sqlite>, RepositoryError> {
        Ok(self.pool.acquire().await?)
    }

    /// Acquire the writer lock and begin a transaction.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the transaction cannot be started.
    pub async fn begin_write(&self) -> Result<WriteTransaction<'_>, RepositoryError> {
        let guard = self.writer.lock().await;
        let tx = self.pool.begin().await?;
        Ok(WriteTransaction { tx, _guard: guard })
    }

    /// Run the embedded schema migrations.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Migration` if a migration fails to apply.
    pub async fn migrate(&self) -> Result<(), RepositoryError> {
        let _guard = self.writer.lock().await;
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }

    /// Check that the database answers queries.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn ping(&self) -> Result<(), RepositoryError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
