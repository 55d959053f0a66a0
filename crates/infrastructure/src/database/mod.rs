use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::r2d2::{self, ConnectionManager, CustomizeConnection};
use domain::DomainError;
use tracing::info;

pub mod schema;
pub use schema::*;

pub type SqlitePool = r2d2::Pool<ConnectionManager<SqliteConnection>>;
pub type PooledSqliteConnection = r2d2::PooledConnection<ConnectionManager<SqliteConnection>>;

const BUSY_TIMEOUT_MS: u32 = 5_000;

const CREATE_TABLES: &str = "
    PRAGMA journal_mode = WAL;

    CREATE TABLE IF NOT EXISTS contents (
        id TEXT PRIMARY KEY NOT NULL,
        title TEXT NOT NULL,
        description TEXT NOT NULL,
        video TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS ratings (
        id TEXT PRIMARY KEY NOT NULL,
        content_id TEXT NOT NULL REFERENCES contents(id),
        user_id TEXT NOT NULL,
        score INTEGER NOT NULL CHECK (score BETWEEN 1 AND 5)
    );

    CREATE INDEX IF NOT EXISTS idx_ratings_content_id ON ratings(content_id);

    CREATE TABLE IF NOT EXISTS users (
        id TEXT PRIMARY KEY NOT NULL,
        username TEXT NOT NULL UNIQUE,
        email TEXT NOT NULL UNIQUE,
        admin BOOLEAN NOT NULL DEFAULT 0
    );
";

/// Applied to every connection the pool hands out.
#[derive(Debug)]
struct ConnectionOptions {
    busy_timeout_ms: u32,
}

impl CustomizeConnection<SqliteConnection, r2d2::Error> for ConnectionOptions {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), r2d2::Error> {
        conn.batch_execute(&format!(
            "PRAGMA foreign_keys = ON; PRAGMA busy_timeout = {};",
            self.busy_timeout_ms
        ))
        .map_err(r2d2::Error::QueryError)
    }
}

pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open (or create) the SQLite file and make sure the schema exists
    pub fn new(database_path: &str, pool_size: u32) -> Result<Self, DomainError> {
        let manager = ConnectionManager::<SqliteConnection>::new(database_path);
        let pool = r2d2::Pool::builder()
            .max_size(pool_size)
            .connection_customizer(Box::new(ConnectionOptions {
                busy_timeout_ms: BUSY_TIMEOUT_MS,
            }))
            .build(manager)
            .map_err(|e| DomainError::RepositoryError(e.to_string()))?;

        let database = Database { pool };
        database.initialize()?;
        info!(database_path, pool_size, "Database ready");
        Ok(database)
    }

    fn initialize(&self) -> Result<(), DomainError> {
        let mut conn = self
            .pool
            .get()
            .map_err(|e| DomainError::RepositoryError(e.to_string()))?;

        conn.batch_execute(CREATE_TABLES)
            .map_err(|e| DomainError::RepositoryError(e.to_string()))
    }

    pub fn get_pool(&self) -> &SqlitePool {
        &self.pool
    }
}
