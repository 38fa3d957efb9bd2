use diesel::connection::SimpleConnection;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool, PooledConnection};
use diesel::SqliteConnection;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use tracing::info;

pub mod error;
pub mod models;
pub mod schema;
pub mod seed;
pub mod serializer;
pub mod service;
pub mod validation;

#[cfg(test)]
pub(crate) mod test_support;

pub use error::CatalogError;
pub use service::CatalogService;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("./migrations");

pub type DbPool = Pool<ConnectionManager<SqliteConnection>>;
pub type DbConnection = PooledConnection<ConnectionManager<SqliteConnection>>;

#[derive(Debug)]
struct SqlitePragmas;

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for SqlitePragmas {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), diesel::r2d2::Error> {
        conn.batch_execute("PRAGMA foreign_keys = ON; PRAGMA busy_timeout = 5000;")
            .map_err(diesel::r2d2::Error::QueryError)
    }
}

/// Builds the connection pool. With `:memory:` every connection is its own
/// database, so callers wanting shared state use `max_size` 1.
pub fn build_pool(database_url: &str, max_size: u32) -> Result<DbPool, CatalogError> {
    let manager = ConnectionManager::<SqliteConnection>::new(database_url);
    let pool = Pool::builder()
        .max_size(max_size)
        .connection_customizer(Box::new(SqlitePragmas))
        .build(manager)?;
    Ok(pool)
}

pub fn run_migrations(conn: &mut SqliteConnection) -> Result<(), CatalogError> {
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| CatalogError::Migration(e.to_string()))?;
    info!(count = applied.len(), "migrations applied");
    Ok(())
}
