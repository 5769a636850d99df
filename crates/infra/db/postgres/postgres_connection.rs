use std::time::Duration;

use anyhow::Result;
use diesel::{
    Connection, PgConnection,
    connection::CacheSize,
    r2d2::{ConnectionManager, CustomizeConnection, Error as R2d2Error, Pool},
};
use tracing::debug;

/// Transaction-mode poolers (pgbouncer, Supabase pooler) cannot share prepared statements
/// between clients.
#[derive(Debug, Default)]
struct DisablePreparedStatements;

impl CustomizeConnection<PgConnection, R2d2Error> for DisablePreparedStatements {
    fn on_acquire(&self, conn: &mut PgConnection) -> std::result::Result<(), R2d2Error> {
        conn.set_prepared_statement_cache_size(CacheSize::Disabled);
        Ok(())
    }
}

pub type PgPoolSquad = Pool<ConnectionManager<PgConnection>>;

#[derive(Debug, Clone)]
pub struct PoolOptions {
    pub max_size: u32,
    pub connection_timeout_secs: u64,
    pub disable_prepared_statements: bool,
}

impl Default for PoolOptions {
    fn default() -> Self {
        Self {
            max_size: 10,
            connection_timeout_secs: 30,
            disable_prepared_statements: true,
        }
    }
}

pub fn establish_connection(database_url: &str, options: &PoolOptions) -> Result<PgPoolSquad> {
    let manager = ConnectionManager::<PgConnection>::new(database_url);
    let mut builder = Pool::builder()
        .max_size(options.max_size)
        .connection_timeout(Duration::from_secs(options.connection_timeout_secs));

    if options.disable_prepared_statements {
        builder = builder.connection_customizer(Box::new(DisablePreparedStatements));
    }

    let pool = builder.build(manager)?;
    debug!(
        max_size = options.max_size,
        prepared_statements = !options.disable_prepared_statements,
        "postgres: pool built"
    );
    Ok(pool)
}
