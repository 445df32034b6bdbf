//! Eager construction of a single connection pool

use sqlx::pool::PoolOptions;
use sqlx::{ConnectOptions, Connection, Database, Pool};
use tracing::info;

use crate::Result;
use crate::config::PoolConfig;
use crate::error::Error;
use crate::role::PoolRole;

/// Build a connection pool from `config`.
///
/// The pool opens and checks one connection before returning, so an
/// unreachable server or rejected credentials fail here rather than on the
/// first request. Every failure is reported as [`Error::PoolConstruction`]
/// (or [`Error::InvalidUrl`]) tagged with `role`.
///
/// # Examples
///
/// ```no_run
/// use sqlx::Postgres;
/// use sqlx_rw_conn_mgr::{PoolConfig, PoolRole, build_pool};
///
/// # async fn example() -> sqlx_rw_conn_mgr::Result<()> {
/// let config = PoolConfig::new("postgres://writer.example.com:5432/app", "app_user");
/// let pool = build_pool::<Postgres>(PoolRole::Writer, config).await?;
/// # Ok(())
/// # }
/// ```
pub async fn build_pool<DB: Database>(role: PoolRole, config: PoolConfig) -> Result<Pool<DB>> {
   let url = config
      .connect_url()
      .map_err(|source| Error::InvalidUrl { role, source })?;

   let connect_options = <<DB::Connection as Connection>::Options as ConnectOptions>::from_url(&url)
      .map_err(|source| Error::PoolConstruction { role, source })?;

   let tuning = &config.tuning;
   info!(
      %role,
      url = %config.redacted_url(),
      username = %config.username,
      password_set = url.password().is_some(),
      min_connections = tuning.min_connections,
      max_connections = tuning.max_connections,
      "Building connection pool"
   );

   PoolOptions::<DB>::new()
      .min_connections(tuning.min_connections)
      .max_connections(tuning.max_connections)
      .acquire_timeout(tuning.acquire_timeout())
      .idle_timeout(Some(tuning.idle_timeout()))
      .max_lifetime(Some(tuning.max_lifetime()))
      .connect_with(connect_options)
      .await
      .map_err(|source| Error::PoolConstruction { role, source })
}
