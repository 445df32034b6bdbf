//! Writer and reader pools held as a fixed pair

use sqlx::{Database, Pool};
use tracing::{debug, info};

use crate::Result;
use crate::builder::build_pool;
use crate::config::PoolConfig;
use crate::error::Error;
use crate::guard::RoutedConnection;
use crate::role::PoolRole;

/// The writer pool and the reader pool of one database.
///
/// A registry always holds both pools: the only ways to create one take a
/// built writer pool and a built reader pool. Lookups that cannot name a
/// role fall back to the writer pool.
///
/// # Example
///
/// ```no_run
/// use sqlx::Postgres;
/// use sqlx_rw_conn_mgr::{PoolConfig, PoolRegistry, PoolRole};
///
/// # async fn example() -> Result<(), sqlx_rw_conn_mgr::Error> {
/// let registry = PoolRegistry::<Postgres>::connect(
///     PoolConfig::new("postgres://writer.example.com:5432/app", "app"),
///     PoolConfig::new("postgres://reader.example.com:5432/app", "app"),
/// )
/// .await?;
///
/// let rows = sqlx::query("SELECT 1")
///     .fetch_all(registry.get(PoolRole::Reader))
///     .await?;
///
/// registry.close().await;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct PoolRegistry<DB: Database> {
   /// Pool of connections to the primary instance
   writer: Pool<DB>,

   /// Pool of connections to the read-only replica
   reader: Pool<DB>,
}

// Manual impl: a derive would require `DB: Clone`
impl<DB: Database> Clone for PoolRegistry<DB> {
   fn clone(&self) -> Self {
      Self {
         writer: self.writer.clone(),
         reader: self.reader.clone(),
      }
   }
}

impl<DB: Database> PoolRegistry<DB> {
   /// Assemble a registry from two already built pools
   pub fn new(writer: Pool<DB>, reader: Pool<DB>) -> Self {
      Self { writer, reader }
   }

   /// Build the writer pool, then the reader pool, and assemble the registry.
   ///
   /// Construction is sequential. If the reader pool fails, the writer pool
   /// is closed before the error is returned, so no half-built registry or
   /// orphaned pool survives a failed startup.
   pub async fn connect(writer: PoolConfig, reader: PoolConfig) -> Result<Self> {
      let writer = build_pool::<DB>(PoolRole::Writer, writer).await?;

      let reader = match build_pool::<DB>(PoolRole::Reader, reader).await {
         Ok(pool) => pool,
         Err(e) => {
            writer.close().await;
            return Err(e);
         }
      };

      info!("Writer and reader pools ready");
      Ok(Self::new(writer, reader))
   }

   /// The role used when no role can be determined
   pub fn default_role() -> PoolRole {
      PoolRole::Writer
   }

   /// Get a reference to the pool for `role`
   pub fn get(&self, role: PoolRole) -> &Pool<DB> {
      match role {
         PoolRole::Writer => &self.writer,
         PoolRole::Reader => &self.reader,
      }
   }

   /// Get the pool for `role`, or the default (writer) pool when absent
   pub fn resolve(&self, role: Option<PoolRole>) -> &Pool<DB> {
      self.get(role.unwrap_or_else(Self::default_role))
   }

   /// Get the pool named `name`; unknown names resolve to the default pool
   pub fn resolve_named(&self, name: &str) -> &Pool<DB> {
      match name.parse::<PoolRole>() {
         Ok(role) => self.get(role),
         Err(e) => {
            debug!("{}; using {} pool", e, Self::default_role());
            self.get(Self::default_role())
         }
      }
   }

   /// Acquire a connection from the pool for `role`
   ///
   /// Waits up to the pool's acquire timeout for a free connection.
   pub async fn acquire(&self, role: PoolRole) -> Result<RoutedConnection<DB>> {
      let pool = self.get(role);
      if pool.is_closed() {
         return Err(Error::PoolClosed(role));
      }

      let conn = pool.acquire().await.map_err(|e| match e {
         sqlx::Error::PoolClosed => Error::PoolClosed(role),
         other => Error::Sqlx(other),
      })?;

      Ok(RoutedConnection::new(conn, role))
   }

   pub fn is_closed(&self, role: PoolRole) -> bool {
      self.get(role).is_closed()
   }

   /// Close both pools
   ///
   /// Waits for checked-out connections to be returned before resolving.
   pub async fn close(&self) {
      tokio::join!(self.writer.close(), self.reader.close());
      debug!("Writer and reader pools closed");
   }
}
