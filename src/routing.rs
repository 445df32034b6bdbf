//! Per-request selection of the writer or reader pool

use std::sync::Arc;

use sqlx::Database;
use sqlx_rw_conn_mgr::{PoolRegistry, PoolRole, RoutedConnection};
use tracing::debug;

use crate::Result;
use crate::context::{TransactionContext, TransactionStatus};
use crate::lazy::LazyConnection;

/// Pick the pool for a request running in `ctx`.
///
/// Requests outside a transaction go to the reader, as do read-only
/// transactions. Only an active read-write transaction goes to the writer.
///
/// ```
/// use sqlx_routing_datasource::{PoolRole, TransactionContext, determine_role};
///
/// assert_eq!(determine_role(&TransactionContext::none()), PoolRole::Reader);
/// assert_eq!(determine_role(&TransactionContext::read_only("report")), PoolRole::Reader);
/// assert_eq!(determine_role(&TransactionContext::read_write("checkout")), PoolRole::Writer);
/// ```
pub fn determine_role(ctx: &TransactionContext) -> PoolRole {
   if !ctx.active {
      return PoolRole::Reader;
   }

   if ctx.read_only {
      PoolRole::Reader
   } else {
      PoolRole::Writer
   }
}

/// Connection source that hides the writer/reader split from data-access code.
///
/// Every [`acquire`](Self::acquire) reads the transaction state afresh and
/// takes a connection from the matching pool. Cloning is cheap and clones
/// share the same pools.
///
/// # Example
///
/// ```no_run
/// use sqlx::Postgres;
/// use sqlx_routing_datasource::{RoutingDataSource, TransactionScope};
///
/// # async fn example(ds: RoutingDataSource<Postgres>) -> sqlx_routing_datasource::Result<()> {
/// let scope = TransactionScope::new();
///
/// // No transaction: served by the reader pool
/// let mut conn = ds.acquire(&scope).await?;
/// sqlx::query("SELECT 1").execute(&mut *conn).await?;
/// ds.release(conn);
///
/// // Read-write transaction: served by the writer pool
/// scope.begin("users.create")?;
/// let mut conn = ds.acquire(&scope).await?;
/// sqlx::query("INSERT INTO users (name) VALUES ($1)")
///     .bind("Alice")
///     .execute(&mut *conn)
///     .await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct RoutingDataSource<DB: Database> {
   registry: Arc<PoolRegistry<DB>>,
}

// Manual impl: a derive would require `DB: Clone`
impl<DB: Database> Clone for RoutingDataSource<DB> {
   fn clone(&self) -> Self {
      Self {
         registry: Arc::clone(&self.registry),
      }
   }
}

impl<DB: Database> RoutingDataSource<DB> {
   pub fn new(registry: PoolRegistry<DB>) -> Self {
      Self {
         registry: Arc::new(registry),
      }
   }

   pub fn registry(&self) -> &PoolRegistry<DB> {
      &self.registry
   }

   /// The pool a connection requested now under `status` would come from.
   ///
   /// Fails with [`Error::ContextQuery`](crate::Error::ContextQuery) when the
   /// transaction state cannot be read; there is no fallback role.
   pub fn current_role<S>(&self, status: &S) -> Result<PoolRole>
   where
      S: TransactionStatus + ?Sized,
   {
      let ctx = status.snapshot()?;
      let role = determine_role(&ctx);
      debug!(
         active = ctx.active,
         read_only = ctx.read_only,
         transaction = ctx.name.as_deref().unwrap_or(""),
         %role,
         "Routing connection request"
      );
      Ok(role)
   }

   /// Acquire a connection from the pool matching the current transaction state
   pub async fn acquire<S>(&self, status: &S) -> Result<RoutedConnection<DB>>
   where
      S: TransactionStatus + ?Sized,
   {
      let role = self.current_role(status)?;
      Ok(self.registry.acquire(role).await?)
   }

   /// Return a connection to the pool it came from
   pub fn release(&self, conn: RoutedConnection<DB>) {
      conn.release();
   }

   /// A connection handle that defers routing and acquisition until first use.
   ///
   /// Use this when the transaction's flags may still change after the
   /// handle is created, e.g. a read-only flag set after the transaction
   /// begins but before its first query.
   pub fn lazy<S: TransactionStatus>(&self, status: S) -> LazyConnection<DB, S> {
      LazyConnection::new(self.clone(), status)
   }

   /// Close both pools
   pub async fn close(&self) {
      self.registry.close().await;
   }
}
