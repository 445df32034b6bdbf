//! Deferred connection acquisition

use std::fmt;

use sqlx::Database;
use sqlx_rw_conn_mgr::{PoolRole, RoutedConnection};

use crate::Result;
use crate::context::TransactionStatus;
use crate::routing::RoutingDataSource;

/// Connection handle for one logical operation, acquired on first use.
///
/// Creating the handle neither reads the transaction state nor touches a
/// pool. The first call to [`connection`](Self::connection) routes the
/// request with the state as it is at that moment and acquires a physical
/// connection; later calls reuse it, so one operation never holds two
/// connections. The connection goes back to its pool when the handle is
/// dropped or [`release`](Self::release)d.
///
/// # Example
///
/// ```no_run
/// use sqlx::Postgres;
/// use sqlx_routing_datasource::{PoolRole, RoutingDataSource, TransactionScope};
///
/// # async fn example(ds: RoutingDataSource<Postgres>) -> sqlx_routing_datasource::Result<()> {
/// let scope = TransactionScope::new();
/// scope.begin("reports.daily")?;
///
/// let mut conn = ds.lazy(scope.clone());
/// // Flag finalized after begin, before the first query
/// scope.set_read_only(true)?;
///
/// sqlx::query("SELECT count(*) FROM orders")
///     .fetch_one(conn.connection().await?)
///     .await?;
/// assert_eq!(conn.role(), Some(PoolRole::Reader));
/// # Ok(())
/// # }
/// ```
pub struct LazyConnection<DB: Database, S> {
   source: RoutingDataSource<DB>,
   status: S,
   target: Option<RoutedConnection<DB>>,
}

impl<DB: Database, S: TransactionStatus> LazyConnection<DB, S> {
   pub(crate) fn new(source: RoutingDataSource<DB>, status: S) -> Self {
      Self {
         source,
         status,
         target: None,
      }
   }

   /// The physical connection, acquired from the routed pool on first call
   pub async fn connection(&mut self) -> Result<&mut DB::Connection> {
      let conn = match self.target.take() {
         Some(conn) => conn,
         None => self.source.acquire(&self.status).await?,
      };

      let conn = self.target.insert(conn);
      Ok(&mut **conn)
   }

   /// The pool the connection was taken from, or `None` before first use
   pub fn role(&self) -> Option<PoolRole> {
      self.target.as_ref().map(RoutedConnection::role)
   }

   pub fn is_acquired(&self) -> bool {
      self.target.is_some()
   }

   /// Return the physical connection, if any, to its pool.
   ///
   /// Returns the role it was routed to.
   pub fn release(mut self) -> Option<PoolRole> {
      let conn = self.target.take()?;
      let role = conn.role();
      self.source.release(conn);
      Some(role)
   }
}

impl<DB: Database, S> fmt::Debug for LazyConnection<DB, S> {
   fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
      f.debug_struct("LazyConnection")
         .field("target", &self.target)
         .finish_non_exhaustive()
   }
}
