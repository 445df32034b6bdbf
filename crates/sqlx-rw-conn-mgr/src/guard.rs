//! RoutedConnection for connections taken from the writer or reader pool

use std::fmt;
use std::ops::{Deref, DerefMut};

use sqlx::Database;
use sqlx::pool::PoolConnection;

use crate::role::PoolRole;

/// RAII guard for a connection taken from one of the two pools
///
/// This guard wraps a pool connection and returns it to the pool it came
/// from on drop. It remembers which pool that was, so callers and tests can
/// see where a request was routed.
///
/// The guard derefs to the driver connection allowing direct use with sqlx queries.
///
/// # Example
///
/// ```no_run
/// use sqlx::Sqlite;
/// use sqlx_rw_conn_mgr::{PoolRegistry, PoolRole};
///
/// # async fn example(registry: PoolRegistry<Sqlite>) -> Result<(), sqlx_rw_conn_mgr::Error> {
/// let mut conn = registry.acquire(PoolRole::Reader).await?;
/// assert_eq!(conn.role(), PoolRole::Reader);
///
/// sqlx::query("SELECT 1").execute(&mut *conn).await?;
/// // Connection is automatically returned when dropped
/// # Ok(())
/// # }
/// ```
pub struct RoutedConnection<DB: Database> {
   conn: PoolConnection<DB>,
   role: PoolRole,
}

impl<DB: Database> RoutedConnection<DB> {
   pub(crate) fn new(conn: PoolConnection<DB>, role: PoolRole) -> Self {
      Self { conn, role }
   }

   /// The pool this connection was taken from
   pub fn role(&self) -> PoolRole {
      self.role
   }

   /// Return the connection to its pool now instead of at end of scope
   pub fn release(self) {
      drop(self.conn);
   }
}

impl<DB: Database> Deref for RoutedConnection<DB> {
   type Target = DB::Connection;

   fn deref(&self) -> &Self::Target {
      &self.conn
   }
}

impl<DB: Database> DerefMut for RoutedConnection<DB> {
   fn deref_mut(&mut self) -> &mut Self::Target {
      &mut self.conn
   }
}

impl<DB: Database> fmt::Debug for RoutedConnection<DB> {
   fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
      f.debug_struct("RoutedConnection")
         .field("role", &self.role)
         .finish_non_exhaustive()
   }
}
