//! Error types for sqlx-rw-conn-mgr

use thiserror::Error;

use crate::role::PoolRole;

/// Errors that may occur when building or using the writer and reader pools
#[derive(Error, Debug)]
pub enum Error {
   /// The pool's connection URL could not be parsed
   #[error("invalid {role} connection url: {source}")]
   InvalidUrl {
      role: PoolRole,
      #[source]
      source: url::ParseError,
   },

   /// The pool could not be created or its first connection could not be
   /// established. Fatal at startup.
   #[error("failed to build {role} pool: {source}")]
   PoolConstruction {
      role: PoolRole,
      #[source]
      source: sqlx::Error,
   },

   /// The pool has been closed and cannot hand out connections
   #[error("{0} pool has been closed")]
   PoolClosed(PoolRole),

   /// Error from the sqlx library. Standard sqlx errors are converted to this variant
   #[error("Sqlx error: {0}")]
   Sqlx(#[from] sqlx::Error),
}

impl Error {
   /// Machine-readable error code.
   pub fn error_code(&self) -> &'static str {
      match self {
         Error::InvalidUrl { .. } => "INVALID_URL",
         Error::PoolConstruction { .. } => "POOL_CONSTRUCTION_ERROR",
         Error::PoolClosed(_) => "POOL_CLOSED",
         Error::Sqlx(_) => "SQLX_ERROR",
      }
   }
}
