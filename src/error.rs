use sqlx_rw_conn_mgr::PoolRole;

/// Result type alias for routing data source operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the routing data source.
#[derive(Debug, thiserror::Error)]
pub enum Error {
   /// Error from SQLx operations.
   ///
   /// Not produced by the data source itself; it lets queries run on routed
   /// connections use `?` in functions returning this crate's [`Result`].
   #[error(transparent)]
   Sqlx(#[from] sqlx::Error),

   /// Error from the connection manager (pool construction, closed pools).
   #[error(transparent)]
   ConnectionManager(#[from] sqlx_rw_conn_mgr::Error),

   /// Error from endpoint parsing or auth token fetching.
   #[error(transparent)]
   Token(#[from] sqlx_iam_token::Error),

   /// The transaction context could not be read when routing a request.
   #[error("transaction context unavailable: {0}")]
   ContextQuery(String),

   /// The deployed profile needs a credential provider and none was supplied.
   #[error("deployed profile requires a credential provider")]
   MissingCredentialProvider,
}

impl Error {
   /// Extract a structured error code from the error type.
   pub fn error_code(&self) -> String {
      match self {
         Error::Sqlx(e) => {
            if let Some(code) = e.as_database_error().and_then(|db_err| db_err.code()) {
               return format!("DATABASE_{}", code);
            }
            "SQLX_ERROR".to_string()
         }
         Error::ConnectionManager(e) => e.error_code().to_string(),
         Error::Token(e) => e.error_code().to_string(),
         Error::ContextQuery(_) => "CONTEXT_QUERY_ERROR".to_string(),
         Error::MissingCredentialProvider => "MISSING_CREDENTIAL_PROVIDER".to_string(),
      }
   }

   /// The pool involved, when the error concerns one pool.
   pub fn pool_role(&self) -> Option<PoolRole> {
      match self {
         Error::ConnectionManager(
            sqlx_rw_conn_mgr::Error::PoolClosed(role)
            | sqlx_rw_conn_mgr::Error::PoolConstruction { role, .. }
            | sqlx_rw_conn_mgr::Error::InvalidUrl { role, .. },
         ) => Some(*role),
         _ => None,
      }
   }
}
