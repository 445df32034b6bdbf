//! # sqlx-routing-datasource
//!
//! A connection source that sends each request to the writer (primary) pool
//! or the reader (replica) pool depending on the transaction it runs in, with
//! pools authenticated by short-lived tokens fetched at startup.
//!
//! ## Core Types
//!
//! - **[`RoutingDataSource`]**: the single connection source handed to data-access code
//! - **[`LazyConnection`]**: defers routing and acquisition until the first query
//! - **[`TransactionStatus`]** / **[`TransactionScope`]** / **[`TransactionContext`]**:
//!   the transaction state consulted for every request
//! - **[`CredentialSource`]** / **[`DataSourceConfig`]**: startup configuration
//! - **[`Error`]**: error type for all of the above
//!
//! ## Routing
//!
//! | Transaction state            | Pool   |
//! |------------------------------|--------|
//! | none                         | reader |
//! | active, read-only            | reader |
//! | active, read-write           | writer |
//!
//! The decision is made when a physical connection is needed, not when a
//! transaction begins, and is recomputed on every request.
//!
//! ## Usage
//!
//! ```no_run
//! use std::sync::Arc;
//! use sqlx::Postgres;
//! use sqlx_routing_datasource::{
//!     CredentialProvider, CredentialSource, DataSourceConfig, RoutingDataSource, TransactionScope,
//! };
//!
//! # async fn example(
//! #     config: DataSourceConfig,
//! #     provider: Arc<dyn CredentialProvider>,
//! # ) -> sqlx_routing_datasource::Result<()> {
//! let credentials =
//!     CredentialSource::for_profile(config.profile, Some(provider), config.auth.clone())?;
//! let ds = RoutingDataSource::<Postgres>::connect(config, &credentials).await?;
//!
//! let scope = TransactionScope::new();
//! scope.begin("orders.place")?;
//!
//! let mut conn = ds.lazy(scope.clone());
//! sqlx::query("INSERT INTO orders (sku) VALUES ($1)")
//!     .bind("A-100")
//!     .execute(conn.connection().await?)
//!     .await?;
//! conn.release();
//! scope.end()?;
//!
//! ds.close().await;
//! # Ok(())
//! # }
//! ```
//!
//! ## Known limitations
//!
//! Tokens are fetched once, when the pools are built. Connections opened by a
//! pool after its token has expired will be rejected by the server.
mod context;
mod datasource;
mod error;
mod lazy;
mod routing;

pub use context::{TransactionContext, TransactionScope, TransactionStatus};
pub use datasource::{CredentialSource, DataSourceConfig, Profile};
pub use error::{Error, Result};
pub use lazy::LazyConnection;
pub use routing::{RoutingDataSource, determine_role};

pub use sqlx_iam_token::{
   AuthToken, CredentialProvider, Endpoint, ProviderError, TokenFailurePolicy, TokenFetcher,
   TokenFetcherConfig, TokenRequest,
};
pub use sqlx_rw_conn_mgr::{PoolConfig, PoolRegistry, PoolRole, PoolTuning, RoutedConnection};
