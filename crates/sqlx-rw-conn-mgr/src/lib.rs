//! # sqlx-rw-conn-mgr
//!
//! Builds the two connection pools of a primary/replica database pair and
//! holds them side by side.
//!
//! ## Core Types
//!
//! - **[`PoolRegistry`]**: the writer pool and the reader pool, always both
//! - **[`PoolRole`]**: names one of the two pools
//! - **[`PoolConfig`]** / **[`PoolTuning`]**: connection parameters and pool sizing
//! - **[`RoutedConnection`]**: RAII guard for a connection, tagged with its pool
//! - **[`Error`]**: Error type for pool operations
//!
//! ## Architecture
//!
//! - **Eager construction**: each pool opens a first connection when built, so bad
//!   credentials or unreachable hosts stop startup
//! - **Fixed pair**: exactly one writer and one reader pool; no runtime registration
//! - **Independent pools**: the two pools share no state, closing one leaves the other usable
//! - **Generic over the driver**: any `sqlx::Database` works, Postgres in production
//!
//! ## Usage
//!
//! ```no_run
//! use sqlx::Postgres;
//! use sqlx_rw_conn_mgr::{PoolConfig, PoolRegistry, PoolRole};
//!
//! #[tokio::main]
//! async fn main() -> sqlx_rw_conn_mgr::Result<()> {
//!     let writer = PoolConfig::new("postgres://writer.example.com:5432/app", "app")
//!         .with_password("secret");
//!     let reader = PoolConfig::new("postgres://reader.example.com:5432/app", "app")
//!         .with_password("secret");
//!
//!     let registry = PoolRegistry::<Postgres>::connect(writer, reader).await?;
//!
//!     let mut conn = registry.acquire(PoolRole::Writer).await?;
//!     sqlx::query("INSERT INTO users (name) VALUES ($1)")
//!         .bind("Alice")
//!         .execute(&mut *conn)
//!         .await?;
//!     drop(conn);
//!
//!     registry.close().await;
//!     Ok(())
//! }
//! ```
mod builder;
mod config;
mod error;
mod guard;
mod registry;
mod role;

// Re-export public types
pub use builder::build_pool;
pub use config::{PoolConfig, PoolTuning};
pub use error::Error;
pub use guard::RoutedConnection;
pub use registry::PoolRegistry;
pub use role::{PoolRole, UnknownRole};

/// A type alias for Results with our custom Error type
pub type Result<T> = std::result::Result<T, Error>;
