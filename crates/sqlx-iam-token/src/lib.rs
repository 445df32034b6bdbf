//! # sqlx-iam-token
//!
//! Short-lived database credentials for connection pools.
//!
//! ## Core Types
//!
//! - **[`Endpoint`]**: host and port parsed from a `scheme://host:port/...` URL
//! - **[`CredentialProvider`]**: interface to the identity service that issues tokens
//! - **[`TokenFetcher`]**: resolves an endpoint and requests a token for it
//! - **[`AuthToken`]**: the issued credential, redacted in logs
//! - **[`Error`]**: error type for endpoint and token operations
//!
//! ## Usage
//!
//! ```no_run
//! use std::sync::Arc;
//! use sqlx_iam_token::{CredentialProvider, TokenFetcher, TokenFetcherConfig};
//!
//! # async fn example(provider: Arc<dyn CredentialProvider>) -> sqlx_iam_token::Result<()> {
//! let fetcher = TokenFetcher::new(provider, TokenFetcherConfig::default());
//! let token = fetcher
//!     .fetch("postgres://writer.cluster.example.com:5432/app", "app_user")
//!     .await?;
//!
//! if token.is_empty() {
//!     // provider failed and the fetcher is configured to continue
//! }
//! # Ok(())
//! # }
//! ```
//!
//! Tokens are fetched once per pool build. Tokens for pools that are already
//! open are not refreshed.
mod endpoint;
mod error;
mod fetcher;
mod provider;
mod token;

pub use endpoint::Endpoint;
pub use error::{Error, ProviderError};
pub use fetcher::{TokenFailurePolicy, TokenFetcher, TokenFetcherConfig};
pub use provider::{CredentialProvider, TokenRequest};
pub use token::AuthToken;

/// A type alias for Results with our custom Error type
pub type Result<T> = std::result::Result<T, Error>;
