//! Interface to the external identity service that issues database tokens

use async_trait::async_trait;

use crate::error::ProviderError;

/// Parameters of a single token request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenRequest {
   pub host: String,
   pub port: u16,
   pub username: String,
   pub region: String,
}

/// Issues short-lived database authentication tokens.
///
/// Construct the provider once at startup and share it as
/// `Arc<dyn CredentialProvider>`; implementations are expected to be
/// stateless or internally synchronized.
///
/// Plain closures implement this trait, which is convenient for static
/// credentials and tests:
///
/// ```
/// use std::sync::Arc;
/// use sqlx_iam_token::{CredentialProvider, ProviderError, TokenRequest};
///
/// let provider: Arc<dyn CredentialProvider> =
///    Arc::new(|req: &TokenRequest| Ok::<_, ProviderError>(format!("token-for-{}", req.username)));
/// ```
#[async_trait]
pub trait CredentialProvider: Send + Sync {
   async fn generate_token(&self, request: &TokenRequest) -> Result<String, ProviderError>;
}

#[async_trait]
impl<F> CredentialProvider for F
where
   F: Fn(&TokenRequest) -> Result<String, ProviderError> + Send + Sync,
{
   async fn generate_token(&self, request: &TokenRequest) -> Result<String, ProviderError> {
      self(request)
   }
}
