//! Token fetching for pool configuration

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::Result;
use crate::endpoint::Endpoint;
use crate::error::Error;
use crate::provider::{CredentialProvider, TokenRequest};
use crate::token::AuthToken;

/// What [`TokenFetcher::fetch`] does when the credential provider fails
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenFailurePolicy {
   /// Log a warning and return an empty token. The pool is then built with
   /// no password, which a server requiring authentication will reject.
   #[default]
   EmptyToken,

   /// Return the provider error to the caller, aborting startup.
   Fail,
}

/// Configuration for [`TokenFetcher`]
///
/// # Examples
///
/// ```
/// use sqlx_iam_token::{TokenFailurePolicy, TokenFetcherConfig};
///
/// let config = TokenFetcherConfig {
///     region: "eu-west-1".into(),
///     ..Default::default()
/// };
/// assert_eq!(config.on_failure, TokenFailurePolicy::EmptyToken);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenFetcherConfig {
   /// Region passed with every token request. Fixed per deployment.
   ///
   /// Default: "ap-northeast-2"
   pub region: String,

   /// Behavior when the provider cannot issue a token
   ///
   /// Default: [`TokenFailurePolicy::EmptyToken`]
   pub on_failure: TokenFailurePolicy,
}

impl Default for TokenFetcherConfig {
   fn default() -> Self {
      Self {
         region: "ap-northeast-2".to_string(),
         on_failure: TokenFailurePolicy::default(),
      }
   }
}

/// Obtains an authentication token for a connection URL and username.
///
/// Each call parses the endpoint, makes exactly one provider request and
/// never retries.
#[derive(Clone)]
pub struct TokenFetcher {
   provider: Arc<dyn CredentialProvider>,
   config: TokenFetcherConfig,
}

impl TokenFetcher {
   pub fn new(provider: Arc<dyn CredentialProvider>, config: TokenFetcherConfig) -> Self {
      Self { provider, config }
   }

   pub fn config(&self) -> &TokenFetcherConfig {
      &self.config
   }

   /// Fetch a token for `username` at the endpoint named by `endpoint_url`.
   ///
   /// Endpoint parse errors are always returned. Provider errors follow
   /// [`TokenFetcherConfig::on_failure`].
   ///
   /// # Examples
   ///
   /// ```
   /// use std::sync::Arc;
   /// use sqlx_iam_token::{ProviderError, TokenFetcher, TokenFetcherConfig, TokenRequest};
   ///
   /// # async fn example() -> sqlx_iam_token::Result<()> {
   /// let provider = Arc::new(|req: &TokenRequest| {
   ///     Ok::<_, ProviderError>(format!("{}:{}", req.host, req.port))
   /// });
   /// let fetcher = TokenFetcher::new(provider, TokenFetcherConfig::default());
   ///
   /// let token = fetcher
   ///     .fetch("postgres://db.example.com:5432/app", "app_user")
   ///     .await?;
   /// assert_eq!(token.expose(), "db.example.com:5432");
   /// # Ok(())
   /// # }
   /// ```
   pub async fn fetch(&self, endpoint_url: &str, username: &str) -> Result<AuthToken> {
      let endpoint = Endpoint::parse(endpoint_url)?;
      info!(
         host = %endpoint.host,
         port = endpoint.port,
         username,
         region = %self.config.region,
         "Requesting database auth token"
      );

      let request = TokenRequest {
         host: endpoint.host,
         port: endpoint.port,
         username: username.to_string(),
         region: self.config.region.clone(),
      };

      match self.provider.generate_token(&request).await {
         Ok(token) => Ok(AuthToken::new(token)),
         Err(e) => match self.config.on_failure {
            TokenFailurePolicy::EmptyToken => {
               warn!(
                  host = %request.host,
                  port = request.port,
                  username,
                  error = %e,
                  "Auth token request failed; continuing with an empty password"
               );
               Ok(AuthToken::empty())
            }
            TokenFailurePolicy::Fail => Err(Error::Provider(e)),
         },
      }
   }
}

impl fmt::Debug for TokenFetcher {
   fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
      f.debug_struct("TokenFetcher")
         .field("config", &self.config)
         .finish_non_exhaustive()
   }
}
