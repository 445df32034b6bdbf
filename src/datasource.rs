//! Startup: credentials, pool construction and assembly of the data source

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use sqlx::Database;
use sqlx_iam_token::{CredentialProvider, TokenFetcher, TokenFetcherConfig};
use sqlx_rw_conn_mgr::{PoolConfig, PoolRegistry, PoolRole};
use tracing::{info, warn};

use crate::routing::RoutingDataSource;
use crate::{Error, Result};

/// Where pool passwords come from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Profile {
   /// Static passwords from [`PoolConfig::password`]
   Local,
   /// Short-lived tokens from the credential provider
   #[default]
   Deployed,
}

/// Configuration of both pools and of token fetching
///
/// # Examples
///
/// ```
/// use sqlx_routing_datasource::{DataSourceConfig, Profile};
///
/// let config: DataSourceConfig = serde_json::from_str(r#"{
///     "writer": { "url": "postgres://writer.example.com:5432/app", "username": "app" },
///     "reader": { "url": "postgres://reader.example.com:5432/app", "username": "app" }
/// }"#).unwrap();
///
/// assert_eq!(config.profile, Profile::Deployed);
/// assert_eq!(config.auth.region, "ap-northeast-2");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataSourceConfig {
   pub writer: PoolConfig,
   pub reader: PoolConfig,

   #[serde(default)]
   pub profile: Profile,

   /// Only used by the deployed profile
   #[serde(default)]
   pub auth: TokenFetcherConfig,
}

/// How each pool's password is obtained before the pool is built
#[derive(Debug, Clone)]
pub enum CredentialSource {
   /// Use the password already in the pool configuration, or in its URL
   Static,
   /// Replace the password with a token fetched for the pool's endpoint.
   /// An empty token also drops any password written into the URL.
   Token(TokenFetcher),
}

impl CredentialSource {
   /// Select the credential source for `profile`.
   ///
   /// The deployed profile needs `provider`; the local profile ignores it.
   pub fn for_profile(
      profile: Profile,
      provider: Option<Arc<dyn CredentialProvider>>,
      config: TokenFetcherConfig,
   ) -> Result<Self> {
      match profile {
         Profile::Local => Ok(CredentialSource::Static),
         Profile::Deployed => {
            let provider = provider.ok_or(Error::MissingCredentialProvider)?;
            Ok(CredentialSource::Token(TokenFetcher::new(provider, config)))
         }
      }
   }

   /// Return `config` with the password this source provides.
   pub async fn apply(&self, role: PoolRole, config: PoolConfig) -> Result<PoolConfig> {
      info!(
         %role,
         url = %config.redacted_url(),
         username = %config.username,
         "Preparing pool credentials"
      );

      match self {
         CredentialSource::Static => Ok(config),
         CredentialSource::Token(fetcher) => {
            let token = fetcher.fetch(&config.url, &config.username).await?;
            if token.is_empty() {
               warn!(%role, "Building pool without a password");
            }
            Ok(config.with_password(token.into_inner()))
         }
      }
   }
}

impl<DB: Database> RoutingDataSource<DB> {
   /// Build the writer and reader pools and the routing data source over them.
   ///
   /// Credentials for both pools are obtained first, then the pools are
   /// built one after the other, writer first. Any failure aborts startup.
   ///
   /// # Example
   ///
   /// ```no_run
   /// use std::sync::Arc;
   /// use sqlx::Postgres;
   /// use sqlx_routing_datasource::{
   ///     CredentialProvider, CredentialSource, DataSourceConfig, RoutingDataSource,
   /// };
   ///
   /// # async fn example(
   /// #     config: DataSourceConfig,
   /// #     provider: Arc<dyn CredentialProvider>,
   /// # ) -> sqlx_routing_datasource::Result<()> {
   /// let credentials =
   ///     CredentialSource::for_profile(config.profile, Some(provider), config.auth.clone())?;
   /// let ds = RoutingDataSource::<Postgres>::connect(config, &credentials).await?;
   /// # Ok(())
   /// # }
   /// ```
   pub async fn connect(config: DataSourceConfig, credentials: &CredentialSource) -> Result<Self> {
      let DataSourceConfig { writer, reader, .. } = config;

      let writer = credentials.apply(PoolRole::Writer, writer).await?;
      let reader = credentials.apply(PoolRole::Reader, reader).await?;

      let registry = PoolRegistry::connect(writer, reader).await?;
      Ok(Self::new(registry))
   }
}
