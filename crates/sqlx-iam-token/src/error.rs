//! Error types for sqlx-iam-token

use thiserror::Error;

/// Errors that may occur while resolving an endpoint or fetching a token
#[derive(Error, Debug)]
pub enum Error {
   /// The connection URL has no `host:port` authority after `://`.
   /// Raised at startup and treated as a fatal configuration error.
   #[error("malformed endpoint '{0}': expected scheme://host:port/...")]
   MalformedEndpoint(String),

   /// The port segment of the endpoint is not a valid TCP port number
   #[error("invalid port '{port}' in endpoint '{endpoint}'")]
   InvalidPort { endpoint: String, port: String },

   /// The credential provider could not issue a token
   #[error(transparent)]
   Provider(#[from] ProviderError),
}

impl Error {
   /// Machine-readable error code.
   pub fn error_code(&self) -> &'static str {
      match self {
         Error::MalformedEndpoint(_) => "MALFORMED_ENDPOINT",
         Error::InvalidPort { .. } => "INVALID_PORT",
         Error::Provider(_) => "PROVIDER_ERROR",
      }
   }
}

/// Failure reported by a [`CredentialProvider`](crate::CredentialProvider),
/// e.g. a network or authorization failure at the identity service.
#[derive(Error, Debug)]
#[error("credential provider failed: {message}")]
pub struct ProviderError {
   message: String,
   #[source]
   source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
}

impl ProviderError {
   pub fn new(message: impl Into<String>) -> Self {
      Self {
         message: message.into(),
         source: None,
      }
   }

   /// Wrap an underlying error, keeping it as the error source.
   pub fn with_source(
      message: impl Into<String>,
      source: impl std::error::Error + Send + Sync + 'static,
   ) -> Self {
      Self {
         message: message.into(),
         source: Some(Box::new(source)),
      }
   }

   pub fn message(&self) -> &str {
      &self.message
   }
}

#[cfg(test)]
mod tests {
   use super::*;
   use std::error::Error as _;

   #[test]
   fn test_error_codes() {
      assert_eq!(
         Error::MalformedEndpoint("x".into()).error_code(),
         "MALFORMED_ENDPOINT"
      );
      assert_eq!(
         Error::InvalidPort {
            endpoint: "x".into(),
            port: "y".into()
         }
         .error_code(),
         "INVALID_PORT"
      );
      assert_eq!(
         Error::from(ProviderError::new("denied")).error_code(),
         "PROVIDER_ERROR"
      );
   }

   #[test]
   fn test_provider_error_keeps_source() {
      let io = std::io::Error::new(std::io::ErrorKind::TimedOut, "connect timed out");
      let err = ProviderError::with_source("token request failed", io);

      assert_eq!(err.message(), "token request failed");
      assert!(err.to_string().contains("token request failed"));
      assert!(err.source().unwrap().to_string().contains("timed out"));
   }
}
