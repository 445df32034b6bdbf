use std::fmt;

/// Short-lived database credential.
///
/// Expiry is owned by the issuing service and is not tracked here. The value
/// is never printed by `Debug` or `Display`; call [`AuthToken::expose`] to
/// hand it to a connection.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct AuthToken(String);

impl AuthToken {
   pub fn new(token: impl Into<String>) -> Self {
      Self(token.into())
   }

   /// The token returned when the provider failed and the fetcher is
   /// configured to continue without a password.
   pub fn empty() -> Self {
      Self(String::new())
   }

   pub fn is_empty(&self) -> bool {
      self.0.is_empty()
   }

   pub fn expose(&self) -> &str {
      &self.0
   }

   pub fn into_inner(self) -> String {
      self.0
   }
}

impl fmt::Debug for AuthToken {
   fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
      if self.is_empty() {
         f.write_str("AuthToken(<empty>)")
      } else {
         f.write_str("AuthToken(<redacted>)")
      }
   }
}

impl fmt::Display for AuthToken {
   fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
      fmt::Debug::fmt(self, f)
   }
}
