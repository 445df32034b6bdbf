//! Host and port extraction from connection URLs

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

use crate::Result;
use crate::error::Error;

/// Authority section following `://`, up to the path, query or fragment
static AUTHORITY_RE: LazyLock<Regex> = LazyLock::new(|| {
   Regex::new(r"://([^/?#]+)").expect("authority pattern is valid")
});

/// Network location of a database server.
///
/// # Examples
///
/// ```
/// use sqlx_iam_token::Endpoint;
///
/// let endpoint = Endpoint::parse("jdbc:postgresql://db.example.com:5432/mydb").unwrap();
/// assert_eq!(endpoint.host, "db.example.com");
/// assert_eq!(endpoint.port, 5432);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Endpoint {
   pub host: String,
   pub port: u16,
}

impl Endpoint {
   /// Parse the `host:port` authority of a `scheme://host:port/...` URL.
   ///
   /// Any `user@` prefix is ignored. IPv6 hosts must be bracketed, as in
   /// `[::1]:5432`; the port follows the closing bracket.
   pub fn parse(url: &str) -> Result<Self> {
      let authority = AUTHORITY_RE
         .captures(url)
         .and_then(|caps| caps.get(1))
         .map(|m| m.as_str())
         .ok_or_else(|| Error::MalformedEndpoint(url.to_string()))?;

      let host_port = authority
         .rsplit_once('@')
         .map_or(authority, |(_, host_port)| host_port);

      let malformed = || Error::MalformedEndpoint(url.to_string());
      let (host, port) = match host_port.strip_prefix('[') {
         Some(bracketed) => {
            let (host, rest) = bracketed.split_once(']').ok_or_else(malformed)?;
            (host, rest.strip_prefix(':').ok_or_else(malformed)?)
         }
         None => host_port.rsplit_once(':').ok_or_else(malformed)?,
      };

      if host.is_empty() || port.is_empty() {
         return Err(malformed());
      }

      let port = port.parse::<u16>().map_err(|_| Error::InvalidPort {
         endpoint: url.to_string(),
         port: port.to_string(),
      })?;

      Ok(Self {
         host: host.to_string(),
         port,
      })
   }
}

impl FromStr for Endpoint {
   type Err = Error;

   fn from_str(s: &str) -> Result<Self> {
      Self::parse(s)
   }
}

impl fmt::Display for Endpoint {
   fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
      if self.host.contains(':') {
         write!(f, "[{}]:{}", self.host, self.port)
      } else {
         write!(f, "{}:{}", self.host, self.port)
      }
   }
}
