use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Which of the two pools a connection comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PoolRole {
   /// Primary, read-write instance
   Writer,
   /// Read-only replica
   Reader,
}

impl PoolRole {
   pub const ALL: [PoolRole; 2] = [PoolRole::Writer, PoolRole::Reader];

   pub fn as_str(&self) -> &'static str {
      match self {
         PoolRole::Writer => "writer",
         PoolRole::Reader => "reader",
      }
   }
}

impl fmt::Display for PoolRole {
   fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
      f.write_str(self.as_str())
   }
}

/// Error returned when a string names neither pool
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown pool role: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for PoolRole {
   type Err = UnknownRole;

   fn from_str(s: &str) -> Result<Self, Self::Err> {
      if s.eq_ignore_ascii_case("writer") {
         Ok(PoolRole::Writer)
      } else if s.eq_ignore_ascii_case("reader") {
         Ok(PoolRole::Reader)
      } else {
         Err(UnknownRole(s.to_string()))
      }
   }
}
