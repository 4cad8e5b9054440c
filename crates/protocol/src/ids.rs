//! Strongly-typed identifiers for entities referenced on the wire
//!
//! All IDs are UUID-based. The same `PlayerId` stays valid across the
//! guest-to-registered account upgrade; the backend never reissues it.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Macro to define a strongly-typed ID wrapper around UUID
macro_rules! define_id {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Create a new random ID
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Create from an existing UUID
            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Get the underlying UUID
            pub fn to_uuid(self) -> Uuid {
                self.0
            }

            /// Parse from string (returns None if invalid)
            pub fn parse(s: &str) -> Option<Self> {
                Uuid::parse_str(s).ok().map(Self)
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Uuid {
                id.0
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Uuid::parse_str(s).map(Self)
            }
        }
    };
}

define_id!(PlayerId);
define_id!(WorldId);
define_id!(CharacterId);
define_id!(LandId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_roundtrips_through_string() {
        let id = PlayerId::new();
        let parsed = PlayerId::parse(&id.to_string());
        assert_eq!(parsed, Some(id));
    }

    #[test]
    fn invalid_string_parses_to_none() {
        assert_eq!(WorldId::parse("not-a-uuid"), None);
    }

    #[test]
    fn id_serializes_transparently() {
        let id = CharacterId::new();
        let json = serde_json::to_string(&id).expect("serialize");
        assert_eq!(json, format!("\"{}\"", id));
    }
}
