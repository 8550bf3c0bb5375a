//! Type-safe identifier wrappers around [`String`].
//!
//! Every addressable entity in the simulation is keyed by a stable name.
//! Wrapping the names in distinct newtypes prevents accidental mixing of a
//! location name with a resource name at compile time, and gives every
//! entity a well-defined ordering for canonical encoding.

use std::borrow::Borrow;

use serde::{Deserialize, Serialize};

/// Generates a newtype wrapper around [`String`] with standard derives.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new identifier from any string-like value.
            pub fn new(name: impl Into<String>) -> Self {
                Self(name.into())
            }

            /// Borrow the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Return the inner [`String`] value.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(name: &str) -> Self {
                Self(name.to_owned())
            }
        }

        impl From<String> for $name {
            fn from(name: String) -> Self {
                Self(name)
            }
        }

        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id! {
    /// Unique identifier (name) of a resource kind, e.g. `wood`.
    ResourceId
}

define_id! {
    /// Unique identifier (name) of a location in the world.
    LocationId
}

define_id! {
    /// Unique identifier (name) of an agent.
    AgentId
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    #[test]
    fn ids_order_by_name() {
        let mut ids = vec![ResourceId::new("wood"), ResourceId::new("berries")];
        ids.sort();
        assert_eq!(ids.first().map(ResourceId::as_str), Some("berries"));
    }

    #[test]
    fn id_lookup_by_str() {
        let mut map = BTreeMap::new();
        map.insert(LocationId::new("forest"), 3_u32);
        assert_eq!(map.get("forest").copied(), Some(3));
    }

    #[test]
    fn id_serializes_as_plain_string() {
        let json = serde_json::to_string(&AgentId::new("ada")).ok();
        assert_eq!(json.as_deref(), Some("\"ada\""));
    }

    #[test]
    fn id_display_matches_name() {
        assert_eq!(AgentId::from("bo").to_string(), "bo");
    }
}
