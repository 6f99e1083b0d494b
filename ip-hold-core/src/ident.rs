use std::fmt;

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};

/// Normalize a raw form or wire value into its canonical identifier text.
///
/// Whitespace is trimmed and all-digit values lose their leading zeros, so the
/// form value `"07"` and the JSON number `7` name the same record. Returns
/// `None` for an empty value, which the form uses to mean "nothing selected".
pub fn canonical(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if trimmed.bytes().all(|b| b.is_ascii_digit()) {
        let stripped = trimmed.trim_start_matches('0');
        return Some(if stripped.is_empty() {
            "0".to_string()
        } else {
            stripped.to_string()
        });
    }
    Some(trimmed.to_string())
}

macro_rules! identifier {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(String);

        impl $name {
            /// Parse a form value; empty values yield `None`.
            pub fn parse(raw: &str) -> Option<Self> {
                canonical(raw).map(Self)
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(&self.0)
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                deserializer
                    .deserialize_any(IdentifierVisitor)
                    .map(Self)
            }
        }
    };
}

identifier!(
    /// Identifier of a network address record offered by the inventory.
    IpId
);

identifier!(
    /// Identifier of the parent network (VLAN) scoping the offered addresses.
    VlanId
);

struct IdentifierVisitor;

impl Visitor<'_> for IdentifierVisitor {
    type Value = String;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a non-empty string or integer identifier")
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<String, E> {
        Ok(v.to_string())
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<String, E> {
        Ok(v.to_string())
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<String, E> {
        canonical(v).ok_or_else(|| E::invalid_value(de::Unexpected::Str(v), &self))
    }
}
