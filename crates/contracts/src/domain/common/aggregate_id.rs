use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Backend ids arrive as JSON numbers from the database layer and as strings
/// from `data-*` attributes; both are carried as strings on the client.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Int(i64),
    Text(String),
}

impl From<RawId> for String {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Int(n) => n.to_string(),
            RawId::Text(s) => s,
        }
    }
}

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Build an id from a raw attribute value; blank values are rejected.
            pub fn parse(raw: &str) -> Result<Self, String> {
                let trimmed = raw.trim();
                if trimmed.is_empty() {
                    return Err(format!("{} must not be empty", stringify!($name)));
                }
                Ok(Self(trimmed.to_string()))
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

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                RawId::deserialize(deserializer).map(|raw| Self(raw.into()))
            }
        }
    };
}

string_id!(
    /// Order awaiting transport, taken from the `data-order-id` attribute
    OrderId
);

string_id!(
    /// Logistics partner identifier as returned by `/api/logistics-partners`
    PartnerId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_accept_numbers_and_strings() {
        let numeric: PartnerId = serde_json::from_str("7").unwrap();
        let text: PartnerId = serde_json::from_str("\"p1\"").unwrap();
        assert_eq!(numeric.as_str(), "7");
        assert_eq!(text.as_str(), "p1");
    }

    #[test]
    fn test_ids_serialize_as_strings() {
        let id = OrderId::parse("42").unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"42\"");
    }

    #[test]
    fn test_parse_rejects_blank() {
        assert!(OrderId::parse("   ").is_err());
        assert_eq!(OrderId::parse(" 42 ").unwrap().to_string(), "42");
    }
}
