//! Newtype identifiers for the things a request path can name.
//!
//! A document URI, a field name and a range-index name are all plain strings
//! to the service, but they are never interchangeable in this API. Each is a
//! distinct newtype so a field name cannot be passed where a document URI is
//! expected.
//!
//! Every identifier is normalised the same way on construction: exactly one
//! leading `/` is stripped if present. Nothing else is escaped or validated;
//! the service rejects malformed identifiers itself.

use serde::{Deserialize, Serialize};

/// Strips exactly one leading path separator.
///
/// `"/a/b"` becomes `"a/b"`, `"//a"` becomes `"/a"`, `"a"` is unchanged.
pub fn strip_leading_separator(value: &str) -> &str {
    value.strip_prefix('/').unwrap_or(value)
}

// ---------------------------------------------------------------------------
// Macro for path-segment newtypes.
// Generates: struct, new() stripping one leading '/', as_str(), Display, From.
// ---------------------------------------------------------------------------
macro_rules! path_id {
    (
        $(#[$attr:meta])*
        $name:ident
    ) => {
        $(#[$attr])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(from = "String")]
        pub struct $name(String);

        impl $name {
            /// Creates a new identifier, stripping one leading `/` if present.
            pub fn new(value: impl Into<String>) -> Self {
                let v = value.into();
                Self(strip_leading_separator(&v).to_string())
            }

            /// Returns the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consumes the identifier, returning the normalised string.
            pub fn into_string(self) -> String {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self::new(value)
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self::new(value)
            }
        }
    };
}

path_id! {
    /// Identifies a stored JSON document (e.g. `"users/alice.json"`).
    DocumentUri
}

path_id! {
    /// Names a field managed through the field-management endpoint.
    FieldName
}

path_id! {
    /// Names a range index managed through the range-index endpoint.
    IndexName
}
