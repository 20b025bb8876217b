//! Newtype IDs for type-safe entity references.
//!
//! Use the `define_id!` macro to create type-safe ID wrappers that prevent
//! accidentally mixing IDs from different entity types. The backend issues
//! opaque string identifiers, so IDs wrap `String` rather than integers.

/// Macro to define a type-safe ID wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`, `PartialOrd`, `Ord`
/// - Conversion methods: `new()`, `as_str()`, `into_inner()`
/// - `From<String>` and `From<&str>` implementations
///
/// # Example
///
/// ```rust
/// # use botica_core::define_id;
/// define_id!(MedicinalId);
/// define_id!(DepositId);
///
/// let medicinal_id = MedicinalId::new("med-01");
/// let deposit_id = DepositId::new("dep-01");
///
/// // These are different types, so this won't compile:
/// // let _: MedicinalId = deposit_id;
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from anything convertible to a `String`.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the underlying identifier as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the ID and return its inner `String`.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

// Define standard entity IDs
define_id!(EntityId);
define_id!(MedicinalId);
define_id!(DepositId);
define_id!(OrderId);

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_id_round_trip() {
        let id = MedicinalId::new("med-42");
        assert_eq!(id.as_str(), "med-42");
        assert_eq!(id.to_string(), "med-42");
        assert_eq!(id.clone().into_inner(), "med-42");
    }

    #[test]
    fn test_id_serde_transparent() {
        let id = DepositId::new("dep-7");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"dep-7\"");

        let parsed: DepositId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_id_equality_by_value() {
        assert_eq!(OrderId::new("o-1"), OrderId::from("o-1"));
        assert_ne!(OrderId::new("o-1"), OrderId::new("o-2"));
    }
}
