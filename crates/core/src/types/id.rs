//! Newtype IDs for type-safe entity references.
//!
//! The backend identifies documents with opaque strings (hex object ids),
//! so every ID wraps a `String`. Use the `define_id!` macro to create
//! wrappers that prevent accidentally mixing IDs from different entity types.

/// Macro to define a type-safe ID wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`, `PartialOrd`, `Ord`
/// - Conversion methods: `new()`, `as_str()`, `into_inner()`
/// - `From<String>`, `From<&str>` and `Display` implementations
///
/// # Example
///
/// ```rust
/// # use lca_tv_core::define_id;
/// define_id!(ShowId);
/// define_id!(EpisodeId);
///
/// let show = ShowId::new("665f1c2a9b");
/// let episode = EpisodeId::new("665f1c2a9b");
///
/// // These are different types, so this won't compile:
/// // let _: ShowId = episode;
/// assert_eq!(show.as_str(), episode.as_str());
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
            /// Create a new ID from any string-like value.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the underlying string value.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the ID and return the inner string.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(&self.0)
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

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

// Define standard entity IDs
define_id!(AdminUserId);
define_id!(ClientId);
define_id!(AdSpaceId);
define_id!(AdOrderId);
define_id!(InvoiceId);
define_id!(VideoId);
define_id!(NewsId);
define_id!(ViewerId);
define_id!(CommentId);

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_raw_value() {
        let id = ClientId::new("65a1f0c3e4b0a1b2c3d4e5f6");
        assert_eq!(id.to_string(), "65a1f0c3e4b0a1b2c3d4e5f6");
    }

    #[test]
    fn test_serde_is_transparent() {
        let id = AdOrderId::new("abc123");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"abc123\"");

        let parsed: AdOrderId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_conversions() {
        let id: AdSpaceId = "space-1".into();
        assert_eq!(id.as_str(), "space-1");
        let raw: String = id.into();
        assert_eq!(raw, "space-1");
    }
}
