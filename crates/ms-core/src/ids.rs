//! Typed ID wrappers providing compile-time safety for entity identifiers.
//!
//! Each ID type is a newtype over `Uuid`, so an `ItemId` can never be passed
//! where a `CreatorId` is expected. The nil UUID is the "unset" identifier;
//! it is representable (it arrives from callers) but never valid on a
//! stored segment.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Generate a newtype ID wrapper over `Uuid`.
///
/// The macro produces a struct with:
/// - `new()` to create a random v4 UUID and `nil()` for the all-zero UUID
/// - `Debug`, `Clone`, `Copy`, `PartialEq`, `Eq`, `Ord`, `Hash`, `Serialize`, `Deserialize`
/// - `Display` and `FromStr` delegating to the inner UUID
/// - `From<Uuid>` and `Into<Uuid>` conversions
macro_rules! typed_id {
    ($($(#[doc = $doc:expr])* $name:ident),+ $(,)?) => {
        $(
            $(#[doc = $doc])*
            #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
            #[serde(transparent)]
            pub struct $name(Uuid);

            impl $name {
                /// Create a new random ID.
                #[must_use]
                pub fn new() -> Self {
                    Self(Uuid::new_v4())
                }

                /// The all-zero ID.
                #[must_use]
                pub const fn nil() -> Self {
                    Self(Uuid::nil())
                }

                /// Whether this is the all-zero ID.
                #[must_use]
                pub fn is_nil(&self) -> bool {
                    self.0.is_nil()
                }
            }

            impl fmt::Display for $name {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    write!(f, "{}", self.0)
                }
            }

            impl FromStr for $name {
                type Err = uuid::Error;

                fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                    Uuid::parse_str(s).map(Self)
                }
            }

            impl From<Uuid> for $name {
                fn from(uuid: Uuid) -> Self {
                    Self(uuid)
                }
            }

            impl From<$name> for Uuid {
                fn from(id: $name) -> Self {
                    id.0
                }
            }
        )+
    };
}

typed_id! {
    /// Identifier of a media item (movie, episode, etc.) owned by the library.
    ItemId,
    /// Identifier of a segment producer (intro detector, commercial scanner, ...).
    CreatorId,
    /// Identifier of a user.
    UserId,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique() {
        let a = ItemId::new();
        let b = ItemId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn nil_is_detected() {
        assert!(CreatorId::nil().is_nil());
        assert!(ItemId::from(Uuid::nil()).is_nil());
        assert!(!UserId::new().is_nil());
    }

    #[test]
    fn roundtrip_uuid() {
        let uuid = Uuid::new_v4();
        let id = ItemId::from(uuid);
        let back: Uuid = id.into();
        assert_eq!(uuid, back);
    }

    #[test]
    fn display_and_from_str() {
        let id = CreatorId::new();
        let parsed: CreatorId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn serde_is_transparent() {
        let id = UserId::new();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{id}\""));
        let back: UserId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, back);
    }

    #[test]
    fn invalid_from_str() {
        assert!(ItemId::from_str("not-a-uuid").is_err());
    }
}
