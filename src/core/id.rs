use serde::{Deserialize, Serialize};
use std::fmt;

/// Declares a transparent string-newtype identifier.
///
/// Caller-supplied identifiers (positions, users, bidders, assets, registry
/// keys) are plain strings on the wire; distinct newtypes keep them from
/// being swapped for one another at call sites.
macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Returns the string representation of this identifier.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self::new(s)
            }
        }
    };
}

string_id! {
    /// Identifier of a collateralized position held on the platform.
    PositionId
}

string_id! {
    /// Identifier of the user who owns a position.
    UserId
}

string_id! {
    /// Identifier of a participant placing bids in a collateral auction.
    BidderId
}

string_id! {
    /// Identifier of the asset being auctioned.
    AssetId
}

string_id! {
    /// Registry key of a liquidation trigger definition.
    TriggerId
}

string_id! {
    /// Registry key of a recovery mechanism definition.
    MechanismId
}
