//! Newtype wrappers around plain integers for all domain identifiers.
//!
//! Seat and user identifiers are assigned externally (by the venue map
//! and the client respectively) and are immutable once registered, so
//! they are carried as transparent integer newtypes. Using distinct
//! types prevents accidentally passing a `UserId` where a `SeatId` is
//! expected.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Macro to define a newtype ID wrapper around a primitive integer.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident($inner:ty)
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub $inner);

        impl $name {
            /// Create an identifier from its raw integer value.
            pub const fn new(value: $inner) -> Self {
                Self(value)
            }

            /// Return the raw integer value.
            pub const fn value(self) -> $inner {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.parse::<$inner>().map(Self)
            }
        }

        impl From<$inner> for $name {
            fn from(value: $inner) -> Self {
                Self(value)
            }
        }

        impl From<$name> for $inner {
            fn from(id: $name) -> $inner {
                id.0
            }
        }
    };
}

define_id!(
    /// Unique identifier for a seat in the venue map.
    SeatId(u32)
);

define_id!(
    /// Unique identifier for a user placing holds.
    UserId(u64)
);
