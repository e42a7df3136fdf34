//! Strongly-typed identifiers used across the gist crates.
//!
//! Catalog objects (tables, indexes, schemas) are referenced by `StableId`;
//! downstream crates should *not* pass raw integers around.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! new_id {
    ($name:ident) => {
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Ord, PartialOrd,
        )]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            pub const fn new(v: u64) -> Self {
                Self(v)
            }
            pub const fn get(self) -> u64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }
    };
}

new_id!(StableId);

impl StableId {
    /// Gists carry ids as signed varints; ids beyond `i64::MAX` wrap, which
    /// the decode side undoes with `from_wire`.
    pub const fn to_wire(self) -> i64 {
        self.0 as i64
    }

    pub const fn from_wire(v: i64) -> Self {
        Self(v as u64)
    }
}
