//! Convenient re-exports for downstream crates.

pub use crate::catalog::{Catalog, IndexDesc, MemoryCatalog, SchemaDesc, TableDesc, TableRef};
pub use crate::config::GistConfig;
pub use crate::error::{Error, Result};
pub use crate::hash::Fnv64;
pub use crate::id::StableId;
