#![forbid(unsafe_code)]
//! plangist: compact, hashable fingerprints of query plan shapes.
//!
//! Re-exports the member crates so integration tests and embedders can
//! depend on one package.

pub use plangist_codec;
pub use plangist_core;
pub use plangist_operators;

pub use plangist_codec::{decode_plan_gist, DecodeError, Decoder, PlanGist, PlanGistFactory};
pub use plangist_core::catalog::{Catalog, MemoryCatalog, TableDesc};
pub use plangist_operators::{ExecFactory, Node, Operator, Plan};
