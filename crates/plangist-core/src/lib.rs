#![forbid(unsafe_code)]
//! plangist-core: shared building blocks for plan gists.
//!
//! - `id`: strongly-typed catalog ids (`StableId`).
//! - `varint`: the signed varint layout every gist integer uses.
//! - `hash`: the FNV-64 rolling accumulator behind `PlanGist::hash`.
//! - `catalog`: descriptor types and the `Catalog` resolution trait used on
//!   the decode path.
//! - `config`: decode limits, loadable from the environment.
//!
//! Nothing here performs I/O or logging; higher crates own those concerns.

pub mod catalog;
pub mod config;
pub mod error;
pub mod hash;
pub mod id;
pub mod prelude;
pub mod varint;
