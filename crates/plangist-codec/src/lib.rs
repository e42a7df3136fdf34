#![forbid(unsafe_code)]
//! plangist-codec: encode plans into gists and decode gists back into plans.
//!
//! Encoding piggybacks on plan construction: `PlanGistFactory` wraps any
//! `ExecFactory` and records each construction call before delegating it.
//! Decoding replays the recorded post-order against a `Catalog` to rebuild a
//! `Plan` tree with placeholder arguments.

pub mod decode;
pub mod error;
pub mod factory;
pub mod gist;
pub mod payload;
pub mod reader;
pub mod writer;

pub use decode::{decode_plan_gist, Decoder};
pub use error::{DecodeError, Result};
pub use factory::PlanGistFactory;
pub use gist::PlanGist;
pub use payload::GistCodec;
pub use reader::GistReader;
pub use writer::GistWriter;

/// Gist format version, written first in every gist. Bump whenever operator
/// codes or payload layouts change.
pub const VERSION: i64 = 1;

/// Opcode slot value that ends a gist.
pub const END_OF_PLAN: u8 = 0;
