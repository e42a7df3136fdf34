#![forbid(unsafe_code)]
//! plangist-operators: the operator vocabulary shared by plan builders and
//! the gist codec.
//!
//! - `registry`: the closed `Operator` enum and its frozen wire codes.
//! - `args`: one typed argument struct per operator.
//! - `traits`: the `ExecFactory` construction contract.
//! - `stub` / `tree`: factories that build nothing, or `Node` trees.
//! - `node`: decoded plan trees.

pub mod args;
pub mod node;
pub mod registry;
pub mod stub;
pub mod traits;
pub mod tree;

pub use node::{Cascade, Node, OpArgs, Plan, Subquery, SubqueryMode};
pub use registry::{Operator, NUM_OPERATORS};
pub use stub::StubFactory;
pub use traits::ExecFactory;
pub use tree::TreeFactory;
