//! Gist to plan tree.
//!
//! The buffer is a version varint followed by operator records in
//! post-order, so decoding is a stack machine: each operator pops its
//! children, builds a node and pushes it back. Whatever is left on the stack
//! when the sentinel is reached is the root (top) plus any subqueries built
//! before it.

use base64ct::{Base64, Encoding};
use plangist_core::catalog::Catalog;
use plangist_core::config::GistConfig;
use plangist_operators::{Node, Plan, Subquery};
use tracing::{debug, trace, warn};

use crate::error::{DecodeError, Result};
use crate::payload::decode_operator_body;
use crate::reader::GistReader;
use crate::VERSION;

pub struct Decoder<'a> {
    catalog: &'a dyn Catalog,
    config: GistConfig,
}

impl<'a> Decoder<'a> {
    pub fn new(catalog: &'a dyn Catalog) -> Self {
        Self::with_config(catalog, GistConfig::default())
    }

    pub fn with_config(catalog: &'a dyn Catalog, config: GistConfig) -> Self {
        Self { catalog, config }
    }

    pub fn config(&self) -> &GistConfig {
        &self.config
    }

    /// Decode the base64 text form produced by `PlanGist`.
    pub fn decode_str(&self, gist: &str) -> Result<Plan> {
        let gist = gist.trim();
        // Reject before allocating: base64 expands 3 bytes into 4 characters.
        let approx_len = gist.len() / 4 * 3;
        if approx_len > self.config.max_gist_bytes {
            return Err(DecodeError::TooLarge {
                len: approx_len,
                limit: self.config.max_gist_bytes,
            });
        }
        let bytes = Base64::decode_vec(gist).map_err(|e| DecodeError::Base64(e.to_string()))?;
        self.decode_bytes(&bytes)
    }

    pub fn decode_bytes(&self, bytes: &[u8]) -> Result<Plan> {
        if bytes.len() > self.config.max_gist_bytes {
            return Err(DecodeError::TooLarge {
                len: bytes.len(),
                limit: self.config.max_gist_bytes,
            });
        }
        debug!(len = bytes.len(), "decoding plan gist");

        let state = DecodeState {
            reader: GistReader::new(bytes, self.catalog, &self.config),
            stack: Vec::new(),
            checks: Vec::new(),
            nodes: 0,
            max_nodes: self.config.max_nodes,
            max_depth: self.config.max_depth,
        };
        let result = state.run();
        match &result {
            Ok(plan) => debug!(nodes = plan.node_count(), "decoded plan gist"),
            Err(err) => warn!(error = %err, "failed to decode plan gist"),
        }
        result
    }
}

struct DecodeState<'a> {
    reader: GistReader<'a>,
    /// Operand stack; each entry carries the height of its subtree.
    stack: Vec<(Node, usize)>,
    checks: Vec<Node>,
    nodes: usize,
    max_nodes: usize,
    max_depth: usize,
}

impl DecodeState<'_> {
    fn run(mut self) -> Result<Plan> {
        let found = self.reader.decode_int()?;
        if found != VERSION {
            return Err(DecodeError::UnsupportedVersion {
                found,
                expected: VERSION,
            });
        }

        while let Some(op) = self.reader.decode_operator()? {
            self.nodes += 1;
            if self.nodes > self.max_nodes {
                return Err(DecodeError::TooManyNodes {
                    limit: self.max_nodes,
                });
            }

            let args = decode_operator_body(op, &mut self.reader)?;
            let needed = op.arity();
            let available = self.stack.len();
            if available < needed {
                return Err(DecodeError::StackUnderflow {
                    op,
                    needed,
                    available,
                });
            }
            let popped = self.stack.split_off(available - needed);
            let depth = 1 + popped.iter().map(|(_, d)| *d).max().unwrap_or(0);
            if depth > self.max_depth {
                return Err(DecodeError::TooDeep {
                    limit: self.max_depth,
                });
            }
            trace!(%op, children = needed, depth, "decoded operator");

            let children = popped.into_iter().map(|(n, _)| n).collect();
            let node = Node::new(args, children);
            if op.is_check() {
                self.checks.push(node);
            } else {
                self.stack.push((node, depth));
            }
        }

        let (root, _) = self.stack.pop().ok_or(DecodeError::MissingRoot)?;
        Ok(Plan {
            root,
            subqueries: self
                .stack
                .into_iter()
                .map(|(n, _)| Subquery::new(n))
                .collect(),
            cascades: Vec::new(),
            checks: self.checks,
        })
    }
}

/// Decode `gist` against `catalog` with default limits.
pub fn decode_plan_gist(gist: &str, catalog: &dyn Catalog) -> Result<Plan> {
    Decoder::new(catalog).decode_str(gist)
}
