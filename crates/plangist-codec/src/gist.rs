use std::fmt;

use base64ct::{Base64, Encoding};
use serde::{Deserialize, Serialize};

use crate::error::{DecodeError, Result};
use crate::END_OF_PLAN;

/// Compact fingerprint of a plan's shape.
///
/// `gist` is the base64 form of the encoded buffer (end-of-plan sentinel
/// included) and can be decoded back into a plan. `hash` identifies the
/// shape independently of the numeric ids of the objects it touches.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlanGist {
    gist: String,
    hash: u64,
}

impl PlanGist {
    pub(crate) fn seal(bytes: &[u8], hash: u64) -> Self {
        let mut framed = Vec::with_capacity(bytes.len() + 1);
        framed.extend_from_slice(bytes);
        framed.push(END_OF_PLAN);
        Self {
            gist: Base64::encode_string(&framed),
            hash,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.gist
    }

    pub fn hash(&self) -> u64 {
        self.hash
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Base64::decode_vec(&self.gist).map_err(|e| DecodeError::Base64(e.to_string()))
    }
}

impl fmt::Display for PlanGist {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.gist)
    }
}
