//! Decoder configuration that downstream crates can serialize/deserialize.
//!
//! Gists may come from logs, statement statistics, or user input, so the
//! decoder bounds the work any single gist can cause.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GistConfig {
    /// Largest decoded gist (in bytes) the decoder will accept.
    pub max_gist_bytes: usize,

    /// Largest element count accepted for a count-only list parameter.
    pub max_list_len: usize,

    /// Largest total of list elements across every count-only list in one
    /// gist.
    pub max_list_elems: usize,

    /// Largest number of operator records in one gist.
    pub max_nodes: usize,

    /// Deepest operator nesting accepted. Plan trees are walked recursively,
    /// so this bounds stack use as well as decode work.
    pub max_depth: usize,
}

impl Default for GistConfig {
    fn default() -> Self {
        Self {
            max_gist_bytes: 1024 * 1024, // 1 MiB
            max_list_len: 1 << 16,
            max_list_elems: 1 << 20,
            max_nodes: 1 << 16,
            max_depth: 1000,
        }
    }
}

impl GistConfig {
    /// Create a config from environment variables, falling back to defaults.
    ///
    /// Environment variables:
    /// - `PLANGIST_MAX_GIST_BYTES`: max decoded gist size in bytes
    /// - `PLANGIST_MAX_LIST_LEN`: max count for list parameters
    /// - `PLANGIST_MAX_LIST_ELEMS`: max list elements summed over a gist
    /// - `PLANGIST_MAX_NODES`: max operator records per gist
    /// - `PLANGIST_MAX_DEPTH`: max operator nesting depth
    pub fn from_env() -> Self {
        let mut cfg = Self::default();

        if let Ok(s) = std::env::var("PLANGIST_MAX_GIST_BYTES") {
            if let Ok(v) = s.parse::<usize>() {
                cfg.max_gist_bytes = v;
            }
        }

        if let Ok(s) = std::env::var("PLANGIST_MAX_LIST_LEN") {
            if let Ok(v) = s.parse::<usize>() {
                cfg.max_list_len = v;
            }
        }

        if let Ok(s) = std::env::var("PLANGIST_MAX_LIST_ELEMS") {
            if let Ok(v) = s.parse::<usize>() {
                cfg.max_list_elems = v;
            }
        }

        if let Ok(s) = std::env::var("PLANGIST_MAX_NODES") {
            if let Ok(v) = s.parse::<usize>() {
                cfg.max_nodes = v;
            }
        }

        if let Ok(s) = std::env::var("PLANGIST_MAX_DEPTH") {
            if let Ok(v) = s.parse::<usize>() {
                cfg.max_depth = v;
            }
        }

        cfg
    }

    /// Parse a JSON config document; missing fields keep their defaults.
    pub fn from_json(s: &str) -> Result<Self> {
        let cfg: Self = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_gist_bytes == 0 {
            return Err(Error::Config("max_gist_bytes must be positive".into()));
        }
        if self.max_nodes == 0 {
            return Err(Error::Config("max_nodes must be positive".into()));
        }
        if self.max_depth == 0 {
            return Err(Error::Config("max_depth must be positive".into()));
        }
        if self.max_list_elems < self.max_list_len {
            return Err(Error::Config(
                "max_list_elems must be at least max_list_len".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::GistConfig;

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg = GistConfig::from_json(r#"{"max_nodes": 10}"#).unwrap();
        assert_eq!(cfg.max_nodes, 10);
        assert_eq!(cfg.max_list_len, GistConfig::default().max_list_len);
    }

    #[test]
    fn zero_limits_are_rejected() {
        assert!(GistConfig::from_json(r#"{"max_nodes": 0}"#).is_err());
        assert!(GistConfig::from_json(r#"{"max_gist_bytes": 0}"#).is_err());
        assert!(GistConfig::from_json(r#"{"max_depth": 0}"#).is_err());
    }

    #[test]
    fn list_budget_must_cover_one_full_list() {
        let err = GistConfig::from_json(r#"{"max_list_len": 100, "max_list_elems": 10}"#);
        assert!(err.is_err());
        let cfg = GistConfig::from_json(r#"{"max_list_len": 10, "max_list_elems": 10}"#).unwrap();
        assert_eq!(cfg.max_depth, GistConfig::default().max_depth);
    }
}
