//! Resolution and output configuration
//!
//! ```toml
//! inherit_docs = true
//! backfill_overloads = true
//! include_hidden = false
//! pretty_json = true
//! ```

use crate::diagnostics::{DocError, DocResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for a resolution run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DocgenConfig {
    /// Copy missing documentation from base-type members onto overrides
    pub inherit_docs: bool,

    /// Back-fill primary/overload summaries and parameter docs across an overload set
    pub backfill_overloads: bool,

    /// Keep `@hidden` members in serialized output
    pub include_hidden: bool,

    /// Pretty-print JSON output
    pub pretty_json: bool,
}

impl Default for DocgenConfig {
    fn default() -> Self {
        Self {
            inherit_docs: true,
            backfill_overloads: true,
            include_hidden: false,
            pretty_json: true,
        }
    }
}

impl DocgenConfig {
    /// Parse a config from TOML text
    pub fn from_toml_str(text: &str) -> DocResult<Self> {
        toml::from_str(text).map_err(|source| DocError::Toml {
            file: "<inline>".into(),
            source,
        })
    }

    /// Load a config file
    pub fn load(path: impl AsRef<Path>) -> DocResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config = toml::from_str(&text).map_err(|source| DocError::Toml {
            file: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "loaded docgen config");
        Ok(config)
    }

    /// Disable every back-fill pass (raw per-declaration output)
    pub fn without_backfill(mut self) -> Self {
        self.inherit_docs = false;
        self.backfill_overloads = false;
        self
    }
}
