//! Configuration for dotted-path accessors.
//!
//! This module provides the settings an accessor is built with: the path
//! separator, the escape marker, and what `set` does when it meets a leaf in
//! the middle of a path. Configuration can be embedded in an application's
//! own TOML file and parsed from a string.
//!
//! # Example
//!
//! ```
//! use dotquill::config::{Config, LeafPolicy};
//!
//! // Use default configuration
//! let config = Config::default();
//! assert_eq!(config.separator, '.');
//! assert_eq!(config.escape, '\\');
//!
//! // Create custom configuration
//! let custom = Config {
//!     separator: ',',
//!     escape: '$',
//!     ..Config::default()
//! };
//! assert_eq!(custom.leaf_policy, LeafPolicy::Overwrite);
//! ```

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::error::{DottyError, Result};
use crate::path::{Tokenizer, DEFAULT_ESCAPE, DEFAULT_SEPARATOR};

/// What `set` does with a leaf value found where a container is needed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeafPolicy {
    /// Replace the leaf with a fresh container and keep going
    #[default]
    Overwrite,
    /// Fail with a type mismatch and leave the structure untouched
    Strict,
}

/// Configuration for a dotted-path accessor.
///
/// # Fields
///
/// * `separator` - Character that splits path segments (default: '.')
/// * `escape` - Character that escapes the separator (default: '\\')
/// * `leaf_policy` - Leaf handling during `set` (default: overwrite)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Path segment separator
    #[serde(default = "default_separator")]
    pub separator: char,

    /// Escape marker for the separator
    #[serde(default = "default_escape")]
    pub escape: char,

    /// Leaf handling during `set`
    #[serde(default)]
    pub leaf_policy: LeafPolicy,
}

/// Returns the default separator.
fn default_separator() -> char {
    DEFAULT_SEPARATOR
}

/// Returns the default escape marker.
fn default_escape() -> char {
    DEFAULT_ESCAPE
}

impl Default for Config {
    fn default() -> Self {
        Self {
            separator: default_separator(),
            escape: default_escape(),
            leaf_policy: LeafPolicy::default(),
        }
    }
}

impl Config {
    /// Creates a configuration with a custom separator and escape marker.
    pub fn with_separator(separator: char, escape: char) -> Self {
        Self {
            separator,
            escape,
            ..Self::default()
        }
    }

    /// Checks that the separator and escape marker can coexist.
    pub fn validate(&self) -> Result<()> {
        if self.separator == self.escape {
            return Err(DottyError::InvalidConfig {
                message: format!(
                    "separator and escape must differ, both are '{}'",
                    self.separator
                ),
            });
        }
        Ok(())
    }

    /// Builds the tokenizer these settings describe.
    pub fn tokenizer(&self) -> Tokenizer {
        Tokenizer::new(self.separator, self.escape)
    }

    /// Parses and validates configuration from TOML text.
    ///
    /// Missing fields fall back to their defaults.
    pub fn from_toml_str(contents: &str) -> anyhow::Result<Self> {
        let config: Self = toml::from_str(contents).context("Failed to parse accessor config")?;
        config.validate()?;
        Ok(config)
    }

    /// Serializes configuration to pretty TOML text.
    pub fn to_toml_string(&self) -> anyhow::Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}
