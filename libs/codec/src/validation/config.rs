//! # Codec Configuration
//!
//! Deployment-tunable decode limits and policies, loadable from TOML so they
//! are not hardcoded per endpoint.
//!
//! ```toml
//! max_message_size = 65536
//!
//! [decode]
//! verify_checksum = true
//! allow_trailing_bytes = false
//! ```
//!
//! Every key is optional; missing keys take their defaults. Without
//! `max_message_size` the only bound is the schema's own encoded size.

use serde::{Deserialize, Serialize};

use crate::error::{CodecError, CodecResult};

/// Codec configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    /// Inputs larger than this are rejected before any byte is decoded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_message_size: Option<usize>,

    /// How strictly decoded messages are checked
    pub decode: DecodePolicy,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            max_message_size: None,
            decode: DecodePolicy::default(),
        }
    }
}

/// Decode-time checks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecodePolicy {
    /// Verify the trailer of schemas that carry one
    pub verify_checksum: bool,

    /// Accept input with bytes after the end of the message
    pub allow_trailing_bytes: bool,
}

impl Default for DecodePolicy {
    fn default() -> Self {
        Self {
            verify_checksum: true,
            allow_trailing_bytes: false,
        }
    }
}

impl CodecConfig {
    /// Parse a configuration from TOML text
    pub fn from_toml_str(text: &str) -> CodecResult<Self> {
        let config: Self = toml::from_str(text).map_err(|err| CodecError::Config(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Render the configuration as TOML
    pub fn to_toml_string(&self) -> CodecResult<String> {
        toml::to_string(self).map_err(|err| CodecError::Config(err.to_string()))
    }

    /// Reject settings no message could satisfy
    pub fn validate(&self) -> CodecResult<()> {
        if self.max_message_size == Some(0) {
            return Err(CodecError::Config(
                "max_message_size must be at least 1 byte".to_string(),
            ));
        }
        Ok(())
    }
}
