// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Newtype wrappers for validated inputs.
//!
//! All types validate their invariants at creation time, so a runner holding
//! an `IterationCount` never has to guard against a zero-length timed loop.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Longest accepted codec name.
const MAX_CODEC_NAME_LEN: usize = 32;

/// Validated codec identifier.
/// Must be non-empty, lowercase alphanumeric with hyphens/underscores, max 32 chars.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CodecName(String);

impl CodecName {
    /// Create a new CodecName with validation.
    pub fn new(name: impl Into<String>) -> Result<Self, ValidationError> {
        let name = name.into();

        if name.is_empty() {
            return Err(ValidationError::InvalidFieldValue {
                field: "codec_name",
                value: name,
                reason: "Codec name cannot be empty".to_string(),
            });
        }

        if name.len() > MAX_CODEC_NAME_LEN {
            return Err(ValidationError::InvalidFieldValue {
                field: "codec_name",
                value: name.clone(),
                reason: format!(
                    "Codec name too long: {} chars (max {})",
                    name.len(),
                    MAX_CODEC_NAME_LEN
                ),
            });
        }

        if !name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_')
        {
            return Err(ValidationError::InvalidFieldValue {
                field: "codec_name",
                value: name,
                reason: "Codec name must contain only lowercase alphanumeric characters, hyphens, and underscores".to_string(),
            });
        }

        Ok(Self(name))
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CodecName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for CodecName {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CodecName> for String {
    fn from(name: CodecName) -> Self {
        name.0
    }
}

/// Validated iteration count for warm-up and measurement loops.
/// Must be at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct IterationCount(u64);

impl IterationCount {
    /// Iteration count used when nothing else is configured.
    pub const DEFAULT: IterationCount = IterationCount(20_000_000);

    /// Create a new IterationCount with validation.
    pub fn new(iterations: u64) -> Result<Self, ValidationError> {
        if iterations == 0 {
            return Err(ValidationError::InvalidFieldValue {
                field: "iterations",
                value: iterations.to_string(),
                reason: "Iteration count must be at least 1".to_string(),
            });
        }
        Ok(Self(iterations))
    }

    /// Get the inner value.
    pub fn get(&self) -> u64 {
        self.0
    }
}

impl Default for IterationCount {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for IterationCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u64> for IterationCount {
    type Error = ValidationError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<IterationCount> for u64 {
    fn from(count: IterationCount) -> Self {
        count.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codec_name_valid() {
        assert!(CodecName::new("json").is_ok());
        assert!(CodecName::new("msgpack-named").is_ok());
        assert!(CodecName::new("bincode_v1").is_ok());
    }

    #[test]
    fn test_codec_name_invalid() {
        assert!(CodecName::new("").is_err());
        assert!(CodecName::new("Json").is_err());
        assert!(CodecName::new("has space").is_err());
        assert!(CodecName::new("a".repeat(33)).is_err());
    }

    #[test]
    fn test_iteration_count() {
        assert!(IterationCount::new(0).is_err());
        assert_eq!(IterationCount::new(1000).unwrap().get(), 1000);
        assert_eq!(IterationCount::default().get(), 20_000_000);
    }

    #[test]
    fn test_iteration_count_deserialize_rejects_zero() {
        let parsed: Result<IterationCount, _> = serde_yaml::from_str("0");
        assert!(parsed.is_err());
        let parsed: IterationCount = serde_yaml::from_str("42").unwrap();
        assert_eq!(parsed.get(), 42);
    }
}
