// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! YAML configuration parser with strict validation.
//!
//! Precedence, lowest first: built-in defaults, YAML file, `ITER_NUMS`
//! environment variable, then whatever the caller applies on top (CLI flags).
//! Any invalid field results in a ValidationError before a codec is touched.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{BenchError, BenchResult, ValidationError};
use crate::payload::PayloadKind;
use crate::types::{CodecName, IterationCount};

/// Environment variable holding the iteration count.
pub const ITERATIONS_ENV: &str = "ITER_NUMS";

/// Codecs measured when the configuration names none.
pub const DEFAULT_CODECS: &[&str] = &["json", "bincode", "msgpack", "yaml"];

/// Raw codec entry as parsed from YAML (before validation).
#[derive(Debug, Deserialize)]
struct RawCodecConfig {
    name: String,
    #[serde(default = "default_true")]
    ref_tracking: bool,
    #[serde(default = "default_true")]
    register_types: bool,
}

fn default_true() -> bool {
    true
}

fn default_iterations() -> u64 {
    IterationCount::DEFAULT.get()
}

/// Raw root configuration file.
#[derive(Debug, Deserialize)]
struct RawConfig {
    #[serde(default = "default_iterations")]
    iterations: u64,
    #[serde(default)]
    payload: PayloadKind,
    #[serde(default)]
    verify_round_trip: bool,
    #[serde(default)]
    codecs: Vec<RawCodecConfig>,
}

/// Validated per-codec options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodecConfig {
    pub name: CodecName,
    /// Write shared/self references as back-references instead of inlining.
    pub ref_tracking: bool,
    /// Register the payload type up front so artifacts carry a numeric id.
    pub register_types: bool,
}

impl CodecConfig {
    /// Entry with reference tracking and registration enabled.
    pub fn new(name: CodecName) -> Self {
        Self {
            name,
            ref_tracking: true,
            register_types: true,
        }
    }
}

/// Complete validated configuration.
#[derive(Debug, Clone)]
pub struct BenchConfig {
    pub iterations: IterationCount,
    pub payload: PayloadKind,
    pub verify_round_trip: bool,
    pub codecs: Vec<CodecConfig>,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            iterations: IterationCount::DEFAULT,
            payload: PayloadKind::default(),
            verify_round_trip: false,
            codecs: DEFAULT_CODECS
                .iter()
                .filter_map(|name| CodecName::new(*name).ok())
                .map(CodecConfig::new)
                .collect(),
        }
    }
}

impl BenchConfig {
    /// Apply environment overrides from the process environment.
    pub fn with_env_overrides(self) -> BenchResult<Self> {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    /// Apply environment overrides from an arbitrary lookup.
    pub fn with_overrides_from<F>(mut self, lookup: F) -> BenchResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(ITERATIONS_ENV) {
            let parsed: u64 = value
                .trim()
                .parse()
                .map_err(|_| ValidationError::InvalidFieldValue {
                    field: "iterations",
                    value: value.clone(),
                    reason: format!("{} must be a positive integer", ITERATIONS_ENV),
                })?;
            self.iterations = IterationCount::new(parsed)?;
            tracing::debug!(iterations = parsed, "Iteration count taken from environment");
        }
        Ok(self)
    }
}

/// Values supplied on the command line. They win over every other source.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub iterations: Option<IterationCount>,
    pub payload: Option<PayloadKind>,
    /// Only ever switches verification on.
    pub verify_round_trip: bool,
    /// Codecs to run, in order. Empty keeps the configured list.
    pub codecs: Vec<CodecName>,
}

impl BenchConfig {
    /// Apply command-line overrides.
    ///
    /// A selected codec keeps its configured options if the file has an entry
    /// for it, and gets the defaults otherwise.
    pub fn with_cli_overrides(mut self, overrides: &ConfigOverrides) -> BenchResult<Self> {
        if let Some(iterations) = overrides.iterations {
            self.iterations = iterations;
        }
        if let Some(payload) = overrides.payload {
            self.payload = payload;
        }
        if overrides.verify_round_trip {
            self.verify_round_trip = true;
        }
        if !overrides.codecs.is_empty() {
            let mut seen = HashSet::new();
            let mut codecs = Vec::with_capacity(overrides.codecs.len());
            for name in &overrides.codecs {
                if !seen.insert(name) {
                    return Err(ValidationError::DuplicateCodec {
                        name: name.to_string(),
                    }
                    .into());
                }
                let entry = self
                    .codecs
                    .iter()
                    .find(|c| &c.name == name)
                    .cloned()
                    .unwrap_or_else(|| CodecConfig::new(name.clone()));
                codecs.push(entry);
            }
            self.codecs = codecs;
        }
        Ok(self)
    }
}

/// Configuration loader with strict validation.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load and validate configuration from a YAML file.
    pub fn load_file(path: impl AsRef<Path>) -> BenchResult<BenchConfig> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(BenchError::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| BenchError::Io {
            context: "reading config file",
            source: e,
        })?;

        Self::load_string(&content)
    }

    /// Resolve the full configuration: defaults, then the optional file, then
    /// the environment (read through `lookup`), then command-line overrides.
    pub fn resolve<F>(
        path: Option<&Path>,
        lookup: F,
        overrides: &ConfigOverrides,
    ) -> BenchResult<BenchConfig>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base = match path {
            Some(path) => Self::load_file(path)?,
            None => BenchConfig::default(),
        };
        base.with_overrides_from(lookup)?.with_cli_overrides(overrides)
    }

    /// Load and validate configuration from a YAML string.
    pub fn load_string(content: &str) -> BenchResult<BenchConfig> {
        let raw: RawConfig =
            serde_yaml::from_str(content).map_err(|e| BenchError::ConfigParse {
                message: format!("YAML parse error: {}", e),
            })?;

        Self::validate(raw)
    }

    /// Validate raw configuration and convert to validated types.
    fn validate(raw: RawConfig) -> BenchResult<BenchConfig> {
        let iterations = IterationCount::new(raw.iterations)?;

        let codecs = if raw.codecs.is_empty() {
            BenchConfig::default().codecs
        } else {
            Self::validate_codecs(raw.codecs)?
        };

        Ok(BenchConfig {
            iterations,
            payload: raw.payload,
            verify_round_trip: raw.verify_round_trip,
            codecs,
        })
    }

    /// Validate codec entries, rejecting duplicates.
    fn validate_codecs(raw: Vec<RawCodecConfig>) -> BenchResult<Vec<CodecConfig>> {
        let mut seen = HashSet::new();
        let mut codecs = Vec::with_capacity(raw.len());

        for entry in raw {
            let name = CodecName::new(entry.name)?;
            if !seen.insert(name.clone()) {
                return Err(ValidationError::DuplicateCodec {
                    name: name.to_string(),
                }
                .into());
            }
            codecs.push(CodecConfig {
                name,
                ref_tracking: entry.ref_tracking,
                register_types: entry.register_types,
            });
        }

        Ok(codecs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID_CONFIG: &str = r#"
iterations: 1000
payload: cyclic_graph
verify_round_trip: true
codecs:
  - name: json
  - name: bincode
    register_types: false
  - name: msgpack
    ref_tracking: false
"#;

    #[test]
    fn test_valid_config() {
        let config = ConfigLoader::load_string(VALID_CONFIG).unwrap();
        assert_eq!(config.iterations.get(), 1000);
        assert_eq!(config.payload, PayloadKind::CyclicGraph);
        assert!(config.verify_round_trip);
        assert_eq!(config.codecs.len(), 3);
        assert!(config.codecs[0].ref_tracking && config.codecs[0].register_types);
        assert!(!config.codecs[1].register_types);
        assert!(!config.codecs[2].ref_tracking);
    }

    #[test]
    fn test_defaults() {
        let config = ConfigLoader::load_string("{}").unwrap();
        assert_eq!(config.iterations.get(), 20_000_000);
        assert_eq!(config.payload, PayloadKind::Bean);
        assert!(!config.verify_round_trip);
        let names: Vec<&str> = config.codecs.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, DEFAULT_CODECS);
    }

    #[test]
    fn test_zero_iterations_rejected() {
        let result = ConfigLoader::load_string("iterations: 0");
        assert!(matches!(result, Err(BenchError::Validation(_))));
    }

    #[test]
    fn test_duplicate_codecs() {
        let yaml = r#"
codecs:
  - name: json
  - name: json
"#;
        let result = ConfigLoader::load_string(yaml);
        assert!(matches!(
            result,
            Err(BenchError::Validation(ValidationError::DuplicateCodec { .. }))
        ));
    }

    #[test]
    fn test_invalid_codec_name() {
        let yaml = r#"
codecs:
  - name: "Not Valid"
"#;
        assert!(ConfigLoader::load_string(yaml).is_err());
    }

    #[test]
    fn test_unknown_payload() {
        assert!(matches!(
            ConfigLoader::load_string("payload: tree"),
            Err(BenchError::ConfigParse { .. })
        ));
    }

    #[test]
    fn test_env_override() {
        let config = BenchConfig::default()
            .with_overrides_from(|key| (key == ITERATIONS_ENV).then(|| "5000".to_string()))
            .unwrap();
        assert_eq!(config.iterations.get(), 5000);

        let unchanged = BenchConfig::default().with_overrides_from(|_| None).unwrap();
        assert_eq!(unchanged.iterations, IterationCount::DEFAULT);
    }

    #[test]
    fn test_env_override_invalid() {
        assert!(BenchConfig::default()
            .with_overrides_from(|_| Some("lots".to_string()))
            .is_err());
        assert!(BenchConfig::default()
            .with_overrides_from(|_| Some("0".to_string()))
            .is_err());
    }

    fn iterations(n: u64) -> IterationCount {
        IterationCount::new(n).unwrap()
    }

    fn codec(name: &str) -> CodecName {
        CodecName::new(name).unwrap()
    }

    #[test]
    fn test_resolve_precedence() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(&mut file, VALID_CONFIG.as_bytes()).unwrap();
        let path = Some(file.path());
        let none = ConfigOverrides::default();
        let no_env = |_: &str| None;
        let env = |key: &str| (key == ITERATIONS_ENV).then(|| "7000".to_string());

        // Defaults only.
        let config = ConfigLoader::resolve(None, no_env, &none).unwrap();
        assert_eq!(config.iterations, IterationCount::DEFAULT);
        assert_eq!(config.payload, PayloadKind::Bean);

        // File over defaults.
        let config = ConfigLoader::resolve(path, no_env, &none).unwrap();
        assert_eq!(config.iterations.get(), 1000);
        assert_eq!(config.payload, PayloadKind::CyclicGraph);

        // Environment over file.
        let config = ConfigLoader::resolve(path, env, &none).unwrap();
        assert_eq!(config.iterations.get(), 7000);
        assert_eq!(config.payload, PayloadKind::CyclicGraph);

        // Flags over environment.
        let overrides = ConfigOverrides {
            iterations: Some(iterations(42)),
            payload: Some(PayloadKind::Struct),
            ..Default::default()
        };
        let config = ConfigLoader::resolve(path, env, &overrides).unwrap();
        assert_eq!(config.iterations.get(), 42);
        assert_eq!(config.payload, PayloadKind::Struct);
        // Untouched fields keep the file's values.
        assert!(config.verify_round_trip);
        assert_eq!(config.codecs.len(), 3);
    }

    #[test]
    fn test_cli_codec_selection_keeps_file_options() {
        let config = ConfigLoader::load_string(VALID_CONFIG).unwrap();
        let overrides = ConfigOverrides {
            codecs: vec![codec("msgpack"), codec("yaml")],
            ..Default::default()
        };
        let config = config.with_cli_overrides(&overrides).unwrap();

        let names: Vec<&str> = config.codecs.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["msgpack", "yaml"]);
        // msgpack keeps ref_tracking: false from the file; yaml gets defaults.
        assert!(!config.codecs[0].ref_tracking);
        assert!(config.codecs[1].ref_tracking && config.codecs[1].register_types);
    }

    #[test]
    fn test_cli_duplicate_codecs_rejected() {
        let overrides = ConfigOverrides {
            codecs: vec![codec("json"), codec("json")],
            ..Default::default()
        };
        let result = BenchConfig::default().with_cli_overrides(&overrides);
        assert!(matches!(
            result,
            Err(BenchError::Validation(ValidationError::DuplicateCodec { .. }))
        ));
    }

    #[test]
    fn test_cli_verify_only_switches_on() {
        let on = BenchConfig {
            verify_round_trip: true,
            ..Default::default()
        };
        let config = on.with_cli_overrides(&ConfigOverrides::default()).unwrap();
        assert!(config.verify_round_trip);
    }

    #[test]
    fn test_missing_file() {
        let result = ConfigLoader::load_file("/nonexistent/codecbench.yaml");
        assert!(matches!(result, Err(BenchError::ConfigNotFound { .. })));
    }
}
