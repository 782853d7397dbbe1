//! Lab configuration module
//!
//! Handles loading of the lab configuration from a TOML file and environment
//! variables. Only the binaries read configuration; the cipher functions take
//! all their parameters explicitly.

use std::env;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::analysis::ENGLISH_ORDER;
use crate::crypto::classical::hill::DEFAULT_MATRIX;
use crate::crypto::HillKey;

/// Lab configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabConfig {
    /// Path to the configuration file
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Whether the file at `config_path` was found and read
    #[serde(skip)]
    pub loaded_from_file: bool,

    /// Hill cipher key matrix
    #[serde(default = "default_hill_key")]
    pub hill_key: [[i64; 2]; 2],

    /// RSA demonstration settings
    #[serde(default)]
    pub rsa: RsaConfig,

    /// Frequency analysis settings
    #[serde(default)]
    pub analysis: AnalysisConfig,

    /// Enable debug logging
    #[serde(default)]
    pub debug: bool,
}

/// RSA demonstration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RsaConfig {
    /// Public exponent used when the prompt is left blank
    #[serde(default = "default_public_exponent")]
    pub default_public_exponent: u64,

    /// How many times the RSA prompts are repeated before giving up
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
}

/// Frequency analysis settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Reference letter order, most frequent first
    #[serde(default = "default_english_order")]
    pub english_order: String,
}

fn default_hill_key() -> [[i64; 2]; 2] {
    DEFAULT_MATRIX
}

fn default_public_exponent() -> u64 {
    17
}

fn default_max_attempts() -> u32 {
    5
}

fn default_english_order() -> String {
    ENGLISH_ORDER.to_string()
}

impl Default for RsaConfig {
    fn default() -> Self {
        Self {
            default_public_exponent: default_public_exponent(),
            max_attempts: default_max_attempts(),
        }
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            english_order: default_english_order(),
        }
    }
}

impl Default for LabConfig {
    fn default() -> Self {
        Self {
            config_path: PathBuf::from("config/cipherlab.toml"),
            loaded_from_file: false,
            hill_key: default_hill_key(),
            rsa: RsaConfig::default(),
            analysis: AnalysisConfig::default(),
            debug: false,
        }
    }
}

impl LabConfig {
    /// Load configuration from file and environment variables.
    ///
    /// A missing file is not an error: the defaults are used and
    /// `loaded_from_file` stays false so the caller can report it once
    /// logging is up.
    pub fn load() -> Result<Self> {
        // Determine config path from environment or use default
        let config_path = env::var("CIPHERLAB_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("config/cipherlab.toml"));

        let mut config = if config_path.exists() {
            let content = fs::read_to_string(&config_path).with_context(|| {
                format!("Failed to read config file: {}", config_path.display())
            })?;
            let mut config = Self::from_toml(&content).with_context(|| {
                format!("Failed to parse config file: {}", config_path.display())
            })?;
            config.loaded_from_file = true;
            config
        } else {
            Self::default()
        };

        config.config_path = config_path;
        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Parse a TOML document; missing fields take their defaults
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&mut self) {
        if let Ok(val) = env::var("CIPHERLAB_DEBUG") {
            self.debug = val.to_lowercase() == "true" || val == "1";
        }
        if let Ok(val) = env::var("CIPHERLAB_RSA_EXPONENT") {
            if let Ok(e) = val.parse() {
                self.rsa.default_public_exponent = e;
            }
        }
        if let Ok(val) = env::var("CIPHERLAB_RSA_MAX_ATTEMPTS") {
            if let Ok(attempts) = val.parse() {
                self.rsa.max_attempts = attempts;
            }
        }
        if let Ok(val) = env::var("CIPHERLAB_HILL_KEY") {
            if let Some(matrix) = parse_matrix(&val) {
                self.hill_key = matrix;
            }
        }
    }

    /// Validate the configuration
    fn validate(&self) -> Result<()> {
        self.hill()
            .context("Configured Hill key cannot be used")?;

        if self.rsa.max_attempts == 0 {
            anyhow::bail!("RSA max_attempts must be at least 1");
        }

        let mut order: Vec<char> = self.analysis.english_order.chars().collect();
        order.sort_unstable();
        if order.into_iter().ne('a'..='z') {
            anyhow::bail!("english_order must contain each letter a-z exactly once");
        }

        Ok(())
    }

    /// The configured Hill key, checked for invertibility
    pub fn hill(&self) -> Result<HillKey> {
        Ok(HillKey::new(self.hill_key)?)
    }
}

/// Parse `"a,b,c,d"` into `[[a, b], [c, d]]`
fn parse_matrix(value: &str) -> Option<[[i64; 2]; 2]> {
    let entries: Vec<i64> = value
        .split(',')
        .map(|part| part.trim().parse().ok())
        .collect::<Option<_>>()?;
    match entries.as_slice() {
        &[a, b, c, d] => Some([[a, b], [c, d]]),
        _ => None,
    }
}
