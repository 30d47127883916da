//! TOML configuration file parsing.
//!
//! Defines the structure of the configuration file with serde.

use std::path::Path;

use serde::Deserialize;

use super::ConfigError;

/// Root configuration structure from TOML file.
///
/// All fields are optional to allow partial configuration
/// that can be merged with CLI arguments.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    /// Query configuration section
    #[serde(default)]
    pub query: QuerySection,

    /// Interface name filter configuration
    #[serde(default)]
    pub filter: FilterSection,

    /// Output configuration
    #[serde(default)]
    pub output: OutputSection,
}

/// Query configuration section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct QuerySection {
    /// Policy: "basic-ipv4", "lan-ipv4", "lan-dual-stack" or "flag-filtered"
    pub policy: Option<String>,

    /// Retrieval mode: "first" or "all"
    pub mode: Option<String>,

    /// Address family for flag-filtered: "ipv4" or "ipv6"
    pub family: Option<String>,

    /// Flag names that must all be set (flag-filtered only)
    #[serde(default)]
    pub flags: Vec<String>,
}

/// Interface name filter configuration section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FilterSection {
    /// Regex patterns for interfaces to include
    #[serde(default)]
    pub include: Vec<String>,

    /// Regex patterns for interfaces to exclude
    #[serde(default)]
    pub exclude: Vec<String>,
}

/// Output configuration section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputSection {
    /// Output format: "text" or "json"
    pub format: Option<String>,
}

impl TomlConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::from)
    }
}

/// Generates a default configuration file with comments.
#[must_use]
pub fn default_config_template() -> String {
    r#"# lanaddr configuration file

[query]
# Classification policy (default: lan-ipv4)
# Accepted values: "basic-ipv4", "lan-ipv4", "lan-dual-stack", "flag-filtered"
policy = "lan-ipv4"

# Retrieval mode (default: all). "first" stops at the first match.
# mode = "all"

# Address family, required for flag-filtered: "ipv4" or "ipv6"
# family = "ipv4"

# Flags that must all be set for flag-filtered
# Accepted values: up, broadcast, point-to-point, running, multicast, wireless
# flags = ["broadcast", "multicast"]

[filter]
# Regex patterns for interfaces to include (empty = all)
# Note: CLI patterns REPLACE these entirely (not merged)
# include = ["^eth", "^en", "^wlan"]

# Regex patterns for interfaces to exclude
# Note: CLI patterns REPLACE these entirely (not merged)
# exclude = ["^docker", "^veth", "^br-"]

[output]
# Output format (default: text): "text" or "json"
# format = "text"
"#
    .to_string()
}
