//! Error types for configuration parsing and validation.

use std::path::PathBuf;

use thiserror::Error;

/// Error type for configuration operations.
///
/// Covers errors from parsing, validation, and file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("Failed to read config file '{}': {source}", path.display())]
    FileRead {
        /// Path to the config file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse the TOML configuration.
    #[error("Failed to parse TOML config: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Failed to write configuration file (for init command).
    #[error("Failed to write config file '{}': {source}", path.display())]
    FileWrite {
        /// Path to the config file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Missing required field that must be provided by CLI or config file.
    #[error("Missing required field: {field}. {hint}")]
    MissingRequired {
        /// Name of the missing field
        field: &'static str,
        /// Hint for how to provide the value
        hint: &'static str,
    },

    /// Invalid policy name.
    #[error(
        "Invalid policy '{value}': expected basic-ipv4, lan-ipv4, lan-dual-stack, or flag-filtered"
    )]
    InvalidPolicy {
        /// The invalid value provided
        value: String,
    },

    /// Invalid retrieval mode.
    #[error("Invalid mode '{value}': expected first or all")]
    InvalidMode {
        /// The invalid value provided
        value: String,
    },

    /// Invalid address family value.
    #[error("Invalid address family '{value}': expected ipv4 or ipv6")]
    InvalidFamily {
        /// The invalid value provided
        value: String,
    },

    /// Unknown interface flag name.
    #[error("Invalid flag '{value}'")]
    InvalidFlag {
        /// The invalid value provided
        value: String,
    },

    /// Invalid output format.
    #[error("Invalid output format '{value}': expected text or json")]
    InvalidFormat {
        /// The invalid value provided
        value: String,
    },

    /// Option given for a policy that does not use it.
    #[error("'{option}' only applies to the flag-filtered policy, not {policy}")]
    NotApplicable {
        /// The option that was set
        option: &'static str,
        /// The selected policy
        policy: &'static str,
    },

    /// Invalid regex pattern for interface filtering.
    #[error("Invalid regex pattern '{pattern}': {source}")]
    InvalidRegex {
        /// The invalid pattern
        pattern: String,
        /// Underlying regex error
        #[source]
        source: regex::Error,
    },
}

/// Well-known field names for `MissingRequired` errors.
///
/// Use these constants for compile-time safety when matching field names.
pub mod field {
    /// The address family field.
    pub const FAMILY: &str = "family";
    /// The flags field.
    pub const FLAGS: &str = "flags";
}

impl ConfigError {
    /// Creates a `MissingRequired` error for a required field.
    #[must_use]
    pub const fn missing(field: &'static str, hint: &'static str) -> Self {
        Self::MissingRequired { field, hint }
    }
}
