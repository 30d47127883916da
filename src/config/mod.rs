//! Configuration layer for lanaddr.
//!
//! This module provides:
//! - CLI argument parsing ([`Cli`], [`Command`])
//! - TOML configuration file parsing ([`TomlConfig`])
//! - Validated configuration ([`ValidatedConfig`])
//! - Configuration file generation ([`write_default_config`])
//! - Default values ([`defaults`])
//!
//! # Priority
//!
//! Configuration values are resolved with the following priority (highest to lowest):
//!
//! 1. **Explicit CLI arguments** - Values explicitly passed via command line
//! 2. **TOML config file** - Values from the configuration file
//! 3. **Built-in defaults** - Hardcoded default values
//!
//! Without `--config`, the file at [`defaults::config_path`] is used when it exists.
//!
//! The `flag-filtered` policy requires a family. Setting a family or flags for any
//! other policy is an error rather than being silently ignored.
//!
//! For flag lists and name patterns (`include`, `exclude`), CLI values **replace**
//! TOML values entirely (not merged). Include and exclude patterns are handled
//! independently.
//!
//! # Boolean Flag Semantics
//!
//! `--first` uses OR semantics with `query.mode = "first"`: it can only enable
//! first-match retrieval, never turn it off.

mod cli;
pub mod defaults;
mod error;
mod toml;
mod validated;

#[cfg(test)]
mod cli_tests;
#[cfg(test)]
mod validated_tests;

pub use cli::{Cli, Command, FamilyArg, FlagArg, FormatArg, PolicyArg};
pub use error::{ConfigError, field};
pub use toml::{TomlConfig, default_config_template};
pub use validated::{ValidatedConfig, write_default_config};
