//! Default values for configuration options.
//!
//! Centralized constants to avoid magic values scattered across the codebase.

use crate::network::Criteria;
use crate::network::RetrievalMode;
use crate::output::OutputFormat;

/// Default classification policy.
pub const CRITERIA: Criteria = Criteria::LanIpv4;

/// Default retrieval mode.
pub const MODE: RetrievalMode = RetrievalMode::AllMatches;

/// Default output format.
pub const FORMAT: OutputFormat = OutputFormat::Text;

/// Default configuration file name inside the user config directory.
pub const CONFIG_FILE: &str = "lanaddr/config.toml";

/// Default location of the configuration file, if the platform has one.
#[must_use]
pub fn config_path() -> Option<std::path::PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_FILE))
}
