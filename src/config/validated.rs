//! Validated configuration after merging CLI and TOML sources.
//!
//! This module contains the final, validated configuration that is used
//! by the application. All validation is performed during construction.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::network::{AddressFamily, Criteria, FilterChain, FlagMask, NameFilter, RetrievalMode};
use crate::output::OutputFormat;

use super::cli::{Cli, FormatArg, PolicyArg};
use super::defaults;
use super::error::{ConfigError, field};
use super::toml::TomlConfig;

/// Fully validated configuration ready for use by the application.
///
/// # Construction
///
/// Use [`ValidatedConfig::from_raw`] to create from CLI args and optional TOML config.
/// The function validates all inputs and returns errors for invalid configurations.
#[derive(Debug)]
pub struct ValidatedConfig {
    /// Classification policy
    pub criteria: Criteria,

    /// First match or all matches
    pub mode: RetrievalMode,

    /// Interface name filters narrowing the policy
    pub filter: FilterChain,

    /// Output format
    pub format: OutputFormat,

    /// Config file that was loaded, if any
    pub config_file: Option<PathBuf>,

    /// Verbose logging enabled
    pub verbose: bool,
}

impl fmt::Display for ValidatedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let config_file_str = self
            .config_file
            .as_ref()
            .map_or_else(|| "none".to_string(), |p| p.display().to_string());

        write!(
            f,
            "Config {{ policy: {}, mode: {:?}, format: {}, config_file: {}, \
             include: {}, exclude: {} }}",
            self.criteria,
            self.mode,
            self.format,
            config_file_str,
            self.filter.include_count(),
            self.filter.exclude_count(),
        )
    }
}

impl ValidatedConfig {
    /// Creates a validated configuration from CLI arguments and optional TOML config.
    ///
    /// CLI arguments take precedence over TOML config values.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A policy, mode, family, flag or format value is invalid
    /// - `flag-filtered` is selected without a family
    /// - A family or flags are given for another policy
    /// - Regex patterns are invalid
    pub fn from_raw(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Self, ConfigError> {
        let criteria = Self::resolve_criteria(cli, toml)?;
        let mode = Self::resolve_mode(cli, toml)?;
        let filter = Self::build_filter(cli, toml)?;
        let format = Self::resolve_format(cli, toml)?;

        Ok(Self {
            criteria,
            mode,
            filter,
            format,
            config_file: None,
            verbose: cli.verbose,
        })
    }

    /// Loads and merges configuration from CLI and optional config file.
    ///
    /// If `cli.config` is set, loads the TOML file from that path.
    /// Otherwise the default location is used when a file exists there.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The config file cannot be read or parsed
    /// - The merged configuration is invalid
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let path = cli
            .config
            .clone()
            .or_else(|| defaults::config_path().filter(|p| p.is_file()));

        let toml = path.as_deref().map(TomlConfig::load).transpose()?;

        let mut config = Self::from_raw(cli, toml.as_ref())?;
        config.config_file = path;
        Ok(config)
    }

    fn resolve_criteria(cli: &Cli, toml: Option<&TomlConfig>) -> Result<Criteria, ConfigError> {
        let query = toml.map(|t| &t.query);

        // Priority: CLI explicit > TOML > default
        let policy = match (cli.policy, query.and_then(|q| q.policy.as_deref())) {
            (Some(arg), _) => Policy::from(arg),
            (None, Some(value)) => parse_policy(value)?,
            (None, None) => return Self::reject_flag_options(cli, toml, defaults::CRITERIA),
        };

        if let Policy::Fixed(criteria) = policy {
            return Self::reject_flag_options(cli, toml, criteria);
        }

        let family = match (cli.family, query.and_then(|q| q.family.as_deref())) {
            (Some(arg), _) => arg.into(),
            (None, Some(value)) => parse_family(value)?,
            (None, None) => {
                return Err(ConfigError::missing(
                    field::FAMILY,
                    "Use --family or set query.family in config file",
                ));
            }
        };

        // CLI flags replace TOML flags entirely
        let mask = if cli.flags.is_empty() {
            query
                .map(|q| q.flags.as_slice())
                .unwrap_or_default()
                .iter()
                .map(String::as_str)
                .map(parse_flag)
                .collect::<Result<FlagMask, _>>()?
        } else {
            cli.flags.iter().copied().map(FlagMask::from).collect()
        };

        Ok(Criteria::flag_filtered(family, mask))
    }

    /// Fails if flag-filtered options accompany a fixed policy.
    fn reject_flag_options(
        cli: &Cli,
        toml: Option<&TomlConfig>,
        criteria: Criteria,
    ) -> Result<Criteria, ConfigError> {
        let query = toml.map(|t| &t.query);
        let family_set = cli.family.is_some() || query.is_some_and(|q| q.family.is_some());
        let flags_set = !cli.flags.is_empty() || query.is_some_and(|q| !q.flags.is_empty());

        if family_set {
            return Err(ConfigError::NotApplicable {
                option: field::FAMILY,
                policy: criteria.name(),
            });
        }
        if flags_set {
            return Err(ConfigError::NotApplicable {
                option: field::FLAGS,
                policy: criteria.name(),
            });
        }

        Ok(criteria)
    }

    fn resolve_mode(cli: &Cli, toml: Option<&TomlConfig>) -> Result<RetrievalMode, ConfigError> {
        // --first only enables, it cannot turn a TOML "first" back into "all"
        if cli.first {
            return Ok(RetrievalMode::FirstMatch);
        }

        toml.and_then(|t| t.query.mode.as_deref())
            .map_or(Ok(defaults::MODE), parse_mode)
    }

    fn build_filter(cli: &Cli, toml: Option<&TomlConfig>) -> Result<FilterChain, ConfigError> {
        let filter_section = toml.map(|t| &t.filter);

        // CLI patterns replace TOML patterns; includes and excludes independently
        let includes = if cli.include_interfaces.is_empty() {
            filter_section.map_or(&[][..], |f| f.include.as_slice())
        } else {
            cli.include_interfaces.as_slice()
        };
        let excludes = if cli.exclude_interfaces.is_empty() {
            filter_section.map_or(&[][..], |f| f.exclude.as_slice())
        } else {
            cli.exclude_interfaces.as_slice()
        };

        let mut filter = FilterChain::new();
        for pattern in includes {
            filter = filter.include(compile_pattern(pattern)?);
        }
        for pattern in excludes {
            filter = filter.exclude(compile_pattern(pattern)?);
        }

        Ok(filter)
    }

    fn resolve_format(cli: &Cli, toml: Option<&TomlConfig>) -> Result<OutputFormat, ConfigError> {
        if let Some(arg) = cli.format {
            return Ok(match arg {
                FormatArg::Text => OutputFormat::Text,
                FormatArg::Json => OutputFormat::Json,
            });
        }

        toml.and_then(|t| t.output.format.as_deref())
            .map_or(Ok(defaults::FORMAT), parse_format)
    }
}

/// Writes the default configuration template to a file.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    let template = super::toml::default_config_template();
    std::fs::write(path, template).map_err(|e| ConfigError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Policy selection before the flag-filtered parameters are resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Policy {
    Fixed(Criteria),
    FlagFiltered,
}

impl From<PolicyArg> for Policy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::BasicIpv4 => Self::Fixed(Criteria::BasicIpv4),
            PolicyArg::LanIpv4 => Self::Fixed(Criteria::LanIpv4),
            PolicyArg::LanDualStack => Self::Fixed(Criteria::LanDualStack),
            PolicyArg::FlagFiltered => Self::FlagFiltered,
        }
    }
}

// Helper functions

fn parse_policy(s: &str) -> Result<Policy, ConfigError> {
    match s.to_lowercase().replace('_', "-").as_str() {
        "basic-ipv4" | "basic" => Ok(Policy::Fixed(Criteria::BasicIpv4)),
        "lan-ipv4" | "lan" => Ok(Policy::Fixed(Criteria::LanIpv4)),
        "lan-dual-stack" | "dual-stack" | "dual" => Ok(Policy::Fixed(Criteria::LanDualStack)),
        "flag-filtered" | "flags" => Ok(Policy::FlagFiltered),
        _ => Err(ConfigError::InvalidPolicy {
            value: s.to_string(),
        }),
    }
}

fn parse_mode(s: &str) -> Result<RetrievalMode, ConfigError> {
    match s.to_lowercase().as_str() {
        "first" | "single" => Ok(RetrievalMode::FirstMatch),
        "all" => Ok(RetrievalMode::AllMatches),
        _ => Err(ConfigError::InvalidMode {
            value: s.to_string(),
        }),
    }
}

fn parse_family(s: &str) -> Result<AddressFamily, ConfigError> {
    match s.to_lowercase().as_str() {
        "ipv4" | "v4" | "4" => Ok(AddressFamily::Ipv4),
        "ipv6" | "v6" | "6" => Ok(AddressFamily::Ipv6),
        _ => Err(ConfigError::InvalidFamily {
            value: s.to_string(),
        }),
    }
}

fn parse_flag(s: &str) -> Result<FlagMask, ConfigError> {
    FlagMask::from_name(s).ok_or_else(|| ConfigError::InvalidFlag {
        value: s.to_string(),
    })
}

fn parse_format(s: &str) -> Result<OutputFormat, ConfigError> {
    match s.to_lowercase().as_str() {
        "text" => Ok(OutputFormat::Text),
        "json" => Ok(OutputFormat::Json),
        _ => Err(ConfigError::InvalidFormat {
            value: s.to_string(),
        }),
    }
}

fn compile_pattern(pattern: &str) -> Result<NameFilter, ConfigError> {
    NameFilter::new(pattern).map_err(|e| ConfigError::InvalidRegex {
        pattern: pattern.to_string(),
        source: e,
    })
}
