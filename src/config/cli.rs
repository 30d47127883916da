//! CLI argument parsing using clap.
//!
//! Defines the command-line interface with all options and subcommands.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::network::{AddressFamily, FlagMask};

/// lanaddr: network interface address lookup
///
/// Enumerates the host's network interfaces and prints the addresses
/// that satisfy the selected policy.
#[derive(Debug, Parser)]
#[command(name = "lanaddr")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Classification policy
    #[arg(long, value_enum)]
    pub policy: Option<PolicyArg>,

    /// Return only the first match instead of all matches
    #[arg(long)]
    pub first: bool,

    /// Address family (flag-filtered policy only)
    #[arg(long, value_enum)]
    pub family: Option<FamilyArg>,

    /// Flags that must be set (flag-filtered policy only, comma-separated or repeated)
    #[arg(long = "flag", value_enum, value_name = "FLAG", value_delimiter = ',')]
    pub flags: Vec<FlagArg>,

    /// Regex pattern for interfaces to include (can be specified multiple times)
    #[arg(long = "include-interface", value_name = "PATTERN")]
    pub include_interfaces: Vec<String>,

    /// Regex pattern for interfaces to exclude (can be specified multiple times)
    #[arg(long = "exclude-interface", value_name = "PATTERN")]
    pub exclude_interfaces: Vec<String>,

    /// Output format
    #[arg(long, value_enum)]
    pub format: Option<FormatArg>,

    /// Path to configuration file
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long, short)]
    pub verbose: bool,
}

/// Subcommands for lanaddr
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate a default configuration file
    Init {
        /// Output path for the configuration file
        #[arg(long, short, default_value = "lanaddr.toml")]
        output: PathBuf,
    },
}

/// Policy argument for CLI parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PolicyArg {
    /// Any non-loopback IPv4 address
    #[value(name = "basic-ipv4")]
    BasicIpv4,
    /// Usable IPv4 LAN addresses
    #[value(name = "lan-ipv4")]
    LanIpv4,
    /// Usable IPv4 and IPv6 LAN addresses
    #[value(name = "lan-dual-stack")]
    LanDualStack,
    /// Running addresses carrying every --flag
    #[value(name = "flag-filtered")]
    FlagFiltered,
}

/// Address family argument for CLI parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FamilyArg {
    /// IPv4 addresses
    #[value(name = "ipv4")]
    V4,
    /// IPv6 addresses
    #[value(name = "ipv6")]
    V6,
}

impl From<FamilyArg> for AddressFamily {
    fn from(arg: FamilyArg) -> Self {
        match arg {
            FamilyArg::V4 => Self::Ipv4,
            FamilyArg::V6 => Self::Ipv6,
        }
    }
}

/// Interface flag argument for CLI parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FlagArg {
    /// Administratively up
    Up,
    /// Broadcast capable
    Broadcast,
    /// Point-to-point link
    #[value(name = "point-to-point")]
    PointToPoint,
    /// Operationally running
    Running,
    /// Multicast capable
    Multicast,
    /// Wireless adapter
    Wireless,
}

impl From<FlagArg> for FlagMask {
    fn from(arg: FlagArg) -> Self {
        match arg {
            FlagArg::Up => Self::UP,
            FlagArg::Broadcast => Self::BROADCAST,
            FlagArg::PointToPoint => Self::POINT_TO_POINT,
            FlagArg::Running => Self::RUNNING,
            FlagArg::Multicast => Self::MULTICAST,
            FlagArg::Wireless => Self::WIRELESS,
        }
    }
}

/// Output format argument for CLI parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    /// Tab-separated lines
    Text,
    /// JSON array
    Json,
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parses CLI arguments from an iterator (useful for testing).
    pub fn parse_from_iter<I, T>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::parse_from(iter)
    }

    /// Returns true if this is the init command.
    #[must_use]
    pub const fn is_init(&self) -> bool {
        matches!(self.command, Some(Command::Init { .. }))
    }
}
