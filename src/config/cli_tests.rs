//! Tests for CLI argument parsing.

use super::cli::{Cli, Command, FamilyArg, FlagArg, FormatArg, PolicyArg};

mod parsing {
    use super::*;
    use clap::Parser;

    #[test]
    fn parse_policy_and_first() {
        let cli = Cli::parse_from_iter(["lanaddr", "--policy", "basic-ipv4", "--first"]);

        assert_eq!(cli.policy, Some(PolicyArg::BasicIpv4));
        assert!(cli.first);
    }

    #[test]
    fn parse_all_policies() {
        let cases = [
            ("basic-ipv4", PolicyArg::BasicIpv4),
            ("lan-ipv4", PolicyArg::LanIpv4),
            ("lan-dual-stack", PolicyArg::LanDualStack),
            ("flag-filtered", PolicyArg::FlagFiltered),
        ];

        for (value, expected) in cases {
            let cli = Cli::parse_from_iter(["lanaddr", "--policy", value]);
            assert_eq!(cli.policy, Some(expected), "policy {value}");
        }
    }

    #[test]
    fn parse_flag_filtered_options() {
        let cli = Cli::parse_from_iter([
            "lanaddr",
            "--policy",
            "flag-filtered",
            "--family",
            "ipv6",
            "--flag",
            "multicast",
            "--flag",
            "point-to-point",
        ]);

        assert_eq!(cli.family, Some(FamilyArg::V6));
        assert_eq!(cli.flags, vec![FlagArg::Multicast, FlagArg::PointToPoint]);
    }

    #[test]
    fn flags_comma_separated() {
        let cli = Cli::parse_from_iter(["lanaddr", "--flag", "up,broadcast,wireless"]);

        assert_eq!(
            cli.flags,
            vec![FlagArg::Up, FlagArg::Broadcast, FlagArg::Wireless]
        );
    }

    #[test]
    fn parse_filter_options() {
        let cli = Cli::parse_from_iter([
            "lanaddr",
            "--include-interface",
            "^eth",
            "--include-interface",
            "^wlan",
            "--exclude-interface",
            "^docker",
        ]);

        assert_eq!(cli.include_interfaces, vec!["^eth", "^wlan"]);
        assert_eq!(cli.exclude_interfaces, vec!["^docker"]);
    }

    #[test]
    fn parse_misc_options() {
        let cli = Cli::parse_from_iter([
            "lanaddr",
            "--config",
            "/path/to/config.toml",
            "--format",
            "json",
            "--verbose",
        ]);

        assert_eq!(
            cli.config.as_ref().unwrap().to_str(),
            Some("/path/to/config.toml")
        );
        assert_eq!(cli.format, Some(FormatArg::Json));
        assert!(cli.verbose);
    }

    #[test]
    fn default_values() {
        let cli = Cli::parse_from_iter(["lanaddr"]);

        // Optional fields have no defaults in CLI - None when not specified
        assert!(cli.policy.is_none());
        assert!(cli.family.is_none());
        assert!(cli.format.is_none());
        assert!(cli.config.is_none());
        // Boolean flags default to false
        assert!(!cli.first);
        assert!(!cli.verbose);
        // Vec fields default to empty
        assert!(cli.flags.is_empty());
        assert!(cli.include_interfaces.is_empty());
        assert!(cli.exclude_interfaces.is_empty());
    }

    #[test]
    fn unknown_policy_rejected() {
        let result = Cli::try_parse_from(["lanaddr", "--policy", "wan"]);
        assert!(result.is_err());
    }

    #[test]
    fn unknown_flag_rejected() {
        let result = Cli::try_parse_from(["lanaddr", "--flag", "loopback"]);
        assert!(result.is_err());
    }
}

mod init_command {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn parse_init_with_default_output() {
        let cli = Cli::parse_from_iter(["lanaddr", "init"]);

        assert!(cli.is_init());
        match cli.command {
            Some(Command::Init { output }) => {
                assert_eq!(output, PathBuf::from("lanaddr.toml"));
            }
            _ => panic!("Expected Init command"),
        }
    }

    #[test]
    fn parse_init_with_custom_output() {
        let cli = Cli::parse_from_iter(["lanaddr", "init", "--output", "/custom/path/config.toml"]);

        assert!(cli.is_init());
        match cli.command {
            Some(Command::Init { output }) => {
                assert_eq!(output, PathBuf::from("/custom/path/config.toml"));
            }
            _ => panic!("Expected Init command"),
        }
    }

    #[test]
    fn is_init_false_for_query_mode() {
        let cli = Cli::parse_from_iter(["lanaddr", "--policy", "lan-ipv4"]);

        assert!(!cli.is_init());
    }
}

mod conversions {
    use super::*;
    use crate::network::{AddressFamily, FlagMask};

    #[test]
    fn family_arg_into_address_family() {
        assert_eq!(AddressFamily::from(FamilyArg::V4), AddressFamily::Ipv4);
        assert_eq!(AddressFamily::from(FamilyArg::V6), AddressFamily::Ipv6);
    }

    #[test]
    fn flag_arg_into_mask() {
        let cases = [
            (FlagArg::Up, FlagMask::UP),
            (FlagArg::Broadcast, FlagMask::BROADCAST),
            (FlagArg::PointToPoint, FlagMask::POINT_TO_POINT),
            (FlagArg::Running, FlagMask::RUNNING),
            (FlagArg::Multicast, FlagMask::MULTICAST),
            (FlagArg::Wireless, FlagMask::WIRELESS),
        ];

        for (arg, mask) in cases {
            assert_eq!(FlagMask::from(arg), mask, "{arg:?}");
        }
    }

    #[test]
    fn repeated_flags_combine() {
        let cli = Cli::parse_from_iter(["lanaddr", "--flag", "up", "--flag", "running"]);
        let mask: FlagMask = cli.flags.iter().copied().map(FlagMask::from).collect();

        assert_eq!(mask, FlagMask::UP | FlagMask::RUNNING);
    }
}
