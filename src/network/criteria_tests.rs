//! Tests for address classification policies and name filters.

use super::criteria::*;
use super::{AddressFamily, FlagMask, InterfaceAddress};

// ============================================================================
// Test Fixtures
// ============================================================================

const LAN: FlagMask = FlagMask::UP
    .with(FlagMask::BROADCAST)
    .with(FlagMask::RUNNING)
    .with(FlagMask::MULTICAST);

fn addr(name: &str, ip: &str, flags: FlagMask) -> InterfaceAddress {
    InterfaceAddress::new(name, ip.parse().unwrap(), flags)
}

fn eth_v4() -> InterfaceAddress {
    addr("eth0", "192.168.1.10", LAN)
}

fn eth_v6() -> InterfaceAddress {
    addr("eth0", "2001:db8::1", LAN)
}

fn loopback_v4() -> InterfaceAddress {
    addr("lo", "127.0.0.1", FlagMask::UP | FlagMask::LOOPBACK | FlagMask::RUNNING)
}

fn loopback_v6() -> InterfaceAddress {
    addr("lo", "::1", FlagMask::UP | FlagMask::LOOPBACK | FlagMask::RUNNING)
}

fn ppp_v4() -> InterfaceAddress {
    addr(
        "ppp0",
        "10.64.0.2",
        FlagMask::UP | FlagMask::POINT_TO_POINT | FlagMask::RUNNING,
    )
}

fn all_policies() -> Vec<Criteria> {
    vec![
        Criteria::BasicIpv4,
        Criteria::LanIpv4,
        Criteria::LanDualStack,
        Criteria::flag_filtered(AddressFamily::Ipv4, FlagMask::EMPTY),
        Criteria::flag_filtered(AddressFamily::Ipv6, FlagMask::EMPTY),
        Criteria::flag_filtered(AddressFamily::Ipv4, FlagMask::LOOPBACK),
        Criteria::flag_filtered(AddressFamily::Ipv6, FlagMask::LOOPBACK),
    ]
}

// ============================================================================
// Policy-independent properties
// ============================================================================

mod loopback {
    use super::*;

    #[test]
    fn no_policy_includes_loopback() {
        for criteria in all_policies() {
            assert!(!classify(&loopback_v4(), &criteria), "{criteria} took lo v4");
            assert!(!classify(&loopback_v6(), &criteria), "{criteria} took lo v6");
        }
    }

    #[test]
    fn loopback_flag_wins_over_address() {
        let odd = addr("lo0", "192.168.7.7", LAN | FlagMask::LOOPBACK);
        for criteria in all_policies() {
            assert!(!classify(&odd, &criteria));
        }
    }
}

// ============================================================================
// basic-ipv4
// ============================================================================

mod basic_ipv4 {
    use super::*;

    #[test]
    fn accepts_any_non_loopback_ipv4() {
        let bare = addr("eth1", "10.1.1.1", FlagMask::EMPTY);
        assert!(classify(&bare, &Criteria::BasicIpv4));
        assert!(classify(&ppp_v4(), &Criteria::BasicIpv4));
        assert!(classify(&addr("eth0", "169.254.3.4", LAN), &Criteria::BasicIpv4));
    }

    #[test]
    fn rejects_ipv6() {
        assert!(!classify(&eth_v6(), &Criteria::BasicIpv4));
    }
}

// ============================================================================
// lan-ipv4
// ============================================================================

mod lan_ipv4 {
    use super::*;

    #[test]
    fn accepts_running_broadcast_interface() {
        assert!(classify(&eth_v4(), &Criteria::LanIpv4));
        let minimal = addr("eth0", "192.168.1.10", FlagMask::BROADCAST | FlagMask::RUNNING);
        assert!(classify(&minimal, &Criteria::LanIpv4));
    }

    #[test]
    fn rejects_link_local_even_with_matching_flags() {
        let auto = addr("wlan0", "169.254.3.4", FlagMask::BROADCAST | FlagMask::RUNNING);
        assert!(!classify(&auto, &Criteria::LanIpv4));
    }

    #[test]
    fn prefix_match_is_textual() {
        let near_miss = addr("eth0", "169.25.4.1", LAN);
        assert!(classify(&near_miss, &Criteria::LanIpv4));
    }

    #[test]
    fn rejects_point_to_point() {
        let p2p_broadcast = addr("tun0", "10.8.0.2", LAN | FlagMask::POINT_TO_POINT);
        assert!(!classify(&ppp_v4(), &Criteria::LanIpv4));
        assert!(!classify(&p2p_broadcast, &Criteria::LanIpv4));
    }

    #[test]
    fn requires_broadcast_and_running() {
        let down = addr("eth0", "192.168.1.10", FlagMask::UP | FlagMask::BROADCAST);
        let no_broadcast = addr("eth0", "192.168.1.10", FlagMask::UP | FlagMask::RUNNING);
        assert!(!classify(&down, &Criteria::LanIpv4));
        assert!(!classify(&no_broadcast, &Criteria::LanIpv4));
    }

    #[test]
    fn rejects_ipv6() {
        assert!(!classify(&eth_v6(), &Criteria::LanIpv4));
    }
}

// ============================================================================
// lan-dual-stack
// ============================================================================

mod lan_dual_stack {
    use super::*;

    #[test]
    fn accepts_both_families() {
        assert!(classify(&eth_v4(), &Criteria::LanDualStack));
        assert!(classify(&eth_v6(), &Criteria::LanDualStack));
    }

    #[test]
    fn rejects_ipv6_link_local() {
        assert!(!classify(&addr("eth0", "fe80::1", LAN), &Criteria::LanDualStack));
        assert!(!classify(
            &addr("eth0", "fe80::a00:27ff:fe4e:66a1", LAN),
            &Criteria::LanDualStack
        ));
    }

    #[test]
    fn keeps_ipv4_link_local_exclusion() {
        assert!(!classify(&addr("eth0", "169.254.9.9", LAN), &Criteria::LanDualStack));
    }

    #[test]
    fn ipv6_requires_lan_flags() {
        let p2p = addr("tun0", "2001:db8::5", LAN | FlagMask::POINT_TO_POINT);
        let down = addr("eth0", "2001:db8::6", FlagMask::BROADCAST);
        assert!(!classify(&p2p, &Criteria::LanDualStack));
        assert!(!classify(&down, &Criteria::LanDualStack));
    }

    #[test]
    fn groups_by_family() {
        assert!(Criteria::LanDualStack.groups_by_family());
        assert!(!Criteria::LanIpv4.groups_by_family());
    }
}

// ============================================================================
// flag-filtered
// ============================================================================

mod flag_filtered {
    use super::*;

    #[test]
    fn empty_mask_means_running_non_loopback_family_match() {
        let v4 = Criteria::flag_filtered(AddressFamily::Ipv4, FlagMask::EMPTY);
        assert!(classify(&ppp_v4(), &v4));
        assert!(classify(&addr("eth0", "169.254.1.1", FlagMask::RUNNING), &v4));
        assert!(!classify(&addr("eth0", "10.0.0.1", FlagMask::UP), &v4));
        assert!(!classify(&eth_v6(), &v4));
    }

    #[test]
    fn mask_must_be_subset_of_flags() {
        let mask = FlagMask::BROADCAST | FlagMask::MULTICAST;
        let v4 = Criteria::flag_filtered(AddressFamily::Ipv4, mask);

        assert!(classify(&eth_v4(), &v4));
        let partial = addr("eth0", "10.0.0.1", FlagMask::RUNNING | FlagMask::BROADCAST);
        assert!(!classify(&partial, &v4));
    }

    #[test]
    fn ipv6_keeps_link_local() {
        let v6 = Criteria::flag_filtered(AddressFamily::Ipv6, FlagMask::BROADCAST);
        assert!(classify(&addr("eth0", "fe80::1", LAN), &v6));
        assert!(!classify(&eth_v4(), &v6));
    }

    #[test]
    fn wireless_mask_selects_wifi_only() {
        let v4 = Criteria::flag_filtered(AddressFamily::Ipv4, FlagMask::WIRELESS);
        let wifi = addr("Wi-Fi", "192.168.1.20", LAN | FlagMask::WIRELESS);
        assert!(classify(&wifi, &v4));
        assert!(!classify(&eth_v4(), &v4));
    }

    #[test]
    fn every_result_satisfies_mask() {
        let mask = FlagMask::UP | FlagMask::BROADCAST;
        let criteria = Criteria::flag_filtered(AddressFamily::Ipv4, mask);
        let candidates = [eth_v4(), ppp_v4(), loopback_v4(), addr("eth2", "10.2.2.2", LAN)];

        for candidate in candidates.iter().filter(|a| classify(a, &criteria)) {
            assert_eq!(candidate.flags() & mask, mask);
        }
    }
}

// ============================================================================
// Criteria naming
// ============================================================================

mod naming {
    use super::*;

    #[test]
    fn names_are_kebab_case() {
        assert_eq!(Criteria::BasicIpv4.name(), "basic-ipv4");
        assert_eq!(Criteria::LanIpv4.name(), "lan-ipv4");
        assert_eq!(Criteria::LanDualStack.name(), "lan-dual-stack");
        assert_eq!(
            Criteria::flag_filtered(AddressFamily::Ipv6, FlagMask::EMPTY).name(),
            "flag-filtered-ipv6"
        );
    }

    #[test]
    fn display_includes_mask() {
        let criteria = Criteria::flag_filtered(AddressFamily::Ipv4, FlagMask::BROADCAST);
        assert_eq!(criteria.to_string(), "flag-filtered-ipv4(BROADCAST)");
    }
}

// ============================================================================
// NameFilter / FilterChain
// ============================================================================

mod name_filter {
    use super::*;

    #[test]
    fn matches_pattern() {
        let filter = NameFilter::new("^wlan").unwrap();
        assert!(filter.matches(&addr("wlan0", "10.0.0.1", LAN)));
        assert!(!filter.matches(&eth_v4()));
    }

    #[test]
    fn invalid_pattern_is_error() {
        assert!(NameFilter::new("[invalid").is_err());
    }

    #[test]
    fn pattern_accessor() {
        let filter = NameFilter::new("^eth").unwrap();
        assert_eq!(filter.pattern().as_str(), "^eth");
    }
}

mod filter_chain {
    use super::*;

    #[test]
    fn empty_chain_matches_all() {
        let chain = FilterChain::new();
        assert!(chain.is_empty());
        assert!(chain.matches(&eth_v4()));
        assert!(chain.matches(&loopback_v4()));
    }

    #[test]
    fn exclude_wins_over_include() {
        let chain = FilterChain::new()
            .include(NameFilter::new("^eth").unwrap())
            .exclude(NameFilter::new("^eth0$").unwrap());
        assert!(!chain.matches(&eth_v4()));
        assert!(chain.matches(&addr("eth1", "10.0.0.1", LAN)));
    }

    #[test]
    fn includes_are_ored() {
        let chain = FilterChain::new()
            .include(NameFilter::new("^eth").unwrap())
            .include(NameFilter::new("^wlan").unwrap());
        assert!(chain.matches(&eth_v4()));
        assert!(chain.matches(&addr("wlan0", "10.0.0.1", LAN)));
        assert!(!chain.matches(&addr("docker0", "172.17.0.1", LAN)));
    }

    #[test]
    fn counts_filters() {
        let chain = FilterChain::new()
            .include(NameFilter::new("a").unwrap())
            .exclude(NameFilter::new("b").unwrap())
            .exclude(NameFilter::new("c").unwrap());
        assert_eq!(chain.include_count(), 1);
        assert_eq!(chain.exclude_count(), 2);
        assert!(!chain.is_empty());
    }

    #[test]
    fn chain_accepts_criteria_as_filter() {
        let chain = FilterChain::new().include(Criteria::LanIpv4);
        assert!(chain.matches(&eth_v4()));
        assert!(!chain.matches(&ppp_v4()));
    }

    #[test]
    fn debug_impl_shows_counts() {
        let chain = FilterChain::new().include(AcceptAll);
        let debug_str = format!("{chain:?}");
        assert!(debug_str.contains("include_count: 1"));
    }
}
