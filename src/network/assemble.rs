//! Result assembly: first-match and all-matches retrieval.

use std::collections::HashSet;
use std::net::IpAddr;

use super::{AddressFamily, AddressFilter, InterfaceAddress};

/// How many matches a query returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RetrievalMode {
    /// Stop at the first match in enumeration order.
    FirstMatch,
    /// Every match in enumeration order.
    #[default]
    AllMatches,
}

/// Ordering applied to an all-matches result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Ordering {
    /// IPv4 entries first, then IPv6, each in enumeration order.
    pub group_by_family: bool,
    /// Wireless entries first within each group.
    pub wireless_first: bool,
}

/// Returns the first address accepted by `filter`.
///
/// Consumes `addresses` only up to the match.
pub fn first_match<I, F>(addresses: I, filter: &F) -> Option<InterfaceAddress>
where
    I: IntoIterator<Item = InterfaceAddress>,
    F: AddressFilter + ?Sized,
{
    addresses.into_iter().find(|address| filter.matches(address))
}

/// Returns every address accepted by `filter`, ordered per `ordering`.
///
/// Repeated `(interface, address)` pairs keep only their first entry.
pub fn all_matches<I, F>(addresses: I, filter: &F, ordering: Ordering) -> Vec<InterfaceAddress>
where
    I: IntoIterator<Item = InterfaceAddress>,
    F: AddressFilter + ?Sized,
{
    let mut seen: HashSet<(String, IpAddr)> = HashSet::new();
    let matches: Vec<InterfaceAddress> = addresses
        .into_iter()
        .filter(|address| filter.matches(address))
        .filter(|address| seen.insert((address.name().to_string(), address.address())))
        .collect();

    apply_ordering(matches, ordering)
}

fn apply_ordering(matches: Vec<InterfaceAddress>, ordering: Ordering) -> Vec<InterfaceAddress> {
    let groups = if ordering.group_by_family {
        let (v4, v6): (Vec<_>, Vec<_>) = matches
            .into_iter()
            .partition(|a| a.family() == AddressFamily::Ipv4);
        vec![v4, v6]
    } else {
        vec![matches]
    };

    groups
        .into_iter()
        .flat_map(|group| {
            if ordering.wireless_first {
                wireless_first(group)
            } else {
                group
            }
        })
        .collect()
}

/// Stable partition moving wireless entries to the front.
fn wireless_first(group: Vec<InterfaceAddress>) -> Vec<InterfaceAddress> {
    let (mut wireless, other): (Vec<_>, Vec<_>) =
        group.into_iter().partition(InterfaceAddress::is_wireless);
    wireless.extend(other);
    wireless
}
