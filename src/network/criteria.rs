//! Address classification policies and name filters.
//!
//! # Design
//!
//! - **Policies**: [`Criteria`] names the fixed inclusion policies. One
//!   policy is chosen per query and applied to every record.
//! - **Pure Matchers**: [`NameFilter`] only answers "does this interface
//!   name match?" without include/exclude semantics.
//! - **Filter Chain**: [`FilterChain`] combines matchers:
//!   - Exclude filters: AND logic (must pass ALL excludes)
//!   - Include filters: OR logic (pass ANY include, empty = match all)

use regex::Regex;

use super::{AddressFamily, FlagMask, InterfaceAddress};

/// IPv4 link-local prefix (RFC 3927 auto-configuration range).
pub const IPV4_LINK_LOCAL_PREFIX: &str = "169.254.";

/// IPv6 link-local prefix in presentation form.
pub const IPV6_LINK_LOCAL_PREFIX: &str = "fe80::";

/// Trait for deciding whether an address belongs in a result.
///
/// Filters must be `Send + Sync` so queries can be shared across threads.
pub trait AddressFilter: Send + Sync {
    /// Returns `true` if the address should be included.
    fn matches(&self, address: &InterfaceAddress) -> bool;
}

// ============================================================================
// Criteria - named inclusion policies
// ============================================================================

/// Inclusion policy applied to every address of one enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Criteria {
    /// Any non-loopback IPv4 address.
    BasicIpv4,
    /// IPv4 on a running, broadcast-capable, non-loopback,
    /// non-point-to-point interface, excluding `169.254.0.0/16`.
    LanIpv4,
    /// [`Criteria::LanIpv4`] plus the IPv6 analog, excluding `fe80::`.
    LanDualStack,
    /// Family-matched, running, non-loopback addresses whose flags
    /// include every bit of `mask`.
    FlagFiltered {
        /// Family to match.
        family: AddressFamily,
        /// Bits that must all be set.
        mask: FlagMask,
    },
}

impl Criteria {
    /// Shorthand for [`Criteria::FlagFiltered`].
    #[must_use]
    pub const fn flag_filtered(family: AddressFamily, mask: FlagMask) -> Self {
        Self::FlagFiltered { family, mask }
    }

    /// Stable kebab-case name of the policy.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::BasicIpv4 => "basic-ipv4",
            Self::LanIpv4 => "lan-ipv4",
            Self::LanDualStack => "lan-dual-stack",
            Self::FlagFiltered {
                family: AddressFamily::Ipv4,
                ..
            } => "flag-filtered-ipv4",
            Self::FlagFiltered {
                family: AddressFamily::Ipv6,
                ..
            } => "flag-filtered-ipv6",
        }
    }

    /// Returns true if results are grouped IPv4 first, then IPv6.
    #[must_use]
    pub const fn groups_by_family(&self) -> bool {
        matches!(self, Self::LanDualStack)
    }
}

impl std::fmt::Display for Criteria {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FlagFiltered { mask, .. } => write!(f, "{}({mask})", self.name()),
            _ => f.write_str(self.name()),
        }
    }
}

impl AddressFilter for Criteria {
    fn matches(&self, address: &InterfaceAddress) -> bool {
        classify(address, self)
    }
}

/// Decides whether `address` satisfies `criteria`.
#[must_use]
pub fn classify(address: &InterfaceAddress, criteria: &Criteria) -> bool {
    let flags = address.flags();
    if flags.contains_all(FlagMask::LOOPBACK) {
        return false;
    }

    match *criteria {
        Criteria::BasicIpv4 => address.family() == AddressFamily::Ipv4,
        Criteria::LanIpv4 => address.family() == AddressFamily::Ipv4 && is_lan(address),
        Criteria::LanDualStack => is_lan(address),
        Criteria::FlagFiltered { family, mask } => {
            address.family() == family
                && flags.contains_all(FlagMask::RUNNING)
                && flags.contains_all(mask)
        }
    }
}

/// LAN test shared by both families: running, broadcast-capable, not
/// point-to-point and outside the family's link-local prefix.
fn is_lan(address: &InterfaceAddress) -> bool {
    let flags = address.flags();
    if flags.contains_all(FlagMask::POINT_TO_POINT)
        || !flags.contains_all(FlagMask::BROADCAST | FlagMask::RUNNING)
    {
        return false;
    }

    let link_local_prefix = match address.family() {
        AddressFamily::Ipv4 => IPV4_LINK_LOCAL_PREFIX,
        AddressFamily::Ipv6 => IPV6_LINK_LOCAL_PREFIX,
    };
    if address.text().starts_with(link_local_prefix) {
        tracing::trace!(
            interface = address.name(),
            address = address.text(),
            "Skipping link-local address"
        );
        return false;
    }

    true
}

// ============================================================================
// NameFilter - Pure matcher by interface name
// ============================================================================

/// Matches addresses whose interface name matches a regex.
///
/// # Examples
///
/// ```
/// use lanaddr::network::{AddressFilter, FlagMask, InterfaceAddress, NameFilter};
///
/// let filter = NameFilter::new(r"^eth").unwrap();
///
/// let eth0 = InterfaceAddress::new("eth0", "10.0.0.1".parse().unwrap(), FlagMask::EMPTY);
/// let wlan0 = InterfaceAddress::new("wlan0", "10.0.0.2".parse().unwrap(), FlagMask::EMPTY);
///
/// assert!(filter.matches(&eth0));
/// assert!(!filter.matches(&wlan0));
/// ```
#[derive(Debug, Clone)]
pub struct NameFilter {
    pattern: Regex,
}

impl NameFilter {
    /// Creates a name filter with the given regex pattern.
    ///
    /// # Errors
    ///
    /// Returns an error if the regex pattern is invalid.
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
        })
    }

    /// Returns a reference to the regex pattern.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)] // Regex is not a const type
    pub fn pattern(&self) -> &Regex {
        &self.pattern
    }
}

impl AddressFilter for NameFilter {
    fn matches(&self, address: &InterfaceAddress) -> bool {
        self.pattern.is_match(address.name())
    }
}

// ============================================================================
// FilterChain - Include OR / Exclude AND semantics
// ============================================================================

/// Filter chain with include/exclude semantics.
///
/// Evaluation order:
/// 1. **Exclude filters (AND)**: Any match → reject.
/// 2. **Include filters (OR)**: Any match → accept. Empty includes = match all.
///
/// # Examples
///
/// ```
/// use lanaddr::network::{AddressFilter, FilterChain, FlagMask, InterfaceAddress, NameFilter};
///
/// let chain = FilterChain::new()
///     .exclude(NameFilter::new("^docker").unwrap())
///     .include(NameFilter::new("^(eth|wlan)").unwrap());
///
/// let eth = InterfaceAddress::new("eth0", "10.0.0.1".parse().unwrap(), FlagMask::EMPTY);
/// let docker = InterfaceAddress::new("docker0", "172.17.0.1".parse().unwrap(), FlagMask::EMPTY);
/// let tun = InterfaceAddress::new("tun0", "10.8.0.1".parse().unwrap(), FlagMask::EMPTY);
///
/// assert!(chain.matches(&eth));
/// assert!(!chain.matches(&docker));
/// assert!(!chain.matches(&tun));
/// ```
#[derive(Default)]
pub struct FilterChain {
    includes: Vec<Box<dyn AddressFilter>>,
    excludes: Vec<Box<dyn AddressFilter>>,
}

impl FilterChain {
    /// Creates an empty filter chain (matches all addresses).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an include filter (OR semantics).
    #[must_use]
    pub fn include<F: AddressFilter + 'static>(mut self, filter: F) -> Self {
        self.includes.push(Box::new(filter));
        self
    }

    /// Adds an exclude filter (AND semantics - must not match ANY).
    #[must_use]
    pub fn exclude<F: AddressFilter + 'static>(mut self, filter: F) -> Self {
        self.excludes.push(Box::new(filter));
        self
    }

    /// Returns the number of include filters.
    #[must_use]
    pub fn include_count(&self) -> usize {
        self.includes.len()
    }

    /// Returns the number of exclude filters.
    #[must_use]
    pub fn exclude_count(&self) -> usize {
        self.excludes.len()
    }

    /// Returns true if no filters are configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.includes.is_empty() && self.excludes.is_empty()
    }
}

impl AddressFilter for FilterChain {
    fn matches(&self, address: &InterfaceAddress) -> bool {
        if self.excludes.iter().any(|f| f.matches(address)) {
            return false;
        }

        self.includes.is_empty() || self.includes.iter().any(|f| f.matches(address))
    }
}

impl std::fmt::Debug for FilterChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilterChain")
            .field("include_count", &self.includes.len())
            .field("exclude_count", &self.excludes.len())
            .finish()
    }
}

/// Matches every address.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAll;

impl AddressFilter for AcceptAll {
    fn matches(&self, _address: &InterfaceAddress) -> bool {
        true
    }
}

impl<T: AddressFilter + ?Sized> AddressFilter for &T {
    fn matches(&self, address: &InterfaceAddress) -> bool {
        (*self).matches(address)
    }
}

impl AddressFilter for Box<dyn AddressFilter> {
    fn matches(&self, address: &InterfaceAddress) -> bool {
        self.as_ref().matches(address)
    }
}
