//! Core network types for interface address representation.

use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::ops::{BitAnd, BitOr, BitOrAssign};

use serde::{Deserialize, Serialize};

/// Address family of an interface address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AddressFamily {
    /// 4-byte IPv4 address.
    #[serde(rename = "ipv4")]
    Ipv4,
    /// 16-byte IPv6 address.
    #[serde(rename = "ipv6")]
    Ipv6,
}

impl AddressFamily {
    /// Returns the family of the given address.
    #[must_use]
    pub const fn of(addr: &IpAddr) -> Self {
        match addr {
            IpAddr::V4(_) => Self::Ipv4,
            IpAddr::V6(_) => Self::Ipv6,
        }
    }

    /// Number of address bytes for this family.
    #[must_use]
    pub const fn byte_len(self) -> usize {
        match self {
            Self::Ipv4 => 4,
            Self::Ipv6 => 16,
        }
    }
}

impl fmt::Display for AddressFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ipv4 => write!(f, "IPv4"),
            Self::Ipv6 => write!(f, "IPv6"),
        }
    }
}

/// Platform-independent interface flag bitset.
///
/// Describes the observed capabilities of an interface and, used as a
/// criterion, the set of bits that must all be present. The named flags
/// sit at fixed positions on every platform. Any other bit is an OS flag
/// kept at its native position (e.g. `IFF_NOARP` on POSIX), so masks built
/// with [`FlagMask::from_bits`] can still select on it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FlagMask(u32);

impl FlagMask {
    /// No flags.
    pub const EMPTY: Self = Self(0);
    /// Interface is administratively up.
    pub const UP: Self = Self(1 << 0);
    /// Interface supports broadcast.
    pub const BROADCAST: Self = Self(1 << 1);
    /// Interface is a loopback interface.
    pub const LOOPBACK: Self = Self(1 << 3);
    /// Interface is a point-to-point link (PPP, tunnels).
    pub const POINT_TO_POINT: Self = Self(1 << 4);
    /// Interface is operationally running.
    pub const RUNNING: Self = Self(1 << 6);
    /// Interface supports multicast.
    pub const MULTICAST: Self = Self(1 << 12);
    /// Interface is a wireless (Wi-Fi) adapter.
    pub const WIRELESS: Self = Self(1 << 24);

    /// Every named flag with its canonical name, in display order.
    pub const NAMED: [(&'static str, Self); 7] = [
        ("up", Self::UP),
        ("broadcast", Self::BROADCAST),
        ("loopback", Self::LOOPBACK),
        ("point-to-point", Self::POINT_TO_POINT),
        ("running", Self::RUNNING),
        ("multicast", Self::MULTICAST),
        ("wireless", Self::WIRELESS),
    ];

    /// Union of every named flag.
    pub const NAMED_BITS: Self = Self::UP
        .with(Self::BROADCAST)
        .with(Self::LOOPBACK)
        .with(Self::POINT_TO_POINT)
        .with(Self::RUNNING)
        .with(Self::MULTICAST)
        .with(Self::WIRELESS);

    /// Creates a mask from raw bits.
    #[must_use]
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    /// Returns the raw bits.
    #[must_use]
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Returns true if no bit is set.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns true if every bit of `other` is also set in `self`.
    #[must_use]
    pub const fn contains_all(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Returns true if any bit of `other` is set in `self`.
    #[must_use]
    pub const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    /// Returns `self` with the bits of `other` set.
    #[must_use]
    pub const fn with(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Looks up a single flag by its canonical name (case-insensitive).
    ///
    /// Underscores are accepted in place of dashes.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let normalized = name.trim().to_ascii_lowercase().replace('_', "-");
        Self::NAMED
            .iter()
            .find(|(n, _)| *n == normalized)
            .map(|(_, flag)| *flag)
    }
}

impl BitOr for FlagMask {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.with(rhs)
    }
}

impl BitOrAssign for FlagMask {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for FlagMask {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

impl FromIterator<Self> for FlagMask {
    fn from_iter<I: IntoIterator<Item = Self>>(iter: I) -> Self {
        iter.into_iter().fold(Self::EMPTY, Self::with)
    }
}

impl fmt::Display for FlagMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (name, flag) in Self::NAMED {
            if self.contains_all(flag) {
                if !first {
                    f.write_str("|")?;
                }
                f.write_str(&name.to_ascii_uppercase())?;
                first = false;
            }
        }
        if first {
            f.write_str("-")?;
        }
        Ok(())
    }
}

/// Raw address payload as read from the operating system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawAddress {
    /// `AF_INET`: the in-memory `s_addr` value (network-order bytes).
    Inet {
        /// Value of `sin_addr.s_addr` exactly as the OS stored it.
        s_addr: u32,
    },
    /// `AF_INET6`: the 16 address octets.
    Inet6 {
        /// Address octets in network order.
        octets: [u8; 16],
    },
    /// Any other family (link-layer, packet, ...).
    Unsupported {
        /// OS-specific family tag.
        family: i32,
    },
}

/// One entry of the OS interface list, deep-copied out of OS memory.
///
/// Records are produced by an [`InterfaceSource`](super::InterfaceSource)
/// and consumed once by [`normalize`](super::normalize).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawInterfaceRecord {
    /// Interface name (e.g. `eth0`, `Wi-Fi`).
    pub name: String,
    /// Assigned address, absent when the OS reported none.
    pub address: Option<RawAddress>,
    /// Observed capability flags.
    pub flags: FlagMask,
}

impl RawInterfaceRecord {
    /// Creates a raw record.
    #[must_use]
    pub fn new(name: impl Into<String>, address: Option<RawAddress>, flags: FlagMask) -> Self {
        Self {
            name: name.into(),
            address,
            flags,
        }
    }

    /// Creates an IPv4 record from an address in host notation.
    ///
    /// Mostly useful for tests and mock sources.
    #[must_use]
    pub fn ipv4(name: impl Into<String>, addr: Ipv4Addr, flags: FlagMask) -> Self {
        let s_addr = u32::from_ne_bytes(addr.octets());
        Self::new(name, Some(RawAddress::Inet { s_addr }), flags)
    }

    /// Creates an IPv6 record.
    #[must_use]
    pub fn ipv6(name: impl Into<String>, addr: Ipv6Addr, flags: FlagMask) -> Self {
        let address = RawAddress::Inet6 {
            octets: addr.octets(),
        };
        Self::new(name, Some(address), flags)
    }
}

/// A normalized address of one network interface.
///
/// Immutable once constructed; holds no reference to OS memory.
/// Deserialization goes through [`InterfaceAddress::new`] and rejects
/// input whose name is empty or whose family or text disagree with the
/// address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "SerializedAddress")]
pub struct InterfaceAddress {
    name: String,
    family: AddressFamily,
    address: IpAddr,
    text: String,
    flags: FlagMask,
}

impl InterfaceAddress {
    /// Creates an interface address, deriving family and textual form.
    #[must_use]
    pub fn new(name: impl Into<String>, address: IpAddr, flags: FlagMask) -> Self {
        Self {
            name: name.into(),
            family: AddressFamily::of(&address),
            text: address.to_string(),
            address,
            flags,
        }
    }

    /// Owning interface name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Address family.
    #[must_use]
    pub const fn family(&self) -> AddressFamily {
        self.family
    }

    /// The address itself.
    #[must_use]
    pub const fn address(&self) -> IpAddr {
        self.address
    }

    /// Presentation form (`192.168.1.10`, `2001:db8::1`).
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Flags captured at enumeration time.
    #[must_use]
    pub const fn flags(&self) -> FlagMask {
        self.flags
    }

    /// Address bytes in network order: 4 for IPv4, 16 for IPv6.
    #[must_use]
    pub fn octets(&self) -> Vec<u8> {
        match self.address {
            IpAddr::V4(v4) => v4.octets().to_vec(),
            IpAddr::V6(v6) => v6.octets().to_vec(),
        }
    }

    /// Returns true if the interface carries the wireless hint.
    #[must_use]
    pub const fn is_wireless(&self) -> bool {
        self.flags.contains_all(FlagMask::WIRELESS)
    }
}

/// Reasons a serialized [`InterfaceAddress`] is rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidAddress {
    /// The interface name is empty.
    #[error("interface name must not be empty")]
    EmptyName,

    /// The family field disagrees with the address.
    #[error("family {family} does not match address {address}")]
    FamilyMismatch {
        /// Family as given.
        family: AddressFamily,
        /// Address as given.
        address: IpAddr,
    },

    /// The text field is not the presentation form of the address.
    #[error("text '{text}' does not match address {address}")]
    TextMismatch {
        /// Text as given.
        text: String,
        /// Address as given.
        address: IpAddr,
    },
}

/// Wire shape of [`InterfaceAddress`], checked before conversion.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct SerializedAddress {
    name: String,
    family: AddressFamily,
    address: IpAddr,
    text: String,
    flags: FlagMask,
}

impl TryFrom<SerializedAddress> for InterfaceAddress {
    type Error = InvalidAddress;

    fn try_from(raw: SerializedAddress) -> Result<Self, Self::Error> {
        if raw.name.is_empty() {
            return Err(InvalidAddress::EmptyName);
        }
        if raw.family != AddressFamily::of(&raw.address) {
            return Err(InvalidAddress::FamilyMismatch {
                family: raw.family,
                address: raw.address,
            });
        }

        let addr = Self::new(raw.name, raw.address, raw.flags);
        if addr.text != raw.text {
            return Err(InvalidAddress::TextMismatch {
                text: raw.text,
                address: raw.address,
            });
        }
        Ok(addr)
    }
}

impl fmt::Display for InterfaceAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} [{}]", self.name, self.text, self.flags)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod address_family {
        use super::*;

        #[test]
        fn of_matches_address_kind() {
            assert_eq!(
                AddressFamily::of(&"10.0.0.1".parse().unwrap()),
                AddressFamily::Ipv4
            );
            assert_eq!(
                AddressFamily::of(&"::1".parse().unwrap()),
                AddressFamily::Ipv6
            );
        }

        #[test]
        fn display_formats_correctly() {
            assert_eq!(AddressFamily::Ipv4.to_string(), "IPv4");
            assert_eq!(AddressFamily::Ipv6.to_string(), "IPv6");
        }
    }

    mod flag_mask {
        use super::*;

        #[test]
        fn contains_all_requires_every_bit() {
            let flags = FlagMask::BROADCAST | FlagMask::RUNNING;
            assert!(flags.contains_all(FlagMask::RUNNING));
            assert!(flags.contains_all(FlagMask::BROADCAST | FlagMask::RUNNING));
            assert!(!flags.contains_all(FlagMask::RUNNING | FlagMask::MULTICAST));
        }

        #[test]
        fn empty_mask_is_contained_everywhere() {
            assert!(FlagMask::EMPTY.contains_all(FlagMask::EMPTY));
            assert!(FlagMask::LOOPBACK.contains_all(FlagMask::EMPTY));
        }

        #[test]
        fn from_name_is_case_insensitive() {
            assert_eq!(FlagMask::from_name("Broadcast"), Some(FlagMask::BROADCAST));
            assert_eq!(
                FlagMask::from_name("point_to_point"),
                Some(FlagMask::POINT_TO_POINT)
            );
            assert_eq!(FlagMask::from_name("bogus"), None);
        }

        #[test]
        fn collects_from_iterator() {
            let mask: FlagMask = [FlagMask::UP, FlagMask::RUNNING].into_iter().collect();
            assert_eq!(mask, FlagMask::UP | FlagMask::RUNNING);
        }

        #[test]
        fn named_bits_cover_every_named_flag() {
            for (name, flag) in FlagMask::NAMED {
                assert!(FlagMask::NAMED_BITS.contains_all(flag), "{name}");
            }
            assert!(!FlagMask::NAMED_BITS.contains_all(FlagMask::from_bits(1 << 7)));
        }

        #[test]
        fn display_lists_set_flags() {
            let flags = FlagMask::UP | FlagMask::BROADCAST | FlagMask::RUNNING;
            assert_eq!(flags.to_string(), "UP|BROADCAST|RUNNING");
            assert_eq!(FlagMask::EMPTY.to_string(), "-");
        }
    }

    mod interface_address {
        use super::*;

        #[test]
        fn ipv4_has_four_octets() {
            let addr = InterfaceAddress::new(
                "eth0",
                "192.168.1.10".parse().unwrap(),
                FlagMask::RUNNING,
            );
            assert_eq!(addr.family(), AddressFamily::Ipv4);
            assert_eq!(addr.octets(), vec![192, 168, 1, 10]);
            assert_eq!(addr.text(), "192.168.1.10");
        }

        #[test]
        fn ipv6_text_round_trips() {
            let addr = InterfaceAddress::new("eth0", "2001:db8::1".parse().unwrap(), FlagMask::EMPTY);
            let reparsed: IpAddr = addr.text().parse().unwrap();

            assert_eq!(addr.octets().len(), 16);
            assert_eq!(reparsed, addr.address());
        }

        #[test]
        fn wireless_hint_comes_from_flags() {
            let wifi = InterfaceAddress::new(
                "Wi-Fi",
                "10.0.0.2".parse().unwrap(),
                FlagMask::WIRELESS | FlagMask::RUNNING,
            );
            let eth = InterfaceAddress::new("eth0", "10.0.0.3".parse().unwrap(), FlagMask::RUNNING);
            assert!(wifi.is_wireless());
            assert!(!eth.is_wireless());
        }

        #[test]
        fn serializes_to_json() {
            let addr = InterfaceAddress::new("eth0", "10.0.0.5".parse().unwrap(), FlagMask::RUNNING);
            let json = serde_json::to_value(&addr).unwrap();

            assert_eq!(json["name"], "eth0");
            assert_eq!(json["family"], "ipv4");
            assert_eq!(json["text"], "10.0.0.5");
            assert_eq!(json["flags"], FlagMask::RUNNING.bits());
        }

        #[test]
        fn deserializes_own_json() {
            let addr = InterfaceAddress::new("eth0", "2001:db8::7".parse().unwrap(), FlagMask::UP);
            let json = serde_json::to_string(&addr).unwrap();

            let parsed: InterfaceAddress = serde_json::from_str(&json).unwrap();
            assert_eq!(parsed, addr);
        }

        #[test]
        fn deserialize_rejects_empty_name() {
            let json = r#"{"name":"","family":"ipv4","address":"10.0.0.1","text":"10.0.0.1","flags":0}"#;
            let err = serde_json::from_str::<InterfaceAddress>(json).unwrap_err();
            assert!(err.to_string().contains("name must not be empty"), "{err}");
        }

        #[test]
        fn deserialize_rejects_family_mismatch() {
            let json = r#"{"name":"eth0","family":"ipv6","address":"10.0.0.1","text":"10.0.0.1","flags":0}"#;
            let err = serde_json::from_str::<InterfaceAddress>(json).unwrap_err();
            assert!(err.to_string().contains("does not match address"), "{err}");
        }

        #[test]
        fn deserialize_rejects_text_mismatch() {
            let json = r#"{"name":"eth0","family":"ipv4","address":"10.0.0.1","text":"garbage","flags":0}"#;
            let err = serde_json::from_str::<InterfaceAddress>(json).unwrap_err();
            assert!(err.to_string().contains("'garbage'"), "{err}");
        }
    }

    mod raw_record {
        use super::*;

        #[test]
        fn ipv4_constructor_stores_network_order_bytes() {
            let record = RawInterfaceRecord::ipv4("eth0", Ipv4Addr::new(10, 0, 0, 5), FlagMask::EMPTY);
            let Some(RawAddress::Inet { s_addr }) = record.address else {
                panic!("expected an IPv4 payload");
            };
            assert_eq!(s_addr.to_ne_bytes(), [10, 0, 0, 5]);
        }
    }
}
