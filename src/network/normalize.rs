//! Conversion of raw OS records into [`InterfaceAddress`] values.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use super::{InterfaceAddress, RawAddress, RawInterfaceRecord};

/// Converts a raw record into its canonical form.
///
/// Returns `None` when the record is not applicable: no address, an
/// address family other than IPv4/IPv6, or an empty interface name.
#[must_use]
pub fn normalize(record: RawInterfaceRecord) -> Option<InterfaceAddress> {
    if record.name.is_empty() {
        tracing::trace!("Skipping interface record without a name");
        return None;
    }

    let Some(raw) = record.address else {
        tracing::trace!(interface = %record.name, "Skipping interface without an address");
        return None;
    };

    let address = match raw {
        RawAddress::Inet { s_addr } => IpAddr::V4(ipv4_from_s_addr(s_addr)),
        RawAddress::Inet6 { octets } => IpAddr::V6(Ipv6Addr::from(octets)),
        RawAddress::Unsupported { family } => {
            tracing::trace!(interface = %record.name, family, "Skipping non-IP address family");
            return None;
        }
    };

    Some(InterfaceAddress::new(record.name, address, record.flags))
}

/// `s_addr` holds network-order bytes in memory regardless of host
/// endianness, so the native byte view is already the octet order.
const fn ipv4_from_s_addr(s_addr: u32) -> Ipv4Addr {
    let [a, b, c, d] = s_addr.to_ne_bytes();
    Ipv4Addr::new(a, b, c, d)
}
