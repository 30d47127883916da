//! POSIX interface enumeration using `getifaddrs`.

use std::ffi::CStr;
use std::marker::PhantomData;

use crate::network::{EnumerationError, FlagMask, InterfaceSource, RawAddress, RawInterfaceRecord};

/// OS `IFF_*` bits and their canonical counterparts.
const FLAG_MAP: [(libc::c_int, FlagMask); 6] = [
    (libc::IFF_UP, FlagMask::UP),
    (libc::IFF_BROADCAST, FlagMask::BROADCAST),
    (libc::IFF_LOOPBACK, FlagMask::LOOPBACK),
    (libc::IFF_POINTOPOINT, FlagMask::POINT_TO_POINT),
    (libc::IFF_RUNNING, FlagMask::RUNNING),
    (libc::IFF_MULTICAST, FlagMask::MULTICAST),
];

/// POSIX implementation of [`InterfaceSource`] backed by `getifaddrs`.
///
/// # Example
///
/// ```no_run
/// use lanaddr::network::InterfaceSource;
/// use lanaddr::network::platform::PosixSource;
///
/// let records = PosixSource::new().enumerate().expect("getifaddrs failed");
/// for record in records {
///     println!("{}: {:?}", record.name, record.address);
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct PosixSource {
    _private: (),
}

impl PosixSource {
    /// Creates a new POSIX interface source.
    #[must_use]
    pub const fn new() -> Self {
        Self { _private: () }
    }
}

impl InterfaceSource for PosixSource {
    fn enumerate(&self) -> Result<Vec<RawInterfaceRecord>, EnumerationError> {
        let list = IfAddrs::acquire()?;
        let records: Vec<RawInterfaceRecord> = list.iter().map(read_record).collect();
        tracing::debug!(records = records.len(), "Enumerated interfaces via getifaddrs");
        Ok(records)
    }
}

/// Owner of the list returned by `getifaddrs`; frees it on drop.
struct IfAddrs {
    head: *mut libc::ifaddrs,
}

impl IfAddrs {
    fn acquire() -> Result<Self, EnumerationError> {
        let mut head: *mut libc::ifaddrs = std::ptr::null_mut();

        // SAFETY: `head` is a valid out-pointer; on success the OS stores
        // the list head there, and ownership passes to the returned guard.
        let rv = unsafe { libc::getifaddrs(&raw mut head) };
        if rv != 0 {
            let code = std::io::Error::last_os_error().raw_os_error().unwrap_or(rv);
            return Err(EnumerationError::system_call("getifaddrs", code));
        }

        Ok(Self { head })
    }

    const fn iter(&self) -> IfAddrsIter<'_> {
        IfAddrsIter {
            current: self.head,
            _list: PhantomData,
        }
    }
}

impl Drop for IfAddrs {
    fn drop(&mut self) {
        if !self.head.is_null() {
            // SAFETY: `head` came from a successful `getifaddrs` and is freed exactly once.
            unsafe { libc::freeifaddrs(self.head) };
        }
    }
}

/// Borrowing traversal of the `ifa_next` chain; cannot outlive the list.
struct IfAddrsIter<'a> {
    current: *mut libc::ifaddrs,
    _list: PhantomData<&'a IfAddrs>,
}

impl<'a> Iterator for IfAddrsIter<'a> {
    type Item = &'a libc::ifaddrs;

    fn next(&mut self) -> Option<Self::Item> {
        // SAFETY: every node in the chain stays valid while the owning
        // `IfAddrs` is alive, which the `'a` borrow guarantees.
        let entry = unsafe { self.current.as_ref()? };
        self.current = entry.ifa_next;
        Some(entry)
    }
}

/// Deep-copies one list entry into an owned record.
fn read_record(entry: &libc::ifaddrs) -> RawInterfaceRecord {
    let name = if entry.ifa_name.is_null() {
        String::new()
    } else {
        // SAFETY: `ifa_name` is a NUL-terminated string owned by the list.
        unsafe { CStr::from_ptr(entry.ifa_name) }
            .to_string_lossy()
            .into_owned()
    };

    let flags = translate_flags(entry.ifa_flags);
    RawInterfaceRecord::new(name, read_address(entry.ifa_addr), flags)
}

#[allow(clippy::cast_ptr_alignment)] // the OS allocates sockaddr storage for the reported family
fn read_address(sockaddr: *const libc::sockaddr) -> Option<RawAddress> {
    // SAFETY: a non-null `ifa_addr` points to a sockaddr owned by the list.
    let header = unsafe { sockaddr.as_ref()? };

    let address = match i32::from(header.sa_family) {
        libc::AF_INET => {
            // SAFETY: the family tag says this is a `sockaddr_in`.
            let sin = unsafe { &*sockaddr.cast::<libc::sockaddr_in>() };
            RawAddress::Inet {
                s_addr: sin.sin_addr.s_addr,
            }
        }
        libc::AF_INET6 => {
            // SAFETY: the family tag says this is a `sockaddr_in6`.
            let sin6 = unsafe { &*sockaddr.cast::<libc::sockaddr_in6>() };
            RawAddress::Inet6 {
                octets: sin6.sin6_addr.s6_addr,
            }
        }
        family => RawAddress::Unsupported { family },
    };

    Some(address)
}

/// Maps the named `IFF_*` bits to canonical bits and keeps every other OS
/// bit where it is. An unmapped OS bit that lands on a canonical position
/// is dropped so it cannot pose as a named flag.
#[allow(clippy::cast_sign_loss)] // IFF_* constants are small positive bit values
fn translate_flags(os_flags: libc::c_uint) -> FlagMask {
    let mapped_os_bits = FLAG_MAP
        .iter()
        .fold(0, |bits, (os_bit, _)| bits | *os_bit as libc::c_uint);

    let named: FlagMask = FLAG_MAP
        .iter()
        .filter(|(os_bit, _)| os_flags & (*os_bit as libc::c_uint) != 0)
        .map(|(_, flag)| *flag)
        .collect();
    let native = os_flags & !mapped_os_bits & !FlagMask::NAMED_BITS.bits();

    named | FlagMask::from_bits(native)
}
