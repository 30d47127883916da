//! Windows-specific interface enumeration using `GetAdaptersAddresses`.

use crate::network::{EnumerationError, FlagMask, InterfaceSource, RawAddress, RawInterfaceRecord};
use windows::Win32::Foundation::{ERROR_BUFFER_OVERFLOW, ERROR_NO_DATA, NO_ERROR, WIN32_ERROR};
use windows::Win32::NetworkManagement::IpHelper::{
    GAA_FLAG_SKIP_ANYCAST, GAA_FLAG_SKIP_DNS_SERVER, GAA_FLAG_SKIP_MULTICAST,
    GET_ADAPTERS_ADDRESSES_FLAGS, GetAdaptersAddresses, IF_TYPE_IEEE80211,
    IF_TYPE_SOFTWARE_LOOPBACK, IP_ADAPTER_ADDRESSES_LH,
};
use windows::Win32::NetworkManagement::Ndis::IfOperStatusUp;
use windows::Win32::Networking::WinSock::{
    AF_INET, AF_INET6, AF_UNSPEC, SOCKADDR, SOCKADDR_IN, SOCKADDR_IN6,
};

/// Interface type for PPP (Point-to-Point Protocol) adapters.
/// Value from Windows SDK `iptypes.h` - not exported by the `windows` crate.
const IF_TYPE_PPP: u32 = 23;

/// Interface type for tunnel adapters (VPN, etc.).
/// Value from Windows SDK `iptypes.h` - not exported by the `windows` crate.
const IF_TYPE_TUNNEL: u32 = 131;

const CALL: &str = "GetAdaptersAddresses";

/// Windows implementation of [`InterfaceSource`] using `GetAdaptersAddresses`.
///
/// Emits one record per unicast address (and one address-less record for
/// adapters without any). Wireless adapters are preferred in results.
#[derive(Debug, Clone, Default)]
pub struct WindowsSource {
    _private: (),
}

impl WindowsSource {
    /// Creates a new Windows interface source.
    #[must_use]
    pub const fn new() -> Self {
        Self { _private: () }
    }
}

impl InterfaceSource for WindowsSource {
    fn enumerate(&self) -> Result<Vec<RawInterfaceRecord>, EnumerationError> {
        let buffer = get_adapter_addresses()?;
        let records = buffer.as_deref().map_or_else(Vec::new, read_adapters);
        tracing::debug!(records = records.len(), "Enumerated adapters via {CALL}");
        Ok(records)
    }

    fn prefers_wireless(&self) -> bool {
        true
    }
}

/// Walks the adapter list stored in `buffer`.
fn read_adapters(buffer: &[u64]) -> Vec<RawInterfaceRecord> {
    let mut records = Vec::new();
    let mut current = buffer.as_ptr().cast::<IP_ADAPTER_ADDRESSES_LH>();

    // SAFETY: the buffer was filled by GetAdaptersAddresses; every `Next`
    // pointer targets memory inside it, and `buffer` outlives the loop.
    while let Some(adapter) = unsafe { current.as_ref() } {
        read_adapter(adapter, &mut records);
        current = adapter.Next;
    }

    records
}

/// Runs the two-phase `GetAdaptersAddresses` query.
///
/// Phase one asks for the required size, phase two fills a buffer of that
/// size. Returns `None` when the system reports no adapters at all. The
/// buffer is `u64`-backed so the adapter structures are suitably aligned.
fn get_adapter_addresses() -> Result<Option<Vec<u64>>, EnumerationError> {
    let flags = GAA_FLAG_SKIP_ANYCAST | GAA_FLAG_SKIP_MULTICAST | GAA_FLAG_SKIP_DNS_SERVER;
    let family = u32::from(AF_UNSPEC.0);
    let mut size: u32 = 0;

    // SAFETY: a null buffer with size 0 only asks for the required size.
    let result = unsafe { GetAdaptersAddresses(family, flags, None, None, &raw mut size) };

    match WIN32_ERROR(result) {
        ERROR_BUFFER_OVERFLOW => {}
        ERROR_NO_DATA => return Ok(None),
        NO_ERROR if size == 0 => return Ok(None),
        NO_ERROR => {}
        _ => return Err(failure(result)),
    }

    fill_buffer(family, flags, size).map(Some)
}

fn fill_buffer(
    family: u32,
    flags: GET_ADAPTERS_ADDRESSES_FLAGS,
    mut size: u32,
) -> Result<Vec<u64>, EnumerationError> {
    let words = (size as usize).div_ceil(std::mem::size_of::<u64>());
    let mut buffer = vec![0u64; words];

    // SAFETY: `buffer` holds at least `size` bytes and stays alive for the call.
    let result = unsafe {
        GetAdaptersAddresses(
            family,
            flags,
            None,
            Some(buffer.as_mut_ptr().cast()),
            &raw mut size,
        )
    };

    match WIN32_ERROR(result) {
        NO_ERROR => Ok(buffer),
        _ => Err(failure(result)),
    }
}

#[allow(clippy::cast_possible_wrap)] // WIN32_ERROR codes fit in i32
fn failure(result: u32) -> EnumerationError {
    tracing::debug!(
        "{CALL}: {}",
        windows::core::Error::from(WIN32_ERROR(result).to_hresult())
    );
    EnumerationError::system_call(CALL, result as i32)
}

/// Appends one record per unicast address of `adapter`.
fn read_adapter(adapter: &IP_ADAPTER_ADDRESSES_LH, records: &mut Vec<RawInterfaceRecord>) {
    // SAFETY: FriendlyName is a NUL-terminated wide string inside the buffer.
    let name = unsafe { adapter.FriendlyName.to_string() }.unwrap_or_default();
    let flags = adapter_flags(adapter.IfType, adapter.OperStatus == IfOperStatusUp);

    let mut unicast = adapter.FirstUnicastAddress;
    if unicast.is_null() {
        records.push(RawInterfaceRecord::new(name, None, flags));
        return;
    }

    // SAFETY: each unicast entry is valid as long as the parent buffer is alive.
    while let Some(entry) = unsafe { unicast.as_ref() } {
        let address = read_sockaddr(entry.Address.lpSockaddr);
        records.push(RawInterfaceRecord::new(name.clone(), address, flags));
        unicast = entry.Next;
    }
}

/// Synthesizes POSIX-style capability flags from the adapter type and status.
const fn adapter_flags(if_type: u32, oper_up: bool) -> FlagMask {
    let mut flags = match if_type {
        IF_TYPE_SOFTWARE_LOOPBACK => FlagMask::LOOPBACK,
        IF_TYPE_PPP | IF_TYPE_TUNNEL => FlagMask::POINT_TO_POINT,
        IF_TYPE_IEEE80211 => FlagMask::BROADCAST
            .with(FlagMask::MULTICAST)
            .with(FlagMask::WIRELESS),
        _ => FlagMask::BROADCAST.with(FlagMask::MULTICAST),
    };
    if oper_up {
        flags = flags.with(FlagMask::UP).with(FlagMask::RUNNING);
    }
    flags
}

/// Deep-copies a unicast socket address.
///
/// The casts to `SOCKADDR_IN` and `SOCKADDR_IN6` are sound because Windows
/// allocates storage matching the reported family.
#[allow(clippy::cast_ptr_alignment)]
fn read_sockaddr(sockaddr: *const SOCKADDR) -> Option<RawAddress> {
    // SAFETY: a non-null lpSockaddr points to a socket address in the buffer.
    let header = unsafe { sockaddr.as_ref()? };

    let address = match header.sa_family {
        f if f == AF_INET => {
            // SAFETY: We verified the family is AF_INET, so this is a valid cast.
            let sin = unsafe { &*sockaddr.cast::<SOCKADDR_IN>() };
            // SAFETY: every view of the address union is plain bytes.
            let s_addr = unsafe { sin.sin_addr.S_un.S_addr };
            RawAddress::Inet { s_addr }
        }
        f if f == AF_INET6 => {
            // SAFETY: We verified the family is AF_INET6, so this is a valid cast.
            let sin6 = unsafe { &*sockaddr.cast::<SOCKADDR_IN6>() };
            // SAFETY: every view of the address union is plain bytes.
            let octets = unsafe { sin6.sin6_addr.u.Byte };
            RawAddress::Inet6 { octets }
        }
        other => RawAddress::Unsupported {
            family: i32::from(other.0),
        },
    };

    Some(address)
}
