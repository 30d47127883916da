//! Interface enumeration trait and error types.

use super::RawInterfaceRecord;
use thiserror::Error;

/// Error type for interface enumeration.
///
/// Only raised when the OS query itself fails. An interface without an
/// address, or a snapshot with no matching entry, is not an error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnumerationError {
    /// The underlying OS call reported failure.
    #[error("{call} failed with OS error {code}")]
    SystemCallFailed {
        /// Name of the failing OS call.
        call: &'static str,
        /// OS error code (`errno` on POSIX, `WIN32_ERROR` on Windows).
        code: i32,
    },
}

impl EnumerationError {
    /// Creates a `SystemCallFailed` error.
    #[must_use]
    pub const fn system_call(call: &'static str, code: i32) -> Self {
        Self::SystemCallFailed { call, code }
    }

    /// Returns the OS error code.
    #[must_use]
    pub const fn code(&self) -> i32 {
        match self {
            Self::SystemCallFailed { code, .. } => *code,
        }
    }
}

/// Source of raw interface records.
///
/// Platform backends implement this in [`platform`](super::platform);
/// tests inject mock implementations.
///
/// # Example
///
/// ```
/// use lanaddr::network::{EnumerationError, FlagMask, InterfaceSource, RawInterfaceRecord};
///
/// struct Fixed(Vec<RawInterfaceRecord>);
///
/// impl InterfaceSource for Fixed {
///     fn enumerate(&self) -> Result<Vec<RawInterfaceRecord>, EnumerationError> {
///         Ok(self.0.clone())
///     }
/// }
///
/// let source = Fixed(vec![RawInterfaceRecord::ipv4(
///     "eth0",
///     "192.168.1.10".parse().unwrap(),
///     FlagMask::BROADCAST | FlagMask::RUNNING,
/// )]);
/// assert_eq!(source.enumerate().unwrap().len(), 1);
/// ```
pub trait InterfaceSource: Send + Sync {
    /// Takes one snapshot of every interface address the OS reports.
    ///
    /// Records come back in OS order. Any OS-owned list is released
    /// before this returns, on success and on failure.
    ///
    /// # Errors
    ///
    /// Returns [`EnumerationError::SystemCallFailed`] when the OS query
    /// reports failure. No retry is attempted.
    fn enumerate(&self) -> Result<Vec<RawInterfaceRecord>, EnumerationError>;

    /// Whether all-matches results should list wireless interfaces first.
    fn prefers_wireless(&self) -> bool {
        false
    }
}

impl<T: InterfaceSource + ?Sized> InterfaceSource for &T {
    fn enumerate(&self) -> Result<Vec<RawInterfaceRecord>, EnumerationError> {
        (*self).enumerate()
    }

    fn prefers_wireless(&self) -> bool {
        (*self).prefers_wireless()
    }
}

impl<T: InterfaceSource + ?Sized> InterfaceSource for Box<T> {
    fn enumerate(&self) -> Result<Vec<RawInterfaceRecord>, EnumerationError> {
        self.as_ref().enumerate()
    }

    fn prefers_wireless(&self) -> bool {
        self.as_ref().prefers_wireless()
    }
}
