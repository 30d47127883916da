//! Platform-specific interface source implementations.
//!
//! This module provides conditional compilation for platform-specific
//! implementations of the [`InterfaceSource`](super::InterfaceSource) trait.
//!
//! # Platform Support
//!
//! - **Unix** (Linux, Android, macOS, iOS, BSDs): `getifaddrs` via `libc`.
//! - **Windows**: `GetAdaptersAddresses` via the `windows` crate.
//! - **Anything else**: [`UnsupportedSource`], which reports no interfaces.
//!
//! [`PlatformSource`] names the backend selected for the current target.

#[cfg(unix)]
mod posix;
mod unsupported;
#[cfg(windows)]
mod windows;

#[cfg(unix)]
pub use posix::PosixSource;
pub use unsupported::UnsupportedSource;
#[cfg(windows)]
pub use windows::WindowsSource;

/// The interface source for the current target.
#[cfg(unix)]
pub type PlatformSource = PosixSource;

/// The interface source for the current target.
#[cfg(windows)]
pub type PlatformSource = WindowsSource;

/// The interface source for the current target.
#[cfg(not(any(unix, windows)))]
pub type PlatformSource = UnsupportedSource;
