//! lanaddr: network interface enumeration and LAN address classification
//!
//! A library for listing the host's network interface addresses and
//! selecting the ones usable on the local network, with a small CLI on top.
//!
//! ```no_run
//! if let Some(addr) = lanaddr::network::lan_ipv4() {
//!     println!("{} on {}", addr.text(), addr.name());
//! }
//! ```

pub mod config;
pub mod network;
pub mod output;
