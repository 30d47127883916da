//! Network interface enumeration and classification.
//!
//! This module provides types and traits for:
//! - Representing interface addresses ([`InterfaceAddress`], [`FlagMask`])
//! - Enumerating raw OS records ([`InterfaceSource`], [`platform`])
//! - Normalizing records ([`normalize`])
//! - Classifying addresses ([`Criteria`], [`classify`], [`FilterChain`])
//! - Assembling results ([`RetrievalMode`])
//! - Running complete queries ([`InterfaceQuery`])

mod address;
pub mod assemble;
mod criteria;
mod normalize;
pub mod platform;
mod query;
mod source;

#[cfg(test)]
mod criteria_tests;

pub use address::{
    AddressFamily, FlagMask, InterfaceAddress, InvalidAddress, RawAddress, RawInterfaceRecord,
};
pub use assemble::RetrievalMode;
pub use criteria::{
    AcceptAll, AddressFilter, Criteria, FilterChain, IPV4_LINK_LOCAL_PREFIX,
    IPV6_LINK_LOCAL_PREFIX, NameFilter, classify,
};
pub use normalize::normalize;
pub use query::{
    InterfaceQuery, basic_ipv4, basic_ipv4_all, flag_filtered_all, lan_dual_stack_all, lan_ipv4,
    lan_ipv4_all,
};
pub use source::{EnumerationError, InterfaceSource};
