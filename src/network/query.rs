//! Public query operations over an [`InterfaceSource`].
//!
//! Each call takes one fresh snapshot, normalizes it, classifies every
//! record against a single [`Criteria`] and assembles the result. The
//! infallible operations log enumeration failures and return an empty
//! result; the `try_*` variants hand the error to the caller instead.

use super::assemble::{self, Ordering, RetrievalMode};
use super::platform::PlatformSource;
use super::{
    AcceptAll, AddressFamily, AddressFilter, Criteria, EnumerationError, FlagMask,
    InterfaceAddress, InterfaceSource, normalize,
};

/// Runs classification queries against an interface source.
///
/// # Example
///
/// ```no_run
/// use lanaddr::network::InterfaceQuery;
///
/// let query = InterfaceQuery::platform();
/// match query.lan_ipv4() {
///     Some(addr) => println!("advertise {} on {}", addr.text(), addr.name()),
///     None => println!("no usable LAN address"),
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct InterfaceQuery<S> {
    source: S,
}

impl InterfaceQuery<PlatformSource> {
    /// Creates a query over the backend selected for this target.
    #[must_use]
    pub fn platform() -> Self {
        Self::new(PlatformSource::default())
    }
}

impl<S: InterfaceSource> InterfaceQuery<S> {
    /// Creates a query over the given source.
    #[must_use]
    pub const fn new(source: S) -> Self {
        Self { source }
    }

    /// Returns a reference to the underlying source.
    pub const fn source(&self) -> &S {
        &self.source
    }

    /// First non-loopback IPv4 address.
    #[must_use]
    pub fn basic_ipv4(&self) -> Option<InterfaceAddress> {
        self.first(&Criteria::BasicIpv4)
    }

    /// Every non-loopback IPv4 address.
    #[must_use]
    pub fn basic_ipv4_all(&self) -> Vec<InterfaceAddress> {
        self.all(&Criteria::BasicIpv4)
    }

    /// First usable IPv4 LAN address.
    #[must_use]
    pub fn lan_ipv4(&self) -> Option<InterfaceAddress> {
        self.first(&Criteria::LanIpv4)
    }

    /// Every usable IPv4 LAN address.
    #[must_use]
    pub fn lan_ipv4_all(&self) -> Vec<InterfaceAddress> {
        self.all(&Criteria::LanIpv4)
    }

    /// Every usable LAN address of either family, IPv4 entries first.
    #[must_use]
    pub fn lan_dual_stack_all(&self) -> Vec<InterfaceAddress> {
        self.all(&Criteria::LanDualStack)
    }

    /// Every running, non-loopback address of `family` carrying all bits of `mask`.
    #[must_use]
    pub fn flag_filtered_all(
        &self,
        family: AddressFamily,
        mask: FlagMask,
    ) -> Vec<InterfaceAddress> {
        self.all(&Criteria::flag_filtered(family, mask))
    }

    /// First address matching `criteria`, or `None` (also on enumeration failure).
    #[must_use]
    pub fn first(&self, criteria: &Criteria) -> Option<InterfaceAddress> {
        self.select(criteria, RetrievalMode::FirstMatch, &AcceptAll)
            .into_iter()
            .next()
    }

    /// Every address matching `criteria`; empty on enumeration failure.
    #[must_use]
    pub fn all(&self, criteria: &Criteria) -> Vec<InterfaceAddress> {
        self.select(criteria, RetrievalMode::AllMatches, &AcceptAll)
    }

    /// Runs `criteria` narrowed by `extra`, in the given mode.
    ///
    /// Enumeration failures are logged once and yield an empty result.
    #[must_use]
    pub fn select<F>(
        &self,
        criteria: &Criteria,
        mode: RetrievalMode,
        extra: &F,
    ) -> Vec<InterfaceAddress>
    where
        F: AddressFilter + ?Sized,
    {
        self.try_select(criteria, mode, extra).unwrap_or_else(|e| {
            tracing::error!(
                policy = %criteria,
                code = e.code(),
                "Interface enumeration failed: {e}"
            );
            Vec::new()
        })
    }

    /// Like [`first`](Self::first), but returns the enumeration error.
    ///
    /// # Errors
    ///
    /// Returns [`EnumerationError`] if the OS query fails.
    pub fn try_first(
        &self,
        criteria: &Criteria,
    ) -> Result<Option<InterfaceAddress>, EnumerationError> {
        self.try_select(criteria, RetrievalMode::FirstMatch, &AcceptAll)
            .map(|found| found.into_iter().next())
    }

    /// Like [`all`](Self::all), but returns the enumeration error.
    ///
    /// # Errors
    ///
    /// Returns [`EnumerationError`] if the OS query fails.
    pub fn try_all(&self, criteria: &Criteria) -> Result<Vec<InterfaceAddress>, EnumerationError> {
        self.try_select(criteria, RetrievalMode::AllMatches, &AcceptAll)
    }

    /// Like [`select`](Self::select), but returns the enumeration error.
    ///
    /// A first-match query yields at most one element.
    ///
    /// # Errors
    ///
    /// Returns [`EnumerationError`] if the OS query fails. No partial
    /// result is produced in that case.
    pub fn try_select<F>(
        &self,
        criteria: &Criteria,
        mode: RetrievalMode,
        extra: &F,
    ) -> Result<Vec<InterfaceAddress>, EnumerationError>
    where
        F: AddressFilter + ?Sized,
    {
        let records = self.source.enumerate()?;
        let addresses = records.into_iter().filter_map(normalize);
        let filter = Narrowed { criteria, extra };

        let result = match mode {
            RetrievalMode::FirstMatch => assemble::first_match(addresses, &filter)
                .into_iter()
                .collect(),
            RetrievalMode::AllMatches => {
                let ordering = Ordering {
                    group_by_family: criteria.groups_by_family(),
                    wireless_first: self.source.prefers_wireless(),
                };
                assemble::all_matches(addresses, &filter, ordering)
            }
        };

        tracing::debug!(
            policy = %criteria,
            ?mode,
            matches = result.len(),
            "Interface query finished"
        );
        Ok(result)
    }
}

/// A policy narrowed by an additional filter (both must accept).
struct Narrowed<'a, F: ?Sized> {
    criteria: &'a Criteria,
    extra: &'a F,
}

impl<F: AddressFilter + ?Sized> AddressFilter for Narrowed<'_, F> {
    fn matches(&self, address: &InterfaceAddress) -> bool {
        self.criteria.matches(address) && self.extra.matches(address)
    }
}

/// [`InterfaceQuery::basic_ipv4`] on the platform backend.
#[must_use]
pub fn basic_ipv4() -> Option<InterfaceAddress> {
    InterfaceQuery::platform().basic_ipv4()
}

/// [`InterfaceQuery::basic_ipv4_all`] on the platform backend.
#[must_use]
pub fn basic_ipv4_all() -> Vec<InterfaceAddress> {
    InterfaceQuery::platform().basic_ipv4_all()
}

/// [`InterfaceQuery::lan_ipv4`] on the platform backend.
#[must_use]
pub fn lan_ipv4() -> Option<InterfaceAddress> {
    InterfaceQuery::platform().lan_ipv4()
}

/// [`InterfaceQuery::lan_ipv4_all`] on the platform backend.
#[must_use]
pub fn lan_ipv4_all() -> Vec<InterfaceAddress> {
    InterfaceQuery::platform().lan_ipv4_all()
}

/// [`InterfaceQuery::lan_dual_stack_all`] on the platform backend.
#[must_use]
pub fn lan_dual_stack_all() -> Vec<InterfaceAddress> {
    InterfaceQuery::platform().lan_dual_stack_all()
}

/// [`InterfaceQuery::flag_filtered_all`] on the platform backend.
#[must_use]
pub fn flag_filtered_all(family: AddressFamily, mask: FlagMask) -> Vec<InterfaceAddress> {
    InterfaceQuery::platform().flag_filtered_all(family, mask)
}
