//! Fallback source for targets without an enumeration backend.

use crate::network::{EnumerationError, InterfaceSource, RawInterfaceRecord};

/// Source that never reports any interface.
///
/// Queries against it simply find nothing; it never errors.
#[derive(Debug, Clone, Default)]
pub struct UnsupportedSource {
    _private: (),
}

impl UnsupportedSource {
    /// Creates a new fallback source.
    #[must_use]
    pub const fn new() -> Self {
        Self { _private: () }
    }
}

impl InterfaceSource for UnsupportedSource {
    fn enumerate(&self) -> Result<Vec<RawInterfaceRecord>, EnumerationError> {
        tracing::trace!("No interface enumeration backend for this target");
        Ok(Vec::new())
    }
}
