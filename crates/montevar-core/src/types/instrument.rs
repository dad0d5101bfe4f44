//! Instrument identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{CoreError, CoreResult};

/// Identifier of a traded instrument, usually an exchange ticker.
///
/// Identifiers are trimmed and upper-cased so that `"spy"` and `" SPY"`
/// refer to the same instrument.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct InstrumentId(String);

impl InstrumentId {
    /// Creates a new identifier.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::EmptyIdentifier` for blank input.
    pub fn new(id: impl AsRef<str>) -> CoreResult<Self> {
        let id = id.as_ref().trim();
        if id.is_empty() {
            return Err(CoreError::EmptyIdentifier);
        }
        Ok(Self(id.to_ascii_uppercase()))
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InstrumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for InstrumentId {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<InstrumentId> for String {
    fn from(id: InstrumentId) -> Self {
        id.0
    }
}

impl AsRef<str> for InstrumentId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
