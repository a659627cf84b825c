//! Handle normalization and the order-independent pair key.

use crate::error::{BlendError, Result};
use serde::Serialize;
use std::fmt;

/// A normalized account handle.
///
/// Surrounding whitespace and a single leading `@` are stripped; case is
/// preserved as given, so `"Alice"` and `"alice"` are different identities.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Identity(String);

impl Identity {
    /// Normalize a raw handle, rejecting input that is empty once stripped
    pub fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        let handle = trimmed.strip_prefix('@').unwrap_or(trimmed).trim();

        if handle.is_empty() {
            return Err(BlendError::validation(format!(
                "handle {raw:?} is empty"
            )));
        }

        Ok(Self(handle.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Identity {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Cache key for a blend: the two identities in sorted order.
///
/// Stored as a pair rather than a joined string so that no separator can
/// make two different pairs collide.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PairKey {
    low: Identity,
    high: Identity,
}

impl PairKey {
    pub fn new(a: &Identity, b: &Identity) -> Self {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        Self {
            low: low.clone(),
            high: high.clone(),
        }
    }

    /// Both identities, lowest first
    pub fn identities(&self) -> (&Identity, &Identity) {
        (&self.low, &self.high)
    }
}

impl fmt::Display for PairKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}+{}", self.low, self.high)
    }
}
