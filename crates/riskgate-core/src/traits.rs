//! Trait interfaces for Riskgate.
//!
//! These traits are the seams between the scoring core and its data sources:
//! - [`ProfileStore`] — trusted location per user (riskgate-engine's `MemoryProfileStore`)
//! - [`NetworkReputationChecker`] — caller address reputation (`StaticDenylist`)

use crate::error::ReputationError;
use crate::types::UserProfile;

/// Read-only lookup of trusted user profiles.
///
/// Implementations must allow concurrent lookups without readers blocking
/// each other. A missing profile is not an error.
pub trait ProfileStore: Send + Sync {
    /// Trusted profile for `user_id`, or `None` if the user is unknown.
    fn lookup(&self, user_id: &str) -> Option<UserProfile>;

    /// Number of profiles held.
    fn len(&self) -> usize;

    /// Whether the store holds no profiles.
    ///
    /// Default implementation delegates to [`len`](Self::len).
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Risk contribution of the caller's network address.
///
/// Lookups are synchronous and side-effect free. Returned risk is on the
/// 0–100 scale. An `Err` means the source could not answer; callers degrade
/// to a conservative default instead of failing the request.
pub trait NetworkReputationChecker: Send + Sync {
    fn risk(&self, address: &str) -> Result<f64, ReputationError>;

    /// Number of entries backing the checker, if it is list-based.
    fn entry_count(&self) -> Option<usize> {
        None
    }
}
