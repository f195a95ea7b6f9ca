//! Network risk from a fixed address denylist.
//!
//! Stand-in for a real IP-reputation source. Membership is tested on
//! canonical address strings so equivalent spellings of the same address
//! (`::1` and `0:0:0:0:0:0:0:1`, or an IPv4-mapped IPv6 address and its IPv4
//! form) match the same entry. Strings that do not parse as an address are
//! compared trimmed and verbatim.

use std::collections::HashSet;
use std::net::IpAddr;

use riskgate_core::constants::{DEMO_DENYLIST, NETWORK_RISK_CLEAN, NETWORK_RISK_LISTED};
use riskgate_core::error::ReputationError;
use riskgate_core::traits::NetworkReputationChecker;
use tracing::debug;

/// Canonical form of an address string used for denylist membership.
///
/// # Examples
///
/// ```
/// use riskgate_engine::network::canonical_address;
/// assert_eq!(canonical_address("0:0:0:0:0:0:0:1"), "::1");
/// assert_eq!(canonical_address("::ffff:192.0.2.10"), "192.0.2.10");
/// assert_eq!(canonical_address(" [::1] "), "::1");
/// ```
pub fn canonical_address(address: &str) -> String {
    let trimmed = address.trim();
    let unbracketed = trimmed
        .strip_prefix('[')
        .and_then(|s| s.strip_suffix(']'))
        .unwrap_or(trimmed);

    match unbracketed.parse::<IpAddr>() {
        Ok(IpAddr::V6(v6)) => match v6.to_ipv4_mapped() {
            Some(v4) => v4.to_string(),
            None => v6.to_string(),
        },
        Ok(ip) => ip.to_string(),
        Err(_) => trimmed.to_string(),
    }
}

/// Fixed set of addresses that score maximum network risk.
#[derive(Debug, Clone, Default)]
pub struct StaticDenylist {
    entries: HashSet<String>,
}

impl StaticDenylist {
    /// Create an empty denylist.
    pub fn new() -> Self {
        Self::default()
    }

    /// The demo list: loopback plus two placeholder VPN exits.
    pub fn demo() -> Self {
        DEMO_DENYLIST.iter().copied().collect()
    }

    /// Add an address. Returns `false` if it was already present.
    pub fn insert(&mut self, address: &str) -> bool {
        self.entries.insert(canonical_address(address))
    }

    pub fn contains(&self, address: &str) -> bool {
        self.entries.contains(&canonical_address(address))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> FromIterator<&'a str> for StaticDenylist {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut list = Self::new();
        for address in iter {
            list.insert(address);
        }
        list
    }
}

impl NetworkReputationChecker for StaticDenylist {
    fn risk(&self, address: &str) -> Result<f64, ReputationError> {
        if self.contains(address) {
            debug!(%address, "network: address is denylisted");
            Ok(NETWORK_RISK_LISTED)
        } else {
            Ok(NETWORK_RISK_CLEAN)
        }
    }

    fn entry_count(&self) -> Option<usize> {
        Some(self.len())
    }
}
