//! In-memory trusted-profile store.
//!
//! Backed by a sharded concurrent map so lookups from many request tasks do
//! not contend. Profiles are written while the store is being built at
//! startup and only read afterwards.

use dashmap::DashMap;
use riskgate_core::constants::{DEMO_USER_ID, DEMO_USER_LOCATION};
use riskgate_core::traits::ProfileStore;
use riskgate_core::types::UserProfile;

/// Process-local profile table keyed by user id.
#[derive(Debug, Default)]
pub struct MemoryProfileStore {
    profiles: DashMap<String, UserProfile>,
}

impl MemoryProfileStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with the demo user.
    pub fn with_demo_seed() -> Self {
        let store = Self::new();
        let (latitude, longitude) = DEMO_USER_LOCATION;
        store.insert(DEMO_USER_ID, UserProfile { latitude, longitude });
        store
    }

    /// Add or replace a profile, returning the previous one.
    pub fn insert(&self, user_id: impl Into<String>, profile: UserProfile) -> Option<UserProfile> {
        self.profiles.insert(user_id.into(), profile)
    }
}

impl FromIterator<(String, UserProfile)> for MemoryProfileStore {
    fn from_iter<I: IntoIterator<Item = (String, UserProfile)>>(iter: I) -> Self {
        Self {
            profiles: iter.into_iter().collect(),
        }
    }
}

impl ProfileStore for MemoryProfileStore {
    fn lookup(&self, user_id: &str) -> Option<UserProfile> {
        self.profiles.get(user_id).map(|entry| *entry.value())
    }

    fn len(&self) -> usize {
        self.profiles.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_seed_contains_user123() {
        let store = MemoryProfileStore::with_demo_seed();
        assert_eq!(store.len(), 1);
        assert_eq!(
            store.lookup("user123"),
            Some(UserProfile {
                latitude: 17.3850,
                longitude: 78.4867
            })
        );
    }

    #[test]
    fn unknown_user_is_none() {
        let store = MemoryProfileStore::with_demo_seed();
        assert_eq!(store.lookup("nobody"), None);
        assert_eq!(store.lookup("USER123"), None);
    }

    #[test]
    fn empty_store() {
        let store = MemoryProfileStore::new();
        assert!(store.is_empty());
        assert_eq!(store.lookup("user123"), None);
    }

    #[test]
    fn insert_replaces_and_returns_previous() {
        let store = MemoryProfileStore::new();
        let a = UserProfile { latitude: 1.0, longitude: 2.0 };
        let b = UserProfile { latitude: 3.0, longitude: 4.0 };
        assert_eq!(store.insert("alice", a), None);
        assert_eq!(store.insert("alice", b), Some(a));
        assert_eq!(store.lookup("alice"), Some(b));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn collect_from_pairs() {
        let store: MemoryProfileStore = [
            ("a".to_string(), UserProfile { latitude: 0.0, longitude: 0.0 }),
            ("b".to_string(), UserProfile { latitude: 10.0, longitude: 10.0 }),
        ]
        .into_iter()
        .collect();
        assert_eq!(store.len(), 2);
        assert!(store.lookup("b").is_some());
    }

    #[test]
    fn concurrent_readers_see_the_same_profile() {
        let store = MemoryProfileStore::with_demo_seed();
        let expected = store.lookup("user123");
        std::thread::scope(|s| {
            for _ in 0..8 {
                s.spawn(|| {
                    for _ in 0..1_000 {
                        assert_eq!(store.lookup("user123"), expected);
                    }
                });
            }
        });
    }
}
