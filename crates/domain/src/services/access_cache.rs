//! Memoization of campaign read-access checks.
//!
//! The membership query behind "may this user read this campaign" runs on
//! nearly every request, so results are memoized in process. Entries are
//! keyed by `(user_id, campaign_id)` - never by user alone, which would
//! conflate access across campaigns a user touches within one TTL window -
//! and are dropped eagerly whenever a campaign membership mutates. The TTL
//! bounds staleness for writes that bypass the invalidation hooks (e.g. a
//! row edited directly in the database).
//!
//! The store is never consulted as truth past its TTL; the database remains
//! the source of record.

use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};

use uuid::Uuid;

/// Default time-to-live for memoized access results.
pub const DEFAULT_TTL_SECS: u64 = 600;

struct Entry {
    allowed: bool,
    inserted_at: Instant,
}

/// In-process TTL cache for `(user, campaign) -> read access`.
///
/// Shared across requests behind an `Arc`; individual get/insert/remove
/// operations take the lock for single map accesses only.
pub struct ReadAccessCache {
    entries: RwLock<HashMap<(Uuid, Uuid), Entry>>,
    ttl: Duration,
}

impl ReadAccessCache {
    /// Creates a cache with the given TTL in seconds.
    pub fn new(ttl_secs: u64) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl: Duration::from_secs(ttl_secs),
        }
    }

    /// Returns the memoized result for the pair, or None on miss/expiry.
    ///
    /// Expired entries are treated as misses; they are physically removed by
    /// the next insert or invalidation touching them, not here, so reads
    /// stay on the read lock.
    pub fn get(&self, user_id: Uuid, campaign_id: Uuid) -> Option<bool> {
        let entries = self.entries.read().unwrap();
        entries.get(&(user_id, campaign_id)).and_then(|entry| {
            if entry.inserted_at.elapsed() < self.ttl {
                Some(entry.allowed)
            } else {
                None
            }
        })
    }

    /// Memoizes a freshly computed result for the pair.
    pub fn insert(&self, user_id: Uuid, campaign_id: Uuid, allowed: bool) {
        let mut entries = self.entries.write().unwrap();
        entries.insert(
            (user_id, campaign_id),
            Entry {
                allowed,
                inserted_at: Instant::now(),
            },
        );
    }

    /// Drops the entry for one `(user, campaign)` pair.
    ///
    /// Called by the join/leave workflow on every membership mutation.
    pub fn remove(&self, user_id: Uuid, campaign_id: Uuid) {
        let mut entries = self.entries.write().unwrap();
        entries.remove(&(user_id, campaign_id));
    }

    /// Drops every entry for a user, across all campaigns.
    ///
    /// Used when a mutation affects memberships whose campaign cannot be
    /// pinned down (e.g. a character deleted while detached mid-request).
    pub fn invalidate_user(&self, user_id: Uuid) {
        let mut entries = self.entries.write().unwrap();
        entries.retain(|(cached_user, _), _| *cached_user != user_id);
    }

    /// Number of live (possibly expired) entries. Test and metrics hook.
    pub fn len(&self) -> usize {
        self.entries.read().unwrap().len()
    }

    /// True when no entries are held.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for ReadAccessCache {
    fn default() -> Self {
        Self::new(DEFAULT_TTL_SECS)
    }
}

impl std::fmt::Debug for ReadAccessCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReadAccessCache")
            .field("ttl", &self.ttl)
            .field("entries", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_miss_on_empty() {
        let cache = ReadAccessCache::default();
        assert_eq!(cache.get(Uuid::new_v4(), Uuid::new_v4()), None);
    }

    #[test]
    fn test_insert_then_get() {
        let cache = ReadAccessCache::default();
        let user = Uuid::new_v4();
        let campaign = Uuid::new_v4();

        cache.insert(user, campaign, true);
        assert_eq!(cache.get(user, campaign), Some(true));

        cache.insert(user, campaign, false);
        assert_eq!(cache.get(user, campaign), Some(false));
    }

    #[test]
    fn test_keyed_per_campaign() {
        let cache = ReadAccessCache::default();
        let user = Uuid::new_v4();
        let campaign_a = Uuid::new_v4();
        let campaign_b = Uuid::new_v4();

        cache.insert(user, campaign_a, true);

        // Access to one campaign says nothing about another
        assert_eq!(cache.get(user, campaign_a), Some(true));
        assert_eq!(cache.get(user, campaign_b), None);
    }

    #[test]
    fn test_remove_targets_single_pair() {
        let cache = ReadAccessCache::default();
        let user = Uuid::new_v4();
        let campaign_a = Uuid::new_v4();
        let campaign_b = Uuid::new_v4();

        cache.insert(user, campaign_a, false);
        cache.insert(user, campaign_b, true);

        cache.remove(user, campaign_a);

        assert_eq!(cache.get(user, campaign_a), None);
        assert_eq!(cache.get(user, campaign_b), Some(true));
    }

    #[test]
    fn test_invalidate_user_clears_all_their_pairs() {
        let cache = ReadAccessCache::default();
        let user = Uuid::new_v4();
        let other = Uuid::new_v4();
        let campaign = Uuid::new_v4();

        cache.insert(user, campaign, true);
        cache.insert(user, Uuid::new_v4(), false);
        cache.insert(other, campaign, true);

        cache.invalidate_user(user);

        assert_eq!(cache.get(user, campaign), None);
        assert_eq!(cache.get(other, campaign), Some(true));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_expired_entries_miss() {
        let cache = ReadAccessCache::new(0);
        let user = Uuid::new_v4();
        let campaign = Uuid::new_v4();

        cache.insert(user, campaign, true);
        std::thread::sleep(Duration::from_millis(5));

        assert_eq!(cache.get(user, campaign), None);
    }

    #[test]
    fn test_deny_then_invalidate_then_recompute() {
        // The join-flow scenario: a memoized denial must not outlive the
        // membership change that made it wrong.
        let cache = ReadAccessCache::default();
        let user = Uuid::new_v4();
        let campaign = Uuid::new_v4();

        cache.insert(user, campaign, false);
        assert_eq!(cache.get(user, campaign), Some(false));

        // join() invalidates the pair...
        cache.remove(user, campaign);

        // ...forcing the next check to recompute
        assert_eq!(cache.get(user, campaign), None);
        cache.insert(user, campaign, true);
        assert_eq!(cache.get(user, campaign), Some(true));
    }
}
