//  Licensed under the Apache License, Version 2.0 (the "License");
//  you may not use this file except in compliance with the License.
//  You may obtain a copy of the License at
//
//  http://www.apache.org/licenses/LICENSE-2.0
//
//  Unless required by applicable law or agreed to in writing, software
//  distributed under the License is distributed on an "AS IS" BASIS,
//  WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//  See the License for the specific language governing permissions and
//  limitations under the License.

//! The Johnson/Shasha 2Q cache: three sub-caches behind one admission
//! protocol, built to resist scan and one-hit pollution better than plain
//! LRU.
//!
//! - `a1_in` (FIFO, capacity `max(1, N/4)`) holds freshly admitted entries
//!   on probation.
//! - `a1_out` (FIFO of keys only, capacity `max(1, N/2)`) remembers keys
//!   demoted out of probation without their values, to detect a second
//!   reference.
//! - `am` (LRU, capacity `N`) holds entries that have proven themselves
//!   worth keeping hot.
//!
//! A key earns `am` only by being demoted to `a1_out` and referenced again
//! — there is no direct `a1_in -> am` transition. That asymmetry is the
//! entire point of 2Q: a single scan of unique keys fills and drains
//! `a1_in` without ever touching `am`.

use std::borrow::Borrow;
use std::cmp::max;
use std::hash::Hash;

use ahash::RandomState;
use qcache_common::code::{HashBuilder, Key, Value};
use qcache_common::error::{Error, Result};
use qcache_common::listener::{CacheEventListener, DefaultCacheEventListener};

use crate::eviction::fifo::Fifo;
use crate::eviction::lru::Lru;
use crate::sub_cache::SubCache;
use tracing::trace;

/// Construction options for [`TwoQCache`]. See [`crate::FifoCacheConfig`]
/// for the rationale behind the `S`/`L` type parameters.
pub struct TwoQCacheConfig<S = RandomState, L = DefaultCacheEventListener> {
    /// Total live capacity (`am` + `a1_in`). Must be at least 1.
    pub capacity: usize,
    pub hash_builder: S,
    pub event_listener: L,
}

impl TwoQCacheConfig<RandomState, DefaultCacheEventListener> {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            hash_builder: RandomState::default(),
            event_listener: DefaultCacheEventListener,
        }
    }
}

/// A bounded 2Q key-value cache.
pub struct TwoQCache<K, V, S = RandomState, L = DefaultCacheEventListener>
where
    K: Key,
    V: Value,
    S: HashBuilder,
    L: CacheEventListener<K, V>,
{
    capacity: usize,
    a1_in: SubCache<K, V, Fifo, S>,
    a1_out: SubCache<K, (), Fifo, S>,
    am: SubCache<K, V, Lru, S>,
    listener: L,
}

impl<K, V, S, L> TwoQCache<K, V, S, L>
where
    K: Key,
    V: Value,
    S: HashBuilder,
    L: CacheEventListener<K, V>,
{
    pub fn new(config: TwoQCacheConfig<S, L>) -> Result<Self> {
        if config.capacity == 0 {
            return Err(Error::InvalidArgument("capacity must be at least 1"));
        }
        let a1_in_capacity = max(1, config.capacity / 4);
        let a1_out_capacity = max(1, config.capacity / 2);
        Ok(Self {
            capacity: config.capacity,
            a1_in: SubCache::new(a1_in_capacity, config.hash_builder.clone()),
            a1_out: SubCache::new(a1_out_capacity, config.hash_builder.clone()),
            am: SubCache::new(config.capacity, config.hash_builder),
            listener: config.event_listener,
        })
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn size(&self) -> usize {
        self.am.len() + self.a1_in.len()
    }

    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// A hot (`am`) hit promotes to most-recently-used; a probation
    /// (`a1_in`) hit does not reorder it; a ghost-only (`a1_out`) key is a
    /// miss, since the ghost queue stores no value.
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        if self.am.contains_quiet(key) {
            return self.am.get(key);
        }
        self.a1_in.peek(key)
    }

    /// True iff `key` is in `am` or `a1_in`. Ghost membership is invisible.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.am.contains_quiet(key) || self.a1_in.contains_quiet(key)
    }

    /// Admits `key`. No-op (`inserted = false`) if `key` is already hot or
    /// on probation; promotes it out of the ghost queue into `am` if it was
    /// demoted and referenced again; otherwise admits it fresh into
    /// probation, possibly demoting `a1_in`'s oldest entry to the ghost
    /// queue first.
    pub fn insert(&mut self, key: K, value: V) -> Result<bool> {
        if self.am.contains_quiet(&key) || self.a1_in.contains_quiet(&key) {
            return Ok(false);
        }
        if self.a1_out.contains_quiet(&key) {
            self.promote_ghost(key, value)?;
            return Ok(true);
        }
        self.admit_fresh(key, value)?;
        Ok(true)
    }

    /// Like [`insert`](Self::insert), but overwrites the value in place
    /// when `key` is already hot or on probation.
    pub fn insert_or_assign(&mut self, key: K, value: V) -> Result<bool> {
        if self.am.contains_quiet(&key) {
            let old = self.am.assign_existing(&key, value);
            self.listener.on_overwrite(old);
            return Ok(false);
        }
        if self.a1_in.contains_quiet(&key) {
            let old = self.a1_in.assign_existing(&key, value);
            self.listener.on_overwrite(old);
            return Ok(false);
        }
        if self.a1_out.contains_quiet(&key) {
            self.promote_ghost(key, value)?;
            return Ok(true);
        }
        self.admit_fresh(key, value)?;
        Ok(true)
    }

    /// Removes `key` from whichever of `am`, `a1_in` or `a1_out` holds it.
    /// Silent no-op if absent from all three.
    pub fn erase<Q>(&mut self, key: &Q)
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        if let Some((k, v)) = self.am.remove(key) {
            self.listener.on_evict(k, v);
            return;
        }
        if let Some((k, v)) = self.a1_in.remove(key) {
            self.listener.on_evict(k, v);
            return;
        }
        if let Some((k, ())) = self.a1_out.remove(key) {
            self.listener.on_forget_key(k);
        }
    }

    /// Removes `key` and returns its `(key, value)` pair without invoking
    /// any destructor capability. Only succeeds for `key` in `am` or
    /// `a1_in` — the ghost queue has no value to return.
    pub fn take<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        if let Some(kv) = self.am.remove(key) {
            return Some(kv);
        }
        self.a1_in.remove(key)
    }

    /// Destroys every live entry and forgets every ghost key.
    pub fn clear(&mut self) {
        for (k, v) in self.am.clear() {
            self.listener.on_evict(k, v);
        }
        for (k, v) in self.a1_in.clear() {
            self.listener.on_evict(k, v);
        }
        for (k, ()) in self.a1_out.clear() {
            self.listener.on_forget_key(k);
        }
    }

    /// Promotes a key found in the ghost queue into `am`. Preflights the
    /// allocation before mutating anything, so a failure here leaves the
    /// cache exactly as it was (key still in `a1_out`, nothing in `am`).
    ///
    /// The room check is against the *combined* live size `|am| + |a1_in|`,
    /// not `am`'s own capacity: `am`'s sub-capacity equals the full cache
    /// capacity `N`, so gating purely on `am.is_full()` lets `am` fill all
    /// the way to `N` while `a1_in` still holds live entries of its own,
    /// pushing `size() = |am| + |a1_in|` past `capacity()`.
    fn promote_ghost(&mut self, key: K, value: V) -> Result<()> {
        self.am.reserve_one()?;

        trace!(?key, "promoting ghost to hot");
        self.a1_out.remove(&key);
        while self.am.len() + self.a1_in.len() >= self.capacity {
            match self.am.evict_one() {
                Some((k, v)) => self.listener.on_evict(k, v),
                None => break,
            }
        }
        let evicted = self
            .am
            .insert_new(key, value)
            .expect("capacity was reserved before any sub-cache was mutated");
        debug_assert!(evicted.is_empty(), "room in am was already freed above");
        Ok(())
    }

    /// Admits a key unknown to all three tiers into probation. Demotes
    /// `a1_in`'s oldest entry to the ghost queue first if probation is
    /// full. Preflights both possible allocations (the probation slot, and
    /// the ghost slot if demotion is needed) before mutating anything.
    fn admit_fresh(&mut self, key: K, value: V) -> Result<()> {
        self.a1_in.reserve_one()?;
        let will_demote = self.a1_in.is_full();
        if will_demote {
            self.a1_out.reserve_one()?;
        }

        if will_demote {
            if let Some((demoted_key, demoted_value)) = self.a1_in.evict_one() {
                trace!(key = ?demoted_key, "demoting probation entry to ghost");
                self.listener.on_overwrite(demoted_value);
                let ghost_evicted = self
                    .a1_out
                    .insert_new(demoted_key, ())
                    .expect("ghost capacity was reserved before any sub-cache was mutated");
                for (forgotten, ()) in ghost_evicted {
                    self.listener.on_forget_key(forgotten);
                }
            }
        }

        let evicted = self
            .a1_in
            .insert_new(key, value)
            .expect("probation capacity was reserved before any sub-cache was mutated");
        debug_assert!(evicted.is_empty(), "room in a1_in was already freed above");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;

    use super::*;

    fn cache(capacity: usize) -> TwoQCache<i32, i32> {
        TwoQCache::new(TwoQCacheConfig::new(capacity)).unwrap()
    }

    #[test]
    fn rejects_zero_capacity() {
        let err = TwoQCache::<i32, i32>::new(TwoQCacheConfig::new(0)).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[test]
    fn fresh_admission_goes_to_probation() {
        // N = 8 => a1_in max = 2, a1_out max = 4, am max = 8.
        let mut c = cache(8);
        c.insert(1, 1).unwrap();
        c.insert(2, 2).unwrap();
        c.insert(3, 3).unwrap();

        assert_eq!(c.a1_in.keys_mru_to_lru(), vec![3, 2]);
        assert_eq!(c.a1_out.keys_mru_to_lru(), vec![1]);
        assert!(c.am.keys_mru_to_lru().is_empty());
        assert_eq!(c.get(&1), None, "a1_out holds no value");
    }

    #[test_log::test]
    fn ghost_reference_promotes_to_hot() {
        let mut c = cache(8);
        c.insert(1, 1).unwrap();
        c.insert(2, 2).unwrap();
        c.insert(3, 3).unwrap();

        assert!(c.insert(1, 100).unwrap());

        assert_eq!(c.a1_in.keys_mru_to_lru(), vec![3, 2]);
        assert!(c.a1_out.keys_mru_to_lru().is_empty());
        assert_eq!(c.am.keys_mru_to_lru(), vec![1]);
        assert_eq!(c.get(&1), Some(&100));
    }

    #[test]
    fn probation_hit_does_not_reorder() {
        let mut c = cache(8);
        c.insert(1, 1).unwrap();
        c.insert(2, 2).unwrap();
        assert_eq!(c.get(&1), Some(&1));
        assert_eq!(c.a1_in.keys_mru_to_lru(), vec![2, 1]);
    }

    #[test]
    fn hot_hit_promotes_to_mru() {
        let mut c = cache(8);
        c.insert(1, 1).unwrap();
        c.insert(2, 2).unwrap();
        c.insert(3, 3).unwrap();
        c.insert(1, 100).unwrap(); // 1 -> am

        c.insert(4, 4).unwrap(); // demotes 2 out of probation, doesn't touch am
        assert_eq!(c.get(&1), Some(&100));
        assert_eq!(c.am.keys_mru_to_lru(), vec![1]);
    }

    #[test]
    fn second_reference_after_ghost_eviction_reenters_probation() {
        // N = 4 => a1_in max = 1, a1_out max = 2, am max = 4.
        let mut c = cache(4);
        c.insert(1, 1).unwrap();
        c.insert(2, 2).unwrap(); // demotes 1 to a1_out
        c.insert(3, 3).unwrap(); // demotes 2 to a1_out
        c.insert(4, 4).unwrap(); // demotes 3 to a1_out, a1_out now [3, 2], 1 fell off the ghost queue

        assert!(!c.contains(&1));
        assert_eq!(c.a1_out.keys_mru_to_lru(), vec![3, 2]);

        assert!(c.insert(1, 11).unwrap());
        assert!(c.a1_in.keys_mru_to_lru().contains(&1));
        assert!(c.am.keys_mru_to_lru().is_empty());
    }

    #[test]
    fn take_transfers_ownership_and_skips_ghosts() {
        let mut c = cache(8);
        c.insert(1, 1).unwrap();
        c.insert(2, 2).unwrap();
        c.insert(3, 3).unwrap(); // demotes 1 to a1_out

        assert_eq!(c.take(&1), None, "a1_out holds no value to take");
        assert_eq!(c.take(&2), Some((2, 2)));
        assert_eq!(c.size(), 1);
    }

    #[test_log::test]
    fn one_hit_scan_does_not_evict_the_hot_set() {
        // N = 16 => a1_in max = 4, a1_out max = 8, am max = 16.
        let mut c = cache(16);

        // Build a hot working set: reference each key twice so every one of
        // them earns its way from probation to am via the ghost queue.
        let hot_set = (0..4).collect_vec();
        for &k in &hot_set {
            c.insert(k, k).unwrap();
        }
        for &k in &hot_set {
            c.insert(k + 100, k + 100).unwrap(); // pushes k out of a1_in into a1_out
        }
        for &k in &hot_set {
            assert!(c.insert(k, k).unwrap(), "ghost reference should promote {k} to am");
        }
        assert_eq!(c.am.keys_mru_to_lru().into_iter().sorted().collect_vec(), hot_set);

        // A long one-hit scan over unique keys never seen before: classical
        // LRU would eventually flush the hot set, but 2Q's probation tier
        // absorbs the whole scan without ever touching am.
        let scan = (1_000..1_064).collect_vec();
        for k in scan {
            c.insert(k, k).unwrap();
        }

        for &k in &hot_set {
            assert!(c.am.contains_quiet(&k), "scan must not evict {k} out of the hot tier");
        }
    }

    #[test_log::test]
    fn ghost_promotion_never_lets_combined_size_exceed_capacity() {
        // N = 8 => a1_in max = 2, a1_out max = 4, am max = 8. Drive the
        // interleaving that would otherwise let `am` fill all the way to
        // its own capacity while `a1_in` still holds live entries of its
        // own: insert a fresh key, then immediately re-insert whichever
        // key that insert just demoted out of `a1_in`, for keys 1..=10.
        let mut c = cache(8);
        for k in 1..=10 {
            c.insert(k, k).unwrap();
            assert!(c.size() <= c.capacity(), "size must never exceed capacity after insert({k})");
            if k >= 3 {
                let demoted = k - 2;
                c.insert(demoted, demoted * 100).unwrap();
                assert!(
                    c.size() <= c.capacity(),
                    "size must never exceed capacity after promoting {demoted} out of the ghost queue"
                );
            }
        }

        // `a1_in` is still populated and `am` has been forced to give up
        // some of its own room for it: exactly the combination that the
        // naive `am.is_full()` check (comparing `am` only to its own
        // capacity, equal to the whole cache's) let slip past the
        // combined-size invariant.
        assert!(c.a1_in.len() > 0);
        assert!(c.am.len() > 0);
        assert!(c.am.len() < c.capacity(), "am must give up room to stay within the combined-size invariant");
        assert_eq!(c.size(), c.am.len() + c.a1_in.len());
        assert!(c.size() <= c.capacity());
    }

    #[test]
    fn clear_empties_every_tier() {
        let mut c = cache(8);
        c.insert(1, 1).unwrap();
        c.insert(2, 2).unwrap();
        c.insert(3, 3).unwrap();
        c.insert(1, 100).unwrap(); // promote 1 to am

        c.clear();
        assert_eq!(c.size(), 0);
        assert!(c.is_empty());
        assert!(!c.contains(&2));
        assert!(!c.contains(&3));
    }
}
