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

//! The engine shared by every public cache: a [`crate::list::RecencyList`]
//! plus a [`crate::indexer::KeyIndex`] plus one [`Eviction`] policy.
//!
//! `SubCache` itself never calls a destructor capability and never decides
//! what to do with an evicted entry — it just hands `(key, value)` pairs
//! back to the caller. That keeps it reusable as-is for FIFO, for LRU, and
//! for all three tiers of 2Q (including the ghost queue, which instantiates
//! it at `V = ()`).

use std::borrow::Borrow;
use std::hash::Hash;

use qcache_common::code::{HashBuilder, Key};
use qcache_common::error::Result;
use tracing::trace;

use crate::eviction::Eviction;
use crate::indexer::KeyIndex;
use crate::list::RecencyList;

pub(crate) struct SubCache<K, V, E, S> {
    capacity: usize,
    list: RecencyList<K, V>,
    index: KeyIndex<K, S>,
    eviction: E,
}

impl<K, V, E, S> SubCache<K, V, E, S>
where
    K: Key,
    E: Eviction<K, V>,
    S: HashBuilder,
{
    pub(crate) fn new(capacity: usize, hash_builder: S) -> Self {
        Self {
            capacity,
            list: RecencyList::with_capacity(capacity),
            index: KeyIndex::with_capacity_and_hasher(capacity, hash_builder),
            eviction: E::default(),
        }
    }

    pub(crate) fn capacity(&self) -> usize {
        self.capacity
    }

    pub(crate) fn len(&self) -> usize {
        self.list.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    pub(crate) fn is_full(&self) -> bool {
        self.list.len() >= self.capacity
    }

    /// Looks up `key`, letting the eviction policy react to the hit (LRU
    /// promotes, FIFO ignores it).
    pub(crate) fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let id = self.index.get(key)?;
        self.eviction.on_access(&mut self.list, id);
        Some(self.list.value(id))
    }

    /// Like [`get`](Self::get) but never triggers the policy's access
    /// behavior. Used where a hit must not reorder the list (2Q's
    /// probation tier).
    pub(crate) fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let id = self.index.get(key)?;
        Some(self.list.value(id))
    }

    /// Membership test that also runs the policy's access behavior, as
    /// required by LRU's `contains`.
    pub(crate) fn contains<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        match self.index.get(key) {
            Some(id) => {
                self.eviction.on_access(&mut self.list, id);
                true
            }
            None => false,
        }
    }

    /// Pure membership test: never reorders.
    pub(crate) fn contains_quiet<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.contains(key)
    }

    /// Reserves room for one more entry in both the index and the list
    /// without mutating either. Lets a caller that must perform several
    /// operations across multiple `SubCache`s (2Q's admission protocol)
    /// confirm every allocation will succeed *before* any of them mutates
    /// state, so a failure partway through never leaves the whole cache
    /// inconsistent.
    pub(crate) fn reserve_one(&mut self) -> Result<()> {
        self.index.reserve_one()?;
        self.list.reserve_one()
    }

    /// Evicts and returns the current victim, or `None` if empty. Does not
    /// check capacity; the caller decides when eviction is warranted.
    pub(crate) fn evict_one(&mut self) -> Option<(K, V)> {
        let id = self.eviction.victim(&self.list)?;
        let key = self.list.key(id).clone();
        self.index.remove(&key);
        Some(self.list.remove(id))
    }

    /// Inserts a brand-new key (the caller must have already confirmed it
    /// is absent), evicting victims as needed to respect capacity. Returns
    /// the evicted pairs, oldest first, for the caller to dispose of or
    /// repurpose (2Q demotes rather than destroys).
    ///
    /// On allocation failure nothing is mutated: the index half of the
    /// insert is reserved before the list half is attempted, so the two
    /// either both commit or neither does.
    pub(crate) fn insert_new(&mut self, key: K, value: V) -> Result<Vec<(K, V)>> {
        self.index.reserve_one()?;
        let id = self.list.push_front(key.clone(), value)?;

        let mut evicted = Vec::new();
        while self.list.len() > self.capacity {
            match self.eviction.victim(&self.list) {
                Some(victim_id) => {
                    debug_assert_ne!(victim_id, id, "the node just inserted can't be its own victim");
                    let victim_key = self.list.key(victim_id).clone();
                    trace!(key = ?victim_key, "evicting");
                    self.index.remove(&victim_key);
                    evicted.push(self.list.remove(victim_id));
                }
                None => break,
            }
        }

        self.index.insert_reserved(key, id);
        Ok(evicted)
    }

    /// Overwrites the value of an already-indexed key in place, running the
    /// policy's access behavior as if it were a hit. Returns the value it
    /// replaced.
    pub(crate) fn assign_existing<Q>(&mut self, key: &Q, value: V) -> V
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let id = self.index.get(key).expect("assign_existing requires an already-indexed key");
        let old = self.list.replace_value(id, value);
        self.eviction.on_access(&mut self.list, id);
        old
    }

    pub(crate) fn remove<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let id = self.index.remove(key)?;
        Some(self.list.remove(id))
    }

    pub(crate) fn clear(&mut self) -> Vec<(K, V)> {
        self.index.clear();
        self.list.drain()
    }

    #[cfg(test)]
    pub(crate) fn keys_mru_to_lru(&self) -> Vec<K>
    where
        K: Clone,
    {
        self.list.keys_mru_to_lru()
    }
}
