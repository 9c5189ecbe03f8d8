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

//! The key index: a hash map from key to the recency-list node holding it.
//!
//! Every public cache operation keeps this map and the [`crate::list`] in
//! lockstep, so a key appears here if and only if a node with that key
//! appears in the list (the bijection invariant tested throughout this
//! workspace).

use std::borrow::Borrow;
use std::hash::Hash;

use hashbrown::hash_map::HashMap;
use qcache_common::code::{HashBuilder, Key};
use qcache_common::error::{Error, Result};

use crate::list::NodeId;

pub(crate) struct KeyIndex<K, S> {
    map: HashMap<K, NodeId, S>,
}

impl<K, S> KeyIndex<K, S>
where
    K: Key,
    S: HashBuilder,
{
    pub(crate) fn with_capacity_and_hasher(capacity: usize, hash_builder: S) -> Self {
        Self {
            map: HashMap::with_capacity_and_hasher(capacity, hash_builder),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.map.len()
    }

    pub(crate) fn get<Q>(&self, key: &Q) -> Option<NodeId>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.map.get(key).copied()
    }

    pub(crate) fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.map.contains_key(key)
    }

    /// Reserves room for one more key without inserting anything. Callers
    /// use this to confirm a fresh insert can't fail the index half of the
    /// operation *before* committing the list half, so the two never go out
    /// of sync under an allocation fault.
    pub(crate) fn reserve_one(&mut self) -> Result<()> {
        self.map.try_reserve(1).map_err(|_| Error::OutOfMemory)
    }

    /// Inserts `key -> id` for a key known to be both absent and already
    /// covered by a prior [`reserve_one`](Self::reserve_one) call.
    pub(crate) fn insert_reserved(&mut self, key: K, id: NodeId) {
        let prev = self.map.insert(key, id);
        debug_assert!(prev.is_none(), "insert_reserved called on an already-indexed key");
    }

    pub(crate) fn remove<Q>(&mut self, key: &Q) -> Option<NodeId>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.map.remove(key)
    }

    pub(crate) fn clear(&mut self) {
        self.map.clear();
    }
}
