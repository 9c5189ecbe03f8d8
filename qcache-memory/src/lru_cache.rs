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

//! A bounded recency-ordered (LRU) cache: every hit promotes its entry to
//! the front, so the entry evicted on overflow is always the least
//! recently used one.

use std::borrow::Borrow;
use std::hash::Hash;

use ahash::RandomState;
use qcache_common::code::{HashBuilder, Key, Value};
use qcache_common::error::{Error, Result};
use qcache_common::listener::{CacheEventListener, DefaultCacheEventListener};

use crate::eviction::lru::Lru;
use crate::sub_cache::SubCache;

/// Construction options for [`LruCache`]. See [`crate::FifoCacheConfig`] for
/// the rationale behind the `S`/`L` type parameters.
pub struct LruCacheConfig<S = RandomState, L = DefaultCacheEventListener> {
    /// Maximum number of live entries. Must be at least 1.
    pub capacity: usize,
    pub hash_builder: S,
    pub event_listener: L,
}

impl LruCacheConfig<RandomState, DefaultCacheEventListener> {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            hash_builder: RandomState::default(),
            event_listener: DefaultCacheEventListener,
        }
    }
}

/// A bounded, recency-ordered (LRU) key-value cache.
pub struct LruCache<K, V, S = RandomState, L = DefaultCacheEventListener>
where
    K: Key,
    V: Value,
    S: HashBuilder,
    L: CacheEventListener<K, V>,
{
    inner: SubCache<K, V, Lru, S>,
    listener: L,
}

impl<K, V, S, L> LruCache<K, V, S, L>
where
    K: Key,
    V: Value,
    S: HashBuilder,
    L: CacheEventListener<K, V>,
{
    pub fn new(config: LruCacheConfig<S, L>) -> Result<Self> {
        if config.capacity == 0 {
            return Err(Error::InvalidArgument("capacity must be at least 1"));
        }
        Ok(Self {
            inner: SubCache::new(config.capacity, config.hash_builder),
            listener: config.event_listener,
        })
    }

    pub fn capacity(&self) -> usize {
        self.inner.capacity()
    }

    pub fn size(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Looks up `key`, promoting it to most-recently-used on a hit.
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.get(key)
    }

    /// Membership test that, like `get`, promotes the key on a hit. This
    /// mirrors the reference implementation's behavior rather than treating
    /// `contains` as a pure predicate.
    pub fn contains<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.contains(key)
    }

    /// Inserts `(key, value)`. No-op (`inserted = false`) if `key` is
    /// already present; otherwise evicts the least recently used entry if
    /// the cache is full, then admits the new entry as most-recently-used.
    pub fn insert(&mut self, key: K, value: V) -> Result<bool> {
        if self.inner.contains_quiet(&key) {
            return Ok(false);
        }
        let evicted = self.inner.insert_new(key, value)?;
        for (k, v) in evicted {
            self.listener.on_evict(k, v);
        }
        Ok(true)
    }

    /// Like [`insert`](Self::insert), but overwrites the value in place
    /// (destroying the old one) and promotes it when `key` is already
    /// present.
    pub fn insert_or_assign(&mut self, key: K, value: V) -> Result<bool> {
        if self.inner.contains_quiet(&key) {
            let old = self.inner.assign_existing(&key, value);
            self.listener.on_overwrite(old);
            return Ok(false);
        }
        let evicted = self.inner.insert_new(key, value)?;
        for (k, v) in evicted {
            self.listener.on_evict(k, v);
        }
        Ok(true)
    }

    /// Removes `key` if present. Silent no-op otherwise.
    pub fn erase<Q>(&mut self, key: &Q)
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        if let Some((k, v)) = self.inner.remove(key) {
            self.listener.on_evict(k, v);
        }
    }

    /// Removes `key` if present and returns its `(key, value)` pair without
    /// invoking any destructor capability.
    pub fn take<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.remove(key)
    }

    /// Destroys every entry, leaving the cache empty.
    pub fn clear(&mut self) {
        for (k, v) in self.inner.clear() {
            self.listener.on_evict(k, v);
        }
    }

    #[cfg(test)]
    pub(crate) fn keys_mru_to_lru(&self) -> Vec<K> {
        self.inner.keys_mru_to_lru()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cache(capacity: usize) -> LruCache<i32, i32> {
        LruCache::new(LruCacheConfig::new(capacity)).unwrap()
    }

    #[test]
    fn get_promotes_to_mru() {
        let mut c = cache(2);
        c.insert(0, 0).unwrap();
        c.insert(1, 1).unwrap();
        c.get(&0);
        assert_eq!(c.keys_mru_to_lru(), vec![0, 1]);

        c.insert(2, 2).unwrap();
        assert_eq!(c.keys_mru_to_lru(), vec![2, 0]);
        assert!(!c.contains(&1));
    }

    #[test]
    fn contains_promotes_like_get() {
        let mut c = cache(2);
        c.insert(0, 0).unwrap();
        c.insert(1, 1).unwrap();
        assert!(c.contains(&0));
        assert_eq!(c.keys_mru_to_lru(), vec![0, 1]);
        c.insert(2, 2).unwrap();
        assert!(!c.contains(&1));
    }

    #[test]
    fn insert_or_assign_overwrite_promotes() {
        let mut c = cache(2);
        c.insert(1, 10).unwrap();
        c.insert(2, 20).unwrap();
        assert!(!c.insert_or_assign(1, 11).unwrap());
        assert_eq!(c.get(&1), Some(&11));
        assert_eq!(c.keys_mru_to_lru(), vec![1, 2]);
    }

    #[test]
    fn duplicate_insert_is_a_no_op() {
        let mut c = cache(2);
        assert!(c.insert(1, 1).unwrap());
        assert!(!c.insert(1, 2).unwrap());
        assert_eq!(c.get(&1), Some(&1));
    }

    #[test]
    fn rejects_zero_capacity() {
        let err = LruCache::<i32, i32>::new(LruCacheConfig::new(0)).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }
}
