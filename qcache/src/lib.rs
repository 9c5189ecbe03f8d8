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

//! `qcache` — small, bounded, single-owner in-memory key-value caches:
//! [`FifoCache`], [`LruCache`] and [`TwoQCache`].
//!
//! Each has a fixed capacity fixed at construction. Inserting past capacity
//! deterministically evicts one entry chosen by the policy; a FIFO cache
//! always evicts the oldest admission, an LRU cache always evicts the least
//! recently used entry, and a 2Q cache resists the scan and one-hit
//! pollution that a plain LRU is vulnerable to by requiring a key to be
//! referenced twice — once to enter probation, once more after it has been
//! demoted to the ghost queue — before it earns a spot in the hot tier.
//!
//! ```
//! use qcache::prelude::*;
//!
//! let mut cache: LruCache<&str, u32> = LruCache::new(LruCacheConfig::new(2)).unwrap();
//! cache.insert("a", 1).unwrap();
//! cache.insert("b", 2).unwrap();
//! cache.get("a"); // promotes "a" to most-recently-used
//! cache.insert("c", 3).unwrap(); // evicts "b", the least recently used
//! assert!(!cache.contains("b"));
//! ```
//!
//! None of these caches are thread-safe; wrap one in a mutex if it needs to
//! be shared across threads. None of them expire entries by time, weight
//! entries, or persist to disk.

pub mod prelude;

pub use qcache_memory::{
    CacheEventListener, DefaultCacheEventListener, Error, FifoCache, FifoCacheConfig, LruCache, LruCacheConfig,
    Result, TwoQCache, TwoQCacheConfig,
};
