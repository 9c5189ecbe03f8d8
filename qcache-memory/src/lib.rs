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

//! FIFO, LRU and 2Q eviction policies built on one shared substrate: a
//! recency-ordered doubly linked list (an arena-backed [`list::RecencyList`])
//! coupled with a hash-based [`indexer::KeyIndex`], kept in lockstep so that
//! promoting, unlinking and evicting a node by key is always O(1).
//!
//! [`FifoCache`] and [`LruCache`] each wrap one [`sub_cache::SubCache`]; the
//! only difference between them is what a lookup does to the list
//! ([`eviction::fifo::Fifo`] vs. [`eviction::lru::Lru`]). [`TwoQCache`]
//! composes three `SubCache`s behind the admission protocol in
//! [`two_q_cache`].

mod eviction;
mod fifo_cache;
mod indexer;
mod list;
mod lru_cache;
mod sub_cache;
mod two_q_cache;

pub use fifo_cache::{FifoCache, FifoCacheConfig};
pub use lru_cache::{LruCache, LruCacheConfig};
pub use two_q_cache::{TwoQCache, TwoQCacheConfig};

pub use qcache_common::{CacheEventListener, DefaultCacheEventListener, Error, HashBuilder, Key, Result, Value};
