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

//! Eviction policies built on the shared [`crate::list::RecencyList`]
//! substrate.
//!
//! A policy only has to say two things: what a successful lookup does to
//! the list (`on_access`), and which node is sacrificed when the cache is
//! over capacity (`victim`, which both FIFO and LRU answer the same way:
//! the tail). 2Q composes three of these sub-caches instead of implementing
//! this trait itself — its admission protocol spans sub-caches in ways a
//! single-list policy can't express.

pub(crate) mod fifo;
pub(crate) mod lru;

use crate::list::{NodeId, RecencyList};

pub(crate) trait Eviction<K, V>: Default {
    /// Called on every successful `get`/`contains`/assignment hit, after
    /// the node has already been located by the key index.
    fn on_access(&mut self, list: &mut RecencyList<K, V>, id: NodeId);

    /// The node to evict when the cache is at capacity. Does not remove it;
    /// the caller decides whether and how.
    fn victim(&self, list: &RecencyList<K, V>) -> Option<NodeId> {
        list.back_id()
    }
}
