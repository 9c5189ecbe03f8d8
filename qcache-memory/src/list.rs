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

//! The recency list: a doubly linked sequence of entries ordered MRU (head)
//! to LRU (tail).
//!
//! Nodes are addressed by a stable [`NodeId`] into a slab rather than by
//! pointer. The key index (see [`crate::indexer`]) stores these ids, so a
//! node looked up by key can be unlinked, promoted or dropped in O(1)
//! without any unsafe aliasing: the slab owns the nodes outright, the index
//! only ever borrows an id into it.

use qcache_common::error::{Error, Result};

pub(crate) type NodeId = u32;

#[derive(Debug)]
struct Node<K, V> {
    key: K,
    value: V,
    prev: Option<NodeId>,
    next: Option<NodeId>,
}

#[derive(Debug)]
enum Slot<K, V> {
    Occupied(Node<K, V>),
    Vacant(Option<NodeId>),
}

/// A doubly linked list of `(K, V)` entries, ordered MRU to LRU, backed by a
/// slab so every link operation is O(1) given only a [`NodeId`].
#[derive(Debug)]
pub(crate) struct RecencyList<K, V> {
    slots: Vec<Slot<K, V>>,
    free_head: Option<NodeId>,
    head: Option<NodeId>,
    tail: Option<NodeId>,
    len: usize,
}

impl<K, V> RecencyList<K, V> {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free_head: None,
            head: None,
            tail: None,
            len: 0,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub(crate) fn front_id(&self) -> Option<NodeId> {
        self.head
    }

    pub(crate) fn back_id(&self) -> Option<NodeId> {
        self.tail
    }

    fn occupied(&self, id: NodeId) -> &Node<K, V> {
        match &self.slots[id as usize] {
            Slot::Occupied(node) => node,
            Slot::Vacant(_) => unreachable!("stale recency-list node id"),
        }
    }

    fn occupied_mut(&mut self, id: NodeId) -> &mut Node<K, V> {
        match &mut self.slots[id as usize] {
            Slot::Occupied(node) => node,
            Slot::Vacant(_) => unreachable!("stale recency-list node id"),
        }
    }

    pub(crate) fn key(&self, id: NodeId) -> &K {
        &self.occupied(id).key
    }

    pub(crate) fn value(&self, id: NodeId) -> &V {
        &self.occupied(id).value
    }

    pub(crate) fn value_mut(&mut self, id: NodeId) -> &mut V {
        &mut self.occupied_mut(id).value
    }

    /// Overwrites the value held at `id`, returning the value it replaced.
    pub(crate) fn replace_value(&mut self, id: NodeId, value: V) -> V {
        std::mem::replace(&mut self.occupied_mut(id).value, value)
    }

    fn alloc(&mut self, node: Node<K, V>) -> Result<NodeId> {
        if let Some(id) = self.free_head {
            let next_free = match &self.slots[id as usize] {
                Slot::Vacant(next) => *next,
                Slot::Occupied(_) => unreachable!("free list pointed at an occupied slot"),
            };
            self.free_head = next_free;
            self.slots[id as usize] = Slot::Occupied(node);
            return Ok(id);
        }
        if self.slots.len() >= NodeId::MAX as usize {
            return Err(Error::OutOfMemory);
        }
        self.slots.try_reserve(1).map_err(|_| Error::OutOfMemory)?;
        let id = self.slots.len() as NodeId;
        self.slots.push(Slot::Occupied(node));
        Ok(id)
    }

    /// Reserves slab capacity for one more node without allocating one.
    /// A slot freed by a prior [`remove`](Self::remove) satisfies this for
    /// free; otherwise it grows the backing `Vec`.
    pub(crate) fn reserve_one(&mut self) -> Result<()> {
        if self.free_head.is_some() {
            return Ok(());
        }
        self.slots.try_reserve(1).map_err(|_| Error::OutOfMemory)
    }

    fn detach(&mut self, id: NodeId) {
        let (prev, next) = {
            let node = self.occupied(id);
            (node.prev, node.next)
        };
        match prev {
            Some(p) => self.occupied_mut(p).next = next,
            None => self.head = next,
        }
        match next {
            Some(n) => self.occupied_mut(n).prev = prev,
            None => self.tail = prev,
        }
    }

    fn attach_front(&mut self, id: NodeId) {
        let old_head = self.head;
        {
            let node = self.occupied_mut(id);
            node.prev = None;
            node.next = old_head;
        }
        match old_head {
            Some(h) => self.occupied_mut(h).prev = Some(id),
            None => self.tail = Some(id),
        }
        self.head = Some(id);
    }

    /// Allocates a new node holding `(key, value)` and links it at the
    /// front (MRU). Leaves the list untouched on allocation failure.
    pub(crate) fn push_front(&mut self, key: K, value: V) -> Result<NodeId> {
        let id = self.alloc(Node {
            key,
            value,
            prev: None,
            next: None,
        })?;
        self.attach_front(id);
        self.len += 1;
        Ok(id)
    }

    /// Moves an already-linked node to the front. No-op if it is already
    /// there.
    pub(crate) fn move_to_front(&mut self, id: NodeId) {
        if self.head == Some(id) {
            return;
        }
        self.detach(id);
        self.attach_front(id);
    }

    /// Unlinks `id` and frees its slot, returning the `(key, value)` it
    /// held.
    pub(crate) fn remove(&mut self, id: NodeId) -> (K, V) {
        self.detach(id);
        self.free(id)
    }

    fn free(&mut self, id: NodeId) -> (K, V) {
        let old = std::mem::replace(&mut self.slots[id as usize], Slot::Vacant(self.free_head));
        self.free_head = Some(id);
        self.len -= 1;
        match old {
            Slot::Occupied(node) => (node.key, node.value),
            Slot::Vacant(_) => unreachable!("double free of recency-list node"),
        }
    }

    /// Drops every node and returns their `(key, value)` pairs, MRU first.
    pub(crate) fn drain(&mut self) -> Vec<(K, V)> {
        let slots = std::mem::take(&mut self.slots);
        self.free_head = None;
        self.head = None;
        self.tail = None;
        let len = self.len;
        self.len = 0;
        let mut out = Vec::with_capacity(len);
        for slot in slots {
            if let Slot::Occupied(node) = slot {
                out.push((node.key, node.value));
            }
        }
        out
    }

    /// Iterates entries MRU to LRU. Intended for tests and debugging; no
    /// public API surface relies on iteration order beyond what each policy
    /// documents.
    #[cfg(test)]
    pub(crate) fn keys_mru_to_lru(&self) -> Vec<K>
    where
        K: Clone,
    {
        let mut out = Vec::with_capacity(self.len);
        let mut cur = self.head;
        while let Some(id) = cur {
            let node = self.occupied(id);
            out.push(node.key.clone());
            cur = node.next;
        }
        out
    }
}
