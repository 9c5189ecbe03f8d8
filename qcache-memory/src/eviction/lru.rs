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

use crate::eviction::Eviction;
use crate::list::{NodeId, RecencyList};

/// Recency order: a lookup promotes the hit node to the front, so eviction
/// always claims the least recently used entry.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct Lru;

impl<K, V> Eviction<K, V> for Lru {
    fn on_access(&mut self, list: &mut RecencyList<K, V>, id: NodeId) {
        list.move_to_front(id);
    }
}
