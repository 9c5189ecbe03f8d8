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

/// First-in-first-out admission order: a lookup never reorders the list, so
/// eviction always claims whichever entry was admitted longest ago.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct Fifo;

impl<K, V> Eviction<K, V> for Fifo {
    fn on_access(&mut self, _list: &mut RecencyList<K, V>, _id: NodeId) {}
}
