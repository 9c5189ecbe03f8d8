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

use std::fmt::Debug;
use std::hash::{BuildHasher, Hash};

/// Bound required of cache keys.
///
/// The caller supplies the hashing and equality behavior through the usual
/// [`Hash`] and [`Eq`] traits, and selects the [`BuildHasher`] used by a
/// cache through its `S` type parameter (see [`HashBuilder`]).
pub trait Key: Hash + Eq + Clone + Debug + 'static {}
impl<T: Hash + Eq + Clone + Debug + 'static> Key for T {}

/// Bound required of cache values.
///
/// Values are opaque payloads: the cache never inspects them beyond moving
/// and dropping them.
pub trait Value: Debug + 'static {}
impl<T: Debug + 'static> Value for T {}

/// Bound required of the hash builder used to key the index of a cache.
pub trait HashBuilder: BuildHasher + Default + Clone + 'static {}
impl<T: BuildHasher + Default + Clone + 'static> HashBuilder for T {}
