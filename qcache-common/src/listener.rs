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

use crate::code::{Key, Value};

/// Caller-supplied destructor capability, split the way the cache actually
/// needs it: a whole entry, a lone value, or a lone key.
///
/// - [`on_evict`](Self::on_evict) fires once per `(key, value)` destroyed by
///   eviction, `erase` or `clear` — never for entries removed through
///   `take`, which transfers ownership to the caller instead.
/// - [`on_overwrite`](Self::on_overwrite) fires for a value destroyed while
///   its key stays live in the cache: `insert_or_assign` replacing a value
///   in place, or 2Q demoting a probation entry to the ghost queue (the key
///   survives as a bare ghost; the value does not).
/// - [`on_forget_key`](Self::on_forget_key) fires for a bare key with no
///   live value, which only happens to 2Q's ghost queue: a key demoted out
///   of probation already had its value destroyed (or reused) by the time
///   it is finally pushed out of the ghost queue.
///
/// All three default to doing nothing, so a cache with no destructor
/// capability is just `DefaultCacheEventListener`.
pub trait CacheEventListener<K, V>
where
    K: Key,
    V: Value,
{
    /// Called once when `(key, value)` is destroyed by the cache.
    #[allow(unused_variables)]
    fn on_evict(&self, key: K, value: V) {}

    /// Called once when `insert_or_assign` destroys the value it replaces.
    #[allow(unused_variables)]
    fn on_overwrite(&self, old_value: V) {}

    /// Called once when a bare key (no value) is forgotten by the cache.
    #[allow(unused_variables)]
    fn on_forget_key(&self, key: K) {}
}

/// The listener used when the caller supplies no destructor capability.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultCacheEventListener;

impl<K, V> CacheEventListener<K, V> for DefaultCacheEventListener
where
    K: Key,
    V: Value,
{
}
