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

//! Components shared by every qcache variant: the key/value bounds, the
//! error type, and the destructor capability caches call into.

pub mod code;
pub mod error;
pub mod listener;

pub use code::{HashBuilder, Key, Value};
pub use error::{Error, Result};
pub use listener::{CacheEventListener, DefaultCacheEventListener};
