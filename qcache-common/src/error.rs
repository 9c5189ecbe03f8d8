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

/// The exhaustive set of ways a cache operation can fail.
///
/// Every fallible operation either succeeds or leaves the cache
/// observationally identical to its state before the call (the strong
/// exception guarantee): no partial inserts, no orphan entries, no broken
/// key-index-to-list bijection.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Allocation failed while performing the operation. The cache is
    /// unchanged.
    #[error("out of memory")]
    OutOfMemory,

    /// Construction was attempted with an invalid configuration, e.g. a
    /// capacity of zero. This is a programmer error the caller is expected
    /// to check for up front.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
}

/// Convenience alias for fallible cache operations.
pub type Result<T> = std::result::Result<T, Error>;
