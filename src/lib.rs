// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! Streaming quantile sketch with relative-error guarantees.
//!
//! A [`DDSketch`] computes quantile values of a stream of non-negative
//! numbers with an approximation error that is relative to the actual
//! quantile value: with a relative accuracy of 1%, if the expected quantile
//! value is 100, the computed value is guaranteed to be between 99 and 101.
//!
//! The sketch works by mapping input values to integer-indexed bins and
//! counting the number of values per bin. The mapping is handled by an
//! [`mapping::IndexMapping`], the bin counters by a [`store::Store`]. Two
//! sketches built over disjoint streams and sharing the same index mapping
//! can be merged without additional error.
//!
//! This implementation is not thread-safe; shard across writers and merge.
//!
//! # Usage
//!
//! ```rust
//! use ddsketch::DDSketch;
//!
//! let mut sketch = DDSketch::memory_optimal(0.01);
//! for v in 1..=100 {
//!     sketch.accept(v as f64);
//! }
//! let median = sketch.value_at_quantile(0.5).unwrap();
//! assert!(median >= 49.0 && median <= 52.0);
//! ```

pub(crate) mod codec;
pub mod ddsketch;
pub mod error;
pub mod mapping;
pub mod store;

pub use crate::ddsketch::DDSketch;
