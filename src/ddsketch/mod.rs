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

//! Quantile sketch with relative-error guarantees.
//!
//! [`DDSketch`] composes an index mapping and a bin store, plus a separate
//! counter for values too close to zero to be indexed. Preset constructors
//! pick a sensible mapping/store pair; the generic constructors accept any
//! combination.
//!
//! # Usage
//!
//! ```rust
//! use ddsketch::DDSketch;
//!
//! let mut lo = DDSketch::balanced(0.02);
//! let mut hi = DDSketch::balanced(0.02);
//! for v in 1..=500 {
//!     lo.accept(v as f64);
//!     hi.accept((v + 500) as f64);
//! }
//! lo.merge_with(&hi);
//! assert_eq!(lo.count(), 1000);
//! let p99 = lo.value_at_quantile(0.99).unwrap();
//! assert!(p99 >= 970.0 && p99 <= 1011.0);
//! ```

mod factory;
mod serialization;
mod sketch;

pub use self::sketch::DDSketch;
