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

//! Mappings between positive floating-point values and integer bin indices.
//!
//! An [`IndexMapping`] assigns every positive value within its indexable
//! range to a bucket whose boundaries grow geometrically with base
//! `gamma = (1 + alpha) / (1 - alpha)`, where `alpha` is the relative
//! accuracy. The representative value of a bucket is then guaranteed to be
//! within a factor `1 +/- alpha` of every value that lands in it.
//!
//! Three variants trade ingestion speed against the number of buckets
//! needed to cover a given range:
//!
//! - [`LogarithmicMapping`] evaluates the logarithm exactly and is
//!   memory-optimal (fewest buckets);
//! - [`LinearlyInterpolatedMapping`] extracts the base-2 exponent from the
//!   binary representation of the value and interpolates the logarithm
//!   linearly in-between, which is the fastest;
//! - [`QuadraticallyInterpolatedMapping`] interpolates quadratically,
//!   balancing speed against bucket count.
//!
//! # Usage
//!
//! ```rust
//! use ddsketch::mapping::{IndexMapping, LogarithmicMapping};
//!
//! let mapping = LogarithmicMapping::new(0.01);
//! let index = mapping.index(100.0);
//! let back = mapping.value(index);
//! assert!((back - 100.0).abs() <= 0.01 * 100.0);
//! ```

mod bit_ops;
mod linearly_interpolated;
mod logarithmic;
mod quadratically_interpolated;

pub use self::linearly_interpolated::LinearlyInterpolatedMapping;
pub use self::logarithmic::LogarithmicMapping;
pub use self::quadratically_interpolated::QuadraticallyInterpolatedMapping;

/// Tag identifying a mapping variant in the serialized form of a sketch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IndexMappingLayout {
    /// [`LogarithmicMapping`].
    Logarithmic,
    /// [`LinearlyInterpolatedMapping`].
    LinearlyInterpolated,
    /// [`QuadraticallyInterpolatedMapping`].
    QuadraticallyInterpolated,
}

impl IndexMappingLayout {
    pub(crate) fn to_tag(self) -> u8 {
        match self {
            IndexMappingLayout::Logarithmic => 1,
            IndexMappingLayout::LinearlyInterpolated => 2,
            IndexMappingLayout::QuadraticallyInterpolated => 3,
        }
    }
}

/// A mapping between positive values and integer bin indices.
///
/// Two mappings of the same variant are equal if and only if they have been
/// built with equal relative accuracies; only equal mappings make their
/// sketches mergeable.
///
/// `index` and `value` do not validate their input; callers must keep
/// values within `[min_indexable_value, max_indexable_value]` and indices
/// within the range that `index` produces over it.
pub trait IndexMapping: Clone + PartialEq + std::fmt::Debug {
    /// The tag written to the serialized form to identify this variant.
    const LAYOUT: IndexMappingLayout;

    /// Creates a mapping of this variant with the given relative accuracy.
    ///
    /// # Panics
    ///
    /// Panics if the relative accuracy is not in (0, 1).
    fn with_relative_accuracy(relative_accuracy: f64) -> Self;

    /// Returns the index of the bucket the given value belongs to.
    fn index(&self, value: f64) -> i32;

    /// Returns the representative value of the bucket with the given index.
    fn value(&self, index: i32) -> f64;

    /// Returns the relative accuracy guaranteed by this mapping.
    fn relative_accuracy(&self) -> f64;

    /// Returns the smallest value this mapping can index.
    fn min_indexable_value(&self) -> f64;

    /// Returns the largest value this mapping can index.
    fn max_indexable_value(&self) -> f64;
}

/// Floors a real-valued index to its integer bucket index.
///
/// Truncation towards zero, adjusted so that negative real indices always
/// round down (even when they are whole numbers).
#[inline]
pub(crate) fn floor_to_index(real_index: f64) -> i32 {
    if real_index >= 0.0 {
        real_index as i32
    } else {
        real_index as i32 - 1
    }
}

pub(crate) fn check_relative_accuracy(relative_accuracy: f64) {
    assert!(
        relative_accuracy > 0.0 && relative_accuracy < 1.0,
        "relative accuracy must be between 0 and 1 (exclusive), got {relative_accuracy}"
    );
}
