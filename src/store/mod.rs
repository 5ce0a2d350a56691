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

//! Bin stores: dynamic counters over integer-indexed bins.
//!
//! A [`Store`] keeps track of how many values landed in each bin. All
//! stores in this module back their counters with a contiguous array over
//! a sliding index window:
//!
//! - [`UnboundedSizeDenseStore`] grows the array as needed and covers any
//!   index range;
//! - [`CollapsingLowestDenseStore`] caps the number of bins and, when the
//!   cap is exceeded, folds the lowest bins into a sentinel bin at the
//!   lowest representable index (losing accuracy only on the lowest
//!   quantiles);
//! - [`CollapsingHighestDenseStore`] is its mirror image, folding the
//!   highest bins.
//!
//! Stores are single-writer: iterators reflect the state at creation time
//! and must not outlive a mutating call.
//!
//! # Usage
//!
//! ```rust
//! use ddsketch::store::{Store, UnboundedSizeDenseStore};
//!
//! let mut store = UnboundedSizeDenseStore::new();
//! store.add(4);
//! store.add_with_count(7, 3);
//! assert_eq!(store.total_count(), 4);
//! assert_eq!(store.min_index(), Some(4));
//! assert_eq!(store.max_index(), Some(7));
//! ```

mod collapsing_highest;
mod collapsing_lowest;
mod dense;

pub use self::collapsing_highest::CollapsingHighestDenseStore;
pub use self::collapsing_lowest::CollapsingLowestDenseStore;
pub use self::dense::{AscendingBinIter, DescendingBinIter, UnboundedSizeDenseStore};

/// A bin: an integer index and the number of values counted in it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bin {
    /// The bucket index.
    pub index: i32,
    /// The number of values in the bucket.
    pub count: u64,
}

/// A growable map from integer bin indices to counts.
pub trait Store: Clone {
    /// Counts one value in the bin with the given index.
    fn add(&mut self, index: i32) {
        self.add_with_count(index, 1);
    }

    /// Counts `count` values in the bin with the given index.
    ///
    /// Adding a count of zero is a no-op.
    fn add_with_count(&mut self, index: i32, count: u64);

    /// Adds all of the other store's bins into this one.
    fn merge_with(&mut self, other: &Self);

    /// Returns true if no value has been counted yet.
    fn is_empty(&self) -> bool;

    /// Returns the total number of values counted across all bins.
    fn total_count(&self) -> u64;

    /// Returns the lowest index with a non-zero count, or `None` if the
    /// store is empty.
    fn min_index(&self) -> Option<i32>;

    /// Returns the highest index with a non-zero count, or `None` if the
    /// store is empty.
    fn max_index(&self) -> Option<i32>;

    /// Returns an iterator over the non-zero bins, lowest index first.
    fn ascending_iter(&self) -> AscendingBinIter<'_>;

    /// Returns an iterator over the non-zero bins, highest index first.
    fn descending_iter(&self) -> DescendingBinIter<'_>;
}
