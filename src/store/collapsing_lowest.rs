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

use super::dense::DenseBins;
use super::{AscendingBinIter, DescendingBinIter, Store};

/// A dense store that keeps at most `max_num_bins` bins by collapsing the
/// lowest ones.
///
/// When an insertion would require widening the index window beyond the bin
/// budget, the lower edge of the window is clipped instead: the mass of
/// every bin below the clipped edge folds into the sentinel bin at the new
/// lowest index, and from then on any insertion below the window
/// accumulates into that sentinel. Total count is preserved; the relative
/// accuracy guarantee is lost only on the lowest quantiles.
#[derive(Clone, Debug)]
pub struct CollapsingLowestDenseStore {
    bins: DenseBins,
    max_num_bins: usize,
    is_collapsed: bool,
}

impl CollapsingLowestDenseStore {
    /// Creates an empty store with the given bin budget.
    ///
    /// # Panics
    ///
    /// Panics if `max_num_bins` is zero.
    pub fn new(max_num_bins: usize) -> Self {
        assert!(max_num_bins >= 1, "max_num_bins must be at least 1");
        Self {
            bins: DenseBins::new(),
            max_num_bins,
            is_collapsed: false,
        }
    }

    /// Returns the bin budget of this store.
    pub fn max_num_bins(&self) -> usize {
        self.max_num_bins
    }

    fn new_length(&self, desired: usize) -> usize {
        DenseBins::new_length(desired).min(self.max_num_bins)
    }

    fn normalize(&mut self, index: i32) -> usize {
        if index < self.bins.min_index {
            if self.is_collapsed {
                return self.bins.slot(self.bins.min_index);
            }
            self.extend_range(index, index);
            if self.is_collapsed {
                return self.bins.slot(self.bins.min_index);
            }
        } else if index > self.bins.max_index {
            self.extend_range(index, index);
        }
        self.bins.slot(index)
    }

    fn extend_range(&mut self, fresh_min: i32, fresh_max: i32) {
        let new_min = fresh_min.min(self.bins.min_index);
        let new_max = fresh_max.max(self.bins.max_index);
        let span = (new_max as i64 - new_min as i64 + 1) as usize;
        if self.bins.is_empty() {
            let length = self.new_length(span);
            if span > length {
                // Wider than the budget from the start: clip the low edge.
                let clipped_min = (new_max as i64 - length as i64 + 1) as i32;
                self.bins.init(length, clipped_min, new_max);
                self.is_collapsed = true;
            } else {
                self.bins.init(length, new_min, new_max);
            }
        } else if self.bins.fits(new_min, new_max) {
            self.bins.set_window(new_min, new_max);
        } else {
            let new_length = self.new_length(span);
            if new_length > self.bins.length() {
                self.bins.grow(new_length);
            }
            self.adjust(new_min, new_max);
        }
    }

    fn adjust(&mut self, new_min: i32, new_max: i32) {
        let length = self.bins.length() as i64;
        if new_max as i64 - new_min as i64 + 1 > length {
            // The window is too wide: the lowest bins must be collapsed.
            let new_min = (new_max as i64 - length + 1) as i32;
            if new_min >= self.bins.max_index {
                // All existing mass folds into a single sentinel bin.
                let total = self.bins.total_count();
                self.bins.reset_all();
                self.bins.offset = new_min;
                self.bins.min_index = new_min;
                self.bins.counts[0] = total;
            } else {
                let shift = self.bins.offset - new_min;
                if shift < 0 {
                    // Fold the bins below the clipped edge into the
                    // sentinel, then shift to make room for new_max.
                    let collapsed = self.bins.reset_range(self.bins.min_index, new_min - 1);
                    let sentinel = self.bins.slot(new_min);
                    self.bins.counts[sentinel] += collapsed;
                    self.bins.min_index = new_min;
                    self.bins.shift_counts(shift);
                } else {
                    // Shift to make room for new_min; the window edge moves
                    // down only after the counts are out of the way.
                    self.bins.shift_counts(shift);
                    self.bins.min_index = new_min;
                }
            }
            self.bins.max_index = new_max;
            self.is_collapsed = true;
        } else {
            self.bins.center_counts(new_min, new_max);
        }
    }
}

impl Store for CollapsingLowestDenseStore {
    fn add_with_count(&mut self, index: i32, count: u64) {
        if count == 0 {
            return;
        }
        let slot = self.normalize(index);
        self.bins.increment(slot, count);
    }

    fn merge_with(&mut self, other: &Self) {
        if other.is_empty() {
            return;
        }
        // Extending over the combined window up front makes the collapse
        // decision a function of the combined bin layout, not of the order
        // in which the other store's bins are replayed.
        self.extend_range(other.bins.min_index, other.bins.max_index);
        for bin in other.bins.ascending_iter() {
            let slot = self.normalize(bin.index);
            self.bins.increment(slot, bin.count);
        }
    }

    fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    fn total_count(&self) -> u64 {
        self.bins.total_count()
    }

    fn min_index(&self) -> Option<i32> {
        self.bins.min_index()
    }

    fn max_index(&self) -> Option<i32> {
        self.bins.max_index()
    }

    fn ascending_iter(&self) -> AscendingBinIter<'_> {
        self.bins.ascending_iter()
    }

    fn descending_iter(&self) -> DescendingBinIter<'_> {
        self.bins.descending_iter()
    }
}
