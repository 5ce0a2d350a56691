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

use super::{Bin, Store};

const ARRAY_LENGTH_GROWTH_INCREMENT: usize = 64;

/// The contiguous counter array shared by all dense stores.
///
/// `counts[index - offset]` is the count for `index`. The logical window
/// `[min_index, max_index]` tracks the index range that has been touched;
/// it always fits within the backing array. An empty window is encoded as
/// `min_index > max_index`.
#[derive(Clone, Debug)]
pub(crate) struct DenseBins {
    pub(crate) counts: Vec<u64>,
    pub(crate) offset: i32,
    pub(crate) min_index: i32,
    pub(crate) max_index: i32,
}

impl DenseBins {
    pub(crate) fn new() -> Self {
        Self {
            counts: Vec::new(),
            offset: 0,
            min_index: i32::MAX,
            max_index: i32::MIN,
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.max_index < self.min_index
    }

    pub(crate) fn length(&self) -> usize {
        self.counts.len()
    }

    /// The backing-array slot for a logical index within the window.
    #[inline]
    pub(crate) fn slot(&self, index: i32) -> usize {
        (index as i64 - self.offset as i64) as usize
    }

    #[inline]
    pub(crate) fn increment(&mut self, slot: usize, count: u64) {
        self.counts[slot] += count;
    }

    /// The array length to allocate for a desired window span: the span
    /// plus 10% slack, rounded up to a multiple of the growth increment,
    /// which keeps insertion amortized O(1).
    pub(crate) fn new_length(desired: usize) -> usize {
        let padded = desired + desired / 10;
        (padded / ARRAY_LENGTH_GROWTH_INCREMENT + 1) * ARRAY_LENGTH_GROWTH_INCREMENT
    }

    /// True when the window `[new_min, new_max]` fits the backing array
    /// without moving any counts.
    pub(crate) fn fits(&self, new_min: i32, new_max: i32) -> bool {
        new_min >= self.offset && (new_max as i64) < self.offset as i64 + self.counts.len() as i64
    }

    pub(crate) fn set_window(&mut self, new_min: i32, new_max: i32) {
        self.min_index = new_min;
        self.max_index = new_max;
    }

    /// Allocates a fresh backing array of the given length and centers the
    /// window in it. The window span must not exceed the length.
    pub(crate) fn init(&mut self, length: usize, new_min: i32, new_max: i32) {
        let span = (new_max as i64 - new_min as i64 + 1) as usize;
        debug_assert!(span <= length, "window wider than backing array");
        self.counts = vec![0; length];
        self.min_index = new_min;
        self.max_index = new_max;
        self.offset = (new_min as i64 - ((length - span) / 2) as i64) as i32;
    }

    pub(crate) fn grow(&mut self, new_length: usize) {
        debug_assert!(new_length >= self.counts.len());
        self.counts.resize(new_length, 0);
    }

    /// Re-centers the window `[new_min, new_max]` in the backing array,
    /// shifting the existing counts as needed.
    pub(crate) fn center_counts(&mut self, new_min: i32, new_max: i32) {
        let middle = new_min as i64 + (new_max as i64 - new_min as i64 + 1) / 2;
        let shift = self.offset as i64 + (self.counts.len() / 2) as i64 - middle;
        self.shift_counts(shift as i32);
        self.min_index = new_min;
        self.max_index = new_max;
    }

    /// Translates the stored window by `shift` slots, zeroing the vacated
    /// slots and adjusting the offset so logical indices are preserved.
    pub(crate) fn shift_counts(&mut self, shift: i32) {
        debug_assert!(!self.is_empty(), "shifting an empty window");
        if shift != 0 {
            let min_slot = self.slot(self.min_index);
            let max_slot = self.slot(self.max_index);
            let dst = (min_slot as i64 + shift as i64) as usize;
            self.counts.copy_within(min_slot..max_slot + 1, dst);
            if shift > 0 {
                self.counts[min_slot..min_slot + shift as usize].fill(0);
            } else {
                let vacated_from = (max_slot as i64 + 1 + shift as i64) as usize;
                self.counts[vacated_from..max_slot + 1].fill(0);
            }
        }
        self.offset -= shift;
    }

    /// Sums the counts of indices in `[from, to]`, clamped to the window.
    pub(crate) fn sum_range(&self, from: i32, to: i32) -> u64 {
        let lo = from.max(self.min_index);
        let hi = to.min(self.max_index);
        if hi < lo {
            return 0;
        }
        self.counts[self.slot(lo)..=self.slot(hi)].iter().sum()
    }

    /// Zeroes the counts of indices in `[from, to]`, clamped to the window,
    /// and returns the mass that was removed.
    pub(crate) fn reset_range(&mut self, from: i32, to: i32) -> u64 {
        let lo = from.max(self.min_index);
        let hi = to.min(self.max_index);
        if hi < lo {
            return 0;
        }
        let range = self.slot(lo)..=self.slot(hi);
        let removed = self.counts[range.clone()].iter().sum();
        self.counts[range].fill(0);
        removed
    }

    pub(crate) fn reset_all(&mut self) {
        self.counts.fill(0);
    }

    pub(crate) fn total_count(&self) -> u64 {
        if self.is_empty() {
            0
        } else {
            self.sum_range(self.min_index, self.max_index)
        }
    }

    pub(crate) fn min_index(&self) -> Option<i32> {
        self.ascending_iter().next().map(|bin| bin.index)
    }

    pub(crate) fn max_index(&self) -> Option<i32> {
        self.descending_iter().next().map(|bin| bin.index)
    }

    pub(crate) fn ascending_iter(&self) -> AscendingBinIter<'_> {
        AscendingBinIter {
            counts: &self.counts,
            offset: self.offset as i64,
            cursor: self.min_index as i64,
            end: self.max_index as i64,
        }
    }

    pub(crate) fn descending_iter(&self) -> DescendingBinIter<'_> {
        DescendingBinIter {
            counts: &self.counts,
            offset: self.offset as i64,
            cursor: self.max_index as i64,
            end: self.min_index as i64,
        }
    }
}

/// Cursor over the non-zero bins of a dense store, lowest index first.
pub struct AscendingBinIter<'a> {
    counts: &'a [u64],
    offset: i64,
    cursor: i64,
    end: i64,
}

impl Iterator for AscendingBinIter<'_> {
    type Item = Bin;

    fn next(&mut self) -> Option<Bin> {
        while self.cursor <= self.end {
            let count = self.counts[(self.cursor - self.offset) as usize];
            let index = self.cursor as i32;
            self.cursor += 1;
            if count > 0 {
                return Some(Bin { index, count });
            }
        }
        None
    }
}

/// Cursor over the non-zero bins of a dense store, highest index first.
pub struct DescendingBinIter<'a> {
    counts: &'a [u64],
    offset: i64,
    cursor: i64,
    end: i64,
}

impl Iterator for DescendingBinIter<'_> {
    type Item = Bin;

    fn next(&mut self) -> Option<Bin> {
        while self.cursor >= self.end {
            let count = self.counts[(self.cursor - self.offset) as usize];
            let index = self.cursor as i32;
            self.cursor -= 1;
            if count > 0 {
                return Some(Bin { index, count });
            }
        }
        None
    }
}

/// A dense store that grows its backing array without bound, covering any
/// index range.
#[derive(Clone, Debug)]
pub struct UnboundedSizeDenseStore {
    bins: DenseBins,
}

impl UnboundedSizeDenseStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            bins: DenseBins::new(),
        }
    }

    fn normalize(&mut self, index: i32) -> usize {
        if index < self.bins.min_index || index > self.bins.max_index {
            self.extend_range(index, index);
        }
        self.bins.slot(index)
    }

    fn extend_range(&mut self, fresh_min: i32, fresh_max: i32) {
        let new_min = fresh_min.min(self.bins.min_index);
        let new_max = fresh_max.max(self.bins.max_index);
        let span = (new_max as i64 - new_min as i64 + 1) as usize;
        if self.bins.is_empty() {
            self.bins.init(DenseBins::new_length(span), new_min, new_max);
        } else if self.bins.fits(new_min, new_max) {
            self.bins.set_window(new_min, new_max);
        } else {
            let new_length = DenseBins::new_length(span);
            if new_length > self.bins.length() {
                self.bins.grow(new_length);
            }
            self.bins.center_counts(new_min, new_max);
        }
    }
}

impl Default for UnboundedSizeDenseStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Store for UnboundedSizeDenseStore {
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
        self.extend_range(other.bins.min_index, other.bins.max_index);
        for bin in other.bins.ascending_iter() {
            let slot = self.bins.slot(bin.index);
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
