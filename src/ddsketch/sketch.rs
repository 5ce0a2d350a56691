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

use super::serialization::DATA_START;
use super::serialization::FAMILY_ID;
use super::serialization::FLAG_EMPTY;
use super::serialization::SERIAL_VERSION_1;
use crate::codec::SketchBytes;
use crate::codec::SketchSlice;
use crate::error::Error;
use crate::mapping::IndexMapping;
use crate::store::Store;
use crate::store::UnboundedSizeDenseStore;

/// A quantile sketch with relative-error guarantees, working on
/// non-negative input values.
///
/// With a relative accuracy of 1%, if the expected quantile value is 100,
/// the computed quantile value is guaranteed to be between 99 and 101; if
/// the expected quantile value is 1000, between 990 and 1010.
///
/// Values between zero (inclusive) and `min_indexed_value` are counted in a
/// dedicated zero bucket rather than the store, which sidesteps the
/// logarithmic singularity at zero at the price of indistinguishability
/// below that threshold.
///
/// Cloning produces a fully independent deep copy. The sketch is not
/// thread-safe; shard across writers and [`merge_with`](DDSketch::merge_with).
///
/// See the [module level documentation](crate::ddsketch) for more.
#[derive(Clone, Debug)]
pub struct DDSketch<M, S> {
    index_mapping: M,
    min_indexed_value: f64,
    max_indexed_value: f64,
    store: S,
    zero_count: u64,
}

impl<M: IndexMapping, S: Store> DDSketch<M, S> {
    /// Creates an initially empty sketch from the given index mapping and
    /// store.
    pub fn new(index_mapping: M, store: S) -> Self {
        Self::with_min_indexed_value(index_mapping, store, 0.0)
    }

    /// Creates an initially empty sketch whose zero bucket swallows every
    /// value below `min_indexed_value`.
    ///
    /// The effective threshold is never below what the mapping can index.
    pub fn with_min_indexed_value(index_mapping: M, store: S, min_indexed_value: f64) -> Self {
        let min_indexed_value = min_indexed_value.max(index_mapping.min_indexable_value());
        let max_indexed_value = index_mapping.max_indexable_value();
        Self {
            index_mapping,
            min_indexed_value,
            max_indexed_value,
            store,
            zero_count: 0,
        }
    }

    /// Returns the index mapping used by this sketch.
    pub fn index_mapping(&self) -> &M {
        &self.index_mapping
    }

    /// Returns the store backing this sketch.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Adds a value to the sketch.
    ///
    /// # Panics
    ///
    /// Panics if the value is outside the range that is tracked by the
    /// sketch (negative, NaN, or beyond the indexable maximum).
    pub fn accept(&mut self, value: f64) {
        self.accept_with_count(value, 1);
    }

    /// Adds a value to the sketch `count` times. Adding a count of zero is
    /// a no-op.
    ///
    /// # Panics
    ///
    /// Panics if the value is outside the range that is tracked by the
    /// sketch (negative, NaN, or beyond the indexable maximum).
    pub fn accept_with_count(&mut self, value: f64, count: u64) {
        self.check_value_trackable(value);
        if count == 0 {
            return;
        }
        if value < self.min_indexed_value {
            self.zero_count += count;
        } else {
            self.store
                .add_with_count(self.index_mapping.index(value), count);
        }
    }

    fn check_value_trackable(&self, value: f64) {
        // Written so that NaN fails the check as well.
        assert!(
            value >= 0.0 && value <= self.max_indexed_value,
            "the input value is outside the range that is tracked by the sketch: {value}"
        );
    }

    /// Merges the other sketch into this one, after which this sketch
    /// reflects the union of both streams.
    ///
    /// # Panics
    ///
    /// Panics if the two sketches do not use equal index mappings.
    pub fn merge_with(&mut self, other: &DDSketch<M, S>) {
        assert!(
            self.index_mapping == other.index_mapping,
            "the sketches are not mergeable because they do not use the same index mappings"
        );
        self.store.merge_with(&other.store);
        self.zero_count += other.zero_count;
    }

    /// Returns true if the sketch has not seen any data.
    pub fn is_empty(&self) -> bool {
        self.zero_count == 0 && self.store.is_empty()
    }

    /// Returns the number of values the sketch has seen (or the sum of
    /// their counts).
    pub fn count(&self) -> u64 {
        self.zero_count + self.store.total_count()
    }

    /// Returns the number of values that were routed to the zero bucket.
    pub fn zero_count(&self) -> u64 {
        self.zero_count
    }

    /// Returns the approximate lowest value the sketch has seen; `None` if
    /// the sketch is empty.
    pub fn min_value(&self) -> Option<f64> {
        if self.zero_count > 0 {
            return Some(0.0);
        }
        Some(self.index_mapping.value(self.store.min_index()?))
    }

    /// Returns the approximate highest value the sketch has seen; `None` if
    /// the sketch is empty.
    pub fn max_value(&self) -> Option<f64> {
        if self.zero_count > 0 && self.store.is_empty() {
            return Some(0.0);
        }
        Some(self.index_mapping.value(self.store.max_index()?))
    }

    /// Returns the approximate value at the given quantile; `None` if the
    /// sketch is empty.
    ///
    /// # Panics
    ///
    /// Panics if the quantile is not in [0.0, 1.0].
    pub fn value_at_quantile(&self, quantile: f64) -> Option<f64> {
        self.value_at_quantile_with_count(quantile, self.count())
    }

    /// Returns the approximate values at the given quantiles, computing the
    /// total count only once; `None` if the sketch is empty.
    ///
    /// # Panics
    ///
    /// Panics if any quantile is not in [0.0, 1.0].
    pub fn values_at_quantiles(&self, quantiles: &[f64]) -> Option<Vec<f64>> {
        let count = self.count();
        quantiles
            .iter()
            .map(|&quantile| self.value_at_quantile_with_count(quantile, count))
            .collect()
    }

    fn value_at_quantile_with_count(&self, quantile: f64, count: u64) -> Option<f64> {
        assert!(
            (0.0..=1.0).contains(&quantile),
            "quantile must be in [0.0, 1.0], got {quantile}"
        );
        if count == 0 {
            return None;
        }

        let rank = (quantile * (count - 1) as f64) as u64;
        if rank < self.zero_count {
            return Some(0.0);
        }

        // The rank is at most count - 1, so the cumulative count crosses it
        // strictly inside the store window; the traversal cannot run dry
        // while the crossing is still ahead.
        let bin_index = if quantile <= 0.5 {
            let mut n = self.zero_count;
            let mut found = None;
            for bin in self.store.ascending_iter() {
                n += bin.count;
                found = Some(bin.index);
                if n > rank {
                    break;
                }
            }
            debug_assert!(n > rank, "cumulative count never crossed the rank");
            found
        } else {
            let mut n = count;
            let mut found = None;
            for bin in self.store.descending_iter() {
                n -= bin.count;
                found = Some(bin.index);
                if n <= rank {
                    break;
                }
            }
            debug_assert!(n <= rank, "cumulative count never crossed the rank");
            found
        }?;

        Some(self.index_mapping.value(bin_index))
    }

    /// Serializes the sketch to bytes.
    ///
    /// The serialized form carries the mapping variant, the relative
    /// accuracy, the zero-bucket count, and every non-zero bin.
    pub fn serialize(&self) -> Vec<u8> {
        let num_bins = self.store.ascending_iter().count();
        let mut bytes = SketchBytes::with_capacity(DATA_START + num_bins * 12);

        bytes.write_u8(SERIAL_VERSION_1);
        bytes.write_u8(FAMILY_ID);
        bytes.write_u8(M::LAYOUT.to_tag());
        bytes.write_u8(if self.is_empty() { FLAG_EMPTY } else { 0 });
        bytes.write_f64_le(self.index_mapping.relative_accuracy());

        if self.is_empty() {
            return bytes.into_bytes();
        }

        bytes.write_u64_le(self.zero_count);
        bytes.write_u32_le(num_bins as u32);
        for bin in self.store.ascending_iter() {
            bytes.write_i32_le(bin.index);
            bytes.write_u64_le(bin.count);
        }

        bytes.into_bytes()
    }
}

impl<M: IndexMapping> DDSketch<M, UnboundedSizeDenseStore> {
    /// Deserializes a sketch from bytes.
    ///
    /// The mapping variant recorded in the bytes must match `M`. Bins are
    /// always loaded into an unbounded store: the serialized form carries
    /// bin contents, not the store policy they were accumulated under.
    pub fn deserialize(bytes: &[u8]) -> Result<Self, Error> {
        fn make_error(tag: &'static str) -> impl FnOnce(std::io::Error) -> Error {
            move |_| Error::insufficient_data(tag)
        }

        let mut cursor = SketchSlice::new(bytes);

        let serial_version = cursor.read_u8().map_err(make_error("serial_version"))?;
        let family_id = cursor.read_u8().map_err(make_error("family_id"))?;
        let layout_tag = cursor.read_u8().map_err(make_error("mapping_layout"))?;
        let flags = cursor.read_u8().map_err(make_error("flags"))?;
        let relative_accuracy = cursor
            .read_f64_le()
            .map_err(make_error("relative_accuracy"))?;

        if serial_version != SERIAL_VERSION_1 {
            return Err(Error::deserial(format!(
                "invalid serial version: {serial_version}"
            )));
        }
        if family_id != FAMILY_ID {
            return Err(Error::deserial(format!(
                "invalid family: expected {FAMILY_ID}, got {family_id}"
            )));
        }
        if layout_tag != M::LAYOUT.to_tag() {
            return Err(Error::invalid_mapping(M::LAYOUT.to_tag(), layout_tag));
        }
        if !(relative_accuracy > 0.0 && relative_accuracy < 1.0) {
            return Err(Error::config_invalid(format!(
                "relative accuracy must be between 0 and 1 (exclusive), got {relative_accuracy}"
            )));
        }

        let mapping = M::with_relative_accuracy(relative_accuracy);
        let mut sketch = DDSketch::new(mapping, UnboundedSizeDenseStore::new());

        if flags & FLAG_EMPTY != 0 {
            return Ok(sketch);
        }

        sketch.zero_count = cursor.read_u64_le().map_err(make_error("zero_count"))?;
        let num_bins = cursor.read_u32_le().map_err(make_error("num_bins"))?;
        for _ in 0..num_bins {
            let index = cursor.read_i32_le().map_err(make_error("bin_index"))?;
            let count = cursor.read_u64_le().map_err(make_error("bin_count"))?;
            if count == 0 {
                return Err(Error::deserial(format!(
                    "bin count must be positive at index {index}"
                )));
            }
            sketch.store.add_with_count(index, count);
        }

        Ok(sketch)
    }
}
