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

//! Preset constructors pairing a mapping variant with a store variant.
//!
//! `memory_optimal` uses the logarithmic mapping, hence the lowest memory
//! footprint; `fast` and `balanced` trade memory for faster ingestion
//! through interpolated mappings. The collapsing presets additionally bound
//! the number of bins, losing the accuracy guarantee on the lowest
//! (respectively highest) quantiles once the bound is hit.

use super::sketch::DDSketch;
use crate::mapping::LinearlyInterpolatedMapping;
use crate::mapping::LogarithmicMapping;
use crate::mapping::QuadraticallyInterpolatedMapping;
use crate::store::CollapsingHighestDenseStore;
use crate::store::CollapsingLowestDenseStore;
use crate::store::UnboundedSizeDenseStore;

impl DDSketch<QuadraticallyInterpolatedMapping, UnboundedSizeDenseStore> {
    /// Constructs a balanced sketch, with high ingestion speed and moderate
    /// memory footprint.
    ///
    /// # Panics
    ///
    /// Panics if the relative accuracy is not in (0, 1).
    pub fn balanced(relative_accuracy: f64) -> Self {
        DDSketch::new(
            QuadraticallyInterpolatedMapping::new(relative_accuracy),
            UnboundedSizeDenseStore::new(),
        )
    }
}

impl DDSketch<QuadraticallyInterpolatedMapping, CollapsingLowestDenseStore> {
    /// Constructs a balanced sketch using at most `max_num_bins` bins,
    /// collapsing the lowest bins when the budget is exceeded.
    ///
    /// # Panics
    ///
    /// Panics if the relative accuracy is not in (0, 1) or `max_num_bins`
    /// is zero.
    pub fn balanced_collapsing_lowest(relative_accuracy: f64, max_num_bins: usize) -> Self {
        DDSketch::new(
            QuadraticallyInterpolatedMapping::new(relative_accuracy),
            CollapsingLowestDenseStore::new(max_num_bins),
        )
    }
}

impl DDSketch<QuadraticallyInterpolatedMapping, CollapsingHighestDenseStore> {
    /// Constructs a balanced sketch using at most `max_num_bins` bins,
    /// collapsing the highest bins when the budget is exceeded.
    ///
    /// # Panics
    ///
    /// Panics if the relative accuracy is not in (0, 1) or `max_num_bins`
    /// is zero.
    pub fn balanced_collapsing_highest(relative_accuracy: f64, max_num_bins: usize) -> Self {
        DDSketch::new(
            QuadraticallyInterpolatedMapping::new(relative_accuracy),
            CollapsingHighestDenseStore::new(max_num_bins),
        )
    }
}

impl DDSketch<LinearlyInterpolatedMapping, UnboundedSizeDenseStore> {
    /// Constructs a fast sketch, with optimized ingestion speed at the cost
    /// of a higher memory footprint.
    ///
    /// # Panics
    ///
    /// Panics if the relative accuracy is not in (0, 1).
    pub fn fast(relative_accuracy: f64) -> Self {
        DDSketch::new(
            LinearlyInterpolatedMapping::new(relative_accuracy),
            UnboundedSizeDenseStore::new(),
        )
    }
}

impl DDSketch<LinearlyInterpolatedMapping, CollapsingLowestDenseStore> {
    /// Constructs a fast sketch using at most `max_num_bins` bins,
    /// collapsing the lowest bins when the budget is exceeded.
    ///
    /// # Panics
    ///
    /// Panics if the relative accuracy is not in (0, 1) or `max_num_bins`
    /// is zero.
    pub fn fast_collapsing_lowest(relative_accuracy: f64, max_num_bins: usize) -> Self {
        DDSketch::new(
            LinearlyInterpolatedMapping::new(relative_accuracy),
            CollapsingLowestDenseStore::new(max_num_bins),
        )
    }
}

impl DDSketch<LinearlyInterpolatedMapping, CollapsingHighestDenseStore> {
    /// Constructs a fast sketch using at most `max_num_bins` bins,
    /// collapsing the highest bins when the budget is exceeded.
    ///
    /// # Panics
    ///
    /// Panics if the relative accuracy is not in (0, 1) or `max_num_bins`
    /// is zero.
    pub fn fast_collapsing_highest(relative_accuracy: f64, max_num_bins: usize) -> Self {
        DDSketch::new(
            LinearlyInterpolatedMapping::new(relative_accuracy),
            CollapsingHighestDenseStore::new(max_num_bins),
        )
    }
}

impl DDSketch<LogarithmicMapping, UnboundedSizeDenseStore> {
    /// Constructs a memory-optimal sketch, with optimized memory usage at
    /// the cost of lower ingestion speed.
    ///
    /// # Panics
    ///
    /// Panics if the relative accuracy is not in (0, 1).
    pub fn memory_optimal(relative_accuracy: f64) -> Self {
        DDSketch::new(
            LogarithmicMapping::new(relative_accuracy),
            UnboundedSizeDenseStore::new(),
        )
    }
}

impl DDSketch<LogarithmicMapping, CollapsingLowestDenseStore> {
    /// Constructs a memory-optimal sketch using at most `max_num_bins`
    /// bins, collapsing the lowest bins when the budget is exceeded.
    ///
    /// # Panics
    ///
    /// Panics if the relative accuracy is not in (0, 1) or `max_num_bins`
    /// is zero.
    pub fn memory_optimal_collapsing_lowest(relative_accuracy: f64, max_num_bins: usize) -> Self {
        DDSketch::new(
            LogarithmicMapping::new(relative_accuracy),
            CollapsingLowestDenseStore::new(max_num_bins),
        )
    }
}

impl DDSketch<LogarithmicMapping, CollapsingHighestDenseStore> {
    /// Constructs a memory-optimal sketch using at most `max_num_bins`
    /// bins, collapsing the highest bins when the budget is exceeded.
    ///
    /// # Panics
    ///
    /// Panics if the relative accuracy is not in (0, 1) or `max_num_bins`
    /// is zero.
    pub fn memory_optimal_collapsing_highest(relative_accuracy: f64, max_num_bins: usize) -> Self {
        DDSketch::new(
            LogarithmicMapping::new(relative_accuracy),
            CollapsingHighestDenseStore::new(max_num_bins),
        )
    }
}
