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

use super::{check_relative_accuracy, floor_to_index, IndexMapping, IndexMappingLayout};

/// An [`IndexMapping`] that is memory-optimal: given a targeted relative
/// accuracy, it requires the least number of bins to cover a given range of
/// values, at the cost of evaluating a logarithm on every insertion.
#[derive(Clone, Debug, PartialEq)]
pub struct LogarithmicMapping {
    relative_accuracy: f64,
    log_gamma: f64,
}

impl LogarithmicMapping {
    /// Creates a logarithmic mapping with the given relative accuracy.
    ///
    /// # Panics
    ///
    /// Panics if the relative accuracy is not in (0, 1).
    pub fn new(relative_accuracy: f64) -> Self {
        check_relative_accuracy(relative_accuracy);
        let gamma = (1.0 + relative_accuracy) / (1.0 - relative_accuracy);
        Self {
            relative_accuracy,
            log_gamma: gamma.ln(),
        }
    }
}

impl IndexMapping for LogarithmicMapping {
    const LAYOUT: IndexMappingLayout = IndexMappingLayout::Logarithmic;

    fn with_relative_accuracy(relative_accuracy: f64) -> Self {
        Self::new(relative_accuracy)
    }

    fn index(&self, value: f64) -> i32 {
        floor_to_index(value.ln() / self.log_gamma)
    }

    fn value(&self, index: i32) -> f64 {
        // The (1 + alpha) factor places the representative in the middle of
        // the multiplicative bucket, halving the one-sided error.
        (index as f64 * self.log_gamma).exp() * (1.0 + self.relative_accuracy)
    }

    fn relative_accuracy(&self) -> f64 {
        self.relative_accuracy
    }

    fn min_indexable_value(&self) -> f64 {
        f64::max(
            // so that index >= i32::MIN
            ((i32::MIN as f64 + 1.0) * self.log_gamma).exp(),
            f64::MIN_POSITIVE * self.log_gamma.exp(),
        )
    }

    fn max_indexable_value(&self) -> f64 {
        f64::min(
            // so that index <= i32::MAX
            (i32::MAX as f64 * self.log_gamma).exp(),
            f64::MAX / (1.0 + self.relative_accuracy),
        )
    }
}
