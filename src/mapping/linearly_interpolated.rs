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

use super::bit_ops;
use super::{check_relative_accuracy, floor_to_index, IndexMapping, IndexMappingLayout};

/// A fast [`IndexMapping`] that approximates the memory-optimal
/// [`LogarithmicMapping`](super::LogarithmicMapping) by extracting the
/// base-2 exponent from the binary representation of floating-point values
/// and linearly interpolating the logarithm in-between.
#[derive(Clone, Debug, PartialEq)]
pub struct LinearlyInterpolatedMapping {
    relative_accuracy: f64,
    multiplier: f64,
}

impl LinearlyInterpolatedMapping {
    /// Creates a linearly interpolated mapping with the given relative
    /// accuracy.
    ///
    /// # Panics
    ///
    /// Panics if the relative accuracy is not in (0, 1).
    pub fn new(relative_accuracy: f64) -> Self {
        check_relative_accuracy(relative_accuracy);
        let gamma = (1.0 + relative_accuracy) / (1.0 - relative_accuracy);
        Self {
            relative_accuracy,
            multiplier: 1.0 / gamma.ln(),
        }
    }
}

impl IndexMapping for LinearlyInterpolatedMapping {
    const LAYOUT: IndexMappingLayout = IndexMappingLayout::LinearlyInterpolated;

    fn with_relative_accuracy(relative_accuracy: f64) -> Self {
        Self::new(relative_accuracy)
    }

    fn index(&self, value: f64) -> i32 {
        let bits = value.to_bits();
        // log2(value) is approximated by exponent + (significand - 1); the
        // extra unit cancels out against the offset used in value().
        let approx = bit_ops::get_exponent(bits) as f64 + bit_ops::get_significand_plus_one(bits);
        floor_to_index(self.multiplier * approx)
    }

    fn value(&self, index: i32) -> f64 {
        let normalized_index = index as f64 / self.multiplier;
        let exponent = (normalized_index - 1.0).floor();
        let significand_plus_one = normalized_index - exponent;
        bit_ops::build_double(exponent as i64, significand_plus_one)
            * (1.0 + self.relative_accuracy)
    }

    fn relative_accuracy(&self) -> f64 {
        self.relative_accuracy
    }

    fn min_indexable_value(&self) -> f64 {
        f64::max(
            // so that index >= i32::MIN
            2f64.powf((i32::MIN as f64 + 1.0) / self.multiplier),
            f64::MIN_POSITIVE * (1.0 + self.relative_accuracy) / (1.0 - self.relative_accuracy),
        )
    }

    fn max_indexable_value(&self) -> f64 {
        f64::min(
            // so that index <= i32::MAX
            2f64.powf(i32::MAX as f64 / self.multiplier - 1.0),
            f64::MAX / (1.0 + self.relative_accuracy),
        )
    }
}
