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

//! Bit-level decomposition of IEEE-754 doubles.
//!
//! Inputs must be normal positive doubles; subnormals and non-finite
//! values are outside the contract of these helpers.

const SIGNIFICAND_WIDTH: u32 = 52;
const SIGNIFICAND_MASK: u64 = 0x000f_ffff_ffff_ffff;
const EXPONENT_MASK: u64 = 0x7ff0_0000_0000_0000;
const EXPONENT_BIAS: i64 = 1023;

/// Returns the unbiased base-2 exponent of the double with the given bits.
#[inline]
pub(crate) fn get_exponent(bits: u64) -> i64 {
    ((bits & EXPONENT_MASK) >> SIGNIFICAND_WIDTH) as i64 - EXPONENT_BIAS
}

/// Returns the significand with the implicit leading bit included, in [1, 2).
#[inline]
pub(crate) fn get_significand_plus_one(bits: u64) -> f64 {
    (bits & SIGNIFICAND_MASK) as f64 / (1u64 << SIGNIFICAND_WIDTH) as f64 + 1.0
}

/// Builds a positive double from an unbiased exponent and a significand in
/// [1, 2). Inverse of [`get_exponent`] and [`get_significand_plus_one`].
#[inline]
pub(crate) fn build_double(exponent: i64, significand_plus_one: f64) -> f64 {
    let exponent_bits = (((exponent + EXPONENT_BIAS) << SIGNIFICAND_WIDTH) as u64) & EXPONENT_MASK;
    let significand_bits = significand_plus_one.to_bits() & SIGNIFICAND_MASK;
    f64::from_bits(exponent_bits | significand_bits)
}
