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

//! Binary layout constants for the serialized sketch.
//!
//! Little-endian throughout. The preamble is serial version (u8), family id
//! (u8), mapping layout tag (u8), flags (u8), and relative accuracy (f64).
//! Non-empty sketches follow with the zero-bucket count (u64), the number
//! of occupied bins (u32), and one (index: i32, count: u64) pair per bin in
//! ascending index order.

pub(super) const SERIAL_VERSION_1: u8 = 1;

/// Distinguishes this sketch from other serialized sketch families.
pub(super) const FAMILY_ID: u8 = 11;

pub(super) const FLAG_EMPTY: u8 = 1;

/// Byte offset at which bin data starts in the non-empty form.
pub(super) const DATA_START: usize = 24;
