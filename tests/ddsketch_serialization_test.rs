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

use ddsketch::error::ErrorKind;
use ddsketch::mapping::IndexMapping;
use ddsketch::mapping::LogarithmicMapping;
use ddsketch::mapping::QuadraticallyInterpolatedMapping;
use ddsketch::store::Store;
use ddsketch::store::UnboundedSizeDenseStore;
use ddsketch::DDSketch;
use googletest::assert_that;
use googletest::prelude::contains_substring;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const QUANTILES: [f64; 5] = [0.01, 0.25, 0.5, 0.75, 0.99];

fn bins_of<S: Store>(store: &S) -> Vec<(i32, u64)> {
    store.ascending_iter().map(|b| (b.index, b.count)).collect()
}

fn populated_sketch() -> DDSketch<QuadraticallyInterpolatedMapping, UnboundedSizeDenseStore> {
    let mut rng = StdRng::seed_from_u64(11);
    let mut sketch = DDSketch::balanced(0.1);
    for _ in 0..10_000 {
        sketch.accept(1.0 - rng.gen::<f64>());
    }
    sketch.accept(0.0);
    sketch
}

#[test]
fn test_round_trip_preserves_state() {
    let sketch = populated_sketch();
    let bytes = sketch.serialize();

    let restored =
        DDSketch::<QuadraticallyInterpolatedMapping, UnboundedSizeDenseStore>::deserialize(&bytes)
            .unwrap();

    assert_eq!(
        restored.index_mapping().relative_accuracy(),
        sketch.index_mapping().relative_accuracy()
    );
    assert_eq!(restored.index_mapping(), sketch.index_mapping());
    assert_eq!(restored.zero_count(), sketch.zero_count());
    assert_eq!(restored.count(), sketch.count());
    assert_eq!(bins_of(restored.store()), bins_of(sketch.store()));
    assert_eq!(
        restored.values_at_quantiles(&QUANTILES),
        sketch.values_at_quantiles(&QUANTILES)
    );

    // Byte-stable: re-serializing yields the same bytes.
    assert_eq!(restored.serialize(), bytes);
}

#[test]
fn test_round_trip_of_empty_sketch() {
    let sketch = DDSketch::memory_optimal(0.02);
    let bytes = sketch.serialize();

    let restored =
        DDSketch::<LogarithmicMapping, UnboundedSizeDenseStore>::deserialize(&bytes).unwrap();

    assert!(restored.is_empty());
    assert_eq!(restored.count(), 0);
    assert_eq!(restored.value_at_quantile(0.5), None);
    assert_eq!(
        restored.index_mapping().relative_accuracy(),
        sketch.index_mapping().relative_accuracy()
    );
}

#[test]
fn test_collapsed_sketch_round_trips_into_unbounded_store() {
    let mut sketch = DDSketch::memory_optimal_collapsing_lowest(0.01, 32);
    for &v in &[1e-6, 1e-3, 1.0, 1e3, 1e6] {
        sketch.accept(v);
    }
    let bytes = sketch.serialize();

    let restored =
        DDSketch::<LogarithmicMapping, UnboundedSizeDenseStore>::deserialize(&bytes).unwrap();

    assert_eq!(restored.count(), 5);
    assert_eq!(bins_of(restored.store()), bins_of(sketch.store()));
    assert_eq!(
        restored.value_at_quantile(1.0),
        sketch.value_at_quantile(1.0)
    );
}

#[test]
fn test_deserialize_rejects_wrong_mapping_variant() {
    let mut sketch = DDSketch::memory_optimal(0.01);
    sketch.accept(1.0);
    let bytes = sketch.serialize();

    let err = DDSketch::<QuadraticallyInterpolatedMapping, UnboundedSizeDenseStore>::deserialize(
        &bytes,
    )
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MalformedDeserializeData);
    assert_that!(err.message(), contains_substring("invalid mapping layout"));
}

#[test]
fn test_deserialize_rejects_truncated_input() {
    let sketch = populated_sketch();
    let bytes = sketch.serialize();

    let err = DDSketch::<QuadraticallyInterpolatedMapping, UnboundedSizeDenseStore>::deserialize(
        &bytes[..bytes.len() - 1],
    )
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MalformedDeserializeData);
    assert_that!(err.message(), contains_substring("insufficient data"));

    let err =
        DDSketch::<QuadraticallyInterpolatedMapping, UnboundedSizeDenseStore>::deserialize(&[])
            .unwrap_err();
    assert_that!(err.message(), contains_substring("insufficient data"));
}

#[test]
fn test_deserialize_rejects_wrong_family() {
    let mut sketch = DDSketch::memory_optimal(0.01);
    sketch.accept(1.0);
    let mut bytes = sketch.serialize();
    bytes[1] ^= 0xff;

    let err =
        DDSketch::<LogarithmicMapping, UnboundedSizeDenseStore>::deserialize(&bytes).unwrap_err();
    assert_that!(err.message(), contains_substring("invalid family"));
}

#[test]
fn test_deserialize_rejects_unknown_serial_version() {
    let mut sketch = DDSketch::memory_optimal(0.01);
    sketch.accept(1.0);
    let mut bytes = sketch.serialize();
    bytes[0] = 99;

    let err =
        DDSketch::<LogarithmicMapping, UnboundedSizeDenseStore>::deserialize(&bytes).unwrap_err();
    assert_that!(err.message(), contains_substring("invalid serial version"));
}

#[test]
fn test_deserialize_rejects_corrupt_relative_accuracy() {
    let mut sketch = DDSketch::memory_optimal(0.01);
    sketch.accept(1.0);
    let mut bytes = sketch.serialize();
    // The relative accuracy is the f64 following the four preamble bytes.
    bytes[4..12].copy_from_slice(&2.0f64.to_le_bytes());

    let err =
        DDSketch::<LogarithmicMapping, UnboundedSizeDenseStore>::deserialize(&bytes).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
    assert_that!(err.message(), contains_substring("relative accuracy"));
}

#[test]
fn test_deserialize_rejects_zero_bin_count() {
    let mut sketch = DDSketch::memory_optimal(0.01);
    sketch.accept(1.0);
    let mut bytes = sketch.serialize();
    // Zero out the count of the single bin: preamble (12) + zero_count (8)
    // + num_bins (4) + bin index (4) places it at offset 28.
    bytes[28..36].copy_from_slice(&0u64.to_le_bytes());

    let err =
        DDSketch::<LogarithmicMapping, UnboundedSizeDenseStore>::deserialize(&bytes).unwrap_err();
    assert_that!(err.message(), contains_substring("bin count must be positive"));
}
