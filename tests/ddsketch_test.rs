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

use ddsketch::mapping::IndexMapping;
use ddsketch::mapping::LogarithmicMapping;
use ddsketch::store::Store;
use ddsketch::store::UnboundedSizeDenseStore;
use ddsketch::DDSketch;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const ACCURACIES: [f64; 3] = [1e-1, 1e-2, 1e-3];
const QUANTILES: [f64; 7] = [0.0, 0.01, 0.25, 0.5, 0.75, 0.99, 1.0];

fn bins_of<S: Store>(store: &S) -> Vec<(i32, u64)> {
    store.ascending_iter().map(|b| (b.index, b.count)).collect()
}

/// Checks the relative-accuracy contract of a computed quantile value
/// against the sorted input: the value must lie between the neighboring
/// exact quantile values, relaxed by the relative accuracy.
fn assert_quantile_accurate(
    sorted: &[f64],
    quantile: f64,
    actual: f64,
    relative_accuracy: f64,
) {
    let scaled_rank = quantile * (sorted.len() - 1) as f64;
    let lower = sorted[scaled_rank.floor() as usize];
    let upper = sorted[scaled_rank.ceil() as usize];
    assert!(
        actual >= lower * (1.0 - relative_accuracy) && actual <= upper * (1.0 + relative_accuracy),
        "quantile {quantile}: {actual} outside [{lower}, {upper}] +/- {relative_accuracy}"
    );
}

fn assert_sketch_accurate<M, S>(sketch: &DDSketch<M, S>, values: &mut Vec<f64>)
where
    M: IndexMapping,
    S: Store,
{
    values.sort_by(|a, b| a.partial_cmp(b).unwrap());
    let accuracy = sketch.index_mapping().relative_accuracy();
    let computed = sketch.values_at_quantiles(&QUANTILES).unwrap();
    for (&quantile, &actual) in QUANTILES.iter().zip(computed.iter()) {
        assert_quantile_accurate(values, quantile, actual, accuracy);
    }
}

#[test]
fn test_empty_sketch() {
    let sketch = DDSketch::memory_optimal(0.01);
    assert!(sketch.is_empty());
    assert_eq!(sketch.count(), 0);
    assert_eq!(sketch.zero_count(), 0);
    assert_eq!(sketch.min_value(), None);
    assert_eq!(sketch.max_value(), None);
    assert_eq!(sketch.value_at_quantile(0.5), None);
    assert_eq!(sketch.values_at_quantiles(&[0.1, 0.9]), None);
}

#[test]
fn test_single_value() {
    let mut sketch = DDSketch::memory_optimal(0.01);
    sketch.accept(42.0);
    assert_eq!(sketch.count(), 1);
    let value = sketch.value_at_quantile(0.5).unwrap();
    assert!((value - 42.0).abs() <= 0.42);
}

#[test]
fn test_consecutive_integers() {
    // Values 1..=1000 with 1% accuracy: the median must fall within the
    // relative-accuracy band around the exact median, and the extremes
    // within the band around 1 and 1000.
    let mut sketch = DDSketch::memory_optimal(0.01);
    for v in 1..=1000 {
        sketch.accept(v as f64);
    }
    assert_eq!(sketch.count(), 1000);
    assert_eq!(sketch.zero_count(), 0);

    let median = sketch.value_at_quantile(0.5).unwrap();
    assert!(median >= 500.0 * 0.99 && median <= 501.0 * 1.01, "median {median}");

    let min = sketch.min_value().unwrap();
    assert!(min >= 1.0 * 0.99 && min <= 1.0 * 1.01, "min {min}");
    let max = sketch.max_value().unwrap();
    assert!(max >= 1000.0 * 0.99 && max <= 1000.0 * 1.01, "max {max}");

    assert_eq!(sketch.value_at_quantile(0.0).unwrap(), min);
    assert_eq!(sketch.value_at_quantile(1.0).unwrap(), max);
}

#[test]
fn test_uniform_stream_with_zero() {
    let mut rng = StdRng::seed_from_u64(3);
    let mut sketch = DDSketch::balanced(0.1);
    let mut values = Vec::with_capacity(10_001);

    for _ in 0..10_000 {
        // Uniform in (0, 1].
        let v = 1.0 - rng.gen::<f64>();
        sketch.accept(v);
        values.push(v);
    }
    sketch.accept(0.0);
    values.push(0.0);

    assert_eq!(sketch.zero_count(), 1);
    assert_eq!(sketch.count(), 10_001);
    assert_eq!(sketch.min_value(), Some(0.0));
    assert_sketch_accurate(&sketch, &mut values);
}

#[test]
fn test_relative_accuracy_across_configurations() {
    for &accuracy in &ACCURACIES {
        let mut rng = StdRng::seed_from_u64(59);
        let mut sketch = DDSketch::memory_optimal(accuracy);
        let mut values = Vec::with_capacity(10_000);
        for _ in 0..10_000 {
            let v = 10f64.powf(rng.gen_range(-3.0..6.0));
            sketch.accept(v);
            values.push(v);
        }
        assert_eq!(sketch.count(), 10_000);
        assert_sketch_accurate(&sketch, &mut values);
    }
}

#[test]
fn test_relative_accuracy_of_fast_and_balanced_presets() {
    let mut rng = StdRng::seed_from_u64(61);
    let mut fast = DDSketch::fast(0.02);
    let mut balanced = DDSketch::balanced(0.02);
    let mut values = Vec::with_capacity(10_000);
    for _ in 0..10_000 {
        let v = 10f64.powf(rng.gen_range(-3.0..6.0));
        fast.accept(v);
        balanced.accept(v);
        values.push(v);
    }
    assert_sketch_accurate(&fast, &mut values);
    assert_sketch_accurate(&balanced, &mut values);
}

#[test]
fn test_merge_matches_single_sketch() {
    // Two sketches over disjoint halves must merge into the exact state of
    // a sketch built over the union.
    let mut low = DDSketch::memory_optimal(0.02);
    let mut high = DDSketch::memory_optimal(0.02);
    let mut direct = DDSketch::memory_optimal(0.02);

    for v in 1..=500 {
        low.accept(v as f64);
        direct.accept(v as f64);
    }
    for v in 501..=1000 {
        high.accept(v as f64);
        direct.accept(v as f64);
    }

    low.merge_with(&high);

    assert_eq!(low.count(), direct.count());
    assert_eq!(low.zero_count(), direct.zero_count());
    assert_eq!(bins_of(low.store()), bins_of(direct.store()));
    for &quantile in &QUANTILES {
        assert_eq!(
            low.value_at_quantile(quantile),
            direct.value_at_quantile(quantile)
        );
    }

    let p90 = low.value_at_quantile(0.9).unwrap();
    assert!(p90 >= 900.0 * 0.98 && p90 <= 901.0 * 1.02, "p90 {p90}");
}

#[test]
fn test_merge_equivalence_on_random_streams() {
    for &accuracy in &ACCURACIES {
        let mut rng = StdRng::seed_from_u64(73);
        let mut first = DDSketch::memory_optimal(accuracy);
        let mut second = DDSketch::memory_optimal(accuracy);
        let mut direct = DDSketch::memory_optimal(accuracy);

        for _ in 0..5_000 {
            let v = 10f64.powf(rng.gen_range(-2.0..4.0));
            first.accept(v);
            direct.accept(v);
        }
        for _ in 0..5_000 {
            let v = 10f64.powf(rng.gen_range(-2.0..4.0));
            second.accept(v);
            direct.accept(v);
        }

        first.merge_with(&second);
        assert_eq!(first.count(), direct.count());
        assert_eq!(bins_of(first.store()), bins_of(direct.store()));
    }
}

#[test]
fn test_merge_with_empty_sketch() {
    let mut sketch = DDSketch::memory_optimal(0.01);
    sketch.accept(1.0);
    let empty = DDSketch::memory_optimal(0.01);
    sketch.merge_with(&empty);
    assert_eq!(sketch.count(), 1);

    let mut empty = DDSketch::memory_optimal(0.01);
    empty.merge_with(&sketch);
    assert_eq!(empty.count(), 1);
}

#[test]
#[should_panic(expected = "not mergeable")]
fn test_merge_rejects_different_accuracies() {
    let mut sketch = DDSketch::memory_optimal(0.01);
    let other = DDSketch::memory_optimal(0.02);
    sketch.merge_with(&other);
}

#[test]
fn test_count_conservation_with_weighted_inserts() {
    let mut rng = StdRng::seed_from_u64(83);
    let mut sketch = DDSketch::balanced(0.05);
    let mut expected = 0u64;

    for _ in 0..10_000 {
        let v = 10f64.powf(rng.gen_range(-4.0..4.0));
        let count = rng.gen_range(0..5u64);
        sketch.accept_with_count(v, count);
        expected += count;
    }
    sketch.accept_with_count(0.0, 3);
    expected += 3;

    assert_eq!(sketch.count(), expected);
    assert_eq!(
        sketch.zero_count() + sketch.store().total_count(),
        sketch.count()
    );
}

#[test]
fn test_collapsing_lowest_keeps_high_quantiles_accurate() {
    // Wildly spread magnitudes against a tight bin budget: the low end
    // collapses, the high end keeps the accuracy guarantee, and no mass is
    // lost.
    let mut sketch = DDSketch::memory_optimal_collapsing_lowest(0.01, 32);
    for &v in &[1e-6, 1e-3, 1.0, 1e3, 1e6] {
        sketch.accept(v);
    }

    assert_eq!(sketch.count(), 5);

    let top = sketch.value_at_quantile(1.0).unwrap();
    assert!(top >= 1e6 * 0.99 && top <= 1e6 * 1.01, "top {top}");
    let max = sketch.max_value().unwrap();
    assert!(max >= 1e6 * 0.99 && max <= 1e6 * 1.01, "max {max}");
}

#[test]
fn test_collapsing_highest_keeps_low_quantiles_accurate() {
    let mut sketch = DDSketch::memory_optimal_collapsing_highest(0.01, 32);
    for &v in &[1e-6, 1e-3, 1.0, 1e3, 1e6] {
        sketch.accept(v);
    }

    assert_eq!(sketch.count(), 5);

    let bottom = sketch.value_at_quantile(0.0).unwrap();
    assert!(bottom >= 1e-6 * 0.99 && bottom <= 1e-6 * 1.01, "bottom {bottom}");
    let min = sketch.min_value().unwrap();
    assert!(min >= 1e-6 * 0.99 && min <= 1e-6 * 1.01, "min {min}");
}

#[test]
fn test_copy_independence() {
    let mut rng = StdRng::seed_from_u64(97);
    let mut sketch = DDSketch::memory_optimal(0.01);
    for _ in 0..1_000_000 {
        sketch.accept(10f64.powf(rng.gen_range(-3.0..3.0)));
    }

    let count_before = sketch.count();
    let quantiles_before = sketch.values_at_quantiles(&QUANTILES).unwrap();

    let mut copy = sketch.clone();
    for _ in 0..1_000_000 {
        copy.accept(10f64.powf(rng.gen_range(-3.0..3.0)));
    }

    assert_eq!(sketch.count(), count_before);
    assert_eq!(
        sketch.values_at_quantiles(&QUANTILES).unwrap(),
        quantiles_before
    );
    assert_eq!(copy.count(), 2_000_000);
}

#[test]
fn test_zero_values_route_to_zero_bucket() {
    let mut sketch = DDSketch::memory_optimal(0.01);
    sketch.accept(0.0);
    sketch.accept(0.0);
    assert_eq!(sketch.zero_count(), 2);
    assert_eq!(sketch.count(), 2);
    assert_eq!(sketch.min_value(), Some(0.0));
    assert_eq!(sketch.max_value(), Some(0.0));
    assert_eq!(sketch.value_at_quantile(0.5), Some(0.0));

    sketch.accept(100.0);
    assert_eq!(sketch.min_value(), Some(0.0));
    let max = sketch.max_value().unwrap();
    assert!(max >= 99.0 && max <= 101.0);
}

#[test]
fn test_custom_min_indexed_value() {
    let mut sketch = DDSketch::with_min_indexed_value(
        LogarithmicMapping::new(0.01),
        UnboundedSizeDenseStore::new(),
        1e-3,
    );
    sketch.accept(1e-4);
    sketch.accept(1.0);
    assert_eq!(sketch.zero_count(), 1);
    assert_eq!(sketch.count(), 2);
    assert_eq!(sketch.value_at_quantile(0.0), Some(0.0));
}

#[test]
#[should_panic(expected = "outside the range")]
fn test_rejects_negative_value() {
    let mut sketch = DDSketch::memory_optimal(0.01);
    sketch.accept(-1.0);
}

#[test]
#[should_panic(expected = "outside the range")]
fn test_rejects_nan() {
    let mut sketch = DDSketch::memory_optimal(0.01);
    sketch.accept(f64::NAN);
}

#[test]
#[should_panic(expected = "outside the range")]
fn test_rejects_infinity() {
    let mut sketch = DDSketch::memory_optimal(0.01);
    sketch.accept(f64::INFINITY);
}

#[test]
#[should_panic(expected = "quantile must be in [0.0, 1.0]")]
fn test_rejects_quantile_above_one() {
    let mut sketch = DDSketch::memory_optimal(0.01);
    sketch.accept(1.0);
    sketch.value_at_quantile(1.5);
}

#[test]
#[should_panic(expected = "quantile must be in [0.0, 1.0]")]
fn test_rejects_negative_quantile() {
    let mut sketch = DDSketch::memory_optimal(0.01);
    sketch.accept(1.0);
    sketch.value_at_quantile(-0.5);
}
