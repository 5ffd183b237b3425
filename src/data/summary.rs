//! Aggregate views over the cleaned table.

use std::collections::BTreeMap;

use super::model::{ATTRIBUTE_COUNT, ATTRIBUTE_NAMES, CleanedDataset, DiseaseClass, FEATURE_COUNT};

/// Observed bounds of one model input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureRange {
    pub name: &'static str,
    pub min: f64,
    pub max: f64,
}

impl FeatureRange {
    pub fn contains(&self, value: f64) -> bool {
        (self.min..=self.max).contains(&value)
    }

    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }
}

/// Descriptive statistics for one attribute.
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeStats {
    pub name: &'static str,
    pub count: usize,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
}

/// Record count per class, most frequent first (ties by ascending label).
pub fn class_distribution(dataset: &CleanedDataset) -> Vec<(DiseaseClass, usize)> {
    let mut counts: BTreeMap<DiseaseClass, usize> = BTreeMap::new();
    for r in &dataset.records {
        *counts.entry(r.class).or_default() += 1;
    }
    let mut out: Vec<_> = counts.into_iter().collect();
    out.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    out
}

/// Per-feature bounds in training order. Empty for an empty dataset.
pub fn feature_ranges(dataset: &CleanedDataset) -> Vec<FeatureRange> {
    if dataset.is_empty() {
        return Vec::new();
    }
    (0..FEATURE_COUNT)
        .map(|i| {
            let (min, max) = column_bounds(dataset, i);
            FeatureRange {
                name: ATTRIBUTE_NAMES[i],
                min,
                max,
            }
        })
        .collect()
}

/// Count, mean, min and max of every attribute, class included.
pub fn describe(dataset: &CleanedDataset) -> Vec<AttributeStats> {
    let n = dataset.len();
    (0..ATTRIBUTE_COUNT)
        .map(|i| {
            let (min, max) = if n == 0 {
                (f64::NAN, f64::NAN)
            } else {
                column_bounds(dataset, i)
            };
            let sum: f64 = dataset.records.iter().map(|r| r.value(i)).sum();
            AttributeStats {
                name: ATTRIBUTE_NAMES[i],
                count: n,
                mean: if n == 0 { f64::NAN } else { sum / n as f64 },
                min,
                max,
            }
        })
        .collect()
}

fn column_bounds(dataset: &CleanedDataset, index: usize) -> (f64, f64) {
    dataset
        .records
        .iter()
        .map(|r| r.value(index))
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        })
}
