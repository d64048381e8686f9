//! Equal-width histograms of one feature, split by class.
//!
//! The range is taken from the visible records, so the bins follow the
//! filter: narrowing a slider zooms the histogram onto the remaining data.

use std::collections::BTreeMap;

use super::filter::FilteredView;
use super::model::{ClassLabel, Feature};

/// Bin edges plus per-class counts for one feature.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassHistogram {
    pub feature: Feature,
    /// `bins + 1` ascending edges; empty when the view is empty.
    pub edges: Vec<f64>,
    /// For each class of the dataset, one count per bin.
    pub counts: BTreeMap<ClassLabel, Vec<usize>>,
}

impl ClassHistogram {
    /// Bin the visible values of `feature` into `bins` equal-width bins.
    ///
    /// The maximum lands in the last bin. When every visible value is equal
    /// a single unit-wide bin centred on that value is produced.
    pub fn compute(view: &FilteredView<'_>, feature: Feature, bins: usize) -> Self {
        let mut counts: BTreeMap<ClassLabel, Vec<usize>> = BTreeMap::new();

        let (min, max) = view
            .values(feature)
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                (lo.min(v), hi.max(v))
            });

        if view.is_empty() || bins == 0 {
            for &class in view.dataset().classes() {
                counts.insert(class, Vec::new());
            }
            return ClassHistogram {
                feature,
                edges: Vec::new(),
                counts,
            };
        }

        let (lo, hi, n_bins) = if max > min {
            (min, max, bins)
        } else {
            (min - 0.5, min + 0.5, 1)
        };
        let width = (hi - lo) / n_bins as f64;

        let edges: Vec<f64> = (0..=n_bins).map(|i| lo + width * i as f64).collect();
        for &class in view.dataset().classes() {
            counts.insert(class, vec![0; n_bins]);
        }

        for rec in view.records() {
            let bin = bin_index(rec.get(feature), lo, width, n_bins);
            counts.entry(rec.class).or_insert_with(|| vec![0; n_bins])[bin] += 1;
        }

        ClassHistogram {
            feature,
            edges,
            counts,
        }
    }

    pub fn bin_count(&self) -> usize {
        self.edges.len().saturating_sub(1)
    }

    pub fn bin_width(&self) -> f64 {
        match self.edges.as_slice() {
            [first, second, ..] => second - first,
            _ => 0.0,
        }
    }

    /// Midpoint of bin `i`.
    pub fn center(&self, i: usize) -> f64 {
        (self.edges[i] + self.edges[i + 1]) / 2.0
    }

    /// Number of values across all classes.
    pub fn total(&self) -> usize {
        self.counts.values().flatten().sum()
    }
}

fn bin_index(value: f64, lo: f64, width: f64, n_bins: usize) -> usize {
    let raw = ((value - lo) / width).floor();
    if raw <= 0.0 {
        0
    } else {
        (raw as usize).min(n_bins - 1)
    }
}
