use std::collections::{BTreeMap, BTreeSet};

use super::model::{ClassLabel, Dataset, Feature, Record};

// ---------------------------------------------------------------------------
// Filter predicate: allowed classes plus inclusive numeric ranges
// ---------------------------------------------------------------------------

/// Inclusive `[lo, hi]` bound on a feature.
///
/// An inverted bound (`lo > hi`) or a NaN endpoint matches nothing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeBound {
    pub lo: f64,
    pub hi: f64,
}

impl RangeBound {
    pub fn new(lo: f64, hi: f64) -> Self {
        RangeBound { lo, hi }
    }

    pub fn contains(&self, value: f64) -> bool {
        self.lo <= value && value <= self.hi
    }

    /// True when no value can satisfy the bound.
    pub fn is_empty(&self) -> bool {
        self.lo.is_nan() || self.hi.is_nan() || self.lo > self.hi
    }
}

/// The complete set of constraints for one recomputation.
///
/// Built fresh from the controls every time; the engine never keeps one.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FilterSpec {
    /// Classes to show. Empty means "show nothing".
    pub allowed_classes: BTreeSet<ClassLabel>,
    /// Inclusive bounds per constrained feature.
    pub range_constraints: BTreeMap<Feature, RangeBound>,
}

impl FilterSpec {
    pub fn new(allowed_classes: impl IntoIterator<Item = ClassLabel>) -> Self {
        FilterSpec {
            allowed_classes: allowed_classes.into_iter().collect(),
            range_constraints: BTreeMap::new(),
        }
    }

    /// Add (or replace) the inclusive bound on `feature`.
    pub fn with_range(mut self, feature: Feature, lo: f64, hi: f64) -> Self {
        self.range_constraints
            .insert(feature, RangeBound::new(lo, hi));
        self
    }

    /// Whether the spec can only ever produce an empty view.
    pub fn is_degenerate(&self) -> bool {
        self.allowed_classes.is_empty()
            || self.range_constraints.values().any(RangeBound::is_empty)
    }

    /// Class membership AND every range constraint.
    pub fn matches(&self, record: &Record) -> bool {
        self.allowed_classes.contains(&record.class)
            && self
                .range_constraints
                .iter()
                .all(|(&feature, bound)| bound.contains(record.get(feature)))
    }
}

/// Return indices of records that pass `spec`, in dataset order.
pub fn filtered_indices(dataset: &Dataset, spec: &FilterSpec) -> Vec<usize> {
    if spec.is_degenerate() {
        return Vec::new();
    }
    dataset
        .records()
        .iter()
        .enumerate()
        .filter(|(_, rec)| spec.matches(rec))
        .map(|(i, _)| i)
        .collect()
}

// ---------------------------------------------------------------------------
// FilteredView – read-only window onto the visible records
// ---------------------------------------------------------------------------

/// The records selected by the last recomputation.
#[derive(Debug, Clone, Copy)]
pub struct FilteredView<'a> {
    dataset: &'a Dataset,
    indices: &'a [usize],
}

impl<'a> FilteredView<'a> {
    pub fn new(dataset: &'a Dataset, indices: &'a [usize]) -> Self {
        FilteredView { dataset, indices }
    }

    pub fn dataset(&self) -> &'a Dataset {
        self.dataset
    }

    /// Dataset positions of the visible records.
    pub fn indices(&self) -> &'a [usize] {
        self.indices
    }

    pub fn records(&self) -> impl Iterator<Item = &'a Record> + 'a {
        let dataset = self.dataset;
        self.indices.iter().map(move |&i| dataset.record(i))
    }

    /// Values of one feature for every visible record.
    pub fn values(&self, feature: Feature) -> impl Iterator<Item = f64> + 'a {
        self.records().map(move |r| r.get(feature))
    }

    /// Visible record count per class; classes of the dataset with no
    /// visible record report zero.
    pub fn class_counts(&self) -> BTreeMap<ClassLabel, usize> {
        let mut counts: BTreeMap<ClassLabel, usize> = self
            .dataset
            .classes()
            .iter()
            .map(|&c| (c, 0))
            .collect();
        for rec in self.records() {
            *counts.entry(rec.class).or_default() += 1;
        }
        counts
    }

    /// Re-filter the visible records with `spec`, keeping their order.
    pub fn refine(&self, spec: &FilterSpec) -> Vec<usize> {
        if spec.is_degenerate() {
            return Vec::new();
        }
        self.indices
            .iter()
            .copied()
            .filter(|&i| spec.matches(self.dataset.record(i)))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::load_wine;
    use crate::data::model::tests::small_dataset;

    const DESIGNATED: [Feature; 2] = [Feature::Alcohol, Feature::MalicAcid];

    /// All classes, and each of `features` bounded by its observed min / max.
    fn unrestricted(dataset: &Dataset, features: &[Feature]) -> FilterSpec {
        features.iter().fold(
            FilterSpec::new(dataset.classes().iter().copied()),
            |spec, &feature| {
                let b = dataset.bounds(feature);
                spec.with_range(feature, b.min, b.max)
            },
        )
    }

    fn is_subsequence(sub: &[usize], of: &[usize]) -> bool {
        let mut it = of.iter();
        sub.iter().all(|x| it.any(|y| y == x))
    }

    fn classes(ids: &[u32]) -> Vec<ClassLabel> {
        ids.iter().map(|&c| ClassLabel(c)).collect()
    }

    #[test]
    fn test_unrestricted_spec_is_identity() {
        let ds = load_wine().unwrap();
        let spec = unrestricted(&ds, &DESIGNATED);
        let idx = filtered_indices(&ds, &spec);
        assert_eq!(idx, (0..ds.len()).collect::<Vec<_>>());
    }

    #[test]
    fn test_empty_class_set_yields_nothing() {
        let ds = load_wine().unwrap();
        let mut spec = unrestricted(&ds, &DESIGNATED);
        spec.allowed_classes.clear();
        assert!(filtered_indices(&ds, &spec).is_empty());

        // still empty with ranges far wider than the data
        let spec = FilterSpec::default()
            .with_range(Feature::Alcohol, -1e9, 1e9)
            .with_range(Feature::MalicAcid, -1e9, 1e9);
        assert!(filtered_indices(&ds, &spec).is_empty());
    }

    #[test]
    fn test_inverted_range_yields_nothing() {
        let ds = load_wine().unwrap();
        let spec = unrestricted(&ds, &DESIGNATED)
            .with_range(Feature::MalicAcid, 3.0, 2.0);
        assert!(spec.is_degenerate());
        assert!(filtered_indices(&ds, &spec).is_empty());
    }

    #[test]
    fn test_nan_bound_yields_nothing() {
        let ds = load_wine().unwrap();
        let spec = unrestricted(&ds, &DESIGNATED)
            .with_range(Feature::Alcohol, f64::NAN, 14.0);
        assert!(filtered_indices(&ds, &spec).is_empty());
    }

    #[test]
    fn test_unknown_class_matches_nothing() {
        let ds = load_wine().unwrap();
        let spec = FilterSpec::new(classes(&[7]));
        assert!(filtered_indices(&ds, &spec).is_empty());

        // an unknown class next to a real one only contributes nothing
        let spec = FilterSpec::new(classes(&[2, 7]));
        assert_eq!(filtered_indices(&ds, &spec).len(), 48);
    }

    #[test]
    fn test_out_of_range_bounds_are_tolerated() {
        let ds = load_wine().unwrap();
        let spec = FilterSpec::new(ds.classes().iter().copied())
            .with_range(Feature::Alcohol, 0.0, 100.0)
            .with_range(Feature::MalicAcid, -5.0, 50.0);
        assert_eq!(filtered_indices(&ds, &spec).len(), ds.len());

        let spec = FilterSpec::new(ds.classes().iter().copied())
            .with_range(Feature::Alcohol, 20.0, 30.0);
        assert!(filtered_indices(&ds, &spec).is_empty());
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let ds = load_wine().unwrap();
        let max = ds.bounds(Feature::Alcohol).max;
        let spec = FilterSpec::new(ds.classes().iter().copied())
            .with_range(Feature::Alcohol, max, max);
        let idx = filtered_indices(&ds, &spec);
        assert_eq!(idx.len(), 1);
        assert_eq!(ds.record(idx[0]).get(Feature::Alcohol), max);
    }

    #[test]
    fn test_reference_record_scenario() {
        let ds = load_wine().unwrap();
        let spec = FilterSpec::new(classes(&[0]))
            .with_range(Feature::Alcohol, 14.0, 14.5)
            .with_range(Feature::MalicAcid, 1.5, 2.0);
        let idx = filtered_indices(&ds, &spec);
        assert!(idx.contains(&0));
        assert_eq!(idx.len(), 10);

        let other_class = FilterSpec {
            allowed_classes: classes(&[1]).into_iter().collect(),
            ..spec
        };
        assert!(!filtered_indices(&ds, &other_class).contains(&0));
    }

    #[test]
    fn test_every_visible_record_satisfies_spec() {
        let ds = load_wine().unwrap();
        let spec = FilterSpec::new(classes(&[0, 2]))
            .with_range(Feature::Alcohol, 12.5, 14.0)
            .with_range(Feature::MalicAcid, 1.0, 3.5);
        let idx = filtered_indices(&ds, &spec);
        assert!(!idx.is_empty());
        for &i in &idx {
            let r = ds.record(i);
            assert!(r.class == ClassLabel(0) || r.class == ClassLabel(2));
            assert!((12.5..=14.0).contains(&r.get(Feature::Alcohol)));
            assert!((1.0..=3.5).contains(&r.get(Feature::MalicAcid)));
        }
        // and nothing that satisfies it was dropped
        let expected = ds.records().iter().filter(|r| spec.matches(r)).count();
        assert_eq!(idx.len(), expected);
    }

    #[test]
    fn test_order_is_preserved() {
        let ds = load_wine().unwrap();
        let spec = FilterSpec::new(classes(&[1, 2])).with_range(Feature::Alcohol, 12.0, 13.5);
        let idx = filtered_indices(&ds, &spec);
        assert!(idx.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_deterministic_and_idempotent() {
        let ds = load_wine().unwrap();
        let spec = FilterSpec::new(classes(&[0, 1]))
            .with_range(Feature::Alcohol, 12.0, 14.0)
            .with_range(Feature::MalicAcid, 1.0, 4.0);
        let first = filtered_indices(&ds, &spec);
        let second = filtered_indices(&ds, &spec);
        assert_eq!(first, second);

        let again = FilteredView::new(&ds, &first).refine(&spec);
        assert_eq!(again, first);
    }

    #[test]
    fn test_narrowing_range_shrinks_monotonically() {
        let ds = load_wine().unwrap();
        let all = ds.classes().iter().copied();
        let wide = FilterSpec::new(all).with_range(Feature::Alcohol, 11.0, 15.0);
        let narrow = wide.clone().with_range(Feature::Alcohol, 13.0, 14.0);

        let wide_idx = filtered_indices(&ds, &wide);
        let narrow_idx = filtered_indices(&ds, &narrow);
        assert_eq!(wide_idx.len(), ds.len());
        assert_eq!(narrow_idx.len(), 70);
        assert!(is_subsequence(&narrow_idx, &wide_idx));
        assert_eq!(FilteredView::new(&ds, &wide_idx).refine(&narrow), narrow_idx);
    }

    #[test]
    fn test_view_class_counts() {
        let ds = small_dataset();
        let spec = FilterSpec::new(classes(&[0, 1])).with_range(Feature::Alcohol, 12.0, 15.0);
        let idx = filtered_indices(&ds, &spec);
        assert_eq!(idx, vec![0, 1, 3]);

        let view = FilteredView::new(&ds, &idx);
        let counts = view.class_counts();
        assert_eq!(counts[&ClassLabel(0)], 2);
        assert_eq!(counts[&ClassLabel(1)], 1);
        assert_eq!(counts[&ClassLabel(2)], 0);

        let alcohol: Vec<f64> = view.values(Feature::Alcohol).collect();
        assert_eq!(alcohol, vec![14.23, 12.37, 13.20]);
    }
}
