use std::collections::BTreeSet;

use crate::color::ClassColorMap;
use crate::config::ExplorerConfig;
use crate::data::filter::{FilterSpec, FilteredView, filtered_indices};
use crate::data::model::{ClassLabel, Dataset, Feature, FeatureBounds};
use crate::projection::{Camera, Normalizer};

// ---------------------------------------------------------------------------
// Filter controls – the raw widget values
// ---------------------------------------------------------------------------

/// One inclusive range control (two sliders) for a feature.
#[derive(Debug, Clone, PartialEq)]
pub struct RangeControl {
    pub feature: Feature,
    /// Slider limits: the observed min / max of the feature.
    pub limits: FeatureBounds,
    pub lo: f64,
    pub hi: f64,
}

impl RangeControl {
    fn full(feature: Feature, limits: FeatureBounds) -> Self {
        RangeControl {
            feature,
            limits,
            lo: limits.min,
            hi: limits.max,
        }
    }

    pub fn reset(&mut self) {
        self.lo = self.limits.min;
        self.hi = self.limits.max;
    }

    pub fn is_full(&self) -> bool {
        self.lo <= self.limits.min && self.hi >= self.limits.max
    }
}

/// Current widget values. Turned into a [`FilterSpec`] on every change.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterControls {
    pub classes: BTreeSet<ClassLabel>,
    pub ranges: Vec<RangeControl>,
}

impl FilterControls {
    /// All classes selected, every range at its full observed extent.
    pub fn defaults(dataset: &Dataset, range_features: &[Feature]) -> Self {
        FilterControls {
            classes: dataset.classes().clone(),
            ranges: range_features
                .iter()
                .map(|&f| RangeControl::full(f, dataset.bounds(f)))
                .collect(),
        }
    }

    /// Snapshot the widgets as an immutable spec.
    pub fn to_spec(&self) -> FilterSpec {
        self.ranges.iter().fold(
            FilterSpec::new(self.classes.iter().copied()),
            |spec, r| spec.with_range(r.feature, r.lo, r.hi),
        )
    }
}

// ---------------------------------------------------------------------------
// Export status shown in the top bar
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum StatusMessage {
    Info(String),
    Error(String),
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: ExplorerConfig,

    /// Loaded once at start-up, never mutated.
    pub dataset: Dataset,

    /// Widget values for the filter panel.
    pub controls: FilterControls,

    /// Indices of records passing the current filters.
    pub visible_indices: Vec<usize>,

    /// Class → colour, shared by every chart.
    pub color_map: ClassColorMap,

    /// View angles of the 3D scatter.
    pub camera: Camera,

    /// Axis scaling of the 3D scatter.
    pub normalizer: Normalizer,

    /// Status / error message shown in the UI.
    pub status_message: Option<StatusMessage>,
}

impl AppState {
    pub fn new(dataset: Dataset, config: ExplorerConfig) -> Self {
        let controls = FilterControls::defaults(&dataset, &config.range_features);
        let color_map = ClassColorMap::new(dataset.classes());
        let normalizer = Normalizer::new(&dataset, config.scatter_3d_axes);

        let mut state = Self {
            config,
            dataset,
            controls,
            visible_indices: Vec::new(),
            color_map,
            camera: Camera::default(),
            normalizer,
            status_message: None,
        };
        state.refilter();
        state
    }

    /// The records currently on screen.
    pub fn view(&self) -> FilteredView<'_> {
        FilteredView::new(&self.dataset, &self.visible_indices)
    }

    /// Recompute `visible_indices` from scratch after a control change.
    pub fn refilter(&mut self) {
        let spec = self.controls.to_spec();
        if spec
            .range_constraints
            .values()
            .any(|bound| bound.is_empty())
        {
            log::warn!("Inverted range in filter {spec:?}; nothing will match");
        }
        self.visible_indices = filtered_indices(&self.dataset, &spec);
        debug_assert_eq!(self.view().refine(&spec), self.visible_indices);
        log::debug!(
            "Filter {:?} → {} of {} records",
            spec,
            self.visible_indices.len(),
            self.dataset.len()
        );
    }

    /// Toggle a single class in the multi-select.
    pub fn toggle_class(&mut self, class: ClassLabel) {
        if !self.controls.classes.remove(&class) {
            self.controls.classes.insert(class);
        }
        self.refilter();
    }

    /// Select all classes.
    pub fn select_all_classes(&mut self) {
        self.controls.classes = self.dataset.classes().clone();
        self.refilter();
    }

    /// Deselect all classes.
    pub fn select_no_classes(&mut self) {
        self.controls.classes.clear();
        self.refilter();
    }

    /// Set the bounds of the range control at `index`, clamped to the
    /// observed extent of its feature.
    pub fn set_range(&mut self, index: usize, lo: f64, hi: f64) {
        if let Some(control) = self.controls.ranges.get_mut(index) {
            let FeatureBounds { min, max } = control.limits;
            // slider snapping can overshoot the last step past `max`
            control.lo = lo.clamp(min, max);
            control.hi = hi.clamp(min, max);
            self.refilter();
        }
    }

    /// Put the range control at `index` back to its full extent.
    pub fn reset_range(&mut self, index: usize) {
        if let Some(control) = self.controls.ranges.get_mut(index) {
            control.reset();
            self.refilter();
        }
    }

    /// Restore every control to its default.
    pub fn reset_filters(&mut self) {
        self.controls = FilterControls::defaults(&self.dataset, &self.config.range_features);
        self.refilter();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::load_wine;

    fn wine_state() -> AppState {
        AppState::new(load_wine().unwrap(), ExplorerConfig::default())
    }

    #[test]
    fn test_default_controls_show_everything() {
        let state = wine_state();
        assert_eq!(state.visible_indices.len(), 178);
        assert_eq!(state.controls.classes.len(), 3);
        assert_eq!(state.controls.ranges.len(), 2);
        assert!(state.controls.ranges.iter().all(RangeControl::is_full));
    }

    #[test]
    fn test_spec_mirrors_controls() {
        let state = wine_state();
        let spec = state.controls.to_spec();
        assert_eq!(spec.allowed_classes, *state.dataset.classes());
        let alcohol = spec.range_constraints[&Feature::Alcohol];
        assert!((alcohol.lo - 11.03).abs() < 1e-12);
        assert!((alcohol.hi - 14.83).abs() < 1e-12);
        assert!(spec.range_constraints.contains_key(&Feature::MalicAcid));
    }

    #[test]
    fn test_toggle_class_round_trip() {
        let mut state = wine_state();
        state.toggle_class(ClassLabel(0));
        assert_eq!(state.visible_indices.len(), 178 - 59);
        assert!(state
            .view()
            .records()
            .all(|r| r.class != ClassLabel(0)));

        state.toggle_class(ClassLabel(0));
        assert_eq!(state.visible_indices.len(), 178);
    }

    #[test]
    fn test_select_none_then_all() {
        let mut state = wine_state();
        state.select_no_classes();
        assert!(state.visible_indices.is_empty());
        assert!(state.view().is_empty());

        state.select_all_classes();
        assert_eq!(state.visible_indices.len(), 178);
    }

    #[test]
    fn test_set_and_reset_range() {
        let mut state = wine_state();
        state.set_range(0, 13.0, 14.0);
        assert_eq!(state.visible_indices.len(), 70);

        state.set_range(0, 14.0, 13.0);
        assert!(state.visible_indices.is_empty());

        state.reset_range(0);
        assert_eq!(state.visible_indices.len(), 178);

        // out-of-bounds index is ignored
        state.set_range(9, 0.0, 0.0);
        assert_eq!(state.visible_indices.len(), 178);
    }

    #[test]
    fn test_set_range_clamps_to_observed_extent() {
        let mut state = wine_state();
        let limits = state.controls.ranges[1].limits;
        let step = state.config.slider_step;

        // last step of a 0.1 grid starting at 0.74 lands on 5.84
        let snapped_end = limits.min + ((limits.max - limits.min) / step).round() * step;
        assert!(snapped_end > limits.max);

        state.set_range(1, limits.min - 1.0, snapped_end);
        let control = &state.controls.ranges[1];
        assert_eq!(control.lo, limits.min);
        assert_eq!(control.hi, limits.max);
        assert!(control.is_full());

        let bound = state.controls.to_spec().range_constraints[&Feature::MalicAcid];
        assert_eq!(bound.lo, limits.min);
        assert_eq!(bound.hi, limits.max);
        assert_eq!(state.visible_indices.len(), 178);
    }

    #[test]
    fn test_reference_scenario_through_controls() {
        let mut state = wine_state();
        state.controls.classes = [ClassLabel(0)].into_iter().collect();
        state.set_range(0, 14.0, 14.5);
        state.set_range(1, 1.5, 2.0);
        assert!(state.visible_indices.contains(&0));

        state.controls.classes = [ClassLabel(1)].into_iter().collect();
        state.refilter();
        assert!(!state.visible_indices.contains(&0));

        state.reset_filters();
        assert_eq!(state.visible_indices.len(), 178);
    }
}
