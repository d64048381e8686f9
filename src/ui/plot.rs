use eframe::egui::{Color32, RichText, Ui};
use egui_plot::{Bar, BarChart, Legend, Line, Plot, PlotPoint, PlotPoints, Points, Text};

use crate::data::histogram::ClassHistogram;
use crate::data::model::Feature;
use crate::projection::Camera;
use crate::state::AppState;

/// Radians of rotation per dragged pixel in the 3D scatter.
const DRAG_SENSITIVITY: f64 = 0.01;

// ---------------------------------------------------------------------------
// 2D scatter
// ---------------------------------------------------------------------------

/// Scatter of the two configured features, one series per class.
pub fn scatter_2d(ui: &mut Ui, state: &AppState) {
    let [x_feature, y_feature] = state.config.scatter_axes;
    let view = state.view();

    ui.strong(format!("{} vs {}", x_feature.label(), y_feature.label()));

    Plot::new("scatter_2d")
        .legend(Legend::default())
        .x_axis_label(x_feature.label())
        .y_axis_label(y_feature.label())
        .height(state.config.chart_height)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for &class in state.dataset.classes() {
                let points: PlotPoints = view
                    .records()
                    .filter(|r| r.class == class)
                    .map(|r| [r.get(x_feature), r.get(y_feature)])
                    .collect();

                plot_ui.points(
                    Points::new(points)
                        .name(class.to_string())
                        .color(state.color_map.color_for(class))
                        .radius(4.0)
                        .filled(true),
                );
            }
        });
}

// ---------------------------------------------------------------------------
// 3D scatter (orthographic projection, drag to rotate)
// ---------------------------------------------------------------------------

pub fn scatter_3d(ui: &mut Ui, state: &mut AppState) {
    let axes = state.normalizer.axes();

    ui.horizontal(|ui: &mut Ui| {
        ui.strong(format!(
            "3D Scatter ({}, {}, {})",
            axes[0].label(),
            axes[1].label(),
            axes[2].label()
        ));
        if ui.small_button("Reset view").clicked() {
            state.camera = Camera::default();
        }
    });

    let camera = state.camera;
    let normalizer = state.normalizer;
    let view = state.view();

    let response = Plot::new("scatter_3d")
        .legend(Legend::default())
        .height(state.config.chart_height)
        .data_aspect(1.0)
        .show_axes(false)
        .show_grid(false)
        .allow_boxed_zoom(false)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .include_x(-1.9)
        .include_x(1.9)
        .include_y(-1.9)
        .include_y(1.9)
        .show(ui, |plot_ui| {
            // Axis triad from the (-1, -1, -1) corner of the cube.
            for (i, feature) in axes.iter().enumerate() {
                let from = [-1.0; 3];
                let mut to = [-1.0; 3];
                to[i] = 1.0;
                let a = camera.project(from);
                let b = camera.project(to);
                plot_ui.line(
                    Line::new(PlotPoints::from(vec![[a.x, a.y], [b.x, b.y]]))
                        .color(Color32::DARK_GRAY)
                        .width(1.0),
                );
                plot_ui.text(
                    Text::new(PlotPoint::new(b.x, b.y), feature.label())
                        .color(Color32::LIGHT_GRAY),
                );
            }

            for &class in state.dataset.classes() {
                let mut near = Vec::new();
                let mut far = Vec::new();
                for rec in view.records().filter(|r| r.class == class) {
                    let p = camera.project(normalizer.normalize(rec));
                    if p.depth >= 0.0 {
                        near.push([p.x, p.y]);
                    } else {
                        far.push([p.x, p.y]);
                    }
                }

                let color = state.color_map.color_for(class);
                // same name so the legend shows one entry per class
                plot_ui.points(
                    Points::new(PlotPoints::from(far))
                        .name(class.to_string())
                        .color(color.gamma_multiply(0.7))
                        .radius(2.5)
                        .filled(true),
                );
                plot_ui.points(
                    Points::new(PlotPoints::from(near))
                        .name(class.to_string())
                        .color(color)
                        .radius(4.0)
                        .filled(true),
                );
            }
        })
        .response;

    let drag = response.drag_delta();
    if drag.x != 0.0 || drag.y != 0.0 {
        state.camera.yaw -= f64::from(drag.x) * DRAG_SENSITIVITY;
        state.camera.pitch = (state.camera.pitch + f64::from(drag.y) * DRAG_SENSITIVITY)
            .clamp(-std::f64::consts::FRAC_PI_2, std::f64::consts::FRAC_PI_2);
    }
}

// ---------------------------------------------------------------------------
// Histogram (stacked by class)
// ---------------------------------------------------------------------------

/// Class-stacked histogram of one feature over the visible records.
pub fn histogram(ui: &mut Ui, state: &AppState, feature: Feature, title_color: Color32) {
    let view = state.view();
    let hist = ClassHistogram::compute(&view, feature, state.config.histogram_bins);

    ui.heading(
        RichText::new(format!("{} Distribution by Wine Class", feature.label()))
            .color(title_color),
    );
    if hist.bin_count() == 0 {
        ui.label("No records match the current filters.");
    } else {
        ui.label(format!(
            "{} records in {} bins",
            hist.total(),
            hist.bin_count()
        ));
    }

    // 20% gap between bars
    let bar_width = hist.bin_width() * 0.8;

    Plot::new(("histogram", feature))
        .legend(Legend::default())
        .x_axis_label(feature.label())
        .y_axis_label("count")
        .height(state.config.chart_height)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            let mut charts: Vec<BarChart> = Vec::new();
            for (&class, counts) in &hist.counts {
                let bars: Vec<Bar> = counts
                    .iter()
                    .enumerate()
                    .map(|(i, &n)| Bar::new(hist.center(i), n as f64).width(bar_width))
                    .collect();

                let below: Vec<&BarChart> = charts.iter().collect();
                let chart = BarChart::new(bars)
                    .name(class.to_string())
                    .color(state.color_map.color_for(class))
                    .stack_on(&below);
                charts.push(chart);
            }
            for chart in charts {
                plot_ui.bar_chart(chart);
            }
        });
}
