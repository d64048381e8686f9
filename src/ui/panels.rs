use eframe::egui::{self, Color32, RichText, ScrollArea, Slider, Ui};

use crate::data::export::{ExportFormat, export_file};
use crate::data::model::ClassLabel;
use crate::projection::Camera;
use crate::state::{AppState, StatusMessage};

const PANEL_TITLE: Color32 = Color32::from_rgb(0xFF, 0x4B, 0x4B);

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading(RichText::new("Filter Parameters").color(PANEL_TITLE));
    ui.separator();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            class_filter(ui, state);
            ui.separator();
            range_filters(ui, state);
            ui.separator();
            if ui.button("Reset all filters").clicked() {
                state.reset_filters();
            }
        });
}

/// Multi-select over the distinct classes, one coloured checkbox each.
fn class_filter(ui: &mut Ui, state: &mut AppState) {
    let counts = state.view().class_counts();
    let classes: Vec<ClassLabel> = state.dataset.classes().iter().copied().collect();

    let n_selected = state.controls.classes.len();
    let n_total = classes.len();
    let header_text = format!("Wine Class (Target)  ({n_selected}/{n_total})");

    egui::CollapsingHeader::new(RichText::new(header_text).strong())
        .id_salt("class_filter")
        .default_open(true)
        .show(ui, |ui: &mut Ui| {
            ui.horizontal(|ui: &mut Ui| {
                if ui.small_button("All").clicked() {
                    state.select_all_classes();
                }
                if ui.small_button("None").clicked() {
                    state.select_no_classes();
                }
            });

            for class in classes {
                let mut checked = state.controls.classes.contains(&class);
                let visible = counts.get(&class).copied().unwrap_or(0);
                let text = RichText::new(format!("{class}  ({visible} visible)"))
                    .color(state.color_map.color_for(class));
                if ui.checkbox(&mut checked, text).changed() {
                    state.toggle_class(class);
                }
            }
        });
}

/// Two sliders (min, max) per designated feature.
fn range_filters(ui: &mut Ui, state: &mut AppState) {
    let step = state.config.slider_step;

    for index in 0..state.controls.ranges.len() {
        let control = &state.controls.ranges[index];
        let feature = control.feature;
        let limits = control.limits;
        let is_full = control.is_full();
        let mut lo = control.lo;
        let mut hi = control.hi;

        ui.strong(format!("{} Range", feature.label()));

        let mut changed = ui
            .add(
                Slider::new(&mut lo, limits.min..=limits.max)
                    .step_by(step)
                    .text("min"),
            )
            .changed();
        changed |= ui
            .add(
                Slider::new(&mut hi, limits.min..=limits.max)
                    .step_by(step)
                    .text("max"),
            )
            .changed();

        let mut reset = false;
        ui.horizontal(|ui: &mut Ui| {
            ui.label(format!("[{lo:.2}, {hi:.2}]"));
            reset = ui
                .add_enabled(!is_full, egui::Button::new("Reset").small())
                .clicked();
        });

        if lo > hi {
            ui.colored_label(Color32::YELLOW, "min is above max: nothing matches");
        }

        if reset {
            state.reset_range(index);
        } else if changed {
            state.set_range(index, lo, hi);
        }
        ui.add_space(6.0);
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Export filtered CSV…").clicked() {
                export_dialog(state, ExportFormat::Csv);
                ui.close_menu();
            }
            if ui.button("Export filtered JSON…").clicked() {
                export_dialog(state, ExportFormat::Json);
                ui.close_menu();
            }
        });

        ui.menu_button("View", |ui: &mut Ui| {
            if ui.button("Reset filters").clicked() {
                state.reset_filters();
                ui.close_menu();
            }
            if ui.button("Reset 3D camera").clicked() {
                state.camera = Camera::default();
                ui.close_menu();
            }
        });

        ui.separator();

        ui.label(format!(
            "{} of {} records visible",
            state.view().len(),
            state.dataset.len()
        ));

        ui.separator();

        match &state.status_message {
            Some(StatusMessage::Info(msg)) => {
                ui.label(msg.as_str());
            }
            Some(StatusMessage::Error(msg)) => {
                ui.label(RichText::new(msg).color(Color32::RED));
            }
            None => {}
        }
    });
}

// ---------------------------------------------------------------------------
// Export dialog
// ---------------------------------------------------------------------------

pub fn export_dialog(state: &mut AppState, format: ExportFormat) {
    let ext = format.extension();
    let file = rfd::FileDialog::new()
        .set_title("Export filtered records")
        .add_filter(ext.to_uppercase(), &[ext])
        .set_file_name(format!("wine_filtered.{ext}"))
        .save_file();

    let Some(path) = file else {
        return;
    };

    let n_records = state.visible_indices.len();
    let result = export_file(&state.view(), &path, format);
    match result {
        Ok(()) => {
            log::info!("Exported {n_records} records to {}", path.display());
            state.status_message = Some(StatusMessage::Info(format!(
                "Exported {n_records} records to {}",
                path.display()
            )));
        }
        Err(e) => {
            log::error!("Failed to export: {e:#}");
            state.status_message = Some(StatusMessage::Error(format!("Error: {e:#}")));
        }
    }
}
