use eframe::egui::{self, Color32, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::color::{blues, blues_text};
use crate::data::model::Feature;
use crate::state::AppState;

const TABLE_TITLE: Color32 = Color32::from_rgb(0x34, 0x98, 0xDB);

// ---------------------------------------------------------------------------
// Filtered records table
// ---------------------------------------------------------------------------

/// Every visible record and field, numeric cells shaded per column.
pub fn data_table(ui: &mut Ui, state: &AppState) {
    let view = state.view();

    ui.heading(RichText::new("Filtered Wine Data").color(TABLE_TITLE));
    if view.is_empty() {
        ui.label("No records match the current filters.");
        return;
    }

    // Shading follows the visible range of each column.
    let ranges: Vec<(f64, f64)> = Feature::ALL
        .iter()
        .map(|&f| {
            view.values(f)
                .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                    (lo.min(v), hi.max(v))
                })
        })
        .collect();

    let indices = view.indices();
    let row_height = ui.text_style_height(&egui::TextStyle::Body) + 6.0;

    TableBuilder::new(ui)
        .striped(false)
        .resizable(true)
        .cell_layout(egui::Layout::right_to_left(egui::Align::Center))
        .column(Column::auto().at_least(36.0))
        .columns(Column::auto().at_least(64.0), Feature::COUNT)
        .column(Column::auto().at_least(56.0))
        .max_scroll_height(state.config.table_max_height)
        .header(row_height, |mut header| {
            header.col(|ui| {
                ui.strong("#");
            });
            for feature in Feature::ALL {
                header.col(|ui| {
                    ui.strong(feature.column_name());
                });
            }
            header.col(|ui| {
                ui.strong("target");
            });
        })
        .body(|body| {
            body.rows(row_height, indices.len(), |mut row| {
                let idx = indices[row.index()];
                let rec = state.dataset.record(idx);

                row.col(|ui| {
                    ui.label(idx.to_string());
                });
                for (feature, &(lo, hi)) in Feature::ALL.iter().zip(&ranges) {
                    let value = rec.get(*feature);
                    let t = column_position(value, lo, hi);
                    row.col(|ui| {
                        ui.painter().rect_filled(ui.max_rect(), 0.0, blues(t));
                        ui.label(RichText::new(value.to_string()).color(blues_text(t)));
                    });
                }
                row.col(|ui| {
                    ui.label(
                        RichText::new(rec.class.0.to_string())
                            .color(state.color_map.color_for(rec.class)),
                    );
                });
            });
        });
}

/// Position of `value` within `[lo, hi]`; a constant column maps to 0.
fn column_position(value: f64, lo: f64, hi: f64) -> f64 {
    let span = hi - lo;
    if span > 0.0 {
        (value - lo) / span
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_position() {
        assert_eq!(column_position(11.03, 11.03, 14.83), 0.0);
        assert_eq!(column_position(14.83, 11.03, 14.83), 1.0);
        assert!((column_position(12.93, 11.03, 14.83) - 0.5).abs() < 1e-9);
        assert_eq!(column_position(5.0, 5.0, 5.0), 0.0);
    }
}
