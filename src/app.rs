use eframe::egui::{self, Color32, RichText, ScrollArea};

use crate::config::ExplorerConfig;
use crate::data::model::Dataset;
use crate::state::AppState;
use crate::ui::{panels, plot, table};

const TITLE_COLOR: Color32 = Color32::from_rgb(0x6C, 0x75, 0x7D);

/// Heading colours of the histograms, in range-feature order.
const HISTOGRAM_COLORS: [Color32; 2] = [
    Color32::from_rgb(0xFF, 0xC3, 0x00),
    Color32::from_rgb(0xFF, 0x57, 0x33),
];

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct WineExplorerApp {
    pub state: AppState,
}

impl WineExplorerApp {
    pub fn new(dataset: Dataset, config: ExplorerConfig) -> Self {
        Self {
            state: AppState::new(dataset, config),
        }
    }
}

impl eframe::App for WineExplorerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(260.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: charts and table ----
        egui::CentralPanel::default().show(ctx, |ui| {
            ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.heading(RichText::new("Wine Dataset Explorer").color(TITLE_COLOR));
                    });
                    ui.add_space(8.0);

                    ui.columns(2, |cols| {
                        plot::scatter_2d(&mut cols[0], &self.state);
                        plot::scatter_3d(&mut cols[1], &mut self.state);
                    });
                    ui.add_space(12.0);

                    let state = &self.state;
                    for (i, &feature) in state.config.range_features.iter().enumerate() {
                        let color = HISTOGRAM_COLORS[i % HISTOGRAM_COLORS.len()];
                        plot::histogram(ui, state, feature, color);
                        ui.add_space(12.0);
                    }

                    table::data_table(ui, state);
                });
        });
    }
}
