use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::color::series_color;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – per-series statistics
// ---------------------------------------------------------------------------

/// Render the left statistics panel.
pub fn side_panel(ui: &mut Ui, state: &AppState) {
    ui.heading("Series");
    ui.separator();

    let dataset = match &state.dataset {
        Some(ds) => ds,
        None => {
            ui.label("No log loaded.");
            return;
        }
    };

    ui.label(format!("File: {}", dataset.source.display()));
    ui.label(format!(
        "{} line(s) read, {} skipped",
        dataset.lines_read, dataset.skipped
    ));
    ui.separator();

    let count = dataset.series.len();
    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for (idx, series) in dataset.series.iter().enumerate() {
                ui.label(
                    RichText::new(&series.name)
                        .strong()
                        .color(series_color(idx, count)),
                );

                egui::Grid::new(("series_stats", idx))
                    .num_columns(2)
                    .striped(true)
                    .show(ui, |ui: &mut Ui| {
                        ui.label("Samples");
                        ui.label(series.len().to_string());
                        ui.end_row();

                        if let Some(stats) = series.stats() {
                            ui.label("Min");
                            ui.label(format!("{:.3}", stats.min));
                            ui.end_row();
                            ui.label("Max");
                            ui.label(format!("{:.3}", stats.max));
                            ui.end_row();
                            ui.label("Mean");
                            ui.label(format!("{:.3}", stats.mean));
                            ui.end_row();
                        }

                        ui.label("Heart rate");
                        match state.heart_rates.get(idx).copied().flatten() {
                            Some(hr) => ui.label(format!("{:.1} BPM ({:.2} Hz)", hr.bpm, hr.hz)),
                            None => ui.label("–"),
                        };
                        ui.end_row();
                    });
                ui.add_space(8.0);
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            if ui.button("Reload").clicked() {
                state.reload();
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!(
                "{} series × {} samples ({} total)",
                ds.series.len(),
                ds.len(),
                state.sample_count()
            ));
        }

        ui.separator();

        if ui.selectable_label(state.show_markers, "Markers").clicked() {
            state.show_markers = !state.show_markers;
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open sample log")
        .add_filter("Logs", &["txt", "log", "dat"])
        .add_filter("All files", &["*"])
        .pick_file();

    if let Some(path) = file {
        state.load_and_report(&path);
    }
}
