use eframe::egui::{self, Context, Ui};
use egui_plot::{Legend, Line, MarkerShape, Plot, PlotPoints, Points};

use crate::color::series_color;
use crate::data::model::ColumnSeries;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Series windows – one plot window per extracted column
// ---------------------------------------------------------------------------

/// Render one floating window per series.
pub fn series_windows(ctx: &Context, state: &AppState) {
    let Some(dataset) = &state.dataset else {
        return;
    };
    let file_name = dataset
        .source
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| dataset.source.display().to_string());

    let count = dataset.series.len();
    for (idx, series) in dataset.series.iter().enumerate() {
        let title = format!("{} of {file_name}", series.name);
        egui::Window::new(title)
            .id(egui::Id::new(("series_window", idx)))
            .default_size([720.0, 420.0])
            .default_pos([240.0 + 40.0 * idx as f32, 60.0 + 460.0 * idx as f32])
            .resizable(true)
            .show(ctx, |ui: &mut Ui| {
                series_plot(ui, idx, count, series, state.show_markers);
            });
    }
}

fn series_plot(ui: &mut Ui, idx: usize, count: usize, series: &ColumnSeries, markers: bool) {
    let color = series_color(idx, count);
    let points = series.indexed_points();

    Plot::new(("series_plot", idx))
        .legend(Legend::default())
        .x_axis_label("Index (line number)")
        .y_axis_label("Value")
        .show_grid(true)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            let line = Line::new(PlotPoints::from(points.clone()))
                .name(&series.name)
                .color(color)
                .width(1.5);
            plot_ui.line(line);

            if markers {
                let marks = Points::new(PlotPoints::from(points))
                    .name(&series.name)
                    .shape(MarkerShape::Circle)
                    .radius(2.5)
                    .color(color);
                plot_ui.points(marks);
            }
        });
}

// ---------------------------------------------------------------------------
// Central panel placeholder
// ---------------------------------------------------------------------------

/// Shown behind the series windows.
pub fn background(ui: &mut Ui, state: &AppState) {
    ui.centered_and_justified(|ui: &mut Ui| match &state.dataset {
        None => {
            ui.heading("Open a log to plot its columns  (File → Open…)");
        }
        Some(ds) if ds.is_empty() => {
            ui.heading(format!("{} has no samples", ds.source.display()));
        }
        Some(_) => {}
    });
}
