//! egui views: the menu bar, the statistics panel and the series windows.

pub mod panels;
pub mod plot;
