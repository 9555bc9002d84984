use std::path::Path;

use anyhow::{Context, Result};

use crate::config::ViewerConfig;
use crate::data::extract::{extract_file, ExtractError};
use crate::data::heart_rate::{estimate_heart_rate, HeartRate};
use crate::data::model::LogDataset;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// How logs are parsed; its `path` tracks the currently shown file.
    pub config: ViewerConfig,

    /// Loaded dataset (None until a log is loaded).
    pub dataset: Option<LogDataset>,

    /// Heart-rate estimate per series, same order as `dataset.series`.
    pub heart_rates: Vec<Option<HeartRate>>,

    /// Draw a marker on every sample.
    pub show_markers: bool,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: ViewerConfig) -> Self {
        Self {
            config,
            dataset: None,
            heart_rates: Vec::new(),
            show_markers: true,
            status_message: None,
        }
    }

    /// Ingest a newly extracted dataset and analyse its series.
    pub fn set_dataset(&mut self, dataset: LogDataset) {
        self.heart_rates = dataset
            .series
            .iter()
            .map(|s| estimate_heart_rate(&s.values, self.config.sample_rate_hz))
            .collect();
        for (s, hr) in dataset.series.iter().zip(&self.heart_rates) {
            match hr {
                Some(hr) => log::info!("{}: {:.1} BPM ({:.3} Hz)", s.name, hr.bpm, hr.hz),
                None => log::debug!("{}: no heart-rate estimate", s.name),
            }
        }

        self.config.path = dataset.source.clone();
        self.dataset = Some(dataset);
        self.status_message = None;
    }

    /// Extract `path` with the current settings. On failure the previous
    /// dataset is kept and the error is returned.
    pub fn load(&mut self, path: &Path) -> Result<()> {
        let dataset = extract_file(path, &self.config.parser(), &self.config.series_names())
            .with_context(|| format!("loading {}", path.display()))?;
        self.set_dataset(dataset);
        Ok(())
    }

    /// Load `path` and report failures in the status bar.
    pub fn load_and_report(&mut self, path: &Path) {
        if let Err(e) = self.load(path) {
            log::error!("Failed to load file: {e:#}");
            let hint = match e.downcast_ref::<ExtractError>() {
                Some(err) if err.is_malformed_record() => {
                    " (policy = \"skip-malformed\" drops bad records)"
                }
                _ => "",
            };
            self.status_message = Some(format!("Error: {e:#}{hint}"));
        }
    }

    /// Re-read the current file from disk.
    pub fn reload(&mut self) {
        let path = self.config.path.clone();
        self.load_and_report(&path);
    }

    /// Total number of samples across all series.
    pub fn sample_count(&self) -> usize {
        self.dataset
            .as_ref()
            .map_or(0, |ds| ds.series.iter().map(|s| s.len()).sum())
    }
}
