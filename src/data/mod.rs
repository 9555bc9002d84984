/// Data layer: core types, extraction, and analysis.
///
/// Architecture:
/// ```text
///   log.txt  (whitespace-delimited columns)
///        │
///        ▼
///   ┌───────────┐
///   │  extract   │  parse lines → LogDataset
///   └───────────┘
///        │
///        ▼
///   ┌────────────┐
///   │ LogDataset  │  Vec<ColumnSeries>, line counters
///   └────────────┘
///        │
///        ▼
///   ┌────────────┐
///   │ heart_rate  │  FFT peak in 0.5–3 Hz → HeartRate
///   └────────────┘
/// ```

pub mod extract;
pub mod heart_rate;
pub mod model;
