use std::fmt;
use std::path::PathBuf;

use serde::Deserialize;

// ---------------------------------------------------------------------------
// ColumnCount – how many leading fields each record must provide
// ---------------------------------------------------------------------------

/// Number of leading columns extracted from every record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(try_from = "u8")]
pub enum ColumnCount {
    #[default]
    One,
    Two,
}

impl ColumnCount {
    pub fn get(self) -> usize {
        match self {
            ColumnCount::One => 1,
            ColumnCount::Two => 2,
        }
    }
}

impl TryFrom<u8> for ColumnCount {
    type Error = String;

    fn try_from(n: u8) -> Result<Self, Self::Error> {
        match n {
            1 => Ok(ColumnCount::One),
            2 => Ok(ColumnCount::Two),
            other => Err(format!("columns must be 1 or 2, got {other}")),
        }
    }
}

impl fmt::Display for ColumnCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get())
    }
}

// ---------------------------------------------------------------------------
// MalformedPolicy – what to do with a record that does not parse
// ---------------------------------------------------------------------------

/// Applied uniformly regardless of the column count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MalformedPolicy {
    /// The first malformed record aborts extraction; no series are returned.
    #[default]
    FailFast,
    /// Malformed records are dropped entirely and counted.
    SkipMalformed,
}

// ---------------------------------------------------------------------------
// ColumnSeries – one extracted column
// ---------------------------------------------------------------------------

/// Values of one column, one entry per qualifying line in file order.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSeries {
    pub name: String,
    pub values: Vec<f64>,
}

/// Summary statistics shown next to the plot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesStats {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
}

impl ColumnSeries {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// `[index, value]` pairs, the x-axis being the 0-based qualifying-line index.
    pub fn indexed_points(&self) -> Vec<[f64; 2]> {
        self.values
            .iter()
            .enumerate()
            .map(|(i, &v)| [i as f64, v])
            .collect()
    }

    /// Min / max / mean over the series, `None` when empty.
    pub fn stats(&self) -> Option<SeriesStats> {
        if self.is_empty() {
            return None;
        }
        let min = self.values.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = self.values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let mean = self.values.iter().sum::<f64>() / self.values.len() as f64;
        Some(SeriesStats { min, max, mean })
    }
}

// ---------------------------------------------------------------------------
// LogDataset – the result of one extraction pass
// ---------------------------------------------------------------------------

/// All series extracted from one log file. Every series has the same length.
#[derive(Debug, Clone)]
pub struct LogDataset {
    pub source: PathBuf,
    pub series: Vec<ColumnSeries>,
    /// Raw lines seen, blank ones included.
    pub lines_read: usize,
    /// Records dropped under [`MalformedPolicy::SkipMalformed`].
    pub skipped: usize,
}

impl LogDataset {
    /// Number of samples per series.
    pub fn len(&self) -> usize {
        self.series.first().map_or(0, ColumnSeries::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
