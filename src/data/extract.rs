use std::fs::File;
use std::io::{BufRead, BufReader};
use std::num::ParseFloatError;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::model::{ColumnCount, ColumnSeries, LogDataset, MalformedPolicy};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Why extraction stopped. Line numbers are 1-based raw file lines.
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("cannot open {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("line {line}: read failed: {source}")]
    Read {
        line: usize,
        #[source]
        source: std::io::Error,
    },
    #[error("line {line}: expected at least {required} field(s), found {found}")]
    MissingField {
        line: usize,
        required: usize,
        found: usize,
    },
    #[error("line {line}, column {column}: '{token}' is not a number")]
    Parse {
        line: usize,
        column: usize,
        token: String,
        #[source]
        source: ParseFloatError,
    },
}

impl ExtractError {
    /// Whether this error describes a bad record, as opposed to an unreadable file.
    pub fn is_malformed_record(&self) -> bool {
        matches!(
            self,
            ExtractError::MissingField { .. } | ExtractError::Parse { .. }
        )
    }
}

// ---------------------------------------------------------------------------
// RecordParser – one configurable parser for every column count
// ---------------------------------------------------------------------------

/// Splits a line on whitespace runs and parses its leading fields as `f64`.
#[derive(Debug, Clone, Copy)]
pub struct RecordParser {
    pub required_fields: ColumnCount,
    pub policy: MalformedPolicy,
}

impl RecordParser {
    pub fn new(required_fields: ColumnCount, policy: MalformedPolicy) -> Self {
        Self {
            required_fields,
            policy,
        }
    }

    /// Parse one line. `Ok(None)` for blank lines; extra fields are ignored.
    pub fn parse_line(&self, line: &str, line_no: usize) -> Result<Option<Vec<f64>>, ExtractError> {
        if line.trim().is_empty() {
            return Ok(None);
        }
        let required = self.required_fields.get();
        let tokens: Vec<&str> = line.split_whitespace().take(required).collect();
        if tokens.len() < required {
            return Err(ExtractError::MissingField {
                line: line_no,
                required,
                found: tokens.len(),
            });
        }

        tokens
            .iter()
            .enumerate()
            .map(|(col, tok)| {
                tok.parse::<f64>().map_err(|source| ExtractError::Parse {
                    line: line_no,
                    column: col + 1,
                    token: tok.to_string(),
                    source,
                })
            })
            .collect::<Result<Vec<f64>, _>>()
            .map(Some)
    }
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Extract the configured columns from a log file on disk.
///
/// The file handle is dropped before returning, on success and on error.
pub fn extract_file(
    path: &Path,
    parser: &RecordParser,
    names: &[String],
) -> Result<LogDataset, ExtractError> {
    let file = File::open(path).map_err(|source| ExtractError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    log::debug!("Extracting {} column(s) from {}", parser.required_fields, path.display());
    extract_from_reader(BufReader::new(file), path, parser, names)
}

/// Extract the configured columns from any buffered reader.
///
/// `names` supplies series names in column order; missing names fall back to
/// `Column N`.
pub fn extract_from_reader<R: BufRead>(
    reader: R,
    source: &Path,
    parser: &RecordParser,
    names: &[String],
) -> Result<LogDataset, ExtractError> {
    let mut series: Vec<ColumnSeries> = (0..parser.required_fields.get())
        .map(|i| {
            names
                .get(i)
                .map(ColumnSeries::new)
                .unwrap_or_else(|| ColumnSeries::new(default_series_name(i)))
        })
        .collect();

    let mut lines_read = 0;
    let mut skipped = 0;

    for (idx, line) in reader.lines().enumerate() {
        let line_no = idx + 1;
        let line = line.map_err(|source| ExtractError::Read {
            line: line_no,
            source,
        })?;
        lines_read += 1;

        match parser.parse_line(&line, line_no) {
            Ok(Some(fields)) => {
                for (s, v) in series.iter_mut().zip(fields) {
                    s.values.push(v);
                }
            }
            Ok(None) => {}
            Err(e) if parser.policy == MalformedPolicy::SkipMalformed => {
                log::warn!("Skipping record: {e}");
                skipped += 1;
            }
            Err(e) => return Err(e),
        }
    }

    log::info!(
        "Extracted {} sample(s) x {} column(s) from {} ({} line(s), {} skipped)",
        series.first().map_or(0, ColumnSeries::len),
        series.len(),
        source.display(),
        lines_read,
        skipped
    );

    Ok(LogDataset {
        source: source.to_path_buf(),
        series,
        lines_read,
        skipped,
    })
}

/// Name used for column `index` (0-based) when none is configured.
pub fn default_series_name(index: usize) -> String {
    format!("Column {}", index + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};
    use tempfile::NamedTempFile;

    fn extract_str(
        text: &str,
        columns: ColumnCount,
        policy: MalformedPolicy,
    ) -> Result<LogDataset, ExtractError> {
        let parser = RecordParser::new(columns, policy);
        extract_from_reader(Cursor::new(text), Path::new("log.txt"), &parser, &[])
    }

    fn values(ds: &LogDataset) -> Vec<Vec<f64>> {
        ds.series.iter().map(|s| s.values.clone()).collect()
    }

    #[test]
    fn single_column_length_matches_non_blank_lines() {
        let text = "1.5\n\n  \n2.5 9\n-3e2\n\t\n4\n";
        let ds = extract_str(text, ColumnCount::One, MalformedPolicy::FailFast).unwrap();
        assert_eq!(values(&ds), vec![vec![1.5, 2.5, -300.0, 4.0]]);
        assert_eq!(ds.lines_read, 7);
        assert_eq!(ds.skipped, 0);
    }

    #[test]
    fn two_columns_skip_blank_lines_and_collapse_index() {
        let ds = extract_str("1.0 2.0\n\n3.0 4.0\n", ColumnCount::Two, MalformedPolicy::FailFast)
            .unwrap();
        assert_eq!(values(&ds), vec![vec![1.0, 3.0], vec![2.0, 4.0]]);
        assert_eq!(ds.len(), 2);
    }

    #[test]
    fn two_columns_ignore_extra_fields() {
        let ds = extract_str("1 2 3 4\n5   6\t7\n", ColumnCount::Two, MalformedPolicy::FailFast)
            .unwrap();
        assert_eq!(values(&ds), vec![vec![1.0, 5.0], vec![2.0, 6.0]]);
    }

    #[test]
    fn short_record_is_dropped_entirely_when_skipping() {
        let ds = extract_str("1.0\n2.0 3.0\n", ColumnCount::Two, MalformedPolicy::SkipMalformed)
            .unwrap();
        assert_eq!(values(&ds), vec![vec![2.0], vec![3.0]]);
        assert_eq!(ds.skipped, 1);
    }

    #[test]
    fn short_record_fails_fast_by_default() {
        let err = extract_str("1.0\n2.0 3.0\n", ColumnCount::Two, MalformedPolicy::default())
            .unwrap_err();
        assert!(matches!(
            err,
            ExtractError::MissingField {
                line: 1,
                required: 2,
                found: 1
            }
        ));
        assert!(err.is_malformed_record());
    }

    #[test]
    fn non_numeric_token_fails_fast() {
        let err = extract_str("abc\n", ColumnCount::One, MalformedPolicy::FailFast).unwrap_err();
        match err {
            ExtractError::Parse {
                line, column, token, ..
            } => {
                assert_eq!(line, 1);
                assert_eq!(column, 1);
                assert_eq!(token, "abc");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn non_numeric_second_column_reports_its_line() {
        let err = extract_str("1 2\n\n3 x\n", ColumnCount::Two, MalformedPolicy::FailFast)
            .unwrap_err();
        assert!(matches!(err, ExtractError::Parse { line: 3, column: 2, .. }));
    }

    #[test]
    fn non_numeric_record_is_skipped_uniformly() {
        let ds = extract_str("abc\n1\n2 oops\n", ColumnCount::One, MalformedPolicy::SkipMalformed)
            .unwrap();
        assert_eq!(values(&ds), vec![vec![1.0, 2.0]]);
        assert_eq!(ds.skipped, 1);
    }

    #[test]
    fn empty_input_yields_empty_series() {
        for columns in [ColumnCount::One, ColumnCount::Two] {
            let ds = extract_str("", columns, MalformedPolicy::FailFast).unwrap();
            assert_eq!(ds.series.len(), columns.get());
            assert!(ds.series.iter().all(ColumnSeries::is_empty));
            assert!(ds.is_empty());
        }
    }

    #[test]
    fn series_names_fall_back_to_column_numbers() {
        let parser = RecordParser::new(ColumnCount::Two, MalformedPolicy::FailFast);
        let names = vec!["IR".to_string()];
        let ds = extract_from_reader(Cursor::new("1 2\n"), Path::new("x"), &parser, &names)
            .unwrap();
        assert_eq!(ds.series[0].name, "IR");
        assert_eq!(ds.series[1].name, "Column 2");
    }

    #[test]
    fn extracts_from_file_on_disk() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "120 98").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "121 97").unwrap();

        let parser = RecordParser::new(ColumnCount::Two, MalformedPolicy::FailFast);
        let ds = extract_file(file.path(), &parser, &[]).unwrap();
        assert_eq!(values(&ds), vec![vec![120.0, 121.0], vec![98.0, 97.0]]);
        assert_eq!(ds.source, file.path());
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.txt");
        let parser = RecordParser::new(ColumnCount::One, MalformedPolicy::FailFast);
        let err = extract_file(&path, &parser, &[]).unwrap_err();
        assert!(matches!(err, ExtractError::Io { .. }));
        assert!(!err.is_malformed_record());
    }

    #[test]
    fn invalid_utf8_is_a_read_error() {
        let parser = RecordParser::new(ColumnCount::One, MalformedPolicy::SkipMalformed);
        let bytes: &[u8] = b"1\n\xff\xfe\n";
        let err = extract_from_reader(Cursor::new(bytes), Path::new("x"), &parser, &[])
            .unwrap_err();
        assert!(matches!(err, ExtractError::Read { line: 2, .. }));
    }
}
