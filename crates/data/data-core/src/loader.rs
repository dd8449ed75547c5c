//! CSV loading into a [`Frame`]

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use data_spi::{DataError, Frame, Result, DATE_COLUMN};
use tracing::debug;

use crate::aliases::ColumnAliases;
use crate::calendar::parse_date;

/// Load a dataset from disk.
///
/// A missing file is reported as [`DataError::FileNotFound`] before any read
/// is attempted.
pub fn load_csv_path(path: &Path, aliases: &ColumnAliases) -> Result<Frame> {
    if !path.is_file() {
        return Err(DataError::FileNotFound(path.display().to_string()));
    }
    let file = File::open(path).map_err(|e| DataError::Csv(format!("{}: {}", path.display(), e)))?;
    let frame = load_csv_reader(BufReader::new(file), aliases)?;
    debug!(
        path = %path.display(),
        rows = frame.nobs(),
        columns = frame.neqs(),
        "loaded dataset"
    );
    Ok(frame)
}

/// Load a dataset from in-memory CSV text, e.g. an upload.
pub fn load_csv_str(text: &str, aliases: &ColumnAliases) -> Result<Frame> {
    load_csv_reader(text.as_bytes(), aliases)
}

/// Load a dataset from any reader.
///
/// The column called `date` (case-insensitive, after renaming) becomes the
/// index; every other column must hold a number on every row.
pub fn load_csv_reader<R: Read>(reader: R, aliases: &ColumnAliases) -> Result<Frame> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| aliases.resolve(h.trim_start_matches('\u{feff}')))
        .collect();

    let date_idx = headers
        .iter()
        .position(|h| h.eq_ignore_ascii_case(DATE_COLUMN))
        .ok_or(DataError::MissingDateColumn)?;

    for (i, header) in headers.iter().enumerate() {
        if headers[..i].iter().any(|h| h == header) {
            return Err(DataError::DuplicateColumn(header.clone()));
        }
    }

    let value_idx: Vec<usize> = (0..headers.len()).filter(|&i| i != date_idx).collect();
    if value_idx.is_empty() {
        return Err(DataError::NoDataColumns);
    }
    let columns: Vec<String> = value_idx.iter().map(|&i| headers[i].clone()).collect();

    let mut dates = Vec::new();
    let mut values = Vec::new();

    for (i, record) in reader.records().enumerate() {
        let record = record?;
        let row = i + 1;
        if record.iter().all(|field| field.is_empty()) {
            continue;
        }

        let raw_date = record.get(date_idx).unwrap_or_default();
        let date = parse_date(raw_date).ok_or_else(|| DataError::InvalidDate {
            row,
            value: raw_date.to_string(),
        })?;

        let mut obs = Vec::with_capacity(value_idx.len());
        for &j in &value_idx {
            let raw = record.get(j).unwrap_or_default();
            let value = raw
                .replace(',', "")
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| DataError::InvalidValue {
                    row,
                    column: headers[j].clone(),
                    value: raw.to_string(),
                })?;
            obs.push(value);
        }

        dates.push(date);
        values.push(obs);
    }

    Frame::new(dates, columns, values)
}
