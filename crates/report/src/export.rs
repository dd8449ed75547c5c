//! CSV export of the target forecast

use crate::error::{ReportError, Result};
use crate::pipeline::ForecastReport;

/// Date format used for every exported date.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Render the forecast as CSV with header `date,<target>`.
///
/// With `include_intervals` two more columns, `lower` and `upper`, carry the
/// interval bounds.
pub fn to_csv(report: &ForecastReport, include_intervals: bool) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    let mut header = vec!["date".to_string(), report.target.clone()];
    if include_intervals {
        header.push("lower".to_string());
        header.push("upper".to_string());
    }
    writer.write_record(&header)?;

    for point in &report.forecast {
        let mut record = vec![
            point.date.format(DATE_FORMAT).to_string(),
            point.value.to_string(),
        ];
        if include_intervals {
            record.push(point.lower.to_string());
            record.push(point.upper.to_string());
        }
        writer.write_record(&record)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ReportError::Csv(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| ReportError::Csv(e.to_string()))
}
