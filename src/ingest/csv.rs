//! CSV data files: header row plus one data row

use std::path::Path;

use crate::core::error::{BuildError, Result};
use crate::core::report::ReportData;

/// Map the first data row onto the report fields by header name. Headers are
/// matched case-insensitively after trimming; rows past the first are
/// ignored.
pub fn load(path: &Path) -> Result<ReportData> {
    let mut reader = csv::Reader::from_path(path)?;
    let headers = reader.headers()?.clone();

    let record = match reader.records().next() {
        Some(record) => record?,
        None => {
            return Err(BuildError::CsvShape(
                "no data row after the header".to_string(),
            ))
        }
    };

    let mut data = ReportData::default();
    for (index, header) in headers.iter().enumerate() {
        let value = record.get(index).unwrap_or_default();
        match header.trim().to_ascii_lowercase().as_str() {
            "clientname" => data.client_name = value.to_string(),
            "invoicedate" => data.invoice_date = value.to_string(),
            "amountdue" => data.amount_due = value.to_string(),
            _ => {}
        }
    }

    Ok(data)
}
