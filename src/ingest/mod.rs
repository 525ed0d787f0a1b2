//! Input normalizer: unifies JSON, XML and CSV data files into the
//! canonical [`ReportData`] record.
//!
//! Policy: a missing or empty field in the source degrades to an empty
//! string; only a structurally invalid file (unparsable JSON/XML, a CSV
//! without a data row, an unreadable stream) is an error.

mod csv;
mod json;
mod xml;

use std::path::Path;

use crate::core::error::Result;
use crate::core::report::{InputFormat, ReportData};

/// Read `path` in the declared `format` and produce the canonical record.
pub fn load_report(path: &Path, format: InputFormat) -> Result<ReportData> {
    let data = match format {
        InputFormat::Json => json::load(path)?,
        InputFormat::Xml => xml::load(path)?,
        InputFormat::Csv => csv::load(path)?,
    };
    tracing::debug!(
        "Loaded {} record from {}: client={:?}",
        format.label(),
        path.display(),
        data.client_name
    );
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_temp(dir: &tempfile::TempDir, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    fn full_record() -> ReportData {
        ReportData {
            client_name: "Acme Corp".to_string(),
            invoice_date: "2026-08-29".to_string(),
            amount_due: "1,250.00".to_string(),
        }
    }

    #[test]
    fn test_json_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_temp(
            &dir,
            "data.json",
            r#"{"ClientName": "Acme Corp", "InvoiceDate": "2026-08-29", "AmountDue": "1,250.00"}"#,
        );
        assert_eq!(load_report(&path, InputFormat::Json).unwrap(), full_record());
    }

    #[test]
    fn test_xml_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_temp(
            &dir,
            "data.xml",
            "<Report><ClientName>Acme Corp</ClientName>\
             <InvoiceDate>2026-08-29</InvoiceDate>\
             <AmountDue>1,250.00</AmountDue></Report>",
        );
        assert_eq!(load_report(&path, InputFormat::Xml).unwrap(), full_record());
    }

    #[test]
    fn test_csv_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_temp(
            &dir,
            "data.csv",
            "ClientName,InvoiceDate,AmountDue\nAcme Corp,2026-08-29,\"1,250.00\"\n",
        );
        assert_eq!(load_report(&path, InputFormat::Csv).unwrap(), full_record());
    }

    #[test]
    fn test_missing_file_is_error() {
        let result = load_report(Path::new("/nonexistent/data.json"), InputFormat::Json);
        assert!(result.is_err());
    }
}
