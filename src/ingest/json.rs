//! JSON data files: a single object carrying the three report fields

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::core::error::Result;
use crate::core::report::ReportData;

/// Raw shape of the JSON object. Every field is optional; `null` and absent
/// both collapse to an empty string in the canonical record.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawReport {
    #[serde(rename = "ClientName")]
    client_name: Option<String>,
    #[serde(rename = "InvoiceDate")]
    invoice_date: Option<String>,
    #[serde(rename = "AmountDue")]
    amount_due: Option<String>,
}

pub fn load(path: &Path) -> Result<ReportData> {
    let content = fs::read_to_string(path)?;
    let raw: RawReport = serde_json::from_str(&content)?;
    Ok(ReportData {
        client_name: raw.client_name.unwrap_or_default(),
        invoice_date: raw.invoice_date.unwrap_or_default(),
        amount_due: raw.amount_due.unwrap_or_default(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load_str(dir: &tempfile::TempDir, content: &str) -> Result<ReportData> {
        let path = dir.path().join("data.json");
        std::fs::write(&path, content).unwrap();
        load(&path)
    }

    #[test]
    fn test_missing_field_degrades_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        let data = load_str(&dir, r#"{"ClientName": "Acme"}"#).unwrap();
        assert_eq!(data.client_name, "Acme");
        assert_eq!(data.invoice_date, "");
        assert_eq!(data.amount_due, "");
    }

    #[test]
    fn test_null_field_degrades_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        let data = load_str(&dir, r#"{"ClientName": null, "AmountDue": "5.00"}"#).unwrap();
        assert_eq!(data.client_name, "");
        assert_eq!(data.amount_due, "5.00");
    }

    #[test]
    fn test_unknown_fields_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let data = load_str(&dir, r#"{"ClientName": "Acme", "Extra": 42}"#).unwrap();
        assert_eq!(data.client_name, "Acme");
    }

    #[test]
    fn test_malformed_json_is_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_str(&dir, "{not json").is_err());
    }
}
