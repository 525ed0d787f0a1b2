//! Error taxonomy for ingest and document generation

use thiserror::Error;

/// Failures surfaced by the ingest and engine layers.
///
/// Every variant renders as a single human-readable line; the UI shows it
/// verbatim in the status bar prefixed with `Error:`.
#[derive(Error, Debug)]
pub enum BuildError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not parse JSON data: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("could not parse XML data: {0}")]
    XmlParse(#[from] quick_xml::Error),

    #[error("could not parse CSV data: {0}")]
    CsvParse(#[from] csv::Error),

    #[error("could not parse CSV data: {0}")]
    CsvShape(String),

    #[error("template archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("invalid template: {0}")]
    Template(String),

    #[error("PDF generation error: {0}")]
    PdfGeneration(String),
}

pub type Result<T> = std::result::Result<T, BuildError>;
