//! Canonical report record and input/output format selection

use std::path::Path;

/// The canonical record merged into the template.
///
/// All three fields are opaque text. A field missing from the source file is
/// carried as an empty string; `AmountDue` is never parsed as a number.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportData {
    pub client_name: String,
    pub invoice_date: String,
    pub amount_due: String,
}

impl ReportData {
    /// Merge-field names, in the order the values are bound.
    pub const MERGE_FIELDS: [&'static str; 3] = ["ClientName", "InvoiceDate", "AmountDue"];

    /// Field name/value pairs for the merge, bound positionally.
    pub fn merge_pairs(&self) -> [(&'static str, &str); 3] {
        [
            (Self::MERGE_FIELDS[0], self.client_name.as_str()),
            (Self::MERGE_FIELDS[1], self.invoice_date.as_str()),
            (Self::MERGE_FIELDS[2], self.amount_due.as_str()),
        ]
    }

    /// Output file name: `Invoice_<ClientName>.<ext>` with spaces replaced
    /// by underscores.
    pub fn output_file_name(&self, format: OutputFormat) -> String {
        format!(
            "Invoice_{}.{}",
            self.client_name.replace(' ', "_"),
            format.extension()
        )
    }
}

/// Declared format of the data file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputFormat {
    #[default]
    Json,
    Xml,
    Csv,
}

impl InputFormat {
    pub const ALL: [InputFormat; 3] = [InputFormat::Json, InputFormat::Xml, InputFormat::Csv];

    /// Extensions offered in the data-file dialog filter.
    pub const EXTENSIONS: [&'static str; 3] = ["json", "xml", "csv"];

    pub fn label(&self) -> &'static str {
        match self {
            InputFormat::Json => "JSON",
            InputFormat::Xml => "XML",
            InputFormat::Csv => "CSV",
        }
    }

    /// Auto-detect the format from a file extension. The user can still
    /// override the result through the format selector.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "json" => Some(InputFormat::Json),
            "xml" => Some(InputFormat::Xml),
            "csv" => Some(InputFormat::Csv),
            _ => None,
        }
    }
}

/// Format of the generated document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Pdf,
    Docx,
    Html,
    Txt,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 4] = [
        OutputFormat::Pdf,
        OutputFormat::Docx,
        OutputFormat::Html,
        OutputFormat::Txt,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            OutputFormat::Pdf => "PDF",
            OutputFormat::Docx => "DOCX",
            OutputFormat::Html => "HTML",
            OutputFormat::Txt => "TXT",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Pdf => "pdf",
            OutputFormat::Docx => "docx",
            OutputFormat::Html => "html",
            OutputFormat::Txt => "txt",
        }
    }
}
