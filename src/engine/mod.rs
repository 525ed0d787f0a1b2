//! Document generation: template loading, merge-field substitution, export

pub mod export;
pub mod extract;
pub mod merge;
mod pdf;
pub mod template;

use std::path::{Path, PathBuf};

use crate::core::error::Result;
use crate::core::report::{OutputFormat, ReportData};
use self::template::DocxTemplate;

/// Run the full pipeline: open the template, merge the record, save in the
/// chosen format. The output lands in the working directory, named
/// `Invoice_<ClientName>.<ext>`.
pub fn generate(
    template_path: &Path,
    data: &ReportData,
    format: OutputFormat,
) -> Result<PathBuf> {
    let template = DocxTemplate::open(template_path)?;
    let merged = template.merge(&data.merge_pairs())?;

    let output_path = PathBuf::from(data.output_file_name(format));
    export::save(&merged, format, &output_path)?;

    tracing::info!(
        "Generated {} from {}",
        output_path.display(),
        template_path.display()
    );
    Ok(output_path)
}
