//! Saving a merged document in the chosen output format

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use zip::write::SimpleFileOptions;
use zip::ZipWriter;

use crate::core::error::Result;
use crate::core::report::OutputFormat;
use crate::engine::template::{MergedDocument, DOCUMENT_ENTRY};
use crate::engine::{extract, pdf};

/// Write `doc` to `path` in the requested format.
pub fn save(doc: &MergedDocument, format: OutputFormat, path: &Path) -> Result<()> {
    match format {
        OutputFormat::Docx => save_docx(doc, path),
        OutputFormat::Txt => save_txt(doc, path),
        OutputFormat::Html => save_html(doc, path),
        OutputFormat::Pdf => save_pdf(doc, path),
    }
}

/// Rewrite the template archive with the merged document body; every other
/// entry is copied through unchanged.
fn save_docx(doc: &MergedDocument, path: &Path) -> Result<()> {
    let file = File::create(path)?;
    let mut archive = ZipWriter::new(file);
    let options = SimpleFileOptions::default();

    for (name, bytes) in &doc.entries {
        archive.start_file(name.as_str(), options)?;
        if name == DOCUMENT_ENTRY {
            archive.write_all(doc.document_xml.as_bytes())?;
        } else {
            archive.write_all(bytes)?;
        }
    }

    archive.finish()?;
    Ok(())
}

fn save_txt(doc: &MergedDocument, path: &Path) -> Result<()> {
    let paragraphs = extract::paragraphs(&doc.document_xml)?;
    let mut text = paragraphs.join("\n");
    text.push('\n');
    fs::write(path, text)?;
    Ok(())
}

fn save_html(doc: &MergedDocument, path: &Path) -> Result<()> {
    let paragraphs = extract::paragraphs(&doc.document_xml)?;
    let title = document_title(path);

    let mut html = String::from("<!DOCTYPE html>\n<html>\n<head>\n");
    html.push_str(&format!(
        "<meta charset=\"utf-8\">\n<title>{}</title>\n",
        quick_xml::escape::escape(&title)
    ));
    html.push_str("</head>\n<body>\n");
    for paragraph in &paragraphs {
        html.push_str("<p>");
        html.push_str(&quick_xml::escape::escape(paragraph).replace('\n', "<br>"));
        html.push_str("</p>\n");
    }
    html.push_str("</body>\n</html>\n");

    fs::write(path, html)?;
    Ok(())
}

fn save_pdf(doc: &MergedDocument, path: &Path) -> Result<()> {
    let paragraphs = extract::paragraphs(&doc.document_xml)?;
    pdf::render(&paragraphs, &document_title(path), path)
}

/// Document title for PDF metadata and the HTML `<title>`.
fn document_title(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "Invoice".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn merged_doc(xml: &str) -> MergedDocument {
        MergedDocument {
            entries: vec![
                (
                    "[Content_Types].xml".to_string(),
                    b"<Types/>".to_vec(),
                ),
                (DOCUMENT_ENTRY.to_string(), xml.as_bytes().to_vec()),
            ],
            document_xml: xml.to_string(),
        }
    }

    const BODY: &str = "<w:document><w:body><w:p><w:r><w:t>Acme Corp</w:t></w:r></w:p>\
                        <w:p><w:r><w:t>1,250.00</w:t></w:r></w:p></w:body></w:document>";

    #[test]
    fn test_txt_output_contains_merged_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        save(&merged_doc(BODY), OutputFormat::Txt, &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text, "Acme Corp\n1,250.00\n");
    }

    #[test]
    fn test_html_output_is_escaped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.html");
        let body = "<w:p><w:r><w:t>Smith &amp; Sons</w:t></w:r></w:p>";
        save(&merged_doc(body), OutputFormat::Html, &path).unwrap();

        let html = std::fs::read_to_string(&path).unwrap();
        assert!(html.contains("<p>Smith &amp; Sons</p>"));
        assert!(html.contains("<title>out</title>"));
    }

    #[test]
    fn test_docx_output_keeps_all_entries() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.docx");
        save(&merged_doc(BODY), OutputFormat::Docx, &path).unwrap();

        let file = std::fs::File::open(&path).unwrap();
        let mut archive = zip::ZipArchive::new(file).unwrap();
        assert_eq!(archive.len(), 2);

        let mut body = String::new();
        std::io::Read::read_to_string(
            &mut archive.by_name(DOCUMENT_ENTRY).unwrap(),
            &mut body,
        )
        .unwrap();
        assert!(body.contains("Acme Corp"));
    }

    #[test]
    fn test_pdf_output_written() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.pdf");
        save(&merged_doc(BODY), OutputFormat::Pdf, &path).unwrap();
        assert!(std::fs::metadata(&path).unwrap().len() > 0);
    }
}
