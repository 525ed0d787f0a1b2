//! DOCX template loading
//!
//! A `.docx` file is a ZIP archive; the merge operates on the
//! `word/document.xml` payload and every other entry is carried through
//! unchanged when saving back to DOCX.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use zip::ZipArchive;

use crate::core::error::{BuildError, Result};
use crate::engine::merge;

/// Archive entry name holding the document body.
pub const DOCUMENT_ENTRY: &str = "word/document.xml";

/// A loaded, unmerged template.
#[derive(Debug, Clone)]
pub struct DocxTemplate {
    /// All archive entries (name, bytes), including the document body.
    entries: Vec<(String, Vec<u8>)>,
    /// Decoded `word/document.xml`.
    document_xml: String,
}

/// A template with merge fields substituted, ready to save.
#[derive(Debug, Clone)]
pub struct MergedDocument {
    pub(crate) entries: Vec<(String, Vec<u8>)>,
    pub(crate) document_xml: String,
}

impl DocxTemplate {
    /// Open a template from disk, reading every archive entry into memory.
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        let mut archive = ZipArchive::new(file)?;

        let mut entries = Vec::with_capacity(archive.len());
        let mut document_xml = None;

        for index in 0..archive.len() {
            let mut entry = archive.by_index(index)?;
            if entry.is_dir() {
                continue;
            }
            let name = entry.name().to_string();
            let mut bytes = Vec::with_capacity(entry.size() as usize);
            entry.read_to_end(&mut bytes)?;

            if name == DOCUMENT_ENTRY {
                let xml = String::from_utf8(bytes.clone()).map_err(|_| {
                    BuildError::Template(format!("{DOCUMENT_ENTRY} is not valid UTF-8"))
                })?;
                document_xml = Some(xml);
            }
            entries.push((name, bytes));
        }

        let document_xml = document_xml.ok_or_else(|| {
            BuildError::Template(format!("no {DOCUMENT_ENTRY} entry, not a Word document"))
        })?;

        tracing::debug!(
            "Opened template {} ({} entries)",
            path.display(),
            entries.len()
        );
        Ok(Self {
            entries,
            document_xml,
        })
    }

    /// Names of every merge field present in the document body.
    pub fn merge_field_names(&self) -> Result<Vec<String>> {
        merge::field_names(&self.document_xml)
    }

    /// Substitute the given field name/value pairs, producing a document
    /// ready for export. Fields not named in `fields` are left untouched.
    pub fn merge(&self, fields: &[(&str, &str)]) -> Result<MergedDocument> {
        let document_xml = merge::execute(&self.document_xml, fields)?;
        Ok(MergedDocument {
            entries: self.entries.clone(),
            document_xml,
        })
    }
}

impl MergedDocument {
    /// Merged document body XML.
    pub fn document_xml(&self) -> &str {
        &self.document_xml
    }
}
