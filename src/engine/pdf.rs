//! PDF rendering of extracted paragraph text

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use printpdf::{BuiltinFont, Mm, PdfDocument};

use crate::core::error::{BuildError, Result};

const A4_WIDTH_MM: f32 = 210.0;
const A4_HEIGHT_MM: f32 = 297.0;
const MARGIN_MM: f32 = 20.0;
const FONT_SIZE_PT: f32 = 11.0;
const LINE_HEIGHT_MM: f32 = 6.0;

/// Render paragraphs onto A4 pages with a builtin font, one line per
/// paragraph line, paginating when the page fills up.
pub fn render(paragraphs: &[String], title: &str, output_path: &Path) -> Result<()> {
    let (doc, page, layer) =
        PdfDocument::new(title, Mm(A4_WIDTH_MM), Mm(A4_HEIGHT_MM), "Layer 1");

    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| BuildError::PdfGeneration(format!("font setup failed: {e:?}")))?;

    let top = A4_HEIGHT_MM - MARGIN_MM;
    let mut current_layer = doc.get_page(page).get_layer(layer);
    let mut y = top;

    for paragraph in paragraphs {
        for line in paragraph.split('\n') {
            if y < MARGIN_MM {
                let (page, layer) = doc.add_page(Mm(A4_WIDTH_MM), Mm(A4_HEIGHT_MM), "Layer 1");
                current_layer = doc.get_page(page).get_layer(layer);
                y = top;
            }
            // Builtin fonts have no tab advance; approximate with spaces.
            let line = line.replace('\t', "    ");
            current_layer.use_text(line, FONT_SIZE_PT, Mm(MARGIN_MM), Mm(y), &font);
            y -= LINE_HEIGHT_MM;
        }
    }

    let file = File::create(output_path)?;
    doc.save(&mut BufWriter::new(file))
        .map_err(|e| BuildError::PdfGeneration(format!("save failed: {e:?}")))?;

    Ok(())
}
