//! Plain-text extraction from a merged document body
//!
//! Walks `word/document.xml` collecting run text per paragraph. Tabs and
//! explicit line breaks are preserved; all other layout is discarded.

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::core::error::Result;

/// Collect one string per `w:p` paragraph, in document order.
pub fn paragraphs(xml: &str) -> Result<Vec<String>> {
    let mut reader = Reader::from_str(xml);
    let mut out = Vec::new();
    let mut current = String::new();
    let mut in_text = false;
    let mut in_paragraph = false;

    loop {
        match reader.read_event()? {
            Event::Start(e) => match e.name().as_ref() {
                b"w:p" => in_paragraph = true,
                b"w:t" => in_text = true,
                _ => {}
            },
            Event::Empty(e) => match e.name().as_ref() {
                b"w:tab" => current.push('\t'),
                b"w:br" | b"w:cr" => current.push('\n'),
                _ => {}
            },
            Event::Text(t) => {
                if in_text {
                    current.push_str(&t.unescape()?);
                }
            }
            Event::End(e) => match e.name().as_ref() {
                b"w:t" => in_text = false,
                b"w:p" => {
                    in_paragraph = false;
                    out.push(std::mem::take(&mut current));
                }
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }

    // Trailing text outside any closed paragraph (malformed body).
    if in_paragraph && !current.is_empty() {
        out.push(current);
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paragraph_text_collected() {
        let xml = "<w:body><w:p><w:r><w:t>Hello </w:t></w:r><w:r><w:t>world</w:t></w:r></w:p>\
                   <w:p><w:r><w:t>Second</w:t></w:r></w:p></w:body>";
        let paragraphs = paragraphs(xml).unwrap();
        assert_eq!(paragraphs, vec!["Hello world", "Second"]);
    }

    #[test]
    fn test_tabs_and_breaks_preserved() {
        let xml = "<w:p><w:r><w:t>a</w:t><w:tab/><w:t>b</w:t><w:br/><w:t>c</w:t></w:r></w:p>";
        let paragraphs = paragraphs(xml).unwrap();
        assert_eq!(paragraphs, vec!["a\tb\nc"]);
    }

    #[test]
    fn test_empty_paragraph_kept() {
        let xml = "<w:body><w:p/><w:p><w:r><w:t>x</w:t></w:r></w:p></w:body>";
        let paragraphs = paragraphs(xml).unwrap();
        // Self-closing w:p produces no End event, so only the real
        // paragraph survives.
        assert_eq!(paragraphs, vec!["x"]);
    }

    #[test]
    fn test_non_run_text_ignored() {
        let xml = "<w:p><w:pPr><w:pStyle w:val=\"Title\"/></w:pPr><w:r><w:t>Body</w:t></w:r></w:p>";
        assert_eq!(paragraphs(xml).unwrap(), vec!["Body"]);
    }
}
