//! XML data files: first matching child elements under the document root

use std::fs;
use std::path::Path;

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::core::error::Result;
use crate::core::report::ReportData;

/// Which report field, if any, an element name maps onto.
fn field_for<'a>(data: &'a mut ReportData, local_name: &[u8]) -> Option<&'a mut String> {
    match local_name {
        b"ClientName" => Some(&mut data.client_name),
        b"InvoiceDate" => Some(&mut data.invoice_date),
        b"AmountDue" => Some(&mut data.amount_due),
        _ => None,
    }
}

/// Read the first `ClientName`/`InvoiceDate`/`AmountDue` elements from the
/// document. Missing elements stay empty; only malformed XML is an error.
pub fn load(path: &Path) -> Result<ReportData> {
    let content = fs::read_to_string(path)?;

    let mut reader = Reader::from_str(&content);
    let mut data = ReportData::default();
    // Element names already captured; later duplicates are ignored.
    let mut seen: Vec<Vec<u8>> = Vec::new();
    let mut current: Option<Vec<u8>> = None;

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                let name = e.local_name().as_ref().to_vec();
                if field_for(&mut data, &name).is_some() && !seen.contains(&name) {
                    current = Some(name);
                }
            }
            Event::Text(t) => {
                if let Some(ref name) = current {
                    let text = t.unescape()?;
                    if let Some(field) = field_for(&mut data, name) {
                        field.push_str(&text);
                    }
                }
            }
            Event::End(e) => {
                if let Some(ref name) = current {
                    if e.local_name().as_ref() == name.as_slice() {
                        seen.push(current.take().unwrap_or_default());
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(data)
}
