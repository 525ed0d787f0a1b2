//! Streaming merge-field substitution over WordprocessingML
//!
//! Word encodes merge fields two ways:
//!
//! - complex fields: a run with `<w:fldChar w:fldCharType="begin"/>`, runs
//!   carrying `<w:instrText>MERGEFIELD Name</w:instrText>`, an optional
//!   `separate` marker with cached-result runs, then an `end` marker;
//! - simple fields: `<w:fldSimple w:instr=" MERGEFIELD Name ">...</w:fldSimple>`.
//!
//! Both are replaced by a single literal run `<w:r><w:t>value</w:t></w:r>`.
//! Fields whose instruction is not a known MERGEFIELD are emitted unchanged,
//! as are fields nested inside another field.

use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

use crate::core::error::Result;

/// Extract an attribute value by key from an element
fn get_attr(e: &BytesStart, key: &[u8]) -> Option<String> {
    e.attributes()
        .find(|a| a.as_ref().ok().map(|x| x.key.as_ref()) == Some(key))
        .and_then(std::result::Result::ok)
        .map(|attr| String::from_utf8_lossy(&attr.value).to_string())
}

/// Parse a field instruction and return the MERGEFIELD name, if it is one.
///
/// Instructions look like `MERGEFIELD ClientName \* MERGEFORMAT`; the name
/// may be quoted.
fn merge_field_name(instr: &str) -> Option<String> {
    let mut tokens = instr.split_whitespace();
    while let Some(token) = tokens.next() {
        if token.eq_ignore_ascii_case("MERGEFIELD") {
            return tokens.next().map(|name| name.trim_matches('"').to_string());
        }
    }
    None
}

/// In-flight state of a complex field being buffered.
struct FieldState {
    /// Events since the `begin` marker, replayed verbatim if the field is
    /// not one of ours.
    buffered: Vec<Event<'static>>,
    /// Accumulated `w:instrText` content.
    instr: String,
    /// Inside a `w:instrText` element.
    in_instr: bool,
    /// Count of nested `begin` markers.
    depth: usize,
    /// The `end` marker has been seen; the field closes with its run.
    end_seen: bool,
}

/// Write the literal replacement run for a merged value.
fn write_value_run(writer: &mut Writer<Vec<u8>>, value: &str) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new("w:r")))?;
    let mut text_el = BytesStart::new("w:t");
    text_el.push_attribute(("xml:space", "preserve"));
    writer.write_event(Event::Start(text_el))?;
    writer.write_event(Event::Text(BytesText::new(value)))?;
    writer.write_event(Event::End(BytesEnd::new("w:t")))?;
    writer.write_event(Event::End(BytesEnd::new("w:r")))?;
    Ok(())
}

fn lookup<'a>(fields: &[(&str, &'a str)], name: &str) -> Option<&'a str> {
    fields
        .iter()
        .find(|(field, _)| *field == name)
        .map(|(_, value)| *value)
}

/// Substitute merge fields in a `word/document.xml` payload.
///
/// `fields` binds field names to replacement values positionally; names not
/// present are left untouched in the output.
///
/// Runs are buffered until it is known whether they open a complex field, so
/// a replaced field (which spans several runs) collapses into one literal
/// run without leaving the enclosing runs behind.
pub fn execute(xml: &str, fields: &[(&str, &str)]) -> Result<String> {
    let mut reader = Reader::from_str(xml);
    let mut writer = Writer::new(Vec::new());
    // Current run, held back until it proves not to start a field.
    let mut run: Option<Vec<Event<'static>>> = None;
    let mut field: Option<FieldState> = None;

    loop {
        let event = reader.read_event()?;
        if matches!(event, Event::Eof) {
            break;
        }

        // A field in progress buffers everything through the close of the
        // run holding its `end` marker.
        let mut field_done = false;
        if let Some(state) = field.as_mut() {
            match &event {
                Event::Start(e) | Event::Empty(e) if e.name().as_ref() == b"w:fldChar" => {
                    match get_attr(e, b"w:fldCharType").unwrap_or_default().as_str() {
                        "begin" => state.depth += 1,
                        "end" if state.depth > 0 => state.depth -= 1,
                        "end" => state.end_seen = true,
                        _ => {}
                    }
                }
                Event::Start(e) if e.name().as_ref() == b"w:instrText" => state.in_instr = true,
                Event::End(e) if e.name().as_ref() == b"w:instrText" => state.in_instr = false,
                Event::Text(t) if state.in_instr => state.instr.push_str(&t.unescape()?),
                Event::End(e) if e.name().as_ref() == b"w:r" && state.end_seen => {
                    field_done = true;
                }
                _ => {}
            }
            if !field_done {
                state.buffered.push(event.into_owned());
                continue;
            }
        }
        if field_done {
            if let Some(state) = field.take() {
                let value =
                    merge_field_name(&state.instr).and_then(|name| lookup(fields, &name));
                match value {
                    Some(value) => write_value_run(&mut writer, value)?,
                    None => {
                        for buffered in state.buffered {
                            writer.write_event(buffered)?;
                        }
                        writer.write_event(event)?;
                    }
                }
            }
            continue;
        }

        match &event {
            // Hold the run back until we know it does not open a field.
            Event::Start(e) if e.name().as_ref() == b"w:r" && run.is_none() => {
                run = Some(vec![event.into_owned()]);
                continue;
            }
            // A `begin` marker turns the held run into a field buffer.
            Event::Start(e) | Event::Empty(e)
                if e.name().as_ref() == b"w:fldChar"
                    && get_attr(e, b"w:fldCharType").as_deref() == Some("begin") =>
            {
                let mut buffered = run.take().unwrap_or_default();
                buffered.push(event.into_owned());
                field = Some(FieldState {
                    buffered,
                    instr: String::new(),
                    in_instr: false,
                    depth: 0,
                    end_seen: false,
                });
                continue;
            }
            // Run closed without a field: flush it.
            Event::End(e) if e.name().as_ref() == b"w:r" && run.is_some() => {
                if let Some(events) = run.take() {
                    for buffered in events {
                        writer.write_event(buffered)?;
                    }
                }
                writer.write_event(event)?;
                continue;
            }
            _ => {}
        }
        if let Some(events) = run.as_mut() {
            events.push(event.into_owned());
            continue;
        }

        // Paragraph-level content, including simple fields.
        match event {
            Event::Start(ref e) if e.name().as_ref() == b"w:fldSimple" => {
                let instr = get_attr(e, b"w:instr").unwrap_or_default();
                match merge_field_name(&instr).and_then(|name| lookup(fields, &name)) {
                    Some(value) => {
                        write_value_run(&mut writer, value)?;
                        reader.read_to_end(e.name())?;
                    }
                    None => writer.write_event(event)?,
                }
            }
            Event::Empty(ref e) if e.name().as_ref() == b"w:fldSimple" => {
                let instr = get_attr(e, b"w:instr").unwrap_or_default();
                match merge_field_name(&instr).and_then(|name| lookup(fields, &name)) {
                    Some(value) => write_value_run(&mut writer, value)?,
                    None => writer.write_event(event)?,
                }
            }
            event => writer.write_event(event)?,
        }
    }

    // An unterminated field or run is malformed; replay whatever was
    // buffered.
    if let Some(state) = field {
        for buffered in state.buffered {
            writer.write_event(buffered)?;
        }
    }
    if let Some(events) = run {
        for buffered in events {
            writer.write_event(buffered)?;
        }
    }

    let bytes = writer.into_inner();
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// List every MERGEFIELD name found in a document body, in order.
pub fn field_names(xml: &str) -> Result<Vec<String>> {
    let mut reader = Reader::from_str(xml);
    let mut names = Vec::new();
    let mut in_instr = false;

    loop {
        match reader.read_event()? {
            Event::Eof => break,
            Event::Start(e) if e.name().as_ref() == b"w:instrText" => in_instr = true,
            Event::End(e) if e.name().as_ref() == b"w:instrText" => in_instr = false,
            Event::Text(t) if in_instr => {
                if let Some(name) = merge_field_name(&t.unescape()?) {
                    names.push(name);
                }
            }
            Event::Start(e) | Event::Empty(e) if e.name().as_ref() == b"w:fldSimple" => {
                let instr = get_attr(&e, b"w:instr").unwrap_or_default();
                if let Some(name) = merge_field_name(&instr) {
                    names.push(name);
                }
            }
            _ => {}
        }
    }

    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;

    const COMPLEX_FIELD: &str = r#"<w:p><w:r><w:fldChar w:fldCharType="begin"/></w:r><w:r><w:instrText xml:space="preserve"> MERGEFIELD ClientName \* MERGEFORMAT </w:instrText></w:r><w:r><w:fldChar w:fldCharType="separate"/></w:r><w:r><w:t>«ClientName»</w:t></w:r><w:r><w:fldChar w:fldCharType="end"/></w:r></w:p>"#;

    const SIMPLE_FIELD: &str =
        r#"<w:p><w:fldSimple w:instr=" MERGEFIELD AmountDue "><w:r><w:t>«AmountDue»</w:t></w:r></w:fldSimple></w:p>"#;

    #[test]
    fn test_merge_field_name_parsing() {
        assert_eq!(
            merge_field_name(" MERGEFIELD ClientName \\* MERGEFORMAT "),
            Some("ClientName".to_string())
        );
        assert_eq!(
            merge_field_name("MERGEFIELD \"AmountDue\""),
            Some("AmountDue".to_string())
        );
        assert_eq!(merge_field_name(" PAGE \\* MERGEFORMAT "), None);
        assert_eq!(merge_field_name(""), None);
    }

    #[test]
    fn test_complex_field_replaced() {
        let merged = execute(COMPLEX_FIELD, &[("ClientName", "Acme Corp")]).unwrap();
        assert!(merged.contains("<w:t xml:space=\"preserve\">Acme Corp</w:t>"));
        assert!(!merged.contains("instrText"));
        assert!(!merged.contains("fldChar"));
    }

    #[test]
    fn test_simple_field_replaced() {
        let merged = execute(SIMPLE_FIELD, &[("AmountDue", "1,250.00")]).unwrap();
        assert!(merged.contains(">1,250.00</w:t>"));
        assert!(!merged.contains("fldSimple"));
    }

    #[test]
    fn test_unknown_field_left_untouched() {
        let merged = execute(COMPLEX_FIELD, &[("InvoiceDate", "2026-08-29")]).unwrap();
        assert!(merged.contains("fldChar"));
        assert!(merged.contains("MERGEFIELD ClientName"));
    }

    #[test]
    fn test_non_merge_field_left_untouched() {
        let xml = r#"<w:p><w:r><w:fldChar w:fldCharType="begin"/></w:r><w:r><w:instrText> PAGE </w:instrText></w:r><w:r><w:fldChar w:fldCharType="end"/></w:r></w:p>"#;
        let merged = execute(xml, &[("ClientName", "Acme")]).unwrap();
        assert!(merged.contains("PAGE"));
        assert!(merged.contains("fldChar"));
    }

    #[test]
    fn test_value_is_escaped() {
        let merged = execute(SIMPLE_FIELD, &[("AmountDue", "<5 & >3")]).unwrap();
        assert!(merged.contains("&lt;5 &amp; &gt;3"));
    }

    #[test]
    fn test_empty_value_inserts_empty_run() {
        let merged = execute(COMPLEX_FIELD, &[("ClientName", "")]).unwrap();
        assert!(merged.contains("<w:t xml:space=\"preserve\"></w:t>"));
    }

    #[test]
    fn test_surrounding_content_preserved() {
        let xml = format!("<w:body><w:p><w:r><w:t>Dear </w:t></w:r></w:p>{COMPLEX_FIELD}</w:body>");
        let merged = execute(&xml, &[("ClientName", "Acme")]).unwrap();
        assert!(merged.contains("<w:t>Dear </w:t>"));
        assert!(merged.starts_with("<w:body>"));
        assert!(merged.ends_with("</w:body>"));
    }

    #[test]
    fn test_field_names_lists_both_encodings() {
        let xml = format!("<w:body>{COMPLEX_FIELD}{SIMPLE_FIELD}</w:body>");
        let names = field_names(&xml).unwrap();
        assert_eq!(names, vec!["ClientName", "AmountDue"]);
    }
}
