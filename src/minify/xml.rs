//! XML minification: one pass over quick-xml events.
//!
//! Comments are dropped. Whitespace-only text is dropped when it sits between
//! two pieces of markup and kept when it touches character data or an entity
//! reference. Everything else is written back unchanged.

use quick_xml::events::Event;
use quick_xml::{Reader, Writer};

use crate::error::TransformError;

/// Minify XML source code.
pub fn minify(source: &str) -> Result<String, TransformError> {
    let mut reader = Reader::from_str(source);
    let mut writer = Writer::new(Vec::with_capacity(source.len()));
    let mut pending_space: Option<Event> = None;
    let mut after_text = false;

    loop {
        let event = reader.read_event().map_err(|e| {
            TransformError::Syntax(format!("{} at byte {}", e, reader.error_position()))
        })?;

        if is_blank(&event) {
            pending_space = Some(event);
            continue;
        }

        match event {
            Event::Eof => break,
            Event::Comment(_) => continue,
            event => {
                let is_text = matches!(event, Event::Text(_) | Event::GeneralRef(_));
                if let Some(space) = pending_space.take() {
                    if is_text || after_text {
                        write(&mut writer, space)?;
                    }
                }
                after_text = is_text;
                write(&mut writer, event)?;
            }
        }
    }

    String::from_utf8(writer.into_inner()).map_err(|_| TransformError::InvalidOutput)
}

fn is_blank(event: &Event) -> bool {
    matches!(event, Event::Text(text) if text.iter().all(u8::is_ascii_whitespace))
}

fn write(writer: &mut Writer<Vec<u8>>, event: Event) -> Result<(), TransformError> {
    writer
        .write_event(event)
        .map_err(|e| TransformError::Syntax(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minify_xml() {
        let source = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<!-- feed -->\n<feed>\n  <entry id=\"1\">\n    <title>First post</title>\n  </entry>\n  <entry id=\"2\"/>\n</feed>\n";
        let out = minify(source).unwrap();
        assert_eq!(
            out,
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?><feed><entry id=\"1\"><title>First post</title></entry><entry id=\"2\"/></feed>"
        );
    }

    #[test]
    fn test_space_between_entities_is_kept() {
        let source = "<a>&lt; &gt;</a>";
        assert_eq!(minify(source).unwrap(), source);
    }

    #[test]
    fn test_cdata_is_untouched() {
        let source = "<script><![CDATA[ if (a < b) {  } ]]></script>";
        assert_eq!(minify(source).unwrap(), source);
    }

    #[test]
    fn test_mismatched_tags_fail() {
        assert!(matches!(minify("<a><b></a>"), Err(TransformError::Syntax(_))));
    }
}
