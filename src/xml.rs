use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::error::QuizError;

/// Thin event writer shared by the MusicXML and SVG outputs.
pub struct XmlOut {
    writer: Writer<Vec<u8>>,
}

fn xml_err(e: quick_xml::Error) -> QuizError {
    QuizError::Xml(e.to_string())
}

impl XmlOut {
    pub fn new() -> Self {
        XmlOut {
            writer: Writer::new_with_indent(Vec::new(), b' ', 2),
        }
    }

    pub fn declaration(&mut self) -> Result<(), QuizError> {
        self.writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
            .map_err(xml_err)
    }

    pub fn start(&mut self, name: &str, attrs: &[(&str, &str)]) -> Result<(), QuizError> {
        let elem = BytesStart::new(name).with_attributes(attrs.iter().copied());
        self.writer.write_event(Event::Start(elem)).map_err(xml_err)
    }

    pub fn end(&mut self, name: &str) -> Result<(), QuizError> {
        self.writer
            .write_event(Event::End(BytesEnd::new(name)))
            .map_err(xml_err)
    }

    pub fn empty(&mut self, name: &str, attrs: &[(&str, &str)]) -> Result<(), QuizError> {
        let elem = BytesStart::new(name).with_attributes(attrs.iter().copied());
        self.writer.write_event(Event::Empty(elem)).map_err(xml_err)
    }

    /// `<name>text</name>`
    pub fn text(&mut self, name: &str, text: &str) -> Result<(), QuizError> {
        self.start(name, &[])?;
        self.writer
            .write_event(Event::Text(BytesText::new(text)))
            .map_err(xml_err)?;
        self.end(name)
    }

    pub fn finish(self) -> Result<String, QuizError> {
        String::from_utf8(self.writer.into_inner()).map_err(|e| QuizError::Xml(e.to_string()))
    }
}

impl Default for XmlOut {
    fn default() -> Self {
        XmlOut::new()
    }
}
