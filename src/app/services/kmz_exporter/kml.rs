//! KML serialization
//!
//! Elements are written in a fixed order with two-space indentation, so the
//! same document always serializes to the same bytes.

use super::document::{Folder, GeoDocument, MarkerStyle, Placemark};
use crate::constants::KML_NAMESPACE;
use quick_xml::Writer;
use quick_xml::escape::partial_escape;
use quick_xml::events::{BytesCData, BytesDecl, BytesEnd, BytesStart, BytesText, Event};

/// Serialize a document to UTF-8 KML
pub fn to_kml(document: &GeoDocument) -> anyhow::Result<Vec<u8>> {
    let mut kml = KmlWriter::new();

    kml.writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    kml.writer.write_event(Event::Start(
        BytesStart::new("kml").with_attributes([("xmlns", KML_NAMESPACE)]),
    ))?;
    kml.start("Document")?;
    kml.text_element("name", &document.name)?;
    kml.text_element("description", &document.description)?;

    for style in &document.styles {
        kml.style(style)?;
    }
    kml.folder(&document.root)?;

    kml.end("Document")?;
    kml.end("kml")?;

    let mut bytes = kml.writer.into_inner();
    bytes.push(b'\n');
    Ok(bytes)
}

struct KmlWriter {
    writer: Writer<Vec<u8>>,
}

impl KmlWriter {
    fn new() -> Self {
        Self {
            writer: Writer::new_with_indent(Vec::new(), b' ', 2),
        }
    }

    fn start(&mut self, tag: &str) -> anyhow::Result<()> {
        self.writer.write_event(Event::Start(BytesStart::new(tag)))?;
        Ok(())
    }

    fn end(&mut self, tag: &str) -> anyhow::Result<()> {
        self.writer.write_event(Event::End(BytesEnd::new(tag)))?;
        Ok(())
    }

    fn text_element(&mut self, tag: &str, text: &str) -> anyhow::Result<()> {
        self.start(tag)?;
        self.writer
            .write_event(Event::Text(BytesText::from_escaped(partial_escape(text))))?;
        self.end(tag)
    }

    fn cdata_element(&mut self, tag: &str, content: &str) -> anyhow::Result<()> {
        // A literal "]]>" closes the section; split it across two sections
        let content = content.replace("]]>", "]]]]><![CDATA[>");
        self.start(tag)?;
        self.writer
            .write_event(Event::CData(BytesCData::new(content.as_str())))?;
        self.end(tag)
    }

    fn style(&mut self, style: &MarkerStyle) -> anyhow::Result<()> {
        self.writer.write_event(Event::Start(
            BytesStart::new("Style").with_attributes([("id", style.id.as_str())]),
        ))?;

        self.start("IconStyle")?;
        self.text_element("color", &style.color)?;
        self.text_element("scale", style.icon_scale)?;
        self.start("Icon")?;
        self.text_element("href", style.icon_href)?;
        self.end("Icon")?;
        self.end("IconStyle")?;

        self.start("LabelStyle")?;
        self.text_element("color", &style.color)?;
        self.text_element("scale", style.label_scale)?;
        self.end("LabelStyle")?;

        self.end("Style")
    }

    fn folder(&mut self, folder: &Folder) -> anyhow::Result<()> {
        self.start("Folder")?;
        self.text_element("name", &folder.name)?;
        self.text_element("open", if folder.open { "1" } else { "0" })?;

        for placemark in &folder.placemarks {
            self.placemark(placemark)?;
        }
        for child in &folder.folders {
            self.folder(child)?;
        }

        self.end("Folder")
    }

    fn placemark(&mut self, placemark: &Placemark) -> anyhow::Result<()> {
        self.start("Placemark")?;
        self.text_element("name", &placemark.name)?;
        self.cdata_element("description", &placemark.description)?;
        self.text_element("styleUrl", &format!("#{}", placemark.style_id))?;
        self.start("Point")?;
        self.text_element("coordinates", &placemark.point.to_kml())?;
        self.end("Point")?;
        self.end("Placemark")
    }
}
