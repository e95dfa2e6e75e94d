//! XML writer for export documents.

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use crate::error::BoardError;
use crate::export::document::{ExportDocument, TagSection};

type XmlWriter = Writer<Vec<u8>>;

/// Serialize a document as indented XML.
pub fn write_document(doc: &ExportDocument) -> Result<String, BoardError> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    start(&mut writer, BytesStart::new("imageData"))?;

    let image_id = doc.image.id.to_string();
    start(
        &mut writer,
        BytesStart::new("image").with_attributes([
            ("id", image_id.as_str()),
            ("url", doc.image.url.as_str()),
            ("file", doc.image.file.as_str()),
        ]),
    )?;
    if let Some(organisms) = &doc.image.organisms {
        start(&mut writer, BytesStart::new("organisms"))?;
        for organism in organisms {
            text_element(&mut writer, "organism", organism)?;
        }
        end(&mut writer, "organisms")?;
    }
    if let Some(uploaded_by) = &doc.image.uploaded_by {
        text_element(&mut writer, "uploadedBy", uploaded_by)?;
    }
    if let Some(upload_date) = &doc.image.upload_date {
        text_element(&mut writer, "uploadDate", upload_date)?;
    }
    end(&mut writer, "image")?;

    if !doc.tag_groups.is_empty() {
        start(&mut writer, BytesStart::new("tagGroups"))?;
        for group in &doc.tag_groups {
            let id = group.id.to_string();
            start(
                &mut writer,
                BytesStart::new("tagGroup")
                    .with_attributes([("id", id.as_str()), ("name", group.name.as_str())]),
            )?;
            for tag in &group.tags {
                write_tag(&mut writer, tag)?;
            }
            end(&mut writer, "tagGroup")?;
        }
        end(&mut writer, "tagGroups")?;
    }

    end(&mut writer, "imageData")?;

    String::from_utf8(writer.into_inner())
        .map_err(|e| BoardError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
}

fn write_tag(writer: &mut XmlWriter, tag: &TagSection) -> Result<(), BoardError> {
    let id = tag.id.map(|id| id.to_string()).unwrap_or_default();
    let [r, g, b] = tag.color.0;
    let color = format!("{},{},{}", r, g, b);
    start(
        writer,
        BytesStart::new("tag").with_attributes([
            ("id", id.as_str()),
            ("color", color.as_str()),
            ("author", tag.author.as_str()),
        ]),
    )?;
    text_element(writer, "description", &tag.description)?;

    start(writer, BytesStart::new("points"))?;
    for point in &tag.points {
        let x = point.x.to_string();
        let y = point.y.to_string();
        empty(
            writer,
            BytesStart::new("point").with_attributes([("x", x.as_str()), ("y", y.as_str())]),
        )?;
    }
    end(writer, "points")?;

    if !tag.gene_links.is_empty() {
        start(writer, BytesStart::new("geneLinks"))?;
        for link in &tag.gene_links {
            let mut element = BytesStart::new("geneLink");
            element.push_attribute(("name", link.name.as_str()));
            if let Some(allele) = &link.allele {
                element.push_attribute(("allele", allele.as_str()));
            }
            empty(writer, element)?;
        }
        end(writer, "geneLinks")?;
    }

    end(writer, "tag")
}

fn start(writer: &mut XmlWriter, element: BytesStart<'_>) -> Result<(), BoardError> {
    writer.write_event(Event::Start(element))?;
    Ok(())
}

fn end(writer: &mut XmlWriter, name: &str) -> Result<(), BoardError> {
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

fn empty(writer: &mut XmlWriter, element: BytesStart<'_>) -> Result<(), BoardError> {
    writer.write_event(Event::Empty(element))?;
    Ok(())
}

fn text_element(writer: &mut XmlWriter, name: &str, text: &str) -> Result<(), BoardError> {
    start(writer, BytesStart::new(name))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    end(writer, name)
}
