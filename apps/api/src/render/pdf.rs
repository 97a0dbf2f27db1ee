//! Serializes placed pages into PDF bytes with `lopdf`.
//!
//! Output is deterministic: no timestamps, no random file IDs, fonts and objects are
//! emitted in a fixed order.

use std::collections::BTreeMap;
use std::io::Write;

use flate2::write::ZlibEncoder;
use flate2::Compression;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream};

use crate::layout::flow::{DrawOp, PlacedPage};
use crate::layout::font_metrics::win_ansi_byte;
use crate::layout::{Color, PageSize, RenderError};

const PRODUCER: &str = concat!("vitae ", env!("CARGO_PKG_VERSION"));

/// Document-level metadata written to the Info dictionary.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DocumentInfo {
    pub title: String,
    pub author: Option<String>,
}

pub fn write_pdf(
    pages: &[PlacedPage],
    page_size: PageSize,
    info: &DocumentInfo,
) -> Result<Vec<u8>, RenderError> {
    let mut doc = Document::with_version("1.7");
    let pages_id = doc.new_object_id();

    // Every base font any page uses, keyed by resource name.
    let mut fonts: BTreeMap<&'static str, &'static str> = BTreeMap::new();
    for op in pages.iter().flat_map(|p| &p.ops) {
        if let DrawOp::Text { font, .. } = op {
            fonts.insert(font.resource, font.base_font);
        }
    }
    let mut font_dict = Dictionary::new();
    for (resource, base_font) in &fonts {
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => *base_font,
            "Encoding" => "WinAnsiEncoding",
        });
        font_dict.set(*resource, font_id);
    }
    let resources_id = doc.add_object(dictionary! { "Font" => font_dict });

    let mut page_ids: Vec<ObjectId> = Vec::with_capacity(pages.len());
    for page in pages {
        let content = page_content(page)?;
        let encoded = content.encode().map_err(pdf_error)?;
        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(&encoded).map_err(pdf_error)?;
        let compressed = encoder.finish().map_err(pdf_error)?;
        let content_id = doc.add_object(Stream::new(
            dictionary! { "Filter" => "FlateDecode" },
            compressed,
        ));

        let mut page_dict = dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), page_size.width.into(), page_size.height.into()],
            "Contents" => content_id,
            "Resources" => resources_id,
        };
        let annots = link_annotations(&mut doc, page);
        if !annots.is_empty() {
            page_dict.set("Annots", annots);
        }
        page_ids.push(doc.add_object(page_dict));
    }

    let kids: Vec<Object> = page_ids.iter().map(|id| Object::from(*id)).collect();
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_ids.len() as i64,
        }),
    );

    let catalog_id = doc.add_object(dictionary! { "Type" => "Catalog", "Pages" => pages_id });
    doc.trailer.set("Root", catalog_id);

    let mut info_dict = dictionary! {
        "Title" => text_string(&info.title),
        "Producer" => Object::string_literal(PRODUCER),
    };
    if let Some(author) = &info.author {
        info_dict.set("Author", text_string(author));
    }
    let info_id = doc.add_object(info_dict);
    doc.trailer.set("Info", info_id);

    let mut buf = Vec::new();
    doc.save_to(&mut buf).map_err(pdf_error)?;
    Ok(buf)
}

fn pdf_error(e: impl std::fmt::Display) -> RenderError {
    RenderError::Pdf(e.to_string())
}

fn rgb(color: Color) -> Vec<Object> {
    color.components().into_iter().map(Object::from).collect()
}

fn page_content(page: &PlacedPage) -> Result<Content, RenderError> {
    let mut operations = Vec::new();
    for op in &page.ops {
        match op {
            DrawOp::Text {
                x,
                baseline,
                font,
                size,
                color,
                text,
            } => {
                operations.push(Operation::new("BT", vec![]));
                operations.push(Operation::new("Tf", vec![font.resource.into(), (*size).into()]));
                operations.push(Operation::new("rg", rgb(*color)));
                operations.push(Operation::new("Td", vec![(*x).into(), (*baseline).into()]));
                operations.push(Operation::new(
                    "Tj",
                    vec![Object::string_literal(encode_win_ansi(text)?)],
                ));
                operations.push(Operation::new("ET", vec![]));
            }
            DrawOp::FillRect {
                x,
                y,
                width,
                height,
                color,
            } => {
                operations.push(Operation::new("rg", rgb(*color)));
                operations.push(Operation::new(
                    "re",
                    vec![(*x).into(), (*y).into(), (*width).into(), (*height).into()],
                ));
                operations.push(Operation::new("f", vec![]));
            }
            DrawOp::Line {
                x1,
                y1,
                x2,
                y2,
                width,
                color,
            } => {
                operations.push(Operation::new("w", vec![(*width).into()]));
                operations.push(Operation::new("RG", rgb(*color)));
                operations.push(Operation::new("m", vec![(*x1).into(), (*y1).into()]));
                operations.push(Operation::new("l", vec![(*x2).into(), (*y2).into()]));
                operations.push(Operation::new("S", vec![]));
            }
            DrawOp::Link { .. } => {}
        }
    }
    Ok(Content { operations })
}

fn link_annotations(doc: &mut Document, page: &PlacedPage) -> Vec<Object> {
    let mut annots = Vec::new();
    for op in &page.ops {
        if let DrawOp::Link {
            x,
            y,
            width,
            height,
            uri,
        } = op
        {
            let rect: Vec<Object> = vec![
                (*x).into(),
                (*y).into(),
                (x + width).into(),
                (y + height).into(),
            ];
            let annot = dictionary! {
                "Type" => "Annot",
                "Subtype" => "Link",
                "Rect" => rect,
                "Border" => vec![0.into(), 0.into(), 0.into()],
                "A" => dictionary! {
                    "S" => "URI",
                    "URI" => Object::string_literal(uri.as_bytes().to_vec()),
                },
            };
            annots.push(Object::from(doc.add_object(annot)));
        }
    }
    annots
}

/// Encodes drawn text for the WinAnsi base fonts.
pub fn encode_win_ansi(text: &str) -> Result<Vec<u8>, RenderError> {
    text.chars()
        .map(|c| win_ansi_byte(c).ok_or_else(|| RenderError::unsupported(c)))
        .collect()
}

/// Info dictionary string: ASCII as is, anything else as UTF-16BE with a byte order mark.
fn text_string(text: &str) -> Object {
    if text.is_ascii() {
        return Object::string_literal(text);
    }
    let mut bytes = vec![0xFE, 0xFF];
    bytes.extend(text.encode_utf16().flat_map(u16::to_be_bytes));
    Object::string_literal(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::font_metrics::{FontFamily, FontStyle};
    use crate::layout::fonts::FONTS;

    fn text_op(text: &str) -> DrawOp {
        DrawOp::Text {
            x: 50.0,
            baseline: 700.0,
            font: FONTS.resolve(FontFamily::Roboto, FontStyle::Regular).unwrap(),
            size: 10.0,
            color: Color::BLACK,
            text: text.to_string(),
        }
    }

    fn page(ops: Vec<DrawOp>) -> PlacedPage {
        PlacedPage {
            geometry: "default".into(),
            ops,
        }
    }

    #[test]
    fn test_win_ansi_maps_dashes_and_latin1() {
        assert_eq!(
            encode_win_ansi("a–b—c·é").unwrap(),
            vec![b'a', 0x96, b'b', 0x97, b'c', 0xB7, 0xE9]
        );
    }

    #[test]
    fn test_win_ansi_refuses_to_substitute() {
        let err = encode_win_ansi("Dvořák").unwrap_err();
        assert!(matches!(err, RenderError::UnsupportedCharacter { ch: 'ř', .. }));
        let pages = vec![page(vec![text_op("日本")])];
        assert!(matches!(
            write_pdf(&pages, PageSize::A4, &DocumentInfo::default()),
            Err(RenderError::UnsupportedCharacter { ch: '日', .. })
        ));
    }

    #[test]
    fn test_pdf_has_one_page_per_placed_page() {
        let pages = vec![page(vec![text_op("one")]), page(vec![text_op("two")])];
        let bytes = write_pdf(&pages, PageSize::A4, &DocumentInfo::default()).unwrap();
        assert!(bytes.starts_with(b"%PDF-1.7"));
        let doc = Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 2);
    }

    #[test]
    fn test_links_become_uri_annotations() {
        let pages = vec![page(vec![
            DrawOp::Link {
                x: 10.0,
                y: 10.0,
                width: 30.0,
                height: 10.0,
                uri: "https://example.com".into(),
            },
            text_op("site"),
        ])];
        let bytes = write_pdf(&pages, PageSize::LETTER, &DocumentInfo::default()).unwrap();
        let doc = Document::load_mem(&bytes).unwrap();
        let page_id = *doc.get_pages().values().next().unwrap();
        let page_dict = doc.get_dictionary(page_id).unwrap();
        let annots = page_dict.get(b"Annots").unwrap().as_array().unwrap();
        assert_eq!(annots.len(), 1);
    }

    #[test]
    fn test_info_dictionary_carries_title_and_author() {
        let info = DocumentInfo {
            title: "Jane Doe".into(),
            author: Some("Jane Doe".into()),
        };
        let bytes = write_pdf(&[page(vec![])], PageSize::A4, &info).unwrap();
        let doc = Document::load_mem(&bytes).unwrap();
        let info_id = doc.trailer.get(b"Info").unwrap().as_reference().unwrap();
        let info_dict = doc.get_dictionary(info_id).unwrap();
        assert_eq!(info_dict.get(b"Title").unwrap().as_str().unwrap(), b"Jane Doe");
        assert_eq!(info_dict.get(b"Author").unwrap().as_str().unwrap(), b"Jane Doe");
    }

    #[test]
    fn test_non_ascii_info_strings_are_utf16() {
        let info = DocumentInfo {
            title: "Jürgen".into(),
            author: None,
        };
        let bytes = write_pdf(&[page(vec![])], PageSize::A4, &info).unwrap();
        let doc = Document::load_mem(&bytes).unwrap();
        let info_id = doc.trailer.get(b"Info").unwrap().as_reference().unwrap();
        let title = doc.get_dictionary(info_id).unwrap().get(b"Title").unwrap().as_str().unwrap();
        assert_eq!(&title[..4], &[0xFE, 0xFF, 0x00, b'J']);
        assert_eq!(&title[4..6], &[0x00, 0xFC]);
    }

    #[test]
    fn test_output_is_deterministic() {
        let pages = vec![page(vec![text_op("same")])];
        let a = write_pdf(&pages, PageSize::A4, &DocumentInfo::default()).unwrap();
        let b = write_pdf(&pages, PageSize::A4, &DocumentInfo::default()).unwrap();
        assert_eq!(a, b);
    }
}
