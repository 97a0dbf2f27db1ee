//! Document renderer: story + page layout → PDF bytes.
//!
//! `generate_pdf_bytes` is the one-call entry point used by the HTTP layer. It is
//! synchronous and CPU-bound; call it from `tokio::task::spawn_blocking`.

pub mod pdf;

use thiserror::Error;
use tracing::debug;

use crate::layout::flow::paginate;
use crate::layout::fonts::FONTS;
use crate::layout::{LayoutBlock, Margins, PageLayout, PageSize, RenderError};
use crate::models::profile::ProfileDocument;
use crate::templates::{TemplateNotFound, TEMPLATES};

pub use pdf::DocumentInfo;

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error(transparent)]
    TemplateNotFound(#[from] TemplateNotFound),

    #[error(transparent)]
    Render(#[from] RenderError),
}

/// Lays out `story` on `layout` and serializes the result. Nothing partial is returned.
pub fn render(
    story: &[LayoutBlock],
    layout: PageLayout,
    page_size: PageSize,
    margins: Margins,
    info: &DocumentInfo,
) -> Result<Vec<u8>, RenderError> {
    let geometries = layout.resolve(page_size, margins)?;
    let pages = paginate(story, &geometries, &FONTS)?;
    debug!(pages = pages.len(), blocks = story.len(), "story paginated");
    pdf::write_pdf(&pages, page_size, info)
}

/// Renders a profile with the named template.
pub fn generate_pdf_bytes(
    profile: &ProfileDocument,
    template_key: &str,
    page_size: PageSize,
    margins: Margins,
) -> Result<Vec<u8>, GenerateError> {
    let template = TEMPLATES.resolve(template_key)?;
    let story = template.build_story(profile);
    let info = DocumentInfo {
        title: if profile.fullname.trim().is_empty() {
            "Resume".to_string()
        } else {
            profile.fullname.clone()
        },
        author: Some(profile.fullname.clone()).filter(|name| !name.trim().is_empty()),
    };
    let bytes = render(&story, template.page_layout(page_size), page_size, margins, &info)?;
    debug!(template = template.key(), bytes = bytes.len(), "resume rendered");
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use lopdf::content::Content;
    use lopdf::{Document, Object};

    use crate::models::profile::Experience;

    fn jane() -> ProfileDocument {
        ProfileDocument {
            fullname: "Jane Doe".into(),
            location: "Berlin".into(),
            phone: "+49 30 1234567".into(),
            experiences: vec![Experience {
                job_title: "Engineer".into(),
                company: "Acme".into(),
                location: None,
                start_date: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
                end_date: None,
                description: "Built things.".into(),
                challenge: None,
            }],
            ..ProfileDocument::default()
        }
    }

    /// Raw operands of every `Tj`, across all pages.
    fn drawn_strings(bytes: &[u8]) -> Vec<Vec<u8>> {
        let doc = Document::load_mem(bytes).unwrap();
        let mut out = Vec::new();
        for page_id in doc.get_pages().values() {
            let raw = doc.get_page_content(*page_id).unwrap();
            let content = Content::decode(&raw).unwrap();
            for op in content.operations {
                if op.operator == "Tj" {
                    if let Some(Object::String(bytes, _)) = op.operands.first() {
                        out.push(bytes.clone());
                    }
                }
            }
        }
        out
    }

    fn drawn_text(bytes: &[u8]) -> String {
        drawn_strings(bytes)
            .iter()
            .map(|s| String::from_utf8_lossy(s).into_owned() + "\n")
            .collect()
    }

    #[test]
    fn test_simple_end_to_end_contains_experience_only() {
        let bytes =
            generate_pdf_bytes(&jane(), "simple", PageSize::A4, Margins::default()).unwrap();
        assert!(!bytes.is_empty());

        let text = drawn_text(&bytes);
        assert!(text.contains("Jane Doe"));
        assert!(text.contains("Acme"));
        assert!(text.contains("PRESENT"));
        let upper = text.to_uppercase();
        for absent in ["SKILLS", "EDUCATION", "PROJECTS"] {
            assert!(!upper.contains(absent), "unexpected {absent} heading");
        }
    }

    #[test]
    fn test_every_template_renders() {
        for key in TEMPLATES.keys() {
            let bytes =
                generate_pdf_bytes(&jane(), key, PageSize::LETTER, Margins::default()).unwrap();
            assert!(Document::load_mem(&bytes).is_ok(), "{key} produced an unreadable PDF");
        }
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let a = generate_pdf_bytes(&jane(), "elegant", PageSize::A4, Margins::default()).unwrap();
        let b = generate_pdf_bytes(&jane(), "elegant", PageSize::A4, Margins::default()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_unknown_template_is_rejected() {
        let err = generate_pdf_bytes(&jane(), "no-such-style", PageSize::A4, Margins::default())
            .unwrap_err();
        match err {
            GenerateError::TemplateNotFound(e) => {
                assert_eq!(e.key, "no-such-style");
                assert_eq!(e.available, vec!["simple", "vibrant", "elegant"]);
            }
            other => panic!("expected TemplateNotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_latin1_names_are_drawn_with_their_own_glyphs() {
        let mut profile = jane();
        profile.fullname = "Jürgen Müller".into();
        profile.location = "Kraków".into();
        for key in TEMPLATES.keys() {
            let bytes = generate_pdf_bytes(&profile, key, PageSize::A4, Margins::default()).unwrap();
            let drawn = drawn_strings(&bytes);
            assert!(drawn.iter().any(|s| s == b"J\xFCrgen M\xFCller"), "{key}: name");
            assert!(
                drawn.iter().any(|s| s.windows(6).any(|w| w == b"Krak\xF3w")),
                "{key}: location"
            );
            assert!(!drawn.iter().any(|s| s.contains(&b'?')), "{key}: substituted glyph");
        }
    }

    #[test]
    fn test_names_outside_the_font_encoding_fail_the_render() {
        let mut profile = jane();
        profile.fullname = "Łukasz Żółć".into();
        profile.location = "Kraków".into();
        for key in TEMPLATES.keys() {
            let err = generate_pdf_bytes(&profile, key, PageSize::A4, Margins::default())
                .unwrap_err();
            assert!(
                matches!(
                    err,
                    GenerateError::Render(RenderError::UnsupportedCharacter { ch: 'Ł', .. })
                ),
                "{key}: {err:?}"
            );
        }
    }

    #[test]
    fn test_overwide_word_fails_whole_render() {
        let mut profile = jane();
        profile.summary = Some("x".repeat(400));
        let err = generate_pdf_bytes(&profile, "simple", PageSize::A4, Margins::default())
            .unwrap_err();
        assert!(matches!(
            err,
            GenerateError::Render(RenderError::BlockTooWide { .. })
        ));
    }
}
