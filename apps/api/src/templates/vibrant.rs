//! Vibrant: orange accents, a label column beside the content in one grid that splits by row.

use crate::layout::blocks::{strip_spacing, CellPadding, ColumnWidth, Grid, GridRow};
use crate::layout::geometry::MM;
use crate::layout::markup::escape;
use crate::layout::{
    Color, FontFamily, Frame, LayoutBlock, PageGeometry, PageLayout, PageSize, ParagraphStyle,
    Rule, TextRole,
};
use crate::models::profile::ProfileDocument;

use super::common::{self, HeaderStyles, LinkStyle};
use super::ResumeTemplate;

const INK: Color = Color::hex(0x111827);
const MUTED: Color = Color::hex(0x6B7280);
const ACCENT: Color = Color::hex(0xCC5500);
const RULE_STRONG: Color = Color::hex(0xCC5500);
const RULE_SOFT: Color = Color::hex(0xC98453);

#[rustfmt::skip]
mod frame {
    use super::MM;
    pub const ML: f32       = 16.0 * MM;
    pub const MR: f32       = 16.0 * MM;
    pub const MT: f32       = 20.0 * MM;
    pub const MB: f32       = 16.0 * MM;
    pub const HEADER_H: f32 = 28.0 * MM;
    pub const LEFT_W: f32   = 58.0 * MM;
}

pub const FIRST_GEOMETRY: &str = "first";
pub const NEXT_GEOMETRY: &str = "next";

const ENTRY_GAP: f32 = 4.0;

type SectionBuilder = fn(&VibrantTemplate, &ProfileDocument) -> Vec<LayoutBlock>;

/// (label, builder, whether the profile has the section), in display order.
#[rustfmt::skip]
const SECTION_ORDER: [(&str, SectionBuilder, fn(&ProfileDocument) -> bool); 8] = [
    ("Profile",      VibrantTemplate::profile,      |p| p.summary_text().is_some()),
    ("Experience",   VibrantTemplate::experience,   |p| !p.experiences.is_empty()),
    ("Education",    VibrantTemplate::education,    |p| !p.education.is_empty()),
    ("Projects",     VibrantTemplate::projects,     |p| !p.projects.is_empty()),
    ("Skills",       VibrantTemplate::skills,       |p| !p.skills.is_empty()),
    ("Certificates", VibrantTemplate::certificates, |p| !p.certificates.is_empty()),
    ("Languages",    VibrantTemplate::languages,    |p| !p.languages.is_empty()),
    ("Social",       VibrantTemplate::social,       |p| !p.social_links.is_empty()),
];

pub struct VibrantTemplate {
    name: ParagraphStyle,
    title: ParagraphStyle,
    meta: ParagraphStyle,
    body: ParagraphStyle,
    label: ParagraphStyle,
}

impl Default for VibrantTemplate {
    fn default() -> Self {
        Self::new()
    }
}

impl VibrantTemplate {
    pub fn new() -> Self {
        Self {
            name: ParagraphStyle::new(TextRole::Name, FontFamily::SourceSans, 22.0, 24.0, INK)
                .bold()
                .spacing(0.0, 2.0),
            title: ParagraphStyle::new(TextRole::Title, FontFamily::SourceSans, 10.5, 14.0, MUTED)
                .spacing(0.0, 6.0),
            meta: ParagraphStyle::new(TextRole::Meta, FontFamily::SourceSans, 9.0, 12.0, MUTED),
            body: ParagraphStyle::new(TextRole::Body, FontFamily::SourceSans, 9.8, 13.2, INK),
            label: ParagraphStyle::new(
                TextRole::SectionHeading,
                FontFamily::SourceSans,
                10.5,
                14.0,
                ACCENT,
            )
            .bold(),
        }
    }

    fn header(&self, profile: &ProfileDocument) -> Vec<LayoutBlock> {
        common::header_blocks(
            profile,
            HeaderStyles {
                name: &self.name,
                title: &self.title,
                meta: &self.meta,
                rule: Rule {
                    thickness: 0.8,
                    color: RULE_STRONG,
                    space_before: 4.0,
                    space_after: 8.0,
                },
            },
        )
    }

    fn separator() -> LayoutBlock {
        LayoutBlock::Rule(Rule {
            thickness: 0.5,
            color: RULE_SOFT,
            space_before: 0.0,
            space_after: 6.0,
        })
    }

    fn profile(&self, profile: &ProfileDocument) -> Vec<LayoutBlock> {
        profile
            .summary_text()
            .map(|summary| vec![LayoutBlock::paragraph(escape(summary), &self.body)])
            .unwrap_or_default()
    }

    fn experience(&self, profile: &ProfileDocument) -> Vec<LayoutBlock> {
        let mut items = Vec::new();
        for exp in &profile.experiences {
            items.push(LayoutBlock::paragraph(common::experience_heading(exp), &self.body));
            if let Some(range) = common::date_line(exp.start_date, exp.end_date) {
                items.push(LayoutBlock::paragraph(range, &self.meta));
            }
            if !exp.description.is_empty() {
                items.push(LayoutBlock::paragraph(escape(&exp.description), &self.body));
            }
            if let Some(challenge) = exp.challenge.as_deref().filter(|c| !c.is_empty()) {
                items.push(LayoutBlock::paragraph(common::challenge_line(challenge), &self.meta));
            }
            items.push(LayoutBlock::Spacer(ENTRY_GAP));
        }
        strip_spacing(items)
    }

    fn education(&self, profile: &ProfileDocument) -> Vec<LayoutBlock> {
        let mut items = Vec::new();
        for ed in &profile.education {
            items.push(LayoutBlock::paragraph(common::education_heading(ed), &self.body));
            if let Some(range) = common::date_line(ed.start_date, ed.end_date) {
                items.push(LayoutBlock::paragraph(range, &self.meta));
            }
            if let Some(field) = ed.field_of_study.as_deref().filter(|f| !f.is_empty()) {
                items.push(LayoutBlock::paragraph(escape(field), &self.meta));
            }
            if let Some(description) = ed.description.as_deref().filter(|d| !d.is_empty()) {
                items.push(LayoutBlock::paragraph(escape(description), &self.body));
            }
            items.push(LayoutBlock::Spacer(ENTRY_GAP));
        }
        strip_spacing(items)
    }

    fn projects(&self, profile: &ProfileDocument) -> Vec<LayoutBlock> {
        let mut items = Vec::new();
        for project in &profile.projects {
            items.push(LayoutBlock::paragraph(
                common::project_title(project, LinkStyle::Muted),
                &self.body,
            ));
            if let Some(stack) = common::tech_stack_line(project) {
                items.push(LayoutBlock::paragraph(stack, &self.meta));
            }
            if let Some(description) = project.description.as_deref().filter(|d| !d.is_empty()) {
                items.push(LayoutBlock::paragraph(escape(description), &self.body));
            }
            items.push(LayoutBlock::Spacer(ENTRY_GAP));
        }
        strip_spacing(items)
    }

    fn skills(&self, profile: &ProfileDocument) -> Vec<LayoutBlock> {
        vec![LayoutBlock::paragraph(
            common::skills_line(&profile.skills),
            &self.body,
        )]
    }

    fn certificates(&self, profile: &ProfileDocument) -> Vec<LayoutBlock> {
        let items = profile
            .certificates
            .iter()
            .flat_map(|cert| {
                [
                    LayoutBlock::paragraph(common::certificate_line(cert, LinkStyle::Muted), &self.body),
                    LayoutBlock::Spacer(ENTRY_GAP),
                ]
            })
            .collect();
        strip_spacing(items)
    }

    fn languages(&self, profile: &ProfileDocument) -> Vec<LayoutBlock> {
        vec![LayoutBlock::paragraph(
            common::languages_line(&profile.languages),
            &self.body,
        )]
    }

    fn social(&self, profile: &ProfileDocument) -> Vec<LayoutBlock> {
        let items = profile
            .social_links
            .iter()
            .map(|social| {
                LayoutBlock::paragraph(common::social_line(social, LinkStyle::Muted), &self.body)
            })
            .collect();
        strip_spacing(items)
    }

    /// One row per content block; the label sits beside the first. A soft rule row separates
    /// consecutive sections and never trails the last one.
    fn rows(&self, profile: &ProfileDocument) -> Vec<GridRow> {
        let mut rows = Vec::new();
        for (label, builder, present) in SECTION_ORDER {
            if !present(profile) {
                continue;
            }
            let items = builder(self, profile);
            let Some((first, rest)) = items.split_first() else {
                continue;
            };
            if !rows.is_empty() {
                rows.push(GridRow {
                    cells: vec![vec![], vec![Self::separator()]],
                });
            }
            rows.push(GridRow {
                cells: vec![
                    vec![LayoutBlock::paragraph(escape(&label.to_uppercase()), &self.label)],
                    vec![first.clone()],
                ],
            });
            rows.extend(rest.iter().map(|item| GridRow {
                cells: vec![vec![], vec![item.clone()]],
            }));
        }
        rows
    }
}

impl ResumeTemplate for VibrantTemplate {
    fn key(&self) -> &'static str {
        "vibrant"
    }

    fn label(&self) -> &'static str {
        "Vibrant"
    }

    fn build_story(&self, profile: &ProfileDocument) -> Vec<LayoutBlock> {
        use frame::*;
        let mut story = self.header(profile);
        story.push(LayoutBlock::NextPageGeometry(NEXT_GEOMETRY.to_string()));
        // A header taller than its frame has already spilled into `content`.
        story.push(LayoutBlock::FrameBreakTo("content".to_string()));

        let rows = self.rows(profile);
        if !rows.is_empty() {
            story.push(LayoutBlock::Grid(Grid {
                col_widths: vec![ColumnWidth::Fixed(LEFT_W), ColumnWidth::Fill],
                rows,
                padding: CellPadding {
                    left: 0.0,
                    right: 6.0,
                    top: 0.0,
                    bottom: 6.0,
                },
            }));
        }
        story
    }

    fn page_layout(&self, page_size: PageSize) -> PageLayout {
        use frame::*;
        let content_w = page_size.width - ML - MR;
        PageLayout::Custom(vec![
            PageGeometry {
                id: FIRST_GEOMETRY.to_string(),
                frames: vec![
                    Frame::new("header", ML, page_size.height - MT - HEADER_H, content_w, HEADER_H),
                    Frame::new(
                        "content",
                        ML,
                        MB,
                        content_w,
                        page_size.height - MT - MB - HEADER_H,
                    ),
                ],
            },
            PageGeometry {
                id: NEXT_GEOMETRY.to_string(),
                frames: vec![Frame::new(
                    "full_content",
                    ML,
                    MB,
                    content_w,
                    page_size.height - MT - MB,
                )],
            },
        ])
    }
}
