//! Simple: single column on the default page layout, tinted section bands.

use crate::layout::geometry::MM;
use crate::layout::markup::escape;
use crate::layout::{
    Band, Color, FontFamily, LayoutBlock, PageLayout, PageSize, ParagraphStyle, Rule, TextRole,
};
use crate::models::profile::ProfileDocument;

use super::common::{self, HeaderStyles, LinkStyle};
use super::ResumeTemplate;

const INK: Color = Color::hex(0x111827);
const MUTED: Color = Color::hex(0x6B7280);
const ACCENT: Color = Color::hex(0x374151);
const BAND: Color = Color::hex(0xF9FAFB);

const GAP_Y: f32 = 6.0;

pub struct SimpleTemplate {
    name: ParagraphStyle,
    title: ParagraphStyle,
    header_meta: ParagraphStyle,
    body: ParagraphStyle,
    meta: ParagraphStyle,
    section: ParagraphStyle,
}

impl Default for SimpleTemplate {
    fn default() -> Self {
        Self::new()
    }
}

impl SimpleTemplate {
    pub fn new() -> Self {
        Self {
            name: ParagraphStyle::new(TextRole::Name, FontFamily::Roboto, 22.0, 24.0, INK)
                .bold()
                .spacing(0.0, 2.0),
            title: ParagraphStyle::new(TextRole::Title, FontFamily::SourceSans, 10.5, 14.0, MUTED)
                .spacing(0.0, 8.0),
            header_meta: ParagraphStyle::new(TextRole::Meta, FontFamily::SourceSans, 9.2, 12.0, MUTED)
                .spacing(0.0, 8.0),
            body: ParagraphStyle::new(TextRole::Body, FontFamily::SourceSans, 10.0, 14.0, INK),
            meta: ParagraphStyle::new(TextRole::Meta, FontFamily::SourceSans, 9.2, 12.0, MUTED),
            section: ParagraphStyle::new(
                TextRole::SectionHeading,
                FontFamily::Roboto,
                10.5,
                14.0,
                ACCENT,
            )
            .bold()
            .spacing(10.0, 4.0)
            .indent(4.0 * MM)
            .band(Band {
                background: BAND,
                accent: Some((1.5, ACCENT)),
                padding_left: 3.0,
                padding_vertical: 2.0,
            }),
        }
    }

    fn section_title(&self, text: &str) -> LayoutBlock {
        LayoutBlock::paragraph(escape(&text.to_uppercase()), &self.section)
    }

    fn header(&self, profile: &ProfileDocument) -> Vec<LayoutBlock> {
        common::header_blocks(
            profile,
            HeaderStyles {
                name: &self.name,
                title: &self.title,
                meta: &self.header_meta,
                rule: Rule {
                    thickness: 0.7,
                    color: INK,
                    space_before: 2.0,
                    space_after: 8.0,
                },
            },
        )
    }

    fn profile(&self, summary: &str) -> Vec<LayoutBlock> {
        vec![
            self.section_title("Profile"),
            LayoutBlock::paragraph(escape(summary), &self.body),
            LayoutBlock::Spacer(GAP_Y),
        ]
    }

    fn experience(&self, profile: &ProfileDocument) -> Vec<LayoutBlock> {
        let mut s = vec![self.section_title("Experience")];
        for exp in &profile.experiences {
            s.push(LayoutBlock::paragraph(common::experience_heading(exp), &self.body));
            if let Some(range) = common::date_line(exp.start_date, exp.end_date) {
                s.push(LayoutBlock::paragraph(range, &self.meta));
            }
            if !exp.description.is_empty() {
                s.push(LayoutBlock::paragraph(escape(&exp.description), &self.body));
            }
            if let Some(challenge) = exp.challenge.as_deref().filter(|c| !c.is_empty()) {
                s.push(LayoutBlock::paragraph(common::challenge_line(challenge), &self.meta));
            }
            s.push(LayoutBlock::Spacer(GAP_Y));
        }
        s
    }

    fn education(&self, profile: &ProfileDocument) -> Vec<LayoutBlock> {
        let mut s = vec![self.section_title("Education")];
        for ed in &profile.education {
            s.push(LayoutBlock::paragraph(common::education_heading(ed), &self.body));
            if let Some(range) = common::date_line(ed.start_date, ed.end_date) {
                s.push(LayoutBlock::paragraph(range, &self.meta));
            }
            if let Some(field) = ed.field_of_study.as_deref().filter(|f| !f.is_empty()) {
                s.push(LayoutBlock::paragraph(escape(field), &self.meta));
            }
            if let Some(description) = ed.description.as_deref().filter(|d| !d.is_empty()) {
                s.push(LayoutBlock::paragraph(escape(description), &self.body));
            }
            s.push(LayoutBlock::Spacer(GAP_Y));
        }
        s
    }

    fn projects(&self, profile: &ProfileDocument) -> Vec<LayoutBlock> {
        let mut s = vec![self.section_title("Projects")];
        for project in &profile.projects {
            s.push(LayoutBlock::paragraph(
                common::project_title(project, LinkStyle::Muted),
                &self.body,
            ));
            if let Some(stack) = common::tech_stack_line(project) {
                s.push(LayoutBlock::paragraph(stack, &self.meta));
            }
            if let Some(description) = project.description.as_deref().filter(|d| !d.is_empty()) {
                s.push(LayoutBlock::paragraph(escape(description), &self.body));
            }
            s.push(LayoutBlock::Spacer(GAP_Y));
        }
        s
    }

    fn skills(&self, profile: &ProfileDocument) -> Vec<LayoutBlock> {
        vec![
            self.section_title("Skills"),
            LayoutBlock::paragraph(common::skills_line(&profile.skills), &self.body),
            LayoutBlock::Spacer(GAP_Y),
        ]
    }

    fn certificates(&self, profile: &ProfileDocument) -> Vec<LayoutBlock> {
        let mut s = vec![self.section_title("Certificates")];
        for cert in &profile.certificates {
            s.push(LayoutBlock::paragraph(
                common::certificate_line(cert, LinkStyle::Muted),
                &self.body,
            ));
            s.push(LayoutBlock::Spacer(GAP_Y - 2.0));
        }
        s
    }

    fn languages(&self, profile: &ProfileDocument) -> Vec<LayoutBlock> {
        vec![
            self.section_title("Languages"),
            LayoutBlock::paragraph(common::languages_line(&profile.languages), &self.body),
            LayoutBlock::Spacer(GAP_Y),
        ]
    }

    fn social(&self, profile: &ProfileDocument) -> Vec<LayoutBlock> {
        let mut s = vec![self.section_title("Social")];
        for social in &profile.social_links {
            s.push(LayoutBlock::paragraph(
                common::social_line(social, LinkStyle::Muted),
                &self.body,
            ));
        }
        s.push(LayoutBlock::Spacer(GAP_Y));
        s
    }
}

impl ResumeTemplate for SimpleTemplate {
    fn key(&self) -> &'static str {
        "simple"
    }

    fn label(&self) -> &'static str {
        "Simple"
    }

    fn build_story(&self, profile: &ProfileDocument) -> Vec<LayoutBlock> {
        let mut story = self.header(profile);

        if let Some(summary) = profile.summary_text() {
            story.extend(self.profile(summary));
        }
        if !profile.experiences.is_empty() {
            story.extend(self.experience(profile));
        }
        if !profile.education.is_empty() {
            story.extend(self.education(profile));
        }
        if !profile.projects.is_empty() {
            story.extend(self.projects(profile));
        }
        if !profile.skills.is_empty() {
            story.extend(self.skills(profile));
        }
        if !profile.certificates.is_empty() {
            story.extend(self.certificates(profile));
        }
        if !profile.languages.is_empty() {
            story.extend(self.languages(profile));
        }
        if !profile.social_links.is_empty() {
            story.extend(self.social(profile));
        }

        story
    }

    fn page_layout(&self, _page_size: PageSize) -> PageLayout {
        PageLayout::Default
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::blocks::section_headings;
    use crate::templates::common::tests::full_profile;

    #[test]
    fn test_sections_in_fixed_order() {
        let story = SimpleTemplate::new().build_story(&full_profile());
        assert_eq!(
            section_headings(&story),
            vec![
                "PROFILE",
                "EXPERIENCE",
                "EDUCATION",
                "PROJECTS",
                "SKILLS",
                "CERTIFICATES",
                "LANGUAGES",
                "SOCIAL"
            ]
        );
    }

    #[test]
    fn test_absent_sections_are_skipped() {
        let mut profile = full_profile();
        profile.summary = None;
        profile.education.clear();
        profile.languages.clear();
        let story = SimpleTemplate::new().build_story(&profile);
        assert_eq!(
            section_headings(&story),
            vec!["EXPERIENCE", "PROJECTS", "SKILLS", "CERTIFICATES", "SOCIAL"]
        );
    }

    #[test]
    fn test_header_falls_back_to_resume() {
        let story = SimpleTemplate::new().build_story(&ProfileDocument::default());
        match &story[0] {
            LayoutBlock::Paragraph(p) => assert_eq!(p.markup, "RESUME"),
            other => panic!("expected name paragraph, got {other:?}"),
        }
        // Name and closing rule only: no title, no meta line.
        assert_eq!(story.len(), 2);
    }

    #[test]
    fn test_section_headings_are_banded() {
        let story = SimpleTemplate::new().build_story(&full_profile());
        let banded = story
            .iter()
            .filter(|b| matches!(b, LayoutBlock::Paragraph(p) if p.style.band.is_some()))
            .count();
        assert_eq!(banded, 8);
    }

    #[test]
    fn test_uses_default_layout() {
        assert_eq!(SimpleTemplate::new().page_layout(PageSize::A4), PageLayout::Default);
    }
}
