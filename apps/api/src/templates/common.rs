//! Formatting shared by all templates. Every helper escapes user text before it reaches markup.

use crate::layout::dates::{format_month_year, format_range};
use crate::layout::markup::escape;
use crate::layout::style::ParagraphStyle;
use crate::layout::{LayoutBlock, Rule};
use crate::models::profile::{
    Certificate, Education, Experience, Language, ProfileDocument, Project, Skill, SocialLink,
};

/// How hyperlinks are colored in a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkStyle {
    /// `<font color='#6B7280'>` inside the link.
    Muted,
    /// `color='darkblue'` on the link itself.
    DarkBlue,
}

pub const MUTED_LINK: &str = "#6B7280";

/// Wraps already-escaped `label` markup in a link to `url`.
pub fn link(url: &str, label: &str, style: LinkStyle) -> String {
    let href = escape(url);
    match style {
        LinkStyle::Muted => {
            format!("<link href='{href}'><font color='{MUTED_LINK}'>{label}</font></link>")
        }
        LinkStyle::DarkBlue => format!("<link href='{href}' color='darkblue'>{label}</link>"),
    }
}

fn link_or_plain(url: Option<&str>, label: &str, style: LinkStyle) -> String {
    match url.filter(|u| !u.trim().is_empty()) {
        Some(url) => link(url, label, style),
        None => label.to_string(),
    }
}

/// `"<org>[, <location>] — <b><role></b>"`; the role part is skipped when absent.
pub fn heading_line(org: &str, location: Option<&str>, role: Option<&str>) -> String {
    let mut left = escape(org);
    if let Some(location) = location.filter(|l| !l.is_empty()) {
        left.push_str(", ");
        left.push_str(&escape(location));
    }
    match role.filter(|r| !r.is_empty()) {
        Some(role) => format!("{left} — <b>{}</b>", escape(role)),
        None => left,
    }
}

pub fn experience_heading(exp: &Experience) -> String {
    heading_line(&exp.company, exp.location.as_deref(), Some(&exp.job_title))
}

pub fn education_heading(ed: &Education) -> String {
    heading_line(&ed.school, ed.location.as_deref(), ed.degree.as_deref())
}

pub fn date_line(start: chrono::NaiveDate, end: Option<chrono::NaiveDate>) -> Option<String> {
    format_range(Some(start), end).map(|r| escape(&r.to_uppercase()))
}

pub fn challenge_line(challenge: &str) -> String {
    format!("<i>Challenge:</i> {}", escape(challenge))
}

/// Present parts of name, issuer (linked when possible) and issue date, joined by `" — "`.
pub fn certificate_line(cert: &Certificate, style: LinkStyle) -> String {
    let issuer = if cert.issuer.is_empty() {
        String::new()
    } else {
        link_or_plain(cert.link.as_deref(), &escape(&cert.issuer), style)
    };
    let date = format_month_year(Some(cert.date_issued)).unwrap_or_default();
    [escape(&cert.name), issuer, date]
        .into_iter()
        .filter(|bit| !bit.is_empty())
        .collect::<Vec<_>>()
        .join(" — ")
}

pub fn project_title(project: &Project, style: LinkStyle) -> String {
    let name = if project.name.is_empty() {
        "Project"
    } else {
        project.name.as_str()
    };
    link_or_plain(project.link.as_deref(), &escape(name), style)
}

pub fn tech_stack_line(project: &Project) -> Option<String> {
    project
        .tech_stack
        .as_ref()
        .filter(|stack| !stack.is_empty())
        .map(|stack| escape(&stack.join(", ")))
}

pub fn social_line(social: &SocialLink, style: LinkStyle) -> String {
    let label = if social.platform.is_empty() {
        "Profile"
    } else {
        social.platform.as_str()
    };
    let mut text = link_or_plain(Some(&social.url), &escape(label), style);
    if let Some(description) = social.description.as_deref().filter(|d| !d.is_empty()) {
        text.push_str(" — ");
        text.push_str(&escape(description));
    }
    text
}

fn named_levels<'a>(items: impl Iterator<Item = (&'a str, Option<&'a str>)>) -> String {
    items
        .map(|(name, level)| match level.filter(|l| !l.is_empty()) {
            Some(level) => format!("{name} ({level})"),
            None => name.to_string(),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn skills_line(skills: &[Skill]) -> String {
    escape(&named_levels(
        skills.iter().map(|s| (s.name.as_str(), s.level.as_deref())),
    ))
}

pub fn languages_line(languages: &[Language]) -> String {
    escape(&named_levels(
        languages.iter().map(|l| (l.name.as_str(), l.level.as_deref())),
    ))
}

/// Location and phone joined with `" · "`, if either is present.
pub fn meta_line(profile: &ProfileDocument) -> Option<String> {
    let bits: Vec<&str> = [profile.location.as_str(), profile.phone.as_str()]
        .into_iter()
        .filter(|b| !b.is_empty())
        .collect();
    if bits.is_empty() {
        None
    } else {
        Some(escape(&bits.join(" · ")))
    }
}

pub struct HeaderStyles<'a> {
    pub name: &'a ParagraphStyle,
    pub title: &'a ParagraphStyle,
    pub meta: &'a ParagraphStyle,
    pub rule: Rule,
}

/// Name (or `RESUME`), optional title, optional meta line, then a closing rule.
pub fn header_blocks(profile: &ProfileDocument, styles: HeaderStyles<'_>) -> Vec<LayoutBlock> {
    let mut blocks = Vec::new();
    let name = if profile.fullname.trim().is_empty() {
        "RESUME".to_string()
    } else {
        escape(&profile.fullname)
    };
    blocks.push(LayoutBlock::paragraph(name, styles.name));
    if let Some(title) = profile.professional_title.as_deref().filter(|t| !t.is_empty()) {
        blocks.push(LayoutBlock::paragraph(escape(title), styles.title));
    }
    if let Some(meta) = meta_line(profile) {
        blocks.push(LayoutBlock::paragraph(meta, styles.meta));
    }
    blocks.push(LayoutBlock::Rule(styles.rule));
    blocks
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, 1).unwrap()
    }

    /// A profile with every section populated.
    pub(crate) fn full_profile() -> ProfileDocument {
        ProfileDocument {
            fullname: "Jane Doe".into(),
            professional_title: Some("Staff Engineer".into()),
            location: "Berlin".into(),
            phone: "+49 30 1234567".into(),
            summary: Some("Builds reliable distributed systems.".into()),
            experiences: vec![
                Experience {
                    job_title: "Engineer".into(),
                    company: "Acme".into(),
                    location: Some("Berlin".into()),
                    start_date: date(2020, 1),
                    end_date: None,
                    description: "Led the storage team.".into(),
                    challenge: Some("Zero-downtime migration.".into()),
                },
                Experience {
                    job_title: "Developer".into(),
                    company: "Globex".into(),
                    location: None,
                    start_date: date(2016, 6),
                    end_date: Some(date(2019, 12)),
                    description: "Shipped the billing service.".into(),
                    challenge: None,
                },
            ],
            education: vec![Education {
                degree: Some("BSc".into()),
                school: "TU Berlin".into(),
                field_of_study: Some("Computer Science".into()),
                location: None,
                start_date: date(2012, 10),
                end_date: Some(date(2016, 3)),
                description: None,
            }],
            skills: vec![
                Skill {
                    name: "Rust".into(),
                    level: Some("Expert".into()),
                },
                Skill {
                    name: "SQL".into(),
                    level: None,
                },
            ],
            projects: vec![Project {
                name: "vitae".into(),
                description: Some("Résumé renderer.".into()),
                link: Some("https://github.com/jane/vitae".into()),
                tech_stack: Some(vec!["Rust".into(), "lopdf".into()]),
            }],
            certificates: vec![Certificate {
                issuer: "CNCF".into(),
                name: "CKA".into(),
                date_issued: date(2022, 5),
                description: None,
                link: Some("https://cncf.io/cka".into()),
            }],
            languages: vec![Language {
                name: "German".into(),
                level: Some("Native".into()),
            }],
            social_links: vec![SocialLink {
                url: "https://github.com/jane".into(),
                platform: "GitHub".into(),
                description: Some("Open source work".into()),
            }],
        }
    }

    #[test]
    fn test_heading_line_with_location_and_role() {
        assert_eq!(
            heading_line("Acme", Some("Berlin"), Some("Engineer")),
            "Acme, Berlin — <b>Engineer</b>"
        );
    }

    #[test]
    fn test_education_heading_without_degree_has_no_separator() {
        assert_eq!(heading_line("TU Berlin", None, None), "TU Berlin");
    }

    #[test]
    fn test_heading_line_escapes_user_text() {
        assert_eq!(
            heading_line("R&D <Labs>", None, Some("Dev")),
            "R&amp;D &lt;Labs&gt; — <b>Dev</b>"
        );
    }

    #[test]
    fn test_date_line_is_upper_case_range() {
        assert_eq!(date_line(date(2020, 1), None).as_deref(), Some("JANUARY 2020 – PRESENT"));
    }

    #[test]
    fn test_certificate_line_links_issuer() {
        let cert = &full_profile().certificates[0];
        assert_eq!(
            certificate_line(cert, LinkStyle::Muted),
            "CKA — <link href='https://cncf.io/cka'><font color='#6B7280'>CNCF</font></link> — MAY 2022"
        );
        assert_eq!(
            certificate_line(cert, LinkStyle::DarkBlue),
            "CKA — <link href='https://cncf.io/cka' color='darkblue'>CNCF</link> — MAY 2022"
        );
    }

    #[test]
    fn test_certificate_line_skips_empty_parts() {
        let cert = Certificate {
            issuer: String::new(),
            name: "CKA".into(),
            date_issued: date(2022, 5),
            description: None,
            link: Some("https://cncf.io".into()),
        };
        assert_eq!(certificate_line(&cert, LinkStyle::Muted), "CKA — MAY 2022");
    }

    #[test]
    fn test_named_levels_join() {
        let profile = full_profile();
        assert_eq!(skills_line(&profile.skills), "Rust (Expert), SQL");
        assert_eq!(languages_line(&profile.languages), "German (Native)");
    }

    #[test]
    fn test_project_without_link_is_plain() {
        let project = Project {
            name: String::new(),
            description: None,
            link: None,
            tech_stack: Some(vec![]),
        };
        assert_eq!(project_title(&project, LinkStyle::Muted), "Project");
        assert_eq!(tech_stack_line(&project), None);
    }

    #[test]
    fn test_social_line_appends_description() {
        let social = &full_profile().social_links[0];
        assert_eq!(
            social_line(social, LinkStyle::DarkBlue),
            "<link href='https://github.com/jane' color='darkblue'>GitHub</link> — Open source work"
        );
    }

    #[test]
    fn test_meta_line_joins_present_parts() {
        let mut profile = full_profile();
        assert_eq!(meta_line(&profile).as_deref(), Some("Berlin · +49 30 1234567"));
        profile.phone.clear();
        assert_eq!(meta_line(&profile).as_deref(), Some("Berlin"));
        profile.location.clear();
        assert_eq!(meta_line(&profile), None);
    }
}
