//! Inline paragraph markup.
//!
//! Supported tags: `<b>`, `<i>`, `<font color='…'>` and `<link href='…' [color='…']>`.
//! Text may use the entities `&amp; &lt; &gt; &#39; &quot;`. Attribute values are quoted with
//! `'` or `"`. Templates must pass all user text through [`escape`] first.

use thiserror::Error;

use super::style::Color;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MarkupError {
    #[error("unknown tag <{0}>")]
    UnknownTag(String),

    #[error("closing </{found}> does not match the open <{expected}>")]
    MismatchedClose { expected: String, found: String },

    #[error("</{0}> closes nothing")]
    UnexpectedClose(String),

    #[error("<{0}> is never closed")]
    Unclosed(String),

    #[error("unterminated tag starting at byte {0}")]
    UnterminatedTag(usize),

    #[error("bad attribute in <{0}>")]
    BadAttribute(String),

    #[error("<link> requires an href")]
    MissingHref,

    #[error("unknown color '{0}'")]
    BadColor(String),

    #[error("unknown entity '&{0};'")]
    UnknownEntity(String),
}

/// A styled stretch of text.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Run {
    pub text: String,
    pub bold: bool,
    pub italic: bool,
    pub color: Option<Color>,
    pub link: Option<String>,
}

#[derive(Debug, Clone)]
enum Tag {
    Bold,
    Italic,
    Font(Option<Color>),
    Link { href: String, color: Option<Color> },
}

impl Tag {
    fn name(&self) -> &'static str {
        match self {
            Tag::Bold => "b",
            Tag::Italic => "i",
            Tag::Font(_) => "font",
            Tag::Link { .. } => "link",
        }
    }
}

/// Escapes text so it is taken literally by [`parse`].
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\'' => out.push_str("&#39;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

/// Parses markup into runs. Adjacent text with identical styling shares one run.
pub fn parse(markup: &str) -> Result<Vec<Run>, MarkupError> {
    let mut runs: Vec<Run> = Vec::new();
    let mut stack: Vec<Tag> = Vec::new();
    let mut rest = markup;
    let mut offset = 0;

    while !rest.is_empty() {
        if rest.starts_with('<') {
            let end = rest.find('>').ok_or(MarkupError::UnterminatedTag(offset))?;
            let inner = rest[1..end].trim();
            if let Some(name) = inner.strip_prefix('/') {
                let name = name.trim();
                let open = stack
                    .pop()
                    .ok_or_else(|| MarkupError::UnexpectedClose(name.to_string()))?;
                if open.name() != name {
                    return Err(MarkupError::MismatchedClose {
                        expected: open.name().to_string(),
                        found: name.to_string(),
                    });
                }
            } else {
                stack.push(parse_open_tag(inner)?);
            }
            offset += end + 1;
            rest = &rest[end + 1..];
        } else {
            let end = rest.find('<').unwrap_or(rest.len());
            let text = unescape(&rest[..end])?;
            push_text(&mut runs, &stack, text);
            offset += end;
            rest = &rest[end..];
        }
    }

    if let Some(open) = stack.pop() {
        return Err(MarkupError::Unclosed(open.name().to_string()));
    }
    Ok(runs)
}

/// Concatenated text of all runs, without styling.
pub fn plain_text(markup: &str) -> Result<String, MarkupError> {
    Ok(parse(markup)?.into_iter().map(|r| r.text).collect())
}

fn push_text(runs: &mut Vec<Run>, stack: &[Tag], text: String) {
    if text.is_empty() {
        return;
    }
    let mut run = Run {
        text,
        ..Run::default()
    };
    for tag in stack {
        match tag {
            Tag::Bold => run.bold = true,
            Tag::Italic => run.italic = true,
            Tag::Font(color) => run.color = color.or(run.color),
            Tag::Link { href, color } => {
                run.link = Some(href.clone());
                run.color = color.or(run.color);
            }
        }
    }
    if let Some(last) = runs.last_mut() {
        if last.bold == run.bold
            && last.italic == run.italic
            && last.color == run.color
            && last.link == run.link
        {
            last.text.push_str(&run.text);
            return;
        }
    }
    runs.push(run);
}

fn parse_open_tag(inner: &str) -> Result<Tag, MarkupError> {
    let (name, attrs) = match inner.find(char::is_whitespace) {
        Some(i) => (&inner[..i], &inner[i..]),
        None => (inner, ""),
    };
    let attrs = parse_attributes(name, attrs)?;
    let color = |attrs: &[(String, String)]| -> Result<Option<Color>, MarkupError> {
        attrs
            .iter()
            .find(|(k, _)| k == "color")
            .map(|(_, v)| Color::parse(v).ok_or_else(|| MarkupError::BadColor(v.clone())))
            .transpose()
    };

    match name {
        "b" => Ok(Tag::Bold),
        "i" => Ok(Tag::Italic),
        "font" => Ok(Tag::Font(color(&attrs)?)),
        "link" => {
            let href = attrs
                .iter()
                .find(|(k, _)| k == "href")
                .map(|(_, v)| v.clone())
                .ok_or(MarkupError::MissingHref)?;
            Ok(Tag::Link {
                href,
                color: color(&attrs)?,
            })
        }
        other => Err(MarkupError::UnknownTag(other.to_string())),
    }
}

fn parse_attributes(tag: &str, mut attrs: &str) -> Result<Vec<(String, String)>, MarkupError> {
    let bad = || MarkupError::BadAttribute(tag.to_string());
    let mut out = Vec::new();
    loop {
        attrs = attrs.trim_start();
        if attrs.is_empty() {
            return Ok(out);
        }
        let eq = attrs.find('=').ok_or_else(bad)?;
        let key = attrs[..eq].trim();
        if key.is_empty() || key.contains(char::is_whitespace) {
            return Err(bad());
        }
        let value_part = attrs[eq + 1..].trim_start();
        let quote = value_part.chars().next().ok_or_else(bad)?;
        if quote != '\'' && quote != '"' {
            return Err(bad());
        }
        let close = value_part[1..].find(quote).ok_or_else(bad)?;
        let value = unescape(&value_part[1..close + 1])?;
        out.push((key.to_string(), value));
        attrs = &value_part[close + 2..];
    }
}

fn unescape(text: &str) -> Result<String, MarkupError> {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let after = &rest[amp + 1..];
        let semi = after
            .find(';')
            .ok_or_else(|| MarkupError::UnknownEntity(after.to_string()))?;
        let entity = &after[..semi];
        out.push(match entity {
            "amp" => '&',
            "lt" => '<',
            "gt" => '>',
            "#39" | "apos" => '\'',
            "quot" => '"',
            "nbsp" => '\u{00A0}',
            other => return Err(MarkupError::UnknownEntity(other.to_string())),
        });
        rest = &after[semi + 1..];
    }
    out.push_str(rest);
    Ok(out)
}
