//! Page metadata extraction and front matter rendering.
//!
//! Two source conventions feed the same [`PageMetadata`]:
//! - narrative docs take their metadata from the declarative mapping, with
//!   the first level-1 heading as the title fallback
//! - skill descriptors carry a `---`-delimited header with `name:` and
//!   `description:` lines

use std::sync::LazyLock;

use regex::Regex;

use crate::fence::FenceTracker;
use crate::mapping::MappingPage;

/// Title used when no other source provides one.
pub(crate) const UNTITLED: &str = "Untitled";

/// Leading `---` block; the capture is the header text.
static FRONT_MATTER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\A---\n(.*?)\n---\n").unwrap());

/// Metadata of a generated page.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PageMetadata {
    /// Page title.
    pub title: String,
    /// Page description.
    pub description: Option<String>,
    /// Sidebar label, rendered only when it differs from the title.
    pub sidebar_label: Option<String>,
}

impl PageMetadata {
    /// Metadata for a narrative doc.
    ///
    /// `body` is the source with its front matter already stripped. The title
    /// is the mapping title, else the first level-1 heading, else `Untitled`.
    #[must_use]
    pub fn from_mapping(page: &MappingPage, body: &str) -> Self {
        let title = page
            .title
            .clone()
            .or_else(|| extract_title(body))
            .unwrap_or_else(|| UNTITLED.to_owned());

        Self {
            title,
            description: page.description.clone(),
            sidebar_label: page.sidebar_label.clone(),
        }
    }

    /// Metadata for a skill descriptor.
    ///
    /// The title is the humanized `name:` field, or the humanized skill
    /// directory when the header has no name.
    #[must_use]
    pub fn from_skill(embedded: &EmbeddedMetadata, skill_dir: &str) -> Self {
        let slug = embedded.name.as_deref().unwrap_or(skill_dir);
        Self {
            title: humanize(slug),
            description: embedded.description.clone(),
            sidebar_label: None,
        }
    }

    /// Metadata for the workflow example page.
    #[must_use]
    pub fn for_workflow_example(source: &str, fallback_title: &str, description: &str) -> Self {
        Self {
            title: extract_title(source).unwrap_or_else(|| fallback_title.to_owned()),
            description: Some(description.to_owned()),
            sidebar_label: None,
        }
    }

    /// Render the synthesized front matter block (without a trailing newline).
    ///
    /// ```
    /// use swarmdoc_pages::PageMetadata;
    ///
    /// let meta = PageMetadata {
    ///     title: "Guide".to_owned(),
    ///     description: Some("Say \"hi\"".to_owned()),
    ///     sidebar_label: None,
    /// };
    /// assert_eq!(
    ///     meta.render_front_matter(),
    ///     "---\ntitle: \"Guide\"\ndescription: \"Say \\\"hi\\\"\"\n---"
    /// );
    /// ```
    #[must_use]
    pub fn render_front_matter(&self) -> String {
        let mut out = String::from("---\n");
        out.push_str(&format!("title: {}\n", yaml_quote(&self.title)));
        if let Some(description) = &self.description {
            out.push_str(&format!("description: {}\n", yaml_quote(description)));
        }
        if let Some(label) = self.sidebar_label.as_ref().filter(|l| **l != self.title) {
            out.push_str("sidebar:\n");
            out.push_str(&format!("  label: {}\n", yaml_quote(label)));
        }
        out.push_str("---");
        out
    }
}

/// Fields read from an embedded `---` header.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EmbeddedMetadata {
    /// `name:` value, unquoted.
    pub name: Option<String>,
    /// `description:` value, unquoted.
    pub description: Option<String>,
    /// Content after the header (the whole input when there is none).
    pub body: String,
}

impl EmbeddedMetadata {
    /// Split a leading header from `content` and read `name` and `description`.
    ///
    /// Only those two keys are read, one line each; anything else in the
    /// header is ignored. Malformed or missing headers yield empty fields.
    #[must_use]
    pub fn parse(content: &str) -> Self {
        let Some((header, body)) = split_front_matter(content) else {
            return Self {
                body: content.to_owned(),
                ..Self::default()
            };
        };

        let mut meta = Self {
            body: body.to_owned(),
            ..Self::default()
        };
        for line in header.lines() {
            if meta.name.is_none() {
                meta.name = header_value(line, "name:");
            }
            if meta.description.is_none() {
                meta.description = header_value(line, "description:");
            }
        }
        meta
    }
}

/// Split a leading `---` block into `(header, body)`.
pub(crate) fn split_front_matter(content: &str) -> Option<(&str, &str)> {
    let caps = FRONT_MATTER_RE.captures(content)?;
    let header = caps.get(1)?.as_str();
    let end = caps.get(0)?.end();
    Some((header, &content[end..]))
}

/// Remove a leading `---` block, if any.
pub(crate) fn strip_front_matter(content: &str) -> &str {
    split_front_matter(content).map_or(content, |(_, body)| body)
}

fn header_value(line: &str, key: &str) -> Option<String> {
    let value = unquote(line.strip_prefix(key)?.trim());
    (!value.is_empty()).then(|| value.to_owned())
}

/// Strip one leading and one trailing quote character.
fn unquote(value: &str) -> &str {
    let value = value.strip_prefix(['"', '\'']).unwrap_or(value);
    value.strip_suffix(['"', '\'']).unwrap_or(value)
}

/// First level-1 heading outside fenced code.
#[must_use]
pub fn extract_title(content: &str) -> Option<String> {
    let mut fence = FenceTracker::new();
    content
        .lines()
        .filter(|line| !fence.update(line) && !fence.in_fence())
        .find_map(h1_text)
        .map(str::to_owned)
}

/// Heading text when `line` is a level-1 ATX heading.
pub(crate) fn h1_text(line: &str) -> Option<&str> {
    let rest = line.strip_prefix('#')?;
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    let text = rest.trim();
    (!text.is_empty()).then_some(text)
}

/// Title-case a slug: `task-system` becomes `Task System`.
#[must_use]
pub fn humanize(slug: &str) -> String {
    let mut result = String::with_capacity(slug.len());
    for word in slug.split('-').filter(|w| !w.is_empty()) {
        if !result.is_empty() {
            result.push(' ');
        }
        capitalize_first_into(word, &mut result);
    }
    result
}

fn capitalize_first_into(word: &str, buf: &mut String) {
    let mut chars = word.chars();
    if let Some(first) = chars.next() {
        buf.extend(first.to_uppercase());
        buf.push_str(chars.as_str());
    }
}

/// YAML double-quoted scalar.
fn yaml_quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for ch in value.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            _ => out.push(ch),
        }
    }
    out.push('"');
    out
}
