//! Corpus-relative document identifiers.

use std::fmt;

/// Normalized, corpus-root-relative path of a source document.
///
/// Normalization converts `\` to `/`, drops empty and `.` segments, and folds
/// `..` into the preceding segment. A `..` with nothing left to fold is kept,
/// so an identifier that escapes the corpus root stays distinguishable from
/// one that doesn't.
///
/// # Examples
///
/// ```
/// use swarmdoc_pages::DocumentIdentifier;
///
/// assert_eq!(DocumentIdentifier::new("./docs//guide.md").as_str(), "docs/guide.md");
/// assert_eq!(DocumentIdentifier::new("docs\\a\\..\\b.md").as_str(), "docs/b.md");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocumentIdentifier(String);

impl DocumentIdentifier {
    /// Normalize a raw path into an identifier.
    #[must_use]
    pub fn new(raw: &str) -> Self {
        let raw = raw.replace('\\', "/");
        let mut segments: Vec<&str> = Vec::new();

        for segment in raw.split('/') {
            match segment {
                "" | "." => {}
                ".." => {
                    if segments.last().is_some_and(|s| *s != "..") {
                        segments.pop();
                    } else {
                        segments.push("..");
                    }
                }
                _ => segments.push(segment),
            }
        }

        Self(segments.join("/"))
    }

    /// The identifier as a `/`-separated string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Directory part of the identifier (`""` for documents at the root).
    #[must_use]
    pub fn dir(&self) -> &str {
        self.0.rsplit_once('/').map_or("", |(dir, _)| dir)
    }

    /// Resolve a relative path against this document's directory.
    #[must_use]
    pub fn resolve(&self, relative: &str) -> Self {
        match self.dir() {
            "" => Self::new(relative),
            dir => Self::new(&format!("{dir}/{relative}")),
        }
    }
}

impl fmt::Display for DocumentIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for DocumentIdentifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_removes_redundant_segments() {
        assert_eq!(DocumentIdentifier::new("a/./b//c.md").as_str(), "a/b/c.md");
        assert_eq!(DocumentIdentifier::new("./README.md").as_str(), "README.md");
        assert_eq!(DocumentIdentifier::new("a/b/").as_str(), "a/b");
    }

    #[test]
    fn test_new_folds_parent_segments() {
        assert_eq!(DocumentIdentifier::new("c/../a/b.md").as_str(), "a/b.md");
        assert_eq!(DocumentIdentifier::new("a/b/../../x.md").as_str(), "x.md");
    }

    #[test]
    fn test_new_keeps_escaping_parent_segments() {
        assert_eq!(DocumentIdentifier::new("../x.md").as_str(), "../x.md");
        assert_eq!(DocumentIdentifier::new("a/../../x.md").as_str(), "../x.md");
        assert_eq!(DocumentIdentifier::new("../../x.md").as_str(), "../../x.md");
    }

    #[test]
    fn test_new_is_separator_agnostic() {
        assert_eq!(
            DocumentIdentifier::new("skills\\foo\\SKILL.md"),
            DocumentIdentifier::new("skills/foo/SKILL.md")
        );
    }

    #[test]
    fn test_dir() {
        assert_eq!(DocumentIdentifier::new("c/d.md").dir(), "c");
        assert_eq!(DocumentIdentifier::new("a/b/c.md").dir(), "a/b");
        assert_eq!(DocumentIdentifier::new("README.md").dir(), "");
    }

    #[test]
    fn test_resolve_sibling_and_parent() {
        let doc = DocumentIdentifier::new("c/d.md");
        assert_eq!(doc.resolve("../a/b.md").as_str(), "a/b.md");
        assert_eq!(doc.resolve("e.md").as_str(), "c/e.md");
        assert_eq!(doc.resolve("./e.md").as_str(), "c/e.md");
    }

    #[test]
    fn test_resolve_from_root_document() {
        let doc = DocumentIdentifier::new("README.md");
        assert_eq!(doc.resolve("docs/guide.md").as_str(), "docs/guide.md");
        assert_eq!(doc.resolve("../outside.md").as_str(), "../outside.md");
    }
}
