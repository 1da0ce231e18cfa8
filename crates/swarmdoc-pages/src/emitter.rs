//! Page composition.

use std::sync::LazyLock;

use regex::Regex;

use crate::document::SourceDocument;
use crate::escape::escape_mdx;
use crate::link_map::LinkMap;
use crate::links::LinkRewriter;
use crate::metadata::{PageMetadata, h1_text, strip_front_matter};

/// HTML comment, possibly spanning lines.
static COMMENT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<!--.*?-->").unwrap());

/// Composes link rewriting, heading removal and escaping into a final page.
#[derive(Clone, Copy, Debug)]
pub struct PageEmitter<'a> {
    rewriter: LinkRewriter<'a>,
}

impl<'a> PageEmitter<'a> {
    /// Create an emitter resolving links against `link_map`.
    #[must_use]
    pub fn new(link_map: &'a LinkMap) -> Self {
        Self {
            rewriter: LinkRewriter::new(link_map),
        }
    }

    /// Render a document into page content.
    ///
    /// The body is the source with its own front matter and HTML comments
    /// removed, links rewritten, the leading level-1 heading dropped (the
    /// title moves to the front matter) and prose escaped for MDX.
    #[must_use]
    pub fn render(&self, document: &SourceDocument, metadata: &PageMetadata) -> String {
        let body = strip_front_matter(&document.text);
        let body = COMMENT_RE.replace_all(body, "");
        let body = self.rewriter.rewrite(&body, &document.id);
        let body = escape_mdx(strip_leading_h1(&body));

        format!("{}\n\n{}\n", metadata.render_front_matter(), body.trim())
    }
}

/// Drop a leading level-1 heading and the blank lines after it.
///
/// Blank lines before the heading are skipped when looking for it. Content
/// without a leading heading is returned unchanged.
fn strip_leading_h1(body: &str) -> &str {
    let mut lines = body.split_inclusive('\n');
    let mut offset = 0;

    let heading = loop {
        match lines.next() {
            Some(line) if line.trim().is_empty() => offset += line.len(),
            Some(line) => break line,
            None => return body,
        }
    };
    if h1_text(heading).is_none() {
        return body;
    }
    offset += heading.len();

    for line in lines {
        if !line.trim().is_empty() {
            break;
        }
        offset += line.len();
    }
    &body[offset..]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::SourceKind;
    use crate::identifier::DocumentIdentifier;
    use pretty_assertions::assert_eq;

    fn document(id: &str, text: &str) -> SourceDocument {
        SourceDocument {
            id: DocumentIdentifier::new(id),
            kind: SourceKind::Narrative,
            text: text.to_owned(),
        }
    }

    fn meta(title: &str) -> PageMetadata {
        PageMetadata {
            title: title.to_owned(),
            description: None,
            sidebar_label: None,
        }
    }

    #[test]
    fn test_render_full_pipeline() {
        let map = LinkMap::builder()
            .entry("docs/other.md", "/reference/other/")
            .build();
        let emitter = PageEmitter::new(&map);
        let doc = document(
            "docs/guide.md",
            "---\nsource: only\n---\n\n# Guide\n\n\nIntro {x} <!-- hidden\ncomment -->see [o](other.md#a).\n\n```\n{kept}\n```\n",
        );

        assert_eq!(
            emitter.render(&doc, &meta("Guide")),
            "---\ntitle: \"Guide\"\n---\n\nIntro \\{x\\} see [o](/reference/other/#a).\n\n```\n{kept}\n```\n"
        );
    }

    #[test]
    fn test_render_without_heading() {
        let map = LinkMap::default();
        let emitter = PageEmitter::new(&map);
        let doc = document("a.md", "Just text\n# Not leading\n");

        assert_eq!(
            emitter.render(&doc, &meta("A")),
            "---\ntitle: \"A\"\n---\n\nJust text\n# Not leading\n"
        );
    }

    #[test]
    fn test_render_empty_body() {
        let map = LinkMap::default();
        let emitter = PageEmitter::new(&map);
        let doc = document("a.md", "# Only Title\n");

        assert_eq!(
            emitter.render(&doc, &meta("Only Title")),
            "---\ntitle: \"Only Title\"\n---\n\n\n"
        );
    }

    #[test]
    fn test_strip_leading_h1() {
        assert_eq!(strip_leading_h1("# T\n\n\nbody"), "body");
        assert_eq!(strip_leading_h1("\n\n# T\nbody\n"), "body\n");
        assert_eq!(strip_leading_h1("## T\nbody"), "## T\nbody");
        assert_eq!(strip_leading_h1("text\n# T\n"), "text\n# T\n");
        assert_eq!(strip_leading_h1("# T"), "");
        assert_eq!(strip_leading_h1(""), "");
    }

    #[test]
    fn test_comment_before_heading() {
        let map = LinkMap::default();
        let emitter = PageEmitter::new(&map);
        let doc = document("a.md", "<!-- banner -->\n# Title\n\nBody\n");

        assert_eq!(
            emitter.render(&doc, &meta("Title")),
            "---\ntitle: \"Title\"\n---\n\nBody\n"
        );
    }
}
