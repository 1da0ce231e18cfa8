//! Relative link rewriting against the corpus link map.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::identifier::DocumentIdentifier;
use crate::link_map::LinkMap;

/// Inline markdown link: `[text](target)`.
static LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]*)\]\(([^)]+)\)").unwrap());

/// Rewrites relative markdown links to published site routes.
///
/// Resolution order for each `[text](target)`:
/// 1. External URLs, fragments, `mailto:` and absolute site routes pass through.
/// 2. The path part is resolved against the containing document's directory
///    and looked up in the [`LinkMap`].
/// 3. Otherwise the bare filename is matched against the end of every map
///    key, first match in insertion order wins.
/// 4. Otherwise the link is left exactly as written.
///
/// Rewritten targets are absolute routes or external URLs, so rewriting is
/// idempotent.
///
/// # Example
///
/// ```
/// use swarmdoc_pages::{DocumentIdentifier, LinkMap, LinkRewriter};
///
/// let map = LinkMap::builder().entry("a/b.md", "/x/").build();
/// let rewriter = LinkRewriter::new(&map);
/// let out = rewriter.rewrite("[t](../a/b.md#usage)", &DocumentIdentifier::new("c/d.md"));
/// assert_eq!(out, "[t](/x/#usage)");
/// ```
#[derive(Clone, Copy, Debug)]
pub struct LinkRewriter<'a> {
    link_map: &'a LinkMap,
}

impl<'a> LinkRewriter<'a> {
    /// Create a rewriter over a link map.
    #[must_use]
    pub fn new(link_map: &'a LinkMap) -> Self {
        Self { link_map }
    }

    /// Rewrite every inline link in `content`.
    ///
    /// `source` is the identifier of the document the content belongs to.
    #[must_use]
    pub fn rewrite(&self, content: &str, source: &DocumentIdentifier) -> String {
        LINK_RE
            .replace_all(content, |caps: &Captures<'_>| {
                let text = &caps[1];
                let href = &caps[2];
                match self.resolve(href, source) {
                    Some(target) => format!("[{text}]({target})"),
                    None => caps[0].to_owned(),
                }
            })
            .into_owned()
    }

    /// Resolve a link target, returning `None` when it should stay as written.
    #[must_use]
    pub fn resolve(&self, href: &str, source: &DocumentIdentifier) -> Option<String> {
        if is_pass_through(href) {
            return None;
        }

        // Only the segment before a second `#` survives as the anchor.
        let mut parts = href.split('#');
        let path_part = parts.next().unwrap_or_default();
        let anchor = parts.next();
        if path_part.is_empty() {
            return None;
        }

        let url = self
            .lookup(path_part, source)
            .or_else(|| self.filename_fallback(path_part, source))?;

        Some(match anchor {
            Some(anchor) if !anchor.is_empty() => format!("{url}#{anchor}"),
            _ => url.to_owned(),
        })
    }

    fn lookup(&self, path_part: &str, source: &DocumentIdentifier) -> Option<&'a str> {
        self.link_map.get(&source.resolve(path_part))
    }

    fn filename_fallback(&self, path_part: &str, source: &DocumentIdentifier) -> Option<&'a str> {
        let filename = path_part.rsplit(['/', '\\']).next().unwrap_or(path_part);
        if filename.is_empty() {
            return None;
        }

        let mut matches = self.link_map.suffix_matches(filename);
        let (first_id, first_url) = matches.next()?;

        let others: Vec<&str> = matches.map(|(id, _)| id.as_str()).collect();
        if others.is_empty() {
            tracing::debug!(
                source = %source,
                link = path_part,
                resolved = %first_id,
                "Resolved link by filename"
            );
        } else {
            tracing::warn!(
                source = %source,
                link = path_part,
                resolved = %first_id,
                candidates = ?others,
                "Ambiguous link resolved by filename, using first match"
            );
        }

        Some(first_url)
    }
}

/// Whether a link target is never rewritten.
fn is_pass_through(href: &str) -> bool {
    href.starts_with("http://")
        || href.starts_with("https://")
        || href.starts_with("mailto:")
        || href.starts_with('#')
        || href.starts_with('/')
}
