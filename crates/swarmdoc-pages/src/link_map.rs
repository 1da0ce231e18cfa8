//! Corpus-wide link resolution map.

use std::collections::HashMap;

use crate::identifier::DocumentIdentifier;
use crate::mapping::MappingPage;

/// Immutable mapping from document identifiers to published URLs.
///
/// Entries keep insertion order; re-inserting an identifier replaces its URL
/// but keeps its original position. Iteration order matters for the
/// filename fallback in [`LinkRewriter`](crate::LinkRewriter).
#[derive(Clone, Debug, Default)]
pub struct LinkMap {
    entries: Vec<(DocumentIdentifier, String)>,
    index: HashMap<DocumentIdentifier, usize>,
}

impl LinkMap {
    /// Start building a link map.
    #[must_use]
    pub fn builder() -> LinkMapBuilder {
        LinkMapBuilder::default()
    }

    /// Look up the URL for an identifier.
    #[must_use]
    pub fn get(&self, id: &DocumentIdentifier) -> Option<&str> {
        self.index.get(id).map(|&i| self.entries[i].1.as_str())
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&DocumentIdentifier, &str)> {
        self.entries.iter().map(|(id, url)| (id, url.as_str()))
    }

    /// Entries whose identifier ends with `suffix`, in insertion order.
    ///
    /// Yielded entries borrow from the map only, not from `suffix`.
    pub fn suffix_matches<'s>(
        &self,
        suffix: &'s str,
    ) -> impl Iterator<Item = (&DocumentIdentifier, &str)> + use<'_, 's> {
        self.iter().filter(move |(id, _)| id.as_str().ends_with(suffix))
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Builder merging the identifier families into one [`LinkMap`].
#[derive(Debug, Default)]
pub struct LinkMapBuilder {
    map: LinkMap,
}

impl LinkMapBuilder {
    /// Add every narrative page from the declarative mapping.
    #[must_use]
    pub fn narrative_pages(mut self, pages: &[MappingPage]) -> Self {
        for page in pages {
            self.insert(DocumentIdentifier::new(&page.source), page.url());
        }
        self
    }

    /// Add a skill descriptor: `<skills_dir>/<skill>/<descriptor>` → `/skills/<skill>/`.
    #[must_use]
    pub fn skill(mut self, skills_dir: &str, skill: &str, descriptor: &str) -> Self {
        self.insert(
            DocumentIdentifier::new(&format!("{skills_dir}/{skill}/{descriptor}")),
            format!("/skills/{skill}/"),
        );
        self
    }

    /// Add an arbitrary identifier with a literal URL.
    #[must_use]
    pub fn entry(mut self, source: &str, url: impl Into<String>) -> Self {
        self.insert(DocumentIdentifier::new(source), url.into());
        self
    }

    /// Finish building.
    #[must_use]
    pub fn build(self) -> LinkMap {
        self.map
    }

    fn insert(&mut self, id: DocumentIdentifier, url: String) {
        if let Some(&i) = self.map.index.get(&id) {
            self.map.entries[i].1 = url;
        } else {
            self.map.index.insert(id.clone(), self.map.entries.len());
            self.map.entries.push((id, url));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn page(source: &str, output: &str) -> MappingPage {
        MappingPage {
            source: source.to_owned(),
            output: output.to_owned(),
            title: None,
            description: None,
            sidebar_label: None,
        }
    }

    #[test]
    fn test_builder_merges_families_in_order() {
        let map = LinkMap::builder()
            .narrative_pages(&[page("docs/guide.md", "how-to/guide.mdx")])
            .skill("skills", "task-system", "SKILL.md")
            .entry(
                "skills/orchestration-patterns/examples/complete-workflows.md",
                "/skills/complete-workflows/",
            )
            .entry("README.md", "https://example.com/README.md")
            .build();

        let keys: Vec<&str> = map.iter().map(|(id, _)| id.as_str()).collect();
        assert_eq!(
            keys,
            vec![
                "docs/guide.md",
                "skills/task-system/SKILL.md",
                "skills/orchestration-patterns/examples/complete-workflows.md",
                "README.md",
            ]
        );
        assert_eq!(
            map.get(&DocumentIdentifier::new("docs/guide.md")),
            Some("/how-to/guide/")
        );
        assert_eq!(
            map.get(&DocumentIdentifier::new("skills/task-system/SKILL.md")),
            Some("/skills/task-system/")
        );
    }

    #[test]
    fn test_keys_are_normalized() {
        let map = LinkMap::builder()
            .narrative_pages(&[page("./docs//guide.md", "guide.mdx")])
            .build();

        assert_eq!(
            map.get(&DocumentIdentifier::new("docs/guide.md")),
            Some("/guide/")
        );
    }

    #[test]
    fn test_reinsert_keeps_position_and_replaces_url() {
        let map = LinkMap::builder()
            .entry("a.md", "/first/")
            .entry("b.md", "/b/")
            .entry("a.md", "/second/")
            .build();

        assert_eq!(map.len(), 2);
        let entries: Vec<(&str, &str)> = map.iter().map(|(id, url)| (id.as_str(), url)).collect();
        assert_eq!(entries, vec![("a.md", "/second/"), ("b.md", "/b/")]);
    }

    #[test]
    fn test_suffix_matches_in_insertion_order() {
        let map = LinkMap::builder()
            .skill("skills", "messaging", "SKILL.md")
            .entry("docs/guide.md", "/guide/")
            .skill("skills", "agent-types", "SKILL.md")
            .build();

        let urls: Vec<&str> = map.suffix_matches("SKILL.md").map(|(_, url)| url).collect();
        assert_eq!(urls, vec!["/skills/messaging/", "/skills/agent-types/"]);
    }

    #[test]
    fn test_suffix_matches_outlive_suffix() {
        let map = LinkMap::builder().entry("docs/a/b.md", "/b/").build();

        let url = {
            let suffix = String::from("b.md");
            map.suffix_matches(&suffix).next().map(|(_, url)| url)
        };

        assert_eq!(url, Some("/b/"));
    }

    #[test]
    fn test_empty_map() {
        let map = LinkMap::default();
        assert!(map.is_empty());
        assert!(map.get(&DocumentIdentifier::new("a.md")).is_none());
    }
}
