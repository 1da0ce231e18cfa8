//! Generation driver.
//!
//! Builds the link map once, then renders every source in a fixed order:
//! narrative docs in mapping order, skill descriptors in directory order,
//! then the workflow example.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use swarmdoc_storage::{Storage, StorageError};

use crate::document::{GeneratedPage, GenerationResult, SourceDocument, SourceKind};
use crate::emitter::PageEmitter;
use crate::identifier::DocumentIdentifier;
use crate::link_map::LinkMap;
use crate::mapping::{DocsMapping, MappingError, MappingPage, PAGE_EXTENSION, route_for_output};
use crate::metadata::{EmbeddedMetadata, PageMetadata, strip_front_matter};

/// Output directory of skill pages, relative to the published corpus.
const SKILLS_OUTPUT_DIR: &str = "skills";

/// Corpus layout and fixed values the generator needs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Directory holding one subdirectory per skill.
    pub skills_dir: String,
    /// Descriptor file name inside each skill directory.
    pub descriptor: String,
    /// Identifier of the workflow example source.
    pub workflow_source: String,
    /// Output slug of the workflow example page.
    pub workflow_slug: String,
    /// Title used when the workflow example has no heading.
    pub workflow_title: String,
    /// Description of the workflow example page.
    pub workflow_description: String,
    /// Identifier of the repository readme (never generated).
    pub readme: String,
    /// Published URL of the readme.
    pub readme_url: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            skills_dir: "skills".to_owned(),
            descriptor: "SKILL.md".to_owned(),
            workflow_source: "skills/orchestration-patterns/examples/complete-workflows.md"
                .to_owned(),
            workflow_slug: "complete-workflows".to_owned(),
            workflow_title: "Complete Workflows".to_owned(),
            workflow_description: "End-to-end orchestration workflow examples.".to_owned(),
            readme: "README.md".to_owned(),
            readme_url:
                "https://github.com/zircote/claude-team-orchestration/blob/main/README.md"
                    .to_owned(),
        }
    }
}

/// Which page families to generate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GenerateScope {
    /// Narrative docs and skills.
    #[default]
    All,
    /// Narrative docs only.
    Docs,
    /// Skill descriptors and the workflow example.
    Skills,
}

impl GenerateScope {
    fn includes_docs(self) -> bool {
        matches!(self, Self::All | Self::Docs)
    }

    fn includes_skills(self) -> bool {
        matches!(self, Self::All | Self::Skills)
    }
}

/// Error aborting a generation run.
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    /// Mapping could not be loaded.
    #[error(transparent)]
    Mapping(#[from] MappingError),
    /// Skill directories could not be enumerated.
    #[error("Failed to list skills: {0}")]
    Storage(#[from] StorageError),
    /// A page could not be written.
    #[error("Failed to write {}: {source}", path.display())]
    Write {
        /// Output file path.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

/// One page the generator will try to produce.
#[derive(Clone, Copy, Debug)]
enum PageSource<'a> {
    Narrative(&'a MappingPage),
    Skill(&'a str),
    WorkflowExample,
}

/// Renders source documents into pages.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
///
/// use swarmdoc_pages::{DocsMapping, GenerateScope, Generator, GeneratorConfig};
/// use swarmdoc_storage::MockStorage;
///
/// let storage = MockStorage::new()
///     .with_file("skills/task-system/SKILL.md", "---\nname: task-system\n---\nBody\n");
/// let generator = Generator::new(
///     Arc::new(storage),
///     DocsMapping::default(),
///     GeneratorConfig::default(),
/// )
/// .unwrap();
///
/// let out = tempfile::tempdir().unwrap();
/// let result = generator.generate(GenerateScope::Skills, out.path()).unwrap();
/// assert_eq!(result.generated, vec!["skills/task-system.mdx"]);
/// ```
pub struct Generator {
    storage: Arc<dyn Storage>,
    mapping: DocsMapping,
    config: GeneratorConfig,
    skills: Vec<String>,
    link_map: LinkMap,
}

impl Generator {
    /// Create a generator, enumerating skills and building the link map.
    pub fn new(
        storage: Arc<dyn Storage>,
        mapping: DocsMapping,
        config: GeneratorConfig,
    ) -> Result<Self, GenerateError> {
        let skills = storage.skill_dirs(&config.skills_dir, &config.descriptor)?;

        let mut builder = LinkMap::builder().narrative_pages(&mapping.pages);
        for skill in &skills {
            builder = builder.skill(&config.skills_dir, skill, &config.descriptor);
        }
        let link_map = builder
            .entry(
                &config.workflow_source,
                route_for_output(&workflow_output(&config)),
            )
            .entry(&config.readme, config.readme_url.clone())
            .build();

        tracing::debug!(
            pages = mapping.pages.len(),
            skills = skills.len(),
            links = link_map.len(),
            "Built link map"
        );

        Ok(Self {
            storage,
            mapping,
            config,
            skills,
            link_map,
        })
    }

    /// Load the mapping file and create a generator.
    pub fn load(
        storage: Arc<dyn Storage>,
        mapping_path: &Path,
        config: GeneratorConfig,
    ) -> Result<Self, GenerateError> {
        let mapping = DocsMapping::load(mapping_path)?;
        Self::new(storage, mapping, config)
    }

    /// The corpus-wide link map.
    #[must_use]
    pub fn link_map(&self) -> &LinkMap {
        &self.link_map
    }

    /// The declarative mapping.
    #[must_use]
    pub fn mapping(&self) -> &DocsMapping {
        &self.mapping
    }

    /// Enumerated skill directories, sorted.
    #[must_use]
    pub fn skills(&self) -> &[String] {
        &self.skills
    }

    /// Render pages in `scope` without writing them.
    ///
    /// Returns the rendered pages and the identifiers of sources that could
    /// not be read, both in generation order.
    #[must_use]
    pub fn render(&self, scope: GenerateScope) -> (Vec<GeneratedPage>, Vec<String>) {
        let emitter = PageEmitter::new(&self.link_map);
        let mut pages = Vec::new();
        let mut skipped = Vec::new();

        for source in self.sources(scope) {
            let id = self.identifier(source);
            match self.read(&id, kind_of(source)) {
                Some(document) => {
                    let metadata = self.metadata(source, &document);
                    pages.push(GeneratedPage {
                        output_path: self.output_path(source),
                        content: emitter.render(&document, &metadata),
                    });
                }
                None => skipped.push(id.to_string()),
            }
        }

        (pages, skipped)
    }

    /// Render pages in `scope` and write them under `out_dir`.
    ///
    /// Parent directories are created as needed. Unreadable sources are
    /// reported in [`GenerationResult::skipped`]; write failures abort.
    pub fn generate(
        &self,
        scope: GenerateScope,
        out_dir: &Path,
    ) -> Result<GenerationResult, GenerateError> {
        let (pages, skipped) = self.render(scope);
        let mut result = GenerationResult {
            generated: Vec::with_capacity(pages.len()),
            skipped,
        };

        for page in pages {
            let path = out_dir.join(&page.output_path);
            write_page(&path, &page.content)?;
            tracing::debug!(path = %page.output_path, "Generated page");
            result.generated.push(page.output_path);
        }

        tracing::info!(
            generated = result.generated.len(),
            skipped = result.skipped.len(),
            out_dir = %out_dir.display(),
            "Generation finished"
        );
        Ok(result)
    }

    fn sources(&self, scope: GenerateScope) -> Vec<PageSource<'_>> {
        let mut sources = Vec::new();
        if scope.includes_docs() {
            sources.extend(self.mapping.pages.iter().map(PageSource::Narrative));
        }
        if scope.includes_skills() {
            sources.extend(self.skills.iter().map(|s| PageSource::Skill(s.as_str())));
            sources.push(PageSource::WorkflowExample);
        }
        sources
    }

    fn identifier(&self, source: PageSource<'_>) -> DocumentIdentifier {
        match source {
            PageSource::Narrative(page) => DocumentIdentifier::new(&page.source),
            PageSource::Skill(skill) => DocumentIdentifier::new(&format!(
                "{}/{skill}/{}",
                self.config.skills_dir, self.config.descriptor
            )),
            PageSource::WorkflowExample => DocumentIdentifier::new(&self.config.workflow_source),
        }
    }

    fn output_path(&self, source: PageSource<'_>) -> String {
        match source {
            PageSource::Narrative(page) => page.output.clone(),
            PageSource::Skill(skill) => format!("{SKILLS_OUTPUT_DIR}/{skill}{PAGE_EXTENSION}"),
            PageSource::WorkflowExample => workflow_output(&self.config),
        }
    }

    fn metadata(&self, source: PageSource<'_>, document: &SourceDocument) -> PageMetadata {
        match source {
            PageSource::Narrative(page) => {
                PageMetadata::from_mapping(page, strip_front_matter(&document.text))
            }
            PageSource::Skill(skill) => {
                PageMetadata::from_skill(&EmbeddedMetadata::parse(&document.text), skill)
            }
            PageSource::WorkflowExample => PageMetadata::for_workflow_example(
                &document.text,
                &self.config.workflow_title,
                &self.config.workflow_description,
            ),
        }
    }

    /// Read a source, logging and returning `None` when it is unavailable.
    fn read(&self, id: &DocumentIdentifier, kind: SourceKind) -> Option<SourceDocument> {
        if !self.storage.exists(id.as_str()) {
            tracing::warn!(path = %id, %kind, "Source not found, skipping");
            return None;
        }
        match self.storage.read(id.as_str()) {
            Ok(text) => Some(SourceDocument {
                id: id.clone(),
                kind,
                text,
            }),
            Err(error) => {
                tracing::warn!(path = %id, %kind, %error, "Source unreadable, skipping");
                None
            }
        }
    }
}

fn kind_of(source: PageSource<'_>) -> SourceKind {
    match source {
        PageSource::Narrative(_) => SourceKind::Narrative,
        PageSource::Skill(_) => SourceKind::Skill,
        PageSource::WorkflowExample => SourceKind::WorkflowExample,
    }
}

fn workflow_output(config: &GeneratorConfig) -> String {
    format!(
        "{SKILLS_OUTPUT_DIR}/{}{PAGE_EXTENSION}",
        config.workflow_slug
    )
}

fn write_page(path: &Path, content: &str) -> Result<(), GenerateError> {
    let write_err = |source| GenerateError::Write {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(write_err)?;
    }
    std::fs::write(path, content).map_err(write_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use swarmdoc_storage::MockStorage;

    const MAPPING: &str = r#"{
  "outputDir": "src/content/docs",
  "pages": [
    { "source": "docs/getting-started.md", "output": "getting-started/getting-started.mdx", "sidebarLabel": "Start" },
    { "source": "docs/missing.md", "output": "reference/missing.mdx", "title": "Missing" }
  ]
}"#;

    fn storage() -> MockStorage {
        MockStorage::new()
            .with_file(
                "docs/getting-started.md",
                "# Getting Started\n\nSee [tasks](../skills/task-system/SKILL.md#api) and [readme](../README.md).\n",
            )
            .with_file(
                "skills/task-system/SKILL.md",
                "---\nname: task-system\ndescription: Shared \"task\" lists\n---\n# Task System\n\nBack to [start](../../docs/getting-started.md).\n",
            )
            .with_file(
                "skills/messaging/SKILL.md",
                "No header, see [workflows](../orchestration-patterns/examples/complete-workflows.md).\n",
            )
            .with_file(
                "skills/orchestration-patterns/examples/complete-workflows.md",
                "# Workflow Recipes\n\nUse {team} > solo.\n",
            )
    }

    fn generator(storage: MockStorage) -> Generator {
        Generator::new(
            Arc::new(storage),
            DocsMapping::from_json(MAPPING).unwrap(),
            GeneratorConfig::default(),
        )
        .unwrap()
    }

    fn page<'a>(pages: &'a [GeneratedPage], path: &str) -> &'a str {
        &pages
            .iter()
            .find(|p| p.output_path == path)
            .unwrap()
            .content
    }

    #[test]
    fn test_link_map_is_complete() {
        let generator = generator(storage());
        let keys: Vec<&str> = generator
            .link_map()
            .iter()
            .map(|(id, _)| id.as_str())
            .collect();

        assert_eq!(
            keys,
            vec![
                "docs/getting-started.md",
                "docs/missing.md",
                "skills/messaging/SKILL.md",
                "skills/task-system/SKILL.md",
                "skills/orchestration-patterns/examples/complete-workflows.md",
                "README.md",
            ]
        );
        assert_eq!(
            generator
                .link_map()
                .get(&DocumentIdentifier::new(
                    "skills/orchestration-patterns/examples/complete-workflows.md"
                )),
            Some("/skills/complete-workflows/")
        );
    }

    #[test]
    fn test_render_order_and_skips() {
        let generator = generator(storage());
        let (pages, skipped) = generator.render(GenerateScope::All);

        let paths: Vec<&str> = pages.iter().map(|p| p.output_path.as_str()).collect();
        assert_eq!(
            paths,
            vec![
                "getting-started/getting-started.mdx",
                "skills/messaging.mdx",
                "skills/task-system.mdx",
                "skills/complete-workflows.mdx",
            ]
        );
        assert_eq!(skipped, vec!["docs/missing.md"]);
    }

    #[test]
    fn test_narrative_page_content() {
        let generator = generator(storage());
        let (pages, _) = generator.render(GenerateScope::Docs);

        assert_eq!(
            page(&pages, "getting-started/getting-started.mdx"),
            "---\ntitle: \"Getting Started\"\nsidebar:\n  label: \"Start\"\n---\n\nSee [tasks](/skills/task-system/#api) and [readme](https://github.com/zircote/claude-team-orchestration/blob/main/README.md).\n"
        );
    }

    #[test]
    fn test_skill_page_content() {
        let generator = generator(storage());
        let (pages, skipped) = generator.render(GenerateScope::Skills);

        assert!(skipped.is_empty());
        assert_eq!(
            page(&pages, "skills/task-system.mdx"),
            "---\ntitle: \"Task System\"\ndescription: \"Shared \\\"task\\\" lists\"\n---\n\nBack to [start](/getting-started/getting-started/).\n"
        );
        assert_eq!(
            page(&pages, "skills/messaging.mdx"),
            "---\ntitle: \"Messaging\"\n---\n\nNo header, see [workflows](/skills/complete-workflows/).\n"
        );
    }

    #[test]
    fn test_workflow_example_content() {
        let generator = generator(storage());
        let (pages, _) = generator.render(GenerateScope::Skills);

        assert_eq!(
            page(&pages, "skills/complete-workflows.mdx"),
            "---\ntitle: \"Workflow Recipes\"\ndescription: \"End-to-end orchestration workflow examples.\"\n---\n\nUse \\{team\\} &gt; solo.\n"
        );
    }

    #[test]
    fn test_missing_workflow_example_is_skipped() {
        let storage = storage();
        storage.remove("skills/orchestration-patterns/examples/complete-workflows.md");
        let generator = generator(storage);

        let (_, skipped) = generator.render(GenerateScope::Skills);
        assert_eq!(
            skipped,
            vec!["skills/orchestration-patterns/examples/complete-workflows.md"]
        );
    }

    #[test]
    fn test_unreadable_source_is_skipped() {
        let storage = storage().with_unreadable("skills/broken/SKILL.md");
        let generator = generator(storage);

        assert!(generator.skills().contains(&"broken".to_owned()));
        let (pages, skipped) = generator.render(GenerateScope::Skills);
        assert_eq!(skipped, vec!["skills/broken/SKILL.md"]);
        assert_eq!(pages.len(), 3);
    }

    #[test]
    fn test_scope_docs_still_links_skills() {
        let generator = generator(storage());
        let (pages, _) = generator.render(GenerateScope::Docs);

        assert_eq!(pages.len(), 1);
        assert!(pages[0].content.contains("/skills/task-system/#api"));
    }

    #[test]
    fn test_generate_writes_files() {
        let generator = generator(storage());
        let out = tempfile::tempdir().unwrap();

        let result = generator.generate(GenerateScope::All, out.path()).unwrap();

        assert_eq!(result.generated.len(), 4);
        assert_eq!(result.skipped, vec!["docs/missing.md"]);
        let written =
            std::fs::read_to_string(out.path().join("skills/task-system.mdx")).unwrap();
        let (pages, _) = generator.render(GenerateScope::Skills);
        assert_eq!(written, page(&pages, "skills/task-system.mdx"));
    }

    #[test]
    fn test_generate_write_failure_aborts() {
        let generator = generator(storage());
        let out = tempfile::tempdir().unwrap();
        std::fs::write(out.path().join("skills"), "not a directory").unwrap();

        let err = generator
            .generate(GenerateScope::Skills, out.path())
            .unwrap_err();
        assert!(matches!(err, GenerateError::Write { .. }));
    }

    #[test]
    fn test_load_missing_mapping() {
        let err = Generator::load(
            Arc::new(MockStorage::new()),
            Path::new("/nonexistent/docs-mapping.json"),
            GeneratorConfig::default(),
        )
        .err()
        .unwrap();
        assert!(matches!(err, GenerateError::Mapping(MappingError::Io { .. })));
    }
}
