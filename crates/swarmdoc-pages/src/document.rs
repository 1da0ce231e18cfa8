//! Source documents and generation outputs.

use std::fmt;

use crate::identifier::DocumentIdentifier;

/// Convention a source document follows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SourceKind {
    /// Narrative doc listed in the declarative mapping.
    Narrative,
    /// Skill descriptor with an embedded `name`/`description` header.
    Skill,
    /// The standalone workflow example published next to the skills.
    WorkflowExample,
}

impl SourceKind {
    /// Short lowercase name for logs.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Narrative => "narrative",
            Self::Skill => "skill",
            Self::WorkflowExample => "workflow-example",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A source document as read from storage.
#[derive(Clone, Debug)]
pub struct SourceDocument {
    /// Corpus-relative identifier.
    pub id: DocumentIdentifier,
    /// Metadata convention.
    pub kind: SourceKind,
    /// Raw UTF-8 text.
    pub text: String,
}

/// A rendered page ready to be written.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratedPage {
    /// Path relative to the output directory.
    pub output_path: String,
    /// Full page content.
    pub content: String,
}

/// Outcome of a generation run, in generation order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GenerationResult {
    /// Output paths written, relative to the output directory.
    pub generated: Vec<String>,
    /// Source identifiers that could not be read.
    pub skipped: Vec<String>,
}

impl GenerationResult {
    /// Append another result.
    pub fn extend(&mut self, other: Self) {
        self.generated.extend(other.generated);
        self.skipped.extend(other.skipped);
    }

    /// Whether every source was generated.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }
}
