//! CLI command implementations.

pub(crate) mod check;
pub(crate) mod generate;

pub(crate) use check::CheckArgs;
pub(crate) use generate::GenerateArgs;

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Args;
use swarmdoc_config::{CliSettings, Config};
use swarmdoc_pages::{Generator, GeneratorConfig};
use swarmdoc_storage::{FsStorage, Storage};

use crate::error::CliError;

/// Whether a command met its success criteria.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Status {
    Passed,
    Failed,
}

impl Status {
    fn from_passed(passed: bool) -> Self {
        if passed { Self::Passed } else { Self::Failed }
    }
}

impl From<Status> for ExitCode {
    fn from(status: Status) -> Self {
        match status {
            Status::Passed => ExitCode::SUCCESS,
            Status::Failed => ExitCode::FAILURE,
        }
    }
}

/// Arguments locating the corpus, shared by every command.
#[derive(Args)]
pub(crate) struct CorpusArgs {
    /// Path to configuration file (default: auto-discover swarmdoc.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Corpus root that source paths are relative to (overrides config).
    #[arg(short, long)]
    root: Option<PathBuf>,

    /// Published pages directory (overrides config and mapping outputDir).
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Declarative docs mapping file (overrides config).
    #[arg(short, long)]
    mapping: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

/// A loaded corpus ready for generation.
pub(crate) struct Corpus {
    pub generator: Generator,
    pub published_dir: PathBuf,
}

impl CorpusArgs {
    /// Load config and mapping, and build the generator.
    pub(crate) fn load(&self) -> Result<Corpus, CliError> {
        let cli_settings = CliSettings {
            root: self.root.clone(),
            output_dir: self.output_dir.clone(),
            mapping: self.mapping.clone(),
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        let storage = FsStorage::new(config.paths.root.clone());
        let root = storage.root().to_path_buf();
        let storage: Arc<dyn Storage> = Arc::new(storage);
        let generator = Generator::load(storage, &config.paths.mapping, generator_config(&config))?;
        let published_dir = config
            .paths
            .published_dir(&generator.mapping().output_dir);

        tracing::info!(
            root = %root.display(),
            mapping = %config.paths.mapping.display(),
            published = %published_dir.display(),
            "Loaded corpus"
        );

        Ok(Corpus {
            generator,
            published_dir,
        })
    }
}

fn generator_config(config: &Config) -> GeneratorConfig {
    GeneratorConfig {
        skills_dir: config.skills.dir.clone(),
        descriptor: config.skills.descriptor.clone(),
        workflow_source: config.workflow_example.source.clone(),
        workflow_slug: config.workflow_example.slug.clone(),
        workflow_title: config.workflow_example.title.clone(),
        workflow_description: config.workflow_example.description.clone(),
        readme: config.links.readme.clone(),
        readme_url: config.links.readme_url.clone(),
    }
}
