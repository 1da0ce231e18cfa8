//! `swarmdoc generate` command implementation.

use std::path::Path;

use clap::{Args, ValueEnum};
use swarmdoc_pages::{GenerateScope, GenerationResult, Generator};

use super::{CorpusArgs, Status};
use crate::error::CliError;
use crate::output::Output;

/// Page family selectable with `--only`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum PageFamily {
    /// Narrative docs from the mapping.
    Docs,
    /// Skill descriptors and the workflow example.
    Skills,
}

/// Arguments for the generate command.
#[derive(Args)]
pub(crate) struct GenerateArgs {
    #[command(flatten)]
    pub corpus: CorpusArgs,

    /// Generate only one page family.
    #[arg(long, value_enum)]
    only: Option<PageFamily>,
}

impl GenerateArgs {
    /// Execute the generate command.
    ///
    /// Succeeds only when no source was skipped.
    pub(crate) fn execute(self) -> Result<Status, CliError> {
        let output = Output::new();
        let corpus = self.corpus.load()?;

        output.info(&format!("Output: {}", corpus.published_dir.display()));

        let steps = steps(self.only);
        let mut total = GenerationResult::default();
        for (i, (label, scope)) in steps.iter().enumerate() {
            output.step(i + 1, steps.len(), label);
            let result = run_step(&corpus.generator, *scope, &corpus.published_dir, &output)?;
            total.extend(result);
        }

        output.info(&format!(
            "\nDone: {} generated, {} skipped",
            total.generated.len(),
            total.skipped.len()
        ));

        Ok(Status::from_passed(total.is_complete()))
    }
}

/// Labeled scopes to run, in order.
fn steps(only: Option<PageFamily>) -> Vec<(&'static str, GenerateScope)> {
    let docs = ("Docs", GenerateScope::Docs);
    let skills = ("Skills", GenerateScope::Skills);
    match only {
        Some(PageFamily::Docs) => vec![docs],
        Some(PageFamily::Skills) => vec![skills],
        None => vec![docs, skills],
    }
}

fn run_step(
    generator: &Generator,
    scope: GenerateScope,
    out_dir: &Path,
    output: &Output,
) -> Result<GenerationResult, CliError> {
    let result = generator.generate(scope, out_dir)?;
    for path in &result.generated {
        output.generated(path);
    }
    for source in &result.skipped {
        output.skipped(source);
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::commands::tests::write;
    use clap::Parser;
    use pretty_assertions::assert_eq;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        args: GenerateArgs,
    }

    fn corpus(root: &Path) {
        write(root, "swarmdoc.toml", "");
        write(
            root,
            "site/scripts/docs-mapping.json",
            r#"{"outputDir": "src/content/docs", "pages": [{"source": "docs/a.md", "output": "a.mdx"}]}"#,
        );
        write(root, "docs/a.md", "# A\n\nSee [b](../skills/b/SKILL.md).\n");
        write(root, "skills/b/SKILL.md", "---\nname: b\n---\nB\n");
        write(
            root,
            "skills/orchestration-patterns/examples/complete-workflows.md",
            "# Workflows\n",
        );
    }

    fn args(root: &Path, extra: &[&str]) -> GenerateArgs {
        let config = root.join("swarmdoc.toml");
        let mut argv = vec!["test", "--config", config.to_str().unwrap()];
        argv.extend_from_slice(extra);
        TestCli::parse_from(argv).args
    }

    #[test]
    fn test_steps() {
        assert_eq!(
            steps(None),
            vec![("Docs", GenerateScope::Docs), ("Skills", GenerateScope::Skills)]
        );
        assert_eq!(steps(Some(PageFamily::Skills)), vec![("Skills", GenerateScope::Skills)]);
    }

    #[test]
    fn test_parse_only() {
        let temp_dir = tempfile::tempdir().unwrap();
        assert_eq!(args(temp_dir.path(), &["--only", "docs"]).only, Some(PageFamily::Docs));
        assert_eq!(args(temp_dir.path(), &[]).only, None);
    }

    #[test]
    fn test_execute_writes_pages() {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path();
        corpus(root);

        let code = args(root, &[]).execute().unwrap();

        assert_eq!(code, Status::Passed);
        let published = root.join("site/src/content/docs");
        assert_eq!(
            fs::read_to_string(published.join("a.mdx")).unwrap(),
            "---\ntitle: \"A\"\n---\n\nSee [b](/skills/b/).\n"
        );
        assert!(published.join("skills/b.mdx").exists());
        assert!(published.join("skills/complete-workflows.mdx").exists());
    }

    #[test]
    fn test_execute_only_skills() {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path();
        corpus(root);

        args(root, &["--only", "skills"]).execute().unwrap();

        let published = root.join("site/src/content/docs");
        assert!(!published.join("a.mdx").exists());
        assert!(published.join("skills/b.mdx").exists());
    }

    #[test]
    fn test_execute_fails_when_source_skipped() {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path();
        corpus(root);
        fs::remove_file(root.join("docs/a.md")).unwrap();

        let code = args(root, &[]).execute().unwrap();

        assert_eq!(code, Status::Failed);
    }
}
