//! `swarmdoc check` command implementation.

use clap::Args;
use swarmdoc_pages::{FreshnessOracle, FreshnessReport};

use super::{CorpusArgs, Status};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    #[command(flatten)]
    pub corpus: CorpusArgs,
}

impl CheckArgs {
    /// Execute the check command.
    ///
    /// Succeeds only when nothing is stale, missing or skipped.
    pub(crate) fn execute(self) -> Result<Status, CliError> {
        let output = Output::new();
        let corpus = self.corpus.load()?;

        output.info("Generating to temp directory...");
        let report = FreshnessOracle::new(&corpus.generator).check(&corpus.published_dir)?;
        output.info(&format!(
            "Compared {} generated files against {}\n",
            report.checked.len(),
            corpus.published_dir.display()
        ));

        report_to(&report, &output);
        Ok(Status::from_passed(report.passed()))
    }
}

fn report_to(report: &FreshnessReport, output: &Output) {
    if report.passed() {
        output.success("All generated content is up-to-date.");
        return;
    }

    output.path_list("STALE files (content differs from source):", &report.stale);
    output.path_list("MISSING files (not yet generated):", &report.missing);
    output.path_list("SKIPPED sources (not found):", &report.skipped);
    output.warning("\nRun \"swarmdoc generate\" to regenerate.");
}
