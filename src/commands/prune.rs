//! Prune command: select scanned matches and delete them.

use std::io::{BufRead, Write};

use super::scan::Survey;
use super::{emit, spinner};
use crate::error::{Result, SweepError};
use crate::prompt::{confirm, select};
use crate::prune::prune as remove_selected;
use crate::scan::{MatchEntry, ScanReport};
use crate::units::format_size;

pub struct Prune<'a> {
    survey: Survey<'a>,
    all: bool,
    dry_run: bool,
}

#[derive(Default)]
pub struct PruneBuilder<'a> {
    survey: Option<Survey<'a>>,
    all: bool,
    dry_run: bool,
}

impl<'a> PruneBuilder<'a> {
    pub fn survey(mut self, survey: Survey<'a>) -> Self {
        self.survey = Some(survey);
        self
    }

    pub fn all(mut self, all: bool) -> Self {
        self.all = all;
        self
    }

    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn build(self) -> Result<Prune<'a>> {
        let survey = self
            .survey
            .ok_or_else(|| SweepError::ConfigError("Scan options are required".to_string()))?;

        Ok(Prune {
            survey,
            all: self.all,
            dry_run: self.dry_run,
        })
    }
}

impl<'a> Prune<'a> {
    pub fn builder<'b>() -> PruneBuilder<'b> {
        PruneBuilder::default()
    }

    /// Execute the prune command.
    ///
    /// A partial scan can still be pruned. Removal failures take precedence
    /// over the walk error when both occur.
    pub fn prune<R: BufRead, W: Write>(&self, input: &mut R, output: &mut W) -> Result<()> {
        let log = self.survey.logger();
        let Some(mut report) = self.survey.survey(input, output)? else {
            return Ok(());
        };

        let walk_error = report.take_error();
        if let Some(err) = &walk_error {
            log.warn(format!("Scan ended early, only partial results are listed: {err}"));
        }

        self.select_and_remove(&report, input, output)
            .and(walk_error.map_or(Ok(()), Err))
    }

    fn select_and_remove<R: BufRead, W: Write>(
        &self,
        report: &ScanReport,
        input: &mut R,
        output: &mut W,
    ) -> Result<()> {
        let log = self.survey.logger();

        if report.is_empty() {
            emit(output, "Nothing to prune.")?;
            return Ok(());
        }

        let indices = if self.all {
            (0..report.len()).collect()
        } else {
            emit(output, "")?;
            select(input, output, report.entries())?
        };

        let selected: Vec<&MatchEntry> = indices
            .iter()
            .filter_map(|&i| report.entries().get(i))
            .collect();
        if selected.is_empty() {
            emit(output, "No directories selected.")?;
            return Ok(());
        }

        let total: u64 = selected.iter().map(|entry| entry.size()).sum();
        if !self.dry_run && !self.survey.yes() {
            let question = format!(
                "Permanently delete {} directories ({})?",
                selected.len(),
                format_size(total)
            );
            if !confirm(input, output, &question)? {
                emit(output, "Pruning cancelled.")?;
                return Ok(());
            }
        }

        let progress = spinner(
            format!("Removing {} directories", selected.len()),
            log.quiet(),
        );
        let outcome = remove_selected(
            selected.iter().copied(),
            self.dry_run,
            log.level(),
            log.quiet(),
        );
        progress.finish_and_clear();

        if outcome.is_dry_run() {
            emit(
                output,
                format!(
                    "Dry run: would prune {} directories and free {}",
                    outcome.removed().len(),
                    format_size(outcome.bytes_freed())
                ),
            )?;
        } else {
            emit(
                output,
                format!(
                    "Pruned {} directories, freed {}",
                    outcome.removed().len(),
                    format_size(outcome.bytes_freed())
                ),
            )?;
        }

        if !outcome.is_complete() {
            for failure in outcome.failures() {
                if let SweepError::PruneFailed { path, source } = failure {
                    emit(
                        output,
                        format!("Failed to remove {}: {source}", path.display()),
                    )?;
                }
            }
            return Err(SweepError::PruneIncomplete {
                failed: outcome.failures().len(),
                attempted: outcome.attempted(),
            });
        }

        Ok(())
    }
}
