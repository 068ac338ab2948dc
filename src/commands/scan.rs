//! Scan command and the shared scan-and-report stage.

use std::io::{BufRead, Write};

use super::{emit, spinner};
use crate::cli::ScanOpts;
use crate::display::{distribution_table, render_largest};
use crate::error::{Result, SweepError};
use crate::logging::Logger;
use crate::prompt::confirm;
use crate::scan::{ScanReport, Scanner};
use crate::units::format_size;

/// Confirms, scans and prints the report for one root.
///
/// Both `scan` and `prune` start with a survey.
#[derive(Debug)]
pub struct Survey<'a> {
    opts: &'a ScanOpts,
    yes: bool,
    verbose: u8,
    quiet: bool,
}

#[derive(Debug, Default)]
pub struct SurveyBuilder<'a> {
    opts: Option<&'a ScanOpts>,
    yes: bool,
    verbose: u8,
    quiet: bool,
}

impl<'a> SurveyBuilder<'a> {
    pub fn opts(mut self, opts: &'a ScanOpts) -> Self {
        self.opts = Some(opts);
        self
    }

    pub fn yes(mut self, yes: bool) -> Self {
        self.yes = yes;
        self
    }

    pub fn verbose(mut self, verbose: u8) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    pub fn build(self) -> Result<Survey<'a>> {
        let opts = self
            .opts
            .ok_or_else(|| SweepError::ConfigError("Scan options are required".to_string()))?;

        Ok(Survey {
            opts,
            yes: self.yes,
            verbose: self.verbose,
            quiet: self.quiet,
        })
    }
}

impl<'a> Survey<'a> {
    pub fn builder<'b>() -> SurveyBuilder<'b> {
        SurveyBuilder::default()
    }

    pub(crate) fn yes(&self) -> bool {
        self.yes
    }

    pub(crate) fn logger(&self) -> Logger {
        Logger::new(self.verbose, self.quiet)
    }

    /// Execute the scan command.
    ///
    /// The report is printed even when the walk stopped early; the walk error
    /// is returned afterwards.
    pub fn scan<R: BufRead, W: Write>(&self, input: &mut R, output: &mut W) -> Result<()> {
        match self.survey(input, output)? {
            Some(mut report) => report.take_error().map_or(Ok(()), Err),
            None => Ok(()),
        }
    }

    /// Ask for confirmation, scan and print the results.
    ///
    /// Returns `None` when the user declines the scan.
    pub fn survey<R: BufRead, W: Write>(
        &self,
        input: &mut R,
        output: &mut W,
    ) -> Result<Option<ScanReport>> {
        let log = self.logger();
        let root = self.opts.get_root();
        let name = self.opts.name();
        let min_size = self.opts.get_min_size()?;

        let scanner = Scanner::builder()
            .match_name(name)
            .max_jobs(self.opts.jobs())
            .follow_symlinks(self.opts.follow_symlinks())
            .verbose(self.verbose)
            .quiet(self.quiet)
            .build()?;

        if !self.yes {
            let question = format!(
                "Scan {} for {name} directories? This can take a while on large trees.",
                root.display()
            );
            if !confirm(input, output, &question)? {
                emit(output, "Scan cancelled.")?;
                return Ok(None);
            }
        }

        log.info(format!("Scanning for {name} directories in {}", root.display()));
        let progress = spinner(format!("Scanning {}", root.display()), self.quiet);
        let mut report = scanner.scan(&root);
        progress.finish_and_clear();

        let hidden = report.retain_min_size(min_size);
        self.print_report(&report, hidden, output)?;

        Ok(Some(report))
    }

    fn print_report<W: Write>(
        &self,
        report: &ScanReport,
        hidden: usize,
        output: &mut W,
    ) -> Result<()> {
        let log = self.logger();
        let name = self.opts.name();

        emit(
            output,
            format!(
                "Found {} {name} directories in {:.2?}",
                report.len(),
                report.elapsed()
            ),
        )?;
        emit(
            output,
            format!("Total space used: {}", format_size(report.total_size())),
        )?;

        if hidden > 0 {
            log.info(format!(
                "{hidden} directories smaller than {} are not shown",
                format_size(self.opts.get_min_size()?)
            ));
        }

        if !report.failures().is_empty() {
            log.warn(format!(
                "{} {name} directories could not be measured and are not listed",
                report.failures().len()
            ));
        }

        if report.skipped() > 0 {
            log.verbose(
                1,
                format!("{} unreadable entries were skipped", report.skipped()),
            );
        }

        if report.is_empty() {
            return Ok(());
        }

        emit(output, "")?;
        emit(output, format!("Largest {name} directories:"))?;
        write!(
            output,
            "{}",
            render_largest(report.root(), report.entries(), self.opts.top())
        )
        .map_err(SweepError::Terminal)?;

        emit(output, "")?;
        emit(output, "Size distribution:")?;
        emit(output, distribution_table(report.entries()))?;

        Ok(())
    }
}
