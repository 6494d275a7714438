#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::{fmt, process::ExitCode};

use serde::{Deserialize, Serialize};
use tabled::{
    Table,
    settings::{Alignment, Modify, Panel, Style, Width, object::Rows},
};

use super::results::RuleResult;
use crate::constants::{CRITICAL_PREFIX, MAX_SCORE, REPORT_HEADER, REPORT_SEPARATOR};

/// Everything one grading run produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    /// Rule outcomes in evaluation order. Empty when `critical` is set.
    results:  Vec<RuleResult>,
    /// Why the collection could not be read, if it could not.
    critical: Option<String>,
}

impl Report {
    /// A report over evaluated rules.
    pub fn from_results(results: Vec<RuleResult>) -> Self {
        Self {
            results,
            critical: None,
        }
    }

    /// A report for a run where the data could not be fetched. No rule is
    /// evaluated and the score is zero.
    pub fn critical(message: impl Into<String>) -> Self {
        Self {
            results:  Vec::new(),
            critical: Some(message.into()),
        }
    }

    /// Returns the rule outcomes.
    pub fn results(&self) -> &[RuleResult] {
        &self.results
    }

    /// Returns the fetch failure, if any.
    pub fn critical_message(&self) -> Option<&str> {
        self.critical.as_deref()
    }

    /// Sum of points awarded by every rule.
    pub fn score(&self) -> u32 {
        self.results.iter().map(RuleResult::points).sum()
    }

    /// Highest attainable score.
    pub fn max_score(&self) -> u32 {
        MAX_SCORE
    }

    /// True when every rule passed.
    pub fn all_passed(&self) -> bool {
        self.score() == MAX_SCORE
    }

    /// `0` when every rule passed, `1` otherwise.
    pub fn exit_code(&self) -> ExitCode {
        if self.all_passed() {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        }
    }

    /// The body lines of the report: one per rule, or the single critical
    /// line.
    pub fn lines(&self) -> Vec<String> {
        match &self.critical {
            Some(message) => vec![format!("{CRITICAL_PREFIX} {message}")],
            None => self.results.iter().map(ToString::to_string).collect(),
        }
    }

    /// The overview table shown alongside the plain report.
    pub fn overview_table(&self) -> String {
        let mut table = Table::new(&self.results);
        table
            .with(Panel::header("Grading Overview"))
            .with(Panel::footer(format!("Total: {}/{}", self.score(), self.max_score())))
            .with(Modify::new(Rows::new(1..)).with(Width::wrap(40).keep_words(true)))
            .with(
                Modify::new(Rows::first())
                    .with(Alignment::center())
                    .with(Alignment::center_vertical()),
            )
            .with(
                Modify::new(Rows::last())
                    .with(Alignment::center())
                    .with(Alignment::center_vertical()),
            )
            .with(Style::modern());
        table.to_string()
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{REPORT_HEADER}")?;
        for line in self.lines() {
            writeln!(f, "{line}")?;
        }
        writeln!(f, "{REPORT_SEPARATOR}")?;
        write!(f, "TOTAL SCORE: {} / {}", self.score(), self.max_score())
    }
}
