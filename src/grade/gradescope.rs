#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::{path::Path, str::FromStr};

use anyhow::{Context, Result};
use serde::Serialize;
use typed_builder::TypedBuilder;

use super::{report::Report, results::RuleResult};
use crate::constants::CRITICAL_PREFIX;

/// When students get to see the autograder results.
#[derive(Serialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum GradescopeVisibility {
    /// Never shown to students.
    Hidden,
    /// Shown once the assignment's due date has passed.
    AfterDueDate,
    /// Shown once grades are published.
    AfterPublished,
    /// Shown as soon as grading finishes.
    #[default]
    Visible,
}

impl FromStr for GradescopeVisibility {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "hidden" => Ok(Self::Hidden),
            "after_due_date" => Ok(Self::AfterDueDate),
            "after_published" => Ok(Self::AfterPublished),
            "visible" => Ok(Self::Visible),
            other => Err(format!(
                "unknown visibility `{other}`, expected one of hidden, after_due_date, \
                 after_published, visible"
            )),
        }
    }
}

/// Pass/fail marker shown next to each test case.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum GradescopeStatus {
    /// The rule held.
    Passed,
    /// The rule did not hold.
    Failed,
}

/// Top level of a Gradescope `results.json`.
#[derive(Serialize, Debug, TypedBuilder)]
#[builder(field_defaults(default, setter(into)))]
#[builder(doc)]
pub struct GradescopeSubmission {
    /// Overall score; Gradescope would otherwise sum the test cases.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,

    /// Text shown above the test cases. Carries the critical message when the
    /// collection could not be read.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,

    /// Visibility of the whole submission.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visibility: Option<GradescopeVisibility>,

    /// Visibility of the autograder's stdout.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stdout_visibility: Option<GradescopeVisibility>,

    /// One entry per rule, in report order.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tests: Option<Vec<GradescopeTestCase>>,
}

/// One rule's entry in `results.json`.
#[derive(Serialize, Debug, TypedBuilder)]
#[builder(field_defaults(default, setter(into)))]
#[builder(doc)]
pub struct GradescopeTestCase {
    /// Points awarded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,

    /// Points the rule is worth.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_score: Option<f64>,

    /// Pass or fail.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<GradescopeStatus>,

    /// Requirement label.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// 1-based position in the report.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,

    /// The rule's message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
}

impl From<&RuleResult> for GradescopeTestCase {
    fn from(result: &RuleResult) -> Self {
        GradescopeTestCase::builder()
            .name(Some(result.requirement().to_string()))
            .score(Some(f64::from(result.points())))
            .max_score(Some(f64::from(result.out_of())))
            .status(Some(if result.passed() {
                GradescopeStatus::Passed
            } else {
                GradescopeStatus::Failed
            }))
            .output(Some(result.message().to_string()))
            .build()
    }
}

impl GradescopeSubmission {
    /// Builds the submission for `report`, shown to students per `visibility`.
    pub fn from_report(report: &Report, visibility: GradescopeVisibility) -> Self {
        let tests: Vec<GradescopeTestCase> = report
            .results()
            .iter()
            .enumerate()
            .map(|(i, result)| GradescopeTestCase {
                number: Some((i + 1).to_string()),
                ..GradescopeTestCase::from(result)
            })
            .collect();

        GradescopeSubmission::builder()
            .score(Some(f64::from(report.score())))
            .output(
                report
                    .critical_message()
                    .map(|message| format!("{CRITICAL_PREFIX} {message}")),
            )
            .visibility(Some(visibility))
            .stdout_visibility(Some(visibility))
            .tests(Some(tests))
            .build()
    }
}

/// Writes `report` as a Gradescope `results.json` to `path`.
pub fn write_results(
    report: &Report,
    path: &Path,
    visibility: GradescopeVisibility,
) -> Result<()> {
    let submission = GradescopeSubmission::from_report(report, visibility);
    let json = serde_json::to_string_pretty(&submission)
        .context("Failed to serialize Gradescope submission")?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Could not create {}", parent.display()))?;
    }
    std::fs::write(path, json).with_context(|| format!("Could not write {}", path.display()))?;

    tracing::info!("Wrote Gradescope results to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn visibility_parses_gradescope_spellings() {
        assert_eq!("hidden".parse(), Ok(GradescopeVisibility::Hidden));
        assert_eq!("after-due-date".parse(), Ok(GradescopeVisibility::AfterDueDate));
        assert_eq!("After_Published".parse(), Ok(GradescopeVisibility::AfterPublished));
        assert_eq!(" visible ".parse(), Ok(GradescopeVisibility::Visible));
        assert!("later".parse::<GradescopeVisibility>().is_err());
    }

    #[test]
    fn critical_report_becomes_zero_score_output() {
        let report = Report::critical("connection refused");
        let submission = GradescopeSubmission::from_report(&report, GradescopeVisibility::Hidden);
        let json = serde_json::to_value(submission).expect("serialize");

        assert_eq!(json["score"], 0.0);
        assert_eq!(
            json["output"],
            "CRITICAL: Failed to connect or query database. connection refused"
        );
        assert_eq!(json["visibility"], "hidden");
        assert_eq!(json["tests"], serde_json::json!([]));
    }

    #[test]
    fn each_rule_becomes_a_numbered_test_case() {
        let report = Report::from_results(vec![
            RuleResult::pass("Exercise 1", "Data setup verified"),
            RuleResult::fail("Schema Check", "No data found"),
        ]);
        let json = serde_json::to_value(GradescopeSubmission::from_report(
            &report,
            GradescopeVisibility::default(),
        ))
        .expect("serialize");

        assert_eq!(json["score"], 10.0);
        assert!(json.get("output").is_none());
        assert_eq!(json["visibility"], "visible");
        assert_eq!(json["tests"][1]["number"], "2");
        assert_eq!(json["tests"][1]["status"], "failed");
        assert_eq!(json["tests"][1]["score"], 0.0);
        assert_eq!(json["tests"][1]["output"], "No data found");
    }
}
