#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::{borrow::Cow, fmt::Display};

use serde::{Deserialize, Serialize};
use tabled::Tabled;

use crate::constants::POINTS_PER_RULE;

/// The outcome of evaluating one rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleResult {
    /// * `requirement`: label the report prints for this rule
    pub(crate) requirement: String,
    /// * `passed`: whether the rule held
    pub(crate) passed:      bool,
    /// * `message`: what was verified, or what is missing
    pub(crate) message:     String,
    /// * `points`: points awarded, either zero or `out_of`
    pub(crate) points:      u32,
    /// * `out_of`: points the rule is worth
    pub(crate) out_of:      u32,
}

impl RuleResult {
    /// A passing result worth the full points.
    pub fn pass(requirement: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            requirement: requirement.into(),
            passed:      true,
            message:     message.into(),
            points:      POINTS_PER_RULE,
            out_of:      POINTS_PER_RULE,
        }
    }

    /// A failing result worth nothing.
    pub fn fail(requirement: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            requirement: requirement.into(),
            passed:      false,
            message:     message.into(),
            points:      0,
            out_of:      POINTS_PER_RULE,
        }
    }

    /// Passes with `pass_message` when `passed`, else fails with the message
    /// built by `fail_message`.
    pub fn check(
        requirement: &str,
        passed: bool,
        pass_message: &str,
        fail_message: impl FnOnce() -> String,
    ) -> Self {
        if passed {
            Self::pass(requirement, pass_message)
        } else {
            Self::fail(requirement, fail_message())
        }
    }

    /// Returns the requirement label.
    pub fn requirement(&self) -> &str {
        &self.requirement
    }

    /// Returns whether the rule held.
    pub fn passed(&self) -> bool {
        self.passed
    }

    /// Returns the diagnostic message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the points awarded.
    pub fn points(&self) -> u32 {
        self.points
    }

    /// Returns the points the rule is worth.
    pub fn out_of(&self) -> u32 {
        self.out_of
    }

    /// `PASS` or `FAIL`.
    pub fn status(&self) -> &'static str {
        if self.passed { "PASS" } else { "FAIL" }
    }
}

impl Display for RuleResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {} ({})", self.requirement, self.status(), self.message)
    }
}

impl Tabled for RuleResult {
    const LENGTH: usize = 4;

    fn fields(&self) -> Vec<Cow<'_, str>> {
        vec![
            Cow::Borrowed(self.requirement.as_str()),
            Cow::Borrowed(self.status()),
            Cow::Owned(format!("{}/{}", self.points, self.out_of)),
            Cow::Borrowed(self.message.as_str()),
        ]
    }

    fn headers() -> Vec<Cow<'static, str>> {
        vec![
            Cow::Borrowed("Requirement"),
            Cow::Borrowed("Status"),
            Cow::Borrowed("Points"),
            Cow::Borrowed("Reason"),
        ]
    }
}
