#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! The fixed list of data-shape rules for the query lab.
//!
//! Every rule looks at the whole collection and is independent of the others.
//! Numeric rules only consider fields that actually hold numbers.

use std::collections::HashSet;

use super::results::RuleResult;
use crate::{
    constants::{
        HIGH_SALARY, JUNIOR_AGE, LOW_SALARY, MID_SALARY_RANGE, MIN_DEPARTMENTS, MIN_DOCUMENTS,
        REQUIRED_DEPARTMENT, REQUIRED_NAME, SENIOR_AGE,
    },
    types::{Field, Record},
};

/// A named predicate over the full record sequence.
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    /// Label printed in the report.
    requirement: &'static str,
    /// Evaluates the rule, given its label.
    check:       fn(&str, &[Record]) -> RuleResult,
}

impl Rule {
    /// Returns the label printed in the report.
    pub fn requirement(&self) -> &'static str {
        self.requirement
    }

    /// Evaluates the rule against every record.
    pub fn evaluate(&self, records: &[Record]) -> RuleResult {
        (self.check)(self.requirement, records)
    }
}

/// Exercise 1: the collection holds at least five documents.
pub const VOLUME: Rule = Rule {
    requirement: "Exercise 1",
    check:       volume,
};

/// Every document carries a well-typed `name`, `department`, `salary` and
/// `age`.
pub const SCHEMA: Rule = Rule {
    requirement: "Schema Check",
    check:       schema,
};

/// Exercise 2: an `IT` department and an employee named `Rahul` exist.
pub const SPECIFIC_VALUES: Rule = Rule {
    requirement: "Exercise 2 Data",
    check:       specific_values,
};

/// Exercise 3: at least two distinct departments exist.
pub const DISTINCT_DEPARTMENTS: Rule = Rule {
    requirement: "Exercise 3 Data",
    check:       distinct_departments,
};

/// Exercise 4: some salary is above 50k and some below 30k.
pub const SALARY_EXTREMES: Rule = Rule {
    requirement: "Exercise 4 Data",
    check:       salary_extremes,
};

/// Exercise 5: some age is at least 30 and some at most 25.
pub const AGE_RANGE: Rule = Rule {
    requirement: "Exercise 5 Data",
    check:       age_range,
};

/// Exercise 6: some salary lies between 40k and 80k inclusive.
pub const SALARY_MID_RANGE: Rule = Rule {
    requirement: "Exercise 6 Data",
    check:       salary_mid_range,
};

/// All rules, in report order.
pub const RULES: [Rule; 7] = [
    VOLUME,
    SCHEMA,
    SPECIFIC_VALUES,
    DISTINCT_DEPARTMENTS,
    SALARY_EXTREMES,
    AGE_RANGE,
    SALARY_MID_RANGE,
];

/// True if some record's `field` is a number satisfying `pred`.
fn any_number(
    records: &[Record],
    field: impl Fn(&Record) -> &Field,
    pred: impl Fn(f64) -> bool,
) -> bool {
    records
        .iter()
        .filter_map(|r| field(r).as_number())
        .any(pred)
}

/// True if some record's `field` is exactly the text `expected`.
fn any_text(records: &[Record], field: impl Fn(&Record) -> &Field, expected: &str) -> bool {
    records
        .iter()
        .any(|r| field(r).as_text() == Some(expected))
}

/// See [`VOLUME`].
fn volume(requirement: &str, records: &[Record]) -> RuleResult {
    RuleResult::check(requirement, records.len() >= MIN_DOCUMENTS, "Data setup verified", || {
        format!("Expected {MIN_DOCUMENTS}+ documents, found {}", records.len())
    })
}

/// See [`SCHEMA`].
fn schema(requirement: &str, records: &[Record]) -> RuleResult {
    if records.is_empty() {
        return RuleResult::fail(requirement, "No data found");
    }

    let offender = records
        .iter()
        .enumerate()
        .find_map(|(index, record)| record.schema_violation().map(|v| (index, v)));

    match offender {
        None => RuleResult::pass(requirement, "All fields valid"),
        Some((index, (key, field))) => RuleResult::fail(
            requirement,
            format!(
                "Missing or invalid types for name, department, salary, or age; document #{} has \
                 `{key}` as {}",
                index + 1,
                field.kind()
            ),
        ),
    }
}

/// See [`SPECIFIC_VALUES`].
fn specific_values(requirement: &str, records: &[Record]) -> RuleResult {
    let has_it = any_text(records, |r| &r.department, REQUIRED_DEPARTMENT);
    let has_rahul = any_text(records, |r| &r.name, REQUIRED_NAME);

    RuleResult::check(
        requirement,
        has_it && has_rahul,
        &format!("Found '{REQUIRED_DEPARTMENT}' dept and '{REQUIRED_NAME}'"),
        || {
            format!(
                "Missing '{REQUIRED_DEPARTMENT}' dept or '{REQUIRED_NAME}' in data; \
                 {REQUIRED_DEPARTMENT}: {has_it}, {REQUIRED_NAME}: {has_rahul}"
            )
        },
    )
}

/// See [`DISTINCT_DEPARTMENTS`].
///
/// Every department value counts, whatever its type; a missing department
/// is one more value.
fn distinct_departments(requirement: &str, records: &[Record]) -> RuleResult {
    let seen: HashSet<String> = records
        .iter()
        .map(|r| r.department.distinct_key())
        .collect();

    RuleResult::check(
        requirement,
        seen.len() >= MIN_DEPARTMENTS,
        "Multiple departments found",
        || {
            format!(
                "Only {} distinct departments found, expected {MIN_DEPARTMENTS}+",
                seen.len()
            )
        },
    )
}

/// See [`SALARY_EXTREMES`].
fn salary_extremes(requirement: &str, records: &[Record]) -> RuleResult {
    let has_high = any_number(records, |r| &r.salary, |s| s > HIGH_SALARY);
    let has_low = any_number(records, |r| &r.salary, |s| s < LOW_SALARY);

    RuleResult::check(
        requirement,
        has_high && has_low,
        "Data supports Salary > 50k and < 30k queries",
        || format!("Missing salaries > 50k or < 30k; > 50k: {has_high}, < 30k: {has_low}"),
    )
}

/// See [`AGE_RANGE`].
fn age_range(requirement: &str, records: &[Record]) -> RuleResult {
    let has_senior = any_number(records, |r| &r.age, |a| a >= SENIOR_AGE);
    let has_junior = any_number(records, |r| &r.age, |a| a <= JUNIOR_AGE);

    RuleResult::check(
        requirement,
        has_senior && has_junior,
        "Data supports Age >= 30 and <= 25 queries",
        || format!("Missing ages >= 30 or <= 25; >= 30: {has_senior}, <= 25: {has_junior}"),
    )
}

/// See [`SALARY_MID_RANGE`].
fn salary_mid_range(requirement: &str, records: &[Record]) -> RuleResult {
    let (low, high) = MID_SALARY_RANGE;
    let has_mid = any_number(records, |r| &r.salary, |s| (low..=high).contains(&s));

    RuleResult::check(requirement, has_mid, "Data supports Salary 40k-80k query", || {
        "No salaries between 40k and 80k".to_string()
    })
}
