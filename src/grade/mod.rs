#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

/// Gradescope integration utilities.
pub mod gradescope;
/// The report built from rule outcomes.
pub mod report;
/// Shared rule result type.
pub mod results;
/// The fixed rule list.
pub mod rules;

pub use gradescope::{
    GradescopeStatus, GradescopeSubmission, GradescopeTestCase, GradescopeVisibility,
    write_results,
};
pub use report::Report;
pub use results::RuleResult;
pub use rules::{RULES, Rule};

use crate::{store::RecordSource, types::Record};

/// Runs every rule over `records`, in order.
pub fn evaluate(records: &[Record]) -> Report {
    let results = RULES
        .iter()
        .map(|rule| {
            let result = rule.evaluate(records);
            tracing::debug!("{}: {}", rule.requirement(), result.status());
            result
        })
        .collect();

    Report::from_results(results)
}

/// Fetches the collection from `source` and grades it.
///
/// A fetch failure is not an error here: it becomes a report with a single
/// critical message and a score of zero.
pub async fn grade<S: RecordSource>(source: &S) -> Report {
    tracing::info!("Reading records from {}", source.describe());

    match source.fetch_all().await {
        Ok(records) => {
            tracing::info!("Fetched {} records", records.len());
            evaluate(&records)
        }
        Err(e) => {
            tracing::error!("{e}");
            Report::critical(e.to_string())
        }
    }
}
