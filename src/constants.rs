#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

/// Application name reported to the database server.
pub const APP_NAME: &str = "docgrade";

/// Connection string used when neither the CLI nor the environment provide one.
pub const DEFAULT_MONGO_URL: &str = "mongodb://localhost:27017";

/// Database the lab asks students to create.
pub const DEFAULT_DB: &str = "companyDB";

/// Collection the lab asks students to populate.
pub const DEFAULT_COLLECTION: &str = "employees";

/// Seconds to wait for server selection and connection before giving up.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Points awarded by every passing rule.
pub const POINTS_PER_RULE: u32 = 10;

/// Number of rules evaluated for every submission.
pub const RULE_COUNT: u32 = 7;

/// Highest attainable score.
pub const MAX_SCORE: u32 = POINTS_PER_RULE * RULE_COUNT;

/// Minimum number of documents the collection must hold.
pub const MIN_DOCUMENTS: usize = 5;

/// Department that must be present for the simple find exercise.
pub const REQUIRED_DEPARTMENT: &str = "IT";

/// Employee name that must be present for the simple find exercise.
pub const REQUIRED_NAME: &str = "Rahul";

/// Minimum number of distinct departments for the distinct exercise.
pub const MIN_DEPARTMENTS: usize = 2;

/// A salary strictly above this supports the `$gt` query.
pub const HIGH_SALARY: f64 = 50_000.0;

/// A salary strictly below this supports the `$lt` query.
pub const LOW_SALARY: f64 = 30_000.0;

/// An age at or above this supports the `$gte` query.
pub const SENIOR_AGE: f64 = 30.0;

/// An age at or below this supports the `$lte` query.
pub const JUNIOR_AGE: f64 = 25.0;

/// Inclusive salary window for the range query exercise.
pub const MID_SALARY_RANGE: (f64, f64) = (40_000.0, 80_000.0);

/// First line of the printed report.
pub const REPORT_HEADER: &str = "========== MongoDB Query Lab Auto-Report ==========";

/// Separator printed between the rule lines and the total.
pub const REPORT_SEPARATOR: &str = "---------------------------------------------------";

/// Prefix of the single line printed when the collection could not be read.
pub const CRITICAL_PREFIX: &str = "CRITICAL: Failed to connect or query database.";
