#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! # docgrade
//!
//! Grades the MongoDB query lab: checks that `companyDB.employees` holds data
//! every exercise's query can run against, prints a report, and exits with `0`
//! only on a full score.

use std::{path::PathBuf, process::ExitCode};

use anyhow::Result;
use bpaf::*;
use docgrade::{
    GraderConfig, JsonFileSource, MongoSource, Report,
    grade::{GradescopeVisibility, grade, write_results},
};
use dotenvy::dotenv;
use tracing::{Level, metadata::LevelFilter};
use tracing_subscriber::{fmt, prelude::*, util::SubscriberInitExt};

/// Parsed command line.
#[derive(Debug, Clone)]
struct Options {
    /// Connection string override.
    uri:        Option<String>,
    /// Database name override.
    db:         Option<String>,
    /// Collection name override.
    collection: Option<String>,
    /// Timeout override, in seconds.
    timeout:    Option<u64>,
    /// Grade an export file instead of a live database.
    from_json:  Option<PathBuf>,
    /// Print the overview table to stderr.
    table:      bool,
    /// Where to write Gradescope results, if anywhere.
    gradescope: Option<PathBuf>,
    /// When students see the Gradescope results.
    visibility: GradescopeVisibility,
    /// Log at debug level.
    verbose:    bool,
}

/// Parse the command line arguments and return an `Options` struct
fn options() -> Options {
    let uri = long("uri")
        .short('u')
        .help("MongoDB connection string [env: DOCGRADE_MONGO_URL]")
        .argument::<String>("URI")
        .optional();
    let db = long("db")
        .short('d')
        .help("Database to inspect [env: DOCGRADE_DB]")
        .argument::<String>("NAME")
        .optional();
    let collection = long("collection")
        .short('c')
        .help("Collection to grade [env: DOCGRADE_COLLECTION]")
        .argument::<String>("NAME")
        .optional();
    let timeout = long("timeout")
        .short('t')
        .help("Seconds to wait for the server [env: DOCGRADE_TIMEOUT_SECS]")
        .argument::<u64>("SECS")
        .optional();
    let from_json = long("from-json")
        .help("Grade a mongoexport JSON file instead of a live database")
        .argument::<PathBuf>("FILE")
        .optional();
    let table = long("table")
        .help("Print a grading overview table to stderr")
        .switch();
    let gradescope = long("gradescope")
        .help("Write Gradescope results.json to this path")
        .argument::<PathBuf>("FILE")
        .optional();
    let visibility = long("visibility")
        .help("Gradescope visibility: hidden, after_due_date, after_published or visible")
        .argument::<GradescopeVisibility>("WHEN")
        .fallback(GradescopeVisibility::Visible);
    let verbose = long("verbose")
        .short('v')
        .help("Log every rule outcome")
        .switch();

    construct!(Options {
        uri,
        db,
        collection,
        timeout,
        from_json,
        table,
        gradescope,
        visibility,
        verbose
    })
    .to_options()
    .descr("Autograder for the MongoDB query lab")
    .version(env!("CARGO_PKG_VERSION"))
    .run()
}

/// Grades, prints the report, and writes any requested extra output.
async fn run(opts: Options) -> Result<Report> {
    let report = match &opts.from_json {
        Some(path) => grade(&JsonFileSource::new(path)).await,
        None => {
            let config = GraderConfig::from_env().with_overrides(
                opts.uri,
                opts.db,
                opts.collection,
                opts.timeout,
            );
            grade(&MongoSource::new(&config)).await
        }
    };

    println!("{report}");

    if opts.table {
        eprintln!("{}", report.overview_table());
    }
    if let Some(path) = &opts.gradescope {
        write_results(&report, path, opts.visibility)?;
    }

    Ok(report)
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenv().ok();

    let opts = options();

    let fmt = fmt::layer()
        .with_writer(std::io::stderr)
        .without_time()
        .with_file(false)
        .with_line_number(false);
    let filter_layer =
        LevelFilter::from_level(if opts.verbose { Level::DEBUG } else { Level::INFO });
    tracing_subscriber::registry()
        .with(fmt)
        .with(filter_layer)
        .init();

    match run(opts).await {
        Ok(report) => report.exit_code(),
        Err(e) => {
            eprintln!("{e:?}");
            ExitCode::FAILURE
        }
    }
}
