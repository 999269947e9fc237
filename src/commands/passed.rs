use anyhow::{Context, Result};
use tracing::info;

use evalgate::data_access::parse_results_file;

use crate::cli::ListingArgs;
use crate::commands::report::{build_listing, write_listing};

pub fn run(args: ListingArgs) -> Result<()> {
    let document = parse_results_file(&args.results_path)
        .with_context(|| format!("failed to load results file: {}", args.results_path))?;

    let passed = document.passed_results();
    info!(
        results_path = %args.results_path,
        total = document.results.len(),
        returned = passed.len(),
        "passed rows selected"
    );

    let listing = build_listing(
        &args.results_path,
        "passed on both metrics".to_string(),
        &passed,
    );
    write_listing(&listing, args.json)
}
