use anyhow::{Context, Result};
use tracing::info;

use evalgate::data_access::parse_results_file;

use crate::cli::ListingArgs;
use crate::commands::report::{build_listing, write_listing};

pub fn run(args: ListingArgs) -> Result<()> {
    let document = parse_results_file(&args.results_path)
        .with_context(|| format!("failed to load results file: {}", args.results_path))?;

    let failed = document.failed_results();
    info!(
        results_path = %args.results_path,
        total = document.results.len(),
        returned = failed.len(),
        "failed rows selected"
    );

    let listing = build_listing(
        &args.results_path,
        "failed on either metric".to_string(),
        &failed,
    );
    write_listing(&listing, args.json)
}
