use anyhow::{Context, Result};
use tracing::info;

use evalgate::data_access::parse_results_file;

use crate::cli::FilterArgs;
use crate::commands::report::{build_listing, write_listing};

pub fn run(args: FilterArgs) -> Result<()> {
    let document = parse_results_file(&args.results_path)
        .with_context(|| format!("failed to load results file: {}", args.results_path))?;

    let matching = document.filter_by_groundedness(args.min_groundedness);
    info!(
        results_path = %args.results_path,
        min_groundedness = args.min_groundedness,
        total = document.results.len(),
        returned = matching.len(),
        "groundedness filter applied"
    );

    let listing = build_listing(
        &args.results_path,
        format!("groundedness >= {}", args.min_groundedness),
        &matching,
    );
    write_listing(&listing, args.json)
}
