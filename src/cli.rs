use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "evalgate",
    version,
    about = "Read and filter AI evaluation result files"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Summarize a results file: row counts, metric coverage, pass/fail totals
    Summary(SummaryArgs),
    /// List rows whose groundedness score meets a minimum threshold
    Filter(FilterArgs),
    /// List rows that failed on either metric
    Failed(ListingArgs),
    /// List rows that passed on both metrics
    Passed(ListingArgs),
    /// Resolve the evaluation endpoint configuration and validate it;
    /// exits nonzero when the configuration is incomplete
    CheckConfig(CheckConfigArgs),
}

#[derive(Args, Debug, Clone)]
pub struct SummaryArgs {
    #[arg(long)]
    pub results_path: String,

    #[arg(long, default_value_t = false)]
    pub json: bool,

    #[arg(long)]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct FilterArgs {
    #[arg(long)]
    pub results_path: String,

    #[arg(long)]
    pub min_groundedness: f64,

    #[arg(long, default_value_t = false)]
    pub json: bool,
}

#[derive(Args, Debug, Clone)]
pub struct ListingArgs {
    #[arg(long)]
    pub results_path: String,

    #[arg(long, default_value_t = false)]
    pub json: bool,
}

#[derive(Args, Debug, Clone)]
pub struct CheckConfigArgs {}
