use std::io::{self, Write};

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use evalgate::data_access::parse_results_file;
use evalgate::model::EvaluationResultDocument;

use crate::cli::SummaryArgs;
use crate::util::{now_utc_string, write_json_pretty};

#[derive(Debug, Serialize)]
struct SummaryResponse {
    generated_at: String,
    results_path: String,
    total_rows: usize,
    groundedness_rows: usize,
    similarity_rows: usize,
    passed_rows: usize,
    failed_rows: usize,
}

pub fn run(args: SummaryArgs) -> Result<()> {
    let document = parse_results_file(&args.results_path)
        .with_context(|| format!("failed to load results file: {}", args.results_path))?;

    let response = summarize(&args.results_path, &document);

    info!(
        results_path = %response.results_path,
        total_rows = response.total_rows,
        passed = response.passed_rows,
        failed = response.failed_rows,
        "results file summarized"
    );

    if let Some(output_path) = &args.output {
        write_json_pretty(output_path, &response)?;
        info!(path = %output_path.display(), "summary written");
    }

    if args.json {
        let mut output = io::BufWriter::new(io::stdout().lock());
        serde_json::to_writer_pretty(&mut output, &response)
            .context("failed to serialize summary json output")?;
        writeln!(output)?;
        output.flush()?;
    } else {
        let mut output = io::BufWriter::new(io::stdout().lock());
        writeln!(output, "Results file: {}", response.results_path)?;
        writeln!(output, "Total rows: {}", response.total_rows)?;
        writeln!(output, "With groundedness: {}", response.groundedness_rows)?;
        writeln!(output, "With similarity: {}", response.similarity_rows)?;
        writeln!(output, "Passed (both metrics): {}", response.passed_rows)?;
        writeln!(output, "Failed (either metric): {}", response.failed_rows)?;
        output.flush()?;
    }

    Ok(())
}

fn summarize(results_path: &str, document: &EvaluationResultDocument) -> SummaryResponse {
    let groundedness_rows = document
        .results
        .iter()
        .filter(|result| result.outputs.groundedness.is_some())
        .count();
    let similarity_rows = document
        .results
        .iter()
        .filter(|result| result.outputs.similarity.is_some())
        .count();

    SummaryResponse {
        generated_at: now_utc_string(),
        results_path: results_path.to_string(),
        total_rows: document.results.len(),
        groundedness_rows,
        similarity_rows,
        passed_rows: document.passed_results().len(),
        failed_rows: document.failed_results().len(),
    }
}

#[cfg(test)]
mod tests {
    use evalgate::model::{
        EvaluationInput, EvaluationOutput, EvaluationResult, GroundednessOutput, SimilarityOutput,
    };

    use super::*;

    fn result(
        groundedness_result: Option<&str>,
        similarity_result: Option<&str>,
    ) -> EvaluationResult {
        EvaluationResult {
            inputs: EvaluationInput {
                query: String::new(),
                ground_truth: None,
                response: None,
                context: None,
                latency: None,
                response_length: None,
            },
            outputs: EvaluationOutput {
                groundedness: groundedness_result.map(|value| GroundednessOutput {
                    groundedness: 3.0,
                    gpt_groundedness: 3.0,
                    groundedness_reason: String::new(),
                    groundedness_result: value.to_string(),
                    groundedness_threshold: 3.0,
                }),
                similarity: similarity_result.map(|value| SimilarityOutput {
                    similarity: 3.0,
                    gpt_similarity: 3.0,
                    similarity_result: value.to_string(),
                    similarity_threshold: 3.0,
                }),
            },
            line_number: 0,
        }
    }

    #[test]
    fn summary_counts_coverage_and_pass_fail_totals() {
        let document = EvaluationResultDocument {
            results: vec![
                result(Some("pass"), Some("pass")),
                result(Some("fail"), Some("pass")),
                result(Some("pass"), None),
                result(None, None),
            ],
        };

        let response = summarize("results.json", &document);

        assert_eq!(response.total_rows, 4);
        assert_eq!(response.groundedness_rows, 3);
        assert_eq!(response.similarity_rows, 2);
        assert_eq!(response.passed_rows, 1);
        assert_eq!(response.failed_rows, 1);
    }
}
