use std::io::{self, Write};

use anyhow::{Context, Result};
use serde::Serialize;

use evalgate::model::EvaluationResult;

use crate::util::now_utc_string;

#[derive(Debug, Clone, Serialize)]
pub struct RowReport {
    pub rank: usize,
    pub line_number: i64,
    pub query: String,
    pub groundedness: Option<f64>,
    pub groundedness_result: Option<String>,
    pub similarity: Option<f64>,
    pub similarity_result: Option<String>,
    pub latency: Option<f64>,
    pub response_length: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct RowListingResponse {
    pub generated_at: String,
    pub results_path: String,
    pub selection: String,
    pub returned: usize,
    pub rows: Vec<RowReport>,
}

pub fn build_listing(
    results_path: &str,
    selection: String,
    results: &[&EvaluationResult],
) -> RowListingResponse {
    let rows = results
        .iter()
        .enumerate()
        .map(|(index, result)| row_report(index + 1, result))
        .collect::<Vec<RowReport>>();

    RowListingResponse {
        generated_at: now_utc_string(),
        results_path: results_path.to_string(),
        selection,
        returned: rows.len(),
        rows,
    }
}

fn row_report(rank: usize, result: &EvaluationResult) -> RowReport {
    let groundedness = result.outputs.groundedness.as_ref();
    let similarity = result.outputs.similarity.as_ref();

    RowReport {
        rank,
        line_number: result.line_number,
        query: result.inputs.query.clone(),
        groundedness: groundedness.map(|output| output.groundedness),
        groundedness_result: groundedness.map(|output| output.groundedness_result.clone()),
        similarity: similarity.map(|output| output.similarity),
        similarity_result: similarity.map(|output| output.similarity_result.clone()),
        latency: result.inputs.latency,
        response_length: result.inputs.response_length,
    }
}

pub fn write_json_listing(response: &RowListingResponse) -> Result<()> {
    let mut output = io::BufWriter::new(io::stdout().lock());
    serde_json::to_writer_pretty(&mut output, response)
        .context("failed to serialize row listing json output")?;
    writeln!(output)?;
    output.flush()?;
    Ok(())
}

pub fn write_text_listing(response: &RowListingResponse) -> Result<()> {
    let mut output = io::BufWriter::new(io::stdout().lock());

    writeln!(output, "Selection: {}", response.selection)?;
    writeln!(output, "Results: {}", response.returned)?;

    for row in &response.rows {
        let query = if row.query.is_empty() {
            "(no query)"
        } else {
            &row.query
        };

        writeln!(output, "{}.\tline {}\t{}", row.rank, row.line_number, query)?;
        if let Some(score) = row.groundedness {
            writeln!(
                output,
                "\tgroundedness={:.2} result={}",
                score,
                row.groundedness_result.as_deref().unwrap_or("")
            )?;
        }
        if let Some(score) = row.similarity {
            writeln!(
                output,
                "\tsimilarity={:.2} result={}",
                score,
                row.similarity_result.as_deref().unwrap_or("")
            )?;
        }
        if let Some(latency) = row.latency {
            writeln!(output, "\tlatency: {latency}")?;
        }
        if let Some(response_length) = row.response_length {
            writeln!(output, "\tresponse_length: {response_length}")?;
        }
    }

    output.flush()?;
    Ok(())
}

pub fn write_listing(response: &RowListingResponse, json: bool) -> Result<()> {
    if json {
        write_json_listing(response)
    } else {
        write_text_listing(response)
    }
}

#[cfg(test)]
mod tests {
    use evalgate::model::{
        EvaluationInput, EvaluationOutput, EvaluationResult, GroundednessOutput,
    };

    use super::*;

    fn groundedness_only_result(line_number: i64) -> EvaluationResult {
        EvaluationResult {
            inputs: EvaluationInput {
                query: "what is the capital of France?".to_string(),
                ground_truth: None,
                response: None,
                context: None,
                latency: Some(0.8),
                response_length: None,
            },
            outputs: EvaluationOutput {
                groundedness: Some(GroundednessOutput {
                    groundedness: 5.0,
                    gpt_groundedness: 5.0,
                    groundedness_reason: String::new(),
                    groundedness_result: "pass".to_string(),
                    groundedness_threshold: 3.0,
                }),
                similarity: None,
            },
            line_number,
        }
    }

    #[test]
    fn listing_ranks_rows_from_one_and_keeps_order() {
        let first = groundedness_only_result(5);
        let second = groundedness_only_result(2);
        let listing = build_listing("results.json", "failed".to_string(), &[&first, &second]);

        assert_eq!(listing.returned, 2);
        assert_eq!(listing.rows[0].rank, 1);
        assert_eq!(listing.rows[0].line_number, 5);
        assert_eq!(listing.rows[1].rank, 2);
        assert_eq!(listing.rows[1].line_number, 2);
    }

    #[test]
    fn absent_sub_output_serializes_as_null_fields() {
        let result = groundedness_only_result(0);
        let listing = build_listing("results.json", "passed".to_string(), &[&result]);

        let row = &listing.rows[0];
        assert_eq!(row.groundedness, Some(5.0));
        assert_eq!(row.groundedness_result.as_deref(), Some("pass"));
        assert!(row.similarity.is_none());
        assert!(row.similarity_result.is_none());
    }
}
