use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};

use serde_json::{Map, Value};

use crate::error::DataAccessError;
use crate::model::{
    EvaluationInput, EvaluationOutput, EvaluationResult, EvaluationResultDocument,
    GroundednessOutput, SimilarityOutput,
};

// Row keys are flat strings containing literal dots, not nested objects.
// Lookups must stay opaque string lookups; re-nesting would break the
// presence checks below.
const KEY_QUERY: &str = "inputs.query";
const KEY_GROUND_TRUTH: &str = "inputs.ground_truth";
const KEY_RESPONSE: &str = "inputs.response";
const KEY_CONTEXT: &str = "inputs.context";
const KEY_LATENCY: &str = "inputs.latency";
const KEY_RESPONSE_LENGTH: &str = "inputs.response_length";
const KEY_GROUNDEDNESS: &str = "outputs.groundedness.groundedness";
const KEY_GPT_GROUNDEDNESS: &str = "outputs.groundedness.gpt_groundedness";
const KEY_GROUNDEDNESS_REASON: &str = "outputs.groundedness.groundedness_reason";
const KEY_GROUNDEDNESS_RESULT: &str = "outputs.groundedness.groundedness_result";
const KEY_GROUNDEDNESS_THRESHOLD: &str = "outputs.groundedness.groundedness_threshold";
const KEY_SIMILARITY: &str = "outputs.similarity.similarity";
const KEY_GPT_SIMILARITY: &str = "outputs.similarity.gpt_similarity";
const KEY_SIMILARITY_RESULT: &str = "outputs.similarity.similarity_result";
const KEY_SIMILARITY_THRESHOLD: &str = "outputs.similarity.similarity_threshold";
const KEY_LINE_NUMBER: &str = "line_number";

const RESULT_PASS: &str = "pass";
const RESULT_FAIL: &str = "fail";

/// Parses an evaluation results file into a document, preserving source row
/// order. Structural problems (blank path, missing file, invalid JSON, no
/// `rows` array) fail fast; missing or mistyped fields within a row resolve
/// to defaults instead of failing the parse.
pub fn parse_results_file(path: &str) -> Result<EvaluationResultDocument, DataAccessError> {
    parse_results_file_with_cancel(path, None)
}

/// Same as [`parse_results_file`], with a cooperative cancellation flag
/// checked at I/O boundaries only. Once the raw file content has been read,
/// mapping runs to completion.
pub fn parse_results_file_with_cancel(
    path: &str,
    cancel: Option<&AtomicBool>,
) -> Result<EvaluationResultDocument, DataAccessError> {
    if path.trim().is_empty() {
        return Err(DataAccessError::InvalidPath);
    }

    let path = Path::new(path);
    if is_cancelled(cancel) {
        return Err(DataAccessError::Cancelled);
    }
    if !path.exists() {
        return Err(DataAccessError::NotFound(path.to_path_buf()));
    }

    let raw = fs::read(path).map_err(|source| DataAccessError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    map_document(&raw, path, cancel)
}

// Second cancellation checkpoint: the read is done, so this is the last
// point the flag is consulted before mapping runs to completion.
fn map_document(
    raw: &[u8],
    path: &Path,
    cancel: Option<&AtomicBool>,
) -> Result<EvaluationResultDocument, DataAccessError> {
    if is_cancelled(cancel) {
        return Err(DataAccessError::Cancelled);
    }

    let root: Value =
        serde_json::from_slice(raw).map_err(|source| DataAccessError::MalformedJson {
            path: path.to_path_buf(),
            source,
        })?;
    let rows = root
        .get("rows")
        .and_then(Value::as_array)
        .ok_or_else(|| DataAccessError::MissingRows(path.to_path_buf()))?;

    let results = rows.iter().map(result_from_row).collect();
    Ok(EvaluationResultDocument { results })
}

fn is_cancelled(cancel: Option<&AtomicBool>) -> bool {
    cancel.is_some_and(|flag| flag.load(Ordering::Relaxed))
}

fn result_from_row(row: &Value) -> EvaluationResult {
    let empty = Map::new();
    let row = row.as_object().unwrap_or(&empty);

    let inputs = EvaluationInput {
        query: flat_string(row, KEY_QUERY).unwrap_or_default(),
        ground_truth: flat_string(row, KEY_GROUND_TRUTH),
        response: flat_string(row, KEY_RESPONSE),
        context: flat_string(row, KEY_CONTEXT),
        latency: flat_f64(row, KEY_LATENCY),
        response_length: flat_i64(row, KEY_RESPONSE_LENGTH),
    };

    // Sub-output presence is keyed on the score key itself. A present but
    // mistyped score still yields a sub-output, with the score defaulted to
    // zero; that state is distinct from an absent sub-output.
    let groundedness = row.contains_key(KEY_GROUNDEDNESS).then(|| GroundednessOutput {
        groundedness: flat_f64(row, KEY_GROUNDEDNESS).unwrap_or(0.0),
        gpt_groundedness: flat_f64(row, KEY_GPT_GROUNDEDNESS).unwrap_or(0.0),
        groundedness_reason: flat_string(row, KEY_GROUNDEDNESS_REASON).unwrap_or_default(),
        groundedness_result: flat_string(row, KEY_GROUNDEDNESS_RESULT).unwrap_or_default(),
        groundedness_threshold: flat_f64(row, KEY_GROUNDEDNESS_THRESHOLD).unwrap_or(0.0),
    });

    let similarity = row.contains_key(KEY_SIMILARITY).then(|| SimilarityOutput {
        similarity: flat_f64(row, KEY_SIMILARITY).unwrap_or(0.0),
        gpt_similarity: flat_f64(row, KEY_GPT_SIMILARITY).unwrap_or(0.0),
        similarity_result: flat_string(row, KEY_SIMILARITY_RESULT).unwrap_or_default(),
        similarity_threshold: flat_f64(row, KEY_SIMILARITY_THRESHOLD).unwrap_or(0.0),
    });

    EvaluationResult {
        inputs,
        outputs: EvaluationOutput {
            groundedness,
            similarity,
        },
        line_number: flat_i64(row, KEY_LINE_NUMBER).unwrap_or(0),
    }
}

fn flat_string(row: &Map<String, Value>, key: &str) -> Option<String> {
    row.get(key).and_then(Value::as_str).map(str::to_owned)
}

fn flat_f64(row: &Map<String, Value>, key: &str) -> Option<f64> {
    row.get(key).and_then(Value::as_f64)
}

fn flat_i64(row: &Map<String, Value>, key: &str) -> Option<i64> {
    row.get(key).and_then(Value::as_i64)
}

impl EvaluationResultDocument {
    /// Rows whose groundedness sub-output is present with a score of at
    /// least `minimum`. Rows without a groundedness sub-output never meet a
    /// threshold.
    pub fn filter_by_groundedness(&self, minimum: f64) -> Vec<&EvaluationResult> {
        self.results
            .iter()
            .filter(|result| {
                result
                    .outputs
                    .groundedness
                    .as_ref()
                    .is_some_and(|output| output.groundedness >= minimum)
            })
            .collect()
    }

    /// Rows failing on either metric: groundedness result "fail" OR
    /// similarity result "fail", case-insensitive. An absent sub-output
    /// does not count as failing.
    pub fn failed_results(&self) -> Vec<&EvaluationResult> {
        self.results
            .iter()
            .filter(|result| {
                let groundedness_failed = result
                    .outputs
                    .groundedness
                    .as_ref()
                    .is_some_and(|output| output.groundedness_result.eq_ignore_ascii_case(RESULT_FAIL));
                let similarity_failed = result
                    .outputs
                    .similarity
                    .as_ref()
                    .is_some_and(|output| output.similarity_result.eq_ignore_ascii_case(RESULT_FAIL));
                groundedness_failed || similarity_failed
            })
            .collect()
    }

    /// Rows passing on both metrics: both sub-outputs present AND both
    /// results "pass", case-insensitive. A row missing either sub-output is
    /// excluded; this is deliberately stricter than [`failed_results`],
    /// which treats absence as "not failing".
    ///
    /// [`failed_results`]: EvaluationResultDocument::failed_results
    pub fn passed_results(&self) -> Vec<&EvaluationResult> {
        self.results
            .iter()
            .filter(|result| {
                let groundedness_passed = result
                    .outputs
                    .groundedness
                    .as_ref()
                    .is_some_and(|output| output.groundedness_result.eq_ignore_ascii_case(RESULT_PASS));
                let similarity_passed = result
                    .outputs
                    .similarity
                    .as_ref()
                    .is_some_and(|output| output.similarity_result.eq_ignore_ascii_case(RESULT_PASS));
                groundedness_passed && similarity_passed
            })
            .collect()
    }
}
