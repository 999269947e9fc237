use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluationInput {
    pub query: String,
    pub ground_truth: Option<String>,
    pub response: Option<String>,
    pub context: Option<String>,
    pub latency: Option<f64>,
    pub response_length: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroundednessOutput {
    pub groundedness: f64,
    pub gpt_groundedness: f64,
    pub groundedness_reason: String,
    pub groundedness_result: String,
    pub groundedness_threshold: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimilarityOutput {
    pub similarity: f64,
    pub gpt_similarity: f64,
    pub similarity_result: String,
    pub similarity_threshold: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct EvaluationOutput {
    pub groundedness: Option<GroundednessOutput>,
    pub similarity: Option<SimilarityOutput>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluationResult {
    pub inputs: EvaluationInput,
    pub outputs: EvaluationOutput,
    pub line_number: i64,
}

/// Ordered parse result of one evaluation output file. Row order matches the
/// source `rows` array; `line_number` is read from the source, not derived.
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct EvaluationResultDocument {
    pub results: Vec<EvaluationResult>,
}
