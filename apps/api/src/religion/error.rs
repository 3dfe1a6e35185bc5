use thiserror::Error;

/// Failures of the prompt → backend → coercion pipeline.
///
/// Every variant is terminal for the call that produced it.
#[derive(Debug, Error)]
pub enum ReligionError {
    /// The text-generation backend call itself failed.
    #[error("{0}")]
    Generation(String),

    /// No JSON object boundaries were found in the backend text.
    #[error("no JSON object found: {0}")]
    Extraction(String),

    /// The extracted substring is not valid JSON.
    #[error("malformed JSON: {0}")]
    Parse(String),

    /// The JSON did not fit the record schema.
    #[error("data conversion error: {0}")]
    Schema(String),

    #[error("unsupported component type: {0}")]
    UnsupportedKind(String),
}

pub type ReligionResult<T> = Result<T, ReligionError>;
