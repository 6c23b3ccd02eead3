use thiserror::Error;

/// Failure taxonomy shared by the engine, the store, and the query endpoint.
///
/// Validation errors propagate to the caller; the CLI and HTTP boundaries are
/// the only places that catch and render them.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("missing required parameter: {0}")]
    MissingParameter(&'static str),

    #[error("invalid parameter {name}: {reason}")]
    InvalidParameter {
        name: &'static str,
        reason: String,
    },

    #[error("unknown data layer: {0}")]
    LayerNotFound(String),

    #[error("unknown scenario: {0}")]
    ScenarioNotFound(String),

    #[error("malformed persisted survey data: {0}")]
    MalformedData(#[from] serde_json::Error),

    #[error("csv export failed: {0}")]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
