use thiserror::Error;

/// Errors surfaced by the recommendation pipeline.
///
/// Only two things can fail: the caller handed us unusable input, or the
/// candidate store failed. Everything downstream of retrieval (scoring,
/// aggregation, scaling, explanation) is total.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("candidate store error: {0}")]
    Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl EngineError {
    /// Wrap a store backend error.
    pub fn store<E>(error: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Self::Store(error.into())
    }
}

/// Errors from the generative explanation backend.
///
/// These never reach API callers — the [`crate::ExplanationProvider`]
/// recovers every variant with the deterministic template.
#[derive(Debug, Error)]
pub enum ExplainError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("OpenAI API error: {0}")]
    Api(String),

    #[error("completion had no content")]
    EmptyCompletion,

    #[error("serialize features: {0}")]
    Serialize(#[from] serde_json::Error),
}
