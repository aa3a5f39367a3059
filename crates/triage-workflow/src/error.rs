//! Error types for workflow orchestration

use thiserror::Error;

#[derive(Error, Debug)]
pub enum WorkflowError {
    #[error("No evaluators registered; refusing to start the run")]
    NoEvaluators,

    #[error("Evaluator channel closed before dispatch completed")]
    DispatchFailed,

    #[error("All evaluators finished but the aggregation gate never fired")]
    Incomplete,
}

/// Result type for workflow operations
pub type Result<T> = std::result::Result<T, WorkflowError>;
