//! Triage Workflow - concurrent credit application triage
//!
//! Provides the fan-out/fan-in pipeline around the domain model:
//! - Dispatches one application to three evaluators (KYC, fraud risk, income)
//! - Each evaluator pairs a deterministic scoring tool with a generation step
//! - An aggregation barrier collects tagged messages, normalizes them and
//!   finalizes exactly one decision per run

pub mod aggregator;
pub mod error;
pub mod evaluator;
pub mod fakes;
pub mod generate;
pub mod openai;
pub mod telemetry;
pub mod workflow;

// Re-export key types
pub use aggregator::Aggregator;
pub use error::WorkflowError;
pub use evaluator::Evaluator;
pub use fakes::ScriptedGenerator;
pub use generate::{GenerateError, GenerationRequest, Generator};
pub use openai::{OpenAiConfig, OpenAiGenerator};
pub use telemetry::init_tracing;
pub use workflow::{Dispatch, Dispatcher, Workflow};
