//! Workflow wiring: fan-out dispatch, evaluator tasks, fan-in barrier.
//!
//! Topology per run:
//! - The dispatcher broadcasts the application payload to every registered
//!   evaluator, then an activation signal that starts their processing
//! - Evaluator tasks run concurrently on tokio and report to a single
//!   aggregator inbound queue, which serializes the barrier's
//!   accumulate-check-finalize critical section
//! - The run resolves with exactly one decision, or stalls if too few
//!   usable messages ever arrive (no timeout or retry wraps an evaluator)

use crate::aggregator::Aggregator;
use crate::error::{Result, WorkflowError};
use crate::evaluator::Evaluator;
use crate::generate::Generator;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info};
use triage_domain::{ApplicationRequest, DecisionResult, EvaluatorMessage};
use uuid::Uuid;

/// Signals broadcast by the dispatcher, in order.
#[derive(Debug, Clone)]
pub enum Dispatch {
    /// The application payload; evaluators buffer it without starting work.
    Payload(String),
    /// Start processing the buffered payload.
    Activate,
}

/// Fan-out side of the run: broadcasts to every registered evaluator.
pub struct Dispatcher {
    outlets: Vec<mpsc::Sender<Dispatch>>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self {
            outlets: Vec::new(),
        }
    }

    pub fn register(&mut self, outlet: mpsc::Sender<Dispatch>) {
        self.outlets.push(outlet);
    }

    /// Broadcast the payload, then the activation signal.
    ///
    /// Starting with no registered evaluators is a configuration error.
    pub async fn start(&self, application_text: &str) -> Result<()> {
        if self.outlets.is_empty() {
            return Err(WorkflowError::NoEvaluators);
        }

        for outlet in &self.outlets {
            outlet
                .send(Dispatch::Payload(application_text.to_string()))
                .await
                .map_err(|_| WorkflowError::DispatchFailed)?;
        }
        for outlet in &self.outlets {
            outlet
                .send(Dispatch::Activate)
                .await
                .map_err(|_| WorkflowError::DispatchFailed)?;
        }
        debug!(evaluators = self.outlets.len(), "Dispatch complete");
        Ok(())
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

/// One triage run: registered evaluators plus a fresh aggregation barrier.
pub struct Workflow {
    evaluators: Vec<Evaluator>,
}

impl Workflow {
    pub fn new() -> Self {
        Self {
            evaluators: Vec::new(),
        }
    }

    /// The standard topology: KYC, fraud-risk and income evaluators sharing
    /// one generation backend.
    pub fn triage(generator: Arc<dyn Generator>) -> Self {
        Self::new()
            .register(Evaluator::kyc(generator.clone()))
            .register(Evaluator::fraud(generator.clone()))
            .register(Evaluator::income(generator))
    }

    pub fn register(mut self, evaluator: Evaluator) -> Self {
        self.evaluators.push(evaluator);
        self
    }

    /// Execute one run: fan out the application, wait on the barrier, return
    /// the fused decision.
    ///
    /// Cancelling the returned future before the gate fires drops all tasks
    /// without producing a decision or mutating anything external.
    pub async fn run(self, application_text: impl Into<String>) -> Result<DecisionResult> {
        let application_text = application_text.into();
        let run_id = Uuid::new_v4();
        info!(event = "run.started", run_id = %run_id, evaluators = self.evaluators.len());

        let (inbound_tx, mut inbound_rx) = mpsc::channel::<Vec<EvaluatorMessage>>(8);
        let mut dispatcher = Dispatcher::new();
        let mut tasks = Vec::new();

        for evaluator in self.evaluators {
            let (dispatch_tx, mut dispatch_rx) = mpsc::channel::<Dispatch>(2);
            dispatcher.register(dispatch_tx);
            let inbound = inbound_tx.clone();

            tasks.push(tokio::spawn(async move {
                let mut payload: Option<String> = None;
                while let Some(signal) = dispatch_rx.recv().await {
                    match signal {
                        Dispatch::Payload(text) => payload = Some(text),
                        Dispatch::Activate => break,
                    }
                }
                let Some(text) = payload else {
                    return;
                };

                let request = ApplicationRequest::new(text);
                if let Some(message) = evaluator.evaluate(&request).await {
                    // Receiver gone means the run was cancelled or already
                    // finalized; either way the message is moot.
                    let _ = inbound.send(vec![message]).await;
                }
            }));
        }

        // Only evaluator tasks hold senders now; the queue closes once every
        // task has finished.
        drop(inbound_tx);

        dispatcher.start(&application_text).await?;

        let mut aggregator = Aggregator::new();
        let mut decision = None;
        while let Some(batch) = inbound_rx.recv().await {
            if let Some(result) = aggregator.on_messages(batch) {
                decision = Some(result);
                break;
            }
        }

        for task in &tasks {
            task.abort();
        }

        match decision {
            Some(result) => {
                info!(event = "run.finished", run_id = %run_id, outcome = ?result.outcome);
                Ok(result)
            }
            None => {
                info!(event = "run.stalled", run_id = %run_id);
                Err(WorkflowError::Incomplete)
            }
        }
    }
}

impl Default for Workflow {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_empty_workflow_is_a_configuration_error() {
        let err = Workflow::new()
            .run(r#"{"amount":50000}"#)
            .await
            .unwrap_err();
        assert!(matches!(err, WorkflowError::NoEvaluators));
    }

    #[tokio::test]
    async fn test_dispatcher_requires_registered_outlets() {
        let dispatcher = Dispatcher::new();
        let err = dispatcher.start("{}").await.unwrap_err();
        assert!(matches!(err, WorkflowError::NoEvaluators));
    }

    #[tokio::test]
    async fn test_dispatcher_sends_payload_before_activation() {
        let (tx, mut rx) = mpsc::channel(2);
        let mut dispatcher = Dispatcher::new();
        dispatcher.register(tx);
        dispatcher.start("application text").await.unwrap();

        assert!(matches!(rx.recv().await, Some(Dispatch::Payload(text)) if text == "application text"));
        assert!(matches!(rx.recv().await, Some(Dispatch::Activate)));
    }
}
