//! Aggregation barrier and result normalization.
//!
//! The aggregator is the fan-in side of the run: it accumulates tagged
//! evaluator messages in arrival order, releases a count-based gate once
//! enough have arrived, normalizes each producer's latest payload into a
//! typed record and finalizes exactly one decision.
//!
//! State is scoped to a single run; instantiate a fresh aggregator per run.

use tracing::{debug, info, warn};
use triage_domain::{
    decide, DecisionResult, EvaluatorMessage, EvaluatorRecord, FraudRecord, IncomeRecord,
    KycRecord, ProducerId,
};

/// Messages required before the gate opens.
///
/// Count-based, not distinct-producer-based: duplicate messages from one
/// producer can release the gate before all three producers report. Kept as
/// documented behavior; a hardened gate would track the set of producers
/// seen and fire on full coverage.
const GATE_THRESHOLD: usize = 3;

/// One-way run lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Collecting,
    Finalized,
}

/// Fan-in barrier plus normalizer, scoped to exactly one run.
pub struct Aggregator {
    messages: Vec<EvaluatorMessage>,
    phase: Phase,
}

impl Aggregator {
    pub fn new() -> Self {
        Self {
            messages: Vec::new(),
            phase: Phase::Collecting,
        }
    }

    /// Accumulate a batch and finalize once the gate opens.
    ///
    /// Every non-blank message is appended in arrival order. The first call
    /// that observes `GATE_THRESHOLD` accumulated messages transitions the
    /// run to `Finalized` and returns the decision; every other call returns
    /// `None`. Batches arriving after finalization are still accepted but
    /// can never produce a second decision.
    pub fn on_messages(&mut self, batch: Vec<EvaluatorMessage>) -> Option<DecisionResult> {
        for message in batch {
            if message.text.trim().is_empty() {
                debug!(producer = %message.producer, "Skipping blank message");
                continue;
            }
            debug!(producer = %message.producer, "Message accumulated");
            self.messages.push(message);
        }

        if self.phase == Phase::Finalized || self.messages.len() < GATE_THRESHOLD {
            return None;
        }

        self.phase = Phase::Finalized;
        info!(
            event = "run.gate_opened",
            accumulated = self.messages.len(),
        );

        let kyc: KycRecord = self.normalized(ProducerId::Kyc);
        let fraud: FraudRecord = self.normalized(ProducerId::Fraud);
        let income: IncomeRecord = self.normalized(ProducerId::Income);

        let result = decide(kyc, fraud, income);
        info!(event = "run.finalized", outcome = ?result.outcome);
        Some(result)
    }

    /// Normalize the most recent message from one producer.
    ///
    /// Absence or a parse failure yields the all-unset default record. A
    /// successfully parsed record gets its self-reported producer label
    /// repaired from the transport identity.
    fn normalized<R: EvaluatorRecord>(&self, producer: ProducerId) -> R {
        let message = self
            .messages
            .iter()
            .rev()
            .find(|message| message.producer == producer);

        let Some(message) = message else {
            warn!(producer = %producer, "No message accumulated; using default record");
            return R::default();
        };

        match R::parse(&message.text) {
            Ok(mut record) => {
                record.correct_producer(producer);
                record
            }
            Err(err) => {
                warn!(producer = %producer, error = %err, "Unparseable payload; using default record");
                R::default()
            }
        }
    }
}

impl Default for Aggregator {
    fn default() -> Self {
        Self::new()
    }
}
