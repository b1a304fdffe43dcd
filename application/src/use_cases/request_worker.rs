//! Request worker
//!
//! Runs one completion call off the interaction surface's task and reports
//! exactly one [`WorkerOutcome`] per dispatch over a channel.
//!
//! ```text
//! surface task                      dispatch task (tokio::spawn)
//!   worker.dispatch(request) ──────>  ├─ call task (tokio::spawn)
//!   <returns DispatchId>              │    └─ client.complete(request)
//!                                     ├─ JoinError → Failure(Crashed)
//!   outcome_rx.recv() <───────────────└─ outcome_tx.send(WorkerOutcome)
//! ```
//!
//! # Re-entrancy
//!
//! A second `dispatch` before the previous outcome has been delivered is
//! rejected with [`WorkerError::AlreadyInFlight`]. "Delivered" means the
//! [`WorkerOutcome`] value has been dropped by whoever received it: each
//! outcome carries the in-flight guard, so releasing it is tied to the
//! receiver finishing with the result.

use crate::ports::completion_client::CompletionClient;
use persona_domain::util::preview;
use persona_domain::{CompletionRequest, CompletionResult, ErrorKind};
use std::any::Any;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use thiserror::Error;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Errors returned synchronously by [`RequestWorker::dispatch`]
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerError {
    #[error("A request is already in flight")]
    AlreadyInFlight,
}

/// Identifier of one dispatch, unique per worker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DispatchId(u64);

impl DispatchId {
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for DispatchId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Why a dispatch failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Network,
    Api,
    /// The completion call panicked or was aborted
    Crashed,
}

impl From<ErrorKind> for FailureKind {
    fn from(kind: ErrorKind) -> Self {
        match kind {
            ErrorKind::Network => FailureKind::Network,
            ErrorKind::Api => FailureKind::Api,
        }
    }
}

/// A failed dispatch, with a message fit for the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchFailure {
    pub kind: FailureKind,
    pub message: String,
}

/// Result of one dispatch: exactly one of success or failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchResult {
    Success(String),
    Failure(DispatchFailure),
}

impl DispatchResult {
    fn from_completion(result: CompletionResult) -> Self {
        match result {
            CompletionResult::Text(text) => DispatchResult::Success(text),
            CompletionResult::Error(kind, message) => DispatchResult::Failure(DispatchFailure {
                kind: kind.into(),
                message,
            }),
        }
    }

    fn crashed(message: impl Into<String>) -> Self {
        DispatchResult::Failure(DispatchFailure {
            kind: FailureKind::Crashed,
            message: message.into(),
        })
    }

    pub fn is_success(&self) -> bool {
        matches!(self, DispatchResult::Success(_))
    }
}

/// Clears the worker's in-flight flag when dropped
#[derive(Debug)]
struct InFlightGuard {
    flag: Arc<AtomicBool>,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

/// The single outcome of a dispatch, sent back to the surface
#[derive(Debug)]
pub struct WorkerOutcome {
    pub id: DispatchId,
    pub result: DispatchResult,
    _guard: InFlightGuard,
}

impl WorkerOutcome {
    /// Split into its parts, releasing the in-flight slot.
    pub fn into_parts(self) -> (DispatchId, DispatchResult) {
        (self.id, self.result)
    }
}

/// Executes completion requests on spawned tasks
///
/// Owns no conversation state; it only knows whether a request is in
/// flight. Must be used from within a tokio runtime.
pub struct RequestWorker {
    client: Arc<dyn CompletionClient>,
    outcome_tx: mpsc::UnboundedSender<WorkerOutcome>,
    in_flight: Arc<AtomicBool>,
    next_id: AtomicU64,
}

impl RequestWorker {
    pub fn new(
        client: Arc<dyn CompletionClient>,
        outcome_tx: mpsc::UnboundedSender<WorkerOutcome>,
    ) -> Self {
        Self {
            client,
            outcome_tx,
            in_flight: Arc::new(AtomicBool::new(false)),
            next_id: AtomicU64::new(1),
        }
    }

    /// Whether a dispatched outcome has not been delivered yet
    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Start a request and return immediately.
    ///
    /// The outcome arrives later on the outcome channel, exactly once.
    pub fn dispatch(&self, request: CompletionRequest) -> Result<DispatchId, WorkerError> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            warn!("Dispatch rejected: a request is already in flight");
            return Err(WorkerError::AlreadyInFlight);
        }

        let guard = InFlightGuard {
            flag: Arc::clone(&self.in_flight),
        };
        let id = DispatchId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let client = Arc::clone(&self.client);
        let outcome_tx = self.outcome_tx.clone();

        info!(
            dispatch = %id,
            model = %request.model_id,
            "Dispatching request: {}",
            preview(&request.user_text, 80)
        );

        tokio::spawn(async move {
            let result = Self::run(client, request).await;
            match &result {
                DispatchResult::Success(text) => {
                    debug!(dispatch = %id, chars = text.chars().count(), "Request succeeded")
                }
                DispatchResult::Failure(failure) => {
                    warn!(dispatch = %id, kind = ?failure.kind, "Request failed: {}", failure.message)
                }
            }

            let outcome = WorkerOutcome {
                id,
                result,
                _guard: guard,
            };
            // A closed channel drops the outcome here, which frees the slot.
            if outcome_tx.send(outcome).is_err() {
                warn!(dispatch = %id, "Outcome receiver dropped; result discarded");
            }
        });

        Ok(id)
    }

    /// Run the completion call in its own task so a panic becomes a failure.
    async fn run(client: Arc<dyn CompletionClient>, request: CompletionRequest) -> DispatchResult {
        let call = tokio::spawn(async move { client.complete(request).await });

        match call.await {
            Ok(result) => DispatchResult::from_completion(result),
            Err(e) if e.is_panic() => DispatchResult::crashed(format!(
                "Request worker crashed: {}",
                panic_message(e.into_panic())
            )),
            Err(e) => DispatchResult::crashed(format!("Request worker stopped: {}", e)),
        }
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
