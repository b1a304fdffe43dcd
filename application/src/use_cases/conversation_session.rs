//! Conversation session
//!
//! Owns the conversation history and the request state of one chat, and
//! mediates between the interaction surface, the [`RequestWorker`] and the
//! [`SpeechSink`].
//!
//! All mutation happens on the surface's task: `submit` is called from input
//! handling, and worker outcomes must be received there and passed to
//! [`ConversationSession::handle_outcome`]. The worker never touches history.
//!
//! Re-entrancy follows the worker's reject policy: a `submit` while a request
//! is pending returns [`SubmitStatus::Rejected`] and changes nothing.

use crate::config::SessionSettings;
use crate::ports::session_event::SessionEvent;
use crate::ports::speech_sink::{NoSpeech, SpeechSink};
use crate::use_cases::request_worker::{DispatchId, DispatchResult, RequestWorker, WorkerOutcome};
use persona_domain::util::preview;
use persona_domain::{
    CompletionRequest, ConversationHistory, DomainError, Persona, RequestState, UserText,
};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// What happened to a submitted line of input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitStatus {
    /// Blank input; nothing recorded, nothing sent
    Ignored,
    /// Recorded and handed to the worker
    Dispatched(DispatchId),
    /// A request is already in flight; nothing recorded, nothing sent
    Rejected,
}

/// One chat between the user and a persona
pub struct ConversationSession {
    persona: Persona,
    system_prompt: String,
    settings: SessionSettings,
    history: ConversationHistory,
    state: RequestState,
    pending: Option<DispatchId>,
    worker: RequestWorker,
    speech: Arc<dyn SpeechSink>,
    events: mpsc::UnboundedSender<SessionEvent>,
}

impl ConversationSession {
    /// Create a session; the system prompt is built once from the persona.
    pub fn new(
        persona: Persona,
        settings: SessionSettings,
        worker: RequestWorker,
        events: mpsc::UnboundedSender<SessionEvent>,
    ) -> Self {
        let system_prompt = persona.build_system_prompt();
        Self {
            persona,
            system_prompt,
            settings,
            history: ConversationHistory::new(),
            state: RequestState::Idle,
            pending: None,
            worker,
            speech: Arc::new(NoSpeech),
            events,
        }
    }

    /// Set the sink that speaks replies aloud.
    pub fn with_speech_sink(mut self, speech: Arc<dyn SpeechSink>) -> Self {
        self.speech = speech;
        self
    }

    pub fn persona(&self) -> &Persona {
        &self.persona
    }

    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    pub fn history(&self) -> &ConversationHistory {
        &self.history
    }

    pub fn state(&self) -> RequestState {
        self.state
    }

    /// Whether the surface should accept input right now
    pub fn is_accepting_input(&self) -> bool {
        self.state.is_idle() && !self.worker.is_in_flight()
    }

    /// Show and speak the persona's opening line. Not recorded in history.
    pub fn greet(&self) {
        let greeting = self.persona.greeting();
        self.speech.speak(&greeting);
        self.emit(SessionEvent::Greeting(greeting));
    }

    /// Record user input and send it to the model.
    pub fn submit(&mut self, user_text: &str) -> SubmitStatus {
        let Some(text) = UserText::try_new(user_text) else {
            debug!("Ignoring blank input");
            return SubmitStatus::Ignored;
        };

        if !self.is_accepting_input() {
            info!(state = %self.state, "Submit rejected: request already in flight");
            return SubmitStatus::Rejected;
        }

        if let Err(e) = self.state.begin() {
            warn!("Submit rejected: {}", e);
            return SubmitStatus::Rejected;
        }

        self.history.add_user_message(text.content());
        self.emit(SessionEvent::AwaitingReply);

        let request = CompletionRequest {
            temperature: self.settings.temperature(),
            ..CompletionRequest::new(
                self.system_prompt.clone(),
                text.into_content(),
                self.settings.model_id.clone(),
            )
        };

        match self.worker.dispatch(request) {
            Ok(id) => {
                self.pending = Some(id);
                SubmitStatus::Dispatched(id)
            }
            Err(e) => {
                // The user turn stays; this reads like any other failed request.
                self.finish_failed(e.to_string());
                SubmitStatus::Rejected
            }
        }
    }

    /// Apply a worker outcome. Call only from the surface's task.
    pub fn handle_outcome(&mut self, outcome: WorkerOutcome) {
        if self.pending != Some(outcome.id) {
            warn!(
                dispatch = %outcome.id,
                "Ignoring outcome for a dispatch this session is not waiting on"
            );
            return;
        }
        self.pending = None;

        let (id, result) = outcome.into_parts();
        match result {
            DispatchResult::Success(text) => {
                self.step(RequestState::succeed);
                if text.trim().is_empty() {
                    debug!(dispatch = %id, "Reply was empty; nothing to display");
                } else {
                    info!(dispatch = %id, "Reply: {}", preview(&text, 80));
                    self.history.add_assistant_message(text.clone());
                    self.speech.speak(&text);
                    self.emit(SessionEvent::AssistantTurn(text));
                }
                self.step(RequestState::settle);
                self.emit(SessionEvent::Ready);
            }
            DispatchResult::Failure(failure) => {
                self.finish_failed(failure.message);
            }
        }
    }

    /// Pending -> Failed -> Idle, surfacing `message` to the user.
    fn finish_failed(&mut self, message: String) {
        self.step(RequestState::fail);
        self.emit(SessionEvent::Error(message));
        self.step(RequestState::settle);
        self.emit(SessionEvent::Ready);
    }

    fn step(&mut self, transition: fn(&mut RequestState) -> Result<(), DomainError>) {
        if let Err(e) = transition(&mut self.state) {
            warn!("{}", e);
        }
    }

    fn emit(&self, event: SessionEvent) {
        // A closed surface just stops listening
        let _ = self.events.send(event);
    }
}
