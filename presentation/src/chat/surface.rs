//! Line-based terminal chat surface
//!
//! The surface owns the [`ConversationSession`] and is the only place it is
//! touched: input lines, worker outcomes and Ctrl-C are multiplexed in one
//! `select!` loop, and session events are rendered right after each step.

use super::command::SlashCommand;
use crate::output::console::ConsoleFormatter;
use crate::progress::reporter::ReplyIndicator;
use persona_application::{ConversationSession, SessionEvent, SubmitStatus, WorkerOutcome};
use std::io::Write;
use thiserror::Error;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::sync::mpsc;
use tracing::debug;

/// Why a one-shot exchange produced no reply
#[derive(Debug, Error, PartialEq, Eq)]
pub enum OneShotError {
    #[error("Message is empty")]
    EmptyMessage,

    #[error("Request could not be sent")]
    NotDispatched,

    #[error("Request worker stopped before replying")]
    WorkerGone,

    #[error("{0}")]
    Request(String),
}

/// What to do after handling one input line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Interactive chat on a terminal
pub struct ChatSurface {
    session: ConversationSession,
    outcomes: mpsc::UnboundedReceiver<WorkerOutcome>,
    events: mpsc::UnboundedReceiver<SessionEvent>,
    indicator: ReplyIndicator,
    show_prompt: bool,
}

impl ChatSurface {
    /// `outcomes` must be the receiver paired with the session's worker and
    /// `events` the receiver paired with the session.
    pub fn new(
        session: ConversationSession,
        outcomes: mpsc::UnboundedReceiver<WorkerOutcome>,
        events: mpsc::UnboundedReceiver<SessionEvent>,
    ) -> Self {
        Self {
            session,
            outcomes,
            events,
            indicator: ReplyIndicator::new(true),
            show_prompt: true,
        }
    }

    /// Set whether to show the spinner while a reply is pending
    pub fn with_progress(mut self, show: bool) -> Self {
        self.indicator = ReplyIndicator::new(show);
        self
    }

    /// Set whether to print the `>` input prompt
    pub fn with_prompt(mut self, show: bool) -> Self {
        self.show_prompt = show;
        self
    }

    pub fn session(&self) -> &ConversationSession {
        &self.session
    }

    /// Chat on stdin until `/quit`, end of input or Ctrl-C.
    pub async fn run(&mut self) -> std::io::Result<()> {
        self.run_with_input(tokio::io::stdin()).await
    }

    /// Chat on any line source. At end of input a pending reply is still
    /// awaited and shown before returning.
    pub async fn run_with_input<R>(&mut self, input: R) -> std::io::Result<()>
    where
        R: AsyncRead + Unpin,
    {
        let mut lines = BufReader::new(input).lines();
        let mut input_open = true;

        print!("{}", ConsoleFormatter::welcome(self.session.persona()));
        self.session.greet();
        self.render_events();

        loop {
            if input_open && self.session.is_accepting_input() {
                self.prompt();
            }

            tokio::select! {
                line = lines.next_line(), if input_open => match line? {
                    Some(line) => {
                        if self.handle_line(&line) == Flow::Quit {
                            break;
                        }
                    }
                    None => {
                        debug!("End of input");
                        input_open = false;
                        if self.session.is_accepting_input() {
                            break;
                        }
                    }
                },
                outcome = self.outcomes.recv() => match outcome {
                    Some(outcome) => {
                        self.session.handle_outcome(outcome);
                        self.render_events();
                        if !input_open && self.session.is_accepting_input() {
                            break;
                        }
                    }
                    // The session holds the worker's sender; this only happens on teardown
                    None => break,
                },
                _ = tokio::signal::ctrl_c() => {
                    self.indicator.stop();
                    println!();
                    break;
                }
            }
        }

        self.indicator.stop();
        println!("Bye!");
        Ok(())
    }

    /// Send one message, wait for the reply and return it. No greeting, no prompt.
    pub async fn run_once(&mut self, message: &str) -> Result<String, OneShotError> {
        match self.session.submit(message) {
            SubmitStatus::Dispatched(_) => {}
            SubmitStatus::Ignored => return Err(OneShotError::EmptyMessage),
            SubmitStatus::Rejected => {
                self.drain_events();
                return Err(OneShotError::NotDispatched);
            }
        }

        self.indicator.start(self.session.persona().name());
        let outcome = self.outcomes.recv().await;
        self.indicator.stop();

        self.session
            .handle_outcome(outcome.ok_or(OneShotError::WorkerGone)?);

        let mut reply = String::new();
        for event in self.drain_events() {
            match event {
                SessionEvent::AssistantTurn(text) => reply = text,
                SessionEvent::Error(message) => return Err(OneShotError::Request(message)),
                _ => {}
            }
        }
        Ok(reply)
    }

    fn handle_line(&mut self, line: &str) -> Flow {
        if let Some(command) = SlashCommand::parse(line) {
            return self.handle_command(command);
        }

        match self.session.submit(line) {
            SubmitStatus::Dispatched(id) => debug!(dispatch = %id, "Message sent"),
            SubmitStatus::Ignored => {}
            SubmitStatus::Rejected => {
                self.indicator.stop();
                println!("{}", ConsoleFormatter::busy(self.session.persona().name()));
            }
        }
        self.render_events();
        Flow::Continue
    }

    fn handle_command(&mut self, command: SlashCommand) -> Flow {
        match command {
            SlashCommand::Quit => return Flow::Quit,
            SlashCommand::Help => println!("{}", SlashCommand::help_text()),
            SlashCommand::History => print!(
                "{}",
                ConsoleFormatter::history(
                    self.session.persona().name(),
                    self.session.history().messages()
                )
            ),
            SlashCommand::Persona => print!(
                "{}",
                ConsoleFormatter::persona(self.session.persona(), self.session.settings())
            ),
            SlashCommand::Unknown(name) => {
                println!("Unknown command: {}", name);
                println!("Type /help for available commands");
            }
        }
        Flow::Continue
    }

    fn drain_events(&mut self) -> Vec<SessionEvent> {
        let mut events = Vec::new();
        while let Ok(event) = self.events.try_recv() {
            events.push(event);
        }
        events
    }

    fn render_events(&mut self) {
        let name = self.session.persona().name().to_string();
        for event in self.drain_events() {
            match event {
                SessionEvent::Greeting(text) | SessionEvent::AssistantTurn(text) => {
                    self.indicator.stop();
                    println!("{}", ConsoleFormatter::character_turn(&name, &text));
                }
                SessionEvent::AwaitingReply => self.indicator.start(&name),
                SessionEvent::Error(message) => {
                    self.indicator.stop();
                    eprintln!("{}", ConsoleFormatter::error(&message));
                }
                SessionEvent::Ready => self.indicator.stop(),
            }
        }
    }

    fn prompt(&self) {
        if !self.show_prompt {
            return;
        }
        print!("> ");
        let _ = std::io::stdout().flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use persona_application::{CompletionClient, RequestWorker, SessionSettings};
    use persona_domain::{CompletionRequest, CompletionResult, Message, Persona};
    use std::sync::{Arc, Mutex};

    /// Answers every request with the same result and counts calls
    struct ScriptedClient {
        result: CompletionResult,
        calls: Mutex<usize>,
    }

    impl ScriptedClient {
        fn new(result: CompletionResult) -> Arc<Self> {
            Arc::new(Self {
                result,
                calls: Mutex::new(0),
            })
        }

        fn calls(&self) -> usize {
            *self.calls.lock().unwrap()
        }
    }

    #[async_trait]
    impl CompletionClient for ScriptedClient {
        async fn complete(&self, _request: CompletionRequest) -> CompletionResult {
            *self.calls.lock().unwrap() += 1;
            self.result.clone()
        }
    }

    fn surface(client: Arc<ScriptedClient>) -> ChatSurface {
        let persona = Persona::new("Kiki", "TestVerse", vec!["cheerful".to_string()], vec![])
            .unwrap();
        let (outcome_tx, outcome_rx) = mpsc::unbounded_channel();
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let session = ConversationSession::new(
            persona,
            SessionSettings::new("test-model"),
            RequestWorker::new(client, outcome_tx),
            event_tx,
        );
        ChatSurface::new(session, outcome_rx, event_rx)
            .with_progress(false)
            .with_prompt(false)
    }

    #[tokio::test]
    async fn end_of_input_waits_for_the_pending_reply() {
        let client = ScriptedClient::new(CompletionResult::Text("hi there!".to_string()));
        let mut surface = surface(client.clone());

        surface.run_with_input(&b"hello\n"[..]).await.unwrap();

        assert_eq!(
            surface.session().history().messages(),
            [Message::user("hello"), Message::assistant("hi there!")]
        );
        assert_eq!(client.calls(), 1);
    }

    #[tokio::test]
    async fn slash_commands_never_reach_the_model() {
        let client = ScriptedClient::new(CompletionResult::Text("unused".to_string()));
        let mut surface = surface(client.clone());

        surface
            .run_with_input(&b"/help\n/history\n/persona\n/dance\n\n"[..])
            .await
            .unwrap();

        assert!(surface.session().history().is_empty());
        assert_eq!(client.calls(), 0);
    }

    #[tokio::test]
    async fn quit_stops_reading_input() {
        let client = ScriptedClient::new(CompletionResult::Text("unused".to_string()));
        let mut surface = surface(client.clone());

        surface
            .run_with_input(&b"/quit\nhello\n"[..])
            .await
            .unwrap();

        assert!(surface.session().history().is_empty());
        assert_eq!(client.calls(), 0);
    }

    #[tokio::test]
    async fn failed_request_keeps_the_chat_usable() {
        let client = ScriptedClient::new(CompletionResult::network("timeout"));
        let mut surface = surface(client);

        surface.run_with_input(&b"hello\n"[..]).await.unwrap();

        assert_eq!(surface.session().history().messages(), [Message::user("hello")]);
        assert!(surface.session().is_accepting_input());
    }

    #[tokio::test]
    async fn run_once_returns_the_reply() {
        let client = ScriptedClient::new(CompletionResult::Text("hi there!".to_string()));
        let mut surface = surface(client);

        assert_eq!(surface.run_once("hello").await, Ok("hi there!".to_string()));
    }

    #[tokio::test]
    async fn run_once_reports_request_errors() {
        let client = ScriptedClient::new(CompletionResult::api("Invalid API key"));
        let mut surface = surface(client);

        assert_eq!(
            surface.run_once("hello").await,
            Err(OneShotError::Request("Invalid API key".to_string()))
        );
    }

    #[tokio::test]
    async fn run_once_rejects_blank_messages() {
        let client = ScriptedClient::new(CompletionResult::Text("unused".to_string()));
        let mut surface = surface(client.clone());

        assert_eq!(surface.run_once("  ").await, Err(OneShotError::EmptyMessage));
        assert_eq!(client.calls(), 0);
    }
}
