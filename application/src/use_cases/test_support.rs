//! Fakes shared by the use case tests.

use crate::ports::completion_client::CompletionClient;
use crate::ports::speech_sink::SpeechSink;
use async_trait::async_trait;
use persona_domain::{CompletionRequest, CompletionResult};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

/// What the fake client does when called
#[derive(Clone)]
pub enum Script {
    Reply(CompletionResult),
    Panic(&'static str),
}

/// Completion client that follows a script and records requests
pub struct FakeClient {
    script: Script,
    gate: Option<Arc<Notify>>,
    pub requests: Mutex<Vec<CompletionRequest>>,
}

impl FakeClient {
    pub fn replying(result: CompletionResult) -> Arc<Self> {
        Arc::new(Self {
            script: Script::Reply(result),
            gate: None,
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn panicking(message: &'static str) -> Arc<Self> {
        Arc::new(Self {
            script: Script::Panic(message),
            gate: None,
            requests: Mutex::new(Vec::new()),
        })
    }

    /// Reply only after `gate` is notified, to hold a request in flight
    pub fn gated(result: CompletionResult, gate: Arc<Notify>) -> Arc<Self> {
        Arc::new(Self {
            script: Script::Reply(result),
            gate: Some(gate),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl CompletionClient for FakeClient {
    async fn complete(&self, request: CompletionRequest) -> CompletionResult {
        self.requests.lock().unwrap().push(request);
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        match &self.script {
            Script::Reply(result) => result.clone(),
            Script::Panic(message) => panic!("{}", message),
        }
    }
}

/// Speech sink that remembers everything it was asked to say
#[derive(Default)]
pub struct RecordingSpeech {
    pub spoken: Mutex<Vec<String>>,
}

impl RecordingSpeech {
    pub fn spoken(&self) -> Vec<String> {
        self.spoken.lock().unwrap().clone()
    }
}

impl SpeechSink for RecordingSpeech {
    fn speak(&self, text: &str) {
        self.spoken.lock().unwrap().push(text.to_string());
    }
}
