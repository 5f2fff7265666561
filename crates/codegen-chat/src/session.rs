use std::time::Duration;

use codegen_chat_backend::GenerativeBackend;
use codegen_chat_core::conversation::Message;
use codegen_chat_core::dictation::{
    DictationBridge, DictationUnavailable, SpeechRecognizer,
};
use codegen_chat_core::input::PendingInput;
use codegen_chat_core::prompt::TargetLanguage;
use codegen_chat_core::{Orchestrator, OrchestratorBuilder};

/// A session builder.
///
/// See [`Session`].
pub struct SessionBuilder {
    orchestrator_builder: OrchestratorBuilder,
    recognizer: Option<Box<dyn SpeechRecognizer>>,
}

impl SessionBuilder {
    /// Creates a session builder with a specified backend.
    pub fn with_backend<B: GenerativeBackend + 'static>(backend: B) -> Self {
        let orchestrator_builder = OrchestratorBuilder::with_backend(backend);
        Self {
            orchestrator_builder,
            recognizer: None,
        }
    }

    /// Sets the initial target language.
    #[inline]
    pub fn with_language(mut self, language: TargetLanguage) -> Self {
        self.orchestrator_builder =
            self.orchestrator_builder.with_language(language);
        self
    }

    /// Bounds the wait on every backend call.
    #[inline]
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.orchestrator_builder =
            self.orchestrator_builder.with_request_timeout(timeout);
        self
    }

    /// Supplies the host's speech recognition capability. Sessions built
    /// without one report dictation as unavailable.
    #[inline]
    pub fn with_recognizer<R: SpeechRecognizer + 'static>(
        mut self,
        recognizer: R,
    ) -> Self {
        self.recognizer = Some(Box::new(recognizer));
        self
    }

    /// Attaches a callback to be invoked for every appended message.
    #[inline]
    pub fn on_message(
        mut self,
        on_message: impl Fn(&Message) + Send + Sync + 'static,
    ) -> Self {
        self.orchestrator_builder =
            self.orchestrator_builder.on_message(on_message);
        self
    }

    /// Attaches a callback to be invoked when the session is idle.
    #[inline]
    pub fn on_idle(
        mut self,
        on_idle: impl Fn() + Send + Sync + 'static,
    ) -> Self {
        self.orchestrator_builder = self.orchestrator_builder.on_idle(on_idle);
        self
    }

    /// Builds a new session.
    pub fn build(self) -> Session {
        let pending = PendingInput::new();
        let dictation =
            DictationBridge::probe(self.recognizer, pending.clone());
        Session {
            orchestrator: self.orchestrator_builder.build(),
            pending,
            dictation,
        }
    }
}

/// A chat session, like a window that displays messages and has an input
/// box with a microphone button next to it.
///
/// The session owns the pending-input buffer that typed text and dictated
/// transcripts accumulate in, and a fully configured orchestrator that
/// consumes it on submit.
pub struct Session {
    orchestrator: Orchestrator,
    pending: PendingInput,
    dictation:
        Result<DictationBridge<Box<dyn SpeechRecognizer>>, DictationUnavailable>,
}

impl Session {
    /// Appends typed text to the pending input.
    #[inline]
    pub fn type_text(&self, text: &str) {
        self.pending.push_str(text);
    }

    /// The shared pending-input buffer.
    #[inline]
    pub fn pending_input(&self) -> &PendingInput {
        &self.pending
    }

    /// Submits whatever has been composed so far, clearing the buffer.
    pub fn submit(&self) {
        let raw = self.pending.take();
        self.orchestrator.submit(raw);
    }

    /// Sets the language used for subsequent submissions.
    #[inline]
    pub fn set_language(&self, language: TargetLanguage) {
        self.orchestrator.set_language(language);
    }

    /// Starts or stops dictation, returning the new recording state, or
    /// an error if the host offers no speech recognition.
    pub fn toggle_dictation(&mut self) -> Result<bool, DictationUnavailable> {
        match &mut self.dictation {
            Ok(bridge) => Ok(bridge.toggle()),
            Err(err) => Err(*err),
        }
    }

    /// Whether a dictation session is believed to be active.
    pub fn is_recording(&self) -> bool {
        matches!(&self.dictation, Ok(bridge) if bridge.is_recording())
    }

    /// Delivers a recognized transcript fragment from the host's engine.
    pub fn dictation_result(&mut self, transcript: &str) {
        if let Ok(bridge) = &mut self.dictation {
            bridge.on_result(transcript);
        }
    }

    /// Notifies that the host's dictation session ended.
    pub fn dictation_ended(&mut self) {
        if let Ok(bridge) = &mut self.dictation {
            bridge.on_end();
        }
    }

    /// Returns a snapshot of the conversation in transcript order.
    pub async fn transcript(&self) -> Vec<Message> {
        self.orchestrator.transcript().await
    }
}
