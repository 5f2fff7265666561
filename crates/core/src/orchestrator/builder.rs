use std::time::Duration;

use codegen_chat_backend::GenerativeBackend;

use super::Orchestrator;
use super::state::{IdleCallback, MessageCallback};
use crate::backend_client::BackendClient;
use crate::conversation::Message;
use crate::prompt::TargetLanguage;

/// Greeting seeded at the top of a new conversation.
const GREETING: &str = "Hello! Please provide a coding problem statement.";

const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// [`Orchestrator`] builder.
pub struct OrchestratorBuilder {
    pub(crate) backend: BackendClient,
    pub(crate) language: TargetLanguage,
    pub(crate) request_timeout: Duration,
    pub(crate) greeting: Option<String>,
    pub(crate) on_message: Option<MessageCallback>,
    pub(crate) on_idle: Option<IdleCallback>,
}

impl OrchestratorBuilder {
    /// Creates a new builder with the specified backend.
    #[inline]
    pub fn with_backend<B: GenerativeBackend + 'static>(backend: B) -> Self {
        Self {
            backend: BackendClient::new(backend),
            language: TargetLanguage::JavaScript,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            greeting: Some(GREETING.to_owned()),
            on_message: None,
            on_idle: None,
        }
    }

    /// Sets the initial target language. Defaults to JavaScript.
    #[inline]
    pub fn with_language(mut self, language: TargetLanguage) -> Self {
        self.language = language;
        self
    }

    /// Bounds the wait on every backend call. An expired deadline is
    /// reported through the normal failure path.
    #[inline]
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Replaces the default seeded greeting.
    #[inline]
    pub fn with_greeting<S: Into<String>>(mut self, greeting: S) -> Self {
        self.greeting = Some(greeting.into());
        self
    }

    /// Starts the conversation without a seeded greeting.
    #[inline]
    pub fn without_greeting(mut self) -> Self {
        self.greeting = None;
        self
    }

    /// Attaches a callback to be invoked for every appended message.
    #[inline]
    pub fn on_message(
        mut self,
        on_message: impl Fn(&Message) + Send + Sync + 'static,
    ) -> Self {
        self.on_message = Some(Box::new(on_message));
        self
    }

    /// Attaches a callback to be invoked when the orchestrator becomes
    /// idle with nothing left to process.
    #[inline]
    pub fn on_idle(
        mut self,
        on_idle: impl Fn() + Send + Sync + 'static,
    ) -> Self {
        self.on_idle = Some(Box::new(on_idle));
        self
    }

    /// Builds the orchestrator.
    #[inline]
    pub fn build(self) -> Orchestrator {
        Orchestrator::spawn_from_builder(self)
    }
}
