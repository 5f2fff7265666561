use std::collections::VecDeque;
use std::error::Error;
use std::fmt;
use std::time::Duration;

use codegen_chat_backend::{BackendError, Completion, ErrorKind};
use tokio::sync::{mpsc, oneshot};
use tokio::time::timeout;

use crate::backend_client::BackendClient;
use crate::classify::is_coding_problem;
use crate::conversation::{Conversation, Message, Sender};
use crate::prompt::{TargetLanguage, build_prompt};

/// Notice appended when the classifier declines a message.
pub(crate) const REJECTION_NOTICE: &str =
    "Invalid input. Please provide a coding problem statement.";

/// Notice appended when a generation request fails, times out included.
/// The root cause is logged, never shown to the user.
pub(crate) const FAILURE_NOTICE: &str =
    "Error: Could not process the request.";

/// The lifecycle phase of the orchestrator.
///
/// The machine cycles between the two phases for the lifetime of the
/// session; there is no terminal phase. Exactly one completion (success
/// or failure) returns an accepted request to [`Phase::Idle`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Phase {
    /// No generation request is in flight.
    #[default]
    Idle,
    /// A single generation request is in flight.
    AwaitingResponse,
}

pub(super) type MessageCallback = Box<dyn Fn(&Message) + Send + Sync>;
pub(super) type IdleCallback = Box<dyn Fn() + Send + Sync>;
type WeakCommandSender = mpsc::WeakUnboundedSender<Command>;

#[derive(Debug)]
pub(super) enum Command {
    Submit(String),
    SetLanguage(TargetLanguage),
    GenerationFinished(Result<Completion, Box<dyn BackendError>>),
    Transcript(oneshot::Sender<Vec<Message>>),
    Phase(oneshot::Sender<Phase>),
}

pub(super) struct OrchestratorState {
    backend: BackendClient,
    conversation: Conversation,
    phase: Phase,
    language: TargetLanguage,
    request_timeout: Duration,
    greeting: Option<String>,
    pending_submits: VecDeque<String>,
    on_message: Option<MessageCallback>,
    on_idle: Option<IdleCallback>,
}

impl OrchestratorState {
    pub(super) fn new(
        backend: BackendClient,
        language: TargetLanguage,
        request_timeout: Duration,
        greeting: Option<String>,
        on_message: Option<MessageCallback>,
        on_idle: Option<IdleCallback>,
    ) -> Self {
        Self {
            backend,
            conversation: Conversation::new(),
            phase: Phase::default(),
            language,
            request_timeout,
            greeting,
            pending_submits: VecDeque::new(),
            on_message,
            on_idle,
        }
    }

    fn handle_command(&mut self, cmd: Command, weak_tx: &WeakCommandSender) {
        match cmd {
            Command::Submit(raw) => self.submit(raw, weak_tx),
            Command::SetLanguage(language) => self.language = language,
            Command::GenerationFinished(result) => {
                self.finish_generation(result, weak_tx);
            }
            Command::Transcript(tx) => {
                tx.send(self.conversation.messages().to_vec()).ok();
            }
            Command::Phase(tx) => {
                tx.send(self.phase).ok();
            }
        }
    }

    fn submit(&mut self, raw: String, weak_tx: &WeakCommandSender) {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return;
        }
        let text = trimmed.to_owned();

        // The user message lands in the transcript no matter what the
        // classifier decides.
        self.push_message(Sender::User, text.clone());

        if self.phase != Phase::Idle {
            // Single-flight: hold the text until the active request
            // resolves. Backend calls are never overlapped.
            self.pending_submits.push_back(text);
            return;
        }
        self.process_submission(text, weak_tx);
    }

    /// Classifies and, if accepted, starts a generation. The phase must
    /// be `Idle` when this is called.
    fn process_submission(
        &mut self,
        text: String,
        weak_tx: &WeakCommandSender,
    ) {
        if !is_coding_problem(&text) {
            self.push_message(Sender::Assistant, REJECTION_NOTICE.to_owned());
            self.process_next_pending(weak_tx);
            return;
        }

        self.phase = Phase::AwaitingResponse;
        let prompt = build_prompt(&text, self.language);
        let backend = self.backend.clone();
        let deadline = self.request_timeout;
        let weak_tx = weak_tx.clone();
        tokio::spawn(async move {
            let result = match timeout(deadline, backend.generate(prompt))
                .await
            {
                Ok(result) => result,
                Err(_) => {
                    Err(Box::new(RequestTimedOut) as Box<dyn BackendError>)
                }
            };
            if let Some(tx) = weak_tx.upgrade() {
                tx.send(Command::GenerationFinished(result)).ok();
            }
        });
    }

    fn finish_generation(
        &mut self,
        result: Result<Completion, Box<dyn BackendError>>,
        weak_tx: &WeakCommandSender,
    ) {
        match result {
            Ok(completion) => {
                // The response text is appended verbatim; the four-section
                // structure is advisory to the backend, not enforced here.
                self.push_message(Sender::Assistant, completion.text);
            }
            Err(err) => {
                error!("generation failed: {err}");
                self.push_message(
                    Sender::Assistant,
                    FAILURE_NOTICE.to_owned(),
                );
            }
        }
        self.phase = Phase::Idle;
        self.process_next_pending(weak_tx);
    }

    fn process_next_pending(&mut self, weak_tx: &WeakCommandSender) {
        if self.phase != Phase::Idle {
            return;
        }
        if let Some(text) = self.pending_submits.pop_front() {
            self.process_submission(text, weak_tx);
        } else if let Some(on_idle) = &self.on_idle {
            on_idle();
        }
    }

    fn push_message(&mut self, sender: Sender, content: String) {
        let message = self.conversation.push(sender, content);
        if let Some(on_message) = &self.on_message {
            on_message(message);
        }
    }
}

pub(super) async fn run(
    mut state: OrchestratorState,
    mut cmd_rx: mpsc::UnboundedReceiver<Command>,
    weak_tx: WeakCommandSender,
) {
    debug!("started");
    if let Some(greeting) = state.greeting.take() {
        state.push_message(Sender::Assistant, greeting);
    }
    while let Some(cmd) = cmd_rx.recv().await {
        trace!("received command: {cmd:?}");
        state.handle_command(cmd, &weak_tx);
    }
    debug!("will terminate");
}

/// The in-flight request exceeded the configured deadline.
#[derive(Debug)]
struct RequestTimedOut;

impl fmt::Display for RequestTimedOut {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        "the generation request did not complete before its deadline".fmt(f)
    }
}

impl Error for RequestTimedOut {}

impl BackendError for RequestTimedOut {
    #[inline]
    fn kind(&self) -> ErrorKind {
        ErrorKind::DeadlineExceeded
    }
}
