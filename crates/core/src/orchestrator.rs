mod builder;
mod state;
#[cfg(test)]
mod tests;

use tokio::sync::{mpsc, oneshot};
use tracing::Instrument;

use crate::conversation::Message;
use crate::prompt::TargetLanguage;
pub use builder::OrchestratorBuilder;
pub use state::Phase;
use state::{Command, OrchestratorState};

/// Handle to the generation orchestrator.
///
/// The orchestrator runs as a single task that owns the conversation log
/// and the lifecycle phase; every handle clone feeds the same command
/// channel, so all mutations are serialized in arrival order. Commands are
/// accepted no matter what phase the orchestrator is in: a submit that
/// arrives while a generation is in flight is held back and processed when
/// the active request resolves, never run concurrently with it.
pub struct Orchestrator {
    cmd_tx: mpsc::UnboundedSender<Command>,
}

impl Orchestrator {
    fn spawn_from_builder(builder: OrchestratorBuilder) -> Self {
        let OrchestratorBuilder {
            backend,
            language,
            request_timeout,
            greeting,
            on_message,
            on_idle,
        } = builder;

        let state = OrchestratorState::new(
            backend,
            language,
            request_timeout,
            greeting,
            on_message,
            on_idle,
        );
        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
        let weak_tx = cmd_tx.downgrade();
        tokio::spawn(
            state::run(state, cmd_rx, weak_tx)
                .instrument(trace_span!("orchestrator")),
        );
        Self { cmd_tx }
    }

    /// Submits raw user input.
    ///
    /// Input that trims to empty is ignored. Anything else is appended to
    /// the conversation as a user message before classification, so the
    /// transcript always reflects what was sent.
    pub fn submit<S: Into<String>>(&self, raw_input: S) {
        self.send(Command::Submit(raw_input.into()));
    }

    /// Sets the language used for subsequently built prompts.
    pub fn set_language(&self, language: TargetLanguage) {
        self.send(Command::SetLanguage(language));
    }

    /// Returns a snapshot of the conversation in transcript order.
    pub async fn transcript(&self) -> Vec<Message> {
        let (tx, rx) = oneshot::channel();
        self.send(Command::Transcript(tx));
        rx.await
            .expect("orchestrator task has been dropped too early")
    }

    /// Returns the current lifecycle phase.
    pub async fn phase(&self) -> Phase {
        let (tx, rx) = oneshot::channel();
        self.send(Command::Phase(tx));
        rx.await
            .expect("orchestrator task has been dropped too early")
    }

    fn send(&self, cmd: Command) {
        self.cmd_tx
            .send(cmd)
            .expect("orchestrator task has been dropped too early");
    }
}

impl Clone for Orchestrator {
    fn clone(&self) -> Self {
        Self {
            cmd_tx: self.cmd_tx.clone(),
        }
    }
}
