//! A local fake backend for testing purpose.

mod preset;

use std::collections::VecDeque;
use std::fmt::{self, Debug, Display, Formatter};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use codegen_chat_backend::{
    BackendError, Completion, ErrorKind, GenerativeBackend,
};
use tokio::time::sleep;

pub use preset::*;

#[derive(Debug)]
pub struct Error {
    #[allow(dead_code)]
    message: &'static str,
    kind: ErrorKind,
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Debug::fmt(self, f)
    }
}

impl std::error::Error for Error {}

impl BackendError for Error {
    #[inline]
    fn kind(&self) -> ErrorKind {
        self.kind
    }
}

/// A local fake backend for testing purpose.
///
/// Before sending requests, you need to setup the script, which is how the
/// backend should respond to requests. Scripted outcomes are consumed in
/// order, one per request. If the script runs out, an error is returned.
///
/// # Note
///
/// This type is not optimized for production use. You should only use it
/// for testing.
#[derive(Clone, Default)]
pub struct ScriptedBackend {
    script: Arc<Mutex<VecDeque<PresetOutcome>>>,
    delay: Option<Duration>,
}

impl ScriptedBackend {
    /// Appends an outcome to the script.
    #[inline]
    pub fn add_outcome(&mut self, outcome: PresetOutcome) {
        self.script
            .lock()
            .expect("script lock poisoned")
            .push_back(outcome);
    }

    /// Appends a successful reply to the script.
    #[inline]
    pub fn add_reply(&mut self, text: impl Into<String>) {
        self.add_outcome(PresetOutcome::reply(text));
    }

    /// Appends a failure to the script.
    #[inline]
    pub fn add_failure(&mut self, kind: ScriptedErrorKind) {
        self.add_outcome(PresetOutcome::failure(kind));
    }

    /// Sets the artificial latency for every request.
    #[inline]
    pub fn set_delay(&mut self, duration: Duration) {
        self.delay = Some(duration);
    }
}

impl GenerativeBackend for ScriptedBackend {
    type Error = Error;

    fn generate(
        &self,
        _prompt: &str,
    ) -> impl Future<Output = Result<Completion, Self::Error>> + Send + 'static
    {
        let outcome = self
            .script
            .lock()
            .expect("script lock poisoned")
            .pop_front();
        let delay = self.delay.unwrap_or(Duration::from_millis(1));

        async move {
            sleep(delay).await;
            match outcome {
                Some(PresetOutcome::Reply(text)) => Ok(Completion { text }),
                Some(PresetOutcome::Failure(kind)) => Err(Error {
                    message: "scripted failure",
                    kind: kind.into(),
                }),
                None => Err(Error {
                    message: "no enough outcomes",
                    kind: ErrorKind::Other,
                }),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_scripted_outcomes_in_order() {
        let mut backend = ScriptedBackend::default();
        backend.add_reply("first");
        backend.add_failure(ScriptedErrorKind::RateLimitExceeded);

        let completion = backend.generate("p1").await.unwrap();
        assert_eq!(completion.text, "first");

        let err = backend.generate("p2").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::RateLimitExceeded);

        // Script exhausted.
        let err = backend.generate("p3").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Other);
    }
}
