use serde::{Deserialize, Serialize};

use crate::error::BackendError;

/// A completed generation from the backend.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Completion {
    /// The generated text, structured markdown with fenced code blocks.
    pub text: String,
}

/// A type that represents a generative backend, which turns a fully
/// assembled prompt into a text completion.
///
/// Once the backend is created, it should behave like a stateless object.
/// It can still have internal state, but callers should not rely on it,
/// and the backend should be prepared for being dropped anytime.
pub trait GenerativeBackend: Send + Sync {
    /// The error type that may be returned by the backend.
    type Error: BackendError;

    /// Sends a prompt to the backend.
    ///
    /// The returned future resolves once the whole completion has been
    /// received. The call may be slow or fail; callers are expected to
    /// bound the wait themselves.
    fn generate(
        &self,
        prompt: &str,
    ) -> impl Future<Output = Result<Completion, Self::Error>> + Send + 'static;
}
