use std::pin::Pin;
use std::sync::Arc;

use codegen_chat_backend::{BackendError, Completion, GenerativeBackend};
use tracing::Instrument;

type GenerateResult = Result<Completion, Box<dyn BackendError>>;
type BoxedGenerateFuture =
    Pin<Box<dyn Future<Output = GenerateResult> + Send>>;
type HandlerFn =
    Arc<dyn Fn(String) -> BoxedGenerateFuture + Send + Sync>;

/// A wrapper around a generative backend that provides a type-erased
/// interface for the other modules.
#[derive(Clone)]
pub struct BackendClient {
    handler_fn: HandlerFn,
}

impl BackendClient {
    /// Wraps the specified backend.
    #[inline]
    pub fn new<B: GenerativeBackend + 'static>(backend: B) -> Self {
        // We have to erase the type `B`, since `BackendClient` doesn't have
        // a generic parameter and we don't want it either.
        let handler_fn: HandlerFn = Arc::new(move |prompt| {
            let fut = backend.generate(&prompt);
            Box::pin(
                async move {
                    trace!("dispatching a prompt of {} bytes", prompt.len());
                    match fut.await {
                        Ok(completion) => Ok(completion),
                        Err(err) => {
                            error!("got an error: {err:?}");
                            Err(Box::new(err) as Box<dyn BackendError>)
                        }
                    }
                }
                .instrument(trace_span!("backend req")),
            )
        });
        Self { handler_fn }
    }

    /// Sends a prompt and returns the completion.
    ///
    /// # Cancel safety
    ///
    /// This method is cancel safe. Dropping the returned future abandons
    /// the in-flight request.
    #[inline]
    pub async fn generate(&self, prompt: String) -> GenerateResult {
        (self.handler_fn)(prompt).await
    }
}

#[cfg(test)]
mod tests {
    use codegen_chat_backend::ErrorKind;
    use codegen_chat_test_backend::{ScriptedBackend, ScriptedErrorKind};

    use super::*;

    #[tokio::test]
    async fn test_generate() {
        let mut backend = ScriptedBackend::default();
        backend.add_reply("a structured answer");

        let client = BackendClient::new(backend);
        let completion = client.generate("prompt".to_owned()).await.unwrap();
        assert_eq!(completion.text, "a structured answer");
    }

    #[tokio::test]
    async fn test_error_handling() {
        let mut backend = ScriptedBackend::default();
        backend.add_failure(ScriptedErrorKind::Moderated);

        let client = BackendClient::new(backend);
        let err = client.generate("prompt".to_owned()).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Moderated);
    }
}
