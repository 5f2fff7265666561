//! The pending-input buffer shared between the typing surface, the
//! dictation bridge, and the session.

use std::sync::{Arc, Mutex};

/// A cheaply cloneable handle to the text the user has composed but not
/// yet submitted.
///
/// Typed text and dictated transcript fragments accumulate in the same
/// buffer; submitting takes the whole buffer and clears it. All clones
/// share one buffer, and mutations are serialized by the inner lock.
#[derive(Clone, Debug, Default)]
pub struct PendingInput {
    buf: Arc<Mutex<String>>,
}

impl PendingInput {
    /// Creates an empty buffer.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends typed text as-is.
    pub fn push_str(&self, text: &str) {
        self.buf
            .lock()
            .expect("pending input lock poisoned")
            .push_str(text);
    }

    /// Appends a dictated transcript fragment, space-joined to whatever
    /// is already in the buffer.
    pub fn append_transcript(&self, transcript: &str) {
        let mut buf = self.buf.lock().expect("pending input lock poisoned");
        buf.push(' ');
        buf.push_str(transcript);
    }

    /// Takes the buffered text, leaving the buffer empty.
    pub fn take(&self) -> String {
        std::mem::take(
            &mut *self.buf.lock().expect("pending input lock poisoned"),
        )
    }

    /// A copy of the current buffer contents.
    pub fn snapshot(&self) -> String {
        self.buf.lock().expect("pending input lock poisoned").clone()
    }

    /// Whether the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.buf.lock().expect("pending input lock poisoned").is_empty()
    }
}
