//! The bridge between an external speech recognizer and the pending-input
//! buffer.

use std::error::Error;
use std::fmt;

use crate::input::PendingInput;

/// The host-supplied speech recognition capability.
///
/// One activation captures a single utterance; the engine reports the
/// recognized text and the end of the session back through the bridge's
/// [`DictationBridge::on_result`] and [`DictationBridge::on_end`].
pub trait SpeechRecognizer: Send {
    /// Requests the engine to start listening.
    fn start(&mut self);

    /// Requests the engine to stop listening.
    fn stop(&mut self);
}

impl<R: SpeechRecognizer + ?Sized> SpeechRecognizer for Box<R> {
    #[inline]
    fn start(&mut self) {
        (**self).start();
    }

    #[inline]
    fn stop(&mut self) {
        (**self).stop();
    }
}

/// The host environment offers no speech recognition capability.
///
/// Probing happens once at construction, so callers hold either a working
/// bridge or this error, and can surface an explicit "not supported"
/// notice instead of silently doing nothing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DictationUnavailable;

impl fmt::Display for DictationUnavailable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        "speech recognition is not supported in this environment".fmt(f)
    }
}

impl Error for DictationUnavailable {}

/// Adapter that feeds recognized speech into the pending-input buffer.
///
/// The recording indicator is flipped optimistically when [`toggle`] is
/// invoked, before the engine confirms; [`on_end`] resets it no matter why
/// the session ended (explicit stop, silence timeout, or engine error).
///
/// [`toggle`]: DictationBridge::toggle
/// [`on_end`]: DictationBridge::on_end
pub struct DictationBridge<R> {
    recognizer: R,
    pending: PendingInput,
    recording: bool,
}

impl<R: SpeechRecognizer> DictationBridge<R> {
    /// Negotiates the capability and builds a bridge.
    pub fn probe(
        recognizer: Option<R>,
        pending: PendingInput,
    ) -> Result<Self, DictationUnavailable> {
        let Some(recognizer) = recognizer else {
            return Err(DictationUnavailable);
        };
        Ok(Self {
            recognizer,
            pending,
            recording: false,
        })
    }

    /// Starts or stops a dictation session, returning the new (optimistic)
    /// recording state.
    pub fn toggle(&mut self) -> bool {
        if self.recording {
            self.recognizer.stop();
        } else {
            self.recognizer.start();
        }
        self.recording = !self.recording;
        self.recording
    }

    /// Whether a dictation session is believed to be active.
    #[inline]
    pub fn is_recording(&self) -> bool {
        self.recording
    }

    /// Delivers a recognized transcript fragment.
    pub fn on_result(&mut self, transcript: &str) {
        trace!("recognized: {transcript:?}");
        self.pending.append_transcript(transcript);
    }

    /// Notifies that the dictation session ended.
    pub fn on_end(&mut self) {
        self.recording = false;
    }
}
