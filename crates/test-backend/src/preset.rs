use serde::{Deserialize, Serialize};

use codegen_chat_backend::ErrorKind;

/// The error kinds a script can ask for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScriptedErrorKind {
    Moderated,
    RateLimitExceeded,
    DeadlineExceeded,
    Other,
}

impl From<ScriptedErrorKind> for ErrorKind {
    fn from(kind: ScriptedErrorKind) -> Self {
        match kind {
            ScriptedErrorKind::Moderated => ErrorKind::Moderated,
            ScriptedErrorKind::RateLimitExceeded => {
                ErrorKind::RateLimitExceeded
            }
            ScriptedErrorKind::DeadlineExceeded => ErrorKind::DeadlineExceeded,
            ScriptedErrorKind::Other => ErrorKind::Other,
        }
    }
}

/// One scripted outcome for a request.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum PresetOutcome {
    /// The request succeeds with the given completion text.
    #[serde(rename = "reply")]
    Reply(String),
    /// The request fails with an error of the given kind.
    #[serde(rename = "failure")]
    Failure(ScriptedErrorKind),
}

impl PresetOutcome {
    /// Creates a successful outcome with the specified text.
    #[inline]
    pub fn reply(text: impl Into<String>) -> Self {
        Self::Reply(text.into())
    }

    /// Creates a failing outcome of the specified kind.
    #[inline]
    pub fn failure(kind: ScriptedErrorKind) -> Self {
        Self::Failure(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialize_deserialize() {
        let outcomes = vec![
            PresetOutcome::reply("Here is the four-section breakdown."),
            PresetOutcome::failure(ScriptedErrorKind::RateLimitExceeded),
        ];

        let serialized = serde_json::to_string(&outcomes).unwrap();
        let deserialized: Vec<PresetOutcome> =
            serde_json::from_str(&serialized).unwrap();

        assert_eq!(outcomes, deserialized);
    }
}
