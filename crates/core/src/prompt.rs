//! Construction of the instructional prompt sent to the backend.
//!
//! The section labels and their order are a contract with whatever renders
//! the backend's output: downstream highlighting looks up the highlighter
//! by the fence's language tag, so the template must be reproduced exactly.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The closed set of languages a solution can be requested in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetLanguage {
    /// JavaScript.
    JavaScript,
    /// Python.
    Python,
    /// C++.
    Cpp,
    /// Java.
    Java,
    /// C#.
    CSharp,
    /// Go.
    Go,
}

impl TargetLanguage {
    /// All selectable languages, in presentation order.
    pub const ALL: [TargetLanguage; 6] = [
        TargetLanguage::JavaScript,
        TargetLanguage::Python,
        TargetLanguage::Cpp,
        TargetLanguage::Java,
        TargetLanguage::CSharp,
        TargetLanguage::Go,
    ];

    /// The stable lowercase tag, as used in code fences.
    #[inline]
    pub fn tag(self) -> &'static str {
        match self {
            TargetLanguage::JavaScript => "javascript",
            TargetLanguage::Python => "python",
            TargetLanguage::Cpp => "cpp",
            TargetLanguage::Java => "java",
            TargetLanguage::CSharp => "csharp",
            TargetLanguage::Go => "go",
        }
    }
}

impl fmt::Display for TargetLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.tag().fmt(f)
    }
}

/// The error returned when parsing an unknown language name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownLanguageError(String);

impl fmt::Display for UnknownLanguageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown language: {}", self.0)
    }
}

impl std::error::Error for UnknownLanguageError {}

impl FromStr for TargetLanguage {
    type Err = UnknownLanguageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "javascript" | "js" => Ok(TargetLanguage::JavaScript),
            "python" | "py" => Ok(TargetLanguage::Python),
            "cpp" | "c++" => Ok(TargetLanguage::Cpp),
            "java" => Ok(TargetLanguage::Java),
            "csharp" | "c#" => Ok(TargetLanguage::CSharp),
            "go" | "golang" => Ok(TargetLanguage::Go),
            other => Err(UnknownLanguageError(other.to_owned())),
        }
    }
}

/// Builds the instruction prompt for a problem statement.
///
/// The problem text is interpolated verbatim, with no escaping. The four
/// numbered sections and their labels must not change; the closing
/// instruction carries the language-tagged fence hint the renderer keys
/// its highlighter on.
pub fn build_prompt(
    problem_statement: &str,
    language: TargetLanguage,
) -> String {
    let lang = language.tag();
    format!(
        r#"Provide the following information for the coding problem "{problem_statement}", specifically in {lang}:

Problem Statement: {problem_statement}

1. Brute Force Approach:
   - Code implementation (if possible, otherwise describe the approach)
   - Explanation
   - Time and Space Complexity
   - Dry run (show the execution steps with example input)

2. Better Approach:
   - Code implementation (if possible, otherwise describe the approach)
   - Explanation
   - Time and Space Complexity
   - Dry run (show the execution steps with example input)

3. Optimal Approach:
   - Code implementation (if possible, otherwise describe the approach)
   - Explanation
   - Time and Space Complexity
   - Dry run (show the execution steps with example input)

4. Edge Cases to Remember:
   - List any edge cases or special considerations for this problem.

Respond in a clear and structured format. Use code blocks (```{lang} ... ```) for code implementations, matching the selected {lang} language. If a code implementation is not possible, clearly explain the approach. Ensure the code is directly copyable. Return code in separate code blocks from explanations."#
    )
}
