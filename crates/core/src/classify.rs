//! The heuristic gate that decides whether free-text input is worth
//! forwarding to the backend at all.

use std::sync::LazyLock;

use regex::Regex;

/// Single-word pleasantries that are not worth a generation request.
const STOPLIST: &[&str] =
    &["hi", "hello", "hey", "thanks", "bye", "goodbye", "please"];

/// Whole-word vocabulary of programming/algorithmic discourse.
static CODING_KEYWORDS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(function|array|loop|algorithm|sort|search|data structure|linked list|tree|graph|time complexity|space complexity|brute force|optimal|code|problem|program|coding|fibonacci)\b",
    )
    .expect("keyword pattern is valid")
});

/// Returns whether the message qualifies as a coding problem statement.
///
/// A single non-greeting token is assumed to be a topic query worth
/// attempting. Longer messages must mention at least one programming
/// keyword, matched on word boundaries so that e.g. "coded" or "treehouse"
/// don't count.
///
/// This is a total function: any string, including empty or
/// whitespace-only input, yields a verdict without failing.
pub fn is_coding_problem(message: &str) -> bool {
    let trimmed = message.trim();
    if trimmed.is_empty() {
        return false;
    }

    let mut words = trimmed.split_whitespace();
    words.next();
    if words.next().is_none() {
        // Exactly one token.
        return !STOPLIST.contains(&trimmed.to_lowercase().as_str());
    }

    CODING_KEYWORDS.is_match(trimmed)
}
