//! Email syntax checks and tagged-email extraction.
//!
//! Everything here is a pure function over plain strings: validation never
//! errors (bad input is just `false`), extraction never errors (bad tokens
//! are dropped). Persistence and request plumbing live elsewhere.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Accepted address shape: 3–255 local-part characters, a domain of
    /// letters/digits/dots/hyphens, and a top-level label of at least two
    /// letters. Word-boundary anchored, matched against the lowercased input.
    static ref EMAIL_RE: Regex =
        Regex::new(r"\b[a-z0-9._%+-]{3,255}@[a-z0-9.-]+\.[a-z]{2,}\b").unwrap();

    /// Token delimiter for notification text: a whitespace run followed by
    /// `@` marks a tagged token; a plain whitespace run is an ordinary break.
    /// Alternation order matters: the tagged form must win when both match.
    static ref TOKEN_SPLIT_RE: Regex = Regex::new(r"\s+@|\s+").unwrap();
}

/// Check whether `email` is a syntactically acceptable address.
///
/// Leading/trailing whitespace is ignored and matching is case-insensitive.
/// An empty or all-whitespace string is invalid.
pub fn is_valid_email(email: &str) -> bool {
    let trimmed = email.trim();
    if trimmed.is_empty() {
        return false;
    }
    EMAIL_RE.is_match(&trimmed.to_lowercase())
}

/// Check that every address in `emails` is valid. An empty list passes.
pub fn are_valid_emails<S: AsRef<str>>(emails: &[S]) -> bool {
    emails.iter().all(|email| is_valid_email(email.as_ref()))
}

/// Extract the validly-formatted emails tagged with `@` from free-form text.
///
/// The message is split on `TOKEN_SPLIT_RE`, which strips the `@` marker off
/// tokens that follow one; each token is then trimmed and kept only if it
/// validates. A tag at the very start of the message has no preceding
/// whitespace, so its `@` is never stripped and the token fails validation.
/// Results keep encounter order and are not deduplicated; callers dedup.
pub fn parse_tagged_emails(message: &str) -> Vec<String> {
    TOKEN_SPLIT_RE
        .split(message)
        .map(str::trim)
        .filter(|token| is_valid_email(token))
        .map(str::to_string)
        .collect()
}

/// Collapse duplicates while preserving first-seen order.
pub fn dedup_emails(emails: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    emails
        .into_iter()
        .filter(|email| seen.insert(email.clone()))
        .collect()
}
