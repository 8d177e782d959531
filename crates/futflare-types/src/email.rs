use regex::Regex;
use std::sync::LazyLock;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

/// Syntactic email check used to gate the participant input.
///
/// A blank string counts as valid so an empty field is never flagged; the
/// participant list refuses blank entries separately.
pub fn is_valid_email(email: &str) -> bool {
    let email = email.trim();
    email.is_empty() || EMAIL_RE.is_match(email)
}
