//! Syntactic email address check used for tool input schemas and config.

use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?i)[A-Z0-9_'+\-.]*[A-Z0-9_+\-]@(?:[A-Z0-9][A-Z0-9\-]*\.)+[A-Z]{2,}$")
        .expect("Email address regex failed to compile. This is a bug.")
});

/// Returns true when `candidate` is a syntactically acceptable address.
///
/// The local part may not start with a dot nor contain consecutive dots.
pub fn is_valid_email(candidate: &str) -> bool {
    let Some((local, _)) = candidate.split_once('@') else {
        return false;
    };
    if local.starts_with('.') || candidate.contains("..") {
        return false;
    }
    EMAIL_REGEX.is_match(candidate)
}
