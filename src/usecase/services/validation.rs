use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^[a-z0-9!#$%&'*+/=?^_`{|}~.-]+@[a-z0-9]([a-z0-9-]*[a-z0-9])?(\.[a-z0-9]([a-z0-9-]*[a-z0-9])?)*$",
    )
    .expect("email pattern should compile")
});

/// Fail-fast duplicate scan: stops at the first repeated key and reports
/// only that one, together with the index it was found at.
pub fn first_duplicate<'a>(keys: impl Iterator<Item = &'a str>) -> Option<(usize, &'a str)> {
    let mut seen = HashSet::new();
    for (index, key) in keys.enumerate() {
        if !seen.insert(key) {
            return Some((index, key));
        }
    }
    None
}

/// An empty e-mail is acceptable; anything else must look like an address.
pub fn valid_email(email: &str) -> bool {
    email.is_empty() || (email.len() > 5 && EMAIL_RE.is_match(email))
}

/// Validates a full row set before a bulk save. On failure the save is
/// aborted with no network call and the concatenated message is surfaced.
pub trait RowValidator<R> {
    fn validate(&self, rows: &[R]) -> Result<(), String>;
}
