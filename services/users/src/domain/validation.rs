//! Input checks run by the HTTP layer before a use case is dispatched.

use std::collections::HashSet;

use uuid::Uuid;

/// Structural email check: one `@`, non-empty local part, dotted domain, no whitespace.
pub fn validate_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
}

pub fn validate_name(name: &str) -> bool {
    !name.trim().is_empty()
}

pub fn validate_password(password: &str) -> bool {
    !password.is_empty()
}

pub fn has_duplicate_ids(ids: &[Uuid]) -> bool {
    let mut seen = HashSet::with_capacity(ids.len());
    ids.iter().any(|id| !seen.insert(id))
}
