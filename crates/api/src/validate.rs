//! Field rules for request validation.
//!
//! Each operation declares its payload struct next to its handler and runs
//! these rules in a `validate` method before any side effect, collecting
//! every violation instead of stopping at the first. The rules also own
//! normalization: usernames come back trimmed and lower-cased, names
//! trimmed.

use serde::Serialize;

/// A single field-level rule violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub field: &'static str,
    pub message: String,
}

impl Violation {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

pub const USERNAME_MIN: usize = 8;
pub const USERNAME_MAX: usize = 30;
pub const PASSWORD_MIN: usize = 6;
pub const NAME_MAX: usize = 50;

/// Normalize a login identifier (trim, lower-case) and check that it is an
/// email-shaped string of acceptable length.
pub fn username(raw: &str, out: &mut Vec<Violation>) -> String {
    let value = raw.trim().to_lowercase();
    let len = value.chars().count();
    if len < USERNAME_MIN || len > USERNAME_MAX {
        out.push(Violation::new(
            "username",
            format!("must be {USERNAME_MIN} to {USERNAME_MAX} characters long"),
        ));
    }
    if !is_email_shaped(&value) {
        out.push(Violation::new("username", "must be an email address"));
    }
    value
}

pub fn password(raw: &str, out: &mut Vec<Violation>) -> String {
    if raw.chars().count() < PASSWORD_MIN {
        out.push(Violation::new(
            "password",
            format!("must be at least {PASSWORD_MIN} characters long"),
        ));
    }
    raw.to_string()
}

/// Trim a name field and check its length bound.
pub fn name(field: &'static str, raw: &str, out: &mut Vec<Violation>) -> String {
    let value = raw.trim().to_string();
    if value.chars().count() > NAME_MAX {
        out.push(Violation::new(
            field,
            format!("must be at most {NAME_MAX} characters long"),
        ));
    }
    value
}

fn is_email_shaped(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !value.chars().any(char::is_whitespace)
}
