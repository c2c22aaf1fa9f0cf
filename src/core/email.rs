//! Signup address parsing.
//!
//! Browsers check `<input type="email" required>` themselves. This mirrors the
//! HTML "valid e-mail address" production, so hosts without native validation
//! agree with the browser, and every notification carries a [`SignupEmail`]
//! that has passed the same grammar.

use std::fmt;

use crate::error::ValidationError;

const MAX_LABEL_LEN: usize = 63;

/// A trimmed, syntactically valid signup address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignupEmail(String);

impl SignupEmail {
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty);
        }
        if !is_valid_email(trimmed) {
            return Err(ValidationError::Malformed(trimmed.to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for SignupEmail {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SignupEmail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// `true` when `value` is a valid e-mail address per the HTML living standard.
/// The empty string is invalid because the signup field is required.
pub fn is_valid_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty() && local.chars().all(is_local_char) && is_valid_domain(domain)
}

fn is_local_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || ".!#$%&'*+/=?^_`{|}~-".contains(c)
}

fn is_valid_domain(domain: &str) -> bool {
    // A second '@' lands here and fails the label check.
    domain.split('.').all(is_valid_label)
}

fn is_valid_label(label: &str) -> bool {
    let bytes = label.as_bytes();
    let (Some(first), Some(last)) = (bytes.first(), bytes.last()) else {
        return false;
    };
    bytes.len() <= MAX_LABEL_LEN
        && first.is_ascii_alphanumeric()
        && last.is_ascii_alphanumeric()
        && bytes.iter().all(|b| b.is_ascii_alphanumeric() || *b == b'-')
}
