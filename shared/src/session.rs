//! Phone-number sign-in. There is no backend: a submission is validated
//! locally, held for a fixed delay and then recorded as the session.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PhoneError {
    #[error("phone number must be {expected} digits, got {len}")]
    WrongLength { expected: usize, len: usize },
    #[error("phone number must contain only digits")]
    NotNumeric,
}

impl PhoneError {
    /// Catalog key of the inline form message.
    #[must_use]
    pub const fn message_key(&self) -> &'static str {
        match self {
            Self::WrongLength { .. } => "validation.phone.length",
            Self::NotNumeric => "validation.phone.digits",
        }
    }
}

/// National number with its country prefix, e.g. `+919876543210`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Length is checked before content, matching the form's message order.
    pub fn parse(digits: &str, prefix: &str, expected_len: usize) -> Result<Self, PhoneError> {
        let digits = digits.trim();
        let len = digits.chars().count();
        if len != expected_len {
            return Err(PhoneError::WrongLength {
                expected: expected_len,
                len,
            });
        }
        if !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(PhoneError::NotNumeric);
        }
        Ok(Self(format!("{prefix}{digits}")))
    }

    /// A value read back from storage; only the shape is trusted.
    #[must_use]
    pub fn from_stored(value: &str) -> Option<Self> {
        let rest = value.strip_prefix('+')?;
        (!rest.is_empty() && rest.chars().all(|c| c.is_ascii_digit()))
            .then(|| Self(value.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Last four digits for display.
    #[must_use]
    pub fn masked(&self) -> String {
        let tail: String = self
            .0
            .chars()
            .rev()
            .take(4)
            .collect::<Vec<_>>()
            .into_iter()
            .rev()
            .collect();
        format!("•••• {tail}")
    }
}

// Redacted: the number is personal data.
impl fmt::Debug for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PhoneNumber([REDACTED])")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub digits: String,
    pub error: Option<PhoneError>,
    pub submitting: bool,
    /// Bumped per submission so a stale delay cannot complete a newer one.
    pub attempt: u64,
    pending: Option<PhoneNumber>,
}

impl LoginForm {
    pub fn set_digits(&mut self, digits: impl Into<String>) {
        self.digits = digits.into();
        self.error = None;
    }

    /// Validates the entered digits. On success the form enters the
    /// submitting state and returns the attempt id to wait on.
    pub fn submit(&mut self, prefix: &str, expected_len: usize) -> Result<u64, PhoneError> {
        match PhoneNumber::parse(&self.digits, prefix, expected_len) {
            Ok(number) => {
                self.error = None;
                self.submitting = true;
                self.attempt = self.attempt.wrapping_add(1);
                self.pending = Some(number);
                Ok(self.attempt)
            }
            Err(e) => {
                self.error = Some(e.clone());
                Err(e)
            }
        }
    }

    /// Hands over the validated number once the delay for `attempt` elapsed.
    pub fn complete(&mut self, attempt: u64) -> Option<PhoneNumber> {
        if !self.submitting || attempt != self.attempt {
            return None;
        }
        self.submitting = false;
        self.digits.clear();
        self.pending.take()
    }

    pub fn reset(&mut self) {
        let attempt = self.attempt;
        *self = Self {
            attempt,
            ..Self::default()
        };
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub phone_number: Option<PhoneNumber>,
    pub logged_in: bool,
}

impl Session {
    pub fn sign_in(&mut self, number: PhoneNumber) {
        self.phone_number = Some(number);
        self.logged_in = true;
    }

    pub fn sign_out(&mut self) {
        self.phone_number = None;
        self.logged_in = false;
    }
}
