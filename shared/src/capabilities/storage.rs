//! Flat string key-value storage, backed by whatever the shell has at hand
//! (`localStorage`, `UserDefaults`, `SharedPreferences`).
//!
//! The key space is closed: only [`StorageKey`] values can be addressed, so a
//! typo cannot create a stray entry. Booleans are written as `"true"` and
//! cleared by removal rather than by writing `"false"`.

use crux_core::capability::{Capability, CapabilityContext, Operation};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub const TRUE_VALUE: &str = "true";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StorageKey {
    #[serde(rename = "language")]
    Language,
    #[serde(rename = "setupCompleted")]
    SetupCompleted,
    #[serde(rename = "isLoggedIn")]
    IsLoggedIn,
    #[serde(rename = "phoneNumber")]
    PhoneNumber,
}

impl StorageKey {
    pub const ALL: [StorageKey; 4] = [
        Self::Language,
        Self::SetupCompleted,
        Self::IsLoggedIn,
        Self::PhoneNumber,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Language => "language",
            Self::SetupCompleted => "setupCompleted",
            Self::IsLoggedIn => "isLoggedIn",
            Self::PhoneNumber => "phoneNumber",
        }
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StorageKey {
    type Err = StorageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| StorageError::UnknownKey { key: s.to_string() })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StorageOperation {
    GetMany { keys: Vec<StorageKey> },
    Set { key: StorageKey, value: String },
    Remove { key: StorageKey },
}

impl StorageOperation {
    #[must_use]
    pub fn set_flag(key: StorageKey) -> Self {
        Self::Set {
            key,
            value: TRUE_VALUE.to_string(),
        }
    }

    /// The single key this operation writes, if it writes one.
    #[must_use]
    pub fn written_key(&self) -> Option<StorageKey> {
        match self {
            Self::Set { key, .. } | Self::Remove { key } => Some(*key),
            Self::GetMany { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StorageOutput {
    /// One entry per requested key, in request order.
    Values(Vec<(StorageKey, Option<String>)>),
    Written,
    Removed { existed: bool },
}

#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
pub enum StorageError {
    #[error("unknown storage key: {key}")]
    UnknownKey { key: String },

    #[error("storage unavailable: {message}")]
    Unavailable { message: String },

    #[error("quota exceeded writing {key}")]
    QuotaExceeded { key: String },

    #[error("unexpected storage output for {operation}")]
    UnexpectedOutput { operation: String },
}

pub type StorageResult = Result<StorageOutput, StorageError>;

impl Operation for StorageOperation {
    type Output = StorageResult;
}

pub struct Storage<Ev> {
    context: CapabilityContext<StorageOperation, Ev>,
}

impl<Ev> Clone for Storage<Ev> {
    fn clone(&self) -> Self {
        Self {
            context: self.context.clone(),
        }
    }
}

impl<Ev> Capability<Ev> for Storage<Ev> {
    type Operation = StorageOperation;
    type MappedSelf<MappedEv> = Storage<MappedEv>;

    fn map_event<F, NewEv>(&self, f: F) -> Self::MappedSelf<NewEv>
    where
        F: Fn(NewEv) -> Ev + Send + Sync + 'static,
        Ev: 'static,
        NewEv: 'static + Send,
    {
        Storage::new(self.context.map_event(f))
    }
}

impl<Ev> Storage<Ev>
where
    Ev: 'static,
{
    pub fn new(context: CapabilityContext<StorageOperation, Ev>) -> Self {
        Self { context }
    }

    pub fn get_many<F>(&self, keys: Vec<StorageKey>, make_event: F)
    where
        F: FnOnce(StorageResult) -> Ev + Send + 'static,
    {
        self.request(StorageOperation::GetMany { keys }, make_event);
    }

    pub fn set<F>(&self, key: StorageKey, value: impl Into<String>, make_event: F)
    where
        F: FnOnce(StorageResult) -> Ev + Send + 'static,
    {
        self.request(
            StorageOperation::Set {
                key,
                value: value.into(),
            },
            make_event,
        );
    }

    pub fn remove<F>(&self, key: StorageKey, make_event: F)
    where
        F: FnOnce(StorageResult) -> Ev + Send + 'static,
    {
        self.request(StorageOperation::Remove { key }, make_event);
    }

    fn request<F>(&self, operation: StorageOperation, make_event: F)
    where
        F: FnOnce(StorageResult) -> Ev + Send + 'static,
    {
        let ctx = self.context.clone();
        self.context.spawn(async move {
            let result = ctx.request_from_shell(operation).await;
            ctx.update_app(make_event(result));
        });
    }
}

/// Pulls the values out of a `GetMany` answer.
pub fn expect_values(
    result: StorageResult,
) -> Result<Vec<(StorageKey, Option<String>)>, StorageError> {
    match result? {
        StorageOutput::Values(values) => Ok(values),
        other => Err(StorageError::UnexpectedOutput {
            operation: format!("get_many -> {other:?}"),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_use_their_stored_names() {
        assert_eq!(
            serde_json::to_string(&StorageKey::SetupCompleted).unwrap(),
            "\"setupCompleted\""
        );
        for key in StorageKey::ALL {
            assert_eq!(key.as_str().parse::<StorageKey>().unwrap(), key);
        }
    }

    #[test]
    fn unknown_key_is_rejected() {
        assert_eq!(
            "setup_completed".parse::<StorageKey>(),
            Err(StorageError::UnknownKey {
                key: "setup_completed".into()
            })
        );
    }

    #[test]
    fn flags_are_written_as_true() {
        assert_eq!(
            StorageOperation::set_flag(StorageKey::IsLoggedIn),
            StorageOperation::Set {
                key: StorageKey::IsLoggedIn,
                value: "true".into()
            }
        );
    }

    #[test]
    fn written_key_only_for_writes() {
        assert_eq!(
            StorageOperation::Remove {
                key: StorageKey::PhoneNumber
            }
            .written_key(),
            Some(StorageKey::PhoneNumber)
        );
        assert_eq!(
            StorageOperation::GetMany {
                keys: StorageKey::ALL.to_vec()
            }
            .written_key(),
            None
        );
    }

    #[test]
    fn expect_values_rejects_other_outputs() {
        assert!(expect_values(Ok(StorageOutput::Written)).is_err());
        let err = StorageError::Unavailable {
            message: "locked".into(),
        };
        assert_eq!(expect_values(Err(err.clone())), Err(err));
        let values = vec![(StorageKey::Language, Some("hi".to_string()))];
        assert_eq!(
            expect_values(Ok(StorageOutput::Values(values.clone()))),
            Ok(values)
        );
    }
}
