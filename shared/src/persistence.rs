//! What survives a restart: the four stored keys, decoded once at startup.

use tracing::warn;

use crate::capabilities::{StorageKey, TRUE_VALUE};
use crate::i18n::Language;
use crate::session::PhoneNumber;

/// Keys read at startup, in request order.
pub const STARTUP_KEYS: [StorageKey; 4] = StorageKey::ALL;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersistedState {
    pub language: Option<Language>,
    pub setup_completed: bool,
    pub logged_in: bool,
    pub phone_number: Option<PhoneNumber>,
}

impl PersistedState {
    /// Decodes a `GetMany` answer. Values that do not parse are logged and
    /// treated as absent; a flag counts only when it reads exactly `"true"`.
    #[must_use]
    pub fn from_values(values: &[(StorageKey, Option<String>)]) -> Self {
        let mut state = Self::default();
        for (key, value) in values {
            let Some(value) = value.as_deref() else {
                continue;
            };
            match key {
                StorageKey::Language => match value.parse::<Language>() {
                    Ok(language) => state.language = Some(language),
                    Err(e) => warn!(error = %e, "ignoring stored language"),
                },
                StorageKey::SetupCompleted => state.setup_completed = value == TRUE_VALUE,
                StorageKey::IsLoggedIn => state.logged_in = value == TRUE_VALUE,
                StorageKey::PhoneNumber => {
                    state.phone_number = PhoneNumber::from_stored(value);
                    if state.phone_number.is_none() {
                        warn!("ignoring malformed stored phone number");
                    }
                }
            }
        }
        state
    }

    /// The wizard shows only on a true first run.
    #[must_use]
    pub fn needs_setup(&self) -> bool {
        !self.setup_completed && !self.logged_in
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(pairs: &[(StorageKey, Option<&str>)]) -> Vec<(StorageKey, Option<String>)> {
        pairs
            .iter()
            .map(|(k, v)| (*k, v.map(str::to_string)))
            .collect()
    }

    #[test]
    fn fresh_install_needs_setup() {
        let state = PersistedState::from_values(&values(&[
            (StorageKey::Language, None),
            (StorageKey::SetupCompleted, None),
            (StorageKey::IsLoggedIn, None),
            (StorageKey::PhoneNumber, None),
        ]));
        assert_eq!(state, PersistedState::default());
        assert!(state.needs_setup());
    }

    #[test]
    fn either_flag_skips_setup() {
        let setup = PersistedState::from_values(&values(&[(
            StorageKey::SetupCompleted,
            Some("true"),
        )]));
        assert!(!setup.needs_setup());

        let login = PersistedState::from_values(&values(&[(StorageKey::IsLoggedIn, Some("true"))]));
        assert!(!login.needs_setup());
    }

    #[test]
    fn only_exact_true_counts() {
        let state = PersistedState::from_values(&values(&[
            (StorageKey::SetupCompleted, Some("TRUE")),
            (StorageKey::IsLoggedIn, Some("false")),
        ]));
        assert!(!state.setup_completed);
        assert!(!state.logged_in);
    }

    #[test]
    fn language_and_number_decode() {
        let state = PersistedState::from_values(&values(&[
            (StorageKey::Language, Some("hi")),
            (StorageKey::PhoneNumber, Some("+919876543210")),
        ]));
        assert_eq!(state.language, Some(Language::Hindi));
        assert_eq!(
            state.phone_number.as_ref().map(PhoneNumber::as_str),
            Some("+919876543210")
        );
    }

    #[test]
    fn garbage_values_are_dropped() {
        let state = PersistedState::from_values(&values(&[
            (StorageKey::Language, Some("klingon")),
            (StorageKey::PhoneNumber, Some("call me")),
        ]));
        assert!(state.language.is_none());
        assert!(state.phone_number.is_none());
    }
}
