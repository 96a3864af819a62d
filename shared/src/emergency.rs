//! Trusted contacts and the (simulated) emergency alert.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

pub const DEFAULT_RELATION: &str = "Other";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContactError {
    #[error("contact name is required")]
    MissingName,
    #[error("contact phone is required")]
    MissingPhone,
    #[error("at most {max} trusted contacts")]
    LimitReached { max: usize },
    #[error("no contact with id {0:?}")]
    UnknownContact(String),
}

impl ContactError {
    /// Title and description keys of the advisory toast.
    #[must_use]
    pub const fn toast_keys(&self) -> (&'static str, &'static str) {
        match self {
            Self::MissingName => ("toast.contact.missing", "validation.contact.name"),
            Self::MissingPhone => ("toast.contact.missing", "validation.contact.phone"),
            Self::LimitReached { .. } => ("toast.contact.limit", "toast.contact.limit.desc"),
            Self::UnknownContact(_) => ("toast.contact.missing", "toast.contact.missing.desc"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmergencyContact {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub relation: String,
}

/// Unvalidated input from the add-contact form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactDraft {
    pub name: String,
    pub phone: String,
    pub relation: Option<String>,
}

impl ContactDraft {
    fn into_contact(self) -> Result<EmergencyContact, ContactError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ContactError::MissingName);
        }
        let phone = self.phone.trim();
        if phone.is_empty() {
            return Err(ContactError::MissingPhone);
        }
        let relation = self
            .relation
            .as_deref()
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .unwrap_or(DEFAULT_RELATION);
        Ok(EmergencyContact {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            phone: phone.to_string(),
            relation: relation.to_string(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmergencyCenter {
    pub contacts: Vec<EmergencyContact>,
    pub silent_mode: bool,
    pub alerts_sent: u32,
}

impl Default for EmergencyCenter {
    fn default() -> Self {
        Self {
            contacts: vec![
                EmergencyContact {
                    id: "contact1".into(),
                    name: "Rahul Sharma".into(),
                    phone: "+91 98765 43210".into(),
                    relation: "Family".into(),
                },
                EmergencyContact {
                    id: "contact2".into(),
                    name: "Priya Patel".into(),
                    phone: "+91 88123 45678".into(),
                    relation: "Friend".into(),
                },
            ],
            silent_mode: false,
            alerts_sent: 0,
        }
    }
}

impl EmergencyCenter {
    /// Validates the draft and appends it. The limit is checked first so a
    /// full list rejects even a well-formed draft.
    pub fn add(
        &mut self,
        draft: ContactDraft,
        max: usize,
    ) -> Result<&EmergencyContact, ContactError> {
        if self.contacts.len() >= max {
            return Err(ContactError::LimitReached { max });
        }
        let contact = draft.into_contact()?;
        self.contacts.push(contact);
        self.contacts
            .last()
            .ok_or(ContactError::LimitReached { max })
    }

    pub fn remove(&mut self, id: &str) -> Result<EmergencyContact, ContactError> {
        let idx = self
            .contacts
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| ContactError::UnknownContact(id.to_string()))?;
        Ok(self.contacts.remove(idx))
    }

    pub fn toggle_silent(&mut self) -> bool {
        self.silent_mode = !self.silent_mode;
        self.silent_mode
    }

    /// Nothing is sent; the count only backs the confirmation.
    pub fn send_alert(&mut self) -> usize {
        self.alerts_sent = self.alerts_sent.saturating_add(1);
        self.contacts.len()
    }
}
