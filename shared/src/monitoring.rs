//! SMS and call monitoring plus the threat history. Every record here is
//! canned sample data; nothing inspects real messages or calls.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::progress::TickedProgress;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MonitoringError {
    #[error("no message with id {0:?}")]
    UnknownMessage(String),
    #[error("no call with id {0:?}")]
    UnknownCall(String),
    #[error("no threat with id {0:?}")]
    UnknownThreat(String),
    #[error("unknown filter value {0:?}")]
    UnknownFilter(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    #[must_use]
    pub const fn label_key(self) -> &'static str {
        match self {
            Self::Low => "risk.low",
            Self::Medium => "risk.medium",
            Self::High => "risk.high",
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RiskLevel {
    type Err = MonitoringError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            other => Err(MonitoringError::UnknownFilter(other.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// SMS
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmsMessage {
    pub id: String,
    pub sender: String,
    pub body: String,
    pub received: String,
    pub risk: RiskLevel,
}

/// How the user disposed of a flagged message. All three remove it from the
/// list; they differ only in the confirmation shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SmsAction {
    MarkSafe,
    Report,
    Delete,
}

impl SmsAction {
    #[must_use]
    pub const fn toast_key(self) -> &'static str {
        match self {
            Self::MarkSafe => "toast.sms.safe",
            Self::Report => "toast.sms.reported",
            Self::Delete => "toast.sms.deleted",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmsMonitor {
    pub protection_active: bool,
    pub messages: Vec<SmsMessage>,
    pub scan: TickedProgress,
}

impl Default for SmsMonitor {
    fn default() -> Self {
        Self {
            protection_active: true,
            messages: seed_messages(),
            scan: TickedProgress::default(),
        }
    }
}

impl SmsMonitor {
    /// Removes the message and returns it.
    pub fn dispose(&mut self, id: &str) -> Result<SmsMessage, MonitoringError> {
        let idx = self
            .messages
            .iter()
            .position(|m| m.id == id)
            .ok_or_else(|| MonitoringError::UnknownMessage(id.to_string()))?;
        Ok(self.messages.remove(idx))
    }

    /// Flips protection and returns the new state.
    pub fn toggle_protection(&mut self) -> bool {
        self.protection_active = !self.protection_active;
        self.protection_active
    }

    #[must_use]
    pub fn high_risk_count(&self) -> usize {
        self.messages
            .iter()
            .filter(|m| m.risk == RiskLevel::High)
            .count()
    }
}

fn seed_messages() -> Vec<SmsMessage> {
    let sms = |id: &str, sender: &str, body: &str, received: &str, risk| SmsMessage {
        id: id.into(),
        sender: sender.into(),
        body: body.into(),
        received: received.into(),
        risk,
    };
    vec![
        sms(
            "sms1",
            "+91 98765 43210",
            "Your bank account has been compromised. Call immediately on this number to secure...",
            "10 min ago",
            RiskLevel::High,
        ),
        sms(
            "sms2",
            "BANKUPI",
            "Your UPI verification is pending. Please click on the following link to complete...",
            "Yesterday",
            RiskLevel::High,
        ),
        sms(
            "sms3",
            "+91 88123 45678",
            "Congratulations! You've won a special prize. Call now to claim your reward...",
            "2 days ago",
            RiskLevel::Medium,
        ),
        sms(
            "sms4",
            "ADHAR",
            "Your Aadhaar card will be deactivated today. Please update your KYC by visiting...",
            "2 days ago",
            RiskLevel::High,
        ),
    ]
}

// ---------------------------------------------------------------------------
// Calls
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CallStatus {
    Safe,
    Suspicious,
    Blocked,
}

impl CallStatus {
    #[must_use]
    pub const fn label_key(self) -> &'static str {
        match self {
            Self::Safe => "status.safe",
            Self::Suspicious => "status.suspicious",
            Self::Blocked => "status.blocked",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum VibrationLevel {
    Off,
    Low,
    #[default]
    Medium,
    High,
}

impl VibrationLevel {
    #[must_use]
    pub const fn label_key(self) -> &'static str {
        match self {
            Self::Off => "call.vibration.off",
            Self::Low => "call.vibration.low",
            Self::Medium => "call.vibration.medium",
            Self::High => "call.vibration.high",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallRecord {
    pub id: String,
    pub number: String,
    pub when: String,
    pub status: CallStatus,
    pub duration: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallMonitor {
    pub protection_active: bool,
    pub vibration: VibrationLevel,
    pub calls: Vec<CallRecord>,
}

impl Default for CallMonitor {
    fn default() -> Self {
        Self {
            protection_active: true,
            vibration: VibrationLevel::default(),
            calls: seed_calls(),
        }
    }
}

impl CallMonitor {
    pub fn toggle_protection(&mut self) -> bool {
        self.protection_active = !self.protection_active;
        self.protection_active
    }

    /// Marks the call blocked. Returns the number so the caller can confirm it.
    pub fn block(&mut self, id: &str) -> Result<String, MonitoringError> {
        let call = self
            .calls
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| MonitoringError::UnknownCall(id.to_string()))?;
        call.status = CallStatus::Blocked;
        Ok(call.number.clone())
    }

    #[must_use]
    pub fn count(&self, status: CallStatus) -> usize {
        self.calls.iter().filter(|c| c.status == status).count()
    }
}

fn seed_calls() -> Vec<CallRecord> {
    let call = |id: &str, number: &str, when: &str, status, duration: Option<&str>| CallRecord {
        id: id.into(),
        number: number.into(),
        when: when.into(),
        status,
        duration: duration.map(Into::into),
    };
    vec![
        call("call1", "+91 98765 43210", "Today, 12:30 PM", CallStatus::Blocked, None),
        call(
            "call2",
            "+91 88123 45678",
            "Today, 10:15 AM",
            CallStatus::Suspicious,
            Some("0:42"),
        ),
        call("call3", "Fake Bank", "Yesterday, 3:20 PM", CallStatus::Blocked, None),
        call(
            "call4",
            "+91 77654 32109",
            "Yesterday, 11:05 AM",
            CallStatus::Safe,
            Some("3:15"),
        ),
        call(
            "call5",
            "Unknown",
            "2 days ago, 4:45 PM",
            CallStatus::Suspicious,
            Some("1:03"),
        ),
    ]
}

// ---------------------------------------------------------------------------
// Threat history
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThreatKind {
    Sms,
    Call,
}

impl FromStr for ThreatKind {
    type Err = MonitoringError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sms" => Ok(Self::Sms),
            "call" => Ok(Self::Call),
            other => Err(MonitoringError::UnknownFilter(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThreatFeedback {
    Safe,
    Unsafe,
    Uncertain,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreatWord {
    pub word: String,
    pub count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Threat {
    pub id: String,
    pub kind: ThreatKind,
    pub source: String,
    pub when: String,
    pub risk: RiskLevel,
    pub content: String,
    pub reasons: Vec<String>,
    pub threat_words: Vec<ThreatWord>,
    pub feedback: Option<ThreatFeedback>,
}

/// `None` in either filter means "all".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreatFilter {
    pub query: String,
    pub risk: Option<RiskLevel>,
    pub kind: Option<ThreatKind>,
}

impl ThreatFilter {
    /// Query matches content or source, ignoring case. An empty query
    /// matches everything.
    #[must_use]
    pub fn matches(&self, threat: &Threat) -> bool {
        let query = self.query.trim().to_lowercase();
        if !query.is_empty()
            && !threat.content.to_lowercase().contains(&query)
            && !threat.source.to_lowercase().contains(&query)
        {
            return false;
        }
        if self.risk.is_some_and(|r| r != threat.risk) {
            return false;
        }
        self.kind.map_or(true, |k| k == threat.kind)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreatHistory {
    pub threats: Vec<Threat>,
    pub filter: ThreatFilter,
}

impl Default for ThreatHistory {
    fn default() -> Self {
        Self {
            threats: seed_threats(),
            filter: ThreatFilter::default(),
        }
    }
}

impl ThreatHistory {
    pub fn visible(&self) -> impl Iterator<Item = &Threat> + '_ {
        self.threats.iter().filter(|t| self.filter.matches(t))
    }

    pub fn record_feedback(
        &mut self,
        id: &str,
        feedback: ThreatFeedback,
    ) -> Result<(), MonitoringError> {
        let threat = self
            .threats
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| MonitoringError::UnknownThreat(id.to_string()))?;
        threat.feedback = Some(feedback);
        Ok(())
    }
}

fn seed_threats() -> Vec<Threat> {
    fn words(pairs: &[(&str, u32)]) -> Vec<ThreatWord> {
        pairs
            .iter()
            .map(|(word, count)| ThreatWord {
                word: (*word).to_string(),
                count: *count,
            })
            .collect()
    }
    fn reasons(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_string()).collect()
    }

    vec![
        Threat {
            id: "threat1".into(),
            kind: ThreatKind::Sms,
            source: "+91 98765 43210".into(),
            when: "Today, 14:30".into(),
            risk: RiskLevel::High,
            content: "Your bank account has been compromised. Call immediately on this number to secure your account...".into(),
            reasons: reasons(&[
                "Detected phishing pattern",
                "Urgent action request",
                "Impersonating a bank",
            ]),
            threat_words: words(&[("bank", 2), ("compromised", 1), ("immediately", 1)]),
            feedback: None,
        },
        Threat {
            id: "threat2".into(),
            kind: ThreatKind::Call,
            source: "Unknown".into(),
            when: "Today, 11:15".into(),
            risk: RiskLevel::Medium,
            content: "Suspicious call detected (2min 30s)".into(),
            reasons: reasons(&[
                "UPI-related words detected",
                "Unusual call pattern",
                "Known scammer format",
            ]),
            threat_words: words(&[("UPI", 3), ("verify", 2), ("urgent", 1)]),
            feedback: None,
        },
        Threat {
            id: "threat3".into(),
            kind: ThreatKind::Sms,
            source: "BANKUPI".into(),
            when: "Yesterday, 09:45".into(),
            risk: RiskLevel::High,
            content: "Your UPI verification is pending. Please click on the following link to complete...".into(),
            reasons: reasons(&[
                "Suspicious URL detected",
                "UPI verification scam pattern",
                "Unauthorized sender",
            ]),
            threat_words: words(&[("UPI", 1), ("verification", 2), ("click", 1), ("link", 1)]),
            feedback: None,
        },
        Threat {
            id: "threat4".into(),
            kind: ThreatKind::Call,
            source: "+91 77654 32109".into(),
            when: "2 days ago, 16:20".into(),
            risk: RiskLevel::Low,
            content: "Potential telemarketing call (1min 15s)".into(),
            reasons: reasons(&["Known telemarketing pattern", "Non-urgent tone detected"]),
            threat_words: words(&[("offer", 2), ("promotion", 1)]),
            feedback: None,
        },
    ]
}
