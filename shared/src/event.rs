use serde::{Deserialize, Serialize};

use crate::capabilities::{StorageKey, StorageResult};
use crate::monitoring::{SmsAction, ThreatFeedback, VibrationLevel};
use crate::navigation::Page;
use crate::settings::Permission;
use crate::setup::WizardPermission;

/// Everything the core reacts to. Variants marked `serde(skip)` are produced
/// by the core's own effects and never cross the bridge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    Noop,

    // lifecycle
    AppStarted,
    #[serde(skip)]
    PersistedStateLoaded(StorageResult),
    #[serde(skip)]
    SplashElapsed,
    #[serde(skip)]
    PersistenceCompleted {
        key: StorageKey,
        result: StorageResult,
    },

    // language & navigation
    LanguageSelected {
        code: String,
    },
    Navigate {
        page: Page,
    },
    NavigateById {
        id: String,
    },
    DrawerToggled,
    DrawerSet {
        open: bool,
    },
    #[serde(skip)]
    PageTransitionElapsed {
        generation: u64,
    },

    // setup gate
    SetupNext,
    SetupBack,
    SetupSkip,
    SetupPermissionGranted {
        permission: WizardPermission,
    },

    // phone login
    LoginOpened,
    LoginDigitsChanged {
        digits: String,
    },
    LoginSubmitted,
    LoginCancelled,
    #[serde(skip)]
    LoginDelayElapsed {
        attempt: u64,
    },
    LogoutRequested,

    // home
    QuickScanRequested,
    #[serde(skip)]
    QuickScanTick {
        run: u64,
    },

    // sms
    SmsProtectionToggled,
    SmsActionTaken {
        id: String,
        action: SmsAction,
    },
    SmsScanRequested,
    #[serde(skip)]
    SmsScanTick {
        run: u64,
    },

    // calls
    CallProtectionToggled,
    VibrationLevelChanged {
        level: VibrationLevel,
    },
    CallNumberBlocked {
        id: String,
    },

    // threat history
    HistorySearchChanged {
        query: String,
    },
    HistoryRiskFilterChanged {
        risk: String,
    },
    HistoryTypeFilterChanged {
        kind: String,
    },
    ThreatFeedbackGiven {
        id: String,
        feedback: ThreatFeedback,
    },

    // education
    ArticleMarkedRead {
        id: String,
    },
    QuizStarted,

    // emergency
    EmergencyContactAdded {
        name: String,
        phone: String,
        relation: Option<String>,
    },
    EmergencyContactRemoved {
        id: String,
    },
    SilentModeToggled,
    EmergencyAlertSent,

    // settings
    PermissionToggled {
        permission: Permission,
    },
    BackgroundSyncToggled,
    LocalProcessingToggled,
    CloudBackupToggled,
    DarkModeToggled,
    DatabaseSyncRequested,
    #[serde(skip)]
    DatabaseSyncTick {
        run: u64,
    },

    // toasts
    ToastDismissed,
    #[serde(skip)]
    ToastExpired {
        id: u64,
    },
}

impl Event {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Noop => "noop",
            Self::AppStarted => "app_started",
            Self::PersistedStateLoaded(_) => "persisted_state_loaded",
            Self::SplashElapsed => "splash_elapsed",
            Self::PersistenceCompleted { .. } => "persistence_completed",
            Self::LanguageSelected { .. } => "language_selected",
            Self::Navigate { .. } => "navigate",
            Self::NavigateById { .. } => "navigate_by_id",
            Self::DrawerToggled => "drawer_toggled",
            Self::DrawerSet { .. } => "drawer_set",
            Self::PageTransitionElapsed { .. } => "page_transition_elapsed",
            Self::SetupNext => "setup_next",
            Self::SetupBack => "setup_back",
            Self::SetupSkip => "setup_skip",
            Self::SetupPermissionGranted { .. } => "setup_permission_granted",
            Self::LoginOpened => "login_opened",
            Self::LoginDigitsChanged { .. } => "login_digits_changed",
            Self::LoginSubmitted => "login_submitted",
            Self::LoginCancelled => "login_cancelled",
            Self::LoginDelayElapsed { .. } => "login_delay_elapsed",
            Self::LogoutRequested => "logout_requested",
            Self::QuickScanRequested => "quick_scan_requested",
            Self::QuickScanTick { .. } => "quick_scan_tick",
            Self::SmsProtectionToggled => "sms_protection_toggled",
            Self::SmsActionTaken { .. } => "sms_action_taken",
            Self::SmsScanRequested => "sms_scan_requested",
            Self::SmsScanTick { .. } => "sms_scan_tick",
            Self::CallProtectionToggled => "call_protection_toggled",
            Self::VibrationLevelChanged { .. } => "vibration_level_changed",
            Self::CallNumberBlocked { .. } => "call_number_blocked",
            Self::HistorySearchChanged { .. } => "history_search_changed",
            Self::HistoryRiskFilterChanged { .. } => "history_risk_filter_changed",
            Self::HistoryTypeFilterChanged { .. } => "history_type_filter_changed",
            Self::ThreatFeedbackGiven { .. } => "threat_feedback_given",
            Self::ArticleMarkedRead { .. } => "article_marked_read",
            Self::QuizStarted => "quiz_started",
            Self::EmergencyContactAdded { .. } => "emergency_contact_added",
            Self::EmergencyContactRemoved { .. } => "emergency_contact_removed",
            Self::SilentModeToggled => "silent_mode_toggled",
            Self::EmergencyAlertSent => "emergency_alert_sent",
            Self::PermissionToggled { .. } => "permission_toggled",
            Self::BackgroundSyncToggled => "background_sync_toggled",
            Self::LocalProcessingToggled => "local_processing_toggled",
            Self::CloudBackupToggled => "cloud_backup_toggled",
            Self::DarkModeToggled => "dark_mode_toggled",
            Self::DatabaseSyncRequested => "database_sync_requested",
            Self::DatabaseSyncTick { .. } => "database_sync_tick",
            Self::ToastDismissed => "toast_dismissed",
            Self::ToastExpired { .. } => "toast_expired",
        }
    }

    /// Events raised by the core's own timers and storage answers are not
    /// user actions; everything else comes from a tap or keystroke.
    #[must_use]
    pub const fn is_user_initiated(&self) -> bool {
        !matches!(
            self,
            Self::Noop
                | Self::AppStarted
                | Self::PersistedStateLoaded(_)
                | Self::SplashElapsed
                | Self::PersistenceCompleted { .. }
                | Self::PageTransitionElapsed { .. }
                | Self::LoginDelayElapsed { .. }
                | Self::QuickScanTick { .. }
                | Self::SmsScanTick { .. }
                | Self::DatabaseSyncTick { .. }
                | Self::ToastExpired { .. }
        )
    }

    /// User actions on the main pages. These are ignored until the setup
    /// gate has opened.
    #[must_use]
    pub const fn requires_ready(&self) -> bool {
        matches!(
            self,
            Self::Navigate { .. }
                | Self::NavigateById { .. }
                | Self::DrawerToggled
                | Self::DrawerSet { .. }
                | Self::LogoutRequested
                | Self::QuickScanRequested
                | Self::SmsProtectionToggled
                | Self::SmsActionTaken { .. }
                | Self::SmsScanRequested
                | Self::CallProtectionToggled
                | Self::VibrationLevelChanged { .. }
                | Self::CallNumberBlocked { .. }
                | Self::HistorySearchChanged { .. }
                | Self::HistoryRiskFilterChanged { .. }
                | Self::HistoryTypeFilterChanged { .. }
                | Self::ThreatFeedbackGiven { .. }
                | Self::ArticleMarkedRead { .. }
                | Self::QuizStarted
                | Self::EmergencyContactAdded { .. }
                | Self::EmergencyContactRemoved { .. }
                | Self::SilentModeToggled
                | Self::EmergencyAlertSent
                | Self::PermissionToggled { .. }
                | Self::BackgroundSyncToggled
                | Self::LocalProcessingToggled
                | Self::CloudBackupToggled
                | Self::DarkModeToggled
                | Self::DatabaseSyncRequested
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shell_events_deserialize() {
        let event: Event = serde_json::from_str(r#"{"Navigate":{"page":"emergency"}}"#).unwrap();
        assert_eq!(
            event,
            Event::Navigate {
                page: Page::Emergency
            }
        );
        let event: Event = serde_json::from_str(r#"{"LanguageSelected":{"code":"te"}}"#).unwrap();
        assert_eq!(event.name(), "language_selected");
    }

    #[test]
    fn internal_events_do_not_cross_the_bridge() {
        assert!(serde_json::from_str::<Event>(r#"{"SplashElapsed":null}"#).is_err());
        assert!(serde_json::from_str::<Event>(r#""SplashElapsed""#).is_err());
    }

    #[test]
    fn timers_are_not_user_initiated() {
        assert!(!Event::SplashElapsed.is_user_initiated());
        assert!(!Event::ToastExpired { id: 1 }.is_user_initiated());
        assert!(Event::SetupSkip.is_user_initiated());
        assert!(Event::DrawerToggled.is_user_initiated());
    }

    #[test]
    fn gate_events_do_not_require_ready() {
        assert!(!Event::SetupNext.requires_ready());
        assert!(!Event::LanguageSelected { code: "hi".into() }.requires_ready());
        assert!(!Event::QuickScanTick { run: 1 }.requires_ready());
        assert!(Event::QuickScanRequested.requires_ready());
    }
}
