use serde::{Deserialize, Serialize};

use crate::config::AppConfig;
use crate::education::EducationHub;
use crate::emergency::EmergencyCenter;
use crate::i18n::{Catalog, Localizer};
use crate::monitoring::{CallMonitor, SmsMonitor, ThreatHistory};
use crate::navigation::Navigator;
use crate::progress::TickedProgress;
use crate::session::{LoginForm, Session};
use crate::settings::Settings;
use crate::setup::SetupWizard;
use crate::AppError;

/// Which top-level surface the shell shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AppPhase {
    /// Splash screen while storage is read and the splash delay runs.
    #[default]
    Loading,
    Setup,
    Login,
    Ready,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProtectionStatus {
    Protected,
    AtRisk,
    Critical,
}

impl ProtectionStatus {
    /// Both monitors on: protected. One off: at risk. Both off: critical.
    #[must_use]
    pub const fn from_monitors(sms_active: bool, calls_active: bool) -> Self {
        match (sms_active, calls_active) {
            (true, true) => Self::Protected,
            (false, false) => Self::Critical,
            _ => Self::AtRisk,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ToastKind {
    #[default]
    Info,
    Success,
    Warning,
    Error,
}

impl ToastKind {
    #[must_use]
    pub const fn default_duration_ms(self) -> u64 {
        match self {
            Self::Info => 3000,
            Self::Success => 2000,
            Self::Warning => 4000,
            Self::Error => 5000,
        }
    }
}

/// A placeholder value: either literal text or a catalog key resolved in
/// the current language when the toast is rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ToastArg {
    Text(String),
    Key(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Toast {
    pub id: u64,
    pub kind: ToastKind,
    pub title_key: String,
    pub description_key: Option<String>,
    pub args: Vec<(String, ToastArg)>,
    pub duration_ms: u64,
}

impl Toast {
    #[must_use]
    pub fn new(kind: ToastKind, title_key: impl Into<String>) -> Self {
        Self {
            id: 0,
            kind,
            title_key: title_key.into(),
            description_key: None,
            args: Vec::new(),
            duration_ms: kind.default_duration_ms(),
        }
    }

    #[must_use]
    pub fn info(title_key: impl Into<String>) -> Self {
        Self::new(ToastKind::Info, title_key)
    }

    #[must_use]
    pub fn success(title_key: impl Into<String>) -> Self {
        Self::new(ToastKind::Success, title_key)
    }

    #[must_use]
    pub fn warning(title_key: impl Into<String>) -> Self {
        Self::new(ToastKind::Warning, title_key)
    }

    #[must_use]
    pub fn error(title_key: impl Into<String>) -> Self {
        Self::new(ToastKind::Error, title_key)
    }

    /// Uses `<title_key>.desc` as the description.
    #[must_use]
    pub fn described(mut self) -> Self {
        self.description_key = Some(format!("{}.desc", self.title_key));
        self
    }

    #[must_use]
    pub fn with_description(mut self, key: impl Into<String>) -> Self {
        self.description_key = Some(key.into());
        self
    }

    #[must_use]
    pub fn with_text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.args.push((name.into(), ToastArg::Text(value.into())));
        self
    }

    #[must_use]
    pub fn with_key(mut self, name: impl Into<String>, key: impl Into<String>) -> Self {
        self.args.push((name.into(), ToastArg::Key(key.into())));
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HomeState {
    pub quick_scan: TickedProgress,
}

#[derive(Debug, Clone)]
pub struct Model {
    pub config: AppConfig,
    pub phase: AppPhase,
    /// Startup waits for both the storage read and the splash delay.
    pub storage_loaded: bool,
    pub splash_elapsed: bool,
    /// Set once `AppStarted` has asked for the stored state.
    pub startup_requested: bool,
    /// The user picked a language during this session.
    pub language_chosen: bool,
    pub needs_setup: bool,

    pub localizer: Localizer,
    pub navigator: Navigator,
    pub wizard: SetupWizard,
    pub setup_completed: bool,
    pub session: Session,
    pub login_form: LoginForm,

    pub home: HomeState,
    pub sms: SmsMonitor,
    pub calls: CallMonitor,
    pub history: ThreatHistory,
    pub education: EducationHub,
    pub emergency: EmergencyCenter,
    pub settings: Settings,

    pub active_toast: Option<Toast>,
    toast_seq: u64,
    /// Most recent recoverable error, kept for diagnostics.
    pub last_error: Option<AppError>,
}

impl Default for Model {
    fn default() -> Self {
        Self::new(AppConfig::default())
    }
}

impl Model {
    #[must_use]
    pub fn new(config: AppConfig) -> Self {
        let localizer = Localizer::new(Catalog::builtin(), config.default_language);
        Self {
            config,
            phase: AppPhase::Loading,
            storage_loaded: false,
            splash_elapsed: false,
            startup_requested: false,
            language_chosen: false,
            needs_setup: true,
            localizer,
            navigator: Navigator::default(),
            wizard: SetupWizard::default(),
            setup_completed: false,
            session: Session::default(),
            login_form: LoginForm::default(),
            home: HomeState::default(),
            sms: SmsMonitor::default(),
            calls: CallMonitor::default(),
            history: ThreatHistory::default(),
            education: EducationHub::default(),
            emergency: EmergencyCenter::default(),
            settings: Settings::default(),
            active_toast: None,
            toast_seq: 0,
            last_error: None,
        }
    }

    /// Replaces any visible toast. Returns the new toast's id and lifetime.
    pub fn show_toast(&mut self, mut toast: Toast) -> (u64, u64) {
        self.toast_seq = self.toast_seq.wrapping_add(1);
        toast.id = self.toast_seq;
        let ret = (toast.id, toast.duration_ms);
        self.active_toast = Some(toast);
        ret
    }

    pub fn dismiss_toast(&mut self) -> bool {
        self.active_toast.take().is_some()
    }

    /// Clears the toast only if it is still the one the timer was set for.
    pub fn expire_toast(&mut self, id: u64) -> bool {
        if self.active_toast.as_ref().is_some_and(|t| t.id == id) {
            self.active_toast = None;
            return true;
        }
        false
    }

    #[must_use]
    pub fn protection_status(&self) -> ProtectionStatus {
        ProtectionStatus::from_monitors(self.sms.protection_active, self.calls.protection_active)
    }

    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.phase == AppPhase::Ready
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toast_durations_follow_kind() {
        assert_eq!(Toast::success("x").duration_ms, 2000);
        assert_eq!(Toast::info("x").duration_ms, 3000);
        assert_eq!(Toast::warning("x").duration_ms, 4000);
        assert_eq!(Toast::error("x").duration_ms, 5000);
    }

    #[test]
    fn described_uses_desc_suffix() {
        let toast = Toast::success("toast.sms.safe").described();
        assert_eq!(toast.description_key.as_deref(), Some("toast.sms.safe.desc"));
    }

    #[test]
    fn newer_toast_survives_older_timer() {
        let mut model = Model::default();
        let (first, _) = model.show_toast(Toast::info("a"));
        let (second, _) = model.show_toast(Toast::info("b"));
        assert!(!model.expire_toast(first));
        assert_eq!(model.active_toast.as_ref().map(|t| t.id), Some(second));
        assert!(model.expire_toast(second));
        assert!(model.active_toast.is_none());
    }

    #[test]
    fn protection_status_tracks_monitors() {
        let mut model = Model::default();
        assert_eq!(model.protection_status(), ProtectionStatus::Protected);
        model.sms.toggle_protection();
        assert_eq!(model.protection_status(), ProtectionStatus::AtRisk);
        model.calls.toggle_protection();
        assert_eq!(model.protection_status(), ProtectionStatus::Critical);
    }

    #[test]
    fn starts_loading_in_default_language() {
        let model = Model::default();
        assert_eq!(model.phase, AppPhase::Loading);
        assert_eq!(model.localizer.language(), model.config.default_language);
    }
}
