// lib.rs - Shield Safe Zone headless core

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::too_many_lines)]

pub mod capabilities;
pub mod config;
pub mod education;
pub mod emergency;
pub mod event;
pub mod i18n;
pub mod model;
pub mod monitoring;
pub mod navigation;
pub mod persistence;
pub mod progress;
pub mod session;
pub mod settings;
pub mod setup;
pub mod view;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use app::App;
pub use capabilities::{Capabilities, Effect, Render};
pub use config::AppConfig;
pub use event::Event;
pub use i18n::{Language, Localizer};
pub use model::Model;
pub use navigation::Page;
pub use view::ViewModel;

use capabilities::StorageError;
use config::ConfigError;
use education::EducationError;
use emergency::ContactError;
use i18n::LanguageError;
use monitoring::MonitoringError;
use navigation::NavigationError;
use session::PhoneError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    Validation,
    NotFound,
    Storage,
    Configuration,
    InvalidState,
}

impl ErrorKind {
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Validation => "VALIDATION_ERROR",
            Self::NotFound => "NOT_FOUND",
            Self::Storage => "STORAGE_ERROR",
            Self::Configuration => "CONFIG_ERROR",
            Self::InvalidState => "INVALID_STATE",
        }
    }

    /// Storage hiccups are worth another try; bad input is not.
    #[must_use]
    pub const fn is_retryable(self) -> bool {
        matches!(self, Self::Storage)
    }
}

/// Shell-facing error. None of these are fatal: the core logs them, keeps
/// the most recent one for diagnostics and carries on.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("[{}] {message}", kind.code())]
pub struct AppError {
    pub kind: ErrorKind,
    pub message: String,
}

impl AppError {
    #[must_use]
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }
}

impl From<StorageError> for AppError {
    fn from(e: StorageError) -> Self {
        let kind = match e {
            StorageError::UnknownKey { .. } => ErrorKind::Validation,
            _ => ErrorKind::Storage,
        };
        Self::new(kind, e.to_string())
    }
}

impl From<ConfigError> for AppError {
    fn from(e: ConfigError) -> Self {
        Self::new(ErrorKind::Configuration, e.to_string())
    }
}

impl From<LanguageError> for AppError {
    fn from(e: LanguageError) -> Self {
        Self::new(ErrorKind::Validation, e.to_string())
    }
}

impl From<NavigationError> for AppError {
    fn from(e: NavigationError) -> Self {
        Self::new(ErrorKind::Validation, e.to_string())
    }
}

impl From<PhoneError> for AppError {
    fn from(e: PhoneError) -> Self {
        Self::new(ErrorKind::Validation, e.to_string())
    }
}

impl From<MonitoringError> for AppError {
    fn from(e: MonitoringError) -> Self {
        let kind = match e {
            MonitoringError::UnknownFilter(_) => ErrorKind::Validation,
            _ => ErrorKind::NotFound,
        };
        Self::new(kind, e.to_string())
    }
}

impl From<EducationError> for AppError {
    fn from(e: EducationError) -> Self {
        Self::new(ErrorKind::NotFound, e.to_string())
    }
}

impl From<ContactError> for AppError {
    fn from(e: ContactError) -> Self {
        let kind = match e {
            ContactError::UnknownContact(_) => ErrorKind::NotFound,
            ContactError::LimitReached { .. } => ErrorKind::InvalidState,
            ContactError::MissingName | ContactError::MissingPhone => ErrorKind::Validation,
        };
        Self::new(kind, e.to_string())
    }
}

pub mod app {
    use tracing::{debug, info, warn};

    use super::AppError;
    use crate::capabilities::{expect_values, Capabilities, StorageKey, StorageResult, TRUE_VALUE};
    use crate::emergency::ContactDraft;
    use crate::event::Event;
    use crate::i18n::LanguageChange;
    use crate::model::{AppPhase, Model, Toast};
    use crate::monitoring::{RiskLevel, SmsAction, ThreatKind};
    use crate::persistence::{PersistedState, STARTUP_KEYS};
    use crate::progress::{TickOutcome, TickedProgress};
    use crate::setup::WizardOutcome;
    use crate::view::{self, ViewModel};

    #[derive(Default)]
    pub struct App;

    /// How the setup gate was closed; only the confirmation differs.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum GateExit {
        Finished,
        Skipped,
    }

    /// Which ticked job a tick belongs to.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Job {
        QuickScan,
        SmsScan,
        DatabaseSync,
    }

    impl Job {
        fn progress(self, model: &mut Model) -> &mut TickedProgress {
            match self {
                Self::QuickScan => &mut model.home.quick_scan,
                Self::SmsScan => &mut model.sms.scan,
                Self::DatabaseSync => &mut model.settings.db_sync,
            }
        }

        fn tick_event(self, run: u64) -> Event {
            match self {
                Self::QuickScan => Event::QuickScanTick { run },
                Self::SmsScan => Event::SmsScanTick { run },
                Self::DatabaseSync => Event::DatabaseSyncTick { run },
            }
        }

        fn timing(self, model: &Model) -> (u64, u8) {
            match self {
                Self::QuickScan | Self::SmsScan => {
                    (model.config.scan_tick_ms, model.config.scan_step_percent)
                }
                Self::DatabaseSync => {
                    (model.config.db_sync_tick_ms, model.config.db_sync_step_percent)
                }
            }
        }

        fn done_toast(self) -> Toast {
            match self {
                Self::QuickScan => Toast::success("toast.scan.quick.done").described(),
                Self::SmsScan => Toast::success("toast.scan.sms.done").described(),
                Self::DatabaseSync => Toast::success("toast.db.sync.done").described(),
            }
        }
    }

    impl App {
        fn report(model: &mut Model, error: impl Into<AppError>) {
            let error = error.into();
            warn!(
                code = error.code(),
                retryable = error.kind.is_retryable(),
                error = %error.message,
                "recoverable error"
            );
            model.last_error = Some(error);
        }

        fn toast(model: &mut Model, caps: &Capabilities, toast: Toast) {
            let (id, duration_ms) = model.show_toast(toast);
            caps.delay.after(duration_ms, Event::ToastExpired { id });
        }

        fn persist(caps: &Capabilities, key: StorageKey, value: Option<String>) {
            let on_done = move |result: StorageResult| Event::PersistenceCompleted { key, result };
            match value {
                Some(value) => caps.storage.set(key, value, on_done),
                None => caps.storage.remove(key, on_done),
            }
        }

        fn persist_flag(caps: &Capabilities, key: StorageKey) {
            Self::persist(caps, key, Some(TRUE_VALUE.to_string()));
        }

        fn enter_ready(model: &mut Model) {
            model.phase = AppPhase::Ready;
            model.needs_setup = false;
            model.navigator.reset();
        }

        /// Opens the gate once both the stored flags and the splash delay
        /// are in.
        fn open_gate_if_ready(model: &mut Model, caps: &Capabilities) {
            if model.phase != AppPhase::Loading || !model.storage_loaded || !model.splash_elapsed
            {
                return;
            }
            if model.needs_setup {
                model.phase = AppPhase::Setup;
                model.wizard.reset();
                info!("first run, showing setup wizard");
            } else {
                Self::enter_ready(model);
                Self::toast(model, caps, Toast::success("toast.welcome").described());
                info!(logged_in = model.session.logged_in, "entering home");
            }
        }

        fn close_gate(model: &mut Model, caps: &Capabilities, exit: GateExit) {
            model.setup_completed = true;
            Self::persist_flag(caps, StorageKey::SetupCompleted);
            Self::enter_ready(model);
            let toast = match exit {
                GateExit::Finished => Toast::success("success.setup").described(),
                GateExit::Skipped => Toast::info("toast.setup.skip").described(),
            };
            Self::toast(model, caps, toast);
            info!(?exit, "setup gate closed");
        }

        fn start_job(model: &mut Model, caps: &Capabilities, job: Job) -> bool {
            let (tick_ms, _) = job.timing(model);
            match job.progress(model).start() {
                Some(run) => {
                    caps.delay.after(tick_ms, job.tick_event(run));
                    debug!(?job, run, "job started");
                    true
                }
                None => {
                    debug!(?job, "job already running");
                    false
                }
            }
        }

        fn tick_job(model: &mut Model, caps: &Capabilities, job: Job, run: u64) -> bool {
            let (tick_ms, step) = job.timing(model);
            match job.progress(model).tick(run, step) {
                TickOutcome::Advanced(_) => {
                    caps.delay.after(tick_ms, job.tick_event(run));
                    true
                }
                TickOutcome::Completed => {
                    Self::toast(model, caps, job.done_toast());
                    info!(?job, run, "job completed");
                    true
                }
                TickOutcome::Stale => false,
            }
        }

        fn apply_persisted(model: &mut Model, state: PersistedState) {
            // A choice made on the splash screen wins over the stored one.
            if let Some(language) = state.language.filter(|_| !model.language_chosen) {
                model.localizer.select(language);
            }
            model.setup_completed = state.setup_completed;
            if state.logged_in {
                model.session.logged_in = true;
                model.session.phone_number = state.phone_number.clone();
            }
            model.needs_setup = state.needs_setup();
            model.storage_loaded = true;
        }
    }

    impl crux_core::App for App {
        type Event = Event;
        type Model = Model;
        type ViewModel = ViewModel;
        type Capabilities = Capabilities;

        fn update(&self, event: Event, model: &mut Model, caps: &Capabilities) {
            let event_name = event.name();
            if event.is_user_initiated() {
                debug!(event = event_name, "user action");
            }

            if event.requires_ready() && !model.is_ready() {
                debug!(event = event_name, phase = ?model.phase, "ignored before gate opens");
                return;
            }

            match event {
                Event::Noop => {}

                Event::AppStarted => {
                    if model.phase != AppPhase::Loading || model.startup_requested {
                        debug!(phase = ?model.phase, "already started");
                        return;
                    }
                    if let Err(e) = model.config.validate() {
                        Self::report(model, e);
                    }
                    model.startup_requested = true;
                    caps.storage
                        .get_many(STARTUP_KEYS.to_vec(), Event::PersistedStateLoaded);
                    caps.delay.after(model.config.splash_ms, Event::SplashElapsed);
                    caps.render.render();
                }

                Event::PersistedStateLoaded(result) => {
                    if model.phase != AppPhase::Loading || model.storage_loaded {
                        return;
                    }
                    let state = match expect_values(result) {
                        Ok(values) => PersistedState::from_values(&values),
                        Err(e) => {
                            // Unreadable storage behaves like a fresh install.
                            Self::report(model, e);
                            PersistedState::default()
                        }
                    };
                    Self::apply_persisted(model, state);
                    Self::open_gate_if_ready(model, caps);
                    caps.render.render();
                }

                Event::SplashElapsed => {
                    model.splash_elapsed = true;
                    Self::open_gate_if_ready(model, caps);
                    caps.render.render();
                }

                Event::PersistenceCompleted { key, result } => match result {
                    Ok(_) => debug!(%key, "persisted"),
                    Err(e) => Self::report(model, e),
                },

                Event::LanguageSelected { code } => match model.localizer.set_language(&code) {
                    Ok(LanguageChange::Changed { from, to }) => {
                        model.language_chosen = true;
                        Self::persist(caps, StorageKey::Language, Some(to.code().to_string()));
                        Self::toast(model, caps, Toast::success("toast.language.changed"));
                        info!(%from, %to, "language changed");
                        caps.render.render();
                    }
                    Ok(LanguageChange::Unchanged) => {
                        debug!(language = %model.localizer.language(), "language unchanged");
                    }
                    Err(e) => Self::report(model, e),
                },

                Event::Navigate { page } => {
                    let generation = model.navigator.navigate_to(page);
                    caps.delay.after(
                        model.config.page_transition_ms,
                        Event::PageTransitionElapsed { generation },
                    );
                    caps.render.render();
                }

                Event::NavigateById { id } => match model.navigator.navigate_to_id(&id) {
                    Ok(generation) => {
                        caps.delay.after(
                            model.config.page_transition_ms,
                            Event::PageTransitionElapsed { generation },
                        );
                        caps.render.render();
                    }
                    Err(e) => Self::report(model, e),
                },

                Event::DrawerToggled => {
                    model.navigator.toggle_drawer();
                    caps.render.render();
                }

                Event::DrawerSet { open } => {
                    model.navigator.set_drawer_open(open);
                    caps.render.render();
                }

                Event::PageTransitionElapsed { generation } => {
                    if model.navigator.finish_transition(generation) {
                        caps.render.render();
                    }
                }

                Event::SetupNext => {
                    if model.phase != AppPhase::Setup {
                        return;
                    }
                    match model.wizard.next() {
                        WizardOutcome::Finished => {
                            Self::close_gate(model, caps, GateExit::Finished);
                        }
                        outcome => debug!(?outcome, "wizard moved"),
                    }
                    caps.render.render();
                }

                Event::SetupBack => {
                    if model.phase != AppPhase::Setup {
                        return;
                    }
                    let outcome = model.wizard.back();
                    debug!(?outcome, "wizard moved");
                    caps.render.render();
                }

                Event::SetupSkip => {
                    if model.phase != AppPhase::Setup {
                        return;
                    }
                    if model.wizard.skip().closes_gate() {
                        Self::close_gate(model, caps, GateExit::Skipped);
                    }
                    caps.render.render();
                }

                Event::SetupPermissionGranted { permission } => {
                    if model.phase != AppPhase::Setup || !model.wizard.grant(permission) {
                        return;
                    }
                    Self::toast(
                        model,
                        caps,
                        Toast::success("toast.permission.granted")
                            .described()
                            .with_key("permission", permission.label_key()),
                    );
                    caps.render.render();
                }

                Event::LoginOpened => {
                    let signed_out_home = model.is_ready() && !model.session.logged_in;
                    if model.phase != AppPhase::Setup && !signed_out_home {
                        return;
                    }
                    model.phase = AppPhase::Login;
                    model.login_form.reset();
                    caps.render.render();
                }

                Event::LoginDigitsChanged { digits } => {
                    if model.phase != AppPhase::Login || model.login_form.submitting {
                        return;
                    }
                    model.login_form.set_digits(digits);
                    caps.render.render();
                }

                Event::LoginSubmitted => {
                    if model.phase != AppPhase::Login || model.login_form.submitting {
                        return;
                    }
                    let prefix = model.config.phone_country_prefix.clone();
                    match model.login_form.submit(&prefix, model.config.phone_digits) {
                        Ok(attempt) => {
                            caps.delay.after(
                                model.config.login_delay_ms,
                                Event::LoginDelayElapsed { attempt },
                            );
                        }
                        Err(e) => debug!(error = %e, "login form rejected"),
                    }
                    caps.render.render();
                }

                Event::LoginCancelled => {
                    if model.phase != AppPhase::Login {
                        return;
                    }
                    model.login_form.reset();
                    if model.setup_completed {
                        Self::enter_ready(model);
                    } else {
                        model.phase = AppPhase::Setup;
                    }
                    caps.render.render();
                }

                Event::LoginDelayElapsed { attempt } => {
                    if model.phase != AppPhase::Login {
                        return;
                    }
                    let Some(number) = model.login_form.complete(attempt) else {
                        return;
                    };
                    Self::persist(
                        caps,
                        StorageKey::PhoneNumber,
                        Some(number.as_str().to_string()),
                    );
                    Self::persist_flag(caps, StorageKey::IsLoggedIn);
                    Self::persist_flag(caps, StorageKey::SetupCompleted);
                    info!(phone = ?number, "signed in");
                    model.session.sign_in(number);
                    model.setup_completed = true;
                    Self::enter_ready(model);
                    Self::toast(model, caps, Toast::success("toast.login.success").described());
                    caps.render.render();
                }

                Event::LogoutRequested => {
                    if !model.session.logged_in {
                        debug!("logout without a session");
                        return;
                    }
                    model.session.sign_out();
                    Self::persist(caps, StorageKey::IsLoggedIn, None);
                    Self::persist(caps, StorageKey::PhoneNumber, None);
                    model.login_form.reset();
                    model.phase = AppPhase::Login;
                    Self::toast(model, caps, Toast::info("toast.logout").described());
                    info!("signed out");
                    caps.render.render();
                }

                Event::QuickScanRequested => {
                    if Self::start_job(model, caps, Job::QuickScan) {
                        caps.render.render();
                    }
                }

                Event::QuickScanTick { run } => {
                    if Self::tick_job(model, caps, Job::QuickScan, run) {
                        caps.render.render();
                    }
                }

                Event::SmsProtectionToggled => {
                    let toast = if model.sms.toggle_protection() {
                        Toast::success("toast.protection.sms.on")
                    } else {
                        model.sms.scan.cancel();
                        Toast::error("toast.protection.sms.off")
                    };
                    Self::toast(model, caps, toast.described());
                    caps.render.render();
                }

                Event::SmsActionTaken { id, action } => match model.sms.dispose(&id) {
                    Ok(message) => {
                        debug!(id = %message.id, ?action, "sms disposed");
                        let toast = match action {
                            SmsAction::MarkSafe | SmsAction::Report => {
                                Toast::success(action.toast_key())
                            }
                            SmsAction::Delete => Toast::info(action.toast_key()),
                        };
                        Self::toast(model, caps, toast.described());
                        caps.render.render();
                    }
                    Err(e) => Self::report(model, e),
                },

                Event::SmsScanRequested => {
                    if Self::start_job(model, caps, Job::SmsScan) {
                        caps.render.render();
                    }
                }

                Event::SmsScanTick { run } => {
                    if Self::tick_job(model, caps, Job::SmsScan, run) {
                        caps.render.render();
                    }
                }

                Event::CallProtectionToggled => {
                    let toast = if model.calls.toggle_protection() {
                        Toast::success("toast.protection.call.on")
                    } else {
                        Toast::error("toast.protection.call.off")
                    };
                    Self::toast(model, caps, toast.described());
                    caps.render.render();
                }

                Event::VibrationLevelChanged { level } => {
                    model.calls.vibration = level;
                    Self::toast(
                        model,
                        caps,
                        Toast::success("toast.vibration.updated")
                            .described()
                            .with_key("level", level.label_key()),
                    );
                    caps.render.render();
                }

                Event::CallNumberBlocked { id } => match model.calls.block(&id) {
                    Ok(number) => {
                        Self::toast(
                            model,
                            caps,
                            Toast::success("toast.call.blocked")
                                .described()
                                .with_text("number", number),
                        );
                        caps.render.render();
                    }
                    Err(e) => Self::report(model, e),
                },

                Event::HistorySearchChanged { query } => {
                    model.history.filter.query = query;
                    caps.render.render();
                }

                Event::HistoryRiskFilterChanged { risk } => {
                    if risk == "all" {
                        model.history.filter.risk = None;
                    } else {
                        match risk.parse::<RiskLevel>() {
                            Ok(level) => model.history.filter.risk = Some(level),
                            Err(e) => return Self::report(model, e),
                        }
                    }
                    caps.render.render();
                }

                Event::HistoryTypeFilterChanged { kind } => {
                    if kind == "all" {
                        model.history.filter.kind = None;
                    } else {
                        match kind.parse::<ThreatKind>() {
                            Ok(kind) => model.history.filter.kind = Some(kind),
                            Err(e) => return Self::report(model, e),
                        }
                    }
                    caps.render.render();
                }

                Event::ThreatFeedbackGiven { id, feedback } => {
                    match model.history.record_feedback(&id, feedback) {
                        Ok(()) => {
                            Self::toast(
                                model,
                                caps,
                                Toast::success("toast.feedback.thanks").described(),
                            );
                            caps.render.render();
                        }
                        Err(e) => Self::report(model, e),
                    }
                }

                Event::ArticleMarkedRead { id } => match model.education.mark_read(&id) {
                    Ok(outcome) => {
                        // The badge announcement replaces the per-article one.
                        let toast = match outcome.badge_earned {
                            Some(badge) => Toast::info("toast.badge.earned")
                                .described()
                                .with_text("badge", badge),
                            None => Toast::success("toast.article.read")
                                .described()
                                .with_text("category", outcome.category),
                        };
                        debug!(progress = outcome.spotter_progress, "article read");
                        Self::toast(model, caps, toast);
                        caps.render.render();
                    }
                    Err(e) => Self::report(model, e),
                },

                Event::QuizStarted => {
                    Self::toast(model, caps, Toast::info("toast.quiz.start").described());
                    caps.render.render();
                }

                Event::EmergencyContactAdded {
                    name,
                    phone,
                    relation,
                } => {
                    let max = model.config.max_emergency_contacts;
                    let draft = ContactDraft {
                        name,
                        phone,
                        relation,
                    };
                    let toast = match model.emergency.add(draft, max) {
                        Ok(contact) => Toast::success("toast.contact.added")
                            .described()
                            .with_text("name", contact.name.clone()),
                        Err(e) => {
                            let (title, description) = e.toast_keys();
                            debug!(error = %e, "contact rejected");
                            Toast::error(title)
                                .with_description(description)
                                .with_text("max", max.to_string())
                        }
                    };
                    Self::toast(model, caps, toast);
                    caps.render.render();
                }

                Event::EmergencyContactRemoved { id } => match model.emergency.remove(&id) {
                    Ok(contact) => {
                        Self::toast(
                            model,
                            caps,
                            Toast::info("toast.contact.removed")
                                .described()
                                .with_text("name", contact.name),
                        );
                        caps.render.render();
                    }
                    Err(e) => Self::report(model, e),
                },

                Event::SilentModeToggled => {
                    let key = if model.emergency.toggle_silent() {
                        "toast.silent.on"
                    } else {
                        "toast.silent.off"
                    };
                    Self::toast(model, caps, Toast::info(key).described());
                    caps.render.render();
                }

                Event::EmergencyAlertSent => {
                    let recipients = model.emergency.send_alert();
                    info!(recipients, "emergency alert (simulated)");
                    Self::toast(model, caps, Toast::success("toast.emergency.sent").described());
                    caps.render.render();
                }

                Event::PermissionToggled { permission } => {
                    let toast = if model.settings.permissions.toggle(permission) {
                        Toast::success("toast.permission.granted")
                    } else {
                        Toast::warning("toast.permission.disabled")
                    };
                    Self::toast(
                        model,
                        caps,
                        toast
                            .described()
                            .with_key("permission", permission.label_key()),
                    );
                    caps.render.render();
                }

                Event::BackgroundSyncToggled => {
                    let toast = if model.settings.toggle_background_sync() {
                        Toast::success("toast.sync.background.on")
                    } else {
                        Toast::info("toast.sync.background.off")
                    };
                    Self::toast(model, caps, toast.described());
                    caps.render.render();
                }

                Event::LocalProcessingToggled => {
                    let key = if model.settings.toggle_local_processing() {
                        "toast.processing.local"
                    } else {
                        "toast.processing.cloud"
                    };
                    Self::toast(model, caps, Toast::info(key).described());
                    caps.render.render();
                }

                Event::CloudBackupToggled => {
                    let key = if model.settings.toggle_cloud_backup() {
                        "toast.backup.on"
                    } else {
                        "toast.backup.off"
                    };
                    Self::toast(model, caps, Toast::info(key).described());
                    caps.render.render();
                }

                Event::DarkModeToggled => {
                    model.settings.toggle_dark_mode();
                    caps.render.render();
                }

                Event::DatabaseSyncRequested => {
                    if Self::start_job(model, caps, Job::DatabaseSync) {
                        Self::toast(model, caps, Toast::info("toast.db.sync.started").described());
                        caps.render.render();
                    }
                }

                Event::DatabaseSyncTick { run } => {
                    if Self::tick_job(model, caps, Job::DatabaseSync, run) {
                        caps.render.render();
                    }
                }

                Event::ToastDismissed => {
                    if model.dismiss_toast() {
                        caps.render.render();
                    }
                }

                Event::ToastExpired { id } => {
                    if model.expire_toast(id) {
                        caps.render.render();
                    }
                }
            }
        }

        fn view(&self, model: &Model) -> ViewModel {
            view::build(model)
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use crate::capabilities::{StorageError, StorageOutput};
        use crate::{Effect, ErrorKind};
        use crux_core::testing::AppTester;

        fn ready_model() -> Model {
            let mut model = Model::default();
            model.phase = AppPhase::Ready;
            model.setup_completed = true;
            model.needs_setup = false;
            model
        }

        #[test]
        fn storage_failure_on_start_behaves_like_fresh_install() {
            let app = AppTester::<App, Effect>::default();
            let mut model = Model::default();
            app.update(
                Event::PersistedStateLoaded(Err(StorageError::Unavailable {
                    message: "locked".into(),
                })),
                &mut model,
            );
            assert!(model.storage_loaded);
            assert!(model.needs_setup);
            assert_eq!(
                model.last_error.as_ref().map(|e| e.kind),
                Some(ErrorKind::Storage)
            );
            app.update(Event::SplashElapsed, &mut model);
            assert_eq!(model.phase, AppPhase::Setup);
        }

        #[test]
        fn wrong_output_shape_is_reported() {
            let app = AppTester::<App, Effect>::default();
            let mut model = Model::default();
            app.update(
                Event::PersistedStateLoaded(Ok(StorageOutput::Written)),
                &mut model,
            );
            assert!(model.last_error.is_some());
            assert!(model.needs_setup);
        }

        #[test]
        fn page_actions_are_ignored_before_ready() {
            let app = AppTester::<App, Effect>::default();
            let mut model = Model::default();
            let update = app.update(Event::QuickScanRequested, &mut model);
            assert!(update.effects.is_empty());
            assert!(!model.home.quick_scan.is_running());
        }

        #[test]
        fn invalid_language_keeps_previous_and_writes_nothing() {
            let app = AppTester::<App, Effect>::default();
            let mut model = ready_model();
            let update = app.update(Event::LanguageSelected { code: "fr".into() }, &mut model);
            assert!(update.effects.is_empty());
            assert_eq!(model.localizer.language().code(), "en");
            assert_eq!(
                model.last_error.as_ref().map(AppError::code),
                Some("VALIDATION_ERROR")
            );
        }

        #[test]
        fn unknown_page_id_is_a_no_op() {
            let app = AppTester::<App, Effect>::default();
            let mut model = ready_model();
            let update = app.update(Event::NavigateById { id: "dashboard".into() }, &mut model);
            assert!(update.effects.is_empty());
            assert_eq!(model.navigator.current_page(), crate::Page::Home);
        }

        #[test]
        fn contact_limit_raises_error_toast() {
            let app = AppTester::<App, Effect>::default();
            let mut model = ready_model();
            model.config.max_emergency_contacts = 2;
            app.update(
                Event::EmergencyContactAdded {
                    name: "Anil".into(),
                    phone: "+91 90000 00000".into(),
                    relation: None,
                },
                &mut model,
            );
            let toast = model.active_toast.as_ref().unwrap();
            assert_eq!(toast.title_key, "toast.contact.limit");
            assert_eq!(model.emergency.contacts.len(), 2);
        }

        #[test]
        fn badge_toast_replaces_article_toast() {
            let app = AppTester::<App, Effect>::default();
            let mut model = ready_model();
            app.update(Event::ArticleMarkedRead { id: "article1".into() }, &mut model);
            assert_eq!(
                model.active_toast.as_ref().map(|t| t.title_key.as_str()),
                Some("toast.article.read")
            );
            app.update(Event::ArticleMarkedRead { id: "article3".into() }, &mut model);
            assert_eq!(
                model.active_toast.as_ref().map(|t| t.title_key.as_str()),
                Some("toast.badge.earned")
            );
        }

        #[test]
        fn app_started_runs_only_once() {
            let app = AppTester::<App, Effect>::default();
            let mut model = Model::default();
            let first = app.update(Event::AppStarted, &mut model);
            assert!(!first.effects.is_empty());

            let again = app.update(Event::AppStarted, &mut model);
            assert!(again.effects.is_empty());

            let mut model = ready_model();
            model.navigator.navigate_to(crate::Page::Settings);
            let update = app.update(Event::AppStarted, &mut model);
            assert!(update.effects.is_empty());
            assert_eq!(model.phase, AppPhase::Ready);
            assert_eq!(model.navigator.current_page(), crate::Page::Settings);
        }

        #[test]
        fn logout_without_session_does_nothing() {
            let app = AppTester::<App, Effect>::default();
            let mut model = ready_model();
            let update = app.update(Event::LogoutRequested, &mut model);
            assert!(update.effects.is_empty());
            assert_eq!(model.phase, AppPhase::Ready);
        }
    }
}
