//! The shell-facing projection of [`Model`]. Every user-visible string is
//! resolved here, in the selected language, so the shell never needs the
//! translation tables.

use serde::{Deserialize, Serialize};

use crate::i18n::{Language, Localizer, TextDirection};
use crate::model::{AppPhase, Model, ProtectionStatus, Toast, ToastArg, ToastKind};
use crate::monitoring::{CallStatus, RiskLevel, ThreatFeedback, ThreatKind, VibrationLevel};
use crate::navigation::Page;
use crate::settings::Permission;
use crate::setup::{SetupStep, WizardGrants};

pub const FAQ_COUNT: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewModel {
    /// BCP-47 tag for the document/UI locale attribute.
    pub lang: String,
    pub text_direction: TextDirection,
    pub dark_mode: bool,
    pub app_name: String,
    pub screen: Screen,
    pub toast: Option<ToastView>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Screen {
    Loading { message: String },
    Setup(SetupView),
    Login(LoginView),
    Ready(ReadyView),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetupView {
    pub step: SetupStep,
    pub step_index: usize,
    pub step_count: usize,
    pub progress_percent: u8,
    pub title: String,
    pub description: String,
    pub can_go_back: bool,
    pub is_last: bool,
    pub grants: WizardGrants,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginView {
    pub title: String,
    pub digits: String,
    pub country_prefix: String,
    pub error: Option<String>,
    pub submitting: bool,
    pub can_submit: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    pub page: Page,
    pub label: String,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadyView {
    pub page: Page,
    pub title: String,
    pub drawer_open: bool,
    pub transitioning: bool,
    pub menu: Vec<MenuItem>,
    pub signed_in_as: Option<String>,
    /// Signed out: the shell offers a sign-in entry that sends `LoginOpened`.
    pub can_sign_in: bool,
    pub content: PageView,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PageView {
    Home(HomeView),
    Sms(SmsView),
    Call(CallView),
    History(HistoryView),
    Education(EducationView),
    Emergency(EmergencyView),
    Settings(SettingsView),
    About(AboutView),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanView {
    pub running: bool,
    pub percent: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HomeView {
    pub status: ProtectionStatus,
    pub status_label: String,
    pub scan: ScanView,
    pub flagged_sms: usize,
    pub high_risk_sms: usize,
    pub flagged_calls: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmsItemView {
    pub id: String,
    pub sender: String,
    pub body: String,
    pub received: String,
    pub risk: RiskLevel,
    pub risk_label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmsView {
    pub protection_active: bool,
    pub scan: ScanView,
    pub messages: Vec<SmsItemView>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallItemView {
    pub id: String,
    pub number: String,
    pub when: String,
    pub status: CallStatus,
    pub status_label: String,
    pub duration: Option<String>,
    pub can_block: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallView {
    pub protection_active: bool,
    pub vibration: VibrationLevel,
    pub vibration_label: String,
    pub calls: Vec<CallItemView>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreatItemView {
    pub id: String,
    pub kind: ThreatKind,
    pub source: String,
    pub when: String,
    pub risk: RiskLevel,
    pub risk_label: String,
    pub content: String,
    pub reasons: Vec<String>,
    pub threat_words: Vec<(String, u32)>,
    pub feedback: Option<ThreatFeedback>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryView {
    pub query: String,
    pub risk_filter: Option<RiskLevel>,
    pub kind_filter: Option<ThreatKind>,
    pub threats: Vec<ThreatItemView>,
    pub total: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleView {
    pub id: String,
    pub title: String,
    pub summary: String,
    pub read_time: String,
    pub category: String,
    pub read: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BadgeView {
    pub id: String,
    pub name: String,
    pub description: String,
    pub progress: u8,
    pub earned: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EducationView {
    pub articles: Vec<ArticleView>,
    pub badges: Vec<BadgeView>,
    pub read_count: usize,
    pub total_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactView {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub relation: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmergencyView {
    pub contacts: Vec<ContactView>,
    pub can_add_contact: bool,
    pub max_contacts: usize,
    pub silent_mode: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionView {
    pub permission: Permission,
    pub label: String,
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageOption {
    pub code: String,
    pub label: String,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsView {
    pub languages: Vec<LanguageOption>,
    pub permissions: Vec<PermissionView>,
    pub background_sync: bool,
    pub local_processing: bool,
    pub cloud_backup: bool,
    pub dark_mode: bool,
    pub db_sync: ScanView,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaqEntry {
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AboutView {
    pub version: String,
    pub faq: Vec<FaqEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToastView {
    pub id: u64,
    pub kind: ToastKind,
    pub title: String,
    pub description: Option<String>,
    pub duration_ms: u64,
}

impl ToastView {
    fn resolve(toast: &Toast, l10n: &Localizer) -> Self {
        let args: Vec<(String, String)> = toast
            .args
            .iter()
            .map(|(name, arg)| {
                let value = match arg {
                    ToastArg::Text(text) => text.clone(),
                    ToastArg::Key(key) => l10n.resolve(key).to_string(),
                };
                (name.clone(), value)
            })
            .collect();
        Self {
            id: toast.id,
            kind: toast.kind,
            title: l10n.resolve_with(&toast.title_key, &args),
            description: toast
                .description_key
                .as_deref()
                .map(|key| l10n.resolve_with(key, &args)),
            duration_ms: toast.duration_ms,
        }
    }
}

#[must_use]
pub fn build(model: &Model) -> ViewModel {
    let l10n = &model.localizer;
    let language = l10n.language();

    let screen = match model.phase {
        AppPhase::Loading => Screen::Loading {
            message: l10n.resolve("app.loading").to_string(),
        },
        AppPhase::Setup => Screen::Setup(setup_view(model)),
        AppPhase::Login => Screen::Login(login_view(model)),
        AppPhase::Ready => Screen::Ready(ready_view(model)),
    };

    ViewModel {
        lang: language.code().to_string(),
        text_direction: language.text_direction(),
        dark_mode: model.settings.dark_mode,
        app_name: l10n.resolve("app.name").to_string(),
        screen,
        toast: model
            .active_toast
            .as_ref()
            .map(|t| ToastView::resolve(t, l10n)),
    }
}

fn setup_view(model: &Model) -> SetupView {
    let l10n = &model.localizer;
    let step = model.wizard.step();
    SetupView {
        step,
        step_index: step.index(),
        step_count: SetupStep::ALL.len(),
        progress_percent: model.wizard.progress_percent(),
        title: l10n.resolve(step.title_key()).to_string(),
        description: l10n.resolve(step.description_key()).to_string(),
        can_go_back: step.prev().is_some(),
        is_last: step.is_last(),
        grants: model.wizard.grants(),
    }
}

fn login_view(model: &Model) -> LoginView {
    let l10n = &model.localizer;
    let form = &model.login_form;
    LoginView {
        title: l10n.resolve("login.title").to_string(),
        digits: form.digits.clone(),
        country_prefix: model.config.phone_country_prefix.clone(),
        error: form
            .error
            .as_ref()
            .map(|e| l10n.resolve(e.message_key()).to_string()),
        submitting: form.submitting,
        can_submit: !form.submitting && !form.digits.trim().is_empty(),
    }
}

fn ready_view(model: &Model) -> ReadyView {
    let l10n = &model.localizer;
    let nav = &model.navigator;
    let page = nav.current_page();
    ReadyView {
        page,
        title: l10n.resolve(page.title_key()).to_string(),
        drawer_open: nav.drawer_open(),
        transitioning: nav.is_transitioning(),
        menu: Page::ALL
            .into_iter()
            .map(|p| MenuItem {
                page: p,
                label: l10n.resolve(p.title_key()).to_string(),
                selected: p == page,
            })
            .collect(),
        signed_in_as: model.session.phone_number.as_ref().map(|n| n.masked()),
        can_sign_in: !model.session.logged_in,
        content: page_view(model, page),
    }
}

fn scan_view(progress: &crate::progress::TickedProgress) -> ScanView {
    ScanView {
        running: progress.is_running(),
        percent: progress.percent(),
    }
}

fn page_view(model: &Model, page: Page) -> PageView {
    let l10n = &model.localizer;
    match page {
        Page::Home => {
            let status = model.protection_status();
            let status_key = match status {
                ProtectionStatus::Protected => "home.security.high",
                ProtectionStatus::AtRisk => "home.security.medium",
                ProtectionStatus::Critical => "home.security.low",
            };
            PageView::Home(HomeView {
                status,
                status_label: l10n.resolve(status_key).to_string(),
                scan: scan_view(&model.home.quick_scan),
                flagged_sms: model.sms.messages.len(),
                high_risk_sms: model.sms.high_risk_count(),
                flagged_calls: model.calls.count(CallStatus::Suspicious)
                    + model.calls.count(CallStatus::Blocked),
            })
        }
        Page::Sms => PageView::Sms(SmsView {
            protection_active: model.sms.protection_active,
            scan: scan_view(&model.sms.scan),
            messages: model
                .sms
                .messages
                .iter()
                .map(|m| SmsItemView {
                    id: m.id.clone(),
                    sender: m.sender.clone(),
                    body: m.body.clone(),
                    received: m.received.clone(),
                    risk: m.risk,
                    risk_label: l10n.resolve(m.risk.label_key()).to_string(),
                })
                .collect(),
        }),
        Page::Call => PageView::Call(CallView {
            protection_active: model.calls.protection_active,
            vibration: model.calls.vibration,
            vibration_label: l10n.resolve(model.calls.vibration.label_key()).to_string(),
            calls: model
                .calls
                .calls
                .iter()
                .map(|c| CallItemView {
                    id: c.id.clone(),
                    number: c.number.clone(),
                    when: c.when.clone(),
                    status: c.status,
                    status_label: l10n.resolve(c.status.label_key()).to_string(),
                    duration: c.duration.clone(),
                    can_block: c.status == CallStatus::Suspicious,
                })
                .collect(),
        }),
        Page::History => {
            let history = &model.history;
            PageView::History(HistoryView {
                query: history.filter.query.clone(),
                risk_filter: history.filter.risk,
                kind_filter: history.filter.kind,
                threats: history
                    .visible()
                    .map(|t| ThreatItemView {
                        id: t.id.clone(),
                        kind: t.kind,
                        source: t.source.clone(),
                        when: t.when.clone(),
                        risk: t.risk,
                        risk_label: l10n.resolve(t.risk.label_key()).to_string(),
                        content: t.content.clone(),
                        reasons: t.reasons.clone(),
                        threat_words: t
                            .threat_words
                            .iter()
                            .map(|w| (w.word.clone(), w.count))
                            .collect(),
                        feedback: t.feedback,
                    })
                    .collect(),
                total: history.threats.len(),
            })
        }
        Page::Education => {
            let hub = &model.education;
            PageView::Education(EducationView {
                articles: hub
                    .articles
                    .iter()
                    .map(|a| ArticleView {
                        id: a.id.clone(),
                        title: a.title.clone(),
                        summary: a.summary.clone(),
                        read_time: a.read_time.clone(),
                        category: a.category.clone(),
                        read: a.read,
                    })
                    .collect(),
                badges: hub
                    .badges
                    .iter()
                    .map(|b| BadgeView {
                        id: b.id.clone(),
                        name: b.name.clone(),
                        description: b.description.clone(),
                        progress: b.progress,
                        earned: b.earned(),
                    })
                    .collect(),
                read_count: hub.read_count(),
                total_count: hub.articles.len(),
            })
        }
        Page::Emergency => {
            let center = &model.emergency;
            let max = model.config.max_emergency_contacts;
            PageView::Emergency(EmergencyView {
                contacts: center
                    .contacts
                    .iter()
                    .map(|c| ContactView {
                        id: c.id.clone(),
                        name: c.name.clone(),
                        phone: c.phone.clone(),
                        relation: c.relation.clone(),
                    })
                    .collect(),
                can_add_contact: center.contacts.len() < max,
                max_contacts: max,
                silent_mode: center.silent_mode,
            })
        }
        Page::Settings => {
            let settings = &model.settings;
            PageView::Settings(SettingsView {
                languages: Language::ALL
                    .into_iter()
                    .map(|lang| LanguageOption {
                        code: lang.code().to_string(),
                        label: l10n.resolve(lang.name_key()).to_string(),
                        selected: lang == l10n.language(),
                    })
                    .collect(),
                permissions: Permission::ALL
                    .into_iter()
                    .map(|p| PermissionView {
                        permission: p,
                        label: l10n.resolve(p.label_key()).to_string(),
                        enabled: settings.permissions.get(p),
                    })
                    .collect(),
                background_sync: settings.background_sync,
                local_processing: settings.local_processing,
                cloud_backup: settings.cloud_backup,
                dark_mode: settings.dark_mode,
                db_sync: scan_view(&settings.db_sync),
            })
        }
        Page::About => PageView::About(AboutView {
            version: l10n.resolve("app.version").to_string(),
            faq: (1..=FAQ_COUNT)
                .map(|i| FaqEntry {
                    question: l10n.resolve(&format!("faq.question.{i}")).to_string(),
                    answer: l10n.resolve(&format!("faq.answer.{i}")).to_string(),
                })
                .collect(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ready_model() -> Model {
        let mut model = Model::default();
        model.phase = AppPhase::Ready;
        model
    }

    #[test]
    fn loading_screen_before_gate_opens() {
        let vm = build(&Model::default());
        assert_eq!(vm.lang, "en");
        assert_eq!(vm.app_name, "Shield Safe Zone");
        assert!(matches!(vm.screen, Screen::Loading { .. }));
    }

    #[test]
    fn menu_lists_every_page_once() {
        let mut model = ready_model();
        model.navigator.navigate_to(Page::Settings);
        let Screen::Ready(ready) = build(&model).screen else {
            panic!("expected ready screen");
        };
        assert_eq!(ready.menu.len(), Page::ALL.len());
        let selected: Vec<_> = ready.menu.iter().filter(|m| m.selected).collect();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].page, Page::Settings);
        assert!(matches!(ready.content, PageView::Settings(_)));
    }

    #[test]
    fn about_page_has_five_faq_entries() {
        let mut model = ready_model();
        model.navigator.navigate_to(Page::About);
        let Screen::Ready(ready) = build(&model).screen else {
            panic!("expected ready screen");
        };
        let PageView::About(about) = ready.content else {
            panic!("expected about page");
        };
        assert_eq!(about.faq.len(), FAQ_COUNT);
        assert!(about.faq.iter().all(|f| !f.question.starts_with("faq.")));
    }

    #[test]
    fn toast_arguments_are_resolved() {
        let mut model = ready_model();
        model.show_toast(
            Toast::success("toast.vibration.updated")
                .described()
                .with_key("level", "call.vibration.high"),
        );
        let toast = build(&model).toast.unwrap();
        let description = toast.description.unwrap();
        assert!(!description.contains("{level}"));
        assert!(description.contains(model.localizer.resolve("call.vibration.high")));
    }

    #[test]
    fn hindi_view_reports_locale() {
        let mut model = ready_model();
        model.localizer.select(Language::Hindi);
        let vm = build(&model);
        assert_eq!(vm.lang, "hi");
        assert_eq!(vm.text_direction, TextDirection::Ltr);
        assert_eq!(vm.app_name, "शील्ड सेफ जोन");
    }
}
