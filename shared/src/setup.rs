//! First-run setup wizard: a strictly linear run of steps that ends in either
//! "finish" on the last step or "skip" from anywhere.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SetupStep {
    #[default]
    Intro,
    Permissions,
    Notifications,
    Emergency,
    Done,
}

impl SetupStep {
    pub const ALL: [SetupStep; 5] = [
        Self::Intro,
        Self::Permissions,
        Self::Notifications,
        Self::Emergency,
        Self::Done,
    ];

    #[must_use]
    pub fn index(self) -> usize {
        Self::ALL.iter().position(|s| *s == self).unwrap_or(0)
    }

    #[must_use]
    pub fn next(self) -> Option<Self> {
        Self::ALL.get(self.index() + 1).copied()
    }

    #[must_use]
    pub fn prev(self) -> Option<Self> {
        self.index().checked_sub(1).and_then(|i| Self::ALL.get(i).copied())
    }

    #[must_use]
    pub const fn is_last(self) -> bool {
        matches!(self, Self::Done)
    }

    #[must_use]
    pub const fn title_key(self) -> &'static str {
        match self {
            Self::Intro => "setup.intro.title",
            Self::Permissions => "setup.permissions.title",
            Self::Notifications => "setup.notifications.title",
            Self::Emergency => "setup.emergency.title",
            Self::Done => "setup.done.title",
        }
    }

    #[must_use]
    pub const fn description_key(self) -> &'static str {
        match self {
            Self::Intro => "setup.intro.desc",
            Self::Permissions => "setup.permissions.desc",
            Self::Notifications => "setup.notifications.desc",
            Self::Emergency => "setup.emergency.desc",
            Self::Done => "setup.done.desc",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardPermission {
    Sms,
    Calls,
    Notifications,
}

impl WizardPermission {
    #[must_use]
    pub const fn label_key(self) -> &'static str {
        match self {
            Self::Sms => "permission.sms",
            Self::Calls => "permission.calls",
            Self::Notifications => "permission.notifications",
        }
    }
}

/// Simulated grants; nothing is requested from the platform.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WizardGrants {
    pub sms: bool,
    pub calls: bool,
    pub notifications: bool,
}

impl WizardGrants {
    pub fn grant(&mut self, permission: WizardPermission) -> bool {
        let slot = match permission {
            WizardPermission::Sms => &mut self.sms,
            WizardPermission::Calls => &mut self.calls,
            WizardPermission::Notifications => &mut self.notifications,
        };
        !std::mem::replace(slot, true)
    }
}

/// Result of pressing a wizard button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardOutcome {
    Moved(SetupStep),
    Stayed,
    Finished,
    Skipped,
}

impl WizardOutcome {
    #[must_use]
    pub const fn closes_gate(self) -> bool {
        matches!(self, Self::Finished | Self::Skipped)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetupWizard {
    step: SetupStep,
    grants: WizardGrants,
}

impl SetupWizard {
    #[must_use]
    pub fn step(&self) -> SetupStep {
        self.step
    }

    #[must_use]
    pub fn grants(&self) -> WizardGrants {
        self.grants
    }

    pub fn next(&mut self) -> WizardOutcome {
        match self.step.next() {
            Some(step) => {
                self.step = step;
                WizardOutcome::Moved(step)
            }
            None => WizardOutcome::Finished,
        }
    }

    pub fn back(&mut self) -> WizardOutcome {
        match self.step.prev() {
            Some(step) => {
                self.step = step;
                WizardOutcome::Moved(step)
            }
            None => WizardOutcome::Stayed,
        }
    }

    pub fn skip(&mut self) -> WizardOutcome {
        WizardOutcome::Skipped
    }

    /// `true` when the permission was not granted before.
    pub fn grant(&mut self, permission: WizardPermission) -> bool {
        self.grants.grant(permission)
    }

    /// Progress bar value: 0 on the first step, 100 on the last.
    #[must_use]
    pub fn progress_percent(&self) -> u8 {
        let last = SetupStep::ALL.len() - 1;
        u8::try_from(self.step.index() * 100 / last).unwrap_or(100)
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn walks_forward_to_finish() {
        let mut wizard = SetupWizard::default();
        assert_eq!(wizard.step(), SetupStep::Intro);
        for expected in &SetupStep::ALL[1..] {
            assert_eq!(wizard.next(), WizardOutcome::Moved(*expected));
        }
        assert_eq!(wizard.step(), SetupStep::Done);
        assert_eq!(wizard.next(), WizardOutcome::Finished);
        assert_eq!(wizard.step(), SetupStep::Done);
    }

    #[test]
    fn back_is_a_no_op_on_intro() {
        let mut wizard = SetupWizard::default();
        assert_eq!(wizard.back(), WizardOutcome::Stayed);
        assert_eq!(wizard.step(), SetupStep::Intro);
    }

    #[test]
    fn skip_closes_gate_from_any_step() {
        let mut wizard = SetupWizard::default();
        wizard.next();
        wizard.next();
        assert!(wizard.skip().closes_gate());
        assert!(!WizardOutcome::Stayed.closes_gate());
    }

    #[test]
    fn progress_spans_zero_to_hundred() {
        let mut wizard = SetupWizard::default();
        assert_eq!(wizard.progress_percent(), 0);
        wizard.next();
        assert_eq!(wizard.progress_percent(), 25);
        while let WizardOutcome::Moved(_) = wizard.next() {}
        assert_eq!(wizard.progress_percent(), 100);
    }

    #[test]
    fn grants_report_first_time_only() {
        let mut wizard = SetupWizard::default();
        assert!(wizard.grant(WizardPermission::Sms));
        assert!(!wizard.grant(WizardPermission::Sms));
        assert!(wizard.grants().sms);
        assert!(!wizard.grants().calls);
    }

    proptest! {
        #[test]
        fn next_and_back_move_by_one(start in 0usize..5) {
            let mut wizard = SetupWizard::default();
            for _ in 0..start {
                wizard.next();
            }
            prop_assert_eq!(wizard.step().index(), start);

            let mut forward = wizard.clone();
            match forward.next() {
                WizardOutcome::Moved(step) => prop_assert_eq!(step.index(), start + 1),
                WizardOutcome::Finished => prop_assert_eq!(start, SetupStep::ALL.len() - 1),
                other => prop_assert!(false, "unexpected {:?}", other),
            }

            let mut backward = wizard.clone();
            match backward.back() {
                WizardOutcome::Moved(step) => prop_assert_eq!(step.index() + 1, start),
                WizardOutcome::Stayed => prop_assert_eq!(start, 0),
                other => prop_assert!(false, "unexpected {:?}", other),
            }
        }
    }
}
