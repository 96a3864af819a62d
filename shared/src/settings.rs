use serde::{Deserialize, Serialize};

use crate::progress::TickedProgress;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    Sms,
    Calls,
    Contacts,
    Notifications,
}

impl Permission {
    pub const ALL: [Permission; 4] = [
        Self::Sms,
        Self::Calls,
        Self::Contacts,
        Self::Notifications,
    ];

    #[must_use]
    pub const fn label_key(self) -> &'static str {
        match self {
            Self::Sms => "permission.sms",
            Self::Calls => "permission.calls",
            Self::Contacts => "permission.contacts",
            Self::Notifications => "permission.notifications",
        }
    }
}

/// Simulated permission switches; all start enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionSet {
    pub sms: bool,
    pub calls: bool,
    pub contacts: bool,
    pub notifications: bool,
}

impl Default for PermissionSet {
    fn default() -> Self {
        Self {
            sms: true,
            calls: true,
            contacts: true,
            notifications: true,
        }
    }
}

impl PermissionSet {
    fn slot(&mut self, permission: Permission) -> &mut bool {
        match permission {
            Permission::Sms => &mut self.sms,
            Permission::Calls => &mut self.calls,
            Permission::Contacts => &mut self.contacts,
            Permission::Notifications => &mut self.notifications,
        }
    }

    #[must_use]
    pub fn get(&self, permission: Permission) -> bool {
        match permission {
            Permission::Sms => self.sms,
            Permission::Calls => self.calls,
            Permission::Contacts => self.contacts,
            Permission::Notifications => self.notifications,
        }
    }

    pub fn toggle(&mut self, permission: Permission) -> bool {
        let slot = self.slot(permission);
        *slot = !*slot;
        *slot
    }
}

/// Settings page state. Local processing and cloud backup are stored and
/// shown but change nothing else.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub permissions: PermissionSet,
    pub background_sync: bool,
    pub local_processing: bool,
    pub cloud_backup: bool,
    pub dark_mode: bool,
    pub db_sync: TickedProgress,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            permissions: PermissionSet::default(),
            background_sync: true,
            local_processing: true,
            cloud_backup: false,
            dark_mode: false,
            db_sync: TickedProgress::default(),
        }
    }
}

fn flip(flag: &mut bool) -> bool {
    *flag = !*flag;
    *flag
}

impl Settings {
    pub fn toggle_background_sync(&mut self) -> bool {
        flip(&mut self.background_sync)
    }

    pub fn toggle_local_processing(&mut self) -> bool {
        flip(&mut self.local_processing)
    }

    pub fn toggle_cloud_backup(&mut self) -> bool {
        flip(&mut self.cloud_backup)
    }

    pub fn toggle_dark_mode(&mut self) -> bool {
        flip(&mut self.dark_mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_follow_first_run_state() {
        let settings = Settings::default();
        assert!(Permission::ALL.iter().all(|p| settings.permissions.get(*p)));
        assert!(settings.background_sync);
        assert!(settings.local_processing);
        assert!(!settings.cloud_backup);
        assert!(!settings.dark_mode);
        assert_eq!(settings.db_sync.percent(), 0);
    }

    #[test]
    fn permission_toggle_touches_one_switch() {
        let mut perms = PermissionSet::default();
        assert!(!perms.toggle(Permission::Contacts));
        assert!(!perms.get(Permission::Contacts));
        assert!(perms.get(Permission::Sms));
        assert!(perms.toggle(Permission::Contacts));
    }

    #[test]
    fn flags_flip() {
        let mut settings = Settings::default();
        assert!(settings.toggle_cloud_backup());
        assert!(!settings.toggle_local_processing());
        assert!(settings.toggle_dark_mode());
        assert!(!settings.toggle_background_sync());
    }
}
