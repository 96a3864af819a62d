//! Top-level pages and the single-page navigation state machine.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Page {
    #[default]
    Home,
    Sms,
    Call,
    History,
    Education,
    Emergency,
    Settings,
    About,
}

impl Page {
    /// Drawer menu order.
    pub const ALL: [Page; 8] = [
        Self::Home,
        Self::Sms,
        Self::Call,
        Self::History,
        Self::Education,
        Self::Emergency,
        Self::Settings,
        Self::About,
    ];

    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Sms => "sms",
            Self::Call => "call",
            Self::History => "history",
            Self::Education => "education",
            Self::Emergency => "emergency",
            Self::Settings => "settings",
            Self::About => "about",
        }
    }

    #[must_use]
    pub const fn title_key(self) -> &'static str {
        match self {
            Self::Home => "menu.home",
            Self::Sms => "menu.sms",
            Self::Call => "menu.call",
            Self::History => "menu.history",
            Self::Education => "menu.education",
            Self::Emergency => "menu.emergency",
            Self::Settings => "menu.settings",
            Self::About => "menu.about",
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavigationError {
    #[error("unknown page: {0:?}")]
    UnknownPage(String),
}

impl FromStr for Page {
    type Err = NavigationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Page::ALL
            .into_iter()
            .find(|p| p.id() == s)
            .ok_or_else(|| NavigationError::UnknownPage(s.to_string()))
    }
}

/// Current page, drawer flag and the cosmetic page-transition flag.
///
/// Every navigation bumps `transition_generation`; a transition-elapsed
/// signal only clears the flag when it carries the latest generation, so a
/// quick second navigation is not cut short by the first one's timer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Navigator {
    current_page: Page,
    drawer_open: bool,
    transitioning: bool,
    transition_generation: u64,
}

impl Navigator {
    #[must_use]
    pub fn current_page(&self) -> Page {
        self.current_page
    }

    #[must_use]
    pub fn drawer_open(&self) -> bool {
        self.drawer_open
    }

    #[must_use]
    pub fn is_transitioning(&self) -> bool {
        self.transitioning
    }

    /// Returns the transition generation the caller should hand back to
    /// [`Navigator::finish_transition`] once the transition delay elapses.
    pub fn navigate_to(&mut self, page: Page) -> u64 {
        self.current_page = page;
        self.drawer_open = false;
        self.transitioning = true;
        self.transition_generation = self.transition_generation.wrapping_add(1);
        self.transition_generation
    }

    pub fn navigate_to_id(&mut self, id: &str) -> Result<u64, NavigationError> {
        let page = id.parse::<Page>()?;
        Ok(self.navigate_to(page))
    }

    pub fn finish_transition(&mut self, generation: u64) -> bool {
        if self.transitioning && generation == self.transition_generation {
            self.transitioning = false;
            return true;
        }
        false
    }

    pub fn toggle_drawer(&mut self) {
        self.drawer_open = !self.drawer_open;
    }

    pub fn set_drawer_open(&mut self, open: bool) {
        self.drawer_open = open;
    }

    /// Back to the initial state: home, drawer closed.
    pub fn reset(&mut self) {
        self.current_page = Page::Home;
        self.drawer_open = false;
        self.transitioning = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn starts_on_home_with_drawer_closed() {
        let nav = Navigator::default();
        assert_eq!(nav.current_page(), Page::Home);
        assert!(!nav.drawer_open());
        assert!(!nav.is_transitioning());
    }

    #[test]
    fn page_ids_parse() {
        for page in Page::ALL {
            assert_eq!(page.id().parse::<Page>().unwrap(), page);
        }
        assert!(matches!(
            "dashboard".parse::<Page>(),
            Err(NavigationError::UnknownPage(id)) if id == "dashboard"
        ));
    }

    #[test]
    fn unknown_page_id_is_a_no_op() {
        let mut nav = Navigator::default();
        nav.navigate_to(Page::Settings);
        nav.set_drawer_open(true);
        assert!(nav.navigate_to_id("Settings ").is_err());
        assert_eq!(nav.current_page(), Page::Settings);
        assert!(nav.drawer_open());
    }

    #[test]
    fn drawer_is_independent_of_page() {
        let mut nav = Navigator::default();
        nav.toggle_drawer();
        assert!(nav.drawer_open());
        assert_eq!(nav.current_page(), Page::Home);
        nav.toggle_drawer();
        assert!(!nav.drawer_open());
        nav.set_drawer_open(true);
        nav.set_drawer_open(true);
        assert!(nav.drawer_open());
    }

    #[test]
    fn stale_transition_does_not_clear_flag() {
        let mut nav = Navigator::default();
        let first = nav.navigate_to(Page::Sms);
        let second = nav.navigate_to(Page::Call);
        assert!(!nav.finish_transition(first));
        assert!(nav.is_transitioning());
        assert!(nav.finish_transition(second));
        assert!(!nav.is_transitioning());
    }

    #[test]
    fn serializes_page_as_id() {
        assert_eq!(serde_json::to_string(&Page::Emergency).unwrap(), "\"emergency\"");
    }

    proptest! {
        #[test]
        fn navigate_sets_page_and_closes_drawer(
            start in 0usize..8,
            target in 0usize..8,
            drawer in any::<bool>(),
        ) {
            let mut nav = Navigator::default();
            nav.navigate_to(Page::ALL[start]);
            nav.set_drawer_open(drawer);
            nav.navigate_to(Page::ALL[target]);
            prop_assert_eq!(nav.current_page(), Page::ALL[target]);
            prop_assert!(!nav.drawer_open());
        }
    }
}
