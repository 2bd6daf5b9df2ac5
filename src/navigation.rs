use crate::trends::Trend;

// ============================================================================
// Tabs
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Home,
    Search,
    Favorites,
    Settings,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::Home, Tab::Search, Tab::Favorites, Tab::Settings];

    pub fn label(self) -> &'static str {
        match self {
            Tab::Home => "Home",
            Tab::Search => "Search",
            Tab::Favorites => "Favorites",
            Tab::Settings => "Settings",
        }
    }

    fn index(self) -> usize {
        match self {
            Tab::Home => 0,
            Tab::Search => 1,
            Tab::Favorites => 2,
            Tab::Settings => 3,
        }
    }

    pub fn next(self) -> Tab {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Tab {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

// ============================================================================
// Overlay
// ============================================================================

/// A modal view stacked above the tabs. At most one at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Overlay {
    /// Full explanation of one trend. Holds its own copy so a snapshot
    /// replacement underneath does not change what is being read.
    Detail(Box<Trend>),
    Onboarding,
    About,
}

// ============================================================================
// Navigation State
// ============================================================================

/// Active tab plus optional overlay.
///
/// Tab changes are ignored while an overlay is shown; the tab bar is hidden
/// then, so the user cannot reach it anyway.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Navigation {
    tab: Tab,
    overlay: Option<Overlay>,
}

impl Navigation {
    /// Fresh installs start in onboarding.
    pub fn new(onboarded: bool) -> Self {
        Self {
            tab: Tab::Home,
            overlay: if onboarded {
                None
            } else {
                Some(Overlay::Onboarding)
            },
        }
    }

    pub fn tab(&self) -> Tab {
        self.tab
    }

    pub fn overlay(&self) -> Option<&Overlay> {
        self.overlay.as_ref()
    }

    pub fn tab_bar_visible(&self) -> bool {
        self.overlay.is_none()
    }

    /// Returns whether the tab actually changed.
    pub fn select_tab(&mut self, tab: Tab) -> bool {
        if self.overlay.is_some() || self.tab == tab {
            return false;
        }
        self.tab = tab;
        true
    }

    /// Show the detail overlay for `trend`, from whatever tab is active.
    pub fn open_detail(&mut self, trend: Trend) {
        self.overlay = Some(Overlay::Detail(Box::new(trend)));
    }

    pub fn open_about(&mut self) {
        self.overlay = Some(Overlay::About);
    }

    /// Leave Detail or About. Onboarding can only be left by completing it.
    pub fn back(&mut self) -> bool {
        match self.overlay {
            Some(Overlay::Detail(_)) | Some(Overlay::About) => {
                self.overlay = None;
                true
            }
            Some(Overlay::Onboarding) | None => false,
        }
    }

    pub fn finish_onboarding(&mut self) {
        if self.overlay == Some(Overlay::Onboarding) {
            self.overlay = None;
        }
    }

    /// The trend under the detail overlay, if that is what is shown.
    pub fn detail(&self) -> Option<&Trend> {
        match &self.overlay {
            Some(Overlay::Detail(trend)) => Some(&**trend),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trends::fallback_trends;

    fn ratio() -> Trend {
        fallback_trends().into_iter().nth(2).unwrap()
    }

    #[test]
    fn test_fresh_install_starts_in_onboarding() {
        let nav = Navigation::new(false);
        assert_eq!(nav.overlay(), Some(&Overlay::Onboarding));
        assert_eq!(nav.tab(), Tab::Home);
        assert!(!nav.tab_bar_visible());
    }

    #[test]
    fn test_onboarded_starts_on_home() {
        let nav = Navigation::new(true);
        assert_eq!(nav.overlay(), None);
        assert!(nav.tab_bar_visible());
    }

    #[test]
    fn test_tab_selection_ignored_under_overlay() {
        let mut nav = Navigation::new(true);
        nav.open_about();
        assert!(!nav.select_tab(Tab::Settings));
        assert_eq!(nav.tab(), Tab::Home);
    }

    #[test]
    fn test_open_detail_from_any_tab_and_back() {
        let mut nav = Navigation::new(true);
        assert!(nav.select_tab(Tab::Favorites));
        nav.open_detail(ratio());
        assert_eq!(nav.detail().map(|t| t.id.as_str()), Some("ratio"));

        assert!(nav.back());
        assert_eq!(nav.overlay(), None);
        // Tab is where the user left it
        assert_eq!(nav.tab(), Tab::Favorites);
    }

    #[test]
    fn test_back_does_not_skip_onboarding() {
        let mut nav = Navigation::new(false);
        assert!(!nav.back());
        assert_eq!(nav.overlay(), Some(&Overlay::Onboarding));

        nav.finish_onboarding();
        assert_eq!(nav.overlay(), None);
    }

    #[test]
    fn test_tab_cycle_wraps() {
        assert_eq!(Tab::Settings.next(), Tab::Home);
        assert_eq!(Tab::Home.prev(), Tab::Settings);
        assert_eq!(Tab::Search.next(), Tab::Favorites);
    }
}
