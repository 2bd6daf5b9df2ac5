use crate::keybindings::{Context as KbContext, KeybindingRegistry};
use crate::navigation::{Navigation, Overlay, Tab};
use crate::platform::Services;
use crate::storage::{Database, FavoritesWriter, UserState};
use crate::theme::{StyleMap, ThemeVariant};
use crate::trends::{
    favorite_trends, filter, is_favorite, toggle_favorite, ContentStore, FetchError,
    RefreshOutcome, RemoteSource, Trend,
};
use crate::util::MAX_SEARCH_QUERY_LENGTH;
use ratatui::style::Style;
use std::borrow::Cow;
use tokio::time::Instant;

/// Maximum scroll offset for the detail view (ratatui u16 limit).
pub const MAX_SCROLL: usize = u16::MAX as usize;

// ============================================================================
// Settings and About Rows
// ============================================================================

/// Row index of the daily digest switch on the Settings tab.
pub const SETTING_DIGEST: usize = 0;
/// Row index of "About & Sources" on the Settings tab.
pub const SETTING_ABOUT: usize = 1;
pub const SETTINGS_ROWS: usize = 2;

/// Links offered on the About screen, in display order.
pub const ABOUT_LINKS: [(&str, &str); 2] = [
    ("Open Know Your Meme", "https://knowyourmeme.com"),
    ("Open r/OutOfTheLoop", "https://www.reddit.com/r/OutOfTheLoop/"),
];

// ============================================================================
// Alert
// ============================================================================

/// A one-off informational message shown over everything else.
/// Any key dismisses it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Alert {
    pub title: &'static str,
    pub message: &'static str,
}

pub const NOTIFICATIONS_DISABLED: Alert = Alert {
    title: "Notifications disabled",
    message: "You can enable notifications in Settings later.",
};

pub const DIGEST_PAUSED: Alert = Alert {
    title: "Daily digest paused",
    message: "Notifications are not allowed right now, so the digest is off until you turn it on again.",
};

// ============================================================================
// Background Events
// ============================================================================

/// Events from background tasks
pub enum AppEvent {
    /// A trend fetch finished, successfully or not.
    TrendsFetched(Result<Vec<Trend>, FetchError>),
    /// Persisting the favorites list failed. Memory keeps the new list.
    FavoritesSaveFailed { error: String },
    /// The daily digest timer fired.
    DigestDue {
        title: &'static str,
        body: &'static str,
    },
    /// A background task panicked.
    ///
    /// Fields:
    /// - `task`: Name of the task that panicked (e.g., "refresh", "favorites_write")
    /// - `error`: The panic message extracted from the panic payload
    TaskPanicked { task: &'static str, error: String },
}

// ============================================================================
// Application State
// ============================================================================

/// Central application state
pub struct App {
    pub db: Database,
    /// Orders background favorites writes.
    pub favorites_writer: FavoritesWriter,
    pub source: RemoteSource,
    pub store: ContentStore,
    pub services: Services,

    // Theme
    /// Current theme variant (for cycling).
    pub theme_variant: ThemeVariant,
    /// Active style map for all UI rendering.
    pub theme: StyleMap,

    /// Keybinding registry for action-key mapping with config overrides.
    pub keybindings: KeybindingRegistry,

    pub nav: Navigation,

    // Persisted user state, mirrored in memory
    pub onboarded: bool,
    /// Insertion-ordered favorite ids. May name trends that are no longer
    /// in the snapshot.
    pub favorites: Vec<String>,
    pub notif_enabled: bool,

    // Per-tab selection
    pub home_selected: usize,
    pub search_selected: usize,
    pub favorites_selected: usize,
    pub settings_selected: usize,

    pub search_query: String,
    /// True while keystrokes go into the search box.
    pub search_editing: bool,

    pub detail_scroll: usize,
    /// Largest useful scroll offset for the current detail, set during render.
    pub detail_max_scroll: usize,
    /// Visible body height of the detail view, set during render.
    pub detail_visible_lines: usize,

    pub about_selected: usize,

    /// Onboarding switch; on by default.
    pub onboarding_enable_daily: bool,

    /// Set by every refresh start, cleared by every completion.
    pub refreshing: bool,

    pub status_message: Option<(Cow<'static, str>, Instant)>,
    pub alert: Option<Alert>,

    /// Whether the help overlay is currently displayed.
    pub show_help: bool,
    /// Scroll offset in the help screen for long keybinding lists.
    pub help_scroll_offset: usize,

    pub needs_redraw: bool,
}

impl App {
    pub fn new(db: Database, state: UserState, source: RemoteSource, services: Services) -> Self {
        Self {
            favorites_writer: FavoritesWriter::new(db.clone()),
            db,
            source,
            store: ContentStore::new(),
            services,
            theme_variant: ThemeVariant::Dark,
            theme: StyleMap::from_palette(&ThemeVariant::Dark.palette()),
            keybindings: KeybindingRegistry::new(),
            nav: Navigation::new(state.onboarded),
            onboarded: state.onboarded,
            favorites: state.favorites,
            notif_enabled: state.notif_enabled,
            home_selected: 0,
            search_selected: 0,
            favorites_selected: 0,
            settings_selected: 0,
            search_query: String::new(),
            search_editing: false,
            detail_scroll: 0,
            detail_max_scroll: MAX_SCROLL,
            detail_visible_lines: 0,
            about_selected: 0,
            onboarding_enable_daily: true,
            refreshing: false,
            status_message: None,
            alert: None,
            show_help: false,
            help_scroll_offset: 0,
            needs_redraw: true,
        }
    }

    /// Resolve a semantic role name to its `Style`.
    pub fn style(&self, role: &str) -> Style {
        self.theme.resolve(role)
    }

    /// Switch to a different theme variant at runtime.
    pub fn set_theme(&mut self, variant: ThemeVariant) {
        self.theme_variant = variant;
        self.theme = StyleMap::from_palette(&variant.palette());
        self.needs_redraw = true;
    }

    /// Cycle to the next theme variant (Dark → Light → Dark).
    ///
    /// Returns the name of the new theme for status display.
    pub fn cycle_theme(&mut self) -> &'static str {
        let next = self.theme_variant.next();
        self.set_theme(next);
        next.name()
    }

    /// Keybinding context for whatever currently has the keyboard.
    pub fn input_context(&self) -> KbContext {
        match self.nav.overlay() {
            Some(Overlay::Detail(_)) => KbContext::Detail,
            Some(Overlay::About) => KbContext::About,
            Some(Overlay::Onboarding) => KbContext::Onboarding,
            None => match self.nav.tab() {
                Tab::Search if self.search_editing => KbContext::Search,
                Tab::Settings => KbContext::Settings,
                _ => KbContext::TrendList,
            },
        }
    }

    // ------------------------------------------------------------------------
    // Trend lists
    // ------------------------------------------------------------------------

    /// The trends the active tab shows, in snapshot order.
    pub fn visible_trends(&self) -> Vec<&Trend> {
        let all = self.store.trends();
        match self.nav.tab() {
            Tab::Home => all.iter().collect(),
            Tab::Search => filter(all, &self.search_query),
            Tab::Favorites => favorite_trends(all, &self.favorites),
            Tab::Settings => Vec::new(),
        }
    }

    /// Selection index of the active list tab.
    pub fn selected_index(&self) -> usize {
        match self.nav.tab() {
            Tab::Home => self.home_selected,
            Tab::Search => self.search_selected,
            Tab::Favorites => self.favorites_selected,
            Tab::Settings => self.settings_selected,
        }
    }

    fn selected_index_mut(&mut self) -> &mut usize {
        match self.nav.tab() {
            Tab::Home => &mut self.home_selected,
            Tab::Search => &mut self.search_selected,
            Tab::Favorites => &mut self.favorites_selected,
            Tab::Settings => &mut self.settings_selected,
        }
    }

    pub fn selected_trend(&self) -> Option<&Trend> {
        self.visible_trends().get(self.selected_index()).copied()
    }

    pub fn is_favorite(&self, id: &str) -> bool {
        is_favorite(&self.favorites, id)
    }

    /// Keep every per-tab selection inside its list.
    pub fn clamp_selections(&mut self) {
        let all = self.store.trends();
        let home_len = all.len();
        let search_len = filter(all, &self.search_query).len();
        let favorites_len = favorite_trends(all, &self.favorites).len();

        self.home_selected = self.home_selected.min(home_len.saturating_sub(1));
        self.search_selected = self.search_selected.min(search_len.saturating_sub(1));
        self.favorites_selected = self
            .favorites_selected
            .min(favorites_len.saturating_sub(1));
        self.settings_selected = self.settings_selected.min(SETTINGS_ROWS - 1);
        self.about_selected = self.about_selected.min(ABOUT_LINKS.len() - 1);
    }

    pub fn nav_down(&mut self) {
        match self.nav.overlay() {
            Some(Overlay::Detail(_)) => self.scroll_detail_down(1),
            Some(Overlay::About) => {
                self.about_selected = (self.about_selected + 1).min(ABOUT_LINKS.len() - 1);
            }
            Some(Overlay::Onboarding) => {}
            None => {
                let len = match self.nav.tab() {
                    Tab::Settings => SETTINGS_ROWS,
                    _ => self.visible_trends().len(),
                };
                let selected = self.selected_index_mut();
                if *selected + 1 < len {
                    *selected += 1;
                }
            }
        }
    }

    pub fn nav_up(&mut self) {
        match self.nav.overlay() {
            Some(Overlay::Detail(_)) => self.scroll_detail_up(1),
            Some(Overlay::About) => self.about_selected = self.about_selected.saturating_sub(1),
            Some(Overlay::Onboarding) => {}
            None => {
                let selected = self.selected_index_mut();
                *selected = selected.saturating_sub(1);
            }
        }
    }

    // ------------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------------

    /// Returns whether the tab changed. Leaving Search stops editing.
    pub fn select_tab(&mut self, tab: Tab) -> bool {
        if !self.nav.select_tab(tab) {
            return false;
        }
        self.search_editing = false;
        self.clamp_selections();
        true
    }

    /// Open the detail overlay for the selected trend, if any.
    pub fn open_selected(&mut self) -> bool {
        let Some(trend) = self.selected_trend().cloned() else {
            return false;
        };
        tracing::debug!(id = %trend.id, "Opening trend detail");
        self.nav.open_detail(trend);
        self.detail_scroll = 0;
        self.detail_max_scroll = MAX_SCROLL;
        true
    }

    pub fn open_about(&mut self) {
        self.about_selected = 0;
        self.nav.open_about();
    }

    pub fn back(&mut self) -> bool {
        let left = self.nav.back();
        if left {
            self.detail_scroll = 0;
        }
        left
    }

    // ------------------------------------------------------------------------
    // Search input
    // ------------------------------------------------------------------------

    pub fn push_search_char(&mut self, c: char) -> bool {
        if self.search_query.chars().count() >= MAX_SEARCH_QUERY_LENGTH {
            return false;
        }
        self.search_query.push(c);
        self.search_selected = 0;
        true
    }

    pub fn pop_search_char(&mut self) {
        if self.search_query.pop().is_some() {
            self.search_selected = 0;
        }
    }

    /// Esc in the search box: clear the query and stop editing.
    pub fn exit_search(&mut self) {
        self.search_query.clear();
        self.search_editing = false;
        self.search_selected = 0;
    }

    // ------------------------------------------------------------------------
    // Detail scrolling
    // ------------------------------------------------------------------------

    pub fn scroll_detail_down(&mut self, lines: usize) {
        self.detail_scroll = self
            .detail_scroll
            .saturating_add(lines)
            .min(self.detail_max_scroll)
            .min(MAX_SCROLL);
    }

    pub fn scroll_detail_up(&mut self, lines: usize) {
        self.detail_scroll = self.detail_scroll.saturating_sub(lines);
    }

    /// Record the scroll bound for the current detail and pull the offset back inside it.
    pub fn clamp_detail_scroll(&mut self, content_lines: usize, visible_lines: usize) {
        self.detail_visible_lines = visible_lines;
        self.detail_max_scroll = content_lines.saturating_sub(visible_lines).min(MAX_SCROLL);
        self.detail_scroll = self.detail_scroll.min(self.detail_max_scroll);
    }

    // ------------------------------------------------------------------------
    // Content refresh
    // ------------------------------------------------------------------------

    /// Mark a refresh as started. Overlapping refreshes are allowed.
    pub fn begin_refresh(&mut self) {
        self.refreshing = true;
        self.needs_redraw = true;
    }

    /// Apply a finished fetch and clear the indicator.
    pub fn finish_refresh(&mut self, result: Result<Vec<Trend>, FetchError>) -> RefreshOutcome {
        self.refreshing = false;
        let outcome = self.store.apply_fetch(result);
        if matches!(outcome, RefreshOutcome::Replaced(_)) {
            self.clamp_selections();
        }
        self.needs_redraw = true;
        outcome
    }

    // ------------------------------------------------------------------------
    // Favorites
    // ------------------------------------------------------------------------

    /// Toggle `id` in memory and pulse haptics. Returns whether it is now a
    /// favorite. Persisting is the caller's job.
    pub fn toggle_favorite(&mut self, id: &str) -> bool {
        self.favorites = toggle_favorite(&self.favorites, id);
        self.services.haptics.selection();
        self.clamp_selections();
        self.needs_redraw = true;
        let now_favorite = self.is_favorite(id);
        tracing::debug!(id, now_favorite, count = self.favorites.len(), "Toggled favorite");
        now_favorite
    }

    // ------------------------------------------------------------------------
    // Notifications and onboarding
    // ------------------------------------------------------------------------

    /// Turn the daily digest on or off.
    ///
    /// Enabling asks for permission first. When the answer is no, the
    /// notifications-disabled alert is raised and nothing else changes.
    /// Returns whether the setting took effect.
    pub async fn set_notifications(&mut self, next: bool) -> bool {
        if next {
            match self.services.digest.enable() {
                Ok(true) => {}
                Ok(false) => {
                    self.alert = Some(NOTIFICATIONS_DISABLED);
                    self.needs_redraw = true;
                    return false;
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to schedule daily digest");
                    self.set_status(format!("Could not schedule digest: {}", e));
                    return false;
                }
            }
        } else {
            self.services.digest.disable();
        }

        self.notif_enabled = next;
        if let Err(e) = self.db.set_notif_enabled(next).await {
            tracing::error!(error = %e, enabled = next, "Failed to persist notification setting");
            self.set_status("Could not save notification setting");
        }
        self.services.haptics.selection();
        self.needs_redraw = true;
        true
    }

    /// Re-arm a digest that was left on in an earlier session.
    ///
    /// When permission is no longer given the digest shows as off for this
    /// session and the paused alert is raised. The stored setting is kept,
    /// so the next launch tries again.
    pub fn resume_digest(&mut self) {
        if !self.notif_enabled {
            return;
        }
        match self.services.digest.enable() {
            Ok(true) => {}
            Ok(false) => {
                tracing::warn!("Daily digest is on but notification permission is not granted");
                self.notif_enabled = false;
                self.alert = Some(DIGEST_PAUSED);
                self.needs_redraw = true;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to re-arm daily digest");
                self.set_status(format!("Could not schedule digest: {}", e));
            }
        }
    }

    /// Finish onboarding: persist the flag, drop the overlay, then enable
    /// the digest if the switch was left on.
    pub async fn complete_onboarding(&mut self) {
        if self.nav.overlay() != Some(&Overlay::Onboarding) {
            return;
        }

        if let Err(e) = self.db.set_onboarded().await {
            tracing::error!(error = %e, "Failed to persist onboarding flag");
        }
        self.onboarded = true;
        self.nav.finish_onboarding();
        tracing::info!(enable_daily = self.onboarding_enable_daily, "Onboarding complete");

        if self.onboarding_enable_daily {
            self.set_notifications(true).await;
        }
        self.needs_redraw = true;
    }

    pub fn dismiss_alert(&mut self) {
        self.alert = None;
    }

    // ------------------------------------------------------------------------
    // Status bar
    // ------------------------------------------------------------------------

    /// Set status message (will auto-expire after 3 seconds)
    pub fn set_status(&mut self, msg: impl Into<Cow<'static, str>>) {
        self.status_message = Some((msg.into(), Instant::now()));
    }

    /// Clear status message if expired (older than 3 seconds)
    /// Returns true if a message was actually cleared
    pub fn clear_expired_status(&mut self) -> bool {
        if let Some((_, time)) = &self.status_message {
            if time.elapsed().as_secs() >= 3 {
                self.status_message = None;
                return true;
            }
        }
        false
    }
}
