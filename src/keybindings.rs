//! Keybinding registry: maps actions to key events with config overrides.
//!
//! Bindings are data rather than match arms so the help overlay can list
//! them and users can remap them from config.toml.
use crossterm::event::{KeyCode, KeyModifiers};
use std::collections::HashMap;

// ============================================================================
// Action Enum
// ============================================================================

/// All user-facing actions that can be triggered by keybindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Quit,
    NavDown,
    NavUp,
    NextTab,
    PrevTab,
    GoHome,
    GoSearch,
    GoFavorites,
    GoSettings,
    Select,
    Back,
    ToggleFavorite,
    Refresh,
    LearnMore,
    EditSearch,
    ExitSearch,
    CommitSearch,
    ScrollDown,
    ScrollUp,
    PageDown,
    PageUp,
    ToggleOption,
    CycleTheme,
    ShowHelp,
}

impl Action {
    /// Human-readable description for the help screen.
    pub fn describe(self) -> &'static str {
        match self {
            Self::Quit => "Quit",
            Self::NavDown => "Move down",
            Self::NavUp => "Move up",
            Self::NextTab => "Next tab",
            Self::PrevTab => "Previous tab",
            Self::GoHome => "Home tab",
            Self::GoSearch => "Search tab",
            Self::GoFavorites => "Favorites tab",
            Self::GoSettings => "Settings tab",
            Self::Select => "Open / activate",
            Self::Back => "Go back",
            Self::ToggleFavorite => "Toggle favorite",
            Self::Refresh => "Refresh trends",
            Self::LearnMore => "Learn more (open first source)",
            Self::EditSearch => "Type a search",
            Self::ExitSearch => "Clear and leave search",
            Self::CommitSearch => "Keep query, browse results",
            Self::ScrollDown => "Scroll down",
            Self::ScrollUp => "Scroll up",
            Self::PageDown => "Page down",
            Self::PageUp => "Page up",
            Self::ToggleOption => "Toggle option",
            Self::CycleTheme => "Cycle theme",
            Self::ShowHelp => "Show help",
        }
    }
}

// ============================================================================
// Context Enum
// ============================================================================

/// Dispatch context: determines which bindings are active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Context {
    Global,
    /// Home, Favorites, and Search results once the query is committed.
    TrendList,
    /// Typing into the search box.
    Search,
    Detail,
    Settings,
    About,
    Onboarding,
}

impl Context {
    pub fn label(self) -> &'static str {
        match self {
            Context::Global => "Global",
            Context::TrendList => "Trend list",
            Context::Search => "Search input",
            Context::Detail => "Trend detail",
            Context::Settings => "Settings",
            Context::About => "About",
            Context::Onboarding => "Welcome",
        }
    }
}

// ============================================================================
// Key Specification
// ============================================================================

/// A key event: code + modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeySpec {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeySpec {
    pub const fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    pub const fn plain(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::NONE)
    }

    pub const fn ch(c: char) -> Self {
        Self::plain(KeyCode::Char(c))
    }

    pub const fn ctrl(c: char) -> Self {
        Self::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    /// Terminals report uppercase letters with SHIFT set; the char already
    /// carries the case, so SHIFT is dropped for `Char` keys. BackTab is
    /// always Shift+Tab and is normalised the same way.
    fn normalized(code: KeyCode, modifiers: KeyModifiers) -> Self {
        match code {
            KeyCode::Char(_) | KeyCode::BackTab => Self::new(code, modifiers.difference(KeyModifiers::SHIFT)),
            _ => Self::new(code, modifiers),
        }
    }
}

/// Parse a key string from config into a KeySpec.
///
/// Supported formats:
/// - Single char: "q", "j", "/"
/// - Named keys: "Enter", "Esc", "Tab", "BackTab", "Up", "Down", "Backspace", "Space"
/// - Modifier combos: "Ctrl+d", "Ctrl+u"
/// - Function keys: "F1" through "F12"
fn parse_key_string(s: &str) -> Option<KeySpec> {
    let s = s.trim();

    if let Some(rest) = s.strip_prefix("Ctrl+") {
        let rest = rest.trim();
        let mut chars = rest.chars();
        return match (chars.next(), chars.next()) {
            (Some(c), None) => Some(KeySpec::ctrl(c)),
            _ => None,
        };
    }

    // Named keys (case-insensitive)
    match s.to_lowercase().as_str() {
        "enter" | "return" => return Some(KeySpec::plain(KeyCode::Enter)),
        "esc" | "escape" => return Some(KeySpec::plain(KeyCode::Esc)),
        "tab" => return Some(KeySpec::plain(KeyCode::Tab)),
        "backtab" | "shift+tab" => return Some(KeySpec::plain(KeyCode::BackTab)),
        "up" => return Some(KeySpec::plain(KeyCode::Up)),
        "down" => return Some(KeySpec::plain(KeyCode::Down)),
        "left" => return Some(KeySpec::plain(KeyCode::Left)),
        "right" => return Some(KeySpec::plain(KeyCode::Right)),
        "backspace" => return Some(KeySpec::plain(KeyCode::Backspace)),
        "space" => return Some(KeySpec::ch(' ')),
        _ => {}
    }

    // Function keys
    if let Some(n) = s
        .strip_prefix(['F', 'f'])
        .and_then(|rest| rest.parse::<u8>().ok())
    {
        return (1..=12).contains(&n).then(|| KeySpec::plain(KeyCode::F(n)));
    }

    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(KeySpec::ch(c)),
        _ => None,
    }
}

/// Format a KeySpec as a human-readable string for the help screen.
fn format_key(key: &KeySpec) -> String {
    let modifier = if key.modifiers.contains(KeyModifiers::CONTROL) {
        "Ctrl+"
    } else {
        ""
    };

    let key_name = match key.code {
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::BackTab => "Shift+Tab".to_string(),
        KeyCode::Up => "Up".to_string(),
        KeyCode::Down => "Down".to_string(),
        KeyCode::Left => "Left".to_string(),
        KeyCode::Right => "Right".to_string(),
        KeyCode::Backspace => "Backspace".to_string(),
        KeyCode::F(n) => format!("F{}", n),
        _ => "?".to_string(),
    };

    format!("{}{}", modifier, key_name)
}

// ============================================================================
// Keybinding Registry
// ============================================================================

/// Registry of keybindings, supporting default bindings and config overrides.
///
/// The same key can map to different actions in different contexts; lookups
/// try the specific context first and then Global.
pub struct KeybindingRegistry {
    lookup: HashMap<(Context, KeySpec), Action>,
    /// All bindings in registration order, for the help screen
    bindings: Vec<(Context, KeySpec, Action)>,
}

impl KeybindingRegistry {
    pub fn new() -> Self {
        let mut registry = Self {
            lookup: HashMap::new(),
            bindings: Vec::new(),
        };
        registry.register_defaults();
        registry
    }

    fn bind(&mut self, context: Context, key: KeySpec, action: Action) {
        self.lookup.insert((context, key), action);
        self.bindings.push((context, key, action));
    }

    fn register_defaults(&mut self) {
        use Action::*;
        use Context::*;

        // === Global ===
        self.bind(Global, KeySpec::ch('q'), Quit);
        self.bind(Global, KeySpec::ch('j'), NavDown);
        self.bind(Global, KeySpec::plain(KeyCode::Down), NavDown);
        self.bind(Global, KeySpec::ch('k'), NavUp);
        self.bind(Global, KeySpec::plain(KeyCode::Up), NavUp);
        self.bind(Global, KeySpec::plain(KeyCode::Tab), NextTab);
        self.bind(Global, KeySpec::plain(KeyCode::BackTab), PrevTab);
        self.bind(Global, KeySpec::ch('1'), GoHome);
        self.bind(Global, KeySpec::ch('2'), GoSearch);
        self.bind(Global, KeySpec::ch('3'), GoFavorites);
        self.bind(Global, KeySpec::ch('4'), GoSettings);
        self.bind(Global, KeySpec::plain(KeyCode::Enter), Select);
        self.bind(Global, KeySpec::plain(KeyCode::Esc), Back);
        self.bind(Global, KeySpec::ch('r'), Refresh);
        self.bind(Global, KeySpec::ch('/'), EditSearch);
        self.bind(Global, KeySpec::ch('T'), CycleTheme);
        self.bind(Global, KeySpec::ch('?'), ShowHelp);

        // === Trend lists ===
        self.bind(TrendList, KeySpec::ch('s'), ToggleFavorite);
        self.bind(TrendList, KeySpec::ch('f'), ToggleFavorite);

        // === Search input ===
        self.bind(Search, KeySpec::plain(KeyCode::Esc), ExitSearch);
        self.bind(Search, KeySpec::plain(KeyCode::Enter), CommitSearch);
        self.bind(Search, KeySpec::plain(KeyCode::Down), CommitSearch);

        // === Trend detail ===
        self.bind(Detail, KeySpec::ch('b'), Back);
        self.bind(Detail, KeySpec::ch('s'), ToggleFavorite);
        self.bind(Detail, KeySpec::ch('f'), ToggleFavorite);
        self.bind(Detail, KeySpec::ch('o'), LearnMore);
        self.bind(Detail, KeySpec::plain(KeyCode::Enter), LearnMore);
        self.bind(Detail, KeySpec::ch('j'), ScrollDown);
        self.bind(Detail, KeySpec::plain(KeyCode::Down), ScrollDown);
        self.bind(Detail, KeySpec::ch('k'), ScrollUp);
        self.bind(Detail, KeySpec::plain(KeyCode::Up), ScrollUp);
        self.bind(Detail, KeySpec::ctrl('d'), PageDown);
        self.bind(Detail, KeySpec::ctrl('u'), PageUp);

        // === Settings ===
        self.bind(Settings, KeySpec::ch(' '), ToggleOption);

        // === About ===
        self.bind(About, KeySpec::ch('b'), Back);

        // === Onboarding ===
        self.bind(Onboarding, KeySpec::ch(' '), ToggleOption);
    }

    /// Apply user overrides from config keybindings map.
    ///
    /// Keys in the map are action names (e.g., "quit", "toggle_favorite").
    /// Values are key strings (e.g., "q", "Ctrl+d", "F5"). An override
    /// replaces every default key of that action, in the same contexts.
    ///
    /// Returns a list of warnings for unrecognized action names or unparseable keys.
    pub fn apply_overrides(&mut self, overrides: &HashMap<String, String>) -> Vec<String> {
        let mut warnings = Vec::new();

        // Sorted so conflicting overrides resolve the same way every run
        let mut entries: Vec<_> = overrides.iter().collect();
        entries.sort();

        for (action_name, key_str) in entries {
            let Some(action) = parse_action_name(action_name) else {
                warnings.push(format!("Unknown action '{}', ignoring", action_name));
                continue;
            };

            let Some(key) = parse_key_string(key_str) else {
                warnings.push(format!(
                    "Cannot parse key '{}' for action '{}', ignoring",
                    key_str, action_name
                ));
                continue;
            };

            let mut contexts_for_action: Vec<Context> = Vec::new();
            for (ctx, _, a) in &self.bindings {
                if *a == action && !contexts_for_action.contains(ctx) {
                    contexts_for_action.push(*ctx);
                }
            }

            self.lookup.retain(|_, a| *a != action);
            self.bindings.retain(|(_, _, a)| *a != action);

            for ctx in contexts_for_action {
                self.bind(ctx, key, action);
            }

            tracing::info!(
                action = %action_name,
                key = %key_str,
                "Applied keybinding override"
            );
        }

        warnings
    }

    /// Look up the action for a given key in a given context.
    ///
    /// Tries the specific context first, then falls back to Global.
    pub fn action_for_key(
        &self,
        code: KeyCode,
        modifiers: KeyModifiers,
        context: Context,
    ) -> Option<Action> {
        let key = KeySpec::normalized(code, modifiers);

        if let Some(&action) = self.lookup.get(&(context, key)) {
            return Some(action);
        }

        if context != Context::Global {
            if let Some(&action) = self.lookup.get(&(Context::Global, key)) {
                return Some(action);
            }
        }

        None
    }

    /// Get all bindings for the help screen.
    ///
    /// Returns (context, key_display_string, action, description) tuples.
    pub fn all_bindings(&self) -> Vec<(Context, String, Action, &'static str)> {
        self.bindings
            .iter()
            .map(|(ctx, key, action)| (*ctx, format_key(key), *action, action.describe()))
            .collect()
    }

    /// First key bound to `action` in `context` (or Global), for inline hints.
    pub fn key_hint(&self, action: Action, context: Context) -> Option<String> {
        self.bindings
            .iter()
            .find(|(c, _, a)| *a == action && *c == context)
            .or_else(|| {
                self.bindings
                    .iter()
                    .find(|(c, _, a)| *a == action && *c == Context::Global)
            })
            .map(|(_, key, _)| format_key(key))
    }
}

impl Default for KeybindingRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse an action name string (from config) into an Action enum.
fn parse_action_name(name: &str) -> Option<Action> {
    match name.to_lowercase().as_str() {
        "quit" => Some(Action::Quit),
        "nav_down" | "navdown" | "down" => Some(Action::NavDown),
        "nav_up" | "navup" | "up" => Some(Action::NavUp),
        "next_tab" | "nexttab" => Some(Action::NextTab),
        "prev_tab" | "prevtab" => Some(Action::PrevTab),
        "go_home" | "home" => Some(Action::GoHome),
        "go_search" | "search_tab" => Some(Action::GoSearch),
        "go_favorites" | "favorites" => Some(Action::GoFavorites),
        "go_settings" | "settings" => Some(Action::GoSettings),
        "select" | "enter" => Some(Action::Select),
        "back" => Some(Action::Back),
        "toggle_favorite" | "togglefavorite" | "favorite" => Some(Action::ToggleFavorite),
        "refresh" => Some(Action::Refresh),
        "learn_more" | "learnmore" | "open" => Some(Action::LearnMore),
        "edit_search" | "editsearch" | "search" => Some(Action::EditSearch),
        "exit_search" | "exitsearch" => Some(Action::ExitSearch),
        "commit_search" | "commitsearch" => Some(Action::CommitSearch),
        "scroll_down" | "scrolldown" => Some(Action::ScrollDown),
        "scroll_up" | "scrollup" => Some(Action::ScrollUp),
        "page_down" | "pagedown" => Some(Action::PageDown),
        "page_up" | "pageup" => Some(Action::PageUp),
        "toggle_option" | "toggleoption" | "toggle" => Some(Action::ToggleOption),
        "cycle_theme" | "cycletheme" | "theme" => Some(Action::CycleTheme),
        "show_help" | "showhelp" | "help" => Some(Action::ShowHelp),
        _ => None,
    }
}

// ============================================================================
// Tests
// ============================================================================
