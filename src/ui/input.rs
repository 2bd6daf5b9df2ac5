//! Input handling for the TUI.
//!
//! Routes each key press to the handler for whatever currently has the
//! keyboard: alert, help, search box, then the keybinding registry.

use crate::app::{App, AppEvent, ABOUT_LINKS, SETTING_ABOUT, SETTING_DIGEST};
use crate::keybindings::{Action as KbAction, Context as KbContext};
use crate::navigation::Tab;
use crate::util::MAX_SEARCH_QUERY_LENGTH;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyModifiers};
use tokio::sync::mpsc;

use super::detail::MAX_NUMBERED_SOURCES;
use super::helpers::{open_link, spawn_refresh, toggle_favorite_and_save};
use super::Action;

/// Main input dispatch function.
pub(super) async fn handle_input(
    app: &mut App,
    code: KeyCode,
    modifiers: KeyModifiers,
    event_tx: &mpsc::Sender<AppEvent>,
) -> Result<Action> {
    // An alert swallows the key that dismisses it
    if app.alert.is_some() {
        app.dismiss_alert();
        return Ok(Action::Continue);
    }

    // Handle help overlay input first (captures all keys when visible)
    if app.show_help {
        return Ok(handle_help_input(app, code));
    }

    let context = app.input_context();

    if context == KbContext::Search {
        return Ok(handle_search_input(app, code, modifiers));
    }

    // Number keys open the matching source on the detail screen
    if context == KbContext::Detail && modifiers.is_empty() {
        if let KeyCode::Char(c @ '1'..='9') = code {
            open_numbered_source(app, c as usize - '0' as usize);
            return Ok(Action::Continue);
        }
    }

    let Some(action) = app.keybindings.action_for_key(code, modifiers, context) else {
        return Ok(Action::Continue);
    };

    match action {
        KbAction::Quit => return Ok(Action::Quit),
        KbAction::NavDown => app.nav_down(),
        KbAction::NavUp => app.nav_up(),
        KbAction::ScrollDown => app.scroll_detail_down(1),
        KbAction::ScrollUp => app.scroll_detail_up(1),
        KbAction::PageDown => app.scroll_detail_down(app.detail_visible_lines.max(1)),
        KbAction::PageUp => app.scroll_detail_up(app.detail_visible_lines.max(1)),
        KbAction::NextTab => {
            app.select_tab(app.nav.tab().next());
        }
        KbAction::PrevTab => {
            app.select_tab(app.nav.tab().prev());
        }
        KbAction::GoHome => {
            app.select_tab(Tab::Home);
        }
        KbAction::GoSearch => {
            app.select_tab(Tab::Search);
        }
        KbAction::GoFavorites => {
            app.select_tab(Tab::Favorites);
        }
        KbAction::GoSettings => {
            app.select_tab(Tab::Settings);
        }
        KbAction::Select => handle_select(app, context).await,
        KbAction::Back => {
            if !app.back() && app.nav.tab() == Tab::Search && context == KbContext::TrendList {
                // Esc on committed results clears the query
                app.exit_search();
            }
        }
        KbAction::ToggleFavorite => {
            let id = match context {
                KbContext::Detail => app.nav.detail().map(|t| t.id.clone()),
                KbContext::TrendList => app.selected_trend().map(|t| t.id.clone()),
                _ => None,
            };
            if let Some(id) = id {
                toggle_favorite_and_save(app, &id, event_tx);
            }
        }
        KbAction::Refresh => {
            spawn_refresh(app, event_tx);
        }
        KbAction::LearnMore => {
            let url = app
                .nav
                .detail()
                .and_then(|t| t.primary_source())
                .map(|s| s.url.clone());
            match url {
                Some(url) => open_link(app, &url),
                None => app.set_status("No source to open"),
            }
        }
        KbAction::EditSearch => {
            if app.nav.tab_bar_visible() {
                app.select_tab(Tab::Search);
                app.search_editing = true;
            }
        }
        KbAction::ToggleOption => match context {
            KbContext::Onboarding => {
                app.onboarding_enable_daily = !app.onboarding_enable_daily;
            }
            KbContext::Settings if app.settings_selected == SETTING_DIGEST => {
                let next = !app.notif_enabled;
                app.set_notifications(next).await;
            }
            _ => {}
        },
        KbAction::CycleTheme => {
            let name = app.cycle_theme();
            app.set_status(format!("Theme: {}", name));
        }
        KbAction::ShowHelp => {
            app.show_help = true;
            app.help_scroll_offset = 0;
        }
        KbAction::ExitSearch | KbAction::CommitSearch => {}
    }

    Ok(Action::Continue)
}

/// Handle input while the help overlay is visible.
///
/// Captures all keys: j/k/Up/Down scroll, Esc/q/? dismiss.
fn handle_help_input(app: &mut App, code: KeyCode) -> Action {
    match code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') => {
            app.show_help = false;
            app.help_scroll_offset = 0;
        }
        KeyCode::Char('j') | KeyCode::Down => {
            app.help_scroll_offset = app.help_scroll_offset.saturating_add(1);
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.help_scroll_offset = app.help_scroll_offset.saturating_sub(1);
        }
        _ => {}
    }
    Action::Continue
}

/// Typing into the search box. Only the search bindings are honored;
/// every other printable key is text.
fn handle_search_input(app: &mut App, code: KeyCode, modifiers: KeyModifiers) -> Action {
    match app
        .keybindings
        .action_for_key(code, modifiers, KbContext::Search)
    {
        Some(KbAction::ExitSearch) => {
            app.exit_search();
            return Action::Continue;
        }
        Some(KbAction::CommitSearch) => {
            app.search_editing = false;
            app.search_selected = 0;
            return Action::Continue;
        }
        _ => {}
    }

    match code {
        KeyCode::Backspace => app.pop_search_char(),
        KeyCode::Char(c) if !modifiers.contains(KeyModifiers::CONTROL) => {
            if !app.push_search_char(c) {
                app.set_status(format!(
                    "Search query at max length ({} chars)",
                    MAX_SEARCH_QUERY_LENGTH
                ));
            }
        }
        _ => {}
    }
    Action::Continue
}

/// Enter/activate, which means something different on every screen.
async fn handle_select(app: &mut App, context: KbContext) {
    match context {
        KbContext::TrendList => {
            app.open_selected();
        }
        KbContext::Settings => match app.settings_selected {
            SETTING_DIGEST => {
                let next = !app.notif_enabled;
                app.set_notifications(next).await;
            }
            SETTING_ABOUT => app.open_about(),
            _ => {}
        },
        KbContext::About => {
            if let Some((_, url)) = ABOUT_LINKS.get(app.about_selected) {
                open_link(app, url);
            }
        }
        KbContext::Onboarding => app.complete_onboarding().await,
        KbContext::Detail | KbContext::Search | KbContext::Global => {}
    }
}

/// Open source `number` (1-based) of the trend on the detail screen.
fn open_numbered_source(app: &mut App, number: usize) {
    if number == 0 || number > MAX_NUMBERED_SOURCES {
        return;
    }
    let url = app
        .nav
        .detail()
        .and_then(|t| t.sources.get(number - 1))
        .map(|s| s.url.clone());
    match url {
        Some(url) => open_link(app, &url),
        None => app.set_status(format!("No source {}", number)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::testing::{harness, onboarded, Harness};
    use crate::app::NOTIFICATIONS_DISABLED;
    use crate::navigation::Overlay;
    use crate::notify::Permission;
    use crate::storage::UserState;

    async fn press(h: &mut Harness, code: KeyCode, tx: &mpsc::Sender<AppEvent>) -> Action {
        handle_input(&mut h.app, code, KeyModifiers::NONE, tx)
            .await
            .unwrap()
    }

    async fn type_str(h: &mut Harness, s: &str, tx: &mpsc::Sender<AppEvent>) {
        for c in s.chars() {
            press(h, KeyCode::Char(c), tx).await;
        }
    }

    #[tokio::test]
    async fn test_quit() {
        let mut h = harness(onboarded(), Permission::Granted).await;
        let (tx, _rx) = mpsc::channel(8);
        assert!(matches!(
            press(&mut h, KeyCode::Char('q'), &tx).await,
            Action::Quit
        ));
    }

    #[tokio::test]
    async fn test_onboarding_flow_with_keys() {
        let mut h = harness(UserState::default(), Permission::Granted).await;
        let (tx, _rx) = mpsc::channel(8);

        // Tabs do nothing under the welcome card
        press(&mut h, KeyCode::Char('4'), &tx).await;
        assert_eq!(h.app.nav.tab(), Tab::Home);

        press(&mut h, KeyCode::Char(' '), &tx).await;
        assert!(!h.app.onboarding_enable_daily);
        press(&mut h, KeyCode::Char(' '), &tx).await;
        assert!(h.app.onboarding_enable_daily);

        press(&mut h, KeyCode::Enter, &tx).await;
        assert_eq!(h.app.nav.overlay(), None);
        assert!(h.app.notif_enabled);
        assert_eq!(h.notifier.scheduled(), 1);
    }

    #[tokio::test]
    async fn test_esc_does_not_skip_onboarding() {
        let mut h = harness(UserState::default(), Permission::Granted).await;
        let (tx, _rx) = mpsc::channel(8);
        press(&mut h, KeyCode::Esc, &tx).await;
        assert_eq!(h.app.nav.overlay(), Some(&Overlay::Onboarding));
    }

    #[tokio::test]
    async fn test_open_detail_and_back() {
        let mut h = harness(onboarded(), Permission::Granted).await;
        let (tx, _rx) = mpsc::channel(8);

        press(&mut h, KeyCode::Char('j'), &tx).await;
        press(&mut h, KeyCode::Enter, &tx).await;
        assert_eq!(h.app.nav.detail().map(|t| t.id.as_str()), Some("brat-summer"));

        press(&mut h, KeyCode::Char('b'), &tx).await;
        assert_eq!(h.app.nav.overlay(), None);
    }

    #[tokio::test]
    async fn test_detail_learn_more_opens_primary_source() {
        let mut h = harness(onboarded(), Permission::Granted).await;
        let (tx, _rx) = mpsc::channel(8);
        press(&mut h, KeyCode::Enter, &tx).await;
        press(&mut h, KeyCode::Char('o'), &tx).await;

        // Normalized by URL parsing
        assert_eq!(h.browser.opened(), vec!["https://knowyourmeme.com/".to_string()]);
    }

    #[tokio::test]
    async fn test_detail_number_keys_open_sources() {
        let mut h = harness(onboarded(), Permission::Granted).await;
        let (tx, _rx) = mpsc::channel(8);
        press(&mut h, KeyCode::Enter, &tx).await;

        press(&mut h, KeyCode::Char('9'), &tx).await;
        assert!(h.browser.opened().is_empty());
        assert!(h.app.status_message.is_some());

        press(&mut h, KeyCode::Char('1'), &tx).await;
        assert_eq!(h.browser.opened().len(), 1);
        // Still on the detail screen, not the Home tab shortcut
        assert!(h.app.nav.detail().is_some());
    }

    #[tokio::test]
    async fn test_favorite_from_list_and_detail() {
        let mut h = harness(onboarded(), Permission::Granted).await;
        let (tx, _rx) = mpsc::channel(8);

        press(&mut h, KeyCode::Char('s'), &tx).await;
        assert_eq!(h.app.favorites, vec!["npc-streamer".to_string()]);

        press(&mut h, KeyCode::Enter, &tx).await;
        press(&mut h, KeyCode::Char('f'), &tx).await;
        assert!(h.app.favorites.is_empty());
        assert_eq!(h.haptics.count(), 2);
    }

    #[tokio::test]
    async fn test_search_typing_filters_and_commit() {
        let mut h = harness(onboarded(), Permission::Granted).await;
        let (tx, _rx) = mpsc::channel(8);

        press(&mut h, KeyCode::Char('/'), &tx).await;
        assert_eq!(h.app.nav.tab(), Tab::Search);
        assert!(h.app.search_editing);

        // 'q' and 's' are text here, not quit/save
        type_str(&mut h, "qs", &tx).await;
        assert_eq!(h.app.search_query, "qs");
        press(&mut h, KeyCode::Backspace, &tx).await;
        press(&mut h, KeyCode::Backspace, &tx).await;

        type_str(&mut h, "TWITTER", &tx).await;
        press(&mut h, KeyCode::Enter, &tx).await;
        assert!(!h.app.search_editing);
        assert_eq!(h.app.selected_trend().map(|t| t.id.as_str()), Some("ratio"));

        // Committed results behave like a list
        press(&mut h, KeyCode::Enter, &tx).await;
        assert_eq!(h.app.nav.detail().map(|t| t.id.as_str()), Some("ratio"));
    }

    #[tokio::test]
    async fn test_search_esc_clears_query() {
        let mut h = harness(onboarded(), Permission::Granted).await;
        let (tx, _rx) = mpsc::channel(8);
        press(&mut h, KeyCode::Char('/'), &tx).await;
        type_str(&mut h, "meme", &tx).await;
        press(&mut h, KeyCode::Esc, &tx).await;
        assert!(h.app.search_query.is_empty());
        assert!(!h.app.search_editing);
        assert_eq!(h.app.nav.tab(), Tab::Search);
    }

    #[tokio::test]
    async fn test_settings_toggle_denied_shows_alert_then_dismisses() {
        let mut h = harness(onboarded(), Permission::Denied).await;
        let (tx, _rx) = mpsc::channel(8);

        press(&mut h, KeyCode::Char('4'), &tx).await;
        press(&mut h, KeyCode::Char(' '), &tx).await;
        assert_eq!(h.app.alert, Some(NOTIFICATIONS_DISABLED));
        assert!(!h.app.notif_enabled);

        // Any key dismisses, and is not acted on
        press(&mut h, KeyCode::Char('q'), &tx).await;
        assert_eq!(h.app.alert, None);
    }

    #[tokio::test]
    async fn test_settings_toggle_and_about() {
        let mut h = harness(onboarded(), Permission::Granted).await;
        let (tx, _rx) = mpsc::channel(8);

        press(&mut h, KeyCode::Char('4'), &tx).await;
        press(&mut h, KeyCode::Enter, &tx).await;
        assert!(h.app.notif_enabled);
        press(&mut h, KeyCode::Char(' '), &tx).await;
        assert!(!h.app.notif_enabled);

        press(&mut h, KeyCode::Char('j'), &tx).await;
        press(&mut h, KeyCode::Enter, &tx).await;
        assert_eq!(h.app.nav.overlay(), Some(&Overlay::About));
        assert!(!h.app.nav.tab_bar_visible());

        press(&mut h, KeyCode::Char('j'), &tx).await;
        press(&mut h, KeyCode::Enter, &tx).await;
        assert_eq!(
            h.browser.opened(),
            vec!["https://www.reddit.com/r/OutOfTheLoop/".to_string()]
        );

        press(&mut h, KeyCode::Esc, &tx).await;
        assert_eq!(h.app.nav.overlay(), None);
        assert_eq!(h.app.nav.tab(), Tab::Settings);
    }

    #[tokio::test]
    async fn test_tab_cycling() {
        let mut h = harness(onboarded(), Permission::Granted).await;
        let (tx, _rx) = mpsc::channel(8);
        press(&mut h, KeyCode::Tab, &tx).await;
        assert_eq!(h.app.nav.tab(), Tab::Search);
        press(&mut h, KeyCode::BackTab, &tx).await;
        press(&mut h, KeyCode::BackTab, &tx).await;
        assert_eq!(h.app.nav.tab(), Tab::Settings);
    }

    #[tokio::test]
    async fn test_help_overlay_captures_keys() {
        let mut h = harness(onboarded(), Permission::Granted).await;
        let (tx, _rx) = mpsc::channel(8);
        press(&mut h, KeyCode::Char('?'), &tx).await;
        assert!(h.app.show_help);

        press(&mut h, KeyCode::Char('j'), &tx).await;
        assert_eq!(h.app.help_scroll_offset, 1);
        assert_eq!(h.app.home_selected, 0);

        // q closes help instead of quitting
        assert!(matches!(
            press(&mut h, KeyCode::Char('q'), &tx).await,
            Action::Continue
        ));
        assert!(!h.app.show_help);
    }

    #[tokio::test]
    async fn test_cycle_theme_reports_status() {
        let mut h = harness(onboarded(), Permission::Granted).await;
        let (tx, _rx) = mpsc::channel(8);
        handle_input(&mut h.app, KeyCode::Char('T'), KeyModifiers::SHIFT, &tx)
            .await
            .unwrap();
        assert_eq!(
            h.app.status_message.as_ref().map(|(m, _)| m.to_string()),
            Some("Theme: Light".to_string())
        );
    }
}
