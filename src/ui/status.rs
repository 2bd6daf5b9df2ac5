use crate::app::App;
use crate::keybindings::{Action as KbAction, Context as KbContext};
use ratatui::{layout::Rect, widgets::Paragraph, Frame};
use std::borrow::Cow;

/// Hints for the context that has the keyboard, built from the live bindings
/// so remapped keys show up correctly.
fn key_hints(app: &App) -> String {
    let context = app.input_context();
    let actions: &[(KbAction, &str)] = match context {
        KbContext::Search => &[
            (KbAction::CommitSearch, "browse results"),
            (KbAction::ExitSearch, "clear"),
        ],
        KbContext::Detail => &[
            (KbAction::Back, "back"),
            (KbAction::ToggleFavorite, "save"),
            (KbAction::LearnMore, "learn more"),
            (KbAction::ScrollDown, "scroll"),
            (KbAction::Quit, "quit"),
        ],
        KbContext::About => &[
            (KbAction::Back, "back"),
            (KbAction::Select, "open link"),
            (KbAction::Quit, "quit"),
        ],
        KbContext::Onboarding => &[
            (KbAction::ToggleOption, "toggle digest"),
            (KbAction::Select, "continue"),
            (KbAction::Quit, "quit"),
        ],
        KbContext::Settings => &[
            (KbAction::Select, "activate"),
            (KbAction::ToggleOption, "toggle"),
            (KbAction::NextTab, "tabs"),
            (KbAction::ShowHelp, "help"),
            (KbAction::Quit, "quit"),
        ],
        KbContext::TrendList | KbContext::Global => &[
            (KbAction::Select, "open"),
            (KbAction::ToggleFavorite, "save"),
            (KbAction::Refresh, "refresh"),
            (KbAction::EditSearch, "search"),
            (KbAction::NextTab, "tabs"),
            (KbAction::ShowHelp, "help"),
            (KbAction::Quit, "quit"),
        ],
    };

    actions
        .iter()
        .filter_map(|(action, label)| {
            app.keybindings
                .key_hint(*action, context)
                .map(|key| format!("[{}] {}", key, label))
        })
        .collect::<Vec<_>>()
        .join("  ")
}

/// Render the status bar
pub fn render(f: &mut Frame, app: &App, area: Rect) {
    // Guard against zero-width/height areas
    if area.width < 1 || area.height < 1 {
        return;
    }

    let text: Cow<'_, str> = if let Some((msg, _)) = &app.status_message {
        Cow::Borrowed(msg.as_ref())
    } else {
        Cow::Owned(key_hints(app))
    };

    let paragraph = Paragraph::new(text).style(app.style("status_bar"));
    f.render_widget(paragraph, area);
}
