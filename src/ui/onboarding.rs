use crate::app::App;
use crate::keybindings::{Action as KbAction, Context as KbContext};
use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Padding, Paragraph, Wrap},
    Frame,
};

use super::helpers::centered_box;
use super::settings::switch;

const WELCOME_TEXT: &str = "Get a short daily digest of internet trends in plain English. \
                            Big text, high contrast, quick reads.";

/// Welcome card shown on first launch. It can only be left with Continue.
pub fn render(f: &mut Frame, app: &App, area: Rect) {
    let card = centered_box(56, 13, area);
    if card.width < 20 || card.height < 8 {
        return;
    }

    let toggle_key = app
        .keybindings
        .key_hint(KbAction::ToggleOption, KbContext::Onboarding)
        .unwrap_or_default();
    let continue_key = app
        .keybindings
        .key_hint(KbAction::Select, KbContext::Onboarding)
        .unwrap_or_default();

    let lines = vec![
        Line::from(Span::styled("Welcome", app.style("header_title"))),
        Line::from(""),
        Line::from(Span::styled(WELCOME_TEXT, app.style("card_summary"))),
        Line::from(""),
        Line::from(vec![
            Span::styled("Daily digest at 9:00 AM   ", app.style("body")),
            switch(app, app.onboarding_enable_daily),
            Span::styled(format!("  {}", toggle_key), app.style("muted")),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("  Continue  ", app.style("button_primary")),
            Span::styled(format!("  {}", continue_key), app.style("muted")),
        ])
        .alignment(Alignment::Center),
    ];

    f.render_widget(Clear, card);
    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(app.style("panel_border"))
                .padding(Padding::uniform(1)),
        )
        .style(app.style("background"))
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, card);
}
