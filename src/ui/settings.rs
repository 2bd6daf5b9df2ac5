use crate::app::{App, SETTING_ABOUT, SETTING_DIGEST};
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph},
    Frame,
};

/// A two-cell on/off switch.
pub(super) fn switch(app: &App, on: bool) -> Span<'static> {
    if on {
        Span::styled(" \u{25cf} ON  ", app.style("switch_on"))
    } else {
        Span::styled(" OFF \u{25cf} ", app.style("switch_off"))
    }
}

fn row_style(app: &App, index: usize) -> Style {
    if app.settings_selected == index {
        app.style("card_selected")
    } else {
        Style::default()
    }
}

/// Render the Settings tab: the digest switch and the About entry.
pub fn render(f: &mut Frame, app: &App, area: Rect) {
    let lines = vec![
        Line::from(vec![
            Span::styled("Daily digest (9:00 AM)   ", app.style("body")),
            switch(app, app.notif_enabled),
        ])
        .style(row_style(app, SETTING_DIGEST)),
        Line::from(""),
        Line::from(Span::styled(
            "\u{2500}".repeat(area.width.saturating_sub(4) as usize),
            app.style("panel_border"),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("\u{24d8} ", app.style("link")),
            Span::styled("About & Sources", app.style("body")),
            Span::styled("  \u{2197}", app.style("muted")),
        ])
        .style(row_style(app, SETTING_ABOUT)),
    ];

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::NONE)
                .padding(Padding::uniform(1)),
        )
        .style(app.style("background"));
    f.render_widget(paragraph, area);
}
