//! Top header and bottom tab bar.

use crate::app::App;
use crate::navigation::Tab;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub const APP_NAME: &str = "Boomer";
pub const SUBTITLE: &str = "Plain-English Internet Trends";

/// Text of the refresh control: an ellipsis while any fetch is running.
pub(super) fn refresh_label(refreshing: bool) -> &'static str {
    if refreshing {
        "\u{2026}"
    } else {
        "Refresh"
    }
}

/// App name, subtitle, and the refresh indicator on the right.
pub fn render(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(app.style("panel_border"))
        .style(app.style("background"));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(12)])
        .split(inner);

    let title = Paragraph::new(vec![
        Line::from(Span::styled(APP_NAME, app.style("header_title"))),
        Line::from(Span::styled(SUBTITLE, app.style("header_subtitle"))),
    ]);
    f.render_widget(title, chunks[0]);

    let style = if app.refreshing {
        app.style("refresh_busy")
    } else {
        app.style("refresh_idle")
    };
    let refresh = Paragraph::new(Line::from(Span::styled(refresh_label(app.refreshing), style)))
        .alignment(Alignment::Right);
    f.render_widget(refresh, chunks[1]);
}

/// The four tabs, numbered by their shortcut.
pub fn render_tabs(f: &mut Frame, app: &App, area: Rect) {
    let active = app.nav.tab();
    let width = area.width / Tab::ALL.len() as u16;

    for (i, tab) in Tab::ALL.iter().enumerate() {
        let style = if *tab == active {
            app.style("tab_active")
        } else {
            app.style("tab_inactive")
        };
        let border = if *tab == active {
            app.style("panel_border_focused")
        } else {
            app.style("panel_border")
        };

        let cell = Rect::new(area.x + width * i as u16, area.y, width, area.height);
        let label = Paragraph::new(Line::from(Span::styled(
            format!("{} {}", i + 1, tab.label()),
            style,
        )))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::TOP)
                .border_style(border)
                .style(app.style("background")),
        );
        f.render_widget(label, cell);
    }
}
