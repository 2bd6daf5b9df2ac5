//! Render functions for the TUI.
//!
//! Lays out header, body, tab bar and status bar, then dispatches the body
//! to the active tab or overlay.

use crate::app::{Alert, App};
use crate::navigation::{Overlay, Tab};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use super::helpers::centered_box;
use super::{about, detail, header, help, onboarding, settings, status, trend_list};

/// Minimum terminal dimensions required for normal operation.
pub(super) const MIN_WIDTH: u16 = 40;
pub(super) const MIN_HEIGHT: u16 = 12;

/// Main render dispatch function.
pub(super) fn render(f: &mut Frame, app: &mut App) {
    let area = f.area();

    // At truly minimal dimensions, we can't render anything meaningful
    if area.width < 1 || area.height < 1 {
        return;
    }

    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        let msg = if area.height < 3 || area.width < 20 {
            Paragraph::new("Too small")
        } else {
            Paragraph::new(format!(
                "Terminal too small\n\nMinimum: {}x{}\nCurrent: {}x{}",
                MIN_WIDTH, MIN_HEIGHT, area.width, area.height
            ))
            .alignment(Alignment::Center)
        };
        f.render_widget(msg, area);
        return;
    }

    f.render_widget(Block::default().style(app.style("background")), area);

    // The tab bar disappears while an overlay is up
    let tab_height = if app.nav.tab_bar_visible() { 2 } else { 0 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(tab_height),
            Constraint::Length(1),
        ])
        .split(area);

    header::render(f, app, chunks[0]);
    render_body(f, app, chunks[1]);
    if app.nav.tab_bar_visible() {
        header::render_tabs(f, app, chunks[2]);
    }
    status::render(f, app, chunks[3]);

    if app.show_help {
        help::render(f, app);
    }

    if let Some(alert) = app.alert {
        render_alert(f, app, alert);
    }
}

fn render_body(f: &mut Frame, app: &mut App, area: Rect) {
    // Detail records its scroll bounds, so it is the one view that needs `&mut`
    if app.nav.detail().is_some() {
        detail::render(f, app, area);
        return;
    }

    match app.nav.overlay() {
        Some(Overlay::Detail(_)) => {}
        Some(Overlay::About) => about::render(f, app, area),
        Some(Overlay::Onboarding) => onboarding::render(f, app, area),
        None => match app.nav.tab() {
            Tab::Home | Tab::Search | Tab::Favorites => trend_list::render(f, app, area),
            Tab::Settings => settings::render(f, app, area),
        },
    }
}

/// Informational alert centered on screen; any key dismisses it.
fn render_alert(f: &mut Frame, app: &App, alert: Alert) {
    let overlay = centered_box(50, 7, f.area());
    if overlay.width < 10 || overlay.height < 5 {
        return;
    }

    f.render_widget(Clear, overlay);

    let lines = vec![
        Line::from(Span::styled(alert.title, app.style("alert_title"))),
        Line::from(""),
        Line::from(Span::styled(alert.message, app.style("body"))),
        Line::from(""),
        Line::from(Span::styled("Press any key", app.style("muted"))),
    ];
    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(app.style("panel_border_focused")),
        )
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .style(app.style("background"));

    f.render_widget(paragraph, overlay);
}
