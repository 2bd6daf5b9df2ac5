use crate::app::App;
use crate::navigation::Tab;
use crate::trends::Trend;
use crate::util::{strip_control_chars, truncate_to_width};
use chrono::{DateTime, Utc};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

const SEARCH_PLACEHOLDER: &str = "Search slang, memes, platforms\u{2026}";

/// Format a unix timestamp as a short age relative to `now`.
///
/// Under an hour → minutes, under a day → hours, under a week → days,
/// otherwise the calendar date. Bundled trends have no timestamp.
pub fn format_relative_time(timestamp: Option<i64>, now: i64) -> String {
    let Some(ts) = timestamp else {
        return String::new();
    };

    let diff = now - ts;

    // Clock skew on the remote side
    if diff < 0 {
        return "now".to_string();
    }

    if diff < 3600 {
        return format!("{}m", diff / 60);
    }

    if diff < 86400 {
        return format!("{}h", diff / 3600);
    }

    if diff < 604800 {
        return format!("{}d", diff / 86400);
    }

    DateTime::from_timestamp(ts, 0)
        .map(|dt| dt.format("%b %d").to_string())
        .unwrap_or_default()
}

/// One card: title, one-line summary, then category pill, age and save marker.
fn trend_card(app: &App, trend: &Trend, width: usize, now: i64) -> ListItem<'static> {
    let title = strip_control_chars(&trend.title);
    let summary = strip_control_chars(&trend.short_summary);
    // Summaries can carry paragraph breaks; a card shows one line
    let summary_line = summary.lines().next().unwrap_or("").to_string();

    let mut meta = vec![
        Span::styled(format!(" {} ", trend.category.label()), app.style("pill")),
    ];
    let age = format_relative_time(trend.published, now);
    if !age.is_empty() {
        meta.push(Span::styled(format!("  {}", age), app.style("age")));
    }
    if app.is_favorite(&trend.id) {
        meta.push(Span::styled("  \u{2665} Saved", app.style("fav_active")));
    } else {
        meta.push(Span::styled("  \u{2661} Save", app.style("fav_inactive")));
    }

    ListItem::new(vec![
        Line::from(Span::styled(
            truncate_to_width(&title, width).into_owned(),
            app.style("card_title"),
        )),
        Line::from(Span::styled(
            truncate_to_width(&summary_line, width).into_owned(),
            app.style("card_summary"),
        )),
        Line::from(meta),
        Line::from(""),
    ])
}

/// Render the list for Home, Search and Favorites.
pub fn render(f: &mut Frame, app: &App, area: Rect) {
    let list_area = if app.nav.tab() == Tab::Search {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0)])
            .split(area);
        render_search_box(f, app, chunks[0]);
        chunks[1]
    } else {
        area
    };

    let trends = app.visible_trends();
    if trends.is_empty() {
        let message = match app.nav.tab() {
            Tab::Favorites => "No favorites yet.".to_string(),
            Tab::Search => format!("Nothing matches \u{201c}{}\u{201d}.", app.search_query.trim()),
            _ => "Nothing to show.".to_string(),
        };
        let paragraph = Paragraph::new(message)
            .alignment(Alignment::Center)
            .style(app.style("muted"));
        let y = list_area.y + list_area.height / 3;
        f.render_widget(
            paragraph,
            Rect::new(list_area.x, y, list_area.width, list_area.height.min(1)),
        );
        return;
    }

    let width = list_area.width.saturating_sub(2) as usize;
    let now = Utc::now().timestamp();
    let items: Vec<ListItem> = trends
        .iter()
        .map(|trend| trend_card(app, trend, width, now))
        .collect();

    // Search results are not "selected" while the user is still typing
    let highlight = !(app.nav.tab() == Tab::Search && app.search_editing);
    let mut state = ListState::default();
    if highlight {
        state.select(Some(app.selected_index()));
    }

    let list = List::new(items)
        .block(Block::default().borders(Borders::NONE))
        .style(app.style("background"))
        .highlight_style(app.style("card_selected"))
        .highlight_symbol("\u{258e}");

    f.render_stateful_widget(list, list_area, &mut state);
}

fn render_search_box(f: &mut Frame, app: &App, area: Rect) {
    let border = if app.search_editing {
        app.style("panel_border_focused")
    } else {
        app.style("panel_border")
    };

    let line = if app.search_query.is_empty() && !app.search_editing {
        Line::from(Span::styled(SEARCH_PLACEHOLDER, app.style("muted")))
    } else {
        let cursor = if app.search_editing { "_" } else { "" };
        Line::from(Span::styled(
            format!("{}{}", app.search_query, cursor),
            app.style("input"),
        ))
    };

    let paragraph = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .title(" Search "),
    );
    f.render_widget(paragraph, area);
}
