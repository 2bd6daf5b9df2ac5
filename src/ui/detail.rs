use crate::app::App;
use crate::keybindings::{Action as KbAction, Context as KbContext};
use crate::trends::Trend;
use crate::util::{display_width, strip_control_chars};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph, Wrap},
    Frame,
};

/// Sources beyond this many are listed but cannot be opened by number.
pub(super) const MAX_NUMBERED_SOURCES: usize = 9;

/// How many display lines a single Line occupies after wrapping.
fn wrapped_line_count(line: &Line<'_>, viewport_width: usize) -> usize {
    let width = viewport_width.max(1);
    let line_width: usize = line.spans.iter().map(|s| display_width(&s.content)).sum();
    if line_width == 0 {
        1
    } else {
        line_width.div_ceil(width)
    }
}

/// Push one Line per paragraph line of `text`, with control characters removed.
fn push_text(lines: &mut Vec<Line<'static>>, text: &str, style: ratatui::style::Style) {
    let clean = strip_control_chars(text);
    for raw in clean.split('\n') {
        lines.push(Line::from(Span::styled(raw.trim_end().to_string(), style)));
    }
}

/// Build the full detail body for `trend`.
fn detail_lines(app: &App, trend: &Trend) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    let fav = if app.is_favorite(&trend.id) {
        Span::styled("  \u{2665} Saved", app.style("fav_active"))
    } else {
        Span::styled("  \u{2661} Save", app.style("fav_inactive"))
    };
    lines.push(Line::from(vec![
        Span::styled(
            strip_control_chars(&trend.title).into_owned(),
            app.style("card_title"),
        ),
        fav,
    ]));
    lines.push(Line::from(Span::styled(
        format!(" {} ", trend.category.label()),
        app.style("pill"),
    )));
    lines.push(Line::from(""));
    push_text(&mut lines, &trend.short_summary, app.style("card_summary"));

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("What it means", app.style("section_title"))));
    push_text(&mut lines, &trend.long_explanation, app.style("body"));

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("How to use it", app.style("section_title"))));
    if trend.example_sentence.trim().is_empty() {
        lines.push(Line::from(Span::styled("No example yet.", app.style("muted"))));
    } else {
        push_text(
            &mut lines,
            &format!("\u{201c}{}\u{201d}", trend.example_sentence),
            app.style("body"),
        );
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("Sources", app.style("section_title"))));
    if trend.sources.is_empty() {
        lines.push(Line::from(Span::styled("None listed.", app.style("muted"))));
    }
    for (i, source) in trend.sources.iter().enumerate() {
        let number = if i < MAX_NUMBERED_SOURCES {
            format!("{}. ", i + 1)
        } else {
            "   ".to_string()
        };
        lines.push(Line::from(vec![
            Span::styled(number, app.style("muted")),
            Span::styled(
                strip_control_chars(&source.name).into_owned(),
                app.style("link"),
            ),
        ]));
    }

    if trend.primary_source().is_some() {
        let key = app
            .keybindings
            .key_hint(KbAction::LearnMore, KbContext::Detail)
            .unwrap_or_default();
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled("  Learn more  ", app.style("button_primary")),
            Span::styled(format!("  {}", key), app.style("muted")),
        ]));
    }

    lines
}

/// Render the detail overlay for the trend held by navigation.
pub fn render(f: &mut Frame, app: &mut App, area: Rect) {
    // Layout may produce tiny rects during extreme resizes
    if area.width < 3 || area.height < 3 {
        return;
    }

    let Some(trend) = app.nav.detail().cloned() else {
        return;
    };

    let lines = detail_lines(app, &trend);

    // Borders take 2 columns, padding 2 more
    let inner_width = area.width.saturating_sub(4) as usize;
    let visible = area.height.saturating_sub(2) as usize;
    let content: usize = lines
        .iter()
        .map(|line| wrapped_line_count(line, inner_width))
        .sum();
    // Clamp before drawing so a resize never shows an out-of-range frame
    app.clamp_detail_scroll(content, visible);

    let back = app
        .keybindings
        .key_hint(KbAction::Back, KbContext::Detail)
        .unwrap_or_else(|| "Esc".to_string());
    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(app.style("panel_border"))
                .title(format!(" \u{2190} Back ({}) ", back))
                .padding(Padding::horizontal(1)),
        )
        .style(app.style("background"))
        .wrap(Wrap { trim: false })
        .scroll((app.detail_scroll as u16, 0));

    f.render_widget(paragraph, area);
}
