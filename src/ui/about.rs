use crate::app::{App, ABOUT_LINKS};
use crate::keybindings::{Action as KbAction, Context as KbContext};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph, Wrap},
    Frame,
};

const ABOUT_TEXT: &str = "We translate internet trends and slang into plain English with \
                          short explanations and examples.";

const SOURCE_NAMES: [&str; 3] = [
    "Know Your Meme",
    "Reddit r/OutOfTheLoop",
    "Reputable news explainers",
];

pub fn render(f: &mut Frame, app: &App, area: Rect) {
    let mut lines = vec![
        Line::from(Span::styled("About this app", app.style("card_title"))),
        Line::from(Span::styled(ABOUT_TEXT, app.style("card_summary"))),
        Line::from(""),
        Line::from(Span::styled("Sources we link to", app.style("section_title"))),
    ];
    for name in SOURCE_NAMES {
        lines.push(Line::from(Span::styled(format!(" {} ", name), app.style("pill"))));
    }
    lines.push(Line::from(""));

    for (i, (label, _)) in ABOUT_LINKS.iter().enumerate() {
        let (marker, style) = if i == app.about_selected {
            ("\u{25b8} ", app.style("link_selected"))
        } else {
            ("  ", app.style("link"))
        };
        lines.push(Line::from(vec![
            Span::styled(marker, app.style("link")),
            Span::styled(*label, style),
        ]));
    }

    let back = app
        .keybindings
        .key_hint(KbAction::Back, KbContext::About)
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
        .wrap(Wrap { trim: false });
    f.render_widget(paragraph, area);
}
