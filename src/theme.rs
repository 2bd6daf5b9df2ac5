//! Theme system for the TUI.
//!
//! Provides semantic color roles that map to ratatui `Style` values.
//! The `ThemeVariant` enum selects between Dark and Light palettes,
//! and `StyleMap` resolves role names to concrete styles.

use ratatui::style::{Color, Modifier, Style};
use std::collections::HashMap;

// ============================================================================
// Theme Variant
// ============================================================================

/// Available theme variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeVariant {
    Dark,
    Light,
}

impl ThemeVariant {
    /// Parse a variant name from a string (case-insensitive).
    pub fn from_str_name(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "dark" => Some(Self::Dark),
            "light" => Some(Self::Light),
            _ => None,
        }
    }

    /// Build the `ColorPalette` for this variant.
    pub fn palette(self) -> ColorPalette {
        match self {
            Self::Dark => ColorPalette::dark(),
            Self::Light => ColorPalette::light(),
        }
    }

    /// Cycle to the next variant: Dark → Light → Dark.
    pub fn next(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    /// Human-readable name for status display.
    pub fn name(self) -> &'static str {
        match self {
            Self::Dark => "Dark",
            Self::Light => "Light",
        }
    }
}

// ============================================================================
// Color Palette
// ============================================================================

const ACCENT: Color = Color::Rgb(0x24, 0xD3, 0xA8);
const ACCENT_DEEP: Color = Color::Rgb(0x1A, 0x3F, 0x36);
const BG: Color = Color::Rgb(0x0B, 0x0B, 0x0B);
const CARD: Color = Color::Rgb(0x12, 0x12, 0x12);
const TEXT: Color = Color::White;
const MUTED: Color = Color::Rgb(0xA1, 0xA1, 0xA1);
const TRACK: Color = Color::Rgb(0x22, 0x22, 0x22);

// Light variant keeps the accent hue, darkened for contrast on white.
const LIGHT_ACCENT: Color = Color::Rgb(0x0F, 0x8C, 0x6E);
const LIGHT_BG: Color = Color::Rgb(0xFA, 0xFA, 0xFA);
const LIGHT_CARD: Color = Color::Rgb(0xEE, 0xEE, 0xEE);
const LIGHT_TEXT: Color = Color::Rgb(0x11, 0x11, 0x11);
const LIGHT_MUTED: Color = Color::Rgb(0x5C, 0x5C, 0x5C);

/// A complete color palette mapping every semantic UI role to a `Style`.
#[derive(Debug, Clone)]
pub struct ColorPalette {
    pub background: Style,

    // -- Header --
    pub header_title: Style,
    pub header_subtitle: Style,
    pub refresh_idle: Style,
    pub refresh_busy: Style,

    // -- Tab bar --
    pub tab_active: Style,
    pub tab_inactive: Style,

    // -- Trend cards --
    pub card_title: Style,
    pub card_summary: Style,
    pub card_selected: Style,
    pub pill: Style,
    pub fav_active: Style,
    pub fav_inactive: Style,
    pub age: Style,

    // -- Detail / About --
    pub section_title: Style,
    pub body: Style,
    pub link: Style,
    pub link_selected: Style,
    pub muted: Style,

    // -- Chrome --
    pub status_bar: Style,
    pub panel_border: Style,
    pub panel_border_focused: Style,

    // -- Controls --
    pub switch_on: Style,
    pub switch_off: Style,
    pub button_primary: Style,
    pub alert_title: Style,
    pub input: Style,
}

impl ColorPalette {
    /// Near-black background with the mint accent.
    fn dark() -> Self {
        Self {
            background: Style::default().bg(BG).fg(TEXT),

            header_title: Style::default().fg(TEXT).add_modifier(Modifier::BOLD),
            header_subtitle: Style::default().fg(MUTED),
            refresh_idle: Style::default().fg(ACCENT),
            refresh_busy: Style::default().fg(MUTED),

            tab_active: Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
            tab_inactive: Style::default().fg(MUTED),

            card_title: Style::default().fg(TEXT).add_modifier(Modifier::BOLD),
            card_summary: Style::default().fg(MUTED),
            card_selected: Style::default().bg(CARD),
            pill: Style::default().fg(TEXT).bg(TRACK),
            fav_active: Style::default().fg(ACCENT),
            fav_inactive: Style::default().fg(MUTED),
            age: Style::default().fg(MUTED),

            section_title: Style::default().fg(TEXT).add_modifier(Modifier::BOLD),
            body: Style::default().fg(TEXT),
            link: Style::default().fg(ACCENT),
            link_selected: Style::default()
                .fg(ACCENT)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            muted: Style::default().fg(MUTED),

            status_bar: Style::default().bg(CARD).fg(MUTED),
            panel_border: Style::default().fg(TRACK),
            panel_border_focused: Style::default().fg(ACCENT),

            switch_on: Style::default().fg(ACCENT).bg(ACCENT_DEEP),
            switch_off: Style::default().fg(Color::Rgb(0x66, 0x66, 0x66)).bg(TRACK),
            button_primary: Style::default()
                .fg(BG)
                .bg(ACCENT)
                .add_modifier(Modifier::BOLD),
            alert_title: Style::default().fg(TEXT).add_modifier(Modifier::BOLD),
            input: Style::default().fg(TEXT).bg(CARD),
        }
    }

    /// Adapted for light terminal backgrounds.
    fn light() -> Self {
        Self {
            background: Style::default().bg(LIGHT_BG).fg(LIGHT_TEXT),

            header_title: Style::default()
                .fg(LIGHT_TEXT)
                .add_modifier(Modifier::BOLD),
            header_subtitle: Style::default().fg(LIGHT_MUTED),
            refresh_idle: Style::default().fg(LIGHT_ACCENT),
            refresh_busy: Style::default().fg(LIGHT_MUTED),

            tab_active: Style::default()
                .fg(LIGHT_ACCENT)
                .add_modifier(Modifier::BOLD),
            tab_inactive: Style::default().fg(LIGHT_MUTED),

            card_title: Style::default()
                .fg(LIGHT_TEXT)
                .add_modifier(Modifier::BOLD),
            card_summary: Style::default().fg(LIGHT_MUTED),
            card_selected: Style::default().bg(LIGHT_CARD),
            pill: Style::default().fg(LIGHT_TEXT).bg(Color::Rgb(0xDD, 0xDD, 0xDD)),
            fav_active: Style::default().fg(LIGHT_ACCENT),
            fav_inactive: Style::default().fg(LIGHT_MUTED),
            age: Style::default().fg(LIGHT_MUTED),

            section_title: Style::default()
                .fg(LIGHT_TEXT)
                .add_modifier(Modifier::BOLD),
            body: Style::default().fg(LIGHT_TEXT),
            link: Style::default().fg(LIGHT_ACCENT),
            link_selected: Style::default()
                .fg(LIGHT_ACCENT)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            muted: Style::default().fg(LIGHT_MUTED),

            status_bar: Style::default().bg(LIGHT_CARD).fg(LIGHT_TEXT),
            panel_border: Style::default().fg(Color::Rgb(0xCC, 0xCC, 0xCC)),
            panel_border_focused: Style::default().fg(LIGHT_ACCENT),

            switch_on: Style::default().fg(Color::White).bg(LIGHT_ACCENT),
            switch_off: Style::default().fg(LIGHT_MUTED).bg(LIGHT_CARD),
            button_primary: Style::default()
                .fg(Color::White)
                .bg(LIGHT_ACCENT)
                .add_modifier(Modifier::BOLD),
            alert_title: Style::default()
                .fg(LIGHT_TEXT)
                .add_modifier(Modifier::BOLD),
            input: Style::default().fg(LIGHT_TEXT).bg(LIGHT_CARD),
        }
    }
}

// ============================================================================
// Style Map
// ============================================================================

/// String-keyed style lookup.
///
/// Built from a `ColorPalette`, this allows resolving role names (e.g.
/// `"card_title"`) to their concrete `Style` at runtime.
#[derive(Debug, Clone)]
pub struct StyleMap {
    map: HashMap<&'static str, Style>,
}

/// All semantic role names, in declaration order.
const ROLE_NAMES: [&str; 27] = [
    "background",
    "header_title",
    "header_subtitle",
    "refresh_idle",
    "refresh_busy",
    "tab_active",
    "tab_inactive",
    "card_title",
    "card_summary",
    "card_selected",
    "pill",
    "fav_active",
    "fav_inactive",
    "age",
    "section_title",
    "body",
    "link",
    "link_selected",
    "muted",
    "status_bar",
    "panel_border",
    "panel_border_focused",
    "switch_on",
    "switch_off",
    "button_primary",
    "alert_title",
    "input",
];

impl StyleMap {
    pub fn from_palette(p: &ColorPalette) -> Self {
        let styles: [Style; 27] = [
            p.background,
            p.header_title,
            p.header_subtitle,
            p.refresh_idle,
            p.refresh_busy,
            p.tab_active,
            p.tab_inactive,
            p.card_title,
            p.card_summary,
            p.card_selected,
            p.pill,
            p.fav_active,
            p.fav_inactive,
            p.age,
            p.section_title,
            p.body,
            p.link,
            p.link_selected,
            p.muted,
            p.status_bar,
            p.panel_border,
            p.panel_border_focused,
            p.switch_on,
            p.switch_off,
            p.button_primary,
            p.alert_title,
            p.input,
        ];

        let map = ROLE_NAMES
            .iter()
            .copied()
            .zip(styles.iter().copied())
            .collect();

        Self { map }
    }

    /// Resolve a role name to its `Style`. Returns `Style::default()` for unknown roles.
    pub fn resolve(&self, role: &str) -> Style {
        self.map.get(role).copied().unwrap_or_default()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dark_palette_uses_mint_accent() {
        let palette = ThemeVariant::Dark.palette();
        assert_eq!(palette.tab_active.fg, Some(Color::Rgb(0x24, 0xD3, 0xA8)));
        assert_eq!(palette.fav_active.fg, Some(Color::Rgb(0x24, 0xD3, 0xA8)));
    }

    #[test]
    fn dark_palette_background_is_near_black() {
        let palette = ThemeVariant::Dark.palette();
        assert_eq!(palette.background.bg, Some(Color::Rgb(0x0B, 0x0B, 0x0B)));
    }

    #[test]
    fn refresh_indicator_dims_while_busy() {
        for variant in [ThemeVariant::Dark, ThemeVariant::Light] {
            let palette = variant.palette();
            assert_ne!(palette.refresh_idle, palette.refresh_busy);
        }
    }

    #[test]
    fn light_palette_differs_from_dark() {
        let dark = ThemeVariant::Dark.palette();
        let light = ThemeVariant::Light.palette();
        assert_ne!(dark.background, light.background);
        assert_ne!(dark.card_selected, light.card_selected);
    }

    #[test]
    fn variant_from_str_name() {
        assert_eq!(
            ThemeVariant::from_str_name("dark"),
            Some(ThemeVariant::Dark)
        );
        assert_eq!(
            ThemeVariant::from_str_name("Light"),
            Some(ThemeVariant::Light)
        );
        assert_eq!(ThemeVariant::from_str_name("neon"), None);
    }

    #[test]
    fn variant_cycle_round_trips() {
        assert_eq!(ThemeVariant::Dark.next().next(), ThemeVariant::Dark);
    }

    #[test]
    fn style_map_resolves_known_roles() {
        let palette = ThemeVariant::Dark.palette();
        let sm = StyleMap::from_palette(&palette);

        assert_eq!(sm.resolve("card_title"), palette.card_title);
        assert_eq!(sm.resolve("pill"), palette.pill);
        assert_eq!(sm.resolve("status_bar"), palette.status_bar);
    }

    #[test]
    fn style_map_returns_default_for_unknown() {
        let palette = ThemeVariant::Dark.palette();
        let sm = StyleMap::from_palette(&palette);
        assert_eq!(sm.resolve("nonexistent_role"), Style::default());
    }

    #[test]
    fn style_map_has_all_roles() {
        let sm = StyleMap::from_palette(&ThemeVariant::Light.palette());
        for name in ROLE_NAMES {
            assert!(sm.map.contains_key(name), "Role '{}' missing", name);
        }
        assert_eq!(sm.map.len(), ROLE_NAMES.len());
    }
}
