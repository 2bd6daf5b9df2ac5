//! Terminal User Interface module.
//!
//! This module provides the TUI for Boomer, including:
//! - Main event loop (`run`)
//! - Input handling for lists, search typing, detail and overlays
//! - Rendering for the tabs, trend detail, About and onboarding screens
//! - Background task event processing
//!
//! # Module Structure
//!
//! - `loop_runner` - Main event loop and terminal management
//! - `input` - Keyboard input handling
//! - `events` - Background task event processing
//! - `render` - Layout and view dispatch
//! - `helpers` - Background task spawning and shared layout helpers
//! - `header` - App header and tab bar
//! - `trend_list` - Home, Search and Favorites lists
//! - `detail` - Trend detail screen
//! - `settings` - Settings tab
//! - `about` - About & Sources screen
//! - `onboarding` - First-launch welcome card
//! - `status` - Status bar widget
//! - `help` - Keybinding help overlay

// Submodules for UI components
mod about;
mod detail;
mod events;
mod header;
mod help;
mod helpers;
mod input;
mod loop_runner;
mod onboarding;
mod render;
mod settings;
mod status;
mod trend_list;

// Re-export the public API
pub use helpers::spawn_refresh;
pub use loop_runner::{run, Action};
