//! Boomer: plain-English internet trends in the terminal.
//!
//! The binary wires these modules together; they are exposed as a library
//! so integration tests can drive the persistence and notification flows
//! without a terminal.

pub mod app;
pub mod config;
pub mod keybindings;
pub mod navigation;
pub mod notify;
pub mod platform;
pub mod storage;
pub mod theme;
pub mod trends;
pub mod ui;
pub mod util;
