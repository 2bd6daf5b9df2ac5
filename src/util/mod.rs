//! Utility functions shared by the content pipeline and the TUI.
//!
//! - **Text**: Unicode-aware width/truncation and control-sequence stripping
//!   for untrusted remote text
//! - **URL validation**: checks applied before a link is opened in the browser
//!
//! ```
//! use boomer::util::{display_width, strip_control_chars, truncate_to_width};
//!
//! assert_eq!(display_width("Ratio"), 5);
//! assert_eq!(strip_control_chars("\x1b[1mRatio\x1b[0m"), "Ratio");
//! assert_eq!(truncate_to_width("Brat Summer", 7), "Brat...");
//! ```

mod text;
mod url_validator;

pub use text::{display_width, strip_control_chars, truncate_chars, truncate_to_width};
pub use url_validator::{validate_url_for_open, UrlValidationError};

/// Maximum search query length accepted by the Search tab input.
pub const MAX_SEARCH_QUERY_LENGTH: usize = 256;
