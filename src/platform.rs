//! Host side effects: haptic pulses, opening links, and the bundle the app
//! receives them in.

use std::io::Write;
use std::sync::Arc;

use anyhow::{Context, Result};

use crate::notify::{DailyDigest, Notifier};
use crate::util::validate_url_for_open;

/// A short tactile acknowledgement. Failures are swallowed.
pub trait Haptics: Send + Sync {
    fn selection(&self);
}

/// Rings the terminal bell; the closest a terminal gets to a haptic tick.
pub struct TerminalBell {
    enabled: bool,
}

impl TerminalBell {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }
}

impl Haptics for TerminalBell {
    fn selection(&self) {
        if !self.enabled {
            return;
        }
        let mut out = std::io::stdout();
        let _ = out.write_all(b"\x07").and_then(|_| out.flush());
    }
}

/// Opens a link outside the app.
pub trait UrlOpener: Send + Sync {
    fn open(&self, url: &str) -> Result<()>;
}

/// The system browser, via the `open` crate. Only http(s) URLs get through.
pub struct SystemBrowser;

impl UrlOpener for SystemBrowser {
    fn open(&self, url: &str) -> Result<()> {
        let url = validate_url_for_open(url).with_context(|| format!("Refusing to open {url}"))?;
        open::that_detached(url.as_str()).context("Failed to launch browser")?;
        tracing::debug!(url = %url, "Opened link in browser");
        Ok(())
    }
}

/// Everything the app needs from the host, injectable for tests.
#[derive(Clone)]
pub struct Services {
    pub digest: DailyDigest,
    pub haptics: Arc<dyn Haptics>,
    pub browser: Arc<dyn UrlOpener>,
}

impl Services {
    pub fn new(
        notifier: Arc<dyn Notifier>,
        haptics: Arc<dyn Haptics>,
        browser: Arc<dyn UrlOpener>,
    ) -> Self {
        Self {
            digest: DailyDigest::new(notifier),
            haptics,
            browser,
        }
    }
}
