//! Daily digest scheduling.
//!
//! The app only ever has one reminder: a repeating local notification at
//! 09:00. [`DailyDigest`] owns the enable/disable policy; the actual
//! delivery is delegated to a [`Notifier`] so the terminal implementation
//! can be swapped for a recording fake in tests.

mod terminal;

use chrono::NaiveTime;
use std::sync::Arc;
use thiserror::Error;

pub use terminal::{next_occurrence, TerminalNotifier};

pub const DIGEST_TITLE: &str = "Today\u{2019}s 5 internet things";
pub const DIGEST_BODY: &str = "Open Boomer to catch up in 20 seconds.";

/// Answer to a notification permission request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Permission {
    Granted,
    /// Quiet delivery allowed without an explicit grant. Treated as granted.
    Provisional,
    Denied,
}

impl Permission {
    pub fn allows_delivery(self) -> bool {
        matches!(self, Permission::Granted | Permission::Provisional)
    }
}

/// A repeating daily reminder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reminder {
    pub title: &'static str,
    pub body: &'static str,
    /// Local wall-clock time of delivery.
    pub at: NaiveTime,
}

impl Reminder {
    /// The daily digest: 09:00 local, static text.
    pub fn daily_digest() -> Self {
        Self {
            title: DIGEST_TITLE,
            body: DIGEST_BODY,
            // 9:00:00 is always a valid time; the fallback is unreachable.
            at: NaiveTime::from_hms_opt(9, 0, 0).unwrap_or(NaiveTime::MIN),
        }
    }
}

#[derive(Debug, Error)]
pub enum NotifyError {
    /// Scheduling needs a running async runtime to host the timer task.
    #[error("No async runtime available to schedule the reminder")]
    NoRuntime,
}

/// Host notification facility.
///
/// Methods are synchronous so the trait stays object-safe; implementations
/// that need to wait spawn their own tasks.
pub trait Notifier: Send + Sync {
    fn request_permission(&self) -> Permission;
    fn schedule_daily(&self, reminder: &Reminder) -> Result<(), NotifyError>;
    fn cancel_all(&self);
}

// ============================================================================
// Daily Digest
// ============================================================================

/// Enable/disable policy for the single daily reminder.
///
/// Two states: Disabled and Enabled. A denied permission request leaves the
/// state where it was and has no side effects.
#[derive(Clone)]
pub struct DailyDigest {
    notifier: Arc<dyn Notifier>,
}

impl DailyDigest {
    pub fn new(notifier: Arc<dyn Notifier>) -> Self {
        Self { notifier }
    }

    /// Request permission and, if allowed, replace any scheduled reminder
    /// with the daily digest.
    ///
    /// Returns `Ok(false)` when permission was denied.
    pub fn enable(&self) -> Result<bool, NotifyError> {
        let permission = self.notifier.request_permission();
        if !permission.allows_delivery() {
            tracing::info!(?permission, "Notification permission not granted");
            return Ok(false);
        }

        self.notifier.cancel_all();
        self.notifier.schedule_daily(&Reminder::daily_digest())?;
        tracing::info!(?permission, "Daily digest scheduled");
        Ok(true)
    }

    /// Cancel every scheduled reminder. Idempotent.
    pub fn disable(&self) {
        self.notifier.cancel_all();
        tracing::info!("Daily digest cancelled");
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::sync::Mutex;

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum Call {
        RequestPermission,
        Schedule(Reminder),
        CancelAll,
    }

    /// Records every call and answers permission requests with a fixed value.
    pub struct RecordingNotifier {
        pub permission: Permission,
        pub calls: Mutex<Vec<Call>>,
    }

    impl RecordingNotifier {
        pub fn new(permission: Permission) -> Arc<Self> {
            Arc::new(Self {
                permission,
                calls: Mutex::new(Vec::new()),
            })
        }

        pub fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }

        pub fn scheduled(&self) -> usize {
            self.calls()
                .iter()
                .filter(|c| matches!(c, Call::Schedule(_)))
                .count()
        }
    }

    impl Notifier for RecordingNotifier {
        fn request_permission(&self) -> Permission {
            self.calls.lock().unwrap().push(Call::RequestPermission);
            self.permission
        }

        fn schedule_daily(&self, reminder: &Reminder) -> Result<(), NotifyError> {
            self.calls
                .lock()
                .unwrap()
                .push(Call::Schedule(reminder.clone()));
            Ok(())
        }

        fn cancel_all(&self) {
            self.calls.lock().unwrap().push(Call::CancelAll);
        }
    }
}
