use chrono::{Days, Local, NaiveDateTime, NaiveTime, TimeZone};
use std::sync::Mutex;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use super::{Notifier, NotifyError, Permission, Reminder};
use crate::app::AppEvent;

/// Next local wall-clock instant at `time` strictly after `now`.
pub fn next_occurrence(now: NaiveDateTime, time: NaiveTime) -> NaiveDateTime {
    let today = now.date().and_time(time);
    if today > now {
        today
    } else {
        now.date()
            .checked_add_days(Days::new(1))
            .unwrap_or(now.date())
            .and_time(time)
    }
}

/// How long to sleep from now until the next delivery of `time`.
fn delay_until(time: NaiveTime) -> Duration {
    let now = Local::now();
    let next = next_occurrence(now.naive_local(), time);
    // A DST gap can make the local time ambiguous or nonexistent; take the
    // earliest valid mapping and fall back to a plain day.
    match Local.from_local_datetime(&next).earliest() {
        Some(target) => (target - now).to_std().unwrap_or(Duration::from_secs(60)),
        None => Duration::from_secs(24 * 60 * 60),
    }
}

/// Delivers the daily reminder inside the running terminal session.
///
/// A background task sleeps until the next 09:00 local time, then posts
/// [`AppEvent::DigestDue`] and goes back to sleep. Nothing is delivered
/// while the app is not running; the permission answer comes from config.
pub struct TerminalNotifier {
    permission: Permission,
    event_tx: mpsc::Sender<AppEvent>,
    timer: Mutex<Option<JoinHandle<()>>>,
}

impl TerminalNotifier {
    pub fn new(permission: Permission, event_tx: mpsc::Sender<AppEvent>) -> Self {
        Self {
            permission,
            event_tx,
            timer: Mutex::new(None),
        }
    }

    fn replace_timer(&self, handle: Option<JoinHandle<()>>) {
        let mut guard = self.timer.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(old) = guard.take() {
            old.abort();
        }
        *guard = handle;
    }
}

impl Notifier for TerminalNotifier {
    fn request_permission(&self) -> Permission {
        self.permission
    }

    fn schedule_daily(&self, reminder: &Reminder) -> Result<(), NotifyError> {
        let runtime = tokio::runtime::Handle::try_current().map_err(|_| NotifyError::NoRuntime)?;
        let tx = self.event_tx.clone();
        let reminder = reminder.clone();

        let handle = runtime.spawn(async move {
            loop {
                let delay = delay_until(reminder.at);
                tracing::debug!(delay_secs = delay.as_secs(), "Daily digest timer armed");
                tokio::time::sleep(delay).await;

                let event = AppEvent::DigestDue {
                    title: reminder.title,
                    body: reminder.body,
                };
                if tx.send(event).await.is_err() {
                    // Event loop gone; nothing left to notify.
                    break;
                }
                // Step past the delivery minute so the next delay is a full day.
                tokio::time::sleep(Duration::from_secs(61)).await;
            }
        });

        self.replace_timer(Some(handle));
        Ok(())
    }

    fn cancel_all(&self) {
        self.replace_timer(None);
    }
}

impl Drop for TerminalNotifier {
    fn drop(&mut self) {
        self.replace_timer(None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(d: u32, h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 7, d)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    fn nine() -> NaiveTime {
        NaiveTime::from_hms_opt(9, 0, 0).unwrap()
    }

    #[test]
    fn test_next_occurrence_later_today() {
        assert_eq!(next_occurrence(at(10, 7, 30), nine()), at(10, 9, 0));
    }

    #[test]
    fn test_next_occurrence_exactly_now_is_tomorrow() {
        assert_eq!(next_occurrence(at(10, 9, 0), nine()), at(11, 9, 0));
    }

    #[test]
    fn test_next_occurrence_after_time_is_tomorrow() {
        assert_eq!(next_occurrence(at(10, 21, 15), nine()), at(11, 9, 0));
    }

    #[test]
    fn test_next_occurrence_crosses_month_end() {
        assert_eq!(
            next_occurrence(at(31, 10, 0), nine()),
            NaiveDate::from_ymd_opt(2024, 8, 1)
                .unwrap()
                .and_hms_opt(9, 0, 0)
                .unwrap()
        );
    }

    #[tokio::test]
    async fn test_permission_comes_from_config() {
        let (tx, _rx) = mpsc::channel(4);
        let notifier = TerminalNotifier::new(Permission::Denied, tx);
        assert_eq!(notifier.request_permission(), Permission::Denied);
    }

    #[tokio::test]
    async fn test_schedule_then_cancel_aborts_timer() {
        let (tx, _rx) = mpsc::channel(4);
        let notifier = TerminalNotifier::new(Permission::Granted, tx);
        notifier.schedule_daily(&Reminder::daily_digest()).unwrap();
        assert!(notifier.timer.lock().unwrap().is_some());

        notifier.cancel_all();
        assert!(notifier.timer.lock().unwrap().is_none());
    }

    #[test]
    fn test_schedule_without_runtime_fails() {
        let (tx, _rx) = mpsc::channel(4);
        let notifier = TerminalNotifier::new(Permission::Granted, tx);
        assert!(matches!(
            notifier.schedule_daily(&Reminder::daily_digest()),
            Err(NotifyError::NoRuntime)
        ));
    }
}
