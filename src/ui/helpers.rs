//! Helper functions for UI operations.
//!
//! Background task spawning, panic capture, link opening and small layout
//! utilities shared across the UI layer.

use crate::app::{App, AppEvent};
use crate::storage::{FavoritesWrite, FavoritesWriter};
use crate::trends::RemoteSource;
use futures::FutureExt;
use ratatui::layout::Rect;
use std::panic::AssertUnwindSafe;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Wraps a future to catch panics and convert them to errors.
///
/// Panics in spawned background tasks are converted to `Err(String)`
/// containing the panic message instead of silently ending the task.
///
/// # Example
///
/// ```ignore
/// tokio::spawn(async move {
///     match catch_task_panic(async { do_work().await }).await {
///         Ok(result) => handle_result(result),
///         Err(panic_msg) => {
///             tracing::error!(error = %panic_msg, "Task panicked");
///             let _ = tx.send(AppEvent::TaskPanicked { task: "work", error: panic_msg }).await;
///         }
///     }
/// });
/// ```
pub(super) async fn catch_task_panic<F, T>(future: F) -> Result<T, String>
where
    F: std::future::Future<Output = T>,
{
    AssertUnwindSafe(future)
        .catch_unwind()
        .await
        .map_err(|panic| {
            if let Some(s) = panic.downcast_ref::<&'static str>() {
                s.to_string()
            } else if let Some(s) = panic.downcast_ref::<String>() {
                s.clone()
            } else if let Some(e) = panic.downcast_ref::<Box<dyn std::error::Error + Send>>() {
                e.to_string()
            } else {
                format!("Unknown panic: {:?}", (*panic).type_id())
            }
        })
}

/// Report a panicked task to the event loop.
async fn report_panic(tx: &mpsc::Sender<AppEvent>, task: &'static str, panic_msg: String) {
    tracing::error!(task, error = %panic_msg, "Background task panicked");
    let _ = tx
        .send(AppEvent::TaskPanicked {
            task,
            error: panic_msg,
        })
        .await;
}

/// Start a trend fetch in the background and raise the refresh indicator.
///
/// No in-flight guard: a second refresh while one is running simply races
/// it, and whichever finishes last decides the snapshot.
pub fn spawn_refresh(app: &mut App, event_tx: &mpsc::Sender<AppEvent>) -> JoinHandle<()> {
    app.begin_refresh();

    let source: RemoteSource = app.source.clone();
    let tx = event_tx.clone();
    tracing::debug!(url = %source.url(), "Spawning trend refresh");

    tokio::spawn(async move {
        match catch_task_panic(source.fetch()).await {
            Ok(result) => {
                if let Err(e) = tx.send(AppEvent::TrendsFetched(result)).await {
                    tracing::warn!(error = %e, event = "TrendsFetched", "Channel send failed (receiver dropped)");
                }
            }
            Err(panic_msg) => report_panic(&tx, "refresh", panic_msg).await,
        }
    })
}

/// Persist the favorites list in the background.
///
/// The write order is fixed here, before spawning, so a slow older write
/// can never overwrite a newer list. Memory was already updated; a failed
/// write is reported but not retried.
pub(crate) fn spawn_favorites_write(
    writer: &FavoritesWriter,
    favorites: Vec<String>,
    event_tx: &mpsc::Sender<AppEvent>,
) -> JoinHandle<()> {
    let writer = writer.clone();
    let ticket = writer.ticket();
    let tx = event_tx.clone();
    tokio::spawn(async move {
        match catch_task_panic(writer.write(ticket, &favorites)).await {
            Ok(Ok(FavoritesWrite::Written)) => {
                tracing::debug!(ticket, count = favorites.len(), "Favorites saved");
            }
            Ok(Ok(FavoritesWrite::Superseded)) => {}
            Ok(Err(e)) => {
                tracing::error!(error = %e, "Failed to save favorites");
                if let Err(e) = tx
                    .send(AppEvent::FavoritesSaveFailed {
                        error: e.to_string(),
                    })
                    .await
                {
                    tracing::warn!(error = %e, event = "FavoritesSaveFailed", "Channel send failed (receiver dropped)");
                }
            }
            Err(panic_msg) => report_panic(&tx, "favorites_write", panic_msg).await,
        }
    })
}

/// Toggle a favorite in memory and persist the new list in the background.
pub(super) fn toggle_favorite_and_save(
    app: &mut App,
    id: &str,
    event_tx: &mpsc::Sender<AppEvent>,
) -> JoinHandle<()> {
    let now_favorite = app.toggle_favorite(id);
    app.set_status(if now_favorite {
        "Saved to favorites"
    } else {
        "Removed from favorites"
    });
    spawn_favorites_write(&app.favorites_writer, app.favorites.clone(), event_tx)
}

/// Open `url` with the configured browser, reporting failures on the status bar.
pub(super) fn open_link(app: &mut App, url: &str) {
    match app.services.browser.open(url) {
        Ok(()) => app.set_status("Opened in browser"),
        Err(e) => {
            tracing::warn!(url, error = %e, "Failed to open link");
            app.set_status(format!("{:#}", e));
        }
    }
}

/// Create a centered rectangle with the given percentage of the parent area.
pub(super) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let width = area.width * percent_x / 100;
    let height = area.height * percent_y / 100;
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

/// A rectangle of at most `width` x `height`, centered in `area`.
pub(super) fn centered_box(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width.saturating_sub(4));
    let height = height.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::testing::{harness, harness_with_db, onboarded};
    use crate::notify::Permission;
    use crate::storage::{Database, KEY_FAVORITES};
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_catch_task_panic_ok() {
        let result = catch_task_panic(async { 42 }).await;
        assert_eq!(result, Ok(42));
    }

    #[tokio::test]
    async fn test_catch_task_panic_static_str() {
        let result: Result<(), String> = catch_task_panic(async { panic!("boom") }).await;
        assert_eq!(result, Err("boom".to_string()));
    }

    #[tokio::test]
    async fn test_catch_task_panic_formatted() {
        let code = 7;
        let result: Result<(), String> =
            catch_task_panic(async move { panic!("failed with {}", code) }).await;
        assert_eq!(result, Err("failed with 7".to_string()));
    }

    #[tokio::test]
    async fn test_favorite_write_persists() {
        let mut h = harness(onboarded(), Permission::Granted).await;
        let (tx, mut rx) = mpsc::channel(4);

        toggle_favorite_and_save(&mut h.app, "ratio", &tx)
            .await
            .unwrap();

        assert_eq!(
            h.app.db.get_preference(KEY_FAVORITES).await.unwrap().as_deref(),
            Some(r#"["ratio"]"#)
        );
        assert!(rx.try_recv().is_err());
        assert_eq!(
            h.app.status_message.as_ref().map(|(m, _)| m.to_string()),
            Some("Saved to favorites".to_string())
        );
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_rapid_toggles_leave_newest_list_on_disk() {
        let path = std::env::temp_dir().join(format!(
            "boomer-rapid-toggles-{}.db",
            std::process::id()
        ));
        let _ = std::fs::remove_file(&path);
        let db = Database::open(path.to_str().unwrap()).await.unwrap();
        let mut h = harness_with_db(db, onboarded(), Permission::Granted);
        let (tx, _rx) = mpsc::channel(16);

        for round in 0..8 {
            let handles: Vec<_> = ["ratio", "brat-summer", "ratio", "npc-streamer", "ratio"]
                .into_iter()
                .map(|id| toggle_favorite_and_save(&mut h.app, id, &tx))
                .collect();
            for handle in handles {
                handle.await.unwrap();
            }

            assert_eq!(
                h.app.db.load_user_state().await.favorites,
                h.app.favorites,
                "round {round}"
            );
        }

        h.app.db.pool.close().await;
        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn test_favorite_write_failure_reported() {
        let mut h = harness(onboarded(), Permission::Granted).await;
        h.app.db.pool.close().await;
        let (tx, mut rx) = mpsc::channel(4);

        toggle_favorite_and_save(&mut h.app, "ratio", &tx)
            .await
            .unwrap();

        // Memory keeps the optimistic value
        assert_eq!(h.app.favorites, vec!["ratio".to_string()]);
        assert!(matches!(
            rx.try_recv(),
            Ok(AppEvent::FavoritesSaveFailed { .. })
        ));
    }

    #[tokio::test]
    async fn test_spawn_refresh_sends_result_and_sets_indicator() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let mut h = harness(onboarded(), Permission::Granted).await;
        h.app.source = RemoteSource::new(
            reqwest::Client::new(),
            format!("{}/top.json", server.uri()),
            0,
            std::time::Duration::from_secs(5),
        );
        let (tx, mut rx) = mpsc::channel(4);

        spawn_refresh(&mut h.app, &tx).await.unwrap();
        assert!(h.app.refreshing);

        match rx.recv().await {
            Some(AppEvent::TrendsFetched(Err(e))) => {
                assert!(e.to_string().contains("404"));
            }
            _ => panic!("expected a failed fetch"),
        }
    }

    #[tokio::test]
    async fn test_open_link_rejects_non_http() {
        let mut h = harness(onboarded(), Permission::Granted).await;
        open_link(&mut h.app, "javascript:alert(1)");
        assert!(h.browser.opened().is_empty());
        assert!(h.app.status_message.is_some());

        open_link(&mut h.app, "https://knowyourmeme.com");
        assert_eq!(h.browser.opened(), vec!["https://knowyourmeme.com/".to_string()]);
    }

    #[test]
    fn test_centered_box_fits_small_area() {
        let area = Rect::new(0, 0, 30, 8);
        let r = centered_box(60, 12, area);
        assert!(r.width <= 26);
        assert!(r.height <= 6);
        assert!(r.x + r.width <= area.width);
    }
}
