//! Application event handling.
//!
//! Applies the results of background work (trend fetches, favorites writes,
//! digest timers) to the application state.

use crate::app::{App, AppEvent};
use crate::trends::RefreshOutcome;

/// Handle application events from background tasks.
pub(super) fn handle_app_event(app: &mut App, event: AppEvent) {
    match event {
        AppEvent::TrendsFetched(result) => match app.finish_refresh(result) {
            RefreshOutcome::Replaced(count) => {
                app.set_status(format!("Updated: {} trends", count));
            }
            RefreshOutcome::Empty => app.set_status("No new trends"),
            RefreshOutcome::Failed(e) => {
                tracing::warn!(error = %e, "Refresh failed, keeping current trends");
                app.set_status("Couldn't refresh, showing saved trends");
            }
        },
        AppEvent::FavoritesSaveFailed { error } => {
            tracing::error!(error = %error, "Favorites write failed");
            app.set_status("Could not save favorites");
        }
        AppEvent::DigestDue { title, body } => {
            tracing::info!("Daily digest delivered");
            app.services.haptics.selection();
            app.set_status(format!("{}: {}", title, body));
        }
        AppEvent::TaskPanicked { task, error } => {
            tracing::error!(task, error, "Background task panicked");
            app.set_status(format!("Internal error in {} task", task));
        }
    }
    app.needs_redraw = true;
}
