use std::{sync::Arc, time::Duration};

use self::reminder::reminder_job;
use crate::services::AppState;

pub mod reminder;

/// Spawn the background jobs that run next to the API server
pub fn spawn_all_jobs(state: Arc<AppState>, reminder_interval: Option<Duration>) {
    if let Some(period) = reminder_interval {
        // spawn job to periodically send out trip reminders
        tokio::spawn(async move {
            reminder_job(state, period).await;
        });
    } else {
        tracing::debug!("reminder job disabled, run the `remind` command from a scheduler instead");
    }
}
