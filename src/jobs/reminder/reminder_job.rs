use anyhow::Context;
use std::{sync::Arc, time::Duration};
use tokio::time::{interval, timeout, MissedTickBehavior};

use super::{ReminderSweep, SweepSummary};
use crate::services::AppState;

/// Run the reminder sweep every `period` for as long as the server lives
pub async fn reminder_job(state: Arc<AppState>, period: Duration) {
    tracing::debug!("initializing reminder scheduler job");
    let sweep = ReminderSweep::new(&state);
    let mut interval = interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    loop {
        interval.tick().await;
        if let Err(err) = sweep.run().await {
            tracing::error!("reminder sweep failed: {err:?}");
        }
    }
}

/// Run a single sweep, giving up once `deadline` has passed
pub async fn run_reminder_sweep(
    state: &AppState,
    deadline: Duration,
) -> anyhow::Result<SweepSummary> {
    let sweep = ReminderSweep::new(state);
    timeout(deadline, sweep.run())
        .await
        .with_context(|| format!("reminder sweep did not finish within {deadline:?}"))?
}
