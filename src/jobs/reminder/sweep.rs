use anyhow::Context;
use chrono::{DateTime, FixedOffset, Utc};
use futures::StreamExt;
use std::sync::Arc;

use super::ReminderWindow;
use crate::{
    models::{NotificationRecord, PlanRecord},
    push::{send_to_tokens, DeliveryPolicy, PushContent, PushSender},
    services::{AppState, NotificationStore, TripDirectory, UserDirectory},
};

/// What happened to a single plan during a sweep
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanOutcome {
    Reminded,
    /// pushed and recorded, but the plan is still unflagged and will be picked up again
    FlagNotUpdated,
    Skipped,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SweepSummary {
    pub scanned: usize,
    pub reminded: usize,
    pub skipped: usize,
    pub flag_update_failures: usize,
}

impl SweepSummary {
    fn record(&mut self, outcome: PlanOutcome) {
        self.scanned += 1;
        match outcome {
            PlanOutcome::Reminded => self.reminded += 1,
            PlanOutcome::FlagNotUpdated => self.flag_update_failures += 1,
            PlanOutcome::Skipped => self.skipped += 1,
        }
    }
}

/// Sends a "trip starts tomorrow" reminder to the owner of every due plan.
///
/// Plans are handled one after another. A failure on one plan is logged and the
/// sweep moves on; only a failure of the scan itself aborts the run.
pub struct ReminderSweep {
    users: Arc<dyn UserDirectory>,
    notifications: Arc<dyn NotificationStore>,
    trips: Arc<dyn TripDirectory>,
    push: Arc<dyn PushSender>,
    zone: FixedOffset,
}

impl ReminderSweep {
    pub fn new(state: &AppState) -> Self {
        Self {
            users: state.users.clone(),
            notifications: state.notifications.clone(),
            trips: state.trips.clone(),
            push: state.push.clone(),
            zone: state.reminder_zone,
        }
    }

    pub async fn run(&self) -> anyhow::Result<SweepSummary> {
        self.run_at(Utc::now()).await
    }

    pub async fn run_at(&self, now: DateTime<Utc>) -> anyhow::Result<SweepSummary> {
        let window = ReminderWindow::tomorrow(now, self.zone)?;
        tracing::info!("checking for plans starting in {window}");
        let mut plans = self
            .trips
            .find_due_plans(&window)
            .await
            .context("querying travel plans")?;
        let mut summary = SweepSummary::default();
        while let Some(record) = plans.next().await {
            let record = record.context("iterating travel plans")?;
            let outcome = self.remind(&record).await;
            summary.record(outcome);
        }
        tracing::info!(
            scanned = summary.scanned,
            reminded = summary.reminded,
            skipped = summary.skipped,
            flag_update_failures = summary.flag_update_failures,
            "reminder sweep finished"
        );
        Ok(summary)
    }

    async fn remind(&self, record: &PlanRecord) -> PlanOutcome {
        let plan_id = record.id_string();
        if record.reminder_sent() {
            tracing::debug!("reminder already sent for plan {plan_id}");
            return PlanOutcome::Skipped;
        }
        let plan = match record.decode() {
            Ok(plan) => plan,
            Err(err) => {
                tracing::warn!("skipping plan {plan_id}: {err}");
                return PlanOutcome::Skipped;
            }
        };
        let start_date = plan.start_date.map(|ts| ts.to_string()).unwrap_or_default();
        tracing::debug!(
            "found plan starting soon: {} (ID: {}) on {} for owner: {}",
            plan.name,
            plan.id,
            start_date,
            plan.owner_id
        );

        let owner = match self.users.find_user(&plan.owner_id).await {
            Ok(Some(owner)) => owner,
            Ok(None) => {
                tracing::warn!("skipping plan {plan_id}: owner {} not found", plan.owner_id);
                return PlanOutcome::Skipped;
            }
            Err(err) => {
                tracing::warn!("skipping plan {plan_id}: owner lookup failed: {err:?}");
                return PlanOutcome::Skipped;
            }
        };

        let notification = NotificationRecord::trip_reminder(&plan, &owner.id);
        let content = PushContent::from(&notification).with_data("planId", &plan.id);
        match send_to_tokens(
            self.push.as_ref(),
            &owner.fcm_tokens,
            &content,
            DeliveryPolicy::BestEffort,
        )
        .await
        {
            Ok(report) if !report.failed_tokens.is_empty() => {
                tracing::warn!(
                    "reminder for plan {plan_id} reached {} of {} devices",
                    report.delivered,
                    report.attempted
                );
            }
            Ok(_) => tracing::debug!("successfully sent reminder for plan {plan_id}"),
            Err(err) => {
                tracing::warn!("skipping plan {plan_id}: {err}");
                return PlanOutcome::Skipped;
            }
        }

        if let Err(err) = self.notifications.create_notification(&notification).await {
            tracing::warn!("not able to store reminder for plan {plan_id}: {err:?}");
            return PlanOutcome::Skipped;
        }

        if let Err(err) = self.trips.mark_reminder_sent(&record.id).await {
            tracing::error!("error updating plan {plan_id} after sending reminder: {err:?}");
            return PlanOutcome::FlagNotUpdated;
        }
        PlanOutcome::Reminded
    }
}
