mod reminder_job;
mod sweep;
mod window;

pub use reminder_job::{reminder_job, run_reminder_sweep};
pub use sweep::{PlanOutcome, ReminderSweep, SweepSummary};
pub use window::ReminderWindow;
