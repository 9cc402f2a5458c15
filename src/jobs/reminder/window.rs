use chrono::{DateTime, FixedOffset, NaiveDate, TimeZone, Utc};
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Half open interval `[start, end)` of trips that start "tomorrow"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReminderWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl ReminderWindow {
    /// The calendar day after `now`'s date, where days are counted in `zone`
    pub fn tomorrow(now: DateTime<Utc>, zone: FixedOffset) -> anyhow::Result<Self> {
        let today = now.with_timezone(&zone).date_naive();
        let tomorrow = today
            .succ_opt()
            .ok_or_else(|| anyhow::anyhow!("no day after {today}"))?;
        let day_after = tomorrow
            .succ_opt()
            .ok_or_else(|| anyhow::anyhow!("no day after {tomorrow}"))?;
        Ok(Self {
            start: start_of_day(tomorrow, zone)?,
            end: start_of_day(day_after, zone)?,
        })
    }

    pub fn contains(&self, ts: DateTime<Utc>) -> bool {
        self.start <= ts && ts < self.end
    }
}

impl Display for ReminderWindow {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        write!(f, "[{}, {})", self.start.to_rfc3339(), self.end.to_rfc3339())
    }
}

fn start_of_day(date: NaiveDate, zone: FixedOffset) -> anyhow::Result<DateTime<Utc>> {
    let midnight = date
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| anyhow::anyhow!("no midnight on {date}"))?;
    let local = zone
        .from_local_datetime(&midnight)
        .single()
        .ok_or_else(|| anyhow::anyhow!("ambiguous midnight on {date}"))?;
    Ok(local.with_timezone(&Utc))
}
