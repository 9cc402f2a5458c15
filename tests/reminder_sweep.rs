use chrono::{DateTime, TimeZone, Utc};
use mongodb::bson::{self, doc, Document};

use suroy_notifier::{
    constants::*,
    jobs::reminder::{ReminderSweep, SweepSummary},
};

mod helper;
use helper::{user, FakePush, FakeTrips, Fakes};

/// 2025-05-04 10:00 at +08:00, tomorrow is 2025-05-05 local
fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 5, 4, 2, 0, 0).unwrap()
}

fn plan(id: &str, name: &str, owner_id: &str, start: DateTime<Utc>, sent: bool) -> Document {
    doc! {
        "_id": id,
        "name": name,
        "ownerId": owner_id,
        "startDate": bson::DateTime::from_millis(start.timestamp_millis()),
        "isStartDateReminderSent": sent,
    }
}

/// 09:00 on 2025-05-05 at +08:00
fn tomorrow_morning() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 5, 5, 1, 0, 0).unwrap()
}

#[tokio::test]
async fn test_sweep_reminds_due_plans_once() {
    let trips = FakeTrips::default();
    trips.insert(plan("p1", "Palawan", "u1", tomorrow_morning(), false));
    // starts in three days
    let later = Utc.with_ymd_and_hms(2025, 5, 7, 1, 0, 0).unwrap();
    trips.insert(plan("p2", "Siargao", "u1", later, false));
    trips.insert(plan("p3", "Bohol", "u1", tomorrow_morning(), true));
    // last minute of tomorrow in local time
    let late = Utc.with_ymd_and_hms(2025, 5, 5, 15, 59, 0).unwrap();
    trips.insert(plan("p4", "Cebu", "u2", late, false));
    trips.insert(plan("p5", "Baguio", "ghost", tomorrow_morning(), false));
    let users = vec![
        user("u1", "Juan", "Dela Cruz", &["t1", "t2", "t3"]),
        user("u2", "Maria", "Clara", &[]),
    ];
    let fakes = Fakes::new(users, trips, FakePush::failing_for(&["t1", "t2"]));
    let sweep = ReminderSweep::new(&fakes.state());

    let summary = sweep.run_at(now()).await.unwrap();
    assert_eq!(
        summary,
        SweepSummary {
            scanned: 3,
            reminded: 1,
            skipped: 2,
            flag_update_failures: 0,
        }
    );

    // one of three devices is enough
    let sent = fakes.push.sent();
    assert_eq!(sent.len(), 3);
    for msg in &sent {
        assert_eq!(msg.title, TRIP_REMINDER_TITLE);
        assert_eq!(msg.body, "Your trip 'Palawan' is starting tomorrow!");
        let plan_id = msg.data.as_ref().and_then(|d| d.get("planId"));
        assert_eq!(plan_id.map(String::as_str), Some("p1"));
    }

    let stored = fakes.stored();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].receiver_id, "u1");
    assert_eq!(stored[0].sender_id, SYSTEM_SENDER_ID);
    assert_eq!(stored[0].kind.as_deref(), Some(NOTI_TYPE_REMINDER));

    assert!(fakes.trips.reminder_sent("p1"));
    assert!(fakes.trips.plan("p1").get_datetime("startDateReminderSentAt").is_ok());
    assert!(!fakes.trips.reminder_sent("p2"));
    // no device, nothing was delivered
    assert!(!fakes.trips.reminder_sent("p4"));
    assert!(!fakes.trips.reminder_sent("p5"));

    // second run the same day does not notify p1 again
    let summary = sweep.run_at(now()).await.unwrap();
    assert_eq!(summary.reminded, 0);
    assert_eq!(summary.scanned, 2);
    assert_eq!(fakes.stored().len(), 1);
    assert_eq!(fakes.push.sent().len(), 3);
}

#[tokio::test]
async fn test_failed_delivery_is_retried_next_run() {
    let trips = FakeTrips::default();
    trips.insert(plan("p1", "Palawan", "u1", tomorrow_morning(), false));
    let users = vec![user("u1", "Juan", "Dela Cruz", &["t1", "t2"])];
    let fakes = Fakes::new(users, trips, FakePush::failing_for(&["t1", "t2"]));
    let sweep = ReminderSweep::new(&fakes.state());

    let summary = sweep.run_at(now()).await.unwrap();
    assert_eq!(summary.skipped, 1);
    assert!(fakes.stored().is_empty());
    assert!(!fakes.trips.reminder_sent("p1"));

    let summary = sweep.run_at(now()).await.unwrap();
    assert_eq!(summary.scanned, 1);
    assert_eq!(fakes.push.sent().len(), 4);
}

#[tokio::test]
async fn test_flag_update_failure_does_not_stop_sweep() {
    let trips = FakeTrips::failing_marks();
    trips.insert(plan("p1", "Palawan", "u1", tomorrow_morning(), false));
    trips.insert(plan("p2", "Bohol", "u1", tomorrow_morning(), false));
    let users = vec![user("u1", "Juan", "Dela Cruz", &["t1"])];
    let fakes = Fakes::new(users, trips, FakePush::default());

    let summary = ReminderSweep::new(&fakes.state())
        .run_at(now())
        .await
        .unwrap();
    assert_eq!(summary.flag_update_failures, 2);
    assert_eq!(summary.reminded, 0);
    assert_eq!(fakes.stored().len(), 2);
    assert!(!fakes.trips.reminder_sent("p1"));
    assert!(!fakes.trips.reminder_sent("p2"));
}

#[tokio::test]
async fn test_empty_sweep() {
    let fakes = Fakes::empty();
    let summary = ReminderSweep::new(&fakes.state())
        .run_at(now())
        .await
        .unwrap();
    assert_eq!(summary, SweepSummary::default());
    assert!(fakes.push.sent().is_empty());
}
