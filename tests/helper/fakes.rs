use async_trait::async_trait;
use chrono::FixedOffset;
use futures::stream::{self, StreamExt};
use mongodb::bson::{self, Bson, Document};
use std::{
    collections::{HashMap, HashSet},
    sync::{Arc, Mutex},
};

use suroy_notifier::{
    jobs::reminder::ReminderWindow,
    models::{NotificationRecord, PlanRecord, User},
    push::{PushMessage, PushSender},
    services::{AppState, NotificationStore, PlanStream, TripDirectory, UserDirectory},
};

#[derive(Default)]
pub struct FakeUsers(HashMap<String, User>);

#[async_trait]
impl UserDirectory for FakeUsers {
    async fn find_user(&self, uid: &str) -> anyhow::Result<Option<User>> {
        Ok(self.0.get(uid).cloned())
    }
}

#[derive(Default)]
pub struct FakeNotifications(Mutex<Vec<NotificationRecord>>);

#[async_trait]
impl NotificationStore for FakeNotifications {
    async fn create_notification(&self, notification: &NotificationRecord) -> anyhow::Result<()> {
        self.0.lock().unwrap().push(notification.clone());
        Ok(())
    }
}

/// Plan documents kept in memory, queried the way the mongodb filter does
#[derive(Default)]
pub struct FakeTrips {
    plans: Mutex<Vec<Document>>,
    fail_marks: bool,
}

impl FakeTrips {
    /// every flag update fails
    pub fn failing_marks() -> Self {
        Self {
            fail_marks: true,
            ..Default::default()
        }
    }

    pub fn insert(&self, plan: Document) {
        self.plans.lock().unwrap().push(plan);
    }

    pub fn plan(&self, id: &str) -> Document {
        self.plans
            .lock()
            .unwrap()
            .iter()
            .find(|doc| matches!(doc.get_str("_id"), Ok(plan_id) if plan_id == id))
            .cloned()
            .unwrap()
    }

    pub fn reminder_sent(&self, id: &str) -> bool {
        self.plan(id).get_bool("isStartDateReminderSent").unwrap()
    }
}

#[async_trait]
impl TripDirectory for FakeTrips {
    async fn find_due_plans(&self, window: &ReminderWindow) -> anyhow::Result<PlanStream> {
        let due: Vec<_> = self
            .plans
            .lock()
            .unwrap()
            .iter()
            .filter(|doc| matches!(doc.get_bool("isStartDateReminderSent"), Ok(false)))
            .filter(|doc| match doc.get_datetime("startDate") {
                Ok(start) => {
                    let millis = start.timestamp_millis();
                    window.start.timestamp_millis() <= millis && millis < window.end.timestamp_millis()
                }
                Err(_) => false,
            })
            .cloned()
            .map(|doc| Ok(PlanRecord::from_document(doc)))
            .collect();
        Ok(stream::iter(due).boxed())
    }

    async fn mark_reminder_sent(&self, plan_id: &Bson) -> anyhow::Result<()> {
        if self.fail_marks {
            anyhow::bail!("write conflict");
        }
        let mut plans = self.plans.lock().unwrap();
        let plan = plans
            .iter_mut()
            .find(|doc| doc.get("_id") == Some(plan_id))
            .ok_or_else(|| anyhow::anyhow!("travel plan {plan_id} not found"))?;
        plan.insert("isStartDateReminderSent", true);
        plan.insert("startDateReminderSentAt", bson::DateTime::now());
        Ok(())
    }
}

/// Records every message, fails for the tokens in `failing`
#[derive(Default)]
pub struct FakePush {
    pub failing: HashSet<String>,
    sent: Mutex<Vec<PushMessage>>,
}

impl FakePush {
    pub fn failing_for(tokens: &[&str]) -> Self {
        Self {
            failing: tokens.iter().map(|t| t.to_string()).collect(),
            ..Default::default()
        }
    }

    pub fn sent(&self) -> Vec<PushMessage> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl PushSender for FakePush {
    async fn send(&self, msg: &PushMessage) -> anyhow::Result<()> {
        self.sent.lock().unwrap().push(msg.clone());
        if self.failing.contains(&msg.token) {
            anyhow::bail!("requested entity was not found");
        }
        Ok(())
    }
}

pub struct Fakes {
    pub users: Arc<FakeUsers>,
    pub notifications: Arc<FakeNotifications>,
    pub trips: Arc<FakeTrips>,
    pub push: Arc<FakePush>,
}

impl Fakes {
    pub fn new(users: Vec<User>, trips: FakeTrips, push: FakePush) -> Self {
        let users = users.into_iter().map(|u| (u.id.to_owned(), u)).collect();
        Self {
            users: Arc::new(FakeUsers(users)),
            notifications: Arc::new(FakeNotifications::default()),
            trips: Arc::new(trips),
            push: Arc::new(push),
        }
    }

    pub fn empty() -> Self {
        Self::new(vec![], FakeTrips::default(), FakePush::default())
    }

    pub fn state(&self) -> AppState {
        AppState {
            users: self.users.clone(),
            notifications: self.notifications.clone(),
            trips: self.trips.clone(),
            push: self.push.clone(),
            reminder_zone: FixedOffset::east_opt(8 * 3600).unwrap(),
        }
    }

    pub fn stored(&self) -> Vec<NotificationRecord> {
        self.notifications.0.lock().unwrap().clone()
    }
}
