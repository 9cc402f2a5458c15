use async_trait::async_trait;
use chrono::FixedOffset;
use futures::stream::BoxStream;
use mongodb::bson::Bson;
use std::sync::Arc;

#[cfg(test)]
use mockall::automock;

use crate::{
    config::CommonArgs,
    database::AppDatabase,
    jobs::reminder::ReminderWindow,
    models::{NotificationRecord, PlanRecord, User},
    push::{FcmClient, PushSender, ServiceAccountKey},
};

/// Lazily produced travel plans. The stream ending is the normal end of a scan,
/// an `Err` item is a scan failure.
pub type PlanStream = BoxStream<'static, anyhow::Result<PlanRecord>>;

#[cfg_attr(test, automock)]
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// `Ok(None)` when no user has the given id
    async fn find_user(&self, uid: &str) -> anyhow::Result<Option<User>>;
}

#[cfg_attr(test, automock)]
#[async_trait]
pub trait NotificationStore: Send + Sync {
    async fn create_notification(&self, notification: &NotificationRecord) -> anyhow::Result<()>;
}

#[cfg_attr(test, automock)]
#[async_trait]
pub trait TripDirectory: Send + Sync {
    /// Plans not yet reminded whose start date falls inside `window`
    async fn find_due_plans(&self, window: &ReminderWindow) -> anyhow::Result<PlanStream>;

    /// Set the reminder flag and stamp the time it was sent
    async fn mark_reminder_sent(&self, plan_id: &Bson) -> anyhow::Result<()>;
}

/// Everything a handler or the reminder sweep needs, shared behind an `Arc`
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserDirectory>,
    pub notifications: Arc<dyn NotificationStore>,
    pub trips: Arc<dyn TripDirectory>,
    pub push: Arc<dyn PushSender>,
    pub reminder_zone: FixedOffset,
}

impl AppState {
    /// Connect to MongoDB and FCM using the shared command line options
    pub async fn connect(args: &CommonArgs) -> anyhow::Result<Self> {
        let db = AppDatabase::new(&args.database).await?;
        let db = Arc::new(db);
        let key = ServiceAccountKey::from_file(&args.service_account_key_path).await?;
        let push = FcmClient::new(key);
        Ok(Self {
            users: db.clone(),
            notifications: db.clone(),
            trips: db,
            push: Arc::new(push),
            reminder_zone: args.reminder_utc_offset,
        })
    }
}
