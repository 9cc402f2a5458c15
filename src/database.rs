use async_trait::async_trait;
use futures::stream::StreamExt;
use mongodb::bson::{doc, Bson, Document};
use mongodb::error::Result as MongoResult;
use mongodb::options::{FindOneOptions, FindOptions, UpdateOptions};
use mongodb::results::{InsertOneResult, UpdateResult};
use mongodb::{options::ClientOptions, Client, Collection};
use serde::{de::DeserializeOwned, Serialize};
use std::time::Duration;

use crate::{
    config::DatabaseArgs,
    constants::*,
    jobs::reminder::ReminderWindow,
    models::{NotificationRecord, PlanRecord, User},
    services::{NotificationStore, PlanStream, TripDirectory, UserDirectory},
    utils::to_bson_datetime,
};

pub struct AppDatabase {
    client: Client,
    db_name: String,
}

impl AppDatabase {
    pub async fn new(args: &DatabaseArgs) -> MongoResult<Self> {
        let timeout = Duration::from_secs(MONGO_CONN_TIMEOUT);
        // create the mongodb client options
        let mut client_options = ClientOptions::parse(&args.mongodb_uri).await?;
        client_options.max_pool_size = Some(args.max_pool_size);
        client_options.min_pool_size = Some(args.min_pool_size);
        client_options.connect_timeout = Some(timeout);
        // create the client and return Result object
        let client = Client::with_options(client_options)?;
        tracing::debug!("mongodb client created for database {}", args.db_name);
        Ok(Self {
            client,
            db_name: args.db_name.to_owned(),
        })
    }

    fn collection<T>(&self, coll: &str) -> Collection<T> {
        self.client.database(&self.db_name).collection::<T>(coll)
    }

    pub async fn find_one<T>(
        &self,
        coll: &str,
        filter: Option<Document>,
        options: Option<FindOneOptions>,
    ) -> MongoResult<Option<T>>
    where
        T: DeserializeOwned + Unpin + Send + Sync + 'static,
    {
        self.collection::<T>(coll).find_one(filter, options).await
    }

    pub async fn insert_one<T>(&self, coll: &str, doc: &T) -> MongoResult<InsertOneResult>
    where
        T: Serialize,
    {
        self.collection::<T>(coll).insert_one(doc, None).await
    }

    pub async fn update_one(
        &self,
        coll: &str,
        filter: Document,
        update: Document,
        options: Option<UpdateOptions>,
    ) -> MongoResult<UpdateResult> {
        self.collection::<Document>(coll)
            .update_one(filter, update, options)
            .await
    }
}

/// Filter for plans not yet reminded and starting inside `window`
pub fn due_plans_filter(window: &ReminderWindow) -> Document {
    doc! {
        "isStartDateReminderSent": false,
        "startDate": {
            "$gte": to_bson_datetime(&window.start),
            "$lt": to_bson_datetime(&window.end),
        },
    }
}

fn reminder_sent_update() -> Document {
    doc! {
        "$set": {"isStartDateReminderSent": true},
        "$currentDate": {"startDateReminderSentAt": true},
    }
}

#[async_trait]
impl UserDirectory for AppDatabase {
    async fn find_user(&self, uid: &str) -> anyhow::Result<Option<User>> {
        let filter = doc! {"_id": uid};
        let user = self.find_one::<User>(COLL_USERS, Some(filter), None).await?;
        tracing::debug!("user {uid} loaded: {}", user.is_some());
        Ok(user)
    }
}

#[async_trait]
impl NotificationStore for AppDatabase {
    async fn create_notification(&self, notification: &NotificationRecord) -> anyhow::Result<()> {
        self.insert_one(COLL_NOTIFICATIONS, notification)
            .await
            .map_err(|err| {
                tracing::debug!(
                    "error creating notification document for {}: {:?}",
                    notification.receiver_id,
                    err
                );
                err
            })?;
        Ok(())
    }
}

#[async_trait]
impl TripDirectory for AppDatabase {
    async fn find_due_plans(&self, window: &ReminderWindow) -> anyhow::Result<PlanStream> {
        let options = FindOptions::builder()
            .sort(Some(doc! {"startDate": 1}))
            .build();
        let cursor = self
            .collection::<Document>(COLL_TRAVEL_PLANS)
            .find(due_plans_filter(window), options)
            .await?;
        let plans = cursor.map(|doc| doc.map(PlanRecord::from_document).map_err(anyhow::Error::from));
        Ok(plans.boxed())
    }

    async fn mark_reminder_sent(&self, plan_id: &Bson) -> anyhow::Result<()> {
        let filter = doc! {"_id": plan_id.clone()};
        let result = self
            .update_one(COLL_TRAVEL_PLANS, filter, reminder_sent_update(), None)
            .await?;
        if result.matched_count < 1 {
            anyhow::bail!("travel plan {plan_id} not found");
        }
        Ok(())
    }
}
