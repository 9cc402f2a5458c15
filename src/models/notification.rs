use chrono::{DateTime, TimeZone};
use mongodb::bson;
use serde::{Deserialize, Serialize};

use super::{TravelPlan, User};
use crate::{
    constants::*,
    utils::{format_notification_time, to_bson_datetime},
};

/// Notification document as stored in the `notifications` collection
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NotificationRecord {
    pub title: String,
    pub body: String,
    pub sender_id: String,
    pub receiver_id: String,
    pub created_at: bson::DateTime,

    #[serde(rename = "type")]
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub kind: Option<String>,
}

impl NotificationRecord {
    /// System generated reminder for the owner of a trip starting tomorrow
    pub fn trip_reminder(plan: &TravelPlan, receiver_id: &str) -> Self {
        Self {
            title: TRIP_REMINDER_TITLE.to_string(),
            body: format!("Your trip '{}' is starting tomorrow!", plan.name),
            sender_id: SYSTEM_SENDER_ID.to_string(),
            receiver_id: receiver_id.to_string(),
            created_at: bson::DateTime::now(),
            kind: Some(NOTI_TYPE_REMINDER.to_string()),
        }
    }

    /// Friend request from `sender`, stamped with `now` in the caller's zone
    pub fn friend_request<Tz>(sender: &User, receiver_id: &str, now: &DateTime<Tz>) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        Self {
            title: format!("{} sent you a friend request.", sender.full_name()),
            body: format_notification_time(now),
            sender_id: sender.id.to_owned(),
            receiver_id: receiver_id.to_string(),
            created_at: to_bson_datetime(now),
            kind: Some(NOTI_TYPE_FRIEND_REQUEST.to_string()),
        }
    }
}
