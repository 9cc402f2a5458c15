use mongodb::bson::{self, Bson, Document};

use crate::utils::id_to_string;

/// A travel plan document handed out by the trip directory.
/// Fields stay untyped until [`PlanRecord::decode`] is called.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanRecord {
    pub id: Bson,
    pub data: Document,
}

/// Typed view of the fields the reminder sweep needs
#[derive(Debug, Default, Clone, PartialEq)]
pub struct TravelPlan {
    pub id: String,
    pub name: String,
    pub owner_id: String,
    pub start_date: Option<bson::DateTime>,
}

impl PlanRecord {
    pub fn from_document(mut data: Document) -> Self {
        let id = data.remove("_id").unwrap_or(Bson::Null);
        Self { id, data }
    }

    pub fn id_string(&self) -> String {
        id_to_string(&self.id)
    }

    pub fn reminder_sent(&self) -> bool {
        self.data.get_bool("isStartDateReminderSent").unwrap_or(false)
    }

    /// A missing or non-string name decodes as empty.
    /// The owner id is required.
    pub fn decode(&self) -> anyhow::Result<TravelPlan> {
        let name = self.data.get_str("name").unwrap_or_default().to_string();
        let owner_id = match self.data.get_str("ownerId") {
            Ok(owner_id) if !owner_id.is_empty() => owner_id.to_string(),
            _ => anyhow::bail!("missing or invalid ownerId"),
        };
        let start_date = self.data.get_datetime("startDate").ok().copied();
        Ok(TravelPlan {
            id: self.id_string(),
            name,
            owner_id,
            start_date,
        })
    }
}
