pub const REQUEST_TIMEOUT_SECS: u64 = 30;
pub const MONGO_MIN_POOL_SIZE: u32 = 5;
pub const MONGO_MAX_POOL_SIZE: u32 = 10;
pub const MONGO_CONN_TIMEOUT: u64 = 10;
pub const DEFAULT_PORT: u16 = 4000;
pub const DEFAULT_SWEEP_TIMEOUT_SECS: u64 = 5 * 60;
pub const DEFAULT_REMINDER_UTC_OFFSET: &str = "+08:00";
pub const DEFAULT_SERVICE_ACCOUNT_KEY_PATH: &str = "serviceAccountKey.json";

pub const DB_NAME: &str = "suroy";

pub const COLL_USERS: &str = "users";
pub const COLL_NOTIFICATIONS: &str = "notifications";
pub const COLL_TRAVEL_PLANS: &str = "travel_plans";

pub const GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
pub const FIREBASE_MESSAGE_SCOPE: &str = "https://www.googleapis.com/auth/firebase.messaging";
pub const FCM_BASE_URL: &str = "https://fcm.googleapis.com/v1/projects";
// refresh the access token this many seconds before google expires it
pub const ACCESS_TOKEN_EXPIRY_MARGIN: u64 = 15 * 60;

/// sender id stored on notifications that no human user sent
pub const SYSTEM_SENDER_ID: &str = "-1";
pub const NOTI_TYPE_REMINDER: &str = "reminder";
pub const NOTI_TYPE_FRIEND_REQUEST: &str = "friend_request";
pub const TRIP_REMINDER_TITLE: &str = "Trip Reminder!";
