use chrono::FixedOffset;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::{constants::*, utils::parse_utc_offset};

/// Notification relay API and trip reminder job
#[derive(Debug, Parser)]
#[command(name = "suroy_notifier", author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Serve the notification API
    Serve(ServeArgs),
    /// Run one trip reminder sweep and exit
    Remind(RemindArgs),
}

#[derive(Debug, Clone, Args)]
pub struct ServeArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// API server port
    #[arg(long, env = "PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Also run the reminder sweep in-process every N seconds
    #[arg(long, env = "REMINDER_INTERVAL_SECS")]
    pub reminder_interval_secs: Option<u64>,
}

#[derive(Debug, Clone, Args)]
pub struct RemindArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Deadline for the whole sweep
    #[arg(long, env = "SWEEP_TIMEOUT_SECS", default_value_t = DEFAULT_SWEEP_TIMEOUT_SECS)]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Path of the Google service account key used for FCM
    #[arg(long, env = "SERVICE_ACCOUNT_KEY_PATH", default_value = DEFAULT_SERVICE_ACCOUNT_KEY_PATH)]
    pub service_account_key_path: PathBuf,

    /// Zone used to decide which trips start "tomorrow", e.g. +08:00
    #[arg(
        long,
        env = "REMINDER_UTC_OFFSET",
        default_value = DEFAULT_REMINDER_UTC_OFFSET,
        value_parser = parse_utc_offset,
        allow_hyphen_values = true
    )]
    pub reminder_utc_offset: FixedOffset,

    #[command(flatten)]
    pub database: DatabaseArgs,
}

#[derive(Debug, Clone, Args)]
pub struct DatabaseArgs {
    #[arg(long, env = "MONGODB_URI")]
    pub mongodb_uri: String,

    #[arg(long, env = "MONGODB_DB_NAME", default_value = DB_NAME)]
    pub db_name: String,

    #[arg(long, env = "MONGODB_MIN_POOL_SIZE", default_value_t = MONGO_MIN_POOL_SIZE)]
    pub min_pool_size: u32,

    #[arg(long, env = "MONGODB_MAX_POOL_SIZE", default_value_t = MONGO_MAX_POOL_SIZE)]
    pub max_pool_size: u32,
}
