pub mod client;
pub mod clock;
pub mod config;
pub mod countdown;
pub mod errors;
pub mod lists;
pub mod models;
pub mod state;
pub mod tracker;
pub mod ui;

pub use client::DashboardClient;
pub use config::{resolve_config, Config};
pub use tracker::AlarmTracker;
