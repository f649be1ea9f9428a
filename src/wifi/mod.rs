pub mod apstore;
pub use apstore::{ApConfig, ApStore};

pub mod manager;
pub use manager::{NetInfo, WifiManager, NET_INFO, WIFI_SCAN};

pub mod web;
