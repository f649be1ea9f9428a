use esp_idf_sys as _; // Import the ESP-IDF bindings

pub mod nvs;
pub mod readings;
pub mod sensors;
pub mod web;
pub mod wifi;
pub mod ws2812;

/// Sensor sampling period. Matches the dashboard's poll interval and stays
/// above the DHT22's minimum 2s read spacing.
pub const SAMPLE_PERIOD_MS: u32 = 3000;
