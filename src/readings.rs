use serde::Serialize;
use std::sync::Mutex;

/// Latest sample published by the sensor task, read by the HTTP handlers.
pub static READINGS: Mutex<Option<Readings>> = Mutex::new(None);

/// One sampling round. Field names on the wire match the element ids on the
/// dashboard page - the client script maps JSON keys to elements directly.
/// A source that failed this round serialises as a missing key, which the
/// client skips (the page keeps whatever it last displayed).
#[derive(Clone, Copy, Serialize, Debug, Default, PartialEq)]
pub struct Readings {
    /// MCP9808 temperature (degrees F)
    #[serde(rename = "mcpTemp", skip_serializing_if = "Option::is_none")]
    pub mcp_temp: Option<f32>,
    /// DHT22 temperature (degrees F)
    #[serde(rename = "dhtTemp", skip_serializing_if = "Option::is_none")]
    pub dht_temp: Option<f32>,
    /// DHT22 relative humidity (%)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub humidity: Option<f32>,
}

impl Readings {
    pub fn publish(self) {
        let mut current = READINGS.lock().unwrap();
        *current = Some(self);
    }

    pub fn current() -> Option<Readings> {
        *READINGS.lock().unwrap()
    }

    /// JSON body for the readings endpoint. Empty object until the first
    /// sample lands.
    pub fn current_json() -> anyhow::Result<String> {
        match Readings::current() {
            Some(r) => Ok(serde_json::to_string(&r)?),
            None => Ok("{}".to_string()),
        }
    }

    pub fn complete(&self) -> bool {
        self.mcp_temp.is_some() && self.dht_temp.is_some() && self.humidity.is_some()
    }
}

pub fn celsius_to_fahrenheit(c: f32) -> f32 {
    c * 9.0 / 5.0 + 32.0
}

/// Sensors resolve finer than the page displays - publish one decimal
pub fn round1(v: f32) -> f32 {
    (v * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_names_match_element_ids() {
        let r = Readings {
            mcp_temp: Some(72.5),
            dht_temp: Some(71.0),
            humidity: Some(45.0),
        };
        let v: serde_json::Value = serde_json::to_value(r).unwrap();
        let obj = v.as_object().unwrap();
        assert_eq!(obj.len(), 3);
        assert!(obj.contains_key("mcpTemp"));
        assert!(obj.contains_key("dhtTemp"));
        assert!(obj.contains_key("humidity"));
    }

    #[test]
    fn failed_sources_drop_their_keys() {
        let r = Readings {
            mcp_temp: Some(72.5),
            dht_temp: None,
            humidity: None,
        };
        let v: serde_json::Value = serde_json::to_value(r).unwrap();
        let obj = v.as_object().unwrap();
        assert_eq!(obj.len(), 1);
        assert_eq!(obj["mcpTemp"], serde_json::json!(72.5));
    }

    #[test]
    fn fahrenheit_conversion() {
        assert_eq!(celsius_to_fahrenheit(0.0), 32.0);
        assert_eq!(celsius_to_fahrenheit(100.0), 212.0);
        assert_eq!(round1(celsius_to_fahrenheit(22.5)), 72.5);
    }

    #[test]
    fn rounding_to_one_decimal() {
        assert_eq!(round1(45.04), 45.0);
        assert_eq!(round1(45.06), 45.1);
        assert_eq!(round1(-3.25), -3.3); // f32 rounds half away from zero
    }
}
