use esp_idf_hal::delay::FreeRtos;
use esp_idf_hal::gpio::AnyIOPin;
use esp_idf_hal::i2c::{I2cConfig, I2cDriver, I2C0};
use esp_idf_hal::prelude::*;

use std::sync::mpsc;

use crate::readings::Readings;
use crate::SAMPLE_PERIOD_MS;

mod dht22;
mod mcp9808;

pub use dht22::Dht22;
pub use mcp9808::Mcp9808;

const I2C_BAUDRATE_KHZ: u32 = 100;
const STARTUP_DELAY_MS: u32 = 1000; // DHT22 needs ~1s after power-up

/// Samples both sensors every SAMPLE_PERIOD_MS, publishes the round to the
/// shared readings slot and forwards it to the supervising loop.
///
/// A source that fails a round contributes empty fields - its keys drop out
/// of the readings endpoint until it recovers.
pub fn sensor_task(
    i2c: I2C0,
    sda: AnyIOPin,
    scl: AnyIOPin,
    dht_pin: AnyIOPin,
    tx: mpsc::Sender<Readings>,
) -> anyhow::Result<()> {
    let config = I2cConfig::new().baudrate(I2C_BAUDRATE_KHZ.kHz().into());
    let i2c = I2cDriver::new(i2c, sda, scl, &config)?;
    let mut mcp = Mcp9808::new(i2c);
    let mut dht = Dht22::new(dht_pin)?;

    FreeRtos::delay_ms(STARTUP_DELAY_MS);

    loop {
        let mcp_temp = match mcp.read_fahrenheit() {
            Ok(v) => Some(v),
            Err(e) => {
                log::warn!("MCP9808 read failed: {e}");
                None
            }
        };
        let (dht_temp, humidity) = match dht.read_fahrenheit() {
            Ok((t, h)) => (Some(t), Some(h)),
            Err(e) => {
                log::warn!("DHT22 read failed: {e}");
                (None, None)
            }
        };

        let readings = Readings {
            mcp_temp,
            dht_temp,
            humidity,
        };
        readings.publish();
        tx.send(readings)?;

        FreeRtos::delay_ms(SAMPLE_PERIOD_MS);
    }
}
