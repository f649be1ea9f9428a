use dht_sensor::{dht22, DhtReading};
use esp_idf_hal::delay::Ets;
use esp_idf_hal::gpio::{AnyIOPin, InputOutput, PinDriver};

use crate::readings::{celsius_to_fahrenheit, round1};

/// Temperature/humidity via the dht-sensor driver crate over a single
/// open-drain pin. The data line needs an external pull-up.
pub struct Dht22<'d> {
    pin: PinDriver<'d, AnyIOPin, InputOutput>,
}

impl<'d> Dht22<'d> {
    pub fn new(pin: AnyIOPin) -> anyhow::Result<Self> {
        let mut pin = PinDriver::input_output_od(pin)?;
        // Idle state is high - the sensor pulls the line low to talk
        pin.set_high()?;
        Ok(Self { pin })
    }

    /// Returns (temperature degF, relative humidity %)
    pub fn read_fahrenheit(&mut self) -> anyhow::Result<(f32, f32)> {
        let reading = dht22::Reading::read(&mut Ets, &mut self.pin)
            .map_err(|e| anyhow::anyhow!("sensor error: {e:?}"))?;
        Ok((
            round1(celsius_to_fahrenheit(reading.temperature)),
            round1(reading.relative_humidity),
        ))
    }
}
