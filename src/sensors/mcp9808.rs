use esp_idf_hal::i2c::I2cDriver;

use mcp9808::reg_res::ResolutionVal;
use mcp9808::reg_temp_generic::ReadableTempRegister;
use mcp9808::MCP9808;

use crate::readings::{celsius_to_fahrenheit, round1};

/// Ambient temperature via the mcp9808 driver crate (default address 0x18).
pub struct Mcp9808<'d> {
    dev: MCP9808<I2cDriver<'d>>,
}

impl<'d> Mcp9808<'d> {
    pub fn new(i2c: I2cDriver<'d>) -> Self {
        Self {
            dev: MCP9808::new(i2c),
        }
    }

    pub fn read_fahrenheit(&mut self) -> anyhow::Result<f32> {
        let temp = self
            .dev
            .read_temperature()
            .map_err(|e| anyhow::anyhow!("i2c error: {e:?}"))?;
        let celsius = temp.get_celsius(ResolutionVal::Deg_0_0625C);
        Ok(round1(celsius_to_fahrenheit(celsius)))
    }
}
