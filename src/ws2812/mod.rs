mod rgb;
mod single;

pub use rgb::{colour, Rgb, RgbLayout};
pub use single::Ws2812RmtSingle;

// ws2812 bit timings (nanoseconds)
const T0H: u64 = 400;
const T0L: u64 = 850;
const T1H: u64 = 800;
const T1L: u64 = 450;

type Ws2812RmtChannel = esp_idf_hal::rmt::CHANNEL0;
