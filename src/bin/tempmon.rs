use esp_idf_hal::gpio::{IOPin, OutputPin};
use esp_idf_hal::peripherals::Peripherals;
use esp_idf_hal::task::watchdog::{TWDTConfig, TWDTDriver};
use esp_idf_svc::eventloop::EspSystemEventLoop;
use esp_idf_svc::http::Method;
use esp_idf_svc::nvs::EspDefaultNvsPartition;
use esp_idf_svc::wifi::EspWifi;

use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use tempmon::nvs::NVStore;
use tempmon::readings::Readings;
use tempmon::sensors;
use tempmon::web::{self, BuildInfo, HomePage, NavBar, NavLink, WebServer};
use tempmon::wifi::{NetInfo, WifiManager};
use tempmon::ws2812::{colour, RgbLayout, Ws2812RmtSingle};

const AP_SSID: &str = "TEMPMON-AP";

const NVS_NAMESPACE: &str = "TEMPMON";

const WIFI_CONNECT_TIMEOUT_MS: u32 = 10000;
const WATCHDOG_TIMEOUT: u64 = 60;

const BUILD_INFO: BuildInfo = BuildInfo {
    build_ts: env!("BUILD_TS"),
    build_branch: env!("BUILD_BRANCH"),
    build_hash: env!("BUILD_HASH"),
    build_profile: env!("BUILD_PROFILE"),
};

// Static NavBar
const NAVBAR: NavBar = NavBar {
    title: "Tempmon",
    links: &[
        NavLink {
            url: "/",
            label: "Readings",
        },
        NavLink {
            url: "/wifi",
            label: "WiFi Configuration",
        },
        NavLink {
            url: "/reset_page",
            label: "Reset",
        },
    ],
};

fn main() -> anyhow::Result<()> {
    // It is necessary to call this function once. Otherwise some patches to the runtime
    // implemented by esp-idf-sys might not link properly.
    esp_idf_svc::sys::link_patches();

    // Bind the log crate to the ESP Logging facilities
    esp_idf_svc::log::EspLogger::initialize_default();
    log::info!("Starting...");

    // Initialise peripherals
    let peripherals = Peripherals::take()?;
    let sys_loop = EspSystemEventLoop::take()?;
    let nvs_default_partition = EspDefaultNvsPartition::take()?;

    // Hardware Watchdog
    let twdt_config = TWDTConfig {
        duration: Duration::from_secs(WATCHDOG_TIMEOUT),
        panic_on_trigger: true,
        subscribed_idle_tasks: enumset::enum_set!(esp_idf_hal::cpu::Core::Core0),
    };
    let mut twdt_driver = TWDTDriver::new(peripherals.twdt, &twdt_config)?;

    // NVStore
    NVStore::init(nvs_default_partition.clone(), NVS_NAMESPACE)?;

    // Status LED (C3-Zero onboard WS2812 = GPIO10)
    let ws2812 = peripherals.pins.gpio10.downgrade_output();
    let channel = peripherals.rmt.channel0;
    let mut status = Ws2812RmtSingle::new(ws2812, channel, RgbLayout::Rgb)?;
    status.set(colour::BLUE)?;

    // WiFi
    let mut wifi = WifiManager::new(EspWifi::new(
        peripherals.modem,
        sys_loop.clone(),
        Some(nvs_default_partition.clone()),
    )?)?;

    // Initial scan, then try stored networks
    wifi.scan()?;

    let mut connected = false;
    for config in WifiManager::find_known_aps() {
        log::info!("Trying network: {}", config.ssid);
        match wifi.connect_sta(&config, WIFI_CONNECT_TIMEOUT_MS) {
            Ok(Some(ip)) => {
                log::info!("Connected to {}: {}", config.ssid, ip.ip);
                connected = true;
                break;
            }
            Ok(None) => log::error!("Failed to connect: {}", config.ssid),
            Err(e) => log::error!("WiFi error: {} [{}]", config.ssid, e),
        }
    }

    if !connected {
        // Fall back to an AP so the provisioning page stays reachable
        log::info!("No stored network reachable - starting access point");
        wifi.start_ap(AP_SSID, None)?;
    }

    // Web server
    let mut server = WebServer::new(NAVBAR)?;
    wifi.add_handlers(&mut server, NAVBAR)?;
    web::nvs::add_handlers(&mut server)?;

    let home_page = HomePage::new(NAVBAR.title, BUILD_INFO.display_fields(), NAVBAR);
    if let Some(net) = NetInfo::current() {
        HomePage::set_status(net.display_fields());
    }
    server.add_handler("/", Method::Get, home_page.make_handler())?;

    // Sensor task (MCP9808 on I2C0 gpio4/gpio5, DHT22 on gpio6)
    let (sensor_tx, sensor_rx) = mpsc::channel();
    let i2c = peripherals.i2c0;
    let sda = peripherals.pins.gpio4.downgrade();
    let scl = peripherals.pins.gpio5.downgrade();
    let dht_pin = peripherals.pins.gpio6.downgrade();

    // Need to expand stack size for the driver buffers
    let sensor_task = thread::Builder::new()
        .stack_size(8192)
        .spawn(move || sensors::sensor_task(i2c, sda, scl, dht_pin, sensor_tx))
        .expect("Error starting sensor_task:");

    // Dont configure watchdog until background tasks are up
    let mut watchdog = twdt_driver.watch_current_task()?;
    let mut count = 0_usize;

    loop {
        // Check sensor task still running - restart if not
        if sensor_task.is_finished() {
            log::error!("Sensor task failed - restarting");
            esp_idf_hal::reset::restart();
        }
        match sensor_rx.recv_timeout(Duration::from_millis(1000)) {
            Ok(readings) => {
                log::debug!("sensor_rx :: {readings:?}");
                if readings.complete() {
                    status.set(colour::GREEN)?;
                } else {
                    status.set(colour::AMBER)?;
                }
            }
            Err(mpsc::RecvTimeoutError::Timeout) => {}
            Err(e) => log::error!("ERROR :: sensor_rx :: {e:?}"),
        }
        count += 1;
        if count % 60 == 0 {
            // Periodic status log
            log::info!("sensor_rx :: tick {:?}", Readings::current());
        }

        // Update watchdog
        watchdog.feed()?;
    }
}
