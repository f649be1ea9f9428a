use esp_idf_hal::delay::FreeRtos;
use esp_idf_svc::http::Method;
use esp_idf_svc::ipv4::IpInfo;
use esp_idf_svc::wifi::{
    AccessPointConfiguration, AccessPointInfo, AuthMethod, ClientConfiguration, Configuration,
    EspWifi,
};

use std::sync::Mutex;

use crate::web::{NavBar, WebServer};
use crate::wifi::{web, ApConfig, ApStore};

/// Most recent scan results - shown on the provisioning page
pub static WIFI_SCAN: Mutex<Vec<AccessPointInfo>> = Mutex::new(Vec::new());

/// Network details once up (station or soft-AP)
pub static NET_INFO: Mutex<Option<NetInfo>> = Mutex::new(None);

#[derive(Clone, Debug)]
pub enum NetInfo {
    Station {
        ssid: heapless::String<32>,
        ip: IpInfo,
    },
    AccessPoint {
        ssid: heapless::String<32>,
        ip: IpInfo,
    },
}

impl NetInfo {
    pub fn current() -> Option<NetInfo> {
        NET_INFO.lock().unwrap().clone()
    }

    pub fn display_fields(&self) -> Vec<(String, String)> {
        let (mode, ssid, ip) = match self {
            NetInfo::Station { ssid, ip } => ("Station", ssid, ip),
            NetInfo::AccessPoint { ssid, ip } => ("Access Point", ssid, ip),
        };
        vec![
            ("WiFi Mode".to_owned(), mode.to_owned()),
            ("SSID".to_owned(), ssid.to_string()),
            ("IP Address".to_owned(), ip.ip.to_string()),
        ]
    }
}

const CONNECT_POLL_MS: u32 = 500;

pub struct WifiManager<'a> {
    wifi: EspWifi<'a>,
}

impl<'a> WifiManager<'a> {
    pub fn new(wifi: EspWifi<'a>) -> anyhow::Result<Self> {
        Ok(Self { wifi })
    }

    pub fn add_handlers(
        &self,
        server: &mut WebServer,
        navbar: NavBar<'static>,
    ) -> anyhow::Result<()> {
        server.add_handler("/wifi", Method::Get, web::wifi_page_handler(navbar))?;
        server.add_handler("/wifi/delete/*", Method::Get, web::handle_ap_delete)?;
        server.add_handler("/wifi/add", Method::Post, web::handle_ap_add)?;
        Ok(())
    }

    /// Scan and stash the results for the provisioning page.
    /// Note that scanning drops an active connection.
    pub fn scan(&mut self) -> anyhow::Result<()> {
        let config = Configuration::Client(ClientConfiguration::default());
        self.wifi.set_configuration(&config)?;
        self.wifi.start()?;
        log::info!("Starting WiFi scan...");
        let scan = self
            .wifi
            .scan()?
            .into_iter()
            .inspect(|ap| {
                log::info!(
                    "SSID: {:?}, Channel: {}, RSSI: {}, Auth: {:?}",
                    ap.ssid,
                    ap.channel,
                    ap.signal_strength,
                    ap.auth_method,
                )
            })
            .collect::<Vec<_>>();
        let mut aps = WIFI_SCAN.lock().unwrap();
        *aps = scan;
        Ok(())
    }

    /// Stored networks currently visible (same SSID can show up on
    /// multiple bands - only returned once)
    pub fn find_known_aps() -> Vec<ApConfig> {
        let mut known = Vec::new();
        let mut seen = Vec::new();
        let aps = WIFI_SCAN.lock().unwrap();
        for ap in aps.iter() {
            if !seen.contains(&ap.ssid.as_str()) {
                if let Ok(Some(config)) = ApStore::get_ap(ap.ssid.as_str()) {
                    log::info!("Found stored network: {}", ap.ssid.as_str());
                    known.push(config);
                }
                seen.push(ap.ssid.as_str());
            }
        }
        known
    }

    pub fn connect_sta(
        &mut self,
        config: &ApConfig,
        timeout_ms: u32,
    ) -> anyhow::Result<Option<IpInfo>> {
        let sta_config = Configuration::Client(ClientConfiguration {
            ssid: config.ssid.clone(),
            password: config.password.clone(),
            ..Default::default()
        });

        self.wifi.set_configuration(&sta_config)?;
        self.wifi.start()?;
        self.wifi.connect()?;

        let mut timer = 0;
        loop {
            match self.wifi.is_up()? {
                true => break,
                false => {
                    log::info!(
                        "Connecting: {} [{}ms] {}",
                        config.ssid,
                        timer,
                        match self.wifi.is_connected()? {
                            true => "<connected>",
                            false => "",
                        }
                    );
                    FreeRtos::delay_ms(CONNECT_POLL_MS);
                    timer += CONNECT_POLL_MS;
                    if timer >= timeout_ms {
                        self.wifi.stop()?;
                        return Ok(None);
                    }
                }
            }
        }

        let ip = self.wifi.sta_netif().get_ip_info()?;
        let mut net_info = NET_INFO.lock().unwrap();
        *net_info = Some(NetInfo::Station {
            ssid: config.ssid.clone(),
            ip,
        });
        log::info!("Connected: {} {:?}", config.ssid, ip);

        Ok(Some(ip))
    }

    pub fn start_ap(&mut self, ssid: &str, password: Option<&str>) -> anyhow::Result<IpInfo> {
        let ssid: heapless::String<32> = ssid
            .try_into()
            .map_err(|_| anyhow::anyhow!("SSID too long"))?;

        let ap_config = match password {
            Some(password) => AccessPointConfiguration {
                ssid: ssid.clone(),
                password: password
                    .try_into()
                    .map_err(|_| anyhow::anyhow!("Password too long"))?,
                channel: 1,
                auth_method: AuthMethod::WPA2Personal,
                ..Default::default()
            },
            None => AccessPointConfiguration {
                ssid: ssid.clone(),
                channel: 1,
                auth_method: AuthMethod::None,
                ..Default::default()
            },
        };

        self.wifi
            .set_configuration(&Configuration::AccessPoint(ap_config))?;
        self.wifi.start()?;

        let ip = self.wifi.ap_netif().get_ip_info()?;
        let mut net_info = NET_INFO.lock().unwrap();
        *net_info = Some(NetInfo::AccessPoint {
            ssid: ssid.clone(),
            ip,
        });

        log::info!("Access Point started: SSID={ssid}");
        log::info!("IP: {ip:?}");

        Ok(ip)
    }
}
