use esp_idf_svc::http::server::{EspHttpConnection, Request};

use askama::Template;

use crate::web::{FlashMsg, NavBar};
use crate::wifi::{ApStore, WIFI_SCAN};

#[derive(askama::Template)]
#[template(path = "wifi.html")]
struct WifiPage {
    navbar: NavBar<'static>,
    visible: Vec<(String, u8, i8, &'static str)>,
    known: Vec<String>,
}

pub fn wifi_page_handler(
    navbar: NavBar<'static>,
) -> impl for<'r> Fn(Request<&mut EspHttpConnection<'r>>) -> anyhow::Result<()> + Send + 'static {
    move |request| {
        let known = match ApStore::get_aps() {
            Ok(aps) => aps.iter().map(|ap| ap.ssid.to_string()).collect(),
            Err(e) => {
                log::info!("get_aps: {e:?}");
                vec![]
            }
        };
        let visible = WIFI_SCAN
            .lock()
            .unwrap()
            .iter()
            .map(|ap| {
                (
                    ap.ssid.to_string(),
                    ap.channel,
                    ap.signal_strength,
                    match ap.auth_method {
                        Some(_) => "Protected",
                        None => "Open",
                    },
                )
            })
            .collect::<Vec<_>>();

        let page = WifiPage {
            navbar: navbar.clone(),
            visible,
            known,
        };
        let mut response = request.into_ok_response()?;
        let html = page.render()?;
        response.write(html.as_bytes())?;
        Ok::<(), anyhow::Error>(())
    }
}

pub fn handle_ap_delete(request: Request<&mut EspHttpConnection>) -> anyhow::Result<()> {
    log::info!("Delete network: {:?}", request.uri());
    let ssid = request
        .uri()
        .split('/')
        .next_back()
        .ok_or_else(|| anyhow::anyhow!("Missing SSID"))?;
    let ssid = urlencoding::decode(ssid)?.into_owned();

    let (level, message) = if ApStore::get_ap(&ssid)?.is_some() {
        match ApStore::delete_ap(&ssid) {
            Ok(_) => ("success", format!("Deleted network: {ssid}")),
            Err(e) => ("error", format!("Failed to delete network: {ssid} [{e}]")),
        }
    } else {
        ("error", format!("Unknown network: {ssid}"))
    };

    log::info!("{level}: {message}");
    request.into_response(
        302,
        Some(&message),
        &[
            ("Location", "/wifi"),
            ("Set-Cookie", &FlashMsg::cookie(level, &message)?),
        ],
    )?;
    Ok::<(), anyhow::Error>(())
}

pub fn handle_ap_add(mut request: Request<&mut EspHttpConnection>) -> anyhow::Result<()> {
    // Read the body of the request
    let mut buf = [0_u8; 256];
    let len = request.read(&mut buf)?;

    match serde_urlencoded::from_bytes(&buf[0..len]) {
        Ok(config) => {
            log::info!("Saving network: {config:?}");
            let (level, message) = match ApStore::add_ap(&config) {
                Ok(_) => ("success", format!("Saved network: {}", config.ssid)),
                Err(e) => (
                    "error",
                    format!("Failed to save network: {} [{}]", config.ssid, e),
                ),
            };
            log::info!("{level}: {message}");
            request.into_response(
                302,
                Some(&message),
                &[
                    ("Location", "/wifi"),
                    ("Set-Cookie", &FlashMsg::cookie(level, &message)?),
                ],
            )?;
        }
        Err(_) => {
            log::error!("Invalid form data");
            request.into_response(400, Some("Invalid form data"), &[])?;
        }
    }
    Ok::<(), anyhow::Error>(())
}
