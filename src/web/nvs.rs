use esp_idf_svc::http::server::{EspHttpConnection, Request};
use esp_idf_svc::http::Method;

use crate::nvs::NVStore;
use crate::web::WebServer;

/// Raw config-store debug endpoints
pub fn add_handlers(server: &mut WebServer) -> anyhow::Result<()> {
    server.add_handler("/nvs/get/*", Method::Get, handle_get)?;
    server.add_handler("/nvs/set/*", Method::Post, handle_set)?;
    server.add_handler("/nvs/delete/*", Method::Get, handle_delete)?;
    Ok(())
}

fn key_from_uri(uri: &str) -> anyhow::Result<String> {
    let key = uri
        .split('/')
        .next_back()
        .ok_or_else(|| anyhow::anyhow!("Missing key"))?;
    Ok(urlencoding::decode(key)?.into_owned())
}

fn handle_get(request: Request<&mut EspHttpConnection>) -> anyhow::Result<()> {
    let key = key_from_uri(request.uri())?;
    log::info!("NVS_GET: {key:?}");
    match NVStore::get_raw(&key) {
        Ok(Some(v)) => {
            let mut response =
                request.into_response(200, Some("OK"), &[("Content-Type", "application/json")]);
            if let Ok(ref mut r) = response {
                r.write(&v)?;
                r.write(b"\r\n")?;
            }
            response
        }
        Ok(None) => request.into_response(
            404,
            Some("Key not found"),
            &[("Content-Type", "text/plain")],
        ),
        Err(e) => request.into_response(500, Some(&e.to_string()), &[]),
    }
    .map(|_| ())
    .map_err(|e| anyhow::anyhow!("Http Error: {e}"))
}

fn handle_set(mut request: Request<&mut EspHttpConnection>) -> anyhow::Result<()> {
    // Read the body of the request
    let mut buf = [0_u8; 1024];
    let len = request.read(&mut buf)?;

    let key = key_from_uri(request.uri())?;
    log::info!("NVS_SET: {key}: {}", String::from_utf8_lossy(&buf[0..len]));

    match request.header("Content-Type") {
        Some("application/json") => match NVStore::set_raw(&key, &buf[0..len]) {
            Ok(_) => request.into_ok_response(),
            Err(e) => {
                log::error!("NVS_SET: {e}");
                request.into_response(400, Some(&e.to_string()), &[])
            }
        },
        _ => request.into_response(400, Some("Invalid Content-Type"), &[]),
    }
    .map(|_| ())
    .map_err(|e| anyhow::anyhow!("Http Error: {e}"))
}

fn handle_delete(request: Request<&mut EspHttpConnection>) -> anyhow::Result<()> {
    let key = key_from_uri(request.uri())?;
    log::info!("NVS_DELETE: {key:?}");
    match NVStore::delete(&key) {
        Ok(_) => request.into_response(200, Some("OK"), &[("Content-Type", "application/json")]),
        Err(e) => request.into_response(500, Some(&e.to_string()), &[]),
    }
    .map(|_| ())
    .map_err(|e| anyhow::anyhow!("Http Error: {e}"))
}
