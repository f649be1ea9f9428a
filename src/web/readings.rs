use esp_idf_svc::http::server::{EspHttpConnection, Request};

use crate::readings::Readings;

/// Current sensor values as JSON. Keys match the dashboard element ids;
/// before the first sample the body is an empty object.
pub fn handle_readings(request: Request<&mut EspHttpConnection>) -> anyhow::Result<()> {
    let body = Readings::current_json()?;
    let mut response = request.into_response(
        200,
        Some("OK"),
        &[
            ("Content-Type", "application/json"),
            ("Cache-Control", "no-store"),
            ("Access-Control-Allow-Origin", "*"),
        ],
    )?;
    response.write(body.as_bytes())?;
    Ok(())
}
