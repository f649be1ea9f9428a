use esp_idf_svc::http::server::{EspHttpConnection, Request};

const STYLES_CSS: &[u8] = include_bytes!("../../templates/styles.css");
const SCRIPT_JS: &[u8] = include_bytes!("../../templates/script.js");

pub fn handle_styles(request: Request<&mut EspHttpConnection>) -> anyhow::Result<()> {
    let mut response = request.into_response(
        200,
        Some("OK"),
        &[
            ("Content-Type", "text/css"),
            ("Cache-Control", "max-age=600"),
        ],
    )?;
    response.write(STYLES_CSS)?;
    Ok(())
}

pub fn handle_script(request: Request<&mut EspHttpConnection>) -> anyhow::Result<()> {
    let mut response = request.into_response(
        200,
        Some("OK"),
        &[
            ("Content-Type", "application/javascript"),
            ("Cache-Control", "max-age=600"),
        ],
    )?;
    response.write(SCRIPT_JS)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn script_polls_readings_endpoint() {
        let script = std::str::from_utf8(SCRIPT_JS).unwrap();
        assert!(script.contains("fetch('/readings')"));
        assert!(script.contains("setInterval(fetchReadings, 3000)"));
        assert!(script.contains("DOMContentLoaded"));
    }

    #[test]
    fn script_failure_path_skips_the_field_updater() {
        let script = std::str::from_utf8(SCRIPT_JS).unwrap();
        let catch = script
            .lines()
            .find(|line| line.contains(".catch"))
            .expect("script has a catch clause");
        assert!(catch.contains("console.error"));
        assert!(!catch.contains("updateReadings"));
    }

    #[test]
    fn stylesheet_is_utf8() {
        assert!(std::str::from_utf8(STYLES_CSS).is_ok());
        assert!(!STYLES_CSS.is_empty());
    }
}
