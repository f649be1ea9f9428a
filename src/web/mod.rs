use esp_idf_svc::http::server::{
    Configuration as HttpConfig, EspHttpConnection, EspHttpServer, Request,
};
use esp_idf_svc::http::Method;

mod assets;
mod flash_msg;
mod home_page;
mod navbar;
pub mod nvs;
mod readings;
mod reset;

// Exports
pub use flash_msg::FlashMsg;
pub use home_page::{BuildInfo, HomePage};
pub use navbar::{NavBar, NavLink};

pub struct WebServer<'a> {
    server: EspHttpServer<'a>,
}

impl<'a> WebServer<'a> {
    pub fn new(navbar: NavBar<'static>) -> anyhow::Result<Self> {
        log::info!("Starting HTTPD:");
        let config: HttpConfig = HttpConfig {
            uri_match_wildcard: true,
            ..Default::default()
        };
        let mut server = EspHttpServer::new(&config)?;

        // Default handlers
        server.fn_handler("/styles.css", Method::Get, assets::handle_styles)?;
        server.fn_handler("/script.js", Method::Get, assets::handle_script)?;
        server.fn_handler("/readings", Method::Get, readings::handle_readings)?;
        server.fn_handler("/reset", Method::Get, reset::handle_reset)?;
        server.fn_handler("/reset_page", Method::Get, reset::reset_page_handler(navbar))?;

        log::info!("Web server started");

        Ok(Self { server })
    }

    pub fn add_handler<F>(&mut self, uri: &str, method: Method, f: F) -> anyhow::Result<()>
    where
        F: for<'r> Fn(Request<&mut EspHttpConnection<'r>>) -> anyhow::Result<()> + Send + 'static,
    {
        self.server.fn_handler(uri, method, f)?;
        Ok(())
    }
}
