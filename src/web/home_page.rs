use std::sync::Mutex;

use askama::Template;
use esp_idf_svc::http::server::{EspHttpConnection, Request};

use crate::web::NavBar;

#[derive(Clone)]
pub struct BuildInfo {
    pub build_ts: &'static str,
    pub build_branch: &'static str,
    pub build_hash: &'static str,
    pub build_profile: &'static str,
}

impl BuildInfo {
    pub fn display_fields(&self) -> Vec<(String, String)> {
        vec![
            ("Build Timestamp".to_owned(), self.build_ts.to_owned()),
            ("Build Branch".to_owned(), self.build_branch.to_owned()),
            ("Build Hash".to_owned(), self.build_hash.to_owned()),
            ("Build Profile".to_owned(), self.build_profile.to_owned()),
        ]
    }
}

/// Dynamic footer lines (network details etc) - set once the network is up,
/// read per-request so the handler closure stays immutable
static STATUS: Mutex<Vec<(String, String)>> = Mutex::new(Vec::new());

/// Dashboard page. The reading fields are filled in client-side by the
/// polling script - the template only carries their ids and labels.
#[derive(Clone, askama::Template)]
#[template(path = "index.html")]
pub struct HomePage {
    title: &'static str,
    build_info: Vec<(String, String)>,
    status: Vec<(String, String)>,
    navbar: NavBar<'static>,
}

impl HomePage {
    pub fn new(
        title: &'static str,
        build_info: Vec<(String, String)>,
        navbar: NavBar<'static>,
    ) -> Self {
        Self {
            title,
            build_info,
            status: Vec::new(),
            navbar,
        }
    }

    pub fn set_status(status: Vec<(String, String)>) {
        let mut current = STATUS.lock().unwrap();
        *current = status;
    }

    pub fn make_handler(
        &self,
    ) -> impl for<'r> Fn(Request<&mut EspHttpConnection<'r>>) -> anyhow::Result<()> + Send + 'static
    {
        let home_page = self.clone();
        move |request| {
            let mut page = home_page.clone();
            page.status = STATUS.lock().unwrap().clone();
            let mut response = request.into_response(200, Some("OK"), &[])?;
            let html = page.render()?;
            response.write(html.as_bytes())?;
            Ok::<(), anyhow::Error>(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_page() -> HomePage {
        HomePage::new(
            "Tempmon",
            vec![("Build Hash".to_owned(), "deadbeef".to_owned())],
            NavBar {
                title: "Tempmon",
                links: &[],
            },
        )
    }

    #[test]
    fn dashboard_has_one_field_per_reading() {
        let html = test_page().render().unwrap();
        for id in [r#"id="mcpTemp""#, r#"id="dhtTemp""#, r#"id="humidity""#] {
            assert_eq!(html.matches(id).count(), 1, "{id}");
        }
    }

    #[test]
    fn dashboard_references_sibling_assets() {
        let html = test_page().render().unwrap();
        assert!(html.contains(r#"href="/styles.css""#));
        assert!(html.contains(r#"src="/script.js""#));
    }

    #[test]
    fn dashboard_shows_build_info() {
        let html = test_page().render().unwrap();
        assert!(html.contains("Build Hash"));
        assert!(html.contains("deadbeef"));
    }
}
