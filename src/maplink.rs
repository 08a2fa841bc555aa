// 🗺️ Map Links - beach name → Google Maps search
// Opening may fail (no browser, blocked); the caller then shows the raw link

use crate::language::UiStrings;
use crate::record::BeachRecord;
use std::io;
use std::process::{Command, Stdio};
use thiserror::Error;
use tracing::{info, warn};

/// Region qualifier appended to every map query
pub const REGION_QUALIFIER: &str = "冲绳";

const MAPS_SEARCH_BASE: &str = "https://www.google.com/maps/search/?api=1&query=";

#[derive(Debug, Error)]
pub enum MapLinkError {
    #[error("could not open browser for {url}")]
    Blocked {
        url: String,
        #[source]
        source: io::Error,
    },
}

impl MapLinkError {
    pub fn url(&self) -> &str {
        match self {
            MapLinkError::Blocked { url, .. } => url,
        }
    }

    /// Localized fallback text followed by the link to open manually
    pub fn user_message(&self, strings: &UiStrings) -> String {
        format!("{}\n{}", strings.popup_blocked, self.url())
    }
}

pub fn map_search_url(name: &str, address: &str) -> String {
    let query = format!("{} {} {}", name, address, REGION_QUALIFIER);
    format!("{}{}", MAPS_SEARCH_BASE, urlencoding::encode(&query))
}

// ============================================================================
// BROWSER LAUNCHER
// ============================================================================

pub trait BrowserLauncher {
    fn open(&self, url: &str) -> io::Result<()>;
}

/// Hands the URL to the platform opener
pub struct SystemBrowser;

impl BrowserLauncher for SystemBrowser {
    #[cfg(target_os = "windows")]
    fn open(&self, url: &str) -> io::Result<()> {
        Command::new("cmd")
            .args(["/C", "start", "", url])
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map(|_| ())
    }

    #[cfg(not(target_os = "windows"))]
    fn open(&self, url: &str) -> io::Result<()> {
        // Try xdg-open first (Linux), then open (macOS)
        Command::new("xdg-open")
            .arg(url)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .or_else(|_| {
                Command::new("open")
                    .arg(url)
                    .stdin(Stdio::null())
                    .stdout(Stdio::null())
                    .stderr(Stdio::null())
                    .spawn()
            })
            .map(|_| ())
    }
}

/// Open the beach's map search; returns the URL that was opened
pub fn open_map(beach: &BeachRecord, launcher: &dyn BrowserLauncher) -> Result<String, MapLinkError> {
    let url = map_search_url(&beach.name, &beach.address);

    match launcher.open(&url) {
        Ok(()) => {
            info!(beach = %beach.name, "opened map link");
            Ok(url)
        }
        Err(source) => {
            warn!(error = %source, url = %url, "could not open new browser context");
            Err(MapLinkError::Blocked { url, source })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::{JA, ZH};
    use std::cell::RefCell;

    struct RecordingBrowser {
        opened: RefCell<Vec<String>>,
    }

    impl BrowserLauncher for RecordingBrowser {
        fn open(&self, url: &str) -> io::Result<()> {
            self.opened.borrow_mut().push(url.to_string());
            Ok(())
        }
    }

    struct BlockedBrowser;

    impl BrowserLauncher for BlockedBrowser {
        fn open(&self, _url: &str) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "blocked"))
        }
    }

    fn emerald() -> BeachRecord {
        BeachRecord {
            name: "Emerald Beach".to_string(),
            address: "Motobu 424".to_string(),
            open_time: String::new(),
            has_lifeguard: true,
            has_shower: true,
            is_free: true,
            note: String::new(),
        }
    }

    #[test]
    fn test_url_is_encoded_with_region() {
        let url = map_search_url("Emerald Beach", "Motobu 424");
        assert_eq!(
            url,
            "https://www.google.com/maps/search/?api=1&query=Emerald%20Beach%20Motobu%20424%20%E5%86%B2%E7%BB%B3"
        );
    }

    #[test]
    fn test_url_escapes_query_delimiters() {
        let url = map_search_url("A&B", "x=1");
        assert!(url.contains("A%26B%20x%3D1"));
    }

    #[test]
    fn test_open_map_uses_launcher() {
        let browser = RecordingBrowser {
            opened: RefCell::new(Vec::new()),
        };
        let url = open_map(&emerald(), &browser).unwrap();
        assert_eq!(browser.opened.borrow().as_slice(), &[url]);
    }

    #[test]
    fn test_blocked_reports_raw_link() {
        let err = open_map(&emerald(), &BlockedBrowser).unwrap_err();
        let url = map_search_url("Emerald Beach", "Motobu 424");
        assert_eq!(err.url(), url);

        let zh = err.user_message(&ZH);
        assert!(zh.starts_with(ZH.popup_blocked));
        assert!(zh.ends_with(&url));
        assert!(err.user_message(&JA).starts_with(JA.popup_blocked));
    }
}
