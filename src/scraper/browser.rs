//! Headless Chromium transport.
//!
//! chromiumoxide is async, so each fetch spins up a private current-thread
//! runtime and blocks on it. The browser process never outlives the call.

use crate::scraper::transport::{parse_base, search_url, Transport};
use crate::scraper::TransportError;
use crate::settings::TransportSettings;
use chromiumoxide::browser::{Browser, BrowserConfig};
use futures::StreamExt;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

/// Find a Chrome/Chromium binary: configured path first, then PATH.
pub fn find_chrome(configured: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = configured {
        if path.exists() {
            return Some(path.to_path_buf());
        }
        warn!(path = %path.display(), "Configured Chrome path does not exist");
    }

    ["google-chrome", "chromium", "chromium-browser"]
        .into_iter()
        .find_map(|bin| which::which(bin).ok())
}

/// The parts of a running browser that teardown needs.
pub(crate) trait BrowserProcess {
    async fn request_close(&mut self) -> Result<(), String>;
    async fn wait_exit(&mut self) -> Result<(), String>;
    async fn force_kill(&mut self) -> Result<(), String>;
}

impl BrowserProcess for Browser {
    async fn request_close(&mut self) -> Result<(), String> {
        self.close().await.map(|_| ()).map_err(|e| e.to_string())
    }

    async fn wait_exit(&mut self) -> Result<(), String> {
        self.wait().await.map(|_| ()).map_err(|e| e.to_string())
    }

    async fn force_kill(&mut self) -> Result<(), String> {
        match self.kill().await {
            Some(Err(e)) => Err(e.to_string()),
            Some(Ok(())) | None => Ok(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Teardown {
    Closed,
    Killed,
}

/// Ask the browser to close and give it `grace` to exit. A refused close or a
/// process still running after `grace` is killed.
pub(crate) async fn teardown<P: BrowserProcess>(process: &mut P, grace: Duration) -> Teardown {
    if let Err(e) = process.request_close().await {
        warn!("Browser close failed, killing it: {e}");
        return kill(process).await;
    }

    match tokio::time::timeout(grace, process.wait_exit()).await {
        Ok(Ok(())) => Teardown::Closed,
        Ok(Err(e)) => {
            warn!("Browser wait failed, killing it: {e}");
            kill(process).await
        }
        Err(_) => {
            warn!(?grace, "Browser did not exit after close, killing it");
            kill(process).await
        }
    }
}

async fn kill<P: BrowserProcess>(process: &mut P) -> Teardown {
    if let Err(e) = process.force_kill().await {
        warn!("Browser kill failed: {e}");
    }
    Teardown::Killed
}

pub struct HeadlessTransport {
    base: Url,
    chrome_path: Option<PathBuf>,
    settle: Duration,
    nav_timeout: Duration,
    headless: bool,
}

impl HeadlessTransport {
    pub fn new(settings: &TransportSettings) -> Result<Self, TransportError> {
        Ok(Self {
            base: parse_base(settings)?,
            chrome_path: settings.browser.chrome_path.clone(),
            settle: Duration::from_secs(settings.browser.settle_secs),
            nav_timeout: Duration::from_secs(settings.fetch_timeout_secs),
            headless: settings.browser.headless,
        })
    }

    fn browser_config(&self, chrome: PathBuf) -> Result<BrowserConfig, TransportError> {
        let mut builder = BrowserConfig::builder()
            .chrome_executable(chrome)
            .arg("--disable-gpu")
            .arg("--disable-dev-shm-usage")
            .arg("--disable-extensions")
            .arg("--disable-background-networking")
            .arg("--no-first-run")
            .window_size(1920, 1080)
            .launch_timeout(self.nav_timeout)
            .request_timeout(self.nav_timeout);

        if !self.headless {
            builder = builder.with_head();
        }

        builder
            .build()
            .map_err(|e| TransportError::Browser(format!("failed to build browser config: {e}")))
    }

    async fn render(&self, url: &str) -> Result<String, TransportError> {
        let chrome = find_chrome(self.chrome_path.as_deref()).ok_or_else(|| {
            TransportError::Browser("Chrome/Chromium not found; set transport.browser.chrome_path".into())
        })?;
        let config = self.browser_config(chrome)?;

        let (mut browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| TransportError::Browser(format!("failed to launch browser: {e}")))?;

        // The handler must be polled for the browser to make progress.
        let handle = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                let _ = event;
            }
        });

        let result = self.capture(&browser, url).await;

        // Torn down on every path, whatever `capture` returned.
        let outcome = teardown(&mut browser, self.nav_timeout).await;
        handle.abort();
        debug!(?outcome, "Browser torn down");

        result
    }

    async fn capture(&self, browser: &Browser, url: &str) -> Result<String, TransportError> {
        let page = tokio::time::timeout(self.nav_timeout, browser.new_page(url))
            .await
            .map_err(|_| {
                TransportError::Timeout(format!(
                    "navigation to {url} exceeded {:?}",
                    self.nav_timeout
                ))
            })?
            .map_err(|e| TransportError::Browser(format!("navigation failed: {e}")))?;

        // Let client-side rendering finish.
        tokio::time::sleep(self.settle).await;

        let html = page
            .content()
            .await
            .map_err(|e| TransportError::Browser(format!("failed to read page content: {e}")));

        if let Err(e) = page.close().await {
            warn!("Page close failed: {e}");
        }
        html
    }
}

impl Transport for HeadlessTransport {
    fn name(&self) -> &'static str {
        "headless-render"
    }

    fn fetch_listings_html(&self, location: &str) -> Result<String, TransportError> {
        let url = search_url(&self.base, location)?;

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| TransportError::Browser(format!("failed to start runtime: {e}")))?;

        info!(%url, settle = ?self.settle, "Rendering search page");
        runtime.block_on(self.render(url.as_str()))
    }
}
