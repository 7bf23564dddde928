// src/source/headless.rs
// Render the page in a headless Chromium and read back the DOM.
//
// `--virtual-time-budget` lets page scripts run for up to `element_timeout` of
// virtual time before the DOM is dumped; the whole process is bounded by
// `navigation_timeout` and killed if it overruns.

use std::{process::Stdio, time::Duration};

use async_trait::async_trait;
use tokio::process::Command;

use crate::config::options::SourceOptions;
use crate::error::ScrapeError;
use crate::specs::assets;

use super::HtmlSource;

pub struct HeadlessSource {
    browser: String,
    url: String,
    navigation_timeout: Duration,
    element_timeout: Duration,
}

impl HeadlessSource {
    pub fn new(opts: &SourceOptions) -> Self {
        Self {
            browser: opts.browser.clone(),
            url: opts.url.clone(),
            navigation_timeout: opts.navigation_timeout,
            element_timeout: opts.element_timeout,
        }
    }

    fn args(&self) -> Vec<String> {
        vec![
            s!("--headless=new"),
            s!("--disable-gpu"),
            s!("--no-first-run"),
            s!("--mute-audio"),
            s!("--hide-scrollbars"),
            format!("--user-agent={}", crate::config::consts::USER_AGENT),
            format!("--virtual-time-budget={}", self.element_timeout.as_millis()),
            s!("--dump-dom"),
            self.url.clone(),
        ]
    }
}

#[async_trait]
impl HtmlSource for HeadlessSource {
    fn name(&self) -> &'static str {
        "headless"
    }

    async fn fetch_market_html(&self) -> Result<String, ScrapeError> {
        let child = Command::new(&self.browser)
            .args(self.args())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| ScrapeError::Browser(format!("spawn {}: {e}", self.browser)))?;

        let output = tokio::time::timeout(self.navigation_timeout, child.wait_with_output())
            .await
            .map_err(|_| ScrapeError::Timeout(self.navigation_timeout, "page navigation"))??;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let tail = stderr.lines().last().unwrap_or("").trim();
            return Err(ScrapeError::Browser(format!("{} exited with {}: {tail}", self.browser, output.status)));
        }

        let dom = String::from_utf8_lossy(&output.stdout).into_owned();
        if !assets::has_table(&dom) {
            return Err(ScrapeError::Structure(format!(
                "no <table> rendered within {:?}",
                self.element_timeout
            )));
        }
        Ok(dom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_browser_is_a_transport_failure() {
        let opts = SourceOptions {
            browser: s!("/nonexistent/goldcross-browser"),
            ..SourceOptions::default()
        };
        let err = HeadlessSource::new(&opts).fetch_market_html().await.unwrap_err();
        assert_eq!(err.class(), crate::error::FailureClass::Transport);
    }

    #[test]
    fn dom_dump_is_last_flag_before_url() {
        let src = HeadlessSource::new(&SourceOptions::default());
        let args = src.args();
        assert_eq!(args[args.len() - 2], "--dump-dom");
        assert!(args.contains(&s!("--virtual-time-budget=5000")));
    }
}
