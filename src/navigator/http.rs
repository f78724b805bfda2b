//! Navigator backed by plain HTTP fetches (ureq) and static HTML parsing

use std::time::Duration;

use log::debug;
use url::Url;

use super::page::PageState;
use super::{Element, Locator, PageNavigator};
use crate::error::NavigatorError;

/// Fetches pages with a blocking ureq agent.
///
/// The fetched document is static, so `wait_for` answers immediately: an
/// element that is not in the document will not appear later. The wait
/// timeout bounds each request instead.
pub struct HttpNavigator {
    agent: ureq::Agent,
    timeout: Duration,
    state: PageState,
}

impl HttpNavigator {
    pub fn new(user_agent: &str, timeout: Duration) -> Self {
        let agent = ureq::Agent::new_with_config(
            ureq::Agent::config_builder()
                .timeout_global(Some(timeout))
                .user_agent(user_agent)
                .build(),
        );

        Self {
            agent,
            timeout,
            state: PageState::default(),
        }
    }

    fn fetch(&self, url: &Url) -> Result<String, NavigatorError> {
        let response = self
            .agent
            .get(url.as_str())
            .header("Accept-Language", "en-US,en;q=0.9")
            .call()
            .map_err(|e| self.request_error(url, e))?;

        if !response.status().is_success() {
            return Err(NavigatorError::Status {
                url: url.to_string(),
                status: response.status().as_u16(),
            });
        }

        response
            .into_body()
            .read_to_string()
            .map_err(|e| self.request_error(url, e))
    }

    fn request_error(&self, url: &Url, err: ureq::Error) -> NavigatorError {
        match err {
            ureq::Error::StatusCode(status) => NavigatorError::Status {
                url: url.to_string(),
                status,
            },
            ureq::Error::Timeout(_) => NavigatorError::Timeout {
                target: url.to_string(),
                waited: self.timeout,
            },
            other => NavigatorError::Http {
                url: url.to_string(),
                reason: other.to_string(),
            },
        }
    }
}

impl PageNavigator for HttpNavigator {
    fn open(&mut self, url: &Url) -> Result<(), NavigatorError> {
        self.state.ensure_open()?;
        debug!("GET {url}");
        let html = self.fetch(url)?;
        self.state.load(url.clone(), &html);
        Ok(())
    }

    fn wait_for(
        &mut self,
        locator: &Locator,
        _timeout: Duration,
    ) -> Result<Vec<Element>, NavigatorError> {
        self.state.select(locator)
    }

    fn click(&mut self, element: &Element) -> Result<(), NavigatorError> {
        let target = self.state.link_target(element)?;
        self.open(&target)
    }

    fn current_url(&self) -> Option<&Url> {
        self.state.url()
    }

    fn close(&mut self) {
        self.state.close();
    }
}
