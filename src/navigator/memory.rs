//! Navigator serving fixture pages from memory

use std::cell::Cell;
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

use url::Url;

use super::page::PageState;
use super::{Element, Locator, PageNavigator};
use crate::error::NavigatorError;

/// A fixed set of pages keyed by absolute url.
///
/// Hands out any number of [`InMemoryNavigator`]s over the same pages and
/// counts how many of them were closed.
#[derive(Debug, Clone, Default)]
pub struct InMemorySite {
    pages: Rc<HashMap<Url, String>>,
    closed: Rc<Cell<usize>>,
}

impl InMemorySite {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) the page served at `url`
    pub fn with_page(mut self, url: &str, html: impl Into<String>) -> Result<Self, url::ParseError> {
        let url = Url::parse(url)?;
        Rc::make_mut(&mut self.pages).insert(url, html.into());
        Ok(self)
    }

    pub fn navigator(&self) -> InMemoryNavigator {
        InMemoryNavigator {
            pages: Rc::clone(&self.pages),
            closed: Rc::clone(&self.closed),
            state: PageState::default(),
            is_closed: false,
        }
    }

    /// Number of navigators from this site that have been closed
    pub fn closed_sessions(&self) -> usize {
        self.closed.get()
    }
}

#[derive(Debug)]
pub struct InMemoryNavigator {
    pages: Rc<HashMap<Url, String>>,
    closed: Rc<Cell<usize>>,
    state: PageState,
    is_closed: bool,
}

impl PageNavigator for InMemoryNavigator {
    fn open(&mut self, url: &Url) -> Result<(), NavigatorError> {
        self.state.ensure_open()?;
        let html = self.pages.get(url).ok_or_else(|| NavigatorError::Status {
            url: url.to_string(),
            status: 404,
        })?;
        self.state.load(url.clone(), html);
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
        if !self.is_closed {
            self.is_closed = true;
            self.closed.set(self.closed.get() + 1);
        }
        self.state.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_page_is_not_found() {
        let site = InMemorySite::new();
        let mut nav = site.navigator();
        let url = Url::parse("https://mojo.test/missing").unwrap();
        assert!(matches!(
            nav.open(&url),
            Err(NavigatorError::Status { status: 404, .. })
        ));
    }

    #[test]
    fn test_click_follows_link() {
        let site = InMemorySite::new()
            .with_page("https://mojo.test/a", r#"<p id="go"><a href="/b">next</a></p>"#)
            .unwrap()
            .with_page("https://mojo.test/b", "<h1>arrived</h1>")
            .unwrap();
        let mut nav = site.navigator();
        nav.open(&Url::parse("https://mojo.test/a").unwrap()).unwrap();

        let link = nav
            .wait_for_first(&Locator::new("go", "#go > a"), Duration::from_secs(1))
            .unwrap();
        nav.click(&link).unwrap();

        assert_eq!(nav.current_url().unwrap().as_str(), "https://mojo.test/b");
        // the link belonged to the previous page
        assert!(matches!(nav.click(&link), Err(NavigatorError::StaleElement)));
    }

    #[test]
    fn test_close_is_counted_once() {
        let site = InMemorySite::new();
        let mut nav = site.navigator();
        nav.close();
        nav.close();
        assert_eq!(site.closed_sessions(), 1);
    }
}
