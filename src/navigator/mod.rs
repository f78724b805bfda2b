//! Page navigator capability
//!
//! The extraction code only talks to a [`PageNavigator`]: open a url, wait
//! for elements matching a [`Locator`], click a link element, read text.
//! Located elements are owned snapshots tied to the page they were found
//! on, so clicking one after the navigator has moved on is an error rather
//! than a silent read of the wrong page.

mod http;
mod memory;
mod page;

pub use http::HttpNavigator;
pub use memory::{InMemoryNavigator, InMemorySite};

use std::fmt;
use std::ops::{Deref, DerefMut};
use std::time::Duration;

use url::Url;

use crate::error::NavigatorError;

/// Named CSS selector for one piece of page structure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Locator {
    name: &'static str,
    css: &'static str,
}

impl Locator {
    pub const fn new(name: &'static str, css: &'static str) -> Self {
        Self { name, css }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn css(&self) -> &'static str {
        self.css
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.css)
    }
}

/// Snapshot of a located element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    generation: u64,
    text: String,
    href: Option<Url>,
}

impl Element {
    pub(crate) fn new(generation: u64, text: String, href: Option<Url>) -> Self {
        Self {
            generation,
            text,
            href,
        }
    }

    /// Rendered text, one line per non-blank text run
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.text.lines()
    }

    /// Absolute link target, if the element is an anchor with an href
    pub fn href(&self) -> Option<&Url> {
        self.href.as_ref()
    }

    pub(crate) fn generation(&self) -> u64 {
        self.generation
    }
}

/// A single page session: one current page at a time
pub trait PageNavigator {
    /// Navigate to `url`, replacing the current page
    fn open(&mut self, url: &Url) -> Result<(), NavigatorError>;

    /// Wait up to `timeout` for at least one element matching `locator`.
    ///
    /// Never returns an empty vector: no match is an error.
    fn wait_for(
        &mut self,
        locator: &Locator,
        timeout: Duration,
    ) -> Result<Vec<Element>, NavigatorError>;

    /// Follow a link element located on the current page
    fn click(&mut self, element: &Element) -> Result<(), NavigatorError>;

    fn current_url(&self) -> Option<&Url>;

    /// Release the session. Must be safe to call more than once.
    fn close(&mut self);

    fn wait_for_first(
        &mut self,
        locator: &Locator,
        timeout: Duration,
    ) -> Result<Element, NavigatorError> {
        self.wait_for(locator, timeout)?
            .into_iter()
            .next()
            .ok_or_else(|| NavigatorError::ElementNotFound {
                locator: locator.to_string(),
            })
    }
}

/// Creates a fresh navigator for each year
pub trait NavigatorLauncher {
    type Navigator: PageNavigator;

    fn launch(&mut self) -> Result<Self::Navigator, NavigatorError>;
}

impl<N, F> NavigatorLauncher for F
where
    N: PageNavigator,
    F: FnMut() -> Result<N, NavigatorError>,
{
    type Navigator = N;

    fn launch(&mut self) -> Result<N, NavigatorError> {
        self()
    }
}

/// Scoped ownership of a navigator; closes it when dropped
#[derive(Debug)]
pub struct Session<N: PageNavigator> {
    navigator: N,
}

impl<N: PageNavigator> Session<N> {
    pub fn new(navigator: N) -> Self {
        Self { navigator }
    }
}

impl<N: PageNavigator> Deref for Session<N> {
    type Target = N;

    fn deref(&self) -> &N {
        &self.navigator
    }
}

impl<N: PageNavigator> DerefMut for Session<N> {
    fn deref_mut(&mut self) -> &mut N {
        &mut self.navigator
    }
}

impl<N: PageNavigator> Drop for Session<N> {
    fn drop(&mut self) {
        self.navigator.close();
    }
}
