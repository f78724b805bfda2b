//! Parsed page state shared by the navigator implementations
//!
//! Uses the scraper crate to evaluate locators against the current
//! document and snapshot the matches.

use scraper::{ElementRef, Html, Selector};
use url::Url;

use super::{Element, Locator};
use crate::error::NavigatorError;

#[derive(Debug)]
struct Page {
    url: Url,
    document: Html,
}

/// Current page plus a generation counter bumped on every navigation
#[derive(Debug, Default)]
pub(crate) struct PageState {
    page: Option<Page>,
    generation: u64,
    closed: bool,
}

impl PageState {
    pub(crate) fn ensure_open(&self) -> Result<(), NavigatorError> {
        if self.closed {
            Err(NavigatorError::Closed)
        } else {
            Ok(())
        }
    }

    pub(crate) fn load(&mut self, url: Url, html: &str) {
        self.generation += 1;
        self.page = Some(Page {
            url,
            document: Html::parse_document(html),
        });
    }

    pub(crate) fn url(&self) -> Option<&Url> {
        self.page.as_ref().map(|p| &p.url)
    }

    /// All elements matching `locator` on the current page, in document order
    pub(crate) fn select(&self, locator: &Locator) -> Result<Vec<Element>, NavigatorError> {
        self.ensure_open()?;
        let page = self.page.as_ref().ok_or(NavigatorError::NoPage)?;

        let selector =
            Selector::parse(locator.css()).map_err(|e| NavigatorError::InvalidLocator {
                locator: locator.to_string(),
                reason: e.to_string(),
            })?;

        let elements: Vec<Element> = page
            .document
            .select(&selector)
            .map(|el| {
                let href = el
                    .value()
                    .attr("href")
                    .and_then(|h| page.url.join(h.trim()).ok());
                Element::new(self.generation, rendered_text(el), href)
            })
            .collect();

        if elements.is_empty() {
            return Err(NavigatorError::ElementNotFound {
                locator: locator.to_string(),
            });
        }
        Ok(elements)
    }

    /// Resolve where clicking `element` leads
    pub(crate) fn link_target(&self, element: &Element) -> Result<Url, NavigatorError> {
        self.ensure_open()?;
        if self.page.is_none() {
            return Err(NavigatorError::NoPage);
        }
        if element.generation() != self.generation {
            return Err(NavigatorError::StaleElement);
        }
        element.href().cloned().ok_or(NavigatorError::NotALink)
    }

    pub(crate) fn close(&mut self) {
        self.page = None;
        self.closed = true;
    }
}

/// Text runs with whitespace collapsed, one run per line
fn rendered_text(el: ElementRef<'_>) -> String {
    el.text()
        .map(|run| run.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|run| !run.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    const ATTRS: Locator = Locator::new("attributes", "div.values > div");

    fn state(html: &str) -> PageState {
        let mut state = PageState::default();
        state.load(Url::parse("https://mojo.test/title/tt1/").unwrap(), html);
        state
    }

    #[test]
    fn test_rendered_text_splits_runs_into_lines() {
        let state = state(
            r#"
            <div class="values">
                <div><span>Genres</span><span>Action
                        Adventure
                        Sci-Fi</span></div>
                <div><span>Domestic Distributor</span><span>Warner Bros.<br><a href="/x">See full company information</a></span></div>
            </div>
            "#,
        );

        let elements = state.select(&ATTRS).unwrap();
        assert_eq!(elements.len(), 2);
        assert_eq!(elements[0].text(), "Genres\nAction Adventure Sci-Fi");
        let lines: Vec<&str> = elements[1].lines().collect();
        assert_eq!(
            lines,
            vec![
                "Domestic Distributor",
                "Warner Bros.",
                "See full company information"
            ]
        );
    }

    #[test]
    fn test_href_resolved_against_page_url() {
        let state = state(r#"<div id="refiner"><a href="/title/tt2/?ref_=bo">Summary</a></div>"#);
        let link = Locator::new("link", "#refiner > a");

        let elements = state.select(&link).unwrap();
        let target = state.link_target(&elements[0]).unwrap();
        assert_eq!(target.as_str(), "https://mojo.test/title/tt2/?ref_=bo");
    }

    #[test]
    fn test_missing_element_is_an_error() {
        let state = state("<p>nothing here</p>");
        assert!(matches!(
            state.select(&ATTRS),
            Err(NavigatorError::ElementNotFound { .. })
        ));
    }

    #[test]
    fn test_element_goes_stale_after_navigation() {
        let mut state = state(r#"<div id="refiner"><a href="/a">A</a></div>"#);
        let link = Locator::new("link", "#refiner > a");
        let element = state.select(&link).unwrap().remove(0);

        state.load(Url::parse("https://mojo.test/other/").unwrap(), "<p></p>");
        assert!(matches!(
            state.link_target(&element),
            Err(NavigatorError::StaleElement)
        ));
    }

    #[test]
    fn test_closed_state_rejects_lookups() {
        let mut state = state("<div class=\"values\"><div>x</div></div>");
        state.close();
        assert!(matches!(state.select(&ATTRS), Err(NavigatorError::Closed)));
    }
}
