//! Page extraction
//!
//! The index extractor walks a year's ranking table; the detail extractor
//! turns one title's summary page into a [`RawFieldBag`].

mod detail_extractor;
mod index_extractor;

pub use detail_extractor::*;
pub use index_extractor::*;

use crate::navigator::Locator;

/// Page structure of the ranking index and the title summary page
pub mod locators {
    use super::Locator;

    pub const INDEX_LINKS: Locator = Locator::new(
        "index links",
        "table.mojo-body-table.scrolling-data-table > tbody > tr > td > a[href]",
    );

    pub const SUMMARY_LINK: Locator = Locator::new("summary link", "div#title-summary-refiner > a");

    pub const TITLE: Locator = Locator::new("title", "h1.a-size-extra-large");

    /// Exact class match; the gross cells also carry `a-size-medium`
    pub const SUMMARY: Locator = Locator::new("summary", "span[class='a-size-medium']");

    pub const GROSS_ROWS: Locator = Locator::new(
        "gross rows",
        "div.a-section.a-spacing-none.mojo-performance-summary-table > div",
    );

    pub const GROSS_CELLS: Locator = Locator::new(
        "gross cells",
        "div.a-section.a-spacing-none.mojo-performance-summary-table > div > span.a-size-medium.a-text-bold",
    );

    pub const ATTRIBUTES: Locator = Locator::new(
        "attributes",
        "div.a-section.a-spacing-none.mojo-summary-values.mojo-hidden-from-mobile > div",
    );
}
