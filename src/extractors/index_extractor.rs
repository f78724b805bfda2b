//! Ranking index walk

use std::time::Duration;

use log::{debug, info};
use url::Url;

use super::locators::INDEX_LINKS;
use crate::error::NavigatorError;
use crate::navigator::PageNavigator;

/// Index page url for one release year
pub fn index_url(base: &Url, year: i32) -> Result<Url, url::ParseError> {
    base.join(&format!("year/world/{year}/"))
}

/// Detail-page links of one year's index, in ranking order.
///
/// Links are snapshots taken when the index was loaded, so the navigator
/// is free to move on while they are consumed. Single pass.
#[derive(Debug)]
pub struct IndexLinks {
    year: i32,
    links: std::vec::IntoIter<Url>,
}

impl IndexLinks {
    pub fn year(&self) -> i32 {
        self.year
    }
}

impl Iterator for IndexLinks {
    type Item = Url;

    fn next(&mut self) -> Option<Url> {
        self.links.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.links.size_hint()
    }
}

impl ExactSizeIterator for IndexLinks {}

/// Load the index for `year` and collect its detail-page links.
///
/// Fails if the index page cannot be opened or its ranking table is absent.
/// A table whose anchors carry no usable href yields no links.
pub fn walk_index<N: PageNavigator + ?Sized>(
    navigator: &mut N,
    base: &Url,
    year: i32,
    timeout: Duration,
) -> Result<IndexLinks, NavigatorError> {
    let url = index_url(base, year)?;
    info!("Loading index for {year}: {url}");
    navigator.open(&url)?;

    let links: Vec<Url> = navigator
        .wait_for(&INDEX_LINKS, timeout)?
        .into_iter()
        .filter_map(|el| el.href().cloned())
        .collect();
    debug!("{} links on the {year} index", links.len());

    Ok(IndexLinks {
        year,
        links: links.into_iter(),
    })
}
