//! Fixture pages mimicking the index, detail and summary page markup

#![allow(dead_code)]

use mojo_harvest::{InMemorySite, NavigatorError, PipelineConfig};
use mojo_harvest::navigator::InMemoryNavigator;
use url::Url;

pub const BASE: &str = "https://mojo.test/";

pub fn config() -> PipelineConfig {
    PipelineConfig {
        base_url: Url::parse(BASE).unwrap(),
        ..PipelineConfig::default()
    }
}

pub fn launcher(site: &InMemorySite) -> impl FnMut() -> Result<InMemoryNavigator, NavigatorError> {
    let site = site.clone();
    move || Ok(site.navigator())
}

pub fn index_url(year: i32) -> String {
    format!("{BASE}year/world/{year}/")
}

pub fn index_page(hrefs: &[&str]) -> String {
    let rows: String = hrefs
        .iter()
        .enumerate()
        .map(|(i, href)| {
            format!(
                r#"<tr><td class="mojo-header-column">{}</td><td><a class="a-link-normal" href="{href}">Movie {}</a></td><td>$1</td></tr>"#,
                i + 1,
                i + 1
            )
        })
        .collect();
    format!(
        r#"<html><body>
        <table class="a-bordered a-horizontal-stripes a-size-base a-span12 mojo-body-table mojo-table-annotated scrolling-data-table">
            <tr><th>Rank</th><th>Release Group</th><th>Worldwide</th></tr>
            {rows}
        </table>
        </body></html>"#
    )
}

pub fn detail_page(summary_href: Option<&str>) -> String {
    match summary_href {
        Some(href) => format!(
            r#"<html><body><div id="title-summary-refiner"><a class="a-link-normal" href="{href}">Title Summary</a></div></body></html>"#
        ),
        None => "<html><body><div id=\"other-refiner\"><a href=\"/x\">Release</a></div></body></html>".to_string(),
    }
}

/// Gross cells are domestic, international, worldwide. Labeled rows carry
/// the label span the live site uses; unlabeled rows only the value.
pub fn summary_page(title: &str, gross: [&str; 3], labeled: bool, attributes: &[(&str, &str)]) -> String {
    let labels = ["Domestic (<span class=\"percent\">50%</span>)", "International (<span class=\"percent\">50%</span>)", "Worldwide"];
    let rows: String = gross
        .iter()
        .zip(labels)
        .map(|(value, label)| {
            let label = if labeled {
                format!(r#"<span class="a-size-small">{label}</span><br>"#)
            } else {
                String::new()
            };
            format!(
                r#"<div class="a-section a-spacing-none">{label}<span class="a-size-medium a-text-bold"><span class="money">{value}</span></span></div>"#
            )
        })
        .collect();
    let attrs: String = attributes
        .iter()
        .map(|(label, value)| {
            format!(r#"<div class="a-section a-spacing-none"><span>{label}</span><span>{value}</span></div>"#)
        })
        .collect();

    format!(
        r#"<html><body>
        <h1 class="a-size-extra-large">{title}</h1>
        <span class="a-size-medium">Summary of {title}.</span>
        <div class="a-section a-spacing-none mojo-performance-summary-table">{rows}</div>
        <div class="a-section a-spacing-none mojo-summary-values mojo-hidden-from-mobile">{attrs}</div>
        </body></html>"#
    )
}

pub const FULL_ATTRIBUTES: [(&str, &str); 7] = [
    ("Domestic Distributor", "Universal Pictures<br><a href=\"/company/co1\">See full company information</a>"),
    ("Domestic Opening", "$70,023,650"),
    ("Budget", "$150,000,000"),
    ("Earliest Release Date", "Março 10, 2015 (USA)"),
    ("MPAA", "PG-13"),
    ("Running Time", "2 hr 15 min"),
    ("Genres", "Action\n        Sci-Fi"),
];
