pub mod duration;

use std::sync::LazyLock;

use anyhow::{anyhow, Result};
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, warn};

use crate::model::MovieRecord;
use duration::parse_duration;

const TITLE_SEL: &str = r#"[data-testid="hero__primary-text"]"#;
const YEAR_SEL: &str = r#"ul.ipc-inline-list li a[href*="/releaseinfo"]"#;
const META_ITEM_SEL: &str = "ul.ipc-inline-list li";
// Longest plot text first.
const PLOT_SELS: [&str; 3] = [
    r#"[data-testid="plot-xl"]"#,
    r#"[data-testid="plot-l"]"#,
    r#"[data-testid="plot-xs_to_m"]"#,
];

static LEADING_INT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[+-]?[0-9]+").unwrap());

/// Compiled CSS selectors for a title page. Build once per batch.
pub struct MovieSelectors {
    title: Selector,
    year: Selector,
    meta_item: Selector,
    plots: [Selector; 3],
}

impl MovieSelectors {
    pub fn new() -> Result<Self> {
        Ok(Self {
            title: compile(TITLE_SEL)?,
            year: compile(YEAR_SEL)?,
            meta_item: compile(META_ITEM_SEL)?,
            plots: [
                compile(PLOT_SELS[0])?,
                compile(PLOT_SELS[1])?,
                compile(PLOT_SELS[2])?,
            ],
        })
    }
}

fn compile(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| anyhow!("invalid selector {:?}: {}", css, e))
}

/// Pull title, year, running time and synopsis out of a title page.
///
/// Every field degrades on its own: missing markup gives an empty string,
/// `None` or 0, never an error.
pub fn extract_movie(html: &str, sel: &MovieSelectors) -> MovieRecord {
    let doc = Html::parse_document(html);

    let title = doc
        .select(&sel.title)
        .next()
        .map(element_text)
        .unwrap_or_default();

    let year = doc
        .select(&sel.year)
        .next()
        .map(element_text)
        .and_then(|t| parse_leading_int(&t));

    let duration_text = doc
        .select(&sel.meta_item)
        .last()
        .map(element_text)
        .unwrap_or_default();
    let duration = parse_duration(&duration_text);

    let synopsis = sel
        .plots
        .iter()
        .map(|s| doc.select(s).map(|el| el.text().collect::<String>()).collect::<String>())
        .map(|t| t.trim().to_string())
        .find(|t| !t.is_empty())
        .unwrap_or_default();

    if title.is_empty() {
        warn!("No title found on page");
    }
    if year.is_none() {
        warn!("No release year found for {:?}", title);
    }
    debug!(
        "Extracted {:?}: year={:?} duration_text={:?} synopsis_len={}",
        title,
        year,
        duration_text,
        synopsis.len()
    );

    MovieRecord::scraped(title, year, duration, synopsis)
}

fn element_text(el: ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}

/// Leading integer of a string, ignoring anything after the digits.
fn parse_leading_int(text: &str) -> Option<i32> {
    LEADING_INT_RE
        .find(text.trim())
        .and_then(|m| m.as_str().parse().ok())
}

// ── Tests ──
