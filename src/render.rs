use html_escape::{encode_double_quoted_attribute as attr, encode_text as text};

use crate::model::MovieRecord;
use crate::title::asset_paths;

pub const DEFAULT_ASSETS_DIR: &str = "data";
const TRAILER_LABEL: &str = "Voir le trailer";

/// What a single movie card shows, independent of where it is drawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView {
    pub title: String,
    pub year: String,
    /// Raw minutes, no unit.
    pub duration: String,
    pub genres: String,
    pub synopsis: String,
    pub trailer: Option<String>,
    pub poster: String,
    pub backdrop: String,
}

pub fn card_view(record: &MovieRecord, assets_dir: &str) -> CardView {
    let (poster, backdrop) = asset_paths(assets_dir, &record.title);
    CardView {
        title: record.title.clone(),
        year: year_label(record.year),
        duration: record.duration.to_string(),
        genres: record.genres.clone().unwrap_or_default(),
        synopsis: record.synopsis.clone(),
        trailer: record.trailer.clone(),
        poster,
        backdrop,
    }
}

impl CardView {
    /// "<year> - <duration>" line shown under the title.
    pub fn header(&self) -> String {
        format!("{} - {}", self.year, self.duration)
    }
}

pub fn card_views(records: &[&MovieRecord], assets_dir: &str) -> Vec<CardView> {
    records.iter().map(|r| card_view(r, assets_dir)).collect()
}

fn year_label(year: Option<i32>) -> String {
    year.map(|y| y.to_string()).unwrap_or_else(|| "?".into())
}

// ── HTML ──

/// Full standalone page for a list of cards, in order.
pub fn render_html(cards: &[CardView], collection: &str) -> String {
    let mut body = String::new();
    for card in cards {
        body.push_str(&render_card(card));
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="fr">
<head>
<meta charset="utf-8">
<title>{title}</title>
<link rel="stylesheet" href="style.css">
</head>
<body>
<ul class="stage">
{body}</ul>
</body>
</html>
"#,
        title = text(collection),
        body = body,
    )
}

fn render_card(card: &CardView) -> String {
    let href = card
        .trailer
        .as_deref()
        .map(|t| format!(r#" href="{}""#, attr(t)))
        .unwrap_or_default();

    format!(
        r#"<li class="scene">
  <div class="movie" onclick="return true">
    <div class="poster" style="background-image: url('{poster}')"></div>
    <div class="info">
      <header style="background-image: url('{backdrop}')">
        <h1>{title}</h1>
        <span class="year">{year} - </span><span class="duration">{duration}</span>
        <span class="genres"><br>{genres}</span>
      </header>
      <p>{synopsis}</p>
      <a class="trailer-link"{href} target="_blank">{label}</a>
    </div>
  </div>
</li>
"#,
        poster = attr(&card.poster),
        backdrop = attr(&card.backdrop),
        title = text(&card.title),
        year = text(&card.year),
        duration = text(&card.duration),
        genres = text(&card.genres),
        synopsis = text(&card.synopsis),
        href = href,
        label = TRAILER_LABEL,
    )
}

// ── Terminal ──

pub fn render_table(cards: &[CardView]) -> String {
    let mut out = format!(
        "{:>3} | {:<32} | {:<12} | {:<24} | {:<5}\n",
        "#", "Title", "Year - Min", "Genres", "Trailer"
    );
    out.push_str(&"-".repeat(88));
    out.push('\n');

    for (i, c) in cards.iter().enumerate() {
        out.push_str(&format!(
            "{:>3} | {:<32} | {:<12} | {:<24} | {:<5}\n",
            i + 1,
            truncate(&c.title, 32),
            c.header(),
            truncate(&c.genres, 24),
            if c.trailer.is_some() { "yes" } else { "-" },
        ));
    }
    out
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", truncated)
    }
}
