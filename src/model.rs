use serde::{Deserialize, Serialize};

/// One movie, as scraped or as loaded from a collection file.
///
/// `genres` and `trailer` only exist in curated collections; the scraper
/// never fills them and they are left out of its output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieRecord {
    pub title: String,
    /// `None` when the page had no parseable release year. Written as `null`.
    #[serde(default)]
    pub year: Option<i32>,
    /// Running time in minutes.
    #[serde(default)]
    pub duration: u32,
    #[serde(default)]
    pub synopsis: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genres: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trailer: Option<String>,
}

impl MovieRecord {
    pub fn scraped(title: String, year: Option<i32>, duration: u32, synopsis: String) -> Self {
        Self {
            title,
            year,
            duration,
            synopsis,
            genres: None,
            trailer: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scraped_record_omits_enrichment_fields() {
        let r = MovieRecord::scraped("The Matrix".into(), Some(1999), 136, "Neo.".into());
        let json = serde_json::to_value(&r).unwrap();
        let obj = json.as_object().unwrap();
        assert_eq!(obj.len(), 4);
        assert!(!obj.contains_key("genres"));
        assert!(!obj.contains_key("trailer"));
    }

    #[test]
    fn missing_year_is_null() {
        let r = MovieRecord::scraped("Untitled".into(), None, 0, String::new());
        let json = serde_json::to_value(&r).unwrap();
        assert!(json["year"].is_null());
    }

    #[test]
    fn collection_entry_with_enrichment() {
        let raw = r#"{
            "title": "Scream",
            "year": 1996,
            "duration": 111,
            "synopsis": "A killer.",
            "genres": "Horror, Mystery",
            "trailer": "https://example.com/scream"
        }"#;
        let r: MovieRecord = serde_json::from_str(raw).unwrap();
        assert_eq!(r.year, Some(1996));
        assert_eq!(r.genres.as_deref(), Some("Horror, Mystery"));
        assert_eq!(r.trailer.as_deref(), Some("https://example.com/scream"));
    }

    #[test]
    fn sparse_entry_uses_defaults() {
        let r: MovieRecord = serde_json::from_str(r#"{"title": "X", "year": null}"#).unwrap();
        assert_eq!(r.year, None);
        assert_eq!(r.duration, 0);
        assert!(r.synopsis.is_empty());
        assert!(r.genres.is_none());
    }
}
