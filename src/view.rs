use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::convert::Infallible;
use std::str::FromStr;

use clap::ValueEnum;

use crate::model::MovieRecord;

/// Genre selector. `all` disables filtering; anything else is matched as a
/// case-insensitive substring of a record's `genres`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenreFilter {
    All,
    Genre(String),
}

impl FromStr for GenreFilter {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(if s == "all" {
            GenreFilter::All
        } else {
            GenreFilter::Genre(s.to_string())
        })
    }
}

impl GenreFilter {
    fn keeps(&self, record: &MovieRecord) -> bool {
        match self {
            GenreFilter::All => true,
            GenreFilter::Genre(g) => record
                .genres
                .as_deref()
                .is_some_and(|genres| genres.to_lowercase().contains(&g.to_lowercase())),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum SortOrder {
    YearAsc,
    YearDesc,
}

/// Filter by genre, then order by year. Records without a year go last in
/// either order; ties keep their collection order.
pub fn compute_view<'a>(
    records: &'a [MovieRecord],
    genre: &GenreFilter,
    sort: SortOrder,
) -> Vec<&'a MovieRecord> {
    let mut view = filter_genre(records, genre);
    view.sort_by(|a, b| compare_years(a.year, b.year, sort));
    view
}

/// Genre filter alone, in collection order.
fn filter_genre<'a>(records: &'a [MovieRecord], genre: &GenreFilter) -> Vec<&'a MovieRecord> {
    records.iter().filter(|r| genre.keeps(r)).collect()
}

fn compare_years(a: Option<i32>, b: Option<i32>, sort: SortOrder) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => match sort {
            SortOrder::YearAsc => a.cmp(&b),
            SortOrder::YearDesc => b.cmp(&a),
        },
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Distinct genres of a collection, split on commas, deduplicated without
/// regard to case and sorted.
pub fn distinct_genres(records: &[MovieRecord]) -> Vec<String> {
    let mut seen: BTreeMap<String, String> = BTreeMap::new();
    for genres in records.iter().filter_map(|r| r.genres.as_deref()) {
        for g in genres.split(',').map(str::trim).filter(|g| !g.is_empty()) {
            seen.entry(g.to_lowercase()).or_insert_with(|| g.to_string());
        }
    }
    seen.into_values().collect()
}
