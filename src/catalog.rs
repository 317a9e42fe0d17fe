use std::path::Path;

use anyhow::Result;
use tracing::info;

use crate::model::MovieRecord;
use crate::store;
use crate::view::{compute_view, GenreFilter, SortOrder};

pub const DEFAULT_COLLECTIONS_DIR: &str = "json_tmp";
pub const DEFAULT_COLLECTION: &str = "movies_halloween.json";

/// The records of one collection file. Never edited after loading.
#[derive(Debug, Clone)]
pub struct Catalog {
    collection: String,
    records: Vec<MovieRecord>,
}

impl Catalog {
    pub fn new(collection: impl Into<String>, records: Vec<MovieRecord>) -> Self {
        Self {
            collection: collection.into(),
            records,
        }
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    pub fn records(&self) -> &[MovieRecord] {
        &self.records
    }

    /// Whole collection in file order, as shown right after a switch.
    pub fn default_view(&self) -> Vec<&MovieRecord> {
        self.records.iter().collect()
    }

    /// View for the current selectors. Only the unfiltered, unsorted view
    /// keeps file order; any genre filter sorts by year, ascending unless
    /// told otherwise.
    pub fn view(&self, genre: &GenreFilter, sort: Option<SortOrder>) -> Vec<&MovieRecord> {
        match (genre, sort) {
            (GenreFilter::All, None) => self.default_view(),
            (_, sort) => {
                compute_view(&self.records, genre, sort.unwrap_or(SortOrder::YearAsc))
            }
        }
    }
}

/// Browsing state: nothing loaded yet, or one collection.
#[derive(Debug, Clone, Default)]
pub enum AppState {
    #[default]
    Unloaded,
    Loaded(Catalog),
}

impl AppState {
    /// Load `collection` from `dir` and return the new state.
    ///
    /// `self` is left as it was if the file can't be read or parsed, so a
    /// caller holding the old state keeps showing it.
    pub fn switch_collection(&self, dir: &Path, collection: &str) -> Result<AppState> {
        let records = store::read_collection(&dir.join(collection))?;
        info!("Loaded {} movies from {}", records.len(), collection);
        Ok(AppState::Loaded(Catalog::new(collection, records)))
    }

    pub fn catalog(&self) -> Option<&Catalog> {
        match self {
            AppState::Unloaded => None,
            AppState::Loaded(c) => Some(c),
        }
    }

    pub fn view(&self, genre: &GenreFilter, sort: Option<SortOrder>) -> Vec<&MovieRecord> {
        self.catalog()
            .map(|c| c.view(genre, sort))
            .unwrap_or_default()
    }
}
