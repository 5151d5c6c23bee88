//! In-memory card store.
//!
//! [`CardStore`] owns a card collection seeded from JSON files and answers
//! query-text searches over it. Compiled queries are kept in a bounded cache
//! keyed by query string, so repeated searches skip lexing, parsing and
//! compilation.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use moka::sync::Cache;
use serde::{Deserialize, Serialize};

use crate::error::{QueryError, StoreError};
use crate::fields::FieldTable;
use crate::model::Card;
use crate::search::CompiledQuery;

fn default_file_prefix() -> String {
    "cards".to_string()
}

/// Where a store loads its cards from.
///
/// Every file in `directory` whose name starts with `file_prefix` and ends in
/// `.json` is read as a JSON array of cards, in file-name order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    pub directory: PathBuf,
    #[serde(default = "default_file_prefix")]
    pub file_prefix: String,
}

impl StoreConfig {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        StoreConfig {
            directory: directory.into(),
            file_prefix: default_file_prefix(),
        }
    }

    /// Sets the file-name prefix of card files.
    pub fn with_file_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.file_prefix = prefix.into();
        self
    }

    /// Lists the card files of the configured directory, sorted by name.
    pub fn card_files(&self) -> Result<Vec<PathBuf>, StoreError> {
        let entries = fs::read_dir(&self.directory).map_err(|source| StoreError::Io {
            path: self.directory.clone(),
            source,
        })?;

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| StoreError::Io {
                path: self.directory.clone(),
                source,
            })?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let is_card_file = path
                .file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| name.starts_with(&self.file_prefix) && name.ends_with(".json"));
            if is_card_file {
                files.push(path);
            } else {
                log::debug!("skipping {}: not a card file", path.display());
            }
        }
        files.sort();
        Ok(files)
    }
}

/// An in-memory collection of cards with cached query compilation.
///
/// # Example
///
/// ```
/// use cardseek::{Card, CardStore};
///
/// let store = CardStore::from_cards(vec![
///     Card { game: "OP".into(), rarity: "Common".into(), ..Card::default() },
///     Card { game: "FAB".into(), rarity: "Rare".into(), ..Card::default() },
/// ]);
///
/// let found = store.search("g:op").unwrap();
/// assert_eq!(found.len(), 1);
/// assert_eq!(found[0].rarity, "Common");
/// ```
#[derive(Debug)]
pub struct CardStore {
    cards: Vec<Card>,
    fields: FieldTable,
    cache: Cache<String, Arc<CompiledQuery>>,
}

/// Distinct query strings a store keeps compiled by default.
pub const DEFAULT_CACHE_CAPACITY: u64 = 1024;

fn query_cache(capacity: u64) -> Cache<String, Arc<CompiledQuery>> {
    Cache::builder().max_capacity(capacity.max(1)).build()
}

impl Default for CardStore {
    fn default() -> Self {
        CardStore {
            cards: Vec::new(),
            fields: FieldTable::standard(),
            cache: query_cache(DEFAULT_CACHE_CAPACITY),
        }
    }
}

impl CardStore {
    /// Creates an empty store with the standard field table.
    pub fn new() -> Self {
        CardStore::default()
    }

    /// Creates a store holding the given cards.
    pub fn from_cards(cards: Vec<Card>) -> Self {
        CardStore {
            cards,
            ..CardStore::default()
        }
    }

    /// Replaces the field table used to compile queries.
    ///
    /// Clears the query cache, since cached queries were compiled against
    /// the previous table.
    pub fn with_fields(mut self, fields: FieldTable) -> Self {
        self.fields = fields;
        self.cache.invalidate_all();
        self
    }

    /// Bounds how many compiled queries the store keeps.
    ///
    /// Starts from an empty cache. A capacity of zero is treated as one.
    pub fn with_cache_capacity(mut self, capacity: u64) -> Self {
        self.cache = query_cache(capacity);
        self
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn fields(&self) -> &FieldTable {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Appends cards to the store.
    pub fn extend(&mut self, cards: impl IntoIterator<Item = Card>) {
        self.cards.extend(cards);
    }

    /// Loads every card file described by `config`.
    ///
    /// Returns the number of cards added. Fails on the first file that
    /// cannot be read or decoded; cards from earlier files stay loaded.
    pub fn seed(&mut self, config: &StoreConfig) -> Result<usize, StoreError> {
        let mut added = 0;
        for path in config.card_files()? {
            added += self.load_file(&path)?;
        }
        log::info!(
            "seeded {} cards from {}",
            added,
            config.directory.display()
        );
        Ok(added)
    }

    /// Loads one JSON array of cards and returns how many were added.
    pub fn load_file(&mut self, path: &Path) -> Result<usize, StoreError> {
        let content = fs::read_to_string(path).map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let cards: Vec<Card> =
            serde_json::from_str(&content).map_err(|source| StoreError::Json {
                path: path.to_path_buf(),
                source,
            })?;
        let count = cards.len();
        log::info!("loaded {} cards from {}", count, path.display());
        self.cards.extend(cards);
        Ok(count)
    }

    /// Compiles query text, reusing a cached compilation when one exists.
    pub fn compile(&self, text: &str) -> Result<Arc<CompiledQuery>, QueryError> {
        if let Some(query) = self.cache.get(text) {
            log::trace!("query cache hit: {}", text);
            return Ok(query);
        }

        let query = Arc::new(CompiledQuery::parse_with(text, &self.fields)?);
        self.cache.insert(text.to_string(), Arc::clone(&query));
        Ok(query)
    }

    /// Returns the cards matching `text`, in store order.
    pub fn search(&self, text: &str) -> Result<Vec<&Card>, QueryError> {
        let query = self.compile(text)?;
        Ok(query.filter(&self.cards))
    }

    /// Number of compiled queries currently cached.
    pub fn cached_queries(&self) -> u64 {
        self.cache.run_pending_tasks();
        self.cache.entry_count()
    }
}

impl FromIterator<Card> for CardStore {
    fn from_iter<I: IntoIterator<Item = Card>>(iter: I) -> Self {
        CardStore::from_cards(iter.into_iter().collect())
    }
}
