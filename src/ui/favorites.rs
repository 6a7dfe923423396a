use tracing::warn;

use crate::movies::SearchResult;
use crate::storage::{LocalStorage, StorageResult};

pub const FAVORITES_KEY: &str = "favorites";

/// Favorited search results in insertion order, at most one entry per
/// `imdbID`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Favorites {
    items: Vec<SearchResult>,
}

impl Favorites {
    /// Reads the list from storage for display. A missing, unreadable or
    /// unparsable entry yields an empty list.
    pub async fn load(storage: &dyn LocalStorage) -> Self {
        match Self::try_load(storage).await {
            Ok(favorites) => favorites,
            Err(e) => {
                warn!("Failed to read favorites: {}", e);
                Self::default()
            }
        }
    }

    /// Like `load`, but a storage failure is returned instead of being read
    /// as an empty list. Anything that writes the list back must use this.
    pub async fn try_load(storage: &dyn LocalStorage) -> StorageResult<Self> {
        let Some(raw) = storage.get_item(FAVORITES_KEY).await? else {
            return Ok(Self::default());
        };

        match serde_json::from_str::<Vec<SearchResult>>(&raw) {
            Ok(items) => Ok(Self::from_items(items)),
            Err(e) => {
                warn!("Ignoring unparsable favorites: {}", e);
                Ok(Self::default())
            }
        }
    }

    fn from_items(items: Vec<SearchResult>) -> Self {
        let mut favorites = Self::default();
        for item in items {
            if !favorites.contains(&item.imdb_id) {
                favorites.items.push(item);
            }
        }
        favorites
    }

    pub async fn persist(&self, storage: &dyn LocalStorage) -> StorageResult<()> {
        let raw = serde_json::to_string(&self.items)?;
        storage.set_item(FAVORITES_KEY, &raw).await
    }

    pub fn find(&self, imdb_id: &str) -> Option<&SearchResult> {
        self.items.iter().find(|fav| fav.imdb_id == imdb_id)
    }

    pub fn contains(&self, imdb_id: &str) -> bool {
        self.items.iter().any(|fav| fav.imdb_id == imdb_id)
    }

    /// Adds the movie if absent, removes it otherwise. Returns whether the
    /// movie is a favorite afterwards.
    pub fn toggle(&mut self, movie: SearchResult) -> bool {
        if self.contains(&movie.imdb_id) {
            self.items.retain(|fav| fav.imdb_id != movie.imdb_id);
            false
        } else {
            self.items.push(movie);
            true
        }
    }

    pub fn items(&self) -> &[SearchResult] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::movies::fake::movie;
    use crate::storage::{FailingStorage, MemoryStorage};

    #[test]
    fn test_toggle_adds_once_then_removes() {
        let mut favorites = Favorites::default();

        assert!(favorites.toggle(movie("tt1", "One")));
        assert!(favorites.toggle(movie("tt2", "Two")));
        assert_eq!(favorites.len(), 2);
        assert!(favorites.contains("tt1"));

        assert!(!favorites.toggle(movie("tt1", "One")));
        assert_eq!(favorites.len(), 1);
        assert!(!favorites.contains("tt1"));
        assert_eq!(favorites.items()[0].imdb_id, "tt2");
    }

    #[tokio::test]
    async fn test_load_missing_and_corrupt() {
        let storage = MemoryStorage::new();
        assert!(Favorites::load(&storage).await.is_empty());

        storage.set_item(FAVORITES_KEY, "not json").await.unwrap();
        assert!(Favorites::load(&storage).await.is_empty());
    }

    #[tokio::test]
    async fn test_try_load_reports_read_errors() {
        let storage = FailingStorage::default();
        assert!(Favorites::try_load(&storage).await.is_err());
        assert!(Favorites::load(&storage).await.is_empty());
    }

    #[tokio::test]
    async fn test_persist_and_load_dedups() {
        let storage = MemoryStorage::new();
        let mut favorites = Favorites::default();
        favorites.toggle(movie("tt1", "One"));
        favorites.persist(&storage).await.unwrap();

        let raw = storage.get_item(FAVORITES_KEY).await.unwrap().unwrap();
        assert!(raw.contains("\"imdbID\":\"tt1\""));
        assert_eq!(Favorites::load(&storage).await, favorites);

        let doubled = serde_json::to_string(&vec![movie("tt1", "One"), movie("tt1", "One")]).unwrap();
        storage.set_item(FAVORITES_KEY, &doubled).await.unwrap();
        assert_eq!(Favorites::load(&storage).await.len(), 1);
    }
}
