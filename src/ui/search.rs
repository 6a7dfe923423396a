use tracing::warn;

use crate::movies::{Lookup, MovieSource, SearchResult};
use crate::storage::{LocalStorage, StorageResult};

use super::favorites::Favorites;

pub const EMPTY_QUERY_MESSAGE: &str = "Please enter a movie name";
pub const NO_RESULTS_MESSAGE: &str = "No movies found";
pub const SEARCH_FAILED_MESSAGE: &str =
    "Unable to fetch movies. Please check your connection and try again.";
pub const FAVORITES_FAILED_MESSAGE: &str = "Unable to update favorites. Please try again.";

/// The views only ever ask for the first page.
pub const SEARCH_PAGE: u32 = 1;

/// State behind the search page.
#[derive(Debug, Default)]
pub struct SearchView {
    query: String,
    movies: Vec<SearchResult>,
    /// Set only while `submit` awaits the lookup.
    loading: bool,
    error: Option<String>,
    has_searched: bool,
    favorites: Favorites,
}

impl SearchView {
    pub fn new(favorites: Favorites) -> Self {
        Self {
            favorites,
            ..Default::default()
        }
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// Puts back a result list the page was already showing, without a new
    /// lookup.
    pub fn restore(&mut self, query: impl Into<String>, movies: Vec<SearchResult>) {
        self.query = query.into();
        self.has_searched = !self.query.trim().is_empty();
        self.movies = movies;
    }

    pub fn show_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    /// Runs one search for the current query. A blank query only sets the
    /// validation message.
    pub async fn submit(&mut self, source: &dyn MovieSource) {
        let query = self.query.clone();
        if query.trim().is_empty() {
            self.error = Some(EMPTY_QUERY_MESSAGE.to_string());
            return;
        }

        self.loading = true;
        self.error = None;
        self.movies.clear();
        self.has_searched = true;

        match source.search(&query, SEARCH_PAGE).await {
            Ok(Lookup::Found(page)) => self.movies = page.results,
            Ok(Lookup::NotFound(message)) => {
                self.error = Some(message.unwrap_or_else(|| NO_RESULTS_MESSAGE.to_string()));
                self.movies.clear();
            }
            Err(e) => {
                warn!(query = %query, "search failed: {}", e);
                self.error = Some(SEARCH_FAILED_MESSAGE.to_string());
            }
        }

        self.loading = false;
    }

    /// Flips favorite membership and writes the whole list back to storage.
    /// If the write fails the flip is undone.
    pub async fn toggle_favorite(
        &mut self,
        movie: SearchResult,
        storage: &dyn LocalStorage,
    ) -> StorageResult<bool> {
        let now_favorite = self.favorites.toggle(movie.clone());
        if let Err(e) = self.favorites.persist(storage).await {
            self.favorites.toggle(movie);
            return Err(e);
        }
        Ok(now_favorite)
    }

    /// Toggles a movie shown on the page, looked up among the results and
    /// then the favorites. `None` when the id is on neither list.
    pub async fn toggle_favorite_by_id(
        &mut self,
        imdb_id: &str,
        storage: &dyn LocalStorage,
    ) -> StorageResult<Option<bool>> {
        let movie = self
            .movies
            .iter()
            .find(|movie| movie.imdb_id == imdb_id)
            .or_else(|| self.favorites.find(imdb_id))
            .cloned();

        match movie {
            Some(movie) => self.toggle_favorite(movie, storage).await.map(Some),
            None => Ok(None),
        }
    }

    pub fn is_favorite(&self, imdb_id: &str) -> bool {
        self.favorites.contains(imdb_id)
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn movies(&self) -> &[SearchResult] {
        &self.movies
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn has_searched(&self) -> bool {
        self.has_searched
    }

    pub fn favorites(&self) -> &Favorites {
        &self.favorites
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::movies::fake::{movie, page, FakeSource};
    use crate::storage::MemoryStorage;
    use crate::ui::favorites::FAVORITES_KEY;

    #[tokio::test]
    async fn test_blank_query_never_requests() {
        let source = FakeSource::with_search(Lookup::Found(page(vec![movie("tt1", "One")])));

        for query in ["", "   ", "\t\n"] {
            let mut view = SearchView::default();
            view.set_query(query);
            view.submit(&source).await;
            assert_eq!(view.error(), Some(EMPTY_QUERY_MESSAGE));
            assert!(!view.has_searched());
        }
        assert!(source.calls().is_empty());
    }

    #[tokio::test]
    async fn test_found_results() {
        let source = FakeSource::with_search(Lookup::Found(page(vec![
            movie("tt1", "One"),
            movie("tt2", "Two"),
        ])));

        let mut view = SearchView::default();
        view.set_query("batman ");
        view.submit(&source).await;

        assert_eq!(source.calls(), vec!["search:batman :1"]);
        assert_eq!(view.movies().len(), 2);
        assert_eq!(view.error(), None);
        assert!(!view.is_loading());
        assert!(view.has_searched());
    }

    #[tokio::test]
    async fn test_not_found_clears_results() {
        let found = FakeSource::with_search(Lookup::Found(page(vec![movie("tt1", "One")])));
        let mut view = SearchView::default();
        view.set_query("one");
        view.submit(&found).await;
        assert_eq!(view.movies().len(), 1);

        let missing = FakeSource::with_search(Lookup::NotFound(Some("Movie not found!".into())));
        view.submit(&missing).await;
        assert!(view.movies().is_empty());
        assert_eq!(view.error(), Some("Movie not found!"));

        let silent = FakeSource::with_search(Lookup::NotFound(None));
        view.submit(&silent).await;
        assert_eq!(view.error(), Some(NO_RESULTS_MESSAGE));
    }

    #[tokio::test]
    async fn test_transport_failure() {
        let source = FakeSource::default();
        let mut view = SearchView::default();
        view.set_query("batman");
        view.submit(&source).await;

        assert_eq!(view.error(), Some(SEARCH_FAILED_MESSAGE));
        assert!(view.movies().is_empty());
        assert!(!view.is_loading());
    }

    #[tokio::test]
    async fn test_toggle_favorite_persists() {
        let storage = MemoryStorage::new();
        let mut view = SearchView::new(Favorites::load(&storage).await);

        assert!(view.toggle_favorite(movie("tt1", "One"), &storage).await.unwrap());
        assert!(view.is_favorite("tt1"));
        assert_eq!(Favorites::load(&storage).await, *view.favorites());

        assert!(!view.toggle_favorite(movie("tt1", "One"), &storage).await.unwrap());
        assert!(!view.is_favorite("tt1"));
        assert_eq!(
            storage.get_item(FAVORITES_KEY).await.unwrap().as_deref(),
            Some("[]")
        );
    }

    #[tokio::test]
    async fn test_toggle_by_id_from_restored_results() {
        let storage = MemoryStorage::new();
        let mut view = SearchView::new(Favorites::default());
        view.restore("batman", vec![movie("tt1", "One"), movie("tt2", "Two")]);
        assert!(view.has_searched());

        assert_eq!(view.toggle_favorite_by_id("tt2", &storage).await.unwrap(), Some(true));
        assert_eq!(view.toggle_favorite_by_id("tt9", &storage).await.unwrap(), None);
        assert_eq!(view.movies().len(), 2);

        let mut view = SearchView::new(Favorites::load(&storage).await);
        view.restore("", Vec::new());
        assert!(!view.has_searched());
        assert_eq!(view.toggle_favorite_by_id("tt2", &storage).await.unwrap(), Some(false));
        assert!(Favorites::load(&storage).await.is_empty());
    }

    #[tokio::test]
    async fn test_failed_write_undoes_toggle() {
        let storage = ReadOnlyStorage;
        let mut view = SearchView::default();
        assert!(view.toggle_favorite(movie("tt1", "One"), &storage).await.is_err());
        assert!(!view.is_favorite("tt1"));
    }

    struct ReadOnlyStorage;

    #[async_trait::async_trait]
    impl LocalStorage for ReadOnlyStorage {
        async fn get_item(&self, _key: &str) -> StorageResult<Option<String>> {
            Ok(None)
        }

        async fn set_item(&self, _key: &str, _value: &str) -> StorageResult<()> {
            Err(crate::storage::StorageError::Sqlx(sqlx::Error::PoolClosed))
        }
    }
}
