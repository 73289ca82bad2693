use std::path::Path;

use anyhow::Result;

use crate::client::BoxedSearchApi;
use crate::error::{PreviewLoadError, SearchError, ValidationError};
use crate::input::{self, ImageInput};
use crate::models::{Product, SearchResult};
use crate::store::{FilterCriterion, ResultStore};

/// Mutually exclusive presentation states. One search cycle runs
/// `Loading -> Results | NoResults | Error` and is re-entrant on the next
/// search.
#[derive(Debug, Clone, PartialEq)]
pub enum UiState {
    /// No search has been triggered yet
    Idle,
    /// A request is in flight
    Loading,
    /// The last search returned at least one product
    Results,
    /// The last search completed with zero products
    NoResults,
    /// The last search failed with a message to show
    Error(String),
}

/// Owns what the original front-end kept in globals: the selected image,
/// the last result, the active filter and the UI state. All mutation goes
/// through the command methods.
pub struct Controller {
    api: BoxedSearchApi,
    store: ResultStore,
    state: UiState,
    selected: Option<ImageInput>,
    filter: Option<FilterCriterion>,
}

impl Controller {
    pub fn new(api: BoxedSearchApi) -> Self {
        Self {
            api,
            store: ResultStore::new(),
            state: UiState::Idle,
            selected: None,
            filter: None,
        }
    }

    pub fn state(&self) -> &UiState {
        &self.state
    }

    pub fn selected(&self) -> Option<&ImageInput> {
        self.selected.as_ref()
    }

    /// The product view under the active filter. `None` until a search has
    /// completed.
    pub fn view(&self) -> Option<Vec<&Product>> {
        self.store.current_view(self.filter)
    }

    /// Select a local image file. Validation failures are inline and leave
    /// both the UI state and the previous selection untouched.
    pub fn on_select_file(&mut self, path: &Path) -> Result<&ImageInput> {
        let image = input::read_file(path)?;

        log::info!("Selected image file {}", image.source_ref());
        Ok(self.selected.insert(image))
    }

    /// Select a remote image URL. Pure validation, no network.
    pub fn on_select_url(&mut self, raw: &str) -> Result<&ImageInput, ValidationError> {
        let image = input::validate_url(raw)?;

        log::info!("Selected image URL {}", image.source_ref());
        Ok(self.selected.insert(image))
    }

    /// Confirm that a selected URL actually serves an image before showing
    /// its preview. A failure clears the selection, the way the original
    /// cleared the URL input.
    pub async fn load_preview(&mut self) -> Result<(), PreviewLoadError> {
        let Some(ImageInput::Url { url }) = &self.selected else {
            return Ok(());
        };

        if let Err(e) = self.api.probe_image_url(url).await {
            log::warn!("Preview failed for {}: {}", url, e);
            self.selected = None;
            return Err(e);
        }

        Ok(())
    }

    /// Run one search cycle against the API and land in a terminal state,
    /// which is also returned. A second search while one is in flight is
    /// rejected outright instead of relying on the caller to disable its
    /// trigger.
    pub async fn on_search(&mut self) -> Result<UiState, SearchError> {
        if self.state == UiState::Loading {
            return Err(SearchError::Busy);
        }

        let image = self.selected.clone().ok_or(SearchError::NothingSelected)?;

        self.state = UiState::Loading;

        match self.api.search(&image).await {
            Ok(products) => {
                let result = SearchResult::new(products, image);

                self.state = if result.is_empty() {
                    UiState::NoResults
                } else {
                    UiState::Results
                };

                log::info!(
                    "Search for {} found {} products",
                    result.origin.source_ref(),
                    result.products.len()
                );
                self.store.set_result(result);
            }
            Err(e) => {
                log::error!("Search error: {}", e);
                self.state = UiState::Error(e.to_string());
            }
        }

        Ok(self.state.clone())
    }

    /// Change the active filter. Purely derives a new view, the stored
    /// result is untouched.
    pub fn on_filter_change(&mut self, criterion: Option<FilterCriterion>) -> Option<Vec<&Product>> {
        self.filter = criterion;
        self.view()
    }

    #[cfg(test)]
    pub(crate) fn force_state(&mut self, state: UiState) {
        self.state = state;
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use reqwest::Url;

    use super::*;
    use crate::client::SearchApi;

    /// A search against a stub with no queued response panics, so every
    /// test doubles as a "no request was sent" check.
    #[derive(Default)]
    struct StubApi {
        response: Mutex<Option<Result<Vec<Product>, SearchError>>>,
        probe_failure: Option<PreviewLoadError>,
    }

    impl StubApi {
        fn respond_with(response: Result<Vec<Product>, SearchError>) -> Self {
            Self {
                response: Mutex::new(Some(response)),
                ..Default::default()
            }
        }
    }

    #[async_trait]
    impl SearchApi for StubApi {
        async fn search(&self, _image: &ImageInput) -> Result<Vec<Product>, SearchError> {
            self.response
                .lock()
                .unwrap()
                .take()
                .expect("no stubbed response left")
        }

        async fn probe_image_url(&self, _url: &Url) -> Result<(), PreviewLoadError> {
            match &self.probe_failure {
                Some(e) => Err(e.clone()),
                None => Ok(()),
            }
        }

        async fn list_products(&self) -> Result<Vec<Product>, SearchError> {
            Ok(vec![])
        }
    }

    fn product(score: f32) -> Product {
        Product {
            name: String::from("Canvas Sneakers"),
            category: String::from("Footwear"),
            price: 49.99,
            similarity_score: score,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_malformed_url_sends_nothing() {
        let mut controller = Controller::new(Box::new(StubApi::default()));

        let err = controller.on_select_url("not a url").unwrap_err();
        assert!(matches!(err, ValidationError::MalformedUrl(_)));
        assert_eq!(controller.state(), &UiState::Idle);
        assert!(controller.selected().is_none());

        let err = controller.on_search().await.unwrap_err();
        assert!(matches!(err, SearchError::NothingSelected));
    }

    #[tokio::test]
    async fn test_search_with_results() {
        let api = StubApi::respond_with(Ok(vec![product(0.9), product(0.5)]));
        let mut controller = Controller::new(Box::new(api));

        controller.on_select_url("https://example.com/q.jpg").unwrap();
        let state = controller.on_search().await.unwrap();

        assert_eq!(state, UiState::Results);
        assert_eq!(controller.view().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_empty_search_is_no_results() {
        let api = StubApi::respond_with(Ok(vec![]));
        let mut controller = Controller::new(Box::new(api));

        controller.on_select_url("https://example.com/q.jpg").unwrap();
        let state = controller.on_search().await.unwrap();

        assert_eq!(state, UiState::NoResults);
        // A completed empty search is observable, unlike no search at all.
        assert_eq!(controller.view(), Some(vec![]));
    }

    #[tokio::test]
    async fn test_search_failure_lands_in_error() {
        let api = StubApi::respond_with(Err(SearchError::Api(String::from("No file selected"))));
        let mut controller = Controller::new(Box::new(api));

        controller.on_select_url("https://example.com/q.jpg").unwrap();
        let state = controller.on_search().await.unwrap();

        assert_eq!(state, UiState::Error(String::from("No file selected")));
        assert_eq!(controller.view(), None);
    }

    #[tokio::test]
    async fn test_in_flight_guard() {
        let api = StubApi::respond_with(Ok(vec![product(0.9)]));
        let mut controller = Controller::new(Box::new(api));
        controller.on_select_url("https://example.com/q.jpg").unwrap();

        controller.force_state(UiState::Loading);
        let err = controller.on_search().await.unwrap_err();
        assert!(matches!(err, SearchError::Busy));

        // Terminal states are re-entrant.
        controller.force_state(UiState::Error(String::from("x")));
        assert_eq!(controller.on_search().await.unwrap(), UiState::Results);
    }

    #[tokio::test]
    async fn test_filter_change_derives_view_without_mutation() {
        let api = StubApi::respond_with(Ok(vec![product(0.9), product(0.5), product(0.8)]));
        let mut controller = Controller::new(Box::new(api));

        controller.on_select_url("https://example.com/q.jpg").unwrap();
        controller.on_search().await.unwrap();

        let filtered = controller
            .on_filter_change(Some(FilterCriterion::MinSimilarity(0.8)))
            .unwrap();
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].similarity_score, 0.9);

        let full = controller.on_filter_change(None).unwrap();
        assert_eq!(full.len(), 3);
    }

    #[tokio::test]
    async fn test_preview_failure_clears_selection() {
        let api = StubApi {
            probe_failure: Some(PreviewLoadError(String::from("404 Not Found"))),
            ..Default::default()
        };
        let mut controller = Controller::new(Box::new(api));

        controller.on_select_url("https://example.com/gone.jpg").unwrap();
        assert!(controller.load_preview().await.is_err());
        assert!(controller.selected().is_none());
    }

    #[tokio::test]
    async fn test_selection_replaced_wholesale() {
        let mut controller = Controller::new(Box::new(StubApi::default()));

        controller.on_select_url("https://example.com/a.jpg").unwrap();
        controller.on_select_url("https://example.com/b.jpg").unwrap();

        assert_eq!(
            controller.selected().unwrap().source_ref(),
            "https://example.com/b.jpg"
        );
    }
}
