//! In-memory playlist source for tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use super::{FetchError, ItemPage, PlaylistSource, VideoDuration};
use crate::models::{PlaylistId, VideoId};

/// Serves canned pages and durations, recording every request it receives.
#[derive(Default)]
pub struct MockPlaylistSource {
    pages: Vec<Vec<VideoId>>,
    durations: HashMap<String, Option<String>>,
    title: Option<String>,
    title_fails: bool,
    failing_page: Option<usize>,
    failing_batch: Option<usize>,
    page_tokens: Mutex<Vec<Option<String>>>,
    page_sizes: Mutex<Vec<u32>>,
    batch_sizes: Mutex<Vec<usize>>,
    title_requests: Mutex<u32>,
}

impl MockPlaylistSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, ids: Vec<VideoId>) -> Self {
        self.pages.push(ids);
        self
    }

    pub fn with_duration(mut self, id: &str, encoded: &str) -> Self {
        self.durations
            .insert(id.to_string(), Some(encoded.to_string()));
        self
    }

    pub fn with_missing_duration(mut self, id: &str) -> Self {
        self.durations.insert(id.to_string(), None);
        self
    }

    pub fn with_title(mut self, title: &str) -> Self {
        self.title = Some(title.to_string());
        self
    }

    pub fn failing_title(mut self) -> Self {
        self.title_fails = true;
        self
    }

    /// Fail the listing request for the zero-based page index.
    pub fn failing_page(mut self, index: usize) -> Self {
        self.failing_page = Some(index);
        self
    }

    /// Fail the detail request for the zero-based batch index.
    pub fn failing_batch(mut self, index: usize) -> Self {
        self.failing_batch = Some(index);
        self
    }

    pub fn page_tokens_seen(&self) -> Vec<Option<String>> {
        self.page_tokens.lock().unwrap().clone()
    }

    pub fn page_sizes_seen(&self) -> Vec<u32> {
        self.page_sizes.lock().unwrap().clone()
    }

    pub fn batch_sizes_seen(&self) -> Vec<usize> {
        self.batch_sizes.lock().unwrap().clone()
    }

    pub fn title_requests(&self) -> u32 {
        *self.title_requests.lock().unwrap()
    }

    fn forbidden() -> FetchError {
        FetchError::Upstream {
            status: 403,
            message: "The request cannot be completed because you have exceeded your quota."
                .to_string(),
        }
    }
}

#[async_trait]
impl PlaylistSource for MockPlaylistSource {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn list_items(
        &self,
        _playlist: &PlaylistId,
        page_size: u32,
        page_token: Option<&str>,
    ) -> Result<ItemPage, FetchError> {
        self.page_tokens
            .lock()
            .unwrap()
            .push(page_token.map(str::to_string));
        self.page_sizes.lock().unwrap().push(page_size);

        let index = page_token
            .and_then(|t| t.strip_prefix("page-"))
            .and_then(|n| n.parse::<usize>().ok())
            .unwrap_or(0);

        if self.failing_page == Some(index) {
            return Err(Self::forbidden());
        }

        let Some(ids) = self.pages.get(index) else {
            return Ok(ItemPage::default());
        };

        Ok(ItemPage {
            video_ids: ids.clone(),
            next_page_token: (index + 1 < self.pages.len()).then(|| format!("page-{}", index + 1)),
        })
    }

    async fn video_durations(&self, ids: &[VideoId]) -> Result<Vec<VideoDuration>, FetchError> {
        let batch_index = {
            let mut sizes = self.batch_sizes.lock().unwrap();
            sizes.push(ids.len());
            sizes.len() - 1
        };

        if self.failing_batch == Some(batch_index) {
            return Err(Self::forbidden());
        }

        Ok(ids
            .iter()
            .filter_map(|id| {
                self.durations.get(id.as_str()).map(|d| VideoDuration {
                    video_id: id.clone(),
                    duration: d.clone(),
                })
            })
            .collect())
    }

    async fn playlist_title(&self, _playlist: &PlaylistId) -> Result<Option<String>, FetchError> {
        *self.title_requests.lock().unwrap() += 1;
        if self.title_fails {
            return Err(Self::forbidden());
        }
        Ok(self.title.clone())
    }
}
