//! REST client for paginated browse results.

use async_trait::async_trait;
use gloo_net::http::Request;
use gloo_net::http::Response;
use kaguya_api_models::{MediaSummary, Page, ProblemDetails, VoiceActor};

use crate::features::browse::fetch::{FetchError, PageFetcher};
use crate::features::browse::filters::BrowseQuery;
use crate::features::browse::query::build_browse_path;

/// Browser-side REST client.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiClient {
    /// Origin the `/v1` paths are appended to.
    pub base_url: String,
    /// Page size requested on every call.
    pub per_page: u32,
}

impl ApiClient {
    /// Create a client for `base_url`.
    #[must_use]
    pub fn new(base_url: impl Into<String>, per_page: u32) -> Self {
        Self {
            base_url: base_url.into(),
            per_page,
        }
    }

    /// Fetch one voice actor for the detail page.
    ///
    /// # Errors
    /// Returns [`FetchError`] on transport, status or decode failures.
    pub async fn fetch_voice_actor(&self, id: u64) -> Result<VoiceActor, FetchError> {
        let url = format!("{}/v1/voice-actors/{id}", self.base_url.trim_end_matches('/'));
        let response = Request::get(&url)
            .send()
            .await
            .map_err(|err| FetchError::transport(err.to_string()))?;
        let response = ensure_ok(response).await?;
        response
            .json::<VoiceActor>()
            .await
            .map_err(|err| FetchError::decode(err.to_string()))
    }
}

async fn ensure_ok(response: Response) -> Result<Response, FetchError> {
    if response.ok() {
        return Ok(response);
    }
    let status = response.status();
    let detail = match response.json::<ProblemDetails>().await {
        Ok(problem) => problem.detail.unwrap_or(problem.title),
        Err(_) => response.status_text(),
    };
    Err(FetchError::status(status, detail))
}

#[async_trait(?Send)]
impl PageFetcher<MediaSummary> for ApiClient {
    async fn fetch_page(
        &self,
        query: &BrowseQuery,
        page: u32,
    ) -> Result<Page<MediaSummary>, FetchError> {
        let url = format!(
            "{}{}",
            self.base_url.trim_end_matches('/'),
            build_browse_path(query, page, self.per_page)
        );
        let response = Request::get(&url)
            .send()
            .await
            .map_err(|err| FetchError::transport(err.to_string()))?;
        let response = ensure_ok(response).await?;
        response
            .json::<Page<MediaSummary>>()
            .await
            .map_err(|err| FetchError::decode(err.to_string()))
    }
}
