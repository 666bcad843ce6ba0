//! HTTP page fetcher, shared context and the CLI error type.

use std::fmt::{self, Display, Formatter};
use std::time::Duration;

use anyhow::anyhow;
use async_trait::async_trait;
use kaguya_api_models::{MediaSummary, Page, ProblemDetails};
use kaguya_ui::core::settings::BrowseSettings;
use kaguya_ui::features::browse::fetch::{FetchError, FetchErrorKind, PageFetcher};
use kaguya_ui::features::browse::filters::BrowseQuery;
use kaguya_ui::features::browse::query::build_browse_path;
use kaguya_ui::i18n::TranslationBundle;
use reqwest::{Client, Url};
use tracing::debug;

/// CLI-level error type to distinguish validation from operational failures.
#[derive(Debug)]
pub(crate) enum CliError {
    Validation(String),
    Failure(anyhow::Error),
}

/// Convenience alias for functions returning a `CliError`.
pub(crate) type CliResult<T> = Result<T, CliError>;

impl CliError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub(crate) fn failure(error: impl Into<anyhow::Error>) -> Self {
        Self::Failure(error.into())
    }

    pub(crate) const fn exit_code(&self) -> i32 {
        match self {
            Self::Validation(_) => 2,
            Self::Failure(_) => 3,
        }
    }

    pub(crate) fn display_message(&self) -> String {
        match self {
            Self::Validation(message) => message.clone(),
            Self::Failure(error) => format!("{error:#}"),
        }
    }
}

impl Display for CliError {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str("cli error")
    }
}

impl std::error::Error for CliError {}

/// Everything a command handler needs.
#[derive(Clone, Debug)]
pub(crate) struct AppContext {
    pub(crate) client: Client,
    pub(crate) base_url: Url,
    pub(crate) web_url: Option<Url>,
    pub(crate) settings: BrowseSettings,
    pub(crate) bundle: TranslationBundle,
}

impl AppContext {
    /// Build the HTTP client with the configured timeout.
    pub(crate) fn new(
        base_url: Url,
        web_url: Option<Url>,
        timeout_secs: u64,
        settings: BrowseSettings,
        bundle: TranslationBundle,
    ) -> CliResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|err| CliError::failure(anyhow!("failed to build HTTP client: {err}")))?;
        Ok(Self {
            client,
            base_url,
            web_url,
            settings,
            bundle,
        })
    }
}

/// Page fetcher backed by the REST browse endpoint.
#[derive(Clone, Debug)]
pub(crate) struct HttpFetcher {
    client: Client,
    base_url: Url,
    per_page: u32,
}

impl HttpFetcher {
    pub(crate) fn new(ctx: &AppContext) -> Self {
        Self {
            client: ctx.client.clone(),
            base_url: ctx.base_url.clone(),
            per_page: ctx.settings.per_page,
        }
    }
}

#[async_trait(?Send)]
impl PageFetcher<MediaSummary> for HttpFetcher {
    async fn fetch_page(
        &self,
        query: &BrowseQuery,
        page: u32,
    ) -> Result<Page<MediaSummary>, FetchError> {
        let url = self
            .base_url
            .join(&build_browse_path(query, page, self.per_page))
            .map_err(|err| FetchError::transport(format!("invalid base URL: {err}")))?;
        debug!(%url, "requesting browse page");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|err| FetchError::transport(err.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            let bytes = response.bytes().await.map_err(|err| {
                FetchError::status(status.as_u16(), format!("failed to read error body: {err}"))
            })?;
            let detail = serde_json::from_slice::<ProblemDetails>(&bytes).map_or_else(
                |_| String::from_utf8_lossy(&bytes).trim().to_string(),
                |problem| problem.detail.unwrap_or(problem.title),
            );
            let detail = if detail.is_empty() {
                format!("request failed with status {status}")
            } else {
                detail
            };
            return Err(FetchError::status(status.as_u16(), detail));
        }
        response
            .json::<Page<MediaSummary>>()
            .await
            .map_err(|err| FetchError::decode(err.to_string()))
    }
}

/// Parse a URL flag.
pub(crate) fn parse_url(input: &str) -> Result<Url, String> {
    input
        .parse::<Url>()
        .map_err(|err| format!("invalid URL '{input}': {err}"))
}

/// Map a failed page fetch onto the CLI exit-code classes.
pub(crate) fn classify_fetch_error(err: &FetchError) -> CliError {
    match (err.kind, err.status) {
        (FetchErrorKind::Status, Some(400 | 409 | 422)) => CliError::validation(err.message.clone()),
        (FetchErrorKind::Status, Some(status)) => {
            CliError::failure(anyhow!("{} (status {status})", err.message))
        }
        _ => CliError::failure(anyhow!("{err}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use kaguya_ui::i18n::LocaleCode;
    use serde_json::json;

    fn context_with(server: &MockServer) -> AppContext {
        AppContext::new(
            server.base_url().parse().expect("valid URL"),
            None,
            5,
            BrowseSettings::default(),
            TranslationBundle::new(LocaleCode::En),
        )
        .expect("client builds")
    }

    #[test]
    fn exit_codes_follow_error_class() {
        assert_eq!(CliError::validation("bad flag").exit_code(), 2);
        assert_eq!(CliError::failure(anyhow!("boom")).exit_code(), 3);
        assert_eq!(
            CliError::failure(anyhow!("outer")).display_message(),
            "outer".to_string()
        );
    }

    #[test]
    fn fetch_errors_are_classified_by_status() {
        let err = classify_fetch_error(&FetchError::status(422, "unknown genre"));
        assert!(matches!(err, CliError::Validation(message) if message == "unknown genre"));
        let err = classify_fetch_error(&FetchError::status(503, "maintenance"));
        assert_eq!(err.exit_code(), 3);
        assert!(err.display_message().contains("status 503"));
        assert_eq!(classify_fetch_error(&FetchError::transport("refused")).exit_code(), 3);
    }

    #[tokio::test]
    async fn fetch_page_requests_the_browse_path() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/v1/browse")
                .query_param("type", "anime")
                .query_param("season", "FALL")
                .query_param("sort", "average_score")
                .query_param("page", "2")
                .query_param("perPage", "30");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!({"data": [], "page": 2, "has_next_page": false}));
        });

        let fetcher = HttpFetcher::new(&context_with(&server));
        let page = fetcher
            .fetch_page(&BrowseQuery::default(), 2)
            .await
            .expect("page should decode");
        mock.assert();
        assert_eq!(page.page, 2);
        assert!(page.data.is_empty());
    }

    #[tokio::test]
    async fn fetch_page_surfaces_problem_details() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/v1/browse");
            then.status(422)
                .header("content-type", "application/json")
                .json_body(json!({
                    "type": "about:blank",
                    "title": "invalid filter",
                    "status": 422,
                    "detail": "unknown tag"
                }));
        });

        let fetcher = HttpFetcher::new(&context_with(&server));
        let err = fetcher
            .fetch_page(&BrowseQuery::default(), 1)
            .await
            .expect_err("status error expected");
        assert_eq!(err.kind, FetchErrorKind::Status);
        assert_eq!(err.status, Some(422));
        assert_eq!(err.message, "unknown tag");
    }

    #[tokio::test]
    async fn fetch_page_falls_back_to_the_status_for_empty_error_bodies() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/v1/browse");
            then.status(502);
        });

        let fetcher = HttpFetcher::new(&context_with(&server));
        let err = fetcher
            .fetch_page(&BrowseQuery::default(), 1)
            .await
            .expect_err("status error expected");
        assert_eq!(err.kind, FetchErrorKind::Status);
        assert_eq!(err.status, Some(502));
        assert!(err.message.contains("502"));
    }

    #[tokio::test]
    async fn fetch_page_reports_undecodable_bodies() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/v1/browse");
            then.status(200)
                .header("content-type", "application/json")
                .body("not json");
        });

        let fetcher = HttpFetcher::new(&context_with(&server));
        let err = fetcher
            .fetch_page(&BrowseQuery::default(), 1)
            .await
            .expect_err("decode error expected");
        assert_eq!(err.kind, FetchErrorKind::Decode);
    }
}
