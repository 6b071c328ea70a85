use crate::core::calendar_url::derive_calendar_url;
use crate::core::fetcher::ImageFetcher;
use crate::core::link_extractor::extract_links;
use crate::core::persister::persist;
use crate::core::resolution_filter::filter_by_resolution;
use crate::core::{ConfigProvider, Pipeline, Storage};
use crate::domain::model::{CalendarRequest, ImageLink, ResolutionToken, RunSummary};
use crate::utils::error::{Result, WallpaperError};
use reqwest::{Client, StatusCode};

pub struct WallpaperPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    client: Client,
    request: CalendarRequest,
    resolution: ResolutionToken,
    page_url: String,
}

impl<S: Storage, C: ConfigProvider> WallpaperPipeline<S, C> {
    pub fn new(
        storage: S,
        config: C,
        request: CalendarRequest,
        resolution: ResolutionToken,
    ) -> Result<Self> {
        let client = Client::builder().user_agent(config.user_agent()).build()?;
        let page_url = derive_calendar_url(config.base_url(), &request);

        Ok(Self {
            storage,
            config,
            client,
            request,
            resolution,
            page_url,
        })
    }

    pub fn page_url(&self) -> &str {
        &self.page_url
    }

    pub fn request(&self) -> &CalendarRequest {
        &self.request
    }

    async fn fetch_page(&self) -> Result<String> {
        tracing::debug!("Requesting calendar page: {}", self.page_url);

        let page_error = |reason: String| WallpaperError::PageUnreachable {
            url: self.page_url.clone(),
            reason,
        };

        let response = self
            .client
            .get(self.page_url.as_str())
            .send()
            .await
            .map_err(|e| page_error(e.to_string()))?;

        let status = response.status();
        tracing::debug!("Calendar page status: {}", status);

        if status != StatusCode::OK {
            return Err(page_error(format!("HTTP {}", status.as_u16())));
        }

        response.text().await.map_err(|e| page_error(e.to_string()))
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for WallpaperPipeline<S, C> {
    async fn extract(&self) -> Result<Vec<String>> {
        let html = self.fetch_page().await?;
        extract_links(&html, self.config.container_class())
    }

    async fn transform(&self, links: Vec<String>) -> Result<Vec<ImageLink>> {
        let images = filter_by_resolution(&links, &self.resolution)?;

        // 相對連結以日曆頁面為基準轉成絕對網址
        match url::Url::parse(&self.page_url) {
            Ok(base) => Ok(images
                .into_iter()
                .map(|image| image.resolve_against(&base))
                .collect()),
            Err(_) => Ok(images),
        }
    }

    async fn load(&self, images: Vec<ImageLink>) -> Result<RunSummary> {
        let matched = images.len();
        let fetcher = ImageFetcher::new(self.client.clone(), self.config.max_concurrent());

        let results = fetcher.fetch_all(images).await;
        let report = persist(&self.storage, results).await;

        tracing::debug!(
            "Saved {} of {} images to {}",
            report.saved.len(),
            matched,
            self.config.output_path()
        );

        Ok(RunSummary {
            page_url: self.page_url.clone(),
            matched,
            saved: report.saved,
            failed: report.failed,
        })
    }
}
