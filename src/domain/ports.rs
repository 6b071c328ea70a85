use crate::domain::model::{ImageLink, RunSummary};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn base_url(&self) -> &str;
    fn container_class(&self) -> &str;
    fn output_path(&self) -> &str;
    fn user_agent(&self) -> &str;
    /// 0 表示不限制同時下載數
    fn max_concurrent(&self) -> usize;
}

/// extract: calendar page -> hrefs, transform: hrefs -> matching images,
/// load: download and save the images.
#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<String>>;
    async fn transform(&self, links: Vec<String>) -> Result<Vec<ImageLink>>;
    async fn load(&self, images: Vec<ImageLink>) -> Result<RunSummary>;
}
