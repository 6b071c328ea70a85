use crate::core::Pipeline;
use crate::domain::model::{ImageLink, RunSummary};
use crate::utils::error::Result;

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    /// Fetches the page and filters it, without downloading any image.
    pub async fn plan(&self) -> Result<Vec<ImageLink>> {
        tracing::info!("🔎 Reading calendar page...");
        let links = self.pipeline.extract().await?;
        tracing::info!("Found {} links on the calendar page", links.len());

        let images = self.pipeline.transform(links).await?;
        tracing::info!("{} images match the requested resolution", images.len());

        Ok(images)
    }

    pub async fn run(&self) -> Result<RunSummary> {
        let images = self.plan().await?;

        tracing::info!("💾 Downloading and saving images...");
        let summary = self.pipeline.load(images).await?;

        if summary.failed.is_empty() {
            tracing::info!("Saved {} images", summary.saved.len());
        } else {
            tracing::warn!(
                "Saved {} images, {} failed",
                summary.saved.len(),
                summary.failed.len()
            );
        }

        Ok(summary)
    }
}
