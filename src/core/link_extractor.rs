use crate::utils::error::{Result, WallpaperError};
use scraper::{Html, Selector};

pub const DEFAULT_CONTAINER_CLASS: &str = "c-garfield-the-cat";

/// Returns the `href` of every anchor inside the first element carrying
/// `container_class`, in document order.
pub fn extract_links(html: &str, container_class: &str) -> Result<Vec<String>> {
    let container_selector = selector(&format!(".{}", container_class))?;
    let anchor_selector = selector("a[href]")?;

    let document = Html::parse_document(html);
    let container = document
        .select(&container_selector)
        .next()
        .ok_or_else(|| WallpaperError::StructureNotFound {
            container: container_class.to_string(),
        })?;

    let links: Vec<String> = container
        .select(&anchor_selector)
        .filter_map(|a| a.value().attr("href"))
        .map(str::to_string)
        .collect();

    tracing::debug!("Found {} links in .{}", links.len(), container_class);
    Ok(links)
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| WallpaperError::ConfigError {
        field: "source.container_class".to_string(),
        message: format!("invalid selector '{}': {}", css, e),
    })
}
