use crate::domain::model::{ImageLink, ResolutionToken};
use crate::utils::error::{Result, WallpaperError};

/// Keeps links containing the literal resolution token (case-sensitive).
pub fn filter_by_resolution<S: AsRef<str>>(
    links: &[S],
    token: &ResolutionToken,
) -> Result<Vec<ImageLink>> {
    let images: Vec<ImageLink> = links
        .iter()
        .map(AsRef::as_ref)
        .filter(|href| href.contains(token.as_str()))
        .map(ImageLink::new)
        .collect();

    if images.is_empty() {
        return Err(WallpaperError::NoMatchingResolution {
            resolution: token.to_string(),
        });
    }

    tracing::debug!(
        "{} of {} links match {}",
        images.len(),
        links.len(),
        token
    );
    Ok(images)
}
