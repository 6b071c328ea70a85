pub mod calendar_url;
pub mod etl;
pub mod fetcher;
pub mod link_extractor;
pub mod persister;
pub mod pipeline;
pub mod resolution_filter;

pub use crate::domain::model::{FetchResult, ImageLink, RunSummary};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
