pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use config::{cli::LocalStorage, AppConfig};

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use core::{etl::EtlEngine, pipeline::WallpaperPipeline};
pub use domain::model::{CalendarRequest, ImageLink, ResolutionToken, RunSummary};
pub use utils::error::{Result, WallpaperError};
