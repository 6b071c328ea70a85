pub mod cli;
pub mod toml_config;

use crate::core::calendar_url::DEFAULT_BASE_URL;
use crate::core::link_extractor::DEFAULT_CONTAINER_CLASS;
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_non_empty_string, validate_path, validate_url, Validate};
use serde::{Deserialize, Serialize};

#[cfg(feature = "cli")]
use crate::domain::model::{CalendarRequest, ResolutionToken};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use std::str::FromStr;

/// Settings after merging defaults, the optional TOML file and CLI flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    pub base_url: String,
    pub container_class: String,
    pub output_path: String,
    pub user_agent: String,
    pub max_concurrent: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            container_class: DEFAULT_CONTAINER_CLASS.to_string(),
            output_path: ".".to_string(),
            user_agent: concat!("smashing-wallpapers/", env!("CARGO_PKG_VERSION")).to_string(),
            max_concurrent: 0,
        }
    }
}

impl ConfigProvider for AppConfig {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn container_class(&self) -> &str {
        &self.container_class
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn user_agent(&self) -> &str {
        &self.user_agent
    }

    fn max_concurrent(&self) -> usize {
        self.max_concurrent
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        validate_url("source.base_url", &self.base_url)?;
        validate_non_empty_string("source.container_class", &self.container_class)?;
        validate_non_empty_string("source.user_agent", &self.user_agent)?;
        validate_path("output.directory", &self.output_path)?;
        Ok(())
    }
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "smashing-wallpapers")]
#[command(about = "Download Smashing Magazine desktop wallpaper calendars", version)]
pub struct CliConfig {
    /// Publication month, MMYYYY (e.g. 042020)
    #[arg(value_parser = CalendarRequest::from_str)]
    pub date: CalendarRequest,

    /// Image resolution, WxH (e.g. 1920x1080)
    #[arg(value_parser = ResolutionToken::from_str)]
    pub resolution: ResolutionToken,

    /// Path to TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Directory the images are written to
    #[arg(short, long)]
    pub output_dir: Option<String>,

    /// Maximum simultaneous downloads (0 = no limit)
    #[arg(long)]
    pub max_concurrent: Option<usize>,

    /// Site root the calendar URL is built from
    #[arg(long)]
    pub base_url: Option<String>,

    /// List matching images without downloading them
    #[arg(long)]
    pub dry_run: bool,

    /// Print the run summary as JSON
    #[arg(long)]
    pub json: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// 預設值 < 設定檔 < 命令列參數
    pub fn app_config(&self) -> Result<AppConfig> {
        let mut config = AppConfig::default();

        if let Some(path) = &self.config {
            tracing::info!("📁 Loading configuration from: {}", path);
            toml_config::TomlConfig::from_file(path)?.apply_to(&mut config);
        }

        if let Some(base_url) = &self.base_url {
            config.base_url = base_url.clone();
        }
        if let Some(output_dir) = &self.output_dir {
            config.output_path = output_dir.clone();
        }
        if let Some(max_concurrent) = self.max_concurrent {
            config.max_concurrent = max_concurrent;
        }

        Ok(config)
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_positional_arguments() {
        let cli = CliConfig::try_parse_from(["smashing-wallpapers", "042020", "1280x1024"]).unwrap();

        assert_eq!(cli.date, CalendarRequest { year: 2020, month: 4 });
        assert_eq!(cli.resolution.as_str(), "1280x1024");
        assert!(!cli.dry_run);
        assert_eq!(cli.app_config().unwrap(), AppConfig::default());
    }

    #[test]
    fn test_reject_malformed_arguments() {
        for args in [
            ["smashing-wallpapers", "42020", "1280x1024"],
            ["smashing-wallpapers", "132020", "1280x1024"],
            ["smashing-wallpapers", "042020", "1280*1024"],
            ["smashing-wallpapers", "042020", "0x1024"],
            ["smashing-wallpapers", "019999", "1280x1024"],
        ] {
            assert!(CliConfig::try_parse_from(args).is_err(), "{:?}", args);
        }
    }

    #[test]
    fn test_missing_arguments() {
        assert!(CliConfig::try_parse_from(["smashing-wallpapers", "042020"]).is_err());
    }

    #[test]
    fn test_cli_flags_override_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[fetch]\nmax_concurrent = 3\n[output]\ndirectory = \"./file-dir\"\n")
            .unwrap();

        let cli = CliConfig::try_parse_from([
            "smashing-wallpapers",
            "122023",
            "1920x1080",
            "--config",
            temp_file.path().to_str().unwrap(),
            "--output-dir",
            "./cli-dir",
        ])
        .unwrap();

        let config = cli.app_config().unwrap();
        assert_eq!(config.output_path, "./cli-dir");
        assert_eq!(config.max_concurrent, 3);
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(AppConfig::default().validate().is_ok());
    }
}
