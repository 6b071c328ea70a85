use crate::config::AppConfig;
use crate::utils::error::{Result, WallpaperError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Optional settings file; every section and key may be omitted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    pub source: Option<SourceConfig>,
    pub fetch: Option<FetchConfig>,
    pub output: Option<OutputConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceConfig {
    pub base_url: Option<String>,
    pub container_class: Option<String>,
    pub user_agent: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FetchConfig {
    pub max_concurrent: Option<usize>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    pub directory: Option<String>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(|e| WallpaperError::ConfigError {
            field: path.as_ref().display().to_string(),
            message: format!("cannot read config file: {}", e),
        })?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| WallpaperError::ConfigError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${WALLPAPER_DIR})
    fn substitute_env_vars(content: &str) -> String {
        use regex::Regex;
        use std::sync::OnceLock;

        static ENV_VAR: OnceLock<Regex> = OnceLock::new();
        let re = ENV_VAR.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").unwrap());

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .into_owned()
    }

    /// 將檔案中有設定的值覆蓋到 `config`
    pub fn apply_to(&self, config: &mut AppConfig) {
        if let Some(source) = &self.source {
            if let Some(base_url) = &source.base_url {
                config.base_url = base_url.clone();
            }
            if let Some(container_class) = &source.container_class {
                config.container_class = container_class.clone();
            }
            if let Some(user_agent) = &source.user_agent {
                config.user_agent = user_agent.clone();
            }
        }

        if let Some(max_concurrent) = self.fetch.as_ref().and_then(|f| f.max_concurrent) {
            config.max_concurrent = max_concurrent;
        }

        if let Some(directory) = self.output.as_ref().and_then(|o| o.directory.as_ref()) {
            config.output_path = directory.clone();
        }
    }
}
