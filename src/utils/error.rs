use thiserror::Error;

#[derive(Error, Debug)]
pub enum WallpaperError {
    #[error("Invalid {field} '{value}': {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Calendar page unreachable ({url}): {reason}")]
    PageUnreachable { url: String, reason: String },

    #[error("Wallpaper container '.{container}' not found on calendar page")]
    StructureNotFound { container: String },

    #[error("No wallpapers found for resolution {resolution}")]
    NoMatchingResolution { resolution: String },

    #[error("Image download failed ({url}): {reason}")]
    ImageFetchFailed { url: String, reason: String },

    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error in {field}: {message}")]
    ConfigError { field: String, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Network,
    Page,
    Storage,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl WallpaperError {
    pub fn invalid_input(field: &str, value: &str, reason: impl Into<String>) -> Self {
        WallpaperError::InvalidInput {
            field: field.to_string(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            WallpaperError::InvalidInput { .. } => ErrorCategory::Input,
            WallpaperError::PageUnreachable { .. }
            | WallpaperError::ImageFetchFailed { .. }
            | WallpaperError::HttpError(_) => ErrorCategory::Network,
            WallpaperError::StructureNotFound { .. }
            | WallpaperError::NoMatchingResolution { .. } => ErrorCategory::Page,
            WallpaperError::IoError(_) | WallpaperError::SerializationError(_) => {
                ErrorCategory::Storage
            }
            WallpaperError::ConfigError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // 單張圖片失敗不影響整體流程
            WallpaperError::ImageFetchFailed { .. } => ErrorSeverity::Low,
            WallpaperError::PageUnreachable { .. } | WallpaperError::HttpError(_) => {
                ErrorSeverity::Medium
            }
            WallpaperError::InvalidInput { .. }
            | WallpaperError::StructureNotFound { .. }
            | WallpaperError::NoMatchingResolution { .. }
            | WallpaperError::ConfigError { .. } => ErrorSeverity::High,
            WallpaperError::IoError(_) | WallpaperError::SerializationError(_) => {
                ErrorSeverity::Critical
            }
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::High => 1,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::Critical => 3,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            WallpaperError::InvalidInput { field, value, reason } => {
                format!("Invalid {} '{}': {}", field, value, reason)
            }
            WallpaperError::PageUnreachable { url, .. } => {
                format!("Could not load the calendar page {}", url)
            }
            WallpaperError::StructureNotFound { .. } => {
                "The calendar page does not contain a wallpaper list".to_string()
            }
            WallpaperError::NoMatchingResolution { resolution } => {
                format!("No wallpapers were published in {} for this month", resolution)
            }
            WallpaperError::ImageFetchFailed { url, reason } => {
                format!("Skipped {} ({})", url, reason)
            }
            WallpaperError::HttpError(e) => format!("Network error: {}", e),
            WallpaperError::IoError(e) => format!("Could not write file: {}", e),
            WallpaperError::SerializationError(e) => format!("Could not encode output: {}", e),
            WallpaperError::ConfigError { field, message } => {
                format!("Configuration problem in {}: {}", field, message)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            WallpaperError::InvalidInput { .. } => {
                "Use MMYYYY for the date (e.g. 042020) and WxH for the resolution (e.g. 1920x1080)"
            }
            WallpaperError::PageUnreachable { .. } | WallpaperError::HttpError(_) => {
                "Check your network connection; the calendar for this month may not exist"
            }
            WallpaperError::StructureNotFound { .. } => {
                "The site layout may have changed; check source.container_class in the config"
            }
            WallpaperError::NoMatchingResolution { .. } => {
                "Try another resolution, e.g. 1920x1080 or 2560x1440"
            }
            WallpaperError::ImageFetchFailed { .. } => "Run again later to fetch missing images",
            WallpaperError::IoError(_) | WallpaperError::SerializationError(_) => {
                "Check that the output directory exists and is writable"
            }
            WallpaperError::ConfigError { .. } => "Fix the configuration file or command line flags",
        }
    }
}

pub type Result<T> = std::result::Result<T, WallpaperError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fatal_errors_exit_non_zero() {
        let errors = vec![
            WallpaperError::invalid_input("date", "132020", "month must be 01-12"),
            WallpaperError::PageUnreachable {
                url: "https://example.com".to_string(),
                reason: "HTTP 404".to_string(),
            },
            WallpaperError::StructureNotFound {
                container: "c-garfield-the-cat".to_string(),
            },
            WallpaperError::NoMatchingResolution {
                resolution: "1x1".to_string(),
            },
        ];

        for error in errors {
            assert_ne!(error.exit_code(), 0, "{:?}", error);
        }
    }

    #[test]
    fn test_image_failure_is_low_severity() {
        let error = WallpaperError::ImageFetchFailed {
            url: "https://example.com/a.jpg".to_string(),
            reason: "HTTP 500".to_string(),
        };

        assert_eq!(error.severity(), ErrorSeverity::Low);
        assert_eq!(error.category(), ErrorCategory::Network);
        assert_eq!(error.exit_code(), 0);
    }

    #[test]
    fn test_structure_and_resolution_messages_differ() {
        let structure = WallpaperError::StructureNotFound {
            container: "c-garfield-the-cat".to_string(),
        };
        let resolution = WallpaperError::NoMatchingResolution {
            resolution: "1280x1024".to_string(),
        };

        assert_ne!(structure.user_friendly_message(), resolution.user_friendly_message());
        assert_ne!(structure.recovery_suggestion(), resolution.recovery_suggestion());
    }
}
