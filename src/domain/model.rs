use crate::utils::error::{Result, WallpaperError};
use crate::utils::validation::validate_range;
use chrono::{Datelike, Local};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// Month/year whose wallpapers should be downloaded, parsed from `MMYYYY`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarRequest {
    pub year: i32,
    pub month: u32,
}

impl CalendarRequest {
    pub fn new(year: i32, month: u32) -> Result<Self> {
        validate_range("month", month, 1, 12)?;
        Ok(Self { year, month })
    }

    /// Parses `MMYYYY`, rejecting years after `current_year`.
    pub fn parse_with_current_year(input: &str, current_year: i32) -> Result<Self> {
        if input.len() != 6 || !input.bytes().all(|b| b.is_ascii_digit()) {
            return Err(WallpaperError::invalid_input(
                "date",
                input,
                "expected six digits in MMYYYY format",
            ));
        }

        // 已確認皆為 ASCII 數字
        let month: u32 = input[..2]
            .parse()
            .map_err(|_| WallpaperError::invalid_input("date", input, "month is not a number"))?;
        let year: i32 = input[2..]
            .parse()
            .map_err(|_| WallpaperError::invalid_input("date", input, "year is not a number"))?;

        if year < 1 {
            return Err(WallpaperError::invalid_input(
                "date",
                input,
                "year must be 0001 or later",
            ));
        }

        if !(1..=12).contains(&month) {
            return Err(WallpaperError::invalid_input(
                "date",
                input,
                "month must be between 01 and 12",
            ));
        }

        if year > current_year {
            return Err(WallpaperError::invalid_input(
                "date",
                input,
                format!("no wallpapers from the future (current year is {})", current_year),
            ));
        }

        Self::new(year, month)
    }

    /// The month the publisher names the calendar page after.
    pub fn next_month(&self) -> (i32, u32) {
        if self.month == 12 {
            (self.year + 1, 1)
        } else {
            (self.year, self.month + 1)
        }
    }
}

impl FromStr for CalendarRequest {
    type Err = WallpaperError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse_with_current_year(s, Local::now().year())
    }
}

impl fmt::Display for CalendarRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}{:04}", self.month, self.year)
    }
}

fn resolution_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^(\d+)x(\d+)$").expect("valid resolution regex"))
}

/// A literal `WxH` string matched against image links.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionToken {
    pub width: u32,
    pub height: u32,
    raw: String,
}

impl ResolutionToken {
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl FromStr for ResolutionToken {
    type Err = WallpaperError;

    fn from_str(s: &str) -> Result<Self> {
        let caps = resolution_pattern().captures(s).ok_or_else(|| {
            WallpaperError::invalid_input("resolution", s, "expected WxH, e.g. 1920x1080")
        })?;

        let width: u32 = caps[1]
            .parse()
            .map_err(|_| WallpaperError::invalid_input("resolution", s, "width is too large"))?;
        let height: u32 = caps[2]
            .parse()
            .map_err(|_| WallpaperError::invalid_input("resolution", s, "height is too large"))?;

        if width == 0 || height == 0 {
            return Err(WallpaperError::invalid_input(
                "resolution",
                s,
                "width and height must be positive",
            ));
        }

        Ok(Self {
            width,
            height,
            raw: s.to_string(),
        })
    }
}

impl fmt::Display for ResolutionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageLink {
    pub source_url: String,
    pub file_name: String,
}

impl ImageLink {
    pub fn new(source_url: impl Into<String>) -> Self {
        let source_url = source_url.into();
        let file_name = source_url
            .rsplit('/')
            .next()
            .unwrap_or(source_url.as_str())
            .to_string();
        Self {
            source_url,
            file_name,
        }
    }

    /// Makes a relative href absolute against the calendar page URL.
    /// The file name is left untouched.
    pub fn resolve_against(mut self, page_url: &url::Url) -> Self {
        if url::Url::parse(&self.source_url).is_err() {
            if let Ok(absolute) = page_url.join(&self.source_url) {
                self.source_url = absolute.to_string();
            }
        }
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchFailure {
    HttpStatus(u16),
    Transport(String),
    Task(String),
}

impl fmt::Display for FetchFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchFailure::HttpStatus(code) => write!(f, "HTTP {}", code),
            FetchFailure::Transport(msg) => write!(f, "transport error: {}", msg),
            FetchFailure::Task(msg) => write!(f, "download task failed: {}", msg),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Success(Vec<u8>),
    Failed(FetchFailure),
}

#[derive(Debug, Clone)]
pub struct FetchResult {
    pub link: ImageLink,
    pub outcome: FetchOutcome,
}

impl FetchResult {
    pub fn is_success(&self) -> bool {
        matches!(self.outcome, FetchOutcome::Success(_))
    }

    pub fn into_bytes(self) -> Result<Vec<u8>> {
        match self.outcome {
            FetchOutcome::Success(bytes) => Ok(bytes),
            FetchOutcome::Failed(failure) => Err(WallpaperError::ImageFetchFailed {
                url: self.link.source_url,
                reason: failure.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedImage {
    pub file_name: String,
    pub url: String,
    pub reason: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct RunSummary {
    pub page_url: String,
    pub matched: usize,
    pub saved: Vec<String>,
    pub failed: Vec<FailedImage>,
}

impl RunSummary {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Pretty JSON listing of images, used by dry runs.
pub fn images_to_json(images: &[ImageLink]) -> Result<String> {
    Ok(serde_json::to_string_pretty(images)?)
}
