use crate::domain::model::CalendarRequest;
use chrono::Month;

pub const DEFAULT_BASE_URL: &str = "https://www.smashingmagazine.com";

/// Calendar pages live under the requested month's path but are named after
/// the following month, e.g. December 2023 is
/// `/2023/12/desktop-wallpaper-calendars-January-2024/`.
pub fn derive_calendar_url(base_url: &str, request: &CalendarRequest) -> String {
    let (next_year, next_month) = request.next_month();

    format!(
        "{}/{}/{:02}/desktop-wallpaper-calendars-{}-{}/",
        base_url.trim_end_matches('/'),
        request.year,
        request.month,
        month_name(next_month),
        next_year
    )
}

pub fn calendar_url(request: &CalendarRequest) -> String {
    derive_calendar_url(DEFAULT_BASE_URL, request)
}

fn month_name(month: u32) -> &'static str {
    u8::try_from(month)
        .ok()
        .and_then(|m| Month::try_from(m).ok())
        .map(|m| m.name())
        .unwrap_or("January")
}
