use chrono::{Datelike, NaiveDate, Weekday};
use serde_json::json;

use crate::error::{AppError, AppResult};

pub const MIN_SUPPORTED_YEAR: i32 = 1970;
pub const MAX_SUPPORTED_YEAR: i32 = 2100;

pub fn parse_date(value: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|err| {
        AppError::validation_with_details(
            "无效的日期格式",
            json!({"value": value, "error": err.to_string()}),
        )
    })
}

pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

pub fn ensure_supported_year(year: i32) -> AppResult<()> {
    if (MIN_SUPPORTED_YEAR..=MAX_SUPPORTED_YEAR).contains(&year) {
        Ok(())
    } else {
        Err(AppError::validation_with_details(
            "目标年份超出支持范围",
            json!({"year": year, "min": MIN_SUPPORTED_YEAR, "max": MAX_SUPPORTED_YEAR}),
        ))
    }
}

pub fn year_bounds(year: i32) -> AppResult<(NaiveDate, NaiveDate)> {
    let start = NaiveDate::from_ymd_opt(year, 1, 1)
        .ok_or_else(|| AppError::validation(format!("无效的年份: {year}")))?;
    let end = NaiveDate::from_ymd_opt(year, 12, 31)
        .ok_or_else(|| AppError::validation(format!("无效的年份: {year}")))?;
    Ok((start, end))
}
