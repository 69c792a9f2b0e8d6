//! Custom Askama template filters.

#![allow(clippy::unnecessary_wraps)]

use std::fmt::Display;

/// Returns the current year.
///
/// Usage in templates: `{{ ""|current_year }}`
#[allow(clippy::unnecessary_wraps)]
#[askama::filter_fn]
pub fn current_year(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<i32> {
    use chrono::Datelike;
    Ok(chrono::Utc::now().year())
}

/// Shorten text to `max` characters with an ellipsis.
///
/// Usage in templates: `{{ client.address|excerpt(40) }}`
#[askama::filter_fn]
pub fn excerpt(
    value: impl Display,
    _env: &dyn askama::Values,
    max: usize,
) -> askama::Result<String> {
    Ok(lca_tv_core::format::truncate(&value.to_string(), max))
}
