//! Date/time display filter
//!
//! Two named styles plus explicit custom `strftime` patterns. A style name
//! that is neither `full` nor `medium` is treated as a pattern and handed to
//! the formatter unchanged.

use crate::time::parse_timestamp;
use crate::{Error, Result};
use chrono::format::{Item, StrftimeItems};
use chrono::NaiveDateTime;
use std::fmt::Write;

const FULL_PATTERN: &str = "%A %B, %-d, %Y at %-I:%M%p";
const MEDIUM_PATTERN: &str = "%a %m, %d, %Y %-I:%M%p";

/// Display style for [`format_datetime`]
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DateStyle {
    /// `Tuesday May, 21, 2019 at 9:30PM`
    Full,
    /// `Tue 05, 21, 2019 9:30PM`
    #[default]
    Medium,
    /// Caller-supplied `strftime` pattern
    Pattern(String),
}

impl DateStyle {
    pub fn from_name(name: &str) -> Self {
        match name {
            "full" => DateStyle::Full,
            "medium" => DateStyle::Medium,
            other => DateStyle::Pattern(other.to_string()),
        }
    }

    fn pattern(&self) -> &str {
        match self {
            DateStyle::Full => FULL_PATTERN,
            DateStyle::Medium => MEDIUM_PATTERN,
            DateStyle::Pattern(p) => p,
        }
    }
}

/// Parse a textual timestamp and render it in `style`
pub fn format_datetime(value: &str, style: &DateStyle) -> Result<String> {
    let timestamp = parse_timestamp(value)?;
    format_timestamp(&timestamp, style)
}

/// Render an already parsed timestamp in `style`
pub fn format_timestamp(timestamp: &NaiveDateTime, style: &DateStyle) -> Result<String> {
    let pattern = style.pattern();
    let items: Vec<Item<'_>> = StrftimeItems::new(pattern).collect();
    if items.iter().any(|item| matches!(item, Item::Error)) {
        return Err(Error::InvalidInput(format!("Invalid date pattern: {:?}", pattern)));
    }

    // Timezone specifiers cannot be rendered for a naive value; the formatter
    // reports that as fmt::Error
    let mut out = String::new();
    write!(out, "{}", timestamp.format_with_items(items.into_iter()))
        .map_err(|_| Error::InvalidInput(format!("Date pattern not applicable: {:?}", pattern)))?;
    Ok(out)
}
