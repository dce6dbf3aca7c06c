//! The dashboard filter and its translation into SQL.
//!
//! One filter applies to every dated collection: transactions are filtered on
//! `date` and bills on `due_date`. Values that are empty or cannot be parsed
//! are ignored rather than rejected.

use rusqlite::ToSql;
use serde::{Deserialize, Serialize};
use time::{
    Date, Duration, OffsetDateTime, format_description::BorrowedFormatItem,
    macros::format_description,
};

const FILTER_DATE_FORMAT: &[BorrowedFormatItem] = format_description!("[year]-[month]-[day]");

/// The query parameters of the dashboard filter form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecordFilter {
    /// First day to include, "YYYY-MM-DD".
    #[serde(skip_serializing_if = "String::is_empty")]
    pub from: String,
    /// Last day to include, "YYYY-MM-DD".
    #[serde(skip_serializing_if = "String::is_empty")]
    pub to: String,
    /// Case-insensitive partial match on the description.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub search: String,
    /// Exact category code.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub category: String,
}

/// A SQL condition with its positional parameters.
pub struct SqlFilter {
    /// Either empty or a `WHERE ...` clause.
    pub where_clause: String,
    pub params: Vec<Box<dyn ToSql>>,
}

impl RecordFilter {
    pub fn from_date(&self) -> Option<Date> {
        parse_filter_date(&self.from)
    }

    pub fn to_date(&self) -> Option<Date> {
        parse_filter_date(&self.to)
    }

    pub fn search_term(&self) -> Option<&str> {
        Some(self.search.trim()).filter(|search| !search.is_empty())
    }

    pub fn category_code(&self) -> Option<&str> {
        Some(self.category.trim()).filter(|category| !category.is_empty())
    }

    /// Whether none of the filter values has an effect.
    pub fn is_empty(&self) -> bool {
        self.from_date().is_none()
            && self.to_date().is_none()
            && self.search_term().is_none()
            && self.category_code().is_none()
    }

    /// Build the `WHERE` clause restricting `date_column`, `description` and
    /// `category`.
    ///
    /// Dates are stored as midnight UTC, so the range is compared against the
    /// same encoding: `from` at midnight inclusive, and the day after `to` at
    /// midnight exclusive.
    pub fn to_sql(&self, date_column: &str) -> SqlFilter {
        let mut conditions: Vec<String> = Vec::new();
        let mut params: Vec<Box<dyn ToSql>> = Vec::new();

        if let Some(from) = self.from_date() {
            params.push(Box::new(start_of_day(from)));
            conditions.push(format!("{date_column} >= ?{}", params.len()));
        }

        if let Some(to) = self.to_date() {
            params.push(Box::new(start_of_day(to) + Duration::days(1)));
            conditions.push(format!("{date_column} < ?{}", params.len()));
        }

        if let Some(search) = self.search_term() {
            params.push(Box::new(format!("%{}%", escape_like(search))));
            conditions.push(format!("description LIKE ?{} ESCAPE '\\'", params.len()));
        }

        if let Some(category) = self.category_code() {
            params.push(Box::new(category.to_owned()));
            conditions.push(format!("category = ?{}", params.len()));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        SqlFilter {
            where_clause,
            params,
        }
    }

    /// The filter as a URL query string without the leading '?'. Empty values
    /// are left out.
    pub fn to_query_string(&self) -> String {
        serde_urlencoded::to_string(self).unwrap_or_default()
    }
}

fn parse_filter_date(value: &str) -> Option<Date> {
    Date::parse(value.trim(), FILTER_DATE_FORMAT).ok()
}

fn start_of_day(date: Date) -> OffsetDateTime {
    date.midnight().assume_utc()
}

/// Escape the LIKE wildcards in `text` using '\' as the escape character.
fn escape_like(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());

    for c in text.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }

    escaped
}
