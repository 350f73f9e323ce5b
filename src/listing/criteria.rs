//! List query criteria
//!
//! A [`ListQuery`] is an immutable value owned by the calling page. Builder
//! methods return a new query so the caller decides when state changes.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Sort order for list views
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    /// Newest first
    #[default]
    DateDesc,
    /// Oldest first
    DateAsc,
    /// Name, A to Z
    NameAsc,
    /// Email, A to Z
    EmailAsc,
    /// Title, A to Z
    TitleAsc,
}

impl SortKey {
    /// Every sort key, in display order
    pub const ALL: [Self; 5] = [
        Self::DateDesc,
        Self::DateAsc,
        Self::NameAsc,
        Self::EmailAsc,
        Self::TitleAsc,
    ];

    /// Wire name of the key (`date_desc`, `name_asc`, ...)
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DateDesc => "date_desc",
            Self::DateAsc => "date_asc",
            Self::NameAsc => "name_asc",
            Self::EmailAsc => "email_asc",
            Self::TitleAsc => "title_asc",
        }
    }

    /// Parse a key, falling back to [`SortKey::DateDesc`] for anything unknown
    #[must_use]
    pub fn parse_lenient(s: &str) -> Self {
        s.parse().unwrap_or_else(|_| {
            if !s.trim().is_empty() {
                tracing::debug!(key = s, "unknown sort key, using date_desc");
            }
            Self::default()
        })
    }

    /// Text field compared by alphabetical sorts, `None` for date sorts
    #[must_use]
    pub const fn text_field(self) -> Option<&'static str> {
        match self {
            Self::DateDesc | Self::DateAsc => None,
            Self::NameAsc => Some("name"),
            Self::EmailAsc => Some("email"),
            Self::TitleAsc => Some("title"),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|key| key.as_str() == wanted)
            .ok_or_else(|| format!("unknown sort key '{s}'"))
    }
}

/// Search, filter and sort criteria for a list view
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ListQuery {
    /// Free-text search; blank matches everything
    #[serde(default)]
    pub query: String,

    /// Field name → required value; blank values are ignored
    #[serde(default)]
    pub field_filters: BTreeMap<String, String>,

    /// Sort order
    #[serde(default)]
    pub sort: SortKey,
}

impl ListQuery {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Same criteria with a different search string
    #[must_use]
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    /// Same criteria with one more field filter
    #[must_use]
    pub fn with_filter(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.field_filters.insert(field.into(), value.into());
        self
    }

    /// Same criteria with a different sort order
    #[must_use]
    pub const fn with_sort(mut self, sort: SortKey) -> Self {
        self.sort = sort;
        self
    }

    /// Filters that actually constrain results
    pub fn active_filters(&self) -> impl Iterator<Item = (&str, &str)> {
        self.field_filters
            .iter()
            .map(|(field, value)| (field.as_str(), value.trim()))
            .filter(|(_, value)| !value.is_empty())
    }

    /// Whether the query narrows the list at all
    #[must_use]
    pub fn is_unfiltered(&self) -> bool {
        self.query.trim().is_empty() && self.active_filters().next().is_none()
    }

    /// Parse a `FIELD=VALUE` filter argument
    ///
    /// # Errors
    /// Returns a message when the argument has no `=` or an empty field name.
    pub fn parse_filter(arg: &str) -> Result<(String, String), String> {
        let (field, value) = arg
            .split_once('=')
            .ok_or_else(|| format!("filter '{arg}' must look like FIELD=VALUE"))?;
        let field = field.trim();
        if field.is_empty() {
            return Err(format!("filter '{arg}' has an empty field name"));
        }
        Ok((field.to_string(), value.trim().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_key_parse() {
        assert_eq!("date_desc".parse::<SortKey>(), Ok(SortKey::DateDesc));
        assert_eq!("NAME_ASC".parse::<SortKey>(), Ok(SortKey::NameAsc));
        assert_eq!(" email_asc ".parse::<SortKey>(), Ok(SortKey::EmailAsc));
        assert!("price_desc".parse::<SortKey>().is_err());
    }

    #[test]
    fn test_sort_key_lenient_fallback() {
        assert_eq!(SortKey::parse_lenient("price_desc"), SortKey::DateDesc);
        assert_eq!(SortKey::parse_lenient(""), SortKey::DateDesc);
        assert_eq!(SortKey::parse_lenient("title_asc"), SortKey::TitleAsc);
    }

    #[test]
    fn test_sort_key_display_roundtrip() {
        for key in SortKey::ALL {
            assert_eq!(key.to_string().parse::<SortKey>(), Ok(key));
        }
    }

    #[test]
    fn test_builder_leaves_original_untouched() {
        let base = ListQuery::new();
        let narrowed = base.clone().with_query("asha").with_sort(SortKey::NameAsc);
        assert!(base.is_unfiltered());
        assert!(!narrowed.is_unfiltered());
        assert_eq!(base.sort, SortKey::DateDesc);
    }

    #[test]
    fn test_blank_filters_are_inactive() {
        let query = ListQuery::new()
            .with_filter("country", "  ")
            .with_filter("status", "active");
        let active: Vec<_> = query.active_filters().collect();
        assert_eq!(active, vec![("status", "active")]);
    }

    #[test]
    fn test_parse_filter() {
        assert_eq!(
            ListQuery::parse_filter("country=India"),
            Ok(("country".to_string(), "India".to_string()))
        );
        assert_eq!(
            ListQuery::parse_filter("status="),
            Ok(("status".to_string(), String::new()))
        );
        assert!(ListQuery::parse_filter("country").is_err());
        assert!(ListQuery::parse_filter("=India").is_err());
    }

    #[test]
    fn test_query_deserializes_with_defaults() {
        let query: ListQuery = serde_json::from_str(r#"{ "sort": "email_asc" }"#).unwrap();
        assert_eq!(query.sort, SortKey::EmailAsc);
        assert!(query.query.is_empty());
    }
}
