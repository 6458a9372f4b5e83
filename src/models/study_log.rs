use chrono::NaiveDate;
use serde::Serialize;

use super::tag::Tag;

/// Date format used by forms, query strings and storage.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StudyLog {
    pub id: i32,
    pub date: NaiveDate,
    pub title: String,
    pub text: String,
    pub tags: Vec<Tag>,
}

#[derive(Debug, Clone)]
pub struct NewStudyLog {
    pub date: NaiveDate,
    pub title: String,
    pub text: String,
    pub tag_ids: Vec<i32>,
}

/// Raw edit-form input. `None` and blank values leave the stored field alone,
/// except for the title which must always be supplied.
#[derive(Debug, Clone, Default)]
pub struct StudyLogUpdate {
    pub date: Option<String>,
    pub title: Option<String>,
    pub text: Option<String>,
    /// `Some` replaces every association, `None` keeps the current ones.
    pub tag_ids: Option<Vec<i32>>,
}

/// Search criteria. Every filter is optional and they combine with AND.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchFilter {
    pub date: Option<NaiveDate>,
    pub keyword: Option<String>,
    pub tag: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-based
    pub page: u64,
    pub total_pages: u64,
    pub total_items: u64,
}

impl<T> Page<T> {
    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.page > 1
    }

    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

/// Parses a `YYYY-MM-DD` value, treating blank input as absent.
pub fn parse_optional_date(value: Option<&str>) -> Result<Option<NaiveDate>, chrono::ParseError> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => NaiveDate::parse_from_str(raw, DATE_FORMAT).map(Some),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_optional_date() {
        assert_eq!(parse_optional_date(None).unwrap(), None);
        assert_eq!(parse_optional_date(Some("  ")).unwrap(), None);
        assert_eq!(
            parse_optional_date(Some("2024-01-05")).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 5)
        );
        assert!(parse_optional_date(Some("05/01/2024")).is_err());
        assert!(parse_optional_date(Some("2024-02-30")).is_err());
    }

    #[test]
    fn test_page_navigation() {
        let page = Page::<i32> {
            items: vec![],
            page: 2,
            total_pages: 3,
            total_items: 25,
        };
        assert!(page.has_previous());
        assert!(page.has_next());

        let last = Page::<i32> {
            items: vec![],
            page: 3,
            total_pages: 3,
            total_items: 25,
        };
        assert!(!last.has_next());
    }
}
