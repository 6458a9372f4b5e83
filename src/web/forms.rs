//! Urlencoded form bodies as ordered key/value pairs, so repeated fields such
//! as `tag_ids` survive extraction.

use crate::models::study_log::{NewStudyLog, StudyLog, StudyLogUpdate};
use chrono::NaiveDate;
use serde::Deserialize;

pub const TAG_IDS_FIELD: &str = "tag_ids";

/// Present on the edit form so an empty tag selection can be told apart from
/// a form that never offered one.
pub const TAGS_SUBMITTED_FIELD: &str = "tags_submitted";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct FormFields(pub Vec<(String, String)>);

impl FormFields {
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    #[must_use]
    pub fn has(&self, name: &str) -> bool {
        self.0.iter().any(|(key, _)| key == name)
    }

    /// Every value of a repeated field that parses as an id. Others are skipped.
    #[must_use]
    pub fn ids(&self, name: &str) -> Vec<i32> {
        self.0
            .iter()
            .filter(|(key, _)| key == name)
            .filter_map(|(_, value)| value.trim().parse().ok())
            .collect()
    }
}

/// Values of the create/edit form, kept so they can be re-rendered after a
/// validation failure.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogForm {
    pub date: String,
    pub title: String,
    pub text: String,
    pub tag_ids: Vec<i32>,
    pub tags_submitted: bool,
}

impl LogForm {
    #[must_use]
    pub fn from_fields(fields: &FormFields) -> Self {
        Self {
            date: fields.get("date").unwrap_or_default().to_string(),
            title: fields.get("title").unwrap_or_default().to_string(),
            text: fields.get("text").unwrap_or_default().to_string(),
            tag_ids: fields.ids(TAG_IDS_FIELD),
            tags_submitted: fields.has(TAGS_SUBMITTED_FIELD),
        }
    }

    /// Prefills the edit form from a stored log.
    #[must_use]
    pub fn from_log(log: &StudyLog) -> Self {
        Self {
            date: log.date.to_string(),
            title: log.title.clone(),
            text: log.text.clone(),
            tag_ids: log.tags.iter().map(|t| t.id).collect(),
            tags_submitted: true,
        }
    }

    #[must_use]
    pub fn to_new_log(&self, today: NaiveDate) -> NewStudyLog {
        NewStudyLog {
            date: today,
            title: self.title.clone(),
            text: self.text.clone(),
            tag_ids: self.tag_ids.clone(),
        }
    }

    #[must_use]
    pub fn to_update(&self) -> StudyLogUpdate {
        let non_blank = |value: &str| {
            let value = value.trim();
            (!value.is_empty()).then(|| value.to_string())
        };

        StudyLogUpdate {
            date: non_blank(&self.date),
            title: non_blank(&self.title),
            text: non_blank(&self.text).map(|_| self.text.clone()),
            tag_ids: self.tags_submitted.then(|| self.tag_ids.clone()),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TagForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub tag_type: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(pairs: &[(&str, &str)]) -> FormFields {
        FormFields(
            pairs
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect(),
        )
    }

    #[test]
    fn test_repeated_tag_ids() {
        let form = fields(&[
            ("title", "Ch. 1"),
            ("tag_ids", "3"),
            ("tag_ids", "x"),
            ("tag_ids", "7"),
        ]);
        assert_eq!(form.ids(TAG_IDS_FIELD), vec![3, 7]);
        assert_eq!(form.get("title"), Some("Ch. 1"));
        assert!(!form.has(TAGS_SUBMITTED_FIELD));
    }

    #[test]
    fn test_log_form_from_body() {
        let parsed: FormFields =
            parse_body("title=a%20b&tag_ids=1&tag_ids=2&tags_submitted=1");
        let form = LogForm::from_fields(&parsed);
        assert_eq!(form.title, "a b");
        assert_eq!(form.tag_ids, vec![1, 2]);
        assert!(form.tags_submitted);
    }

    fn parse_body(body: &str) -> FormFields {
        FormFields(
            body.split('&')
                .filter_map(|pair| pair.split_once('='))
                .map(|(k, v)| {
                    (
                        urlencoding::decode(k).unwrap().into_owned(),
                        urlencoding::decode(v).unwrap().into_owned(),
                    )
                })
                .collect(),
        )
    }

    #[test]
    fn test_update_without_marker_keeps_tags() {
        let form = LogForm::from_fields(&fields(&[("title", "t"), ("text", "  ")]));
        let update = form.to_update();
        assert_eq!(update.title.as_deref(), Some("t"));
        assert!(update.text.is_none());
        assert!(update.date.is_none());
        assert!(update.tag_ids.is_none());
    }

    #[test]
    fn test_update_with_marker_and_no_tags_clears() {
        let form = LogForm::from_fields(&fields(&[
            ("title", "t"),
            ("date", "2024-01-05"),
            ("tags_submitted", "1"),
        ]));
        let update = form.to_update();
        assert_eq!(update.date.as_deref(), Some("2024-01-05"));
        assert_eq!(update.tag_ids, Some(vec![]));
    }
}
