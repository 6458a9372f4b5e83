//! Forgetting-curve reminders.
//!
//! A reminder bucket holds every log written exactly `days_ago` days before
//! today. Nothing is persisted; buckets are recomputed on each request.

use chrono::{Days, NaiveDate};
use serde::Serialize;

use super::study_log::StudyLog;

/// Review offsets in days, in display order.
pub const REVIEW_OFFSETS: [u64; 4] = [1, 3, 7, 30];

#[derive(Debug, Clone, Serialize)]
pub struct ReminderBucket {
    pub days_ago: u64,
    pub date: NaiveDate,
    pub logs: Vec<StudyLog>,
}

/// Target date for each review offset.
#[must_use]
pub fn review_dates(today: NaiveDate) -> Vec<(u64, NaiveDate)> {
    REVIEW_OFFSETS
        .iter()
        .filter_map(|&days| {
            today
                .checked_sub_days(Days::new(days))
                .map(|date| (days, date))
        })
        .collect()
}

/// Distributes logs into one bucket per offset. Logs whose date matches no
/// offset are dropped.
#[must_use]
pub fn bucket_logs(today: NaiveDate, logs: Vec<StudyLog>) -> Vec<ReminderBucket> {
    let mut buckets: Vec<ReminderBucket> = review_dates(today)
        .into_iter()
        .map(|(days_ago, date)| ReminderBucket {
            days_ago,
            date,
            logs: Vec::new(),
        })
        .collect();

    for log in logs {
        if let Some(bucket) = buckets.iter_mut().find(|b| b.date == log.date) {
            bucket.logs.push(log);
        }
    }

    buckets
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn log(id: i32, on: NaiveDate) -> StudyLog {
        StudyLog {
            id,
            date: on,
            title: format!("log {id}"),
            text: "body".to_string(),
            tags: vec![],
        }
    }

    #[test]
    fn test_review_dates() {
        let dates = review_dates(date(2024, 3, 10));
        assert_eq!(
            dates,
            vec![
                (1, date(2024, 3, 9)),
                (3, date(2024, 3, 7)),
                (7, date(2024, 3, 3)),
                (30, date(2024, 2, 9)),
            ]
        );
    }

    #[test]
    fn test_review_dates_cross_year() {
        let dates = review_dates(date(2024, 1, 2));
        assert_eq!(dates[0].1, date(2024, 1, 1));
        assert_eq!(dates[3].1, date(2023, 12, 3));
    }

    #[test]
    fn test_week_old_log_lands_in_seven_day_bucket_only() {
        let buckets = bucket_logs(date(2024, 3, 10), vec![log(1, date(2024, 3, 3))]);

        for bucket in &buckets {
            if bucket.days_ago == 7 {
                assert_eq!(bucket.logs.len(), 1);
            } else {
                assert!(bucket.logs.is_empty(), "bucket {} not empty", bucket.days_ago);
            }
        }
    }

    #[test]
    fn test_unmatched_logs_are_dropped() {
        let buckets = bucket_logs(
            date(2024, 3, 10),
            vec![log(1, date(2024, 3, 10)), log(2, date(2024, 3, 8))],
        );
        assert_eq!(buckets.len(), 4);
        assert!(buckets.iter().all(|b| b.logs.is_empty()));
    }
}
