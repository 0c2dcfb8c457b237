//! Repository layer: SQL access to the catalog schema.
//!
//! # Responsibility
//! - `catalog_repo`: producer-side inserts (authors, books, associations).
//! - `query_repo`: read-only analytical queries, one statement each.
//!
//! # Invariants
//! - Write paths validate producer input before any SQL runs.
//! - Read paths reject invalid persisted state instead of masking it.
//! - Dates cross the storage boundary as ISO-8601 `YYYY-MM-DD` text.

use chrono::NaiveDate;

pub mod catalog_repo;
pub mod query_repo;

const DATE_FORMAT: &str = "%Y-%m-%d";

pub(crate) fn date_to_db(date: Option<NaiveDate>) -> Option<String> {
    date.map(|value| value.format(DATE_FORMAT).to_string())
}

pub(crate) fn date_from_db(
    value: Option<String>,
    column: &str,
) -> Result<Option<NaiveDate>, String> {
    match value {
        Some(text) => NaiveDate::parse_from_str(&text, DATE_FORMAT)
            .map(Some)
            .map_err(|_| format!("invalid date value `{text}` in {column}")),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::{date_from_db, date_to_db};
    use chrono::NaiveDate;

    #[test]
    fn stored_dates_sort_like_calendar_dates() {
        let older = date_to_db(NaiveDate::from_ymd_opt(999, 12, 31)).unwrap();
        let newer = date_to_db(NaiveDate::from_ymd_opt(1985, 1, 2)).unwrap();
        assert_eq!(older, "0999-12-31");
        assert!(older < newer);
    }

    #[test]
    fn date_from_db_reports_column_on_garbage() {
        let err = date_from_db(Some("yesterday".to_string()), "author.birth_date").unwrap_err();
        assert!(err.contains("author.birth_date"));
        assert_eq!(date_from_db(None, "author.birth_date"), Ok(None));
    }
}
