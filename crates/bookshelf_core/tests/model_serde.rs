use bookshelf_core::{
    Author, Book, CatalogService, Database, DbTarget, NewAuthor, NewBook, ReportService,
    SqliteCatalogQueries, SqliteCatalogRepository,
};
use chrono::NaiveDate;
use serde_json::json;

#[test]
fn author_serializes_dates_as_iso_strings() {
    let author = Author {
        id: 12,
        first_name: "Toni".to_string(),
        last_name: "Morrison".to_string(),
        birth_date: NaiveDate::from_ymd_opt(1931, 2, 18),
        birth_place: Some("Lorain".to_string()),
    };

    let value = serde_json::to_value(&author).unwrap();
    assert_eq!(
        value,
        json!({
            "id": 12,
            "first_name": "Toni",
            "last_name": "Morrison",
            "birth_date": "1931-02-18",
            "birth_place": "Lorain"
        })
    );

    let decoded: Author = serde_json::from_value(value).unwrap();
    assert_eq!(decoded, author);
}

#[test]
fn book_serializes_missing_fields_as_null() {
    let book = Book {
        id: 1,
        title: "Untitled".to_string(),
        category: None,
        page_count: None,
        publish_date: None,
    };

    let value = serde_json::to_value(&book).unwrap();
    assert_eq!(value["category"], serde_json::Value::Null);
    assert_eq!(value["page_count"], serde_json::Value::Null);
}

#[test]
fn full_report_serializes_every_operation() {
    let db = Database::open(DbTarget::unique_memory()).unwrap();
    db.ensure_schema().unwrap();
    let mut session = db.session().unwrap();
    {
        let mut catalog =
            CatalogService::new(SqliteCatalogRepository::new(session.connection_mut().unwrap()));
        let ids = catalog
            .import_authors(&[NewAuthor::new("Jane", "Austen"), NewAuthor::new("Idle", "Pen")])
            .unwrap();
        catalog
            .import_books(&[NewBook::new("Emma").with_page_count(474).with_authors([ids[0]])])
            .unwrap();
    }

    let report = ReportService::new(SqliteCatalogQueries::new(session.connection().unwrap()));
    let value = serde_json::to_value(report.full_report()).unwrap();

    assert_eq!(value["book_with_most_pages"]["title"], "Emma");
    assert_eq!(value["average_page_count"], 474.0);
    assert_eq!(value["authors_with_no_books"][0]["last_name"], "Pen");
    assert_eq!(value["authors_with_more_than_three_books"], json!([]));
}
