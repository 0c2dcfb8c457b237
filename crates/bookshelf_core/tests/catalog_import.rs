use bookshelf_core::{
    CatalogCounts, CatalogService, Database, DbTarget, ModelValidationError, NewAuthor, NewBook,
    RepoError, Session, SqliteCatalogRepository,
};
use chrono::NaiveDate;

fn open_catalog() -> (Database, Session) {
    let db = Database::open(DbTarget::unique_memory()).unwrap();
    db.ensure_schema().unwrap();
    let session = db.session().unwrap();
    (db, session)
}

#[test]
fn import_returns_ids_in_input_order() {
    let (_db, mut session) = open_catalog();
    let mut catalog =
        CatalogService::new(SqliteCatalogRepository::new(session.connection_mut().unwrap()));

    let author_ids = catalog
        .import_authors(&[
            NewAuthor::new("Jorge Luis", "Borges")
                .with_birth_date(NaiveDate::from_ymd_opt(1899, 8, 24).unwrap())
                .with_birth_place("Buenos Aires"),
            NewAuthor::new("Italo", "Calvino"),
        ])
        .unwrap();
    assert_eq!(author_ids.len(), 2);
    assert!(author_ids[0] < author_ids[1]);

    let book_ids = catalog
        .import_books(&[
            NewBook::new("Ficciones").with_authors([author_ids[0]]),
            NewBook::new("Invisible Cities").with_authors([author_ids[1]]),
            NewBook::new("Anthology").with_authors(author_ids.clone()),
        ])
        .unwrap();
    assert_eq!(book_ids.len(), 3);

    assert_eq!(
        catalog.counts().unwrap(),
        CatalogCounts {
            authors: 2,
            books: 3,
            links: 4,
        }
    );
}

#[test]
fn repeated_pair_yields_exactly_one_association_row() {
    let (_db, mut session) = open_catalog();
    let mut catalog =
        CatalogService::new(SqliteCatalogRepository::new(session.connection_mut().unwrap()));

    let author_ids = catalog
        .import_authors(&[NewAuthor::new("Neil", "Gaiman")])
        .unwrap();
    let book_ids = catalog
        .import_books(&[NewBook::new("Good Omens").with_authors([author_ids[0], author_ids[0]])])
        .unwrap();
    assert_eq!(catalog.counts().unwrap().links, 1);

    let inserted = catalog.link(author_ids[0], book_ids[0]).unwrap();
    assert!(!inserted);
    assert_eq!(catalog.counts().unwrap().links, 1);
}

#[test]
fn link_creates_new_pair_once() {
    let (_db, mut session) = open_catalog();
    let mut catalog =
        CatalogService::new(SqliteCatalogRepository::new(session.connection_mut().unwrap()));

    let author_ids = catalog
        .import_authors(&[NewAuthor::new("Arkady", "Strugatsky")])
        .unwrap();
    let book_ids = catalog.import_books(&[NewBook::new("Roadside Picnic")]).unwrap();

    assert!(catalog.link(author_ids[0], book_ids[0]).unwrap());
    assert!(!catalog.link(author_ids[0], book_ids[0]).unwrap());
    assert_eq!(catalog.counts().unwrap().links, 1);
}

#[test]
fn link_rejects_unknown_entities() {
    let (_db, mut session) = open_catalog();
    let mut catalog =
        CatalogService::new(SqliteCatalogRepository::new(session.connection_mut().unwrap()));
    let author_ids = catalog
        .import_authors(&[NewAuthor::new("Stanislaw", "Lem")])
        .unwrap();

    assert!(matches!(
        catalog.link(author_ids[0], 999),
        Err(RepoError::UnknownBook(999))
    ));
    assert!(matches!(
        catalog.link(999, 1),
        Err(RepoError::UnknownAuthor(999))
    ));
}

#[test]
fn unknown_author_reference_rolls_back_whole_book_batch() {
    let (_db, mut session) = open_catalog();
    let mut catalog =
        CatalogService::new(SqliteCatalogRepository::new(session.connection_mut().unwrap()));
    let author_ids = catalog
        .import_authors(&[NewAuthor::new("Ray", "Bradbury")])
        .unwrap();

    let err = catalog
        .import_books(&[
            NewBook::new("Fahrenheit 451").with_authors(author_ids.clone()),
            NewBook::new("Ghost Book").with_authors([author_ids[0] + 100]),
        ])
        .unwrap_err();
    assert!(matches!(err, RepoError::UnknownAuthor(_)));

    let counts = catalog.counts().unwrap();
    assert_eq!(counts.books, 0);
    assert_eq!(counts.links, 0);
}

#[test]
fn blank_required_fields_are_rejected_before_insert() {
    let (_db, mut session) = open_catalog();
    let mut catalog =
        CatalogService::new(SqliteCatalogRepository::new(session.connection_mut().unwrap()));

    let err = catalog
        .import_authors(&[
            NewAuthor::new("Valid", "Author"),
            NewAuthor::new("   ", "Nameless"),
        ])
        .unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(ModelValidationError::BlankField {
            entity: "author",
            field: "first_name"
        })
    ));

    let err = catalog.import_books(&[NewBook::new("")]).unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));

    assert_eq!(catalog.counts().unwrap(), CatalogCounts::default());
}

#[test]
fn labels_are_normalized_on_insert() {
    let (_db, mut session) = open_catalog();
    {
        let mut catalog =
            CatalogService::new(SqliteCatalogRepository::new(session.connection_mut().unwrap()));
        catalog
            .import_authors(&[
                NewAuthor::new(" Ann ", " Leckie").with_birth_place("  Toledo,   Ohio ")
            ])
            .unwrap();
        catalog
            .import_books(&[NewBook::new(" Ancillary Justice ").with_category("Science   Fiction")])
            .unwrap();
    }

    let conn = session.connection().unwrap();
    let (first_name, birth_place): (String, String) = conn
        .query_row(
            "SELECT first_name, birth_place FROM author;",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .unwrap();
    assert_eq!(first_name, "Ann");
    assert_eq!(birth_place, "Toledo, Ohio");

    let (title, category): (String, String) = conn
        .query_row("SELECT title, category FROM book;", [], |row| {
            Ok((row.get(0)?, row.get(1)?))
        })
        .unwrap();
    assert_eq!(title, "Ancillary Justice");
    assert_eq!(category, "Science Fiction");
}
