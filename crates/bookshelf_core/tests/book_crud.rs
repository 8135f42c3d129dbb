use bookshelf_core::db::open_db_in_memory;
use bookshelf_core::{
    BookRepository, BookValidationError, NewBook, RepoError, SqliteBookRepository,
};
use std::collections::HashSet;

fn dune() -> NewBook {
    NewBook::new("Dune", "Frank Herbert", "SciFi", "Spice and sandworms")
}

#[test]
fn insert_and_get_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteBookRepository::new(&conn);

    let stored = repo.insert_book(&dune()).unwrap();
    let loaded = repo.get_book(stored.id).unwrap().unwrap();

    assert_eq!(loaded, stored);
    assert_eq!(loaded.title, "Dune");
    assert_eq!(loaded.author, "Frank Herbert");
    assert_eq!(loaded.genre, "SciFi");
    assert_eq!(loaded.description, "Spice and sandworms");
}

#[test]
fn first_insert_gets_id_one_and_ids_increase() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteBookRepository::new(&conn);

    let first = repo.insert_book(&dune()).unwrap();
    let second = repo
        .insert_book(&NewBook::new("Emma", "Jane Austen", "Classic", "Matchmaking"))
        .unwrap();

    assert_eq!(first.id, 1);
    assert!(second.id > first.id);
}

#[test]
fn get_missing_book_returns_none() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteBookRepository::new(&conn);

    assert!(repo.get_book(42).unwrap().is_none());
}

#[test]
fn list_on_empty_store_is_empty() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteBookRepository::new(&conn);

    assert!(repo.list_books().unwrap().is_empty());
}

#[test]
fn list_contains_each_inserted_book_once() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteBookRepository::new(&conn);

    let mut inserted = HashSet::new();
    for title in ["A", "B", "C"] {
        let book = repo
            .insert_book(&NewBook::new(title, "Anon", "Misc", "Same description"))
            .unwrap();
        inserted.insert(book.id);
    }

    let listed = repo.list_books().unwrap();
    assert_eq!(listed.len(), 3);
    let ids: HashSet<_> = listed.iter().map(|book| book.id).collect();
    assert_eq!(ids, inserted);
}

#[test]
fn delete_existing_then_missing() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteBookRepository::new(&conn);
    let stored = repo.insert_book(&dune()).unwrap();

    assert!(repo.delete_book(stored.id).unwrap());
    assert!(repo.get_book(stored.id).unwrap().is_none());
    assert!(!repo.delete_book(stored.id).unwrap());
}

#[test]
fn delete_never_inserted_id_returns_false() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteBookRepository::new(&conn);

    assert!(!repo.delete_book(-5).unwrap());
    assert!(!repo.delete_book(1).unwrap());
}

#[test]
fn deleted_ids_are_not_reused() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteBookRepository::new(&conn);

    let first = repo.insert_book(&dune()).unwrap();
    repo.delete_book(first.id).unwrap();
    let second = repo.insert_book(&dune()).unwrap();

    assert!(second.id > first.id);
}

#[test]
fn insert_rejects_empty_fields_without_writing() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteBookRepository::new(&conn);

    let err = repo
        .insert_book(&NewBook::new("", "Herbert", "SciFi", "..."))
        .unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(BookValidationError::EmptyField("title"))
    ));
    assert!(repo.list_books().unwrap().is_empty());
}

#[test]
fn insert_stores_text_literally() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteBookRepository::new(&conn);

    let hostile = NewBook::new(
        "Robert'); DROP TABLE books;--",
        "O'Brien",
        "Drama",
        "quotes \" and 'apostrophes'",
    );
    let stored = repo.insert_book(&hostile).unwrap();

    let loaded = repo.get_book(stored.id).unwrap().unwrap();
    assert_eq!(loaded.title, hostile.title);
    assert_eq!(loaded.author, hostile.author);
    assert_eq!(repo.list_books().unwrap().len(), 1);
}

#[test]
fn whitespace_only_rows_from_other_writers_do_not_break_listing() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteBookRepository::new(&conn);
    let stored = repo.insert_book(&dune()).unwrap();
    conn.execute(
        "INSERT INTO books (title, author, description, genre)
         VALUES (' ', 'Frank Herbert', '', 'SciFi');",
        [],
    )
    .unwrap();
    let raw_id = conn.last_insert_rowid();

    let listed = repo.list_books().unwrap();
    assert_eq!(listed.len(), 2);
    assert!(listed.contains(&stored));

    let scifi = repo.list_books_by_genre("SciFi").unwrap();
    assert_eq!(scifi.len(), 2);

    let raw = repo.get_book(raw_id).unwrap().unwrap();
    assert_eq!(raw.title, " ");
    assert_eq!(raw.description, "");
    assert_eq!(repo.search_books("herbert").unwrap().len(), 2);
}
