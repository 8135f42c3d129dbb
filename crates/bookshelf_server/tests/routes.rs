use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use bookshelf_core::{Book, BookRepository, CatalogStore, NewBook};
use bookshelf_server::router;
use serde_json::{json, Value};
use tower::ServiceExt;

struct TestApp {
    _dir: tempfile::TempDir,
    store: CatalogStore,
    app: Router,
}

impl TestApp {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let store = CatalogStore::open(dir.path().join("database.sqlite")).unwrap();
        let app = router(store.clone());
        Self {
            _dir: dir,
            store,
            app,
        }
    }

    fn seed(&self, book: NewBook) -> Book {
        self.store.insert_book(&book).unwrap()
    }

    async fn send(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Vec<u8>) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(value) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(value.to_string())
            }
            None => Body::empty(),
        };

        let response = self
            .app
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, bytes.to_vec())
    }
}

fn dune() -> NewBook {
    NewBook::new("Dune", "Herbert", "SciFi", "Desert planet")
}

#[tokio::test]
async fn list_books_returns_json_array() {
    let app = TestApp::new();
    let (status, body) = app.send(Method::GET, "/books", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(serde_json::from_slice::<Value>(&body).unwrap(), json!([]));

    let stored = app.seed(dune());
    let (status, body) = app.send(Method::GET, "/books", None).await;
    assert_eq!(status, StatusCode::OK);
    let books: Vec<Book> = serde_json::from_slice(&body).unwrap();
    assert_eq!(books, vec![stored]);
}

#[tokio::test]
async fn put_book_creates_record() {
    let app = TestApp::new();
    let (status, body) = app
        .send(
            Method::PUT,
            "/books",
            Some(json!({
                "title": "Dune",
                "author": "Herbert",
                "genre": "SciFi",
                "description": "Desert planet"
            })),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    let created: Book = serde_json::from_slice(&body).unwrap();
    assert_eq!(created.id, 1);
    assert_eq!(app.store.get_book(1).unwrap(), Some(created));
}

#[tokio::test]
async fn put_book_with_empty_field_is_bad_request() {
    let app = TestApp::new();
    let (status, body) = app
        .send(
            Method::PUT,
            "/books",
            Some(json!({
                "title": "Dune",
                "author": "",
                "genre": "SciFi",
                "description": "Desert planet"
            })),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let error: Value = serde_json::from_slice(&body).unwrap();
    assert!(error["error"].as_str().unwrap().contains("author"));
    assert!(app.store.list_books().unwrap().is_empty());
}

#[tokio::test]
async fn put_book_with_missing_field_is_rejected() {
    let app = TestApp::new();
    let (status, _) = app
        .send(Method::PUT, "/books", Some(json!({ "title": "Dune" })))
        .await;

    assert!(status.is_client_error());
    assert!(app.store.list_books().unwrap().is_empty());
}

#[tokio::test]
async fn get_book_by_id_and_missing() {
    let app = TestApp::new();
    let stored = app.seed(dune());

    let (status, body) = app
        .send(Method::GET, &format!("/books/{}", stored.id), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        serde_json::from_slice::<Value>(&body).unwrap(),
        json!({
            "id": stored.id,
            "title": "Dune",
            "author": "Herbert",
            "description": "Desert planet",
            "genre": "SciFi"
        })
    );

    let (status, _) = app.send(Method::GET, "/books/999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn non_numeric_id_is_rejected() {
    let app = TestApp::new();
    let (status, _) = app.send(Method::GET, "/books/dune", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn search_and_genre_routes_filter() {
    let app = TestApp::new();
    let dune = app.seed(dune());
    app.seed(NewBook::new("Emma", "Jane Austen", "Classic", "Matchmaking"));

    let (status, body) = app.send(Method::GET, "/books/search/DUN", None).await;
    assert_eq!(status, StatusCode::OK);
    let hits: Vec<Book> = serde_json::from_slice(&body).unwrap();
    assert_eq!(hits, vec![dune.clone()]);

    let (status, body) = app.send(Method::GET, "/books/genre/SciFi", None).await;
    assert_eq!(status, StatusCode::OK);
    let hits: Vec<Book> = serde_json::from_slice(&body).unwrap();
    assert_eq!(hits, vec![dune]);

    let (status, body) = app.send(Method::GET, "/books/genre/Horror", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(serde_json::from_slice::<Value>(&body).unwrap(), json!([]));
}

#[tokio::test]
async fn search_keyword_is_percent_decoded() {
    let app = TestApp::new();
    let stored = app.seed(NewBook::new("The Left Hand", "Le Guin", "SciFi", "Winter"));

    let (status, body) = app.send(Method::GET, "/books/search/le%20guin", None).await;
    assert_eq!(status, StatusCode::OK);
    let hits: Vec<Book> = serde_json::from_slice(&body).unwrap();
    assert_eq!(hits, vec![stored]);
}

#[tokio::test]
async fn delete_book_then_missing() {
    let app = TestApp::new();
    let stored = app.seed(dune());
    let uri = format!("/books/{}", stored.id);

    let (status, _) = app.send(Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app.send(Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app.send(Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn storage_failure_is_internal_error() {
    let app = TestApp::new();
    std::fs::remove_file(app.store.path()).unwrap();

    let (status, body) = app.send(Method::DELETE, "/books/1", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let error: Value = serde_json::from_slice(&body).unwrap();
    assert!(error["error"].as_str().unwrap().contains("does not exist"));
}
