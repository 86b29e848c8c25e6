//! Tests for the request helper: URL joining, header merging, bearer
//! attachment, and the raw/JSON split.
use bouquin::client::{ApiError, BookClient, RequestOptions};
use bouquin::session;
use mockito::Matcher;

fn client_for(url: &str) -> BookClient {
    BookClient::new(session::shared(url))
}

#[tokio::test]
async fn test_url_join_has_exactly_one_slash() {
    let mut server = mockito::Server::new_async().await;
    let url = server.url();

    // The mock only matches the exact path "/api/books"; a double or
    // missing slash would miss it.
    let mock = server
        .mock("GET", "/api/books")
        .with_status(200)
        .with_body("{}")
        .expect(4)
        .create_async()
        .await;

    for base in [url.clone(), format!("{}/", url)] {
        for path in ["/api/books", "api/books"] {
            let client = client_for(&base);
            let resp = client
                .api_fetch(path, RequestOptions::get())
                .await
                .unwrap();
            assert!(resp.status.is_success());
        }
    }

    mock.assert_async().await;
}

#[tokio::test]
async fn test_bearer_header_attached_when_token_set() {
    let mut server = mockito::Server::new_async().await;
    let client = client_for(&server.url());

    let mock = server
        .mock("GET", "/api/books")
        .match_header("Authorization", "Bearer abc")
        .with_status(200)
        .with_body("{}")
        .create_async()
        .await;

    client.session().write().unwrap().set_token("abc");
    client
        .api_fetch("/api/books", RequestOptions::get())
        .await
        .unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn test_no_bearer_header_without_token() {
    let mut server = mockito::Server::new_async().await;
    let client = client_for(&server.url());

    let mock = server
        .mock("GET", "/api/books")
        .match_header("Authorization", Matcher::Missing)
        .with_status(200)
        .with_body("{}")
        .create_async()
        .await;

    client
        .api_fetch("/api/books", RequestOptions::get())
        .await
        .unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn test_token_change_observed_by_next_request() {
    let mut server = mockito::Server::new_async().await;
    let client = client_for(&server.url());

    let anon = server
        .mock("GET", "/api/books")
        .match_header("Authorization", Matcher::Missing)
        .with_status(200)
        .with_body("{}")
        .create_async()
        .await;
    client
        .api_fetch("/api/books", RequestOptions::get())
        .await
        .unwrap();
    anon.assert_async().await;

    // No client rebuild needed: the layer reads the session per call.
    client.session().write().unwrap().set_token("fresh");
    let authed = server
        .mock("GET", "/api/books")
        .match_header("Authorization", "Bearer fresh")
        .with_status(200)
        .with_body("{}")
        .create_async()
        .await;
    client
        .api_fetch("/api/books", RequestOptions::get())
        .await
        .unwrap();
    authed.assert_async().await;
}

#[tokio::test]
async fn test_default_headers_and_user_agent() {
    let mut server = mockito::Server::new_async().await;
    let client = client_for(&server.url());

    let mock = server
        .mock("GET", "/api/books")
        .match_header("Accept", "application/json")
        .match_header("Content-Type", "application/json")
        .match_header("User-Agent", Matcher::Regex("^bouquin/".to_string()))
        .with_status(200)
        .with_body("{}")
        .create_async()
        .await;

    client
        .api_fetch("/api/books", RequestOptions::get())
        .await
        .unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn test_caller_headers_override_defaults() {
    let mut server = mockito::Server::new_async().await;
    let client = client_for(&server.url());

    let mock = server
        .mock("GET", "/api/books")
        .match_header("Content-Type", "text/plain")
        .with_status(200)
        .with_body("{}")
        .create_async()
        .await;

    let opts = RequestOptions {
        headers: vec![("Content-Type".to_string(), "text/plain".to_string())],
        ..RequestOptions::get()
    };
    client.api_fetch("/api/books", opts).await.unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn test_api_json_uses_server_message_on_failure() {
    let mut server = mockito::Server::new_async().await;
    let client = client_for(&server.url());

    let _mock = server
        .mock("GET", "/api/books")
        .with_status(500)
        .with_body(r#"{"message":"boom"}"#)
        .create_async()
        .await;

    let err = client
        .api_json("/api/books", RequestOptions::get())
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "boom");
    assert_eq!(err.status(), Some(500));
}

#[tokio::test]
async fn test_api_json_generic_message_without_body_field() {
    let mut server = mockito::Server::new_async().await;
    let client = client_for(&server.url());

    let _mock = server
        .mock("GET", "/api/books")
        .with_status(404)
        .with_body("gone")
        .create_async()
        .await;

    let err = client
        .api_json("/api/books", RequestOptions::get())
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "HTTP 404");
}

#[tokio::test]
async fn test_api_json_swallows_unparsable_success_body() {
    let mut server = mockito::Server::new_async().await;
    let client = client_for(&server.url());

    let _mock = server
        .mock("GET", "/api/books")
        .with_status(200)
        .with_body("certainly not json")
        .create_async()
        .await;

    let json = client
        .api_json("/api/books", RequestOptions::get())
        .await
        .unwrap();
    assert_eq!(json, serde_json::json!({}));
}

#[tokio::test]
async fn test_delete_book_tolerates_empty_body() {
    let mut server = mockito::Server::new_async().await;
    let client = client_for(&server.url());

    let mock = server
        .mock("DELETE", "/api/books/42")
        .with_status(204)
        .create_async()
        .await;

    client.delete_book("42").await.unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn test_delete_book_surfaces_server_message() {
    let mut server = mockito::Server::new_async().await;
    let client = client_for(&server.url());

    let _mock = server
        .mock("DELETE", "/api/books/42")
        .with_status(403)
        .with_body(r#"{"message":"not yours"}"#)
        .create_async()
        .await;

    let err = client.delete_book("42").await.unwrap_err();
    assert_eq!(err, ApiError::Http {
        status: 403,
        message: "not yours".to_string()
    });
}

#[tokio::test]
async fn test_fetch_books_reads_collection_and_tolerates_missing_field() {
    let mut server = mockito::Server::new_async().await;
    let client = client_for(&server.url());

    let _mock = server
        .mock("GET", Matcher::Regex("^/api/books".to_string()))
        .match_query(Matcher::UrlEncoded("page".into(), "1".into()))
        .with_status(200)
        .with_body(r#"{"books":[{"_id":"1","title":"Dune","author":"Herbert","available":true}]}"#)
        .create_async()
        .await;

    let books = client.fetch_books(1, 20).await.unwrap();
    assert_eq!(books.len(), 1);
    assert_eq!(books[0].title, "Dune");

    let _mock2 = server
        .mock("GET", Matcher::Regex("^/api/books".to_string()))
        .match_query(Matcher::UrlEncoded("page".into(), "2".into()))
        .with_status(200)
        .with_body(r#"{"total":0}"#)
        .create_async()
        .await;

    let empty = client.fetch_books(2, 20).await.unwrap();
    assert!(empty.is_empty());
}
