//! Tests for the create controller and form validation/coercion.
use bouquin::client::BookClient;
use bouquin::controller::{CreateController, CreateOutcome};
use bouquin::model::{BookForm, FormError};
use bouquin::session;

fn valid_form() -> BookForm {
    BookForm {
        title: "T".to_string(),
        author: "A".to_string(),
        genre: "G".to_string(),
        year: "2024".to_string(),
        price: "9.99".to_string(),
        ..BookForm::default()
    }
}

fn client_for(url: &str) -> BookClient {
    BookClient::new(session::shared(url))
}

#[test]
fn test_validation_rejections() {
    let mut form = valid_form();
    form.title = "".to_string();
    assert_eq!(form.validate().unwrap_err(), FormError::MissingTitle);

    let mut form = valid_form();
    form.title = "   ".to_string();
    assert_eq!(form.validate().unwrap_err(), FormError::MissingTitle);

    let mut form = valid_form();
    form.author = "".to_string();
    assert_eq!(form.validate().unwrap_err(), FormError::MissingAuthor);

    let mut form = valid_form();
    form.genre = "".to_string();
    assert_eq!(form.validate().unwrap_err(), FormError::MissingGenre);

    let mut form = valid_form();
    form.year = "-1".to_string();
    assert_eq!(form.validate().unwrap_err(), FormError::InvalidYear);

    let mut form = valid_form();
    form.year = "soon".to_string();
    assert_eq!(form.validate().unwrap_err(), FormError::InvalidYear);

    let mut form = valid_form();
    form.price = "abc".to_string();
    assert_eq!(form.validate().unwrap_err(), FormError::InvalidPrice);

    let mut form = valid_form();
    form.price = "-0.5".to_string();
    assert_eq!(form.validate().unwrap_err(), FormError::InvalidPrice);

    let mut form = valid_form();
    form.price = "NaN".to_string();
    assert_eq!(form.validate().unwrap_err(), FormError::InvalidPrice);
}

#[test]
fn test_validation_coerces_types() {
    let payload = valid_form().validate().unwrap();
    assert_eq!(payload.title, "T");
    assert_eq!(payload.author, "A");
    assert_eq!(payload.genre, "G");
    assert_eq!(payload.year, 2024);
    assert_eq!(payload.price, 9.99);
    assert!(payload.available);
}

#[test]
fn test_validation_trims_text_fields() {
    let form = BookForm {
        title: "  T  ".to_string(),
        author: " A ".to_string(),
        genre: " G ".to_string(),
        description: " long ago ".to_string(),
        year: " 2024 ".to_string(),
        price: " 9.99 ".to_string(),
        available: false,
    };
    let payload = form.validate().unwrap();
    assert_eq!(payload.title, "T");
    assert_eq!(payload.description, "long ago");
    assert_eq!(payload.year, 2024);
    assert!(!payload.available);
}

#[test]
fn test_fresh_create_screen_seeds() {
    let ctl = CreateController::new();
    assert_eq!(ctl.form().year, "2024");
    assert_eq!(ctl.form().price, "0");
    assert!(ctl.form().available);
    assert!(ctl.form().title.is_empty());
}

#[tokio::test]
async fn test_validation_failure_never_reaches_the_network() {
    let mut server = mockito::Server::new_async().await;
    let client = client_for(&server.url());

    let mock = server
        .mock("POST", "/api/books")
        .expect(0)
        .create_async()
        .await;

    let mut ctl = CreateController::new();
    // Seeded form has an empty title.
    let err = ctl.submit(&client).await.unwrap_err();
    assert_eq!(err, "Title is required");
    assert!(!ctl.is_submitting());

    mock.assert_async().await;
}

#[tokio::test]
async fn test_submit_navigates_to_detail_when_id_returned() {
    for body in [
        r#"{"book":{"_id":"new-1","title":"T","author":"A","available":true}}"#,
        r#"{"_id":"new-1","title":"T","author":"A","available":true}"#,
    ] {
        let mut server = mockito::Server::new_async().await;
        let client = client_for(&server.url());
        let _mock = server
            .mock("POST", "/api/books")
            .with_status(201)
            .with_body(body)
            .create_async()
            .await;

        let mut ctl = CreateController::new();
        *ctl.form_mut() = valid_form();
        let outcome = ctl.submit(&client).await.unwrap();
        assert_eq!(outcome, CreateOutcome::ShowDetail("new-1".to_string()));
    }
}

#[tokio::test]
async fn test_submit_navigates_back_without_an_id() {
    let mut server = mockito::Server::new_async().await;
    let client = client_for(&server.url());

    let _mock = server
        .mock("POST", "/api/books")
        .with_status(201)
        .with_body(r#"{"ok":true}"#)
        .create_async()
        .await;

    let mut ctl = CreateController::new();
    *ctl.form_mut() = valid_form();
    let outcome = ctl.submit(&client).await.unwrap();
    assert_eq!(outcome, CreateOutcome::Back);
}

#[tokio::test]
async fn test_submit_failure_leaves_form_intact() {
    let mut server = mockito::Server::new_async().await;
    let client = client_for(&server.url());

    let _mock = server
        .mock("POST", "/api/books")
        .with_status(401)
        .with_body(r#"{"message":"sign in first"}"#)
        .create_async()
        .await;

    let mut ctl = CreateController::new();
    *ctl.form_mut() = valid_form();
    let err = ctl.submit(&client).await.unwrap_err();
    assert_eq!(err, "sign in first");
    assert!(!ctl.is_submitting());
    assert_eq!(*ctl.form(), valid_form());
}
