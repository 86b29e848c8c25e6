// File: ./src/client/core.rs
//! HTTP request helper and typed operations against the book API.
//!
//! `api_fetch` returns the raw status + collected body so callers can branch
//! on status codes (the detail screen distinguishes "not found" from other
//! failures); `api_json` is the convenience form used by plain CRUD calls.
use crate::client::error::ApiError;
use crate::client::middleware::{
    BearerAuthLayer, BearerAuthService, UserAgentLayer, UserAgentService,
};
use crate::model::{Book, BookEnvelope, BookPage, BookPayload};
use crate::session::SharedSession;

use http::{HeaderValue, Method, Request, StatusCode};
use http_body_util::BodyExt;
use hyper_rustls::HttpsConnectorBuilder;
use hyper_util::client::legacy::Client;
use hyper_util::rt::TokioExecutor;
use tower::ServiceExt;
use tower_layer::Layer;

type HttpsClient = Client<
    hyper_rustls::HttpsConnector<hyper_util::client::legacy::connect::HttpConnector>,
    String,
>;

type ApiService = UserAgentService<BearerAuthService<HttpsClient>>;

/// Join the base URL and a path with exactly one separating slash,
/// regardless of trailing/leading slashes on either side.
fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Caller-controlled parts of a request. Defaults to a bare GET.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub method: Method,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl RequestOptions {
    pub fn get() -> Self {
        Self::default()
    }

    pub fn post(body: String) -> Self {
        Self {
            method: Method::POST,
            body: Some(body),
            ..Self::default()
        }
    }

    pub fn put(body: String) -> Self {
        Self {
            method: Method::PUT,
            body: Some(body),
            ..Self::default()
        }
    }

    pub fn delete() -> Self {
        Self {
            method: Method::DELETE,
            ..Self::default()
        }
    }
}

/// A response with its body already collected, unparsed.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: String,
}

impl ApiResponse {
    /// Parse the body as JSON; an empty or unparsable body becomes `{}`.
    pub fn json(&self) -> serde_json::Value {
        match serde_json::from_str(&self.body) {
            Ok(v) => v,
            Err(e) => {
                if !self.body.trim().is_empty() {
                    log::debug!("response body is not valid JSON ({}), treating as empty", e);
                }
                serde_json::Value::Object(serde_json::Map::new())
            }
        }
    }
}

#[derive(Clone, Debug)]
pub struct BookClient {
    session: SharedSession,
    service: ApiService,
}

impl BookClient {
    /// Build the HTTPS-capable client. The default deployment is plain-HTTP
    /// LAN, so an empty system trust store only degrades HTTPS requests
    /// rather than failing construction.
    pub fn new(session: SharedSession) -> Self {
        let mut root_store = rustls::RootCertStore::empty();
        let result = rustls_native_certs::load_native_certs();
        root_store.add_parsable_certificates(result.certs);
        if root_store.is_empty() {
            log::warn!("No valid system certificates found; https requests will fail");
        }

        let tls_config = rustls::ClientConfig::builder()
            .with_root_certificates(root_store)
            .with_no_client_auth();

        let https_connector = HttpsConnectorBuilder::new()
            .with_tls_config(tls_config)
            .https_or_http()
            .enable_http1()
            .build();

        let http_client = Client::builder(TokioExecutor::new()).build(https_connector);
        let service = UserAgentLayer::new(format!("bouquin/{}", env!("CARGO_PKG_VERSION")))
            .layer(BearerAuthLayer::new(session.clone()).layer(http_client));

        Self { session, service }
    }

    pub fn session(&self) -> &SharedSession {
        &self.session
    }

    /// Issue a request and return the raw status and body.
    ///
    /// The URL is the session's base URL (read on every call) joined with
    /// `path`. Default headers (`Accept`, `Content-Type`) are set first and
    /// caller-supplied headers override them; the bearer layer attaches
    /// `Authorization` last when a token is present.
    pub async fn api_fetch(
        &self,
        path: &str,
        opts: RequestOptions,
    ) -> Result<ApiResponse, ApiError> {
        let url = {
            let session = self
                .session
                .read()
                .map_err(|_| ApiError::Network("session lock poisoned".to_string()))?;
            join_url(session.base_url(), path)
        };

        let mut builder = Request::builder().method(opts.method.clone()).uri(url.as_str());

        {
            // headers_mut() is None when the builder already holds an error
            // (e.g. an unparsable URL).
            let headers = builder
                .headers_mut()
                .ok_or_else(|| ApiError::Network(format!("invalid request URL: {}", url)))?;
            headers.insert(
                http::header::ACCEPT,
                HeaderValue::from_static("application/json"),
            );
            headers.insert(
                http::header::CONTENT_TYPE,
                HeaderValue::from_static("application/json"),
            );
            for (name, value) in &opts.headers {
                let name: http::header::HeaderName = name
                    .parse()
                    .map_err(|_| ApiError::Network(format!("invalid header name: {}", name)))?;
                let value = HeaderValue::from_str(value)
                    .map_err(|_| ApiError::Network(format!("invalid header value: {}", value)))?;
                headers.insert(name, value);
            }
        }

        let req = builder
            .body(opts.body.unwrap_or_default())
            .map_err(|e| ApiError::Network(e.to_string()))?;

        log::debug!("{} {}", req.method(), url);

        let resp = self
            .service
            .clone()
            .oneshot(req)
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let (parts, body) = resp.into_parts();
        let bytes = body
            .collect()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?
            .to_bytes();

        Ok(ApiResponse {
            status: parts.status,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        })
    }

    /// Issue a request and parse the body as JSON.
    ///
    /// On a non-2xx status this fails with the body's `message` field when
    /// present, else `HTTP <status>`. An unparsable body is treated as an
    /// empty object, not a parse error.
    pub async fn api_json(
        &self,
        path: &str,
        opts: RequestOptions,
    ) -> Result<serde_json::Value, ApiError> {
        let resp = self.api_fetch(path, opts).await?;
        let json = resp.json();
        if !resp.status.is_success() {
            return Err(ApiError::from_response(resp.status, &json));
        }
        Ok(json)
    }

    // --- TYPED BOOK OPERATIONS ---

    pub async fn fetch_books(&self, page: u32, limit: u32) -> Result<Vec<Book>, ApiError> {
        let json = self
            .api_json(
                &format!("/api/books?page={}&limit={}", page, limit),
                RequestOptions::get(),
            )
            .await?;
        // A body without a `books` collection yields an empty list.
        let parsed: BookPage = serde_json::from_value(json).unwrap_or_default();
        Ok(parsed.books)
    }

    /// Fetch one record. `Ok(None)` means the server said 404; other non-2xx
    /// statuses are errors.
    pub async fn fetch_book(&self, id: &str) -> Result<Option<Book>, ApiError> {
        let resp = self
            .api_fetch(&format!("/api/books/{}", id), RequestOptions::get())
            .await?;
        if resp.status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let json = resp.json();
        if !resp.status.is_success() {
            return Err(ApiError::from_response(resp.status, &json));
        }
        let envelope: BookEnvelope =
            serde_json::from_value(json).map_err(|e| ApiError::Shape(e.to_string()))?;
        Ok(Some(envelope.into_book()))
    }

    /// Create a record. Returns the created record when the backend sends
    /// one back with an identifier; `None` when it does not.
    pub async fn create_book(&self, payload: &BookPayload) -> Result<Option<Book>, ApiError> {
        let body =
            serde_json::to_string(payload).map_err(|e| ApiError::Network(e.to_string()))?;
        let json = self.api_json("/api/books", RequestOptions::post(body)).await?;
        Ok(serde_json::from_value::<BookEnvelope>(json)
            .ok()
            .map(BookEnvelope::into_book))
    }

    pub async fn update_book(&self, id: &str, payload: &BookPayload) -> Result<(), ApiError> {
        let body =
            serde_json::to_string(payload).map_err(|e| ApiError::Network(e.to_string()))?;
        self.api_json(&format!("/api/books/{}", id), RequestOptions::put(body))
            .await?;
        Ok(())
    }

    pub async fn delete_book(&self, id: &str) -> Result<(), ApiError> {
        let resp = self
            .api_fetch(&format!("/api/books/{}", id), RequestOptions::delete())
            .await?;
        if !resp.status.is_success() {
            return Err(ApiError::from_response(resp.status, &resp.json()));
        }
        Ok(())
    }
}
