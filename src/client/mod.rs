//! HTTP client adapter for the diagnosis API.
//!
//! Every outgoing request is built here: the bearer token is attached when
//! the session holds one, JSON bodies get a JSON content type, and multipart
//! image uploads carry no preset content type so the transport can set the
//! boundary. A `401` response with a refresh token present triggers exactly
//! one silent `POST token/refresh/`; on success the original request is
//! replayed once with the new token, on failure the session is cleared, the
//! navigator is forced to `/login`, and the original error is surfaced.

pub mod error;

pub use error::ApiError;

use crate::router::{Navigator, LOGIN_ROUTE};
use crate::session::SessionContext;
use crate::APP_USER_AGENT;
use reqwest::{multipart, Client, Method, Response, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{debug, error, warn};
use url::Url;

/// Maximum number of error body characters surfaced to the caller.
const MAX_ERROR_CHARS: usize = 200;

/// An image payload for multipart uploads.
#[derive(Clone, Debug)]
pub struct ImagePart {
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

/// Request body shapes the adapter knows how to build, kept rebuildable so a
/// refreshed request can be replayed.
#[derive(Clone, Debug)]
enum Body {
    Empty,
    Json(Value),
    Image(ImagePart),
}

/// Client for the diagnosis REST API.
///
/// Holds the session context and the navigator by reference; both are passed
/// in at construction, after the store and before any gateway call.
pub struct ApiClient {
    http: Client,
    base_url: String,
    session: Arc<SessionContext>,
    navigator: Arc<Navigator>,
}

impl ApiClient {
    /// Build a client for the given API base URL.
    ///
    /// # Errors
    /// Returns `ApiError::Config` if the base URL does not parse or the
    /// transport cannot be constructed.
    pub fn new(
        base_url: &str,
        session: Arc<SessionContext>,
        navigator: Arc<Navigator>,
    ) -> Result<Self, ApiError> {
        Url::parse(base_url)
            .map_err(|err| ApiError::Config(format!("invalid API base URL {base_url}: {err}")))?;

        let http = Client::builder()
            .user_agent(APP_USER_AGENT)
            .build()
            .map_err(|err| ApiError::Config(format!("failed to build HTTP client: {err}")))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            session,
            navigator,
        })
    }

    #[must_use]
    pub fn session(&self) -> &Arc<SessionContext> {
        &self.session
    }

    #[must_use]
    pub fn navigator(&self) -> &Arc<Navigator> {
        &self.navigator
    }

    /// GET a JSON resource.
    ///
    /// # Errors
    /// Propagates transport, HTTP and decoding errors.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.send(Method::GET, path, &Body::Empty).await?;
        Self::parse_json(response).await
    }

    /// POST a JSON body and parse a JSON response.
    ///
    /// # Errors
    /// Propagates transport, HTTP and decoding errors.
    pub async fn post_json<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &impl Serialize,
    ) -> Result<T, ApiError> {
        let body = Self::json_body(body)?;
        let response = self.send(Method::POST, path, &body).await?;
        Self::parse_json(response).await
    }

    /// POST a JSON body, expecting no meaningful response body.
    ///
    /// # Errors
    /// Propagates transport and HTTP errors.
    pub async fn post_json_empty(&self, path: &str, body: &impl Serialize) -> Result<(), ApiError> {
        let body = Self::json_body(body)?;
        let response = self.send(Method::POST, path, &body).await?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(Self::http_error(response).await)
        }
    }

    /// PATCH a JSON body and parse a JSON response.
    ///
    /// # Errors
    /// Propagates transport, HTTP and decoding errors.
    pub async fn patch_json<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &impl Serialize,
    ) -> Result<T, ApiError> {
        let body = Self::json_body(body)?;
        let response = self.send(Method::PATCH, path, &body).await?;
        Self::parse_json(response).await
    }

    /// POST an image as a multipart form under the `image` field.
    ///
    /// # Errors
    /// Propagates transport, HTTP and decoding errors.
    pub async fn post_image<T: DeserializeOwned>(
        &self,
        path: &str,
        image: ImagePart,
    ) -> Result<T, ApiError> {
        let response = self.send(Method::POST, path, &Body::Image(image)).await?;
        Self::parse_json(response).await
    }

    fn json_body(body: &impl Serialize) -> Result<Body, ApiError> {
        serde_json::to_value(body)
            .map(Body::Json)
            .map_err(|err| ApiError::Serialization(format!("failed to encode request: {err}")))
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Send a request, intercepting a single `401` for a token refresh.
    async fn send(&self, method: Method, path: &str, body: &Body) -> Result<Response, ApiError> {
        let access = self.session.access().await;
        let response = self
            .dispatch(method.clone(), path, body, access.as_ref())
            .await?;

        if response.status() != StatusCode::UNAUTHORIZED {
            return Ok(response);
        }

        let Some(refresh) = self.session.refresh().await else {
            return Err(self.expire(response).await);
        };

        // Concurrent in-flight requests are not coordinated: each 401 runs
        // its own refresh call.
        match self.refresh_access(&refresh).await {
            Ok(access) => {
                debug!("access token refreshed, replaying {method} {path}");
                self.dispatch(method, path, body, Some(&access)).await
            }
            Err(err) => {
                warn!("token refresh failed: {err}");
                Err(self.expire(response).await)
            }
        }
    }

    /// Build and send one request. No interception happens at this level.
    async fn dispatch(
        &self,
        method: Method,
        path: &str,
        body: &Body,
        access: Option<&SecretString>,
    ) -> Result<Response, ApiError> {
        let url = self.endpoint(path);
        let mut request = self.http.request(method, &url);

        if let Some(token) = access {
            request = request.bearer_auth(token.expose_secret());
        }

        request = match body {
            Body::Empty => request,
            Body::Json(value) => request.json(value),
            Body::Image(image) => {
                let part = multipart::Part::bytes(image.bytes.clone())
                    .file_name(image.file_name.clone())
                    .mime_str(&image.mime)
                    .map_err(|err| {
                        ApiError::Serialization(format!("invalid image content type: {err}"))
                    })?;

                request.multipart(multipart::Form::new().part("image", part))
            }
        };

        request
            .send()
            .await
            .map_err(|err| ApiError::Network(format!("unable to reach the server: {err}")))
    }

    /// Exchange the refresh token for a new access token and persist it.
    async fn refresh_access(&self, refresh: &SecretString) -> Result<SecretString, ApiError> {
        #[derive(Deserialize)]
        struct RefreshResponse {
            access: String,
        }

        let body = Body::Json(json!({ "refresh": refresh.expose_secret() }));
        let response = self
            .dispatch(Method::POST, "token/refresh/", &body, None)
            .await?;

        if !response.status().is_success() {
            return Err(Self::http_error(response).await);
        }

        let parsed: RefreshResponse = response
            .json()
            .await
            .map_err(|err| ApiError::Parse(format!("failed to decode refresh response: {err}")))?;

        let access = SecretString::from(parsed.access);
        self.session
            .update_access(access.clone())
            .await
            .map_err(|err| {
                ApiError::Config(format!("failed to persist refreshed access token: {err}"))
            })?;

        Ok(access)
    }

    /// Clear the session, force the login route, and keep the original error.
    async fn expire(&self, response: Response) -> ApiError {
        if let Err(err) = self.session.logout().await {
            error!("failed to clear session: {err}");
        }

        self.navigator.force(LOGIN_ROUTE).await;

        Self::http_error(response).await
    }

    async fn parse_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        if response.status().is_success() {
            response
                .json()
                .await
                .map_err(|err| ApiError::Parse(format!("failed to decode response: {err}")))
        } else {
            Err(Self::http_error(response).await)
        }
    }

    async fn http_error(response: Response) -> ApiError {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();

        ApiError::Http {
            status,
            message: sanitize_body(body),
        }
    }
}

/// Trim and truncate HTTP error bodies before surfacing them.
fn sanitize_body(body: String) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        "Request failed.".to_string()
    } else {
        trimmed.chars().take(MAX_ERROR_CHARS).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::router::{RouteTable, LOGIN_ROUTE};
    use crate::session::store::SessionStore;
    use crate::session::{Role, TokenGrant};
    use httpmock::prelude::*;

    struct Fixture {
        client: ApiClient,
        session: Arc<SessionContext>,
        navigator: Arc<Navigator>,
        _dir: tempfile::TempDir,
    }

    async fn fixture(server: &MockServer, grant: Option<TokenGrant>) -> Fixture {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = SessionStore::new(dir.path().join("session.json"));
        let session = Arc::new(SessionContext::open(store).expect("open session"));

        if let Some(grant) = grant {
            session.set_tokens(&grant).await.expect("set tokens");
        }

        let navigator = Arc::new(Navigator::new(RouteTable::default()));
        let client = ApiClient::new(
            &format!("{}/backend/", server.base_url()),
            Arc::clone(&session),
            Arc::clone(&navigator),
        )
        .expect("client");

        Fixture {
            client,
            session,
            navigator,
            _dir: dir,
        }
    }

    fn patient_grant() -> TokenGrant {
        TokenGrant {
            access: Some("old-access".to_string()),
            refresh: Some("refresh-token".to_string()),
            role: Some(Role::Patient),
            username: Some("ada".to_string()),
            user_id: Some("42".to_string()),
        }
    }

    #[tokio::test]
    async fn test_bearer_token_is_attached() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/backend/diagnosis_requests/")
                .header("authorization", "Bearer old-access");
            then.status(200)
                .header("content-type", "application/json")
                .body("[]");
        });

        let fixture = fixture(&server, Some(patient_grant())).await;
        let result: Vec<Value> = fixture
            .client
            .get_json("diagnosis_requests/")
            .await
            .expect("request succeeds");

        assert!(result.is_empty());
        mock.assert();
    }

    #[tokio::test]
    async fn test_multipart_upload_has_no_json_content_type() {
        let server = MockServer::start();

        // Defined first: a JSON content type on the upload would hit this.
        let json_mock = server.mock(|when, then| {
            when.method(POST)
                .path("/backend/diagnosis_requests/")
                .header("content-type", "application/json");
            then.status(500);
        });

        let upload_mock = server.mock(|when, then| {
            when.method(POST)
                .path("/backend/diagnosis_requests/")
                .body_contains("fake image bytes");
            then.status(201)
                .header("content-type", "application/json")
                .body(r#"{"id":1,"status":"pending"}"#);
        });

        let fixture = fixture(&server, Some(patient_grant())).await;
        let created: Value = fixture
            .client
            .post_image(
                "diagnosis_requests/",
                ImagePart {
                    file_name: "lesion.jpg".to_string(),
                    mime: "image/jpeg".to_string(),
                    bytes: b"fake image bytes".to_vec(),
                },
            )
            .await
            .expect("upload succeeds");

        assert_eq!(created["id"], 1);
        assert_eq!(json_mock.hits(), 0);
        upload_mock.assert();
    }

    #[tokio::test]
    async fn test_401_refreshes_once_and_replays() {
        let server = MockServer::start();

        let stale = server.mock(|when, then| {
            when.method(GET)
                .path("/backend/users/me/")
                .header("authorization", "Bearer old-access");
            then.status(401);
        });

        let refresh = server.mock(|when, then| {
            when.method(POST)
                .path("/backend/token/refresh/")
                .json_body(serde_json::json!({ "refresh": "refresh-token" }));
            then.status(200)
                .header("content-type", "application/json")
                .body(r#"{"access":"new-access"}"#);
        });

        let replay = server.mock(|when, then| {
            when.method(GET)
                .path("/backend/users/me/")
                .header("authorization", "Bearer new-access");
            then.status(200)
                .header("content-type", "application/json")
                .body(r#"{"id":42,"username":"ada"}"#);
        });

        let fixture = fixture(&server, Some(patient_grant())).await;
        let profile: Value = fixture
            .client
            .get_json("users/me/")
            .await
            .expect("replayed request succeeds");

        assert_eq!(profile["username"], "ada");
        stale.assert();
        refresh.assert();
        replay.assert();

        let access = fixture.session.access().await.expect("token kept");
        assert_eq!(access.expose_secret(), "new-access");
    }

    #[tokio::test]
    async fn test_failed_refresh_logs_out_and_redirects() {
        let server = MockServer::start();

        server.mock(|when, then| {
            when.method(GET).path("/backend/users/me/");
            then.status(401).body("token expired");
        });

        let refresh = server.mock(|when, then| {
            when.method(POST).path("/backend/token/refresh/");
            then.status(401).body("refresh expired");
        });

        let fixture = fixture(&server, Some(patient_grant())).await;
        let result: Result<Value, ApiError> = fixture.client.get_json("users/me/").await;

        let err = result.expect_err("original error surfaces");
        assert_eq!(err.status(), Some(401));

        refresh.assert();
        assert!(fixture.session.access().await.is_none());
        assert!(fixture.session.refresh().await.is_none());
        assert_eq!(fixture.navigator.location().await, LOGIN_ROUTE);
    }

    #[tokio::test]
    async fn test_401_without_refresh_token_logs_out() {
        let server = MockServer::start();

        server.mock(|when, then| {
            when.method(GET).path("/backend/users/me/");
            then.status(401);
        });

        let refresh = server.mock(|when, then| {
            when.method(POST).path("/backend/token/refresh/");
            then.status(200).body(r#"{"access":"unused"}"#);
        });

        let grant = TokenGrant {
            refresh: None,
            ..patient_grant()
        };
        let fixture = fixture(&server, Some(grant)).await;
        let result: Result<Value, ApiError> = fixture.client.get_json("users/me/").await;

        assert_eq!(result.expect_err("401 surfaces").status(), Some(401));
        assert_eq!(refresh.hits(), 0);
        assert!(fixture.session.access().await.is_none());
        assert_eq!(fixture.navigator.location().await, LOGIN_ROUTE);
    }

    #[tokio::test]
    async fn test_non_401_errors_bubble_unchanged() {
        let server = MockServer::start();

        server.mock(|when, then| {
            when.method(GET).path("/backend/diagnosis_requests/");
            then.status(503).body("maintenance");
        });

        let refresh = server.mock(|when, then| {
            when.method(POST).path("/backend/token/refresh/");
            then.status(200).body(r#"{"access":"unused"}"#);
        });

        let fixture = fixture(&server, Some(patient_grant())).await;
        let result: Result<Vec<Value>, ApiError> =
            fixture.client.get_json("diagnosis_requests/").await;

        let err = result.expect_err("error bubbles");
        assert_eq!(err.status(), Some(503));
        assert_eq!(refresh.hits(), 0);

        // The session survives non-auth failures.
        assert!(fixture.session.access().await.is_some());
    }

    #[test]
    fn test_sanitize_body_trims_and_truncates() {
        assert_eq!(sanitize_body(String::new()), "Request failed.");
        assert_eq!(sanitize_body("  oops  ".to_string()), "oops");

        let long = "x".repeat(MAX_ERROR_CHARS + 50);
        assert_eq!(sanitize_body(long).len(), MAX_ERROR_CHARS);
    }

    #[test]
    fn test_invalid_base_url_is_config_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = SessionStore::new(dir.path().join("session.json"));
        let session = Arc::new(SessionContext::open(store).expect("open session"));
        let navigator = Arc::new(Navigator::new(RouteTable::default()));

        let result = ApiClient::new("not a url", session, navigator);
        assert!(matches!(result, Err(ApiError::Config(_))));
    }
}
