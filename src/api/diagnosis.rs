//! Diagnosis request calls: the patient-facing side of the workflow.

use crate::client::{ApiClient, ApiError, ImagePart};
use serde::{Deserialize, Serialize};

/// A submitted diagnosis request. Beyond the id and the image reference the
/// payload is opaque to this client; optional fields simply pass through.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DiagnosisRequest {
    pub id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub predicted_condition: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// List the caller's own diagnosis requests.
///
/// # Errors
/// Propagates adapter errors unchanged.
pub async fn list(client: &ApiClient) -> Result<Vec<DiagnosisRequest>, ApiError> {
    client.get_json("diagnosis_requests/").await
}

/// Submit a new diagnosis request with the image as a multipart body.
///
/// # Errors
/// Propagates adapter errors unchanged.
pub async fn submit(client: &ApiClient, image: ImagePart) -> Result<DiagnosisRequest, ApiError> {
    client.post_image("diagnosis_requests/", image).await
}

/// Fetch one diagnosis request by id.
///
/// # Errors
/// Propagates adapter errors unchanged.
pub async fn fetch(client: &ApiClient, id: i64) -> Result<DiagnosisRequest, ApiError> {
    client.get_json(&format!("diagnosis_requests/{id}/")).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::router::{Navigator, RouteTable};
    use crate::session::store::SessionStore;
    use crate::session::SessionContext;
    use httpmock::prelude::*;
    use std::sync::Arc;

    fn client_for(server: &MockServer, dir: &tempfile::TempDir) -> ApiClient {
        let store = SessionStore::new(dir.path().join("session.json"));
        let session = Arc::new(SessionContext::open(store).expect("open session"));
        let navigator = Arc::new(Navigator::new(RouteTable::default()));

        ApiClient::new(&format!("{}/backend/", server.base_url()), session, navigator)
            .expect("client")
    }

    #[tokio::test]
    async fn test_list_parses_requests() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/backend/diagnosis_requests/");
            then.status(200)
                .header("content-type", "application/json")
                .body(
                    r#"[{"id":1,"image":"/media/a.jpg","status":"pending"},
                        {"id":2,"status":"verified","predicted_condition":"eczema"}]"#,
                );
        });

        let dir = tempfile::tempdir().expect("tempdir");
        let client = client_for(&server, &dir);

        let requests = list(&client).await.expect("list succeeds");
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].image.as_deref(), Some("/media/a.jpg"));
        assert_eq!(requests[1].predicted_condition.as_deref(), Some("eczema"));
    }

    #[tokio::test]
    async fn test_fetch_uses_detail_path() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/backend/diagnosis_requests/7/");
            then.status(200)
                .header("content-type", "application/json")
                .body(r#"{"id":7,"status":"pending"}"#);
        });

        let dir = tempfile::tempdir().expect("tempdir");
        let client = client_for(&server, &dir);

        let request = fetch(&client, 7).await.expect("fetch succeeds");
        assert_eq!(request.id, 7);
        mock.assert();
    }
}
