//! Medical verification calls: the dermatologist-facing side.

use crate::client::{ApiClient, ApiError};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// A diagnosis result awaiting verification.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PendingVerification {
    pub id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub predicted_condition: Option<String>,
}

/// List results still waiting for a verification decision.
///
/// # Errors
/// Propagates adapter errors unchanged.
pub async fn list_pending(client: &ApiClient) -> Result<Vec<PendingVerification>, ApiError> {
    client.get_json("medical_verifications/?status=pending").await
}

/// Record a verification decision for a result.
///
/// The doctor id is taken from the session, as stored at login. The created
/// record is returned as-is.
///
/// # Errors
/// Returns `ApiError::Config` when no user id is present in the session;
/// adapter errors propagate unchanged.
pub async fn submit(
    client: &ApiClient,
    result_id: i64,
    condition_id: i64,
) -> Result<Value, ApiError> {
    let doctor_id = client
        .session()
        .user_id()
        .await
        .ok_or_else(|| ApiError::Config("no signed-in user id in the session".to_string()))?;

    client
        .post_json(
            "medical_verifications/",
            &json!({
                "result": result_id,
                "doctor_id": doctor_id,
                "actual_condition": condition_id,
            }),
        )
        .await
}
