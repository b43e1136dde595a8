use serde::de::DeserializeOwned;
use std::fmt;

/// A failed Supabase call: either no HTTP response at all (`status == None`)
/// or a non-success status with whatever message the service sent back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiFailure {
    pub status: Option<u16>,
    pub message: String,
}

impl ApiFailure {
    pub fn transport(err: reqwest::Error) -> Self {
        Self {
            status: None,
            message: err.to_string(),
        }
    }

    pub fn decode(err: impl fmt::Display) -> Self {
        Self {
            status: None,
            message: format!("unexpected response body: {err}"),
        }
    }

    pub async fn from_response(response: reqwest::Response) -> Self {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        let message = extract_message(&body).unwrap_or_else(|| {
            if body.trim().is_empty() {
                format!("HTTP {status}")
            } else {
                body.trim().to_string()
            }
        });

        Self {
            status: Some(status),
            message,
        }
    }
}

impl fmt::Display for ApiFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status {
            Some(status) => write!(f, "{} ({})", self.message, status),
            None => write!(f, "{}", self.message),
        }
    }
}

/// Sends `request` and decodes a JSON success body.
pub async fn send_json<T: DeserializeOwned>(request: reqwest::RequestBuilder) -> Result<T, ApiFailure> {
    let response = request.send().await.map_err(ApiFailure::transport)?;
    if !response.status().is_success() {
        return Err(ApiFailure::from_response(response).await);
    }
    response.json::<T>().await.map_err(ApiFailure::decode)
}

/// Sends `request`, ignoring any success body.
pub async fn send_unit(request: reqwest::RequestBuilder) -> Result<(), ApiFailure> {
    let response = request.send().await.map_err(ApiFailure::transport)?;
    if !response.status().is_success() {
        return Err(ApiFailure::from_response(response).await);
    }
    Ok(())
}

/// Pulls the human-readable message out of a Supabase error body.
///
/// Storage answers `{"statusCode","error","message"}`; GoTrue answers either
/// `{"error","error_description"}` or `{"code","error_code","msg"}`.
pub fn extract_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    ["message", "msg", "error_description", "error"]
        .iter()
        .find_map(|key| value.get(*key).and_then(|v| v.as_str()))
        .map(str::to_string)
}
