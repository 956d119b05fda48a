//! JSON-over-HTTP plumbing shared by the service clients.

use reqwest::RequestBuilder;
use serde_json::Value;
use tracing::debug;

use crate::domain::errors::ServiceError;

/// Send `request` and decode a JSON body, mapping every failure to a
/// [`ServiceError`] naming `url`.
pub async fn send_json(request: RequestBuilder, url: &str) -> Result<Value, ServiceError> {
    let response = request.send().await.map_err(|err| ServiceError::Transport {
        url: url.to_string(),
        reason: err.to_string(),
    })?;

    let status = response.status();
    debug!(url, status = status.as_u16(), "response received");
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ServiceError::Status {
            url: url.to_string(),
            status: status.as_u16(),
            body,
        });
    }

    response.json::<Value>().await.map_err(|err| ServiceError::Decode {
        url: url.to_string(),
        reason: err.to_string(),
    })
}

/// Join a path onto a base URL with exactly one slash between them.
pub fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
