use crate::error::{AdapterError, AdapterResult};
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;

const MAX_ERROR_BODY_CHARS: usize = 200;

pub fn build_backend_client(timeout_secs: u64) -> Client {
    Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .pool_max_idle_per_host(4)
        .pool_idle_timeout(Duration::from_secs(90))
        .build()
        .unwrap_or_else(|_| Client::new())
}

/// Append percent-encoded path segments to `base`.
pub fn endpoint_url(base: &str, segments: &[&str]) -> AdapterResult<Url> {
    let mut url = Url::parse(base)?;
    url.path_segments_mut()
        .map_err(|()| AdapterError::Endpoint(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

/// `{"error": {"code": ..., "message": ...}}` envelope used by the backends.
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    code: Option<String>,
    message: String,
}

/// Decode a JSON body; 404 maps to `Ok(None)`.
pub async fn read_json<T: DeserializeOwned>(response: Response) -> AdapterResult<Option<T>> {
    let status = response.status();
    if status == StatusCode::NOT_FOUND {
        return Ok(None);
    }
    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return Err(AdapterError::Unauthorized {
            code: status.as_u16(),
        });
    }

    let body = response.text().await?;
    if !status.is_success() {
        return Err(AdapterError::Status {
            code: status.as_u16(),
            message: error_message(&body),
        });
    }

    serde_json::from_str(&body)
        .map(Some)
        .map_err(|e| AdapterError::Decode(e.to_string()))
}

fn error_message(body: &str) -> String {
    if let Ok(envelope) = serde_json::from_str::<ErrorEnvelope>(body) {
        return match envelope.error.code {
            Some(code) => format!("{code}: {}", envelope.error.message),
            None => envelope.error.message,
        };
    }
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return "empty response body".into();
    }
    trimmed.chars().take(MAX_ERROR_BODY_CHARS).collect()
}
