//! Classification of GitHub API failures

use reqwest::Response;
use serde::Deserialize;
use thiserror::Error;

/// A failed GitHub API call, classified by what the caller can do about it
#[derive(Debug, Error)]
pub enum ApiError {
    /// 401 or a 403 that is not a rate limit
    #[error("authentication failed ({status}): {message}")]
    Unauthorized { status: u16, message: String },

    #[error("not found: {message}")]
    NotFound { message: String },

    /// 422; GitHub reports name collisions and empty pull requests this way
    #[error("validation failed: {message}")]
    Unprocessable { message: String },

    /// 429, or 403 with an exhausted rate-limit budget
    #[error("rate limit exceeded: {message}")]
    RateLimited { message: String },

    #[error("request timed out")]
    Timeout,

    #[error("GitHub API error ({status}): {message}")]
    Status { status: u16, message: String },

    #[error("transport error: {0}")]
    Transport(String),

    #[error("failed to decode response: {0}")]
    Decode(String),
}

#[derive(Deserialize, Default)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    errors: Vec<ErrorDetail>,
}

#[derive(Deserialize)]
struct ErrorDetail {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    field: Option<String>,
}

impl ApiError {
    /// Classify a non-success status
    ///
    /// `rate_limit_remaining` is the value of the `x-ratelimit-remaining`
    /// header, if present. `body` is the raw response body.
    pub fn from_status(status: u16, rate_limit_remaining: Option<&str>, body: &str) -> Self {
        let message = extract_message(body);
        let exhausted = rate_limit_remaining.map(str::trim) == Some("0");

        match status {
            401 => ApiError::Unauthorized { status, message },
            403 if exhausted => ApiError::RateLimited { message },
            403 => ApiError::Unauthorized { status, message },
            404 => ApiError::NotFound { message },
            422 => ApiError::Unprocessable { message },
            429 => ApiError::RateLimited { message },
            _ => ApiError::Status { status, message },
        }
    }

    pub(crate) async fn from_response(response: Response) -> Self {
        let status = response.status().as_u16();
        let remaining = response
            .headers()
            .get("x-ratelimit-remaining")
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);

        match response.text().await {
            Ok(body) => Self::from_status(status, remaining.as_deref(), &body),
            Err(e) => e.into(),
        }
    }

    /// The HTTP status behind this error, when there was one
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Unauthorized { status, .. } | ApiError::Status { status, .. } => {
                Some(*status)
            }
            ApiError::NotFound { .. } => Some(404),
            ApiError::Unprocessable { .. } => Some(422),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            ApiError::Timeout
        } else if error.is_decode() {
            ApiError::Decode(error.to_string())
        } else {
            ApiError::Transport(error.to_string())
        }
    }
}

/// Flatten GitHub's `{message, errors: [...]}` body into one line
fn extract_message(body: &str) -> String {
    let parsed: ErrorBody = match serde_json::from_str(body) {
        Ok(parsed) => parsed,
        Err(_) => {
            let trimmed = body.trim();
            return if trimmed.is_empty() {
                "Unknown error".to_string()
            } else {
                trimmed.to_string()
            };
        }
    };

    let mut parts: Vec<String> = parsed.message.into_iter().collect();
    for detail in parsed.errors {
        let text = match (detail.message, detail.field, detail.code) {
            (Some(message), _, _) => message,
            (None, Some(field), Some(code)) => format!("{} {}", field, code),
            (None, None, Some(code)) => code,
            _ => continue,
        };
        parts.push(text);
    }

    if parts.is_empty() {
        "Unknown error".to_string()
    } else {
        parts.join(": ")
    }
}
