use thiserror::Error;

/// Failure of a single REST call. Views turn it into an inline message.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-2xx answer; `body` is whatever the server sent back (often a bare message).
    #[error("Server returned {status}: {body}")]
    Server { status: u16, body: String },

    #[error("Unexpected response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Not signed in")]
    MissingIdentity,

    #[error("Invalid request path: {0}")]
    InvalidPath(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Server { status: 401 | 403, .. })
    }

    /// Short text suitable for the status line.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Server { status, body } => {
                let text = server_text(body);
                if text.is_empty() {
                    format!("Request failed ({})", status)
                } else {
                    text
                }
            }
            ApiError::Transport(e) if e.is_timeout() => "Server did not answer in time".to_string(),
            ApiError::Transport(e) if e.is_connect() => "Cannot reach the server".to_string(),
            other => other.to_string(),
        }
    }
}

// Error bodies come back as plain text, a JSON string, or `{"message": ...}`.
fn server_text(body: &str) -> String {
    let trimmed = body.trim();
    match serde_json::from_str::<serde_json::Value>(trimmed) {
        Ok(serde_json::Value::String(s)) => s,
        Ok(serde_json::Value::Object(map)) => ["message", "error"]
            .iter()
            .find_map(|k| map.get(*k).and_then(|v| v.as_str()))
            .map(str::to_string)
            .unwrap_or_else(|| trimmed.to_string()),
        _ => trimmed.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn server(status: u16, body: &str) -> ApiError {
        ApiError::Server {
            status,
            body: body.to_string(),
        }
    }

    #[test]
    fn test_user_message_shapes() {
        assert_eq!(server(400, "Email already exists").user_message(), "Email already exists");
        assert_eq!(server(400, "\"Invalid credentials\"").user_message(), "Invalid credentials");
        assert_eq!(
            server(500, r#"{"status":500,"error":"Internal Server Error"}"#).user_message(),
            "Internal Server Error"
        );
        assert_eq!(server(404, "  ").user_message(), "Request failed (404)");
        assert_eq!(ApiError::MissingIdentity.user_message(), "Not signed in");
    }

    #[test]
    fn test_unauthorized() {
        assert!(server(401, "").is_unauthorized());
        assert!(!server(400, "").is_unauthorized());
    }
}
