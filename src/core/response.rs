use crate::utils::error::{ClientError, Result};
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;

/// Outcome of one prices call: parsed `data` on 2xx, parsed `error` otherwise.
#[derive(Debug, Clone)]
pub struct ApiResponse<T> {
    pub status: StatusCode,
    pub data: Option<T>,
    pub error: Option<serde_json::Value>,
}

impl<T: DeserializeOwned> ApiResponse<T> {
    pub(crate) async fn from_response(response: Response) -> Result<Self> {
        let status = response.status();
        tracing::debug!("📡 Response status: {}", status);
        let body = response.text().await?;

        if status.is_success() {
            let data = if body.trim().is_empty() {
                None
            } else {
                Some(serde_json::from_str(&body)?)
            };
            return Ok(Self {
                status,
                data,
                error: None,
            });
        }

        // 錯誤回應不一定是 JSON，保留原文
        let error = if body.trim().is_empty() {
            None
        } else {
            Some(
                serde_json::from_str(&body)
                    .unwrap_or_else(|_| serde_json::Value::String(body.clone())),
            )
        };

        Ok(Self {
            status,
            data: None,
            error,
        })
    }
}

impl<T> ApiResponse<T> {
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Turns a non-2xx response into `ClientError::StatusError`.
    pub fn into_result(self) -> Result<Option<T>> {
        if self.status.is_success() {
            Ok(self.data)
        } else {
            Err(ClientError::StatusError {
                status: self.status.as_u16(),
                body: self.error.map(|e| e.to_string()).unwrap_or_default(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_result_on_error_status() {
        let response: ApiResponse<serde_json::Value> = ApiResponse {
            status: StatusCode::UNAUTHORIZED,
            data: None,
            error: Some(serde_json::json!({"detail": "Not authenticated"})),
        };
        assert!(!response.is_success());
        match response.into_result() {
            Err(ClientError::StatusError { status, body }) => {
                assert_eq!(status, 401);
                assert!(body.contains("Not authenticated"));
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_into_result_on_empty_success() {
        let response: ApiResponse<serde_json::Value> = ApiResponse {
            status: StatusCode::NO_CONTENT,
            data: None,
            error: None,
        };
        assert!(response.into_result().unwrap().is_none());
    }
}
