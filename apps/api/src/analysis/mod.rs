//! Résumé analysis: upload gate → text extraction → schema-constrained LLM critique.
//!
//! The remote call sits behind `ResumeAnalyzer`; `AppState` holds an
//! `Arc<dyn ResumeAnalyzer>` so handlers never talk to the network directly.

pub mod handlers;
pub mod prompts;
pub mod schema;

use async_trait::async_trait;
use serde_json::Value;

use crate::analysis::prompts::analysis_system;
use crate::analysis::schema::AnalysisSchema;
use crate::errors::AppError;
use crate::llm_client::{LlmClient, LlmError};

#[async_trait]
pub trait ResumeAnalyzer: Send + Sync {
    /// Returns the model's JSON object for `text`, shaped by `schema`.
    async fn request_analysis(&self, text: &str, schema: &AnalysisSchema)
        -> Result<Value, AppError>;
}

/// Analyzer backed by the Gemini client.
pub struct LlmResumeAnalyzer(pub LlmClient);

#[async_trait]
impl ResumeAnalyzer for LlmResumeAnalyzer {
    async fn request_analysis(
        &self,
        text: &str,
        schema: &AnalysisSchema,
    ) -> Result<Value, AppError> {
        self.0
            .call_json(text, &analysis_system(), &schema.to_response_schema())
            .await
            .map_err(analysis_failed)
    }
}

/// Every remote failure is a server fault; the detail stays in the log.
fn analysis_failed(err: LlmError) -> AppError {
    AppError::Llm(format!("Resume analysis failed: {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;

    #[test]
    fn test_api_error_maps_to_llm_with_detail() {
        let err = analysis_failed(LlmError::Api {
            status: 403,
            message: "API key not valid. Please pass a valid API key.".to_string(),
        });
        match err {
            AppError::Llm(msg) => {
                assert!(msg.contains("status 403"), "got: {msg}");
                assert!(msg.contains("API key not valid"), "got: {msg}");
            }
            other => panic!("expected Llm error, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_and_blocked_map_to_llm() {
        assert!(matches!(
            analysis_failed(LlmError::EmptyContent),
            AppError::Llm(_)
        ));
        assert!(matches!(
            analysis_failed(LlmError::Blocked {
                reason: "SAFETY".to_string()
            }),
            AppError::Llm(_)
        ));
    }

    #[tokio::test]
    async fn test_api_error_detail_is_redacted_in_response() {
        let response = analysis_failed(LlmError::Api {
            status: 400,
            message: "API key AIza-secret-123 not valid".to_string(),
        })
        .into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"], "Failed to analyze resume");
        assert!(!body.to_string().contains("AIza-secret-123"));
    }
}
