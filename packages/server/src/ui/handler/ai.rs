//! AI proxy endpoint handlers.

use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde_json::json;

use crate::{
    domain::GenerationOptions,
    infrastructure::dto::http::{
        GenerateRequest, GenerateResponse, ProviderInfo, ProvidersResponse,
    },
    ui::state::AppState,
    usecase::GenerateError,
};

/// POST /api/ai/generate
pub async fn generate(
    State(state): State<Arc<AppState>>,
    Json(request): Json<GenerateRequest>,
) -> impl IntoResponse {
    let options = GenerationOptions {
        model: request.options.model,
        temperature: request.options.temperature,
        max_tokens: request.options.max_tokens,
    };

    match state
        .generate_ai_response_usecase
        .execute(&request.prompt, &options)
        .await
    {
        Ok(generated) => Json(GenerateResponse {
            response: generated.text,
            provider: generated.provider.to_string(),
            success: true,
        })
        .into_response(),
        Err(GenerateError::EmptyPrompt) => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "prompt required" })),
        )
            .into_response(),
        Err(GenerateError::AllProvidersFailed { provider, details }) => (
            StatusCode::BAD_GATEWAY,
            Json(json!({
                "error": "AI backend error",
                "details": details,
                "provider": provider,
                "success": false,
            })),
        )
            .into_response(),
    }
}

/// GET /api/ai/providers
pub async fn providers(State(state): State<Arc<AppState>>) -> Json<ProvidersResponse> {
    let status = &state.ai_provider_status;
    Json(ProvidersResponse {
        current: status.current.clone(),
        available: vec![
            ProviderInfo {
                name: "ollama".to_string(),
                enabled: true,
                description: "Local Ollama instance".to_string(),
            },
            ProviderInfo {
                name: "openai".to_string(),
                enabled: status.openai_configured,
                description: "OpenAI-compatible chat models".to_string(),
            },
        ],
    })
}
