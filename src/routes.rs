use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tracing::{error, warn};

use crate::state::AppState;
use crate::translate::{TranslateError, TranslateRequest, TranslateResponse};
use crate::tts::{TTSError, TTSRequest};

pub fn create_routes() -> Router<AppState> {
    Router::new()
        // Health check
        .route("/api/health", get(health_check))

        // REST API routes
        .route("/api/translate", post(translate))
        .route("/api/tts", post(speak))
}

async fn health_check(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "translation_configured": state.translator.is_configured(),
        "model": state.config.translation.model,
        "tts_language": state.config.speech.language,
    }))
}

fn translate_error_status(err: &TranslateError) -> StatusCode {
    match err {
        TranslateError::EmptyInput => StatusCode::BAD_REQUEST,
        TranslateError::MissingApiKey => StatusCode::SERVICE_UNAVAILABLE,
        e if e.is_timeout() => StatusCode::GATEWAY_TIMEOUT,
        _ => StatusCode::BAD_GATEWAY,
    }
}

async fn translate(
    State(state): State<AppState>,
    Json(payload): Json<TranslateRequest>,
) -> Result<Json<TranslateResponse>, (StatusCode, Json<Value>)> {
    match state.translator.translate(&payload.text).await {
        Ok(translation) => Ok(Json(TranslateResponse { translation })),
        Err(e) => {
            let status = translate_error_status(&e);
            if status.is_client_error() {
                warn!("Rejected translation request: {}", e);
            } else {
                error!("Translation failed: {}", e);
            }
            Err((status, Json(json!({ "error": e.to_string() }))))
        }
    }
}

async fn speak(
    State(state): State<AppState>,
    Json(payload): Json<TTSRequest>,
) -> Response {
    match state.tts.synthesize(&payload.text).await {
        Ok(audio) => (
            [(header::CONTENT_TYPE, audio.content_type)],
            audio.data,
        )
            .into_response(),
        // Every failure, empty text included, is an empty 500
        Err(TTSError::EmptyInput) => {
            warn!("Rejected TTS request with empty text");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
        Err(e) => {
            error!("TTS failed: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
