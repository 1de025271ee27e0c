use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use therabook_gateway::GatewayError;

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

/// Map a gateway failure onto the public HTTP surface.
///
/// Provider 4xx rejections pass through with their status (wrong password,
/// duplicate signup); everything else is the provider's fault: 502.
pub fn gateway_error_to_response(err: GatewayError) -> axum::response::Response {
    match err {
        GatewayError::Unauthenticated => {
            json_error(StatusCode::UNAUTHORIZED, "unauthorized", "authentication required")
        }
        GatewayError::Rejected { status, message } if (400..500).contains(&status) => json_error(
            StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_REQUEST),
            "provider_rejected",
            message,
        ),
        GatewayError::Rejected { message, .. } => {
            json_error(StatusCode::BAD_GATEWAY, "provider_error", message)
        }
        GatewayError::Transport(e) => {
            json_error(StatusCode::BAD_GATEWAY, "provider_unreachable", e.to_string())
        }
        GatewayError::Malformed(message) => {
            json_error(StatusCode::BAD_GATEWAY, "provider_error", message)
        }
    }
}
