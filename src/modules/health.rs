use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Service is up", body = MessageResponse)
    ),
    tag = "Health"
)]
pub async fn check_root() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "The server is ready for your requests".to_string(),
    })
}
