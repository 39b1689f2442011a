//! HTTP handlers for the recipe service.

use std::sync::Arc;

use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    Json,
};
use shared::{
    domain::{effective_preference, is_image_media_type, SelectedImage},
    error::{ApiError, ErrorCode},
    protocol::{GenerateRecipeResponse, ServiceStatus, IMAGE_FIELD, PREFERENCE_FIELD},
};
use tracing::{debug, error, info, warn};

use crate::app_state::AppState;

pub(crate) const NOT_AN_IMAGE_MESSAGE: &str = "File provided is not an image.";

type ApiResult<T> = Result<T, (StatusCode, Json<ApiError>)>;

fn reject(
    status: StatusCode,
    code: ErrorCode,
    message: impl Into<String>,
) -> (StatusCode, Json<ApiError>) {
    (status, Json(ApiError::new(code, message)))
}

fn multipart_rejection(err: MultipartError) -> (StatusCode, Json<ApiError>) {
    let status = err.status();
    let code = if status == StatusCode::PAYLOAD_TOO_LARGE {
        ErrorCode::PayloadTooLarge
    } else {
        ErrorCode::Validation
    };
    warn!(%status, error = %err.body_text(), "rejected multipart body");
    reject(status, code, err.body_text())
}

pub(crate) async fn service_status() -> Json<ServiceStatus> {
    Json(ServiceStatus::default())
}

pub(crate) async fn healthz() -> &'static str {
    "ok"
}

pub(crate) async fn generate_recipe(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> ApiResult<Json<GenerateRecipeResponse>> {
    let mut preference = String::new();
    let mut image: Option<SelectedImage> = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_rejection)? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some(PREFERENCE_FIELD) => {
                preference = field.text().await.map_err(multipart_rejection)?;
            }
            Some(IMAGE_FIELD) => {
                let media_type = field.content_type().unwrap_or_default().to_string();
                let filename = field.file_name().unwrap_or_default().to_string();
                let bytes = field.bytes().await.map_err(multipart_rejection)?;
                image = Some(SelectedImage::new(bytes.to_vec(), media_type, filename));
            }
            other => debug!(field = ?other, "ignoring unknown multipart field"),
        }
    }

    let image = image.ok_or_else(|| {
        reject(
            StatusCode::BAD_REQUEST,
            ErrorCode::Validation,
            "No image file provided.",
        )
    })?;
    if !image.is_image() {
        return Err(reject(
            StatusCode::BAD_REQUEST,
            ErrorCode::Validation,
            NOT_AN_IMAGE_MESSAGE,
        ));
    }
    let format = image::guess_format(&image.bytes).map_err(|err| {
        warn!(media_type = %image.media_type, error = %err, "upload is not a readable image");
        reject(
            StatusCode::BAD_REQUEST,
            ErrorCode::Validation,
            "Uploaded file could not be read as an image.",
        )
    })?;

    let preference = effective_preference(&preference);
    info!(
        filename = %image.filename,
        size_bytes = image.len(),
        ?format,
        %preference,
        model = state.generator.model_name(),
        "generating recipe"
    );

    let recipe = state
        .generator
        .generate(&image, preference)
        .await
        .map_err(|err| {
            error!(error = %err, "recipe generation failed");
            reject(
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorCode::Internal,
                format!("An error occurred: {err}"),
            )
        })?;

    Ok(Json(GenerateRecipeResponse { recipe }))
}
