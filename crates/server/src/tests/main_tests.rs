use super::*;
use async_trait::async_trait;
use axum::{
    body::{self, Body},
    http::{header, Request, StatusCode},
};
use shared::{
    domain::SelectedImage,
    error::{ApiError, ErrorCode},
    protocol::{GenerateRecipeResponse, ServiceStatus},
};
use tower::ServiceExt;

use crate::generator::GenerationError;

const BOUNDARY: &str = "snapdish-test-boundary";
const PNG_BYTES: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR";

#[derive(Default)]
struct FakeGenerator {
    fail_with: Option<String>,
    seen: std::sync::Mutex<Vec<(String, String)>>,
}

#[async_trait]
impl RecipeGenerator for FakeGenerator {
    async fn generate(
        &self,
        image: &SelectedImage,
        preference: &str,
    ) -> Result<String, GenerationError> {
        self.seen
            .lock()
            .expect("seen lock")
            .push((image.filename.clone(), preference.to_string()));
        match &self.fail_with {
            Some(message) => Err(GenerationError::Api {
                status: 503,
                message: message.clone(),
            }),
            None => Ok(format!("**Fridge Feast**\nPreference: {preference}")),
        }
    }

    fn model_name(&self) -> &str {
        "fake"
    }
}

fn test_app(generator: Arc<FakeGenerator>, max_upload_bytes: usize) -> Router {
    build_router(Arc::new(AppState {
        generator,
        max_upload_bytes,
    }))
}

enum Part<'a> {
    Text(&'a str, &'a str),
    File {
        name: &'a str,
        filename: &'a str,
        content_type: &'a str,
        bytes: &'a [u8],
    },
}

fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match part {
            Part::Text(name, value) => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n")
                        .as_bytes(),
                );
            }
            Part::File {
                name,
                filename,
                content_type,
                bytes,
            } => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\n\
                         Content-Type: {content_type}\r\n\r\n"
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(bytes);
                body.extend_from_slice(b"\r\n");
            }
        }
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

fn upload_request(parts: &[Part<'_>]) -> Request<Body> {
    let body = multipart_body(parts);
    Request::post(GENERATE_RECIPE_PATH)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .header(header::CONTENT_LENGTH, body.len())
        .body(Body::from(body))
        .expect("request")
}

fn png_part(bytes: &[u8]) -> Part<'_> {
    Part::File {
        name: "image",
        filename: "fridge.png",
        content_type: "image/png",
        bytes,
    }
}

async fn json_body<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let body = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    serde_json::from_slice(&body).expect("json")
}

#[tokio::test]
async fn root_reports_service_status() {
    let app = test_app(Arc::new(FakeGenerator::default()), 1024);
    let response = app
        .oneshot(Request::get("/").body(Body::empty()).expect("request"))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let status: ServiceStatus = json_body(response).await;
    assert_eq!(status.status, "SnapDish backend is running!");
}

#[tokio::test]
async fn healthz_reports_ok() {
    let app = test_app(Arc::new(FakeGenerator::default()), 1024);
    let response = app
        .oneshot(Request::get("/healthz").body(Body::empty()).expect("request"))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let body = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    assert_eq!(body.as_ref(), b"ok");
}

#[tokio::test]
async fn generates_recipe_with_given_preference() {
    let generator = Arc::new(FakeGenerator::default());
    let app = test_app(generator.clone(), 64 * 1024);

    let response = app
        .oneshot(upload_request(&[
            Part::Text("preference", "vegetarian"),
            png_part(PNG_BYTES),
        ]))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let dto: GenerateRecipeResponse = json_body(response).await;
    assert_eq!(dto.recipe, "**Fridge Feast**\nPreference: vegetarian");
    assert_eq!(
        generator.seen.lock().expect("seen lock").as_slice(),
        [("fridge.png".to_string(), "vegetarian".to_string())]
    );
}

#[tokio::test]
async fn missing_or_empty_preference_defaults_to_any() {
    let generator = Arc::new(FakeGenerator::default());
    let app = test_app(generator.clone(), 64 * 1024);

    let response = app
        .clone()
        .oneshot(upload_request(&[png_part(PNG_BYTES)]))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(upload_request(&[
            Part::Text("preference", ""),
            png_part(PNG_BYTES),
        ]))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    let seen = generator.seen.lock().expect("seen lock");
    assert!(seen.iter().all(|(_, preference)| preference == "any"));
    assert_eq!(seen.len(), 2);
}

#[tokio::test]
async fn missing_image_is_a_validation_error() {
    let generator = Arc::new(FakeGenerator::default());
    let app = test_app(generator.clone(), 64 * 1024);

    let response = app
        .oneshot(upload_request(&[Part::Text("preference", "keto")]))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let err: ApiError = json_body(response).await;
    assert_eq!(err.code, ErrorCode::Validation);
    assert!(generator.seen.lock().expect("seen lock").is_empty());
}

#[tokio::test]
async fn non_image_content_type_is_rejected() {
    let app = test_app(Arc::new(FakeGenerator::default()), 64 * 1024);

    let response = app
        .oneshot(upload_request(&[Part::File {
            name: "image",
            filename: "notes.txt",
            content_type: "text/plain",
            bytes: b"two eggs",
        }]))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let err: ApiError = json_body(response).await;
    assert_eq!(err.message, "File provided is not an image.");
}

#[tokio::test]
async fn unreadable_image_bytes_are_rejected() {
    let generator = Arc::new(FakeGenerator::default());
    let app = test_app(generator.clone(), 64 * 1024);

    let response = app
        .oneshot(upload_request(&[png_part(b"definitely not a png")]))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let err: ApiError = json_body(response).await;
    assert_eq!(err.code, ErrorCode::Validation);
    assert!(generator.seen.lock().expect("seen lock").is_empty());
}

#[tokio::test]
async fn oversized_upload_is_rejected() {
    let app = test_app(Arc::new(FakeGenerator::default()), 256);
    let mut large = PNG_BYTES.to_vec();
    large.resize(4096, 0);

    let response = app
        .oneshot(upload_request(&[png_part(&large)]))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn generator_failure_maps_to_internal_error() {
    let generator = Arc::new(FakeGenerator {
        fail_with: Some("model overloaded".to_string()),
        ..FakeGenerator::default()
    });
    let app = test_app(generator, 64 * 1024);

    let response = app
        .oneshot(upload_request(&[png_part(PNG_BYTES)]))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let err: ApiError = json_body(response).await;
    assert_eq!(err.code, ErrorCode::Internal);
    assert!(err.message.starts_with("An error occurred: "));
    assert!(err.message.contains("model overloaded"));
}

#[tokio::test]
async fn cors_allows_any_origin() {
    let app = test_app(Arc::new(FakeGenerator::default()), 1024);
    let response = app
        .oneshot(
            Request::get("/")
                .header(header::ORIGIN, "http://localhost:5173")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .and_then(|value| value.to_str().ok()),
        Some("*")
    );
}
