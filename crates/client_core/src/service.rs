//! Client side of the boundary call to the recipe-generation service.

use async_trait::async_trait;
use reqwest::{multipart, Client};
use shared::{
    domain::SelectedImage,
    protocol::{GenerateRecipeResponse, GENERATE_RECIPE_PATH, IMAGE_FIELD, PREFERENCE_FIELD},
};
use tracing::debug;
use url::Url;

use crate::error::TransportError;

pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:8000";

const FALLBACK_MEDIA_TYPE: &str = "application/octet-stream";

/// Payload of one boundary call. `preference` is already the effective value.
#[derive(Debug, Clone)]
pub struct RecipeRequest {
    pub image: SelectedImage,
    pub preference: String,
}

#[async_trait]
pub trait RecipeService: Send + Sync {
    /// Returns the raw recipe text exactly as the service produced it.
    async fn generate_recipe(&self, request: RecipeRequest) -> Result<String, TransportError>;
}

/// `POST {server}/api/generate-recipe` as `multipart/form-data`.
///
/// Uses the transport's default timeout and never retries.
pub struct HttpRecipeService {
    http: Client,
    endpoint: Url,
}

impl HttpRecipeService {
    pub fn new(server_url: &str) -> Result<Self, TransportError> {
        Self::with_client(Client::new(), server_url)
    }

    pub fn with_client(http: Client, server_url: &str) -> Result<Self, TransportError> {
        let endpoint = Url::parse(server_url)?.join(GENERATE_RECIPE_PATH)?;
        Ok(Self { http, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl RecipeService for HttpRecipeService {
    async fn generate_recipe(&self, request: RecipeRequest) -> Result<String, TransportError> {
        let RecipeRequest { image, preference } = request;
        let size_bytes = image.len();
        let media_type = if image.media_type.trim().is_empty() {
            FALLBACK_MEDIA_TYPE.to_string()
        } else {
            image.media_type
        };

        let image_part = multipart::Part::bytes(image.bytes)
            .file_name(image.filename)
            .mime_str(&media_type)?;
        let form = multipart::Form::new()
            .part(IMAGE_FIELD, image_part)
            .text(PREFERENCE_FIELD, preference);

        debug!(endpoint = %self.endpoint, size_bytes, %media_type, "posting recipe request");
        let response = self
            .http
            .post(self.endpoint.clone())
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TransportError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body: GenerateRecipeResponse = response.json().await?;
        Ok(body.recipe)
    }
}
