//! Turns an uploaded photo and a preference into recipe text.

use async_trait::async_trait;
use shared::domain::SelectedImage;
use thiserror::Error;

mod gemini;

pub use gemini::GeminiGenerator;

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("model API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("model returned no text")]
    EmptyResponse,

    #[error("failed to parse model response: {0}")]
    Parse(String),
}

#[async_trait]
pub trait RecipeGenerator: Send + Sync {
    async fn generate(
        &self,
        image: &SelectedImage,
        preference: &str,
    ) -> Result<String, GenerationError>;

    fn model_name(&self) -> &str;
}

pub fn recipe_prompt(preference: &str) -> String {
    format!(
        "You are a creative chef. Based on the ingredients in this image and the user's \
         preference for '{preference}' food, generate a recipe. The recipe should include:\n\
         1. A catchy title.\n\
         2. A list of ingredients.\n\
         3. Step-by-step instructions.\n\
         Format the response clearly."
    )
}
