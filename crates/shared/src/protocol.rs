use serde::{Deserialize, Serialize};

pub const GENERATE_RECIPE_PATH: &str = "/api/generate-recipe";
pub const IMAGE_FIELD: &str = "image";
pub const PREFERENCE_FIELD: &str = "preference";

pub const SERVICE_STATUS_MESSAGE: &str = "SnapDish backend is running!";

/// Success body of `POST /api/generate-recipe`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateRecipeResponse {
    pub recipe: String,
}

/// Body of `GET /`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceStatus {
    pub status: String,
}

impl Default for ServiceStatus {
    fn default() -> Self {
        Self {
            status: SERVICE_STATUS_MESSAGE.to_string(),
        }
    }
}
