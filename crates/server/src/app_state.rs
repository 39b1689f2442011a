use std::sync::Arc;

use crate::generator::RecipeGenerator;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) generator: Arc<dyn RecipeGenerator>,
    pub(crate) max_upload_bytes: usize,
}
