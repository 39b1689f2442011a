//! Client core for the SnapDish playground.
//!
//! [`RecipeController`] holds the selected image, the preference text and the
//! request lifecycle. It talks to the recipe service through [`RecipeService`]
//! and to the system clipboard through [`ClipboardWriter`], so front-ends only
//! render snapshots and forward user input.

pub mod clipboard;
pub mod controller;
pub mod error;
pub mod events;
pub mod service;
pub mod state;

pub use clipboard::{ClipboardWriter, NoopClipboard, COPIED_ACK_DURATION};
pub use controller::{InFlight, RecipeController, Submission};
pub use error::{
    ClipboardError, SubmitError, TransportError, FAILED_TO_GENERATE_MESSAGE,
    MISSING_IMAGE_MESSAGE,
};
pub use events::ControllerEvent;
pub use recipe_text::ParsedRecipe;
pub use service::{HttpRecipeService, RecipeRequest, RecipeService, DEFAULT_SERVER_URL};
pub use shared::domain::SelectedImage;
pub use state::{ControllerSnapshot, FailureDiagnostic, RequestState};

#[cfg(test)]
#[path = "tests/service_tests.rs"]
mod service_tests;
