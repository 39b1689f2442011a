//! Notifications for renderers observing the controller.

use crate::state::RequestState;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControllerEvent {
    ImageSelected { filename: String },
    PreferenceChanged(String),
    /// Submit was refused before any network activity.
    ValidationFailed(String),
    StateChanged(RequestState),
    CopiedChanged(bool),
}

impl ControllerEvent {
    pub fn name(&self) -> &'static str {
        match self {
            Self::ImageSelected { .. } => "image_selected",
            Self::PreferenceChanged(_) => "preference_changed",
            Self::ValidationFailed(_) => "validation_failed",
            Self::StateChanged(_) => "state_changed",
            Self::CopiedChanged(_) => "copied_changed",
        }
    }
}
