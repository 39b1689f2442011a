use serde::Serialize;

/// Lifecycle of the single recipe request. Exactly one variant is active.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum RequestState {
    #[default]
    Idle,
    Pending,
    Succeeded {
        raw_recipe_text: String,
    },
    Failed {
        message: String,
    },
}

impl RequestState {
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    pub fn recipe_text(&self) -> Option<&str> {
        match self {
            Self::Succeeded { raw_recipe_text } => Some(raw_recipe_text),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Failed { message } => Some(message),
            _ => None,
        }
    }
}

/// Underlying cause of the last failed request, kept for diagnostics only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailureDiagnostic {
    pub generation: u64,
    pub detail: String,
    pub transient: bool,
}

/// Everything a renderer needs for one frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ControllerSnapshot {
    pub request: RequestState,
    pub image_filename: Option<String>,
    pub preference: String,
    pub copied: bool,
}
