use std::sync::Arc;

use recipe_text::{to_clipboard_text, ParsedRecipe};
use shared::domain::{Preference, SelectedImage};
use tokio::{
    sync::{broadcast, Mutex},
    task::JoinHandle,
};
use tracing::{debug, error, info, warn};

use crate::{
    clipboard::{ClipboardWriter, CopyFeedback, COPIED_ACK_DURATION},
    error::{ClipboardError, SubmitError, TransportError, FAILED_TO_GENERATE_MESSAGE},
    events::ControllerEvent,
    service::{RecipeRequest, RecipeService},
    state::{ControllerSnapshot, FailureDiagnostic, RequestState},
};

const EVENT_CAPACITY: usize = 64;

/// Result of a `submit` that passed validation.
#[derive(Debug)]
pub enum Submission {
    Issued(InFlight),
    /// A request was already pending; nothing was sent.
    AlreadyPending,
}

/// Handle to the boundary call spawned by `submit`.
#[derive(Debug)]
pub struct InFlight {
    generation: u64,
    handle: JoinHandle<()>,
}

impl InFlight {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Waits until the completion has been applied (or discarded as stale).
    pub async fn finished(self) {
        if let Err(err) = self.handle.await {
            error!(generation = self.generation, error = %err, "recipe request task aborted");
        }
    }
}

#[derive(Default)]
struct ControllerState {
    image: Option<SelectedImage>,
    preference: Preference,
    request: RequestState,
    /// Bumped on every submission and image selection; completions carrying an
    /// older value are dropped.
    generation: u64,
    diagnostic: Option<FailureDiagnostic>,
    copy: CopyFeedback,
}

/// Owns the selected image, the preference and the request lifecycle.
pub struct RecipeController {
    service: Arc<dyn RecipeService>,
    clipboard: Arc<dyn ClipboardWriter>,
    inner: Mutex<ControllerState>,
    events: broadcast::Sender<ControllerEvent>,
}

impl RecipeController {
    pub fn new(service: Arc<dyn RecipeService>, clipboard: Arc<dyn ClipboardWriter>) -> Arc<Self> {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Arc::new(Self {
            service,
            clipboard,
            inner: Mutex::new(ControllerState::default()),
            events,
        })
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<ControllerEvent> {
        self.events.subscribe()
    }

    /// Replaces the image and resets the request to `Idle`. `None` is ignored.
    ///
    /// An in-flight call keeps running but its completion will be discarded.
    pub async fn select_image(&self, image: Option<SelectedImage>) {
        let Some(image) = image else {
            debug!("empty image selection ignored");
            return;
        };
        let filename = image.filename.clone();

        let copied_cleared = {
            let mut inner = self.inner.lock().await;
            if inner.request.is_pending() {
                info!(
                    generation = inner.generation,
                    "image replaced while a request is in flight; its result will be discarded"
                );
            }
            inner.generation += 1;
            inner.image = Some(image);
            inner.request = RequestState::Idle;
            inner.diagnostic = None;
            inner.copy.reset()
        };

        debug!(%filename, "image selected");
        self.emit(ControllerEvent::ImageSelected { filename });
        self.emit(ControllerEvent::StateChanged(RequestState::Idle));
        if copied_cleared {
            self.emit(ControllerEvent::CopiedChanged(false));
        }
    }

    pub async fn set_preference(&self, text: impl Into<String>) {
        let text = text.into();
        self.inner.lock().await.preference = Preference::from(text.clone());
        self.emit(ControllerEvent::PreferenceChanged(text));
    }

    /// Starts the boundary call and returns without waiting for it.
    pub async fn submit(self: &Arc<Self>) -> Result<Submission, SubmitError> {
        let (generation, request) = {
            let mut inner = self.inner.lock().await;
            let Some(image) = inner.image.clone() else {
                drop(inner);
                warn!("submit rejected: no image selected");
                let err = SubmitError::MissingImage;
                self.emit(ControllerEvent::ValidationFailed(err.to_string()));
                return Err(err);
            };
            if inner.request.is_pending() {
                debug!(
                    generation = inner.generation,
                    "submit ignored while a request is pending"
                );
                return Ok(Submission::AlreadyPending);
            }

            inner.generation += 1;
            inner.request = RequestState::Pending;
            inner.diagnostic = None;
            let request = RecipeRequest {
                image,
                preference: inner.preference.effective().to_string(),
            };
            (inner.generation, request)
        };

        info!(
            generation,
            filename = %request.image.filename,
            preference = %request.preference,
            "submitting recipe request"
        );
        self.emit(ControllerEvent::StateChanged(RequestState::Pending));

        let controller = Arc::clone(self);
        let handle = tokio::spawn(async move {
            let outcome = controller.service.generate_recipe(request).await;
            controller.complete(generation, outcome).await;
        });

        Ok(Submission::Issued(InFlight { generation, handle }))
    }

    async fn complete(&self, generation: u64, outcome: Result<String, TransportError>) {
        let next = {
            let mut inner = self.inner.lock().await;
            if inner.generation != generation || !inner.request.is_pending() {
                debug!(
                    generation,
                    current = inner.generation,
                    failed = outcome.is_err(),
                    "discarding stale recipe completion"
                );
                return;
            }

            inner.request = match outcome {
                Ok(raw_recipe_text) => {
                    info!(generation, chars = raw_recipe_text.len(), "recipe generated");
                    RequestState::Succeeded { raw_recipe_text }
                }
                Err(err) => {
                    let transient = err.is_transient();
                    error!(generation, error = %err, transient, "recipe request failed");
                    inner.diagnostic = Some(FailureDiagnostic {
                        generation,
                        detail: err.to_string(),
                        transient,
                    });
                    RequestState::Failed {
                        message: FAILED_TO_GENERATE_MESSAGE.to_string(),
                    }
                }
            };
            inner.request.clone()
        };

        self.emit(ControllerEvent::StateChanged(next));
    }

    /// Writes the plain-text rendering of the current recipe to the clipboard and
    /// raises the copied flag for [`COPIED_ACK_DURATION`].
    pub async fn copy_recipe(self: &Arc<Self>) -> Result<(), ClipboardError> {
        let (text, generation) = {
            let inner = self.inner.lock().await;
            (
                inner.request.recipe_text().map(to_clipboard_text),
                inner.generation,
            )
        };
        let text = text.ok_or(ClipboardError::NothingToCopy)?;

        self.clipboard.write_text(&text)?;
        let Some(epoch) = self.raise_copied(generation).await else {
            return Ok(());
        };
        debug!(chars = text.len(), "recipe copied to clipboard");
        self.emit(ControllerEvent::CopiedChanged(true));

        let controller = Arc::clone(self);
        tokio::spawn(async move {
            tokio::time::sleep(COPIED_ACK_DURATION).await;
            let cleared = controller.inner.lock().await.copy.clear_if_current(epoch);
            if cleared {
                controller.emit(ControllerEvent::CopiedChanged(false));
            }
        });
        Ok(())
    }

    /// Raises the copied flag unless the recipe was replaced since `generation`.
    async fn raise_copied(&self, generation: u64) -> Option<u64> {
        let mut inner = self.inner.lock().await;
        if inner.generation != generation {
            debug!(
                generation,
                current = inner.generation,
                "recipe replaced during copy; copied flag not raised"
            );
            return None;
        }
        Some(inner.copy.raise())
    }

    pub async fn is_copied(&self) -> bool {
        self.inner.lock().await.copy.is_copied()
    }

    pub async fn request_state(&self) -> RequestState {
        self.inner.lock().await.request.clone()
    }

    /// Structured view of the current recipe, recomputed on every call.
    pub async fn parsed_recipe(&self) -> Option<ParsedRecipe> {
        let inner = self.inner.lock().await;
        inner.request.recipe_text().map(ParsedRecipe::parse)
    }

    pub async fn last_diagnostic(&self) -> Option<FailureDiagnostic> {
        self.inner.lock().await.diagnostic.clone()
    }

    pub async fn snapshot(&self) -> ControllerSnapshot {
        let inner = self.inner.lock().await;
        ControllerSnapshot {
            request: inner.request.clone(),
            image_filename: inner.image.as_ref().map(|image| image.filename.clone()),
            preference: inner.preference.as_str().to_string(),
            copied: inner.copy.is_copied(),
        }
    }

    fn emit(&self, event: ControllerEvent) {
        let _ = self.events.send(event);
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
