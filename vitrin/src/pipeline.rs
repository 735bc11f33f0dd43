//! The upload → analyze → select-scene → generate pipeline and its
//! step-state machine.
//!
//! [`Studio`] owns the presentation state a UI shell renders: the accepted
//! file and its preview, the three process steps, the generated image set
//! and the current error. State is published on a [`watch`] channel so
//! observers see every transition while a run is in flight; dropping the
//! receiver is unsubscribing.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use bytes::Bytes;
use tokio::sync::watch;

use vitrin_types::models::Image;

use crate::error::Error;
use crate::gateway::ModelGateway;
use crate::intake::UploadedFile;
use crate::scene::scene_for_category;

/// Number of steps in one run.
pub const STEP_COUNT: usize = 3;

/// Step indices into [`StudioState::steps`].
pub const STEP_ANALYZE: usize = 0;
pub const STEP_SELECT_SCENE: usize = 1;
pub const STEP_GENERATE: usize = 2;

const STEP_LABELS: [&str; STEP_COUNT] = [
    "Yapay zeka ile ürün kategorisi analiz ediliyor...",
    "Mükemmel sahne oluşturuluyor...",
    "4 benzersiz görsel oluşturuluyor... (Bu işlem biraz zaman alabilir)",
];

const NO_FILE_MESSAGE: &str = "Lütfen önce bir resim yükleyin.";

/// Status of one process step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepStatus {
    Pending,
    InProgress,
    Completed,
    Error(String),
}

/// One of the three fixed steps of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessStep {
    pub id: u8,
    pub label: &'static str,
    pub status: StepStatus,
}

/// Fresh step list, all pending, in fixed order.
#[must_use]
pub fn initial_steps() -> [ProcessStep; STEP_COUNT] {
    let mut index = 0u8;
    STEP_LABELS.map(|label| {
        index += 1;
        ProcessStep {
            id: index,
            label,
            status: StepStatus::Pending,
        }
    })
}

/// Snapshot of everything the dashboard renders.
#[derive(Debug, Clone)]
pub struct StudioState {
    /// The accepted upload, if any.
    pub file: Option<UploadedFile>,
    /// Data URI preview of the accepted upload; filled in asynchronously.
    pub preview: Option<String>,
    /// The three process steps of the current or last run.
    pub steps: [ProcessStep; STEP_COUNT],
    /// Generated image set as `data:` URIs, replaced wholesale per run.
    pub images: Vec<String>,
    /// Current user-visible error, if any.
    pub error: Option<String>,
    /// True while a run is in flight; gates re-entry.
    pub busy: bool,
}

impl StudioState {
    fn new() -> Self {
        Self {
            file: None,
            preview: None,
            steps: initial_steps(),
            images: Vec::new(),
            error: None,
            busy: false,
        }
    }

    /// Whether the generate trigger should be enabled.
    #[must_use]
    pub fn can_generate(&self) -> bool {
        self.file.is_some() && !self.busy
    }
}

impl Default for StudioState {
    fn default() -> Self {
        Self::new()
    }
}

/// Suggested download name for the generated image at `index`.
#[must_use]
pub fn download_file_name(index: usize) -> String {
    format!("generated-image-{}.jpeg", index + 1)
}

/// Orchestrates pipeline runs against a [`ModelGateway`] and owns the
/// observable studio state. Cheap to clone; clones share state.
pub struct Studio<G> {
    inner: Arc<StudioInner<G>>,
}

struct StudioInner<G> {
    gateway: G,
    state: Arc<watch::Sender<StudioState>>,
    upload_seq: Arc<AtomicU64>,
}

impl<G> Clone for Studio<G> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<G: ModelGateway> Studio<G> {
    /// Create a studio with an empty state.
    #[must_use]
    pub fn new(gateway: G) -> Self {
        let (state, _) = watch::channel(StudioState::new());
        Self {
            inner: Arc::new(StudioInner {
                gateway,
                state: Arc::new(state),
                upload_seq: Arc::new(AtomicU64::new(0)),
            }),
        }
    }

    /// Observe state transitions. Drop the receiver to unsubscribe.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<StudioState> {
        self.inner.state.subscribe()
    }

    /// Snapshot of the current state.
    #[must_use]
    pub fn state(&self) -> StudioState {
        self.inner.state.borrow().clone()
    }

    /// Accept an upload from the file picker or a drop event.
    ///
    /// Validation is synchronous: a rejected payload only sets the error
    /// message and leaves the previous file and preview untouched. An
    /// accepted payload replaces the file, clears the prior error and
    /// generated set, and schedules the preview encode; a preview that
    /// loses to a newer upload is discarded.
    ///
    /// Must be called within a tokio runtime (the preview encode is a
    /// spawned task).
    pub fn accept_upload(&self, data: impl Into<Bytes>, media_type: impl Into<String>) {
        match UploadedFile::new(data, media_type) {
            Ok(file) => {
                let seq = self.inner.upload_seq.fetch_add(1, Ordering::SeqCst) + 1;
                self.inner.state.send_modify(|state| {
                    state.file = Some(file.clone());
                    state.error = None;
                    state.images.clear();
                });

                let state = Arc::clone(&self.inner.state);
                let upload_seq = Arc::clone(&self.inner.upload_seq);
                tokio::spawn(async move {
                    let preview = file.data_uri();
                    state.send_modify(|current| {
                        if upload_seq.load(Ordering::SeqCst) == seq {
                            current.preview = Some(preview);
                        }
                    });
                });
            }
            Err(err) => {
                let message = err.to_string();
                self.inner
                    .state
                    .send_modify(|state| state.error = Some(message));
            }
        }
    }

    /// Run the three-step pipeline against the accepted file.
    ///
    /// Without a file this sets a user-visible error and does not start.
    /// While a run is in flight a second start is a no-op. Every remote
    /// failure is converted into run state; nothing propagates to the
    /// caller.
    pub async fn generate(&self) {
        enum Entry {
            Run(UploadedFile),
            Refused,
        }

        let mut entry = Entry::Refused;
        self.inner.state.send_modify(|state| {
            if state.busy {
                return;
            }
            match &state.file {
                None => state.error = Some(NO_FILE_MESSAGE.to_string()),
                Some(file) => {
                    state.busy = true;
                    state.error = None;
                    state.images.clear();
                    state.steps = initial_steps();
                    entry = Entry::Run(file.clone());
                }
            }
        });
        let Entry::Run(file) = entry else {
            return;
        };

        self.set_step(STEP_ANALYZE, StepStatus::InProgress);
        let analysis = match self.inner.gateway.analyze(&file).await {
            Ok(analysis) => {
                self.set_step(STEP_ANALYZE, StepStatus::Completed);
                analysis
            }
            Err(err) => {
                self.fail_step(STEP_ANALYZE, &err);
                return;
            }
        };

        self.set_step(STEP_SELECT_SCENE, StepStatus::InProgress);
        let scene = scene_for_category(&analysis.category);
        self.set_step(STEP_SELECT_SCENE, StepStatus::Completed);

        self.set_step(STEP_GENERATE, StepStatus::InProgress);
        match self
            .inner
            .gateway
            .generate_images(&analysis.description, scene)
            .await
        {
            Ok(images) => {
                let uris: Vec<String> = images.iter().map(image_data_uri).collect();
                self.inner.state.send_modify(|state| {
                    state.images = uris;
                    state.steps[STEP_GENERATE].status = StepStatus::Completed;
                    state.busy = false;
                });
                tracing::debug!(count = self.inner.state.borrow().images.len(), "run completed");
            }
            Err(err) => self.fail_step(STEP_GENERATE, &err),
        }
    }

    fn set_step(&self, index: usize, status: StepStatus) {
        tracing::debug!(step = index + 1, status = ?status, "pipeline step");
        self.inner
            .state
            .send_modify(|state| state.steps[index].status = status);
    }

    fn fail_step(&self, index: usize, err: &Error) {
        let message = err.to_string();
        tracing::debug!(step = index + 1, error = %message, "pipeline step failed");
        self.inner.state.send_modify(|state| {
            state.steps[index].status = StepStatus::Error(message.clone());
            state.error = Some(message);
            state.busy = false;
        });
    }
}

fn image_data_uri(image: &Image) -> String {
    let media_type = image.mime_type.as_deref().unwrap_or("image/jpeg");
    let payload = image.image_bytes.as_deref().unwrap_or_default();
    format!("data:{media_type};base64,{}", STANDARD.encode(payload))
}
