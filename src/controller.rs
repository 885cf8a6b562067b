//! Submission state machine
//!
//! ```text
//! Idle --select_file--> Idle (submit enabled) --begin_submit--> Pending
//! Pending --complete(success)--> Displayed
//! Pending --complete(failure)--> Idle, with a notice
//! any --reset--> Idle
//! ```
//!
//! Every submission is tagged with a generation number. Resets and new
//! submissions advance it, so a response that comes back for an older
//! generation is dropped instead of rendering into the current view.

use tracing::{info, warn};

use crate::client::PredictionService;
use crate::config::DEFAULT_MAX_UPLOAD_BYTES;
use crate::error::StyleError;
use crate::input::validate;
use crate::models::{FileCandidate, PredictRequest, PredictResponse, RecommendationPayload, SelectedFile};
use crate::page::Page;
use crate::render::{ResultView, render};
use crate::retailers::default_retailers;
use crate::traits::Retailer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionState {
    Idle,
    Pending,
    Displayed,
}

/// An in-flight request, returned by [`SubmissionController::begin_submit`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub generation: u64,
    pub request: PredictRequest,
}

/// How a completion was handled
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    Displayed,
    Failed(StyleError),
    /// Response for a submission that a reset or resubmission superseded
    Stale,
}

pub struct SubmissionController {
    page: Page,
    selected: Option<SelectedFile>,
    state: SubmissionState,
    generation: u64,
    max_upload_bytes: u64,
    retailers: Vec<Box<dyn Retailer>>,
    view: Option<ResultView>,
}

impl SubmissionController {
    pub fn new(page: Page) -> Self {
        Self {
            page,
            selected: None,
            state: SubmissionState::Idle,
            generation: 0,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            retailers: default_retailers(),
            view: None,
        }
    }

    pub fn with_max_upload_bytes(mut self, max_upload_bytes: u64) -> Self {
        self.max_upload_bytes = max_upload_bytes;
        self
    }

    pub fn with_retailers(mut self, retailers: Vec<Box<dyn Retailer>>) -> Self {
        self.retailers = retailers;
        self
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn page_mut(&mut self) -> &mut Page {
        &mut self.page
    }

    pub fn state(&self) -> SubmissionState {
        self.state
    }

    pub fn selected_file(&self) -> Option<&SelectedFile> {
        self.selected.as_ref()
    }

    /// Results currently on display
    pub fn view(&self) -> Option<&ResultView> {
        self.view.as_ref()
    }

    /// Idle with a photo chosen and the submit button usable
    pub fn ready_to_submit(&self) -> bool {
        self.state == SubmissionState::Idle
            && self.selected.is_some()
            && self.page.submit.enabled
            && self.page.submit.visible
    }

    /// Accepts a photo. A rejected candidate changes nothing except queueing a notice.
    pub fn select_file(&mut self, candidate: FileCandidate) -> Result<(), StyleError> {
        match validate(candidate, self.max_upload_bytes) {
            Ok(file) => {
                info!("Selected {} ({})", file.name, file.mime_type);
                self.page.status_label = format!("Selected: {}", file.name);
                self.page.file_input_value = Some(file.name.clone());
                self.page.submit.enabled = true;
                self.selected = Some(file);
                Ok(())
            }
            Err(e) => {
                warn!("Rejected photo: {}", e);
                let err = StyleError::from(e);
                self.page.notify(err.notice());
                Err(err)
            }
        }
    }

    /// Moves to Pending and hands back the request to send
    pub fn begin_submit(&mut self) -> Result<Submission, StyleError> {
        if !self.page.submit.enabled || !self.page.submit.visible {
            return Err(StyleError::NotReady {
                missing: "a photo",
            });
        }
        let file = self.selected.clone().ok_or(StyleError::NotReady {
            missing: "a photo",
        })?;
        let gender = self.page.gender.ok_or(StyleError::NotReady {
            missing: "a gender",
        })?;
        let occasion = self
            .page
            .occasion
            .clone()
            .filter(|o| !o.trim().is_empty())
            .ok_or(StyleError::NotReady {
                missing: "an occasion",
            })?;

        self.generation += 1;
        self.state = SubmissionState::Pending;
        self.page.submit.visible = false;
        self.page.busy_visible = true;

        info!("Submission #{} started for {}", self.generation, file.name);

        Ok(Submission {
            generation: self.generation,
            request: PredictRequest {
                file,
                gender,
                occasion,
            },
        })
    }

    /// Handles the outcome of the network call for `submission`
    pub fn complete(
        &mut self,
        submission: &Submission,
        outcome: Result<PredictResponse, StyleError>,
    ) -> Completion {
        if submission.generation != self.generation || self.state != SubmissionState::Pending {
            warn!(
                "Dropping response for submission #{} (current #{}, {:?})",
                submission.generation, self.generation, self.state
            );
            return Completion::Stale;
        }

        match outcome.and_then(|response| into_payload(response, submission)) {
            Ok(payload) => {
                let view = ResultView::build(&payload, &submission.request.occasion, &self.retailers);
                render(&mut self.page, &view);
                self.page.busy_visible = false;
                self.view = Some(view);
                self.state = SubmissionState::Displayed;
                info!("Submission #{} displayed", submission.generation);
                Completion::Displayed
            }
            Err(err) => {
                warn!("Submission #{} failed: {}", submission.generation, err);
                self.page.notify(err.notice());
                self.reset();
                Completion::Failed(err)
            }
        }
    }

    /// Begins a submission, awaits `service` and applies the outcome
    pub async fn submit<S>(&mut self, service: &S) -> Result<Completion, StyleError>
    where
        S: PredictionService + ?Sized,
    {
        let submission = self.begin_submit()?;
        let outcome = service.predict(&submission.request).await;
        Ok(self.complete(&submission, outcome))
    }

    /// Back to the initial upload view. Safe from any state.
    pub fn reset(&mut self) {
        self.selected = None;
        self.view = None;
        self.state = SubmissionState::Idle;
        self.generation += 1;
        self.page.reset_ui();
        info!("UI reset");
    }
}

fn into_payload(response: PredictResponse, submission: &Submission) -> Result<RecommendationPayload, StyleError> {
    if !response.success {
        return Err(StyleError::Submission {
            message: response
                .error
                .unwrap_or_else(|| "Unknown error".to_string()),
        });
    }

    let recommendations = response.recommendations.ok_or_else(|| StyleError::Submission {
        message: "response contained no recommendations".to_string(),
    })?;

    Ok(RecommendationPayload {
        skin_tone: response.skin_tone.unwrap_or_default(),
        gender: response
            .gender
            .unwrap_or_else(|| submission.request.gender.as_str().to_string()),
        recommendations,
        timestamp: response.timestamp,
    })
}
