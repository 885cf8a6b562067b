use std::sync::Arc;

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, error, info, warn};

use crate::client::PredictionService;
use crate::controller::{Completion, Submission, SubmissionController, SubmissionState};
use crate::error::StyleError;
use crate::input::DragEvent;
use crate::models::{FileCandidate, PredictResponse};
use crate::page::Page;

/// Everything the page can tell the workflow
#[derive(Debug)]
pub enum UiEvent {
    Drag(DragEvent),
    /// Native file picker change
    FilePicked(FileCandidate),
    /// Browse button activation
    Browse,
    Submit,
    Reset,
    Completed {
        submission: Submission,
        outcome: Result<PredictResponse, StyleError>,
    },
}

/// Work the host has to carry out after an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    OpenFilePicker,
}

/// Single-threaded event loop around the submission controller.
///
/// Events are handled one at a time. A submission spawns the network call as
/// a task that posts [`UiEvent::Completed`] back onto the queue, so resets and
/// other events keep being processed while a request is outstanding.
pub struct StyleFinder {
    controller: SubmissionController,
    service: Arc<dyn PredictionService>,
    sender: UnboundedSender<UiEvent>,
    receiver: UnboundedReceiver<UiEvent>,
    in_flight: usize,
}

impl StyleFinder {
    pub fn new(controller: SubmissionController, service: Arc<dyn PredictionService>) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();

        Self {
            controller,
            service,
            sender,
            receiver,
            in_flight: 0,
        }
    }

    pub fn controller(&self) -> &SubmissionController {
        &self.controller
    }

    pub fn page(&self) -> &Page {
        self.controller.page()
    }

    pub fn page_mut(&mut self) -> &mut Page {
        self.controller.page_mut()
    }

    pub fn state(&self) -> SubmissionState {
        self.controller.state()
    }

    /// Handle for posting events from elsewhere
    pub fn sender(&self) -> UnboundedSender<UiEvent> {
        self.sender.clone()
    }

    /// Requests whose completion has not been handled yet
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Handles one event. Must run inside a tokio runtime.
    pub fn dispatch(&mut self, event: UiEvent) -> Option<Effect> {
        match event {
            UiEvent::Drag(drag) => {
                let outcome = self.page_mut().drop_zone.handle(drag);
                if let Some(candidate) = outcome.dropped {
                    let _ = self.controller.select_file(candidate);
                }
                None
            }
            UiEvent::FilePicked(candidate) => {
                let _ = self.controller.select_file(candidate);
                None
            }
            UiEvent::Browse => Some(Effect::OpenFilePicker),
            UiEvent::Submit => {
                self.start_submission();
                None
            }
            UiEvent::Reset => {
                self.controller.reset();
                None
            }
            UiEvent::Completed { submission, outcome } => {
                self.in_flight = self.in_flight.saturating_sub(1);
                match self.controller.complete(&submission, outcome) {
                    Completion::Displayed => info!("Recommendations ready"),
                    Completion::Failed(e) => warn!("Submission failed: {}", e),
                    Completion::Stale => debug!("Ignored stale completion"),
                }
                None
            }
        }
    }

    fn start_submission(&mut self) {
        let submission = match self.controller.begin_submit() {
            Ok(submission) => submission,
            Err(e) => {
                warn!("Submit ignored: {}", e);
                self.page_mut().notify(e.notice());
                return;
            }
        };

        let service = Arc::clone(&self.service);
        let sender = self.sender.clone();
        self.in_flight += 1;

        let request = submission.request.clone();
        let prediction = tokio::spawn(async move { service.predict(&request).await });

        // A panicking service must still post a completion or the loop never settles
        tokio::spawn(async move {
            let outcome = match prediction.await {
                Ok(outcome) => outcome,
                Err(e) => {
                    error!("Prediction task failed: {}", e);
                    Err(StyleError::Transport {
                        message: format!("prediction task failed: {e}"),
                    })
                }
            };
            if sender.send(UiEvent::Completed { submission, outcome }).is_err() {
                debug!("Event loop gone before completion arrived");
            }
        });
    }

    /// Processes queued events until no request is outstanding
    pub async fn run_until_settled(&mut self) {
        loop {
            let event = match self.receiver.try_recv() {
                Ok(event) => event,
                Err(_) if self.in_flight == 0 => break,
                Err(_) => match self.receiver.recv().await {
                    Some(event) => event,
                    None => break,
                },
            };

            if let Some(effect) = self.dispatch(event) {
                debug!("Unhandled effect while settling: {:?}", effect);
            }
        }
    }
}
