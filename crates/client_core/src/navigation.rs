//! Workflow controller: owns the draft and drives the
//! Editing -> Submitting -> Results cycle, with Regenerate and Back.

use shared::domain::DownloadFormat;
use tracing::{info, warn};

use crate::{
    artifact::{self, ArtifactReference, Download},
    draft::{Draft, SourceFile},
    error::{TransportError, WorkflowError},
    readability::ReadabilityReport,
    submission::{SimplificationRequest, SimplificationResult},
    validate::validate_for_submit,
    SimplificationService,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WorkflowViewState {
    #[default]
    Editing,
    Submitting,
    Results,
}

/// Identifies one submission. Tickets increase monotonically per controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SubmissionTicket(u64);

impl SubmissionTicket {
    pub fn value(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PendingSubmission {
    pub ticket: SubmissionTicket,
    pub request: SimplificationRequest,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Applied,
    /// The ticket was not the pending one; the outcome was dropped.
    Stale,
}

#[derive(Debug, Clone, Copy)]
struct InFlight {
    ticket: SubmissionTicket,
    origin: WorkflowViewState,
}

#[derive(Debug, Clone, Default)]
pub struct WorkflowController {
    draft: Draft,
    view: WorkflowViewState,
    result: Option<SimplificationResult>,
    artifact: Option<ArtifactReference>,
    last_error: Option<WorkflowError>,
    in_flight: Option<InFlight>,
    last_ticket: u64,
}

impl WorkflowController {
    pub fn new(draft: Draft) -> Self {
        Self {
            draft,
            ..Self::default()
        }
    }

    /// Starts a workflow from the service's default configuration.
    pub async fn load_defaults<S>(service: &S) -> Result<Self, TransportError>
    where
        S: SimplificationService + ?Sized,
    {
        let defaults = service.fetch_default_config().await?;
        info!(
            keep = defaults.keywords_to_keep.len(),
            replace = defaults.keywords_to_replace.len(),
            samples = defaults.samples.len(),
            "loaded default configuration"
        );
        Ok(Self::new(Draft::from_defaults(&defaults)))
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn view(&self) -> WorkflowViewState {
        self.view
    }

    pub fn is_submitting(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Latest applied result, kept in memory after `back`.
    pub fn result(&self) -> Option<&SimplificationResult> {
        self.result.as_ref()
    }

    /// The result on screen; only present in `Results`.
    pub fn visible_result(&self) -> Option<&SimplificationResult> {
        match self.view {
            WorkflowViewState::Results => self.result.as_ref(),
            _ => None,
        }
    }

    pub fn report(&self) -> Option<ReadabilityReport> {
        self.visible_result().map(SimplificationResult::report)
    }

    pub fn artifact(&self) -> Option<&ArtifactReference> {
        self.artifact.as_ref()
    }

    pub fn last_error(&self) -> Option<&WorkflowError> {
        self.last_error.as_ref()
    }

    /// Applies one draft transition. Refused while a request is in flight.
    pub fn update(&mut self, transition: impl FnOnce(&Draft) -> Draft) -> Result<(), WorkflowError> {
        self.try_update(|draft| Ok::<_, WorkflowError>(transition(draft)))
    }

    /// Applies a draft transition that may reject the action.
    pub fn try_update<E>(
        &mut self,
        transition: impl FnOnce(&Draft) -> Result<Draft, E>,
    ) -> Result<(), WorkflowError>
    where
        E: Into<WorkflowError>,
    {
        if self.in_flight.is_some() {
            return Err(WorkflowError::DraftLocked);
        }
        self.draft = transition(&self.draft).map_err(Into::into)?;
        Ok(())
    }

    /// Picks the document for the next submission. A document result that is
    /// still on screen keeps its confirmed reference.
    pub fn select_source_file(&mut self, file: SourceFile) -> Result<(), WorkflowError> {
        let reference = ArtifactReference::speculative(file.name.clone());
        self.update(|draft| draft.select_source_file(file))?;
        let showing_document = self
            .visible_result()
            .is_some_and(|result| result.artifact_name.is_some());
        if !showing_document {
            self.artifact = Some(reference);
        }
        Ok(())
    }

    pub fn begin_submit(&mut self) -> Result<PendingSubmission, WorkflowError> {
        self.begin()
    }

    /// Re-runs the submission for the current mode on the current draft.
    pub fn begin_regenerate(&mut self) -> Result<PendingSubmission, WorkflowError> {
        if self.in_flight.is_some() {
            return Err(WorkflowError::SubmissionInFlight);
        }
        if self.view != WorkflowViewState::Results {
            return Err(WorkflowError::NotInResults);
        }
        self.begin()
    }

    fn begin(&mut self) -> Result<PendingSubmission, WorkflowError> {
        if let Some(in_flight) = self.in_flight {
            warn!(
                ticket = in_flight.ticket.value(),
                "submission refused: another request is in flight"
            );
            return Err(WorkflowError::SubmissionInFlight);
        }

        let validation = validate_for_submit(&self.draft);
        if !validation.can_submit() {
            self.draft = self.draft.mark_validation(&validation);
            return Err(WorkflowError::Validation(validation));
        }
        let request = SimplificationRequest::from_draft(&self.draft)?;

        self.last_ticket += 1;
        let ticket = SubmissionTicket(self.last_ticket);
        self.in_flight = Some(InFlight {
            ticket,
            origin: self.view,
        });
        self.view = WorkflowViewState::Submitting;
        self.last_error = None;
        info!(ticket = ticket.value(), mode = ?request.mode(), "submitting simplification request");
        Ok(PendingSubmission { ticket, request })
    }

    /// Applies the outcome of the submission identified by `ticket`. On
    /// failure the view returns to where the submission started.
    pub fn complete_submit(
        &mut self,
        ticket: SubmissionTicket,
        outcome: Result<SimplificationResult, TransportError>,
    ) -> Result<Completion, WorkflowError> {
        let in_flight = match self.in_flight {
            Some(in_flight) if in_flight.ticket == ticket => in_flight,
            _ => {
                warn!(ticket = ticket.value(), "discarding stale submission outcome");
                return Ok(Completion::Stale);
            }
        };
        self.in_flight = None;

        match outcome {
            Ok(result) => {
                match &result.artifact_name {
                    Some(name) => self.artifact = Some(ArtifactReference::confirmed(name.clone())),
                    None => {
                        if self.artifact.as_ref().is_some_and(ArtifactReference::is_confirmed) {
                            self.artifact = None;
                        }
                    }
                }
                info!(
                    ticket = ticket.value(),
                    score = result.readability_score,
                    "simplification finished"
                );
                self.result = Some(result);
                self.view = WorkflowViewState::Results;
                Ok(Completion::Applied)
            }
            Err(err) => {
                warn!(
                    ticket = ticket.value(),
                    retryable = err.is_retryable(),
                    error = %err,
                    "simplification failed"
                );
                self.view = in_flight.origin;
                let err = WorkflowError::Transport(err);
                self.last_error = Some(err.clone());
                Err(err)
            }
        }
    }

    pub async fn submit<S>(&mut self, service: &S) -> Result<SimplificationResult, WorkflowError>
    where
        S: SimplificationService + ?Sized,
    {
        let pending = self.begin_submit()?;
        self.run(service, pending).await
    }

    pub async fn regenerate<S>(&mut self, service: &S) -> Result<SimplificationResult, WorkflowError>
    where
        S: SimplificationService + ?Sized,
    {
        let pending = self.begin_regenerate()?;
        self.run(service, pending).await
    }

    async fn run<S>(
        &mut self,
        service: &S,
        pending: PendingSubmission,
    ) -> Result<SimplificationResult, WorkflowError>
    where
        S: SimplificationService + ?Sized,
    {
        let outcome = service.simplify(pending.request).await;
        self.complete_submit(pending.ticket, outcome)?;
        self.result.clone().ok_or(WorkflowError::NotInResults)
    }

    /// Leaves the results view. The draft is kept as it is.
    pub fn back(&mut self) -> Result<(), WorkflowError> {
        if self.view != WorkflowViewState::Results {
            return Err(WorkflowError::NotInResults);
        }
        self.view = WorkflowViewState::Editing;
        Ok(())
    }

    /// Downloads the document behind the visible document result.
    pub async fn download<S>(
        &self,
        service: &S,
        format: DownloadFormat,
    ) -> Result<Download, WorkflowError>
    where
        S: SimplificationService + ?Sized,
    {
        let result = self.visible_result().ok_or(WorkflowError::NotInResults)?;
        let name = result
            .artifact_name
            .clone()
            .ok_or(WorkflowError::ArtifactUnavailable)?;
        artifact::fetch(service, &ArtifactReference::confirmed(name), format).await
    }
}

#[cfg(test)]
#[path = "tests/navigation_tests.rs"]
mod tests;
