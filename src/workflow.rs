// src/workflow.rs
//! Page-level coordinator: owns the current selections and results, guards
//! submission, calls the injected ranker and reports every step through the
//! notification sink.

use std::fmt::Write;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::watch;
use tracing::{info, warn};

use crate::core::{Notification, NotificationSink, RankError, Ranker};
use crate::file_selector::{FileSelector, SelectedFile};
use crate::result_list::ResultList;

pub const DEFAULT_ACCEPT: &str = ".pdf,.docx,.txt";

const NO_RESULTS_PLACEHOLDER: &str =
    "No results yet. Upload files and click \"Rank Resumes\" to see results.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowPhase {
    /// job description or resumes missing
    Idle,
    Ready,
    Submitting,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please upload a job description!")]
    MissingJobDescription,
    #[error("Please upload at least one resume!")]
    MissingResumes,
    #[error("A ranking request is already in flight")]
    Busy,
}

#[derive(Debug)]
pub enum SubmitOutcome {
    Ranked(usize),
    Rejected(ValidationError),
    Failed(RankError),
}

impl SubmitOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, SubmitOutcome::Ranked(_))
    }
}

pub struct RankingWorkflow {
    ranker: Arc<dyn Ranker>,
    sink: Arc<dyn NotificationSink>,
    job_selector: FileSelector,
    resume_selector: FileSelector,
    job_description: Option<SelectedFile>,
    resumes: Vec<SelectedFile>,
    results: ResultList,
    // the busy flag: Submitting while a request is in flight
    phase: watch::Sender<WorkflowPhase>,
}

impl RankingWorkflow {
    pub fn new(ranker: Arc<dyn Ranker>, sink: Arc<dyn NotificationSink>) -> Self {
        let (phase, _) = watch::channel(WorkflowPhase::Idle);
        Self {
            ranker,
            sink,
            job_selector: FileSelector::new(
                "job-description",
                "Job Description File",
                DEFAULT_ACCEPT,
                false,
            ),
            resume_selector: FileSelector::new("resumes", "Resume Files", DEFAULT_ACCEPT, true),
            job_description: None,
            resumes: Vec::new(),
            results: ResultList::default(),
            phase,
        }
    }

    pub fn with_accept(mut self, accept: &str) -> Self {
        self.job_selector = FileSelector::new(
            &self.job_selector.id,
            &self.job_selector.label,
            accept,
            false,
        );
        self.resume_selector = FileSelector::new(
            &self.resume_selector.id,
            &self.resume_selector.label,
            accept,
            true,
        );
        self
    }

    pub fn job_selector(&self) -> &FileSelector {
        &self.job_selector
    }

    pub fn resume_selector(&self) -> &FileSelector {
        &self.resume_selector
    }

    pub fn job_description(&self) -> Option<&SelectedFile> {
        self.job_description.as_ref()
    }

    pub fn resumes(&self) -> &[SelectedFile] {
        &self.resumes
    }

    pub fn results(&self) -> &ResultList {
        &self.results
    }

    /// For expand/collapse; the result set itself only changes on submit.
    pub fn results_mut(&mut self) -> &mut ResultList {
        &mut self.results
    }

    pub fn phase(&self) -> WorkflowPhase {
        *self.phase.borrow()
    }

    /// Phase changes, including `Submitting` while a request is out
    pub fn subscribe(&self) -> watch::Receiver<WorkflowPhase> {
        self.phase.subscribe()
    }

    pub fn is_loading(&self) -> bool {
        self.phase() == WorkflowPhase::Submitting
    }

    pub fn can_submit(&self) -> bool {
        !self.is_loading() && self.job_description.is_some() && !self.resumes.is_empty()
    }

    /// Replaces the job description with the first picked file.
    pub fn on_job_description_selected(&mut self, files: Vec<SelectedFile>) -> bool {
        let mut picked = None;
        self.job_selector
            .on_change(files, |files| picked = files.into_iter().next());

        let Some(file) = picked else {
            return false;
        };

        info!("Job description selected: {}", file.filename);
        self.job_description = Some(file);
        self.emit(Notification::success("Job description uploaded successfully!"));
        self.publish_readiness();
        true
    }

    /// Replaces the whole resume set; nothing accumulates across picks.
    pub fn on_resumes_selected(&mut self, files: Vec<SelectedFile>) -> bool {
        let mut picked = Vec::new();
        if !self.resume_selector.on_change(files, |files| picked = files) {
            return false;
        }

        info!("{} resume(s) selected", picked.len());
        let count = picked.len();
        self.resumes = picked;
        self.emit(Notification::success(format!(
            "{} resumes uploaded successfully!",
            count
        )));
        self.publish_readiness();
        true
    }

    pub async fn submit(&mut self) -> SubmitOutcome {
        if self.is_loading() {
            warn!("Submit ignored: request already in flight");
            return SubmitOutcome::Rejected(ValidationError::Busy);
        }

        let job_description = match (&self.job_description, self.resumes.is_empty()) {
            (None, _) => return self.reject(ValidationError::MissingJobDescription),
            (Some(_), true) => return self.reject(ValidationError::MissingResumes),
            (Some(jd), false) => jd,
        };

        self.phase.send_replace(WorkflowPhase::Submitting);
        info!(
            "Ranking {} resume(s) against {}",
            self.resumes.len(),
            job_description.filename
        );

        let ranked = self.ranker.rank(job_description, &self.resumes).await;
        let outcome = match ranked {
            Ok(results) => {
                let count = results.len();
                info!("Received {} ranking result(s)", count);
                self.results.replace(results);
                self.emit(Notification::success("Resumes ranked successfully!"));
                SubmitOutcome::Ranked(count)
            }
            Err(err) => {
                warn!("Ranking failed: {}", err);
                self.emit(Notification::error(err.user_message()));
                SubmitOutcome::Failed(err)
            }
        };

        self.publish_readiness();
        outcome
    }

    fn reject(&self, err: ValidationError) -> SubmitOutcome {
        warn!("Submit rejected: {}", err);
        self.emit(Notification::error(err.to_string()));
        SubmitOutcome::Rejected(err)
    }

    fn emit(&self, notification: Notification) {
        self.sink.notify(notification);
    }

    fn publish_readiness(&self) {
        let phase = if self.job_description.is_some() && !self.resumes.is_empty() {
            WorkflowPhase::Ready
        } else {
            WorkflowPhase::Idle
        };
        self.phase.send_replace(phase);
    }

    pub fn submit_label(&self) -> &'static str {
        match self.phase() {
            WorkflowPhase::Submitting => "Ranking Resumes...",
            WorkflowPhase::Ready => "Rank Resumes",
            WorkflowPhase::Idle => "Rank Resumes (disabled)",
        }
    }

    /// Text rendering of the whole page
    pub fn view(&self) -> String {
        let mut out = String::new();

        let _ = writeln!(out, "Resume Ranker");
        let _ = writeln!(
            out,
            "Upload a job description and resumes to find the best match\n"
        );

        let _ = writeln!(out, "Upload Job Description");
        let _ = writeln!(out, "{}", self.job_selector.render());
        if let Some(jd) = &self.job_description {
            let _ = writeln!(out, "  Selected: {} ({} bytes)", jd.filename, jd.size());
        }
        let _ = writeln!(out);

        let _ = writeln!(out, "Upload Resumes");
        let _ = writeln!(out, "{}", self.resume_selector.render());
        if !self.resumes.is_empty() {
            let _ = writeln!(out, "  {} file(s) selected", self.resumes.len());
        }
        let _ = writeln!(out);

        let _ = writeln!(out, "<{}>\n", self.submit_label());

        let _ = writeln!(out, "Ranking Results");
        if self.results.is_empty() {
            let _ = writeln!(out, "{}", NO_RESULTS_PLACEHOLDER);
        } else {
            out.push_str(&self.results.render());
        }

        out
    }
}
