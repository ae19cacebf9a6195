// src/core/ranker.rs
//! The ranking backend as seen by the workflow: one call, results or failure.

use async_trait::async_trait;
use thiserror::Error;

use crate::file_selector::SelectedFile;
use crate::types::RankingResult;

const GENERIC_FAILURE: &str = "Failed to rank resumes. Please try again.";

#[derive(Debug, Error)]
pub enum RankError {
    #[error("request failed: {0}")]
    Transport(String),
    #[error("ranking service returned {status} {reason}")]
    Status {
        status: u16,
        reason: String,
        /// `error` field of the response body, when it had one
        message: Option<String>,
    },
    #[error("could not decode ranking response: {0}")]
    Decode(String),
}

impl RankError {
    /// Text shown to the user for this failure
    pub fn user_message(&self) -> String {
        match self {
            RankError::Status {
                reason, message, ..
            } => format!(
                "Failed to rank resumes: {}",
                message.as_deref().unwrap_or(reason)
            ),
            RankError::Transport(_) | RankError::Decode(_) => GENERIC_FAILURE.to_string(),
        }
    }
}

#[async_trait]
pub trait Ranker: Send + Sync {
    async fn rank(
        &self,
        job_description: &SelectedFile,
        resumes: &[SelectedFile],
    ) -> Result<Vec<RankingResult>, RankError>;
}
