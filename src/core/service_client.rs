// src/core/service_client.rs
//! HTTP backing for the ranking service - multipart upload, JSON results

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use std::time::Duration;
use tracing::{debug, error, info};

use super::ranker::{RankError, Ranker};
use crate::file_selector::SelectedFile;
use crate::types::{ErrorBody, RankingResult, ServiceInfo};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
pub const RANK_RESUMES_ENDPOINT: &str = "/rank_resumes/";

pub const JOB_DESCRIPTION_FIELD: &str = "job_description_file";
pub const RESUME_FIELD: &str = "resume_files";

pub struct HttpRanker {
    client: reqwest::Client,
    base_url: String,
    endpoint: String,
}

impl HttpRanker {
    /// No timeout unless one is given; the transport default applies.
    pub fn new(base_url: &str, endpoint: &str, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            endpoint: endpoint.to_string(),
        })
    }

    pub fn rank_url(&self) -> String {
        format!("{}{}", self.base_url, self.endpoint)
    }

    fn part(file: &SelectedFile) -> Result<Part, RankError> {
        Part::bytes(file.bytes.clone())
            .file_name(file.filename.clone())
            .mime_str(&file.content_type)
            .map_err(|e| {
                RankError::Transport(format!(
                    "invalid content type {} for {}: {}",
                    file.content_type, file.filename, e
                ))
            })
    }

    fn build_form(job_description: &SelectedFile, resumes: &[SelectedFile]) -> Result<Form, RankError> {
        let mut form = Form::new().part(JOB_DESCRIPTION_FIELD, Self::part(job_description)?);
        for resume in resumes {
            form = form.part(RESUME_FIELD, Self::part(resume)?);
        }
        Ok(form)
    }

    /// Root banner of the service, handy as a reachability check
    pub async fn service_info(&self) -> Result<ServiceInfo> {
        let url = format!("{}/", self.base_url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Failed to GET from {}", url))?;

        let status = response.status();
        if status.is_success() {
            response
                .json::<ServiceInfo>()
                .await
                .context("Failed to parse JSON response")
        } else {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            anyhow::bail!("HTTP {} error: {}", status, error_text)
        }
    }
}

#[async_trait]
impl Ranker for HttpRanker {
    async fn rank(
        &self,
        job_description: &SelectedFile,
        resumes: &[SelectedFile],
    ) -> Result<Vec<RankingResult>, RankError> {
        let url = self.rank_url();
        let form = Self::build_form(job_description, resumes)?;

        info!(
            "Calling ranking service: {} ({} resume(s))",
            url,
            resumes.len()
        );

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                error!("Ranking request failed: {}", e);
                RankError::Transport(e.to_string())
            })?;

        let status = response.status();
        debug!("Response status: {}", status);

        let body = response.text().await.map_err(|e| {
            error!("Failed to read ranking response: {}", e);
            RankError::Transport(e.to_string())
        })?;

        if status.is_success() {
            serde_json::from_str::<Vec<RankingResult>>(&body).map_err(|e| {
                error!("Unexpected ranking response body: {}", body);
                RankError::Decode(e.to_string())
            })
        } else {
            error!("Ranking service error response {}: {}", status, body);
            let parsed = serde_json::from_str::<ErrorBody>(&body).ok();

            Err(RankError::Status {
                status: status.as_u16(),
                reason: status
                    .canonical_reason()
                    .unwrap_or("Unknown error")
                    .to_string(),
                message: parsed.and_then(|b| b.error).filter(|m| !m.is_empty()),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_url_joins_base_and_endpoint() {
        let ranker = HttpRanker::new("http://localhost:8000/", RANK_RESUMES_ENDPOINT, None).unwrap();
        assert_eq!(ranker.rank_url(), "http://localhost:8000/rank_resumes/");
    }

    #[test]
    fn test_bad_content_type_is_reported() {
        let file = SelectedFile::new("cv.pdf", "not a mime type", Vec::new());
        let err = HttpRanker::build_form(&file, &[]).unwrap_err();
        assert!(matches!(err, RankError::Transport(msg) if msg.contains("cv.pdf")));
    }
}
