// src/core/demo_ranker.rs
//! Offline backing: a canned result set after a fixed pause, no network.

use async_trait::async_trait;
use std::time::Duration;
use tracing::info;

use super::ranker::{RankError, Ranker};
use crate::file_selector::SelectedFile;
use crate::types::RankingResult;

pub const DEFAULT_DEMO_DELAY_MS: u64 = 1500;

#[derive(Debug, Clone)]
pub struct DemoRanker {
    delay: Duration,
}

impl DemoRanker {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn canned_results() -> Vec<RankingResult> {
        vec![
            RankingResult::new(
                "jane_doe_resume.pdf",
                8.5,
                "Seven years of backend work in the required stack.\nLed a team of four; matches the seniority asked for.",
            ),
            RankingResult::new(
                "john_smith_resume.docx",
                6.0,
                "Solid fundamentals and relevant domain exposure.\nNo production experience with the listed cloud platform.",
            ),
            RankingResult::new(
                "alex_lee_resume.txt",
                3.0,
                "Background is mostly front-end design.\nFew of the required skills are mentioned.",
            ),
        ]
    }
}

impl Default for DemoRanker {
    fn default() -> Self {
        Self::new(Duration::from_millis(DEFAULT_DEMO_DELAY_MS))
    }
}

#[async_trait]
impl Ranker for DemoRanker {
    async fn rank(
        &self,
        job_description: &SelectedFile,
        resumes: &[SelectedFile],
    ) -> Result<Vec<RankingResult>, RankError> {
        info!(
            "Demo ranking for {} against {} resume(s), returning canned results",
            job_description.filename,
            resumes.len()
        );
        tokio::time::sleep(self.delay).await;
        Ok(Self::canned_results())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_demo_returns_canned_results_after_delay() {
        let ranker = DemoRanker::new(Duration::from_secs(2));
        let jd = SelectedFile::from_bytes("jd.txt", b"role".to_vec());
        let started = tokio::time::Instant::now();

        let results = ranker.rank(&jd, &[]).await.unwrap();

        assert!(started.elapsed() >= Duration::from_secs(2));
        assert_eq!(results, DemoRanker::canned_results());
        assert_eq!(results.len(), 3);
    }
}
