// src/lib.rs
//! Upload a job description and a batch of resumes to a ranking service and
//! present the scored results.

use anyhow::Result;
use std::sync::Arc;
use tracing::info;

pub mod cli;
pub mod config;
pub mod core;
pub mod file_selector;
pub mod result_list;
pub mod types;
pub mod utils;
pub mod workflow;

pub use crate::config::RankerConfig;
pub use crate::core::{DemoRanker, HttpRanker, NotificationSink, RankError, Ranker};
pub use file_selector::{AcceptFilter, FileSelector, SelectedFile};
pub use result_list::{ResultList, ScoreTier};
pub use types::RankingResult;
pub use workflow::{RankingWorkflow, SubmitOutcome, ValidationError, WorkflowPhase};

/// Network or demo backing, as configured
pub fn build_ranker(config: &RankerConfig) -> Result<Arc<dyn Ranker>> {
    if config.demo {
        info!("Demo mode: canned results after {:?}", config.demo_delay());
        return Ok(Arc::new(DemoRanker::new(config.demo_delay())));
    }

    let ranker = HttpRanker::new(&config.api_url, &config.endpoint, config.timeout())?;
    info!("Ranking service: {}", ranker.rank_url());
    Ok(Arc::new(ranker))
}
