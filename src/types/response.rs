// src/types/response.rs
use serde::{Deserialize, Serialize};

// ===== Ranking Service Response Types =====

/// One scored resume as returned by the ranking service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingResult {
    pub filename: String,
    /// 0-10 on the service side, not checked here
    pub score: f64,
    pub reasoning: String,
}

impl RankingResult {
    pub fn new(filename: impl Into<String>, score: f64, reasoning: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            score,
            reasoning: reasoning.into(),
        }
    }
}

/// Best-effort shape of a failure body. The service uses `error` for
/// rejected inputs and `message` for informational replies.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: Option<String>,
    pub message: Option<String>,
}

/// Root banner served by the ranking service on `GET /`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceInfo {
    pub message: String,
    pub project: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ranking_results_decode_from_service_array() {
        let body = r#"[{"filename":"a.pdf","score":8,"reasoning":"good fit"},
                       {"filename":"b.docx","score":3.5,"reasoning":"junior"}]"#;
        let results: Vec<RankingResult> = serde_json::from_str(body).unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0], RankingResult::new("a.pdf", 8.0, "good fit"));
        assert_eq!(results[1].score, 3.5);
    }

    #[test]
    fn test_object_body_is_not_a_result_list() {
        let body = r#"{"message":"No valid resumes uploaded."}"#;
        assert!(serde_json::from_str::<Vec<RankingResult>>(body).is_err());
    }

    #[test]
    fn test_error_body_tolerates_missing_fields() {
        let body: ErrorBody = serde_json::from_str(r#"{"error":"bad file"}"#).unwrap();
        assert_eq!(body.error.as_deref(), Some("bad file"));
        assert!(body.message.is_none());

        let empty: ErrorBody = serde_json::from_str("{}").unwrap();
        assert!(empty.error.is_none());
    }
}
