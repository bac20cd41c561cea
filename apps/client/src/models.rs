//! Typed schema for the analyze API response, validated at the boundary so a
//! malformed server payload fails with a distinguishable error instead of
//! leaking into rendering.

use std::collections::HashMap;

use serde::Deserialize;

use crate::error::{SubmitError, FALLBACK_ERROR_MESSAGE};

/// Raw response envelope: `{ success, error?, data?, report_url? }`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiEnvelope {
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub data: Option<AnalysisData>,
    #[serde(default)]
    pub report_url: Option<String>,
}

/// The slice of the analysis payload the UI consumes. The server sends more
/// (structured resume/JD data, a summary); unknown fields are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisData {
    pub match_score: u32,
    pub match_details: MatchDetails,
    #[serde(default)]
    pub course_recommendations: HashMap<String, Vec<Course>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MatchDetails {
    #[serde(default)]
    pub matched_skills: Vec<String>,
    #[serde(default)]
    pub missing_skills: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Course {
    pub title: String,
    pub link: String,
}

/// A validated, render-ready analysis result.
#[derive(Debug, Clone)]
pub struct AnalysisResult {
    pub match_score: u32,
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub course_recommendations: HashMap<String, Vec<Course>>,
    pub report_url: String,
}

impl ApiEnvelope {
    /// Checks the envelope against the contract and produces a result that is
    /// safe to render. Shape violations become `MalformedResponse`; a false
    /// success flag becomes `Application` with the server's reason.
    pub fn into_result(self) -> Result<AnalysisResult, SubmitError> {
        if !self.success {
            let message = self
                .error
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| FALLBACK_ERROR_MESSAGE.to_string());
            return Err(SubmitError::Application(message));
        }

        let data = self.data.ok_or_else(|| {
            SubmitError::MalformedResponse("success response is missing data".to_string())
        })?;

        if data.match_score > 100 {
            return Err(SubmitError::MalformedResponse(format!(
                "match_score {} is out of range",
                data.match_score
            )));
        }

        let report_url = self
            .report_url
            .filter(|u| !u.trim().is_empty())
            .ok_or_else(|| {
                SubmitError::MalformedResponse("success response is missing report_url".to_string())
            })?;

        Ok(AnalysisResult {
            match_score: data.match_score,
            matched_skills: data.match_details.matched_skills,
            missing_skills: data.match_details.missing_skills,
            course_recommendations: data.course_recommendations,
            report_url,
        })
    }
}

/// Score color band. Thresholds: 0-49 low, 50-79 medium, 80-100 high.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
    Low,
    Medium,
    High,
}

impl ScoreBand {
    pub fn for_score(score: u32) -> Self {
        if score < 50 {
            ScoreBand::Low
        } else if score < 80 {
            ScoreBand::Medium
        } else {
            ScoreBand::High
        }
    }

    /// The style class applied to the score indicator.
    pub fn css_class(&self) -> &'static str {
        match self {
            ScoreBand::Low => "low",
            ScoreBand::Medium => "medium",
            ScoreBand::High => "high",
        }
    }
}
