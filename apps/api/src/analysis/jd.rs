//! JD structuring: turns free-text job description into a structured profile
//! via the LLM.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::analysis::prompts::{JD_PARSE_PROMPT_TEMPLATE, JD_PARSE_SYSTEM};
use crate::analysis::{coerce_list_fields, coerce_string_fields, unwrap_singleton};
use crate::errors::AppError;
use crate::llm_client::LlmClient;

/// Structured hiring requirements extracted from a job description.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JdProfile {
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub skills_required: Vec<String>,
    #[serde(default)]
    pub certificates_required: Vec<String>,
    #[serde(default)]
    pub tools_technologies: Vec<String>,
    #[serde(default)]
    pub years_of_experience_required: String,
    #[serde(default)]
    pub required_qualification: String,
    #[serde(default)]
    pub minimum_qualification: String,
    #[serde(default)]
    pub location: String,
}

/// Parses a job description into a structured `JdProfile`.
pub async fn parse_jd(jd_text: &str, llm: &LlmClient) -> Result<JdProfile, AppError> {
    let prompt = JD_PARSE_PROMPT_TEMPLATE.replace("{jd_text}", jd_text);
    let raw: Value = llm
        .complete_json(&prompt, JD_PARSE_SYSTEM)
        .await
        .map_err(|e| AppError::Llm(format!("JD parsing failed: {e}")))?;

    let mut raw = unwrap_singleton(raw);
    coerce_list_fields(
        &mut raw,
        &[
            "skills_required",
            "certificates_required",
            "tools_technologies",
        ],
    );
    coerce_string_fields(
        &mut raw,
        &[
            "role",
            "years_of_experience_required",
            "required_qualification",
            "minimum_qualification",
            "location",
        ],
    );

    serde_json::from_value(raw)
        .map_err(|e| AppError::Llm(format!("JD parsing returned unexpected shape: {e}")))
}
