//! Resume structuring: extracts text from the uploaded document and turns it
//! into a structured candidate profile via the LLM.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use crate::analysis::prompts::{RESUME_PARSE_PROMPT_TEMPLATE, RESUME_PARSE_SYSTEM};
use crate::analysis::{coerce_list_fields, coerce_string_fields, unwrap_singleton};
use crate::errors::AppError;
use crate::llm_client::LlmClient;

/// Structured candidate data extracted from a resume.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResumeProfile {
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub certificates: Vec<String>,
    #[serde(default)]
    pub tools_and_tech: Vec<String>,
    #[serde(default)]
    pub years_of_experience: String,
    #[serde(default)]
    pub education: String,
    #[serde(default)]
    pub location: String,
    /// Filled locally from the uploaded filename, never by the LLM.
    #[serde(default)]
    pub file_format: String,
}

/// Document formats the pipeline knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Pdf,
    Word,
}

impl DocumentFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            DocumentFormat::Pdf => ".pdf",
            DocumentFormat::Word => ".docx",
        }
    }
}

/// Determines the document format from the uploaded filename.
pub fn document_format(filename: &str) -> Result<DocumentFormat, AppError> {
    let lower = filename.to_lowercase();
    if lower.ends_with(".pdf") {
        Ok(DocumentFormat::Pdf)
    } else if lower.ends_with(".doc") || lower.ends_with(".docx") {
        Ok(DocumentFormat::Word)
    } else {
        Err(AppError::UnsupportedDocument(
            "Unsupported file format. Accepted: .pdf, .doc, .docx".to_string(),
        ))
    }
}

/// Extracts plain text from the uploaded resume bytes.
pub fn extract_resume_text(bytes: &[u8], filename: &str) -> Result<String, AppError> {
    let format = document_format(filename)?;

    let text = match format {
        DocumentFormat::Pdf => pdf_extract::extract_text_from_mem(bytes)
            .map_err(|e| AppError::Extraction(format!("Failed to read PDF: {e}")))?,
        DocumentFormat::Word => {
            // Word conversion needs an office toolchain that is not available
            // on server deployments. Same failure mode as the hosted pipeline.
            return Err(AppError::UnsupportedDocument(
                "DOC/DOCX conversion is not available on this system; please upload a PDF"
                    .to_string(),
            ));
        }
    };

    if text.trim().is_empty() {
        return Err(AppError::Extraction(
            "No text could be extracted from the resume".to_string(),
        ));
    }

    Ok(text)
}

/// Parses resume bytes into a structured `ResumeProfile`.
pub async fn parse_resume(
    bytes: &[u8],
    filename: &str,
    llm: &LlmClient,
) -> Result<ResumeProfile, AppError> {
    let format = document_format(filename)?;
    let text = extract_resume_text(bytes, filename)?;
    info!("Extracted {} chars of resume text", text.len());

    let prompt = RESUME_PARSE_PROMPT_TEMPLATE.replace("{resume_text}", &text);
    let raw: Value = llm
        .complete_json(&prompt, RESUME_PARSE_SYSTEM)
        .await
        .map_err(|e| AppError::Llm(format!("Resume parsing failed: {e}")))?;

    let mut raw = unwrap_singleton(raw);
    coerce_list_fields(&mut raw, &["skills", "certificates", "tools_and_tech"]);
    coerce_string_fields(
        &mut raw,
        &["years_of_experience", "education", "location"],
    );

    let mut profile: ResumeProfile = serde_json::from_value(raw)
        .map_err(|e| AppError::Llm(format!("Resume parsing returned unexpected shape: {e}")))?;
    profile.file_format = format.extension().to_string();

    Ok(profile)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_document_format_pdf() {
        assert_eq!(document_format("resume.pdf").unwrap(), DocumentFormat::Pdf);
        assert_eq!(document_format("RESUME.PDF").unwrap(), DocumentFormat::Pdf);
    }

    #[test]
    fn test_document_format_word() {
        assert_eq!(document_format("cv.docx").unwrap(), DocumentFormat::Word);
        assert_eq!(document_format("cv.doc").unwrap(), DocumentFormat::Word);
    }

    #[test]
    fn test_document_format_rejects_others() {
        assert!(document_format("resume.txt").is_err());
        assert!(document_format("resume").is_err());
    }

    #[test]
    fn test_word_extraction_is_unsupported() {
        let err = extract_resume_text(b"PK", "cv.docx").unwrap_err();
        assert!(matches!(err, AppError::UnsupportedDocument(_)));
    }

    #[test]
    fn test_profile_deserializes_with_missing_fields() {
        let profile: ResumeProfile = serde_json::from_value(json!({
            "skills": ["Rust"]
        }))
        .unwrap();
        assert_eq!(profile.skills, vec!["Rust"]);
        assert!(profile.education.is_empty());
        assert!(profile.certificates.is_empty());
    }
}
