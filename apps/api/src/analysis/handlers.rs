//! Axum route handlers for the analyze/download API.

use std::collections::HashMap;

use axum::{
    extract::{Multipart, Path, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use serde::Serialize;
use tracing::info;

use crate::analysis::courses::Course;
use crate::analysis::jd::{parse_jd, JdProfile};
use crate::analysis::matcher::{match_skills, MatchDetails};
use crate::analysis::resume::{parse_resume, ResumeProfile};
use crate::errors::AppError;
use crate::report::{write_report, ReportData};
use crate::state::AppState;
use crate::storage::{is_safe_report_filename, sanitize_filename, short_id};

// ────────────────────────────────────────────────────────────────────────────
// Response types
// ────────────────────────────────────────────────────────────────────────────

/// Success envelope for `POST /api/analyze`. Failures are produced by
/// `AppError::into_response` with the same `success`/`error` shape.
#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub success: bool,
    pub data: AnalysisData,
    pub report_url: String,
}

#[derive(Debug, Serialize)]
pub struct AnalysisData {
    pub resume_data: ResumeProfile,
    pub jd_data: JdProfile,
    pub match_score: u32,
    pub match_details: MatchDetails,
    pub course_recommendations: HashMap<String, Vec<Course>>,
    pub summary: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/analyze
///
/// Multipart form with a `resume` file field and a `jd_text` text field.
/// Runs the full pipeline: extract → structure both sides → match → course
/// lookup → PDF report.
pub async fn handle_analyze(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let mut resume: Option<(String, Bytes)> = None;
    let mut jd_text = String::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "resume" => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;
                resume = Some((filename, bytes));
            }
            "jd_text" => {
                jd_text = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("Failed to read jd_text: {e}")))?;
            }
            _ => {}
        }
    }

    let (filename, bytes, jd_text) = validate_inputs(resume, jd_text)?;

    let response = run_analysis(&state, &filename, &bytes, &jd_text).await?;
    Ok(Json(response))
}

/// Checks the extracted form fields before any pipeline work starts.
/// Returns the filename, resume bytes, and trimmed JD text.
fn validate_inputs(
    resume: Option<(String, Bytes)>,
    jd_text: String,
) -> Result<(String, Bytes, String), AppError> {
    let (filename, bytes) =
        resume.ok_or_else(|| AppError::Validation("No resume file uploaded".to_string()))?;
    if filename.is_empty() {
        return Err(AppError::Validation("No selected file".to_string()));
    }
    let jd_text = jd_text.trim().to_string();
    if jd_text.is_empty() {
        return Err(AppError::Validation("Job Description is required".to_string()));
    }
    Ok((filename, bytes, jd_text))
}

async fn run_analysis(
    state: &AppState,
    filename: &str,
    bytes: &[u8],
    jd_text: &str,
) -> Result<AnalyzeResponse, AppError> {
    let id = short_id();

    // Keep a copy of the upload on disk, same as the hosted pipeline does.
    let stored_name = format!("{id}_{}", sanitize_filename(filename));
    let upload_path = state.config.upload_dir.join(&stored_name);
    tokio::fs::write(&upload_path, bytes).await?;
    info!("Stored upload at {}", upload_path.display());

    let resume_data = parse_resume(bytes, filename, &state.llm).await?;
    let jd_data = parse_jd(jd_text, &state.llm).await?;

    let report = match_skills(&resume_data.skills, &jd_data.skills_required);
    info!(
        "Matched {}/{} JD skills (score {}%)",
        report.details.matched_count, report.details.total_skills_count, report.score
    );

    let course_recommendations = if report.details.missing_skills.is_empty() {
        HashMap::new()
    } else {
        state
            .course_finder
            .courses_for_skills(&report.details.missing_skills)
            .await
    };

    let summary = summary_line(&resume_data);

    let report_filename = format!("analysis_report_{id}.pdf");
    let report_path = state.config.report_dir.join(&report_filename);
    write_report(
        &ReportData {
            score: report.score,
            details: &report.details,
            resume: &resume_data,
            jd: &jd_data,
            recommendations: &course_recommendations,
            summary: &summary,
        },
        &report_path,
    )?;
    info!("Wrote report to {}", report_path.display());

    Ok(AnalyzeResponse {
        success: true,
        data: AnalysisData {
            resume_data,
            jd_data,
            match_score: report.score,
            match_details: report.details,
            course_recommendations,
            summary,
        },
        report_url: format!("/api/download/{report_filename}"),
    })
}

fn summary_line(resume: &ResumeProfile) -> String {
    let years = if resume.years_of_experience.trim().is_empty() {
        "N/A"
    } else {
        resume.years_of_experience.trim()
    };
    format!("Analysis for {years} experience candidate.")
}

/// GET /api/download/:filename
///
/// Streams a previously generated report as an attachment. The filename is a
/// single path segment; anything that still looks like a traversal attempt is
/// rejected.
pub async fn handle_download(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Result<Response, AppError> {
    if !is_safe_report_filename(&filename) {
        return Err(AppError::Validation("Invalid report filename".to_string()));
    }

    let path = state.config.report_dir.join(&filename);
    let bytes = tokio::fs::read(&path)
        .await
        .map_err(|_| AppError::NotFound(format!("Report {filename} not found")))?;

    let headers = [
        (header::CONTENT_TYPE, "application/pdf".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{filename}\""),
        ),
    ];
    Ok((headers, bytes).into_response())
}
