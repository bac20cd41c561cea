//! PDF report generation for a completed analysis.
//!
//! Uses the PDF builtin Helvetica faces so no font assets ship with the
//! binary. Layout is a simple top-down cursor with page breaks.

use std::collections::HashMap;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use chrono::Utc;
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference,
    PdfLayerReference, Rgb,
};

use crate::analysis::courses::Course;
use crate::analysis::jd::JdProfile;
use crate::analysis::matcher::MatchDetails;
use crate::analysis::resume::ResumeProfile;
use crate::errors::AppError;

// US letter
const PAGE_WIDTH_MM: f32 = 215.9;
const PAGE_HEIGHT_MM: f32 = 279.4;
const MARGIN_MM: f32 = 18.0;
const LINE_HEIGHT_MM: f32 = 6.0;
/// Greedy wrap width for 11pt Helvetica on the printable area.
const WRAP_COLUMNS: usize = 95;

/// Everything the report renders, borrowed from the finished pipeline.
pub struct ReportData<'a> {
    pub score: u32,
    pub details: &'a MatchDetails,
    pub resume: &'a ResumeProfile,
    pub jd: &'a JdProfile,
    pub recommendations: &'a HashMap<String, Vec<Course>>,
    pub summary: &'a str,
}

/// Writes the analysis report PDF to `path`.
pub fn write_report(data: &ReportData<'_>, path: &Path) -> Result<(), AppError> {
    let mut writer = ReportWriter::new("Resume Gap Analysis Report")?;

    writer.heading("Resume Gap Analysis Report", 22.0);
    writer.line(
        &format!("Generated on {}", Utc::now().format("%B %d, %Y")),
        10.0,
    );
    writer.space();

    writer.set_color(score_color(data.score));
    writer.heading(&format!("Overall Match Score: {}%", data.score), 18.0);
    writer.reset_color();
    writer.space();

    writer.line(&format!("Target Role: {}", or_na(&data.jd.role)), 11.0);
    writer.line(
        &format!("Candidate Education: {}", or_na(&data.resume.education)),
        11.0,
    );
    writer.line(
        &format!("Candidate Location: {}", or_na(&data.resume.location)),
        11.0,
    );
    writer.space();

    writer.heading("Skills Analysis", 14.0);
    writer.wrapped(
        &format!(
            "Matched ({}): {}",
            data.details.matched_skills.len(),
            data.details.matched_skills.join(", ")
        ),
        11.0,
    );
    writer.set_color(Rgb::new(0.8, 0.1, 0.1, None));
    writer.wrapped(
        &format!(
            "Missing ({}): {}",
            data.details.missing_skills.len(),
            data.details.missing_skills.join(", ")
        ),
        11.0,
    );
    writer.reset_color();
    writer.space();

    if !data.summary.is_empty() {
        writer.heading("Executive Summary", 14.0);
        writer.wrapped(data.summary, 11.0);
        writer.space();
    }

    let mut skills: Vec<&String> = data
        .recommendations
        .iter()
        .filter(|(_, courses)| !courses.is_empty())
        .map(|(skill, _)| skill)
        .collect();
    skills.sort();

    if !skills.is_empty() {
        writer.heading("Recommended Learning Path", 14.0);
        for skill in skills {
            writer.bold_line(skill, 11.0);
            for course in &data.recommendations[skill] {
                writer.wrapped(&format!("  - {}: {}", course.title, course.link), 9.0);
            }
            writer.space();
        }
    }

    writer.save(path)
}

fn or_na(value: &str) -> &str {
    if value.trim().is_empty() {
        "N/A"
    } else {
        value
    }
}

fn score_color(score: u32) -> Rgb {
    if score >= 80 {
        Rgb::new(0.1, 0.55, 0.2, None)
    } else if score >= 50 {
        Rgb::new(0.85, 0.55, 0.0, None)
    } else {
        Rgb::new(0.8, 0.1, 0.1, None)
    }
}

struct ReportWriter {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    y: f32,
}

impl ReportWriter {
    fn new(title: &str) -> Result<Self, AppError> {
        let (doc, page, layer) =
            PdfDocument::new(title, Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Page 1");
        let regular = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| AppError::Report(e.to_string()))?;
        let bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| AppError::Report(e.to_string()))?;
        let layer = doc.get_page(page).get_layer(layer);

        Ok(Self {
            doc,
            layer,
            regular,
            bold,
            y: PAGE_HEIGHT_MM - MARGIN_MM,
        })
    }

    fn break_page_if_needed(&mut self) {
        if self.y >= MARGIN_MM + LINE_HEIGHT_MM {
            return;
        }
        let (page, layer) = self
            .doc
            .add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Page");
        self.layer = self.doc.get_page(page).get_layer(layer);
        self.y = PAGE_HEIGHT_MM - MARGIN_MM;
    }

    fn text(&mut self, text: &str, size: f32, font: &IndirectFontRef) {
        self.break_page_if_needed();
        self.layer
            .use_text(text, size, Mm(MARGIN_MM), Mm(self.y), font);
        self.y -= LINE_HEIGHT_MM * (size / 11.0).max(1.0);
    }

    fn line(&mut self, text: &str, size: f32) {
        let font = self.regular.clone();
        self.text(text, size, &font);
    }

    fn bold_line(&mut self, text: &str, size: f32) {
        let font = self.bold.clone();
        self.text(text, size, &font);
    }

    fn heading(&mut self, text: &str, size: f32) {
        self.bold_line(text, size);
        self.y -= LINE_HEIGHT_MM * 0.3;
    }

    fn wrapped(&mut self, text: &str, size: f32) {
        for line in wrap_text(text, WRAP_COLUMNS) {
            self.line(&line, size);
        }
    }

    fn space(&mut self) {
        self.y -= LINE_HEIGHT_MM * 0.6;
    }

    fn set_color(&mut self, color: Rgb) {
        self.layer.set_fill_color(Color::Rgb(color));
    }

    fn reset_color(&mut self) {
        self.layer
            .set_fill_color(Color::Rgb(Rgb::new(0.15, 0.15, 0.2, None)));
    }

    fn save(self, path: &Path) -> Result<(), AppError> {
        let file = File::create(path)?;
        self.doc
            .save(&mut BufWriter::new(file))
            .map_err(|e| AppError::Report(e.to_string()))
    }
}

/// Greedy word wrap; words longer than the width get a line of their own.
fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current = word.to_string();
        } else if current.len() + 1 + word.len() <= width {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            current = word.to_string();
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_data<'a>(
        details: &'a MatchDetails,
        resume: &'a ResumeProfile,
        jd: &'a JdProfile,
        recommendations: &'a HashMap<String, Vec<Course>>,
    ) -> ReportData<'a> {
        ReportData {
            score: 67,
            details,
            resume,
            jd,
            recommendations,
            summary: "Analysis for 5 years experience candidate.",
        }
    }

    #[test]
    fn test_wrap_text_respects_width() {
        let lines = wrap_text("one two three four five", 9);
        assert_eq!(lines, vec!["one two", "three", "four five"]);
    }

    #[test]
    fn test_wrap_text_long_word_gets_own_line() {
        let lines = wrap_text("short reallyreallylongword end", 10);
        assert_eq!(lines, vec!["short", "reallyreallylongword", "end"]);
    }

    #[test]
    fn test_wrap_text_empty_input() {
        assert_eq!(wrap_text("", 10), vec![String::new()]);
    }

    #[test]
    fn test_write_report_produces_pdf_file() {
        let details = MatchDetails {
            matched_skills: vec!["Python".to_string()],
            missing_skills: vec!["SQL".to_string(), "Apache Kafka".to_string()],
            total_skills_count: 3,
            matched_count: 1,
        };
        let resume = ResumeProfile {
            skills: vec!["Python".to_string()],
            certificates: vec![],
            tools_and_tech: vec![],
            years_of_experience: "5".to_string(),
            education: "BSc Computer Science".to_string(),
            location: "Berlin".to_string(),
            file_format: ".pdf".to_string(),
        };
        let jd = JdProfile {
            role: "Data Engineer".to_string(),
            skills_required: vec![],
            certificates_required: vec![],
            tools_technologies: vec![],
            years_of_experience_required: "3+".to_string(),
            required_qualification: String::new(),
            minimum_qualification: String::new(),
            location: "Remote".to_string(),
        };
        let mut recommendations = HashMap::new();
        recommendations.insert(
            "SQL".to_string(),
            vec![Course {
                title: "Intro to SQL".to_string(),
                link: "https://example.com/sql".to_string(),
            }],
        );
        recommendations.insert("Apache Kafka".to_string(), vec![]);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.pdf");
        write_report(&sample_data(&details, &resume, &jd, &recommendations), &path).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
        assert!(bytes.len() > 500);
    }
}
