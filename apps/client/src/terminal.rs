//! A plain-text rendering of the analysis surface for the CLI binary.
//!
//! Interactive affordances (drop target styling, loading spinner) degrade to
//! log lines or nothing; result rendering prints a readable report.

use std::io::{self, Write};

use crate::models::ScoreBand;
use crate::surface::{UiSurface, NO_GAPS_PLACEHOLDER, NO_RECOMMENDATIONS_PLACEHOLDER};

pub struct TerminalSurface<W: Write> {
    out: W,
}

impl TerminalSurface<io::Stdout> {
    pub fn stdout() -> Self {
        Self { out: io::stdout() }
    }
}

impl<W: Write> TerminalSurface<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, text: &str) {
        // Terminal output failing is not actionable mid-render.
        let _ = writeln!(self.out, "{text}");
    }
}

impl<W: Write> UiSurface for TerminalSurface<W> {
    fn set_filename_label(&mut self, name: &str) {
        self.line(&format!("Resume: {name}"));
    }

    fn set_drop_target_active(&mut self, _active: bool) {}

    fn alert(&mut self, message: &str) {
        self.line(&format!("! {message}"));
    }

    fn set_submit_enabled(&mut self, _enabled: bool) {}

    fn set_loading_visible(&mut self, visible: bool) {
        if visible {
            self.line("Analyzing...");
        }
    }

    fn set_results_visible(&mut self, visible: bool) {
        if visible {
            self.line("");
            self.line("=== Analysis Results ===");
        }
    }

    fn clear_results(&mut self) {}

    fn render_score(&mut self, label: &str, band: ScoreBand, _gauge_offset: f32) {
        self.line(&format!("Match score: {label} ({})", band.css_class()));
    }

    fn push_missing_skill_tag(&mut self, skill: &str) {
        self.line(&format!("  missing: {skill}"));
    }

    fn push_matched_skill_tag(&mut self, skill: &str) {
        self.line(&format!("  matched: {skill}"));
    }

    fn render_no_gaps_placeholder(&mut self) {
        self.line(&format!("  {NO_GAPS_PLACEHOLDER}"));
    }

    fn begin_course_group(&mut self, skill: &str) {
        self.line(&format!("Courses for {skill}:"));
    }

    fn push_course_link(&mut self, title: &str, link: &str) {
        self.line(&format!("  - {title}: {link}"));
    }

    fn render_no_recommendations_placeholder(&mut self) {
        self.line(&format!("  {NO_RECOMMENDATIONS_PLACEHOLDER}"));
    }

    fn set_report_link(&mut self, url: &str) {
        self.line(&format!("Report: {url}"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rendered(f: impl FnOnce(&mut TerminalSurface<Vec<u8>>)) -> String {
        let mut surface = TerminalSurface::new(Vec::new());
        f(&mut surface);
        String::from_utf8(surface.into_inner()).unwrap()
    }

    #[test]
    fn test_score_line_includes_band_class() {
        let out = rendered(|s| s.render_score("85%", ScoreBand::High, 0.0));
        assert_eq!(out, "Match score: 85% (high)\n");
    }

    #[test]
    fn test_alert_is_prefixed() {
        let out = rendered(|s| s.alert("something broke"));
        assert_eq!(out, "! something broke\n");
    }

    #[test]
    fn test_loading_prints_only_when_shown() {
        let out = rendered(|s| {
            s.set_loading_visible(true);
            s.set_loading_visible(false);
        });
        assert_eq!(out, "Analyzing...\n");
    }

    #[test]
    fn test_course_group_renders_heading_and_links() {
        let out = rendered(|s| {
            s.begin_course_group("SQL");
            s.push_course_link("Intro to SQL", "https://example.com/sql");
        });
        assert_eq!(out, "Courses for SQL:\n  - Intro to SQL: https://example.com/sql\n");
    }
}
