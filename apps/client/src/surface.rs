//! The injected UI surface: an abstraction over the page the controller
//! renders into. One method per element the markup exposes (filename label,
//! drop target, submit control, loading indicator, result containers).

use crate::models::ScoreBand;

/// Placeholder rendered in the missing-skills region when there are no gaps.
pub const NO_GAPS_PLACEHOLDER: &str = "Great news! No skill gaps detected.";
/// Placeholder rendered when no skill produced any course recommendation.
pub const NO_RECOMMENDATIONS_PLACEHOLDER: &str = "No course recommendations available.";

pub trait UiSurface {
    /// Updates the visible filename label next to the drop zone.
    fn set_filename_label(&mut self, name: &str);

    /// Toggles the drop target's "active" styling during a drag.
    fn set_drop_target_active(&mut self, active: bool);

    /// Shows a blocking notification to the user.
    fn alert(&mut self, message: &str);

    fn set_submit_enabled(&mut self, enabled: bool);

    fn set_loading_visible(&mut self, visible: bool);

    fn set_results_visible(&mut self, visible: bool);

    /// Empties all result containers so a new attempt never shows stale
    /// content from the previous one.
    fn clear_results(&mut self);

    /// Renders the circular score indicator: dash offset for the gauge arc,
    /// the literal percentage label, and the color band class.
    fn render_score(&mut self, label: &str, band: ScoreBand, gauge_offset: f32);

    fn push_missing_skill_tag(&mut self, skill: &str);

    fn push_matched_skill_tag(&mut self, skill: &str);

    /// Rendered instead of tags when missing-skills is empty.
    fn render_no_gaps_placeholder(&mut self);

    /// Opens a new course group headed by the skill name.
    fn begin_course_group(&mut self, skill: &str);

    /// Adds one course link (opens in a new context) to the current group.
    fn push_course_link(&mut self, title: &str, link: &str);

    /// Rendered when no skill produced a course group at all.
    fn render_no_recommendations_placeholder(&mut self);

    /// Points the "download report" control at the generated report.
    fn set_report_link(&mut self, url: &str);
}
