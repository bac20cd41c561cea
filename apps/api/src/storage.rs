//! Local disk layout: upload and report directories, safe filenames.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;
use uuid::Uuid;

use crate::config::Config;

/// Creates the upload and report directories if they do not exist.
pub fn ensure_dirs(config: &Config) -> Result<()> {
    for dir in [&config.upload_dir, &config.report_dir] {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory {}", dir.display()))?;
    }
    info!(
        "Storage ready: uploads={}, reports={}",
        config.upload_dir.display(),
        config.report_dir.display()
    );
    Ok(())
}

/// Short random id used to keep stored filenames unique.
pub fn short_id() -> String {
    Uuid::new_v4().simple().to_string()[..8].to_string()
}

/// Reduces a client-supplied filename to a safe basename: path components are
/// stripped and anything outside `[A-Za-z0-9._-]` is replaced.
pub fn sanitize_filename(name: &str) -> String {
    let base = Path::new(name)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("");

    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();

    let cleaned = cleaned.trim_start_matches('.').to_string();
    if cleaned.is_empty() {
        "resume".to_string()
    } else {
        cleaned
    }
}

/// Accepts only report filenames that stay inside the report directory.
/// The download route captures a single path segment, but encoded separators
/// arrive here as literal characters and must still be refused.
pub fn is_safe_report_filename(name: &str) -> bool {
    !name.is_empty() && !name.contains("..") && !name.contains('/') && !name.contains('\\')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_keeps_simple_names() {
        assert_eq!(sanitize_filename("resume.pdf"), "resume.pdf");
        assert_eq!(sanitize_filename("My_CV-2024.pdf"), "My_CV-2024.pdf");
    }

    #[test]
    fn test_sanitize_strips_paths() {
        assert_eq!(sanitize_filename("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_filename("/tmp/evil.pdf"), "evil.pdf");
    }

    #[test]
    fn test_sanitize_replaces_odd_characters() {
        assert_eq!(sanitize_filename("my resume (1).pdf"), "my_resume__1_.pdf");
    }

    #[test]
    fn test_sanitize_empty_falls_back() {
        assert_eq!(sanitize_filename(""), "resume");
        assert_eq!(sanitize_filename("..."), "resume");
    }

    #[test]
    fn test_safe_report_filename_accepts_plain_names() {
        assert!(is_safe_report_filename("analysis_report_ab12cd34.pdf"));
        assert!(is_safe_report_filename("report-2.pdf"));
    }

    #[test]
    fn test_safe_report_filename_rejects_traversal() {
        assert!(!is_safe_report_filename("../secret.pdf"));
        assert!(!is_safe_report_filename("reports/../../etc/passwd"));
        assert!(!is_safe_report_filename("a/b.pdf"));
        assert!(!is_safe_report_filename("a\\b.pdf"));
        assert!(!is_safe_report_filename(""));
    }

    #[test]
    fn test_short_id_is_eight_hex_chars() {
        let id = short_id();
        assert_eq!(id.len(), 8);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
