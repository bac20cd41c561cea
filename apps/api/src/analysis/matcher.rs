//! Skill matching: pure, deterministic comparison of resume skills against
//! JD requirements. No LLM call; fully testable.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// The matched/missing breakdown returned to the client alongside the score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchDetails {
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub total_skills_count: usize,
    pub matched_count: usize,
}

/// Full output of the matching step.
#[derive(Debug, Clone)]
pub struct MatchReport {
    /// Integer percentage, 0-100.
    pub score: u32,
    pub details: MatchDetails,
}

/// Canonical form used for comparison: trimmed, lowercased, inner whitespace
/// collapsed.
pub fn normalize_skill(skill: &str) -> String {
    skill
        .trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Matches resume skills against JD skills.
///
/// Comparison happens on normalized forms; the reported lists keep the JD's
/// original casing, are sorted, and carry one entry per distinct skill (first
/// occurrence wins). `"null"` placeholder entries from the LLM
/// are discarded on both sides. Score is `matched / total` of distinct JD
/// skills, rounded to the nearest integer percent, 0 when the JD names none.
pub fn match_skills(resume_skills: &[String], jd_skills: &[String]) -> MatchReport {
    let mut resume_norm: HashSet<String> = resume_skills.iter().map(|s| normalize_skill(s)).collect();
    let mut jd_norm: HashSet<String> = jd_skills.iter().map(|s| normalize_skill(s)).collect();

    resume_norm.remove("null");
    jd_norm.remove("null");
    resume_norm.remove("");
    jd_norm.remove("");

    let matched_norm: HashSet<&String> = jd_norm.intersection(&resume_norm).collect();

    let mut matched_skills: Vec<String> = Vec::new();
    let mut missing_skills: Vec<String> = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();
    for skill in jd_skills {
        let norm = normalize_skill(skill);
        if norm == "null" || norm.is_empty() || !seen.insert(norm.clone()) {
            continue;
        }
        if matched_norm.contains(&norm) {
            matched_skills.push(skill.clone());
        } else {
            missing_skills.push(skill.clone());
        }
    }
    matched_skills.sort();
    missing_skills.sort();

    let total = jd_norm.len();
    let matched_count = matched_norm.len();
    let score = if total > 0 {
        ((matched_count as f64 / total as f64) * 100.0).round() as u32
    } else {
        0
    };

    MatchReport {
        score,
        details: MatchDetails {
            matched_skills,
            missing_skills,
            total_skills_count: total,
            matched_count,
        },
    }
}
