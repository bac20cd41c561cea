//! Course recommendations: scrapes public course search results for each
//! missing skill. Behind a trait so handlers and tests can swap the backend.
//!
//! Lookup failures degrade to an empty list for that skill; a broken scrape
//! must never fail the analysis itself.

use std::collections::HashMap;

use async_trait::async_trait;
use reqwest::Client;
use scraper::{Html, Selector};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// A single recommended learning resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub title: String,
    pub link: String,
}

/// Course lookup backend. Carried in `AppState` as `Arc<dyn CourseFinder>`.
#[async_trait]
pub trait CourseFinder: Send + Sync {
    /// Returns recommendations keyed by skill. Skills that yield nothing map
    /// to an empty list rather than being omitted.
    async fn courses_for_skills(&self, skills: &[String]) -> HashMap<String, Vec<Course>>;
}

/// Only this many missing skills are searched, to bound request latency.
const MAX_SKILLS: usize = 3;
/// Target number of courses per skill.
const COURSES_PER_SKILL: usize = 2;

/// Web-scraping course finder: DuckDuckGo HTML results first, Coursera search
/// as a backup when too few links were found.
pub struct ScraperCourseFinder {
    client: Client,
}

impl ScraperCourseFinder {
    pub fn new() -> Self {
        let client = Client::builder()
            .user_agent("Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36")
            .timeout(std::time::Duration::from_secs(5))
            .build()
            .expect("Failed to create HTTP client");

        Self { client }
    }

    async fn fetch(&self, url: &str) -> Option<String> {
        match self.client.get(url).send().await {
            Ok(response) if response.status().is_success() => response.text().await.ok(),
            Ok(response) => {
                warn!("Course search returned {} for {url}", response.status());
                None
            }
            Err(e) => {
                warn!("Course search request failed for {url}: {e}");
                None
            }
        }
    }

    async fn courses_for_skill(&self, skill: &str) -> Vec<Course> {
        let mut found = Vec::new();

        let query = format!("top online courses for {skill}").replace(' ', "+");
        let url = format!("https://duckduckgo.com/html/?q={query}");
        if let Some(body) = self.fetch(&url).await {
            found.extend(parse_duckduckgo_results(&body, COURSES_PER_SKILL));
        }

        if found.len() < COURSES_PER_SKILL {
            let url = format!(
                "https://www.coursera.org/search?query={}",
                skill.replace(' ', "%20")
            );
            if let Some(body) = self.fetch(&url).await {
                found.extend(parse_coursera_results(&body, 1));
            }
        }

        found
    }
}

impl Default for ScraperCourseFinder {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CourseFinder for ScraperCourseFinder {
    async fn courses_for_skills(&self, skills: &[String]) -> HashMap<String, Vec<Course>> {
        let mut recommendations = HashMap::new();

        for (i, skill) in skills.iter().take(MAX_SKILLS).enumerate() {
            if i > 0 {
                // Politeness delay between searches
                tokio::time::sleep(std::time::Duration::from_secs(1)).await;
            }
            let courses = self.courses_for_skill(skill).await;
            info!("Found {} course(s) for '{skill}'", courses.len());
            recommendations.insert(skill.clone(), courses);
        }

        recommendations
    }
}

/// Parses DuckDuckGo HTML search results. Result links are `uddg=` redirects;
/// the real target is unwrapped from the query string. Non-http(s) targets are
/// dropped.
fn parse_duckduckgo_results(html: &str, limit: usize) -> Vec<Course> {
    let document = Html::parse_document(html);
    let mut courses = Vec::new();

    let Ok(selector) = Selector::parse("a.result__a") else {
        return courses;
    };

    for anchor in document.select(&selector) {
        if courses.len() >= limit {
            break;
        }
        let title = clean_text(&anchor.text().collect::<Vec<_>>().join(" "));
        let mut link = anchor.value().attr("href").unwrap_or_default().to_string();
        if link.contains("uddg=") {
            if let Some(target) = unwrap_redirect(&link) {
                link = target;
            }
        }
        if !title.is_empty() && link.starts_with("http") {
            courses.push(Course { title, link });
        }
    }

    courses
}

/// Parses Coursera search result cards.
fn parse_coursera_results(html: &str, limit: usize) -> Vec<Course> {
    let document = Html::parse_document(html);
    let mut courses = Vec::new();

    let Ok(selector) = Selector::parse(r#"a[data-click-key="search.search.click.search_card"]"#)
    else {
        return courses;
    };

    for anchor in document.select(&selector).take(limit) {
        let title = clean_text(&anchor.text().collect::<Vec<_>>().join(" "));
        let href = anchor.value().attr("href").unwrap_or_default();
        if !title.is_empty() && !href.is_empty() {
            courses.push(Course {
                title,
                link: format!("https://www.coursera.org{href}"),
            });
        }
    }

    courses
}

/// Extracts the `uddg` target from a DuckDuckGo redirect href.
fn unwrap_redirect(href: &str) -> Option<String> {
    // Result hrefs are scheme-relative ("//duckduckgo.com/l/?uddg=…")
    let absolute = if href.starts_with("//") {
        format!("https:{href}")
    } else {
        href.to_string()
    };
    let url = reqwest::Url::parse(&absolute).ok()?;
    url.query_pairs()
        .find(|(key, _)| key == "uddg")
        .map(|(_, value)| value.into_owned())
}

fn clean_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
