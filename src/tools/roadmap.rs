//! Staged learning roadmap with search-backed resources.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};

use super::{numbered_digest, optional_str, required_str, select_first, title_case, Tool};
use crate::search::{SearchQuery, WebSearch};

const MAX_RESOURCES: usize = 6;
const SNIPPET_LIMIT: usize = 200;

type Stage = (&'static str, &'static str);

const BEGINNER_STAGES: &[Stage] = &[
    ("Stage 1: Foundations", "1-2 months"),
    ("Stage 2: Core Concepts", "2-3 months"),
    ("Stage 3: Practical Application", "2-3 months"),
    ("Stage 4: Advanced Topics", "3-4 months"),
];

const INTERMEDIATE_STAGES: &[Stage] = &[
    ("Stage 1: Review & Strengthen", "2-3 weeks"),
    ("Stage 2: Advanced Concepts", "2-3 months"),
    ("Stage 3: Specialization", "3-4 months"),
    ("Stage 4: Expert Projects", "2-3 months"),
];

const ADVANCED_STAGES: &[Stage] = &[
    ("Stage 1: Expert-Level Topics", "2-3 months"),
    ("Stage 2: Research & Innovation", "3-4 months"),
    ("Stage 3: Contribution & Teaching", "Ongoing"),
];

const STAGES_BY_LEVEL: &[(&str, &[Stage])] = &[
    ("beginner", BEGINNER_STAGES),
    ("intermediate", INTERMEDIATE_STAGES),
];

const STUDY_TIPS: &[&str] = &[
    "Set aside dedicated study time daily (1-2 hours minimum)",
    "Build projects to apply what you learn",
    "Join online communities (Reddit, Discord, Stack Overflow)",
    "Track your progress and celebrate milestones",
    "Don't hesitate to revisit fundamentals",
    "Teach others - it reinforces your learning",
];

/// Stage plan for a level; anything other than beginner/intermediate gets the expert plan.
pub fn stages_for_level(level: &str) -> &'static [Stage] {
    let level = level.to_lowercase();
    select_first(STAGES_BY_LEVEL, |key| key == level, ADVANCED_STAGES)
}

pub struct LearningRoadmap {
    search: Arc<dyn WebSearch>,
}

impl LearningRoadmap {
    pub fn new(search: Arc<dyn WebSearch>) -> Self {
        Self { search }
    }
}

#[async_trait]
impl Tool for LearningRoadmap {
    fn name(&self) -> &str {
        "get_learning_roadmap"
    }

    fn description(&self) -> &str {
        "Generate a staged learning roadmap for any topic, with timelines, curated resources, and study tips."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "topic": {
                    "type": "string",
                    "description": "The subject or skill to learn (e.g., Python, Data Science, Web Development)"
                },
                "current_level": {
                    "type": "string",
                    "description": "Current skill level: beginner, intermediate, advanced (default: beginner)"
                }
            },
            "required": ["topic"]
        })
    }

    async fn execute(&self, args: Value) -> anyhow::Result<String> {
        let topic = required_str(&args, "topic")?;
        let level = optional_str(&args, "current_level", "beginner");

        let query = SearchQuery::advanced(
            format!(
                "complete {} learning roadmap for {} free courses tutorials resources 2025",
                topic, level
            ),
            MAX_RESOURCES,
        );
        let results = match self.search.search(&query).await {
            Ok(results) => results,
            Err(e) => {
                tracing::warn!(error = %e, topic, "Roadmap resource search failed");
                return Ok(format!(
                    "Error generating roadmap: {}. I recommend starting with free platforms like Coursera, edX, and YouTube.",
                    e
                ));
            }
        };

        let rule = "=".repeat(60);
        let mut out = format!(
            "🗺️ Learning Roadmap: {}\n📊 Starting Level: {}\n\n",
            topic,
            title_case(level)
        );
        for (stage, duration) in stages_for_level(level) {
            out.push_str(&format!("\n{rule}\n{stage} ({duration})\n{rule}\n"));
        }

        out.push_str("\n\n📚 Recommended Learning Resources:\n\n");
        out.push_str(&numbered_digest(
            &results,
            MAX_RESOURCES,
            SNIPPET_LIMIT,
            "Resource",
            "📝 ",
        ));

        out.push_str("\n💡 Learning Tips:\n");
        for tip in STUDY_TIPS {
            out.push_str(&format!("✓ {}\n", tip));
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::fake::{result, FakeSearch};

    #[test]
    fn level_table_lookup() {
        assert_eq!(stages_for_level("Beginner").len(), 4);
        assert_eq!(stages_for_level("beginner")[0], ("Stage 1: Foundations", "1-2 months"));
        assert_eq!(stages_for_level("INTERMEDIATE")[0].1, "2-3 weeks");
        assert_eq!(stages_for_level("advanced").len(), 3);
        assert_eq!(stages_for_level("wizard")[2], ("Stage 3: Contribution & Teaching", "Ongoing"));
    }

    #[tokio::test]
    async fn roadmap_lists_stages_resources_and_tips() {
        let hits: Vec<_> = (1..=8)
            .map(|i| result(&format!("Course {}", i), &"y".repeat(260), &format!("https://c{}.example", i)))
            .collect();
        let tool = LearningRoadmap::new(Arc::new(FakeSearch::returning(hits)));

        let out = tool
            .execute(json!({"topic": "Python", "current_level": "intermediate"}))
            .await
            .unwrap();

        assert!(out.starts_with("🗺️ Learning Roadmap: Python\n📊 Starting Level: Intermediate"));
        assert!(out.contains("Stage 1: Review & Strengthen (2-3 weeks)"));
        assert!(out.contains("Stage 4: Expert Projects (2-3 months)"));
        assert!(out.contains("6. Course 6\n   📝 "));
        assert!(!out.contains("7. Course 7"));
        assert!(out.contains(&format!("📝 {}...\n", "y".repeat(200))));
        assert!(out.contains("✓ Teach others - it reinforces your learning"));
    }

    #[tokio::test]
    async fn roadmap_search_failure_suggests_free_platforms() {
        let tool = LearningRoadmap::new(Arc::new(FakeSearch::failing("timeout")));
        let out = tool.execute(json!({"topic": "Rust"})).await.unwrap();
        assert!(out.contains("Coursera, edX, and YouTube"));
    }
}
