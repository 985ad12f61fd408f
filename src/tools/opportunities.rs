//! Internship and scholarship lookups backed by web search.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};

use super::{numbered_digest, optional_str, required_str, Tool};
use crate::search::{SearchQuery, WebSearch};

const MAX_RESULTS: usize = 5;
const SNIPPET_LIMIT: usize = 250;

const APPLICATION_TIPS: &[&str] = &[
    "Tailor your resume for each application",
    "Highlight relevant projects and coursework",
    "Apply early and follow up",
    "Prepare for technical/behavioral interviews",
];

/// Find internship openings for a field.
pub struct SearchInternships {
    search: Arc<dyn WebSearch>,
}

impl SearchInternships {
    pub fn new(search: Arc<dyn WebSearch>) -> Self {
        Self { search }
    }

    async fn lookup(&self, field: &str, location: &str, level: &str) -> String {
        let query = SearchQuery::advanced(
            format!(
                "internship opportunities for {} {} students in {} 2025 how to apply",
                level, field, location
            ),
            MAX_RESULTS,
        );

        match self.search.search(&query).await {
            Ok(results) if !results.is_empty() => {
                let mut out = format!(
                    "🎯 Internship Opportunities in {} ({}):\n\n",
                    field, location
                );
                out.push_str(&numbered_digest(
                    &results,
                    MAX_RESULTS,
                    SNIPPET_LIMIT,
                    "Opportunity",
                    "",
                ));
                out.push_str("\n💡 Application Tips:\n");
                for tip in APPLICATION_TIPS {
                    out.push_str(&format!("- {}\n", tip));
                }
                out
            }
            Ok(_) => format!(
                "Consider exploring platforms like Internshala, LinkedIn, and company career pages for {} internships in {}.",
                field, location
            ),
            Err(e) => {
                tracing::warn!(error = %e, field, "Internship search failed");
                format!(
                    "Error searching internships: {}. Try checking Internshala, LinkedIn, and Naukri.com for opportunities.",
                    e
                )
            }
        }
    }
}

#[async_trait]
impl Tool for SearchInternships {
    fn name(&self) -> &str {
        "search_internships"
    }

    fn description(&self) -> &str {
        "Search for internship opportunities in a specific field. Returns ranked openings with links plus application tips."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "field": {
                    "type": "string",
                    "description": "Field of interest (e.g., software engineering, marketing, data science)"
                },
                "location": {
                    "type": "string",
                    "description": "Preferred location (default: India)"
                },
                "experience_level": {
                    "type": "string",
                    "description": "Experience level: beginner, intermediate, advanced (default: beginner)"
                }
            },
            "required": ["field"]
        })
    }

    async fn execute(&self, args: Value) -> anyhow::Result<String> {
        let field = required_str(&args, "field")?;
        let location = optional_str(&args, "location", "India");
        let level = optional_str(&args, "experience_level", "beginner");

        Ok(self.lookup(field, location, level).await)
    }
}

/// Find scholarships for first-generation students.
pub struct SearchScholarships {
    search: Arc<dyn WebSearch>,
}

impl SearchScholarships {
    pub fn new(search: Arc<dyn WebSearch>) -> Self {
        Self { search }
    }
}

#[async_trait]
impl Tool for SearchScholarships {
    fn name(&self) -> &str {
        "search_scholarships"
    }

    fn description(&self) -> &str {
        "Search for scholarship opportunities for first-generation students, with eligibility and links."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "category": {
                    "type": "string",
                    "description": "Scholarship category: merit, need-based, minority, women, general (default: general)"
                },
                "field": {
                    "type": "string",
                    "description": "Field of study such as STEM, arts, business (default: any)"
                }
            }
        })
    }

    async fn execute(&self, args: Value) -> anyhow::Result<String> {
        let category = optional_str(&args, "category", "general");
        let field = optional_str(&args, "field", "any");

        let query = SearchQuery::advanced(
            format!(
                "{} scholarships for first-generation college students {} India 2025 eligibility how to apply",
                category, field
            ),
            MAX_RESULTS,
        );

        let text = match self.search.search(&query).await {
            Ok(results) if !results.is_empty() => {
                let mut out = format!("💰 Scholarship Opportunities ({} - {}):\n\n", category, field);
                out.push_str(&numbered_digest(
                    &results,
                    MAX_RESULTS,
                    SNIPPET_LIMIT,
                    "Scholarship",
                    "",
                ));
                out
            }
            Ok(_) => "Explore government scholarships (NSP, AICTE), private scholarships, and university-specific aid programs.".to_string(),
            Err(e) => {
                tracing::warn!(error = %e, category, "Scholarship search failed");
                format!(
                    "Error searching scholarships: {}. Check National Scholarship Portal and your institution's financial aid office.",
                    e
                )
            }
        };
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::fake::{result, FakeSearch};
    use crate::search::SearchDepth;

    #[tokio::test]
    async fn internships_digest_has_results_and_tips() {
        let search = Arc::new(FakeSearch::returning(vec![
            result("Data Intern - Acme", "Work on dashboards", "https://acme.example/jobs/1"),
            result("ML Intern", "Train models", "https://ml.example"),
        ]));
        let tool = SearchInternships::new(search.clone());

        let out = tool.execute(json!({"field": "data science"})).await.unwrap();

        assert!(out.starts_with("🎯 Internship Opportunities in data science (India):"));
        assert!(out.contains("1. Data Intern - Acme\n   Work on dashboards...\n   🔗 https://acme.example/jobs/1"));
        assert!(out.contains("2. ML Intern"));
        assert!(out.contains("- Prepare for technical/behavioral interviews"));

        let query = search.last_query().unwrap();
        assert_eq!(query.max_results, 5);
        assert_eq!(query.depth, SearchDepth::Advanced);
        assert!(query.query.contains("beginner data science students in India"));
    }

    #[tokio::test]
    async fn internships_empty_results_use_static_suggestion() {
        let tool = SearchInternships::new(Arc::new(FakeSearch::returning(vec![])));
        let out = tool
            .execute(json!({"field": "marketing", "location": "Pune"}))
            .await
            .unwrap();
        assert!(out.contains("Internshala, LinkedIn, and company career pages for marketing internships in Pune"));
    }

    #[tokio::test]
    async fn internships_search_error_never_raises() {
        let tool = SearchInternships::new(Arc::new(FakeSearch::failing("quota exceeded")));
        let out = tool.execute(json!({"field": "design"})).await.unwrap();
        assert!(out.starts_with("Error searching internships:"));
        assert!(out.contains("Naukri.com"));
    }

    #[tokio::test]
    async fn internships_require_field() {
        let tool = SearchInternships::new(Arc::new(FakeSearch::returning(vec![])));
        assert!(tool.execute(json!({"location": "Delhi"})).await.is_err());
    }

    #[tokio::test]
    async fn scholarships_use_defaults_and_fallbacks() {
        let search = Arc::new(FakeSearch::returning(vec![result(
            "",
            "Merit award",
            "https://nsp.example",
        )]));
        let tool = SearchScholarships::new(search.clone());

        let out = tool.execute(json!({})).await.unwrap();
        assert!(out.starts_with("💰 Scholarship Opportunities (general - any):"));
        assert!(out.contains("1. Scholarship\n"));
        assert!(search.last_query().unwrap().query.starts_with("general scholarships"));

        let failing = SearchScholarships::new(Arc::new(FakeSearch::failing("down")));
        let out = failing.execute(json!({"category": "merit"})).await.unwrap();
        assert!(out.contains("National Scholarship Portal"));
    }
}
