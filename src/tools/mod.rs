//! Tool catalog: the named operations the model may call while answering.
//!
//! Tools are registered in a fixed order. Each returns a formatted text block.
//! The curated lookups turn provider failures into static suggestions; only
//! `web_search` surfaces them as errors, which the loop feeds back to the model.

mod clock;
mod college;
mod email;
mod linkedin;
mod opportunities;
mod roadmap;
mod web;

pub use clock::CurrentDateTime;
pub use college::{DeadlineReminders, ExplainCollegeProcess};
pub use email::DraftProfessionalEmail;
pub use linkedin::OptimizeLinkedinProfile;
pub use opportunities::{SearchInternships, SearchScholarships};
pub use roadmap::LearningRoadmap;
pub use web::WebSearchTool;

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::llm::{FunctionDefinition, ToolDefinition};
use crate::search::{SearchResult, WebSearch};

/// A tool the model can invoke.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Unique name the model uses to call the tool.
    fn name(&self) -> &str;

    /// What the tool does, shown to the model.
    fn description(&self) -> &str;

    /// JSON schema of the arguments object.
    fn parameters_schema(&self) -> Value;

    async fn execute(&self, args: Value) -> anyhow::Result<String>;
}

/// Name and description of a registered tool.
#[derive(Debug, Clone)]
pub struct ToolInfo {
    pub name: String,
    pub description: String,
}

/// Ordered collection of tools.
#[derive(Default)]
pub struct ToolRegistry {
    tools: Vec<Arc<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The full mentor catalog, backed by `search` for the lookup tools.
    pub fn mentor_catalog(search: Arc<dyn WebSearch>) -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(CurrentDateTime));
        registry.register(Arc::new(SearchInternships::new(Arc::clone(&search))));
        registry.register(Arc::new(SearchScholarships::new(Arc::clone(&search))));
        registry.register(Arc::new(LearningRoadmap::new(Arc::clone(&search))));
        registry.register(Arc::new(DraftProfessionalEmail));
        registry.register(Arc::new(OptimizeLinkedinProfile));
        registry.register(Arc::new(ExplainCollegeProcess::new(Arc::clone(&search))));
        registry.register(Arc::new(DeadlineReminders));
        registry.register(Arc::new(WebSearchTool::new(search)));
        registry
    }

    /// Add a tool. A tool with the same name replaces the earlier one in place.
    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        match self.tools.iter().position(|t| t.name() == tool.name()) {
            Some(idx) => self.tools[idx] = tool,
            None => self.tools.push(tool),
        }
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    pub fn list_tools(&self) -> Vec<ToolInfo> {
        self.tools
            .iter()
            .map(|t| ToolInfo {
                name: t.name().to_string(),
                description: t.description().to_string(),
            })
            .collect()
    }

    /// Function definitions in registration order.
    pub fn get_tool_schemas(&self) -> Vec<ToolDefinition> {
        self.tools
            .iter()
            .map(|t| ToolDefinition {
                tool_type: "function",
                function: FunctionDefinition {
                    name: t.name().to_string(),
                    description: t.description().to_string(),
                    parameters: t.parameters_schema(),
                },
            })
            .collect()
    }

    pub async fn execute(&self, name: &str, args: Value) -> anyhow::Result<String> {
        let tool = self
            .tools
            .iter()
            .find(|t| t.name() == name)
            .ok_or_else(|| anyhow::anyhow!("Unknown tool: {}", name))?;

        tracing::info!(tool = name, "Executing tool");
        tool.execute(args).await
    }
}

/// Cut `text` to `limit` characters and mark it as an excerpt.
pub fn truncate_snippet(text: &str, limit: usize) -> String {
    let cut: String = text.chars().take(limit).collect();
    format!("{}...", cut)
}

/// First entry whose key satisfies `matches`, else `default`.
///
/// Tables are slices so entries are tried in declaration order.
pub fn select_first<'a, T: ?Sized>(
    table: &'a [(&'static str, &'a T)],
    matches: impl Fn(&str) -> bool,
    default: &'a T,
) -> &'a T {
    table
        .iter()
        .find(|entry| matches(entry.0))
        .map(|entry| entry.1)
        .unwrap_or(default)
}

/// Capitalize the first letter of every alphabetic run, lowercase the rest.
pub(crate) fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut at_word_start = true;
    for c in text.chars() {
        if at_word_start {
            out.extend(c.to_uppercase());
        } else {
            out.extend(c.to_lowercase());
        }
        at_word_start = !c.is_alphabetic();
    }
    out
}

/// Required non-empty string argument.
pub(crate) fn required_str<'a>(args: &'a Value, key: &str) -> anyhow::Result<&'a str> {
    args[key]
        .as_str()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| anyhow::anyhow!("Missing '{}' argument", key))
}

/// Optional string argument; blank values fall back to `default`.
pub(crate) fn optional_str<'a>(args: &'a Value, key: &str, default: &'a str) -> &'a str {
    args[key]
        .as_str()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(default)
}

/// Numbered digest of search hits: title, truncated snippet, link.
pub(crate) fn numbered_digest(
    results: &[SearchResult],
    max_items: usize,
    snippet_limit: usize,
    default_title: &str,
    snippet_prefix: &str,
) -> String {
    let mut out = String::new();
    for (i, result) in results.iter().take(max_items).enumerate() {
        let title = if result.title.trim().is_empty() {
            default_title
        } else {
            result.title.as_str()
        };
        out.push_str(&format!(
            "{}. {}\n   {}{}\n   🔗 {}\n\n",
            i + 1,
            title,
            snippet_prefix,
            truncate_snippet(&result.content, snippet_limit),
            result.url
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::fake::{result, FakeSearch};
    use serde_json::json;

    #[test]
    fn truncate_keeps_exactly_limit_chars() {
        let snippet = "a".repeat(300);
        let cut = truncate_snippet(&snippet, 250);
        assert_eq!(cut, format!("{}...", "a".repeat(250)));
    }

    #[test]
    fn truncate_counts_characters_not_bytes() {
        let cut = truncate_snippet("éééé", 2);
        assert_eq!(cut, "éé...");
    }

    #[test]
    fn digest_truncates_snippet_but_not_link() {
        let long_url = format!("https://example.com/{}", "path/".repeat(80));
        let hits = vec![result("Role", &"x".repeat(400), &long_url)];
        let digest = numbered_digest(&hits, 5, 250, "Opportunity", "");
        assert!(digest.contains(&format!("   {}...\n", "x".repeat(250))));
        assert!(!digest.contains(&"x".repeat(251)));
        assert!(digest.contains(&format!("🔗 {}", long_url)));
    }

    #[test]
    fn digest_caps_item_count_and_defaults_title() {
        let hits: Vec<_> = (0..8).map(|i| result("", "c", &format!("u{}", i))).collect();
        let digest = numbered_digest(&hits, 5, 10, "Opportunity", "");
        assert!(digest.contains("5. Opportunity"));
        assert!(!digest.contains("6. "));
    }

    #[test]
    fn select_first_respects_declaration_order() {
        let table: [(&'static str, &str); 2] = [("intern", "first"), ("internship", "second")];
        let picked = select_first(&table, |k| "internship inquiry".contains(k), "default");
        assert_eq!(picked, "first");
        let fallback = select_first(&table, |k| "unrelated".contains(k), "default");
        assert_eq!(fallback, "default");
    }

    #[test]
    fn title_case_words() {
        assert_eq!(title_case("beginner"), "Beginner");
        assert_eq!(title_case("very ADVANCED"), "Very Advanced");
        assert_eq!(title_case("financial_aid"), "Financial_Aid");
    }

    #[test]
    fn required_str_rejects_blank() {
        let args = json!({"field": "  "});
        assert!(required_str(&args, "field").is_err());
        assert!(required_str(&json!({}), "field").is_err());
        assert_eq!(required_str(&json!({"field": " ml "}), "field").unwrap(), "ml");
    }

    #[test]
    fn catalog_registers_tools_in_fixed_order() {
        let registry = ToolRegistry::mentor_catalog(Arc::new(FakeSearch::returning(vec![])));
        let names: Vec<_> = registry.list_tools().into_iter().map(|t| t.name).collect();
        assert_eq!(
            names,
            vec![
                "get_current_datetime",
                "search_internships",
                "search_scholarships",
                "get_learning_roadmap",
                "draft_professional_email",
                "optimize_linkedin_profile",
                "explain_college_process",
                "get_deadline_reminders",
                "web_search",
            ]
        );
        let schemas = registry.get_tool_schemas();
        assert_eq!(schemas.len(), registry.len());
        assert_eq!(schemas[1].function.parameters["required"], json!(["field"]));
    }

    #[tokio::test]
    async fn execute_unknown_tool_is_an_error() {
        let registry = ToolRegistry::new();
        let err = registry.execute("nope", json!({})).await.unwrap_err();
        assert!(err.to_string().contains("Unknown tool"));
    }
}
