//! General web search for current information.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};

use super::{required_str, Tool};
use crate::search::{SearchQuery, SearchResult, WebSearch};

const DEFAULT_MAX_RESULTS: usize = 5;

/// Search the web and return the raw hits.
pub struct WebSearchTool {
    search: Arc<dyn WebSearch>,
}

impl WebSearchTool {
    pub fn new(search: Arc<dyn WebSearch>) -> Self {
        Self { search }
    }
}

#[async_trait]
impl Tool for WebSearchTool {
    fn name(&self) -> &str {
        "web_search"
    }

    fn description(&self) -> &str {
        "Search the web for current information. Returns results with titles, content and URLs. Use for news, dates, or anything the other tools don't cover."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "The search query"
                },
                "max_results": {
                    "type": "integer",
                    "description": "Maximum number of results to return (default: 5)"
                }
            },
            "required": ["query"]
        })
    }

    async fn execute(&self, args: Value) -> anyhow::Result<String> {
        let query = required_str(&args, "query")?;
        let max_results = args["max_results"]
            .as_u64()
            .filter(|n| *n > 0)
            .map(|n| n as usize)
            .unwrap_or(DEFAULT_MAX_RESULTS);

        let results = self
            .search
            .search(&SearchQuery::advanced(query, max_results))
            .await?;

        if results.is_empty() {
            Ok(format!("No results found for: {}", query))
        } else {
            Ok(render_results(&results, max_results))
        }
    }
}

fn render_results(results: &[SearchResult], max_results: usize) -> String {
    results
        .iter()
        .take(max_results)
        .enumerate()
        .map(|(i, r)| format!("{}. **{}**\n{}\nURL: {}", i + 1, r.title, r.content, r.url))
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::fake::{result, FakeSearch};

    #[tokio::test]
    async fn results_are_numbered_and_untruncated() {
        let long = "z".repeat(900);
        let search = Arc::new(FakeSearch::returning(vec![
            result("Exam dates", &long, "https://board.example"),
            result("Second", "more", "https://two.example"),
        ]));
        let tool = WebSearchTool::new(search.clone());

        let out = tool
            .execute(json!({"query": "JEE 2025 dates", "max_results": 1}))
            .await
            .unwrap();

        assert_eq!(out, format!("1. **Exam dates**\n{}\nURL: https://board.example", long));
        assert_eq!(search.last_query().unwrap().max_results, 1);
    }

    #[tokio::test]
    async fn provider_failure_is_a_tool_error() {
        let tool = WebSearchTool::new(Arc::new(FakeSearch::failing("rate limited")));
        let err = tokio_test::assert_err!(tool.execute(json!({"query": "x"})).await);
        assert!(err.to_string().contains("rate limited"));
    }

    #[tokio::test]
    async fn empty_results_say_so() {
        let tool = WebSearchTool::new(Arc::new(FakeSearch::returning(vec![])));
        let out = tool.execute(json!({"query": "nothing"})).await.unwrap();
        assert_eq!(out, "No results found for: nothing");
    }
}
