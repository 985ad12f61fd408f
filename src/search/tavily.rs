//! Tavily search API client.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{SearchDepth, SearchError, SearchQuery, SearchResult, WebSearch};

pub struct TavilyClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl TavilyClient {
    pub fn new(api_key: String, base_url: String) -> Result<Self, SearchError> {
        let http = reqwest::Client::builder()
            .user_agent("Mozilla/5.0 (compatible; StudentMentor/0.1)")
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            http,
            api_key,
            base_url,
        })
    }
}

#[async_trait]
impl WebSearch for TavilyClient {
    async fn search(&self, query: &SearchQuery) -> Result<Vec<SearchResult>, SearchError> {
        let url = format!("{}/search", self.base_url.trim_end_matches('/'));
        let body = TavilyRequest {
            api_key: &self.api_key,
            query: &query.query,
            max_results: query.max_results,
            search_depth: query.depth,
            include_answer: true,
            include_raw_content: false,
        };

        tracing::debug!(query = %query.query, max_results = query.max_results, "Web search");

        let response = self.http.post(&url).json(&body).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SearchError::Status {
                status: status.as_u16(),
                body: body.chars().take(300).collect(),
            });
        }

        let parsed: TavilyResponse = response
            .json()
            .await
            .map_err(|e| SearchError::InvalidResponse(e.to_string()))?;

        let mut results = parsed.results;
        results.truncate(query.max_results);
        Ok(results)
    }
}

#[derive(Serialize)]
struct TavilyRequest<'a> {
    api_key: &'a str,
    query: &'a str,
    max_results: usize,
    search_depth: SearchDepth,
    include_answer: bool,
    include_raw_content: bool,
}

#[derive(Deserialize)]
struct TavilyResponse {
    #[serde(default)]
    results: Vec<SearchResult>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode, routing::post, Json, Router};
    use serde_json::{json, Value};

    async fn spawn_fake(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    #[tokio::test]
    async fn sends_depth_and_parses_results() {
        async fn handler(Json(body): Json<Value>) -> Json<Value> {
            let ok = body["search_depth"] == "advanced"
                && body["api_key"] == "tvly-key"
                && body["max_results"] == 2;
            let title = if ok { "Intern at X" } else { "unexpected request" };
            Json(json!({
                "answer": "ignored",
                "results": [
                    {"title": title, "content": "Apply now", "url": "https://x.example", "score": 0.9},
                    {"title": "Second", "content": "More", "url": "https://y.example"},
                    {"title": "Third", "content": "Extra", "url": "https://z.example"}
                ]
            }))
        }
        let base = spawn_fake(Router::new().route("/search", post(handler))).await;
        let client = TavilyClient::new("tvly-key".into(), base).unwrap();

        let results = client
            .search(&SearchQuery::advanced("data science internships", 2))
            .await
            .unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].title, "Intern at X");
        assert_eq!(results[1].url, "https://y.example");
    }

    #[tokio::test]
    async fn http_errors_surface_as_status() {
        async fn handler() -> (StatusCode, &'static str) {
            (StatusCode::UNAUTHORIZED, "bad key")
        }
        let base = spawn_fake(Router::new().route("/search", post(handler))).await;
        let client = TavilyClient::new("nope".into(), base).unwrap();

        let err = client
            .search(&SearchQuery::advanced("anything", 5))
            .await
            .unwrap_err();

        assert!(matches!(err, SearchError::Status { status: 401, .. }));
    }
}
