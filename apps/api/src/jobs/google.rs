//! Google Custom Search client used for supplementary job links.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::config::GoogleConfig;
use crate::jobs::http::send_with_retry;
use crate::jobs::{FetchError, LinkRecord, LinkSource};

/// Custom Search accepts `num` in 1..=10 only.
const MAX_RESULTS: u32 = 10;

#[derive(Debug, Deserialize)]
struct CustomSearchResponse {
    // Absent when the search has no hits.
    #[serde(default)]
    items: Vec<CustomSearchItem>,
}

#[derive(Debug, Deserialize)]
struct CustomSearchItem {
    title: Option<String>,
    link: String,
    #[serde(default)]
    snippet: String,
}

impl From<CustomSearchItem> for LinkRecord {
    fn from(item: CustomSearchItem) -> Self {
        LinkRecord {
            title: item.title,
            url: item.link,
            snippet: item.snippet,
        }
    }
}

#[derive(Clone)]
pub struct GoogleSearchClient {
    client: Client,
    config: GoogleConfig,
}

impl GoogleSearchClient {
    pub fn new(client: Client, config: GoogleConfig) -> Self {
        Self { client, config }
    }
}

/// `"{title} jobs"`, plus `" in {location}"` when a location is known.
fn build_query(title: &str, location: Option<&str>) -> String {
    match location.map(str::trim).filter(|l| !l.is_empty()) {
        Some(location) => format!("{} jobs in {}", title.trim(), location),
        None => format!("{} jobs", title.trim()),
    }
}

#[async_trait]
impl LinkSource for GoogleSearchClient {
    async fn search(
        &self,
        title: &str,
        location: Option<&str>,
    ) -> Result<Vec<LinkRecord>, FetchError> {
        let url = format!(
            "{}/customsearch/v1",
            self.config.base_url.trim_end_matches('/')
        );
        let query = build_query(title, location);
        let num = self.config.results.clamp(1, MAX_RESULTS).to_string();
        let params = [
            ("key", self.config.api_key.as_str()),
            ("cx", self.config.cx.as_str()),
            ("q", query.as_str()),
            ("num", num.as_str()),
        ];

        debug!("Custom search: q={query:?}");
        let response =
            send_with_retry("Google Custom Search", || self.client.get(&url).query(&params))
                .await?;
        let body: CustomSearchResponse = response.json().await?;

        Ok(body.items.into_iter().map(LinkRecord::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jobs::http::build_client;
    use axum::{extract::Query, routing::get, Json, Router};
    use serde_json::{json, Value};
    use std::collections::HashMap;

    async fn search_with_results(results: u32) -> Vec<LinkRecord> {
        let router = Router::new().route(
            "/customsearch/v1",
            get(|Query(params): Query<HashMap<String, String>>| async move {
                let num = params.get("num").cloned().unwrap_or_default();
                Json::<Value>(json!({
                    "items": [{"link": "https://echo.example", "snippet": num}]
                }))
            }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        let client = GoogleSearchClient::new(
            build_client(5).unwrap(),
            GoogleConfig {
                base_url: format!("http://{addr}"),
                api_key: "key".to_string(),
                cx: "cx".to_string(),
                results,
            },
        );
        client.search("Rust Engineer", Some("Pune")).await.unwrap()
    }

    #[tokio::test]
    async fn test_num_is_clamped_to_accepted_range() {
        assert_eq!(search_with_results(50).await[0].snippet, "10");
        assert_eq!(search_with_results(0).await[0].snippet, "1");
        assert_eq!(search_with_results(5).await[0].snippet, "5");
    }

    #[test]
    fn test_build_query_with_and_without_location() {
        assert_eq!(build_query("Rust Engineer", Some("Pune")), "Rust Engineer jobs in Pune");
        assert_eq!(build_query(" Rust Engineer ", Some("  ")), "Rust Engineer jobs");
        assert_eq!(build_query("Rust Engineer", None), "Rust Engineer jobs");
    }

    #[test]
    fn test_maps_items_to_links() {
        let payload = json!({
            "items": [
                {"title": "Rust jobs", "link": "https://a.example", "snippet": "Rust roles"},
                {"link": "https://b.example"}
            ]
        });
        let parsed: CustomSearchResponse = serde_json::from_value(payload).unwrap();
        let links: Vec<LinkRecord> = parsed.items.into_iter().map(LinkRecord::from).collect();
        assert_eq!(links.len(), 2);
        assert_eq!(links[0].url, "https://a.example");
        assert_eq!(links[0].snippet, "Rust roles");
        assert_eq!(links[1].title, None);
        assert_eq!(links[1].snippet, "");
    }

    #[test]
    fn test_no_items_means_no_links() {
        let parsed: CustomSearchResponse =
            serde_json::from_value(json!({"kind": "customsearch#search"})).unwrap();
        assert!(parsed.items.is_empty());
    }
}
