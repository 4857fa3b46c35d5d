//! API client for the Rick and Morty catalog.
//!
//! This module provides the `ApiClient` struct for fetching the full
//! character collection. The remote API paginates `/character`; the
//! client hides that behind `fetch_all_characters`, which walks every
//! page and returns the collection in one piece.

use futures::stream::{self, StreamExt, TryStreamExt};
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::models::Character;

use super::ApiError;

// ============================================================================
// Constants
// ============================================================================

/// HTTP request timeout in seconds.
/// 30s allows for slow API responses while failing fast enough for good UX.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Maximum concurrent page requests when aggregating the collection.
/// Limits parallel requests to stay polite to the public API.
const MAX_CONCURRENT_PAGE_REQUESTS: usize = 5;

/// Paginated response envelope for `/character`.
#[derive(Debug, Deserialize)]
struct CharacterPage {
    info: PageInfo,
    results: Vec<Character>,
}

#[derive(Debug, Deserialize)]
struct PageInfo {
    #[serde(default)]
    count: u32,
    pages: u32,
}

/// API client for the Rick and Morty catalog.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a new API client against the given base URL.
    pub fn new(base_url: String) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self { client, base_url })
    }

    /// Check if response is successful, returning an error with body if not.
    async fn check_response(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::from_status(status, &body))
        }
    }

    /// Fetch a single page of the character listing.
    async fn fetch_page(&self, page: u32) -> Result<CharacterPage, ApiError> {
        let url = format!("{}/character?page={}", self.base_url, page);

        let response = self.client.get(&url).send().await?;
        let response = Self::check_response(response).await?;

        let parsed: CharacterPage = response
            .json()
            .await
            .map_err(|e| ApiError::InvalidResponse(format!("Failed to parse page {}: {}", page, e)))?;

        debug!(page, count = parsed.results.len(), "Fetched character page");
        Ok(parsed)
    }

    /// Fetch the complete character collection, aggregating across every
    /// page the API requires. The result preserves page order but is
    /// otherwise unsorted; callers own any ordering.
    pub async fn fetch_all_characters(&self) -> Result<Vec<Character>, ApiError> {
        let first = self.fetch_page(1).await?;
        let total_pages = first.info.pages;
        debug!(pages = total_pages, count = first.info.count, "Character catalog paging info");

        let mut characters = first.results;
        if total_pages <= 1 {
            return Ok(characters);
        }

        // Fetch remaining pages with bounded concurrency, then reassemble
        // in page order so the aggregate is deterministic.
        let mut pages: Vec<(u32, Vec<Character>)> = stream::iter(2..=total_pages)
            .map(|page| {
                let client = self.clone();
                async move {
                    let parsed = client.fetch_page(page).await?;
                    Ok::<_, ApiError>((page, parsed.results))
                }
            })
            .buffer_unordered(MAX_CONCURRENT_PAGE_REQUESTS)
            .try_collect()
            .await?;

        pages.sort_by_key(|(page, _)| *page);
        for (_, results) in pages {
            characters.extend(results);
        }

        Ok(characters)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_character_page() {
        let json = r#"{
            "info": {"count": 826, "pages": 42, "next": "https://rickandmortyapi.com/api/character?page=2", "prev": null},
            "results": [
                {"id": 1, "name": "Rick Sanchez", "status": "Alive", "species": "Human",
                 "type": "", "gender": "Male",
                 "origin": {"name": "Earth (C-137)", "url": ""},
                 "location": {"name": "Citadel of Ricks", "url": ""},
                 "image": "", "episode": [], "url": "", "created": "2017-11-04T18:48:46.250Z"},
                {"id": 2, "name": "Morty Smith", "status": "Alive", "species": "Human",
                 "type": "", "gender": "Male",
                 "origin": {"name": "unknown", "url": ""},
                 "location": {"name": "Citadel of Ricks", "url": ""},
                 "image": "", "episode": [], "url": "", "created": "2017-11-04T18:50:21.651Z"}
            ]
        }"#;

        let page: CharacterPage = serde_json::from_str(json)
            .expect("Failed to parse character page JSON");
        assert_eq!(page.info.pages, 42);
        assert_eq!(page.info.count, 826);
        assert_eq!(page.results.len(), 2);
        assert_eq!(page.results[0].name, "Rick Sanchez");
        assert_eq!(page.results[1].id, 2);
    }

    #[test]
    fn test_parse_page_tolerates_missing_optional_fields() {
        // Records with only the fields the core relies on still parse.
        let json = r#"{
            "info": {"pages": 1},
            "results": [{"id": 7, "name": "Abradolf Lincler"}]
        }"#;

        let page: CharacterPage = serde_json::from_str(json)
            .expect("Failed to parse minimal page JSON");
        assert_eq!(page.results[0].id, 7);
        assert!(page.results[0].species.is_empty());
    }
}
