//! Board endpoints: totals, paging, search, and like state.

use crate::api::types::{parse_recipes, WireBoardPage, WireId};
use crate::api::{ApiClient, ApiError, Recipe};
use std::collections::HashSet;

impl ApiClient {
    /// Total number of recipes on the board.
    pub async fn fetch_total(&self) -> Result<u64, ApiError> {
        let url = self.endpoint("board/total")?;
        self.send_json::<u64>(self.http().get(url)).await
    }

    /// One page of recipes. Pages are 1-based; the server takes the page
    /// number as a string query value.
    pub async fn fetch_page(&self, page: u32) -> Result<Vec<Recipe>, ApiError> {
        let url = self.endpoint("board/page")?;
        let request = self
            .http()
            .get(url)
            .query(&[("data", page.to_string())]);

        let envelope: WireBoardPage = self.send_json(request).await?;
        let recipes = parse_recipes(envelope)?;
        tracing::debug!(page, count = recipes.len(), "Fetched board page");
        Ok(recipes)
    }

    /// Server-side title search. Same envelope as a board page.
    pub async fn search(&self, query: &str) -> Result<Vec<Recipe>, ApiError> {
        let url = self.endpoint("board/search")?;
        let request = self.http().get(url).query(&[("query", query)]);

        let envelope: WireBoardPage = self.send_json(request).await?;
        let recipes = parse_recipes(envelope)?;
        tracing::debug!(query, count = recipes.len(), "Search completed");
        Ok(recipes)
    }

    /// The set of post identifiers the signed-in account has liked.
    ///
    /// Requires a session; callers gate on `has_session()` so a signed-out
    /// client never issues this request. Identifiers arrive as numbers or
    /// numeric strings and are coerced to the same canonical form used for
    /// `Recipe.id`, so membership tests are representation-independent.
    pub async fn fetch_liked_set(&self) -> Result<HashSet<i64>, ApiError> {
        let url = self.endpoint("board/islike")?;
        let request = self
            .http()
            .get(url)
            .query(&[("id", self.email_param()?)]);
        let request = self.authorize(request)?;

        let ids: Vec<WireId> = self.send_json(request).await?;
        let set = ids
            .iter()
            .map(WireId::to_i64)
            .collect::<Result<HashSet<i64>, ApiError>>()?;
        tracing::debug!(count = set.len(), "Fetched liked set");
        Ok(set)
    }

    /// Mark a post liked. The response body is not interesting; only the
    /// status matters.
    pub async fn like(&self, post_id: i64) -> Result<(), ApiError> {
        let url = self.endpoint("board/like")?;
        let request = self
            .http()
            .post(url)
            .json(&serde_json::json!({ "postId": post_id }));
        let request = self.authorize(request)?;

        self.send(request).await?;
        Ok(())
    }

    /// Remove a like from a post.
    pub async fn unlike(&self, post_id: i64) -> Result<(), ApiError> {
        let url = self.endpoint("board/unlike")?;
        let request = self
            .http()
            .post(url)
            .json(&serde_json::json!({ "postId": post_id }));
        let request = self.authorize(request)?;

        self.send(request).await?;
        Ok(())
    }
}
