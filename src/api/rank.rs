//! Ranking widget data source.

use crate::api::types::WireRanking;
use crate::api::{ApiClient, ApiError, RankingEntry};

impl ApiClient {
    /// Top-recipes ranking shown above the paged feed.
    ///
    /// Served as a static document rather than a board route; entries come
    /// back already ordered by rank.
    pub async fn fetch_ranking(&self) -> Result<Vec<RankingEntry>, ApiError> {
        let url = self.endpoint("data/rank.json")?;
        let envelope: WireRanking = self.send_json(self.http().get(url)).await?;
        Ok(envelope.items)
    }
}
