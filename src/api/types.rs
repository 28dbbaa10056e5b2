//! Wire types and the parse/validate boundary.
//!
//! The server is loose about identifier representation: the same field may
//! arrive as a JSON number or as a numeric string depending on which backend
//! route produced it. Everything past this module works with `i64`
//! identifiers only; coercion happens exactly once, here, and a record that
//! cannot be coerced rejects the whole response as malformed rather than
//! leaking a partially-shaped object into the feed.

use crate::api::ApiError;
use serde::Deserialize;

/// A recipe identifier on the wire: JSON number or numeric string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum WireId {
    Num(i64),
    Text(String),
}

impl WireId {
    /// Coerce to the canonical numeric representation.
    pub fn to_i64(&self) -> Result<i64, ApiError> {
        match self {
            WireId::Num(n) => Ok(*n),
            WireId::Text(s) => s
                .trim()
                .parse::<i64>()
                .map_err(|_| ApiError::Malformed(format!("non-numeric identifier {:?}", s))),
        }
    }
}

/// One recipe record as the board page and search endpoints deliver it.
#[derive(Debug, Clone, Deserialize)]
pub struct WireRecipe {
    #[serde(rename = "ID")]
    pub id: WireId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "imageUrl", default)]
    pub image_url: String,
    #[serde(rename = "likeCount", default)]
    pub like_count: u64,
}

/// Envelope for board page and search responses.
#[derive(Debug, Deserialize)]
pub struct WireBoardPage {
    pub items: Vec<WireRecipe>,
}

/// A recipe as the rest of the application sees it.
///
/// Immutable once fetched; whether it renders as "liked" is derived from the
/// liked set at render time, never stored on the entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipe {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub like_count: u64,
}

impl TryFrom<WireRecipe> for Recipe {
    type Error = ApiError;

    fn try_from(raw: WireRecipe) -> Result<Self, ApiError> {
        Ok(Recipe {
            id: raw.id.to_i64()?,
            title: raw.title,
            description: raw.description,
            image_url: raw.image_url,
            like_count: raw.like_count,
        })
    }
}

/// Convert a page envelope, rejecting the whole response on the first
/// malformed record.
pub fn parse_recipes(envelope: WireBoardPage) -> Result<Vec<Recipe>, ApiError> {
    envelope.items.into_iter().map(Recipe::try_from).collect()
}

/// One entry of the ranking widget (`/data/rank.json`).
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct RankingEntry {
    pub rank: u32,
    #[serde(default)]
    pub thumbnail: String,
    pub name: String,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub likes: u64,
}

/// Envelope for the ranking response.
#[derive(Debug, Deserialize)]
pub struct WireRanking {
    pub items: Vec<RankingEntry>,
}
