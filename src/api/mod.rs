//! HTTP client for the recipe-board server.
//!
//! This module provides the typed boundary between the application and the
//! remote API:
//!
//! - `client` - shared request plumbing (timeouts, auth header, error payloads)
//! - `board` - board listing, paging, search, likes
//! - `rank` - the ranking widget data source
//! - `account` - nickname and account mutations
//! - `types` - wire shapes and the parse/validate step
//! - `error` - the `ApiError` taxonomy

mod account;
mod board;
mod client;
mod error;
mod rank;
mod types;

pub use client::ApiClient;
pub use error::ApiError;
pub use types::{parse_recipes, Recipe, RankingEntry, WireBoardPage, WireId, WireRanking};
