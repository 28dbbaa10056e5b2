//! Terminal client for a recipe-sharing board.
//!
//! All persistent data lives on the board server; this crate is the
//! presentation layer: the paged recipe feed with infinite scroll, the
//! search overlay, likes, the ranking panel, and account management.

pub mod api;
pub mod app;
pub mod board;
pub mod config;
pub mod notice;
pub mod session;
pub mod theme;
pub mod ui;
pub mod validate;
