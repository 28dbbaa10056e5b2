//! The recipe-feed controller: server-paged accumulation, the search
//! overlay, and scroll-driven pagination.
//!
//! - `controller` - pagination/search state machine issuing fetch commands
//! - `scroll` - the viewport sentinel resource

mod controller;
mod scroll;

pub use controller::{FeedCommand, FeedController, FeedMode, RECIPES_PER_PAGE};
pub use scroll::ScrollSentinel;
