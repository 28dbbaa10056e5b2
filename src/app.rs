use crate::api::{ApiClient, ApiError, RankingEntry, Recipe};
use crate::board::FeedController;
use crate::config::Config;
use crate::notice::Notice;
use crate::theme::{ColorPalette, ThemeVariant};
use std::borrow::Cow;
use std::collections::HashSet;
use tokio::time::Instant;

// ============================================================================
// View Enum
// ============================================================================

/// Current view mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// The recipe board: ranking, feed, search.
    Board,
    /// Account management: profile, nickname, sign-out.
    Account,
}

// ============================================================================
// Account Form State
// ============================================================================

/// Editing state for the nickname form on the account view.
#[derive(Debug, Default)]
pub struct AccountForm {
    /// Nickname being edited.
    pub nickname_input: String,
    /// Whether the nickname field has input focus.
    pub editing: bool,
    /// Client-side validation error for the current input.
    pub name_error: Option<&'static str>,
    /// Result of the last server duplication check: `Some(true)` = taken.
    /// Cleared on every input change.
    pub duplication: Option<bool>,
}

impl AccountForm {
    /// Re-validate the current input and reset the stale duplication check.
    pub fn input_changed(&mut self) {
        self.duplication = None;
        self.name_error = if self.nickname_input.is_empty()
            || crate::validate::is_nickname_valid(&self.nickname_input)
        {
            None
        } else {
            Some("At least 2 Hangul or 3 Latin letters")
        };
    }

    /// The form may be submitted: non-empty, valid, and confirmed unique.
    pub fn can_save(&self) -> bool {
        !self.nickname_input.is_empty()
            && self.name_error.is_none()
            && self.duplication == Some(false)
    }
}

// ============================================================================
// Confirmation Dialog
// ============================================================================

/// Pending confirmation action for destructive operations.
pub enum ConfirmAction {
    /// Delete the signed-in account on the server.
    DeleteAccount,
}

// ============================================================================
// Background Task Events
// ============================================================================

/// Events from background tasks
pub enum AppEvent {
    /// Board total arrived (stale generations are dropped).
    TotalLoaded {
        generation: u64,
        result: Result<u64, ApiError>,
    },
    /// One board page arrived (stale generations are dropped).
    PageLoaded {
        generation: u64,
        page: u32,
        result: Result<Vec<Recipe>, ApiError>,
    },
    /// The liked-post set arrived.
    LikedSetLoaded {
        result: Result<HashSet<i64>, ApiError>,
    },
    /// Ranking panel data arrived.
    RankingLoaded {
        result: Result<Vec<RankingEntry>, ApiError>,
    },
    /// Search resolved with results (stale generations are dropped).
    SearchCompleted {
        query: String,
        generation: u64,
        result: Result<Vec<Recipe>, ApiError>,
    },
    /// A like/unlike POST finished. Success is followed by a liked-set
    /// re-fetch; the set is the only source of rendered like state.
    LikeToggled {
        post_id: i64,
        result: Result<(), ApiError>,
    },
    /// Nickname duplication check finished. `Ok(true)` = taken.
    NicknameChecked {
        nickname: String,
        result: Result<bool, ApiError>,
    },
    /// Nickname save finished.
    NicknameSaved {
        nickname: String,
        result: Result<(), ApiError>,
    },
    /// Account deletion finished.
    AccountDeleted { result: Result<(), ApiError> },
}

// ============================================================================
// Status Line
// ============================================================================

/// Transient status-bar message. `toast_id` is set for error notices so a
/// repeat of the same failure refreshes the message instead of re-announcing.
pub struct StatusLine {
    pub text: Cow<'static, str>,
    pub since: Instant,
    pub toast_id: Option<String>,
}

// ============================================================================
// Application State
// ============================================================================

/// Central application state
pub struct App {
    pub api: ApiClient,
    pub config: Config,
    /// Location of the session credentials file, for sign-out and account
    /// deletion.
    pub session_path: std::path::PathBuf,

    // Theme
    pub theme_variant: ThemeVariant,
    pub palette: ColorPalette,

    // Feed
    pub feed: FeedController,
    /// Post IDs the signed-in account has liked. Sourced from the server
    /// once per session; empty when signed out or never loaded.
    pub liked: HashSet<i64>,
    pub ranking: Vec<RankingEntry>,

    // UI State
    pub view: View,
    pub selected_recipe: usize,
    /// First visible row of the recipe list, maintained by navigation.
    pub board_scroll: usize,
    /// `(first_visible_row, visible_rows)` recorded during the last board
    /// render; the event loop drives the scroll sentinel from it.
    pub board_viewport: (usize, usize),
    pub last_input_time: Instant,

    // Search
    pub search_mode: bool,
    pub search_input: String,
    /// Debounce timer for search keystrokes.
    pub search_debounce: Option<Instant>,
    /// Pending (not yet executed) search query.
    pub pending_search: Option<String>,

    /// Generation counter for search to handle rapid typing.
    ///
    /// Incremented each time a new search is spawned. When handling
    /// SearchCompleted, we reject responses where the generation doesn't
    /// match, preventing stale results from overwriting newer searches.
    pub search_generation: u64,
    /// Handle to the current search task for cancellation.
    pub search_handle: Option<tokio::task::JoinHandle<()>>,

    /// Generation counter for feed fetches. Bumped whenever the pagination
    /// session restarts (mount, search cleared), so page/total responses
    /// from a dead session are dropped instead of corrupting the new one.
    pub feed_generation: u64,
    /// Handle to the in-flight page/total fetch task for cancellation.
    pub feed_handle: Option<tokio::task::JoinHandle<()>>,

    // Account view
    pub account: AccountForm,
    pub pending_confirm: Option<ConfirmAction>,

    // Status line
    pub status_message: Option<StatusLine>,

    /// Dirty flag to skip unnecessary frame renders
    pub needs_redraw: bool,

    /// Current frame of the loading spinner animation.
    pub spinner_frame: usize,
}

impl App {
    pub fn new(api: ApiClient, config: Config, session_path: std::path::PathBuf) -> Self {
        let theme_variant = ThemeVariant::from_str_name(&config.theme).unwrap_or(ThemeVariant::Dark);

        Self {
            api,
            config,
            session_path,
            theme_variant,
            palette: theme_variant.palette(),
            feed: FeedController::new(),
            liked: HashSet::new(),
            ranking: Vec::new(),
            view: View::Board,
            selected_recipe: 0,
            board_scroll: 0,
            board_viewport: (0, 0),
            last_input_time: Instant::now(),
            search_mode: false,
            search_input: String::new(),
            search_debounce: None,
            pending_search: None,
            search_generation: 0,
            search_handle: None,
            feed_generation: 0,
            feed_handle: None,
            account: AccountForm::default(),
            pending_confirm: None,
            status_message: None,
            needs_redraw: true,
            spinner_frame: 0,
        }
    }

    /// Switch to a different theme variant at runtime.
    pub fn set_theme(&mut self, variant: ThemeVariant) {
        self.theme_variant = variant;
        self.palette = variant.palette();
        self.needs_redraw = true;
    }

    /// Cycle to the next theme variant (Dark → Light → Dark).
    ///
    /// Returns the name of the new theme for status display.
    pub fn cycle_theme(&mut self) -> &'static str {
        let next = self.theme_variant.next();
        self.set_theme(next);
        next.name()
    }

    /// Whether a recipe renders as liked: pure set membership, nothing else.
    pub fn is_liked(&self, recipe_id: i64) -> bool {
        self.liked.contains(&recipe_id)
    }

    /// Currently selected recipe (bounds-checked)
    pub fn selected_recipe(&self) -> Option<&Recipe> {
        self.feed.visible_recipes().get(self.selected_recipe)
    }

    /// Clamp the selection to the visible list.
    ///
    /// Call after any operation that changes the visible recipe set: page
    /// append, search activation/deactivation, session restart.
    pub fn clamp_selection(&mut self) {
        let len = self.feed.visible_recipes().len();
        self.selected_recipe = if len == 0 {
            0
        } else {
            self.selected_recipe.min(len - 1)
        };
        self.board_scroll = self.board_scroll.min(self.selected_recipe);
    }

    /// Navigate up in the recipe list
    pub fn nav_up(&mut self) {
        self.selected_recipe = self.selected_recipe.saturating_sub(1);
        if self.selected_recipe < self.board_scroll {
            self.board_scroll = self.selected_recipe;
        }
    }

    /// Navigate down in the recipe list
    pub fn nav_down(&mut self) {
        let len = self.feed.visible_recipes().len();
        if len == 0 {
            return;
        }
        self.selected_recipe = self.selected_recipe.saturating_add(1).min(len - 1);

        // Keep the selection inside the recorded viewport
        let (_, rows) = self.board_viewport;
        if rows > 0 && self.selected_recipe >= self.board_scroll + rows {
            self.board_scroll = self.selected_recipe + 1 - rows;
        }
    }

    /// Set a plain status message (auto-expires after 3 seconds)
    pub fn set_status(&mut self, msg: impl Into<Cow<'static, str>>) {
        self.status_message = Some(StatusLine {
            text: msg.into(),
            since: Instant::now(),
            toast_id: None,
        });
    }

    /// Surface an error notice, coalescing repeats of the same toast id.
    pub fn set_notice(&mut self, notice: Notice) {
        if let Some(current) = &mut self.status_message {
            if current.toast_id.as_deref() == Some(notice.toast_id.as_str()) {
                // Same failure class still on screen: refresh the timer only
                current.since = Instant::now();
                return;
            }
        }
        self.status_message = Some(StatusLine {
            text: notice.text,
            since: Instant::now(),
            toast_id: Some(notice.toast_id),
        });
    }

    /// Clear status message if expired (older than 3 seconds).
    /// Returns true if a message was actually cleared.
    pub fn clear_expired_status(&mut self) -> bool {
        if let Some(status) = &self.status_message {
            if status.since.elapsed().as_secs() >= 3 {
                self.status_message = None;
                return true;
            }
        }
        false
    }

    /// Restart the pagination session, invalidating in-flight feed fetches.
    ///
    /// Returns the fetch commands the caller must spawn. The generation bump
    /// plus the task abort together guarantee no response from the old
    /// session reaches the controller.
    pub fn restart_feed(&mut self) -> Vec<crate::board::FeedCommand> {
        if let Some(handle) = self.feed_handle.take() {
            handle.abort();
            tracing::debug!("Aborted in-flight feed fetch on session restart");
        }
        self.feed_generation = self.feed_generation.wrapping_add(1);
        self.selected_recipe = 0;
        self.board_scroll = 0;
        self.feed.start()
    }

    /// Leave search mode and restart the paged feed, if an overlay is up.
    ///
    /// Any in-flight search is cancelled and its generation invalidated, so
    /// a result that was already queued cannot resurrect the overlay.
    pub fn clear_search(&mut self) -> Vec<crate::board::FeedCommand> {
        self.search_mode = false;
        self.search_input.clear();
        self.search_debounce = None;
        self.pending_search = None;
        if let Some(handle) = self.search_handle.take() {
            handle.abort();
        }
        self.search_generation = self.search_generation.wrapping_add(1);

        if !self.feed.is_searching() {
            return Vec::new();
        }
        if let Some(handle) = self.feed_handle.take() {
            handle.abort();
        }
        self.feed_generation = self.feed_generation.wrapping_add(1);
        self.selected_recipe = 0;
        self.board_scroll = 0;
        self.feed.deactivate_search()
    }

    /// Drop the session entirely: remove the credentials file, rebuild the
    /// API client signed out, and clear the liked set. Used by sign-out and
    /// after a successful account deletion.
    pub fn drop_session(&mut self) {
        if let Err(e) = crate::session::remove(&self.session_path) {
            tracing::warn!(error = %e, "Failed to remove session file");
        }
        match ApiClient::new(
            self.api.base_url().clone(),
            crate::session::Credentials::default(),
        ) {
            Ok(client) => self.api = client,
            Err(e) => {
                // The old client keeps working; only the file removal mattered
                tracing::warn!(error = %e, "Failed to rebuild API client signed out");
            }
        }
        self.liked.clear();
    }
}

// ============================================================================
// Resource Cleanup
// ============================================================================

/// Abort all in-flight async tasks on App drop.
///
/// Ensures proper cleanup when the application exits, preventing orphaned
/// tokio tasks from continuing to run after the main event loop terminates.
impl Drop for App {
    fn drop(&mut self) {
        if let Some(handle) = self.search_handle.take() {
            handle.abort();
            tracing::debug!("Aborted search task on App drop");
        }
        if let Some(handle) = self.feed_handle.take() {
            handle.abort();
            tracing::debug!("Aborted feed fetch task on App drop");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notice::Notice;
    use crate::session::Credentials;
    use tokio::time::{self, Duration};
    use url::Url;

    fn test_app() -> App {
        let base = Url::parse("http://localhost:8080/").unwrap();
        let api = ApiClient::new(base, Credentials::default()).unwrap();
        let session_path = std::env::temp_dir().join("ladle_app_test_session.toml");
        App::new(api, Config::default(), session_path)
    }

    fn recipe(id: i64) -> Recipe {
        Recipe {
            id,
            title: format!("Recipe {}", id),
            description: String::new(),
            image_url: String::new(),
            like_count: 0,
        }
    }

    #[tokio::test]
    async fn test_nav_empty_list() {
        let mut app = test_app();
        assert!(app.selected_recipe().is_none());
        app.nav_down(); // Must not panic or move
        assert_eq!(app.selected_recipe, 0);
    }

    #[tokio::test]
    async fn test_nav_clamps_to_list_end() {
        let mut app = test_app();
        app.feed.start();
        app.feed.total_loaded(6);
        app.feed.page_loaded(1, (0..3).map(recipe).collect());

        for _ in 0..10 {
            app.nav_down();
        }
        assert_eq!(app.selected_recipe, 2);

        app.nav_up();
        assert_eq!(app.selected_recipe, 1);
    }

    #[tokio::test]
    async fn test_clamp_selection_after_list_shrinks() {
        let mut app = test_app();
        app.feed.start();
        app.feed.total_loaded(12);
        app.feed.page_loaded(1, (0..6).map(recipe).collect());
        app.selected_recipe = 5;

        // Search overlay with fewer rows
        app.feed.activate_search((0..2).map(recipe).collect());
        app.clamp_selection();
        assert_eq!(app.selected_recipe, 1);
    }

    #[tokio::test]
    async fn test_status_expires_after_3_seconds() {
        let mut app = test_app();
        time::pause();
        app.set_status("Test message");

        assert!(app.status_message.is_some());

        time::advance(Duration::from_secs(2)).await;
        app.clear_expired_status();
        assert!(app.status_message.is_some()); // Still present at 2s

        time::advance(Duration::from_secs(2)).await;
        app.clear_expired_status();
        assert!(app.status_message.is_none()); // Expired after 3s
    }

    #[tokio::test]
    async fn test_repeated_notice_coalesces_by_toast_id() {
        let mut app = test_app();
        app.set_notice(Notice::new("no-server-connection", "No response"));
        app.set_notice(Notice::new("no-server-connection", "No response"));

        // One message on screen, same toast id
        let status = app.status_message.as_ref().unwrap();
        assert_eq!(status.toast_id.as_deref(), Some("no-server-connection"));

        // A different failure class replaces it
        app.set_notice(Notice::new("request-timeout", "Too slow"));
        let status = app.status_message.as_ref().unwrap();
        assert_eq!(status.toast_id.as_deref(), Some("request-timeout"));
    }

    #[tokio::test]
    async fn test_restart_feed_bumps_generation_and_resets_selection() {
        let mut app = test_app();
        let before = app.feed_generation;
        app.selected_recipe = 4;

        let commands = app.restart_feed();
        assert_eq!(commands.len(), 2);
        assert_eq!(app.feed_generation, before + 1);
        assert_eq!(app.selected_recipe, 0);
        assert!(app.feed.is_loading());
    }

    #[tokio::test]
    async fn test_clear_search_without_overlay_is_cheap() {
        let mut app = test_app();
        let generation = app.feed_generation;
        app.search_input = "ri".to_string();
        app.search_mode = true;

        let commands = app.clear_search();
        assert!(commands.is_empty());
        assert_eq!(app.feed_generation, generation); // No session restart
        assert!(!app.search_mode);
        assert!(app.search_input.is_empty());
    }

    #[tokio::test]
    async fn test_clear_search_with_overlay_restarts_session() {
        let mut app = test_app();
        app.feed.start();
        app.feed.total_loaded(12);
        app.feed.page_loaded(1, (0..6).map(recipe).collect());
        app.feed.activate_search((0..3).map(recipe).collect());
        let generation = app.feed_generation;

        let commands = app.clear_search();
        assert_eq!(commands.len(), 2);
        assert_eq!(app.feed_generation, generation + 1);
        assert!(!app.feed.is_searching());
    }

    #[tokio::test]
    async fn test_clear_search_invalidates_inflight_search() {
        let mut app = test_app();
        let generation = app.search_generation;
        app.search_mode = true;

        app.clear_search();

        // A SearchCompleted carrying the old generation is now stale
        assert_eq!(app.search_generation, generation + 1);
    }

    #[tokio::test]
    async fn test_liked_membership_is_numeric() {
        let mut app = test_app();
        app.liked.insert(42);
        assert!(app.is_liked(42));
        assert!(!app.is_liked(43));
    }

    #[test]
    fn test_account_form_validation_flow() {
        let mut form = AccountForm {
            nickname_input: "ab".to_string(),
            ..AccountForm::default()
        };
        form.input_changed();
        assert!(form.name_error.is_some());
        assert!(!form.can_save());

        form.nickname_input = "chefkim".to_string();
        form.input_changed();
        assert!(form.name_error.is_none());
        assert!(!form.can_save()); // Duplication not yet checked

        form.duplication = Some(false);
        assert!(form.can_save());

        // Any edit invalidates the stale duplication result
        form.nickname_input.push('x');
        form.input_changed();
        assert!(!form.can_save());
    }
}
