//! Background task spawning and the scroll-trigger driver.
//!
//! Every network call runs as a spawned tokio task that reports back over
//! the `AppEvent` channel. Page and total fetches carry the feed generation
//! current at spawn time so responses from a restarted pagination session
//! are recognizably stale.

use crate::app::{App, AppEvent};
use crate::board::FeedCommand;
use tokio::sync::mpsc;

/// Spawn the fetches a feed state transition asked for.
pub(super) fn spawn_feed_commands(
    app: &mut App,
    commands: Vec<FeedCommand>,
    event_tx: &mpsc::Sender<AppEvent>,
) {
    for command in commands {
        match command {
            FeedCommand::FetchTotal => spawn_fetch_total(app, event_tx),
            FeedCommand::FetchPage(page) => spawn_fetch_page(app, page, event_tx),
        }
    }
}

pub(super) fn spawn_fetch_total(app: &App, event_tx: &mpsc::Sender<AppEvent>) {
    let api = app.api.clone();
    let generation = app.feed_generation;
    let tx = event_tx.clone();

    tokio::spawn(async move {
        let result = api.fetch_total().await;
        let _ = tx.send(AppEvent::TotalLoaded { generation, result }).await;
    });
}

/// Spawn a page fetch, keeping the handle so a session restart can abort it.
///
/// The loading flag was set by the controller when it issued the command;
/// only one page fetch is ever in flight.
pub(super) fn spawn_fetch_page(app: &mut App, page: u32, event_tx: &mpsc::Sender<AppEvent>) {
    let api = app.api.clone();
    let generation = app.feed_generation;
    let tx = event_tx.clone();

    tracing::debug!(page, generation, "Spawning page fetch");
    app.feed_handle = Some(tokio::spawn(async move {
        let result = api.fetch_page(page).await;
        let event = AppEvent::PageLoaded {
            generation,
            page,
            result,
        };
        if let Err(e) = tx.send(event).await {
            tracing::warn!(error = %e, "Failed to send page result (receiver dropped)");
        }
    }));
}

/// Spawn a liked-set fetch. A no-op when signed out: the set stays empty and
/// every recipe renders as not liked.
pub(super) fn spawn_liked_refresh(app: &App, event_tx: &mpsc::Sender<AppEvent>) {
    if !app.api.has_session() {
        tracing::debug!("No session, skipping liked-set fetch");
        return;
    }

    let api = app.api.clone();
    let tx = event_tx.clone();
    tokio::spawn(async move {
        let result = api.fetch_liked_set().await;
        let _ = tx.send(AppEvent::LikedSetLoaded { result }).await;
    });
}

pub(super) fn spawn_ranking_fetch(app: &App, event_tx: &mpsc::Sender<AppEvent>) {
    let api = app.api.clone();
    let tx = event_tx.clone();
    tokio::spawn(async move {
        let result = api.fetch_ranking().await;
        let _ = tx.send(AppEvent::RankingLoaded { result }).await;
    });
}

/// Spawn a background search task.
///
/// Search runs against the server; results come back via
/// `AppEvent::SearchCompleted` with a generation counter to handle rapid
/// typing.
pub(super) fn spawn_search(app: &mut App, query: String, event_tx: &mpsc::Sender<AppEvent>) {
    // Abort any previous search task
    if let Some(handle) = app.search_handle.take() {
        handle.abort();
        tracing::debug!("Aborted previous search task");
    }

    // Increment generation counter for this new search
    app.search_generation = app.search_generation.wrapping_add(1);
    let generation = app.search_generation;

    app.set_status("Searching...");

    let api = app.api.clone();
    let tx = event_tx.clone();
    let query_for_task = query.clone();

    tracing::debug!(query = %query, generation, "Spawning async search task");

    app.search_handle = Some(tokio::spawn(async move {
        let result = api.search(&query_for_task).await;
        let event = AppEvent::SearchCompleted {
            query: query_for_task,
            generation,
            result,
        };

        if let Err(e) = tx.send(event).await {
            tracing::warn!(error = %e, "Failed to send search results (receiver dropped)");
        }
    }));
}

/// Spawn a like/unlike POST for a recipe, chosen by current set membership.
pub(super) fn spawn_like_toggle(app: &App, post_id: i64, event_tx: &mpsc::Sender<AppEvent>) {
    let api = app.api.clone();
    let unlike = app.is_liked(post_id);
    let tx = event_tx.clone();

    tokio::spawn(async move {
        let result = if unlike {
            api.unlike(post_id).await
        } else {
            api.like(post_id).await
        };
        let _ = tx.send(AppEvent::LikeToggled { post_id, result }).await;
    });
}

pub(super) fn spawn_nickname_check(app: &App, nickname: String, event_tx: &mpsc::Sender<AppEvent>) {
    let api = app.api.clone();
    let tx = event_tx.clone();
    tokio::spawn(async move {
        let result = api.check_nickname_taken(&nickname).await;
        let _ = tx.send(AppEvent::NicknameChecked { nickname, result }).await;
    });
}

pub(super) fn spawn_nickname_save(app: &App, nickname: String, event_tx: &mpsc::Sender<AppEvent>) {
    let api = app.api.clone();
    let tx = event_tx.clone();
    tokio::spawn(async move {
        let result = api.change_nickname(&nickname).await;
        let _ = tx.send(AppEvent::NicknameSaved { nickname, result }).await;
    });
}

pub(super) fn spawn_account_delete(app: &App, event_tx: &mpsc::Sender<AppEvent>) {
    let api = app.api.clone();
    let tx = event_tx.clone();
    tokio::spawn(async move {
        let result = api.delete_account().await;
        let _ = tx.send(AppEvent::AccountDeleted { result }).await;
    });
}

/// Drive the infinite-scroll trigger from the viewport recorded at render.
///
/// Called once per loop iteration after drawing: attaches the sentinel to
/// the last rendered recipe (a no-op while a fetch is in flight) and polls
/// it against the visible row range. A fired trigger spawns the next page
/// fetch.
pub(super) fn drive_scroll_trigger(app: &mut App, event_tx: &mpsc::Sender<AppEvent>) {
    if app.view != crate::app::View::Board {
        return;
    }

    let last = app.feed.visible_recipes().len().checked_sub(1);
    app.feed.attach_sentinel(last);

    let (first, rows) = app.board_viewport;
    let visible = first..first + rows;
    if let Some(FeedCommand::FetchPage(page)) = app.feed.poll_sentinel(&visible) {
        app.needs_redraw = true;
        spawn_fetch_page(app, page, event_tx);
    }
}
