//! Keyboard input handling.
//!
//! Input is routed by mode: the confirmation overlay wins, then search
//! input, then the nickname editor, then per-view navigation keys.

use crate::api::ApiError;
use crate::app::{App, AppEvent, ConfirmAction, View};
use crate::notice::notice_for;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyModifiers};
use tokio::sync::mpsc;
use tokio::time::Instant;

use super::helpers::{
    spawn_account_delete, spawn_feed_commands, spawn_like_toggle, spawn_liked_refresh,
    spawn_nickname_check, spawn_nickname_save, spawn_ranking_fetch,
};
use super::loop_runner::Action;

pub(super) async fn handle_input(
    app: &mut App,
    code: KeyCode,
    modifiers: KeyModifiers,
    event_tx: &mpsc::Sender<AppEvent>,
) -> Result<Action> {
    // Ctrl+C always quits, regardless of mode
    if code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
        return Ok(Action::Quit);
    }

    // Confirmation overlay routes everything to y/n
    if app.pending_confirm.is_some() {
        handle_confirm(app, code, event_tx);
        return Ok(Action::Continue);
    }

    if app.search_mode {
        handle_search_input(app, code, event_tx);
        return Ok(Action::Continue);
    }

    if app.view == View::Account && app.account.editing {
        handle_nickname_input(app, code, event_tx);
        return Ok(Action::Continue);
    }

    match code {
        KeyCode::Char('q') => return Ok(Action::Quit),
        KeyCode::Char('t') => {
            let name = app.cycle_theme();
            app.set_status(format!("Theme: {}", name));
        }
        KeyCode::Tab => {
            app.view = match app.view {
                View::Board => View::Account,
                View::Account => View::Board,
            };
        }
        _ => match app.view {
            View::Board => handle_board_key(app, code, event_tx),
            View::Account => handle_account_key(app, code),
        },
    }

    Ok(Action::Continue)
}

fn handle_board_key(app: &mut App, code: KeyCode, event_tx: &mpsc::Sender<AppEvent>) {
    match code {
        KeyCode::Char('j') | KeyCode::Down => app.nav_down(),
        KeyCode::Char('k') | KeyCode::Up => app.nav_up(),
        KeyCode::Char('g') => {
            app.selected_recipe = 0;
            app.board_scroll = 0;
        }
        KeyCode::Char('G') => {
            let len = app.feed.visible_recipes().len();
            if len > 0 {
                app.selected_recipe = len - 1;
            }
        }
        KeyCode::Char('/') => {
            app.search_mode = true;
        }
        KeyCode::Char('l') | KeyCode::Char(' ') => {
            // Like toggle: requires a session; the rendered state follows the
            // server-sourced set, so nothing flips locally here.
            if !app.api.has_session() {
                app.set_notice(notice_for(&ApiError::NoSession, "toggle like"));
                return;
            }
            if let Some(recipe) = app.selected_recipe() {
                spawn_like_toggle(app, recipe.id, event_tx);
            }
        }
        KeyCode::Char('o') => {
            if let Some(recipe) = app.selected_recipe() {
                let url = app.api.recipe_page_url(recipe.id);
                match open::that(&url) {
                    Ok(()) => app.set_status("Opened in browser"),
                    Err(e) => {
                        tracing::warn!(url = %url, error = %e, "Failed to open browser");
                        app.set_status("Could not open browser");
                    }
                }
            }
        }
        KeyCode::Char('r') => {
            // Full board refresh: new pagination session plus liked set and
            // ranking, same as a fresh mount.
            let commands = app.restart_feed();
            spawn_feed_commands(app, commands, event_tx);
            spawn_liked_refresh(app, event_tx);
            if app.config.show_ranking {
                spawn_ranking_fetch(app, event_tx);
            }
            app.set_status("Refreshing board...");
        }
        _ => {}
    }
}

fn handle_account_key(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Char('e') => {
            app.account.editing = true;
            app.account.input_changed();
        }
        KeyCode::Char('d') => {
            if app.api.has_session() {
                app.pending_confirm = Some(ConfirmAction::DeleteAccount);
            } else {
                app.set_notice(notice_for(&ApiError::NoSession, "delete account"));
            }
        }
        KeyCode::Char('x') => sign_out(app),
        _ => {}
    }
}

/// Sign out in place: remove the session file and drop the credentials from
/// the live client so authorized calls stop immediately.
fn sign_out(app: &mut App) {
    if !app.api.has_session() {
        app.set_status("Not signed in");
        return;
    }
    app.drop_session();
    app.set_status("Signed out");
}

fn handle_search_input(app: &mut App, code: KeyCode, event_tx: &mpsc::Sender<AppEvent>) {
    match code {
        KeyCode::Esc => {
            let commands = app.clear_search();
            spawn_feed_commands(app, commands, event_tx);
        }
        KeyCode::Enter => {
            // Flush the debounce: run the pending query now
            app.search_debounce = None;
            if let Some(query) = app.pending_search.take() {
                submit_search(app, query, event_tx);
            }
        }
        KeyCode::Backspace => {
            app.search_input.pop();
            queue_search(app);
        }
        KeyCode::Char(c) => {
            app.search_input.push(c);
            queue_search(app);
        }
        _ => {}
    }
}

/// Record the current input as the pending query and restart the debounce
/// timer. The tick handler executes it after the typing pause.
fn queue_search(app: &mut App) {
    app.pending_search = Some(app.search_input.clone());
    app.search_debounce = Some(Instant::now());
}

/// Execute a search query, or deactivate the overlay when it is empty.
pub(super) fn submit_search(app: &mut App, query: String, event_tx: &mpsc::Sender<AppEvent>) {
    if query.is_empty() {
        let commands = app.clear_search();
        spawn_feed_commands(app, commands, event_tx);
        app.search_mode = true; // Keep the input focused until ESC
    } else {
        super::helpers::spawn_search(app, query, event_tx);
    }
}

fn handle_nickname_input(app: &mut App, code: KeyCode, event_tx: &mpsc::Sender<AppEvent>) {
    match code {
        KeyCode::Esc => {
            app.account.editing = false;
        }
        KeyCode::Backspace => {
            app.account.nickname_input.pop();
            app.account.input_changed();
        }
        KeyCode::Enter => {
            if app.account.nickname_input.is_empty() || app.account.name_error.is_some() {
                return;
            }
            if app.account.can_save() {
                spawn_nickname_save(app, app.account.nickname_input.clone(), event_tx);
            } else {
                // First ENTER runs the duplication check; the second saves
                spawn_nickname_check(app, app.account.nickname_input.clone(), event_tx);
                app.set_status("Checking nickname...");
            }
        }
        KeyCode::Char(c) => {
            app.account.nickname_input.push(c);
            app.account.input_changed();
        }
        _ => {}
    }
}

fn handle_confirm(app: &mut App, code: KeyCode, event_tx: &mpsc::Sender<AppEvent>) {
    match code {
        KeyCode::Char('y') | KeyCode::Char('Y') => {
            match app.pending_confirm.take() {
                Some(ConfirmAction::DeleteAccount) => {
                    spawn_account_delete(app, event_tx);
                    app.set_status("Deleting account...");
                }
                None => {}
            }
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            app.pending_confirm = None;
        }
        _ => {}
    }
}
