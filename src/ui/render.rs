//! Render functions for the TUI.
//!
//! This module handles all rendering logic, dispatching to the appropriate
//! view based on application state.

use crate::app::{App, ConfirmAction, View};
use crate::board::FeedMode;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use super::{account, board, ranking, status};

/// Minimum terminal dimensions required for normal operation.
pub(super) const MIN_WIDTH: u16 = 50;
pub(super) const MIN_HEIGHT: u16 = 10;

/// Main render dispatch function.
///
/// Routes to the appropriate view renderer based on current application
/// state. Handles terminal size validation before rendering.
pub(super) fn render(f: &mut Frame, app: &mut App) {
    let area = f.area();

    // Guard against zero-width/height to prevent panics
    if area.width < 1 || area.height < 1 {
        return;
    }

    // Minimum terminal size check for usable UI
    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        let msg = if area.height < 3 || area.width < 20 {
            Paragraph::new("Too small")
        } else {
            Paragraph::new(format!(
                "Terminal too small\n\nMinimum: {}x{}\nCurrent: {}x{}",
                MIN_WIDTH, MIN_HEIGHT, area.width, area.height
            ))
            .alignment(Alignment::Center)
        };
        f.render_widget(msg, area);
        return;
    }

    match app.view {
        View::Board => render_board_view(f, app),
        View::Account => render_account_view(f, app),
    }

    // Render confirmation dialog on top of any view when active
    if let Some(ref confirm) = app.pending_confirm {
        render_confirm_overlay(f, app, confirm);
    }
}

/// Render the board view: optional ranking panel, recipe feed, status bar.
///
/// The ranking panel belongs to the non-search board only; the search
/// overlay replaces it with the result list, as the original layout did.
fn render_board_view(f: &mut Frame, app: &mut App) {
    let show_ranking = app.config.show_ranking
        && app.feed.mode() == FeedMode::Paged
        && !app.ranking.is_empty();

    if show_ranking {
        let ranking_height = app.ranking.len().min(3) as u16 + 2;

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(ranking_height),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(f.area());

        ranking::render(f, app, chunks[0]);
        board::render(f, app, chunks[1]);
        status::render(f, app, chunks[2]);
    } else {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(f.area());

        board::render(f, app, chunks[0]);
        status::render(f, app, chunks[1]);
    }
}

fn render_account_view(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(f.area());

    account::render(f, app, chunks[0]);
    status::render(f, app, chunks[1]);
}

/// Render the centered confirmation dialog.
fn render_confirm_overlay(f: &mut Frame, app: &App, confirm: &ConfirmAction) {
    let text = match confirm {
        ConfirmAction::DeleteAccount => "Delete your account? This cannot be undone.  [y/n]",
    };

    let area = centered_rect(f.area(), 50, 5);
    f.render_widget(Clear, area);

    let dialog = Paragraph::new(text)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(app.palette.panel_border_focused)
                .title("Confirm"),
        );
    f.render_widget(dialog, area);
}

/// A centered rect of the given size, clamped to the frame.
fn centered_rect(frame: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(frame.width);
    let height = height.min(frame.height);
    Rect {
        x: frame.x + (frame.width - width) / 2,
        y: frame.y + (frame.height - height) / 2,
        width,
        height,
    }
}
