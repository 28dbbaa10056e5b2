//! Recipe feed widget.
//!
//! Renders one row per recipe and records the visible row range on the App
//! so the event loop can drive the infinite-scroll sentinel from the actual
//! viewport, not a guess.

use crate::app::App;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};
use unicode_width::UnicodeWidthStr;

/// Spinner frames shown in the panel title while a page fetch is in flight.
const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Truncate to a display width, appending an ellipsis when cut.
fn truncate_to_width(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    let mut out = String::new();
    let budget = max_width.saturating_sub(1);
    for c in text.chars() {
        if out.width() + c.to_string().width() > budget {
            break;
        }
        out.push(c);
    }
    out.push('…');
    out
}

/// Render the recipe feed panel.
pub(super) fn render(f: &mut Frame, app: &mut App, area: Rect) {
    let rows = area.height.saturating_sub(2) as usize; // Borders

    // Keep the selection inside the window before slicing
    if app.selected_recipe < app.board_scroll {
        app.board_scroll = app.selected_recipe;
    } else if rows > 0 && app.selected_recipe >= app.board_scroll + rows {
        app.board_scroll = app.selected_recipe + 1 - rows;
    }

    // Record the viewport for the scroll-trigger driver
    app.board_viewport = (app.board_scroll, rows);

    let recipes = app.feed.visible_recipes();
    let items: Vec<ListItem> = if recipes.is_empty() {
        let text = if app.feed.is_loading() {
            "Loading recipes..."
        } else if app.feed.is_searching() {
            "No recipes match"
        } else {
            "No recipes yet"
        };
        vec![ListItem::new(text)]
    } else {
        let end = (app.board_scroll + rows).min(recipes.len());
        recipes[app.board_scroll..end]
            .iter()
            .enumerate()
            .map(|(offset, recipe)| {
                let index = app.board_scroll + offset;
                let mut spans = Vec::new();

                // Like marker comes purely from liked-set membership
                if app.is_liked(recipe.id) {
                    spans.push(Span::styled("♥ ", app.palette.recipe_like_active));
                } else {
                    spans.push(Span::styled("♡ ", app.palette.recipe_like));
                }

                let title_style = if index == app.selected_recipe {
                    app.palette.recipe_selected
                } else {
                    app.palette.recipe_title
                };

                let like_suffix = format!("  {}♥", recipe.like_count);
                let max_title = (area.width as usize)
                    .saturating_sub(4 + like_suffix.width() + 2);
                spans.push(Span::styled(
                    truncate_to_width(&recipe.title, max_title),
                    title_style,
                ));
                spans.push(Span::styled(like_suffix, app.palette.recipe_like));

                if !recipe.description.is_empty() {
                    let remaining = (area.width as usize).saturating_sub(
                        spans.iter().map(|s| s.content.width()).sum::<usize>() + 4,
                    );
                    if remaining > 4 {
                        spans.push(Span::styled(
                            format!("  {}", truncate_to_width(&recipe.description, remaining)),
                            app.palette.recipe_description,
                        ));
                    }
                }

                ListItem::new(Line::from(spans))
            })
            .collect()
    };

    let title = if app.search_mode {
        format!("Search: {}_", app.search_input)
    } else if app.feed.is_searching() {
        format!("Search results ({})", app.feed.search_result_count())
    } else if app.feed.total_pages() > 0 {
        format!(
            "Recipes (page {}/{})",
            app.feed.current_page(),
            app.feed.total_pages()
        )
    } else {
        "Recipes".to_string()
    };

    let title = if app.feed.is_loading() {
        format!("{} {}", title, SPINNER[app.spinner_frame % SPINNER.len()])
    } else {
        title
    };

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(app.palette.panel_border_focused)
            .title(title),
    );

    f.render_widget(list, area);
}
