//! Ranking panel widget: the top recipes shown above the paged feed.

use crate::app::App;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

/// Render the ranking panel. Hidden entirely (by the layout) while the
/// search overlay is active or no entries have loaded.
pub(super) fn render(f: &mut Frame, app: &App, area: Rect) {
    let items: Vec<ListItem> = app
        .ranking
        .iter()
        .take(3)
        .map(|entry| {
            let mut spans = vec![
                Span::styled(format!("{:>2}  ", entry.rank), app.palette.ranking_rank),
                Span::raw(entry.name.clone()),
            ];
            if !entry.ingredients.is_empty() {
                spans.push(Span::styled(
                    format!("  {}", entry.ingredients.join(", ")),
                    app.palette.ranking_ingredients,
                ));
            }
            spans.push(Span::styled(
                format!("  {}♥", entry.likes),
                app.palette.ranking_likes,
            ));
            ListItem::new(Line::from(spans))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(app.palette.panel_border)
            .title(Span::styled("Ranking", app.palette.ranking_heading)),
    );

    f.render_widget(list, area);
}
