use crate::app::{App, View};
use ratatui::{layout::Rect, widgets::Paragraph, Frame};
use std::borrow::Cow;

/// Render the status bar
pub(super) fn render(f: &mut Frame, app: &App, area: Rect) {
    // Guard against zero-width/height areas
    if area.width < 1 || area.height < 1 {
        return;
    }

    // Use Cow to avoid allocations for static strings and borrowed messages
    let text: Cow<'_, str> = if let Some(status) = &app.status_message {
        Cow::Borrowed(status.text.as_ref())
    } else {
        // Static keybinding hints - zero allocation
        match app.view {
            View::Board => {
                if app.search_mode {
                    Cow::Borrowed("Type to search | ESC clear | ENTER search now")
                } else {
                    Cow::Borrowed(
                        "[j/k]move [/]search [l]ike [o]pen [r]efresh [Tab]account [t]heme [q]uit",
                    )
                }
            }
            View::Account => {
                if app.account.editing {
                    Cow::Borrowed("Type nickname | ENTER check, then save | ESC done")
                } else {
                    Cow::Borrowed("[e]dit nickname [x]sign out [d]elete account [Tab]board [q]uit")
                }
            }
        }
    };

    let paragraph = Paragraph::new(text).style(app.palette.status_bar);
    f.render_widget(paragraph, area);
}
