//! Account view: connected email, nickname editing, sign-out and deletion.

use crate::app::App;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Render the account view.
pub(super) fn render(f: &mut Frame, app: &App, area: Rect) {
    let mut lines: Vec<Line> = Vec::new();

    lines.push(Line::from(Span::styled(
        "My profile",
        app.palette.section_heading,
    )));
    lines.push(Line::default());

    // Connected email
    match app.api.account_email() {
        Some(email) => {
            lines.push(Line::from(vec![
                Span::styled("Connected email  ", app.palette.account_label),
                Span::styled(email.to_string(), app.palette.account_value),
            ]));
            lines.push(Line::from(vec![
                Span::styled("Liked recipes    ", app.palette.account_label),
                Span::styled(format!("{}", app.liked.len()), app.palette.account_value),
            ]));
        }
        None => {
            lines.push(Line::from(Span::styled(
                "Not signed in. Run `ladle login --token <T> --email <E>`",
                app.palette.account_invalid,
            )));
        }
    }

    lines.push(Line::default());

    // Nickname form
    let nickname_display = if app.account.editing {
        format!("{}_", app.account.nickname_input)
    } else if app.account.nickname_input.is_empty() {
        "(press e to edit)".to_string()
    } else {
        app.account.nickname_input.clone()
    };
    lines.push(Line::from(vec![
        Span::styled("Nickname         ", app.palette.account_label),
        Span::styled(nickname_display, app.palette.account_value),
    ]));

    if let Some(error) = app.account.name_error {
        lines.push(Line::from(Span::styled(error, app.palette.account_invalid)));
    } else if app.account.editing {
        // Duplication check result, styled like the original's check circle
        let (marker, style) = match app.account.duplication {
            Some(false) => ("● available", app.palette.account_ok),
            Some(true) => ("● already in use", app.palette.account_invalid),
            None => ("○ not checked yet", app.palette.account_value),
        };
        lines.push(Line::from(Span::styled(
            format!("Duplication check: {}", marker),
            style,
        )));
    }

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(app.palette.panel_border_focused)
            .title("Account"),
    );

    f.render_widget(paragraph, area);
}
