//! The UI renders the visible slice of the document.
//!
//! Hidden elements are simply not drawn; headings carry a fold indicator and
//! the cursor highlights the selected one. Everything stateful lives in the
//! app - this module only paints.

use crate::app::App;
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

/// Renders the document view and the help/status bar.
pub fn draw(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(f.area());

    let selected = app.selected_heading();

    let items: Vec<ListItem> = app
        .visible()
        .iter()
        .map(|element| {
            let line = if let Some(level) = element.heading_level() {
                let indicator = if app.folder.is_expanded(element.id()) {
                    "▾"
                } else {
                    "▸"
                };
                let indent = "  ".repeat(usize::from(level.saturating_sub(1)));
                Line::from(vec![
                    Span::raw(format!("{indent}{indicator} ")),
                    Span::styled(
                        element.text().to_string(),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                ])
            } else {
                Line::from(Span::styled(
                    format!("    {}", element.text()),
                    Style::default().fg(Color::DarkGray),
                ))
            };

            let style = if selected == Some(element.id()) {
                Style::default().add_modifier(Modifier::REVERSED)
            } else {
                Style::default()
            };

            ListItem::new(line).style(style)
        })
        .collect();

    let title = format!(
        "{} ({} headings)",
        app.path.display(),
        app.visible_headings().len()
    );
    let list = List::new(items).block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(list, chunks[0]);

    let help_text = app.message.clone().unwrap_or_else(|| {
        "↑/↓: Navigate | Enter/Space: Fold/Unfold | r: Reload | q: Quit".to_string()
    });
    let help = Paragraph::new(help_text).block(Block::default().borders(Borders::ALL));
    f.render_widget(help, chunks[1]);
}
