use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;
use crate::models::Character;
use crate::ui::styles;
use crate::utils::{format_date, format_optional_str, truncate_string};

/// Render the detail route: the character resolved from the raw route
/// parameter, or a not-found message when resolution misses.
pub fn render(frame: &mut Frame, app: &App, param: &str, area: Rect) {
    match app.resolve_character(param) {
        Some(character) => render_character(frame, character, area),
        None => render_not_found(frame, param, area),
    }
}

fn field<'a>(label: &'a str, value: String) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!(" {:<10}", label), styles::muted_style()),
        Span::styled(value, styles::list_item_style()),
    ])
}

fn render_character(frame: &mut Frame, character: &Character, area: Rect) {
    let mut lines = vec![
        Line::from(Span::styled(
            format!(" {}", character.name),
            styles::title_style(),
        )),
        Line::from(""),
        field("Status", display_or_dash(&character.status)),
        field("Species", character.species_display()),
        field("Gender", display_or_dash(&character.gender)),
        field("Origin", display_or_dash(&character.origin.name)),
        field("Location", display_or_dash(&character.location.name)),
        field("Episodes", character.episode_count().to_string()),
        field("Added", format_date(&character.created)),
    ];

    if !character.image.is_empty() {
        lines.push(Line::from(""));
        lines.push(field("Image", truncate_string(&character.image, 60)));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled(" Press ", styles::muted_style()),
        Span::styled("Esc", styles::help_key_style()),
        Span::styled(" to go back", styles::muted_style()),
    ]));

    let block = Block::default()
        .title(format!(" Character #{} ", character.id))
        .title_style(styles::muted_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(true));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_not_found(frame: &mut Frame, param: &str, area: Rect) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(" Character not found", styles::error_style())),
        Line::from(""),
        Line::from(Span::styled(
            format!(" No character matches \"{}\"", truncate_string(param, 40)),
            styles::muted_style(),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled(" Press ", styles::muted_style()),
            Span::styled("Esc", styles::help_key_style()),
            Span::styled(" to go back", styles::muted_style()),
        ]),
    ];

    let block = Block::default()
        .title(" Character ")
        .title_style(styles::muted_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(true));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn display_or_dash(value: &str) -> String {
    format_optional_str(value, "-")
}
