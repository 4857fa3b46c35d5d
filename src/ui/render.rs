use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::{App, AppState, LoadState, Route};

use super::styles;
use super::views::{detail, list};

pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title bar
            Constraint::Length(3), // Filter bar
            Constraint::Min(10),   // Main content
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    render_title_bar(frame, app, chunks[0]);
    render_filter_bar(frame, app, chunks[1]);
    render_main_content(frame, app, chunks[2]);
    render_status_bar(frame, app, chunks[3]);

    // Render overlays
    if matches!(app.state, AppState::ShowingHelp) {
        render_help_overlay(frame);
    }

    if matches!(app.state, AppState::EnteringId) {
        render_goto_overlay(frame, app);
    }
}

fn render_title_bar(frame: &mut Frame, _app: &App, area: Rect) {
    let title = "  Rick and Morty";
    let help_hint = "[?] Help";

    let title_line = Line::from(vec![
        Span::styled(title, styles::title_style()),
        Span::raw(" ".repeat(
            (area.width as usize).saturating_sub(title.len() + help_hint.len() + 4),
        )),
        Span::styled(help_hint, styles::muted_style()),
    ]);

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(styles::muted_style());

    frame.render_widget(Paragraph::new(title_line).block(block), area);
}

fn render_filter_bar(frame: &mut Frame, app: &App, area: Rect) {
    let editing = matches!(app.state, AppState::EditingName);

    let name_style = if editing {
        styles::search_style()
    } else {
        styles::list_item_style()
    };
    let cursor = if editing { "▌" } else { "" };

    let species_display = if app.filter_species.is_empty() {
        "all".to_string()
    } else {
        app.filter_species.clone()
    };

    let line = Line::from(vec![
        Span::styled(" [/] Name: ", styles::muted_style()),
        Span::styled(format!("{}{}", app.filter_name, cursor), name_style),
        Span::styled("    [s] Species: ", styles::muted_style()),
        Span::styled(species_display, styles::highlight_style()),
    ]);

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(styles::muted_style());

    frame.render_widget(Paragraph::new(line).block(block), area);
}

fn render_main_content(frame: &mut Frame, app: &App, area: Rect) {
    match &app.route {
        Route::List => list::render(frame, app, area),
        Route::Detail(param) => detail::render(frame, app, param, area),
    }
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let shortcuts = "[g]oto id | [q]uit";

    let (left_text, left_style) = if let Some(ref msg) = app.status_message {
        let style = if matches!(app.load, LoadState::Failed) {
            styles::error_style()
        } else {
            styles::muted_style()
        };
        (format!(" {} ", msg), style)
    } else {
        (format!(" {} characters ", app.characters.len()), styles::muted_style())
    };

    let right_text = format!(" {} ", shortcuts);
    let padding = (area.width as usize)
        .saturating_sub(left_text.len())
        .saturating_sub(right_text.len());

    let status_line = Line::from(vec![
        Span::styled(left_text, left_style),
        Span::raw(" ".repeat(padding)),
        Span::styled(right_text, styles::muted_style()),
    ]);

    frame.render_widget(
        Paragraph::new(status_line).style(styles::status_bar_style()),
        area,
    );
}

fn render_help_overlay(frame: &mut Frame) {
    let area = centered_rect_fixed(48, 18, frame.area());
    frame.render_widget(Clear, area);

    let version = env!("CARGO_PKG_VERSION");

    let help_line = |key: &'static str, desc: &'static str| {
        Line::from(vec![
            Span::styled(format!("  {:<10}", key), styles::help_key_style()),
            Span::styled(desc, styles::help_desc_style()),
        ])
    };

    let help_text = vec![
        Line::from(Span::styled("  MORTYDEX", styles::title_style())),
        Line::from(Span::styled(
            format!("  version {}", version),
            styles::muted_style(),
        )),
        Line::from(""),
        Line::from(Span::styled(" Navigation", styles::highlight_style())),
        help_line("↑/↓", "Move selection"),
        help_line("PgUp/PgDn", "Move selection by page"),
        help_line("Enter", "Open character detail"),
        help_line("g", "Go to character by id"),
        help_line("Esc", "Back / cancel"),
        Line::from(""),
        Line::from(Span::styled(" Filters", styles::highlight_style())),
        help_line("/", "Edit name filter"),
        help_line("s / S", "Cycle species filter"),
        help_line("x", "Clear both filters"),
        Line::from(""),
        Line::from(Span::styled(" Actions", styles::highlight_style())),
        help_line("r", "Retry a failed fetch"),
        help_line("q", "Quit"),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(true))
        .style(Style::default());

    frame.render_widget(Paragraph::new(help_text).block(block), area);
}

fn render_goto_overlay(frame: &mut Frame, app: &App) {
    let area = centered_rect_fixed(40, 5, frame.area());
    frame.render_widget(Clear, area);

    let lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled(" Character id: ", styles::muted_style()),
            Span::styled(format!("{}▌", app.id_input), styles::search_style()),
        ]),
    ];

    let block = Block::default()
        .title(" Go to ")
        .title_style(styles::muted_style())
        .borders(Borders::ALL)
        .border_style(styles::border_style(true));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Create a centered rectangle with fixed dimensions
fn centered_rect_fixed(width: u16, height: u16, r: Rect) -> Rect {
    let x = r.x + (r.width.saturating_sub(width)) / 2;
    let y = r.y + (r.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(r.width), height.min(r.height))
}
