use ratatui::{
    layout::{Constraint, Rect},
    widgets::{Block, Borders, Cell, Row, Table, TableState},
    Frame,
};

use crate::app::{App, LoadState};
use crate::ui::styles;
use crate::utils::truncate_string;

/// Render the character list - the filtered collection as a table.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let visible = app.filtered();

    let header = Row::new([
        Cell::from("Name"),
        Cell::from("Species"),
        Cell::from("Status"),
        Cell::from("Gender"),
    ])
    .style(styles::title_style())
    .height(1);

    let rows: Vec<Row> = visible
        .iter()
        .map(|character| {
            Row::new([
                Cell::from(character.name.clone()),
                Cell::from(truncate_string(&character.species_display(), 24)),
                Cell::from(character.status.clone()),
                Cell::from(character.gender.clone()),
            ])
            .style(styles::list_item_style())
        })
        .collect();

    let widths = [
        Constraint::Percentage(40),
        Constraint::Fill(2),
        Constraint::Length(9),
        Constraint::Length(12),
    ];

    let title = match app.load {
        LoadState::Loading => " Characters (loading...) ".to_string(),
        LoadState::Failed => " Characters (fetch failed) ".to_string(),
        _ => format!(" Characters ({}/{}) ", visible.len(), app.characters.len()),
    };

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .title(title)
                .title_style(styles::muted_style())
                .borders(Borders::ALL)
                .border_style(styles::border_style(true)),
        )
        .row_highlight_style(styles::selected_style());

    let mut state = TableState::default();
    if !visible.is_empty() {
        state.select(Some(app.selection.min(visible.len() - 1)));
    }

    frame.render_stateful_widget(table, area, &mut state);
}
