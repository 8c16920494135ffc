use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};
use rust_decimal::Decimal;

use crate::models::CategoryRole;
use crate::report::category_spend;
use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{format_amount, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::ACCENT))
        .title(Span::styled(
            format!(
                " Categories ({}) | :category <name> [budget=N] [role=R] [color=#RRGGBB] ",
                app.categories.len()
            ),
            Style::default()
                .fg(theme::ACCENT)
                .add_modifier(Modifier::BOLD),
        ));

    if app.categories.is_empty() {
        let msg = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled("No categories", theme::dim_style())),
            Line::from(""),
            Line::from(Span::styled(
                "e.g. :category Groceries budget=400 role=expense",
                Style::default().fg(theme::ACCENT),
            )),
        ])
        .centered()
        .block(block);
        f.render_widget(msg, area);
        return;
    }

    let header_cells = ["Name", "Role", "Budget", "Spent", "Color"]
        .iter()
        .map(|h| Cell::from(*h).style(theme::header_style()));
    let header = Row::new(header_cells).height(1);

    let spend = category_spend(&app.transactions);

    let rows: Vec<Row> = app
        .categories
        .iter()
        .enumerate()
        .skip(app.category_scroll)
        .take(area.height.saturating_sub(3) as usize)
        .map(|(i, cat)| {
            let spent = spend
                .iter()
                .find(|(id, _)| *id == cat.id)
                .map(|(_, amt)| *amt)
                .unwrap_or(Decimal::ZERO);

            let is_cursor = i == app.category_index;
            let style = if is_cursor {
                theme::selected_style()
            } else {
                theme::normal_style()
            };

            let spent_style = if is_cursor {
                style
            } else if cat.is_budgeted() && spent > cat.budget {
                theme::expense_style()
            } else if cat.role == CategoryRole::Income {
                theme::dim_style()
            } else {
                theme::normal_style()
            };

            let budget = if cat.is_budgeted() {
                format_amount(cat.budget)
            } else {
                "-".to_string()
            };

            Row::new(vec![
                Cell::from(Line::from(vec![
                    Span::styled("● ", Style::default().fg(theme::category_color(&cat.color))),
                    Span::raw(truncate(&cat.name, 24)),
                ])),
                Cell::from(cat.role.as_str()),
                Cell::from(budget),
                Cell::from(Span::styled(format_amount(spent), spent_style)),
                Cell::from(cat.color.as_str()),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Min(20),
        Constraint::Length(9),
        Constraint::Length(13),
        Constraint::Length(13),
        Constraint::Length(9),
    ];

    f.render_widget(Table::new(rows, widths).header(header).block(block), area);
}
