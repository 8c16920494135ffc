use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::report::category_label;
use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{format_amount, truncate};

const RECENT: usize = 5;

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),                 // Summary cards
            Constraint::Min(8),                    // Budgets and breakdown
            Constraint::Length(RECENT as u16 + 3), // Recent transactions
        ])
        .split(area);

    let middle = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(chunks[1]);

    render_summary_cards(f, chunks[0], app);
    super::budgets::render(f, middle[0], &app.report, "Budget Overview");
    render_breakdown_chart(f, middle[1], app);
    render_recent(f, chunks[2], app);
}

fn render_summary_cards(f: &mut Frame, area: Rect, app: &App) {
    let report = &app.report;
    let income_count = app.transactions.iter().filter(|t| t.is_income()).count();
    let expense_count = app.transactions.len() - income_count;

    let mut cards: Vec<(&str, Decimal, Color, String)> = vec![
        (
            "Total Income",
            report.total_income,
            theme::GREEN,
            format!("{income_count} txns"),
        ),
        (
            "Total Expenses",
            report.total_expense,
            theme::RED,
            format!("{expense_count} txns"),
        ),
        (
            "Balance",
            report.balance,
            theme::balance_color(report.balance >= Decimal::ZERO),
            String::new(),
        ),
    ];
    if let Some(plan) = &app.monthly_budget {
        let left = plan.total_budget.saturating_sub(report.total_expense);
        cards.push((
            "Planned",
            plan.total_budget,
            theme::YELLOW,
            if left < Decimal::ZERO {
                format!("{} over", format_amount(left.abs()))
            } else {
                format!("{} left", format_amount(left))
            },
        ));
    }

    let constraints = vec![Constraint::Ratio(1, cards.len() as u32); cards.len()];
    let areas = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(area);

    for ((title, amount, color, subtitle), card_area) in cards.into_iter().zip(areas.iter()) {
        render_card(f, *card_area, title, amount, color, subtitle);
    }
}

fn render_card(f: &mut Frame, area: Rect, title: &str, amount: Decimal, color: Color, subtitle: String) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(format!(" {title} "), theme::title_style()));

    let text = Paragraph::new(vec![
        Line::from(Span::styled(
            format_amount(amount),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(subtitle, theme::dim_style())),
    ])
    .centered()
    .block(block);

    f.render_widget(text, area);
}

fn render_breakdown_chart(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(" Expense Breakdown ", theme::title_style()));

    if app.breakdown.is_empty() {
        let msg = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled("No expenses this month", theme::dim_style())),
        ])
        .centered()
        .block(block);
        f.render_widget(msg, area);
        return;
    }

    let bars: Vec<Bar> = app
        .breakdown
        .iter()
        .map(|slice| {
            let color = theme::category_color(&slice.color);
            Bar::default()
                .value(slice.amount.round().to_u64().unwrap_or(0))
                .text_value(format!("{:.0}%", slice.share))
                .label(Line::from(truncate(&slice.label, 8)))
                .style(Style::default().fg(color))
                .value_style(Style::default().fg(theme::HEADER_BG).bg(color))
        })
        .collect();

    let chart = BarChart::default()
        .block(block)
        .data(BarGroup::default().bars(&bars))
        .bar_width(8)
        .bar_gap(1);

    f.render_widget(chart, area);
}

fn render_recent(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(" Recent Transactions ", theme::title_style()));

    if app.transactions.is_empty() {
        let msg = Paragraph::new(Line::from(Span::styled(
            "No transactions this month. Press a to add an expense, i for income",
            theme::dim_style(),
        )))
        .centered()
        .block(block);
        f.render_widget(msg, area);
        return;
    }

    let rows: Vec<Row> = app
        .transactions
        .iter()
        .take(RECENT)
        .map(|txn| {
            let (cat_name, cat_color) = category_label(&app.categories, &txn.category);
            let amount_style = if txn.is_income() {
                theme::income_style()
            } else {
                theme::expense_style()
            };
            let sign = if txn.is_income() { "+" } else { "-" };
            Row::new(vec![
                Cell::from(txn.date.format("%b %d").to_string()),
                Cell::from(truncate(&txn.description, 40)),
                Cell::from(Span::styled(
                    cat_name.to_string(),
                    Style::default().fg(theme::category_color(cat_color)),
                )),
                Cell::from(Span::styled(
                    format!("{sign}{}", format_amount(txn.amount)),
                    amount_style,
                )),
            ])
            .style(theme::normal_style())
        })
        .collect();

    let widths = [
        Constraint::Length(8),
        Constraint::Min(20),
        Constraint::Length(20),
        Constraint::Length(14),
    ];
    f.render_widget(Table::new(rows, widths).block(block), area);
}
