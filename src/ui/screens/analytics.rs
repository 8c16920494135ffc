use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};
use rust_decimal::Decimal;

use crate::report::{saturating_sum, BreakdownSlice};
use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{fill_ratio, format_amount, progress_bar, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(6), Constraint::Length(8)])
        .split(chunks[1]);

    render_breakdown(f, chunks[0], app);
    super::budgets::render(f, right[0], &app.report, "Budget vs Actual");
    render_totals(f, right[1], app);
}

fn render_breakdown(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(
            format!(" Spending by Category, {} ", app.current_month.long_name()),
            theme::title_style(),
        ));

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

    let mut slices: Vec<&BreakdownSlice> = app.breakdown.iter().collect();
    slices.sort_by(|a, b| b.amount.cmp(&a.amount));

    let bar_width = (area.width as usize).saturating_sub(44).clamp(6, 24);

    let items: Vec<ListItem> = slices
        .iter()
        .map(|slice| {
            let color = theme::category_color(&slice.color);
            ListItem::new(Line::from(vec![
                Span::styled("● ", Style::default().fg(color)),
                Span::styled(
                    format!("{:<18}", truncate(&slice.label, 17)),
                    theme::normal_style(),
                ),
                Span::styled(
                    format!("{:>11} ", format_amount(slice.amount)),
                    theme::normal_style(),
                ),
                Span::styled(
                    progress_bar(fill_ratio(slice.share), bar_width),
                    Style::default().fg(color),
                ),
                Span::styled(
                    format!(" {:>6}", format!("{:.1}%", slice.share)),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ),
            ]))
        })
        .collect();

    f.render_widget(List::new(items).block(block), area);
}

fn render_totals(f: &mut Frame, area: Rect, app: &App) {
    let report = &app.report;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(" Totals ", theme::title_style()));

    let row = |label: &str, value: String, style: Style| {
        Line::from(vec![
            Span::styled(format!("  {label:<16}"), theme::dim_style()),
            Span::styled(value, style),
        ])
    };

    let budgeted = saturating_sum(report.per_category.iter().map(|c| c.category.budget));
    let balance_style = Style::default()
        .fg(theme::balance_color(report.balance >= Decimal::ZERO))
        .add_modifier(Modifier::BOLD);

    let mut lines = vec![
        row("Income", format_amount(report.total_income), theme::income_style()),
        row("Expenses", format_amount(report.total_expense), theme::expense_style()),
        row("Balance", format_amount(report.balance), balance_style),
        row("Category budgets", format_amount(budgeted), theme::normal_style()),
    ];

    match &app.monthly_budget {
        Some(plan) => {
            let left = plan.total_budget.saturating_sub(report.total_expense);
            let style = if left < Decimal::ZERO {
                theme::expense_style()
            } else {
                theme::income_style()
            };
            lines.push(row(
                "Planned total",
                format!(
                    "{} ({} {})",
                    format_amount(plan.total_budget),
                    format_amount(left.abs()),
                    if left < Decimal::ZERO { "over" } else { "left" }
                ),
                style,
            ));
        }
        None => lines.push(row(
            "Planned total",
            "not set, :month-budget <amount>".to_string(),
            theme::dim_style(),
        )),
    }

    f.render_widget(Paragraph::new(lines).block(block), area);
}
