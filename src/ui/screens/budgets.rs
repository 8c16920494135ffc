//! Budget progress list shared by the Overview and Analytics screens.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::models::UNKNOWN_LABEL;
use crate::report::{BudgetReport, CategoryBudget};
use crate::ui::theme;
use crate::ui::util::{fill_ratio, format_amount, progress_bar, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, report: &BudgetReport, title: &str) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(format!(" {title} "), theme::title_style()));

    if report.per_category.is_empty() {
        let msg = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled("No budget categories set", theme::dim_style())),
            Line::from(""),
            Line::from(Span::styled(
                "Use :set-budget <category> <amount> to track spending",
                theme::dim_style(),
            )),
        ])
        .centered()
        .block(block);
        f.render_widget(msg, area);
        return;
    }

    // Bar width scales with the space left after the text columns.
    let bar_width = (area.width as usize).saturating_sub(62).clamp(8, 30);

    let mut items: Vec<ListItem> = report
        .per_category
        .iter()
        .map(|item| budget_line(item, bar_width))
        .collect();

    if !report.unattributed.is_zero() {
        items.push(ListItem::new(Line::from(vec![
            Span::styled("  ", theme::dim_style()),
            Span::styled(
                format!(
                    "{UNKNOWN_LABEL:<18}{:>10} spent in deleted categories",
                    format_amount(report.unattributed)
                ),
                theme::dim_style(),
            ),
        ])));
    }

    f.render_widget(List::new(items).block(block), area);
}

fn budget_line(item: &CategoryBudget, bar_width: usize) -> ListItem<'static> {
    let color = if item.is_over_budget {
        theme::RED
    } else {
        theme::GREEN
    };
    let status = if item.is_over_budget {
        format!("{} over", format_amount(item.remaining.abs()))
    } else {
        format!("{} left", format_amount(item.remaining))
    };

    ListItem::new(Line::from(vec![
        Span::styled(
            "● ",
            Style::default().fg(theme::category_color(&item.category.color)),
        ),
        Span::styled(
            format!("{:<18}", truncate(&item.category.name, 17)),
            theme::normal_style(),
        ),
        Span::styled(
            format!(
                "{:>10} / {:<10} ",
                format_amount(item.spent),
                format_amount(item.category.budget)
            ),
            Style::default().fg(color),
        ),
        Span::styled(
            progress_bar(fill_ratio(item.percentage), bar_width),
            Style::default().fg(color),
        ),
        Span::styled(
            format!(" {:>5} ", format!("{:.0}%", item.percentage)),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
        Span::styled(status, theme::dim_style()),
    ]))
}
