//! Turns a [`DashboardView`] into terminal text.

use chrono::NaiveDate;
use spendboard_core::{
    label_ranking, DashboardSummary, DashboardView, DateFormatter, DateRange, RankedEntry,
};
use spendboard_domain::LabelMap;

use crate::cli::formatters::CliFormatters;
use crate::cli::table::{Table, TableColumn, TableRenderer};
use crate::dashboard::Labels;

pub const NO_CATEGORIES_MESSAGE: &str = "No categories found for the selected period.";
pub const NO_SELECTION_MESSAGE: &str = "Select at least one category to see the charts.";

/// Everything the dashboard renderer needs besides the view itself.
pub struct RenderContext<'a> {
    pub range: DateRange,
    pub labels: &'a Labels,
    pub formatters: &'a CliFormatters,
    pub selected: usize,
    pub plain: bool,
}

pub fn render_view(view: &DashboardView, ctx: &RenderContext<'_>) -> String {
    let boundary = |date: Option<NaiveDate>| {
        date.map(|value| ctx.formatters.format_date(value))
            .unwrap_or_else(|| "open".to_string())
    };
    let mut out = format!(
        "Period: {} to {}\n",
        boundary(ctx.range.start),
        boundary(ctx.range.end)
    );
    match view {
        DashboardView::NoCategories => {
            out.push_str(NO_CATEGORIES_MESSAGE);
            out.push('\n');
        }
        DashboardView::NoSelection { universe } => {
            out.push_str(NO_SELECTION_MESSAGE);
            out.push('\n');
            let names: Vec<&str> = universe
                .iter()
                .map(|key| ctx.labels.categories.resolve(key))
                .collect();
            out.push_str(&format!("Available: {}\n", names.join(", ")));
        }
        DashboardView::Ready(summary) => {
            out.push_str(&format!(
                "Categories: {} selected, {} expenses\n\n",
                ctx.selected, summary.expense_count
            ));
            out.push_str(&budget_table(summary, ctx));
            let over = summary.over_budget();
            if !over.is_empty() {
                let names: Vec<&str> = over
                    .iter()
                    .map(|key| ctx.labels.categories.resolve(key))
                    .collect();
                out.push_str(&format!("\nOver budget: {}\n", names.join(", ")));
            }
            out.push('\n');
            out.push_str(&ranking_table(
                "Top categories",
                "Category",
                &summary.top_categories,
                Some(&ctx.labels.categories),
                ctx,
            ));
            out.push('\n');
            out.push_str(&ranking_table(
                "Top payment methods",
                "Payment method",
                &summary.top_payment_methods,
                Some(&ctx.labels.payment_methods),
                ctx,
            ));
            out.push('\n');
            out.push_str(&ranking_table(
                "Top items",
                "Item",
                &summary.top_items,
                None,
                ctx,
            ));
        }
    }
    out
}

fn budget_table(summary: &DashboardSummary, ctx: &RenderContext<'_>) -> String {
    let mut table = Table::new(
        Some("Spent vs. limit"),
        vec![
            TableColumn::left("Category", 10),
            TableColumn::right("Spent", 10),
            TableColumn::right("Limit", 10),
            TableColumn::right("Remaining", 10),
            TableColumn::right("Used", 6),
        ],
    );
    for (idx, (category, spent, limit, remaining)) in summary.series.rows().enumerate() {
        let used = summary
            .utilization_percent(idx)
            .map(|pct| format!("{pct:.0}%"))
            .unwrap_or_else(|| "-".to_string());
        table.add_row(vec![
            ctx.labels.categories.resolve(category).to_string(),
            ctx.formatters.number(spent),
            ctx.formatters.number(limit),
            ctx.formatters.number(remaining),
            used,
        ]);
    }
    table.set_footer(vec![
        "Total".to_string(),
        ctx.formatters.amount(summary.total_spent),
        ctx.formatters.amount(summary.total_limit),
        ctx.formatters.amount(summary.total_remaining),
        String::new(),
    ]);
    TableRenderer::render(&table, ctx.plain)
}

fn ranking_table(
    title: &str,
    header: &str,
    entries: &[RankedEntry],
    labels: Option<&LabelMap>,
    ctx: &RenderContext<'_>,
) -> String {
    let entries = match labels {
        Some(labels) => label_ranking(entries, labels),
        None => entries.to_vec(),
    };
    let mut table = Table::new(
        Some(title),
        vec![
            TableColumn::right("#", 2),
            TableColumn::left(header, 10),
            TableColumn::right("Amount", 10),
        ],
    );
    for (idx, entry) in entries.iter().enumerate() {
        table.add_row(vec![
            (idx + 1).to_string(),
            entry.name.clone(),
            ctx.formatters.amount(entry.amount),
        ]);
    }
    if entries.is_empty() {
        table.add_row(vec![String::new(), "(none)".to_string(), String::new()]);
    }
    TableRenderer::render(&table, ctx.plain)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use spendboard_core::{DashboardSummary, DateRange, OrderedKeySet, RankingSizes};
    use spendboard_domain::{ExpenseRecord, LimitRecord};

    use super::{render_view, RenderContext, NO_CATEGORIES_MESSAGE, NO_SELECTION_MESSAGE};
    use crate::cli::formatters::CliFormatters;
    use crate::dashboard::Labels;

    fn context<'a>(labels: &'a Labels, formatters: &'a CliFormatters) -> RenderContext<'a> {
        RenderContext {
            range: DateRange::new(
                NaiveDate::from_ymd_opt(2024, 3, 1),
                NaiveDate::from_ymd_opt(2024, 3, 31),
            ),
            labels,
            formatters,
            selected: 2,
            plain: true,
        }
    }

    #[test]
    fn empty_records_render_the_no_categories_message() {
        let labels = Labels::default();
        let formatters = CliFormatters::new("BRL");
        let view = DashboardSummary::build(&[], &[], &OrderedKeySet::new(), RankingSizes::default());
        let text = render_view(&view, &context(&labels, &formatters));
        assert!(text.starts_with("Period: 2024-03-01 to 2024-03-31"));
        assert!(text.contains(NO_CATEGORIES_MESSAGE));
    }

    #[test]
    fn empty_selection_lists_available_categories_by_display_name() {
        let mut labels = Labels::default();
        labels.categories.insert("food", "Food & Drinks");
        let formatters = CliFormatters::new("BRL");
        let expenses = vec![ExpenseRecord::new("1", "food", 10.0)];
        let view = DashboardSummary::build(
            &expenses,
            &[],
            &OrderedKeySet::new(),
            RankingSizes::default(),
        );
        let text = render_view(&view, &context(&labels, &formatters));
        assert!(text.contains(NO_SELECTION_MESSAGE));
        assert!(text.contains("Available: Food & Drinks"));
    }

    #[test]
    fn ready_view_shows_labelled_rows_and_totals() {
        let mut labels = Labels::default();
        labels.payment_methods.insert("pix", "PIX");
        let formatters = CliFormatters::new("BRL");
        let expenses = vec![
            ExpenseRecord::new("1", "food", 30.0)
                .with_payment_method("pix")
                .with_item("bread"),
            ExpenseRecord::new("2", "food", 50.0).with_payment_method("card"),
            ExpenseRecord::new("3", "transport", 20.0).with_payment_method("pix"),
        ];
        let limits = vec![
            LimitRecord::new("l1", "food", 100.0),
            LimitRecord::new("l2", "transport", 10.0),
        ];
        let selection: OrderedKeySet = ["food", "transport"].into_iter().collect();
        let view = DashboardSummary::build(&expenses, &limits, &selection, RankingSizes::default());

        let text = render_view(&view, &context(&labels, &formatters));
        assert!(text.contains("Spent vs. limit"));
        assert!(text.contains("100.00 BRL"));
        assert!(text.contains("Over budget: transport"));
        assert!(text.contains("PIX"));
        assert!(text.contains("bread"));
    }
}
