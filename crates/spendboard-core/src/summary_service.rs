//! Dashboard-level summary built on top of the aggregation engine.

use serde::{Deserialize, Serialize};
use spendboard_domain::{CategoryKey, ExpenseRecord, LimitRecord};

use crate::aggregation::{
    category_universe, derive_series, selected_expenses, top_categories, top_items,
    top_payment_methods, DerivedSeries, RankedEntry,
};
use crate::ordered_set::OrderedKeySet;

/// How many entries each ranking keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankingSizes {
    pub categories: usize,
    pub payment_methods: usize,
    pub items: usize,
}

impl Default for RankingSizes {
    fn default() -> Self {
        Self {
            categories: 5,
            payment_methods: 5,
            items: 10,
        }
    }
}

/// Everything the dashboard renders once there is data and a selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    pub series: DerivedSeries,
    pub top_categories: Vec<RankedEntry>,
    pub top_payment_methods: Vec<RankedEntry>,
    pub top_items: Vec<RankedEntry>,
    pub total_spent: f64,
    pub total_limit: f64,
    pub total_remaining: f64,
    pub expense_count: usize,
}

/// Display branch chosen from the loaded records and the selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum DashboardView {
    /// No category appears in either record list.
    NoCategories,
    /// Categories exist but none of them is selected.
    NoSelection { universe: Vec<CategoryKey> },
    Ready(DashboardSummary),
}

impl DashboardView {
    pub fn summary(&self) -> Option<&DashboardSummary> {
        match self {
            DashboardView::Ready(summary) => Some(summary),
            _ => None,
        }
    }
}

impl DashboardSummary {
    /// Picks the display branch and computes the series and rankings.
    pub fn build(
        expenses: &[ExpenseRecord],
        limits: &[LimitRecord],
        selection: &OrderedKeySet,
        sizes: RankingSizes,
    ) -> DashboardView {
        let universe = category_universe(expenses, limits);
        if universe.is_empty() {
            return DashboardView::NoCategories;
        }

        let series = derive_series(expenses, limits, selection);
        if series.is_empty() {
            return DashboardView::NoSelection {
                universe: universe.into_vec(),
            };
        }

        let filtered = selected_expenses(expenses, selection);
        let total_spent = series.spent_by_category.iter().sum();
        let total_limit = series.limit_by_category.iter().sum();
        let total_remaining = series.remaining_by_category.iter().sum();

        DashboardView::Ready(DashboardSummary {
            top_categories: top_categories(&series, sizes.categories),
            top_payment_methods: top_payment_methods(&filtered, sizes.payment_methods),
            top_items: top_items(&filtered, sizes.items),
            total_spent,
            total_limit,
            total_remaining,
            expense_count: filtered.len(),
            series,
        })
    }

    /// Share of the limit already spent, `None` when the category has no limit.
    pub fn utilization_percent(&self, index: usize) -> Option<f64> {
        let limit = *self.series.limit_by_category.get(index)?;
        let spent = *self.series.spent_by_category.get(index)?;
        if limit > 0.0 {
            Some(spent / limit * 100.0)
        } else {
            None
        }
    }

    /// Categories whose spend exceeds their limit, including unlimited ones with spend.
    pub fn over_budget(&self) -> Vec<&str> {
        self.series
            .rows()
            .filter(|(_, spent, limit, _)| spent > limit)
            .map(|(category, ..)| category)
            .collect()
    }
}
