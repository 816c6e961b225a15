//! Aggregation engine: turns flat expense and limit records into the
//! per-category series and rankings shown on the dashboard.
//!
//! Every function is pure and total. Empty inputs produce empty outputs and
//! missing data resolves to `0.0`, never to an error.

use std::collections::HashMap;

use serde::Serialize;
use spendboard_domain::{Amounted, Categorized, CategoryKey, ExpenseRecord, LabelMap};

use crate::ordered_set::OrderedKeySet;

/// One row of a top-N ranking.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedEntry {
    pub name: String,
    pub amount: f64,
}

impl RankedEntry {
    pub fn new(name: impl Into<String>, amount: f64) -> Self {
        Self {
            name: name.into(),
            amount,
        }
    }
}

/// Index-aligned per-category series.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DerivedSeries {
    pub categories: Vec<CategoryKey>,
    pub spent_by_category: Vec<f64>,
    pub limit_by_category: Vec<f64>,
    pub remaining_by_category: Vec<f64>,
}

impl DerivedSeries {
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Iterates `(category, spent, limit, remaining)` tuples.
    pub fn rows(&self) -> impl Iterator<Item = (&str, f64, f64, f64)> + '_ {
        self.categories.iter().enumerate().map(move |(idx, category)| {
            (
                category.as_str(),
                self.spent_by_category[idx],
                self.limit_by_category[idx],
                self.remaining_by_category[idx],
            )
        })
    }
}

/// Distinct categories across expenses then limits, in first-seen order.
pub fn union_categories<E, L>(expenses: &[E], limits: &[L]) -> Vec<CategoryKey>
where
    E: Categorized,
    L: Categorized,
{
    category_universe(expenses, limits).into_vec()
}

/// Same as [`union_categories`] but keeps the set form for membership checks.
pub fn category_universe<E, L>(expenses: &[E], limits: &[L]) -> OrderedKeySet
where
    E: Categorized,
    L: Categorized,
{
    expenses
        .iter()
        .map(Categorized::category)
        .chain(limits.iter().map(Categorized::category))
        .collect()
}

/// Sums record amounts per category, aligned with `categories`.
pub fn total_by_category<T>(records: &[T], categories: &[CategoryKey]) -> Vec<f64>
where
    T: Categorized + Amounted,
{
    let mut totals: HashMap<&str, f64> = HashMap::with_capacity(categories.len());
    for record in records {
        *totals.entry(record.category()).or_insert(0.0) += record.amount();
    }
    categories
        .iter()
        .map(|category| totals.get(category.as_str()).copied().unwrap_or(0.0))
        .collect()
}

/// Amount of the first limit matching `category`, or `0.0` when none exists.
///
/// Duplicate limits for one category are a Record Store anomaly; the first
/// record in list order wins.
pub fn limit_for<L>(limits: &[L], category: &str) -> f64
where
    L: Categorized + Amounted,
{
    limits
        .iter()
        .find(|limit| limit.category() == category)
        .map(Amounted::amount)
        .unwrap_or(0.0)
}

/// Remaining budget, clamped at zero when the category is overspent.
pub fn remaining(limit: f64, spent: f64) -> f64 {
    let diff = limit - spent;
    if diff > 0.0 {
        diff
    } else {
        0.0
    }
}

/// Categories present in `selection`, in the order of `categories`.
pub fn filter_by_selection(categories: &[CategoryKey], selection: &OrderedKeySet) -> Vec<CategoryKey> {
    categories
        .iter()
        .filter(|category| selection.contains(category))
        .cloned()
        .collect()
}

/// Records whose category is selected, in input order.
pub fn selected_expenses<'a, T: Categorized>(
    records: &'a [T],
    selection: &OrderedKeySet,
) -> Vec<&'a T> {
    records
        .iter()
        .filter(|record| selection.contains(record.category()))
        .collect()
}

/// Groups `items` by `key_fn`, sums `amount_fn` per group and keeps the `n`
/// largest groups in descending order.
///
/// Groups with equal sums keep the order in which their keys were first
/// encountered, since the sort is stable.
pub fn top_n<T, K, A>(items: &[T], n: usize, key_fn: K, amount_fn: A) -> Vec<RankedEntry>
where
    K: Fn(&T) -> &str,
    A: Fn(&T) -> f64,
{
    if n == 0 {
        return Vec::new();
    }

    let mut groups: Vec<RankedEntry> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();
    for item in items {
        let key = key_fn(item);
        let amount = amount_fn(item);
        match index.get(key) {
            Some(&position) => groups[position].amount += amount,
            None => {
                index.insert(key, groups.len());
                groups.push(RankedEntry::new(key, amount));
            }
        }
    }

    groups.sort_by(|a, b| b.amount.total_cmp(&a.amount));
    groups.truncate(n);
    groups
}

/// Builds the full per-category series for the selected categories.
pub fn derive_series<E, L>(expenses: &[E], limits: &[L], selection: &OrderedKeySet) -> DerivedSeries
where
    E: Categorized + Amounted,
    L: Categorized + Amounted,
{
    let universe = union_categories(expenses, limits);
    let categories = filter_by_selection(&universe, selection);
    let spent_by_category = total_by_category(expenses, &categories);
    let limit_by_category: Vec<f64> = categories
        .iter()
        .map(|category| limit_for(limits, category))
        .collect();
    let remaining_by_category = limit_by_category
        .iter()
        .zip(&spent_by_category)
        .map(|(limit, spent)| remaining(*limit, *spent))
        .collect();

    DerivedSeries {
        categories,
        spent_by_category,
        limit_by_category,
        remaining_by_category,
    }
}

/// Ranks the series' categories by spend.
pub fn top_categories(series: &DerivedSeries, n: usize) -> Vec<RankedEntry> {
    let pairs: Vec<(&str, f64)> = series
        .categories
        .iter()
        .map(String::as_str)
        .zip(series.spent_by_category.iter().copied())
        .collect();
    top_n(&pairs, n, |pair| pair.0, |pair| pair.1)
}

/// Ranks payment methods by spend over the given expenses.
pub fn top_payment_methods(expenses: &[&ExpenseRecord], n: usize) -> Vec<RankedEntry> {
    top_n(
        expenses,
        n,
        |expense| expense.payment_method.as_str(),
        |expense| expense.amount,
    )
}

/// Ranks purchased items by spend over the given expenses.
pub fn top_items(expenses: &[&ExpenseRecord], n: usize) -> Vec<RankedEntry> {
    top_n(
        expenses,
        n,
        |expense| expense.item_bought.as_str(),
        |expense| expense.amount,
    )
}

/// Replaces ranking keys with their display names.
pub fn label_ranking(entries: &[RankedEntry], labels: &LabelMap) -> Vec<RankedEntry> {
    entries
        .iter()
        .map(|entry| RankedEntry::new(labels.resolve(&entry.name), entry.amount))
        .collect()
}
