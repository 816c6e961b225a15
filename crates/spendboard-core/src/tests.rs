use spendboard_domain::{Amounted, Categorized, ExpenseRecord, LimitRecord};

use crate::{
    aggregation::{
        filter_by_selection, limit_for, remaining, top_n, total_by_category, union_categories,
        RankedEntry,
    },
    ordered_set::OrderedKeySet,
    summary_service::{DashboardSummary, DashboardView, RankingSizes},
};

const NO_LIMITS: &[LimitRecord] = &[];

fn expense(category: &str, amount: f64) -> ExpenseRecord {
    ExpenseRecord::new(format!("{category}-{amount}"), category, amount)
}

fn limit(category: &str, amount: f64) -> LimitRecord {
    LimitRecord::new(format!("limit-{category}"), category, amount)
}

fn food_and_transport() -> (Vec<ExpenseRecord>, Vec<LimitRecord>) {
    let expenses = vec![
        expense("food", 50.0),
        expense("food", 30.0),
        expense("transport", 20.0),
    ];
    let limits = vec![limit("food", 100.0)];
    (expenses, limits)
}

#[test]
fn food_and_transport_totals_and_remaining() {
    let (expenses, limits) = food_and_transport();
    let categories = vec!["food".to_string(), "transport".to_string()];

    let totals = total_by_category(&expenses, &categories);
    assert_eq!(totals, vec![80.0, 20.0]);

    let remaining: Vec<f64> = categories
        .iter()
        .zip(&totals)
        .map(|(category, spent)| remaining(limit_for(&limits, category), *spent))
        .collect();
    assert_eq!(remaining, vec![20.0, 0.0]);
}

#[test]
fn union_keeps_first_seen_order_across_expenses_then_limits() {
    let expenses = vec![expense("b", 1.0), expense("a", 1.0), expense("b", 2.0)];
    let limits = vec![limit("c", 10.0), limit("a", 5.0)];
    assert_eq!(union_categories(&expenses, &limits), vec!["b", "a", "c"]);
    assert!(union_categories(&[] as &[ExpenseRecord], NO_LIMITS).is_empty());
}

#[test]
fn absent_categories_total_zero_and_totals_cover_every_amount() {
    let expenses = vec![
        expense("food", 10.25),
        expense("rent", 1200.0),
        expense("food", 4.5),
        expense("fun", 0.1),
        expense("fun", 0.2),
    ];
    let mut categories = union_categories(&expenses, NO_LIMITS);
    categories.push("missing".to_string());

    let totals = total_by_category(&expenses, &categories);
    assert_eq!(*totals.last().unwrap(), 0.0);

    let grand: f64 = expenses.iter().map(|e| e.amount).sum();
    let summed: f64 = totals.iter().sum();
    assert!((grand - summed).abs() < 1e-9);
}

#[test]
fn limit_lookup_picks_first_duplicate_and_defaults_to_zero() {
    let limits = vec![limit("food", 100.0), limit("food", 999.0)];
    assert_eq!(limit_for(&limits, "food"), 100.0);
    assert_eq!(limit_for(&limits, "transport"), 0.0);
}

#[test]
fn remaining_is_never_negative() {
    let samples = [
        (100.0, 20.0),
        (20.0, 100.0),
        (0.0, 0.0),
        (-5.0, 3.0),
        (0.0, 1e12),
        (f64::NAN, 1.0),
    ];
    for (limit, spent) in samples {
        assert!(remaining(limit, spent) >= 0.0, "limit={limit} spent={spent}");
    }
    assert_eq!(remaining(100.0, 20.0), 80.0);
}

#[test]
fn top_n_breaks_ties_by_first_seen_key() {
    let items = vec![("A", 10.0), ("B", 10.0), ("C", 5.0)];
    let ranked = top_n(&items, 2, |item| item.0, |item| item.1);
    assert_eq!(
        ranked,
        vec![RankedEntry::new("A", 10.0), RankedEntry::new("B", 10.0)]
    );
}

#[test]
fn top_n_is_bounded_sorted_and_idempotent() {
    let items = vec![
        ("x", 1.0),
        ("y", 7.0),
        ("x", 6.0),
        ("z", 7.0),
        ("w", 3.0),
    ];
    for n in 0..7 {
        let first = top_n(&items, n, |item| item.0, |item| item.1);
        let second = top_n(&items, n, |item| item.0, |item| item.1);
        assert_eq!(first, second);
        assert!(first.len() <= n.min(4));
        assert!(first.windows(2).all(|pair| pair[0].amount >= pair[1].amount));
    }
    let all = top_n(&items, 10, |item| item.0, |item| item.1);
    let names: Vec<&str> = all.iter().map(|entry| entry.name.as_str()).collect();
    assert_eq!(names, vec!["x", "y", "z", "w"]);
}

#[test]
fn top_n_with_zero_returns_empty() {
    let items = vec![("A", 1.0)];
    assert!(top_n(&items, 0, |item| item.0, |item| item.1).is_empty());
}

#[test]
fn selecting_the_union_returns_the_union() {
    let (expenses, limits) = food_and_transport();
    let union = union_categories(&expenses, &limits);
    let selection: OrderedKeySet = union.iter().cloned().collect();
    assert_eq!(filter_by_selection(&union, &selection), union);
}

#[test]
fn empty_records_render_the_no_categories_branch() {
    let view = DashboardSummary::build(&[], &[], &OrderedKeySet::new(), RankingSizes::default());
    assert_eq!(view, DashboardView::NoCategories);
}

#[test]
fn empty_selection_is_distinct_from_no_data() {
    let (expenses, limits) = food_and_transport();
    let view = DashboardSummary::build(
        &expenses,
        &limits,
        &OrderedKeySet::new(),
        RankingSizes::default(),
    );
    assert_eq!(
        view,
        DashboardView::NoSelection {
            universe: vec!["food".into(), "transport".into()]
        }
    );
}

#[test]
fn summary_rankings_only_count_selected_categories() {
    let expenses = vec![
        expense("food", 40.0)
            .with_payment_method("nubank")
            .with_item("groceries"),
        expense("food", 15.0)
            .with_payment_method("itau")
            .with_item("coffee"),
        expense("travel", 500.0)
            .with_payment_method("itau")
            .with_item("flight"),
        expense("leisure", 15.0)
            .with_payment_method("c6")
            .with_item("cinema"),
    ];
    let limits = vec![limit("food", 100.0), limit("rent", 1500.0)];
    let selection: OrderedKeySet = ["food", "leisure", "rent"].into_iter().collect();

    let view = DashboardSummary::build(&expenses, &limits, &selection, RankingSizes::default());
    let summary = view.summary().expect("summary ready");

    assert_eq!(summary.series.categories, vec!["food", "leisure", "rent"]);
    assert_eq!(summary.series.spent_by_category, vec![55.0, 15.0, 0.0]);
    assert_eq!(summary.series.remaining_by_category, vec![45.0, 0.0, 1500.0]);
    assert_eq!(summary.expense_count, 3);
    assert_eq!(summary.total_spent, 70.0);
    assert_eq!(summary.total_limit, 1600.0);

    let methods: Vec<&str> = summary
        .top_payment_methods
        .iter()
        .map(|entry| entry.name.as_str())
        .collect();
    assert_eq!(methods, vec!["nubank", "itau", "c6"]);
    assert!(summary.top_items.iter().all(|entry| entry.name != "flight"));
    assert_eq!(summary.top_categories[0], RankedEntry::new("food", 55.0));

    let utilization = summary.utilization_percent(0).expect("food has a limit");
    assert!((utilization - 55.0).abs() < 1e-9);
    assert_eq!(summary.utilization_percent(1), None);
    assert_eq!(summary.over_budget(), vec!["leisure"]);
}

#[test]
fn ranking_sizes_truncate_each_ranking() {
    let expenses: Vec<ExpenseRecord> = (0..12)
        .map(|idx| {
            expense(&format!("cat{idx}"), 10.0 + idx as f64)
                .with_payment_method(format!("pm{idx}"))
                .with_item(format!("item{idx}"))
        })
        .collect();
    let selection: OrderedKeySet = union_categories(&expenses, NO_LIMITS).into_iter().collect();

    let view = DashboardSummary::build(&expenses, &[], &selection, RankingSizes::default());
    let summary = view.summary().unwrap();
    assert_eq!(summary.top_categories.len(), 5);
    assert_eq!(summary.top_payment_methods.len(), 5);
    assert_eq!(summary.top_items.len(), 10);
    assert_eq!(summary.top_items[0].name, "item11");
}

/// Budget line from a planning sheet rather than the Record Store.
struct PlannedLine {
    category: &'static str,
    amount: f64,
}

impl Categorized for PlannedLine {
    fn category(&self) -> &str {
        self.category
    }
}

impl Amounted for PlannedLine {
    fn amount(&self) -> f64 {
        self.amount
    }
}

#[test]
fn engine_accepts_any_categorized_amounts() {
    let (expenses, _) = food_and_transport();
    let planned = vec![
        PlannedLine { category: "food", amount: 60.0 },
        PlannedLine { category: "leisure", amount: 40.0 },
        PlannedLine { category: "food", amount: 90.0 },
    ];

    assert_eq!(
        union_categories(&expenses, &planned),
        vec!["food", "transport", "leisure"]
    );
    assert_eq!(limit_for(&planned, "food"), 60.0);

    let selection: OrderedKeySet = ["food", "leisure"].into_iter().collect();
    let series = crate::aggregation::derive_series(&expenses, &planned, &selection);
    assert_eq!(series.categories, vec!["food", "leisure"]);
    assert_eq!(series.limit_by_category, vec![60.0, 40.0]);
    assert_eq!(series.remaining_by_category[1], 40.0);
}
