//! Dashboard state: the loaded record lists, the date filter, the category
//! selection and the label maps, plus the fetch cycle that keeps them fresh.

mod sequencer;

use std::sync::Arc;

use chrono::NaiveDate;
use spendboard_core::{
    category_universe, Clock, DashboardSummary, DashboardView, DateRange, RankingSizes,
    SelectionState,
};
use spendboard_domain::{ExpenseRecord, LabelMap, LimitRecord, ReferenceKind};
use tracing::{debug, error, info, warn};

pub use sequencer::RequestSequencer;

use crate::client::RecordStore;
use crate::errors::{DashboardError, Result};

/// Identifies one issued fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    pub sequence: u64,
    pub range: DateRange,
}

/// Expense and limit lists fetched together for one ticket.
#[derive(Debug, Clone)]
pub struct RecordSnapshot {
    pub ticket: FetchTicket,
    pub expenses: Vec<ExpenseRecord>,
    pub limits: Vec<LimitRecord>,
}

/// What happened to a snapshot handed to [`DashboardController::apply`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    Applied {
        expenses: usize,
        limits: usize,
        selection_initialized: bool,
    },
    /// A newer fetch was issued after this one; the snapshot was dropped.
    Superseded { sequence: u64, latest: u64 },
}

/// Display names for every kind of reference key.
#[derive(Debug, Clone, Default)]
pub struct Labels {
    pub categories: LabelMap,
    pub payment_methods: LabelMap,
    pub payment_owners: LabelMap,
}

impl Labels {
    pub fn for_kind_mut(&mut self, kind: ReferenceKind) -> &mut LabelMap {
        match kind {
            ReferenceKind::Category => &mut self.categories,
            ReferenceKind::PaymentMethod => &mut self.payment_methods,
            ReferenceKind::PaymentOwner => &mut self.payment_owners,
        }
    }
}

/// Owns the dashboard state and talks to an injected [`RecordStore`].
pub struct DashboardController<S: RecordStore> {
    store: Arc<S>,
    sequencer: Arc<RequestSequencer>,
    range: DateRange,
    selection: SelectionState,
    expenses: Vec<ExpenseRecord>,
    limits: Vec<LimitRecord>,
    labels: Labels,
    sizes: RankingSizes,
    loaded: bool,
}

impl<S: RecordStore> DashboardController<S> {
    /// Creates the controller with the current-month range computed once.
    pub fn mount(store: Arc<S>, clock: &dyn Clock, sizes: RankingSizes) -> Self {
        let range = DateRange::current_month(clock);
        info!(%range, "dashboard mounted");
        Self {
            store,
            sequencer: Arc::new(RequestSequencer::new()),
            range,
            selection: SelectionState::new(),
            expenses: Vec::new(),
            limits: Vec::new(),
            labels: Labels::default(),
            sizes,
            loaded: false,
        }
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    pub fn sequencer(&self) -> &Arc<RequestSequencer> {
        &self.sequencer
    }

    pub fn range(&self) -> DateRange {
        self.range
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn expenses(&self) -> &[ExpenseRecord] {
        &self.expenses
    }

    pub fn limits(&self) -> &[LimitRecord] {
        &self.limits
    }

    pub fn labels(&self) -> &Labels {
        &self.labels
    }

    pub fn sizes(&self) -> RankingSizes {
        self.sizes
    }

    pub fn set_sizes(&mut self, sizes: RankingSizes) {
        self.sizes = sizes;
    }

    /// `true` once at least one snapshot has been applied.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Distinct categories across the loaded lists.
    pub fn universe(&self) -> Vec<String> {
        category_universe(&self.expenses, &self.limits).into_vec()
    }

    /// Recomputes the dashboard from the current lists and selection.
    pub fn view(&self) -> DashboardView {
        DashboardSummary::build(
            &self.expenses,
            &self.limits,
            self.selection.as_set(),
            self.sizes,
        )
    }

    /// Replaces the range. Returns `true` when a re-fetch is due, i.e. a
    /// boundary changed and both boundaries are set.
    pub fn set_range(&mut self, range: DateRange) -> bool {
        let start_changed = self.range.set_start(range.start);
        let end_changed = self.range.set_end(range.end);
        (start_changed || end_changed) && self.range.is_complete()
    }

    pub fn set_start(&mut self, start: Option<NaiveDate>) -> bool {
        self.range.set_start(start) && self.range.is_complete()
    }

    pub fn set_end(&mut self, end: Option<NaiveDate>) -> bool {
        self.range.set_end(end) && self.range.is_complete()
    }

    /// Flips `key` in the selection and returns whether it is now selected.
    /// A key outside the loaded categories can be deselected but never added.
    pub fn toggle_category(&mut self, key: &str) -> Result<bool> {
        if !self.selection.contains(key) && !self.is_known_category(key) {
            return Err(DashboardError::UnknownCategory(key.to_string()));
        }
        Ok(self.selection.toggle(key))
    }

    pub fn is_known_category(&self, key: &str) -> bool {
        category_universe(&self.expenses, &self.limits).contains(key)
    }

    pub fn select_all_categories(&mut self) {
        let universe = self.universe();
        self.selection.select_all(universe);
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Selects exactly `keys`. Leaves the selection untouched when any key
    /// is not a loaded category.
    pub fn replace_selection<I, K>(&mut self, keys: I) -> Result<()>
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        let universe = category_universe(&self.expenses, &self.limits);
        let keys: Vec<String> = keys.into_iter().map(Into::into).collect();
        if let Some(unknown) = keys.iter().find(|key| !universe.contains(key)) {
            return Err(DashboardError::UnknownCategory(unknown.clone()));
        }
        self.selection.select_all(keys);
        Ok(())
    }

    /// Issues a new sequence number and opens a fresh load cycle.
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.selection.begin_cycle();
        let ticket = FetchTicket {
            sequence: self.sequencer.issue(),
            range: self.range,
        };
        debug!(sequence = ticket.sequence, range = %ticket.range, "fetch issued");
        ticket
    }

    /// Fetches expenses and limits concurrently; fails unless both succeed.
    pub async fn fetch(store: &S, ticket: FetchTicket) -> Result<RecordSnapshot> {
        let (expenses, limits) = tokio::try_join!(store.expenses(&ticket.range), store.limits())?;
        Ok(RecordSnapshot {
            ticket,
            expenses,
            limits,
        })
    }

    /// Installs `snapshot` unless a newer fetch has been issued since.
    pub fn apply(&mut self, snapshot: RecordSnapshot) -> LoadOutcome {
        let sequence = snapshot.ticket.sequence;
        if !self.sequencer.is_latest(sequence) {
            let latest = self.sequencer.latest();
            debug!(sequence, latest, "discarding superseded response");
            return LoadOutcome::Superseded { sequence, latest };
        }

        self.expenses = snapshot.expenses;
        self.limits = snapshot.limits;
        self.loaded = true;
        let universe = self.universe();
        let selection_initialized = self.selection.initialize_from(universe);

        info!(
            sequence,
            expenses = self.expenses.len(),
            limits = self.limits.len(),
            selection_initialized,
            "dashboard data loaded"
        );
        LoadOutcome::Applied {
            expenses: self.expenses.len(),
            limits: self.limits.len(),
            selection_initialized,
        }
    }

    /// Runs one full fetch cycle. On failure the previous lists stay in place.
    pub async fn refresh(&mut self) -> Result<LoadOutcome> {
        let ticket = self.begin_fetch();
        let store = Arc::clone(&self.store);
        match Self::fetch(&store, ticket).await {
            Ok(snapshot) => Ok(self.apply(snapshot)),
            Err(err) => {
                error!(sequence = ticket.sequence, error = %err, "error fetching dashboard data");
                Err(err)
            }
        }
    }

    /// Loads category, payment-method and payment-owner names. Each list
    /// fails independently and keeps its previous labels when it does.
    pub async fn load_labels(&mut self) {
        let store = Arc::clone(&self.store);
        let (categories, payment_methods, payment_owners) = tokio::join!(
            store.categories(),
            store.payment_methods(),
            store.payment_owners()
        );

        let results = [
            (ReferenceKind::Category, categories),
            (ReferenceKind::PaymentMethod, payment_methods),
            (ReferenceKind::PaymentOwner, payment_owners),
        ];
        for (kind, result) in results {
            match result {
                Ok(entries) => {
                    let map = LabelMap::from_entries(&entries);
                    debug!(%kind, count = map.len(), "labels loaded");
                    *self.labels.for_kind_mut(kind) = map;
                }
                Err(err) => warn!(%kind, error = %err, "error fetching labels"),
            }
        }
    }
}
