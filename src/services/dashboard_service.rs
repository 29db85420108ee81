use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::models::candidate::{CandidateRecord, CandidateSummary, OCCUPATION_STATUSES};
use crate::services::debounce::{Debouncer, PendingToken};
use crate::services::query_service::{FilterOptions, FilterSpec, PageResult, QueryService, QueryState};

pub const NAME_FILTER_MESSAGE: &str = "Filter by name through the search box.";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total: usize,
    pub by_status: BTreeMap<String, usize>,
    pub resumes_uploaded: usize,
    pub id_proofs_uploaded: usize,
}

impl DashboardStats {
    /// Counts over the full candidate set, independent of any filter.
    pub fn from_records(candidates: &[CandidateRecord]) -> Self {
        let mut by_status: BTreeMap<String, usize> = OCCUPATION_STATUSES
            .iter()
            .map(|s| (s.to_string(), 0))
            .collect();
        for c in candidates {
            *by_status.entry(c.occupation_status.clone()).or_insert(0) += 1;
        }

        Self {
            total: candidates.len(),
            by_status,
            resumes_uploaded: candidates.iter().filter(|c| c.resume.is_some()).count(),
            id_proofs_uploaded: candidates.iter().filter(|c| c.id_proof.is_some()).count(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    pub page: PageResult<CandidateSummary>,
    pub filters: FilterSpec,
    pub filter_options: FilterOptions,
    pub stats: DashboardStats,
    pub search_input: String,
    pub search_pending: bool,
}

struct ViewState {
    query: QueryState,
    search_input: String,
    /// Bumped by every keystroke and by `clear`; a commit from an older
    /// generation is discarded.
    search_generation: u64,
}

fn commit_search(state: &Mutex<ViewState>, generation: u64, term: Option<String>) {
    let mut state = lock(state);
    if state.search_generation != generation {
        tracing::trace!(generation, "Stale search commit dropped");
        return;
    }
    tracing::debug!(term = ?term, "Search term committed");
    state.query.apply_search(term);
}

/// One admin's list screen: filters, search box and page position.
pub struct DashboardView {
    state: Arc<Mutex<ViewState>>,
    search: Debouncer<(u64, Option<String>)>,
}

fn lock(state: &Mutex<ViewState>) -> MutexGuard<'_, ViewState> {
    state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl DashboardView {
    pub fn new(page_size: usize, debounce: Duration) -> Self {
        let state = Arc::new(Mutex::new(ViewState {
            query: QueryState::new(page_size),
            search_input: String::new(),
            search_generation: 0,
        }));

        let target = Arc::clone(&state);
        let search = Debouncer::new(debounce, move |(generation, term): (u64, Option<String>)| {
            commit_search(&target, generation, term);
        });

        Self { state, search }
    }

    /// The name filter belongs to the search box and cannot be set here.
    pub fn set_filters(&self, filters: FilterSpec) -> Result<()> {
        if filters.name.is_some() {
            return Err(Error::BadRequest(NAME_FILTER_MESSAGE.to_string()));
        }
        lock(&self.state).query.apply_filter(filters);
        Ok(())
    }

    /// Records the raw box contents now; the name filter follows once typing pauses.
    pub fn type_search(&self, input: String) -> PendingToken {
        let term = Some(input.trim().to_string()).filter(|t| !t.is_empty());
        let mut state = lock(&self.state);
        state.search_input = input;
        state.search_generation += 1;
        self.search.submit((state.search_generation, term))
    }

    pub fn set_page(&self, page: usize, page_size: Option<usize>) {
        let mut state = lock(&self.state);
        if let Some(size) = page_size {
            state.query.set_page_size(size);
        }
        state.query.set_page(page);
    }

    pub fn clear(&self) {
        self.search.cancel();
        let mut state = lock(&self.state);
        state.search_generation += 1;
        state.query.clear();
        state.search_input.clear();
    }

    pub fn snapshot(&self, candidates: &[CandidateRecord]) -> DashboardSnapshot {
        let state = lock(&self.state);
        DashboardSnapshot {
            page: state.query.run(candidates).map(|c| CandidateSummary::from(&c)),
            filters: state.query.filter.clone(),
            filter_options: QueryService::derive_filter_options(candidates),
            stats: DashboardStats::from_records(candidates),
            search_input: state.search_input.clone(),
            search_pending: self.search.pending().is_some(),
        }
    }
}

/// Dashboard views keyed by admin session token.
#[derive(Clone)]
pub struct DashboardService {
    views: Arc<Mutex<HashMap<String, Arc<DashboardView>>>>,
    page_size: usize,
    debounce: Duration,
}

impl DashboardService {
    pub fn new(page_size: usize, debounce: Duration) -> Self {
        Self {
            views: Arc::new(Mutex::new(HashMap::new())),
            page_size,
            debounce,
        }
    }

    pub fn view(&self, session: &str) -> Result<Arc<DashboardView>> {
        let mut views = self.views.lock()?;
        let view = views
            .entry(session.to_string())
            .or_insert_with(|| Arc::new(DashboardView::new(self.page_size, self.debounce)));
        Ok(Arc::clone(view))
    }

    pub fn close(&self, session: &str) -> Result<()> {
        if let Some(view) = self.views.lock()?.remove(session) {
            view.clear();
        }
        Ok(())
    }
}
