use chrono::SecondsFormat;
use serde_json::Value;

use crate::domain::entities::filter::{Filter, FilterValue};
use crate::domain::entities::page::{PageSpec, PaginationType, SortSpec, DEFAULT_PAGE_SIZE};
use crate::usecase::ports::guards::{CancelDialog, DirtyOperations};

/// The filter params bound to the search widgets (`draft`) and the ones the
/// last query actually ran with (`active`). Live edits never touch `active`;
/// only an explicit commit does.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterPair {
    pub draft: Filter,
    active: Filter,
}

impl FilterPair {
    pub fn new() -> Self {
        FilterPair::default()
    }

    pub fn active(&self) -> &Filter {
        &self.active
    }

    /// Copies every draft key into the active params. Keys set by earlier
    /// commits and untouched since survive the merge.
    pub fn set_active_filter(&mut self) {
        for (key, value) in &self.draft {
            self.active.insert(key.clone(), value.clone());
        }
    }

    /// Inverse copy: the widgets go back to showing the last committed
    /// query, so a page or sort change does not silently alter the filter.
    pub fn reset_filters(&mut self) {
        self.draft = self.active.clone();
    }

    /// Replaces the draft with the filter the server echoed back. Only
    /// scalar and list values are taken over; nulls stay absent.
    pub fn absorb_echo(&mut self, echo: &Value) {
        let Some(fields) = echo.as_object() else {
            return;
        };
        for (key, value) in fields {
            let absorbed = match value {
                Value::String(text) => Some(FilterValue::Text(text.clone())),
                Value::Bool(flag) => Some(FilterValue::Flag(*flag)),
                Value::Number(number) => Some(FilterValue::Text(number.to_string())),
                Value::Array(items) => Some(FilterValue::List(
                    items
                        .iter()
                        .filter_map(|item| item.as_str().map(str::to_string))
                        .collect(),
                )),
                Value::Null | Value::Object(_) => None,
            };
            if let Some(absorbed) = absorbed {
                self.draft.insert(key.clone(), absorbed);
            }
        }
    }

    /// Deterministic serialization of the active filter. Instants become
    /// ISO-8601, lists become repeated name/value pairs, everything else is
    /// coerced to a string. Empty values are omitted entirely: an omitted
    /// filter means "no constraint" on the server side.
    pub fn build_query_parameters(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();
        for (key, value) in &self.active {
            if value.is_empty() {
                continue;
            }
            match value {
                FilterValue::Text(text) => params.push((key.clone(), text.clone())),
                FilterValue::Flag(flag) => params.push((key.clone(), flag.to_string())),
                FilterValue::Instant(instant) => params.push((
                    key.clone(),
                    instant.to_rfc3339_opts(SecondsFormat::Millis, true),
                )),
                FilterValue::List(values) => {
                    for item in values {
                        params.push((key.clone(), item.clone()));
                    }
                }
            }
        }
        params
    }
}

/// Outcome of a requested page change. A rejected change carries the offset
/// the grid must snap back to, so an optimistic widget move gets reverted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageOutcome {
    Applied,
    Rejected { revert_to: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageState {
    pub kind: PaginationType,
    pub spec: PageSpec,
}

impl PageState {
    pub fn server() -> Self {
        PageState {
            kind: PaginationType::Server,
            spec: PageSpec::default(),
        }
    }

    pub fn client() -> Self {
        PageState {
            kind: PaginationType::Client,
            spec: PageSpec::default(),
        }
    }

    pub fn offset(&self) -> usize {
        self.spec.offset
    }

    pub fn page_size(&self) -> usize {
        self.spec.page_size
    }

    pub fn reset_offset(&mut self) {
        self.spec.offset = 0;
    }

    /// Applies a page change only when `can_proceed` allows it; otherwise
    /// nothing is mutated and the caller is told where to revert the view.
    pub fn on_page(
        &mut self,
        requested: usize,
        dirty: Option<&dyn DirtyOperations>,
        dialogs: &dyn CancelDialog,
    ) -> PageOutcome {
        if self.can_proceed(dirty, dialogs) {
            self.spec.offset = requested;
            PageOutcome::Applied
        } else {
            PageOutcome::Rejected {
                revert_to: self.spec.offset,
            }
        }
    }

    /// Server-paged screens lose pending edits on reload, so a dirty screen
    /// must get the user's consent first. Client paging only re-slices the
    /// local rows and always proceeds.
    pub fn can_proceed(
        &self,
        dirty: Option<&dyn DirtyOperations>,
        dialogs: &dyn CancelDialog,
    ) -> bool {
        match (self.kind, dirty) {
            (PaginationType::Server, Some(ops)) if ops.is_dirty() => dialogs.confirm_discard(),
            _ => true,
        }
    }

    /// Returns false (and leaves the state alone) for a zero size.
    pub fn change_page_size(&mut self, new_size: usize) -> bool {
        if new_size == 0 {
            return false;
        }
        self.spec.offset = 0;
        self.spec.page_size = new_size;
        true
    }

    /// Client-side slice of the current page. An offset past the end yields
    /// an empty slice; a short last page yields the remaining rows.
    pub fn slice<'a, T>(&self, rows: &'a [T]) -> &'a [T] {
        let start = self.spec.offset.saturating_mul(self.spec.page_size).min(rows.len());
        let end = start.saturating_add(self.spec.page_size).min(rows.len());
        &rows[start..end]
    }

    /// Page containing the last row of a client-paged row set. A count that
    /// is an exact multiple of the page size still maps to the page holding
    /// that row, not the empty page after it.
    pub fn last_page(&self, row_count: usize) -> usize {
        row_count.saturating_sub(1) / self.spec.page_size
    }

    pub fn query_parameters(&self) -> Vec<(String, String)> {
        vec![
            ("page".to_string(), self.spec.offset.to_string()),
            ("pageSize".to_string(), self.spec.page_size.to_string()),
        ]
    }
}

impl Default for PageState {
    fn default() -> Self {
        PageState {
            kind: PaginationType::Server,
            spec: PageSpec {
                offset: 0,
                page_size: DEFAULT_PAGE_SIZE,
            },
        }
    }
}

/// Single-column sort; a new sort request discards the previous one. Column
/// names are passed through to the backend uninterpreted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SortState {
    pub spec: Option<SortSpec>,
}

impl SortState {
    pub fn new() -> Self {
        SortState::default()
    }

    /// The grid reports the raw direction string; anything but "desc" sorts
    /// ascending. The owning screen triggers its reload after this returns.
    pub fn on_sort(&mut self, column: &str, direction: &str) {
        self.spec = Some(SortSpec {
            column: column.to_string(),
            ascending: direction != "desc",
        });
    }

    pub fn query_parameters(&self) -> Vec<(String, String)> {
        match &self.spec {
            Some(spec) => vec![
                ("orderBy".to_string(), spec.column.clone()),
                ("asc".to_string(), spec.ascending.to_string()),
            ],
            None => Vec::new(),
        }
    }
}
