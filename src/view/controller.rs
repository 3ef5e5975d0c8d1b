//! Content page controllers

use serde::Serialize;
use tokio_util::sync::CancellationToken;

use super::filter::{apply_filter, derive_categories, Filter};
use super::state::ViewState;
use crate::content::Record;
use crate::store::{self, RecordStore, StoreError};

/// How a load ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The read resolved and the controller took the result
    Completed,
    /// The view went away first; the controller was left untouched
    Cancelled,
}

/// Controller for a page section listing one collection
pub struct ListController<T: Record> {
    state: ViewState<Vec<T>>,
    filter: Filter,
    selected: Option<String>,
    cap: Option<usize>,
    ordering: Option<fn(&mut [T])>,
}

impl<T: Record> Default for ListController<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Record> ListController<T> {
    pub fn new() -> Self {
        Self {
            state: ViewState::Loading,
            filter: Filter::All,
            selected: None,
            cap: None,
            ordering: None,
        }
    }

    /// Keep at most `cap` records once the read resolves
    pub fn with_cap(mut self, cap: usize) -> Self {
        self.cap = Some(cap);
        self
    }

    /// Reorder the records before the cap is applied
    pub fn with_ordering(mut self, ordering: fn(&mut [T])) -> Self {
        self.ordering = Some(ordering);
        self
    }

    /// Select a filter. Never touches the record state.
    pub fn select(&mut self, filter: Filter) {
        self.filter = filter;
    }

    /// Select a single record (by `_id`) for an enlarged view
    pub fn select_record(&mut self, id: Option<String>) {
        self.selected = id;
    }

    pub fn state(&self) -> &ViewState<Vec<T>> {
        &self.state
    }

    pub fn filter(&self) -> &Filter {
        &self.filter
    }

    /// Take the result of the collection read.
    ///
    /// Only the first result counts; once resolved the state is final.
    pub fn resolve(&mut self, result: Result<Vec<T>, StoreError>) {
        if !self.state.is_loading() {
            tracing::debug!(
                collection = T::COLLECTION,
                "Ignoring late result for a resolved view"
            );
            return;
        }

        self.state = match result {
            Ok(mut records) => {
                if let Some(ordering) = self.ordering {
                    ordering(&mut records);
                }
                if let Some(cap) = self.cap {
                    records.truncate(cap);
                }
                ViewState::Ready(records)
            }
            Err(e) => {
                tracing::warn!(collection = T::COLLECTION, "Failed to load content: {}", e);
                ViewState::Error(e)
            }
        };
    }

    /// Read the collection unless `cancel` fires first
    pub async fn load(&mut self, store: &dyn RecordStore, cancel: &CancellationToken) -> LoadOutcome {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                tracing::debug!(collection = T::COLLECTION, "Load cancelled");
                LoadOutcome::Cancelled
            }
            result = store::fetch_all::<T>(store) => {
                self.resolve(result);
                LoadOutcome::Completed
            }
        }
    }

    /// Filter taxonomy of the full record set
    pub fn categories(&self) -> Vec<String> {
        match &self.state {
            ViewState::Ready(records) => derive_categories(records),
            _ => derive_categories::<T, _>(std::iter::empty()),
        }
    }

    /// Records passing the selected filter
    pub fn visible(&self) -> Vec<&T> {
        match &self.state {
            ViewState::Ready(records) => apply_filter(records, &self.filter),
            _ => Vec::new(),
        }
    }

    /// The selected record, if it belongs to the loaded set
    pub fn selected_record(&self) -> Option<&T> {
        let id = self.selected.as_deref()?;
        self.state.ready()?.iter().find(|r| r.id() == id)
    }

    /// Snapshot for templates
    pub fn view(&self) -> ListView<'_, T> {
        ListView {
            status: self.state.status(),
            items: self.visible(),
            total: self.state.ready().map_or(0, Vec::len),
            categories: self.categories(),
            selected: self.filter.as_str(),
            error: self.state.error().map(ToString::to_string),
            selected_record: self.selected_record(),
        }
    }
}

/// Template view of a [`ListController`]
#[derive(Debug, Serialize)]
pub struct ListView<'a, T> {
    pub status: &'static str,
    pub items: Vec<&'a T>,
    pub total: usize,
    pub categories: Vec<String>,
    pub selected: &'a str,
    pub error: Option<String>,
    pub selected_record: Option<&'a T>,
}

/// Controller for a page showing one record looked up by id
pub struct DetailController<T: Record> {
    id: String,
    state: ViewState<T>,
}

impl<T: Record> DetailController<T> {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            state: ViewState::Loading,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn state(&self) -> &ViewState<T> {
        &self.state
    }

    /// Take the result of the keyed read.
    ///
    /// A missing record is `NotFound`, as is a record carrying a different
    /// id than the one asked for.
    pub fn resolve(&mut self, result: Result<Option<T>, StoreError>) {
        if !self.state.is_loading() {
            return;
        }

        self.state = match result {
            Ok(Some(record)) if record.id() == self.id => ViewState::Ready(record),
            Ok(Some(record)) => {
                tracing::warn!(
                    collection = T::COLLECTION,
                    requested = %self.id,
                    returned = %record.id(),
                    "Store returned a different record"
                );
                ViewState::NotFound
            }
            Ok(None) => {
                tracing::debug!(collection = T::COLLECTION, id = %self.id, "Record not found");
                ViewState::NotFound
            }
            Err(e) => {
                tracing::warn!(
                    collection = T::COLLECTION,
                    id = %self.id,
                    "Failed to load record: {}",
                    e
                );
                ViewState::Error(e)
            }
        };
    }

    /// Look the record up unless `cancel` fires first
    pub async fn load(&mut self, store: &dyn RecordStore, cancel: &CancellationToken) -> LoadOutcome {
        let id = self.id.clone();
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                tracing::debug!(collection = T::COLLECTION, id = %id, "Lookup cancelled");
                LoadOutcome::Cancelled
            }
            result = store::fetch_by_id::<T>(store, &id) => {
                self.resolve(result);
                LoadOutcome::Completed
            }
        }
    }

    /// Snapshot for templates
    pub fn view(&self) -> DetailView<'_, T> {
        DetailView {
            status: self.state.status(),
            id: &self.id,
            record: self.state.ready(),
            error: self.state.error().map(ToString::to_string),
        }
    }
}

/// Template view of a [`DetailController`]
#[derive(Debug, Serialize)]
pub struct DetailView<'a, T> {
    pub status: &'static str,
    pub id: &'a str,
    pub record: Option<&'a T>,
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{Course, Event, GalleryPhoto};
    use crate::store::MemoryStore;
    use crate::view::sort_events;
    use serde_json::json;
    use std::time::Duration;

    fn course_store() -> MemoryStore {
        MemoryStore::new().with_collection(
            "courses",
            vec![
                json!({"_id": "1", "courseName": "MBA", "programType": "PG"}),
                json!({"_id": "2", "courseName": "BBA", "programType": "UG"}),
            ],
        )
    }

    #[tokio::test]
    async fn test_loading_to_ready() {
        let store = course_store();
        let mut courses = ListController::<Course>::new();
        assert_eq!(courses.state().status(), "loading");
        assert!(courses.visible().is_empty());

        let outcome = courses.load(&store, &CancellationToken::new()).await;
        assert_eq!(outcome, LoadOutcome::Completed);
        assert_eq!(courses.state().status(), "ready");
        assert_eq!(courses.categories(), vec!["All", "PG", "UG"]);
        assert_eq!(courses.visible().len(), 2);
    }

    #[tokio::test]
    async fn test_filter_selected_before_resolve_survives() {
        let store = course_store().with_delay(Duration::from_millis(20));
        let mut courses = ListController::<Course>::new();
        courses.select(Filter::parse(Some("UG")));

        courses.load(&store, &CancellationToken::new()).await;

        assert_eq!(courses.filter(), &Filter::Category("UG".to_string()));
        let visible = courses.visible();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, "2");
    }

    #[tokio::test]
    async fn test_failure_is_error_state() {
        let store = MemoryStore::new().failing("courses");
        let mut courses = ListController::<Course>::new();
        courses.load(&store, &CancellationToken::new()).await;

        let view = courses.view();
        assert_eq!(view.status, "error");
        assert!(view.error.unwrap().contains("offline"));
        assert_eq!(view.categories, vec!["All"]);
        assert!(view.items.is_empty());
    }

    #[tokio::test]
    async fn test_cancelled_load_leaves_state_alone() {
        let store = course_store().with_delay(Duration::from_secs(5));
        let cancel = CancellationToken::new();
        let mut courses = ListController::<Course>::new();

        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(10)).await;
            trigger.cancel();
        });

        let outcome = courses.load(&store, &cancel).await;
        assert_eq!(outcome, LoadOutcome::Cancelled);
        assert!(courses.state().is_loading());
    }

    #[tokio::test]
    async fn test_already_cancelled_skips_read() {
        let store = course_store();
        let cancel = CancellationToken::new();
        cancel.cancel();

        let mut courses = ListController::<Course>::new();
        assert_eq!(courses.load(&store, &cancel).await, LoadOutcome::Cancelled);
        assert!(courses.state().is_loading());
    }

    #[test]
    fn test_ready_is_final() {
        let mut courses = ListController::<Course>::new();
        courses.resolve(Ok(Vec::new()));
        courses.resolve(Err(StoreError::Unavailable("late".into())));
        assert_eq!(courses.state().status(), "ready");
    }

    #[test]
    fn test_ordering_then_cap() {
        let events: Vec<Event> = serde_json::from_value(json!([
            {"_id": "a", "date": "2022-01-01"},
            {"_id": "b", "date": "2024-01-01"},
            {"_id": "c", "date": "2023-01-01"},
            {"_id": "d", "date": "2021-01-01"},
        ]))
        .unwrap();

        let mut controller = ListController::<Event>::new()
            .with_ordering(sort_events)
            .with_cap(2);
        controller.resolve(Ok(events));

        let ids: Vec<_> = controller.visible().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "c"]);
    }

    #[test]
    fn test_selected_record_must_be_loaded() {
        let photos: Vec<GalleryPhoto> =
            serde_json::from_value(json!([{"_id": "g1", "title": "Library"}])).unwrap();

        let mut gallery = ListController::<GalleryPhoto>::new();
        gallery.select_record(Some("g1".to_string()));
        assert!(gallery.selected_record().is_none());

        gallery.resolve(Ok(photos));
        assert_eq!(gallery.selected_record().unwrap().id, "g1");

        gallery.select_record(Some("missing".to_string()));
        assert!(gallery.selected_record().is_none());
    }

    #[tokio::test]
    async fn test_detail_lookup() {
        let store = course_store();

        let mut found = DetailController::<Course>::new("2");
        found.load(&store, &CancellationToken::new()).await;
        assert_eq!(found.state().ready().unwrap().id, "2");

        let mut missing = DetailController::<Course>::new("999");
        missing.load(&store, &CancellationToken::new()).await;
        assert_eq!(missing.state().status(), "not_found");
        assert!(missing.view().record.is_none());
    }

    #[test]
    fn test_detail_rejects_mismatched_id() {
        let course: Course = serde_json::from_value(json!({"_id": "7"})).unwrap();
        let mut detail = DetailController::<Course>::new("8");
        detail.resolve(Ok(Some(course)));
        assert_eq!(detail.state().status(), "not_found");
    }

    #[tokio::test]
    async fn test_detail_failure_is_error() {
        let store = MemoryStore::new().failing("courses");
        let mut detail = DetailController::<Course>::new("1");
        detail.load(&store, &CancellationToken::new()).await;
        assert!(detail.state().error().is_some());
    }
}
