use std::sync::Arc;

use tokio::sync::Mutex;

/// Row held in a repository collection.
pub trait Record {
    fn id(&self) -> &str;
}

impl Record for api_types::earning::Earning {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for api_types::budget::Budget {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for api_types::category::Category {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for api_types::transaction::Transaction {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Record for api_types::user::User {
    fn id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug)]
struct StoreInner<T> {
    items: Vec<T>,
    version: u64,
    in_flight: u32,
    error: Option<String>,
    success_message: Option<String>,
}

/// Ordered in-memory mirror of one server collection, shared between
/// cloned repository handles.
///
/// `version` increments on every local change. A wholesale replace from
/// a list fetch only lands if the version it started from is still
/// current; a mutation that completed mid-flight makes the fetched rows
/// stale and the replace is skipped. Mutations themselves always apply.
#[derive(Debug)]
pub struct Store<T> {
    inner: Arc<Mutex<StoreInner<T>>>,
}

impl<T> Clone for Store<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> Default for Store<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Store<T> {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(StoreInner {
                items: Vec::new(),
                version: 0,
                in_flight: 0,
                error: None,
                success_message: None,
            })),
        }
    }

    pub async fn version(&self) -> u64 {
        self.inner.lock().await.version
    }

    /// True while at least one operation is between `begin` and settle.
    pub async fn loading(&self) -> bool {
        self.inner.lock().await.in_flight > 0
    }

    pub async fn error(&self) -> Option<String> {
        self.inner.lock().await.error.clone()
    }

    pub async fn success_message(&self) -> Option<String> {
        self.inner.lock().await.success_message.clone()
    }

    /// Records a failure that never reached the network. Leaves
    /// `in_flight` alone; nothing started.
    pub(crate) async fn fail_precondition(&self, message: &str) {
        let mut guard = self.inner.lock().await;
        guard.error = Some(message.to_string());
    }

    /// Starts an operation: bumps `in_flight`, clears the previous
    /// outcome pair, and returns the version the caller observed.
    pub(crate) async fn begin(&self) -> u64 {
        let mut guard = self.inner.lock().await;
        guard.in_flight += 1;
        guard.error = None;
        guard.success_message = None;
        guard.version
    }

    pub(crate) async fn finish_ok(&self, message: Option<&str>) {
        let mut guard = self.inner.lock().await;
        guard.in_flight = guard.in_flight.saturating_sub(1);
        guard.success_message = message.map(str::to_string);
    }

    pub(crate) async fn finish_err(&self, message: String) {
        let mut guard = self.inner.lock().await;
        guard.in_flight = guard.in_flight.saturating_sub(1);
        guard.error = Some(message);
    }

    /// Replaces the whole collection unless it moved past `started_at`
    /// while the fetch was in flight. Returns whether the rows landed.
    pub(crate) async fn replace_all(&self, started_at: u64, items: Vec<T>) -> bool {
        let mut guard = self.inner.lock().await;
        if guard.version != started_at {
            tracing::debug!(
                started_at,
                current = guard.version,
                "list result stale, keeping local collection"
            );
            return false;
        }
        guard.items = items;
        guard.version += 1;
        true
    }

    pub(crate) async fn append(&self, item: T) {
        let mut guard = self.inner.lock().await;
        guard.items.push(item);
        guard.version += 1;
    }
}

impl<T: Clone> Store<T> {
    pub async fn snapshot(&self) -> Vec<T> {
        self.inner.lock().await.items.clone()
    }
}

impl<T: Record> Store<T> {
    pub(crate) async fn remove_by_id(&self, id: &str) {
        let mut guard = self.inner.lock().await;
        guard.items.retain(|item| item.id() != id);
        guard.version += 1;
    }

    /// Shallow in-place edit of the matching row. No-op when the id is
    /// not cached; the next list fetch will bring the row in.
    pub(crate) async fn update_by_id(&self, id: &str, patch: impl FnOnce(&mut T)) {
        let mut guard = self.inner.lock().await;
        if let Some(item) = guard.items.iter_mut().find(|item| item.id() == id) {
            patch(item);
        }
        guard.version += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq, Eq)]
    struct Row {
        id: String,
        value: i64,
    }

    impl Record for Row {
        fn id(&self) -> &str {
            &self.id
        }
    }

    fn row(id: &str, value: i64) -> Row {
        Row {
            id: id.to_string(),
            value,
        }
    }

    #[tokio::test]
    async fn begin_clears_the_previous_outcome() {
        let store: Store<Row> = Store::new();
        store.fail_precondition("No token provided").await;
        assert_eq!(store.error().await.as_deref(), Some("No token provided"));

        store.begin().await;
        assert!(store.error().await.is_none());
        assert!(store.loading().await);

        store.finish_ok(Some("done")).await;
        assert!(!store.loading().await);
        assert_eq!(store.success_message().await.as_deref(), Some("done"));
    }

    #[tokio::test]
    async fn stale_list_results_are_dropped() {
        let store: Store<Row> = Store::new();

        let started = store.begin().await;
        // A create lands while the list call is still in flight.
        store.append(row("a", 1)).await;

        let landed = store.replace_all(started, vec![row("b", 2)]).await;
        assert!(!landed);
        assert_eq!(store.snapshot().await, vec![row("a", 1)]);

        // A fresh fetch that observed the newer version does land.
        let started = store.begin().await;
        let landed = store.replace_all(started, vec![row("b", 2)]).await;
        assert!(landed);
        assert_eq!(store.snapshot().await, vec![row("b", 2)]);
    }

    #[tokio::test]
    async fn mutations_always_apply() {
        let store: Store<Row> = Store::new();
        store.append(row("a", 1)).await;
        store.append(row("b", 2)).await;

        store.update_by_id("a", |item| item.value = 10).await;
        store.remove_by_id("b").await;

        assert_eq!(store.snapshot().await, vec![row("a", 10)]);
        assert_eq!(store.version().await, 4);
    }

    #[tokio::test]
    async fn concurrent_ops_keep_loading_until_both_settle() {
        let store: Store<Row> = Store::new();
        store.begin().await;
        store.begin().await;

        store.finish_err("boom".to_string()).await;
        assert!(store.loading().await);

        store.finish_ok(None).await;
        assert!(!store.loading().await);
    }
}
