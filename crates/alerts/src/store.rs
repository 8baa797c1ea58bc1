use std::collections::BTreeMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::info;

use common::{Alert, UserId};

/// In-memory alerts keyed by user. Cheap to clone; every clone shares the
/// same map.
///
/// Append-only: alerts live until the process exits. Each user's alerts keep
/// insertion order and may contain duplicates.
#[derive(Debug, Clone, Default)]
pub struct AlertStore {
    inner: Arc<RwLock<BTreeMap<UserId, Vec<Alert>>>>,
}

impl AlertStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `alert` to the user's list. No validation happens here.
    /// Returns how many alerts the user now has.
    pub async fn register(&self, user_id: UserId, alert: Alert) -> usize {
        let mut map = self.inner.write().await;
        let alerts = map.entry(user_id).or_default();
        info!(user_id, alert = %alert, "Alert registered");
        alerts.push(alert);
        alerts.len()
    }

    /// Copy of every `(user, alert)` pair: users by ascending id, each
    /// user's alerts in insertion order. The lock is released before this
    /// returns, so callers may await freely while iterating.
    pub async fn all_entries(&self) -> Vec<(UserId, Alert)> {
        let map = self.inner.read().await;
        map.iter()
            .flat_map(|(&user_id, alerts)| alerts.iter().map(move |a| (user_id, a.clone())))
            .collect()
    }

    pub async fn alerts_for(&self, user_id: UserId) -> Vec<Alert> {
        self.inner
            .read()
            .await
            .get(&user_id)
            .cloned()
            .unwrap_or_default()
    }

    /// Total number of alerts across all users.
    pub async fn len(&self) -> usize {
        self.inner.read().await.values().map(Vec::len).sum()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::Comparator;

    fn btc_below(threshold: f64) -> Alert {
        Alert::new("BTC", Comparator::Below, threshold)
    }

    #[tokio::test]
    async fn register_appends_to_the_right_user() {
        let store = AlertStore::new();
        assert!(store.is_empty().await);

        assert_eq!(store.register(7, btc_below(1.0)).await, 1);
        assert_eq!(store.register(7, btc_below(2.0)).await, 2);
        assert_eq!(store.register(3, btc_below(3.0)).await, 1);

        assert_eq!(store.alerts_for(7).await, vec![btc_below(1.0), btc_below(2.0)]);
        assert_eq!(store.alerts_for(3).await, vec![btc_below(3.0)]);
        assert!(store.alerts_for(99).await.is_empty());
        assert_eq!(store.len().await, 3);
    }

    #[tokio::test]
    async fn duplicates_are_kept() {
        let store = AlertStore::new();
        store.register(1, btc_below(5.0)).await;
        store.register(1, btc_below(5.0)).await;
        assert_eq!(store.alerts_for(1).await.len(), 2);
    }

    #[tokio::test]
    async fn all_entries_orders_by_user_then_insertion() {
        let store = AlertStore::new();
        store.register(20, btc_below(1.0)).await;
        store.register(10, btc_below(2.0)).await;
        store.register(20, btc_below(3.0)).await;

        let entries = store.all_entries().await;
        assert_eq!(
            entries,
            vec![(10, btc_below(2.0)), (20, btc_below(1.0)), (20, btc_below(3.0))]
        );
    }

    #[tokio::test]
    async fn clones_share_state() {
        let store = AlertStore::new();
        let handle = store.clone();
        handle.register(1, btc_below(1.0)).await;
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn enumeration_is_a_snapshot() {
        let store = AlertStore::new();
        store.register(1, btc_below(1.0)).await;
        let entries = store.all_entries().await;
        store.register(1, btc_below(2.0)).await;
        assert_eq!(entries.len(), 1);
        assert_eq!(store.all_entries().await.len(), 2);
    }
}
