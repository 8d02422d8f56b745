use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use cqrs_es::{Aggregate, EventEnvelope, View as CqrsView};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use super::{OrderComposer, AGGREGATE_TYPE};

#[derive(Clone, Debug, Default, Serialize, Deserialize, Eq, PartialEq)]
pub struct View {
    pub aggregate_type: String,
    pub command_id: String,
    pub id: String,
    /// Sequence number of the last applied event
    pub sequence: usize,
    pub order: OrderComposer,
}

impl CqrsView<OrderComposer> for View {
    fn update(&mut self, event: &EventEnvelope<OrderComposer>) {
        self.id.clone_from(&event.aggregate_id);
        self.aggregate_type = AGGREGATE_TYPE.to_string();
        self.sequence = event.sequence;
        self.command_id = event
            .metadata
            .get("command_id")
            .cloned()
            .unwrap_or_default();
        self.order.apply(event.payload.clone());
    }
}

/// In-memory read model, one [`View`] per order desk session.
#[derive(Clone, Default)]
pub struct OrderViews {
    views: Arc<RwLock<HashMap<String, View>>>,
}

impl OrderViews {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn load(&self, order_id: &str) -> Option<View> {
        self.views.read().await.get(order_id).cloned()
    }

    /// Current composer state, or a fresh one if nothing happened yet.
    pub async fn order(&self, order_id: &str) -> OrderComposer {
        self.load(order_id)
            .await
            .map(|view| view.order)
            .unwrap_or_default()
    }

    /// Forget a finished order.
    pub async fn remove(&self, order_id: &str) -> Option<View> {
        self.views.write().await.remove(order_id)
    }

    /// Number of orders currently tracked.
    pub async fn len(&self) -> usize {
        self.views.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.views.read().await.is_empty()
    }
}

#[async_trait]
impl cqrs_es::Query<OrderComposer> for OrderViews {
    async fn dispatch(&self, order_id: &str, events: &[EventEnvelope<OrderComposer>]) {
        let mut views = self.views.write().await;
        let view = views.entry(order_id.to_string()).or_default();
        for event in events {
            view.update(event);
        }
    }
}
