use std::{collections::HashMap, sync::Arc};

use cqrs_es::{mem_store::MemStore, AggregateError, CqrsFramework};
use ulid::Ulid;

use super::{
    effects::{NotifyQuery, PrintQuery},
    Command, OrderComposer, OrderViews, Printer, Services,
};
use crate::{errors::Error, notifications::Notifier};

pub type OrderCqrs = CqrsFramework<OrderComposer, MemStore<OrderComposer>>;

/// Wire the order composer: in-memory event store, read model, print and
/// notification side effects.
pub fn init(
    services: Services,
    views: OrderViews,
    prescriber: &str,
    printer: Arc<dyn Printer>,
    notifier: Arc<dyn Notifier>,
) -> Arc<OrderCqrs> {
    let store = MemStore::<OrderComposer>::default();

    let queries: Vec<Box<dyn cqrs_es::Query<OrderComposer>>> = vec![
        Box::new(views),
        Box::new(PrintQuery::new(prescriber, printer)),
        Box::new(NotifyQuery::new(notifier)),
    ];

    Arc::new(CqrsFramework::new(store, queries, services))
}

/// Execute a command tagged with a fresh `command_id`.
pub async fn execute(
    cqrs: &OrderCqrs,
    order_id: &str,
    command: Command,
) -> Result<(), AggregateError<Error>> {
    let mut metadata = HashMap::new();
    metadata.insert("command_id".to_string(), Ulid::new().to_string());

    cqrs.execute_with_metadata(order_id, command, metadata)
        .await
        .inspect_err(|e| tracing::warn!("Order {} command rejected: {}", order_id, e))
}

/// Id for a new order.
pub fn new_order_id() -> String {
    Ulid::new().to_string()
}
