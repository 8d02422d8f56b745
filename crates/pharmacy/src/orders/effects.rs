use std::sync::Arc;

use async_trait::async_trait;
use cqrs_es::EventEnvelope;

use super::{Event, OrderComposer, OrderSheet, Printer};
use crate::notifications::{Notification, Notifier};

/// Renders an [`OrderSheet`] for every printed order.
///
/// Runs once per committed `OrderPrinted` event, so a print is never repeated.
pub struct PrintQuery {
    prescriber: String,
    printer: Arc<dyn Printer>,
}

impl PrintQuery {
    pub fn new(prescriber: impl Into<String>, printer: Arc<dyn Printer>) -> Self {
        Self {
            prescriber: prescriber.into(),
            printer,
        }
    }
}

#[async_trait]
impl cqrs_es::Query<OrderComposer> for PrintQuery {
    async fn dispatch(&self, order_id: &str, events: &[EventEnvelope<OrderComposer>]) {
        for event in events {
            if let Event::OrderPrinted { items, printed_at } = &event.payload {
                tracing::info!("Printing order {} with {} lines", order_id, items.len());
                let sheet = OrderSheet::new(&self.prescriber, items.clone(), *printed_at);
                self.printer.print(&sheet);
            }
        }
    }
}

/// Success feedback for completed order actions.
pub struct NotifyQuery {
    notifier: Arc<dyn Notifier>,
}

impl NotifyQuery {
    pub fn new(notifier: Arc<dyn Notifier>) -> Self {
        Self { notifier }
    }
}

fn notification_for(event: &Event) -> Option<Notification> {
    match event {
        Event::LineAdded { .. } => Some(Notification::success("Medicine added successfully")),
        Event::OrderSaved { .. } => Some(Notification::success("Order Saved Successfully")),
        Event::OrderPrinted { .. } => {
            Some(Notification::info("Order printed, ready for new order"))
        }
    }
}

#[async_trait]
impl cqrs_es::Query<OrderComposer> for NotifyQuery {
    async fn dispatch(&self, _order_id: &str, events: &[EventEnvelope<OrderComposer>]) {
        events
            .iter()
            .filter_map(|event| notification_for(&event.payload))
            .for_each(|notification| self.notifier.notify(notification));
    }
}
