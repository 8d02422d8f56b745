use chrono::{DateTime, Utc};
use cqrs_es::DomainEvent;
use serde::{Deserialize, Serialize};

use super::aggregate::OrderLineItem;

#[derive(Clone, Debug, Serialize, Deserialize, Eq, PartialEq)]
#[serde(tag = "type")]
pub enum Event {
    LineAdded {
        item: OrderLineItem,
        updated_at: DateTime<Utc>,
    },

    OrderSaved {
        items: Vec<OrderLineItem>,
        saved_at: DateTime<Utc>,
    },

    OrderPrinted {
        items: Vec<OrderLineItem>,
        printed_at: DateTime<Utc>,
    },
}

impl DomainEvent for Event {
    fn event_type(&self) -> String {
        match self {
            Event::LineAdded { .. } => "Order:LineAdded".to_string(),
            Event::OrderSaved { .. } => "Order:Saved".to_string(),
            Event::OrderPrinted { .. } => "Order:Printed".to_string(),
        }
    }

    fn event_version(&self) -> String {
        "1.0".to_string()
    }
}
