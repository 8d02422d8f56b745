use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use cqrs_es::Aggregate;
use derive_new::new;
use serde::{Deserialize, Serialize};

use crate::{backend::OrderBackend, errors::Error};

use super::{Command, Event};

/// One (medicine, quantity) pair of an order
#[derive(Clone, Debug, Serialize, Deserialize, Eq, PartialEq, new)]
pub struct OrderLineItem {
    #[new(into)]
    pub name: String,
    pub quantity: u32,
}

/// In-progress line item, as entered in the order form
#[derive(Clone, Debug, Serialize, Deserialize, Eq, PartialEq, new)]
pub struct SelectionDraft {
    /// Empty when nothing is selected
    #[new(into)]
    pub selected_medicine: String,
    pub quantity: i64,
}

impl Default for SelectionDraft {
    fn default() -> Self {
        Self {
            selected_medicine: String::new(),
            quantity: 1,
        }
    }
}

impl SelectionDraft {
    pub fn has_selection(&self) -> bool {
        !self.selected_medicine.trim().is_empty()
    }

    /// Quantity to commit; anything below 1 falls back to 1.
    pub fn line_quantity(&self) -> u32 {
        u32::try_from(self.quantity)
            .ok()
            .filter(|q| *q >= 1)
            .unwrap_or(1)
    }

    pub fn to_line_item(&self) -> OrderLineItem {
        OrderLineItem::new(self.selected_medicine.trim(), self.line_quantity())
    }
}

/// Order workflow status
#[derive(Clone, Copy, Debug, Serialize, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// No line items yet
    Empty,
    /// Line items added since the last save
    Building,
    /// Persisted and ready to print
    Ready,
}

/// Order composer aggregate: the pending order and its saved flag
#[derive(Clone, Debug, Default, Serialize, Deserialize, Eq, PartialEq)]
pub struct OrderComposer {
    pub items: Vec<OrderLineItem>,
    pub saved: bool,
    pub printed_orders: u32,
}

pub const AGGREGATE_TYPE: &str = "Order";

/// Collaborators available while handling commands
#[derive(Clone)]
pub struct Services {
    pub orders: Arc<dyn OrderBackend>,
}

impl Services {
    pub fn new(orders: Arc<dyn OrderBackend>) -> Self {
        Self { orders }
    }
}

#[async_trait]
impl Aggregate for OrderComposer {
    type Command = Command;
    type Event = Event;
    type Error = Error;
    type Services = Services;

    fn aggregate_type() -> String {
        AGGREGATE_TYPE.to_string()
    }

    async fn handle(
        &self,
        command: Self::Command,
        services: &Self::Services,
    ) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            Command::AddLine { draft } => {
                validate_selection(&draft)?;

                Ok(vec![Event::LineAdded {
                    item: draft.to_line_item(),
                    updated_at: Utc::now(),
                }])
            }

            Command::SaveOrder => {
                self.validate_not_empty()?;

                services
                    .orders
                    .persist_order(&self.items)
                    .await
                    .map_err(|e| {
                        tracing::error!("Failed to persist order: {}", e);
                        Error::from(e)
                    })?;

                Ok(vec![Event::OrderSaved {
                    items: self.items.clone(),
                    saved_at: Utc::now(),
                }])
            }

            Command::PrintOrder => {
                self.validate_not_empty()?;
                self.validate_saved()?;

                Ok(vec![Event::OrderPrinted {
                    items: self.items.clone(),
                    printed_at: Utc::now(),
                }])
            }
        }
    }

    fn apply(&mut self, event: Self::Event) {
        match event {
            Event::LineAdded { item, .. } => {
                self.items.push(item);
                self.saved = false;
            }

            // A line committed while the save was in flight keeps the order unsaved.
            Event::OrderSaved { items, .. } => {
                self.saved = items == self.items;
            }

            Event::OrderPrinted { .. } => {
                self.items.clear();
                self.saved = false;
                self.printed_orders += 1;
            }
        }
    }
}

impl OrderComposer {
    pub fn status(&self) -> OrderStatus {
        match (self.items.is_empty(), self.saved) {
            (true, _) => OrderStatus::Empty,
            (false, false) => OrderStatus::Building,
            (false, true) => OrderStatus::Ready,
        }
    }

    fn validate_not_empty(&self) -> Result<(), Error> {
        if self.items.is_empty() {
            return Err(Error::validation("empty order"));
        }
        Ok(())
    }

    fn validate_saved(&self) -> Result<(), Error> {
        if !self.saved {
            return Err(Error::validation("must save before print"));
        }
        Ok(())
    }
}

fn validate_selection(draft: &SelectionDraft) -> Result<(), Error> {
    if !draft.has_selection() {
        return Err(Error::validation("no medicine selected"));
    }
    Ok(())
}
