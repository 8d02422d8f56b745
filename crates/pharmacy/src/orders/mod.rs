/// Order composer aggregate
pub mod aggregate;

/// Commands
pub mod commands;

/// Events
pub mod events;

/// Input DTOs
pub mod inputs;

/// View (read model)
pub mod view;

/// Printable order sheet
pub mod sheet;

/// Side-effect queries (print, notifications)
pub mod effects;

/// CQRS setup
pub mod cqrs;

/// Order desk state container
pub mod desk;

pub use aggregate::{
    OrderComposer, OrderLineItem, OrderStatus, SelectionDraft, Services, AGGREGATE_TYPE,
};
pub use commands::Command;
pub use desk::OrderDesk;
pub use events::Event;
pub use sheet::{OrderSheet, Printer};
pub use view::{OrderViews, View};
