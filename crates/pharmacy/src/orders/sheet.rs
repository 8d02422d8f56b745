use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::OrderLineItem;

pub const NAME_COLUMN: &str = "Medicine Name";
pub const QUANTITY_COLUMN: &str = "Quantity";

/// A printed order: fixed header line plus rows in insertion order.
#[derive(Clone, Debug, Serialize, Deserialize, Eq, PartialEq)]
pub struct OrderSheet {
    pub header: String,
    pub rows: Vec<OrderLineItem>,
    pub printed_at: DateTime<Utc>,
}

impl OrderSheet {
    pub fn new(prescriber: &str, rows: Vec<OrderLineItem>, printed_at: DateTime<Utc>) -> Self {
        Self {
            header: header_line(prescriber),
            rows,
            printed_at,
        }
    }

    /// `(name, quantity)` pairs, as printed.
    pub fn row_pairs(&self) -> Vec<(&str, u32)> {
        self.rows
            .iter()
            .map(|row| (row.name.as_str(), row.quantity))
            .collect()
    }

    /// Plain-text table, suitable for a line printer or the log.
    pub fn render_text(&self) -> String {
        let name_width = self
            .rows
            .iter()
            .map(|row| row.name.chars().count())
            .chain(std::iter::once(NAME_COLUMN.len()))
            .max()
            .unwrap_or(NAME_COLUMN.len());
        let qty_width = self
            .rows
            .iter()
            .map(|row| row.quantity.to_string().len())
            .chain(std::iter::once(QUANTITY_COLUMN.len()))
            .max()
            .unwrap_or(QUANTITY_COLUMN.len());

        let rule = format!("+-{}-+-{}-+", "-".repeat(name_width), "-".repeat(qty_width));
        let mut out = Vec::with_capacity(self.rows.len() + 5);
        out.push(self.header.clone());
        out.push(rule.clone());
        out.push(format!(
            "| {:<nw$} | {:<qw$} |",
            NAME_COLUMN,
            QUANTITY_COLUMN,
            nw = name_width,
            qw = qty_width
        ));
        out.push(rule.clone());
        for row in &self.rows {
            out.push(format!(
                "| {:<nw$} | {:>qw$} |",
                row.name,
                row.quantity,
                nw = name_width,
                qw = qty_width
            ));
        }
        out.push(rule);
        out.join("\n")
    }
}

pub fn header_line(prescriber: &str) -> String {
    format!("Medicine Order by : {}", prescriber)
}

/// Destination for printed order sheets.
pub trait Printer: Send + Sync {
    fn print(&self, sheet: &OrderSheet);
}

/// Keeps printed sheets in memory; the desk shows the latest as a printable page.
#[derive(Clone, Default)]
pub struct SheetSpool {
    sheets: Arc<Mutex<Vec<OrderSheet>>>,
}

impl SheetSpool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn latest(&self) -> Option<OrderSheet> {
        match self.sheets.lock() {
            Ok(sheets) => sheets.last().cloned(),
            Err(poisoned) => poisoned.into_inner().last().cloned(),
        }
    }

    pub fn printed(&self) -> Vec<OrderSheet> {
        match self.sheets.lock() {
            Ok(sheets) => sheets.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl Printer for SheetSpool {
    fn print(&self, sheet: &OrderSheet) {
        tracing::info!("Printing order sheet\n{}", sheet.render_text());
        match self.sheets.lock() {
            Ok(mut sheets) => sheets.push(sheet.clone()),
            Err(poisoned) => poisoned.into_inner().push(sheet.clone()),
        }
    }
}
