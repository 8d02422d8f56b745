//! HTML rendering for the order desk page and the printable sheet.

use std::fmt::Write;

use pharmacy::{
    catalog::CatalogSnapshot,
    orders::{
        sheet::{header_line, NAME_COLUMN, QUANTITY_COLUMN},
        OrderComposer, OrderLineItem, OrderSheet, OrderStatus, SelectionDraft,
    },
    Notification, NotificationLevel,
};

const STYLE: &str = "body{font-family:sans-serif;max-width:960px;margin:2rem auto}\
table{border-collapse:collapse;width:100%}td,th{border:1px solid #999;padding:.4rem}\
.toast{padding:.5rem;margin:.25rem 0;border-radius:4px}.success{background:#d1e7dd}\
.info{background:#cff4fc}.error{background:#f8d7da}.inline{display:inline}\
@media print{.no-print{display:none}}";

pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html><html><head><meta charset=\"utf-8\"><title>{}</title>\
         <style>{}</style></head><body>{}</body></html>",
        escape(title),
        STYLE,
        body
    )
}

fn order_table(header: &str, rows: &[OrderLineItem]) -> String {
    let mut html = format!(
        "<h2>{}</h2><table><thead><tr><th>{}</th><th>{}</th></tr></thead><tbody>",
        escape(header),
        NAME_COLUMN,
        QUANTITY_COLUMN
    );
    for row in rows {
        let _ = write!(
            html,
            "<tr><td>{}</td><td>{}</td></tr>",
            escape(&row.name),
            row.quantity
        );
    }
    html.push_str("</tbody></table>");
    html
}

fn toasts(notifications: &[Notification]) -> String {
    notifications
        .iter()
        .map(|n| {
            let class = match n.level {
                NotificationLevel::Success => "success",
                NotificationLevel::Info => "info",
                NotificationLevel::Error => "error",
            };
            format!(
                "<div class=\"toast {}\" role=\"status\">{}</div>",
                class,
                escape(&n.message)
            )
        })
        .collect()
}

fn order_form(order: &OrderComposer, draft: &SelectionDraft, catalog: &CatalogSnapshot) -> String {
    let mut options = String::from("<option value=\"\">Select Medicine</option>");
    for medicine in &catalog.medicines {
        let selected = if medicine.name == draft.selected_medicine {
            " selected"
        } else {
            ""
        };
        let _ = write!(
            options,
            "<option value=\"{0}\"{1}>{0}</option>",
            escape(&medicine.name),
            selected
        );
    }

    let status = match order.status() {
        OrderStatus::Empty => "New order",
        OrderStatus::Building => "Not saved",
        OrderStatus::Ready => "Saved, ready to print",
    };

    format!(
        "<div class=\"no-print\"><p>Status: {status}</p>\
         <form method=\"post\" action=\"/order/lines\">\
         <select name=\"medicine\">{options}</select> \
         <input type=\"number\" name=\"quantity\" min=\"1\" value=\"{quantity}\"> \
         <button type=\"submit\">Add</button></form>\
         <form class=\"inline\" method=\"post\" action=\"/order/save\"><button type=\"submit\">Save</button></form> \
         <form class=\"inline\" method=\"post\" action=\"/order/print\"><button type=\"submit\">Print</button></form></div>",
        quantity = draft.quantity,
    )
}

fn catalog_section(catalog: &CatalogSnapshot) -> String {
    let (action_label, cancel) = match catalog.editing {
        Some(_) => (
            "Update",
            "<form class=\"inline\" method=\"post\" action=\"/medicines/cancel-edit\">\
             <button type=\"submit\">Cancel</button></form>",
        ),
        None => ("Add", ""),
    };

    let mut html = format!(
        "<div class=\"no-print\"><h3>Manage Medicines</h3>\
         <form method=\"post\" action=\"/medicines\">\
         <input type=\"text\" name=\"name\" placeholder=\"Medicine name\" value=\"{}\"> \
         <button type=\"submit\">{}</button></form>{}\
         <form method=\"post\" action=\"/medicines/refresh\"><button type=\"submit\">Reload</button></form><ul>",
        escape(&catalog.name_draft),
        action_label,
        cancel
    );
    for medicine in &catalog.medicines {
        let id = escape(&medicine.id);
        let _ = write!(
            html,
            "<li>{} \
             <form class=\"inline\" method=\"post\" action=\"/medicines/{id}/edit\"><button type=\"submit\">Edit</button></form> \
             <form class=\"inline\" method=\"post\" action=\"/medicines/{id}/delete\"><button type=\"submit\">Delete</button></form></li>",
            escape(&medicine.name),
        );
    }
    html.push_str("</ul></div>");
    html
}

/// The single-page order form.
pub fn desk(
    prescriber: &str,
    order: &OrderComposer,
    draft: &SelectionDraft,
    catalog: &CatalogSnapshot,
    notifications: &[Notification],
) -> String {
    let body = format!(
        "<div class=\"no-print\">{}</div><div class=\"print-area\">{}</div>{}{}",
        toasts(notifications),
        order_table(&header_line(prescriber), &order.items),
        order_form(order, draft, catalog),
        catalog_section(catalog)
    );
    layout("Medicine Order", &body)
}

/// Printable page for a printed order; opens the browser print dialog.
pub fn sheet(sheet: &OrderSheet) -> String {
    let body = format!(
        "<div class=\"print-area\">{}<p>Printed {}</p></div>\
         <p class=\"no-print\"><a href=\"/\">New order</a></p>\
         <script>window.print()</script>",
        order_table(&sheet.header, &sheet.rows),
        sheet.printed_at.format("%Y-%m-%d %H:%M")
    );
    layout(&sheet.header, &body)
}
