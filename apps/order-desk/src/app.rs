use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect},
    routing::{get, post},
    Form, Router,
};
use cqrs_es::AggregateError;
use pharmacy::{
    backend::{CatalogBackend, OrderBackend},
    catalog::CatalogManager,
    notifications::{NotificationLog, Notifier},
    orders::{
        inputs::{AddLineInput, MedicineNameInput},
        sheet::SheetSpool,
        OrderDesk, OrderViews, SelectionDraft, Services,
    },
    Config, Error, Notification,
};

use crate::page;

/// Everything one order desk session needs; passed to handlers as router state.
#[derive(Clone)]
pub struct AppState {
    pub prescriber: String,
    pub desk: Arc<OrderDesk>,
    pub catalog: CatalogManager,
    pub notifications: NotificationLog,
    pub spool: SheetSpool,
}

impl AppState {
    pub fn new(
        config: &Config,
        catalog_backend: Arc<dyn CatalogBackend>,
        order_backend: Arc<dyn OrderBackend>,
    ) -> Self {
        let notifications = NotificationLog::new();
        let spool = SheetSpool::new();

        let desk = OrderDesk::new(
            Services::new(order_backend),
            OrderViews::new(),
            config.prescriber.clone(),
            Arc::new(spool.clone()),
            Arc::new(notifications.clone()),
        );
        let catalog = CatalogManager::new(catalog_backend, Arc::new(notifications.clone()));

        Self {
            prescriber: config.prescriber.clone(),
            desk: Arc::new(desk),
            catalog,
            notifications,
            spool,
        }
    }

    fn report(&self, message: String) {
        self.notifications.notify(Notification::error(message));
    }

    fn report_command(&self, err: AggregateError<Error>) {
        let message = match err {
            AggregateError::UserError(e) => e.user_message(),
            other => other.to_string(),
        };
        self.report(message);
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(show_desk))
        .route("/order/lines", post(add_line))
        .route("/order/save", post(save_order))
        .route("/order/print", post(print_order))
        .route("/order/sheet", get(show_sheet))
        .route("/medicines", post(submit_medicine))
        .route("/medicines/refresh", post(refresh_medicines))
        .route("/medicines/cancel-edit", post(cancel_edit))
        .route("/medicines/:id/edit", post(edit_medicine))
        .route("/medicines/:id/delete", post(delete_medicine))
        .with_state(state)
}

fn back_to_desk() -> Redirect {
    Redirect::to("/")
}

// Order desk page
async fn show_desk(State(state): State<AppState>) -> Html<String> {
    let order = state.desk.order().await;
    let draft = state.desk.draft().await;
    let catalog = state.catalog.snapshot().await;
    let notifications = state.notifications.drain();

    Html(page::desk(
        &state.prescriber,
        &order,
        &draft,
        &catalog,
        &notifications,
    ))
}

// Add line item
async fn add_line(State(state): State<AppState>, Form(input): Form<AddLineInput>) -> Redirect {
    if let Err(e) = state.desk.add_line(SelectionDraft::from(input)).await {
        state.report_command(e);
    }

    back_to_desk()
}

// Save order
async fn save_order(State(state): State<AppState>) -> Redirect {
    if let Err(e) = state.desk.save().await {
        state.report_command(e);
    }

    back_to_desk()
}

// Print order
async fn print_order(State(state): State<AppState>) -> Redirect {
    match state.desk.print().await {
        Ok(()) => Redirect::to("/order/sheet"),
        Err(e) => {
            state.report_command(e);
            back_to_desk()
        }
    }
}

// Last printed sheet
async fn show_sheet(State(state): State<AppState>) -> Result<impl IntoResponse, (StatusCode, String)> {
    let sheet = state
        .spool
        .latest()
        .ok_or((StatusCode::NOT_FOUND, "No order printed yet".to_string()))?;

    Ok(Html(page::sheet(&sheet)))
}

// Create or rename medicine
async fn submit_medicine(
    State(state): State<AppState>,
    Form(input): Form<MedicineNameInput>,
) -> Redirect {
    state.catalog.set_name_draft(input.name).await;
    if let Err(e) = state.catalog.submit().await {
        state.report(e.user_message());
    }

    back_to_desk()
}

// Start editing medicine
async fn edit_medicine(Path(id): Path<String>, State(state): State<AppState>) -> Redirect {
    if let Err(e) = state.catalog.begin_edit(&id).await {
        state.report(e.user_message());
    }

    back_to_desk()
}

// Cancel edit
async fn cancel_edit(State(state): State<AppState>) -> Redirect {
    state.catalog.cancel_edit().await;
    back_to_desk()
}

// Delete medicine
async fn delete_medicine(Path(id): Path<String>, State(state): State<AppState>) -> Redirect {
    if let Err(e) = state.catalog.delete(&id).await {
        state.report(e.user_message());
    }

    back_to_desk()
}

// Reload catalog
async fn refresh_medicines(State(state): State<AppState>) -> Redirect {
    if let Err(e) = state.catalog.refresh().await {
        state.report(e.user_message());
    }

    back_to_desk()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request},
    };
    use httpmock::prelude::*;
    use pharmacy::backend::HttpBackend;
    use serde_json::json;
    use tower::ServiceExt;

    fn desk_for(server: &MockServer) -> (Router, AppState) {
        let config = Config {
            api_url: server.base_url(),
            prescriber: "Dr. Grey".to_string(),
            ..Config::default()
        };
        let backend = Arc::new(HttpBackend::new(config.api_url.clone()));
        let state = AppState::new(&config, backend.clone(), backend);
        (router(state.clone()), state)
    }

    fn form(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get_page(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, String, String) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let location = response
            .headers()
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, location, String::from_utf8(body.to_vec()).unwrap())
    }

    async fn mock_catalog(server: &MockServer) {
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/medicines");
                then.status(200).json_body(json!([
                    { "_id": "1", "name": "Paracetamol" },
                    { "_id": "2", "name": "Ibuprofen" }
                ]));
            })
            .await;
    }

    #[tokio::test]
    async fn desk_lists_catalog_in_selection() {
        let server = MockServer::start_async().await;
        mock_catalog(&server).await;
        let (app, state) = desk_for(&server);
        state.catalog.refresh().await.unwrap();

        let (status, _, html) = send(&app, get_page("/")).await;

        assert_eq!(status, StatusCode::OK);
        assert!(html.contains("<option value=\"Paracetamol\">Paracetamol</option>"));
        assert!(html.contains("Medicine Order by : Dr. Grey"));
    }

    #[tokio::test]
    async fn add_without_selection_shows_validation_error() {
        let server = MockServer::start_async().await;
        let (app, state) = desk_for(&server);

        let (status, location, _) = send(&app, form("/order/lines", "medicine=&quantity=2")).await;
        assert_eq!(status, StatusCode::SEE_OTHER);
        assert_eq!(location, "/");

        let (_, _, html) = send(&app, get_page("/")).await;
        assert!(html.contains("no medicine selected"));
        assert!(html.contains("name=\"quantity\" min=\"1\" value=\"2\""));
        assert!(state.desk.order().await.items.is_empty());
    }

    #[tokio::test]
    async fn add_save_print_flow() {
        let server = MockServer::start_async().await;
        mock_catalog(&server).await;
        let orders = server
            .mock_async(|when, then| {
                when.method(POST).path("/api/orders").json_body(json!({
                    "medicines": [
                        { "name": "Paracetamol", "quantity": 2 },
                        { "name": "Ibuprofen", "quantity": 1 }
                    ]
                }));
                then.status(201).json_body(json!({ "_id": "o1" }));
            })
            .await;
        let (app, state) = desk_for(&server);
        state.catalog.refresh().await.unwrap();

        send(&app, form("/order/lines", "medicine=Paracetamol&quantity=2")).await;
        send(&app, form("/order/lines", "medicine=Ibuprofen&quantity=1")).await;

        let (_, location, _) = send(&app, form("/order/print", "")).await;
        assert_eq!(location, "/");
        let (_, _, html) = send(&app, get_page("/")).await;
        assert!(html.contains("must save before print"));

        send(&app, form("/order/save", "")).await;
        orders.assert_async().await;

        let (_, location, _) = send(&app, form("/order/print", "")).await;
        assert_eq!(location, "/order/sheet");

        let (status, _, sheet) = send(&app, get_page("/order/sheet")).await;
        assert_eq!(status, StatusCode::OK);
        let paracetamol = sheet.find("<td>Paracetamol</td><td>2</td>").unwrap();
        let ibuprofen = sheet.find("<td>Ibuprofen</td><td>1</td>").unwrap();
        assert!(paracetamol < ibuprofen);

        let order = state.desk.order().await;
        assert!(order.items.is_empty());
        assert!(!order.saved);

        let (_, _, html) = send(&app, get_page("/")).await;
        assert!(html.contains("Order printed, ready for new order"));
        assert!(!html.contains("<td>Paracetamol</td>"));
    }

    #[tokio::test]
    async fn failed_save_is_reported() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/api/orders");
                then.status(500).body("unavailable");
            })
            .await;
        let (app, state) = desk_for(&server);

        send(&app, form("/order/lines", "medicine=Paracetamol&quantity=2")).await;
        send(&app, form("/order/save", "")).await;

        let (_, _, html) = send(&app, get_page("/")).await;
        assert!(html.contains("Backend error: HTTP 500: unavailable"));
        assert!(!state.desk.order().await.saved);
    }

    #[tokio::test]
    async fn sheet_is_not_found_before_first_print() {
        let server = MockServer::start_async().await;
        let (app, _) = desk_for(&server);

        let (status, _, _) = send(&app, get_page("/order/sheet")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn medicine_can_be_added_renamed_and_deleted() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/api/medicines")
                    .json_body(json!({ "name": "Cetirizine" }));
                then.status(201)
                    .json_body(json!({ "_id": "9", "name": "Cetirizine" }));
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(PUT)
                    .path("/api/medicines/9")
                    .json_body(json!({ "name": "Cetirizine 10mg" }));
                then.status(200)
                    .json_body(json!({ "_id": "9", "name": "Cetirizine 10mg" }));
            })
            .await;
        let delete = server
            .mock_async(|when, then| {
                when.method(DELETE).path("/api/medicines/9");
                then.status(200);
            })
            .await;
        let (app, state) = desk_for(&server);

        send(&app, form("/medicines", "name=Cetirizine")).await;
        send(&app, form("/medicines/9/edit", "")).await;
        let (_, _, html) = send(&app, get_page("/")).await;
        assert!(html.contains(">Update</button>"));

        send(&app, form("/medicines", "name=Cetirizine+10mg")).await;
        assert_eq!(
            state.catalog.medicines().await[0].name,
            "Cetirizine 10mg"
        );

        send(&app, form("/medicines/9/delete", "")).await;
        delete.assert_async().await;
        assert!(state.catalog.medicines().await.is_empty());
    }

    #[tokio::test]
    async fn empty_medicine_name_is_rejected() {
        let server = MockServer::start_async().await;
        let (app, _) = desk_for(&server);

        send(&app, form("/medicines", "name=")).await;

        let (_, _, html) = send(&app, get_page("/")).await;
        assert!(html.contains("medicine name is required"));
    }
}
