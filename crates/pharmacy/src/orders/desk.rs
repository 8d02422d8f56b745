use std::sync::Arc;

use cqrs_es::AggregateError;
use tokio::sync::RwLock;

use super::{
    cqrs::{self, OrderCqrs},
    Command, OrderComposer, OrderViews, Printer, SelectionDraft, Services,
};
use crate::{errors::Error, notifications::Notifier};

/// Collaborators shared by every order the desk opens.
struct Wiring {
    services: Services,
    views: OrderViews,
    prescriber: String,
    printer: Arc<dyn Printer>,
    notifier: Arc<dyn Notifier>,
}

/// The order currently being composed, with its own event store.
#[derive(Clone)]
struct Session {
    order_id: String,
    cqrs: Arc<OrderCqrs>,
}

impl Session {
    fn open(wiring: &Wiring) -> Self {
        Self {
            order_id: cqrs::new_order_id(),
            cqrs: cqrs::init(
                wiring.services.clone(),
                wiring.views.clone(),
                &wiring.prescriber,
                wiring.printer.clone(),
                wiring.notifier.clone(),
            ),
        }
    }
}

/// Order composer state container: the pending order and the selection draft.
///
/// Every printed order is consumed; the next command goes to a fresh order
/// with an empty event store, so history never outlives the order it
/// belongs to.
pub struct OrderDesk {
    wiring: Wiring,
    session: RwLock<Session>,
    draft: RwLock<SelectionDraft>,
}

impl OrderDesk {
    pub fn new(
        services: Services,
        views: OrderViews,
        prescriber: impl Into<String>,
        printer: Arc<dyn Printer>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let wiring = Wiring {
            services,
            views,
            prescriber: prescriber.into(),
            printer,
            notifier,
        };
        let session = Session::open(&wiring);

        Self {
            wiring,
            session: RwLock::new(session),
            draft: RwLock::new(SelectionDraft::default()),
        }
    }

    pub async fn order_id(&self) -> String {
        self.session.read().await.order_id.clone()
    }

    /// The pending order as rendered.
    pub async fn order(&self) -> OrderComposer {
        let order_id = self.order_id().await;
        self.wiring.views.order(&order_id).await
    }

    pub async fn draft(&self) -> SelectionDraft {
        self.draft.read().await.clone()
    }

    pub fn views(&self) -> &OrderViews {
        &self.wiring.views
    }

    /// Add the entered line. A rejected draft stays in the form.
    pub async fn add_line(&self, draft: SelectionDraft) -> Result<(), AggregateError<Error>> {
        *self.draft.write().await = draft.clone();
        self.execute(Command::AddLine { draft }).await?;
        *self.draft.write().await = SelectionDraft::default();
        Ok(())
    }

    pub async fn save(&self) -> Result<(), AggregateError<Error>> {
        self.execute(Command::SaveOrder).await
    }

    /// Print the saved order, then start a new one.
    pub async fn print(&self) -> Result<(), AggregateError<Error>> {
        let session = self.current().await;
        cqrs::execute(&session.cqrs, &session.order_id, Command::PrintOrder).await?;

        self.roll_over(&session.order_id).await;
        *self.draft.write().await = SelectionDraft::default();
        Ok(())
    }

    async fn current(&self) -> Session {
        self.session.read().await.clone()
    }

    async fn execute(&self, command: Command) -> Result<(), AggregateError<Error>> {
        let session = self.current().await;
        cqrs::execute(&session.cqrs, &session.order_id, command).await
    }

    async fn roll_over(&self, printed_id: &str) {
        let mut session = self.session.write().await;
        if session.order_id == printed_id {
            *session = Session::open(&self.wiring);
            tracing::info!("Order {} printed, opened order {}", printed_id, session.order_id);
        }
        drop(session);

        self.wiring.views.remove(printed_id).await;
    }
}
