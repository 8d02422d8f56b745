use std::sync::Arc;

use tokio::sync::RwLock;

use super::Medicine;
use crate::{
    backend::CatalogBackend,
    errors::Error,
    notifications::{Notification, Notifier},
};

/// Client-side view of the catalog plus the "Manage Medicines" form state.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct CatalogSnapshot {
    pub medicines: Vec<Medicine>,
    /// Value of the medicine name input.
    pub name_draft: String,
    /// Id of the medicine being renamed, if any.
    pub editing: Option<String>,
}

impl CatalogSnapshot {
    fn replace_all(&mut self, medicines: Vec<Medicine>) {
        self.medicines = medicines;
    }

    fn insert(&mut self, medicine: Medicine) {
        self.medicines.push(medicine);
    }

    fn replace(&mut self, id: &str, medicine: Medicine) {
        for entry in self.medicines.iter_mut().filter(|m| m.id == id) {
            *entry = medicine.clone();
        }
    }

    fn remove(&mut self, id: &str) {
        self.medicines.retain(|m| m.id != id);
    }

    fn clear_form(&mut self) {
        self.name_draft.clear();
        self.editing = None;
    }
}

/// Medicine catalog CRUD over a [`CatalogBackend`].
///
/// Backend calls are awaited without holding the state lock, and each
/// completion applies its own result, so overlapping requests resolve
/// last-write-wins.
#[derive(Clone)]
pub struct CatalogManager {
    backend: Arc<dyn CatalogBackend>,
    notifier: Arc<dyn Notifier>,
    state: Arc<RwLock<CatalogSnapshot>>,
}

impl CatalogManager {
    pub fn new(backend: Arc<dyn CatalogBackend>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            backend,
            notifier,
            state: Arc::new(RwLock::new(CatalogSnapshot::default())),
        }
    }

    pub async fn snapshot(&self) -> CatalogSnapshot {
        self.state.read().await.clone()
    }

    pub async fn medicines(&self) -> Vec<Medicine> {
        self.state.read().await.medicines.clone()
    }

    /// Reload the catalog. On failure the previous list is kept.
    pub async fn refresh(&self) -> Result<(), Error> {
        match self.backend.list_medicines().await {
            Ok(medicines) => {
                tracing::info!("Loaded {} medicines", medicines.len());
                self.state.write().await.replace_all(medicines);
                Ok(())
            }
            Err(e) => {
                tracing::error!("Failed to load medicines: {}", e);
                Err(e.into())
            }
        }
    }

    pub async fn set_name_draft(&self, name: impl Into<String>) {
        self.state.write().await.name_draft = name.into();
    }

    pub async fn begin_edit(&self, id: &str) -> Result<(), Error> {
        let mut state = self.state.write().await;
        let name = state
            .medicines
            .iter()
            .find(|m| m.id == id)
            .map(|m| m.name.clone())
            .ok_or_else(|| Error::NotFound {
                entity: format!("Medicine {}", id),
            })?;
        state.editing = Some(id.to_string());
        state.name_draft = name;
        Ok(())
    }

    pub async fn cancel_edit(&self) {
        self.state.write().await.clear_form();
    }

    /// Create a medicine from the name draft, or rename the one being edited.
    pub async fn submit(&self) -> Result<Medicine, Error> {
        let (name, editing) = {
            let state = self.state.read().await;
            (state.name_draft.trim().to_string(), state.editing.clone())
        };
        if name.is_empty() {
            return Err(Error::validation("medicine name is required"));
        }

        match editing {
            Some(id) => {
                let updated = self.backend.update_medicine(&id, &name).await.map_err(|e| {
                    tracing::error!("Failed to update medicine {}: {}", id, e);
                    Error::from(e)
                })?;
                tracing::info!("Medicine {} renamed to {}", id, updated.name);

                let mut state = self.state.write().await;
                state.replace(&id, updated.clone());
                state.clear_form();
                drop(state);

                self.notifier.notify(Notification::success("Medicine updated"));
                Ok(updated)
            }
            None => {
                let created = self.backend.create_medicine(&name).await.map_err(|e| {
                    tracing::error!("Failed to create medicine {}: {}", name, e);
                    Error::from(e)
                })?;
                tracing::info!("Medicine {} created as {}", created.name, created.id);

                let mut state = self.state.write().await;
                state.insert(created.clone());
                state.clear_form();
                drop(state);

                self.notifier.notify(Notification::success("Medicine added"));
                Ok(created)
            }
        }
    }

    pub async fn delete(&self, id: &str) -> Result<(), Error> {
        self.backend.delete_medicine(id).await.map_err(|e| {
            tracing::error!("Failed to delete medicine {}: {}", id, e);
            Error::from(e)
        })?;
        tracing::info!("Medicine {} deleted", id);

        let mut state = self.state.write().await;
        state.remove(id);
        if state.editing.as_deref() == Some(id) {
            state.clear_form();
        }
        drop(state);

        self.notifier.notify(Notification::success("Medicine deleted"));
        Ok(())
    }
}
