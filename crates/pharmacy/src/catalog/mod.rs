/// Wire models
pub mod model;

/// Catalog state and CRUD orchestration
pub mod manager;

pub use manager::{CatalogManager, CatalogSnapshot};
pub use model::{Medicine, MedicineInput};
