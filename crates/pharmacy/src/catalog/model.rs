use derive_new::new;
use serde::{Deserialize, Serialize};

/// A catalog entry as stored by the backend.
#[derive(Clone, Debug, Serialize, Deserialize, Eq, PartialEq, new)]
pub struct Medicine {
    #[serde(rename = "_id")]
    #[new(into)]
    pub id: String,
    #[new(into)]
    pub name: String,
}

/// Request body for create/update.
#[derive(Clone, Debug, Serialize, Deserialize, Eq, PartialEq, new)]
pub struct MedicineInput {
    #[new(into)]
    pub name: String,
}
