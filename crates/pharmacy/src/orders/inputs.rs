use serde::{Deserialize, Serialize};

use super::aggregate::SelectionDraft;

/// Order form submission. Fields arrive as raw strings from the browser.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct AddLineInput {
    #[serde(default)]
    pub medicine: String,
    #[serde(default)]
    pub quantity: String,
}

impl From<AddLineInput> for SelectionDraft {
    fn from(input: AddLineInput) -> Self {
        let quantity = input.quantity.trim().parse::<i64>().unwrap_or(1);
        SelectionDraft::new(input.medicine.trim(), quantity)
    }
}

/// Catalog form submission.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct MedicineNameInput {
    #[serde(default)]
    pub name: String,
}
