use serde::{Deserialize, Serialize};

use super::aggregate::SelectionDraft;

#[derive(Clone, Debug, Serialize, Deserialize, Eq, PartialEq)]
pub enum Command {
    /// Append the entered medicine/quantity to the pending order
    AddLine { draft: SelectionDraft },

    /// Persist the pending order to the backend
    SaveOrder,

    /// Print the saved order and start a new one
    PrintOrder,
}
