use serde::{Deserialize, Serialize};

/// Distinct dataset values used to populate the form's selection inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceChoices {
    pub car_names: Vec<String>,
    pub fuel_types: Vec<String>,
    pub seller_types: Vec<String>,
    pub transmissions: Vec<String>,
    /// Ascending.
    pub owners: Vec<i64>,
    /// Descending.
    pub years: Vec<i64>,
}

impl ReferenceChoices {
    pub fn is_empty(&self) -> bool {
        self.car_names.is_empty()
            && self.fuel_types.is_empty()
            && self.seller_types.is_empty()
            && self.transmissions.is_empty()
            && self.owners.is_empty()
            && self.years.is_empty()
    }
}
