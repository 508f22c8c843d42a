//! Equipment model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// A tracked pump/apparatus requiring periodic maintenance
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Equipment {
    /// Asset number, assigned by the operator (not auto-generated)
    pub equipment_id: i32,
    pub equipment_name: String,
    pub pump_model: Option<String>,
    /// Oil grade in use; scroll pumps carry a "Scroll" marker here
    pub oil_type: Option<String>,
    /// Team or person responsible for the pump
    pub pump_owner: Option<String>,
    /// Free-form status, "active" by default
    pub status: String,
    pub notes: Option<String>,
}

impl Equipment {
    /// Whether this equipment takes part in the weekly oil-service rotation.
    ///
    /// Scroll pumps are oil-free and spare units sit on the shelf, so both
    /// stay out of the weekly checklist and out of the owner ranking
    /// denominator.
    pub fn in_weekly_rotation(&self) -> bool {
        let oil_free = self
            .oil_type
            .as_deref()
            .map(|t| t.to_lowercase().contains("scroll"))
            .unwrap_or(false);
        let spare = self.equipment_name.to_lowercase().contains("spare");
        !oil_free && !spare
    }
}

/// Create equipment request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateEquipment {
    /// Asset number chosen by the caller; must not collide with an existing one
    pub equipment_id: i32,
    #[validate(length(min = 1, message = "Equipment name must not be empty"))]
    pub equipment_name: String,
    pub pump_model: Option<String>,
    pub oil_type: Option<String>,
    pub pump_owner: Option<String>,
    /// Defaults to "active" when omitted
    pub status: Option<String>,
    pub notes: Option<String>,
}

/// Update equipment request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateEquipment {
    #[validate(length(min = 1, message = "Equipment name must not be empty"))]
    pub equipment_name: Option<String>,
    pub pump_model: Option<String>,
    pub oil_type: Option<String>,
    pub pump_owner: Option<String>,
    pub status: Option<String>,
    pub notes: Option<String>,
}
