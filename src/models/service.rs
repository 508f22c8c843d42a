//! Service action vocabulary
//!
//! The log form offers a short list of standard actions but accepts free
//! text as a fallback, so the stored column is an open vocabulary. Matching
//! against standard actions is by exact string, no case folding.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Stored value for a check that required no action
pub const DEFAULT_SERVICE: &str = "None Required";

/// Service values that indicate the pump needed oil; these drive the
/// needs-oil dashboard alert
pub const OIL_SERVICES: [&str; 2] = ["Add Oil", "Drain & Replace Oil"];

/// Action recorded for a weekly check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(from = "String", into = "String")]
pub enum ServiceAction {
    NoneRequired,
    AddOil,
    DrainReplaceOil,
    ReplaceFilter,
    CleanPump,
    MajorService,
    /// Anything the operator typed that is not a standard option
    Custom(String),
}

impl ServiceAction {
    /// The fixed options offered by the weekly form dropdown
    pub fn standard_labels() -> [&'static str; 6] {
        [
            "None Required",
            "Add Oil",
            "Drain & Replace Oil",
            "Replace Filter",
            "Clean Pump",
            "Major Service",
        ]
    }

    pub fn as_str(&self) -> &str {
        match self {
            ServiceAction::NoneRequired => "None Required",
            ServiceAction::AddOil => "Add Oil",
            ServiceAction::DrainReplaceOil => "Drain & Replace Oil",
            ServiceAction::ReplaceFilter => "Replace Filter",
            ServiceAction::CleanPump => "Clean Pump",
            ServiceAction::MajorService => "Major Service",
            ServiceAction::Custom(s) => s,
        }
    }
}

impl From<String> for ServiceAction {
    fn from(s: String) -> Self {
        match s.as_str() {
            "None Required" => ServiceAction::NoneRequired,
            "Add Oil" => ServiceAction::AddOil,
            "Drain & Replace Oil" => ServiceAction::DrainReplaceOil,
            "Replace Filter" => ServiceAction::ReplaceFilter,
            "Clean Pump" => ServiceAction::CleanPump,
            "Major Service" => ServiceAction::MajorService,
            _ => ServiceAction::Custom(s),
        }
    }
}

impl From<ServiceAction> for String {
    fn from(a: ServiceAction) -> Self {
        a.as_str().to_string()
    }
}

impl std::fmt::Display for ServiceAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// serde default for form fields that omit the service
pub fn default_service() -> String {
    DEFAULT_SERVICE.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_labels_round_trip() {
        for label in ServiceAction::standard_labels() {
            let action = ServiceAction::from(label.to_string());
            assert!(!matches!(action, ServiceAction::Custom(_)));
            assert_eq!(action.as_str(), label);
        }
    }

    #[test]
    fn free_text_is_custom() {
        let action = ServiceAction::from("Re-greased bearings".to_string());
        assert_eq!(
            action,
            ServiceAction::Custom("Re-greased bearings".to_string())
        );
        assert_eq!(action.as_str(), "Re-greased bearings");
    }
}
