//! Request payload validation for the items API.
//!
//! Validation is an explicit function over the create payload; a payload that
//! produces any violations never reaches the store.

use serde::{Deserialize, Serialize};

/// Incoming create payload. The id is optional: a missing or empty id asks
/// the store to mint one.
#[derive(Debug, Deserialize)]
pub struct NewItem {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    pub price: f64,
    #[serde(default)]
    pub description: Option<String>,
}

/// A single failed field constraint.
#[derive(Debug, Serialize, PartialEq)]
pub struct Violation {
    pub field: &'static str,
    pub message: &'static str,
}

/// Check the create payload against the item field constraints.
/// Returns every violation found, empty when the payload is acceptable.
pub fn validate(payload: &NewItem) -> Vec<Violation> {
    let mut violations = Vec::new();

    if payload.name.trim().is_empty() {
        violations.push(Violation {
            field: "name",
            message: "must not be blank",
        });
    }

    if !payload.price.is_finite() || payload.price <= 0.0 {
        violations.push(Violation {
            field: "price",
            message: "must be a positive number",
        });
    }

    violations
}
