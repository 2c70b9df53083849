use serde::{Deserialize, Serialize};

use super::model::{BeadCatalog, ProjectLine};
use crate::error::{CoreError, CoreResult};
use crate::kernel::compensated_sum;

// ---------------------------------------------------------------------------
// Pricing knobs
// ---------------------------------------------------------------------------

/// suggested_price = cost_basis · multiplier + flat
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricingPolicy {
    pub multiplier: f64,
    pub flat: f64,
}

impl Default for PricingPolicy {
    fn default() -> Self {
        PricingPolicy {
            multiplier: 2.0,
            flat: 2.0,
        }
    }
}

/// Time spent on the piece and what an hour is worth.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Labor {
    pub hourly_rate: f64,
    pub duration_hours: f64,
}

impl Labor {
    pub fn cost(&self) -> f64 {
        self.hourly_rate * self.duration_hours
    }
}

// ---------------------------------------------------------------------------
// Quote
// ---------------------------------------------------------------------------

/// A project line joined with its catalog price.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuoteLine {
    pub bead_name: String,
    pub quantity: u32,
    pub unit_price: f64,
    pub subtotal: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Quote {
    pub lines: Vec<QuoteLine>,
    pub material_cost: f64,
    pub labor_cost: f64,
    pub cost_basis: f64,
    pub suggested_price: f64,
}

/// Merge the project with the catalog and price it.
///
/// Every bead name must resolve; otherwise the error lists each unresolved
/// name once, in order of first appearance.
pub fn price_project(
    catalog: &BeadCatalog,
    project: &[ProjectLine],
    labor: Labor,
    policy: PricingPolicy,
) -> CoreResult<Quote> {
    for (what, value) in [
        ("hourly rate", labor.hourly_rate),
        ("duration", labor.duration_hours),
    ] {
        if !(value.is_finite() && value >= 0.0) {
            return Err(CoreError::domain(format!(
                "{what} must be a non-negative number, got {value}"
            )));
        }
    }
    if !(policy.multiplier.is_finite() && policy.flat.is_finite()) {
        return Err(CoreError::domain("markup multiplier and flat add-on must be finite"));
    }

    let mut lines = Vec::with_capacity(project.len());
    let mut missing: Vec<String> = Vec::new();
    for line in project {
        match catalog.price(line.bead_name()) {
            Some(unit_price) => lines.push(QuoteLine {
                bead_name: line.bead_name().to_string(),
                quantity: line.quantity(),
                unit_price,
                subtotal: f64::from(line.quantity()) * unit_price,
            }),
            None => {
                if !missing.iter().any(|m| m == line.bead_name()) {
                    missing.push(line.bead_name().to_string());
                }
            }
        }
    }
    if !missing.is_empty() {
        return Err(CoreError::Reference { missing });
    }

    let material_cost = compensated_sum(lines.iter().map(|l| l.subtotal));
    let labor_cost = labor.cost();
    let cost_basis = material_cost + labor_cost;
    Ok(Quote {
        lines,
        material_cost,
        labor_cost,
        cost_basis,
        suggested_price: cost_basis * policy.multiplier + policy.flat,
    })
}
