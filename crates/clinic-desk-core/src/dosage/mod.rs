//! Weight-based dose calculator.
//!
//! Pipeline: form input → [`clamp_input`] → [`compute_dose`] → display
//!
//! The total dose stays in the requested unit. Only the liquid volume
//! calculation converts through milligrams.

use tracing::trace;

use crate::models::{DoseRequest, DoseResult, LiquidFormulation};

/// Map NaN, infinities and non-positive values to 0.
pub fn clamp_input(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// Compute the total dose and, for a defined liquid formulation, the volume
/// to administer.
///
/// Total over any input: fields are re-clamped, and a zero or overflowing
/// concentration yields a volume of 0 rather than NaN or infinity.
pub fn compute_dose(request: &DoseRequest, liquid: Option<&LiquidFormulation>) -> DoseResult {
    let total_dose = clamp_input(request.weight_kg) * clamp_input(request.dose_per_kg);

    let volume_ml = liquid.filter(|l| l.is_defined()).map(|l| {
        let total_mg = request.dose_unit.to_mg(total_dose);
        let per_ml = l.mg_per_ml();
        let volume = if per_ml > 0.0 { total_mg / per_ml } else { 0.0 };
        clamp_input(volume)
    });

    trace!(
        total_dose,
        unit = %request.dose_unit,
        volume_ml = ?volume_ml,
        "Computed dose"
    );

    DoseResult {
        total_dose,
        dose_unit: request.dose_unit,
        volume_ml,
    }
}
