//! Dose calculator models.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::DoseUnit;
use crate::dosage::clamp_input;

/// Weight-based dose request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DoseRequest {
    /// Patient weight in kg
    pub weight_kg: f64,
    /// Dose per kg body weight, in `dose_unit`
    pub dose_per_kg: f64,
    /// Unit of `dose_per_kg` and of the resulting total dose
    pub dose_unit: DoseUnit,
    /// Selected frequency; shown alongside the result, not used in the math
    #[serde(default)]
    pub frequency: Frequency,
}

impl DoseRequest {
    /// Build a request from raw form values. NaN, infinite and negative
    /// values become 0.
    pub fn new(weight_kg: f64, dose_per_kg: f64, dose_unit: DoseUnit) -> Self {
        Self {
            weight_kg: clamp_input(weight_kg),
            dose_per_kg: clamp_input(dose_per_kg),
            dose_unit,
            frequency: Frequency::default(),
        }
    }

    /// Set the dosing frequency.
    pub fn with_frequency(mut self, frequency: Frequency) -> Self {
        self.frequency = frequency;
        self
    }
}

/// Concentration of a liquid medicine, e.g. 125 mg / 5 ml.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LiquidFormulation {
    /// Amount of drug per `concentration_volume_ml`
    pub concentration_amount: f64,
    /// Unit of `concentration_amount`
    pub concentration_unit: DoseUnit,
    /// Volume in ml containing `concentration_amount`
    pub concentration_volume_ml: f64,
}

impl LiquidFormulation {
    /// Build a formulation from raw form values, clamping like [`DoseRequest::new`].
    pub fn new(amount: f64, unit: DoseUnit, volume_ml: f64) -> Self {
        Self {
            concentration_amount: clamp_input(amount),
            concentration_unit: unit,
            concentration_volume_ml: clamp_input(volume_ml),
        }
    }

    /// A volume can only be derived once both fields are filled in.
    pub fn is_defined(&self) -> bool {
        self.concentration_amount > 0.0 && self.concentration_volume_ml > 0.0
    }

    /// Concentration in mg per ml, or 0 when undefined.
    pub fn mg_per_ml(&self) -> f64 {
        if !self.is_defined() {
            return 0.0;
        }
        self.concentration_unit.to_mg(self.concentration_amount) / self.concentration_volume_ml
    }
}

/// Calculator output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DoseResult {
    /// weight × dose per kg, in `dose_unit`
    pub total_dose: f64,
    pub dose_unit: DoseUnit,
    /// Volume to administer; present only for a defined liquid formulation
    pub volume_ml: Option<f64>,
}

impl DoseResult {
    /// Volume rounded to two decimals for display ("0.00" when absent).
    pub fn volume_display(&self) -> String {
        format!("{:.2}", self.volume_ml.unwrap_or(0.0))
    }
}

/// Dosing frequency offered by the calculator.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum Frequency {
    #[default]
    OncePerDay,
    TwicePerDay,
    ThreeTimesPerDay,
    FourTimesPerDay,
    Every4Hours,
    Every6Hours,
    Every8Hours,
    Every12Hours,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown frequency: {0}")]
pub struct UnknownFrequency(pub String);

impl Frequency {
    pub const ALL: [Frequency; 8] = [
        Frequency::OncePerDay,
        Frequency::TwicePerDay,
        Frequency::ThreeTimesPerDay,
        Frequency::FourTimesPerDay,
        Frequency::Every4Hours,
        Frequency::Every6Hours,
        Frequency::Every8Hours,
        Frequency::Every12Hours,
    ];

    /// Label as shown in the frequency dropdown.
    pub fn label(self) -> &'static str {
        match self {
            Frequency::OncePerDay => "Once per day",
            Frequency::TwicePerDay => "Twice per day",
            Frequency::ThreeTimesPerDay => "Three times per day",
            Frequency::FourTimesPerDay => "Four times per day",
            Frequency::Every4Hours => "Every 4 hours",
            Frequency::Every6Hours => "Every 6 hours",
            Frequency::Every8Hours => "Every 8 hours",
            Frequency::Every12Hours => "Every 12 hours",
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Frequency {
    type Err = UnknownFrequency;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Frequency::ALL
            .into_iter()
            .find(|f| f.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownFrequency(s.to_string()))
    }
}
