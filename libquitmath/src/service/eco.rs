//! Eco impact of avoided disposable vapes

use serde::{Deserialize, Serialize};

use crate::error::ServiceError;
use crate::types::EcoRecord;

pub const METRIC_UNITS_AVOIDED: &str = "DisposableVapesAvoided";
pub const METRIC_MASS_AVOIDED: &str = "PlasticPlusBatteryMass";
pub const METRIC_CO2E_AVOIDED: &str = "CO2eAvoided";

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EcoCoefficients {
    pub plastic_per_disposable_g: f64,
    pub battery_per_disposable_g: f64,
    pub co2e_per_disposable_kg: f64,
    pub karma_per_gram: f64,
    pub karma_per_kg_co2e: f64,
}

impl Default for EcoCoefficients {
    fn default() -> Self {
        Self {
            plastic_per_disposable_g: 15.0,
            battery_per_disposable_g: 10.0,
            co2e_per_disposable_kg: 0.02,
            karma_per_gram: 0.0005,
            karma_per_kg_co2e: 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EcoBreakdown {
    pub plastic_g: f64,
    pub battery_g: f64,
    pub co2e_kg: f64,
    pub karma: f64,
}

#[derive(Debug, Clone, Default)]
pub struct EcoImpactService {
    coeffs: EcoCoefficients,
}

impl EcoImpactService {
    pub fn new(coeffs: EcoCoefficients) -> Self {
        Self { coeffs }
    }

    pub fn coefficients(&self) -> &EcoCoefficients {
        &self.coeffs
    }

    pub fn disposables_to_eco(&self, avoided_units: f64) -> EcoBreakdown {
        let c = &self.coeffs;
        let plastic_g = avoided_units * c.plastic_per_disposable_g;
        let battery_g = avoided_units * c.battery_per_disposable_g;
        let co2e_kg = avoided_units * c.co2e_per_disposable_kg;

        let karma_mass = (plastic_g + battery_g) * c.karma_per_gram;
        let karma_climate = co2e_kg * c.karma_per_kg_co2e;

        EcoBreakdown {
            plastic_g,
            battery_g,
            co2e_kg,
            karma: karma_mass + karma_climate,
        }
    }

    /// Records for a batch of avoided disposables
    ///
    /// Three records: the unit count, the combined plastic and battery mass
    /// (which carries all of the karma) and the CO2e.
    pub fn records_for_disposables(&self, avoided_units: f64) -> Result<Vec<EcoRecord>, ServiceError> {
        if !avoided_units.is_finite() || avoided_units <= 0.0 {
            return Err(ServiceError::Validation(format!(
                "avoided units must be a positive number, got {}",
                avoided_units
            )));
        }

        let eco = self.disposables_to_eco(avoided_units);
        Ok(vec![
            EcoRecord::new(METRIC_UNITS_AVOIDED, "units", avoided_units, 0.0),
            EcoRecord::new(METRIC_MASS_AVOIDED, "g", eco.plastic_g + eco.battery_g, eco.karma),
            EcoRecord::new(METRIC_CO2E_AVOIDED, "kg", eco.co2e_kg, 0.0),
        ])
    }

    /// A user-entered measurement; manual records earn no karma
    pub fn manual_record(&self, metric: &str, unit: &str, value: f64) -> Result<EcoRecord, ServiceError> {
        if metric.trim().is_empty() || unit.trim().is_empty() {
            return Err(ServiceError::Validation("metric and unit are required".to_string()));
        }
        if !value.is_finite() {
            return Err(ServiceError::Validation(format!("value must be a number, got {}", value)));
        }
        Ok(EcoRecord::new(metric.trim(), unit.trim(), value, 0.0))
    }
}
