//! Derived calculation algorithms.
//!
//! Computes volumetric efficiency per sample from the MAF-derived load,
//! boost and intake air temperature.

use super::*;
use crate::units::{psi_gauge_to_kpa_absolute, TemperatureUnit};

/// Atmospheric baseline added to manifold relative pressure, kPa
pub const ATM_KPA: f64 = 92.0;

/// Engine displacement constant used by the theoretical flow term
pub const DISPLACEMENT_CC: f64 = 128.15;

/// Specific gas constant for dry air, J/(kg·K)
const R_AIR: f64 = 287.05;

/// VE values, one per sample, labeled by that sample's RPM
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VeTable {
    pub rpm: Vec<f64>,
    /// Volumetric efficiency in percent, rounded to 3 decimals
    pub ve: Vec<f64>,
}

impl VeTable {
    pub fn len(&self) -> usize {
        self.ve.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ve.is_empty()
    }
}

/// Round to 3 decimal places
fn round3(value: f64) -> f64 {
    (value * 1000.0).round_ties_even() / 1000.0
}

/// Volumetric efficiency for one sample.
///
/// ```text
/// AMP   = MRP_psi * 6.89476 + ATM_KPA
/// MAF   = load_g_per_rev * RPM / 60
/// rho   = (AMP * 1000) / (287.05 * (IAT_C + 273.15)) * 1000
/// theo  = DISPLACEMENT_CC * RPM / 3456 * 0.0283 / 60
/// VE%   = round((MAF / rho) / theo * 100, 3)
/// ```
pub fn volumetric_efficiency(rpm: f64, load: f64, mrp_psi: f64, iat_c: f64) -> f64 {
    let absolute_kpa = psi_gauge_to_kpa_absolute(mrp_psi, ATM_KPA);
    let mass_airflow = load * rpm / 60.0;
    let air_density = (absolute_kpa * 1000.0) / (R_AIR * (iat_c + 273.15)) * 1000.0;
    let theoretical_flow = DISPLACEMENT_CC * rpm / 3456.0 * 0.0283 / 60.0;
    round3((mass_airflow / air_density) / theoretical_flow * 100.0)
}

/// Compute VE for aligned channel slices
pub fn compute_volumetric_efficiency(
    rpm: &[f64],
    load: &[f64],
    mrp_psi: &[f64],
    iat_c: &[f64],
) -> Vec<f64> {
    rpm.iter()
        .zip(load)
        .zip(mrp_psi)
        .zip(iat_c)
        .map(|(((&r, &l), &m), &t)| volumetric_efficiency(r, l, m, t))
        .collect()
}

/// Intake air temperature in Celsius for every sample.
///
/// A Fahrenheit channel is preferred and converted; otherwise the Celsius
/// channel is used directly.
pub fn intake_air_temperature_c(samples: &[LogSample]) -> Result<Vec<f64>, AnalysisError> {
    let has_f = samples.first().is_some_and(|s| s.iat_f.is_some());
    if has_f {
        let iat_f = require_channel(samples, "Intake Air Temperature (F)", |s| s.iat_f)?;
        let unit = TemperatureUnit::Fahrenheit;
        return Ok(iat_f.into_iter().map(|t| unit.to_celsius(t)).collect());
    }

    require_channel(samples, "Intake Air Temperature", |s| s.iat_c)
}

/// VE table for a run
pub fn run_volumetric_efficiency(run: &[LogSample]) -> Result<VeTable, AnalysisError> {
    let mrp = require_channel(run, "Manifold Relative Pressure (psi)", |s| s.mrp)?;
    let iat = intake_air_temperature_c(run)?;
    require_min_length(&mrp, 1)?;

    let rpm: Vec<f64> = run.iter().map(|s| s.rpm).collect();
    let load: Vec<f64> = run.iter().map(|s| s.load).collect();
    let ve = compute_volumetric_efficiency(&rpm, &load, &mrp, &iat);

    Ok(VeTable { rpm, ve })
}
