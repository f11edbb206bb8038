//! Unit conversion utilities.

/// kPa per psi
pub const KPA_PER_PSI: f64 = 6.89476;

/// Temperature unit a channel was logged in
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum TemperatureUnit {
    #[default]
    Celsius,
    Fahrenheit,
}

impl TemperatureUnit {
    /// Convert a reading in this unit to Celsius
    pub fn to_celsius(&self, value: f64) -> f64 {
        match self {
            TemperatureUnit::Celsius => value,
            TemperatureUnit::Fahrenheit => (value - 32.0) * 5.0 / 9.0,
        }
    }
}

/// Gauge pressure in psi to absolute pressure in kPa against a fixed baseline
pub fn psi_gauge_to_kpa_absolute(psi: f64, atmosphere_kpa: f64) -> f64 {
    psi * KPA_PER_PSI + atmosphere_kpa
}
