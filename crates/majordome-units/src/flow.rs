//! Gas flow rate unit conversions
//!
//! Conversion is performed assuming the ideal gas law. Concentration at
//! normal conditions multiplied by the gas molar weight gives the base
//! conversion factor between volumetric and mass flow.

use serde::{Deserialize, Serialize};

/// Molar gas constant [J/(kmol.K)]
pub const GAS_CONSTANT: f64 = 8_314.462_618_153_24;

/// One standard atmosphere [Pa]
pub const ONE_ATM: f64 = 101_325.0;

/// Reference conditions for gas flow rate conversions
///
/// "Normal" and "standard" follow the metering conventions of the
/// original tooling: normal temperature 288.15 K, standard temperature
/// 273.15 K, both at one atmosphere.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlowUnits {
    /// Reference temperature for normal conditions [K]
    pub t_normal: f64,
    /// Reference temperature for standard conditions [K]
    pub t_standard: f64,
    /// Reference pressure for standard conditions [Pa]
    pub p_standard: f64,
}

impl Default for FlowUnits {
    fn default() -> Self {
        Self {
            t_normal: 288.15,
            t_standard: 273.15,
            p_standard: ONE_ATM,
        }
    }
}

impl FlowUnits {
    /// Create a converter with the default reference conditions
    pub fn new() -> Self {
        Self::default()
    }

    /// Ideal gas concentration at normal conditions [kmol/m3]
    pub fn normal_concentration(&self) -> f64 {
        self.p_standard / (GAS_CONSTANT * self.t_normal)
    }

    /// Convert a flow given in Nm3/h to kg/s
    ///
    /// `mw` is the solution mean molecular weight in kg/kmol.
    pub fn normal_flow_to_mass_flow(&self, q: f64, mw: f64) -> f64 {
        self.normal_concentration() * mw * q / 3600.0
    }

    /// Convert a laboratory gas flow in Scm3/min (sccm) to mean speed in m/s
    ///
    /// The flow is rescaled from standard reference conditions to the
    /// working conditions, then divided by the cross-sectional area.
    pub fn standard_flow_to_gas_speed(&self, q: f64, conditions: &GasSpeedConditions) -> f64 {
        let min_per_sec = 1.0 / 60.0;
        let m3_per_cm3 = 1.0 / 1.0e+06;

        let scale = (conditions.t_work / conditions.p_work) * (self.p_standard / self.t_standard);
        let volumetric = q * min_per_sec * m3_per_cm3 * scale;

        volumetric / conditions.a_cross
    }
}

/// Working conditions for gas speed conversion
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GasSpeedConditions {
    /// Reactor working temperature [K]
    pub t_work: f64,
    /// Reactor working pressure [Pa]
    pub p_work: f64,
    /// Reactor cross-sectional area [m2]
    pub a_cross: f64,
}

impl Default for GasSpeedConditions {
    fn default() -> Self {
        Self {
            t_work: 298.15,
            p_work: ONE_ATM,
            a_cross: 1.0,
        }
    }
}

impl GasSpeedConditions {
    /// Create conditions with the defaults (298.15 K, 1 atm, 1 m2)
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the working temperature [K]
    pub fn with_temperature(mut self, t_work: f64) -> Self {
        self.t_work = t_work;
        self
    }

    /// Set the working pressure [Pa]
    pub fn with_pressure(mut self, p_work: f64) -> Self {
        self.p_work = p_work;
        self
    }

    /// Set the cross-sectional area [m2]
    pub fn with_cross_section(mut self, a_cross: f64) -> Self {
        self.a_cross = a_cross;
        self
    }
}
