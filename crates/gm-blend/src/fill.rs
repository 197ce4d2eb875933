//! Cylinder fill with gas-to-wall heat transfer.
//!
//! Ideal diatomic gas enters at constant molar flow. Each step mixes the new
//! gas adiabatically with the cylinder contents, then exchanges heat with a
//! lumped-capacitance wall. Heat loss to ambient air is neglected.

use crate::error::{BlendError, BlendResult};
use gm_core::units::constants::{PA_PER_BAR, R_J_MOL_K, T_ZERO_CELSIUS};
use gm_core::units::{Temperature, k, to_kelvin};
use serde::Serialize;

/// Most integration steps a single run may take.
pub const MAX_STEPS: usize = 10_000_000;

/// Fill parameters. Defaults describe a 10 L steel cylinder filled with
/// nitrogen from 1 to 150 bar in five minutes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FillSimulation {
    /// Cylinder volume [L]
    pub volume_l: f64,
    /// Pressure before filling [bar]
    pub initial_pressure_bar: f64,
    /// Pressure the flow rate is sized for [bar]
    pub target_pressure_bar: f64,
    /// Initial gas, wall and inlet temperature [K]
    pub initial_temperature_k: f64,
    /// Fill duration [s]
    pub fill_time_s: f64,
    /// Time step [s]
    pub dt_s: f64,
    /// Cylinder mass [kg]
    pub wall_mass_kg: f64,
    /// Wall specific heat [J/(kg·K)]
    pub wall_specific_heat: f64,
    /// Inner surface area [m²]
    pub surface_area_m2: f64,
    /// Gas-to-wall heat transfer coefficient [W/(m²·K)]
    pub heat_transfer_coeff: f64,
    /// Gas constant [J/(mol·K)]
    pub gas_constant: f64,
    /// Keep every n-th step in the trajectory
    pub record_every: usize,
}

impl Default for FillSimulation {
    fn default() -> Self {
        Self {
            volume_l: 10.0,
            initial_pressure_bar: 1.0,
            target_pressure_bar: 150.0,
            initial_temperature_k: 25.0 + T_ZERO_CELSIUS,
            fill_time_s: 300.0,
            dt_s: 1.0,
            wall_mass_kg: 14.0,
            wall_specific_heat: 450.0,
            surface_area_m2: 0.4,
            heat_transfer_coeff: 150.0,
            gas_constant: R_J_MOL_K,
            record_every: 1,
        }
    }
}

/// State of the cylinder at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FillSample {
    pub time_s: f64,
    pub moles: f64,
    pub pressure_bar: f64,
    pub gas_temperature_k: f64,
    pub wall_temperature_k: f64,
}

impl FillSample {
    pub fn gas_temperature(&self) -> Temperature {
        k(self.gas_temperature_k)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FillTrajectory {
    pub samples: Vec<FillSample>,
    pub final_state: FillSample,
}

impl FillSimulation {
    /// Same parameters with a different starting temperature.
    pub fn with_initial_temperature(self, t: Temperature) -> Self {
        Self {
            initial_temperature_k: to_kelvin(t),
            ..self
        }
    }

    fn validate(&self) -> BlendResult<()> {
        let positive = [
            (self.volume_l, "volume"),
            (self.initial_pressure_bar, "initial pressure"),
            (self.target_pressure_bar, "target pressure"),
            (self.initial_temperature_k, "initial temperature"),
            (self.fill_time_s, "fill time"),
            (self.dt_s, "time step"),
            (self.wall_mass_kg, "wall mass"),
            (self.wall_specific_heat, "wall specific heat"),
            (self.gas_constant, "gas constant"),
        ];
        for (value, what) in positive {
            gm_core::ensure_positive(value, what)?;
        }
        for (value, what) in [
            (self.surface_area_m2, "surface area"),
            (self.heat_transfer_coeff, "heat transfer coefficient"),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(BlendError::invalid(format!(
                    "{what} must be finite and non-negative (got {value})"
                )));
            }
        }
        if self.target_pressure_bar <= self.initial_pressure_bar {
            return Err(BlendError::invalid(
                "target pressure must exceed initial pressure",
            ));
        }
        if self.dt_s > self.fill_time_s {
            return Err(BlendError::invalid("time step exceeds fill time"));
        }
        let steps = self.fill_time_s / self.dt_s;
        if steps > MAX_STEPS as f64 {
            return Err(BlendError::invalid(format!(
                "{steps:.3e} time steps exceeds the limit of {MAX_STEPS}; increase the time step"
            )));
        }
        if self.record_every == 0 {
            return Err(BlendError::invalid("record_every must be at least 1"));
        }
        Ok(())
    }

    fn pressure_bar(&self, moles: f64, t_k: f64) -> f64 {
        let volume_m3 = self.volume_l * 1e-3;
        moles * self.gas_constant * t_k / volume_m3 / PA_PER_BAR
    }

    /// Run the fill and return the recorded trajectory.
    pub fn run(&self) -> BlendResult<FillTrajectory> {
        self.validate()?;

        let r = self.gas_constant;
        let cv = 2.5 * r;
        let cp = 3.5 * r;
        let volume_m3 = self.volume_l * 1e-3;
        let t_inlet = self.initial_temperature_k;

        let mut t_gas = self.initial_temperature_k;
        let mut t_wall = self.initial_temperature_k;
        let mut n = self.initial_pressure_bar * PA_PER_BAR * volume_m3 / (r * t_gas);
        let n_target = self.target_pressure_bar * PA_PER_BAR * volume_m3 / (r * t_gas);

        let num_steps = (self.fill_time_s / self.dt_s) as usize;
        let dn = (n_target - n) / self.fill_time_s * self.dt_s;
        let wall_capacity = self.wall_mass_kg * self.wall_specific_heat;
        let conductance = self.heat_transfer_coeff * self.surface_area_m2;

        tracing::debug!(num_steps, n_initial = n, n_target, "starting fill simulation");

        let sample = |step: usize, n: f64, t_gas: f64, t_wall: f64| FillSample {
            time_s: step as f64 * self.dt_s,
            moles: n,
            pressure_bar: self.pressure_bar(n, t_gas),
            gas_temperature_k: t_gas,
            wall_temperature_k: t_wall,
        };

        let mut samples = Vec::with_capacity(num_steps / self.record_every + 2);
        samples.push(sample(0, n, t_gas, t_wall));

        for step in 1..=num_steps {
            let n_prev = n;
            n += dn;

            // Adiabatic mixing of inflow enthalpy with the contents
            let t_mixed = (n_prev * cv * t_gas + dn * cp * t_inlet) / (n * cv);

            let q = conductance * (t_mixed - t_wall) * self.dt_s;
            t_gas = t_mixed - q / (n * cv);
            t_wall += q / wall_capacity;

            if step % self.record_every == 0 || step == num_steps {
                samples.push(sample(step, n, t_gas, t_wall));
            }
        }

        let final_state = sample(num_steps, n, t_gas, t_wall);
        tracing::debug!(
            p_bar = final_state.pressure_bar,
            t_gas_k = t_gas,
            t_wall_k = t_wall,
            "fill simulation finished"
        );
        Ok(FillTrajectory {
            samples,
            final_state,
        })
    }
}
