//! Parameter sweep generation for pressure and temperature grids.

use crate::error::{EosError, EosResult};
use crate::units::{Quantity, parse_quantity};
use gm_core::numeric::{Tolerances, nearly_equal};
use std::fmt;

/// Point spacing of a sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SweepType {
    /// Uniformly spaced points
    Linear,
    /// Logarithmically spaced points
    Logarithmic,
}

impl std::str::FromStr for SweepType {
    type Err = EosError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lin" | "linear" => Ok(Self::Linear),
            "log" | "logarithmic" => Ok(Self::Logarithmic),
            other => Err(EosError::invalid(format!("unknown sweep spacing '{other}'"))),
        }
    }
}

/// A single swept quantity.
///
/// Bounds are stored both as entered and converted to the quantity's working
/// unit (K for temperature, bar for pressure).
#[derive(Debug, Clone, PartialEq)]
pub struct SweepDefinition {
    pub quantity: Quantity,
    pub start: f64,
    pub start_raw: String,
    pub end: f64,
    pub end_raw: String,
    pub num_points: usize,
    pub sweep_type: SweepType,
}

impl SweepDefinition {
    /// Create a sweep from text bounds such as `"10bar"` and `"200bar"`.
    pub fn from_text(
        start_raw: impl Into<String>,
        end_raw: impl Into<String>,
        quantity: Quantity,
        num_points: usize,
        sweep_type: SweepType,
    ) -> EosResult<Self> {
        let start_raw = start_raw.into();
        let end_raw = end_raw.into();

        let start = parse_quantity(&start_raw, quantity)
            .map_err(|e| EosError::invalid(format!("sweep start: {e}")))?;
        let end = parse_quantity(&end_raw, quantity)
            .map_err(|e| EosError::invalid(format!("sweep end: {e}")))?;

        if num_points == 0 {
            return Err(EosError::invalid("sweep must have at least 1 point"));
        }
        if num_points > 1 && nearly_equal(start, end, Tolerances::default()) {
            return Err(EosError::invalid("sweep start and end must differ"));
        }

        Ok(Self {
            quantity,
            start,
            start_raw,
            end,
            end_raw,
            num_points,
            sweep_type,
        })
    }

    /// Every point of the sweep, in order from start to end.
    pub fn generate_points(&self) -> Vec<f64> {
        if self.num_points <= 1 {
            return vec![self.start];
        }
        let steps = (self.num_points - 1) as f64;

        let mut points: Vec<f64> = match self.sweep_type {
            SweepType::Logarithmic if self.start > 0.0 && self.end > 0.0 => {
                let (ls, le) = (self.start.ln(), self.end.ln());
                (0..self.num_points)
                    .map(|i| (ls + i as f64 * (le - ls) / steps).exp())
                    .collect()
            }
            // Non-positive bounds fall back to linear spacing.
            _ => (0..self.num_points)
                .map(|i| self.start + i as f64 * (self.end - self.start) / steps)
                .collect(),
        };

        // Exact endpoint
        if let Some(last) = points.last_mut() {
            *last = self.end;
        }
        points
    }
}

impl fmt::Display for SweepType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Linear => write!(f, "Linear"),
            Self::Logarithmic => write!(f, "Logarithmic"),
        }
    }
}

impl fmt::Display for SweepDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} sweep from {} to {} ({} points, {})",
            self.quantity, self.start_raw, self.end_raw, self.num_points, self.sweep_type
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_temperature_sweep() {
        let sweep =
            SweepDefinition::from_text("0C", "100C", Quantity::Temperature, 5, SweepType::Linear)
                .unwrap();
        let points = sweep.generate_points();
        assert_eq!(points.len(), 5);
        assert!((points[0] - 273.15).abs() < 1e-9);
        assert!((points[2] - 323.15).abs() < 1e-9);
        assert_eq!(points[4], sweep.end);
    }

    #[test]
    fn logarithmic_pressure_sweep() {
        let sweep =
            SweepDefinition::from_text("1bar", "100bar", Quantity::Pressure, 3, SweepType::Logarithmic)
                .unwrap();
        let points = sweep.generate_points();
        assert!((points[1] - 10.0).abs() < 1e-9);
        assert_eq!(points[2], 100.0);
    }

    #[test]
    fn single_point_sweep() {
        let sweep =
            SweepDefinition::from_text("20bar", "20bar", Quantity::Pressure, 1, SweepType::Linear)
                .unwrap();
        assert_eq!(sweep.generate_points(), vec![20.0]);
    }

    #[test]
    fn rejects_bad_definitions() {
        assert!(
            SweepDefinition::from_text("300K", "300K", Quantity::Temperature, 5, SweepType::Linear)
                .is_err()
        );
        assert!(
            SweepDefinition::from_text("300K", "400K", Quantity::Temperature, 0, SweepType::Linear)
                .is_err()
        );
        let err =
            SweepDefinition::from_text("300Q", "400K", Quantity::Temperature, 3, SweepType::Linear)
                .unwrap_err();
        assert!(err.is_input_validation());
    }

    #[test]
    fn spacing_parses() {
        assert_eq!("log".parse::<SweepType>().unwrap(), SweepType::Logarithmic);
        assert_eq!("Linear".parse::<SweepType>().unwrap(), SweepType::Linear);
        assert!("cubic".parse::<SweepType>().is_err());
    }
}
