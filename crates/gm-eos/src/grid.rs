//! Pressure × temperature grids of compressibility factors.
//!
//! Every grid point is independent, so the map runs on a rayon parallel
//! iterator. Rows come back in pressure-major order regardless of scheduling.

use crate::component::CriticalProperties;
use crate::eos::EosModel;
use crate::state::StatePoint;
use rayon::prelude::*;
use std::fmt::Write as _;

/// Z for each requested model at one (P, T); `None` where the model failed.
#[derive(Debug, Clone, PartialEq)]
pub struct GridRow {
    pub p_bar: f64,
    pub t_k: f64,
    pub z: Vec<Option<f64>>,
}

/// Result of a grid evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct GridResult {
    pub models: Vec<EosModel>,
    pub rows: Vec<GridRow>,
    pub num_successful: usize,
    pub num_failed: usize,
}

impl GridResult {
    /// Z values of one model, in row order.
    pub fn column(&self, model: EosModel) -> Option<Vec<Option<f64>>> {
        let idx = self.models.iter().position(|&m| m == model)?;
        Some(self.rows.iter().map(|row| row.z[idx]).collect())
    }

    /// CSV table with a `pressure_bar,temperature_k,<model labels>` header.
    ///
    /// Failed points are written as empty cells.
    pub fn to_csv(&self) -> String {
        let mut out = String::from("pressure_bar,temperature_k");
        for model in &self.models {
            out.push(',');
            out.push_str(model.label());
        }
        out.push('\n');

        for row in &self.rows {
            let _ = write!(out, "{},{}", row.p_bar, row.t_k);
            for z in &row.z {
                match z {
                    Some(z) => {
                        let _ = write!(out, ",{z:.6}");
                    }
                    None => out.push(','),
                }
            }
            out.push('\n');
        }
        out
    }
}

fn evaluate_point(
    models: &[EosModel],
    p_bar: f64,
    t_k: f64,
    props: &CriticalProperties,
) -> GridRow {
    let state = StatePoint::new(p_bar, t_k);
    let z = models
        .iter()
        .map(|&model| {
            let result = match &state {
                Ok(s) => model.evaluate(s, props),
                Err(e) => Err(e.clone()),
            };
            match result {
                Ok(z) => Some(z),
                Err(err) => {
                    tracing::warn!(model = model.key(), p_bar, t_k, %err, "grid point failed");
                    None
                }
            }
        })
        .collect();
    GridRow { p_bar, t_k, z }
}

/// Evaluate `models` at every (P, T) combination.
pub fn evaluate_grid(
    models: &[EosModel],
    pressures_bar: &[f64],
    temperatures_k: &[f64],
    props: &CriticalProperties,
) -> GridResult {
    tracing::debug!(
        pressures = pressures_bar.len(),
        temperatures = temperatures_k.len(),
        models = models.len(),
        "evaluating grid"
    );

    let points: Vec<(f64, f64)> = pressures_bar
        .iter()
        .flat_map(|&p| temperatures_k.iter().map(move |&t| (p, t)))
        .collect();

    let rows: Vec<GridRow> = points
        .par_iter()
        .map(|&(p, t)| evaluate_point(models, p, t, props))
        .collect();

    let num_failed = rows
        .iter()
        .flat_map(|row| row.z.iter())
        .filter(|z| z.is_none())
        .count();
    let num_successful = rows.len() * models.len() - num_failed;

    GridResult {
        models: models.to_vec(),
        rows,
        num_successful,
        num_failed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::species::Species;

    fn methane() -> CriticalProperties {
        let s = Species::CH4;
        CriticalProperties::new(s.tc_k(), s.pc_bar(), s.omega()).unwrap()
    }

    #[test]
    fn rows_are_pressure_major() {
        let grid = evaluate_grid(
            &[EosModel::PengRobinson],
            &[10.0, 20.0],
            &[280.0, 300.0, 320.0],
            &methane(),
        );
        let order: Vec<(f64, f64)> = grid.rows.iter().map(|r| (r.p_bar, r.t_k)).collect();
        assert_eq!(
            order,
            vec![
                (10.0, 280.0),
                (10.0, 300.0),
                (10.0, 320.0),
                (20.0, 280.0),
                (20.0, 300.0),
                (20.0, 320.0),
            ]
        );
        assert_eq!(grid.num_successful, 6);
        assert_eq!(grid.num_failed, 0);
    }

    #[test]
    fn matches_serial_evaluation() {
        let props = methane();
        let pressures = [5.0, 25.0, 60.0];
        let temperatures = [250.0, 300.0];
        let grid = evaluate_grid(&EosModel::ALL, &pressures, &temperatures, &props);

        for row in &grid.rows {
            let state = StatePoint::new(row.p_bar, row.t_k).unwrap();
            for (model, z) in EosModel::ALL.iter().zip(&row.z) {
                let serial = model.evaluate(&state, &props).ok();
                assert_eq!(z.map(f64::to_bits), serial.map(f64::to_bits));
            }
        }
    }

    #[test]
    fn invalid_points_are_counted_not_dropped() {
        let grid = evaluate_grid(
            &[EosModel::Virial2, EosModel::PengRobinson],
            &[10.0],
            &[-5.0, 300.0],
            &methane(),
        );
        assert_eq!(grid.rows.len(), 2);
        assert_eq!(grid.rows[0].z, vec![None, None]);
        assert_eq!(grid.num_failed, 2);
        assert_eq!(grid.num_successful, 2);
    }

    #[test]
    fn csv_layout() {
        let grid = evaluate_grid(
            &[EosModel::Virial2, EosModel::PengRobinson],
            &[10.0],
            &[-5.0, 300.0],
            &methane(),
        );
        let csv = grid.to_csv();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "pressure_bar,temperature_k,2nd Virial,Peng-Robinson");
        assert_eq!(lines[1], "10,-5,,");
        assert!(lines[2].starts_with("10,300,0.9"));
        assert_eq!(grid.column(EosModel::PengRobinson).unwrap().len(), 2);
        assert!(grid.column(EosModel::VanDerWaals).is_none());
    }
}
