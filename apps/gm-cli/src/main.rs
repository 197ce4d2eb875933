mod args;
mod error;

use args::{MixtureArgs, NamedValue, OutputFormat, parse_arg};
use clap::{Parser, Subcommand};
use error::{CliError, CliResult};
use gm_blend::{CylinderSettings, FillSimulation, ZSource, blend_weights, filling_record};
use gm_core::units::constants::T_ZERO_CELSIUS;
use gm_eos::{
    BuiltinProperties, EosModel, PropertySource, Quantity, SaturationMethod, StatePoint,
    SweepDefinition, SweepType, evaluate_all, evaluate_grid, filter_catalog, saturation_curve,
    virial_validity, z_van_der_waals_ab,
};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::Level;

#[derive(Parser)]
#[command(name = "gasmix")]
#[command(about = "Gas mixture compressibility and cylinder blending calculator", long_about = None)]
struct Cli {
    /// Output format
    #[arg(long, value_enum, default_value = "table", global = true)]
    format: OutputFormat,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compressibility factor of a mixture at one state point
    Z {
        #[command(flatten)]
        mixture: MixtureArgs,
        /// Pressure (default unit bar), e.g. `10`, `2.5MPa`
        #[arg(short, long)]
        pressure: String,
        /// Temperature (default unit K), e.g. `293.15`, `20C`
        #[arg(short, long)]
        temperature: String,
        /// Only this model (default: all)
        #[arg(short, long)]
        model: Option<EosModel>,
    },
    /// Pseudo-critical properties of a mixture
    Mix {
        #[command(flatten)]
        mixture: MixtureArgs,
    },
    /// Z over a pressure × temperature grid, written as CSV
    Sweep {
        #[command(flatten)]
        mixture: MixtureArgs,
        #[arg(long)]
        p_start: String,
        #[arg(long)]
        p_end: String,
        #[arg(long, default_value_t = 10)]
        p_points: usize,
        #[arg(long)]
        t_start: String,
        #[arg(long)]
        t_end: String,
        #[arg(long, default_value_t = 1)]
        t_points: usize,
        /// Pressure spacing: linear or log
        #[arg(long, default_value = "linear")]
        spacing: SweepType,
        /// Models to evaluate (repeatable, default: all)
        #[arg(short, long)]
        model: Vec<EosModel>,
        /// Output CSV file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Vapor pressure of a pure substance over a temperature range
    Psat {
        /// Substance name, formula or alias
        species: String,
        #[arg(long)]
        t_start: String,
        #[arg(long)]
        t_end: String,
        #[arg(long, default_value_t = 5)]
        points: usize,
        /// Only this method: lk, aw or pr (default: all)
        #[arg(long)]
        method: Option<SaturationMethod>,
    },
    /// Component weights to fill a cylinder with a mixture
    Blend {
        #[command(flatten)]
        mixture: MixtureArgs,
        /// Cylinder volume (default unit L)
        #[arg(long, default_value = "40")]
        volume: String,
        /// Fill pressure (default unit bar)
        #[arg(short, long, default_value = "150")]
        pressure: String,
        /// Gas temperature (default unit K)
        #[arg(short, long, default_value = "293")]
        temperature: String,
        /// Use a fixed compressibility factor
        #[arg(long, conflicts_with = "model")]
        z: Option<f64>,
        /// Equation of state for Z (default: Peng-Robinson)
        #[arg(short, long)]
        model: Option<EosModel>,
    },
    /// Mole percentages from recorded component weights
    Record {
        /// Component and weighed-in mass, e.g. `-w CO2=923.067` or `-w N2=3.08kg`
        #[arg(short, long = "weight", required = true)]
        weights: Vec<NamedValue>,
    },
    /// Simulate filling a cylinder with heat transfer to the wall
    Fill {
        #[arg(long)]
        volume: Option<String>,
        #[arg(long)]
        initial_pressure: Option<String>,
        #[arg(long)]
        target_pressure: Option<String>,
        #[arg(long)]
        temperature: Option<String>,
        /// Fill duration [s]
        #[arg(long)]
        fill_time: Option<f64>,
        /// Time step [s]
        #[arg(long)]
        dt: Option<f64>,
        /// Gas-to-wall heat transfer coefficient [W/(m²·K)]
        #[arg(long)]
        htc: Option<f64>,
        /// Print every n-th step in table output
        #[arg(long, default_value_t = 60)]
        every: usize,
    },
    /// List or search built-in substances
    Species {
        /// Filter by name, formula or alias
        query: Option<String>,
    },
    /// van der Waals Z from tabulated a [L²·bar/mol²] and b [L/mol]
    Vdw {
        #[arg(long)]
        a: f64,
        #[arg(long)]
        b: f64,
        #[arg(short, long)]
        pressure: String,
        #[arg(short, long)]
        temperature: String,
    },
}

fn main() -> CliResult<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let format = cli.format;
    match cli.command {
        Commands::Z {
            mixture,
            pressure,
            temperature,
            model,
        } => cmd_z(&mixture, &pressure, &temperature, model, format),
        Commands::Mix { mixture } => cmd_mix(&mixture, format),
        Commands::Sweep {
            mixture,
            p_start,
            p_end,
            p_points,
            t_start,
            t_end,
            t_points,
            spacing,
            model,
            output,
        } => {
            let pressures =
                SweepDefinition::from_text(p_start, p_end, Quantity::Pressure, p_points, spacing)?;
            let temperatures = SweepDefinition::from_text(
                t_start,
                t_end,
                Quantity::Temperature,
                t_points,
                SweepType::Linear,
            )?;
            cmd_sweep(&mixture, &pressures, &temperatures, model, output.as_deref())
        }
        Commands::Psat {
            species,
            t_start,
            t_end,
            points,
            method,
        } => cmd_psat(&species, &t_start, &t_end, points, method, format),
        Commands::Blend {
            mixture,
            volume,
            pressure,
            temperature,
            z,
            model,
        } => {
            let settings = CylinderSettings {
                volume_l: parse_arg("volume", &volume, Quantity::Volume)?,
                pressure_bar: parse_arg("pressure", &pressure, Quantity::Pressure)?,
                temperature_k: parse_arg("temperature", &temperature, Quantity::Temperature)?,
                ..CylinderSettings::default()
            };
            let source = match z {
                Some(z) => ZSource::Fixed(z),
                None => ZSource::Model(model.unwrap_or(EosModel::PengRobinson)),
            };
            cmd_blend(&mixture, &settings, source, format)
        }
        Commands::Record { weights } => cmd_record(&weights, format),
        Commands::Fill {
            volume,
            initial_pressure,
            target_pressure,
            temperature,
            fill_time,
            dt,
            htc,
            every,
        } => {
            let mut sim = FillSimulation::default();
            if let Some(v) = volume {
                sim.volume_l = parse_arg("volume", &v, Quantity::Volume)?;
            }
            if let Some(p) = initial_pressure {
                sim.initial_pressure_bar = parse_arg("initial-pressure", &p, Quantity::Pressure)?;
            }
            if let Some(p) = target_pressure {
                sim.target_pressure_bar = parse_arg("target-pressure", &p, Quantity::Pressure)?;
            }
            if let Some(t) = temperature {
                sim.initial_temperature_k = parse_arg("temperature", &t, Quantity::Temperature)?;
            }
            sim.fill_time_s = fill_time.unwrap_or(sim.fill_time_s);
            sim.dt_s = dt.unwrap_or(sim.dt_s);
            sim.heat_transfer_coeff = htc.unwrap_or(sim.heat_transfer_coeff);
            cmd_fill(&sim, every, format)
        }
        Commands::Species { query } => cmd_species(query.as_deref(), format),
        Commands::Vdw {
            a,
            b,
            pressure,
            temperature,
        } => cmd_vdw(a, b, &pressure, &temperature, format),
    }
}

fn print_yaml<T: Serialize>(value: &T) -> CliResult<()> {
    print!("{}", serde_yaml::to_string(value)?);
    Ok(())
}

fn state_from_args(pressure: &str, temperature: &str) -> CliResult<StatePoint> {
    let p = parse_arg("pressure", pressure, Quantity::Pressure)?;
    let t = parse_arg("temperature", temperature, Quantity::Temperature)?;
    Ok(StatePoint::new(p, t)?)
}

#[derive(Serialize)]
struct ZRow {
    model: &'static str,
    z: Option<f64>,
    error: Option<String>,
}

#[derive(Serialize)]
struct ZOutput {
    pressure_bar: f64,
    temperature_k: f64,
    tc_k: f64,
    pc_bar: f64,
    omega: f64,
    reduced_temperature: f64,
    reduced_pressure: f64,
    virial_in_domain: bool,
    results: Vec<ZRow>,
}

fn cmd_z(
    mixture_args: &MixtureArgs,
    pressure: &str,
    temperature: &str,
    model: Option<EosModel>,
    format: OutputFormat,
) -> CliResult<()> {
    let mixture = mixture_args.mixture()?;
    let state = state_from_args(pressure, temperature)?;
    let props = mixture.critical_properties();

    let rows: Vec<ZRow> = match model {
        Some(model) => vec![(model, model.evaluate(&state, &props))],
        None => evaluate_all(&state, &props)
            .into_iter()
            .map(|row| (row.model, row.z))
            .collect(),
    }
    .into_iter()
    .map(|(model, result)| ZRow {
        model: model.label(),
        z: result.as_ref().ok().copied(),
        error: result.err().map(|e| e.to_string()),
    })
    .collect();

    let validity = virial_validity(
        state.pressure_bar(),
        state.temperature_k(),
        props.tc_k,
        props.pc_bar,
    );
    let output = ZOutput {
        pressure_bar: state.pressure_bar(),
        temperature_k: state.temperature_k(),
        tc_k: props.tc_k,
        pc_bar: props.pc_bar,
        omega: props.omega,
        reduced_temperature: props.reduced_temperature(state.temperature_k()),
        reduced_pressure: props.reduced_pressure(state.pressure_bar()),
        virial_in_domain: validity.is_valid(),
        results: rows,
    };

    if format == OutputFormat::Yaml {
        return print_yaml(&output);
    }

    println!(
        "State: {:.4} bar, {:.2} K (Tc_mix {:.2} K, Pc_mix {:.3} bar, ω {:.4})",
        output.pressure_bar, output.temperature_k, output.tc_k, output.pc_bar, output.omega
    );
    println!(
        "Reduced: Tr {:.4}, Pr {:.4}",
        output.reduced_temperature, output.reduced_pressure
    );
    for row in &output.results {
        match (&row.z, &row.error) {
            (Some(z), _) => println!("  {:<20} Z = {:.4}", row.model, z),
            (None, Some(e)) => println!("  {:<20} failed: {}", row.model, e),
            (None, None) => println!("  {:<20} -", row.model),
        }
    }
    if !output.virial_in_domain {
        println!("  note: virial results are outside the correlation's domain ({validity:?})");
    }
    Ok(())
}

fn cmd_mix(mixture_args: &MixtureArgs, format: OutputFormat) -> CliResult<()> {
    let mixture = mixture_args.mixture()?;
    let props = mixture.critical_properties();

    if format == OutputFormat::Yaml {
        #[derive(Serialize)]
        struct MixOutput<'a> {
            mixture: &'a gm_eos::Mixture,
            molar_mass: f64,
            critical: gm_eos::CriticalProperties,
        }
        return print_yaml(&MixOutput {
            mixture: &mixture,
            molar_mass: mixture.molar_mass(),
            critical: props,
        });
    }

    println!("Mixture:");
    for (component, x) in mixture.iter() {
        println!("  {:<20} {:>9.4} mol %", component.name(), 100.0 * x);
    }
    println!("Tc_mix: {:.3} K", props.tc_k);
    println!("Pc_mix: {:.3} bar", props.pc_bar);
    println!("ω_mix:  {:.4}", props.omega);
    println!("M_mix:  {:.4} g/mol", mixture.molar_mass());
    Ok(())
}

fn cmd_sweep(
    mixture_args: &MixtureArgs,
    pressures: &SweepDefinition,
    temperatures: &SweepDefinition,
    models: Vec<EosModel>,
    output: Option<&Path>,
) -> CliResult<()> {
    let mixture = mixture_args.mixture()?;
    let models = if models.is_empty() {
        EosModel::ALL.to_vec()
    } else {
        models
    };

    let grid = evaluate_grid(
        &models,
        &pressures.generate_points(),
        &temperatures.generate_points(),
        &mixture.critical_properties(),
    );
    let csv = grid.to_csv();

    if let Some(path) = output {
        std::fs::write(path, csv)?;
        println!(
            "✓ Wrote {} rows to {} ({} failed points)",
            grid.rows.len(),
            path.display(),
            grid.num_failed
        );
    } else {
        print!("{csv}");
    }
    Ok(())
}

#[derive(Serialize)]
struct PsatRow {
    temperature_k: f64,
    method: &'static str,
    psat_bar: Option<f64>,
    error: Option<String>,
}

fn cmd_psat(
    species: &str,
    t_start: &str,
    t_end: &str,
    points: usize,
    method: Option<SaturationMethod>,
    format: OutputFormat,
) -> CliResult<()> {
    let component = BuiltinProperties.component(species)?;
    let props = component.critical();
    let sweep =
        SweepDefinition::from_text(t_start, t_end, Quantity::Temperature, points, SweepType::Linear)?;
    let temperatures = sweep.generate_points();
    let methods = match method {
        Some(m) => vec![m],
        None => SaturationMethod::ALL.to_vec(),
    };

    let curves: Vec<_> = methods
        .iter()
        .map(|&m| (m, saturation_curve(m, &temperatures, &props)))
        .collect();

    if format == OutputFormat::Yaml {
        let rows: Vec<PsatRow> = curves
            .iter()
            .flat_map(|(m, curve)| {
                curve.iter().map(move |point| PsatRow {
                    temperature_k: point.t_k,
                    method: m.label(),
                    psat_bar: point.psat_bar.as_ref().ok().copied(),
                    error: point.psat_bar.as_ref().err().map(|e| e.to_string()),
                })
            })
            .collect();
        return print_yaml(&rows);
    }

    println!(
        "Vapor pressure of {} (Tc {:.2} K, Pc {:.3} bar) [bar]",
        component.name(),
        props.tc_k,
        props.pc_bar
    );
    print!("  {:>10}", "T [K]");
    for m in &methods {
        print!(" {:>16}", m.label());
    }
    println!();
    for (i, t) in temperatures.iter().enumerate() {
        print!("  {t:>10.2}");
        for (_, curve) in &curves {
            match &curve[i].psat_bar {
                Ok(p) => print!(" {p:>16.4}"),
                Err(_) => print!(" {:>16}", "-"),
            }
        }
        println!();
    }
    Ok(())
}

fn cmd_blend(
    mixture_args: &MixtureArgs,
    settings: &CylinderSettings,
    source: ZSource,
    format: OutputFormat,
) -> CliResult<()> {
    let mixture = mixture_args.mixture()?;
    let report = blend_weights(&mixture, settings, source)?;

    if format == OutputFormat::Yaml {
        return print_yaml(&report);
    }

    println!(
        "Cylinder: {:.1} L at {:.1} bar, {:.2} K",
        settings.volume_l, settings.pressure_bar, settings.temperature_k
    );
    println!("Z = {:.4} ({})", report.z, report.z_source);
    println!("Total: {:.3} mol, {:.2} g", report.total_moles, report.total_weight_g);
    for c in &report.components {
        println!(
            "  {:<20} {:>9.4} mol % {:>12.4} mol {:>12.3} g",
            c.name,
            100.0 * c.mole_fraction,
            c.moles,
            c.weight_g
        );
    }
    Ok(())
}

fn cmd_record(weights: &[NamedValue], format: OutputFormat) -> CliResult<()> {
    let entries = weights
        .iter()
        .map(|w| {
            let component = BuiltinProperties.component(&w.name)?;
            let grams = parse_arg("weight", &w.value, Quantity::Mass)?;
            Ok::<_, CliError>((component, grams))
        })
        .collect::<CliResult<Vec<_>>>()?;
    let record = filling_record(&entries)?;

    if format == OutputFormat::Yaml {
        return print_yaml(&record);
    }

    println!(
        "Recorded {:.3} g, {:.4} mol",
        record.total_weight_g, record.total_moles
    );
    for c in &record.components {
        println!(
            "  {:<20} {:>12.3} g {:>10.4} mol {:>10.4} % {:>12.1} ppm",
            c.name, c.weight_g, c.moles, c.mol_percent, c.ppm
        );
    }
    Ok(())
}

fn cmd_fill(sim: &FillSimulation, every: usize, format: OutputFormat) -> CliResult<()> {
    let trajectory = sim.run()?;

    if format == OutputFormat::Yaml {
        return print_yaml(&trajectory);
    }

    let every = every.max(1);
    println!(
        "{:>8} {:>10} {:>12} {:>12}",
        "t [s]", "P [bar]", "T_gas [°C]", "T_wall [°C]"
    );
    let last = trajectory.samples.len().saturating_sub(1);
    for (i, s) in trajectory.samples.iter().enumerate() {
        if i % every == 0 || i == last {
            println!(
                "{:>8.0} {:>10.2} {:>12.2} {:>12.2}",
                s.time_s,
                s.pressure_bar,
                s.gas_temperature_k - T_ZERO_CELSIUS,
                s.wall_temperature_k - T_ZERO_CELSIUS
            );
        }
    }
    let end = trajectory.final_state;
    println!("✓ Final pressure {:.2} bar", end.pressure_bar);
    Ok(())
}

fn cmd_species(query: Option<&str>, format: OutputFormat) -> CliResult<()> {
    let entries = filter_catalog(query.unwrap_or(""));

    if format == OutputFormat::Yaml {
        return print_yaml(&entries);
    }

    if entries.is_empty() {
        println!("No substances match '{}'", query.unwrap_or(""));
        return Ok(());
    }
    println!(
        "  {:<18} {:<22} {:>9} {:>9} {:>8} {:>9}",
        "id", "name", "Tc [K]", "Pc [bar]", "ω", "M"
    );
    for e in entries {
        println!(
            "  {:<18} {:<22} {:>9.2} {:>9.3} {:>8.4} {:>9.4}",
            e.canonical_id, e.display_name, e.tc_k, e.pc_bar, e.omega, e.molar_mass
        );
    }
    Ok(())
}

fn cmd_vdw(a: f64, b: f64, pressure: &str, temperature: &str, format: OutputFormat) -> CliResult<()> {
    let state = state_from_args(pressure, temperature)?;
    if !(a.is_finite() && b.is_finite() && a >= 0.0 && b > 0.0) {
        return Err(CliError::Usage(format!(
            "van der Waals constants must satisfy a >= 0, b > 0 (got a={a}, b={b})"
        )));
    }
    let z = z_van_der_waals_ab(state.pressure_bar(), state.temperature_k(), a, b)?;

    if format == OutputFormat::Yaml {
        #[derive(Serialize)]
        struct VdwOutput {
            a: f64,
            b: f64,
            state: StatePoint,
            z: f64,
        }
        return print_yaml(&VdwOutput { a, b, state, z });
    }

    println!(
        "van der Waals Z = {:.4} at {:.3} bar, {:.2} K",
        z,
        state.pressure_bar(),
        state.temperature_k()
    );
    Ok(())
}
