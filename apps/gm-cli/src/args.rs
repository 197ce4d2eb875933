//! Argument types shared by several subcommands.

use crate::error::{CliError, CliResult};
use clap::{Args, ValueEnum};
use gm_eos::{
    ComponentRegistry, CriticalProperties, Mixture, PropertySource, Quantity, parse_quantity,
};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Yaml,
}

/// `NAME=VALUE` (or `NAME:VALUE`) pair, e.g. `N2=83.5` or `CO2:923.067g`.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedValue {
    pub name: String,
    pub value: String,
}

impl FromStr for NamedValue {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, value) = s
            .split_once('=')
            .or_else(|| s.split_once(':'))
            .ok_or_else(|| format!("expected NAME=VALUE, got '{s}'"))?;
        let (name, value) = (name.trim(), value.trim());
        if name.is_empty() || value.is_empty() {
            return Err(format!("expected NAME=VALUE, got '{s}'"));
        }
        Ok(Self {
            name: name.to_string(),
            value: value.to_string(),
        })
    }
}

/// User-defined component: `NAME:FORMULA:TC_K:PC_BAR:OMEGA`.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomComponent {
    pub name: String,
    pub formula: String,
    pub tc_k: f64,
    pub pc_bar: f64,
    pub omega: f64,
}

impl FromStr for CustomComponent {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fields: Vec<&str> = s.split(':').map(str::trim).collect();
        let [name, formula, tc, pc, omega] = fields[..] else {
            return Err(format!("expected NAME:FORMULA:TC_K:PC_BAR:OMEGA, got '{s}'"));
        };
        let number = |text: &str, what: &str| {
            text.parse::<f64>()
                .map_err(|_| format!("invalid {what} '{text}' in '{s}'"))
        };
        Ok(Self {
            name: name.to_string(),
            formula: formula.to_string(),
            tc_k: number(tc, "critical temperature")?,
            pc_bar: number(pc, "critical pressure")?,
            omega: number(omega, "acentric factor")?,
        })
    }
}

/// Mixture given on the command line.
#[derive(Debug, Clone, Args)]
pub struct MixtureArgs {
    /// Component and mole percentage, e.g. `-c N2=83.5 -c CO2=16.5`
    #[arg(short = 'c', long = "component", required = true)]
    pub components: Vec<NamedValue>,

    /// Extra component not in the built-in table: NAME:FORMULA:TC_K:PC_BAR:OMEGA
    #[arg(long = "custom")]
    pub custom: Vec<CustomComponent>,
}

impl MixtureArgs {
    pub fn registry(&self) -> CliResult<ComponentRegistry> {
        let mut registry = ComponentRegistry::with_builtins();
        for custom in &self.custom {
            let critical = CriticalProperties::new(custom.tc_k, custom.pc_bar, custom.omega)?;
            registry.register_formula(&custom.name, &custom.formula, critical)?;
        }
        Ok(registry)
    }

    pub fn mixture(&self) -> CliResult<Mixture> {
        let registry = self.registry()?;
        let items = self
            .components
            .iter()
            .map(|entry| {
                let component = registry.component(&entry.name)?;
                let percent = parse_quantity(&entry.value, Quantity::Percent)?;
                Ok::<_, CliError>((component, percent))
            })
            .collect::<CliResult<Vec<_>>>()?;
        Ok(Mixture::from_percentages(items)?)
    }
}

/// Parse a unit-aware value, naming the flag in the error.
pub fn parse_arg(flag: &str, text: &str, quantity: Quantity) -> CliResult<f64> {
    parse_quantity(text, quantity).map_err(|e| CliError::Usage(format!("--{flag}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_values() {
        let nv: NamedValue = "N2=83.5".parse().unwrap();
        assert_eq!(nv.name, "N2");
        assert_eq!(nv.value, "83.5");
        let nv: NamedValue = "carbon dioxide : 16.5%".parse().unwrap();
        assert_eq!(nv.name, "carbon dioxide");
        assert_eq!(nv.value, "16.5%");
        assert!("N2".parse::<NamedValue>().is_err());
        assert!("=5".parse::<NamedValue>().is_err());
    }

    #[test]
    fn custom_components() {
        let c: CustomComponent = "R134a:C2H2F4:374.21:40.59:0.327".parse().unwrap();
        assert_eq!(c.formula, "C2H2F4");
        assert_eq!(c.tc_k, 374.21);
        assert!("R134a:C2H2F4:374.21".parse::<CustomComponent>().is_err());
        assert!("R134a:C2H2F4:hot:40.59:0.327".parse::<CustomComponent>().is_err());
    }

    #[test]
    fn mixture_from_args() {
        let args = MixtureArgs {
            components: vec!["N2=80".parse().unwrap(), "R134a=20%".parse().unwrap()],
            custom: vec!["R134a:C2H2F4:374.21:40.59:0.327".parse().unwrap()],
        };
        let mixture = args.mixture().unwrap();
        assert_eq!(mixture.len(), 2);
        assert!((mixture.mole_fraction("R134a") - 0.2).abs() < 1e-12);
    }

    #[test]
    fn bad_mixture_is_reported() {
        let args = MixtureArgs {
            components: vec!["N2=80".parse().unwrap(), "O2=30".parse().unwrap()],
            custom: vec![],
        };
        assert!(matches!(args.mixture(), Err(CliError::Eos(_))));

        let args = MixtureArgs {
            components: vec!["kryptonite=100".parse().unwrap()],
            custom: vec![],
        };
        assert!(args.mixture().is_err());
    }
}
