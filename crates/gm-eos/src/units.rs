//! Unit-aware text input.
//!
//! Values are entered as text such as `20C`, `150 bar` or `2.5%` and parsed
//! into the working units of the gas calculations: K, bar, L, percent and g.

use std::fmt;

/// Quantity family of a text input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quantity {
    /// Temperature (working unit: K)
    Temperature,
    /// Absolute pressure (working unit: bar)
    Pressure,
    /// Volume (working unit: L)
    Volume,
    /// Mole percentage (working unit: %)
    Percent,
    /// Mass (working unit: g)
    Mass,
}

impl Quantity {
    /// Symbol of the unit parsed values are returned in.
    pub fn working_unit(self) -> &'static str {
        match self {
            Self::Temperature => "K",
            Self::Pressure => "bar",
            Self::Volume => "L",
            Self::Percent => "%",
            Self::Mass => "g",
        }
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Temperature => write!(f, "Temperature"),
            Self::Pressure => write!(f, "Pressure"),
            Self::Volume => write!(f, "Volume"),
            Self::Percent => write!(f, "Percent"),
            Self::Mass => write!(f, "Mass"),
        }
    }
}

/// Error in unit parsing or conversion.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum UnitError {
    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Unknown unit '{unit}' for {quantity}")]
    UnknownUnit { unit: String, quantity: Quantity },

    #[error("Ambiguous unit '{unit}': {reason}")]
    AmbiguousUnit { unit: String, reason: &'static str },

    #[error("Value {value} out of range: {reason}")]
    OutOfRange { value: f64, reason: &'static str },
}

/// A parsed value that keeps the text it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct UnitValue {
    pub raw_text: String,
    pub value: f64,
    pub quantity: Quantity,
}

impl UnitValue {
    pub fn from_text(raw_text: impl Into<String>, quantity: Quantity) -> Result<Self, UnitError> {
        let raw_text = raw_text.into();
        let value = parse_quantity(&raw_text, quantity)?;
        Ok(Self {
            raw_text,
            value,
            quantity,
        })
    }
}

/// Parse `raw_text` as `quantity`, returning the value in its working unit.
///
/// A bare number is taken to already be in the working unit.
pub fn parse_quantity(raw_text: &str, quantity: Quantity) -> Result<f64, UnitError> {
    let trimmed = raw_text.trim();
    match quantity {
        Quantity::Temperature => parse_temperature(trimmed),
        Quantity::Pressure => parse_pressure(trimmed),
        Quantity::Volume => parse_volume(trimmed),
        Quantity::Percent => parse_percent(trimmed),
        Quantity::Mass => parse_mass(trimmed),
    }
}

fn unknown(unit: &str, quantity: Quantity) -> UnitError {
    UnitError::UnknownUnit {
        unit: unit.to_string(),
        quantity,
    }
}

fn parse_temperature(input: &str) -> Result<f64, UnitError> {
    let (value, unit) = split_value_and_unit(input)?;

    let kelvin = match unit.to_lowercase().as_str() {
        "" | "k" | "kelvin" => value,
        "c" | "°c" | "celsius" => value + 273.15,
        "f" | "°f" | "fahrenheit" => (value + 459.67) * 5.0 / 9.0,
        "r" | "°r" | "rankine" => value * 5.0 / 9.0,
        _ => return Err(unknown(&unit, Quantity::Temperature)),
    };

    if kelvin <= 0.0 {
        return Err(UnitError::OutOfRange {
            value: kelvin,
            reason: "absolute temperature must be > 0 K",
        });
    }
    Ok(kelvin)
}

fn parse_pressure(input: &str) -> Result<f64, UnitError> {
    let (value, unit) = split_value_and_unit(input)?;

    let bar = match unit.to_lowercase().as_str() {
        "" | "bar" | "bara" => value,
        "mbar" => value * 1e-3,
        "barg" => value + 1.013_25,
        "pa" => value * 1e-5,
        "kpa" => value * 1e-2,
        "mpa" => value * 10.0,
        "atm" => value * 1.013_25,
        "psia" => value * 0.068_947_57,
        "psig" => (value + 14.695_95) * 0.068_947_57,
        "psi" => {
            return Err(UnitError::AmbiguousUnit {
                unit,
                reason: "use 'psia' (absolute) or 'psig' (gauge)",
            });
        }
        _ => return Err(unknown(&unit, Quantity::Pressure)),
    };

    if bar <= 0.0 {
        return Err(UnitError::OutOfRange {
            value: bar,
            reason: "absolute pressure must be positive",
        });
    }
    Ok(bar)
}

fn parse_volume(input: &str) -> Result<f64, UnitError> {
    let (value, unit) = split_value_and_unit(input)?;

    let liters = match unit.to_lowercase().as_str() {
        "" | "l" | "liter" | "litre" => value,
        "ml" => value * 1e-3,
        "m3" | "m^3" | "m³" => value * 1e3,
        _ => return Err(unknown(&unit, Quantity::Volume)),
    };

    if liters <= 0.0 {
        return Err(UnitError::OutOfRange {
            value: liters,
            reason: "volume must be positive",
        });
    }
    Ok(liters)
}

fn parse_percent(input: &str) -> Result<f64, UnitError> {
    let number = input.strip_suffix('%').unwrap_or(input).trim();
    let percent: f64 = number
        .parse()
        .map_err(|_| UnitError::ParseError(format!("could not parse percentage from '{input}'")))?;

    if !(0.0..=100.0).contains(&percent) {
        return Err(UnitError::OutOfRange {
            value: percent,
            reason: "percentage must be between 0 and 100",
        });
    }
    Ok(percent)
}

fn parse_mass(input: &str) -> Result<f64, UnitError> {
    let (value, unit) = split_value_and_unit(input)?;

    let grams = match unit.to_lowercase().as_str() {
        "" | "g" => value,
        "mg" => value * 1e-3,
        "kg" => value * 1e3,
        "lbm" => value * 453.592_37,
        "lb" => {
            return Err(UnitError::AmbiguousUnit {
                unit,
                reason: "use 'lbm' for mass",
            });
        }
        _ => return Err(unknown(&unit, Quantity::Mass)),
    };

    if grams < 0.0 {
        return Err(UnitError::OutOfRange {
            value: grams,
            reason: "mass cannot be negative",
        });
    }
    Ok(grams)
}

/// Split `"14.7 psia"` into `(14.7, "psia")`; a bare number has an empty unit.
fn split_value_and_unit(input: &str) -> Result<(f64, String), UnitError> {
    let trimmed = input.trim();

    // An exponent marker only counts as numeric when a digit or sign follows.
    let bytes = trimmed.as_bytes();
    let split_idx = trimmed
        .char_indices()
        .find(|&(i, c)| {
            let exponent = (c == 'e' || c == 'E')
                && i > 0
                && bytes
                    .get(i + 1)
                    .is_some_and(|&n| n.is_ascii_digit() || n == b'-' || n == b'+');
            !(c.is_ascii_digit() || c == '.' || c == '-' || c == '+' || exponent)
        })
        .map_or(trimmed.len(), |(i, _)| i);

    let (num_part, unit_part) = trimmed.split_at(split_idx);
    let value: f64 = num_part.trim().parse().map_err(|_| {
        UnitError::ParseError(format!("could not parse numeric value from '{input}'"))
    })?;
    if !value.is_finite() {
        return Err(UnitError::ParseError(format!("non-finite value in '{input}'")));
    }

    Ok((value, unit_part.trim().to_string()))
}
