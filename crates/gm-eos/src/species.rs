//! Built-in gas species and their critical constants.
//!
//! Critical temperature [K], critical pressure [bar], acentric factor and molar
//! mass [g/mol] are standard reference values (Poling, Prausnitz & O'Connell;
//! NIST). Air uses pseudo-critical constants.

use crate::error::EosError;

/// Gas species commonly blended into calibration and process cylinders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Species {
    /// Nitrogen (N₂)
    N2,
    /// Oxygen (O₂)
    O2,
    /// Argon (Ar)
    Ar,
    /// Methane (CH₄)
    CH4,
    /// Hydrogen (H₂)
    H2,
    /// Helium (He)
    He,
    /// Carbon dioxide (CO₂)
    CO2,
    /// Carbon monoxide (CO)
    CO,
    /// Water (H₂O)
    H2O,
    /// Nitrous oxide (N₂O)
    NitrousOxide,
    /// Nitric oxide (NO)
    NitricOxide,
    /// Sulfur dioxide (SO₂)
    SulfurDioxide,
    /// Hydrogen sulfide (H₂S)
    HydrogenSulfide,
    /// Ammonia (NH₃)
    Ammonia,
    /// Hydrogen chloride (HCl)
    HydrogenChloride,
    /// Chlorine (Cl₂)
    Chlorine,
    /// Sulfur hexafluoride (SF₆)
    SulfurHexafluoride,
    /// Neon
    Neon,
    /// Krypton
    Krypton,
    /// Xenon
    Xenon,
    /// Ethane
    Ethane,
    /// Ethylene
    Ethylene,
    /// Propane
    Propane,
    /// Propylene
    Propylene,
    /// n-Butane
    NButane,
    /// Isobutane
    Isobutane,
    /// Air (pseudo-pure)
    Air,
}

/// Tc [K], Pc [bar], omega, molar mass [g/mol].
type CriticalRow = (f64, f64, f64, f64);

impl Species {
    pub const ALL: [Species; 27] = [
        Species::N2,
        Species::O2,
        Species::Ar,
        Species::CH4,
        Species::H2,
        Species::He,
        Species::CO2,
        Species::CO,
        Species::H2O,
        Species::NitrousOxide,
        Species::NitricOxide,
        Species::SulfurDioxide,
        Species::HydrogenSulfide,
        Species::Ammonia,
        Species::HydrogenChloride,
        Species::Chlorine,
        Species::SulfurHexafluoride,
        Species::Neon,
        Species::Krypton,
        Species::Xenon,
        Species::Ethane,
        Species::Ethylene,
        Species::Propane,
        Species::Propylene,
        Species::NButane,
        Species::Isobutane,
        Species::Air,
    ];

    /// Canonical short key (usually the formula).
    pub fn key(&self) -> &'static str {
        match self {
            Species::N2 => "N2",
            Species::O2 => "O2",
            Species::Ar => "Ar",
            Species::CH4 => "CH4",
            Species::H2 => "H2",
            Species::He => "He",
            Species::CO2 => "CO2",
            Species::CO => "CO",
            Species::H2O => "H2O",
            Species::NitrousOxide => "N2O",
            Species::NitricOxide => "NO",
            Species::SulfurDioxide => "SO2",
            Species::HydrogenSulfide => "H2S",
            Species::Ammonia => "NH3",
            Species::HydrogenChloride => "HCl",
            Species::Chlorine => "Cl2",
            Species::SulfurHexafluoride => "SF6",
            Species::Neon => "Ne",
            Species::Krypton => "Kr",
            Species::Xenon => "Xe",
            Species::Ethane => "C2H6",
            Species::Ethylene => "C2H4",
            Species::Propane => "C3H8",
            Species::Propylene => "C3H6",
            Species::NButane => "nC4H10",
            Species::Isobutane => "iC4H10",
            Species::Air => "Air",
        }
    }

    /// Molecular formula, `None` for pseudo-pure mixtures.
    pub fn formula(&self) -> Option<&'static str> {
        match self {
            Species::NButane | Species::Isobutane => Some("C4H10"),
            Species::Air => None,
            other => Some(other.key()),
        }
    }

    /// Get human-readable name.
    pub fn display_name(&self) -> &'static str {
        match self {
            Species::N2 => "Nitrogen",
            Species::O2 => "Oxygen",
            Species::Ar => "Argon",
            Species::CH4 => "Methane",
            Species::H2 => "Hydrogen",
            Species::He => "Helium",
            Species::CO2 => "Carbon Dioxide",
            Species::CO => "Carbon Monoxide",
            Species::H2O => "Water",
            Species::NitrousOxide => "Nitrous Oxide",
            Species::NitricOxide => "Nitric Oxide",
            Species::SulfurDioxide => "Sulfur Dioxide",
            Species::HydrogenSulfide => "Hydrogen Sulfide",
            Species::Ammonia => "Ammonia",
            Species::HydrogenChloride => "Hydrogen Chloride",
            Species::Chlorine => "Chlorine",
            Species::SulfurHexafluoride => "Sulfur Hexafluoride",
            Species::Neon => "Neon",
            Species::Krypton => "Krypton",
            Species::Xenon => "Xenon",
            Species::Ethane => "Ethane",
            Species::Ethylene => "Ethylene",
            Species::Propane => "Propane",
            Species::Propylene => "Propylene",
            Species::NButane => "n-Butane",
            Species::Isobutane => "Isobutane",
            Species::Air => "Air",
        }
    }

    /// Additional names accepted when parsing.
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            Species::SulfurDioxide => &["sulphur dioxide"],
            Species::HydrogenSulfide => &["hydrogen sulphide"],
            Species::SulfurHexafluoride => &["sulphur hexafluoride"],
            Species::Ethylene => &["ethene"],
            Species::Propylene => &["propene"],
            Species::NButane => &["butane", "n-C4H10"],
            Species::Isobutane => &["i-butane", "2-methylpropane", "i-C4H10"],
            Species::NitricOxide => &["nitrogen monoxide"],
            Species::Air => &["atmosphere"],
            _ => &[],
        }
    }

    fn row(&self) -> CriticalRow {
        match self {
            Species::N2 => (126.2, 33.98, 0.0372, 28.0134),
            Species::O2 => (154.58, 50.43, 0.0222, 31.9988),
            Species::Ar => (150.8, 48.73, -0.00219, 39.948),
            Species::CH4 => (190.564, 45.99, 0.01142, 16.0425),
            Species::H2 => (33.145, 12.964, -0.219, 2.01588),
            Species::He => (5.1953, 2.2746, -0.3836, 4.002602),
            Species::CO2 => (304.1282, 73.773, 0.22394, 44.0095),
            Species::CO => (132.86, 34.94, 0.0497, 28.0101),
            Species::H2O => (647.096, 220.64, 0.3443, 18.01528),
            Species::NitrousOxide => (309.52, 72.45, 0.1613, 44.0128),
            Species::NitricOxide => (180.0, 64.8, 0.582, 30.0061),
            Species::SulfurDioxide => (430.64, 78.84, 0.2454, 64.0638),
            Species::HydrogenSulfide => (373.1, 90.0, 0.1005, 34.0809),
            Species::Ammonia => (405.4, 113.33, 0.25601, 17.03052),
            Species::HydrogenChloride => (324.7, 83.1, 0.1317, 36.46094),
            Species::Chlorine => (417.15, 79.91, 0.0688, 70.906),
            Species::SulfurHexafluoride => (318.72, 37.55, 0.21, 146.0554),
            Species::Neon => (44.4918, 26.786, -0.0396, 20.1797),
            Species::Krypton => (209.48, 55.25, -0.00089, 83.798),
            Species::Xenon => (289.733, 58.42, 0.00363, 131.293),
            Species::Ethane => (305.32, 48.72, 0.0995, 30.069),
            Species::Ethylene => (282.34, 50.41, 0.0862, 28.0532),
            Species::Propane => (369.83, 42.48, 0.1524, 44.0956),
            Species::Propylene => (364.9, 46.0, 0.142, 42.0797),
            Species::NButane => (425.12, 37.96, 0.2002, 58.1222),
            Species::Isobutane => (407.8, 36.4, 0.1835, 58.1222),
            Species::Air => (132.53, 37.86, 0.0335, 28.9647),
        }
    }

    /// Critical temperature [K].
    pub fn tc_k(&self) -> f64 {
        self.row().0
    }

    /// Critical pressure [bar].
    pub fn pc_bar(&self) -> f64 {
        self.row().1
    }

    /// Acentric factor [-].
    pub fn omega(&self) -> f64 {
        self.row().2
    }

    /// Molar mass [g/mol].
    pub fn molar_mass(&self) -> f64 {
        self.row().3
    }

    /// Case, space and hyphen insensitive match against key, formula,
    /// display name and aliases.
    pub fn matches_name(&self, name: &str) -> bool {
        let wanted = normalize(name);
        if wanted.is_empty() {
            return false;
        }
        std::iter::once(self.key())
            .chain(self.formula())
            .chain(std::iter::once(self.display_name()))
            .chain(self.aliases().iter().copied())
            .any(|candidate| normalize(candidate) == wanted)
    }
}

/// Upper-case and drop separators so "Nitrous Oxide", "nitrous-oxide" and
/// "NITROUS_OXIDE" compare equal.
pub(crate) fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .flat_map(char::to_uppercase)
        .collect()
}

impl std::str::FromStr for Species {
    type Err = EosError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Species::ALL
            .iter()
            .copied()
            .find(|species| species.matches_name(s))
            .ok_or_else(|| EosError::UnknownComponent {
                name: s.trim().to_string(),
            })
    }
}

impl std::fmt::Display for Species {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}
