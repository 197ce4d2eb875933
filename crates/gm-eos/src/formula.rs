//! Molar mass from a chemical formula.
//!
//! Supports element symbols with optional counts and nested parentheses,
//! e.g. `SO2`, `C3H8`, `Ca(OH)2`. Atomic weights are IUPAC standard values
//! (abridged, g/mol).

use crate::error::{EosError, EosResult};

/// Deepest bracket nesting accepted in a formula.
const MAX_NESTING: usize = 32;

fn atomic_weight(symbol: &str) -> Option<f64> {
    let w = match symbol {
        // --- Period 1 ---
        "H" => 1.008,
        "He" => 4.002_602,
        // --- Period 2 ---
        "Li" => 6.94, "Be" => 9.012_183, "B" => 10.81, "C" => 12.011,
        "N" => 14.007, "O" => 15.999, "F" => 18.998_403, "Ne" => 20.1797,
        // --- Period 3 ---
        "Na" => 22.989_769, "Mg" => 24.305, "Al" => 26.981_538, "Si" => 28.085,
        "P" => 30.973_762, "S" => 32.06, "Cl" => 35.45, "Ar" => 39.948,
        // --- Period 4 ---
        "K" => 39.0983, "Ca" => 40.078, "Ti" => 47.867, "Cr" => 51.9961,
        "Mn" => 54.938_043, "Fe" => 55.845, "Co" => 58.933_194, "Ni" => 58.6934,
        "Cu" => 63.546, "Zn" => 65.38, "Ge" => 72.630, "As" => 74.921_595,
        "Se" => 78.971, "Br" => 79.904, "Kr" => 83.798,
        // --- Period 5 (selected) ---
        "Sn" => 118.710, "Sb" => 121.760, "Te" => 127.60, "I" => 126.904_47,
        "Xe" => 131.293,
        // --- Period 6 (selected) ---
        "W" => 183.84, "Hg" => 200.592, "Pb" => 207.2, "Rn" => 222.0,
        _ => return None,
    };
    Some(w)
}

/// Compute molar mass [g/mol] of a chemical formula.
pub fn molar_mass(formula: &str) -> EosResult<f64> {
    let trimmed = formula.trim();
    if trimmed.is_empty() {
        return Err(invalid(formula, "empty formula"));
    }

    let chars: Vec<char> = trimmed.chars().collect();
    let mut parser = Parser {
        formula: trimmed,
        chars: &chars,
        pos: 0,
    };
    parser.group(0)
}

struct Parser<'a> {
    formula: &'a str,
    chars: &'a [char],
    pos: usize,
}

impl Parser<'_> {
    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    /// Parse until end of input or a closing bracket at this depth.
    fn group(&mut self, depth: usize) -> EosResult<f64> {
        if depth > MAX_NESTING {
            return Err(invalid(self.formula, "brackets nested too deeply"));
        }
        let mut total = 0.0;
        let mut saw_term = false;

        while let Some(c) = self.peek() {
            match c {
                '(' | '[' => {
                    let close = if c == '(' { ')' } else { ']' };
                    self.pos += 1;
                    let inner = self.group(depth + 1)?;
                    if self.peek() != Some(close) {
                        return Err(invalid(self.formula, &format!("missing '{close}'")));
                    }
                    self.pos += 1;
                    total += inner * self.count()?;
                }
                ')' | ']' => {
                    if depth == 0 {
                        return Err(invalid(self.formula, "unbalanced ')'"));
                    }
                    break;
                }
                c if c.is_ascii_uppercase() => {
                    let symbol = self.symbol();
                    let weight = atomic_weight(&symbol).ok_or_else(|| {
                        invalid(self.formula, &format!("unknown element '{symbol}'"))
                    })?;
                    total += weight * self.count()?;
                }
                other => {
                    return Err(invalid(
                        self.formula,
                        &format!("unexpected character '{other}'"),
                    ));
                }
            }
            saw_term = true;
        }

        if !saw_term {
            return Err(invalid(self.formula, "empty group"));
        }
        Ok(total)
    }

    fn symbol(&mut self) -> String {
        let mut symbol = String::new();
        if let Some(c) = self.peek() {
            symbol.push(c);
            self.pos += 1;
        }
        while let Some(c) = self.peek() {
            if !c.is_ascii_lowercase() {
                break;
            }
            symbol.push(c);
            self.pos += 1;
        }
        symbol
    }

    fn count(&mut self) -> EosResult<f64> {
        let start = self.pos;
        while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
            self.pos += 1;
        }
        if start == self.pos {
            return Ok(1.0);
        }
        let digits: String = self.chars[start..self.pos].iter().collect();
        let n: u32 = digits
            .parse()
            .map_err(|_| invalid(self.formula, "count too large"))?;
        if n == 0 {
            return Err(invalid(self.formula, "zero count"));
        }
        Ok(f64::from(n))
    }
}

fn invalid(formula: &str, reason: &str) -> EosError {
    EosError::InvalidFormula {
        formula: formula.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn diatomic_gases() {
        assert!(close(molar_mass("N2").unwrap(), 28.014));
        assert!(close(molar_mass("O2").unwrap(), 31.998));
    }

    #[test]
    fn multi_element() {
        assert!(close(molar_mass("SO2").unwrap(), 64.058));
        assert!(close(molar_mass("CO2").unwrap(), 44.009));
        assert!(close(molar_mass("C3H8").unwrap(), 44.097));
        assert!(close(molar_mass("SF6").unwrap(), 146.05));
    }

    #[test]
    fn parentheses_multiply() {
        // Ca(OH)2 = 40.078 + 2 * (15.999 + 1.008)
        assert!(close(molar_mass("Ca(OH)2").unwrap(), 74.092));
    }

    #[test]
    fn whitespace_is_trimmed() {
        assert!(close(molar_mass("  He ").unwrap(), 4.0026));
    }

    #[test]
    fn rejects_garbage() {
        assert!(matches!(molar_mass(""), Err(EosError::InvalidFormula { .. })));
        assert!(molar_mass("Xx2").is_err());
        assert!(molar_mass("n2").is_err());
        assert!(molar_mass("Ca(OH").is_err());
        assert!(molar_mass("CaOH)2").is_err());
        assert!(molar_mass("()").is_err());
        assert!(molar_mass("H0").is_err());
    }

    #[test]
    fn brackets_must_pair_up() {
        assert!(close(molar_mass("[Ca(OH)2]2").unwrap(), 2.0 * 74.092));
        assert!(molar_mass("(H2]").is_err());
        assert!(molar_mass("[H2)").is_err());
    }

    #[test]
    fn deep_nesting_is_rejected() {
        let ok = format!("{}H{}", "(".repeat(MAX_NESTING), ")".repeat(MAX_NESTING));
        assert!(close(molar_mass(&ok).unwrap(), 1.008));

        let deep = format!("{}H", "(".repeat(100_000));
        let err = molar_mass(&deep).unwrap_err();
        assert!(matches!(err, EosError::InvalidFormula { ref reason, .. } if reason.contains("nested")));
    }
}
