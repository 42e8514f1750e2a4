//! Parsing of condensed chemical formulas into element composition maps.
//!
//! A formula like `Ca(OH)2` is scanned left to right: every match of
//! "capital letter + optional lowercase letter" is an element symbol, an
//! immediately following digit run is its count (1 if absent), and a
//! parenthesized or bracketed subgroup followed by a digit run multiplies
//! every count inside the group. Nesting depth is arbitrary, repeated symbols
//! accumulate, whitespace is ignored. Charges, hydrates and isotopic labels
//! are rejected - callers normalize those away first.
use crate::errors::ChemEngineError;
use serde::Serialize;
use std::collections::HashMap;

// Element data: symbol plus standard atomic mass, g/mol
pub struct Element {
    pub symbol: &'static str,
    pub atomic_mass: f64,
}

pub const ELEMENTS: &[Element] = &[
    Element { symbol: "H", atomic_mass: 1.008 },
    Element { symbol: "He", atomic_mass: 4.0026 },
    Element { symbol: "Li", atomic_mass: 6.94 },
    Element { symbol: "Be", atomic_mass: 9.0122 },
    Element { symbol: "B", atomic_mass: 10.81 },
    Element { symbol: "C", atomic_mass: 12.011 },
    Element { symbol: "N", atomic_mass: 14.007 },
    Element { symbol: "O", atomic_mass: 15.999 },
    Element { symbol: "F", atomic_mass: 18.998 },
    Element { symbol: "Ne", atomic_mass: 20.18 },
    Element { symbol: "Na", atomic_mass: 22.99 },
    Element { symbol: "Mg", atomic_mass: 24.305 },
    Element { symbol: "Al", atomic_mass: 26.98 },
    Element { symbol: "Si", atomic_mass: 28.085 },
    Element { symbol: "P", atomic_mass: 30.974 },
    Element { symbol: "S", atomic_mass: 32.065 },
    Element { symbol: "Cl", atomic_mass: 35.45 },
    Element { symbol: "Ar", atomic_mass: 39.948 },
    Element { symbol: "K", atomic_mass: 39.102 },
    Element { symbol: "Ca", atomic_mass: 40.08 },
    Element { symbol: "Sc", atomic_mass: 44.9559 },
    Element { symbol: "Ti", atomic_mass: 47.867 },
    Element { symbol: "V", atomic_mass: 50.9415 },
    Element { symbol: "Cr", atomic_mass: 51.9961 },
    Element { symbol: "Mn", atomic_mass: 54.938 },
    Element { symbol: "Fe", atomic_mass: 55.845 },
    Element { symbol: "Co", atomic_mass: 58.933 },
    Element { symbol: "Ni", atomic_mass: 58.69 },
    Element { symbol: "Cu", atomic_mass: 63.546 },
    Element { symbol: "Zn", atomic_mass: 65.38 },
    Element { symbol: "Ga", atomic_mass: 69.723 },
    Element { symbol: "Ge", atomic_mass: 72.64 },
    Element { symbol: "As", atomic_mass: 74.9216 },
    Element { symbol: "Se", atomic_mass: 78.96 },
    Element { symbol: "Br", atomic_mass: 79.904 },
    Element { symbol: "Kr", atomic_mass: 83.798 },
    Element { symbol: "Rb", atomic_mass: 85.4678 },
    Element { symbol: "Sr", atomic_mass: 87.62 },
    Element { symbol: "Y", atomic_mass: 88.9059 },
    Element { symbol: "Zr", atomic_mass: 91.224 },
    Element { symbol: "Nb", atomic_mass: 92.9064 },
    Element { symbol: "Mo", atomic_mass: 95.94 },
    Element { symbol: "Tc", atomic_mass: 98.0 },
    Element { symbol: "Ru", atomic_mass: 101.07 },
    Element { symbol: "Rh", atomic_mass: 102.9055 },
    Element { symbol: "Pd", atomic_mass: 106.42 },
    Element { symbol: "Ag", atomic_mass: 107.8682 },
    Element { symbol: "Cd", atomic_mass: 112.411 },
    Element { symbol: "In", atomic_mass: 114.818 },
    Element { symbol: "Sn", atomic_mass: 118.71 },
    Element { symbol: "Sb", atomic_mass: 121.76 },
    Element { symbol: "Te", atomic_mass: 127.6 },
    Element { symbol: "I", atomic_mass: 126.9045 },
    Element { symbol: "Xe", atomic_mass: 131.293 },
    Element { symbol: "Cs", atomic_mass: 132.9055 },
    Element { symbol: "Ba", atomic_mass: 137.327 },
    Element { symbol: "La", atomic_mass: 138.9055 },
    Element { symbol: "Ce", atomic_mass: 140.116 },
    Element { symbol: "Nd", atomic_mass: 144.24 },
    Element { symbol: "W", atomic_mass: 183.84 },
    Element { symbol: "Pt", atomic_mass: 195.084 },
    Element { symbol: "Au", atomic_mass: 196.9666 },
    Element { symbol: "Hg", atomic_mass: 200.59 },
    Element { symbol: "Pb", atomic_mass: 207.2 },
    Element { symbol: "Bi", atomic_mass: 208.9804 },
    Element { symbol: "Th", atomic_mass: 232.0381 },
    Element { symbol: "U", atomic_mass: 238.0289 },
    // heavier elements added as needed
];

pub fn element_mass(symbol: &str) -> Option<f64> {
    ELEMENTS
        .iter()
        .find(|e| e.symbol == symbol)
        .map(|e| e.atomic_mass)
}

pub fn is_known_element(symbol: &str) -> bool {
    ELEMENTS.iter().any(|e| e.symbol == symbol)
}

/// Immutable element composition of a single species. Element order is
/// first-seen order in the source text; counts are strictly positive.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChemicalFormula {
    source: String,
    elements: Vec<String>,
    counts: HashMap<String, usize>,
}

impl ChemicalFormula {
    /// The formula text as supplied by the caller, whitespace stripped.
    pub fn source(&self) -> &str {
        &self.source
    }
    /// Element symbols in first-seen order.
    pub fn elements(&self) -> &[String] {
        &self.elements
    }
    /// Atom count of `symbol` in this species, 0 if absent.
    pub fn count(&self, symbol: &str) -> usize {
        self.counts.get(symbol).copied().unwrap_or(0)
    }
    pub fn counts(&self) -> &HashMap<String, usize> {
        &self.counts
    }
    /// The same species with every count multiplied by `factor`; used by the
    /// balancer to fold a leading integer coefficient into the composition.
    pub(crate) fn scaled(&self, factor: usize) -> ChemicalFormula {
        ChemicalFormula {
            source: self.source.clone(),
            elements: self.elements.clone(),
            counts: self
                .counts
                .iter()
                .map(|(el, count)| (el.clone(), count * factor))
                .collect(),
        }
    }

    /// Molar mass in g/mol. Every symbol was validated against ELEMENTS at
    /// parse time, so the sum is total.
    pub fn molar_mass(&self) -> f64 {
        self.elements
            .iter()
            .map(|el| element_mass(el).unwrap_or(0.0) * self.counts[el] as f64)
            .sum()
    }
}

// one nesting level of the scan: the composition collected inside the
// currently open bracket, plus which bracket opened it
struct GroupFrame {
    opener: Option<char>,
    elements: Vec<String>,
    counts: HashMap<String, usize>,
}

impl GroupFrame {
    fn new(opener: Option<char>) -> Self {
        Self {
            opener,
            elements: Vec::new(),
            counts: HashMap::new(),
        }
    }

    fn add(&mut self, symbol: &str, count: usize) {
        if !self.counts.contains_key(symbol) {
            self.elements.push(symbol.to_string());
        }
        *self.counts.entry(symbol.to_string()).or_insert(0) += count;
    }
}

// reads a digit run starting at position i, returns (value, next position);
// None if chars[i] is not a digit
fn read_count(
    chars: &[char],
    mut i: usize,
    formula: &str,
) -> Result<(Option<usize>, usize), ChemEngineError> {
    let start = i;
    while i < chars.len() && chars[i].is_ascii_digit() {
        i += 1;
    }
    if i == start {
        return Ok((None, i));
    }
    let digits: String = chars[start..i].iter().collect();
    let value: usize = digits
        .parse()
        .map_err(|_| ChemEngineError::Parse(format!("count '{}' too large in '{}'", digits, formula)))?;
    if value == 0 {
        return Err(ChemEngineError::Parse(format!(
            "zero count in formula '{}'",
            formula
        )));
    }
    Ok((Some(value), i))
}

/// Parse a condensed chemical formula into its element composition.
pub fn parse_formula(formula: &str) -> Result<ChemicalFormula, ChemEngineError> {
    let compact: String = formula.chars().filter(|c| !c.is_whitespace()).collect();
    if compact.is_empty() {
        return Err(ChemEngineError::Parse("empty formula".to_string()));
    }
    let chars: Vec<char> = compact.chars().collect();
    let mut stack: Vec<GroupFrame> = vec![GroupFrame::new(None)];
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        if c == '(' || c == '[' {
            stack.push(GroupFrame::new(Some(c)));
            i += 1;
        } else if c == ')' || c == ']' {
            let expected = if c == ')' { '(' } else { '[' };
            let frame = stack.pop().filter(|f| f.opener == Some(expected)).ok_or_else(|| {
                ChemEngineError::Parse(format!("unmatched '{}' in '{}'", c, compact))
            })?;
            if frame.elements.is_empty() {
                return Err(ChemEngineError::Parse(format!(
                    "empty group in '{}'",
                    compact
                )));
            }
            i += 1;
            let (mult, next) = read_count(&chars, i, &compact)?;
            i = next;
            let mult = mult.unwrap_or(1);
            // stack cannot be empty here: the bottom frame has opener None
            // and is never popped by the filter above
            let parent = stack.last_mut().ok_or_else(|| {
                ChemEngineError::Parse(format!("unmatched '{}' in '{}'", c, compact))
            })?;
            for el in &frame.elements {
                parent.add(el, frame.counts[el] * mult);
            }
        } else if c.is_ascii_uppercase() {
            let mut symbol = c.to_string();
            i += 1;
            if i < chars.len() && chars[i].is_ascii_lowercase() {
                symbol.push(chars[i]);
                i += 1;
            }
            if !is_known_element(&symbol) {
                return Err(ChemEngineError::Parse(format!(
                    "unknown element symbol '{}' in '{}'",
                    symbol, compact
                )));
            }
            let (count, next) = read_count(&chars, i, &compact)?;
            i = next;
            stack
                .last_mut()
                .expect("scan stack always holds the bottom frame")
                .add(&symbol, count.unwrap_or(1));
        } else if c.is_ascii_digit() {
            return Err(ChemEngineError::Parse(format!(
                "numeric multiplier with no preceding symbol or group in '{}'",
                compact
            )));
        } else {
            // also rejects charge / hydrate / isotope syntax: + - * . ^ {
            return Err(ChemEngineError::Parse(format!(
                "unexpected character '{}' in '{}'",
                c, compact
            )));
        }
    }

    if stack.len() != 1 {
        return Err(ChemEngineError::Parse(format!(
            "unmatched opening bracket in '{}'",
            compact
        )));
    }
    let top = stack.pop().expect("scan stack always holds the bottom frame");
    if top.elements.is_empty() {
        return Err(ChemEngineError::Parse(format!(
            "no element symbols in '{}'",
            compact
        )));
    }
    Ok(ChemicalFormula {
        source: compact,
        elements: top.elements,
        counts: top.counts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_parse_formula() {
        let parsed = parse_formula("C6H8O6").unwrap();
        let expected = HashMap::from([
            ("C".to_string(), 6),
            ("H".to_string(), 8),
            ("O".to_string(), 6),
        ]);
        assert_eq!(parsed.counts(), &expected);
        assert_eq!(parsed.elements(), &["C", "H", "O"]);

        let parsed = parse_formula("Na(NO3)2").unwrap();
        let expected = HashMap::from([
            ("Na".to_string(), 1),
            ("N".to_string(), 2),
            ("O".to_string(), 6),
        ]);
        assert_eq!(parsed.counts(), &expected);

        let parsed = parse_formula("H2O").unwrap();
        let expected = HashMap::from([("H".to_string(), 2), ("O".to_string(), 1)]);
        assert_eq!(parsed.counts(), &expected);

        // repeated symbols accumulate
        let parsed = parse_formula("C5H6OOH").unwrap();
        let expected = HashMap::from([
            ("C".to_string(), 5),
            ("H".to_string(), 7),
            ("O".to_string(), 2),
        ]);
        assert_eq!(parsed.counts(), &expected);
    }

    #[test]
    fn test_nested_groups() {
        let parsed = parse_formula("Ca(OH)2").unwrap();
        let expected = HashMap::from([
            ("Ca".to_string(), 1),
            ("O".to_string(), 2),
            ("H".to_string(), 2),
        ]);
        assert_eq!(parsed.counts(), &expected);

        let parsed = parse_formula("Mg(C(OH)2)3").unwrap();
        let expected = HashMap::from([
            ("Mg".to_string(), 1),
            ("C".to_string(), 3),
            ("O".to_string(), 6),
            ("H".to_string(), 6),
        ]);
        assert_eq!(parsed.counts(), &expected);

        let parsed = parse_formula("K3[Fe(CN)6]").unwrap();
        let expected = HashMap::from([
            ("K".to_string(), 3),
            ("Fe".to_string(), 1),
            ("C".to_string(), 6),
            ("N".to_string(), 6),
        ]);
        assert_eq!(parsed.counts(), &expected);
    }

    #[test]
    fn test_whitespace_ignored() {
        let parsed = parse_formula(" Na Cl ").unwrap();
        assert_eq!(parsed.count("Na"), 1);
        assert_eq!(parsed.count("Cl"), 1);
        assert_eq!(parsed.source(), "NaCl");
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            parse_formula("Xx2"),
            Err(ChemEngineError::Parse(_))
        ));
        assert!(matches!(
            parse_formula("Ca(OH2"),
            Err(ChemEngineError::Parse(_))
        ));
        assert!(matches!(
            parse_formula("CaOH)2"),
            Err(ChemEngineError::Parse(_))
        ));
        assert!(matches!(
            parse_formula("K3[Fe(CN)6)"),
            Err(ChemEngineError::Parse(_))
        ));
        assert!(matches!(parse_formula("2H"), Err(ChemEngineError::Parse(_))));
        assert!(matches!(parse_formula(""), Err(ChemEngineError::Parse(_))));
        assert!(matches!(parse_formula("()3"), Err(ChemEngineError::Parse(_))));
        assert!(matches!(parse_formula("H0"), Err(ChemEngineError::Parse(_))));
        // charges and hydrates are the caller's job to strip
        assert!(matches!(
            parse_formula("SO4^2-"),
            Err(ChemEngineError::Parse(_))
        ));
        assert!(matches!(
            parse_formula("CuSO4*5H2O"),
            Err(ChemEngineError::Parse(_))
        ));
    }

    #[test]
    fn test_molar_mass() {
        let (water, salt) = (parse_formula("H2O").unwrap(), parse_formula("NaCl").unwrap());
        assert_relative_eq!(water.molar_mass(), 18.015, epsilon = 1e-2);
        assert_relative_eq!(salt.molar_mass(), 58.44, epsilon = 1e-2);

        let nitrate = parse_formula("Ca(NO3)2").unwrap();
        assert_relative_eq!(nitrate.molar_mass(), 164.09, epsilon = 1e-1);
    }
}
