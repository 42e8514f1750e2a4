//! Balancing of chemical equations.
//!
//! The equation text is split into reactant and product formulas, the signed
//! element composition matrix is built, and its null space is computed over
//! exact fractions (`Ratio<i64>`, never floating point - rounding error must
//! not leak into integer ratios). A one-dimensional null space is scaled to
//! the minimal positive integer coefficient vector; dimension zero means the
//! equation is unbalanceable, dimension above one is reported as ambiguous
//! instead of silently picking one member of the family.
use crate::Balancer::parse_formula::{ChemicalFormula, parse_formula};
use crate::Balancer::stoich_matrix::{StoichMatrix, build_stoich_matrix};
use crate::errors::ChemEngineError;
use log::debug;
use nalgebra::DMatrix;
use num_integer::Integer;
use num_rational::Ratio;
use regex::Regex;
use serde::Serialize;

/// An equation with its sides parsed but coefficients still unknown.
/// Each species keeps the leading integer coefficient written in the input
/// (1 if absent), so rendered balanced equations re-parse cleanly.
#[derive(Debug, Clone)]
pub struct Equation {
    pub reactants: Vec<(usize, ChemicalFormula)>,
    pub products: Vec<(usize, ChemicalFormula)>,
}

/// A balanced equation: positive integer coefficient per species on each
/// side, gcd of all coefficients equal to 1.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BalancedEquation {
    pub original: String,
    pub reactants: Vec<(String, usize)>,
    pub products: Vec<(String, usize)>,
    /// rendered form, coefficient 1 omitted: `2H2 + O2 → 2H2O`
    pub balanced: String,
}

impl BalancedEquation {
    /// Coefficient of `species` on either side, by formula text.
    pub fn coefficient_of(&self, species: &str) -> Option<usize> {
        let target: String = species.chars().filter(|c| !c.is_whitespace()).collect();
        self.reactants
            .iter()
            .chain(self.products.iter())
            .find(|(formula, _)| *formula == target)
            .map(|(_, coeff)| *coeff)
    }
}

/// Cache/display key: the equation text with all whitespace removed.
/// Side order is preserved.
pub fn canonicalize_equation(text: &str) -> String {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}

// "2H2O" -> (2, H2O); a bare formula gets coefficient 1
fn parse_species(text: &str) -> Result<(usize, ChemicalFormula), ChemEngineError> {
    let trimmed = text.trim();
    let digits: String = trimmed
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    if digits.is_empty() {
        return Ok((1, parse_formula(trimmed)?));
    }
    let coefficient: usize = digits.parse().map_err(|_| {
        ChemEngineError::Parse(format!("coefficient '{}' too large in '{}'", digits, trimmed))
    })?;
    if coefficient == 0 {
        return Err(ChemEngineError::Parse(format!(
            "zero coefficient in '{}'",
            trimmed
        )));
    }
    Ok((coefficient, parse_formula(&trimmed[digits.len()..])?))
}

/// Split equation text into its two sides and parse every species.
/// Exactly one separator (`=`, `->`, `<->` or `→`) and at least one species
/// per side are required.
pub fn parse_equation(text: &str) -> Result<Equation, ChemEngineError> {
    let separator = Regex::new(r"<->|->|→|=").expect("separator pattern is valid");
    let found: Vec<_> = separator.find_iter(text).collect();
    if found.len() != 1 {
        return Err(ChemEngineError::Parse(format!(
            "equation must contain exactly one separator ('=' or '->'), found {} in '{}'",
            found.len(),
            text.trim()
        )));
    }
    let hit = &found[0];
    let parse_side = |side: &str, name: &str| -> Result<Vec<(usize, ChemicalFormula)>, ChemEngineError> {
        let mut species = Vec::new();
        for piece in side.split('+') {
            if piece.trim().is_empty() {
                return Err(ChemEngineError::Parse(format!(
                    "empty species on the {} side of '{}'",
                    name,
                    text.trim()
                )));
            }
            species.push(parse_species(piece)?);
        }
        Ok(species)
    };
    Ok(Equation {
        reactants: parse_side(&text[..hit.start()], "reactant")?,
        products: parse_side(&text[hit.end()..], "product")?,
    })
}

// Gauss-Jordan elimination over exact fractions; returns the null space
// basis of the matrix, one vector per free column.
fn null_space(matrix: &DMatrix<i64>) -> Vec<Vec<Ratio<i64>>> {
    let (nrows, ncols) = matrix.shape();
    let zero = Ratio::from_integer(0);
    let mut a: Vec<Vec<Ratio<i64>>> = (0..nrows)
        .map(|i| (0..ncols).map(|j| Ratio::from_integer(matrix[(i, j)])).collect())
        .collect();

    let mut pivot_cols: Vec<usize> = Vec::new();
    let mut row = 0;
    for col in 0..ncols {
        if row == nrows {
            break;
        }
        let Some(pivot_row) = (row..nrows).find(|&r| a[r][col] != zero) else {
            continue;
        };
        a.swap(row, pivot_row);
        let pivot = a[row][col];
        for j in col..ncols {
            a[row][j] /= pivot;
        }
        for r in 0..nrows {
            if r != row && a[r][col] != zero {
                let factor = a[r][col];
                for j in col..ncols {
                    let lead = a[row][j];
                    a[r][j] -= lead * factor;
                }
            }
        }
        pivot_cols.push(col);
        row += 1;
    }

    let free_cols: Vec<usize> = (0..ncols).filter(|c| !pivot_cols.contains(c)).collect();
    let mut basis = Vec::with_capacity(free_cols.len());
    for &free in &free_cols {
        let mut v = vec![zero; ncols];
        v[free] = Ratio::from_integer(1);
        // rows are in reduced form: x_pivot = -a[row][free] * x_free
        for (i, &pc) in pivot_cols.iter().enumerate() {
            v[pc] = -a[i][free];
        }
        basis.push(v);
    }
    basis
}

// clear denominators with their lcm, then reduce by the gcd of all entries
fn minimal_integer_vector(v: &[Ratio<i64>]) -> Vec<i64> {
    let lcm = v.iter().fold(1i64, |acc, r| acc.lcm(r.denom()));
    let ints: Vec<i64> = v.iter().map(|r| r.numer() * (lcm / r.denom())).collect();
    let gcd = ints.iter().fold(0i64, |acc, x| acc.gcd(x));
    ints.iter().map(|x| x / gcd).collect()
}

fn render_side(side: &[(String, usize)]) -> String {
    side.iter()
        .map(|(formula, coeff)| {
            if *coeff == 1 {
                formula.clone()
            } else {
                format!("{}{}", coeff, formula)
            }
        })
        .collect::<Vec<_>>()
        .join(" + ")
}

/// Balance an equation given as text, e.g. `"H2 + O2 = H2O"`.
pub fn balance_equation(text: &str) -> Result<BalancedEquation, ChemEngineError> {
    let equation = parse_equation(text)?;

    // leading coefficients scale the composition, the solver then sees the
    // species "as written" and an already-balanced input maps to itself
    let scale = |side: &[(usize, ChemicalFormula)]| -> Vec<ChemicalFormula> {
        side.iter().map(|(k, f)| f.scaled(*k)).collect()
    };
    let stoich: StoichMatrix =
        build_stoich_matrix(&scale(&equation.reactants), &scale(&equation.products))?;

    let basis = null_space(&stoich.matrix);
    debug!(
        "'{}': {} elements x {} species, null space dimension {}",
        text.trim(),
        stoich.matrix.nrows(),
        stoich.matrix.ncols(),
        basis.len()
    );
    match basis.len() {
        0 => return Err(ChemEngineError::Unbalanceable),
        1 => {}
        dim => return Err(ChemEngineError::AmbiguousBalance { dim }),
    }

    let mut coefficients = minimal_integer_vector(&basis[0]);
    if coefficients.iter().all(|&c| c < 0) {
        for c in coefficients.iter_mut() {
            *c = -*c;
        }
    }
    if coefficients.iter().any(|&c| c <= 0) {
        // a mixed-sign null vector puts some species on the wrong side of
        // the arrow; no positive assignment balances the equation as written
        return Err(ChemEngineError::Unbalanceable);
    }

    // fold the leading input coefficients back in and re-minimize
    let hints: Vec<i64> = equation
        .reactants
        .iter()
        .chain(equation.products.iter())
        .map(|(k, _)| *k as i64)
        .collect();
    let folded: Vec<i64> = coefficients
        .iter()
        .zip(hints.iter())
        .map(|(c, k)| c * k)
        .collect();
    let gcd = folded.iter().fold(0i64, |acc, x| acc.gcd(x));
    let folded: Vec<usize> = folded.iter().map(|x| (x / gcd) as usize).collect();

    let n_reactants = equation.reactants.len();
    let reactants: Vec<(String, usize)> = equation
        .reactants
        .iter()
        .enumerate()
        .map(|(j, (_, f))| (f.source().to_string(), folded[j]))
        .collect();
    let products: Vec<(String, usize)> = equation
        .products
        .iter()
        .enumerate()
        .map(|(j, (_, f))| (f.source().to_string(), folded[n_reactants + j]))
        .collect();

    let balanced = format!("{} → {}", render_side(&reactants), render_side(&products));
    Ok(BalancedEquation {
        original: text.trim().to_string(),
        reactants,
        products,
        balanced,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_equation_shapes() {
        let eq = parse_equation("H2 + O2 = H2O").unwrap();
        assert_eq!(eq.reactants.len(), 2);
        assert_eq!(eq.products.len(), 1);

        let eq = parse_equation("2H2 + O2 -> 2H2O").unwrap();
        assert_eq!(eq.reactants[0].0, 2);
        assert_eq!(eq.products[0].0, 2);
    }

    #[test]
    fn test_parse_equation_errors() {
        // no separator
        assert!(matches!(
            parse_equation("H2 + O2"),
            Err(ChemEngineError::Parse(_))
        ));
        // two separators
        assert!(matches!(
            parse_equation("H2 = O2 = H2O"),
            Err(ChemEngineError::Parse(_))
        ));
        // empty species between pluses
        assert!(matches!(
            parse_equation("H2 + + O2 = H2O"),
            Err(ChemEngineError::Parse(_))
        ));
        // empty product side
        assert!(matches!(
            parse_equation("H2 + O2 = "),
            Err(ChemEngineError::Parse(_))
        ));
    }

    #[test]
    fn test_null_space_dimension() {
        // water formation: 2 elements, 3 species, nullity 1
        let m = DMatrix::from_row_slice(2, 3, &[2, 0, -2, 0, 2, -1]);
        assert_eq!(null_space(&m).len(), 1);
        // full-rank square matrix, nullity 0
        let m = DMatrix::from_row_slice(2, 2, &[2, -2, 1, -2]);
        assert_eq!(null_space(&m).len(), 0);
    }

    #[test]
    fn test_minimal_integer_vector() {
        let v = vec![
            Ratio::new(1, 2),
            Ratio::new(1, 3),
            Ratio::from_integer(1),
        ];
        assert_eq!(minimal_integer_vector(&v), vec![3, 2, 6]);
    }
}
