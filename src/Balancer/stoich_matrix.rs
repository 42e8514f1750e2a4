//! Element composition matrix of a reaction: one row per distinct element,
//! one column per species. Reactant columns carry the atom counts, product
//! columns carry the negated counts, so a coefficient vector balances the
//! reaction exactly when the matrix maps it to zero.
use crate::Balancer::parse_formula::ChemicalFormula;
use crate::errors::ChemEngineError;
use nalgebra::DMatrix;
use std::collections::HashSet;

#[derive(Debug, Clone)]
pub struct StoichMatrix {
    /// rows of the matrix, in first-seen element order
    pub elements: Vec<String>,
    /// elements x species, signed atom counts
    pub matrix: DMatrix<i64>,
    pub n_reactants: usize,
}

/// Build the signed composition matrix for `reactants` vs `products`.
///
/// Both sides must be non-empty and must contain exactly the same element
/// set - a necessary precondition for balanceability, checked here before
/// any linear algebra is attempted.
pub fn build_stoich_matrix(
    reactants: &[ChemicalFormula],
    products: &[ChemicalFormula],
) -> Result<StoichMatrix, ChemEngineError> {
    if reactants.is_empty() || products.is_empty() {
        return Err(ChemEngineError::Structural(
            "equation needs at least one species on each side".to_string(),
        ));
    }

    let side_elements = |side: &[ChemicalFormula]| -> HashSet<String> {
        side.iter()
            .flat_map(|f| f.elements().iter().cloned())
            .collect()
    };
    let reactant_set = side_elements(reactants);
    let product_set = side_elements(products);
    if reactant_set != product_set {
        let mut only: Vec<String> = reactant_set
            .symmetric_difference(&product_set)
            .cloned()
            .collect();
        only.sort();
        return Err(ChemEngineError::Structural(format!(
            "elements present on one side only: {}",
            only.join(", ")
        )));
    }

    // row order = first-seen across reactants then products
    let mut elements: Vec<String> = Vec::new();
    for formula in reactants.iter().chain(products.iter()) {
        for el in formula.elements() {
            if !elements.contains(el) {
                elements.push(el.clone());
            }
        }
    }

    let n_species = reactants.len() + products.len();
    let mut matrix = DMatrix::<i64>::zeros(elements.len(), n_species);
    for (j, formula) in reactants.iter().enumerate() {
        for (i, el) in elements.iter().enumerate() {
            matrix[(i, j)] = formula.count(el) as i64;
        }
    }
    for (j, formula) in products.iter().enumerate() {
        for (i, el) in elements.iter().enumerate() {
            matrix[(i, j + reactants.len())] = -(formula.count(el) as i64);
        }
    }

    Ok(StoichMatrix {
        elements,
        matrix,
        n_reactants: reactants.len(),
    })
}
