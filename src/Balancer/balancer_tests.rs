#[cfg(test)]
mod tests {
    use crate::Balancer::equation_balancer::{balance_equation, parse_equation};
    use crate::Balancer::parse_formula::ChemicalFormula;
    use crate::Balancer::stoich_matrix::build_stoich_matrix;
    use crate::errors::ChemEngineError;
    use num_integer::Integer;

    // the two invariants of every successful balance: the signed composition
    // matrix maps the coefficient vector to zero exactly over the integers,
    // and the coefficients share no common divisor
    fn verify_exact_balance(equation: &str) {
        let balanced = balance_equation(equation).unwrap();
        let parsed = parse_equation(equation).unwrap();
        let side = |v: &[(usize, ChemicalFormula)]| -> Vec<ChemicalFormula> {
            v.iter().map(|(_, f)| f.clone()).collect()
        };
        let sm = build_stoich_matrix(&side(&parsed.reactants), &side(&parsed.products)).unwrap();
        let coefficients: Vec<i64> = balanced
            .reactants
            .iter()
            .chain(balanced.products.iter())
            .map(|(_, c)| *c as i64)
            .collect();
        for i in 0..sm.matrix.nrows() {
            let dot: i64 = (0..sm.matrix.ncols())
                .map(|j| sm.matrix[(i, j)] * coefficients[j])
                .sum();
            assert_eq!(
                dot, 0,
                "element {} unbalanced in '{}'",
                sm.elements[i], equation
            );
        }
        let gcd = coefficients.iter().fold(0i64, |acc, x| acc.gcd(x));
        assert_eq!(gcd, 1, "coefficients of '{}' are not minimal", equation);
    }

    #[test]
    fn test_water_formation() {
        let balanced = balance_equation("H2 + O2 = H2O").unwrap();
        assert_eq!(balanced.coefficient_of("H2"), Some(2));
        assert_eq!(balanced.coefficient_of("O2"), Some(1));
        assert_eq!(balanced.coefficient_of("H2O"), Some(2));
        assert_eq!(balanced.balanced, "2H2 + O2 → 2H2O");
    }

    #[test]
    fn test_classic_equations() {
        let cases: Vec<(&str, Vec<usize>)> = vec![
            ("C3H8 + O2 = CO2 + H2O", vec![1, 5, 3, 4]),
            ("Fe + O2 = Fe2O3", vec![4, 3, 2]),
            ("Al + HCl = AlCl3 + H2", vec![2, 6, 2, 3]),
            ("CO2 + H2O = C6H12O6 + O2", vec![6, 6, 1, 6]),
            ("Na2CO3 + HCl = NaCl + H2O + CO2", vec![1, 2, 2, 1, 1]),
            ("Ca(OH)2 + HCl = CaCl2 + H2O", vec![1, 2, 1, 2]),
            (
                "KMnO4 + HCl = KCl + MnCl2 + H2O + Cl2",
                vec![2, 16, 2, 2, 8, 5],
            ),
        ];
        for (equation, expected) in cases {
            let balanced = balance_equation(equation).unwrap();
            let got: Vec<usize> = balanced
                .reactants
                .iter()
                .chain(balanced.products.iter())
                .map(|(_, c)| *c)
                .collect();
            assert_eq!(got, expected, "wrong coefficients for '{}'", equation);
        }
    }

    #[test]
    fn test_balance_invariants() {
        for equation in [
            "H2 + O2 = H2O",
            "C3H8 + O2 = CO2 + H2O",
            "KMnO4 + HCl = KCl + MnCl2 + H2O + Cl2",
            "Ca(OH)2 + HCl = CaCl2 + H2O",
            "N2 + H2 -> NH3",
        ] {
            verify_exact_balance(equation);
        }
    }

    #[test]
    fn test_rebalancing_rendered_equation_is_idempotent() {
        let first = balance_equation("C3H8 + O2 = CO2 + H2O").unwrap();
        let second = balance_equation(&first.balanced).unwrap();
        assert_eq!(first.reactants, second.reactants);
        assert_eq!(first.products, second.products);
        assert_eq!(first.balanced, second.balanced);
    }

    #[test]
    fn test_already_balanced_non_minimal_input_reduces() {
        let balanced = balance_equation("4H2 + 2O2 = 4H2O").unwrap();
        assert_eq!(balanced.coefficient_of("H2"), Some(2));
        assert_eq!(balanced.coefficient_of("O2"), Some(1));
        assert_eq!(balanced.coefficient_of("H2O"), Some(2));
    }

    #[test]
    fn test_arrow_separators() {
        for equation in ["H2 + O2 -> H2O", "H2 + O2 → H2O", "H2 + O2 <-> H2O"] {
            let balanced = balance_equation(equation).unwrap();
            assert_eq!(balanced.coefficient_of("H2O"), Some(2));
        }
    }

    #[test]
    fn test_missing_separator_is_parse_error() {
        assert!(matches!(
            balance_equation("H2 + O2"),
            Err(ChemEngineError::Parse(_))
        ));
    }

    #[test]
    fn test_element_mismatch_is_structural() {
        assert!(matches!(
            balance_equation("H2 + O2 = H2S"),
            Err(ChemEngineError::Structural(_))
        ));
    }

    #[test]
    fn test_trivial_null_space_is_unbalanceable() {
        assert!(matches!(
            balance_equation("H2O = H2O2"),
            Err(ChemEngineError::Unbalanceable)
        ));
    }

    #[test]
    fn test_mixed_sign_solution_is_unbalanceable() {
        // the only null vector puts H2 on the wrong side of the arrow
        assert!(matches!(
            balance_equation("H2 + H2O = H2O2"),
            Err(ChemEngineError::Unbalanceable)
        ));
    }

    #[test]
    fn test_independent_reactions_are_ambiguous() {
        // carbon combustion and water formation superimposed: two independent
        // balances, no canonical answer
        let err = balance_equation("C + O2 + H2 = CO2 + H2O").unwrap_err();
        assert_eq!(err, ChemEngineError::AmbiguousBalance { dim: 2 });
    }
}
