//! Stoichiometric amount conversion over a balanced equation.
//!
//! Given a known amount of one species, the amount of another follows from
//! the ratio of their coefficients. Mass conversions go through the injected
//! molar mass capability; when the fallback variant is active the result is
//! the bare mol-based approximation and says so in its `approximate` flag.
use crate::Balancer::equation_balancer::BalancedEquation;
use crate::Balancer::parse_formula::parse_formula;
use crate::errors::ChemEngineError;
use crate::molar_mass_api::{MolarMassEnum, MolarMassProvider};
use log::warn;
use serde::Serialize;

/// Ideal gas molar volume at STP, L/mol. Both species of a gas-volume
/// conversion scale by it, so it cancels out of the arithmetic.
pub const MOLAR_VOLUME_STP: f64 = 22.414;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoichiometryResult {
    pub given_species: String,
    pub given_amount: f64,
    pub given_coefficient: usize,
    pub target_species: String,
    pub target_amount: f64,
    pub target_coefficient: usize,
    pub molar_ratio: f64,
    pub unit: String,
    /// true when the unity molar mass fallback stood in for real masses
    pub approximate: bool,
}

/// Convert `given_amount` of `given_species` into the corresponding amount
/// of `target_species`, per the balanced coefficients.
///
/// Units: `"mol"` multiplies by the molar ratio; `"g"` additionally converts
/// through both molar masses; `"L"` treats both species as ideal gases at
/// STP, which algebraically reduces to the molar ratio. An unrecognized unit
/// is treated as `"mol"`.
pub fn stoichiometric_amount(
    balanced: &BalancedEquation,
    given_species: &str,
    given_amount: f64,
    target_species: &str,
    unit: &str,
    masses: &MolarMassEnum,
) -> Result<StoichiometryResult, ChemEngineError> {
    if !given_amount.is_finite() || given_amount < 0.0 {
        return Err(ChemEngineError::Domain(format!(
            "given amount must be a non-negative finite number, got {}",
            given_amount
        )));
    }
    let given_coefficient = balanced
        .coefficient_of(given_species)
        .ok_or_else(|| ChemEngineError::NotFound(given_species.to_string()))?;
    let target_coefficient = balanced
        .coefficient_of(target_species)
        .ok_or_else(|| ChemEngineError::NotFound(target_species.to_string()))?;
    let molar_ratio = target_coefficient as f64 / given_coefficient as f64;

    let (target_amount, approximate) = match unit {
        "g" => {
            let given_formula = parse_formula(given_species)?;
            let target_formula = parse_formula(target_species)?;
            if !masses.is_precise() {
                warn!(
                    "molar mass fallback active, '{}' amount is a mol-based approximation",
                    target_species
                );
            }
            let amount = given_amount / masses.molar_mass(&given_formula)
                * molar_ratio
                * masses.molar_mass(&target_formula);
            (amount, !masses.is_precise())
        }
        "L" => (given_amount * molar_ratio, false),
        _ => (given_amount * molar_ratio, false),
    };

    Ok(StoichiometryResult {
        given_species: given_species.to_string(),
        given_amount,
        given_coefficient,
        target_species: target_species.to_string(),
        target_amount,
        target_coefficient,
        molar_ratio,
        unit: unit.to_string(),
        approximate,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Balancer::equation_balancer::balance_equation;
    use crate::molar_mass_api::create_molar_mass_by_name;
    use approx::assert_relative_eq;

    #[test]
    fn test_mol_ratio() {
        let balanced = balance_equation("H2 + O2 = H2O").unwrap();
        let masses = create_molar_mass_by_name("periodic_table");
        let result =
            stoichiometric_amount(&balanced, "H2", 4.0, "H2O", "mol", &masses).unwrap();
        assert_eq!(result.given_coefficient, 2);
        assert_eq!(result.target_coefficient, 2);
        assert_relative_eq!(result.molar_ratio, 1.0);
        assert_relative_eq!(result.target_amount, 4.0);
        assert!(!result.approximate);

        let result =
            stoichiometric_amount(&balanced, "H2", 4.0, "O2", "mol", &masses).unwrap();
        assert_relative_eq!(result.molar_ratio, 0.5);
        assert_relative_eq!(result.target_amount, 2.0);
    }

    #[test]
    fn test_mass_conversion() {
        // 2H2 + O2 -> 2H2O: 4 g of H2 yields 4/2.016 * 1 * 31.998 g of O2... per ratio 0.5
        let balanced = balance_equation("H2 + O2 = H2O").unwrap();
        let masses = create_molar_mass_by_name("periodic_table");
        let result = stoichiometric_amount(&balanced, "H2", 4.0, "O2", "g", &masses).unwrap();
        // 4 g H2 = 1.984 mol, half as many mol O2, times 31.998 g/mol
        assert_relative_eq!(result.target_amount, 4.0 / 2.016 * 0.5 * 31.998, epsilon = 1e-6);
        assert!(!result.approximate);
    }

    #[test]
    fn test_mass_fallback_is_flagged() {
        let balanced = balance_equation("H2 + O2 = H2O").unwrap();
        let masses = create_molar_mass_by_name("unity");
        let result = stoichiometric_amount(&balanced, "H2", 4.0, "O2", "g", &masses).unwrap();
        assert!(result.approximate);
        // unity masses reduce the conversion to the bare molar ratio
        assert_relative_eq!(result.target_amount, 2.0);
    }

    #[test]
    fn test_unknown_species() {
        let balanced = balance_equation("H2 + O2 = H2O").unwrap();
        let masses = create_molar_mass_by_name("periodic_table");
        let err =
            stoichiometric_amount(&balanced, "H2", 1.0, "NaCl", "mol", &masses).unwrap_err();
        assert_eq!(err, ChemEngineError::NotFound("NaCl".to_string()));
    }

    #[test]
    fn test_bad_amount() {
        let balanced = balance_equation("H2 + O2 = H2O").unwrap();
        let masses = create_molar_mass_by_name("periodic_table");
        let err =
            stoichiometric_amount(&balanced, "H2", -1.0, "H2O", "mol", &masses).unwrap_err();
        assert!(matches!(err, ChemEngineError::Domain(_)));
    }
}
