//! Molar mass capability of the engine.
//!
//! Mass-based stoichiometry needs a molar mass per species. The capability is
//! an explicit trait with two variants selected once at engine construction:
//! the precise periodic-table variant, and a deterministic unity fallback
//! (every species 1 g/mol) whose results are flagged approximate downstream.
//! There is no hidden global and no silent mock swap.
use crate::Balancer::parse_formula::ChemicalFormula;
use crate::settings::MolarMassMode;
use enum_dispatch::enum_dispatch;
use log::warn;

#[enum_dispatch]
pub trait MolarMassProvider {
    /// Molar mass of a parsed species, g/mol.
    fn molar_mass(&self, formula: &ChemicalFormula) -> f64;
    /// False for fallback variants whose masses are placeholders; callers
    /// must mark derived quantities approximate.
    fn is_precise(&self) -> bool;
}

/// Standard atomic masses from the crate's element table. Every formula that
/// survived parsing has a defined mass here.
#[derive(Debug, Clone, Default)]
pub struct PeriodicTableMasses;

impl MolarMassProvider for PeriodicTableMasses {
    fn molar_mass(&self, formula: &ChemicalFormula) -> f64 {
        formula.molar_mass()
    }
    fn is_precise(&self) -> bool {
        true
    }
}

/// Deterministic fallback: 1 g/mol for every species, which reduces mass
/// stoichiometry to the bare molar ratio.
#[derive(Debug, Clone, Default)]
pub struct UnityMasses;

impl MolarMassProvider for UnityMasses {
    fn molar_mass(&self, _formula: &ChemicalFormula) -> f64 {
        1.0
    }
    fn is_precise(&self) -> bool {
        false
    }
}

#[derive(Debug, Clone)]
#[enum_dispatch(MolarMassProvider)]
pub enum MolarMassEnum {
    PeriodicTable(PeriodicTableMasses),
    Unity(UnityMasses),
}

pub fn create_molar_mass_provider(mode: &MolarMassMode) -> MolarMassEnum {
    match mode {
        MolarMassMode::PeriodicTable => MolarMassEnum::PeriodicTable(PeriodicTableMasses),
        MolarMassMode::Unity => MolarMassEnum::Unity(UnityMasses),
    }
}

pub fn create_molar_mass_by_name(name: &str) -> MolarMassEnum {
    match name {
        "periodic_table" | "precise" | "table" => {
            MolarMassEnum::PeriodicTable(PeriodicTableMasses)
        }
        "unity" | "fallback" => MolarMassEnum::Unity(UnityMasses),
        other => {
            warn!(
                "unknown molar mass provider '{}', falling back to periodic_table",
                other
            );
            MolarMassEnum::PeriodicTable(PeriodicTableMasses)
        }
    }
}
